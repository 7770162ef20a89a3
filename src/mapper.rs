//! # Trajectory mapper
//!
//! [`TrajectoryMapper`] interpolates a loaded [`TrajectoryTable`] at arbitrary query
//! epochs and owns the circular-unwrap logic for the Carrington longitude.
//!
//! ## Overview
//!
//! * **Radial / latitude** – direct piecewise-linear interpolation against `times`.
//! * **Longitude** – the table longitudes are first *unwrapped* once at construction:
//!   wherever two adjacent samples differ by more than 180°, a running ±360° offset is
//!   accumulated so that the series becomes continuous (`[350, 355, 2, 8]` becomes
//!   `[350, 355, 362, 368]`). Queries interpolate the continuous series; with
//!   `unwrap = false` each finite result is folded back into `[0, 360)`.
//!   A table without any crossing keeps its raw series.
//!
//! ## Availability
//!
//! A mapper is either *loaded* or *not loaded*. Loading never panics and never returns an
//! error to the render loop: a failed load is kept inside the mapper and every later
//! [`TrajectoryMapper::map`] call answers [`MappedSeries::Unavailable`]. The same happens
//! when the table lacks the requested series.
//!
//! ## Thread safety
//!
//! After construction a mapper is read-only, so it is `Send + Sync` and can serve
//! concurrent `map` calls without locking.
//!
//! ## Example
//!
//! ```rust
//! use heliotraj::mapper::TrajectoryMapper;
//! use heliotraj::trajectory_table::{Quantity, TrajectoryTable};
//!
//! let table = TrajectoryTable::builder(vec![0.0, 1.0, 2.0, 3.0])
//!     .longitude(vec![350.0, 355.0, 2.0, 8.0])
//!     .build()
//!     .unwrap();
//! let mapper = TrajectoryMapper::new(table);
//!
//! let lon = mapper.map(&[1.5], Quantity::Longitude, true);
//! assert!((lon.values().unwrap()[0] - 358.5).abs() < 1e-12);
//! ```
use std::fmt;

use camino::Utf8Path;
use itertools::Itertools;
use log::{debug, warn};

use crate::angular_offset::wrap_positive;
use crate::constants::{Degree, FULL_TURN, HALF_TURN, MJD};
use crate::heliotraj_errors::TrajectoryError;
use crate::interpolation::{interp_linear, interp_many};
use crate::time::TimeWindow;
use crate::trajectory_table::table_file::TableFile;
use crate::trajectory_table::{Quantity, TrajectoryTable};

/// Why a series could not be mapped.
#[derive(Debug, Clone, PartialEq)]
pub enum UnavailableReason {
    /// The trajectory table failed to load; carries the load error message.
    NotLoaded(String),
    /// The table was loaded without this series.
    MissingSeries(Quantity),
}

impl fmt::Display for UnavailableReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnavailableReason::NotLoaded(msg) => write!(f, "trajectory table not loaded: {msg}"),
            UnavailableReason::MissingSeries(q) => {
                write!(f, "trajectory table has no {q} series")
            }
        }
    }
}

/// Outcome of a mapping call.
#[derive(Debug, Clone, PartialEq)]
pub enum MappedSeries {
    /// One value per query epoch, `NaN` where the epoch lies outside the table coverage.
    Mapped(Vec<f64>),
    /// The quantity cannot be mapped at all.
    Unavailable(UnavailableReason),
}

impl MappedSeries {
    pub fn is_mapped(&self) -> bool {
        matches!(self, MappedSeries::Mapped(_))
    }

    pub fn values(&self) -> Option<&[f64]> {
        match self {
            MappedSeries::Mapped(v) => Some(v),
            MappedSeries::Unavailable(_) => None,
        }
    }

    pub fn into_values(self) -> Option<Vec<f64>> {
        match self {
            MappedSeries::Mapped(v) => Some(v),
            MappedSeries::Unavailable(_) => None,
        }
    }

    pub fn unavailable_reason(&self) -> Option<&UnavailableReason> {
        match self {
            MappedSeries::Mapped(_) => None,
            MappedSeries::Unavailable(reason) => Some(reason),
        }
    }
}

#[derive(Debug)]
enum MapperState {
    Loaded {
        table: TrajectoryTable,
        /// Continuous longitude series; `None` when the raw series has no wrap crossing.
        unwrapped_longitude: Option<Vec<Degree>>,
    },
    NotLoaded(TrajectoryError),
}

/// Interpolates a [`TrajectoryTable`] at arbitrary epochs.
#[derive(Debug)]
pub struct TrajectoryMapper {
    state: MapperState,
}

impl TrajectoryMapper {
    /// Build a loaded mapper over an already validated table.
    pub fn new(table: TrajectoryTable) -> Self {
        let unwrapped_longitude = table.series(Quantity::Longitude).and_then(unwrap_degrees);
        TrajectoryMapper {
            state: MapperState::Loaded {
                table,
                unwrapped_longitude,
            },
        }
    }

    /// Load a trajectory file.
    ///
    /// Never fails: on any error the mapper is returned in the *not loaded* state and
    /// the error stays available through [`TrajectoryMapper::load_error`].
    pub fn load(path: &Utf8Path) -> Self {
        let mapper = Self::from_result(TrajectoryTable::load(path));
        match &mapper.state {
            MapperState::Loaded { table, .. } => debug!(
                "Loaded trajectory table {path}: {} samples over {}, series {:?}, longitude unwrapped: {}",
                table.len(),
                table.coverage(),
                table.quantities(),
                mapper.longitude_wraps()
            ),
            MapperState::NotLoaded(err) => {
                warn!("Trajectory table {path} not loaded: {err}")
            }
        }
        mapper
    }

    /// Wrap the outcome of a table load.
    pub fn from_result(result: Result<TrajectoryTable, TrajectoryError>) -> Self {
        match result {
            Ok(table) => Self::new(table),
            Err(err) => TrajectoryMapper {
                state: MapperState::NotLoaded(err),
            },
        }
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self.state, MapperState::Loaded { .. })
    }

    pub fn load_error(&self) -> Option<&TrajectoryError> {
        match &self.state {
            MapperState::Loaded { .. } => None,
            MapperState::NotLoaded(err) => Some(err),
        }
    }

    pub fn table(&self) -> Option<&TrajectoryTable> {
        match &self.state {
            MapperState::Loaded { table, .. } => Some(table),
            MapperState::NotLoaded(_) => None,
        }
    }

    /// Time coverage of the loaded table.
    pub fn coverage(&self) -> Option<TimeWindow> {
        self.table().map(TrajectoryTable::coverage)
    }

    /// True when the table longitude crosses the 0/360 boundary at least once.
    pub fn longitude_wraps(&self) -> bool {
        matches!(
            self.state,
            MapperState::Loaded {
                unwrapped_longitude: Some(_),
                ..
            }
        )
    }

    /// Check whether `quantity` can be mapped.
    pub fn availability(&self, quantity: Quantity) -> Result<(), UnavailableReason> {
        match &self.state {
            MapperState::NotLoaded(err) => Err(UnavailableReason::NotLoaded(err.to_string())),
            MapperState::Loaded { table, .. } if !table.has(quantity) => {
                Err(UnavailableReason::MissingSeries(quantity))
            }
            MapperState::Loaded { .. } => Ok(()),
        }
    }

    /// Interpolate `quantity` at each query epoch.
    ///
    /// Arguments
    /// -----------------
    /// * `query` – epochs (MJD), any order, possibly outside the table coverage.
    /// * `quantity` – series to interpolate.
    /// * `unwrap` – longitude only: `true` keeps the continuous value (may leave
    ///   `[0, 360)`), `false` folds it back into `[0, 360)`. Ignored for other quantities.
    ///
    /// Return
    /// -----------------
    /// * [`MappedSeries::Mapped`] with one value per query (`NaN` outside coverage). An
    ///   empty query yields an empty series.
    /// * [`MappedSeries::Unavailable`] if the mapper is not loaded or lacks the series.
    pub fn map(&self, query: &[MJD], quantity: Quantity, unwrap: bool) -> MappedSeries {
        let (table, unwrapped_longitude) = match &self.state {
            MapperState::NotLoaded(err) => {
                return MappedSeries::Unavailable(UnavailableReason::NotLoaded(err.to_string()))
            }
            MapperState::Loaded {
                table,
                unwrapped_longitude,
            } => (table, unwrapped_longitude),
        };
        let Some(raw) = table.series(quantity) else {
            return MappedSeries::Unavailable(UnavailableReason::MissingSeries(quantity));
        };

        match quantity {
            Quantity::Radial | Quantity::Latitude => {
                MappedSeries::Mapped(interp_many(table.times(), raw, query))
            }
            Quantity::Longitude => {
                let continuous = unwrapped_longitude.as_deref().unwrap_or(raw);
                let values = query.iter().map(|&t| {
                    let lon = interp_linear(table.times(), continuous, t);
                    if unwrap {
                        lon
                    } else {
                        wrap_positive(lon)
                    }
                });
                MappedSeries::Mapped(values.collect())
            }
        }
    }

    /// Same as [`TrajectoryMapper::map`] with the quantity given by name.
    ///
    /// An unknown name is a caller bug and is reported as
    /// [`TrajectoryError::InvalidQuantity`], distinct from data unavailability.
    pub fn map_named(
        &self,
        query: &[MJD],
        quantity: &str,
        unwrap: bool,
    ) -> Result<MappedSeries, TrajectoryError> {
        let quantity: Quantity = quantity.parse()?;
        Ok(self.map(query, quantity, unwrap))
    }

    /// Single-epoch convenience: `None` if the quantity is unavailable, `Some(NaN)` if
    /// `t` lies outside the coverage.
    pub fn map_at(&self, t: MJD, quantity: Quantity, unwrap: bool) -> Option<f64> {
        self.map(&[t], quantity, unwrap)
            .into_values()
            .and_then(|v| v.first().copied())
    }
}

/// Remove the 0/360 discontinuities of a longitude series.
///
/// Returns `None` when no two consecutive finite samples differ by more than 180°, so
/// that the raw series is used untouched. NaN samples are skipped by the scan: a crossing
/// hidden behind a gap is still detected, and the gap itself stays NaN.
fn unwrap_degrees(lon: &[Degree]) -> Option<Vec<Degree>> {
    // (first index, cumulative offset) for every crossing
    let mut offset = 0.0;
    let mut jumps = Vec::new();
    for ((_, a), (j, b)) in lon
        .iter()
        .enumerate()
        .filter(|(_, v)| v.is_finite())
        .tuple_windows()
    {
        let step = b - a;
        if step < -HALF_TURN {
            // 359 -> 1: keep climbing past 360
            offset += FULL_TURN;
            jumps.push((j, offset));
        } else if step > HALF_TURN {
            // 1 -> 359: keep descending below 0
            offset -= FULL_TURN;
            jumps.push((j, offset));
        }
    }
    if jumps.is_empty() {
        return None;
    }

    let mut jumps = jumps.into_iter().peekable();
    let mut current = 0.0;
    let unwrapped = lon
        .iter()
        .enumerate()
        .map(|(i, v)| {
            if let Some((_, off)) = jumps.next_if(|&(j, _)| j <= i) {
                current = off;
            }
            v + current
        })
        .collect();
    Some(unwrapped)
}
