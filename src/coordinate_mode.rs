//! # Coordinate mode selection
//!
//! A panel asks for one x-axis among [`CoordinateMode`]. Whether it can be honoured
//! depends on the trajectory table (loaded? series present?) and, for the
//! perihelion-relative axis, on the reference event. Any missing prerequisite falls back
//! to the time axis, and the fallback is *reported* through a [`FallbackReason`] so that
//! the renderer labels the axis it actually got.
//!
//! ## Pipeline
//!
//! 1. [`Availability::from_mapper`] collects the prerequisites.
//! 2. [`select_mode`] picks the mode or the fallback reason (pure dispatch).
//! 3. [`CoordinateSelector`] computes the axis values once per panel:
//!    * `time` – the query epochs themselves,
//!    * `radial` / `latitude` – interpolated series,
//!    * `longitude` – interpolated, folded into `[0, 360)` unless configured otherwise,
//!    * `perihelion_relative` – unwrapped longitudes, [`offset`] from the reference
//!      longitude, then the single-pass [`filter`]; excluded samples become `NaN`.
//!
//! ## Example
//!
//! ```rust
//! use heliotraj::axis_params::AxisParams;
//! use heliotraj::coordinate_mode::{CoordinateMode, CoordinateSelector};
//! use heliotraj::mapper::TrajectoryMapper;
//! use heliotraj::reference::ReferenceEvent;
//! use heliotraj::trajectory_table::TrajectoryTable;
//!
//! let table = TrajectoryTable::builder(vec![0.0, 1.0, 2.0, 3.0])
//!     .longitude(vec![350.0, 355.0, 2.0, 8.0])
//!     .build()
//!     .unwrap();
//! let mapper = TrajectoryMapper::new(table);
//! let params = AxisParams::default();
//! let selector = CoordinateSelector::new(&mapper, &params);
//!
//! let reference = ReferenceEvent::resolve(&mapper, 2.0);
//! let axis = selector.select(CoordinateMode::PerihelionRelative, &[1.0, 2.0, 3.0], Some(&reference));
//! assert_eq!(axis.mode, CoordinateMode::PerihelionRelative);
//! assert!(axis.fallback.is_none());
//! ```
use std::fmt;
use std::str::FromStr;

use log::{info, trace};

use crate::angular_offset::offset;
use crate::axis_params::AxisParams;
use crate::constants::MJD;
use crate::heliotraj_errors::TrajectoryError;
use crate::mapper::{TrajectoryMapper, UnavailableReason};
use crate::monotonic_filter::{apply_mask, filter};
use crate::reference::{ReferenceEvent, ReferenceResolver};
use crate::time::TimeWindow;
use crate::trajectory_table::Quantity;

/// X-axis semantics of a panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CoordinateMode {
    Time,
    Radial,
    Longitude,
    Latitude,
    /// Signed Carrington-longitude distance from the reference event, degrees.
    PerihelionRelative,
}

impl CoordinateMode {
    /// Trajectory series the mode is derived from; `None` for the time axis.
    pub fn quantity(&self) -> Option<Quantity> {
        match self {
            CoordinateMode::Time => None,
            CoordinateMode::Radial => Some(Quantity::Radial),
            CoordinateMode::Longitude | CoordinateMode::PerihelionRelative => {
                Some(Quantity::Longitude)
            }
            CoordinateMode::Latitude => Some(Quantity::Latitude),
        }
    }
}

impl fmt::Display for CoordinateMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CoordinateMode::Time => "time",
            CoordinateMode::Radial => "radial",
            CoordinateMode::Longitude => "longitude",
            CoordinateMode::Latitude => "latitude",
            CoordinateMode::PerihelionRelative => "perihelion_relative",
        };
        f.write_str(name)
    }
}

impl FromStr for CoordinateMode {
    type Err = TrajectoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "time" => Ok(CoordinateMode::Time),
            "perihelion_relative" | "degrees_from_perihelion" => {
                Ok(CoordinateMode::PerihelionRelative)
            }
            other => match other.parse::<Quantity>() {
                Ok(Quantity::Radial) => Ok(CoordinateMode::Radial),
                Ok(Quantity::Longitude) => Ok(CoordinateMode::Longitude),
                Ok(Quantity::Latitude) => Ok(CoordinateMode::Latitude),
                Err(_) => Err(TrajectoryError::InvalidCoordinateMode(s.to_string())),
            },
        }
    }
}

/// Why a panel fell back to the time axis.
#[derive(Debug, Clone, PartialEq)]
pub enum FallbackReason {
    /// The trajectory table is not loaded; carries the load error message.
    TableNotLoaded(String),
    /// The table has no series for this quantity.
    SeriesUnavailable(Quantity),
    /// No reference event could be found for the panel.
    ReferenceUnresolved,
    /// The reference epoch has no finite longitude (e.g. outside the table coverage).
    ReferenceLongitudeUnavailable,
}

impl fmt::Display for FallbackReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FallbackReason::TableNotLoaded(msg) => write!(f, "trajectory table not loaded ({msg})"),
            FallbackReason::SeriesUnavailable(q) => write!(f, "no {q} series in trajectory table"),
            FallbackReason::ReferenceUnresolved => f.write_str("reference event unresolved"),
            FallbackReason::ReferenceLongitudeUnavailable => {
                f.write_str("reference event longitude unavailable")
            }
        }
    }
}

impl From<UnavailableReason> for FallbackReason {
    fn from(reason: UnavailableReason) -> Self {
        match reason {
            UnavailableReason::NotLoaded(msg) => FallbackReason::TableNotLoaded(msg),
            UnavailableReason::MissingSeries(q) => FallbackReason::SeriesUnavailable(q),
        }
    }
}

/// Prerequisites of every coordinate mode.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Availability {
    pub table_loaded: bool,
    /// Load error message when the table is not loaded.
    pub load_error: Option<String>,
    pub radial: bool,
    pub longitude: bool,
    pub latitude: bool,
    /// A reference epoch was found for the panel.
    pub reference_resolved: bool,
    /// The reference epoch has a finite longitude.
    pub reference_longitude: bool,
}

impl Availability {
    /// Collect the prerequisites offered by `mapper` and an optional reference event.
    pub fn from_mapper(mapper: &TrajectoryMapper, reference: Option<&ReferenceEvent>) -> Self {
        let has = |q: Quantity| mapper.table().is_some_and(|t| t.has(q));
        Availability {
            table_loaded: mapper.is_loaded(),
            load_error: mapper.load_error().map(|e| e.to_string()),
            radial: has(Quantity::Radial),
            longitude: has(Quantity::Longitude),
            latitude: has(Quantity::Latitude),
            reference_resolved: reference.is_some(),
            reference_longitude: reference.is_some_and(ReferenceEvent::is_resolved),
        }
    }

    pub fn has(&self, quantity: Quantity) -> bool {
        match quantity {
            Quantity::Radial => self.radial,
            Quantity::Longitude => self.longitude,
            Quantity::Latitude => self.latitude,
        }
    }
}

/// Decide which mode a panel gets.
///
/// Return
/// -----------------
/// * `Ok(requested)` when every prerequisite holds,
/// * `Err(reason)` otherwise; the caller then uses [`CoordinateMode::Time`].
pub fn select_mode(
    requested: CoordinateMode,
    availability: &Availability,
) -> Result<CoordinateMode, FallbackReason> {
    let Some(quantity) = requested.quantity() else {
        return Ok(CoordinateMode::Time);
    };
    if !availability.table_loaded {
        return Err(FallbackReason::TableNotLoaded(
            availability.load_error.clone().unwrap_or_default(),
        ));
    }
    if !availability.has(quantity) {
        return Err(FallbackReason::SeriesUnavailable(quantity));
    }
    if requested == CoordinateMode::PerihelionRelative {
        if !availability.reference_resolved {
            return Err(FallbackReason::ReferenceUnresolved);
        }
        if !availability.reference_longitude {
            return Err(FallbackReason::ReferenceLongitudeUnavailable);
        }
    }
    Ok(requested)
}

/// Axis values computed for one panel.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisSelection {
    pub requested: CoordinateMode,
    /// Mode actually used; [`CoordinateMode::Time`] on fallback.
    pub mode: CoordinateMode,
    /// One value per query epoch.
    pub values: Vec<f64>,
    /// Single-pass mask of the perihelion-relative axis, when the filter ran.
    pub mask: Option<Vec<bool>>,
    pub fallback: Option<FallbackReason>,
}

impl AxisSelection {
    pub fn is_fallback(&self) -> bool {
        self.fallback.is_some()
    }
}

/// Computes panel axes over one mapper with fixed parameters.
#[derive(Debug, Clone, Copy)]
pub struct CoordinateSelector<'a> {
    mapper: &'a TrajectoryMapper,
    params: &'a AxisParams,
}

impl<'a> CoordinateSelector<'a> {
    pub fn new(mapper: &'a TrajectoryMapper, params: &'a AxisParams) -> Self {
        CoordinateSelector { mapper, params }
    }

    /// Compute the axis for `query`, falling back to time when a prerequisite is missing.
    ///
    /// `reference` is only consulted for [`CoordinateMode::PerihelionRelative`].
    pub fn select(
        &self,
        requested: CoordinateMode,
        query: &[MJD],
        reference: Option<&ReferenceEvent>,
    ) -> AxisSelection {
        let availability = Availability::from_mapper(self.mapper, reference);
        let outcome = select_mode(requested, &availability)
            .and_then(|mode| self.axis_values(mode, query, reference).map(|v| (mode, v)));

        match outcome {
            Ok((mode, (values, mask))) => AxisSelection {
                requested,
                mode,
                values,
                mask,
                fallback: None,
            },
            Err(reason) => {
                info!("Axis '{requested}' falls back to time: {reason}");
                AxisSelection {
                    requested,
                    mode: CoordinateMode::Time,
                    values: query.to_vec(),
                    mask: None,
                    fallback: Some(reason),
                }
            }
        }
    }

    /// Resolve the reference event around the window centre, then [`Self::select`].
    ///
    /// The resolver is only called for [`CoordinateMode::PerihelionRelative`]. With
    /// [`AxisParams::max_reference_distance`] set, a reference farther than that from the
    /// centre is treated as unresolved.
    pub fn select_for_window(
        &self,
        requested: CoordinateMode,
        window: &TimeWindow,
        query: &[MJD],
        resolver: &dyn ReferenceResolver,
    ) -> AxisSelection {
        let reference = if requested == CoordinateMode::PerihelionRelative {
            let center = window.center();
            resolver
                .resolve(center)
                .filter(|t| match self.params.max_reference_distance() {
                    Some(max) => (t - center).abs() <= max,
                    None => true,
                })
                .map(|t| ReferenceEvent::resolve(self.mapper, t))
        } else {
            None
        };
        self.select(requested, query, reference.as_ref())
    }

    fn axis_values(
        &self,
        mode: CoordinateMode,
        query: &[MJD],
        reference: Option<&ReferenceEvent>,
    ) -> Result<(Vec<f64>, Option<Vec<bool>>), FallbackReason> {
        let mapped = |quantity: Quantity, unwrap: bool| {
            self.mapper
                .map(query, quantity, unwrap)
                .into_values()
                .ok_or_else(|| match self.mapper.availability(quantity) {
                    Err(reason) => FallbackReason::from(reason),
                    Ok(()) => FallbackReason::SeriesUnavailable(quantity),
                })
        };

        match mode {
            CoordinateMode::Time => Ok((query.to_vec(), None)),
            CoordinateMode::Radial => Ok((mapped(Quantity::Radial, false)?, None)),
            CoordinateMode::Latitude => Ok((mapped(Quantity::Latitude, false)?, None)),
            CoordinateMode::Longitude => Ok((
                mapped(Quantity::Longitude, !self.params.wrap_longitude_axis())?,
                None,
            )),
            CoordinateMode::PerihelionRelative => {
                let reference_lon = reference
                    .map(|r| r.longitude)
                    .ok_or(FallbackReason::ReferenceUnresolved)?;
                let longitudes = mapped(Quantity::Longitude, true)?;
                let relative = offset(&longitudes, reference_lon);
                if !self.params.monotonic_filter() {
                    return Ok((relative, None));
                }
                let mask = filter(&relative, self.params.tolerance_factor());
                trace!(
                    "Single-pass filter kept {}/{} samples (tolerance {})",
                    mask.iter().filter(|&&k| k).count(),
                    mask.len(),
                    self.params.tolerance_factor()
                );
                Ok((apply_mask(&relative, &mask), Some(mask)))
            }
        }
    }
}
