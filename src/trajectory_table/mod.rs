//! # Trajectory tables: storage and ingestion
//!
//! A [`TrajectoryTable`] is the immutable, precomputed trajectory of one spacecraft: a
//! strictly increasing time axis (MJD, UTC) with up to three parallel value series.
//!
//! Data Model
//! -----------------
//! * `times` – sample epochs, **MJD (UTC)**, strictly ascending, at least 2 samples.
//! * `radial` – heliocentric distance in **solar radii** (file column `r_sun`).
//! * `longitude` – Carrington longitude in **degrees**, nominally `[0, 360)` (file column `carrington_lon`).
//! * `latitude` – Carrington latitude in **degrees**, `[-90, 90]` (file column `carrington_lat`).
//!
//! Any value series may be absent; if present it has exactly one value per epoch. A table
//! without any value series is rejected.
//!
//! Ingestion Sources
//! -----------------
//! Use the [`table_file::TableFile`](crate::trajectory_table::table_file::TableFile) trait (implemented for [`TrajectoryTable`]):
//! * **CSV** — [`csv_reader`](crate::trajectory_table::csv_reader), header row with the column names above.
//! * **Parquet** — [`parquet_reader`](crate::trajectory_table::parquet_reader), leaf columns with the same names.
//! * **In memory** — [`TrajectoryTable::builder`].
//!
//! See also
//! ------------
//! * [`crate::mapper::TrajectoryMapper`] – interpolates a table at arbitrary query times.
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::constants::{Degree, SolarRadius, MJD};
use crate::heliotraj_errors::TrajectoryError;
use crate::time::TimeWindow;

pub mod csv_reader;
pub mod parquet_reader;
pub mod table_file;

/// Name of the time column in trajectory files.
pub const TIMES_COLUMN: &str = "times";

/// A positional quantity carried by a [`TrajectoryTable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Quantity {
    /// Heliocentric distance (solar radii)
    Radial,
    /// Carrington longitude (degrees)
    Longitude,
    /// Carrington latitude (degrees)
    Latitude,
}

impl Quantity {
    pub const ALL: [Quantity; 3] = [Quantity::Radial, Quantity::Longitude, Quantity::Latitude];

    /// Column name used for this quantity in trajectory files.
    pub fn column_name(&self) -> &'static str {
        match self {
            Quantity::Radial => "r_sun",
            Quantity::Longitude => "carrington_lon",
            Quantity::Latitude => "carrington_lat",
        }
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Quantity::Radial => "radial",
            Quantity::Longitude => "longitude",
            Quantity::Latitude => "latitude",
        };
        f.write_str(name)
    }
}

impl FromStr for Quantity {
    type Err = TrajectoryError;

    /// Accepts the short names (`radial`, `longitude`, `latitude`) and the file column names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "radial" | "r_sun" => Ok(Quantity::Radial),
            "longitude" | "carrington_lon" => Ok(Quantity::Longitude),
            "latitude" | "carrington_lat" => Ok(Quantity::Latitude),
            _ => Err(TrajectoryError::InvalidQuantity(s.to_string())),
        }
    }
}

/// Immutable trajectory samples, validated at construction.
#[derive(Debug, Clone, PartialEq)]
pub struct TrajectoryTable {
    times: Vec<MJD>,
    radial: Option<Vec<SolarRadius>>,
    longitude: Option<Vec<Degree>>,
    latitude: Option<Vec<Degree>>,
}

impl TrajectoryTable {
    /// Start building a table over the given time axis.
    ///
    /// # Example
    ///
    /// ```rust
    /// use heliotraj::trajectory_table::TrajectoryTable;
    ///
    /// let table = TrajectoryTable::builder(vec![0.0, 1.0, 2.0])
    ///     .radial(vec![30.0, 20.0, 30.0])
    ///     .longitude(vec![350.0, 5.0, 20.0])
    ///     .build()
    ///     .unwrap();
    /// assert_eq!(table.len(), 3);
    /// ```
    pub fn builder(times: Vec<MJD>) -> TrajectoryTableBuilder {
        TrajectoryTableBuilder {
            times,
            radial: None,
            longitude: None,
            latitude: None,
        }
    }

    pub fn len(&self) -> usize {
        self.times.len()
    }

    /// Always false for a validated table; provided for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    pub fn times(&self) -> &[MJD] {
        &self.times
    }

    /// Values of `quantity`, or `None` if the table was loaded without that series.
    pub fn series(&self, quantity: Quantity) -> Option<&[f64]> {
        match quantity {
            Quantity::Radial => self.radial.as_deref(),
            Quantity::Longitude => self.longitude.as_deref(),
            Quantity::Latitude => self.latitude.as_deref(),
        }
    }

    pub fn has(&self, quantity: Quantity) -> bool {
        self.series(quantity).is_some()
    }

    /// Quantities present in this table, in [`Quantity::ALL`] order.
    pub fn quantities(&self) -> Vec<Quantity> {
        Quantity::ALL
            .into_iter()
            .filter(|q| self.has(*q))
            .collect()
    }

    /// Time coverage `[times[0], times[N-1]]`.
    pub fn coverage(&self) -> TimeWindow {
        TimeWindow::spanning(self.times[0], self.times[self.times.len() - 1])
    }
}

/// Builder for [`TrajectoryTable`], with validation.
#[derive(Debug, Clone)]
pub struct TrajectoryTableBuilder {
    times: Vec<MJD>,
    radial: Option<Vec<SolarRadius>>,
    longitude: Option<Vec<Degree>>,
    latitude: Option<Vec<Degree>>,
}

impl TrajectoryTableBuilder {
    pub fn radial(mut self, v: Vec<SolarRadius>) -> Self {
        self.radial = Some(v);
        self
    }
    pub fn longitude(mut self, v: Vec<Degree>) -> Self {
        self.longitude = Some(v);
        self
    }
    pub fn latitude(mut self, v: Vec<Degree>) -> Self {
        self.latitude = Some(v);
        self
    }

    /// Set (or clear) the series for `quantity`.
    pub fn series(mut self, quantity: Quantity, v: Option<Vec<f64>>) -> Self {
        match quantity {
            Quantity::Radial => self.radial = v,
            Quantity::Longitude => self.longitude = v,
            Quantity::Latitude => self.latitude = v,
        }
        self
    }

    /// Finalize the builder and produce a [`TrajectoryTable`].
    ///
    /// Validation rules
    /// -----------------
    /// * at least 2 samples,
    /// * every epoch finite,
    /// * `times` strictly ascending,
    /// * at least one value series present,
    /// * every present series has exactly `times.len()` values.
    pub fn build(self) -> Result<TrajectoryTable, TrajectoryError> {
        let n = self.times.len();
        if n < 2 {
            return Err(TrajectoryError::TooFewSamples(n));
        }
        if let Some(i) = self.times.iter().position(|t| !t.is_finite()) {
            return Err(TrajectoryError::InvalidTimestamp(format!(
                "non-finite epoch at index {i}"
            )));
        }
        if let Some(i) = self
            .times
            .windows(2)
            .position(|w| w[1].partial_cmp(&w[0]) != Some(Ordering::Greater))
        {
            return Err(TrajectoryError::NonMonotonicTime(i + 1));
        }
        if self.radial.is_none() && self.longitude.is_none() && self.latitude.is_none() {
            return Err(TrajectoryError::NoValueSeries);
        }
        for (quantity, values) in [
            (Quantity::Radial, &self.radial),
            (Quantity::Longitude, &self.longitude),
            (Quantity::Latitude, &self.latitude),
        ] {
            if let Some(values) = values {
                if values.len() != n {
                    return Err(TrajectoryError::LengthMismatch {
                        series: quantity.column_name(),
                        expected: n,
                        found: values.len(),
                    });
                }
            }
        }

        Ok(TrajectoryTable {
            times: self.times,
            radial: self.radial,
            longitude: self.longitude,
            latitude: self.latitude,
        })
    }
}
