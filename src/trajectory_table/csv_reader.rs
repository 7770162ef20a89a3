//! # CSV reader for trajectory tables
//!
//! Reads a header-first CSV file into a [`TrajectoryTable`].
//!
//! ## Expected columns
//! -----------------
//! - `times` (required) — MJD as a float, or an ISO 8601 timestamp.
//! - `r_sun`, `carrington_lon`, `carrington_lat` (optional) — floats; an empty cell is read as `NaN`.
//!
//! A column absent from the header leaves the matching series absent from the table,
//! which is different from a column of empty cells (a series of `NaN`).
use std::fs::File;
use std::io;

use camino::Utf8Path;
use serde::Deserialize;

use crate::heliotraj_errors::TrajectoryError;
use crate::time::parse_epoch;
use crate::trajectory_table::{Quantity, TrajectoryTable, TIMES_COLUMN};

#[derive(Debug, Deserialize)]
struct TrajectoryRow {
    times: String,
    r_sun: Option<f64>,
    carrington_lon: Option<f64>,
    carrington_lat: Option<f64>,
}

/// Read a trajectory table from a CSV file on disk.
pub(crate) fn csv_to_table(path: &Utf8Path) -> Result<TrajectoryTable, TrajectoryError> {
    let file = File::open(path)?;
    read_csv_table(file)
}

/// Read a trajectory table from any CSV source.
pub(crate) fn read_csv_table<R: io::Read>(source: R) -> Result<TrajectoryTable, TrajectoryError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(source);

    let headers = reader.headers()?.clone();
    let has_column = |name: &str| headers.iter().any(|h| h == name);
    if !has_column(TIMES_COLUMN) {
        return Err(TrajectoryError::MissingColumn(TIMES_COLUMN.into()));
    }
    let present: Vec<Quantity> = Quantity::ALL
        .into_iter()
        .filter(|q| has_column(q.column_name()))
        .collect();

    let mut times = Vec::new();
    let mut radial = Vec::new();
    let mut longitude = Vec::new();
    let mut latitude = Vec::new();

    for row in reader.deserialize::<TrajectoryRow>() {
        let row = row?;
        times.push(parse_epoch(&row.times)?);
        radial.push(row.r_sun.unwrap_or(f64::NAN));
        longitude.push(row.carrington_lon.unwrap_or(f64::NAN));
        latitude.push(row.carrington_lat.unwrap_or(f64::NAN));
    }

    let mut builder = TrajectoryTable::builder(times);
    for (quantity, values) in [
        (Quantity::Radial, radial),
        (Quantity::Longitude, longitude),
        (Quantity::Latitude, latitude),
    ] {
        if present.contains(&quantity) {
            builder = builder.series(quantity, Some(values));
        }
    }
    builder.build()
}
