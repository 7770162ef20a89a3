//! # Parquet reader for trajectory tables
//!
//! Column-projected ingestion of a trajectory table from **Apache Parquet**.
//!
//! ## Expected Parquet Schema
//! -----------------
//! - `times` — required, no nulls, one of:
//!   - `Float64` (MJD, UTC),
//!   - `Utf8` (ISO 8601),
//!   - `Timestamp` in any unit, timezone ignored (Unix time, as written by pandas/pyarrow).
//! - `r_sun: Float64`, `carrington_lon: Float64`, `carrington_lat: Float64` — optional.
//!
//! Only the columns present in the file are projected. Columns are looked up **by name**
//! in each record batch, so their order in the file does not matter.
//!
//! ## Null Handling Policy
//! -----------------
//! - Nulls in a value column are read as `NaN` (the point degrades, the table still loads).
//! - A null epoch is an [`TrajectoryError::InvalidTimestamp`].
//!
//! ## Performance Notes
//! -----------------
//! - **Batch size** defaults to `8192` rows; trajectory tables are small, so this mostly
//!   matters for long, finely sampled mission tables.
//! - Typed arrays are downcast once per batch, and the no-null fast path copies raw slices.
use std::fs::File;

use arrow_array::array::{
    Array, Float64Array, StringArray, TimestampMicrosecondArray, TimestampMillisecondArray,
    TimestampNanosecondArray, TimestampSecondArray,
};
use arrow_array::RecordBatch;
use camino::Utf8Path;
use hifitime::Unit;
use parquet::arrow::{arrow_reader::ParquetRecordBatchReaderBuilder, ProjectionMask};
use parquet::errors::ParquetError;

use crate::constants::MJD;
use crate::heliotraj_errors::TrajectoryError;
use crate::time::{iso_to_mjd, unix_to_mjd};
use crate::trajectory_table::{Quantity, TrajectoryTable, TIMES_COLUMN};

/// Load a trajectory table from a Parquet file.
///
/// Arguments
/// -----------------
/// * `parquet` – Path to the Parquet file.
/// * `batch_size` – Optional Arrow reader batch size (default: 8192 rows).
///
/// Return
/// ----------
/// * The validated [`TrajectoryTable`], or the first I/O, schema or validation error.
pub(crate) fn parquet_to_table(
    parquet: &Utf8Path,
    batch_size: Option<usize>,
) -> Result<TrajectoryTable, TrajectoryError> {
    let file = File::open(parquet)?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)?;

    let schema_descr = builder.metadata().file_metadata().schema_descr();
    let all_fields = schema_descr.columns();
    let position_of = |name: &str| all_fields.iter().position(|f| f.name() == name);

    let times_index = position_of(TIMES_COLUMN)
        .ok_or_else(|| TrajectoryError::MissingColumn(TIMES_COLUMN.into()))?;
    let present: Vec<(Quantity, usize)> = Quantity::ALL
        .into_iter()
        .filter_map(|q| position_of(q.column_name()).map(|i| (q, i)))
        .collect();

    let mut projection_indices = vec![times_index];
    projection_indices.extend(present.iter().map(|(_, i)| *i));
    let mask = ProjectionMask::leaves(schema_descr, projection_indices);

    let reader = builder
        .with_projection(mask)
        .with_batch_size(batch_size.unwrap_or(8192))
        .build()?;

    let mut times: Vec<MJD> = Vec::new();
    let mut series: Vec<Vec<f64>> = vec![Vec::new(); present.len()];

    for maybe_batch in reader {
        let batch = maybe_batch.map_err(ParquetError::from)?;
        append_times(&batch, &mut times)?;
        for ((quantity, _), values) in present.iter().zip(series.iter_mut()) {
            append_values(&batch, quantity.column_name(), values)?;
        }
    }

    let mut table = TrajectoryTable::builder(times);
    for ((quantity, _), values) in present.into_iter().zip(series) {
        table = table.series(quantity, Some(values));
    }
    table.build()
}

fn column<'a>(batch: &'a RecordBatch, name: &str) -> Result<&'a dyn Array, TrajectoryError> {
    batch
        .column_by_name(name)
        .map(|c| c.as_ref())
        .ok_or_else(|| TrajectoryError::MissingColumn(name.into()))
}

fn append_times(batch: &RecordBatch, times: &mut Vec<MJD>) -> Result<(), TrajectoryError> {
    let col = column(batch, TIMES_COLUMN)?;
    if col.null_count() > 0 {
        return Err(TrajectoryError::InvalidTimestamp(
            "null epoch in 'times' column".into(),
        ));
    }

    if let Some(mjd) = col.as_any().downcast_ref::<Float64Array>() {
        times.extend_from_slice(mjd.values());
        return Ok(());
    }
    if let Some(iso) = col.as_any().downcast_ref::<StringArray>() {
        for value in iso.iter().flatten() {
            times.push(iso_to_mjd(value)?);
        }
        return Ok(());
    }
    if let Some((unix, unit)) = timestamp_values(col) {
        times.extend(unix.iter().map(|&v| unix_to_mjd(v, unit)));
        return Ok(());
    }
    Err(TrajectoryError::InvalidColumnType {
        column: TIMES_COLUMN.into(),
        expected: "Float64, Utf8 or Timestamp",
    })
}

/// Raw Unix values and unit of an Arrow `Timestamp` column, `None` for any other type.
fn timestamp_values(col: &dyn Array) -> Option<(&[i64], Unit)> {
    let any = col.as_any();
    if let Some(arr) = any.downcast_ref::<TimestampSecondArray>() {
        return Some((&arr.values()[..], Unit::Second));
    }
    if let Some(arr) = any.downcast_ref::<TimestampMillisecondArray>() {
        return Some((&arr.values()[..], Unit::Millisecond));
    }
    if let Some(arr) = any.downcast_ref::<TimestampMicrosecondArray>() {
        return Some((&arr.values()[..], Unit::Microsecond));
    }
    any.downcast_ref::<TimestampNanosecondArray>()
        .map(|arr| (&arr.values()[..], Unit::Nanosecond))
}

fn append_values(
    batch: &RecordBatch,
    name: &str,
    values: &mut Vec<f64>,
) -> Result<(), TrajectoryError> {
    let arr = column(batch, name)?
        .as_any()
        .downcast_ref::<Float64Array>()
        .ok_or_else(|| TrajectoryError::InvalidColumnType {
            column: name.into(),
            expected: "Float64",
        })?;

    if arr.nulls().is_none() {
        values.extend_from_slice(arr.values());
    } else {
        values.extend(arr.iter().map(|v| v.unwrap_or(f64::NAN)));
    }
    Ok(())
}
