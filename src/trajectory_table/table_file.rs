//! # Trajectory table ingestion
//!
//! The [`TableFile`] trait exposes the public constructors that build a
//! [`TrajectoryTable`] from a file on disk.
//!
//! ## Error semantics
//! -----------------
//! Every constructor returns `Result<TrajectoryTable, TrajectoryError>`. Callers that must
//! keep rendering when a file is missing or malformed should hand that result to
//! [`TrajectoryMapper::from_result`](crate::mapper::TrajectoryMapper::from_result), which
//! turns a failure into the "not loaded" state instead of propagating it.
//!
//! ## Example
//! -----------------
//! ```no_run
//! use camino::Utf8Path;
//! use heliotraj::trajectory_table::TrajectoryTable;
//! use heliotraj::trajectory_table::table_file::TableFile;
//!
//! # fn demo() -> Result<(), heliotraj::heliotraj_errors::TrajectoryError> {
//! let table = TrajectoryTable::load(Utf8Path::new("psp_positions.parquet"))?;
//! println!("{} samples over {}", table.len(), table.coverage());
//! # Ok(()) }
//! ```
use camino::Utf8Path;

use super::csv_reader::csv_to_table;
use super::parquet_reader::parquet_to_table;
use crate::heliotraj_errors::TrajectoryError;
use crate::trajectory_table::TrajectoryTable;

/// Constructors of a [`TrajectoryTable`] from trajectory files.
pub trait TableFile {
    /// Load a table, choosing the reader from the file extension.
    ///
    /// * `.csv` → [`TableFile::from_csv`]
    /// * `.parquet` / `.pq` → [`TableFile::from_parquet`] with the default batch size
    ///
    /// Any other extension yields [`TrajectoryError::UnsupportedFormat`].
    fn load(path: &Utf8Path) -> Result<Self, TrajectoryError>
    where
        Self: Sized;

    /// Load a table from a CSV file with a `times` column and any of
    /// `r_sun`, `carrington_lon`, `carrington_lat`.
    fn from_csv(path: &Utf8Path) -> Result<Self, TrajectoryError>
    where
        Self: Sized;

    /// Load a table from a Parquet file with the same column names as the CSV reader.
    ///
    /// Arguments
    /// -----------------
    /// * `path` — Parquet file.
    /// * `batch_size` — Arrow record batch size, `None` for 8192 rows.
    fn from_parquet(path: &Utf8Path, batch_size: Option<usize>) -> Result<Self, TrajectoryError>
    where
        Self: Sized;
}

impl TableFile for TrajectoryTable {
    fn load(path: &Utf8Path) -> Result<Self, TrajectoryError> {
        match path.extension().map(|ext| ext.to_ascii_lowercase()).as_deref() {
            Some("csv") => Self::from_csv(path),
            Some("parquet") | Some("pq") => Self::from_parquet(path, None),
            _ => Err(TrajectoryError::UnsupportedFormat(path.to_string())),
        }
    }

    fn from_csv(path: &Utf8Path) -> Result<Self, TrajectoryError> {
        csv_to_table(path)
    }

    fn from_parquet(path: &Utf8Path, batch_size: Option<usize>) -> Result<Self, TrajectoryError> {
        parquet_to_table(path, batch_size)
    }
}
