use thiserror::Error;

#[derive(Error, Debug)]
pub enum TrajectoryError {
    #[error("Unable to perform file operation: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV reader error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Parquet reader error: {0}")]
    ParquetError(#[from] parquet::errors::ParquetError),

    #[error("Unsupported trajectory file format: {0}")]
    UnsupportedFormat(String),

    #[error("Column '{0}' not found in trajectory file")]
    MissingColumn(String),

    #[error("Column '{column}' has an unexpected type, expected {expected}")]
    InvalidColumnType {
        column: String,
        expected: &'static str,
    },

    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),

    #[error("A trajectory table needs at least 2 samples, got {0}")]
    TooFewSamples(usize),

    #[error("Sample times must be strictly increasing (violation at index {0})")]
    NonMonotonicTime(usize),

    #[error("Series '{series}' has {found} samples but the time axis has {expected}")]
    LengthMismatch {
        series: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("Trajectory table carries no radial, longitude or latitude series")]
    NoValueSeries,

    #[error("Invalid quantity name: {0}")]
    InvalidQuantity(String),

    #[error("Invalid coordinate mode: {0}")]
    InvalidCoordinateMode(String),

    #[error("Invalid axis parameter: {0}")]
    InvalidAxisParameter(String),
}

impl PartialEq for TrajectoryError {
    fn eq(&self, other: &Self) -> bool {
        use TrajectoryError::*;
        match (self, other) {
            // Wrapped library errors are not comparable: same variant is enough
            (IoError(_), IoError(_)) => true,
            (CsvError(_), CsvError(_)) => true,
            (ParquetError(_), ParquetError(_)) => true,

            (UnsupportedFormat(a), UnsupportedFormat(b)) => a == b,
            (MissingColumn(a), MissingColumn(b)) => a == b,
            (
                InvalidColumnType {
                    column: a,
                    expected: ea,
                },
                InvalidColumnType {
                    column: b,
                    expected: eb,
                },
            ) => a == b && ea == eb,
            (InvalidTimestamp(a), InvalidTimestamp(b)) => a == b,
            (TooFewSamples(a), TooFewSamples(b)) => a == b,
            (NonMonotonicTime(a), NonMonotonicTime(b)) => a == b,
            (
                LengthMismatch {
                    series: sa,
                    expected: ea,
                    found: fa,
                },
                LengthMismatch {
                    series: sb,
                    expected: eb,
                    found: fb,
                },
            ) => sa == sb && ea == eb && fa == fb,
            (NoValueSeries, NoValueSeries) => true,
            (InvalidQuantity(a), InvalidQuantity(b)) => a == b,
            (InvalidCoordinateMode(a), InvalidCoordinateMode(b)) => a == b,
            (InvalidAxisParameter(a), InvalidAxisParameter(b)) => a == b,

            _ => false,
        }
    }
}
