//! # Epoch normalisation and explicit time windows
//!
//! Trajectory files carry their sample times as plain numbers, ISO 8601 strings or Unix
//! timestamps. Everything downstream works on a single float basis: **MJD (UTC days)**.
//! This module converts between the representations and defines [`TimeWindow`], the
//! explicit time range handed down the call chain instead of a shared mutable "current
//! range".
use hifitime::{Epoch, Unit};
use std::fmt;
use std::str::FromStr;

use crate::constants::{Days, MJD};
use crate::heliotraj_errors::TrajectoryError;

/// Transformation from an ISO 8601 Gregorian timestamp to modified julian date (MJD, UTC)
///
/// Argument
/// --------
/// * `date`: a timestamp in the format YYYY-MM-ddTHH:mm:ss, optionally suffixed with `Z`
///
/// Return
/// ------
/// * the epoch as MJD UTC days, or [`TrajectoryError::InvalidTimestamp`] if hifitime rejects it
pub fn iso_to_mjd(date: &str) -> Result<MJD, TrajectoryError> {
    let trimmed = date.trim();
    let trimmed = trimmed.strip_suffix('Z').unwrap_or(trimmed);
    Epoch::from_str(trimmed)
        .map(|epoch| epoch.to_mjd_utc_days())
        .map_err(|err| TrajectoryError::InvalidTimestamp(format!("{date}: {err}")))
}

/// Parse one cell of a `times` column.
///
/// A cell that reads as a float is taken as MJD directly; anything else goes through
/// [`iso_to_mjd`].
pub fn parse_epoch(cell: &str) -> Result<MJD, TrajectoryError> {
    let trimmed = cell.trim();
    if trimmed.is_empty() {
        return Err(TrajectoryError::InvalidTimestamp("empty time cell".into()));
    }
    match trimmed.parse::<f64>() {
        Ok(mjd) => Ok(mjd),
        Err(_) => iso_to_mjd(trimmed),
    }
}

/// Transformation from a Unix timestamp counted in `unit` to modified julian date (MJD, UTC)
///
/// This is the representation of Arrow `Timestamp` columns, as written by pandas and
/// pyarrow for datetime data.
pub fn unix_to_mjd(value: i64, unit: Unit) -> MJD {
    Epoch::from_unix_duration(unit * value).to_mjd_utc_days()
}

/// Closed time interval `[start, end]` in MJD.
///
/// Panels receive their window explicitly; the reference event is resolved around
/// [`TimeWindow::center`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeWindow {
    start: MJD,
    end: MJD,
}

impl TimeWindow {
    /// Build a window, rejecting non-finite bounds and `end < start`.
    pub fn new(start: MJD, end: MJD) -> Result<Self, TrajectoryError> {
        if !start.is_finite() || !end.is_finite() {
            return Err(TrajectoryError::InvalidTimestamp(format!(
                "window bounds must be finite, got [{start}, {end}]"
            )));
        }
        if end < start {
            return Err(TrajectoryError::InvalidTimestamp(format!(
                "window end {end} precedes start {start}"
            )));
        }
        Ok(TimeWindow { start, end })
    }

    /// Window over bounds already known to be finite and ordered.
    pub(crate) fn spanning(start: MJD, end: MJD) -> Self {
        TimeWindow { start, end }
    }

    /// Build a window from two ISO 8601 timestamps.
    pub fn from_iso(start: &str, end: &str) -> Result<Self, TrajectoryError> {
        TimeWindow::new(iso_to_mjd(start)?, iso_to_mjd(end)?)
    }

    pub fn start(&self) -> MJD {
        self.start
    }

    pub fn end(&self) -> MJD {
        self.end
    }

    pub fn center(&self) -> MJD {
        0.5 * (self.start + self.end)
    }

    pub fn span(&self) -> Days {
        self.end - self.start
    }

    pub fn contains(&self, t: MJD) -> bool {
        t >= self.start && t <= self.end
    }

    /// `n` evenly spaced epochs covering the window, both ends included.
    pub fn linspace(&self, n: usize) -> Vec<MJD> {
        match n {
            0 => Vec::new(),
            1 => vec![self.start],
            _ => {
                let step = self.span() / (n - 1) as f64;
                (0..n)
                    .map(|i| {
                        if i == n - 1 {
                            self.end
                        } else {
                            self.start + step * i as f64
                        }
                    })
                    .collect()
            }
        }
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[MJD {:.5}, MJD {:.5}]", self.start, self.end)
    }
}

#[cfg(test)]
mod time_test {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_iso_to_mjd() {
        assert_eq!(iso_to_mjd("2021-01-01T00:00:00").unwrap(), 59215.0);
        assert_eq!(iso_to_mjd("2021-01-02T00:00:00Z").unwrap(), 59216.0);
        assert!(matches!(
            iso_to_mjd("not a date"),
            Err(TrajectoryError::InvalidTimestamp(_))
        ));
    }

    #[test]
    fn test_parse_epoch() {
        assert_eq!(parse_epoch("59215.25").unwrap(), 59215.25);
        assert_eq!(parse_epoch(" 2021-01-01T00:00:00 ").unwrap(), 59215.0);
        assert!(parse_epoch("").is_err());
    }

    #[test]
    fn test_unix_to_mjd() {
        assert_relative_eq!(unix_to_mjd(0, Unit::Second), 40587.0, epsilon = 1e-9);
        assert_relative_eq!(
            unix_to_mjd(1_609_459_200, Unit::Second),
            59215.0,
            epsilon = 1e-9
        );
        assert_relative_eq!(
            unix_to_mjd(1_609_502_400_000, Unit::Millisecond),
            59215.5,
            epsilon = 1e-9
        );
        assert_relative_eq!(
            unix_to_mjd(1_609_545_600_000_000_000, Unit::Nanosecond),
            59216.0,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_time_window() {
        let window = TimeWindow::new(10.0, 14.0).unwrap();
        assert_eq!(window.center(), 12.0);
        assert_eq!(window.span(), 4.0);
        assert!(window.contains(10.0));
        assert!(window.contains(14.0));
        assert!(!window.contains(14.5));
        assert_eq!(window.linspace(5), vec![10.0, 11.0, 12.0, 13.0, 14.0]);
        assert_eq!(window.linspace(1), vec![10.0]);
        assert!(window.linspace(0).is_empty());

        assert!(TimeWindow::new(2.0, 1.0).is_err());
        assert!(TimeWindow::new(f64::NAN, 1.0).is_err());
    }

    #[test]
    fn test_window_from_iso() {
        let window = TimeWindow::from_iso("2021-01-01T00:00:00", "2021-01-03T00:00:00").unwrap();
        assert_eq!(window.center(), 59216.0);
    }
}
