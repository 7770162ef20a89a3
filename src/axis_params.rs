//! # Axis parameters
//!
//! [`AxisParams`] gathers the tunables of the coordinate pipeline run once per panel by
//! [`CoordinateSelector`](crate::coordinate_mode::CoordinateSelector). It is built with a
//! validating fluent builder.
//!
//! ## Example
//!
//! ```rust
//! use heliotraj::axis_params::AxisParams;
//!
//! let params = AxisParams::builder()
//!     .tolerance_factor(0.98)
//!     .max_reference_distance(60.0)
//!     .build()
//!     .unwrap();
//! assert_eq!(params.tolerance_factor(), 0.98);
//! ```
//!
//! Fields are private: an [`AxisParams`] only exists with validated values.
//!
//! ```compile_fail
//! use heliotraj::axis_params::AxisParams;
//!
//! let params = AxisParams {
//!     tolerance_factor: f64::NAN,
//!     ..AxisParams::default()
//! };
//! ```
use std::cmp::Ordering::{Equal, Greater, Less};
use std::fmt;

use crate::constants::Days;
use crate::heliotraj_errors::TrajectoryError;

/// Configuration of the coordinate pipeline.
///
/// Fields
/// -----------------
/// * `tolerance_factor` – factor applied to the running maximum by the single-pass
///   filter; `1.0` cuts on any decrease, smaller values tolerate small dips.
/// * `monotonic_filter` – apply the single-pass filter to the perihelion-relative axis.
///   When disabled, curl-back samples stay on the axis.
/// * `wrap_longitude_axis` – fold the longitude axis into `[0, 360)`; when `false` the
///   continuous (unwrapped) longitude is plotted.
/// * `max_reference_distance` – optional bound (days) on the distance between the panel
///   centre and the resolved reference epoch; a farther reference counts as unresolved.
///
/// Defaults
/// -----------------
/// * `tolerance_factor`: 1.0
/// * `monotonic_filter`: true
/// * `wrap_longitude_axis`: true
/// * `max_reference_distance`: None
#[derive(Debug, Clone, PartialEq)]
pub struct AxisParams {
    tolerance_factor: f64,
    monotonic_filter: bool,
    wrap_longitude_axis: bool,
    max_reference_distance: Option<Days>,
}

impl AxisParams {
    /// Equivalent to [`AxisParams::default()`].
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builder() -> AxisParamsBuilder {
        AxisParamsBuilder::new()
    }

    pub fn tolerance_factor(&self) -> f64 {
        self.tolerance_factor
    }

    pub fn monotonic_filter(&self) -> bool {
        self.monotonic_filter
    }

    pub fn wrap_longitude_axis(&self) -> bool {
        self.wrap_longitude_axis
    }

    pub fn max_reference_distance(&self) -> Option<Days> {
        self.max_reference_distance
    }
}

impl Default for AxisParams {
    fn default() -> Self {
        AxisParams {
            tolerance_factor: 1.0,
            monotonic_filter: true,
            wrap_longitude_axis: true,
            max_reference_distance: None,
        }
    }
}

/// Builder for [`AxisParams`], with validation.
#[derive(Debug, Clone)]
pub struct AxisParamsBuilder {
    params: AxisParams,
}

impl Default for AxisParamsBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl AxisParamsBuilder {
    pub fn new() -> Self {
        Self {
            params: AxisParams::default(),
        }
    }

    pub fn tolerance_factor(mut self, v: f64) -> Self {
        self.params.tolerance_factor = v;
        self
    }
    pub fn monotonic_filter(mut self, v: bool) -> Self {
        self.params.monotonic_filter = v;
        self
    }
    pub fn wrap_longitude_axis(mut self, v: bool) -> Self {
        self.params.wrap_longitude_axis = v;
        self
    }
    pub fn max_reference_distance(mut self, v: Days) -> Self {
        self.params.max_reference_distance = Some(v);
        self
    }

    /// Return true iff x > 0.0 and comparable (i.e., not NaN).
    #[inline]
    fn gt0(x: f64) -> bool {
        x.partial_cmp(&0.0) == Some(Greater)
    }

    /// Return true iff a <= b and comparable (i.e., not NaN).
    #[inline]
    fn le(a: f64, b: f64) -> bool {
        matches!(a.partial_cmp(&b), Some(Less) | Some(Equal))
    }

    /// Finalize the builder.
    ///
    /// Validation rules
    /// -----------------
    /// * `0.0 < tolerance_factor <= 1.0`
    /// * `max_reference_distance`, when set, is finite and `>= 0.0`
    pub fn build(self) -> Result<AxisParams, TrajectoryError> {
        let p = &self.params;

        if !(Self::gt0(p.tolerance_factor) && Self::le(p.tolerance_factor, 1.0)) {
            return Err(TrajectoryError::InvalidAxisParameter(
                "require 0 < tolerance_factor <= 1".into(),
            ));
        }
        if let Some(d) = p.max_reference_distance {
            if !(d.is_finite() && Self::le(0.0, d)) {
                return Err(TrajectoryError::InvalidAxisParameter(
                    "max_reference_distance must be finite and >= 0".into(),
                ));
            }
        }

        Ok(self.params)
    }
}

impl fmt::Display for AxisParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let distance = match self.max_reference_distance {
            Some(d) => format!("{d:.3} d"),
            None => "unbounded".to_string(),
        };
        if f.alternate() {
            const PARAM_COL: usize = 40;
            writeln!(f, "Coordinate Axis Parameters")?;
            writeln!(f, "--------------------------")?;

            macro_rules! line {
                ($fmt:expr, $val:expr, $comment:expr) => {{
                    let s = format!($fmt, $val);
                    let pad = if s.len() < PARAM_COL {
                        " ".repeat(PARAM_COL - s.len())
                    } else {
                        " ".to_string()
                    };
                    writeln!(f, "  {}{}# {}", s, pad, $comment)
                }};
            }

            line!(
                "tolerance_factor       = {:.3}",
                self.tolerance_factor,
                "Running-max factor of the single-pass filter"
            )?;
            line!(
                "monotonic_filter       = {}",
                self.monotonic_filter,
                "Cut curl-back samples from the relative axis"
            )?;
            line!(
                "wrap_longitude_axis    = {}",
                self.wrap_longitude_axis,
                "Fold the longitude axis into [0, 360)"
            )?;
            line!(
                "max_reference_distance = {}",
                distance,
                "Largest panel-centre to reference gap"
            )?;
            Ok(())
        } else {
            write!(
                f,
                "AxisParams(tolerance_factor={:.3}, monotonic_filter={}, wrap_longitude_axis={}, max_reference_distance={})",
                self.tolerance_factor, self.monotonic_filter, self.wrap_longitude_axis, distance
            )
        }
    }
}

#[cfg(test)]
mod axis_params_test {
    use super::*;

    #[test]
    fn test_defaults() {
        let params = AxisParams::builder().build().unwrap();
        assert_eq!(params, AxisParams::default());
        assert_eq!(params.tolerance_factor(), 1.0);
        assert!(params.monotonic_filter());
        assert!(params.wrap_longitude_axis());
        assert_eq!(params.max_reference_distance(), None);
    }

    #[test]
    fn test_invalid_tolerance() {
        for tf in [0.0, -0.5, 1.01, f64::NAN] {
            assert_eq!(
                AxisParams::builder().tolerance_factor(tf).build(),
                Err(TrajectoryError::InvalidAxisParameter(
                    "require 0 < tolerance_factor <= 1".into()
                ))
            );
        }
    }

    #[test]
    fn test_builder_sets_every_field() {
        let params = AxisParams::builder()
            .tolerance_factor(0.5)
            .monotonic_filter(false)
            .wrap_longitude_axis(false)
            .max_reference_distance(30.0)
            .build()
            .unwrap();
        assert_eq!(params.tolerance_factor(), 0.5);
        assert!(!params.monotonic_filter());
        assert!(!params.wrap_longitude_axis());
        assert_eq!(params.max_reference_distance(), Some(30.0));
    }

    #[test]
    fn test_invalid_reference_distance() {
        assert!(AxisParams::builder()
            .max_reference_distance(-1.0)
            .build()
            .is_err());
        assert!(AxisParams::builder()
            .max_reference_distance(f64::INFINITY)
            .build()
            .is_err());
        assert!(AxisParams::builder()
            .max_reference_distance(0.0)
            .build()
            .is_ok());
    }

    #[test]
    fn test_display() {
        let params = AxisParams::default();
        assert_eq!(
            params.to_string(),
            "AxisParams(tolerance_factor=1.000, monotonic_filter=true, wrap_longitude_axis=true, max_reference_distance=unbounded)"
        );
        let table = format!("{params:#}");
        assert!(table.starts_with("Coordinate Axis Parameters"));
        assert!(table.contains("tolerance_factor       = 1.000"));
    }
}
