//! # Reference-relative longitude
//!
//! Angle between each sample longitude and the longitude of a reference event (e.g.
//! perihelion), folded into `[-180, 180)`.
//!
//! Both operands are expected to come from
//! [`TrajectoryMapper::map`](crate::mapper::TrajectoryMapper::map) with `unwrap = true`,
//! so that a genuine 0/360 crossing inside the queried range is not mistaken for a
//! large offset.
use crate::constants::{Degree, FULL_TURN, HALF_TURN};

/// Fold an angle into `[-180, 180)`. `NaN` and infinities give `NaN`.
pub fn wrap_signed(angle: Degree) -> Degree {
    if !angle.is_finite() {
        return f64::NAN;
    }
    let folded = (angle + HALF_TURN).rem_euclid(FULL_TURN);
    // rem_euclid may round up to the modulus for tiny negative inputs
    let folded = if folded >= FULL_TURN { 0.0 } else { folded };
    folded - HALF_TURN
}

/// Fold an angle into `[0, 360)`. `NaN` and infinities give `NaN`.
pub fn wrap_positive(angle: Degree) -> Degree {
    if !angle.is_finite() {
        return f64::NAN;
    }
    let folded = angle.rem_euclid(FULL_TURN);
    if folded >= FULL_TURN {
        0.0
    } else {
        folded
    }
}

/// Signed offset of every longitude from `reference_lon`, in `[-180, 180)`.
///
/// Arguments
/// -----------------
/// * `lon_series` – unwrapped longitudes (degrees).
/// * `reference_lon` – unwrapped longitude of the reference event (degrees), `NaN` if the
///   event could not be resolved.
///
/// Return
/// -----------------
/// * One angle per input. A `NaN` in either operand gives `NaN` at that position; a `NaN`
///   reference gives an all-`NaN` series, the signal for callers to fall back to a time
///   axis.
pub fn offset(lon_series: &[Degree], reference_lon: Degree) -> Vec<Degree> {
    if reference_lon.is_nan() {
        return vec![f64::NAN; lon_series.len()];
    }
    lon_series
        .iter()
        .map(|lon| wrap_signed(lon - reference_lon))
        .collect()
}
