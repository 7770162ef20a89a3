//! Piecewise-linear interpolation over an ascending abscissa.
//!
//! Queries outside `[xs[0], xs[N-1]]` (and NaN queries) give `NaN`: nothing is ever
//! extrapolated. Both end points are inside the coverage.
use crate::constants::MJD;

/// Interpolate `ys(xs)` at `x`.
///
/// `xs` must be strictly ascending with at least 2 samples and `ys.len() == xs.len()`;
/// [`TrajectoryTable`](crate::trajectory_table::TrajectoryTable) guarantees both.
pub(crate) fn interp_linear(xs: &[MJD], ys: &[f64], x: MJD) -> f64 {
    let n = xs.len();
    debug_assert!(n >= 2 && ys.len() == n);

    if !(x >= xs[0] && x <= xs[n - 1]) {
        return f64::NAN;
    }

    // Largest i such that xs[i] <= x, clamped so that [i, i + 1] is a valid segment
    let idx = xs.partition_point(|&t| t <= x).saturating_sub(1).min(n - 2);

    let (x0, x1) = (xs[idx], xs[idx + 1]);
    let (y0, y1) = (ys[idx], ys[idx + 1]);
    let alpha = (x - x0) / (x1 - x0);

    // Weighted form returns y0 / y1 exactly on the sample epochs
    y0 * (1.0 - alpha) + y1 * alpha
}

/// Interpolate `ys(xs)` at every query, preserving query order.
pub(crate) fn interp_many(xs: &[MJD], ys: &[f64], queries: &[MJD]) -> Vec<f64> {
    queries.iter().map(|&x| interp_linear(xs, ys, x)).collect()
}
