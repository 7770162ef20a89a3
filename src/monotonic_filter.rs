//! # Single-pass region around the reference event
//!
//! Near perihelion the magnitude of the reference-relative angle decreases, passes close
//! to zero, then grows again. Later in the orbit the trajectory may *curl back* towards
//! the reference longitude and the magnitude shrinks once more; such samples would make
//! the derived axis ambiguous. [`filter`] keeps the maximal contiguous run around the
//! closest sample along which the magnitude never decreases.
//!
//! ## Algorithm
//!
//! 1. `pivot` = index of the smallest `|angle|`, NaNs ignored (first one on ties).
//! 2. Walk forward from `pivot + 1` with `running_max = |angle[pivot]|`. A sample is kept
//!    while `|angle[j]| >= running_max * tolerance_factor`, updating
//!    `running_max = max(running_max, |angle[j]|)`. The first failing sample, and all
//!    later ones, are excluded.
//! 3. Walk backward from `pivot - 1` with the same rule.
//!
//! `tolerance_factor = 1.0` is strict: any decrease cuts. Values below 1 tolerate small
//! dips caused by interpolation noise.
//!
//! ## NaN policy
//!
//! A `NaN` sample always fails the comparison, so a gap in the data ends the run on that
//! side of the pivot. The running maximum is never reset across a gap.
//!
//! ## Degenerate inputs
//!
//! * fewer than 2 samples → every sample retained (even a lone `NaN`),
//! * only `NaN` samples → no pivot exists, every sample excluded.
use std::ops::Range;

/// Compute the single-pass mask of `relative_angles`; `true` means retained.
pub fn filter(relative_angles: &[f64], tolerance_factor: f64) -> Vec<bool> {
    let n = relative_angles.len();
    if n < 2 {
        return vec![true; n];
    }

    let Some(pivot) = pivot_index(relative_angles) else {
        return vec![false; n];
    };

    let mut mask = vec![false; n];
    mask[pivot] = true;

    let keeps = |running_max: &mut f64, angle: f64| -> bool {
        let magnitude = angle.abs();
        if magnitude >= *running_max * tolerance_factor {
            *running_max = running_max.max(magnitude);
            true
        } else {
            false
        }
    };

    let mut running_max = relative_angles[pivot].abs();
    for j in pivot + 1..n {
        if !keeps(&mut running_max, relative_angles[j]) {
            break;
        }
        mask[j] = true;
    }

    let mut running_max = relative_angles[pivot].abs();
    for j in (0..pivot).rev() {
        if !keeps(&mut running_max, relative_angles[j]) {
            break;
        }
        mask[j] = true;
    }

    mask
}

/// Index of the smallest finite-comparable magnitude, `None` if every value is `NaN`.
fn pivot_index(values: &[f64]) -> Option<usize> {
    values
        .iter()
        .enumerate()
        .filter(|(_, v)| !v.is_nan())
        .min_by(|(_, a), (_, b)| a.abs().total_cmp(&b.abs()))
        .map(|(i, _)| i)
}

/// Index range covered by the retained samples, `None` if nothing is retained.
pub fn retained_range(mask: &[bool]) -> Option<Range<usize>> {
    let first = mask.iter().position(|&keep| keep)?;
    let last = mask.iter().rposition(|&keep| keep)?;
    Some(first..last + 1)
}

/// Replace every excluded value by `NaN`, so the renderer draws nothing there.
///
/// `mask` shorter than `values` excludes the uncovered tail.
pub fn apply_mask(values: &[f64], mask: &[bool]) -> Vec<f64> {
    values
        .iter()
        .enumerate()
        .map(|(i, &v)| {
            if mask.get(i).copied().unwrap_or(false) {
                v
            } else {
                f64::NAN
            }
        })
        .collect()
}

#[cfg(test)]
mod monotonic_filter_test {
    use super::*;

    const T: bool = true;
    const F: bool = false;

    fn assert_contiguous_with_pivot(mask: &[bool], pivot: usize) {
        let range = retained_range(mask).expect("pivot is always retained");
        assert!(range.contains(&pivot));
        assert!(mask[range.clone()].iter().all(|&k| k));
        assert!(mask[..range.start].iter().all(|&k| !k));
        assert!(mask[range.end..].iter().all(|&k| !k));
    }

    #[test]
    fn test_curl_back_after_pivot() {
        let angles = [-40.0, -20.0, -5.0, 0.0, 10.0, 25.0, 18.0];
        assert_eq!(filter(&angles, 1.0), vec![T, T, T, T, T, T, F]);
    }

    #[test]
    fn test_curl_back_before_pivot() {
        let angles = [-30.0, -35.0, -20.0, -3.0, 4.0, 9.0];
        let mask = filter(&angles, 1.0);
        assert_eq!(mask, vec![F, T, T, T, T, T]);
        assert_contiguous_with_pivot(&mask, 3);
    }

    #[test]
    fn test_strictly_increasing_magnitude_keeps_all() {
        let angles = [-50.0, -30.0, -10.0, -1.0, 2.0, 15.0, 60.0, 120.0];
        assert!(filter(&angles, 1.0).into_iter().all(|k| k));
    }

    #[test]
    fn test_equal_magnitude_is_kept() {
        let angles = [-5.0, 0.0, 5.0, 5.0, 4.0];
        assert_eq!(filter(&angles, 1.0), vec![T, T, T, T, F]);
    }

    #[test]
    fn test_tolerance_factor() {
        let angles = [0.0, 10.0, 9.5, 20.0];
        assert_eq!(filter(&angles, 1.0), vec![T, T, F, F]);
        assert_eq!(filter(&angles, 0.9), vec![T, T, T, T]);
        // the running max is not lowered by a tolerated dip
        let angles = [0.0, 10.0, 9.5, 9.2, 8.9];
        assert_eq!(filter(&angles, 0.9), vec![T, T, T, T, F]);
    }

    #[test]
    fn test_nan_cuts_the_run() {
        let angles = [f64::NAN, -5.0, 0.0, 5.0, f64::NAN, 10.0];
        let mask = filter(&angles, 1.0);
        assert_eq!(mask, vec![F, T, T, T, F, F]);
        assert_contiguous_with_pivot(&mask, 2);
    }

    #[test]
    fn test_degenerate_inputs() {
        assert!(filter(&[], 1.0).is_empty());
        assert_eq!(filter(&[f64::NAN], 1.0), vec![T]);
        assert_eq!(filter(&[42.0], 1.0), vec![T]);
        assert_eq!(filter(&[f64::NAN, f64::NAN, f64::NAN], 1.0), vec![F, F, F]);
    }

    #[test]
    fn test_pivot_ties_pick_first() {
        assert_eq!(pivot_index(&[3.0, -1.0, 1.0, 2.0]), Some(1));
        assert_eq!(pivot_index(&[f64::NAN, 2.0]), Some(1));
        assert_eq!(pivot_index(&[f64::NAN]), None);
    }

    #[test]
    fn test_retained_range_and_apply_mask() {
        assert_eq!(retained_range(&[F, T, T, F]), Some(1..3));
        assert_eq!(retained_range(&[F, F]), None);

        let out = apply_mask(&[1.0, 2.0, 3.0], &[F, T, T]);
        assert!(out[0].is_nan());
        assert_eq!(&out[1..], &[2.0, 3.0]);

        let out = apply_mask(&[1.0, 2.0, 3.0], &[T]);
        assert_eq!(out[0], 1.0);
        assert!(out[1].is_nan() && out[2].is_nan());
    }
}
