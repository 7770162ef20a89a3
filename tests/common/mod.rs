#![allow(dead_code)]

use approx::assert_relative_eq;
use heliotraj::mapper::TrajectoryMapper;
use heliotraj::trajectory_table::TrajectoryTable;

/// MJD of 2021-01-10T00:00:00 UTC, first sample of `tests/data/encounter.csv`.
pub const ENCOUNTER_START: f64 = 59224.0;

/// Carrington longitudes of `tests/data/encounter.csv`, one per day.
pub const ENCOUNTER_LON: [f64; 10] = [
    340.0, 346.0, 353.0, 359.0, 5.0, 11.0, 16.0, 19.0, 20.0, 18.0,
];

/// Ten daily samples crossing the 0/360 boundary, closest approach on the fifth day.
pub fn encounter_table() -> TrajectoryTable {
    let times = (0..10).map(|i| ENCOUNTER_START + i as f64).collect();
    TrajectoryTable::builder(times)
        .radial(vec![
            40.0, 35.0, 30.0, 26.0, 24.0, 26.0, 30.0, 35.0, 40.0, 45.0,
        ])
        .longitude(ENCOUNTER_LON.to_vec())
        .latitude(vec![3.0, 3.1, 3.2, 3.3, 3.4, 3.3, 3.2, 3.1, 3.0, 2.9])
        .build()
        .unwrap()
}

pub fn encounter_mapper() -> TrajectoryMapper {
    TrajectoryMapper::new(encounter_table())
}

/// Element-wise comparison treating two `NaN` as equal.
pub fn assert_series_eq(actual: &[f64], expected: &[f64], epsilon: f64) {
    assert_eq!(actual.len(), expected.len(), "length mismatch");
    for (i, (a, e)) in actual.iter().zip(expected).enumerate() {
        if e.is_nan() {
            assert!(a.is_nan(), "index {i}: expected NaN, got {a}");
        } else {
            assert_relative_eq!(*a, *e, epsilon = epsilon);
        }
    }
}
