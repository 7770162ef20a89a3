use approx::assert_relative_eq;
use camino::Utf8Path;
use heliotraj::axis_params::AxisParams;
use heliotraj::coordinate_mode::{CoordinateMode, CoordinateSelector, FallbackReason};
use heliotraj::mapper::TrajectoryMapper;
use heliotraj::reference::{PerihelionCatalog, ReferenceEvent};
use heliotraj::time::TimeWindow;
use heliotraj::trajectory_table::Quantity;

mod common;
use common::{assert_series_eq, encounter_mapper, ENCOUNTER_START};

fn encounter_window() -> TimeWindow {
    TimeWindow::new(ENCOUNTER_START, ENCOUNTER_START + 9.0).unwrap()
}

fn daily_query() -> Vec<f64> {
    (0..10).map(|i| ENCOUNTER_START + i as f64).collect()
}

#[test]
fn test_perihelion_relative_axis() {
    let mapper = encounter_mapper();
    let params = AxisParams::default();
    let selector = CoordinateSelector::new(&mapper, &params);
    let catalog = PerihelionCatalog::new(vec![ENCOUNTER_START - 170.0, ENCOUNTER_START + 4.0]);

    let axis = selector.select_for_window(
        CoordinateMode::PerihelionRelative,
        &encounter_window(),
        &daily_query(),
        &catalog,
    );

    assert_eq!(axis.mode, CoordinateMode::PerihelionRelative);
    assert!(!axis.is_fallback());
    assert_series_eq(
        &axis.values,
        &[
            -25.0,
            -19.0,
            -12.0,
            -6.0,
            0.0,
            6.0,
            11.0,
            14.0,
            15.0,
            f64::NAN,
        ],
        1e-9,
    );
    let mask = axis.mask.unwrap();
    assert_eq!(mask.iter().filter(|&&k| k).count(), 9);
    assert!(!mask[9]);
}

#[test]
fn test_filter_disabled_keeps_curl_back() {
    let mapper = encounter_mapper();
    let params = AxisParams::builder().monotonic_filter(false).build().unwrap();
    let reference = ReferenceEvent::resolve(&mapper, ENCOUNTER_START + 4.0);

    let axis = CoordinateSelector::new(&mapper, &params).select(
        CoordinateMode::PerihelionRelative,
        &daily_query(),
        Some(&reference),
    );
    assert!(axis.mask.is_none());
    assert_relative_eq!(axis.values[9], 13.0, epsilon = 1e-9);
}

#[test]
fn test_reference_too_far_from_window() {
    let mapper = encounter_mapper();
    let params = AxisParams::builder()
        .max_reference_distance(0.25)
        .build()
        .unwrap();
    let selector = CoordinateSelector::new(&mapper, &params);
    // window centre is ENCOUNTER_START + 4.5
    let resolver = |_center: f64| Some(ENCOUNTER_START + 4.0);

    let axis = selector.select_for_window(
        CoordinateMode::PerihelionRelative,
        &encounter_window(),
        &daily_query(),
        &resolver,
    );
    assert_eq!(axis.mode, CoordinateMode::Time);
    assert_eq!(axis.fallback, Some(FallbackReason::ReferenceUnresolved));
    assert_eq!(axis.values, daily_query());
}

#[test]
fn test_reference_outside_coverage() {
    let mapper = encounter_mapper();
    let params = AxisParams::default();
    let resolver = |_center: f64| Some(ENCOUNTER_START + 100.0);

    let axis = CoordinateSelector::new(&mapper, &params).select_for_window(
        CoordinateMode::PerihelionRelative,
        &encounter_window(),
        &daily_query(),
        &resolver,
    );
    assert_eq!(
        axis.fallback,
        Some(FallbackReason::ReferenceLongitudeUnavailable)
    );
}

#[test]
fn test_no_reference() {
    let mapper = encounter_mapper();
    let params = AxisParams::default();
    let axis = CoordinateSelector::new(&mapper, &params).select_for_window(
        CoordinateMode::PerihelionRelative,
        &encounter_window(),
        &daily_query(),
        &PerihelionCatalog::default(),
    );
    assert_eq!(axis.fallback, Some(FallbackReason::ReferenceUnresolved));
    assert_eq!(axis.requested, CoordinateMode::PerihelionRelative);
}

#[test]
fn test_other_modes_ignore_resolver() {
    let mapper = encounter_mapper();
    let params = AxisParams::default();
    let selector = CoordinateSelector::new(&mapper, &params);
    let never = |_center: f64| -> Option<f64> { panic!("resolver must not be called") };

    let radial = selector.select_for_window(
        CoordinateMode::Radial,
        &encounter_window(),
        &[ENCOUNTER_START + 0.5],
        &never,
    );
    assert_eq!(radial.mode, CoordinateMode::Radial);
    assert_relative_eq!(radial.values[0], 37.5, epsilon = 1e-12);

    let time = selector.select_for_window(
        CoordinateMode::Time,
        &encounter_window(),
        &[ENCOUNTER_START],
        &never,
    );
    assert_eq!(time.values, vec![ENCOUNTER_START]);
    assert!(!time.is_fallback());
}

#[test]
fn test_partial_table_falls_back_per_panel() {
    let mapper = TrajectoryMapper::load(Utf8Path::new("tests/data/radial_only.csv"));
    let params = AxisParams::default();
    let selector = CoordinateSelector::new(&mapper, &params);
    let query = [59224.5];

    let radial = selector.select(CoordinateMode::Radial, &query, None);
    assert_eq!(radial.mode, CoordinateMode::Radial);

    let lat = selector.select(CoordinateMode::Latitude, &query, None);
    assert_eq!(
        lat.fallback,
        Some(FallbackReason::SeriesUnavailable(Quantity::Latitude))
    );

    let reference = ReferenceEvent::resolve(&mapper, 59225.0);
    assert!(!reference.is_resolved());
    let relative = selector.select(CoordinateMode::PerihelionRelative, &query, Some(&reference));
    assert_eq!(
        relative.fallback,
        Some(FallbackReason::SeriesUnavailable(Quantity::Longitude))
    );
}

#[test]
fn test_modes_parse_from_panel_config() {
    let requested: Vec<CoordinateMode> = [
        "time",
        "radial",
        "carrington_lon",
        "latitude",
        "perihelion_relative",
    ]
    .iter()
    .map(|s| s.parse().unwrap())
    .collect();
    assert_eq!(
        requested.iter().map(|m| m.quantity()).collect::<Vec<_>>(),
        vec![
            None,
            Some(Quantity::Radial),
            Some(Quantity::Longitude),
            Some(Quantity::Latitude),
            Some(Quantity::Longitude)
        ]
    );
}
