use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use heliotraj::angular_offset::offset;
use heliotraj::mapper::TrajectoryMapper;
use heliotraj::monotonic_filter::filter;
use heliotraj::trajectory_table::{Quantity, TrajectoryTable};

/// Hourly samples over one encounter, longitude drifting across the 0/360 boundary.
fn make_mapper(n: usize) -> TrajectoryMapper {
    let times: Vec<f64> = (0..n).map(|i| 59000.0 + i as f64 / 24.0).collect();
    let lon = (0..n)
        .map(|i| (300.0 + i as f64 * 0.15).rem_euclid(360.0))
        .collect();
    let radial = (0..n)
        .map(|i| 10.0 + ((i as f64 - n as f64 / 2.0) / 100.0).powi(2))
        .collect();
    let table = TrajectoryTable::builder(times)
        .longitude(lon)
        .radial(radial)
        .build()
        .unwrap();
    TrajectoryMapper::new(table)
}

fn random_query(rng: &mut StdRng, n: usize, span: f64) -> Vec<f64> {
    (0..n).map(|_| 59000.0 + rng.random::<f64>() * span).collect()
}

fn bench_map(c: &mut Criterion) {
    let table_len = 24 * 30;
    let mapper = make_mapper(table_len);
    let span = (table_len - 1) as f64 / 24.0;
    let mut rng = StdRng::seed_from_u64(42);

    let mut group = c.benchmark_group("map_longitude");
    for n in [100usize, 1_000, 10_000, 100_000] {
        let query = random_query(&mut rng, n, span);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_with_input(BenchmarkId::new("unwrap", n), &query, |b, q| {
            b.iter(|| mapper.map(black_box(q), Quantity::Longitude, true))
        });
        group.bench_with_input(BenchmarkId::new("wrapped", n), &query, |b, q| {
            b.iter(|| mapper.map(black_box(q), Quantity::Longitude, false))
        });
        group.bench_with_input(BenchmarkId::new("radial", n), &query, |b, q| {
            b.iter(|| mapper.map(black_box(q), Quantity::Radial, false))
        });
    }
    group.finish();
}

fn bench_relative_axis(c: &mut Criterion) {
    let table_len = 24 * 30;
    let mapper = make_mapper(table_len);
    let query: Vec<f64> = (0..10_000)
        .map(|i| 59000.0 + i as f64 * (table_len - 1) as f64 / 24.0 / 10_000.0)
        .collect();
    let reference = mapper
        .map_at(59015.0, Quantity::Longitude, true)
        .unwrap_or(f64::NAN);

    c.bench_function("offset_and_filter_10k", |b| {
        b.iter(|| {
            let lon = mapper
                .map(black_box(&query), Quantity::Longitude, true)
                .into_values()
                .unwrap_or_default();
            let relative = offset(&lon, reference);
            filter(&relative, 1.0)
        })
    });
}

criterion_group!(benches, bench_map, bench_relative_axis);
criterion_main!(benches);
