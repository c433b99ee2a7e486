use azmap::data::CityRecord;
use azmap::geo::{bearing_and_distance, GeoPoint};
use azmap::map::{segment_rings, BoundingBox, LabelOracle, LabelPlacer, PolarScale};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use glam::DVec2;

/// Latitude circles around the globe: long rings that sweep through the
/// observer's antipodal region and force plenty of segment splits
fn synthetic_rings() -> Vec<Vec<GeoPoint>> {
    (0..36)
        .map(|i| {
            let lat = -85.0 + i as f64 * 4.7;
            (0..360)
                .map(|j| GeoPoint::new(lat, -180.0 + j as f64))
                .collect()
        })
        .collect()
}

/// Deterministic city spread (no RNG so runs are comparable)
fn synthetic_cities(n: usize) -> Vec<CityRecord> {
    (0..n)
        .map(|i| CityRecord {
            label: format!("City {i}"),
            latitude: ((i as f64 * 37.7) % 170.0) - 85.0,
            longitude: ((i as f64 * 97.3) % 360.0) - 180.0,
        })
        .collect()
}

struct FixedOracle;

impl LabelOracle for FixedOracle {
    fn trial_box(&self, label: &str, position: DVec2) -> BoundingBox {
        BoundingBox::new(
            (position.x / 2.0).floor(),
            (position.y / 4.0).floor(),
            2.0 + label.chars().count() as f64,
            1.0,
        )
    }
}

fn bench_bearing_and_distance(c: &mut Criterion) {
    let observer = GeoPoint::new(39.91, 116.39);
    let targets: Vec<GeoPoint> = (0..1000)
        .map(|i| {
            GeoPoint::new(
                ((i as f64 * 13.1) % 170.0) - 85.0,
                ((i as f64 * 29.7) % 360.0) - 180.0,
            )
        })
        .collect();

    c.bench_function("bearing_and_distance_1k", |b| {
        b.iter(|| {
            for &target in &targets {
                black_box(bearing_and_distance(observer, target));
            }
        })
    });
}

fn bench_segment_rings(c: &mut Criterion) {
    let observer = GeoPoint::new(39.91, 116.39);
    let rings = synthetic_rings();
    let scale = PolarScale::new(400.0);

    c.bench_function("segment_rings_36x360", |b| {
        b.iter(|| black_box(segment_rings(observer, &rings, &scale, 10.0)))
    });
}

fn bench_label_placement(c: &mut Criterion) {
    let observer = GeoPoint::new(39.91, 116.39);
    let cities = synthetic_cities(2000);
    let scale = PolarScale::new(400.0);
    let center = DVec2::new(500.0, 500.0);

    c.bench_function("place_2000_cities", |b| {
        b.iter(|| {
            black_box(LabelPlacer::new().place(
                observer,
                &cities,
                &scale,
                center,
                &FixedOracle,
                2000,
            ))
        })
    });
}

criterion_group!(
    benches,
    bench_bearing_and_distance,
    bench_segment_rings,
    bench_label_placement
);
criterion_main!(benches);
