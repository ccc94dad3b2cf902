use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use vanishing_point_core::{ImageBounds, LineSegment};
use vanishing_point_estimator::VanishingPointEstimator;

/// Deterministic pseudo-random segments: half converge on one point, the
/// rest are scattered.
fn synthetic_segments(n: usize) -> Vec<LineSegment> {
    let mut state = 0x2545_f491_4f6c_dd1du64;
    let mut next = move || {
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        (state >> 11) as f64 / (1u64 << 53) as f64
    };

    (0..n)
        .map(|i| {
            if i % 2 == 0 {
                let a = (15.0 + 150.0 * next()).to_radians();
                let (c, s) = (a.cos(), a.sin());
                LineSegment::new(
                    480.0 + 100.0 * c,
                    360.0 + 100.0 * s,
                    480.0 + 250.0 * c,
                    360.0 + 250.0 * s,
                )
            } else {
                LineSegment::new(
                    1000.0 * next(),
                    1000.0 * next(),
                    1000.0 * next(),
                    1000.0 * next(),
                )
            }
        })
        .collect()
}

fn bench_estimate(c: &mut Criterion) {
    let bounds = ImageBounds::new(1000.0, 750.0);
    let estimator = VanishingPointEstimator::default();
    let mut group = c.benchmark_group("estimate");
    for n in [50usize, 200, 800] {
        let segments = synthetic_segments(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &segments, |b, segs| {
            b.iter(|| estimator.estimate(black_box(segs), bounds))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_estimate);
criterion_main!(benches);
