//! Criterion benchmarks pumping each strategy to completion.
//! Focus sizes: n in {16, 64, 256}.
//! Results land under target/criterion by default.

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use hullstep::gen::{sample_points, SamplerCfg};
use hullstep::registry::{Algorithm, Driver};
use hullstep::scene::Scene;

fn sampled_scene(n: usize, seed: u64) -> Scene {
    // wide region so rejection sampling stays cheap at the largest size
    let cfg = SamplerCfg {
        width: 8000.0,
        height: 6000.0,
        ..SamplerCfg::default()
    };
    Scene::new(&sample_points(n, &cfg, seed))
}

fn bench_hull(c: &mut Criterion) {
    let mut group = c.benchmark_group("hull");
    for &n in &[16usize, 64, 256] {
        for algo in Algorithm::ALL {
            // the exhaustive pair scans get unwieldy past the mid size
            if n > 64 && matches!(algo, Algorithm::Naive | Algorithm::SmartNaive) {
                continue;
            }
            group.bench_with_input(BenchmarkId::new(algo.name(), n), &n, |b, &n| {
                b.iter_batched(
                    || sampled_scene(n, 43),
                    |scene| {
                        let mut driver = Driver::new(scene);
                        driver.start(algo, 43);
                        driver.run_to_end(|_| {})
                    },
                    BatchSize::SmallInput,
                )
            });
        }
    }
    group.finish();
}

criterion_group!(benches, bench_hull);
criterion_main!(benches);
