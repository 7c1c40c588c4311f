//! Benchmarks for synthetic series generation.
//!
//! Run with: cargo bench --package ocean-synth

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use ocean_common::RegionConfig;
use ocean_synth::{GaussianNoise, SyntheticOceanSynthesizer};

fn bench_synthesize(c: &mut Criterion) {
    let mut group = c.benchmark_group("synthesize");
    let region = RegionConfig::default();
    let variables = vec!["VHM0".to_string(), "zos".to_string()];

    for end in ["2024-01-15T06:00:00", "2024-01-16T00:00:00"] {
        group.bench_with_input(BenchmarkId::from_parameter(end), &end, |b, end| {
            let mut synth = SyntheticOceanSynthesizer::with_noise(GaussianNoise::seeded(42));
            b.iter(|| synth.synthesize(black_box("2024-01-15T00:00:00"), end, &variables, &region))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_synthesize);
criterion_main!(benches);
