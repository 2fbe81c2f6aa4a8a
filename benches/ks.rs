use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use ks_image_compare::analysis::{build_distribution, ks_statistic, Comparison, DEFAULT_ALPHA};
use ks_image_compare::extraction::{SampleSource, SyntheticSource};

fn bench_comparison(c: &mut Criterion) {
    let mut group = c.benchmark_group("ks");

    for &size in &[10_000usize, 307_200, 2_073_600] {
        let a = SyntheticSource::new(1, size).acquire().unwrap();
        let b = SyntheticSource::new(2, size).with_shape(120, 60).acquire().unwrap();

        group.bench_with_input(BenchmarkId::new("statistic", size), &size, |bench, _| {
            bench.iter(|| ks_statistic(black_box(&a), black_box(&b)).unwrap())
        });
        group.bench_with_input(BenchmarkId::new("distribution", size), &size, |bench, _| {
            bench.iter(|| build_distribution(black_box(&a)).unwrap())
        });
        group.bench_with_input(BenchmarkId::new("comparison", size), &size, |bench, _| {
            bench.iter(|| Comparison::compute(black_box(&a), black_box(&b), DEFAULT_ALPHA).unwrap())
        });
    }

    group.finish();
}

criterion_group!(benches, bench_comparison);
criterion_main!(benches);
