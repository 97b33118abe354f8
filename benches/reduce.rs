use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use ndarray::Array1;

use lanekit::reference::{naive_dot, naive_sum, seeded_rng, uniform_vec};

fn benchmark_sum(c: &mut Criterion) {
    let mut rng = seeded_rng(42);
    let mut group = c.benchmark_group("Sum");

    for &len in [1_000usize, 10_000, 100_000].iter() {
        let values: Vec<f32> = uniform_vec(len, &mut rng);
        let values_nd = Array1::from_vec(values.clone());

        group.throughput(Throughput::Elements(len as u64));

        group.bench_with_input(BenchmarkId::new("naive", len), &len, |bencher, _| {
            bencher.iter(|| black_box(naive_sum(black_box(&values))));
        });

        group.bench_with_input(BenchmarkId::new("ndarray", len), &len, |bencher, _| {
            bencher.iter(|| black_box(black_box(&values_nd).sum()));
        });

        group.bench_with_input(BenchmarkId::new("lanekit", len), &len, |bencher, _| {
            bencher.iter(|| black_box(lanekit::sum(black_box(&values))));
        });
    }

    group.finish();
}

fn benchmark_dot(c: &mut Criterion) {
    let mut rng = seeded_rng(42);
    let mut group = c.benchmark_group("Dot");

    for &len in [512usize, 4_096, 65_536].iter() {
        let a: Vec<f32> = uniform_vec(len, &mut rng);
        let b: Vec<f32> = uniform_vec(len, &mut rng);
        let (a_nd, b_nd) = (Array1::from_vec(a.clone()), Array1::from_vec(b.clone()));

        group.throughput(Throughput::Elements(len as u64));

        group.bench_with_input(BenchmarkId::new("naive", len), &len, |bencher, _| {
            bencher.iter(|| black_box(naive_dot(black_box(&a), black_box(&b))));
        });

        group.bench_with_input(BenchmarkId::new("ndarray", len), &len, |bencher, _| {
            bencher.iter(|| black_box(black_box(&a_nd).dot(black_box(&b_nd))));
        });

        group.bench_with_input(BenchmarkId::new("lanekit", len), &len, |bencher, _| {
            bencher.iter(|| black_box(lanekit::dot(black_box(&a), black_box(&b))));
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_sum, benchmark_dot);
criterion_main!(benches);
