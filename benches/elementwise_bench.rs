//! Benchmarks for elementwise dispatch across representations

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use numarray::prelude::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

fn random_dense(rng: &mut ChaCha8Rng, n: usize) -> NumericArray {
    let data = (0..n * n).map(|_| rng.gen_range(0.5..2.0)).collect();
    NumericArray::dense(data, n, n).expect("buffer matches shape")
}

/// Roughly 5% of entries stored
fn random_sparse(rng: &mut ChaCha8Rng, n: usize) -> NumericArray {
    let data: Vec<f64> = (0..n * n)
        .map(|_| if rng.gen_bool(0.05) { rng.gen_range(0.5..2.0) } else { 0.0 })
        .collect();
    let dense = DenseMatrix::new(data, n, n).expect("buffer matches shape");
    SparseMatrix::from_dense(&dense).into()
}

fn bench_rdivide(c: &mut Criterion) {
    let mut group = c.benchmark_group("rdivide");
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    let engine = Engine::new(EngineConfig::default()).expect("default engine");

    for &n in &[64, 256, 1024] {
        let dense = random_dense(&mut rng, n);
        let sparse = random_sparse(&mut rng, n);
        let scalar = NumericArray::from(3.0);

        group.bench_with_input(BenchmarkId::new("dense_dense", n), &n, |b, _| {
            b.iter(|| black_box(engine.apply(Operation::Rdivide, &[&dense, &dense])))
        });
        group.bench_with_input(BenchmarkId::new("sparse_dense", n), &n, |b, _| {
            b.iter(|| black_box(engine.apply(Operation::Rdivide, &[&sparse, &dense])))
        });
        group.bench_with_input(BenchmarkId::new("sparse_scalar", n), &n, |b, _| {
            b.iter(|| black_box(engine.apply(Operation::Rdivide, &[&sparse, &scalar])))
        });
    }
    group.finish();
}

fn bench_transcendental(c: &mut Criterion) {
    let mut group = c.benchmark_group("transcendental");
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    let engine = Engine::new(EngineConfig::default()).expect("default engine");

    for &n in &[64, 512] {
        let dense = random_dense(&mut rng, n);
        // values above 1 force complex promotion for atanh
        group.bench_with_input(BenchmarkId::new("atanh_promoted", n), &n, |b, _| {
            b.iter(|| black_box(engine.apply(Operation::Atanh, &[&dense])))
        });
        group.bench_with_input(BenchmarkId::new("exp", n), &n, |b, _| {
            b.iter(|| black_box(engine.apply(Operation::Exp, &[&dense])))
        });
    }
    group.finish();
}

fn bench_mixed_domain(c: &mut Criterion) {
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    let engine = Engine::new(EngineConfig::default()).expect("default engine");
    let dense = random_dense(&mut rng, 256);
    let i = NumericArray::from(Complex64::new(0.0, 1.0));

    c.bench_function("times_real_dense_complex_scalar_256", |b| {
        b.iter(|| black_box(engine.apply(Operation::Times, &[&dense, &i])))
    });
}

criterion_group!(benches, bench_rdivide, bench_transcendental, bench_mixed_domain);
criterion_main!(benches);
