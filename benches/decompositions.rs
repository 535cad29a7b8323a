use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;

use fixmat::linalg::SvdDecomposition;
use fixmat::{Matrix, PrecedeVector, RowMajor};

// ---------------------------------------------------------------------------
// Helpers: well-conditioned test matrices
// ---------------------------------------------------------------------------

fn sample<const N: usize>() -> Matrix<f64, N, N> {
    Matrix::from_fn(|i, j| ((i + 1) * (j + 2)) as f64 * 0.1 + if i == j { N as f64 } else { 0.0 })
}

fn sample_precede<const N: usize>() -> Matrix<f64, N, N, PrecedeVector, RowMajor> {
    sample::<N>().flip()
}

// ---------------------------------------------------------------------------
// LU / LUP
// ---------------------------------------------------------------------------

fn lu(c: &mut Criterion) {
    let mut g = c.benchmark_group("lu");
    g.bench_function("3x3", |b| {
        let a = sample::<3>();
        b.iter(|| black_box(&a).lu())
    });
    g.bench_function("4x4", |b| {
        let a = sample::<4>();
        b.iter(|| black_box(&a).lu())
    });
    g.bench_function("6x6", |b| {
        let a = sample::<6>();
        b.iter(|| black_box(&a).lu())
    });
    g.finish();
}

fn lup(c: &mut Criterion) {
    let mut g = c.benchmark_group("lup");
    g.bench_function("3x3", |b| {
        let a = sample::<3>();
        b.iter(|| black_box(&a).lup())
    });
    g.bench_function("4x4", |b| {
        let a = sample::<4>();
        b.iter(|| black_box(&a).lup())
    });
    g.bench_function("6x6", |b| {
        let a = sample::<6>();
        b.iter(|| black_box(&a).lup())
    });
    g.bench_function("6x6_precede_row_major", |b| {
        let a = sample_precede::<6>();
        b.iter(|| black_box(&a).lup())
    });
    g.finish();
}

// ---------------------------------------------------------------------------
// QR
// ---------------------------------------------------------------------------

fn qr(c: &mut Criterion) {
    let mut g = c.benchmark_group("qr");
    g.bench_function("3x3", |b| {
        let a = sample::<3>();
        b.iter(|| black_box(&a).qr())
    });
    g.bench_function("4x4", |b| {
        let a = sample::<4>();
        b.iter(|| black_box(&a).qr())
    });
    g.bench_function("6x6", |b| {
        let a = sample::<6>();
        b.iter(|| black_box(&a).qr())
    });
    g.finish();
}

// ---------------------------------------------------------------------------
// SVD
// ---------------------------------------------------------------------------

fn svd(c: &mut Criterion) {
    let mut g = c.benchmark_group("svd");
    g.bench_function("one_sided_3x3", |b| {
        let a = sample::<3>();
        b.iter(|| -> SvdDecomposition<f64, 3, 3, 3> { black_box(&a).svd().unwrap() })
    });
    g.bench_function("one_sided_4x4", |b| {
        let a = sample::<4>();
        b.iter(|| -> SvdDecomposition<f64, 4, 4, 4> { black_box(&a).svd().unwrap() })
    });
    g.bench_function("one_sided_6x6", |b| {
        let a = sample::<6>();
        b.iter(|| -> SvdDecomposition<f64, 6, 6, 6> { black_box(&a).svd().unwrap() })
    });
    g.bench_function("two_sided_3x3", |b| {
        let a = sample::<3>();
        b.iter(|| -> SvdDecomposition<f64, 3, 3, 3> { black_box(&a).svd_two_sided().unwrap() })
    });
    g.bench_function("two_sided_4x4", |b| {
        let a = sample::<4>();
        b.iter(|| -> SvdDecomposition<f64, 4, 4, 4> { black_box(&a).svd_two_sided().unwrap() })
    });
    g.bench_function("two_sided_6x6", |b| {
        let a = sample::<6>();
        b.iter(|| -> SvdDecomposition<f64, 6, 6, 6> { black_box(&a).svd_two_sided().unwrap() })
    });
    g.finish();
}

criterion_group!(benches, lu, lup, qr, svd);
criterion_main!(benches);
