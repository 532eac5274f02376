//! Eigendecomposition benchmarks comparing eigenbasis vs nalgebra
//!
//! Covers the closed-form 2×2/3×3 paths, the shifted QR path, and the
//! `P·Dⁿ·P⁻¹` operations built on top of a decomposition.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hint::black_box;

/// Deterministic non-symmetric test matrix with a mix of real and complex eigenvalues
fn create_general_matrix(n: usize) -> Vec<f64> {
    let mut result = vec![0.0f64; n * n];
    for i in 0..n {
        for j in 0..n {
            let val = ((i * 7 + j * 3) % 11) as f64 - 5.0;
            result[i * n + j] = val / (n as f64);
        }
        result[i * n + i] += (i + 1) as f64;
    }
    result
}

fn bench_decompose(c: &mut Criterion) {
    use eigenbasis::{decompose, Matrix};

    let mut group = c.benchmark_group("decompose");

    let sizes = vec![
        2,  // Quadratic
        3,  // Cubic
        4,  // Smallest shifted QR
        8,  // Small
        16, // Medium
        32, // Large for this crate
    ];

    for n in sizes {
        let matrix = Matrix::from_vec(n, n, create_general_matrix(n)).expect("valid matrix");

        group.bench_with_input(BenchmarkId::from_parameter(n), &matrix, |bench, matrix| {
            bench.iter(|| {
                let eigen = decompose(black_box(matrix)).expect("decompose should succeed");
                black_box(eigen);
            });
        });
    }

    group.finish();
}

fn bench_iterative_vs_closed_form(c: &mut Criterion) {
    use eigenbasis::{DecomposerConfig, EigenDecomposer, Matrix, Strategy};

    let mut group = c.benchmark_group("strategy");

    let closed = EigenDecomposer::new();
    let iterative =
        EigenDecomposer::with_config(DecomposerConfig::new().with_strategy(Strategy::Iterative));

    for n in [2usize, 3] {
        let matrix = Matrix::from_vec(n, n, create_general_matrix(n)).expect("valid matrix");

        group.bench_with_input(BenchmarkId::new("closed_form", n), &matrix, |bench, m| {
            bench.iter(|| black_box(closed.decompose(black_box(m)).expect("decompose")));
        });

        group.bench_with_input(BenchmarkId::new("shifted_qr", n), &matrix, |bench, m| {
            bench.iter(|| black_box(iterative.decompose(black_box(m)).expect("decompose")));
        });
    }

    group.finish();
}

fn bench_diagonalization(c: &mut Criterion) {
    use eigenbasis::{decompose, Matrix};

    let mut group = c.benchmark_group("diagonalization");

    for n in [2usize, 3, 8] {
        let matrix = Matrix::from_vec(n, n, create_general_matrix(n)).expect("valid matrix");
        let eigen = decompose(&matrix).expect("decompose should succeed");

        group.bench_with_input(BenchmarkId::new("reconstruct", n), &eigen, |bench, e| {
            bench.iter(|| black_box(e.reconstruct().expect("diagonalizable")));
        });

        group.bench_with_input(BenchmarkId::new("power_20", n), &eigen, |bench, e| {
            bench.iter(|| black_box(e.matrix_power(black_box(20)).expect("diagonalizable")));
        });

        group.bench_with_input(
            BenchmarkId::new("power_20_by_multiplication", n),
            &matrix,
            |bench, m| {
                bench.iter(|| black_box(m.powi_by_multiplication(black_box(20)).expect("square")));
            },
        );
    }

    group.finish();
}

fn bench_eigen_comparison(c: &mut Criterion) {
    use eigenbasis::{decompose, Matrix};
    use nalgebra::DMatrix;

    let mut group = c.benchmark_group("eigen_comparison");

    for n in [3usize, 8, 16] {
        let data = create_general_matrix(n);

        let ours = Matrix::from_vec(n, n, data.clone()).expect("valid matrix");
        let theirs = DMatrix::from_row_slice(n, n, &data);

        group.bench_with_input(BenchmarkId::new("eigenbasis", n), &ours, |bench, m| {
            bench.iter(|| black_box(decompose(black_box(m)).expect("decompose")));
        });

        // Eigenvalues only on the nalgebra side
        group.bench_with_input(BenchmarkId::new("nalgebra", n), &theirs, |bench, m| {
            bench.iter(|| black_box(black_box(m).complex_eigenvalues()));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_decompose,
    bench_iterative_vs_closed_form,
    bench_diagonalization,
    bench_eigen_comparison
);
criterion_main!(benches);
