//! Benchmarks for the decompositions and optimizers.
//!
//! Run with: cargo bench -p descent-math

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;

use descent_math::constrained::{box_method, BoxConfig, Bounds, Constraints};
use descent_math::linear_algebra::{Matrix, Vector, DEFAULT_EPSILON};
use descent_math::optimization::direct::{hooke_jeeves, nelder_mead, HookeJeevesConfig, NelderMeadConfig};
use descent_math::optimization::gradient::{gauss_newton, newton_raphson, GradientConfig};
use descent_math::test_functions::{Rosenbrock, ShiftedQuadratic};

// =============================================================================
// TEST DATA GENERATORS
// =============================================================================

/// Diagonally dominant `n × n` matrix with deterministic entries.
fn dominant_matrix(n: usize) -> Matrix {
    let mut values = vec![0.0; n * n];
    for i in 0..n {
        for j in 0..n {
            values[i * n + j] = ((i * 7 + j * 13) % 11) as f64 - 5.0;
        }
        values[i * n + i] = 6.0 * n as f64;
    }
    Matrix::from_row_slice(n, n, &values).expect("square data")
}

// =============================================================================
// BENCHMARKS
// =============================================================================

fn bench_decomposition(c: &mut Criterion) {
    let mut group = c.benchmark_group("decomposition");
    for n in [4, 16, 64] {
        let a = dominant_matrix(n);
        let b = Vector::new((0..n).map(|i| i as f64).collect());

        group.bench_with_input(BenchmarkId::new("lup_solve", n), &n, |bench, _| {
            bench.iter(|| black_box(&a).solve(black_box(&b), DEFAULT_EPSILON));
        });
        group.bench_with_input(BenchmarkId::new("inverse", n), &n, |bench, _| {
            bench.iter(|| black_box(&a).inverse(DEFAULT_EPSILON));
        });
    }
    group.finish();
}

fn bench_direct_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("direct_search");
    let x0 = Vector::from([-1.9, 2.0]);

    group.bench_function("hooke_jeeves_rosenbrock", |bench| {
        let config = HookeJeevesConfig::default().with_max_iterations(100_000);
        bench.iter(|| hooke_jeeves(&Rosenbrock, black_box(&x0), &config));
    });
    group.bench_function("nelder_mead_rosenbrock", |bench| {
        let config = NelderMeadConfig::default();
        bench.iter(|| nelder_mead(&Rosenbrock, black_box(&x0), &config));
    });
    group.finish();
}

fn bench_gradient(c: &mut Criterion) {
    let mut group = c.benchmark_group("gradient");
    let config = GradientConfig::default();

    group.bench_function("newton_quadratic", |bench| {
        let x0 = Vector::from([0.1, 0.3]);
        bench.iter(|| newton_raphson(&ShiftedQuadratic, black_box(&x0), &config));
    });
    group.bench_function("gauss_newton_rosenbrock", |bench| {
        let x0 = Vector::from([-1.9, 2.0]);
        bench.iter(|| gauss_newton(&Rosenbrock, black_box(&x0), &config));
    });
    group.finish();
}

fn bench_box(c: &mut Criterion) {
    let bounds = Bounds::uniform(2, -100.0, 100.0).expect("valid bounds");
    let constraints = Constraints::new()
        .with_inequality(|x: &Vector| x[1] - x[0])
        .with_inequality(|x: &Vector| 2.0 - x[0]);
    let x0 = Vector::from([0.1, 0.3]);

    c.bench_function("box_method_quadratic", |bench| {
        bench.iter(|| {
            let mut rng = StdRng::seed_from_u64(7);
            box_method(
                &ShiftedQuadratic,
                black_box(&x0),
                &bounds,
                &constraints,
                &BoxConfig::default(),
                &mut rng,
            )
        });
    });
}

criterion_group!(
    benches,
    bench_decomposition,
    bench_direct_search,
    bench_gradient,
    bench_box
);
criterion_main!(benches);
