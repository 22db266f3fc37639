//! Performance benchmarks for the step methods
//!
//! Compares the five explicit methods on identical problems. The cost of a
//! step is dominated by right-hand side evaluations, so the time per run
//! should scale with `steps × stages`:
//!
//! ```text
//! Euler  1 evaluation per step
//! Heun   2
//! RK2.2  2
//! RK3    3
//! RK4    4
//! ```
//!
//! # Running Benchmarks
//!
//! ```bash
//! # All method benchmarks
//! cargo bench --bench solver_performance
//!
//! # Only the scalar problem
//! cargo bench --bench solver_performance scalar
//!
//! # Only the fitting stage
//! cargo bench --bench solver_performance fitting
//! ```

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::hint::black_box;

use ivp_fit::fitting::{fit_lagrange, fit_least_squares, fit_vandermonde, Underdetermined};
use ivp_fit::models::Problem;
use ivp_fit::pipeline::{run, RunConfiguration};
use ivp_fit::solver::{solve_all, ProblemSpec, Solver, StepMethod};

// =================================================================================================
// Helpers
// =================================================================================================

/// `problem` at refinement level `refine`, panics on an invalid level
fn build(problem: Problem, refine: u32) -> ProblemSpec {
    problem.build(refine).unwrap()
}

// =================================================================================================
// Benchmarks
// =================================================================================================

/// Every method on the trig problem, refined from 5 to 5·2^10 steps
fn benchmark_scalar_methods(c: &mut Criterion) {
    let mut group = c.benchmark_group("scalar");

    for refine in [0u32, 4, 10] {
        let problem = build(Problem::Trig, refine);

        for method in StepMethod::ALL {
            group.throughput(Throughput::Elements((problem.num_steps() * method.stages()) as u64));
            group.bench_with_input(
                BenchmarkId::new(method.label(), problem.num_steps()),
                &problem,
                |b, problem| b.iter(|| method.solve(black_box(problem)).unwrap()),
            );
        }
    }

    group.finish();
}

/// Every method on the coupled linear system
fn benchmark_system_methods(c: &mut Criterion) {
    let mut group = c.benchmark_group("system");

    for refine in [0u32, 6, 10] {
        let problem = build(Problem::LinearSystem, refine);

        for method in StepMethod::ALL {
            group.throughput(Throughput::Elements((problem.num_steps() * method.stages()) as u64));
            group.bench_with_input(
                BenchmarkId::new(method.label(), problem.num_steps()),
                &problem,
                |b, problem| b.iter(|| method.solve(black_box(problem)).unwrap()),
            );
        }
    }

    group.finish();
}

/// All methods at once, sequential or parallel depending on the `parallel` feature
fn benchmark_solve_all(c: &mut Criterion) {
    let problem = build(Problem::Trig, 12);

    c.bench_function("solve_all trig refine=12", |b| {
        b.iter(|| solve_all(black_box(&problem), &StepMethod::ALL).unwrap())
    });
}

/// The three fitting strategies on one RK4 trajectory
fn benchmark_fitting(c: &mut Criterion) {
    let mut group = c.benchmark_group("fitting");

    let trajectory = StepMethod::Rk4.solve(&build(Problem::Trig, 6)).unwrap();
    let points = trajectory.points(0);

    for degree in [3usize, 6] {
        let samples = &points[..=degree];

        group.bench_with_input(BenchmarkId::new("vandermonde", degree), &degree, |b, &degree| {
            b.iter(|| fit_vandermonde(black_box(samples), degree, Underdetermined::Reject).unwrap())
        });
        group.bench_with_input(BenchmarkId::new("lagrange", degree), &degree, |b, &degree| {
            b.iter(|| fit_lagrange(black_box(samples), Some(degree)).unwrap())
        });
        group.bench_with_input(BenchmarkId::new("least squares", degree), &degree, |b, &degree| {
            b.iter(|| fit_least_squares(black_box(&points), degree).unwrap())
        });
    }

    group.finish();
}

/// Full run: integrate, compare, fit, differentiate
fn benchmark_pipeline(c: &mut Criterion) {
    let config = RunConfiguration::default();

    for problem in Problem::ALL {
        let spec = build(problem, 0);
        c.bench_function(&format!("pipeline {}", problem), |b| {
            b.iter(|| run(black_box(&spec), &config).unwrap())
        });
    }
}

criterion_group!(
    benches,
    benchmark_scalar_methods,
    benchmark_system_methods,
    benchmark_solve_all,
    benchmark_fitting,
    benchmark_pipeline,
);
criterion_main!(benches);
