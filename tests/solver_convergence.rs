//! Convergence tests for the step methods
//!
//! These tests verify that each method exhibits its expected convergence
//! rate when the step size is halved, on problems with a closed form.

use ivp_fit::error::IvpError;
use ivp_fit::solver::{Solver, StepMethod};

mod common;
use common::mock_models::ClosedForm;
use common::{convergence_ratios, relative_error, ConstantGrowth, ExponentialDecay, Oscillator, SqrtDomain};

const STEPS: [f64; 4] = [0.1, 0.05, 0.025, 0.0125];

fn assert_ratios_within(method: StepMethod, ratios: &[f64], low: f64, high: f64) {
    for (i, ratio) in ratios.iter().enumerate() {
        println!("{} convergence ratio {}->{}: {}", method.label(), i, i + 1, ratio);
        assert!(
            *ratio > low && *ratio < high,
            "{} convergence ratio {} outside ({}, {})",
            method.label(),
            ratio,
            low,
            high
        );
    }
}

#[test]
fn test_euler_first_order_convergence() {
    // Error ~ O(h): halving h halves the error
    let ratios = convergence_ratios(StepMethod::Euler, &ExponentialDecay::new(1.0), &STEPS, 0);
    assert_ratios_within(StepMethod::Euler, &ratios, 1.8, 2.2);
}

#[test]
fn test_second_order_convergence() {
    for method in [StepMethod::Heun, StepMethod::Ralston] {
        let ratios = convergence_ratios(method, &ExponentialDecay::new(1.0), &STEPS, 0);
        assert_ratios_within(method, &ratios, 3.6, 4.4);
    }
}

#[test]
fn test_rk3_third_order_convergence() {
    let ratios = convergence_ratios(StepMethod::Rk3, &ExponentialDecay::new(1.0), &STEPS, 0);
    assert_ratios_within(StepMethod::Rk3, &ratios, 7.0, 9.0);
}

#[test]
fn test_rk4_fourth_order_convergence() {
    let ratios = convergence_ratios(StepMethod::Rk4, &ExponentialDecay::new(1.0), &STEPS, 0);
    assert_ratios_within(StepMethod::Rk4, &ratios, 14.0, 18.0);
}

#[test]
fn test_rk4_system_convergence() {
    let oscillator = Oscillator { end: 2.0 };
    for component in 0..2 {
        let ratios = convergence_ratios(StepMethod::Rk4, &oscillator, &STEPS[..3], component);
        assert_ratios_within(StepMethod::Rk4, &ratios, 14.0, 18.0);
    }
}

#[test]
fn test_higher_order_is_more_accurate() {
    let decay = ExponentialDecay::new(1.0);
    let errors: Vec<f64> = StepMethod::ALL
        .iter()
        .filter(|m| **m != StepMethod::Ralston)
        .map(|m| common::final_error(*m, &decay, 0.1, 0))
        .collect();

    // Euler > Heun > RK3 > RK4
    for pair in errors.windows(2) {
        assert!(pair[0] > pair[1], "errors not decreasing: {:?}", errors);
    }
}

#[test]
fn test_every_method_is_exact_on_constant_slope() {
    let growth = ConstantGrowth { slope: 3.0 };
    for method in StepMethod::ALL {
        let trajectory = method.solve(&growth.problem(0.25)).unwrap();
        for sample in &trajectory.samples {
            assert!(
                relative_error(sample.state.component(0), growth.exact(sample.independent, 0)) < 1e-12,
                "{} drifted at x={}",
                method.label(),
                sample.independent
            );
        }
    }
}

#[test]
fn test_grid_length_and_values() {
    let growth = ConstantGrowth { slope: 1.0 };
    let trajectory = StepMethod::Euler.solve(&growth.problem(0.5)).unwrap();

    assert_eq!(trajectory.len(), 5);
    assert_eq!(trajectory.independents(), vec![0.0, 0.5, 1.0, 1.5, 2.0]);
    let indices: Vec<usize> = trajectory.samples.iter().map(|s| s.index).collect();
    assert_eq!(indices, vec![0, 1, 2, 3, 4]);
}

#[test]
fn test_grid_is_recomputed_not_accumulated() {
    // 0.1 is not representable: accumulating it drifts, start + n·h does not
    let decay = ExponentialDecay { rate: 1.0, initial: 1.0, end: 1.0 };
    let trajectory = StepMethod::Rk4.solve(&decay.problem(0.1)).unwrap();

    assert_eq!(trajectory.len(), 11);
    for sample in &trajectory.samples {
        assert_eq!(sample.independent, sample.index as f64 * 0.1);
    }
}

#[test]
fn test_step_count_is_rounded() {
    // 0.7 / 0.1 = 6.999999999999999 in floating point
    let decay = ExponentialDecay { rate: 1.0, initial: 1.0, end: 0.7 };
    let problem = decay.problem(0.1);
    assert_eq!(problem.num_steps(), 7);

    let trajectory = StepMethod::Heun.solve(&problem).unwrap();
    assert_eq!(trajectory.len(), 8);
    assert!((trajectory.final_sample().unwrap().independent - 0.7).abs() < 1e-12);
}

#[test]
fn test_nan_slope_is_a_numeric_evaluation_error() {
    let err = StepMethod::Euler.solve(&SqrtDomain.problem(0.5)).unwrap_err();
    match err {
        IvpError::NumericEvaluation { independent, step, .. } => {
            assert_eq!(independent, 1.5);
            assert_eq!(step, 4);
        }
        other => panic!("unexpected error {other:?}"),
    }

    // RK4 fails earlier, at its midpoint stage x = 1.25 while producing sample 3
    let err = StepMethod::Rk4.solve(&SqrtDomain.problem(0.5)).unwrap_err();
    assert!(err.is_fatal());
    assert!(matches!(err, IvpError::NumericEvaluation { step: 3, independent, .. } if independent == 1.25));
}

#[test]
fn test_metadata_records_evaluations() {
    let decay = ExponentialDecay::new(1.0);
    let trajectory = StepMethod::Rk4.solve(&decay.problem(0.5)).unwrap();
    assert_eq!(trajectory.metadata.get("function evaluations").map(String::as_str), Some("16"));
    assert_eq!(trajectory.metadata.get("steps").map(String::as_str), Some("4"));
}
