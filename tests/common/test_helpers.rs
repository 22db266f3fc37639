//! Helper functions for integration tests

use ivp_fit::solver::{Solver, StepMethod};

use super::mock_models::ClosedForm;

/// Absolute error of `method` at the last grid point, component `component`
pub fn final_error(method: StepMethod, model: &dyn ClosedForm, h: f64, component: usize) -> f64 {
    let trajectory = method.solve(&model.problem(h)).unwrap();
    let last = trajectory.final_sample().unwrap();
    (last.state.component(component) - model.exact(last.independent, component)).abs()
}

/// `e(h_k) / e(h_{k+1})` over the given step sizes
pub fn convergence_ratios(method: StepMethod, model: &dyn ClosedForm, steps: &[f64], component: usize) -> Vec<f64> {
    let errors: Vec<f64> = steps
        .iter()
        .map(|h| final_error(method, model, *h, component))
        .collect();

    errors.windows(2).map(|w| w[0] / w[1]).collect()
}

/// Assert that two point sequences match within `tolerance`
pub fn assert_points_close(actual: &[(f64, f64)], expected: &[(f64, f64)], tolerance: f64, message: &str) {
    assert_eq!(actual.len(), expected.len(), "{}: length mismatch", message);

    for (i, (a, e)) in actual.iter().zip(expected).enumerate() {
        assert!(
            (a.0 - e.0).abs() < tolerance && (a.1 - e.1).abs() < tolerance,
            "{}: point {} is {:?}, expected {:?} (tolerance {})",
            message, i, a, e, tolerance
        );
    }
}

/// Compute relative error: |actual - expected| / |expected|
pub fn relative_error(actual: f64, expected: f64) -> f64 {
    if expected.abs() < 1e-10 {
        (actual - expected).abs()
    } else {
        (actual - expected).abs() / expected.abs()
    }
}
