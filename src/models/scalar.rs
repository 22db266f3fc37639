//! Scalar problems `y' = f(x, y)`
//!
//! # Available Problems
//!
//! ## Trig
//!
//! ```text
//! y' = cos(x) − x·sin(x),   y(0) = 1,   x ∈ [0, 1.5],   h = 0.3
//! ```
//!
//! Closed form `y(x) = x·cos(x) + 1`, sampled on the integration grid to
//! build the reference.
//!
//! ## Trig-damped
//!
//! ```text
//! y' = cos(x) − x·y,   y(0) = 1,   x ∈ [0, 2],   h = 0.5
//! ```
//!
//! No elementary closed form; the reference is a 5-value table at spacing 0.5.

use crate::error::Result;
use crate::models::refined_step;
use crate::ode::{ScalarRhs, State};
use crate::solver::{ProblemSpec, ReferenceSolution};

// ======================================== Trig ========================================

/// Start of the trig domain
pub const TRIG_START: f64 = 0.0;
/// End of the trig domain
pub const TRIG_END: f64 = 1.5;
/// Unrefined trig step size
pub const TRIG_STEP: f64 = 0.3;
/// Trig initial value
pub const TRIG_INITIAL: f64 = 1.0;

/// Right-hand side `cos(x) − x·sin(x)`
pub fn trig_rhs(x: f64, _y: f64) -> f64 {
    x.cos() - x * x.sin()
}

/// Closed form `x·cos(x) + 1`
pub fn trig_exact(x: f64) -> f64 {
    x * x.cos() + 1.0
}

/// Trig problem at refinement level `refine`
pub fn trig(refine: u32) -> Result<ProblemSpec> {
    let h = refined_step(TRIG_STEP, refine)?;
    let rhs = ScalarRhs::new("trig", trig_rhs).with_description("y' = cos(x) - x*sin(x)");

    Ok(ProblemSpec::new(rhs, State::scalar(TRIG_INITIAL), TRIG_START, TRIG_END, h)?
        .with_reference(ReferenceSolution::from_fn(TRIG_START, TRIG_END, h, trig_exact)))
}

// ==================================== Trig-damped ====================================

/// Start of the trig-damped domain
pub const TRIG_DAMPED_START: f64 = 0.0;
/// End of the trig-damped domain
pub const TRIG_DAMPED_END: f64 = 2.0;
/// Unrefined trig-damped step size
pub const TRIG_DAMPED_STEP: f64 = 0.5;
/// Trig-damped initial value
pub const TRIG_DAMPED_INITIAL: f64 = 1.0;

/// Tabulated reference at `x = 0, 0.5, 1, 1.5, 2`
pub const TRIG_DAMPED_REFERENCE: [f64; 5] = [1.0, 1.32326, 1.20079, 0.74740, 0.24241];

/// Right-hand side `cos(x) − x·y`
pub fn trig_damped_rhs(x: f64, y: f64) -> f64 {
    x.cos() - x * y
}

/// Trig-damped problem at refinement level `refine`
///
/// The tabulated reference keeps its 0.5 spacing, so refined grids compare
/// against it every `2^refine` steps.
pub fn trig_damped(refine: u32) -> Result<ProblemSpec> {
    let h = refined_step(TRIG_DAMPED_STEP, refine)?;
    let rhs = ScalarRhs::new("trig-damped", trig_damped_rhs).with_description("y' = cos(x) - x*y");

    Ok(ProblemSpec::new(
        rhs,
        State::scalar(TRIG_DAMPED_INITIAL),
        TRIG_DAMPED_START,
        TRIG_DAMPED_END,
        h,
    )?
    .with_reference(ReferenceSolution::scalar(TRIG_DAMPED_REFERENCE.to_vec())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ode::RightHandSide;

    #[test]
    fn test_trig_grid_and_reference() {
        let problem = trig(0).unwrap();
        assert_eq!(problem.num_samples(), 6);
        assert_eq!(problem.reference().unwrap().len(), 6);
        assert_eq!(problem.rhs().description(), Some("y' = cos(x) - x*sin(x)"));
    }

    #[test]
    fn test_trig_exact_solves_rhs() {
        // d/dx (x cos x + 1) = cos x − x sin x
        let x: f64 = 0.7;
        let eps = 1e-6;
        let derivative = (trig_exact(x + eps) - trig_exact(x - eps)) / (2.0 * eps);
        assert!((derivative - trig_rhs(x, 0.0)).abs() < 1e-8);
    }

    #[test]
    fn test_trig_refined_reference_follows_step() {
        let problem = trig(2).unwrap();
        assert_eq!(problem.num_steps(), 20);
        assert_eq!(problem.reference().unwrap().len(), 21);
    }

    #[test]
    fn test_trig_damped_reference_is_tabulated() {
        let problem = trig_damped(1).unwrap();
        assert_eq!(problem.num_steps(), 8);
        let reference = problem.reference().unwrap();
        assert_eq!(reference.component(0), Some(&TRIG_DAMPED_REFERENCE[..]));
        assert_eq!(reference.align(&problem).unwrap().stride, 2);
    }
}
