//! Heun predictor-corrector method
//!
//! # Mathematical Background
//!
//! An Euler predictor followed by a trapezoidal corrector:
//!
//! ```text
//! ŷ       = y_n + h · f(x_n, y_n)                        (predictor)
//! y_{n+1} = y_n + h/2 · (f(x_n, y_n) + f(x_{n+1}, ŷ))    (corrector)
//! ```
//!
//! - **Order**: second order, global error O(h²)
//! - **Cost**: 2 evaluations per step
//!
//! For systems the corrector is applied to every component with the same
//! predicted state `ŷ`: no component of the corrector reads an already
//! corrected value.

use crate::error::Result;
use crate::ode::State;
use crate::solver::methods::Stage;

/// One Heun predictor-corrector step
pub fn step(stage: &Stage<'_>, x: f64, x_next: f64, state: State, h: f64) -> Result<State> {
    let slope = stage.slope(x, &state)?;
    let predicted = state + slope * h;

    let corrected_slope = stage.slope(x_next, &predicted)?;
    Ok(state + (slope + corrected_slope) * (h / 2.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ode::{ScalarRhs, SystemRhs};
    use approx::assert_relative_eq;

    #[test]
    fn test_single_step_growth() {
        // y' = y: Heun reproduces 1 + h + h²/2
        let rhs = ScalarRhs::new("growth", |_x, y| y);
        let stage = Stage::new(&rhs, 1);
        let next = step(&stage, 0.0, 0.5, State::scalar(1.0), 0.5).unwrap();
        assert_relative_eq!(next.component(0), 1.625, epsilon = 1e-12);
    }

    #[test]
    fn test_exact_for_linear_in_x() {
        // y' = x integrates exactly with the trapezoidal rule
        let rhs = ScalarRhs::new("ramp", |x, _y| x);
        let stage = Stage::new(&rhs, 1);
        let next = step(&stage, 1.0, 3.0, State::scalar(0.0), 2.0).unwrap();
        assert_relative_eq!(next.component(0), 4.0, epsilon = 1e-12);
    }

    #[test]
    fn test_system_corrector_uses_predicted_state_only() {
        // x' = -x, y' = x. With h = 1 from (1, 0):
        //   slope     = (-1, 1)
        //   predicted = (0, 1)
        //   corrector = (0, 0)
        //   next      = (1, 0) + 0.5·(-1, 1) = (0.5, 0.5)
        // Reading the corrected x (0.5) in y's corrector would give y = 0.75
        let rhs = SystemRhs::new("chain", |x, _y, _t| -x, |x, _y, _t| x);
        let stage = Stage::new(&rhs, 1);
        let next = step(&stage, 0.0, 1.0, State::pair(1.0, 0.0), 1.0).unwrap();
        assert_relative_eq!(next.component(0), 0.5, epsilon = 1e-12);
        assert_relative_eq!(next.component(1), 0.5, epsilon = 1e-12);
    }
}
