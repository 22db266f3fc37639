//! Kutta's third-order Runge-Kutta method
//!
//! ```text
//! k₁ = h · f(x_n, y_n)
//! k₂ = h · f(x_n + h/2, y_n + k₁/2)
//! k₃ = h · f(x_n + h, y_n - k₁ + 2k₂)
//!
//! y_{n+1} = y_n + (k₁ + 4k₂ + k₃) / 6
//! ```
//!
//! - **Order**: third order, halving `h` divides the error by about 8
//! - **Cost**: 3 evaluations per step

use crate::error::Result;
use crate::ode::State;
use crate::solver::methods::Stage;

/// One RK3 step
pub fn step(stage: &Stage<'_>, x: f64, x_next: f64, state: State, h: f64) -> Result<State> {
    let k1 = stage.slope(x, &state)? * h;
    let k2 = stage.slope(x + 0.5 * h, &(state + k1 * 0.5))? * h;
    let k3 = stage.slope(x_next, &(state - k1 + k2 * 2.0))? * h;

    Ok(state + (k1 + k2 * 4.0 + k3) * (1.0 / 6.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ode::ScalarRhs;
    use approx::assert_relative_eq;

    #[test]
    fn test_single_step_growth() {
        // 1 + h + h²/2 + h³/6 for h = 0.5
        let rhs = ScalarRhs::new("growth", |_x, y| y);
        let stage = Stage::new(&rhs, 1);
        let next = step(&stage, 0.0, 0.5, State::scalar(1.0), 0.5).unwrap();
        assert_relative_eq!(next.component(0), 1.0 + 0.5 + 0.125 + 0.125 / 6.0, epsilon = 1e-12);
    }

    #[test]
    fn test_exact_for_quadratic_in_x() {
        // Simpson weights integrate x² exactly: ∫₀² x² dx = 8/3
        let rhs = ScalarRhs::new("square", |x, _y| x * x);
        let stage = Stage::new(&rhs, 1);
        let next = step(&stage, 0.0, 2.0, State::scalar(0.0), 2.0).unwrap();
        assert_relative_eq!(next.component(0), 8.0 / 3.0, epsilon = 1e-12);
    }
}
