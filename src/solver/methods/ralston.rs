//! Ralston's second-order Runge-Kutta method ("RK2.2")
//!
//! ```text
//! k₁ = h · f(x_n, y_n)
//! k₂ = h · f(x_n + 3h/4, y_n + 3k₁/4)
//!
//! y_{n+1} = y_n + k₁/3 + 2k₂/3
//! ```
//!
//! Same order and cost as Heun, with the stage point chosen to minimize the
//! truncation error bound.

use crate::error::Result;
use crate::ode::State;
use crate::solver::methods::Stage;

/// One Ralston RK2 step
pub fn step(stage: &Stage<'_>, x: f64, _x_next: f64, state: State, h: f64) -> Result<State> {
    let k1 = stage.slope(x, &state)? * h;
    let k2 = stage.slope(x + 0.75 * h, &(state + k1 * 0.75))? * h;

    Ok(state + k1 * (1.0 / 3.0) + k2 * (2.0 / 3.0))
}
