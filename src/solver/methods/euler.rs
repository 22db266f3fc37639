//! Forward Euler method
//!
//! # Mathematical Background
//!
//! ```text
//! y_{n+1} = y_n + h · f(x_n, y_n)
//! ```
//!
//! - **Order**: first order, global error O(h)
//! - **Cost**: 1 evaluation per step
//!
//! Halving `h` halves the error, which makes it the baseline every other
//! method is compared against.

use crate::error::Result;
use crate::ode::State;
use crate::solver::methods::Stage;

/// One forward Euler step
pub fn step(stage: &Stage<'_>, x: f64, _x_next: f64, state: State, h: f64) -> Result<State> {
    let slope = stage.slope(x, &state)?;
    Ok(state + slope * h)
}
