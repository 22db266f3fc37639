//! Ordinary differential equations
//!
//! This module provides the "what to integrate" half of the crate:
//!
//! - **State**: value of the dependent variable(s) at one grid point,
//!   either a scalar `y` or a 2-variable pair `(x, y)`
//! - **RightHandSide**: the derivative function `f(t, state)`
//!
//! # Architecture
//!
//! Right-hand sides are **separate from numerical methods**:
//! - The right-hand side provides the **equations**
//! - The solver provides the **method** to advance them (Euler, RK4, ...)
//!
//! # Example
//!
//! ```rust
//! use ivp_fit::ode::{RightHandSide, ScalarRhs, State};
//!
//! // y' = cos(x) - x·sin(x)
//! let rhs = ScalarRhs::new("trig", |x, _y| x.cos() - x * x.sin());
//!
//! let slope = rhs.evaluate(0.0, &State::scalar(1.0)).unwrap();
//! assert_eq!(slope, State::scalar(1.0));
//! ```
//!
//! # Systems
//!
//! 2-variable systems use `x' = f(x, y, t)`, `y' = g(x, y, t)`:
//!
//! ```rust
//! use ivp_fit::ode::{RightHandSide, SystemRhs, State};
//!
//! let rhs = SystemRhs::new(
//!     "coupled",
//!     |x, _y, _t| -0.5 * x,
//!     |x, y, _t| x - y,
//! );
//! assert_eq!(rhs.dimension(), 2);
//!
//! let slope = rhs.evaluate(0.0, &State::pair(2.0, 1.0)).unwrap();
//! assert_eq!(slope, State::pair(-1.0, 1.0));
//! ```

pub mod state;
pub mod traits;

pub use state::State;
pub use traits::{RightHandSide, ScalarRhs, SystemRhs};
