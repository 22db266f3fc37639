//! Numerical solvers
//!
//! This module turns an initial-value problem into a trajectory.
//!
//! # Core Concepts
//!
//! ## The Architecture (WHAT vs HOW)
//!
//! 1. **Problem** (`ProblemSpec`) - WHAT to solve
//!    - Right-hand side (equations)
//!    - Initial state, domain and step size
//!    - Optional reference solution
//!
//! 2. **Method** (`StepMethod`) - HOW to solve
//!    - Euler, Heun, Ralston RK2, RK3, RK4
//!
//! 3. **Solver** (`Solver` trait) - applies the method over the whole grid
//!    - Returns a `Trajectory`
//!    - Independent of the equations
//!
//! # Module Organization
//!
//! - **`traits`**: `Solver` trait and `StepMethod` enumeration
//! - **`problem`**: `ProblemSpec` and its grid bookkeeping
//! - **`reference`**: reference solutions and their alignment on the grid
//! - **`trajectory`**: `Trajectory` and `Sample`
//! - **`methods`**: one file per update formula, plus the shared loop
//!
//! # Quick Start Example
//!
//! ```rust
//! use ivp_fit::ode::{ScalarRhs, State};
//! use ivp_fit::solver::{ProblemSpec, Solver, StepMethod};
//!
//! // y' = cos(x) - x·y, y(0) = 1 on [0, 2] with h = 0.5
//! let problem = ProblemSpec::new(
//!     ScalarRhs::new("trig-damped", |x, y| x.cos() - x * y),
//!     State::scalar(1.0),
//!     0.0,
//!     2.0,
//!     0.5,
//! )?;
//!
//! let trajectory = StepMethod::Rk4.solve(&problem)?;
//! assert_eq!(trajectory.independents(), vec![0.0, 0.5, 1.0, 1.5, 2.0]);
//! # Ok::<(), ivp_fit::error::IvpError>(())
//! ```
//!
//! # Error Handling
//!
//! All solver methods return [`crate::error::Result`]. Common errors:
//! - Invalid problem (non-positive step, reversed domain)
//! - Right-hand side evaluation failure (reported with step and position)
//! - Numerical instability (NaN or Inf in the state)

// =================================================================================================
// Module Declarations
// =================================================================================================

mod traits;
mod problem;
mod reference;
mod trajectory;
pub mod methods;

// =================================================================================================
// Public Re-exports
// =================================================================================================

pub use traits::{Solver, StepMethod};
pub use problem::ProblemSpec;
pub use reference::{generate_reference, CheckpointAlignment, ReferenceSolution, GRID_TOLERANCE};
pub use trajectory::{Sample, Trajectory};

use crate::error::{IvpError, Result};
use crate::ode::State;

// =================================================================================================
// Helper Functions
// =================================================================================================

/// Validate a state for numerical issues
///
/// Checks that the state holds no NaN or Inf value, which would indicate
/// numerical instability (too large a step) or overflow.
pub(crate) fn validate_state(state: &State, step: usize, independent: f64) -> Result<()> {
    if state.is_finite() {
        return Ok(());
    }

    Err(IvpError::NumericEvaluation {
        independent,
        step,
        detail: format!(
            "non-finite state {}. This indicates numerical instability, try a smaller step size",
            state
        ),
    })
}

/// Integrate `problem` with every method in `methods`
///
/// Methods are independent of each other; with the `parallel` feature they
/// run on the rayon thread pool. The output keeps the order of `methods`.
///
/// # Errors
///
/// The first failing method aborts the whole comparison.
pub fn solve_all(problem: &ProblemSpec, methods: &[StepMethod]) -> Result<Vec<Trajectory>> {
    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        methods.par_iter().map(|method| method.solve(problem)).collect()
    }

    #[cfg(not(feature = "parallel"))]
    {
        methods.iter().map(|method| method.solve(problem)).collect()
    }
}

// =================================================================================================
// Tests
// =================================================================================================
