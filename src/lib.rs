//! ivp-fit: explicit IVP integrators with polynomial approximation
//!
//! Integrates first-order initial value problems (scalar or 2-variable
//! systems) with a fixed-step explicit method, then approximates the
//! resulting discrete trajectory by polynomials and measures the error
//! against a reference solution.
//!
//! # Architecture
//!
//! ivp-fit is built on two core principles:
//!
//! 1. **Separation of Problems and Numerics**
//!    - Problems define equations (what to solve)
//!    - Step methods provide the integration scheme (how to solve)
//!
//! 2. **Explicit, immutable run description**
//!    - A [`solver::ProblemSpec`] and a [`pipeline::RunConfiguration`] describe a run
//!    - No global state: every artifact is owned by the report of the run
//!
//! # Quick Start
//!
//! ```rust
//! use ivp_fit::prelude::*;
//!
//! # fn main() -> Result<()> {
//! // 1. Describe the problem: y' = cos(x) - x sin(x), y(0) = 1
//! let rhs = ScalarRhs::new("trig", |x: f64, _y: f64| x.cos() - x * x.sin());
//! let problem = ProblemSpec::new(rhs, State::scalar(1.0), 0.0, 1.5, 0.3)?;
//!
//! // 2. Integrate
//! let trajectory = StepMethod::Rk4.solve(&problem)?;
//! assert_eq!(trajectory.len(), 6);
//!
//! // 3. Fit a cubic on the first 4 samples
//! let fit = fit_vandermonde(&trajectory.points(0)[..4], 3, Underdetermined::Reject)?;
//! println!("{}", fit.coefficients);
//! # Ok(())
//! # }
//! ```
//!
//! # Modules
//!
//! - [`ode`]: State container and right-hand sides
//! - [`models`]: Pre-configured problems
//! - [`solver`]: Problem description and step methods
//! - [`analysis`]: Error against the reference, step refinement, finite differences
//! - [`fitting`]: Vandermonde, Lagrange and least-squares fits
//! - [`pipeline`]: Batch run combining all of the above
//! - [`output`]: Console tables, CSV export, figures

// Core modules
pub mod error;
pub mod ode;

pub mod models;
pub mod solver;

pub mod analysis;
pub mod fitting;

pub mod pipeline;

pub mod output;

pub mod prelude {
    //! Convenient imports for common usage
    //!
    //! ```rust
    //! use ivp_fit::prelude::*;
    //! ```
    pub use crate::error::{IvpError, Result};
    pub use crate::ode::{RightHandSide, ScalarRhs, State, SystemRhs};
    pub use crate::solver::{ProblemSpec, ReferenceSolution, Solver, StepMethod, Trajectory};
    pub use crate::analysis::{percent_relative_error, ErrorAnalyzer, RefinementStudy};
    pub use crate::fitting::{
        fit_lagrange, fit_least_squares, fit_vandermonde, CoefficientVector, Sampling,
        Underdetermined,
    };
    pub use crate::models::Problem;
    pub use crate::pipeline::{run, PipelineReport, RunConfiguration};
}
