//! Accuracy analysis of computed trajectories
//!
//! - **`accuracy`**: percent relative error at reference checkpoints
//!   (`ErrorAnalyzer`, `ErrorTable`)
//! - **`refinement`**: the same method on `h / 2^k` grids, with observed
//!   convergence ratios
//! - **`finite_difference`**: first and second derivative estimates from the
//!   samples of a trajectory

pub mod accuracy;
pub mod finite_difference;
pub mod refinement;

pub use accuracy::{percent_relative_error, ErrorAnalyzer, ErrorEntry, ErrorTable};
pub use finite_difference::{differentiate, finite_differences, DerivativeRow, DifferenceScheme};
pub use refinement::{RefinementLevel, RefinementRow, RefinementStudy, MAX_REFINEMENT};
