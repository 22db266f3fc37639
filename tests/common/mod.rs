//! Common utilities for integration tests

pub mod mock_models;
pub mod test_helpers;

// Re-export commonly used items
pub use mock_models::{ConstantGrowth, ExponentialDecay, Oscillator, SqrtDomain};
pub use test_helpers::{assert_points_close, convergence_ratios, final_error, relative_error};
