//! Error taxonomy for the integration and fitting pipeline
//!
//! Every failure names the configuration values that caused it (degree,
//! point count, method name) so that the binary can surface it verbatim.
//!
//! # Propagation
//!
//! All variants are fatal to a run except [`IvpError::ReferenceMismatch`],
//! which the pipeline downgrades to "error reporting disabled" while
//! integration and fitting proceed normally.

use thiserror::Error;

/// Errors raised by the solver, the error analyzer and the polynomial fitters.
#[derive(Debug, Error)]
pub enum IvpError {
    /// Invalid problem or run configuration
    #[error("Configuration error: {message}")]
    Configuration {
        /// Human readable description naming the offending values
        message: String,
    },

    /// Unrecognized integration method name
    #[error("Unrecognized method '{name}' (expected one of: euler, heun, rk22, rk3, rk4)")]
    UnknownMethod {
        /// Name as supplied by the caller
        name: String,
    },

    /// Exact polynomial solve requested with too few points
    #[error(
        "Dimension error: a degree {degree} polynomial needs {} points for an exact solve, got {points}",
        .degree + 1
    )]
    Dimension {
        /// Number of sample points supplied
        points: usize,
        /// Requested polynomial degree
        degree: usize,
    },

    /// Right-hand side evaluation produced no usable value
    #[error("Numeric evaluation failed at step {step} (independent variable = {independent}): {detail}")]
    NumericEvaluation {
        /// Independent variable at which the failing stage was evaluated
        independent: f64,
        /// Grid step being computed
        step: usize,
        /// What went wrong
        detail: String,
    },

    /// Reference solution cannot be aligned with the integration grid
    #[error("Reference solution unavailable: {reason}")]
    ReferenceMismatch {
        /// Why the alignment was rejected
        reason: String,
    },

    /// Linear system could not be solved (repeated nodes, rank deficiency)
    #[error("Singular {size}x{size} system in {strategy} solve")]
    SingularSystem {
        /// Fitting strategy that hit the singular matrix
        strategy: &'static str,
        /// Matrix order
        size: usize,
    },

    /// Reporter sink failure
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl IvpError {
    /// Shorthand for [`IvpError::Configuration`]
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration { message: message.into() }
    }

    /// Shorthand for [`IvpError::ReferenceMismatch`]
    pub fn reference_mismatch(reason: impl Into<String>) -> Self {
        Self::ReferenceMismatch { reason: reason.into() }
    }

    /// Whether the error must abort the run.
    ///
    /// Only a reference mismatch degrades gracefully.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Self::ReferenceMismatch { .. })
    }
}

/// Crate-wide result alias
pub type Result<T> = std::result::Result<T, IvpError>;
