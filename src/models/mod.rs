//! Catalog of pre-configured initial value problems
//!
//! Each entry bundles a right-hand side, initial condition, domain, step size
//! and reference solution. A refinement level `m` divides the catalog step
//! size by `2^m`; tabulated references keep their own spacing and are read
//! every `2^m` grid steps.
//!
//! # Available Problems
//!
//! ## [`Problem::Trig`] (default)
//!
//! Scalar `y' = cos x − x·sin x` with the closed form `x·cos x + 1`.
//!
//! ## [`Problem::TrigDamped`]
//!
//! Scalar `y' = cos x − x·y` against a 5-value table.
//!
//! ## [`Problem::LinearSystem`]
//!
//! 2-variable linear decay system, see [`LinearDecaySystem`].
//!
//! # Example
//!
//! ```rust
//! use ivp_fit::models::Problem;
//!
//! let problem: Problem = "trig".parse()?;
//! let spec = problem.build(1)?;
//! assert!((spec.step_size() - 0.15).abs() < 1e-12);
//! # Ok::<(), ivp_fit::error::IvpError>(())
//! ```

use std::fmt;
use std::str::FromStr;

use crate::analysis::MAX_REFINEMENT;
use crate::error::{IvpError, Result};
use crate::solver::ProblemSpec;

// =================================================================================================
// Module Declarations
// =================================================================================================

pub mod scalar;
pub mod system;

// =================================================================================================
// Public Re-exports
// =================================================================================================

pub use scalar::{trig, trig_damped, trig_exact, TRIG_DAMPED_REFERENCE};
pub use system::{
    linear_system, linear_system_exact_x, linear_system_exact_y, LinearDecaySystem,
    LINEAR_SYSTEM_X_REFERENCE, LINEAR_SYSTEM_Y_REFERENCE,
};

// =================================================================================================
// Catalog
// =================================================================================================

/// Named problem of the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Problem {
    /// `y' = cos x − x·sin x`
    #[default]
    Trig,

    /// `y' = cos x − x·y`
    TrigDamped,

    /// `x' = −0.25x`, `y' = 5 + 0.1x − 0.4y`
    LinearSystem,
}

impl Problem {
    /// Every catalog entry
    pub const ALL: [Problem; 3] = [Problem::Trig, Problem::TrigDamped, Problem::LinearSystem];

    /// Name used on the command line
    pub fn key(&self) -> &'static str {
        match self {
            Problem::Trig => "trig",
            Problem::TrigDamped => "trig-damped",
            Problem::LinearSystem => "linear-system",
        }
    }

    /// Build the problem at refinement level `refine`
    ///
    /// # Errors
    ///
    /// [`IvpError::Configuration`] when `refine` exceeds [`MAX_REFINEMENT`].
    pub fn build(&self, refine: u32) -> Result<ProblemSpec> {
        match self {
            Problem::Trig => trig(refine),
            Problem::TrigDamped => trig_damped(refine),
            Problem::LinearSystem => linear_system(refine),
        }
    }

    /// Closed-form solution of one component, when known
    pub fn exact_solution(&self, component: usize) -> Option<fn(f64) -> f64> {
        match (self, component) {
            (Problem::Trig, 0) => Some(trig_exact),
            (Problem::LinearSystem, 0) => Some(linear_system_exact_x),
            (Problem::LinearSystem, 1) => Some(linear_system_exact_y),
            _ => None,
        }
    }

    /// Display names of the state components
    pub fn component_names(&self) -> &'static [&'static str] {
        match self {
            Problem::Trig | Problem::TrigDamped => &["y"],
            Problem::LinearSystem => &["x", "y"],
        }
    }

    /// Display name of the independent variable
    pub fn independent_name(&self) -> &'static str {
        match self {
            Problem::Trig | Problem::TrigDamped => "x",
            Problem::LinearSystem => "t",
        }
    }
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

impl FromStr for Problem {
    type Err = IvpError;

    fn from_str(s: &str) -> Result<Self> {
        let name = s.trim().to_ascii_lowercase();
        Problem::ALL
            .into_iter()
            .find(|p| p.key() == name)
            .ok_or_else(|| {
                IvpError::configuration(format!(
                    "unknown problem '{}' (expected trig, trig-damped or linear-system)",
                    s
                ))
            })
    }
}

/// `base / 2^refine`
pub(crate) fn refined_step(base: f64, refine: u32) -> Result<f64> {
    if refine > MAX_REFINEMENT {
        return Err(IvpError::configuration(format!(
            "refinement level m={} exceeds the maximum of {}",
            refine, MAX_REFINEMENT
        )));
    }
    Ok(base / (1u64 << refine) as f64)
}
