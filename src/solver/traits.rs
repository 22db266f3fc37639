//! Numerical solver traits and types
//!
//! # Design Philosophy
//!
//! - Central enum `StepMethod` names the explicit scheme used to advance a state
//! - The `Solver` trait turns a `ProblemSpec` into a `Trajectory`
//! - `StepMethod` itself implements `Solver`, so choosing a method is choosing
//!   an enum variant rather than a separate code path per method
//!
//! The set of methods is closed: Euler, Heun, Ralston RK2, RK3 and RK4.

use std::fmt;
use std::str::FromStr;

use crate::error::{IvpError, Result};
use crate::solver::{ProblemSpec, Trajectory};

// =================================================================================================
// Solver trait
// =================================================================================================

/// Anything able to integrate a problem over its whole grid
pub trait Solver {
    /// Integrate `problem` from `domain_start` to `domain_end`
    ///
    /// # Errors
    ///
    /// - Numeric evaluation failure of the right-hand side (not retried)
    /// - Non-finite state after a step
    fn solve(&self, problem: &ProblemSpec) -> Result<Trajectory>;

    /// Display name
    fn name(&self) -> &'static str;
}

// =================================================================================================
// Step method enumeration
// =================================================================================================

/// Explicit one-step integration method
///
/// | Method  | Stages | Order |
/// |---------|--------|-------|
/// | Euler   | 1      | 1     |
/// | Heun    | 2      | 2     |
/// | Ralston | 2      | 2     |
/// | Rk3     | 3      | 3     |
/// | Rk4     | 4      | 4     |
///
/// # Examples
///
/// ```rust
/// use ivp_fit::solver::StepMethod;
///
/// let method: StepMethod = "rk22".parse().unwrap();
/// assert_eq!(method, StepMethod::Ralston);
/// assert_eq!(method.stages(), 2);
/// assert!("midpoint".parse::<StepMethod>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StepMethod {
    /// Forward Euler: `y += h·f(x, y)`
    Euler,

    /// Heun predictor-corrector (trapezoidal corrector)
    Heun,

    /// Ralston's second-order Runge-Kutta (3/4 stage point)
    Ralston,

    /// Kutta's third-order Runge-Kutta
    Rk3,

    /// Classical fourth-order Runge-Kutta
    Rk4,
}

impl StepMethod {
    /// Every method, in increasing order of accuracy
    pub const ALL: [StepMethod; 5] = [
        StepMethod::Euler,
        StepMethod::Heun,
        StepMethod::Ralston,
        StepMethod::Rk3,
        StepMethod::Rk4,
    ];

    /// Command-line identifier
    pub fn key(&self) -> &'static str {
        match self {
            StepMethod::Euler => "euler",
            StepMethod::Heun => "heun",
            StepMethod::Ralston => "rk22",
            StepMethod::Rk3 => "rk3",
            StepMethod::Rk4 => "rk4",
        }
    }

    /// Short column label used in reports
    pub fn label(&self) -> &'static str {
        match self {
            StepMethod::Euler => "Euler",
            StepMethod::Heun => "PC",
            StepMethod::Ralston => "RK2.2",
            StepMethod::Rk3 => "RK3",
            StepMethod::Rk4 => "RK4",
        }
    }

    /// Number of right-hand side evaluations per step
    pub fn stages(&self) -> usize {
        match self {
            StepMethod::Euler => 1,
            StepMethod::Heun | StepMethod::Ralston => 2,
            StepMethod::Rk3 => 3,
            StepMethod::Rk4 => 4,
        }
    }

    /// Global order of accuracy
    pub fn order(&self) -> u32 {
        match self {
            StepMethod::Euler => 1,
            StepMethod::Heun | StepMethod::Ralston => 2,
            StepMethod::Rk3 => 3,
            StepMethod::Rk4 => 4,
        }
    }
}

impl fmt::Display for StepMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for StepMethod {
    type Err = IvpError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "euler" => Ok(StepMethod::Euler),
            "heun" | "pc" => Ok(StepMethod::Heun),
            "rk22" | "ralston" => Ok(StepMethod::Ralston),
            "rk3" => Ok(StepMethod::Rk3),
            "rk4" => Ok(StepMethod::Rk4),
            _ => Err(IvpError::UnknownMethod { name: s.to_string() }),
        }
    }
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_methods() {
        assert_eq!("euler".parse::<StepMethod>().unwrap(), StepMethod::Euler);
        assert_eq!("HEUN".parse::<StepMethod>().unwrap(), StepMethod::Heun);
        assert_eq!("pc".parse::<StepMethod>().unwrap(), StepMethod::Heun);
        assert_eq!("ralston".parse::<StepMethod>().unwrap(), StepMethod::Ralston);
        assert_eq!(" rk4 ".parse::<StepMethod>().unwrap(), StepMethod::Rk4);
    }

    #[test]
    fn test_parse_unknown_method_names_it() {
        let err = "leapfrog".parse::<StepMethod>().unwrap_err();
        match err {
            IvpError::UnknownMethod { name } => assert_eq!(name, "leapfrog"),
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_key_round_trip() {
        for method in StepMethod::ALL {
            assert_eq!(method.key().parse::<StepMethod>().unwrap(), method);
            assert_eq!(method.to_string(), method.key());
        }
    }

    #[test]
    fn test_stages_match_order_up_to_four() {
        for method in StepMethod::ALL {
            assert_eq!(method.stages() as u32, method.order());
        }
    }
}
