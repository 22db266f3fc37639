//! Vandermonde (direct solve) fitting strategy
//!
//! Builds the design matrix and solves `V·c = y`:
//!
//! - `n = p+1`: square system, solved exactly by LU decomposition
//! - `n > p+1`: overdetermined, solved in the least-squares sense by SVD
//! - `n < p+1`: underdetermined, rejected with [`IvpError::Dimension`] unless
//!   the caller opts into the minimum-norm SVD solution

use std::fmt;
use std::str::FromStr;

use log::debug;
use nalgebra::SVD;

use crate::error::{IvpError, Result};
use crate::fitting::{CoefficientVector, DesignMatrix};

/// What to do when fewer than `p+1` points are available
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Underdetermined {
    /// Fail with a dimension error
    #[default]
    Reject,

    /// Return the minimum-norm least-squares solution
    MinimumNorm,
}

impl FromStr for Underdetermined {
    type Err = IvpError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "reject" => Ok(Underdetermined::Reject),
            "minimum-norm" | "min-norm" => Ok(Underdetermined::MinimumNorm),
            other => Err(IvpError::configuration(format!(
                "unknown underdetermined policy '{}' (expected reject or minimum-norm)",
                other
            ))),
        }
    }
}

/// How the coefficients were obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveKind {
    /// Square system, interpolating polynomial
    Exact,

    /// Overdetermined system, minimal squared residual
    LeastSquares,

    /// Underdetermined system, minimal coefficient norm
    MinimumNorm,
}

impl fmt::Display for SolveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolveKind::Exact => write!(f, "exact"),
            SolveKind::LeastSquares => write!(f, "least squares"),
            SolveKind::MinimumNorm => write!(f, "minimum norm"),
        }
    }
}

/// Result of a Vandermonde fit
#[derive(Debug, Clone)]
pub struct VandermondeFit {
    /// Design matrix and target the coefficients were solved from
    pub design: DesignMatrix,

    /// Ascending-power coefficients
    pub coefficients: CoefficientVector,

    /// Which solve produced them
    pub kind: SolveKind,
}

/// Fit a degree `degree` polynomial through `points`
///
/// # Errors
///
/// - [`IvpError::Configuration`] for an empty sample set
/// - [`IvpError::Dimension`] when `n < p+1` and `policy` is `Reject`
/// - [`IvpError::SingularSystem`] for repeated abscissas
///
/// # Example
///
/// ```rust
/// use ivp_fit::fitting::{fit_vandermonde, Underdetermined};
///
/// // y = 1 + x² through three points
/// let fit = fit_vandermonde(&[(0.0, 1.0), (1.0, 2.0), (2.0, 5.0)], 2, Underdetermined::Reject)?;
/// let c = fit.coefficients.as_slice();
/// assert!((c[0] - 1.0).abs() < 1e-10 && c[1].abs() < 1e-10 && (c[2] - 1.0).abs() < 1e-10);
///
/// assert!(fit_vandermonde(&[(0.0, 1.0)], 2, Underdetermined::Reject).is_err());
/// # Ok::<(), ivp_fit::error::IvpError>(())
/// ```
pub fn fit_vandermonde(
    points: &[(f64, f64)],
    degree: usize,
    policy: Underdetermined,
) -> Result<VandermondeFit> {
    let n = points.len();
    if n == 0 {
        return Err(IvpError::configuration(format!(
            "no sample points to fit a degree {} polynomial",
            degree
        )));
    }

    let unknowns = degree + 1;
    if n < unknowns && policy == Underdetermined::Reject {
        return Err(IvpError::Dimension { points: n, degree });
    }

    let design = DesignMatrix::new(points, degree);

    let (solution, kind) = if n == unknowns {
        let solution = design
            .matrix()
            .clone()
            .lu()
            .solve(design.target())
            .ok_or(IvpError::SingularSystem { strategy: "vandermonde", size: n })?;
        (solution, SolveKind::Exact)
    } else {
        let kind = if n > unknowns { SolveKind::LeastSquares } else { SolveKind::MinimumNorm };

        let decomposition = SVD::new(design.matrix().clone(), true, true);

        // Singular values below machine_epsilon * max(size) * sigma_max are treated as zero
        let sigma_max = decomposition.singular_values.max();
        let epsilon = f64::EPSILON * n.max(unknowns) as f64 * sigma_max;

        let solution = decomposition
            .solve(design.target(), epsilon)
            .map_err(|_| IvpError::SingularSystem { strategy: "vandermonde", size: n })?;
        (solution, kind)
    };

    if solution.iter().any(|c| !c.is_finite()) {
        return Err(IvpError::SingularSystem { strategy: "vandermonde", size: n });
    }

    debug!("Vandermonde fit: n={}, p={}, {} solve", n, degree, kind);

    Ok(VandermondeFit {
        design,
        coefficients: CoefficientVector::from_dvector(&solution),
        kind,
    })
}
