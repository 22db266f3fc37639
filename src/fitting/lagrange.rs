//! Lagrange interpolation strategy
//!
//! The interpolating polynomial is expanded explicitly into ascending powers,
//! independently of any matrix solve:
//!
//! ```text
//! L_i(x) = Π_{j≠i} (x − x_j) / (x_i − x_j)
//! P(x)   = Σ_i y_i · L_i(x)
//! ```
//!
//! Each basis polynomial starts from the constant `1` and is multiplied by
//! one linear factor per excluded node, growing by one degree each time.
//!
//! The expansion always runs over all `n` points, so the result is the
//! degree `n−1` interpolant whatever degree was requested. A requested
//! degree above `n−1` is clamped (not an error): `n` points cannot carry a
//! higher degree.

use log::debug;

use crate::error::{IvpError, Result};
use crate::fitting::CoefficientVector;

/// Result of a Lagrange interpolation
#[derive(Debug, Clone)]
pub struct LagrangeFit {
    /// Ascending-power coefficients, `n` terms
    pub coefficients: CoefficientVector,

    /// Degree asked for by the caller
    pub requested_degree: usize,

    /// Degree of the interpolant, always `n−1`
    pub degree: usize,
}

impl LagrangeFit {
    /// True when the requested degree exceeded `n−1`
    pub fn was_clamped(&self) -> bool {
        self.degree < self.requested_degree
    }
}

/// Expanded coefficients of the basis polynomial `L_i`
///
/// # Errors
///
/// [`IvpError::SingularSystem`] when `x_i` coincides with another node.
pub fn lagrange_basis(xs: &[f64], i: usize) -> Result<Vec<f64>> {
    let mut poly = vec![1.0];

    for (j, &xj) in xs.iter().enumerate() {
        if j == i {
            continue;
        }

        let denominator = xs[i] - xj;
        if denominator == 0.0 {
            return Err(IvpError::SingularSystem { strategy: "lagrange", size: xs.len() });
        }

        // poly · (x − x_j) / (x_i − x_j)
        let mut next = vec![0.0; poly.len() + 1];
        for (k, &c) in poly.iter().enumerate() {
            next[k + 1] += c / denominator;
            next[k] -= c * xj / denominator;
        }
        poly = next;
    }

    Ok(poly)
}

/// Interpolate all `points` (degree `n−1`), clamping a requested `degree` above `n−1`
///
/// # Errors
///
/// - [`IvpError::Configuration`] for an empty sample set
/// - [`IvpError::SingularSystem`] for repeated abscissas
///
/// # Example
///
/// ```rust
/// use ivp_fit::fitting::fit_lagrange;
///
/// // Degree 5 requested from 3 points: clamped to degree 2
/// let fit = fit_lagrange(&[(0.0, 1.0), (1.0, 2.0), (2.0, 5.0)], Some(5))?;
/// assert!(fit.was_clamped());
/// assert_eq!(fit.degree, 2);
/// assert!((fit.coefficients.evaluate(3.0) - 10.0).abs() < 1e-12);
/// # Ok::<(), ivp_fit::error::IvpError>(())
/// ```
pub fn fit_lagrange(points: &[(f64, f64)], degree: Option<usize>) -> Result<LagrangeFit> {
    let n = points.len();
    if n == 0 {
        return Err(IvpError::configuration("no sample points for Lagrange interpolation"));
    }

    let max_degree = n - 1;
    let requested_degree = degree.unwrap_or(max_degree);
    if requested_degree > max_degree {
        debug!(
            "Lagrange: degree {} requested from {} points, using {}",
            requested_degree, n, max_degree
        );
    }

    let xs: Vec<f64> = points.iter().map(|(x, _)| *x).collect();
    let mut combined = vec![0.0; n];

    for (i, (_, y)) in points.iter().enumerate() {
        let basis = lagrange_basis(&xs, i)?;
        for (k, c) in basis.iter().enumerate() {
            combined[k] += y * c;
        }
    }

    Ok(LagrangeFit {
        coefficients: CoefficientVector::new(combined),
        requested_degree,
        degree: max_degree,
    })
}
