//! Least-squares regression strategy
//!
//! Requires strictly fewer unknowns than points (`p < n`) and solves the
//! normal equations
//!
//! ```text
//! A = VᵗV,   b = Vᵗy,   A·c = b
//! ```
//!
//! The fit diagnostics (fitted values, residuals, SSE, MSE) are part of the
//! result, not side products.

use log::debug;
use nalgebra::{DMatrix, DVector};

use crate::error::{IvpError, Result};
use crate::fitting::{CoefficientVector, DesignMatrix};

/// Result of a least-squares regression
#[derive(Debug, Clone)]
pub struct LeastSquaresFit {
    /// Design matrix `V` and target `y`
    pub design: DesignMatrix,

    /// Normal matrix `A = VᵗV`
    pub normal_matrix: DMatrix<f64>,

    /// Normal right-hand side `b = Vᵗy`
    pub normal_rhs: DVector<f64>,

    /// Ascending-power coefficients
    pub coefficients: CoefficientVector,

    /// Fitted values `ŷ = V·c`
    pub fitted: DVector<f64>,

    /// Residuals `y − ŷ`
    pub residuals: DVector<f64>,

    /// Sum of squared residuals
    pub sse: f64,

    /// Mean squared residual, `SSE / n`
    pub mse: f64,
}

impl LeastSquaresFit {
    /// Number of samples `n`
    pub fn points(&self) -> usize {
        self.design.points()
    }

    /// Polynomial degree `p`
    pub fn degree(&self) -> usize {
        self.design.degree()
    }

    /// `Vᵗ(y − V·c)`, zero at the least-squares optimum
    pub fn normal_residual(&self) -> DVector<f64> {
        self.design.matrix().transpose() * &self.residuals
    }
}

/// Regress a degree `degree` polynomial on `points`
///
/// # Errors
///
/// - [`IvpError::Configuration`] when `p >= n`
/// - [`IvpError::SingularSystem`] when `VᵗV` cannot be inverted
///
/// # Example
///
/// ```rust
/// use ivp_fit::fitting::fit_least_squares;
///
/// let points = [(0.0, 1.0), (1.0, 3.0), (2.0, 5.0), (3.0, 7.0)];
/// let fit = fit_least_squares(&points, 1)?;
/// assert!(fit.sse < 1e-20);
///
/// // Five points cannot carry a degree 5 regression
/// let five = [(0.0, 0.0), (1.0, 1.0), (2.0, 4.0), (3.0, 9.0), (4.0, 16.0)];
/// assert!(fit_least_squares(&five, 5).is_err());
/// # Ok::<(), ivp_fit::error::IvpError>(())
/// ```
pub fn fit_least_squares(points: &[(f64, f64)], degree: usize) -> Result<LeastSquaresFit> {
    let n = points.len();
    if degree >= n {
        return Err(IvpError::configuration(format!(
            "least-squares setup requires p < n, got p={}, n={}",
            degree, n
        )));
    }

    let design = DesignMatrix::new(points, degree);
    let (normal_matrix, normal_rhs) = design.normal_equations();

    let solution = normal_matrix
        .clone()
        .lu()
        .solve(&normal_rhs)
        .filter(|c| c.iter().all(|v| v.is_finite()))
        .ok_or(IvpError::SingularSystem { strategy: "least squares", size: degree + 1 })?;

    let coefficients = CoefficientVector::from_dvector(&solution);
    let fitted = design.predict(&coefficients);
    let residuals = design.target() - &fitted;
    let sse = residuals.norm_squared();
    let mse = sse / n as f64;

    debug!("least squares: n={}, p={}, SSE={:e}, MSE={:e}", n, degree, sse, mse);

    Ok(LeastSquaresFit {
        design,
        normal_matrix,
        normal_rhs,
        coefficients,
        fitted,
        residuals,
        sse,
        mse,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn noisy_parabola() -> Vec<(f64, f64)> {
        let noise = [0.02, -0.03, 0.01, 0.04, -0.02, -0.01, 0.03];
        noise
            .iter()
            .enumerate()
            .map(|(i, e)| {
                let x = i as f64 * 0.5;
                (x, 1.0 - x + 0.5 * x * x + e)
            })
            .collect()
    }

    #[test]
    fn test_requires_fewer_unknowns_than_points() {
        let points = [(0.0, 1.0), (1.0, 2.0), (2.0, 0.0), (3.0, 4.0), (4.0, 1.0)];
        let err = fit_least_squares(&points, 5).unwrap_err();
        match err {
            IvpError::Configuration { message } => {
                assert!(message.contains("p=5"));
                assert!(message.contains("n=5"));
            }
            other => panic!("unexpected error {other:?}"),
        }
        assert!(fit_least_squares(&points, 4).is_ok());
    }

    #[test]
    fn test_residual_orthogonal_to_columns() {
        let fit = fit_least_squares(&noisy_parabola(), 2).unwrap();
        for value in fit.normal_residual().iter() {
            assert_abs_diff_eq!(*value, 0.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_diagnostics_are_consistent() {
        let points = noisy_parabola();
        let fit = fit_least_squares(&points, 2).unwrap();

        assert_eq!(fit.points(), 7);
        assert_eq!(fit.degree(), 2);
        assert_eq!(fit.normal_matrix.shape(), (3, 3));
        assert_abs_diff_eq!(fit.mse, fit.sse / 7.0, epsilon = 1e-15);

        let sse: f64 = points
            .iter()
            .map(|(x, y)| (y - fit.coefficients.evaluate(*x)).powi(2))
            .sum();
        assert_abs_diff_eq!(fit.sse, sse, epsilon = 1e-12);
        assert!(fit.sse > 0.0);
    }

    #[test]
    fn test_recovers_underlying_coefficients() {
        let fit = fit_least_squares(&noisy_parabola(), 2).unwrap();
        let c = fit.coefficients.as_slice();
        assert_abs_diff_eq!(c[0], 1.0, epsilon = 0.1);
        assert_abs_diff_eq!(c[1], -1.0, epsilon = 0.1);
        assert_abs_diff_eq!(c[2], 0.5, epsilon = 0.05);
    }

    #[test]
    fn test_constant_fit_is_mean() {
        let fit = fit_least_squares(&[(0.0, 1.0), (1.0, 2.0), (2.0, 6.0)], 0).unwrap();
        assert_abs_diff_eq!(fit.coefficients.coefficient(0), 3.0, epsilon = 1e-12);
        assert_abs_diff_eq!(fit.sse, 14.0, epsilon = 1e-12);
    }
}
