//! Polynomial design (Vandermonde) matrix

use nalgebra::{DMatrix, DVector};

use crate::fitting::CoefficientVector;

/// `n × (p+1)` matrix of powers `V[i][j] = x_i^j` with its target vector `y`
///
/// # Example
///
/// ```rust
/// use ivp_fit::fitting::DesignMatrix;
///
/// let design = DesignMatrix::new(&[(0.0, 1.0), (2.0, 5.0)], 2);
/// assert_eq!(design.shape(), (2, 3));
/// assert_eq!(design.matrix()[(1, 2)], 4.0);
/// assert_eq!(design.matrix()[(0, 0)], 1.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DesignMatrix {
    xs: Vec<f64>,
    matrix: DMatrix<f64>,
    target: DVector<f64>,
}

impl DesignMatrix {
    /// Build from `(x, y)` samples for a degree `degree` polynomial
    pub fn new(points: &[(f64, f64)], degree: usize) -> Self {
        let xs: Vec<f64> = points.iter().map(|(x, _)| *x).collect();
        let matrix = DMatrix::from_fn(points.len(), degree + 1, |i, j| xs[i].powi(j as i32));
        let target = DVector::from_iterator(points.len(), points.iter().map(|(_, y)| *y));

        Self { xs, matrix, target }
    }

    /// `(rows, columns)` = `(n, p+1)`
    pub fn shape(&self) -> (usize, usize) {
        self.matrix.shape()
    }

    /// Number of samples `n`
    pub fn points(&self) -> usize {
        self.matrix.nrows()
    }

    /// Polynomial degree `p`
    pub fn degree(&self) -> usize {
        self.matrix.ncols().saturating_sub(1)
    }

    /// Sample abscissas
    pub fn xs(&self) -> &[f64] {
        &self.xs
    }

    /// The matrix `V`
    pub fn matrix(&self) -> &DMatrix<f64> {
        &self.matrix
    }

    /// The target vector `y`
    pub fn target(&self) -> &DVector<f64> {
        &self.target
    }

    /// Normal equations `(VᵗV, Vᵗy)`
    pub fn normal_equations(&self) -> (DMatrix<f64>, DVector<f64>) {
        let transposed = self.matrix.transpose();
        (&transposed * &self.matrix, &transposed * &self.target)
    }

    /// Fitted values `V·c`
    pub fn predict(&self, coefficients: &CoefficientVector) -> DVector<f64> {
        &self.matrix * coefficients.to_dvector()
    }

    /// Residuals `y − V·c`
    pub fn residuals(&self, coefficients: &CoefficientVector) -> DVector<f64> {
        &self.target - self.predict(coefficients)
    }
}
