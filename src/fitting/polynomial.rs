//! Ascending-power polynomial coefficients

use std::fmt;

use nalgebra::DVector;

/// Coefficients `c_0..c_p` of `c_0 + c_1·x + ... + c_p·x^p`
///
/// Immutable once produced by a fitter.
///
/// # Example
///
/// ```rust
/// use ivp_fit::fitting::CoefficientVector;
///
/// let poly = CoefficientVector::new(vec![1.0, -2.0, 0.5]);
/// assert_eq!(poly.degree(), 2);
/// assert_eq!(poly.evaluate(2.0), -1.0);
/// assert_eq!(
///     poly.to_string(),
///     "f(x) = 1.000000 + -2.000000*x^1 + 0.500000*x^2"
/// );
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct CoefficientVector {
    coefficients: Vec<f64>,
}

impl CoefficientVector {
    /// Wrap ascending-power coefficients
    pub fn new(coefficients: Vec<f64>) -> Self {
        Self { coefficients }
    }

    /// Copy out of a nalgebra column vector
    pub fn from_dvector(vector: &DVector<f64>) -> Self {
        Self::new(vector.iter().copied().collect())
    }

    /// Coefficients as a slice, `[c_0, c_1, ...]`
    pub fn as_slice(&self) -> &[f64] {
        &self.coefficients
    }

    /// As a nalgebra column vector
    pub fn to_dvector(&self) -> DVector<f64> {
        DVector::from_column_slice(&self.coefficients)
    }

    /// Number of coefficients, `p + 1`
    pub fn len(&self) -> usize {
        self.coefficients.len()
    }

    /// True when no coefficient is stored
    pub fn is_empty(&self) -> bool {
        self.coefficients.is_empty()
    }

    /// Nominal degree `p` (number of coefficients minus one)
    pub fn degree(&self) -> usize {
        self.coefficients.len().saturating_sub(1)
    }

    /// Coefficient of `x^power` (zero beyond the stored terms)
    pub fn coefficient(&self, power: usize) -> f64 {
        self.coefficients.get(power).copied().unwrap_or(0.0)
    }

    /// Evaluate at `x` with Horner's scheme
    pub fn evaluate(&self, x: f64) -> f64 {
        self.coefficients
            .iter()
            .rev()
            .fold(0.0, |acc, c| acc * x + c)
    }

    /// Evaluate at every abscissa
    pub fn evaluate_all(&self, xs: &[f64]) -> Vec<f64> {
        xs.iter().map(|x| self.evaluate(*x)).collect()
    }

    /// Largest absolute coefficient difference (missing terms count as zero)
    pub fn max_abs_difference(&self, other: &CoefficientVector) -> f64 {
        let len = self.len().max(other.len());
        (0..len)
            .map(|j| (self.coefficient(j) - other.coefficient(j)).abs())
            .fold(0.0, f64::max)
    }

    /// Coefficients labelled `{prefix}1`, `{prefix}2`, ... (`a1` is the constant term)
    pub fn labelled(&self, prefix: &str) -> Vec<(String, f64)> {
        self.coefficients
            .iter()
            .enumerate()
            .map(|(j, c)| (format!("{}{}", prefix, j + 1), *c))
            .collect()
    }

    /// Right-hand side of `f(x) = ...` with 6 decimals per coefficient
    pub fn format_terms(&self) -> String {
        self.coefficients
            .iter()
            .enumerate()
            .map(|(j, c)| {
                if j == 0 {
                    format!("{:.6}", c)
                } else {
                    format!("{:.6}*x^{}", c, j)
                }
            })
            .collect::<Vec<_>>()
            .join(" + ")
    }
}

impl fmt::Display for CoefficientVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "f(x) = {}", self.format_terms())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_horner_matches_power_sum() {
        let poly = CoefficientVector::new(vec![0.5, -1.0, 2.0, 0.25]);
        let x: f64 = 1.7;
        let direct = 0.5 - x + 2.0 * x * x + 0.25 * x.powi(3);
        assert!((poly.evaluate(x) - direct).abs() < 1e-12);
    }

    #[test]
    fn test_empty_polynomial_evaluates_to_zero() {
        let poly = CoefficientVector::new(Vec::new());
        assert!(poly.is_empty());
        assert_eq!(poly.degree(), 0);
        assert_eq!(poly.evaluate(3.0), 0.0);
    }

    #[test]
    fn test_labels_start_at_one() {
        let poly = CoefficientVector::new(vec![3.0, 4.0]);
        let labels = poly.labelled("b");
        assert_eq!(labels, vec![("b1".to_string(), 3.0), ("b2".to_string(), 4.0)]);
    }

    #[test]
    fn test_difference_pads_shorter_vector() {
        let a = CoefficientVector::new(vec![1.0, 2.0]);
        let b = CoefficientVector::new(vec![1.0, 2.0, 0.5]);
        assert_eq!(a.max_abs_difference(&b), 0.5);
    }

    #[test]
    fn test_dvector_round_trip() {
        let poly = CoefficientVector::new(vec![1.0, 2.0, 3.0]);
        assert_eq!(CoefficientVector::from_dvector(&poly.to_dvector()), poly);
    }
}
