//! Finite-difference derivatives of a trajectory
//!
//! First derivative:
//! - forward difference at the first sample
//! - central difference at interior samples
//! - backward difference at the last sample
//!
//! Second derivative by the three-point formula, shifted inward at both ends;
//! undefined with fewer than 3 samples.

use std::fmt;

use crate::error::{IvpError, Result};
use crate::solver::Trajectory;

/// Difference scheme used for the first derivative
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DifferenceScheme {
    /// `(y₁ − y₀) / h`
    Forward,

    /// `(y_{i+1} − y_{i−1}) / 2h`
    Central,

    /// `(y_n − y_{n−1}) / h`
    Backward,
}

impl fmt::Display for DifferenceScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DifferenceScheme::Forward => write!(f, "forward"),
            DifferenceScheme::Central => write!(f, "central"),
            DifferenceScheme::Backward => write!(f, "backward"),
        }
    }
}

/// Derivative estimates at one sample
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DerivativeRow {
    /// Sample index
    pub index: usize,

    /// Independent variable
    pub independent: f64,

    /// Sample value
    pub value: f64,

    /// First derivative estimate
    pub first: f64,

    /// Second derivative estimate, `None` with fewer than 3 samples
    pub second: Option<f64>,

    /// Scheme used for `first`
    pub scheme: DifferenceScheme,
}

/// Derivatives of equally spaced samples `ys` (spacing `h`)
///
/// # Errors
///
/// [`IvpError::Configuration`] with fewer than 2 samples, mismatched
/// lengths or a non-positive spacing.
///
/// # Example
///
/// ```rust
/// use ivp_fit::analysis::{finite_differences, DifferenceScheme};
///
/// let xs = [0.0, 1.0, 2.0, 3.0];
/// let ys = [0.0, 1.0, 4.0, 9.0];
/// let rows = finite_differences(&xs, &ys, 1.0)?;
///
/// assert_eq!(rows[0].scheme, DifferenceScheme::Forward);
/// assert_eq!(rows[1].first, 2.0);
/// assert_eq!(rows[3].second, Some(2.0));
/// # Ok::<(), ivp_fit::error::IvpError>(())
/// ```
pub fn finite_differences(xs: &[f64], ys: &[f64], h: f64) -> Result<Vec<DerivativeRow>> {
    let n = ys.len();
    if xs.len() != n {
        return Err(IvpError::configuration(format!(
            "finite differences need as many abscissas as values, got {} and {}",
            xs.len(),
            n
        )));
    }
    if n < 2 {
        return Err(IvpError::configuration(format!(
            "finite differences need at least 2 samples, got {}",
            n
        )));
    }
    if h <= 0.0 {
        return Err(IvpError::configuration(format!(
            "finite differences need a positive spacing, got h={}",
            h
        )));
    }

    let second = |i: usize| -> Option<f64> {
        if n < 3 {
            return None;
        }
        // Centre of the three-point stencil, kept inside [1, n-2]
        let c = i.clamp(1, n - 2);
        Some((ys[c - 1] - 2.0 * ys[c] + ys[c + 1]) / (h * h))
    };

    let rows = (0..n)
        .map(|i| {
            let (first, scheme) = if i == 0 {
                ((ys[1] - ys[0]) / h, DifferenceScheme::Forward)
            } else if i == n - 1 {
                ((ys[n - 1] - ys[n - 2]) / h, DifferenceScheme::Backward)
            } else {
                ((ys[i + 1] - ys[i - 1]) / (2.0 * h), DifferenceScheme::Central)
            };

            DerivativeRow {
                index: i,
                independent: xs[i],
                value: ys[i],
                first,
                second: second(i),
                scheme,
            }
        })
        .collect();

    Ok(rows)
}

/// Derivatives of one component of a trajectory
pub fn differentiate(trajectory: &Trajectory, component: usize) -> Result<Vec<DerivativeRow>> {
    if component >= trajectory.dimension() {
        return Err(IvpError::configuration(format!(
            "component {} out of range for a {}-component trajectory",
            component,
            trajectory.dimension()
        )));
    }

    finite_differences(
        &trajectory.independents(),
        &trajectory.component(component),
        trajectory.step_size,
    )
}
