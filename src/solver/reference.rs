//! Reference ("actual") solutions
//!
//! A reference solution is a sequence of trusted values, one sequence per
//! state component, equally spaced over the problem domain. It may come from
//! a closed-form solution evaluated on a grid or from a tabulated source.
//!
//! The reference grid does not have to match the integration grid: it only
//! has to land on it, i.e. its spacing must be an integer multiple of the
//! step size. [`ReferenceSolution::align`] computes that multiple (the
//! stride) or explains why it does not exist.

use crate::error::{IvpError, Result};
use crate::solver::ProblemSpec;

/// Tolerance used to include the domain end when sampling a closed form
pub const GRID_TOLERANCE: f64 = 1e-9;

/// Relative tolerance when checking that `spacing / h` is an integer
const STRIDE_TOLERANCE: f64 = 1e-6;

/// Sample a closed-form solution on `[start, end]` with spacing `h`
///
/// Accumulates `x += h` and keeps going while `x <= end + 1e-9`, so the
/// domain end is included despite rounding drift.
///
/// # Example
///
/// ```rust
/// use ivp_fit::solver::generate_reference;
///
/// let values = generate_reference(0.0, 1.5, 0.3, |x| x * x.cos() + 1.0);
/// assert_eq!(values.len(), 6);
/// assert_eq!(values[0], 1.0);
/// ```
pub fn generate_reference<F>(start: f64, end: f64, h: f64, exact: F) -> Vec<f64>
where
    F: Fn(f64) -> f64,
{
    let mut values = Vec::new();
    if h <= 0.0 {
        return values;
    }

    let mut x = start;
    while x <= end + GRID_TOLERANCE {
        values.push(exact(x));
        x += h;
    }
    values
}

/// Where the reference values sit on the integration grid
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CheckpointAlignment {
    /// Grid indices between two consecutive reference values
    pub stride: usize,

    /// Spacing of the reference values along the independent variable
    pub spacing: f64,

    /// Number of reference values per component
    pub checkpoints: usize,
}

impl CheckpointAlignment {
    /// Trajectory index of checkpoint `k`
    pub fn grid_index(&self, checkpoint: usize) -> usize {
        checkpoint * self.stride
    }
}

/// Reference values, one sequence per state component
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceSolution {
    components: Vec<Vec<f64>>,
    spacing: Option<f64>,
}

impl ReferenceSolution {

    /// Reference for a scalar problem
    pub fn scalar(values: Vec<f64>) -> Self {
        Self { components: vec![values], spacing: None }
    }

    /// Reference for a 2-variable system
    ///
    /// Lengths are not checked here: a mismatch is reported by [`align`](Self::align).
    pub fn pair(x_values: Vec<f64>, y_values: Vec<f64>) -> Self {
        Self { components: vec![x_values, y_values], spacing: None }
    }

    /// Sample a closed-form scalar solution on the problem grid
    pub fn from_fn<F>(start: f64, end: f64, h: f64, exact: F) -> Self
    where
        F: Fn(f64) -> f64,
    {
        Self::scalar(generate_reference(start, end, h, exact))
    }

    /// Sample a closed-form 2-variable solution on the problem grid
    pub fn from_fns<F, G>(start: f64, end: f64, h: f64, exact_x: F, exact_y: G) -> Self
    where
        F: Fn(f64) -> f64,
        G: Fn(f64) -> f64,
    {
        Self::pair(
            generate_reference(start, end, h, exact_x),
            generate_reference(start, end, h, exact_y),
        )
    }

    /// Declare the spacing explicitly instead of inferring it from the domain
    pub fn with_spacing(mut self, spacing: f64) -> Self {
        self.spacing = Some(spacing);
        self
    }

    /// Number of components
    pub fn dimension(&self) -> usize {
        self.components.len()
    }

    /// Values of component `index`
    pub fn component(&self, index: usize) -> Option<&[f64]> {
        self.components.get(index).map(Vec::as_slice)
    }

    /// Number of values of the first component
    pub fn len(&self) -> usize {
        self.components.first().map_or(0, Vec::len)
    }

    /// True when no value is stored
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Locate the reference values on the integration grid of `problem`
    ///
    /// # Errors
    ///
    /// [`IvpError::ReferenceMismatch`] when:
    /// - the component count differs from the problem dimension
    /// - the components have different lengths
    /// - fewer than 2 values are available
    /// - the spacing is not a positive integer multiple of `h`
    /// - the last reference value falls beyond the last grid point
    pub fn align(&self, problem: &ProblemSpec) -> Result<CheckpointAlignment> {
        if self.dimension() != problem.dimension() {
            return Err(IvpError::reference_mismatch(format!(
                "reference has {} component(s), problem has {}",
                self.dimension(),
                problem.dimension()
            )));
        }

        let checkpoints = self.len();
        if let Some(bad) = self.components.iter().find(|c| c.len() != checkpoints) {
            return Err(IvpError::reference_mismatch(format!(
                "reference components have different lengths ({} vs {})",
                checkpoints,
                bad.len()
            )));
        }

        if checkpoints < 2 {
            return Err(IvpError::reference_mismatch(format!(
                "at least 2 reference values are needed, got {}",
                checkpoints
            )));
        }

        let spacing = self.spacing.unwrap_or_else(|| {
            (problem.domain_end() - problem.domain_start()) / (checkpoints - 1) as f64
        });

        let ratio = spacing / problem.step_size();
        let stride = ratio.round_ties_even();
        if !ratio.is_finite() || stride < 1.0 {
            return Err(IvpError::reference_mismatch(format!(
                "reference spacing {} is smaller than the step size h={}",
                spacing,
                problem.step_size()
            )));
        }
        if (ratio - stride).abs() > STRIDE_TOLERANCE * ratio.max(1.0) {
            return Err(IvpError::reference_mismatch(format!(
                "reference spacing {} is not an integer multiple of h={} (ratio {:.6})",
                spacing,
                problem.step_size(),
                ratio
            )));
        }

        let stride = stride as usize;
        let last_index = (checkpoints - 1) * stride;
        if last_index > problem.num_steps() {
            return Err(IvpError::reference_mismatch(format!(
                "last reference value maps to grid index {} but the trajectory ends at {}",
                last_index,
                problem.num_steps()
            )));
        }

        Ok(CheckpointAlignment { stride, spacing, checkpoints })
    }
}
