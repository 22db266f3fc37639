//! State container
//!
//! A state holds the dependent variable(s) at one grid point. The crate
//! integrates scalar problems and 2-variable systems, so the container has
//! exactly two shapes.

use nalgebra::Vector2;
use std::fmt;

/// Dependent-variable value at one grid point
///
/// # Storage Types
///
/// - **Scalar**: `y` of a scalar IVP `y' = f(x, y)`
/// - **Pair**: `(x, y)` of a system `x' = f(x, y, t)`, `y' = g(x, y, t)`
///
/// Arithmetic (`+`, `-`, `* f64`) is componentwise, which is all the explicit
/// step methods need.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum State {
    /// Scalar value (1 component)
    Scalar(f64),

    /// 2-variable system value (2 components)
    Pair(Vector2<f64>),
}

impl State {

    // ======================================= constructors =======================================

    /// Create a scalar state
    pub fn scalar(value: f64) -> Self {
        Self::Scalar(value)
    }

    /// Create a 2-variable state
    pub fn pair(x: f64, y: f64) -> Self {
        Self::Pair(Vector2::new(x, y))
    }

    /// Zero state with the same shape as `self`
    pub fn zeros_like(&self) -> Self {
        match self {
            State::Scalar(_) => State::Scalar(0.0),
            State::Pair(_) => State::Pair(Vector2::zeros()),
        }
    }

    // ========================================== Queries ==========================================

    /// Number of components (1 or 2)
    pub fn dimension(&self) -> usize {
        match self {
            State::Scalar(_) => 1,
            State::Pair(_) => 2,
        }
    }

    /// Check both states have the same shape
    pub fn same_shape(&self, other: &State) -> bool {
        self.dimension() == other.dimension()
    }

    /// Check every component is finite (no NaN, no Inf)
    pub fn is_finite(&self) -> bool {
        match self {
            State::Scalar(value) => value.is_finite(),
            State::Pair(values) => values.iter().all(|v| v.is_finite()),
        }
    }

    // ======================================== Extractions ========================================

    /// Get component `index`, `None` when out of range
    pub fn get(&self, index: usize) -> Option<f64> {
        match (self, index) {
            (State::Scalar(value), 0) => Some(*value),
            (State::Pair(values), 0 | 1) => Some(values[index]),
            _ => None,
        }
    }

    /// Get component `index` (panic if out of range)
    pub fn component(&self, index: usize) -> f64 {
        self.get(index)
            .unwrap_or_else(|| panic!("Component {} out of range for {}", index, self))
    }

    /// Try to extract as a scalar
    pub fn try_as_scalar(&self) -> Option<f64> {
        match self {
            State::Scalar(value) => Some(*value),
            State::Pair(_) => None,
        }
    }

    /// All components in order
    pub fn components(&self) -> Vec<f64> {
        match self {
            State::Scalar(value) => vec![*value],
            State::Pair(values) => vec![values[0], values[1]],
        }
    }
}

// ================================== Simple arithmetic functions ==================================

impl std::ops::Add for State {
    type Output = State;
    fn add(self, rhs: Self) -> Self::Output {
        match (self, rhs) {
            (State::Scalar(a), State::Scalar(b)) => State::Scalar(a + b),
            (State::Pair(a), State::Pair(b)) => State::Pair(a + b),
            (a, b) => panic!("Cannot add states of different shapes ({} + {})", a, b),
        }
    }
}

impl std::ops::Sub for State {
    type Output = State;
    fn sub(self, rhs: Self) -> Self::Output {
        self + rhs * -1.0
    }
}

impl std::ops::Mul<f64> for State {
    type Output = State;
    fn mul(self, scalar: f64) -> Self::Output {
        match self {
            State::Scalar(value) => State::Scalar(value * scalar),
            State::Pair(values) => State::Pair(values * scalar),
        }
    }
}

impl std::ops::Mul<State> for f64 {
    type Output = State;
    fn mul(self, rhs: State) -> Self::Output {
        rhs * self
    }
}

// ======================== Display ============================

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            State::Scalar(value) => write!(f, "Scalar ({})", value),
            State::Pair(values) => write!(f, "Pair ({}, {})", values[0], values[1]),
        }
    }
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar() {
        let state = State::scalar(42.0);
        assert_eq!(state.dimension(), 1);
        assert_eq!(state.component(0), 42.0);
        assert_eq!(state.get(1), None);
        assert_eq!(state.try_as_scalar(), Some(42.0));
    }

    #[test]
    fn test_pair() {
        let state = State::pair(1.0, -2.0);
        assert_eq!(state.dimension(), 2);
        assert_eq!(state.components(), vec![1.0, -2.0]);
        assert_eq!(state.try_as_scalar(), None);
    }

    #[test]
    fn test_addition() {
        let c = State::scalar(1.0) + State::scalar(2.0);
        assert_eq!(c, State::scalar(3.0));

        let p = State::pair(1.0, 2.0) + State::pair(0.5, -1.0);
        assert_eq!(p, State::pair(1.5, 1.0));
    }

    #[test]
    fn test_multiplication_and_subtraction() {
        let state = State::pair(2.0, 4.0);
        assert_eq!(state * 0.5, State::pair(1.0, 2.0));
        assert_eq!(3.0 * State::scalar(2.0), State::scalar(6.0));
        assert_eq!(state - State::pair(1.0, 1.0), State::pair(1.0, 3.0));
    }

    #[test]
    #[should_panic(expected = "Cannot add states of different shapes")]
    fn test_shape_mismatch_panics() {
        let _ = State::scalar(1.0) + State::pair(1.0, 1.0);
    }

    #[test]
    fn test_finiteness() {
        assert!(State::pair(1.0, 2.0).is_finite());
        assert!(!State::scalar(f64::NAN).is_finite());
        assert!(!State::pair(1.0, f64::INFINITY).is_finite());
    }

    #[test]
    fn test_zeros_like() {
        assert_eq!(State::pair(3.0, 4.0).zeros_like(), State::pair(0.0, 0.0));
        assert!(State::scalar(3.0).same_shape(&State::scalar(0.0).zeros_like()));
    }
}
