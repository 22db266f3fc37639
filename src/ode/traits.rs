//! Right-hand side trait and closure adapters
//!
//! This module defines the core API for derivative functions:
//! - `RightHandSide`: trait for every IVP right-hand side
//! - `ScalarRhs`: adapter for `y' = f(x, y)`
//! - `SystemRhs`: adapter for `x' = f(x, y, t)`, `y' = g(x, y, t)`

use super::state::State;

type ScalarFn = dyn Fn(f64, f64) -> Result<f64, String> + Send + Sync;
type SystemFn = dyn Fn(f64, f64, f64) -> Result<f64, String> + Send + Sync;

/// Trait for IVP right-hand sides
///
/// # Responsibility
/// Computes the derivative of the state at a given independent variable.
/// Does NOT integrate it (that's the solver's job).
///
/// # Failures
///
/// `evaluate` returns `Err(detail)` when the derivative is undefined at the
/// requested point (for example the square root of a negative argument).
/// The solver wraps the detail into a numeric evaluation error tagged with
/// the step and independent variable, and stops.
pub trait RightHandSide: Send + Sync {

    /// Number of state components (1 for scalar IVPs, 2 for systems)
    fn dimension(&self) -> usize;

    /// Evaluate the derivative at `(independent, state)`
    fn evaluate(&self, independent: f64, state: &State) -> Result<State, String>;

    /// Name of the problem (used to display and logging)
    fn name(&self) -> &str;

    /// Description of the problem (option)
    fn description(&self) -> Option<&str> {
        None
    }
}

fn finite(label: &str, value: f64) -> Result<f64, String> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(format!("{} evaluated to {}", label, value))
    }
}

// =================================================================================================
// Scalar adapter
// =================================================================================================

/// Scalar right-hand side `y' = f(x, y)`
///
/// Non-finite results are reported as evaluation failures, which is how
/// domain errors of the underlying math (`sqrt(-1)`, `ln(0)`) surface in `f64`.
pub struct ScalarRhs {
    name: String,
    description: Option<String>,
    function: Box<ScalarFn>,
}

impl ScalarRhs {
    /// Wrap an infallible closure `f(x, y)`
    pub fn new<F>(name: impl Into<String>, function: F) -> Self
    where
        F: Fn(f64, f64) -> f64 + Send + Sync + 'static,
    {
        Self::fallible(name, move |x, y| finite("f(x, y)", function(x, y)))
    }

    /// Wrap a closure that reports its own domain errors
    pub fn fallible<F>(name: impl Into<String>, function: F) -> Self
    where
        F: Fn(f64, f64) -> Result<f64, String> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            description: None,
            function: Box::new(function),
        }
    }

    /// Attach a human readable description (e.g. the equation)
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

impl RightHandSide for ScalarRhs {
    fn dimension(&self) -> usize {
        1
    }

    fn evaluate(&self, independent: f64, state: &State) -> Result<State, String> {
        match state {
            State::Scalar(y) => (self.function)(independent, *y).map(State::Scalar),
            other => Err(format!("{} expects a scalar state, got {}", self.name, other)),
        }
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

// =================================================================================================
// System adapter
// =================================================================================================

/// 2-variable system `x' = f(x, y, t)`, `y' = g(x, y, t)`
pub struct SystemRhs {
    name: String,
    description: Option<String>,
    f: Box<SystemFn>,
    g: Box<SystemFn>,
}

impl SystemRhs {
    /// Wrap two infallible closures
    pub fn new<F, G>(name: impl Into<String>, f: F, g: G) -> Self
    where
        F: Fn(f64, f64, f64) -> f64 + Send + Sync + 'static,
        G: Fn(f64, f64, f64) -> f64 + Send + Sync + 'static,
    {
        Self::fallible(
            name,
            move |x, y, t| finite("f(x, y, t)", f(x, y, t)),
            move |x, y, t| finite("g(x, y, t)", g(x, y, t)),
        )
    }

    /// Wrap two closures that report their own domain errors
    pub fn fallible<F, G>(name: impl Into<String>, f: F, g: G) -> Self
    where
        F: Fn(f64, f64, f64) -> Result<f64, String> + Send + Sync + 'static,
        G: Fn(f64, f64, f64) -> Result<f64, String> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            description: None,
            f: Box::new(f),
            g: Box::new(g),
        }
    }

    /// Attach a human readable description (e.g. the equations)
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

impl RightHandSide for SystemRhs {
    fn dimension(&self) -> usize {
        2
    }

    fn evaluate(&self, independent: f64, state: &State) -> Result<State, String> {
        match state {
            State::Pair(values) => {
                let (x, y) = (values[0], values[1]);
                let dx = (self.f)(x, y, independent)?;
                let dy = (self.g)(x, y, independent)?;
                Ok(State::pair(dx, dy))
            }
            other => Err(format!("{} expects a 2-variable state, got {}", self.name, other)),
        }
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_evaluation() {
        let rhs = ScalarRhs::new("linear", |x, y| x + 2.0 * y);
        assert_eq!(rhs.dimension(), 1);
        assert_eq!(rhs.name(), "linear");
        assert_eq!(rhs.evaluate(1.0, &State::scalar(3.0)).unwrap(), State::scalar(7.0));
    }

    #[test]
    fn test_scalar_domain_error_reported() {
        let rhs = ScalarRhs::new("sqrt", |x, _y| (-x).sqrt());
        let err = rhs.evaluate(1.0, &State::scalar(0.0)).unwrap_err();
        assert!(err.contains("NaN"));
    }

    #[test]
    fn test_fallible_scalar() {
        let rhs = ScalarRhs::fallible("log", |x, _y| {
            if x > 0.0 { Ok(x.ln()) } else { Err(format!("ln({}) undefined", x)) }
        });
        assert!(rhs.evaluate(1.0, &State::scalar(0.0)).is_ok());
        assert_eq!(rhs.evaluate(0.0, &State::scalar(0.0)).unwrap_err(), "ln(0) undefined");
    }

    #[test]
    fn test_scalar_rejects_pair_state() {
        let rhs = ScalarRhs::new("id", |_x, y| y);
        assert!(rhs.evaluate(0.0, &State::pair(1.0, 2.0)).is_err());
    }

    #[test]
    fn test_system_evaluation_uses_independent_variable() {
        let rhs = SystemRhs::new("forced", |_x, y, t| y * t, |x, _y, t| x - t)
            .with_description("x' = y t, y' = x - t");
        let slope = rhs.evaluate(2.0, &State::pair(1.0, 3.0)).unwrap();
        assert_eq!(slope, State::pair(6.0, -1.0));
        assert_eq!(rhs.description(), Some("x' = y t, y' = x - t"));
    }

    #[test]
    fn test_system_rejects_scalar_state() {
        let rhs = SystemRhs::new("zero", |_, _, _| 0.0, |_, _, _| 0.0);
        assert!(rhs.evaluate(0.0, &State::scalar(1.0)).is_err());
    }
}
