//! Initial-value problem definition
//!
//! A `ProblemSpec` combines a right-hand side with its initial state, its
//! domain and the uniform step size. It is the "WHAT to solve" and is never
//! mutated once built: refinement produces a new value.

use std::sync::Arc;

use crate::error::{IvpError, Result};
use crate::ode::{RightHandSide, State};
use crate::solver::reference::ReferenceSolution;

/// Immutable description of one IVP (or 2-variable IVP system)
///
/// # Invariants
///
/// - `step_size > 0`
/// - `domain_end > domain_start`
/// - initial state dimension equals the right-hand side dimension
///
/// # Examples
///
/// ```rust
/// use ivp_fit::ode::{ScalarRhs, State};
/// use ivp_fit::solver::ProblemSpec;
///
/// let problem = ProblemSpec::new(
///     ScalarRhs::new("trig", |x, _y| x.cos() - x * x.sin()),
///     State::scalar(1.0),
///     0.0,
///     2.0,
///     0.5,
/// ).unwrap();
///
/// assert_eq!(problem.num_steps(), 4);
/// assert_eq!(problem.grid_point(3), 1.5);
/// ```
#[derive(Clone)]
pub struct ProblemSpec {
    rhs: Arc<dyn RightHandSide>,
    initial_state: State,
    domain_start: f64,
    domain_end: f64,
    step_size: f64,
    reference: Option<ReferenceSolution>,
}

impl ProblemSpec {

    /// Create and validate a problem
    pub fn new(
        rhs: impl RightHandSide + 'static,
        initial_state: State,
        domain_start: f64,
        domain_end: f64,
        step_size: f64,
    ) -> Result<Self> {
        Self::from_shared(Arc::new(rhs), initial_state, domain_start, domain_end, step_size)
    }

    /// Create from an already shared right-hand side
    pub fn from_shared(
        rhs: Arc<dyn RightHandSide>,
        initial_state: State,
        domain_start: f64,
        domain_end: f64,
        step_size: f64,
    ) -> Result<Self> {
        let problem = Self {
            rhs,
            initial_state,
            domain_start,
            domain_end,
            step_size,
            reference: None,
        };
        problem.validate()?;
        Ok(problem)
    }

    /// Attach a reference ("actual") solution
    pub fn with_reference(mut self, reference: ReferenceSolution) -> Self {
        self.reference = Some(reference);
        self
    }

    /// Same problem with another step size (reference kept as is)
    pub fn with_step_size(&self, step_size: f64) -> Result<Self> {
        let mut refined = self.clone();
        refined.step_size = step_size;
        refined.validate()?;
        Ok(refined)
    }

    /// Check the invariants
    pub fn validate(&self) -> Result<()> {
        if !self.step_size.is_finite() || self.step_size <= 0.0 {
            return Err(IvpError::configuration(format!(
                "step size must be positive, got h={}",
                self.step_size
            )));
        }
        if !self.domain_start.is_finite() || !self.domain_end.is_finite() {
            return Err(IvpError::configuration(format!(
                "domain bounds must be finite, got [{}, {}]",
                self.domain_start, self.domain_end
            )));
        }
        if self.domain_end <= self.domain_start {
            return Err(IvpError::configuration(format!(
                "domain end must exceed domain start, got [{}, {}]",
                self.domain_start, self.domain_end
            )));
        }
        if self.rhs.dimension() != self.initial_state.dimension() {
            return Err(IvpError::configuration(format!(
                "{} has {} component(s) but the initial state has {}",
                self.rhs.name(),
                self.rhs.dimension(),
                self.initial_state.dimension()
            )));
        }
        if !self.initial_state.is_finite() {
            return Err(IvpError::configuration(format!(
                "initial state must be finite, got {}",
                self.initial_state
            )));
        }
        if self.num_steps() == 0 {
            return Err(IvpError::configuration(format!(
                "step size h={} is larger than twice the domain length {}",
                self.step_size,
                self.domain_end - self.domain_start
            )));
        }
        Ok(())
    }

    // ======================================== Grid bookkeeping ========================================

    /// Number of integration steps, `round((end - start) / h)`
    ///
    /// The rounding absorbs the residue of the floating-point division so
    /// that e.g. `0.7 / 0.1 = 6.999…` still gives 7 steps. Exact halves round
    /// to even: `1.0 / 0.4 = 2.5` gives 2 steps.
    pub fn num_steps(&self) -> usize {
        ((self.domain_end - self.domain_start) / self.step_size).round_ties_even() as usize
    }

    /// Number of trajectory samples, `num_steps + 1`
    pub fn num_samples(&self) -> usize {
        self.num_steps() + 1
    }

    /// Independent variable at grid index `index`, always `start + index·h`
    pub fn grid_point(&self, index: usize) -> f64 {
        self.domain_start + (index as f64) * self.step_size
    }

    // ========================================== Accessors ==========================================

    /// Right-hand side
    pub fn rhs(&self) -> &dyn RightHandSide {
        self.rhs.as_ref()
    }

    /// Initial state
    pub fn initial_state(&self) -> State {
        self.initial_state
    }

    /// Start of the domain
    pub fn domain_start(&self) -> f64 {
        self.domain_start
    }

    /// End of the domain
    pub fn domain_end(&self) -> f64 {
        self.domain_end
    }

    /// Uniform step size
    pub fn step_size(&self) -> f64 {
        self.step_size
    }

    /// Reference solution, if any
    pub fn reference(&self) -> Option<&ReferenceSolution> {
        self.reference.as_ref()
    }

    /// Number of state components
    pub fn dimension(&self) -> usize {
        self.initial_state.dimension()
    }

    /// Problem name
    pub fn name(&self) -> &str {
        self.rhs.name()
    }
}

impl std::fmt::Debug for ProblemSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProblemSpec")
            .field("name", &self.name())
            .field("dimension", &self.dimension())
            .field("initial state", &self.initial_state)
            .field("domain", &(self.domain_start, self.domain_end))
            .field("step size", &self.step_size)
            .field("has reference", &self.reference.is_some())
            .finish()
    }
}

// ================================================================================================
// Tests
// ================================================================================================
