//! 2-variable systems `x' = f(x, y, t)`, `y' = g(x, y, t)`
//!
//! # Linear decay system
//!
//! ```text
//! x' = −a·x
//! y' = s + c·x − r·y
//! ```
//!
//! The first equation decays on its own and feeds the second one. With
//! `r ≠ a` the closed form is
//!
//! ```text
//! x(t) = x₀·e^{−a t}
//! y(t) = s/r + A·e^{−a t} + (y₀ − s/r − A)·e^{−r t},   A = c·x₀ / (r − a)
//! ```

use crate::error::{IvpError, Result};
use crate::models::refined_step;
use crate::ode::{State, SystemRhs};
use crate::solver::{ProblemSpec, ReferenceSolution};

/// Tabulated reference of `x` at `t = 0, 0.5, 1, 1.5, 2`
pub const LINEAR_SYSTEM_X_REFERENCE: [f64; 5] = [1.0, 0.882497, 0.778801, 0.687289, 0.606531];

/// Tabulated reference of `y` at `t = 0, 0.5, 1, 1.5, 2`
pub const LINEAR_SYSTEM_Y_REFERENCE: [f64; 5] = [-2.0, 0.670915, 2.852668, 4.63455, 6.08953];

/// Linear decay system parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearDecaySystem {
    /// Decay rate `a` of x
    pub decay: f64,
    /// Constant source `s` of y
    pub source: f64,
    /// Coupling `c` from x into y
    pub coupling: f64,
    /// Relaxation rate `r` of y
    pub relaxation: f64,
    /// Initial state `(x₀, y₀)`
    pub initial: (f64, f64),
    /// Domain `[t₀, t_n]`
    pub domain: (f64, f64),
    /// Unrefined step size
    pub step_size: f64,
}

impl Default for LinearDecaySystem {
    fn default() -> Self {
        Self {
            decay: 0.25,
            source: 5.0,
            coupling: 0.1,
            relaxation: 0.4,
            initial: (1.0, -2.0),
            domain: (0.0, 2.0),
            step_size: 0.5,
        }
    }
}

impl LinearDecaySystem {
    /// Right-hand side as a [`SystemRhs`]
    pub fn rhs(&self) -> SystemRhs {
        let Self { decay, source, coupling, relaxation, .. } = *self;
        SystemRhs::new(
            "linear-system",
            move |x, _y, _t| -decay * x,
            move |x, y, _t| source + coupling * x - relaxation * y,
        )
        .with_description(format!(
            "x' = -{}*x, y' = {} + {}*x - {}*y",
            decay, source, coupling, relaxation
        ))
    }

    /// Closed-form `x(t)`
    pub fn exact_x(&self, t: f64) -> f64 {
        let t = t - self.domain.0;
        self.initial.0 * (-self.decay * t).exp()
    }

    /// Closed-form `y(t)`, `None` in the resonant case `r = a`
    pub fn exact_y(&self, t: f64) -> Option<f64> {
        if self.relaxation == self.decay || self.relaxation == 0.0 {
            return None;
        }
        let t = t - self.domain.0;
        let steady = self.source / self.relaxation;
        let forced = self.coupling * self.initial.0 / (self.relaxation - self.decay);
        let free = self.initial.1 - steady - forced;

        Some(steady + forced * (-self.decay * t).exp() + free * (-self.relaxation * t).exp())
    }

    /// Problem at refinement level `refine`, with the tabulated reference
    pub fn problem(&self, refine: u32) -> Result<ProblemSpec> {
        let h = refined_step(self.step_size, refine)?;
        ProblemSpec::new(
            self.rhs(),
            State::pair(self.initial.0, self.initial.1),
            self.domain.0,
            self.domain.1,
            h,
        )
    }

    /// Reference sampled from the closed form every `spacing`
    pub fn closed_form_reference(&self, spacing: f64) -> Result<ReferenceSolution> {
        let (start, end) = self.domain;
        let ys: Option<Vec<f64>> = crate::solver::generate_reference(start, end, spacing, |t| t)
            .into_iter()
            .map(|t| self.exact_y(t))
            .collect();
        let ys = ys.ok_or_else(|| {
            IvpError::configuration(format!(
                "no closed form for y when the relaxation rate equals the decay rate ({})",
                self.decay
            ))
        })?;

        Ok(ReferenceSolution::pair(
            crate::solver::generate_reference(start, end, spacing, |t| self.exact_x(t)),
            ys,
        ))
    }
}

/// Default linear system with its tabulated reference
pub fn linear_system(refine: u32) -> Result<ProblemSpec> {
    Ok(LinearDecaySystem::default().problem(refine)?.with_reference(ReferenceSolution::pair(
        LINEAR_SYSTEM_X_REFERENCE.to_vec(),
        LINEAR_SYSTEM_Y_REFERENCE.to_vec(),
    )))
}

/// Closed-form `x(t)` of the default linear system
pub fn linear_system_exact_x(t: f64) -> f64 {
    LinearDecaySystem::default().exact_x(t)
}

/// Closed-form `y(t)` of the default linear system
pub fn linear_system_exact_y(t: f64) -> f64 {
    LinearDecaySystem::default().exact_y(t).unwrap_or(f64::NAN)
}
