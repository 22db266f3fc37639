//! Explicit one-step methods
//!
//! Each submodule holds the update formula of one [`StepMethod`] variant as a
//! plain function `step(stage, x, x_next, state, h) -> Result<State>`. The
//! integration loop shared by every method lives here, in the
//! [`Solver`] implementation of `StepMethod`.
//!
//! # Available Methods
//!
//! - **[`euler`]**: first order, 1 evaluation per step
//! - **[`heun`]**: predictor-corrector, second order, 2 evaluations per step
//! - **[`ralston`]**: Ralston RK2, second order, 2 evaluations per step
//! - **[`rk3`]**: Kutta's RK3, third order, 3 evaluations per step
//! - **[`rk4`]**: classical RK4, fourth order, 4 evaluations per step
//!
//! # Example
//!
//! ```rust
//! use ivp_fit::ode::{ScalarRhs, State};
//! use ivp_fit::solver::{ProblemSpec, Solver, StepMethod};
//!
//! // y' = y, y(0) = 1 on [0, 1]
//! let problem = ProblemSpec::new(
//!     ScalarRhs::new("growth", |_x, y| y),
//!     State::scalar(1.0),
//!     0.0,
//!     1.0,
//!     0.1,
//! )?;
//!
//! let euler = StepMethod::Euler.solve(&problem)?;
//! let rk4 = StepMethod::Rk4.solve(&problem)?;
//!
//! let exact = 1.0_f64.exp();
//! let euler_error = (euler.component(0)[10] - exact).abs();
//! let rk4_error = (rk4.component(0)[10] - exact).abs();
//! assert!(rk4_error < euler_error);
//! # Ok::<(), ivp_fit::error::IvpError>(())
//! ```

pub mod euler;
pub mod heun;
pub mod ralston;
pub mod rk3;
pub mod rk4;

use log::{debug, trace};

use crate::error::{IvpError, Result};
use crate::ode::{RightHandSide, State};
use crate::solver::{
    validate_state, ProblemSpec, Sample, Solver, StepMethod, Trajectory,
};

// =================================================================================================
// Stage evaluation
// =================================================================================================

/// Right-hand side evaluation bound to the step being computed
///
/// Turns an evaluation failure into [`IvpError::NumericEvaluation`] tagged
/// with the step index and the independent variable of the failing stage.
pub struct Stage<'a> {
    rhs: &'a dyn RightHandSide,
    step: usize,
}

impl<'a> Stage<'a> {
    /// Bind `rhs` to grid step `step`
    pub fn new(rhs: &'a dyn RightHandSide, step: usize) -> Self {
        Self { rhs, step }
    }

    /// Slope `f(x, state)`
    pub fn slope(&self, x: f64, state: &State) -> Result<State> {
        let slope = self.rhs.evaluate(x, state).map_err(|detail| {
            IvpError::NumericEvaluation { independent: x, step: self.step, detail }
        })?;

        if !slope.same_shape(state) {
            return Err(IvpError::NumericEvaluation {
                independent: x,
                step: self.step,
                detail: format!(
                    "{} returned {} component(s) for a {}-component state",
                    self.rhs.name(),
                    slope.dimension(),
                    state.dimension()
                ),
            });
        }

        Ok(slope)
    }

    /// Grid step this stage belongs to
    pub fn step(&self) -> usize {
        self.step
    }
}

// =================================================================================================
// Shared integration loop
// =================================================================================================

impl StepMethod {
    /// Advance `state` from `x` to `x_next = x + h` with this method
    pub fn advance(
        &self,
        stage: &Stage<'_>,
        x: f64,
        x_next: f64,
        state: State,
        h: f64,
    ) -> Result<State> {
        match self {
            StepMethod::Euler => euler::step(stage, x, x_next, state, h),
            StepMethod::Heun => heun::step(stage, x, x_next, state, h),
            StepMethod::Ralston => ralston::step(stage, x, x_next, state, h),
            StepMethod::Rk3 => rk3::step(stage, x, x_next, state, h),
            StepMethod::Rk4 => rk4::step(stage, x, x_next, state, h),
        }
    }
}

impl Solver for StepMethod {
    fn solve(&self, problem: &ProblemSpec) -> Result<Trajectory> {

        // ====== Step 1: Validation ======

        problem.validate()?;

        // ====== Step 2: Setup ======

        let h = problem.step_size();
        let num_steps = problem.num_steps();
        let mut state = problem.initial_state();

        let mut samples = Vec::with_capacity(num_steps + 1);
        samples.push(Sample { index: 0, independent: problem.grid_point(0), state });

        debug!(
            "{}: integrating {} over [{}, {}] with h={} ({} steps)",
            self.label(),
            problem.name(),
            problem.domain_start(),
            problem.domain_end(),
            h,
            num_steps
        );

        // ====== Step 3: Integration ======

        for step in 0..num_steps {
            // Recomputed from the index rather than accumulated, so that
            // x_n never drifts from start + n·h
            let x = problem.grid_point(step);
            let x_next = problem.grid_point(step + 1);

            let stage = Stage::new(problem.rhs(), step + 1);
            state = self.advance(&stage, x, x_next, state, h)?;

            validate_state(&state, step + 1, x_next)?;

            trace!("{} step {}: x={} state={}", self.label(), step + 1, x_next, state);
            samples.push(Sample { index: step + 1, independent: x_next, state });
        }

        // ====== Step 4: Build Result ======

        let mut trajectory = Trajectory::new(*self, h, samples);
        trajectory.add_metadata("solver", self.name());
        trajectory.add_metadata("problem", problem.name());
        trajectory.add_metadata("steps", &num_steps.to_string());
        trajectory.add_metadata("h", &h.to_string());
        trajectory.add_metadata(
            "function evaluations",
            &(num_steps * self.stages()).to_string(),
        );

        Ok(trajectory)
    }

    fn name(&self) -> &'static str {
        match self {
            StepMethod::Euler => "Forward Euler",
            StepMethod::Heun => "Heun predictor-corrector",
            StepMethod::Ralston => "Ralston RK2",
            StepMethod::Rk3 => "Runge Kutta (RK3)",
            StepMethod::Rk4 => "Runge Kutta (RK4)",
        }
    }
}

// =================================================================================================
// Tests
// =================================================================================================
