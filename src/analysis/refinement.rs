//! Step-refinement study
//!
//! Integrates the same problem with `h / 2^k` for `k = 0..=m` and reads every
//! refined trajectory back on the coarse grid (stride `2^k`). With a
//! closed-form solution the study also reports the final-point error of each
//! level and the observed convergence ratio between consecutive levels,
//! about `2^order` for a method of that order.

use log::debug;

use crate::analysis::percent_relative_error;
use crate::error::{IvpError, Result};
use crate::solver::{ProblemSpec, Solver, StepMethod, Trajectory};

/// Deepest refinement accepted (`h / 2^16`)
pub const MAX_REFINEMENT: u32 = 16;

/// One refinement level
#[derive(Debug, Clone)]
pub struct RefinementLevel {
    /// Level `k`
    pub level: u32,

    /// Step size `h / 2^k`
    pub step_size: f64,

    /// Refined grid indices per coarse step, `2^k`
    pub stride: usize,

    /// Full refined trajectory
    pub trajectory: Trajectory,
}

/// One coarse grid point of the study
#[derive(Debug, Clone, PartialEq)]
pub struct RefinementRow {
    /// Coarse grid index
    pub index: usize,

    /// Independent variable
    pub independent: f64,

    /// Closed-form value, when provided
    pub exact: Option<f64>,

    /// Value of every level at this point, coarsest first
    pub values: Vec<f64>,

    /// Percent error of the finest level, when the closed form is provided
    pub finest_error: Option<f64>,
}

/// Result of a step-refinement study
#[derive(Debug, Clone)]
pub struct RefinementStudy {
    /// Method under study
    pub method: StepMethod,

    /// State component reported
    pub component: usize,

    /// Levels `0..=m`
    pub levels: Vec<RefinementLevel>,

    /// Coarse grid table
    pub rows: Vec<RefinementRow>,

    /// Absolute error at the last grid point per level (closed form only)
    pub final_errors: Option<Vec<f64>>,
}

impl RefinementStudy {
    /// Run the study up to level `max_level`
    ///
    /// # Errors
    ///
    /// - [`IvpError::Configuration`] when `max_level` exceeds [`MAX_REFINEMENT`],
    ///   when `component` is out of range, or when a refined grid does not
    ///   hold `2^k` steps per coarse step (the domain is not a whole number
    ///   of coarse steps)
    /// - any integration failure of a level
    pub fn run(
        problem: &ProblemSpec,
        method: StepMethod,
        max_level: u32,
        component: usize,
        exact: Option<&dyn Fn(f64) -> f64>,
    ) -> Result<Self> {
        if max_level > MAX_REFINEMENT {
            return Err(IvpError::configuration(format!(
                "refinement level m={} exceeds the maximum of {}",
                max_level, MAX_REFINEMENT
            )));
        }
        if component >= problem.dimension() {
            return Err(IvpError::configuration(format!(
                "component {} out of range for a {}-component problem",
                component,
                problem.dimension()
            )));
        }

        let levels = (0..=max_level)
            .map(|level| -> Result<RefinementLevel> {
                let stride = 1usize << level;
                let step_size = problem.step_size() / stride as f64;
                let refined = problem.with_step_size(step_size)?;
                if refined.num_steps() != stride * problem.num_steps() {
                    return Err(IvpError::configuration(format!(
                        "refinement level {} has {} steps with h={}, expected {} to cover the coarse grid",
                        level,
                        refined.num_steps(),
                        step_size,
                        stride * problem.num_steps()
                    )));
                }
                let trajectory = method.solve(&refined)?;
                debug!("refinement level {}: h={}, {} samples", level, step_size, trajectory.len());
                Ok(RefinementLevel { level, step_size, stride, trajectory })
            })
            .collect::<Result<Vec<_>>>()?;

        let coarse = &levels[0].trajectory;
        let rows = coarse
            .samples
            .iter()
            .map(|sample| {
                let values: Vec<f64> = levels
                    .iter()
                    .map(|level| {
                        level.trajectory.samples[sample.index * level.stride]
                            .state
                            .component(component)
                    })
                    .collect();
                let exact_value = exact.map(|f| f(sample.independent));
                let finest_error = exact_value
                    .zip(values.last().copied())
                    .map(|(e, v)| percent_relative_error(e, v));

                RefinementRow {
                    index: sample.index,
                    independent: sample.independent,
                    exact: exact_value,
                    values,
                    finest_error,
                }
            })
            .collect();

        let final_errors = exact.map(|f| {
            levels
                .iter()
                .filter_map(|level| level.trajectory.final_sample())
                .map(|last| (f(last.independent) - last.state.component(component)).abs())
                .collect()
        });

        Ok(Self { method, component, levels, rows, final_errors })
    }

    /// `e_k / e_{k+1}` between consecutive levels
    pub fn convergence_ratios(&self) -> Vec<f64> {
        self.final_errors
            .as_deref()
            .map(|errors| errors.windows(2).map(|w| w[0] / w[1]).collect())
            .unwrap_or_default()
    }

    /// `log2` of the convergence ratios, close to the method order
    pub fn observed_orders(&self) -> Vec<f64> {
        self.convergence_ratios().iter().map(|r| r.log2()).collect()
    }
}
