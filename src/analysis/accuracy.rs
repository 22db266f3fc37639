//! Percent relative error against a reference solution
//!
//! The analyzer reads the trajectory only at the reference checkpoints:
//! checkpoint `k` sits at grid index `k·stride`, where the stride is
//! `round(reference_spacing / h)` computed once per problem.

use crate::error::{IvpError, Result};
use crate::solver::{CheckpointAlignment, ProblemSpec, ReferenceSolution, StepMethod, Trajectory};

/// `|(reference − approximate) / reference| · 100`
///
/// Returns `0` when the reference value is exactly zero. This hides the true
/// error at zero crossings of the solution; it is the documented policy, not
/// a numeric failure.
///
/// # Example
///
/// ```rust
/// use ivp_fit::analysis::percent_relative_error;
///
/// assert!((percent_relative_error(2.0, 1.5) - 25.0).abs() < 1e-12);
/// assert_eq!(percent_relative_error(0.0, 3.0), 0.0);
/// ```
pub fn percent_relative_error(reference: f64, approximate: f64) -> f64 {
    if reference == 0.0 {
        return 0.0;
    }
    ((reference - approximate) / reference * 100.0).abs()
}

/// One checkpoint of an error table
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ErrorEntry {
    /// Checkpoint number `k`
    pub checkpoint: usize,

    /// Trajectory index `k·stride`
    pub grid_index: usize,

    /// Independent variable of the checkpoint
    pub independent: f64,

    /// Reference value
    pub reference: f64,

    /// Trajectory value at the checkpoint
    pub approximate: f64,

    /// Percent relative error
    pub percent_error: f64,
}

/// Errors of one method on one state component
#[derive(Debug, Clone)]
pub struct ErrorTable {
    /// Method that produced the trajectory
    pub method: StepMethod,

    /// State component (0 for scalar problems, 0 = x and 1 = y for systems)
    pub component: usize,

    /// One entry per checkpoint
    pub entries: Vec<ErrorEntry>,
}

impl ErrorTable {
    /// Largest percent error over all checkpoints
    pub fn max_error(&self) -> f64 {
        self.entries.iter().map(|e| e.percent_error).fold(0.0, f64::max)
    }

    /// Percent error at the last checkpoint
    pub fn final_error(&self) -> Option<f64> {
        self.entries.last().map(|e| e.percent_error)
    }
}

/// Compares trajectories of one problem against its reference solution
#[derive(Debug, Clone)]
pub struct ErrorAnalyzer<'a> {
    reference: &'a ReferenceSolution,
    alignment: CheckpointAlignment,
    domain_start: f64,
}

impl<'a> ErrorAnalyzer<'a> {
    /// Align the problem's reference solution on its grid
    ///
    /// # Errors
    ///
    /// [`IvpError::ReferenceMismatch`] when the problem has no reference or
    /// the reference cannot be aligned. Callers are expected to treat it as
    /// "no reference available" and skip error reporting.
    pub fn new(problem: &'a ProblemSpec) -> Result<Self> {
        let reference = problem
            .reference()
            .ok_or_else(|| IvpError::reference_mismatch("no reference solution configured"))?;
        let alignment = reference.align(problem)?;

        Ok(Self {
            reference,
            alignment,
            domain_start: problem.domain_start(),
        })
    }

    /// Stride and spacing of the checkpoints
    pub fn alignment(&self) -> CheckpointAlignment {
        self.alignment
    }

    /// Independent variable of each checkpoint, `start + k·spacing`
    pub fn checkpoints(&self) -> Vec<f64> {
        (0..self.alignment.checkpoints)
            .map(|k| self.domain_start + k as f64 * self.alignment.spacing)
            .collect()
    }

    /// Reference values of one component
    pub fn reference_values(&self, component: usize) -> Option<&[f64]> {
        self.reference.component(component)
    }

    /// One error table per state component
    ///
    /// # Errors
    ///
    /// [`IvpError::ReferenceMismatch`] when the trajectory is shorter than
    /// the last checkpoint (it was not produced from the analyzed problem).
    pub fn analyze(&self, trajectory: &Trajectory) -> Result<Vec<ErrorTable>> {
        let last = self.alignment.grid_index(self.alignment.checkpoints - 1);
        if last >= trajectory.len() {
            return Err(IvpError::reference_mismatch(format!(
                "{} trajectory has {} samples, checkpoint needs index {}",
                trajectory.method.label(),
                trajectory.len(),
                last
            )));
        }

        let checkpoints = self.checkpoints();

        (0..self.reference.dimension())
            .map(|component| -> Result<ErrorTable> {
                let values = self.reference.component(component).unwrap_or_default();

                let entries = values
                    .iter()
                    .enumerate()
                    .map(|(k, &reference)| -> Result<ErrorEntry> {
                        let grid_index = self.alignment.grid_index(k);
                        let approximate = trajectory.samples[grid_index]
                            .state
                            .get(component)
                            .ok_or_else(|| {
                                IvpError::reference_mismatch(format!(
                                    "trajectory state has no component {}",
                                    component
                                ))
                            })?;

                        Ok(ErrorEntry {
                            checkpoint: k,
                            grid_index,
                            independent: checkpoints[k],
                            reference,
                            approximate,
                            percent_error: percent_relative_error(reference, approximate),
                        })
                    })
                    .collect::<Result<Vec<_>>>()?;

                Ok(ErrorTable { method: trajectory.method, component, entries })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ode::{ScalarRhs, State};
    use crate::solver::Solver;
    use approx::assert_relative_eq;

    fn ramp(h: f64) -> ProblemSpec {
        // y' = 1, y(0) = 1: every method is exact, y = 1 + x
        ProblemSpec::new(ScalarRhs::new("ramp", |_x, _y| 1.0), State::scalar(1.0), 0.0, 2.0, h)
            .unwrap()
    }

    #[test]
    fn test_percent_error_policy() {
        assert_relative_eq!(percent_relative_error(4.0, 5.0), 25.0);
        assert_relative_eq!(percent_relative_error(-4.0, -3.0), 25.0);
        assert_eq!(percent_relative_error(0.0, 123.0), 0.0);
        assert_eq!(percent_relative_error(0.0, 0.0), 0.0);
    }

    #[test]
    fn test_missing_reference_is_recoverable() {
        let err = ErrorAnalyzer::new(&ramp(0.5)).unwrap_err();
        assert!(!err.is_fatal());
    }

    #[test]
    fn test_checkpoints_follow_stride() {
        let problem = ramp(0.25).with_reference(ReferenceSolution::scalar(vec![1.0, 2.0, 3.0]));
        let analyzer = ErrorAnalyzer::new(&problem).unwrap();
        assert_eq!(analyzer.alignment().stride, 4);
        assert_eq!(analyzer.checkpoints(), vec![0.0, 1.0, 2.0]);

        let trajectory = StepMethod::Euler.solve(&problem).unwrap();
        let tables = analyzer.analyze(&trajectory).unwrap();
        assert_eq!(tables.len(), 1);

        let indices: Vec<usize> = tables[0].entries.iter().map(|e| e.grid_index).collect();
        assert_eq!(indices, vec![0, 4, 8]);
        assert!(tables[0].max_error() < 1e-12);
    }

    #[test]
    fn test_error_values() {
        // Reference deliberately off by 10% at the last checkpoint
        let problem = ramp(0.5).with_reference(ReferenceSolution::scalar(vec![1.0, 2.0, 0.0, 2.5, 3.0 / 0.9]));
        let analyzer = ErrorAnalyzer::new(&problem).unwrap();
        let trajectory = StepMethod::Rk4.solve(&problem).unwrap();
        let table = &analyzer.analyze(&trajectory).unwrap()[0];

        assert_eq!(table.entries[2].percent_error, 0.0);
        assert_relative_eq!(table.final_error().unwrap(), 10.0, epsilon = 1e-9);
    }

    #[test]
    fn test_short_trajectory_rejected() {
        let problem = ramp(0.5).with_reference(ReferenceSolution::scalar(vec![1.0, 2.0, 3.0]));
        let analyzer = ErrorAnalyzer::new(&problem).unwrap();

        let mut trajectory = StepMethod::Euler.solve(&problem).unwrap();
        trajectory.samples.truncate(3);
        assert!(analyzer.analyze(&trajectory).is_err());
    }
}
