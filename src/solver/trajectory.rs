//! Integration output
//!
//! A `Trajectory` stores one `Sample` per grid point, index 0 holding the
//! initial condition, plus free-form metadata for diagnostics.

use std::collections::HashMap;

use crate::ode::State;
use crate::solver::StepMethod;

/// One grid point of a trajectory
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    /// Grid index `n`
    pub index: usize,

    /// Independent variable `x_n = start + n·h`
    pub independent: f64,

    /// Dependent variable(s) at `x_n`
    pub state: State,
}

/// Ordered samples produced by one method on one problem
///
/// # Invariants
///
/// - `samples[0].state` is the initial condition
/// - `samples[n].independent == start + n·h`
/// - length is `num_steps + 1`
#[derive(Debug, Clone)]
pub struct Trajectory {
    /// Method that produced the samples
    pub method: StepMethod,

    /// Uniform step size used
    pub step_size: f64,

    /// Samples in grid order
    pub samples: Vec<Sample>,

    /// Diagnostic metadata (solver name, step count, evaluations, ...)
    pub metadata: HashMap<String, String>,
}

impl Trajectory {
    /// Create a trajectory from already computed samples
    pub fn new(method: StepMethod, step_size: f64, samples: Vec<Sample>) -> Self {
        Self {
            method,
            step_size,
            samples,
            metadata: HashMap::new(),
        }
    }

    /// Add a metadata entry
    pub fn add_metadata(&mut self, key: &str, value: &str) {
        self.metadata.insert(key.to_string(), value.to_string());
    }

    /// Number of samples
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// True when no sample is stored
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Number of state components
    pub fn dimension(&self) -> usize {
        self.samples.first().map_or(0, |s| s.state.dimension())
    }

    /// Last sample
    pub fn final_sample(&self) -> Option<&Sample> {
        self.samples.last()
    }

    /// Independent variable of every sample
    pub fn independents(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.independent).collect()
    }

    /// One component of every sample
    pub fn component(&self, index: usize) -> Vec<f64> {
        self.samples
            .iter()
            .filter_map(|s| s.state.get(index))
            .collect()
    }

    /// `(independent, component)` pairs, the input of the polynomial fitters
    pub fn points(&self, index: usize) -> Vec<(f64, f64)> {
        self.samples
            .iter()
            .filter_map(|s| s.state.get(index).map(|v| (s.independent, v)))
            .collect()
    }
}
