//! Batch run: integrate, compare against the reference, fit polynomials
//!
//! A run is fully described by a [`ProblemSpec`] and a [`RunConfiguration`].
//! Nothing is read from global state, and the resulting [`PipelineReport`]
//! owns every artifact handed to the output layer.
//!
//! # Example
//!
//! ```rust
//! use ivp_fit::models::Problem;
//! use ivp_fit::pipeline::{run, RunConfiguration};
//! use ivp_fit::solver::StepMethod;
//!
//! let problem = Problem::Trig.build(0)?;
//! let config = RunConfiguration::default()
//!     .with_methods(vec![StepMethod::Euler, StepMethod::Rk4])
//!     .with_degree(2);
//!
//! let report = run(&problem, &config)?;
//! assert_eq!(report.trajectories.len(), 2);
//! assert!(report.errors.is_some());
//! assert_eq!(report.fits[0].vandermonde.coefficients.len(), 3);
//! # Ok::<(), ivp_fit::error::IvpError>(())
//! ```

use log::{debug, warn};

use crate::analysis::{differentiate, DerivativeRow, ErrorAnalyzer, ErrorTable};
use crate::error::{IvpError, Result};
use crate::fitting::{
    fit_lagrange, fit_least_squares, fit_vandermonde, LagrangeFit, LeastSquaresFit, Sampling,
    Underdetermined, VandermondeFit,
};
use crate::solver::{solve_all, CheckpointAlignment, ProblemSpec, StepMethod, Trajectory};

// =================================================================================================
// Configuration
// =================================================================================================

/// Everything a run needs besides the problem itself
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfiguration {
    /// Methods integrated for comparison, in report order
    pub methods: Vec<StepMethod>,

    /// Method whose trajectory feeds the Vandermonde and Lagrange fitters
    pub fit_method: StepMethod,

    /// Interpolation degree `p`
    pub degree: usize,

    /// Which samples the interpolating fitters use
    pub sampling: Sampling,

    /// Regression degree of the least-squares fitter
    pub least_squares_degree: usize,

    /// Methods whose full trajectory is regressed
    pub least_squares_methods: Vec<StepMethod>,

    /// Vandermonde behaviour when `n < p+1`
    pub underdetermined: Underdetermined,
}

impl Default for RunConfiguration {
    fn default() -> Self {
        Self {
            methods: StepMethod::ALL.to_vec(),
            fit_method: StepMethod::Rk4,
            degree: 3,
            sampling: Sampling::Prefix,
            least_squares_degree: 2,
            least_squares_methods: vec![StepMethod::Heun, StepMethod::Rk4],
            underdetermined: Underdetermined::Reject,
        }
    }
}

impl RunConfiguration {
    /// Default configuration fitting the trajectory of `fit_method`
    pub fn new(fit_method: StepMethod) -> Self {
        Self { fit_method, ..Default::default() }
    }

    /// Replace the compared methods
    pub fn with_methods(mut self, methods: Vec<StepMethod>) -> Self {
        self.methods = methods;
        self
    }

    /// Replace the fitted method
    pub fn with_fit_method(mut self, method: StepMethod) -> Self {
        self.fit_method = method;
        self
    }

    /// Replace the interpolation degree
    pub fn with_degree(mut self, degree: usize) -> Self {
        self.degree = degree;
        self
    }

    /// Replace the sampling policy
    pub fn with_sampling(mut self, sampling: Sampling) -> Self {
        self.sampling = sampling;
        self
    }

    /// Replace the least-squares degree and regressed methods
    pub fn with_least_squares(mut self, degree: usize, methods: Vec<StepMethod>) -> Self {
        self.least_squares_degree = degree;
        self.least_squares_methods = methods;
        self
    }

    /// Replace the Vandermonde underdetermined policy
    pub fn with_underdetermined(mut self, policy: Underdetermined) -> Self {
        self.underdetermined = policy;
        self
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.methods.is_empty() {
            return Err(IvpError::configuration("at least one method must be compared"));
        }
        Ok(())
    }

    /// Every method the run integrates, without duplicates
    ///
    /// The compared methods come first, in configuration order, followed by
    /// the fitted and regressed methods when they are not already compared.
    pub fn integrated_methods(&self) -> Vec<StepMethod> {
        let mut methods: Vec<StepMethod> = Vec::new();
        let requested = self
            .methods
            .iter()
            .chain(std::iter::once(&self.fit_method))
            .chain(self.least_squares_methods.iter());
        for method in requested {
            if !methods.contains(method) {
                methods.push(*method);
            }
        }
        methods
    }
}

// =================================================================================================
// Report
// =================================================================================================

/// Error analysis of every integrated method
#[derive(Debug, Clone)]
pub struct ErrorReport {
    /// Stride and spacing of the checkpoints
    pub alignment: CheckpointAlignment,

    /// Independent variable of each checkpoint
    pub checkpoints: Vec<f64>,

    /// One table per (method, component), method-major
    pub tables: Vec<ErrorTable>,
}

impl ErrorReport {
    /// Table of one method on one component
    pub fn table(&self, method: StepMethod, component: usize) -> Option<&ErrorTable> {
        self.tables
            .iter()
            .find(|t| t.method == method && t.component == component)
    }
}

/// Fits of one state component
#[derive(Debug, Clone)]
pub struct ComponentFit {
    /// State component
    pub component: usize,

    /// Samples fed to the interpolating fitters
    pub samples: Vec<(f64, f64)>,

    /// Direct solve on `samples`
    pub vandermonde: VandermondeFit,

    /// Lagrange expansion on `samples`
    pub lagrange: LagrangeFit,

    /// Regression on the full trajectory of each least-squares method
    pub least_squares: Vec<(StepMethod, LeastSquaresFit)>,
}

/// Every artifact of one run
#[derive(Debug, Clone)]
pub struct PipelineReport {
    /// Problem that was integrated
    pub problem: ProblemSpec,

    /// Configuration of the run
    pub config: RunConfiguration,

    /// One trajectory per integrated method, in [`RunConfiguration::integrated_methods`] order
    pub trajectories: Vec<Trajectory>,

    /// `None` when no usable reference was available
    pub errors: Option<ErrorReport>,

    /// One entry per state component
    pub fits: Vec<ComponentFit>,

    /// Finite-difference derivatives of the fitted trajectory, per component
    pub derivatives: Vec<Vec<DerivativeRow>>,
}

impl PipelineReport {
    /// Trajectory of one method
    pub fn trajectory(&self, method: StepMethod) -> Option<&Trajectory> {
        self.trajectories.iter().find(|t| t.method == method)
    }

    /// Trajectories of the compared methods, in configuration order
    pub fn compared(&self) -> Vec<&Trajectory> {
        self.config
            .methods
            .iter()
            .filter_map(|m| self.trajectory(*m))
            .collect()
    }
}

// =================================================================================================
// Run
// =================================================================================================

/// Run the whole pipeline on one problem
///
/// # Errors
///
/// Every [`IvpError`] is fatal except [`IvpError::ReferenceMismatch`], which
/// only disables the error report (`errors` is `None`).
pub fn run(problem: &ProblemSpec, config: &RunConfiguration) -> Result<PipelineReport> {
    // ====== Step 1: Validate ======
    problem.validate()?;
    config.validate()?;

    // ====== Step 2: Integrate ======
    let methods = config.integrated_methods();
    let trajectories = solve_all(problem, &methods)?;
    debug!("{}: integrated {} method(s)", problem.name(), trajectories.len());

    // ====== Step 3: Compare against the reference ======
    let errors = match analyze_errors(problem, &trajectories) {
        Ok(report) => Some(report),
        Err(err) if !err.is_fatal() => {
            warn!("{}; error reporting disabled", err);
            None
        }
        Err(err) => return Err(err),
    };

    // ====== Step 4: Fit polynomials ======
    let fitted = find_trajectory(&trajectories, config.fit_method)?;
    let fits = (0..problem.dimension())
        .map(|component| fit_component(&trajectories, fitted, component, config))
        .collect::<Result<Vec<_>>>()?;

    // ====== Step 5: Differentiate ======
    let derivatives = (0..problem.dimension())
        .map(|component| differentiate(fitted, component))
        .collect::<Result<Vec<_>>>()?;

    Ok(PipelineReport {
        problem: problem.clone(),
        config: config.clone(),
        trajectories,
        errors,
        fits,
        derivatives,
    })
}

fn analyze_errors(problem: &ProblemSpec, trajectories: &[Trajectory]) -> Result<ErrorReport> {
    let analyzer = ErrorAnalyzer::new(problem)?;

    let mut tables = Vec::new();
    for trajectory in trajectories {
        tables.extend(analyzer.analyze(trajectory)?);
    }

    Ok(ErrorReport {
        alignment: analyzer.alignment(),
        checkpoints: analyzer.checkpoints(),
        tables,
    })
}

fn find_trajectory(trajectories: &[Trajectory], method: StepMethod) -> Result<&Trajectory> {
    trajectories
        .iter()
        .find(|t| t.method == method)
        .ok_or_else(|| IvpError::configuration(format!("method {} was not integrated", method)))
}

fn fit_component(
    trajectories: &[Trajectory],
    fitted: &Trajectory,
    component: usize,
    config: &RunConfiguration,
) -> Result<ComponentFit> {
    let points = fitted.points(component);
    let samples = config.sampling.select(&points, config.degree)?;

    let vandermonde = fit_vandermonde(&samples, config.degree, config.underdetermined)?;
    let lagrange = fit_lagrange(&samples, Some(config.degree))?;

    let least_squares = config
        .least_squares_methods
        .iter()
        .map(|method| -> Result<(StepMethod, LeastSquaresFit)> {
            let trajectory = find_trajectory(trajectories, *method)?;
            let fit = fit_least_squares(&trajectory.points(component), config.least_squares_degree)?;
            Ok((*method, fit))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(ComponentFit {
        component,
        samples,
        vandermonde,
        lagrange,
        least_squares,
    })
}
