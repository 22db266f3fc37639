//! Problems with a closed-form solution, used to check the integrators

use ivp_fit::ode::{ScalarRhs, State, SystemRhs};
use ivp_fit::solver::{ProblemSpec, ReferenceSolution};

/// Closed-form problem: build at any step size, evaluate the exact solution
pub trait ClosedForm {
    /// Problem integrated with step size `h`
    fn problem(&self, h: f64) -> ProblemSpec;

    /// Exact value of `component` at `x`
    fn exact(&self, x: f64, component: usize) -> f64;

    /// Problem with the exact solution as reference, sampled every `spacing`
    fn with_reference(&self, h: f64, spacing: f64) -> ProblemSpec;
}

// =================================================================================================
// Exponential decay
// =================================================================================================

/// `y' = −k·y`, `y(0) = y₀`, exact `y₀·e^{−k x}`
pub struct ExponentialDecay {
    pub rate: f64,
    pub initial: f64,
    pub end: f64,
}

impl ExponentialDecay {
    pub fn new(rate: f64) -> Self {
        Self { rate, initial: 1.0, end: 2.0 }
    }
}

impl ClosedForm for ExponentialDecay {
    fn problem(&self, h: f64) -> ProblemSpec {
        let rate = self.rate;
        ProblemSpec::new(
            ScalarRhs::new("decay", move |_x, y| -rate * y),
            State::scalar(self.initial),
            0.0,
            self.end,
            h,
        )
        .unwrap()
    }

    fn exact(&self, x: f64, _component: usize) -> f64 {
        self.initial * (-self.rate * x).exp()
    }

    fn with_reference(&self, h: f64, spacing: f64) -> ProblemSpec {
        let (rate, initial) = (self.rate, self.initial);
        self.problem(h).with_reference(ReferenceSolution::from_fn(0.0, self.end, spacing, move |x| {
            initial * (-rate * x).exp()
        }))
    }
}

// =================================================================================================
// Constant growth
// =================================================================================================

/// `y' = c`: every method is exact
pub struct ConstantGrowth {
    pub slope: f64,
}

impl ClosedForm for ConstantGrowth {
    fn problem(&self, h: f64) -> ProblemSpec {
        let slope = self.slope;
        ProblemSpec::new(ScalarRhs::new("growth", move |_x, _y| slope), State::scalar(0.0), 0.0, 2.0, h)
            .unwrap()
    }

    fn exact(&self, x: f64, _component: usize) -> f64 {
        self.slope * x
    }

    fn with_reference(&self, h: f64, spacing: f64) -> ProblemSpec {
        let slope = self.slope;
        self.problem(h)
            .with_reference(ReferenceSolution::from_fn(0.0, 2.0, spacing, move |x| slope * x))
    }
}

// =================================================================================================
// Oscillator
// =================================================================================================

/// `x' = y`, `y' = −x`, `(x, y)(0) = (1, 0)`, exact `(cos t, −sin t)`
pub struct Oscillator {
    pub end: f64,
}

impl ClosedForm for Oscillator {
    fn problem(&self, h: f64) -> ProblemSpec {
        ProblemSpec::new(
            SystemRhs::new("oscillator", |_x, y, _t| y, |x, _y, _t| -x),
            State::pair(1.0, 0.0),
            0.0,
            self.end,
            h,
        )
        .unwrap()
    }

    fn exact(&self, t: f64, component: usize) -> f64 {
        if component == 0 { t.cos() } else { -t.sin() }
    }

    fn with_reference(&self, h: f64, spacing: f64) -> ProblemSpec {
        self.problem(h).with_reference(ReferenceSolution::from_fns(
            0.0,
            self.end,
            spacing,
            |t| t.cos(),
            |t| -t.sin(),
        ))
    }
}

// =================================================================================================
// Square root with a domain error
// =================================================================================================

/// `y' = √(1 − x)` on `[0, 2]`: the right-hand side is NaN past `x = 1`
pub struct SqrtDomain;

impl SqrtDomain {
    pub fn problem(&self, h: f64) -> ProblemSpec {
        ProblemSpec::new(
            ScalarRhs::new("sqrt-domain", |x: f64, _y| (1.0 - x).sqrt()),
            State::scalar(0.0),
            0.0,
            2.0,
            h,
        )
        .unwrap()
    }
}
