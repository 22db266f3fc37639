//! Polynomial fitting
//!
//! Three independent strategies approximate a discrete trajectory by an
//! ascending-power polynomial:
//!
//! - **Vandermonde** ([`fit_vandermonde`]): solves `V·c = y` directly,
//!   exactly when `n = p+1`, in the least-squares sense otherwise
//! - **Lagrange** ([`fit_lagrange`]): expands the interpolating polynomial
//!   from its basis polynomials, no matrix involved
//! - **Least squares** ([`fit_least_squares`]): regression through the normal
//!   equations with SSE/MSE diagnostics, requires `p < n`
//!
//! On the same `n = p+1` samples, the Vandermonde and Lagrange coefficient
//! vectors agree up to rounding.
//!
//! # Example
//!
//! ```rust
//! use ivp_fit::fitting::{fit_lagrange, fit_vandermonde, Underdetermined};
//!
//! let points = [(0.0, 1.0), (0.5, 1.25), (1.0, 3.0), (1.5, 7.75)];
//!
//! let direct = fit_vandermonde(&points, 3, Underdetermined::Reject)?;
//! let lagrange = fit_lagrange(&points, Some(3))?;
//!
//! assert!(direct.coefficients.max_abs_difference(&lagrange.coefficients) < 1e-9);
//! # Ok::<(), ivp_fit::error::IvpError>(())
//! ```

pub mod design;
pub mod lagrange;
pub mod least_squares;
pub mod polynomial;
pub mod sampling;
pub mod vandermonde;

pub use design::DesignMatrix;
pub use lagrange::{fit_lagrange, lagrange_basis, LagrangeFit};
pub use least_squares::{fit_least_squares, LeastSquaresFit};
pub use polynomial::CoefficientVector;
pub use sampling::Sampling;
pub use vandermonde::{fit_vandermonde, SolveKind, Underdetermined, VandermondeFit};
