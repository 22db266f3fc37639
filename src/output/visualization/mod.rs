//! Visualization of pipeline results with `plotters`
//!
//! # Organization
//!
//! - **config**: Shared plot configuration (`PlotConfig`)
//! - **trajectory**: Trajectories vs reference, percent error at the checkpoints
//! - **polynomial**: Fitted polynomials vs samples
//!
//! Text (titles, axis labels, legend) needs the `ttf` feature; without it the
//! figures are drawn without text.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use ivp_fit::output::visualization::{plot_report_fits, plot_report_trajectories};
//!
//! plot_report_trajectories(&report, 0, &labels, "trajectories.png")?;
//! plot_report_fits(&report, 0, &labels, "fit.svg")?;
//! ```

mod chart;
pub mod config;
pub mod polynomial;
pub mod trajectory;

pub use config::{PlotConfig, NO_TITLE};

pub use polynomial::{plot_polynomial_fits, plot_report_fits, sample_polynomial};
pub use trajectory::{
    plot_errors, plot_report_errors, plot_report_trajectories, plot_trajectories, reference_points,
};
