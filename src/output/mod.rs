//! Reporting of pipeline results
//!
//! Nothing in this module feeds back into the computation:
//! - **table**: console tables (`" | "`-separated, 6 decimals)
//! - **export**: CSV files
//! - **visualization**: PNG/SVG figures using plotters
//!
//! # Architecture
//!
//! ```text
//! output/
//! ├── mod.rs
//! ├── table.rs            ← Table/Cell and the table builders
//! ├── visualization/      ← Plots
//! │   ├── config.rs
//! │   ├── trajectory.rs
//! │   └── polynomial.rs
//! └── export/             ← Data export
//!     └── csv.rs
//! ```

pub mod export;
pub mod table;
pub mod visualization;

pub use export::{export_report, CsvConfig, CsvMetadata};
pub use table::{Cell, Table, TableLabels};
pub use visualization::{plot_report_errors, plot_report_fits, plot_report_trajectories, PlotConfig};
