//! Export module for pipeline results
//!
//! | Format | Module  |
//! |--------|---------|
//! | CSV    | [`csv`] |
//!
//! # Usage example
//!
//! ```rust,ignore
//! use ivp_fit::output::export::{export_report, CsvConfig};
//!
//! let written = export_report(&report, &labels, "results", Some(&CsvConfig::default()))?;
//! ```

pub mod csv;

pub use csv::{
    export_checkpoints_csv, export_fitting_csv, export_least_squares_csv, export_report,
    export_tables_csv, export_trajectories_csv, CsvConfig, CsvMetadata,
};
