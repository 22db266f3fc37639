//! CSV export of pipeline results
//!
//! Every export writes one or more [`Table`] sections. A multi-section file
//! (fitting report, least-squares report) puts each section title on its own
//! line and separates sections with an empty line, which spreadsheet tools
//! read as consecutive blocks.
//!
//! # Quick Examples
//!
//! ## Checkpoint table
//!
//! ```rust,ignore
//! use ivp_fit::output::export::export_checkpoints_csv;
//!
//! export_checkpoints_csv(&report, &labels, "checkpoints.csv", None)?;
//! ```
//!
//! **Output** (`checkpoints.csv`):
//! ```csv
//! n,x,y (actual),Euler (y),Euler (error)
//! 0,0.000000,1.000000,1.000000,0.00000%
//! 1,0.300000,1.286601,1.300000,1.04141%
//! ...
//! ```
//!
//! ## With Metadata
//!
//! ```rust,ignore
//! use ivp_fit::output::export::{CsvConfig, CsvMetadata};
//!
//! let metadata = CsvMetadata::from_problem(&problem, "Runge Kutta (RK4)");
//! let config = CsvConfig::default().with_metadata(metadata);
//! ```
//!
//! **Output**:
//! ```csv
//! # IVP Integration Data
//! # Generated: 2026-02-11T15:30:00Z
//! # Problem: trig
//! # Solver: Runge Kutta (RK4)
//! # Step Size: 0.3
//! # Steps: 5
//! #
//! n,x,...
//! ```

use std::error::Error;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use log::info;

use crate::output::table::{
    checkpoint_tables, fitting_tables, least_squares_tables, trajectory_table, Cell, Table,
    TableLabels,
};
use crate::pipeline::PipelineReport;
use crate::solver::ProblemSpec;

// =============================================================================
// Configuration Structures
// =============================================================================

/// Configuration for CSV export
///
/// # Example
///
/// ```rust
/// use ivp_fit::output::export::CsvConfig;
///
/// let config = CsvConfig {
///     delimiter: ';',
///     precision: 10,
///     ..Default::default()
/// };
/// assert!(!config.include_metadata);
/// ```
#[derive(Debug, Clone)]
pub struct CsvConfig {
    /// Column delimiter (default: ',')
    pub delimiter: char,

    /// Decimal separator (default: '.')
    pub decimal_separator: char,

    /// Number of decimal places for floating-point values (default: 6)
    pub precision: usize,

    /// Include metadata header comments (default: false)
    pub include_metadata: bool,

    /// Metadata to include in header
    pub metadata: Option<CsvMetadata>,
}

impl Default for CsvConfig {
    fn default() -> Self {
        Self {
            delimiter: ',',
            decimal_separator: '.',
            precision: 6,
            include_metadata: false,
            metadata: None,
        }
    }
}

impl CsvConfig {
    /// European CSV format (semicolon, comma for decimal)
    pub fn european() -> Self {
        Self {
            delimiter: ';',
            decimal_separator: ',',
            ..Default::default()
        }
    }

    /// Builder pattern: set delimiter
    pub fn delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Builder pattern: set precision
    pub fn precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    /// Builder pattern: enable metadata
    pub fn with_metadata(mut self, metadata: CsvMetadata) -> Self {
        self.include_metadata = true;
        self.metadata = Some(metadata);
        self
    }
}

/// Metadata for CSV header comments
///
/// Only non-None fields are written.
#[derive(Debug, Clone, Default)]
pub struct CsvMetadata {
    /// Problem name (e.g. "trig")
    pub problem_name: Option<String>,

    /// Solver name (e.g. "Runge Kutta (RK4)")
    pub solver_name: Option<String>,

    /// Step size h
    pub step_size: Option<f64>,

    /// Number of integration steps
    pub steps: Option<usize>,

    /// Polynomial degree
    pub degree: Option<usize>,

    /// Additional custom parameters
    pub custom: Vec<(String, String)>,
}

impl CsvMetadata {
    /// Metadata describing one problem and solver
    pub fn from_problem(problem: &ProblemSpec, solver: &str) -> Self {
        Self {
            problem_name: Some(problem.name().to_string()),
            solver_name: Some(solver.to_string()),
            step_size: Some(problem.step_size()),
            steps: Some(problem.num_steps()),
            ..Default::default()
        }
    }

    /// Add custom parameter
    pub fn add_custom(&mut self, key: String, value: String) {
        self.custom.push((key, value));
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Write metadata header comments
fn write_metadata_header(file: &mut impl Write, metadata: &CsvMetadata) -> Result<(), Box<dyn Error>> {
    writeln!(file, "# IVP Integration Data")?;

    let now = chrono::Utc::now();
    writeln!(file, "# Generated: {}", now.to_rfc3339())?;

    if let Some(problem) = &metadata.problem_name {
        writeln!(file, "# Problem: {}", problem)?;
    }
    if let Some(solver) = &metadata.solver_name {
        writeln!(file, "# Solver: {}", solver)?;
    }
    if let Some(h) = metadata.step_size {
        writeln!(file, "# Step Size: {}", h)?;
    }
    if let Some(steps) = metadata.steps {
        writeln!(file, "# Steps: {}", steps)?;
    }
    if let Some(degree) = metadata.degree {
        writeln!(file, "# Degree: {}", degree)?;
    }

    for (key, value) in &metadata.custom {
        writeln!(file, "# {}: {}", key, value)?;
    }

    writeln!(file, "#")?;

    Ok(())
}

/// Write one table: optional title line, header, rows
fn write_table(
    file: &mut impl Write,
    table: &Table,
    with_title: bool,
    configuration: &CsvConfig,
) -> Result<(), Box<dyn Error>> {
    let delimiter = configuration.delimiter.to_string();

    if with_title {
        writeln!(file, "{}", table.title)?;
    }
    writeln!(file, "{}", table.headers.join(&delimiter))?;

    for row in &table.rows {
        let cells: Vec<String> = row
            .iter()
            .map(|c| c.render(configuration.precision, configuration.decimal_separator))
            .collect();
        writeln!(file, "{}", cells.join(&delimiter))?;
    }

    Ok(())
}

// =============================================================================
// Export Functions
// =============================================================================

/// Export tables to one CSV file
///
/// A single table is written without its title; several tables become
/// titled sections separated by an empty line.
///
/// # Errors
///
/// - No table, or a table without columns
/// - A row whose length differs from the header
/// - NaN or Inf values
/// - File creation errors
pub fn export_tables_csv<P: AsRef<Path>>(
    tables: &[Table],
    output_path: P,
    configuration: Option<&CsvConfig>,
) -> Result<(), Box<dyn Error>> {
    // ============================= Validation =============================

    if tables.is_empty() {
        return Err("Empty data: nothing to export".into());
    }

    for table in tables {
        if table.width() == 0 {
            return Err(format!("Empty data: table '{}' has no columns", table.title).into());
        }
        if let Some(row) = table.rows.iter().find(|r| r.len() != table.width()) {
            return Err(format!(
                "Data length mismatch in '{}': {} cells versus {} headers",
                table.title,
                row.len(),
                table.width()
            )
            .into());
        }
        let non_finite = table.rows.iter().flatten().any(|cell| match cell {
            Cell::Number(v) | Cell::Percent(v) => !v.is_finite(),
            _ => false,
        });
        if non_finite {
            return Err(format!("Invalid data: NaN or Inf detected in '{}'", table.title).into());
        }
    }

    // ============================= Configuration ==========================

    let binding = CsvConfig::default();
    let configuration = configuration.unwrap_or(&binding);

    // ============================= Open File ==============================

    let mut file = File::create(output_path.as_ref())?;

    // ============================= Write Metadata =========================

    if configuration.include_metadata {
        if let Some(metadata) = &configuration.metadata {
            write_metadata_header(&mut file, metadata)?;
        }
    }

    // ============================= Write Data =============================

    let sectioned = tables.len() > 1;
    for (i, table) in tables.iter().enumerate() {
        if i > 0 {
            writeln!(file)?;
        }
        write_table(&mut file, table, sectioned, configuration)?;
    }

    info!("wrote {}", output_path.as_ref().display());
    Ok(())
}

/// Export the checkpoint comparison (one section per component)
///
/// # Errors
///
/// Fails when the report carries no error analysis, or on any
/// [`export_tables_csv`] error.
pub fn export_checkpoints_csv<P: AsRef<Path>>(
    report: &PipelineReport,
    labels: &TableLabels,
    output_path: P,
    configuration: Option<&CsvConfig>,
) -> Result<(), Box<dyn Error>> {
    let errors = report
        .errors
        .as_ref()
        .ok_or("No reference solution: checkpoint table unavailable")?;
    let tables = checkpoint_tables(errors, &report.compared(), labels);
    export_tables_csv(&tables, output_path, configuration)
}

/// Export every sample of the compared trajectories
pub fn export_trajectories_csv<P: AsRef<Path>>(
    report: &PipelineReport,
    labels: &TableLabels,
    output_path: P,
    configuration: Option<&CsvConfig>,
) -> Result<(), Box<dyn Error>> {
    let table = trajectory_table(&report.compared(), labels);
    export_tables_csv(&[table], output_path, configuration)
}

/// Export the interpolation report of one component
pub fn export_fitting_csv<P: AsRef<Path>>(
    report: &PipelineReport,
    component: usize,
    labels: &TableLabels,
    output_path: P,
    configuration: Option<&CsvConfig>,
) -> Result<(), Box<dyn Error>> {
    let fit = report
        .fits
        .get(component)
        .ok_or_else(|| format!("No fit for component {}", component))?;
    export_tables_csv(&fitting_tables(fit, labels), output_path, configuration)
}

/// Export the least-squares reports of one component (all regressed methods)
pub fn export_least_squares_csv<P: AsRef<Path>>(
    report: &PipelineReport,
    component: usize,
    output_path: P,
    configuration: Option<&CsvConfig>,
) -> Result<(), Box<dyn Error>> {
    let fit = report
        .fits
        .get(component)
        .ok_or_else(|| format!("No fit for component {}", component))?;

    let tables: Vec<Table> = fit
        .least_squares
        .iter()
        .flat_map(|(method, ls)| least_squares_tables(ls, method.label()))
        .collect();
    export_tables_csv(&tables, output_path, configuration)
}

/// Export every CSV file of a report into `directory`
///
/// Files: `checkpoints.csv` (or `trajectories.csv` without reference), then
/// `fitting_{c}.csv` and `least_squares_{c}.csv` per component `c`.
///
/// # Returns
///
/// Paths of the written files, in writing order.
pub fn export_report<P: AsRef<Path>>(
    report: &PipelineReport,
    labels: &TableLabels,
    directory: P,
    configuration: Option<&CsvConfig>,
) -> Result<Vec<PathBuf>, Box<dyn Error>> {
    let directory = directory.as_ref();
    std::fs::create_dir_all(directory)?;

    let mut written = Vec::new();

    if report.errors.is_some() {
        let path = directory.join("checkpoints.csv");
        export_checkpoints_csv(report, labels, &path, configuration)?;
        written.push(path);
    } else {
        let path = directory.join("trajectories.csv");
        export_trajectories_csv(report, labels, &path, configuration)?;
        written.push(path);
    }

    for fit in &report.fits {
        let name = labels.component(fit.component);

        let path = directory.join(format!("fitting_{}.csv", name));
        export_fitting_csv(report, fit.component, labels, &path, configuration)?;
        written.push(path);

        if !fit.least_squares.is_empty() {
            let path = directory.join(format!("least_squares_{}.csv", name));
            export_least_squares_csv(report, fit.component, &path, configuration)?;
            written.push(path);
        }
    }

    Ok(written)
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ode::{ScalarRhs, State};
    use crate::pipeline::{run, RunConfiguration};
    use crate::solver::{ReferenceSolution, StepMethod};
    use std::fs;
    use tempfile::{tempdir, NamedTempFile};

    fn decay(with_reference: bool) -> PipelineReport {
        let mut problem = ProblemSpec::new(
            ScalarRhs::new("decay", |_x, y| -y),
            State::scalar(1.0),
            0.0,
            1.0,
            0.25,
        )
        .unwrap();
        if with_reference {
            problem = problem.with_reference(ReferenceSolution::from_fn(0.0, 1.0, 0.5, |x| (-x).exp()));
        }
        let config = RunConfiguration::default()
            .with_methods(vec![StepMethod::Euler, StepMethod::Heun])
            .with_degree(2);
        run(&problem, &config).unwrap()
    }

    #[test]
    fn test_single_table_has_no_title() {
        let mut table = Table::new("Ignored", vec!["x".to_string(), "y".to_string()]);
        table.push(vec![Cell::Number(0.5), Cell::Percent(1.25)]);

        let file = NamedTempFile::new().unwrap();
        export_tables_csv(&[table], file.path(), None).unwrap();

        let content = fs::read_to_string(file.path()).unwrap();
        assert_eq!(content, "x,y\n0.500000,1.25000%\n");
    }

    #[test]
    fn test_european_format() {
        let mut table = Table::new("", vec!["x".to_string()]);
        table.push(vec![Cell::Number(0.5)]);

        let file = NamedTempFile::new().unwrap();
        export_tables_csv(&[table], file.path(), Some(&CsvConfig::european().precision(2))).unwrap();

        assert_eq!(fs::read_to_string(file.path()).unwrap(), "x\n0,50\n");
    }

    #[test]
    fn test_metadata_header() {
        let report = decay(true);
        let mut metadata = CsvMetadata::from_problem(&report.problem, "Forward Euler");
        metadata.add_custom("Refinement".to_string(), "0".to_string());
        let config = CsvConfig::default().with_metadata(metadata);

        let file = NamedTempFile::new().unwrap();
        export_checkpoints_csv(&report, &TableLabels::for_dimension(1), file.path(), Some(&config)).unwrap();

        let content = fs::read_to_string(file.path()).unwrap();
        assert!(content.starts_with("# IVP Integration Data\n"));
        assert!(content.contains("# Problem: decay"));
        assert!(content.contains("# Steps: 4"));
        assert!(content.contains("# Refinement: 0"));
        assert!(content.contains("n,x,y (actual),Euler (y),Euler (error),PC (y),PC (error)"));
    }

    #[test]
    fn test_rejects_invalid_tables() {
        let file = NamedTempFile::new().unwrap();
        assert!(export_tables_csv(&[], file.path(), None).is_err());

        let mut ragged = Table::new("ragged", vec!["a".to_string(), "b".to_string()]);
        ragged.push(vec![Cell::Number(1.0)]);
        assert!(export_tables_csv(&[ragged], file.path(), None).is_err());

        let mut nan = Table::new("nan", vec!["a".to_string()]);
        nan.push(vec![Cell::Number(f64::NAN)]);
        assert!(export_tables_csv(&[nan], file.path(), None).is_err());
    }

    #[test]
    fn test_checkpoints_need_reference() {
        let file = NamedTempFile::new().unwrap();
        let labels = TableLabels::for_dimension(1);
        assert!(export_checkpoints_csv(&decay(false), &labels, file.path(), None).is_err());
    }

    #[test]
    fn test_fitting_sections() {
        let file = NamedTempFile::new().unwrap();
        let labels = TableLabels::for_dimension(1);
        export_fitting_csv(&decay(true), 0, &labels, file.path(), None).unwrap();

        let content = fs::read_to_string(file.path()).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines[0], "Data Points");
        assert!(content.contains("\nVandermonde Matrix (V)\nx^0,x^1,x^2\n"));
        assert!(content.contains("\nLagrange Coefficients\ncoefficient,value\nb1,"));
    }

    #[test]
    fn test_export_report_files() {
        let dir = tempdir().unwrap();
        let labels = TableLabels::for_dimension(1);

        let written = export_report(&decay(false), &labels, dir.path(), None).unwrap();
        let names: Vec<String> = written
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["trajectories.csv", "fitting_y.csv", "least_squares_y.csv"]);
        assert!(written.iter().all(|p| p.exists()));
    }
}
