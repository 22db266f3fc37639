//! Plain tables shared by the console and CSV reporters
//!
//! The builders below turn pipeline artifacts into [`Table`] values; how a
//! cell is spelled (precision, decimal separator, `%` suffix) is decided only
//! when the table is rendered.
//!
//! Console layout:
//!
//! ```text
//! n | x | y (actual) | Euler (y) | Euler (error)
//! ------------------------------------------------------------
//! 0 | 0.000000 | 1.000000 | 1.000000 | 0.00000%
//! ```

use std::fmt;

use nalgebra::DMatrix;

use crate::analysis::{DerivativeRow, RefinementStudy};
use crate::fitting::{CoefficientVector, LeastSquaresFit};
use crate::pipeline::{ComponentFit, ErrorReport};
use crate::solver::Trajectory;

/// Width of the console rule per column
const RULE_WIDTH: usize = 12;

/// Decimals of a percent cell
const PERCENT_PRECISION: usize = 5;

// =================================================================================================
// Cells and tables
// =================================================================================================

/// One table cell
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    /// Grid index or count
    Index(usize),

    /// Floating-point value
    Number(f64),

    /// Percent value, rendered with a `%` suffix
    Percent(f64),

    /// Free text
    Text(String),

    /// Missing value
    Empty,
}

impl Cell {
    /// Render the cell with `precision` decimals
    pub fn render(&self, precision: usize, decimal_separator: char) -> String {
        let text = match self {
            Cell::Index(i) => return i.to_string(),
            Cell::Number(v) => format!("{:.prec$}", v, prec = precision),
            Cell::Percent(v) => format!("{:.prec$}%", v, prec = PERCENT_PRECISION),
            Cell::Text(s) => return s.clone(),
            Cell::Empty => return String::new(),
        };
        if decimal_separator != '.' {
            text.replace('.', &decimal_separator.to_string())
        } else {
            text
        }
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Cell::Number(value)
    }
}

impl From<usize> for Cell {
    fn from(value: usize) -> Self {
        Cell::Index(value)
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::Text(value.to_string())
    }
}

impl From<Option<f64>> for Cell {
    fn from(value: Option<f64>) -> Self {
        value.map_or(Cell::Empty, Cell::Number)
    }
}

/// Titled table of cells
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    /// Section title
    pub title: String,

    /// Column headers
    pub headers: Vec<String>,

    /// Rows, each as long as `headers`
    pub rows: Vec<Vec<Cell>>,
}

impl Table {
    /// Empty table
    pub fn new(title: impl Into<String>, headers: Vec<String>) -> Self {
        Self {
            title: title.into(),
            headers,
            rows: Vec::new(),
        }
    }

    /// Append a row
    pub fn push(&mut self, row: Vec<Cell>) {
        self.rows.push(row);
    }

    /// Number of columns
    pub fn width(&self) -> usize {
        self.headers.len()
    }

    /// Column by header name
    pub fn column(&self, header: &str) -> Option<Vec<&Cell>> {
        let j = self.headers.iter().position(|h| h == header)?;
        Some(self.rows.iter().filter_map(|row| row.get(j)).collect())
    }

    /// Console rendering with 6-decimal numbers
    pub fn render_console(&self) -> String {
        let mut out = String::new();
        if !self.title.is_empty() {
            out.push_str(&self.title);
            out.push('\n');
        }
        out.push_str(&self.headers.join(" | "));
        out.push('\n');
        out.push_str(&"-".repeat(RULE_WIDTH * self.width()));
        out.push('\n');
        for row in &self.rows {
            let cells: Vec<String> = row.iter().map(|c| c.render(6, '.')).collect();
            out.push_str(&cells.join(" | "));
            out.push('\n');
        }
        out
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render_console())
    }
}

// =================================================================================================
// Labels
// =================================================================================================

/// Names of the independent variable and of the state components
#[derive(Debug, Clone, PartialEq)]
pub struct TableLabels {
    /// Independent variable (`x` or `t`)
    pub independent: String,

    /// One name per state component
    pub components: Vec<String>,
}

impl TableLabels {
    /// Explicit labels
    pub fn new(independent: &str, components: &[&str]) -> Self {
        Self {
            independent: independent.to_string(),
            components: components.iter().map(|c| c.to_string()).collect(),
        }
    }

    /// `x`/`y` for scalar problems, `t`/`x`/`y` for systems
    pub fn for_dimension(dimension: usize) -> Self {
        if dimension == 1 {
            Self::new("x", &["y"])
        } else {
            Self::new("t", &["x", "y"])
        }
    }

    /// Name of one component, `y{i}` when unnamed
    pub fn component(&self, i: usize) -> String {
        self.components
            .get(i)
            .cloned()
            .unwrap_or_else(|| format!("y{}", i))
    }
}

// =================================================================================================
// Builders
// =================================================================================================

/// One checkpoint table per component: reference, then value and error per method
pub fn checkpoint_tables(errors: &ErrorReport, trajectories: &[&Trajectory], labels: &TableLabels) -> Vec<Table> {
    let dimension = errors.tables.iter().map(|t| t.component + 1).max().unwrap_or(0);

    (0..dimension)
        .map(|component| {
            let name = labels.component(component);
            let mut headers = vec![
                "n".to_string(),
                labels.independent.clone(),
                format!("{} (actual)", name),
            ];
            for trajectory in trajectories {
                headers.push(format!("{} ({})", trajectory.method.label(), name));
                headers.push(format!("{} (error)", trajectory.method.label()));
            }

            let columns: Vec<_> = trajectories
                .iter()
                .filter_map(|t| errors.table(t.method, component))
                .collect();

            let mut table = Table::new(format!("Checkpoint comparison: {}", name), headers);
            for (k, independent) in errors.checkpoints.iter().enumerate() {
                let reference = columns.first().map(|c| c.entries[k].reference);
                let mut row = vec![
                    Cell::Index(k),
                    Cell::Number(*independent),
                    Cell::from(reference),
                ];
                for column in &columns {
                    let entry = &column.entries[k];
                    row.push(Cell::Number(entry.approximate));
                    row.push(Cell::Percent(entry.percent_error));
                }
                table.push(row);
            }
            table
        })
        .collect()
}

/// Every sample of every trajectory, used when no reference is available
pub fn trajectory_table(trajectories: &[&Trajectory], labels: &TableLabels) -> Table {
    let dimension = trajectories.first().map_or(0, |t| t.dimension());

    let mut headers = vec!["n".to_string(), labels.independent.clone()];
    for trajectory in trajectories {
        for component in 0..dimension {
            headers.push(format!("{} ({})", trajectory.method.label(), labels.component(component)));
        }
    }

    let mut table = Table::new("Trajectories", headers);
    let len = trajectories.iter().map(|t| t.len()).min().unwrap_or(0);
    for n in 0..len {
        let first = &trajectories[0].samples[n];
        let mut row = vec![Cell::Index(first.index), Cell::Number(first.independent)];
        for trajectory in trajectories {
            row.extend(trajectory.samples[n].state.components().into_iter().map(Cell::Number));
        }
        table.push(row);
    }
    table
}

/// Per-level values of a refinement study on the coarse grid
pub fn refinement_table(study: &RefinementStudy, labels: &TableLabels) -> Table {
    let name = labels.component(study.component);
    let has_exact = study.final_errors.is_some();
    let finest = study.levels.len().saturating_sub(1);

    let mut headers = vec![labels.independent.clone()];
    if has_exact {
        headers.push(format!("{} (actual)", name));
    }
    headers.extend(study.levels.iter().map(|l| format!("{}{}", name, l.level)));
    if has_exact {
        headers.push(format!("e_{}", finest));
    }

    let mut table = Table::new(
        format!("{} step refinement: {}", study.method.label(), name),
        headers,
    );
    for row in &study.rows {
        let mut cells = vec![Cell::Number(row.independent)];
        if has_exact {
            cells.push(Cell::from(row.exact));
        }
        cells.extend(row.values.iter().map(|v| Cell::Number(*v)));
        if has_exact {
            cells.push(row.finest_error.map_or(Cell::Empty, Cell::Percent));
        }
        table.push(cells);
    }
    table
}

/// Convergence summary of a refinement study: step size, final error and ratio per level
pub fn convergence_table(study: &RefinementStudy) -> Option<Table> {
    let errors = study.final_errors.as_ref()?;
    let ratios = study.convergence_ratios();

    let headers = ["level", "h", "final error", "ratio", "order"]
        .iter()
        .map(|h| h.to_string())
        .collect();
    let mut table = Table::new(format!("{} convergence", study.method.label()), headers);
    for (k, (level, error)) in study.levels.iter().zip(errors).enumerate() {
        let ratio = k.checked_sub(1).and_then(|i| ratios.get(i)).copied();
        table.push(vec![
            Cell::Index(level.level as usize),
            Cell::Number(level.step_size),
            Cell::Number(*error),
            Cell::from(ratio),
            Cell::from(ratio.map(f64::log2)),
        ]);
    }
    Some(table)
}

/// Finite-difference derivatives of one component
pub fn derivative_table(rows: &[DerivativeRow], labels: &TableLabels, component: usize) -> Table {
    let name = labels.component(component);
    let headers = vec![
        "n".to_string(),
        labels.independent.clone(),
        name.clone(),
        format!("{}'", name),
        format!("{}''", name),
        "scheme".to_string(),
    ];

    let mut table = Table::new(format!("Finite differences: {}", name), headers);
    for row in rows {
        table.push(vec![
            Cell::Index(row.index),
            Cell::Number(row.independent),
            Cell::Number(row.value),
            Cell::Number(row.first),
            Cell::from(row.second),
            Cell::Text(row.scheme.to_string()),
        ]);
    }
    table
}

/// `(x, y)` pairs fed to a fitter
pub fn points_table(title: &str, points: &[(f64, f64)], labels: &TableLabels, component: usize) -> Table {
    let headers = vec![labels.independent.clone(), labels.component(component)];
    let mut table = Table::new(title, headers);
    for (x, y) in points {
        table.push(vec![Cell::Number(*x), Cell::Number(*y)]);
    }
    table
}

/// Dense matrix with numbered columns (`{prefix}0`, `{prefix}1`, ...)
pub fn matrix_table(title: &str, matrix: &DMatrix<f64>, prefix: &str) -> Table {
    let headers = (0..matrix.ncols()).map(|j| format!("{}{}", prefix, j)).collect();
    let mut table = Table::new(title, headers);
    for i in 0..matrix.nrows() {
        table.push(matrix.row(i).iter().map(|v| Cell::Number(*v)).collect());
    }
    table
}

/// Coefficients labelled `{prefix}1..` (`a` for direct solves, `b` for Lagrange)
pub fn coefficient_table(title: &str, coefficients: &CoefficientVector, prefix: &str) -> Table {
    let mut table = Table::new(title, vec!["coefficient".to_string(), "value".to_string()]);
    for (label, value) in coefficients.labelled(prefix) {
        table.push(vec![Cell::Text(label), Cell::Number(value)]);
    }
    table
}

/// Sections of an interpolation report: samples, `V`, both coefficient vectors
pub fn fitting_tables(fit: &ComponentFit, labels: &TableLabels) -> Vec<Table> {
    vec![
        points_table("Data Points", &fit.samples, labels, fit.component),
        matrix_table("Vandermonde Matrix (V)", fit.vandermonde.design.matrix(), "x^"),
        coefficient_table("Vandermonde Coefficients", &fit.vandermonde.coefficients, "a"),
        coefficient_table("Lagrange Coefficients", &fit.lagrange.coefficients, "b"),
    ]
}

/// Sections of a least-squares report: `V`, `A = VᵗV`, `b = Vᵗy`, coefficients, SSE and MSE
pub fn least_squares_tables(fit: &LeastSquaresFit, title: &str) -> Vec<Table> {
    let rhs = DMatrix::from_column_slice(fit.normal_rhs.len(), 1, fit.normal_rhs.as_slice());

    let mut summary = Table::new(format!("{}: residuals", title), vec!["SSE".to_string(), "MSE".to_string()]);
    summary.push(vec![Cell::Number(fit.sse), Cell::Number(fit.mse)]);

    vec![
        matrix_table(&format!("{}: V", title), fit.design.matrix(), "x^"),
        matrix_table(&format!("{}: A = V^T V", title), &fit.normal_matrix, "c"),
        matrix_table(&format!("{}: b = V^T y", title), &rhs, "b"),
        coefficient_table(&format!("{}: coefficients", title), &fit.coefficients, "a"),
        summary,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fitting::fit_least_squares;
    use crate::ode::{ScalarRhs, State};
    use crate::pipeline::{run, RunConfiguration};
    use crate::solver::{ProblemSpec, ReferenceSolution, StepMethod};

    fn report() -> crate::pipeline::PipelineReport {
        let problem = ProblemSpec::new(ScalarRhs::new("ramp", |_x, _y| 1.0), State::scalar(0.0), 0.0, 2.0, 0.5)
            .unwrap()
            .with_reference(ReferenceSolution::scalar(vec![0.0, 1.0, 2.0]));
        let config = RunConfiguration::default().with_methods(vec![StepMethod::Euler, StepMethod::Rk4]);
        run(&problem, &config).unwrap()
    }

    #[test]
    fn test_cell_rendering() {
        assert_eq!(Cell::Number(1.0).render(6, '.'), "1.000000");
        assert_eq!(Cell::Number(1.5).render(2, ','), "1,50");
        assert_eq!(Cell::Percent(12.3456789).render(6, '.'), "12.34568%");
        assert_eq!(Cell::Index(3).render(6, '.'), "3");
        assert_eq!(Cell::from(None).render(6, '.'), "");
    }

    #[test]
    fn test_console_layout() {
        let mut table = Table::new("", vec!["a".to_string(), "b".to_string()]);
        table.push(vec![Cell::Index(0), Cell::Number(0.25)]);
        let text = table.render_console();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "a | b");
        assert_eq!(lines[1], "-".repeat(24));
        assert_eq!(lines[2], "0 | 0.250000");
    }

    #[test]
    fn test_checkpoint_table_headers() {
        let report = report();
        let errors = report.errors.as_ref().unwrap();
        let tables = checkpoint_tables(errors, &report.compared(), &TableLabels::for_dimension(1));

        assert_eq!(tables.len(), 1);
        assert_eq!(
            tables[0].headers,
            vec!["n", "x", "y (actual)", "Euler (y)", "Euler (error)", "RK4 (y)", "RK4 (error)"]
        );
        assert_eq!(tables[0].rows.len(), 3);
        // Checkpoints are numbered, not grid indices (stride 2)
        assert_eq!(tables[0].rows[2][0], Cell::Index(2));
        assert_eq!(tables[0].rows[2][1], Cell::Number(2.0));
        // Zero reference at the first checkpoint reports 0%
        assert_eq!(tables[0].rows[0][4], Cell::Percent(0.0));
    }

    #[test]
    fn test_trajectory_table_lists_every_sample() {
        let report = report();
        let table = trajectory_table(&report.compared(), &TableLabels::for_dimension(1));
        assert_eq!(table.rows.len(), 5);
        assert_eq!(table.headers, vec!["n", "x", "Euler (y)", "RK4 (y)"]);
    }

    #[test]
    fn test_fitting_sections() {
        let report = report();
        let tables = fitting_tables(&report.fits[0], &TableLabels::for_dimension(1));
        let titles: Vec<&str> = tables.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(
            titles,
            vec!["Data Points", "Vandermonde Matrix (V)", "Vandermonde Coefficients", "Lagrange Coefficients"]
        );
        assert_eq!(tables[1].headers, vec!["x^0", "x^1", "x^2", "x^3"]);
        assert_eq!(tables[3].rows[0][0], Cell::Text("b1".to_string()));
    }

    #[test]
    fn test_least_squares_sections() {
        let fit = fit_least_squares(&[(0.0, 1.0), (1.0, 2.0), (2.0, 2.5), (3.0, 4.0)], 1).unwrap();
        let tables = least_squares_tables(&fit, "RK4");
        assert_eq!(tables.len(), 5);
        assert_eq!(tables[1].rows.len(), 2);
        assert_eq!(tables[2].width(), 1);
        assert_eq!(tables[4].headers, vec!["SSE", "MSE"]);
    }
}
