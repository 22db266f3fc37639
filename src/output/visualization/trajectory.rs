//! Trajectory and error figures
//!
//! - [`plot_trajectories`]: one curve per method, reference values as markers
//! - [`plot_errors`]: percent relative error of each method at the checkpoints
//!
//! The `plot_report_*` variants read their data from a [`PipelineReport`].

use std::error::Error;

use super::chart::{render, Layer};
use super::config::{PlotConfig, NO_TITLE};
use crate::output::table::TableLabels;
use crate::pipeline::PipelineReport;

/// Labelled `(x, y)` series
pub type Series<'a> = (&'a str, Vec<(f64, f64)>);

/// Plot trajectories, optionally against reference points
///
/// # Example
///
/// ```rust,ignore
/// use ivp_fit::output::visualization::plot_trajectories;
///
/// let series = vec![("Euler", euler.points(0)), ("RK4", rk4.points(0))];
/// plot_trajectories(&series, Some(&reference), "trajectories.png", None)?;
/// ```
pub fn plot_trajectories(
    series: &[Series<'_>],
    reference: Option<&[(f64, f64)]>,
    output_path: &str,
    config: Option<&PlotConfig>,
) -> Result<(), Box<dyn Error>> {
    let default_config = PlotConfig::trajectory(NO_TITLE);
    let config = config.unwrap_or(&default_config);

    let mut layers: Vec<Layer> = series
        .iter()
        .enumerate()
        .map(|(i, (label, points))| Layer::line(*label, points.clone(), config.series_color(i)))
        .collect();

    if let Some(reference) = reference {
        layers.push(Layer::markers("Reference", reference.to_vec(), config.reference_color));
    }

    render(output_path, &layers, config)
}

/// Plot percent errors as markers, one color per method
pub fn plot_errors(series: &[Series<'_>], output_path: &str, config: Option<&PlotConfig>) -> Result<(), Box<dyn Error>> {
    let default_config = PlotConfig::error(NO_TITLE);
    let config = config.unwrap_or(&default_config);

    let layers: Vec<Layer> = series
        .iter()
        .enumerate()
        .map(|(i, (label, points))| Layer::markers(*label, points.clone(), config.series_color(i)))
        .collect();

    render(output_path, &layers, config)
}

/// Reference values of one component at the checkpoints, if the report has any
pub fn reference_points(report: &PipelineReport, component: usize) -> Option<Vec<(f64, f64)>> {
    let errors = report.errors.as_ref()?;
    let table = errors.tables.iter().find(|t| t.component == component)?;
    Some(table.entries.iter().map(|e| (e.independent, e.reference)).collect())
}

/// Plot the compared trajectories of one component of a report
pub fn plot_report_trajectories(
    report: &PipelineReport,
    component: usize,
    labels: &TableLabels,
    output_path: &str,
) -> Result<(), Box<dyn Error>> {
    let compared = report.compared();
    let series: Vec<Series<'_>> = compared
        .iter()
        .map(|t| (t.method.label(), t.points(component)))
        .collect();
    let reference = reference_points(report, component);

    let name = labels.component(component);
    let config = PlotConfig::trajectory(format!("{}: {}", report.problem.name(), name))
        .axes(&labels.independent, &name);

    plot_trajectories(&series, reference.as_deref(), output_path, Some(&config))
}

/// Plot the checkpoint errors of one component of a report
///
/// # Errors
///
/// Fails when the report carries no error analysis.
pub fn plot_report_errors(
    report: &PipelineReport,
    component: usize,
    labels: &TableLabels,
    output_path: &str,
) -> Result<(), Box<dyn Error>> {
    let errors = report
        .errors
        .as_ref()
        .ok_or("No reference solution: error plot unavailable")?;

    let series: Vec<Series<'_>> = report
        .compared()
        .iter()
        .filter_map(|t| errors.table(t.method, component))
        .map(|table| {
            let points = table
                .entries
                .iter()
                .map(|e| (e.independent, e.percent_error))
                .collect();
            (table.method.label(), points)
        })
        .collect();

    let name = labels.component(component);
    let config = PlotConfig::error(format!("Percent error: {}", name)).axes(&labels.independent, "error (%)");

    plot_errors(&series, output_path, Some(&config))
}

// =================================================================================================
// Tests
// =================================================================================================
