//! Polynomial fit figures
//!
//! Each fitted polynomial is drawn as a smooth curve over the sampled range,
//! with the samples it was fitted on (and optionally the reference values)
//! as markers.

use std::error::Error;

use super::chart::{render, Layer};
use super::config::{PlotConfig, NO_TITLE};
use super::trajectory::reference_points;
use crate::fitting::CoefficientVector;
use crate::output::table::TableLabels;
use crate::pipeline::PipelineReport;

/// Evaluation points per curve
const CURVE_RESOLUTION: usize = 200;

/// `resolution` evenly spaced evaluations of `coefficients` on `[start, end]`
pub fn sample_polynomial(coefficients: &CoefficientVector, start: f64, end: f64, resolution: usize) -> Vec<(f64, f64)> {
    if resolution < 2 {
        return vec![(start, coefficients.evaluate(start))];
    }
    let dx = (end - start) / (resolution - 1) as f64;
    (0..resolution)
        .map(|i| {
            let x = start + i as f64 * dx;
            (x, coefficients.evaluate(x))
        })
        .collect()
}

/// Plot fitted polynomials against their samples
///
/// The curves span the range of the samples and of the reference points.
pub fn plot_polynomial_fits(
    samples: &[(f64, f64)],
    curves: &[(&str, &CoefficientVector)],
    reference: Option<&[(f64, f64)]>,
    output_path: &str,
    config: Option<&PlotConfig>,
) -> Result<(), Box<dyn Error>> {
    if samples.is_empty() {
        return Err("No samples to plot".into());
    }

    let default_config = PlotConfig::fit(NO_TITLE);
    let config = config.unwrap_or(&default_config);

    let xs = samples
        .iter()
        .chain(reference.unwrap_or_default())
        .map(|p| p.0);
    let start = xs.clone().fold(f64::INFINITY, f64::min);
    let end = xs.fold(f64::NEG_INFINITY, f64::max);

    let mut layers: Vec<Layer> = curves
        .iter()
        .enumerate()
        .map(|(i, (label, coefficients))| {
            Layer::line(
                *label,
                sample_polynomial(coefficients, start, end, CURVE_RESOLUTION),
                config.series_color(i),
            )
        })
        .collect();

    layers.push(Layer::markers("Samples", samples.to_vec(), config.reference_color));
    if let Some(reference) = reference {
        layers.push(Layer::markers("Reference", reference.to_vec(), config.series_color(curves.len())));
    }

    render(output_path, &layers, config)
}

/// Plot the Vandermonde, Lagrange and least-squares fits of one component of a report
pub fn plot_report_fits(
    report: &PipelineReport,
    component: usize,
    labels: &TableLabels,
    output_path: &str,
) -> Result<(), Box<dyn Error>> {
    let fit = report
        .fits
        .get(component)
        .ok_or_else(|| format!("No fit for component {}", component))?;

    let least_squares: Vec<(String, &CoefficientVector)> = fit
        .least_squares
        .iter()
        .map(|(method, ls)| (format!("Least squares ({})", method.label()), &ls.coefficients))
        .collect();

    let mut curves: Vec<(&str, &CoefficientVector)> = vec![
        ("Vandermonde", &fit.vandermonde.coefficients),
        ("Lagrange", &fit.lagrange.coefficients),
    ];
    curves.extend(least_squares.iter().map(|(label, c)| (label.as_str(), *c)));

    let reference = reference_points(report, component);
    let name = labels.component(component);
    let config = PlotConfig::fit(format!(
        "Degree {} fit of {} ({})",
        report.config.degree,
        name,
        report.config.fit_method.label()
    ))
    .axes(&labels.independent, &name);

    plot_polynomial_fits(&fit.samples, &curves, reference.as_deref(), output_path, Some(&config))
}

// =================================================================================================
// Tests
// =================================================================================================
