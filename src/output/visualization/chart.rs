//! Shared 2-D chart renderer
//!
//! Every figure of the crate is a set of [`Layer`]s (polylines or markers)
//! drawn on one cartesian chart. The backend is picked from the file
//! extension: `.svg` → vector, anything else → bitmap.

use plotters::prelude::*;
use std::error::Error;
use std::path::Path;

use super::config::{axis_range, PlotConfig};

/// How a layer is drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LayerStyle {
    /// Connected polyline
    Line,

    /// Filled circles, no connection
    Markers,
}

/// One legend entry of a chart
#[derive(Debug, Clone)]
pub(crate) struct Layer {
    pub label: String,
    pub points: Vec<(f64, f64)>,
    pub style: LayerStyle,
    pub color: RGBColor,
}

impl Layer {
    pub fn line(label: impl Into<String>, points: Vec<(f64, f64)>, color: RGBColor) -> Self {
        Self { label: label.into(), points, style: LayerStyle::Line, color }
    }

    pub fn markers(label: impl Into<String>, points: Vec<(f64, f64)>, color: RGBColor) -> Self {
        Self { label: label.into(), points, style: LayerStyle::Markers, color }
    }
}

/// Render the layers to `output_path`
///
/// # Errors
///
/// Returns `Err` when there is nothing to draw, when a point is not finite,
/// or when the backend cannot write to `output_path`.
pub(crate) fn render(output_path: &str, layers: &[Layer], config: &PlotConfig) -> Result<(), Box<dyn Error>> {
    if layers.iter().all(|l| l.points.is_empty()) {
        return Err("No data to plot".into());
    }
    if let Some(layer) = layers
        .iter()
        .find(|l| l.points.iter().any(|(x, y)| !x.is_finite() || !y.is_finite()))
    {
        return Err(format!("Invalid data: NaN or Inf detected in series '{}'", layer.label).into());
    }

    let x_range = axis_range(layers.iter().flat_map(|l| l.points.iter().map(|p| p.0)));
    let y_range = axis_range(layers.iter().flat_map(|l| l.points.iter().map(|p| p.1)));

    let ext = Path::new(output_path)
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or("png");

    match ext {
        "svg" => {
            let backend = SVGBackend::new(output_path, (config.width, config.height));
            render_impl(backend, layers, config, x_range, y_range)
        }
        _ => {
            let backend = BitMapBackend::new(output_path, (config.width, config.height));
            render_impl(backend, layers, config, x_range, y_range)
        }
    }
}

fn render_impl<DB: DrawingBackend>(
    backend: DB,
    layers: &[Layer],
    config: &PlotConfig,
    x_range: (f64, f64),
    y_range: (f64, f64),
) -> Result<(), Box<dyn Error>>
where
    DB::ErrorType: 'static,
{
    let root = backend.into_drawing_area();
    root.fill(&config.background)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(&config.title, ("sans-serif", 40).into_font())
        .margin(15)
        .x_label_area_size(45)
        .y_label_area_size(70)
        .build_cartesian_2d(x_range.0..x_range.1, y_range.0..y_range.1)?;

    if config.show_grid {
        chart
            .configure_mesh()
            .x_desc(&config.xlabel)
            .y_desc(&config.ylabel)
            .x_label_formatter(&|x| format!("{:.2}", x))
            .y_label_formatter(&|y| format!("{:.3}", y))
            .draw()?;
    }

    for layer in layers.iter().filter(|l| !l.points.is_empty()) {
        let color = layer.color;
        match layer.style {
            LayerStyle::Line => {
                chart
                    .draw_series(LineSeries::new(
                        layer.points.iter().copied(),
                        ShapeStyle::from(&color).stroke_width(config.line_width),
                    ))?
                    .label(layer.label.as_str())
                    .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &color));
            }
            LayerStyle::Markers => {
                let size = config.point_size;
                chart
                    .draw_series(PointSeries::of_element(
                        layer.points.iter().copied(),
                        size,
                        ShapeStyle::from(&color).filled(),
                        &|coord, size, style| EmptyElement::at(coord) + Circle::new((0, 0), size, style),
                    ))?
                    .label(layer.label.as_str())
                    .legend(move |(x, y)| Circle::new((x + 10, y), 4, color.filled()));
            }
        }
    }

    chart
        .configure_series_labels()
        .background_style(&config.background.mix(0.8))
        .border_style(&BLACK)
        .draw()?;

    root.present()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    fn layers() -> Vec<Layer> {
        vec![
            Layer::line("curve", vec![(0.0, 0.0), (1.0, 1.0), (2.0, 4.0)], RED),
            Layer::markers("samples", vec![(0.0, 0.1), (2.0, 3.9)], BLACK),
        ]
    }

    #[test]
    fn test_render_png() {
        let temp = NamedTempFile::new().unwrap();
        let path = temp.path().with_extension("png");

        render(path.to_str().unwrap(), &layers(), &PlotConfig::default()).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_render_svg() {
        let temp = NamedTempFile::new().unwrap();
        let path = temp.path().with_extension("svg");

        render(path.to_str().unwrap(), &layers(), &PlotConfig::default()).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_render_rejects_empty_and_nan() {
        let temp = NamedTempFile::new().unwrap();
        let path = temp.path().with_extension("png");
        let path = path.to_str().unwrap();

        assert!(render(path, &[], &PlotConfig::default()).is_err());

        let nan = vec![Layer::line("bad", vec![(0.0, f64::NAN)], RED)];
        let err = render(path, &nan, &PlotConfig::default()).unwrap_err();
        assert!(err.to_string().contains("bad"));
    }
}
