//! Plot configuration shared across visualization modules

use plotters::prelude::*;

/// Configuration for customizing plots
///
/// # Example
///
/// ```rust,ignore
/// use ivp_fit::output::visualization::PlotConfig;
/// use plotters::prelude::*;
///
/// let mut config = PlotConfig::trajectory("RK4 vs reference");
/// config.series_colors = Some(vec![RED, BLUE, GREEN]);
/// config.width = 1920;
/// config.height = 1080;
/// ```
#[derive(Clone)]
pub struct PlotConfig {
    /// Image width in pixels (default: 1024)
    pub width: u32,

    /// Image height in pixels (default: 768)
    pub height: u32,

    /// Plot title (default: "Plot")
    pub title: String,

    /// X-axis label (default: auto-set by plot type)
    pub xlabel: String,

    /// Y-axis label (default: auto-set by plot type)
    pub ylabel: String,

    /// Color of reference points and sample markers (default: BLACK)
    pub reference_color: RGBColor,

    /// Optional colors for the series (one per method or fit)
    ///
    /// If None, uses the default palette: [RED, BLUE, GREEN, MAGENTA, CYAN, ...]
    pub series_colors: Option<Vec<RGBColor>>,

    /// Background color (default: WHITE)
    pub background: RGBColor,

    /// Line width in pixels (default: 2)
    pub line_width: u32,

    /// Marker radius in pixels (default: 4)
    pub point_size: u32,

    /// Show grid lines (default: true)
    pub show_grid: bool,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 768,
            title: "Plot".to_string(),
            xlabel: String::new(),
            ylabel: String::new(),
            reference_color: BLACK,
            series_colors: None,
            background: WHITE,
            line_width: 2,
            point_size: 4,
            show_grid: true,
        }
    }
}

/// Helper trait to accept both `String` and `None` for optional titles
pub trait IntoOptionalTitle {
    fn into_optional_title(self) -> Option<String>;
}

impl IntoOptionalTitle for &str {
    fn into_optional_title(self) -> Option<String> {
        Some(self.to_string())
    }
}

impl IntoOptionalTitle for String {
    fn into_optional_title(self) -> Option<String> {
        Some(self)
    }
}

impl<T: IntoOptionalTitle> IntoOptionalTitle for Option<T> {
    fn into_optional_title(self) -> Option<String> {
        self.and_then(|t| t.into_optional_title())
    }
}

/// Constant for no title (default title will be used)
pub const NO_TITLE: Option<&str> = None;

impl PlotConfig {
    fn with_axes(title: impl IntoOptionalTitle, default_title: &str, xlabel: &str, ylabel: &str) -> Self {
        Self {
            title: title
                .into_optional_title()
                .unwrap_or_else(|| default_title.to_string()),
            xlabel: xlabel.to_string(),
            ylabel: ylabel.to_string(),
            ..Default::default()
        }
    }

    /// Trajectories against the reference solution
    pub fn trajectory(title: impl IntoOptionalTitle) -> Self {
        Self::with_axes(title, "Trajectories", "x", "y")
    }

    /// Percent error at the checkpoints
    pub fn error(title: impl IntoOptionalTitle) -> Self {
        Self::with_axes(title, "Percent Relative Error", "x", "error (%)")
    }

    /// Polynomial fits against the samples
    pub fn fit(title: impl IntoOptionalTitle) -> Self {
        Self::with_axes(title, "Polynomial Fit", "x", "y")
    }

    /// Replace the axis labels
    pub fn axes(mut self, xlabel: &str, ylabel: &str) -> Self {
        self.xlabel = xlabel.to_string();
        self.ylabel = ylabel.to_string();
        self
    }

    /// Color for series at index i
    ///
    /// Uses custom colors if provided, otherwise falls back to the default palette
    pub(crate) fn series_color(&self, index: usize) -> RGBColor {
        if let Some(colors) = &self.series_colors {
            if index < colors.len() {
                return colors[index];
            }
        }

        let palette = [
            RED,
            BLUE,
            GREEN,
            MAGENTA,
            CYAN,
            RGBColor(255, 165, 0),  // Orange
            RGBColor(128, 0, 128),  // Purple
            RGBColor(165, 42, 42),  // Brown
        ];

        palette[index % palette.len()]
    }
}

/// Padded `(min, max)` of the values, never degenerate
pub(crate) fn axis_range<I>(values: I) -> (f64, f64)
where
    I: IntoIterator<Item = f64>,
{
    let (min, max) = values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(v), hi.max(v)));

    if min > max {
        return (0.0, 1.0);
    }
    let span = (max - min).max(1e-10 * max.abs().max(1.0));
    (min - 0.05 * span, max + 0.05 * span)
}

// =================================================================================================
// Tests
// =================================================================================================
