//! Plot configuration shared across visualization functions
//!
//! [`PlotConfig`] styles the single-axes time-course plot;
//! [`FigureConfig`] and [`PanelSpec`] describe stacked multi-panel
//! figures; [`EventMarkers`] carries discrete overlay annotations such
//! as dose administrations.

use plotters::prelude::*;

// =================================================================================================
// Single-axes plot configuration
// =================================================================================================

/// Configuration for single-axes time-course plots.
///
/// # Example
///
/// ```
/// use kinet_rs::output::PlotConfig;
///
/// let mut config = PlotConfig::timecourse("First-order decay");
/// config.width = 1280;
/// config.height = 720;
/// ```
#[derive(Clone)]
pub struct PlotConfig {
    /// Image width in pixels (default: 1024)
    pub width: u32,

    /// Image height in pixels (default: 768)
    pub height: u32,

    /// Plot title (default: "Timecourse")
    pub title: String,

    /// X-axis label (default: "Time")
    pub xlabel: String,

    /// Y-axis label (default: "Concentration")
    pub ylabel: String,

    /// Optional colors for the plotted series (one per column)
    ///
    /// If None, uses the default palette: [RED, BLUE, GREEN, MAGENTA, ...]
    pub series_colors: Option<Vec<RGBColor>>,

    /// Background color (default: WHITE)
    pub background: RGBColor,

    /// Line width in pixels (default: 2)
    pub line_width: u32,

    /// Show grid lines (default: true)
    pub show_grid: bool,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 768,
            title: "Timecourse".to_string(),
            xlabel: "Time".to_string(),
            ylabel: "Concentration".to_string(),
            series_colors: None,
            background: WHITE,
            line_width: 2,
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
///
/// # Example
///
/// ```
/// use kinet_rs::output::{PlotConfig, NO_TITLE};
///
/// let config = PlotConfig::timecourse(NO_TITLE);
/// assert_eq!(config.title, "Timecourse");
/// ```
pub const NO_TITLE: Option<&str> = None;

impl PlotConfig {
    /// Create config for time-course plots with optional custom title
    ///
    /// # Arguments
    ///
    /// * `title` - Custom title (String, &str) or None for default
    ///
    /// # Examples
    ///
    /// ```
    /// use kinet_rs::output::PlotConfig;
    ///
    /// // With custom title (no Some() needed!)
    /// let config = PlotConfig::timecourse("Decay dynamics");
    /// assert_eq!(config.title, "Decay dynamics");
    /// ```
    pub fn timecourse(title: impl IntoOptionalTitle) -> Self {
        let mut config = Self::default();
        config.title = title
            .into_optional_title()
            .unwrap_or_else(|| "Timecourse".to_string());
        config
    }

    /// Create config with custom series colors
    ///
    /// # Example
    ///
    /// ```
    /// use kinet_rs::output::PlotConfig;
    /// use plotters::prelude::*;
    ///
    /// let config = PlotConfig::series_colors(vec![RED, BLUE, GREEN]);
    /// ```
    pub fn series_colors(colors: Vec<RGBColor>) -> Self {
        let mut config = Self::default();
        config.series_colors = Some(colors);
        config
    }

    /// Get color for the series at index i
    ///
    /// Uses custom colors if provided, otherwise falls back to default palette
    pub(crate) fn get_series_color(&self, series_index: usize) -> RGBColor {
        if let Some(ref colors) = self.series_colors {
            if series_index < colors.len() {
                return colors[series_index];
            }
        }

        // Default palette
        let default_colors = [
            RED,
            BLUE,
            GREEN,
            MAGENTA,
            CYAN,
            BLACK,
            RGBColor(255, 165, 0),  // Orange
            RGBColor(128, 0, 128),  // Purple
        ];

        default_colors[series_index % default_colors.len()]
    }
}

// =================================================================================================
// Event markers
// =================================================================================================

/// Discrete event annotations drawn as cross markers on a panel.
///
/// Pure presentation data: nothing couples the markers to the model or the
/// integrator. The canonical use is dose administrations overlaid on a
/// pharmacokinetics panel, with the displayed y-value a scaled dose amount
/// chosen to sit inside the panel's y-range.
#[derive(Clone)]
pub struct EventMarkers {
    /// Event times, in the result table's native time unit
    pub times: Vec<f64>,

    /// Displayed y-value per event (same length as `times`)
    pub values: Vec<f64>,

    /// Legend label
    pub label: String,

    /// Marker color (default: orange)
    pub color: RGBColor,

    /// Marker half-size in pixels (default: 6)
    pub size: u32,
}

impl EventMarkers {
    /// Markers at `times` with explicit display values
    pub fn new(times: Vec<f64>, values: Vec<f64>, label: impl Into<String>) -> Self {
        Self {
            times,
            values,
            label: label.into(),
            color: RGBColor(255, 165, 0),
            size: 6,
        }
    }

    /// Markers for dose events, display value = amount * `display_scale`
    ///
    /// The scale maps dose amounts into the panel's y-range (e.g. 0.1 shows
    /// a 1200 mg dose at y = 120 on a 0..150 concentration axis).
    pub fn doses(times: &[f64], amounts: &[f64], display_scale: f64) -> Self {
        Self::new(
            times.to_vec(),
            amounts.iter().map(|a| a * display_scale).collect(),
            "Dose administrations",
        )
    }
}

// =================================================================================================
// Multi-panel figure configuration
// =================================================================================================

/// One panel of a stacked figure: a result column on a fixed y-axis.
///
/// # Example
///
/// ```
/// use kinet_rs::output::PanelSpec;
/// use plotters::prelude::*;
///
/// let panel = PanelSpec::new("C", "PK [mcg/ml]")
///     .color(MAGENTA)
///     .y_range(0.0, 150.0);
/// ```
#[derive(Clone)]
pub struct PanelSpec {
    /// Result-table column to plot
    pub column: String,

    /// Y-axis label
    pub ylabel: String,

    /// Optional legend entry for the curve
    pub label: Option<String>,

    /// Curve color (default: RED)
    pub color: RGBColor,

    /// Fixed y-range; None auto-scales to the data
    pub y_range: Option<(f64, f64)>,

    /// Number of y-axis tick labels (default: 3)
    pub n_y_ticks: usize,

    /// Optional event-marker overlay
    pub markers: Option<EventMarkers>,
}

impl PanelSpec {
    /// Panel with default styling (red curve, auto range, no markers)
    pub fn new(column: impl Into<String>, ylabel: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            ylabel: ylabel.into(),
            label: None,
            color: RED,
            y_range: None,
            n_y_ticks: 3,
            markers: None,
        }
    }

    /// Set the curve color
    pub fn color(mut self, color: RGBColor) -> Self {
        self.color = color;
        self
    }

    /// Fix the y-range
    pub fn y_range(mut self, min: f64, max: f64) -> Self {
        self.y_range = Some((min, max));
        self
    }

    /// Set the number of y-axis tick labels
    pub fn y_ticks(mut self, n: usize) -> Self {
        self.n_y_ticks = n;
        self
    }

    /// Add a legend entry for the curve
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Overlay event markers on this panel
    pub fn markers(mut self, markers: EventMarkers) -> Self {
        self.markers = Some(markers);
        self
    }
}

/// Figure-level configuration for multi-panel time-course plots.
#[derive(Clone)]
pub struct FigureConfig {
    /// Image width in pixels (default: 1000)
    pub width: u32,

    /// Image height in pixels (default: 1200)
    pub height: u32,

    /// Figure title, drawn on the first panel (default: empty)
    pub title: String,

    /// X-axis label, drawn on the last panel (default: "Time")
    pub xlabel: String,

    /// Divisor applied to time values before plotting, e.g. 7.0 to
    /// display days as weeks (default: 1.0)
    pub x_scale: f64,

    /// Fixed x-range in rescaled units; None spans the data
    pub x_range: Option<(f64, f64)>,

    /// Number of x-axis tick labels (default: 10)
    pub n_x_ticks: usize,

    /// Background color (default: WHITE)
    pub background: RGBColor,

    /// Curve line width in pixels (default: 2)
    pub line_width: u32,

    /// Show grid lines (default: true)
    pub show_grid: bool,
}

impl Default for FigureConfig {
    fn default() -> Self {
        Self {
            width: 1000,
            height: 1200,
            title: String::new(),
            xlabel: "Time".to_string(),
            x_scale: 1.0,
            x_range: None,
            n_x_ticks: 10,
            background: WHITE,
            line_width: 2,
            show_grid: true,
        }
    }
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plot_config_default() {
        let config = PlotConfig::default();
        assert_eq!(config.width, 1024);
        assert_eq!(config.height, 768);
        assert!(config.show_grid);
    }

    #[test]
    fn test_timecourse_config_default() {
        let config = PlotConfig::timecourse(NO_TITLE);
        assert_eq!(config.title, "Timecourse");
        assert_eq!(config.xlabel, "Time");
    }

    #[test]
    fn test_timecourse_config_with_str() {
        let config = PlotConfig::timecourse("Decay dynamics");
        assert_eq!(config.title, "Decay dynamics");
    }

    #[test]
    fn test_timecourse_config_with_string() {
        let title = format!("Run {}", 3);
        let config = PlotConfig::timecourse(title);
        assert_eq!(config.title, "Run 3");
    }

    #[test]
    fn test_get_series_color_default_palette() {
        let config = PlotConfig::default();
        assert_eq!(config.get_series_color(0), RED);
        assert_eq!(config.get_series_color(1), BLUE);
        assert_eq!(config.get_series_color(8), RED); // Wraparound
    }

    #[test]
    fn test_get_series_color_custom() {
        let config = PlotConfig::series_colors(vec![CYAN]);
        assert_eq!(config.get_series_color(0), CYAN);
        // Past the end of the custom list: fall back to the palette
        assert_eq!(config.get_series_color(1), BLUE);
    }

    #[test]
    fn test_dose_markers_scaling() {
        let markers = EventMarkers::doses(&[0.0, 7.0], &[450.0, 1200.0], 0.1);
        assert_eq!(markers.times, vec![0.0, 7.0]);
        assert!((markers.values[0] - 45.0).abs() < 1e-12);
        assert!((markers.values[1] - 120.0).abs() < 1e-12);
    }

    #[test]
    fn test_panel_spec_builder() {
        let panel = PanelSpec::new("C", "PK [mcg/ml]")
            .color(MAGENTA)
            .y_range(0.0, 150.0)
            .label("Central concentration");
        assert_eq!(panel.column, "C");
        assert_eq!(panel.y_range, Some((0.0, 150.0)));
        assert_eq!(panel.label.as_deref(), Some("Central concentration"));
        assert_eq!(panel.n_y_ticks, 3);
    }

    #[test]
    fn test_figure_config_default() {
        let config = FigureConfig::default();
        assert_eq!(config.x_scale, 1.0);
        assert!(config.x_range.is_none());
        assert_eq!(config.n_x_ticks, 10);
    }
}
