//! Time-course plotting for simulation results
//!
//! Plots result-table columns against the `time` column.
//!
//! # Available functions
//!
//! - [`plot_timecourse`]        — Selected columns overlaid on one pair of axes
//! - [`plot_timecourse_panels`] — Vertically stacked panels, one column each,
//!   with per-panel y-ranges and optional event markers
//!
//! # Usage
//!
//! ```rust,ignore
//! use kinet_rs::output::{plot_timecourse, plot_timecourse_panels, PanelSpec};
//!
//! // Overlay two species on one axes
//! plot_timecourse(&table, &["S1", "S2"], "decay.png", None)?;
//!
//! // Stacked panels with hand-tuned ranges
//! let panels = vec![
//!     PanelSpec::new("C", "PK [mcg/ml]").y_range(0.0, 150.0),
//!     PanelSpec::new("VWD", "Injury [a.u.]").y_range(0.0, 1.0),
//! ];
//! plot_timecourse_panels(&table, &panels, "figures/case1.png", None)?;
//! ```
//!
//! The output format is chosen by file extension: `.svg` renders a vector
//! image, anything else goes through the bitmap backend. Missing parent
//! directories are created; re-rendering to the same path overwrites.

use plotters::prelude::*;
use std::error::Error;
use std::path::Path;

use crate::engine::ResultTable;
use crate::error::KinetError;
use super::config::{FigureConfig, PanelSpec, PlotConfig, NO_TITLE};

// =================================================================================================
// Public API
// =================================================================================================

/// Plot selected columns against time on a single pair of axes
///
/// Every name in `columns` must exist in the table; the y-range spans the
/// maximum over all selected columns.
///
/// # Arguments
///
/// * `table`       — Simulation result table (must carry a `time` column)
/// * `columns`     — Column names to plot, one curve per name
/// * `output_path` — Output file path (`.png` → bitmap, `.svg` → vector)
/// * `config`      — Optional plot configuration; `None` uses defaults
///
/// # Errors
///
/// - [`KinetError::UnknownColumn`] when the table lacks `time` or a
///   requested column
/// - [`KinetError::Render`] when the backend cannot write to `output_path`
///
/// # Example
///
/// ```rust,ignore
/// use kinet_rs::output::plot_timecourse;
///
/// let table = runner.run(&mut network, &grid, None)?;
/// plot_timecourse(&table, &["S1", "S2"], "decay.png", None)?;
/// ```
pub fn plot_timecourse(
    table: &ResultTable,
    columns: &[&str],
    output_path: impl AsRef<Path>,
    config: Option<&PlotConfig>,
) -> Result<(), KinetError> {
    let output_path = output_path.as_ref();

    // Resolve all columns before touching the filesystem
    let time = table.time()?;
    let series: Vec<(&str, &[f64])> = columns
        .iter()
        .map(|name| table.column(name).map(|data| (*name, data)))
        .collect::<Result<_, _>>()?;

    if series.is_empty() {
        return Err(KinetError::Render("no columns selected".to_string()));
    }

    let default_config = PlotConfig::timecourse(NO_TITLE);
    let config = config.unwrap_or(&default_config);

    let max_time = time.last().copied().unwrap_or(1.0);
    let max_value = series
        .iter()
        .flat_map(|(_, data)| data.iter())
        .cloned()
        .fold(f64::NEG_INFINITY, f64::max)
        .max(1e-10);

    ensure_parent_dir(output_path)?;
    let path_str = path_to_str(output_path)?;

    let result = match extension(output_path) {
        "svg" => {
            let backend = SVGBackend::new(path_str, (config.width, config.height));
            plot_timecourse_impl(backend, time, &series, config, max_time, max_value)
        }
        _ => {
            let backend = BitMapBackend::new(path_str, (config.width, config.height));
            plot_timecourse_impl(backend, time, &series, config, max_time, max_value)
        }
    };

    result.map_err(|e| KinetError::Render(e.to_string()))
}

/// Plot one column per panel, panels stacked vertically with a shared x-axis
///
/// Each [`PanelSpec`] fixes its own y-range and tick count, so curves with
/// very different magnitudes stay readable. The figure title is drawn above
/// the first panel and the x-axis label below the last. Event markers
/// (e.g. dose administrations) are drawn as crosses on the panels that
/// carry them.
///
/// # Arguments
///
/// * `table`       — Simulation result table (must carry a `time` column)
/// * `panels`      — Panel descriptions, top to bottom
/// * `output_path` — Output file path (`.png` or `.svg`)
/// * `config`      — Optional figure configuration; `None` uses defaults
///
/// # Errors
///
/// - [`KinetError::UnknownColumn`] when a panel names a missing column
/// - [`KinetError::Render`] when `panels` is empty or the backend fails
///
/// # Example
///
/// ```rust,ignore
/// use kinet_rs::output::{plot_timecourse_panels, EventMarkers, PanelSpec};
/// use plotters::prelude::*;
///
/// let doses = EventMarkers::doses(&dose_times, &dose_amounts, 0.1);
/// let panels = vec![
///     PanelSpec::new("C", "PK [mcg/ml]")
///         .color(MAGENTA)
///         .y_range(0.0, 150.0)
///         .markers(doses),
///     PanelSpec::new("VWD", "Vascular injury [a.u.]")
///         .y_range(0.0, 1.0),
/// ];
/// plot_timecourse_panels(&table, &panels, "figures/case1.png", None)?;
/// ```
pub fn plot_timecourse_panels(
    table: &ResultTable,
    panels: &[PanelSpec],
    output_path: impl AsRef<Path>,
    config: Option<&FigureConfig>,
) -> Result<(), KinetError> {
    let output_path = output_path.as_ref();

    if panels.is_empty() {
        return Err(KinetError::Render("no panels specified".to_string()));
    }

    // Resolve every panel column up-front
    let time = table.time()?;
    let panel_data: Vec<&[f64]> = panels
        .iter()
        .map(|p| table.column(&p.column))
        .collect::<Result<_, _>>()?;

    let default_config = FigureConfig::default();
    let config = config.unwrap_or(&default_config);

    ensure_parent_dir(output_path)?;
    let path_str = path_to_str(output_path)?;

    let result = match extension(output_path) {
        "svg" => {
            let backend = SVGBackend::new(path_str, (config.width, config.height));
            plot_panels_impl(backend, time, panels, &panel_data, config)
        }
        _ => {
            let backend = BitMapBackend::new(path_str, (config.width, config.height));
            plot_panels_impl(backend, time, panels, &panel_data, config)
        }
    };

    result.map_err(|e| KinetError::Render(e.to_string()))
}

// =================================================================================================
// Path helpers
// =================================================================================================

/// Create the parent directory of `path` if it does not exist yet.
/// `create_dir_all` succeeds when the directory is already there, so
/// repeated renders to the same location are harmless.
fn ensure_parent_dir(path: &Path) -> Result<(), KinetError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

fn path_to_str(path: &Path) -> Result<&str, KinetError> {
    path.to_str()
        .ok_or_else(|| KinetError::Render("output path is not valid UTF-8".to_string()))
}

fn extension(path: &Path) -> &str {
    path.extension().and_then(|s| s.to_str()).unwrap_or("png")
}

// =================================================================================================
// Private Plot Implementations
// =================================================================================================

/// Render overlaid time-course curves with the given drawing backend
fn plot_timecourse_impl<DB: DrawingBackend>(
    backend: DB,
    time: &[f64],
    series: &[(&str, &[f64])],
    config: &PlotConfig,
    max_time: f64,
    max_value: f64,
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
        .y_label_area_size(60)
        .build_cartesian_2d(0.0..max_time, 0.0..(max_value * 1.1))?;

    if config.show_grid {
        chart
            .configure_mesh()
            .x_desc(&config.xlabel)
            .y_desc(&config.ylabel)
            .x_label_formatter(&|x| format!("{:.0}", x))
            .y_label_formatter(&|y| format!("{:.3}", y))
            .draw()?;
    }

    for (idx, (label, data)) in series.iter().enumerate() {
        let color = config.get_series_color(idx);

        chart
            .draw_series(LineSeries::new(
                time.iter().zip(data.iter()).map(|(t, v)| (*t, *v)),
                ShapeStyle::from(&color).stroke_width(config.line_width),
            ))?
            .label(*label)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &color));
    }

    chart
        .configure_series_labels()
        .background_style(&config.background.mix(0.8))
        .border_style(&BLACK)
        .draw()?;

    root.present()?;
    Ok(())
}

/// Render stacked panels — one chart per panel, shared x-range
///
/// Layout decisions:
///
/// 1. The drawing area is split evenly into `panels.len()` rows.
/// 2. The x-range is shared by every panel; times are divided by
///    `config.x_scale` so e.g. day-based simulations can display weeks.
/// 3. X tick labels are drawn on every panel (each chart owns its mesh),
///    but the axis description appears only on the bottom panel and the
///    figure title only on the top one.
/// 4. Event markers are drawn as crosses after the curve, so they sit on
///    top of it.
fn plot_panels_impl<DB: DrawingBackend>(
    backend: DB,
    time: &[f64],
    panels: &[PanelSpec],
    panel_data: &[&[f64]],
    config: &FigureConfig,
) -> Result<(), Box<dyn Error>>
where
    DB::ErrorType: 'static,
{
    let root = backend.into_drawing_area();
    root.fill(&config.background)?;

    let scaled_time: Vec<f64> = time.iter().map(|t| t / config.x_scale).collect();
    let (x_min, x_max) = config.x_range.unwrap_or_else(|| {
        let last = scaled_time.last().copied().unwrap_or(1.0);
        (0.0, last)
    });

    let areas = root.split_evenly((panels.len(), 1));
    let n_panels = panels.len();

    for (idx, ((panel, data), area)) in panels
        .iter()
        .zip(panel_data.iter())
        .zip(areas.iter())
        .enumerate()
    {
        let (y_min, y_max) = panel.y_range.unwrap_or_else(|| {
            let max = data
                .iter()
                .cloned()
                .fold(f64::NEG_INFINITY, f64::max)
                .max(1e-10);
            (0.0, max * 1.1)
        });

        let mut builder = ChartBuilder::on(area);
        builder
            .margin(10)
            .x_label_area_size(35)
            .y_label_area_size(60);
        if idx == 0 && !config.title.is_empty() {
            builder.caption(&config.title, ("sans-serif", 30).into_font());
        }

        let mut chart = builder.build_cartesian_2d(x_min..x_max, y_min..y_max)?;

        let mut mesh = chart.configure_mesh();
        mesh.x_labels(config.n_x_ticks)
            .y_labels(panel.n_y_ticks)
            .y_desc(&panel.ylabel)
            .x_label_formatter(&|x| format!("{:.0}", x))
            .y_label_formatter(&|y| format!("{:.1}", y));
        if idx == n_panels - 1 {
            mesh.x_desc(&config.xlabel);
        }
        if !config.show_grid {
            mesh.disable_mesh();
        }
        mesh.draw()?;

        let color = panel.color;
        let curve = chart.draw_series(LineSeries::new(
            scaled_time.iter().zip(data.iter()).map(|(t, v)| (*t, *v)),
            ShapeStyle::from(&color).stroke_width(config.line_width),
        ))?;
        if let Some(ref label) = panel.label {
            curve
                .label(label.clone())
                .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &color));
        }

        if let Some(ref markers) = panel.markers {
            let marker_color = markers.color;
            let marker_size = markers.size as i32;
            chart
                .draw_series(
                    markers
                        .times
                        .iter()
                        .zip(markers.values.iter())
                        .map(|(t, v)| {
                            Cross::new(
                                (t / config.x_scale, *v),
                                marker_size,
                                ShapeStyle::from(&marker_color).stroke_width(2),
                            )
                        }),
                )?
                .label(markers.label.clone())
                .legend(move |(x, y)| {
                    Cross::new((x + 10, y), 4, ShapeStyle::from(&marker_color).stroke_width(2))
                });
        }

        if panel.label.is_some() || panel.markers.is_some() {
            chart
                .configure_series_labels()
                .background_style(&config.background.mix(0.8))
                .border_style(&BLACK)
                .draw()?;
        }
    }

    root.present()?;
    Ok(())
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{Runner, TimeGrid};
    use crate::model::load_network;
    use crate::output::EventMarkers;

    const DECAY: &str = "S1 -> S2; k1*S1; k1 = 0.1; S1 = 10";

    fn sample_table() -> ResultTable {
        let mut network = load_network(DECAY).unwrap();
        let grid = TimeGrid::with_steps(0.0, 50.0, 100).unwrap();
        Runner::default().run(&mut network, &grid, None).unwrap()
    }

    // SVG in tests: the vector backend needs no font rasterization, so the
    // assertions hold on headless machines too.

    #[test]
    fn test_plot_timecourse_svg() {
        let table = sample_table();
        let path = std::env::temp_dir().join("kinet_timecourse_basic.svg");
        plot_timecourse(&table, &["S1", "S2"], &path, None).unwrap();
        assert!(path.exists());
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_plot_timecourse_custom_config() {
        let table = sample_table();
        let path = std::env::temp_dir().join("kinet_timecourse_custom.svg");
        let mut config = PlotConfig::timecourse("Decay dynamics");
        config.series_colors = Some(vec![BLUE, GREEN]);
        plot_timecourse(&table, &["S1", "S2"], &path, Some(&config)).unwrap();
        assert!(path.exists());
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_plot_timecourse_unknown_column() {
        let table = sample_table();
        let path = std::env::temp_dir().join("kinet_timecourse_unknown.svg");
        let err = plot_timecourse(&table, &["S1", "S9"], &path, None).unwrap_err();
        assert!(matches!(err, KinetError::UnknownColumn(_)));
        // The file must not be created when column resolution fails
        assert!(!path.exists());
    }

    #[test]
    fn test_plot_timecourse_creates_parent_dirs() {
        let table = sample_table();
        let dir = std::env::temp_dir().join("kinet_plot_nested/deeper");
        let path = dir.join("plot.svg");
        std::fs::remove_dir_all(std::env::temp_dir().join("kinet_plot_nested")).ok();

        plot_timecourse(&table, &["S1"], &path, None).unwrap();
        assert!(path.exists());

        // Rendering again into the existing directory must also succeed
        plot_timecourse(&table, &["S1"], &path, None).unwrap();
        std::fs::remove_dir_all(std::env::temp_dir().join("kinet_plot_nested")).ok();
    }

    #[test]
    fn test_plot_panels_svg() {
        let table = sample_table();
        let path = std::env::temp_dir().join("kinet_panels_basic.svg");
        let panels = vec![
            PanelSpec::new("S1", "Substrate").y_range(0.0, 12.0),
            PanelSpec::new("S2", "Product"),
        ];
        plot_timecourse_panels(&table, &panels, &path, None).unwrap();
        assert!(path.exists());
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_plot_panels_with_markers_and_scaling() {
        let table = sample_table();
        let path = std::env::temp_dir().join("kinet_panels_markers.svg");

        let markers = EventMarkers::doses(&[0.0, 10.0, 20.0], &[450.0, 900.0, 1200.0], 0.01);
        let panels = vec![PanelSpec::new("S1", "Substrate")
            .y_range(0.0, 15.0)
            .label("S1 concentration")
            .markers(markers)];

        let mut config = FigureConfig::default();
        config.title = "Dosing schedule".to_string();
        config.xlabel = "Weeks".to_string();
        config.x_scale = 7.0;
        config.x_range = Some((0.0, 8.0));

        plot_timecourse_panels(&table, &panels, &path, Some(&config)).unwrap();
        assert!(path.exists());
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_plot_panels_empty_is_error() {
        let table = sample_table();
        let path = std::env::temp_dir().join("kinet_panels_empty.svg");
        let err = plot_timecourse_panels(&table, &[], &path, None).unwrap_err();
        assert!(matches!(err, KinetError::Render(_)));
    }

    #[test]
    fn test_plot_panels_unknown_column() {
        let table = sample_table();
        let path = std::env::temp_dir().join("kinet_panels_unknown.svg");
        let panels = vec![PanelSpec::new("S9", "Missing")];
        let err = plot_timecourse_panels(&table, &panels, &path, None).unwrap_err();
        assert!(matches!(err, KinetError::UnknownColumn(_)));
        assert!(!path.exists());
    }
}
