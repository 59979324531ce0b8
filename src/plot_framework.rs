// src/plot_framework.rs

use plotters::backend::BitMapBackend;
use plotters::chart::{ChartBuilder, ChartContext, SeriesLabelPosition};
use plotters::coord::cartesian::Cartesian2d;
use plotters::coord::types::RangedCoordf64;
use plotters::coord::Shift;
use plotters::drawing::{DrawingArea, IntoDrawingArea};
use plotters::element::{Circle, ErrorBar, PathElement, Text};
use plotters::series::LineSeries;
use plotters::style::colors::{BLACK, RED, WHITE};
use plotters::style::{Color, IntoFont, RGBColor};

use std::error::Error;
use std::fs;
use std::ops::Range;
use std::path::PathBuf;

use crate::constants::{
    COLOR_ERROR_BAR, DASH_SEGMENTS, FONT_SIZE_AXIS_LABEL, FONT_SIZE_CHART_TITLE, FONT_SIZE_LEGEND,
    FONT_SIZE_MAIN_TITLE, FONT_SIZE_MESSAGE, LINE_WIDTH_ERROR_BAR, LINE_WIDTH_LEGEND,
    LINE_WIDTH_PLOT, MARKER_SIZE, PLOT_HEIGHT, PLOT_WIDTH,
};

type Chart<'a, 'b> = ChartContext<'a, BitMapBackend<'b>, Cartesian2d<RangedCoordf64, RangedCoordf64>>;

/// Image size, fonts and destination shared by every plot of one invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderConfig {
    pub width: u32,
    pub height: u32,
    pub output_dir: PathBuf,
    pub font_size_main_title: i32,
    pub font_size_chart_title: i32,
    pub font_size_axis_label: i32,
    pub font_size_legend: i32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: PLOT_WIDTH,
            height: PLOT_HEIGHT,
            output_dir: PathBuf::from("."),
            font_size_main_title: FONT_SIZE_MAIN_TITLE,
            font_size_chart_title: FONT_SIZE_CHART_TITLE,
            font_size_axis_label: FONT_SIZE_AXIS_LABEL,
            font_size_legend: FONT_SIZE_LEGEND,
        }
    }
}

impl RenderConfig {
    pub fn output_path(&self, file_name: &str) -> PathBuf {
        self.output_dir.join(file_name)
    }

    /// Creates the output directory and returns the path for `file_name` inside it.
    pub fn prepare_output(&self, file_name: &str) -> Result<PathBuf, Box<dyn Error>> {
        fs::create_dir_all(&self.output_dir).map_err(|e| {
            format!(
                "Failed to create output directory '{}': {e}",
                self.output_dir.display()
            )
        })?;
        Ok(self.output_path(file_name))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AxisScale {
    #[default]
    Linear,
    /// Values are plotted as log10; non-positive values are dropped.
    Log,
}

impl AxisScale {
    pub fn project(self, value: f64) -> Option<f64> {
        let v = match self {
            AxisScale::Linear => value,
            AxisScale::Log if value > 0.0 => value.log10(),
            AxisScale::Log => return None,
        };
        v.is_finite().then_some(v)
    }

    /// Tick label for a coordinate in plot space.
    pub fn tick_label(self, coord: f64) -> String {
        match self {
            AxisScale::Linear => format_axis_value(coord),
            AxisScale::Log => format_axis_value(10f64.powf(coord)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SeriesStyle {
    #[default]
    Line,
    Markers,
    Dashed,
}

#[derive(Debug, Clone)]
pub struct PlotSeries {
    pub data: Vec<(f64, f64)>,
    pub label: String,
    pub color: RGBColor,
    pub stroke_width: u32,
    pub style: SeriesStyle,
    /// Symmetric vertical error per point, aligned with `data`.
    pub y_errors: Option<Vec<f64>>,
    /// Symmetric horizontal error per point, aligned with `data`.
    pub x_errors: Option<Vec<f64>>,
}

impl PlotSeries {
    pub fn line(data: Vec<(f64, f64)>, label: impl Into<String>, color: RGBColor) -> Self {
        Self {
            data,
            label: label.into(),
            color,
            stroke_width: LINE_WIDTH_PLOT,
            style: SeriesStyle::Line,
            y_errors: None,
            x_errors: None,
        }
    }

    pub fn markers(data: Vec<(f64, f64)>, label: impl Into<String>, color: RGBColor) -> Self {
        Self {
            style: SeriesStyle::Markers,
            ..Self::line(data, label, color)
        }
    }

    pub fn dashed(data: Vec<(f64, f64)>, label: impl Into<String>, color: RGBColor) -> Self {
        Self {
            style: SeriesStyle::Dashed,
            ..Self::line(data, label, color)
        }
    }

    pub fn with_y_errors(mut self, errors: Vec<f64>) -> Self {
        self.y_errors = Some(errors);
        self
    }

    pub fn with_x_errors(mut self, errors: Vec<f64>) -> Self {
        self.x_errors = Some(errors);
        self
    }
}

/// Vertical guide line at a fixed x, e.g. an analysis window bound.
#[derive(Debug, Clone)]
pub struct VerticalMarker {
    pub x: f64,
    pub label: String,
    pub color: RGBColor,
    pub dashed: bool,
}

#[derive(Debug, Clone)]
pub struct PlotConfig {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub x_scale: AxisScale,
    pub y_scale: AxisScale,
    /// Fixed ranges in data units; computed from the series when absent.
    pub x_range: Option<Range<f64>>,
    pub y_range: Option<Range<f64>>,
    pub series: Vec<PlotSeries>,
    pub markers: Vec<VerticalMarker>,
}

impl PlotConfig {
    pub fn new(title: impl Into<String>, x_label: impl Into<String>, y_label: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            x_label: x_label.into(),
            y_label: y_label.into(),
            x_scale: AxisScale::Linear,
            y_scale: AxisScale::Linear,
            x_range: None,
            y_range: None,
            series: Vec::new(),
            markers: Vec::new(),
        }
    }

    pub fn log_log(mut self) -> Self {
        self.x_scale = AxisScale::Log;
        self.y_scale = AxisScale::Log;
        self
    }

    fn project(&self, (x, y): (f64, f64)) -> Option<(f64, f64)> {
        Some((self.x_scale.project(x)?, self.y_scale.project(y)?))
    }

    /// Padded plot-space ranges covering every projected point, error bar and marker.
    pub fn plot_ranges(&self) -> Option<(Range<f64>, Range<f64>)> {
        let mut xs = Vec::new();
        let mut ys = Vec::new();
        for s in &self.series {
            for (i, &p) in s.data.iter().enumerate() {
                let Some((x, y)) = self.project(p) else {
                    continue;
                };
                xs.push(x);
                ys.push(y);
                if let Some(err) = s.y_errors.as_ref().and_then(|e| e.get(i)) {
                    ys.extend(self.y_scale.project(p.1 + err));
                    ys.extend(self.y_scale.project(p.1 - err));
                }
                if let Some(err) = s.x_errors.as_ref().and_then(|e| e.get(i)) {
                    xs.extend(self.x_scale.project(p.0 + err));
                    xs.extend(self.x_scale.project(p.0 - err));
                }
            }
        }
        if xs.is_empty() {
            return None;
        }
        xs.extend(self.markers.iter().filter_map(|m| self.x_scale.project(m.x)));

        let x_range = match &self.x_range {
            Some(r) => self.x_scale.project(r.start)?..self.x_scale.project(r.end)?,
            None => padded(&xs),
        };
        let y_range = match &self.y_range {
            Some(r) => self.y_scale.project(r.start)?..self.y_scale.project(r.end)?,
            None => padded(&ys),
        };
        Some((x_range, y_range))
    }
}

fn padded(values: &[f64]) -> Range<f64> {
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let (lo, hi) = calculate_range(min, max);
    lo..hi
}

/// Calculate plot range with padding.
/// Adds 15% of the span. A flat series is padded by 5% of its magnitude, or by
/// 0.5 when it sits at zero.
pub fn calculate_range(min_val: f64, max_val: f64) -> (f64, f64) {
    let (min, max) = if min_val <= max_val {
        (min_val, max_val)
    } else {
        (max_val, min_val)
    };
    let range = max - min;
    let padding = if range > 0.0 {
        range * 0.15
    } else {
        let magnitude = min.abs().max(max.abs());
        if magnitude > 0.0 {
            magnitude * 0.05
        } else {
            0.5
        }
    };
    (min - padding, max + padding)
}

/// Axis tick formatter: k/M for large values, scientific notation for the tiny
/// magnitudes of noise densities.
pub fn format_axis_value(y: f64) -> String {
    let a = y.abs();
    if y == 0.0 {
        "0".to_string()
    } else if a >= 1_000_000.0 {
        format!("{:.1}M", y / 1_000_000.0)
    } else if a >= 1000.0 {
        format!("{:.0}k", y / 1000.0)
    } else if a < 0.01 {
        format!("{y:.1e}")
    } else if a < 10.0 && y.fract() != 0.0 {
        format!("{y:.1}")
    } else {
        format!("{y:.0}")
    }
}

/// Legend-style resistance label: "998 kΩ", "50 Ω".
pub fn format_resistance(ohms: f64) -> String {
    if ohms.abs() >= 1e3 {
        format!("{:.0} kΩ", ohms / 1e3)
    } else {
        format!("{ohms:.0} Ω")
    }
}

/// Splits a polyline (in plot coordinates) into `dashes` evenly spaced dashes.
/// Lengths are measured after normalising each axis by its span.
pub fn dash_segments(
    points: &[(f64, f64)],
    x_span: f64,
    y_span: f64,
    dashes: usize,
) -> Vec<Vec<(f64, f64)>> {
    if points.len() < 2 || dashes == 0 {
        return Vec::new();
    }
    let x_span = if x_span > 0.0 { x_span } else { 1.0 };
    let y_span = if y_span > 0.0 { y_span } else { 1.0 };

    let mut cumulative = Vec::with_capacity(points.len());
    cumulative.push(0.0);
    for w in points.windows(2) {
        let dx = (w[1].0 - w[0].0) / x_span;
        let dy = (w[1].1 - w[0].1) / y_span;
        let last = cumulative[cumulative.len() - 1];
        cumulative.push(last + (dx * dx + dy * dy).sqrt());
    }
    let total = cumulative[cumulative.len() - 1];
    if !total.is_finite() || total <= 0.0 {
        return vec![points.to_vec()];
    }

    let point_at = |s: f64| -> (f64, f64) {
        let i = cumulative
            .partition_point(|&c| c <= s)
            .saturating_sub(1)
            .min(points.len() - 2);
        let seg = cumulative[i + 1] - cumulative[i];
        let t = if seg > 0.0 { (s - cumulative[i]) / seg } else { 0.0 };
        (
            points[i].0 + t * (points[i + 1].0 - points[i].0),
            points[i].1 + t * (points[i + 1].1 - points[i].1),
        )
    };

    let step = total / (2 * dashes) as f64;
    (0..dashes)
        .map(|k| {
            let s0 = 2.0 * k as f64 * step;
            let s1 = s0 + step;
            let mut dash = vec![point_at(s0)];
            dash.extend(
                cumulative
                    .iter()
                    .zip(points)
                    .filter(|(&c, _)| c > s0 && c < s1)
                    .map(|(_, &p)| p),
            );
            dash.push(point_at(s1));
            dash
        })
        .collect()
}

/// Draw a "Data Unavailable" message on a plot area.
pub fn draw_unavailable_message(
    area: &DrawingArea<BitMapBackend, Shift>,
    plot_type: &str,
    reason: &str,
) -> Result<(), Box<dyn Error>> {
    const CHAR_WIDTH_RATIO: f32 = 0.6;
    const LINE_HEIGHT_SPACING: i32 = 4;

    let (x_range, y_range) = area.get_pixel_range();
    let (width, height) = (x_range.end - x_range.start, y_range.end - y_range.start);
    let message = format!("{plot_type} Data Unavailable:\n{reason}");

    let estimated_char_width = (FONT_SIZE_MESSAGE as f32 * CHAR_WIDTH_RATIO) as i32;
    let estimated_line_height = FONT_SIZE_MESSAGE + LINE_HEIGHT_SPACING;
    let lines: Vec<&str> = message.split('\n').collect();
    let max_line_length = lines.iter().map(|line| line.chars().count()).max().unwrap_or(0);
    let text_width = max_line_length as i32 * estimated_char_width;
    let text_height = lines.len() as i32 * estimated_line_height;

    let text_style = ("sans-serif", FONT_SIZE_MESSAGE).into_font().color(&RED);
    area.draw(&Text::new(
        message,
        (width / 2 - text_width / 2, height / 2 - text_height / 2),
        text_style,
    ))?;
    Ok(())
}

fn draw_plot_series(
    chart: &mut Chart<'_, '_>,
    config: &PlotConfig,
    s: &PlotSeries,
    x_span: f64,
    y_span: f64,
    floor: (f64, f64),
) -> Result<bool, Box<dyn Error>> {
    let projected: Vec<(usize, (f64, f64))> = s
        .data
        .iter()
        .enumerate()
        .filter_map(|(i, &p)| config.project(p).map(|q| (i, q)))
        .collect();
    if projected.is_empty() {
        return Ok(false);
    }

    if let Some(errors) = &s.y_errors {
        let bars: Vec<_> = projected
            .iter()
            .filter_map(|&(i, (x, y))| {
                let err = *errors.get(i)?;
                let (_, raw_y) = s.data[i];
                let lo = config.y_scale.project(raw_y - err).unwrap_or(floor.1);
                let hi = config.y_scale.project(raw_y + err)?;
                Some(ErrorBar::new_vertical(
                    x,
                    lo,
                    y,
                    hi,
                    COLOR_ERROR_BAR.stroke_width(LINE_WIDTH_ERROR_BAR),
                    8,
                ))
            })
            .collect();
        chart.draw_series(bars)?;
    }
    if let Some(errors) = &s.x_errors {
        let bars: Vec<_> = projected
            .iter()
            .filter_map(|&(i, (x, y))| {
                let err = *errors.get(i)?;
                let (raw_x, _) = s.data[i];
                let lo = config.x_scale.project(raw_x - err).unwrap_or(floor.0);
                let hi = config.x_scale.project(raw_x + err)?;
                Some(ErrorBar::new_horizontal(
                    y,
                    lo,
                    x,
                    hi,
                    COLOR_ERROR_BAR.stroke_width(LINE_WIDTH_ERROR_BAR),
                    8,
                ))
            })
            .collect();
        chart.draw_series(bars)?;
    }

    let color = s.color;
    let points: Vec<(f64, f64)> = projected.iter().map(|&(_, p)| p).collect();
    let labelled = !s.label.is_empty();

    match s.style {
        SeriesStyle::Line => {
            let anno = chart.draw_series(LineSeries::new(points, color.stroke_width(s.stroke_width)))?;
            if labelled {
                anno.label(&s.label).legend(move |(x, y)| {
                    PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(LINE_WIDTH_LEGEND))
                });
            }
        }
        SeriesStyle::Markers => {
            let anno = chart.draw_series(
                points
                    .iter()
                    .map(|&p| Circle::new(p, MARKER_SIZE, color.filled())),
            )?;
            if labelled {
                anno.label(&s.label)
                    .legend(move |(x, y)| Circle::new((x + 10, y), MARKER_SIZE + 1, color.filled()));
            }
        }
        SeriesStyle::Dashed => {
            for (k, dash) in dash_segments(&points, x_span, y_span, DASH_SEGMENTS)
                .into_iter()
                .enumerate()
            {
                let anno =
                    chart.draw_series(LineSeries::new(dash, color.stroke_width(s.stroke_width)))?;
                if k == 0 && labelled {
                    anno.label(&s.label).legend(move |(x, y)| {
                        PathElement::new(
                            vec![(x, y), (x + 8, y)],
                            color.stroke_width(LINE_WIDTH_LEGEND),
                        )
                    });
                }
            }
        }
    }
    Ok(labelled)
}

/// Draws one chart into `area`. Returns false when nothing could be plotted and a
/// placeholder message was drawn instead.
pub fn draw_chart(
    area: &DrawingArea<BitMapBackend, Shift>,
    config: &PlotConfig,
    render: &RenderConfig,
) -> Result<bool, Box<dyn Error>> {
    let Some((x_range, y_range)) = config.plot_ranges() else {
        draw_unavailable_message(area, &config.title, "No data points")?;
        return Ok(false);
    };
    if !(x_range.end > x_range.start && y_range.end > y_range.start) {
        draw_unavailable_message(area, &config.title, "Invalid ranges")?;
        return Ok(false);
    }

    let mut chart = ChartBuilder::on(area)
        .caption(&config.title, ("sans-serif", render.font_size_chart_title))
        .margin(5)
        .x_label_area_size(50)
        .y_label_area_size(70)
        .build_cartesian_2d(x_range.clone(), y_range.clone())?;

    let (x_scale, y_scale) = (config.x_scale, config.y_scale);
    chart
        .configure_mesh()
        .x_desc(&config.x_label)
        .y_desc(&config.y_label)
        .x_labels(15)
        .y_labels(10)
        .x_label_formatter(&|x| x_scale.tick_label(*x))
        .y_label_formatter(&|y| y_scale.tick_label(*y))
        .light_line_style(WHITE.mix(0.7))
        .label_style(("sans-serif", render.font_size_axis_label))
        .draw()?;

    let x_span = x_range.end - x_range.start;
    let y_span = y_range.end - y_range.start;

    for marker in &config.markers {
        let Some(x) = x_scale.project(marker.x) else {
            continue;
        };
        let line = vec![(x, y_range.start), (x, y_range.end)];
        let style = marker.color.stroke_width(1);
        if marker.dashed {
            for dash in dash_segments(&line, x_span, y_span, DASH_SEGMENTS) {
                chart.draw_series(LineSeries::new(dash, style))?;
            }
        } else {
            chart.draw_series(LineSeries::new(line, style))?;
        }
        if !marker.label.is_empty() {
            chart.draw_series(std::iter::once(Text::new(
                marker.label.clone(),
                (x, y_range.start + 0.05 * y_span),
                ("sans-serif", render.font_size_legend)
                    .into_font()
                    .color(&marker.color),
            )))?;
        }
    }

    let mut legend_series_count = 0;
    for s in &config.series {
        if draw_plot_series(
            &mut chart,
            config,
            s,
            x_span,
            y_span,
            (x_range.start, y_range.start),
        )? {
            legend_series_count += 1;
        }
    }

    if legend_series_count > 0 {
        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .label_font(("sans-serif", render.font_size_legend))
            .draw()?;
    }
    Ok(true)
}

/// Renders a single chart to `file_name` in the output directory.
pub fn draw_single_plot(
    render: &RenderConfig,
    file_name: &str,
    config: &PlotConfig,
) -> Result<PathBuf, Box<dyn Error>> {
    let path = render.prepare_output(file_name)?;
    let plotted = {
        let root_area =
            BitMapBackend::new(&path, (render.width, render.height)).into_drawing_area();
        root_area.fill(&WHITE)?;
        let plotted = draw_chart(&root_area, config, render)?;
        root_area.present()?;
        plotted
    };
    if plotted {
        log::info!("Plot saved as '{}'", path.display());
    } else {
        log::warn!("'{}' saved with a placeholder only: no data to plot", path.display());
    }
    Ok(path)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelLayout {
    Stacked,
    SideBySide,
}

/// Renders several charts into one image under a common title.
pub fn draw_panels(
    render: &RenderConfig,
    file_name: &str,
    root_name: &str,
    panels: &[PlotConfig],
    layout: PanelLayout,
) -> Result<PathBuf, Box<dyn Error>> {
    let path = render.prepare_output(file_name)?;
    let any_plotted = {
        let root_area =
            BitMapBackend::new(&path, (render.width, render.height)).into_drawing_area();
        root_area.fill(&WHITE)?;
        root_area.draw(&Text::new(
            root_name,
            (10, 10),
            ("sans-serif", render.font_size_main_title)
                .into_font()
                .color(&BLACK),
        ))?;
        let margined_root_area = root_area.margin(50, 5, 5, 5);

        let n = panels.len().max(1);
        let grid = match layout {
            PanelLayout::Stacked => (n, 1),
            PanelLayout::SideBySide => (1, n),
        };
        let sub_plot_areas = margined_root_area.split_evenly(grid);

        let mut any_plotted = false;
        if panels.is_empty() {
            draw_unavailable_message(&sub_plot_areas[0], root_name, "No readable inputs")?;
        }
        for (area, panel) in sub_plot_areas.iter().zip(panels) {
            any_plotted |= draw_chart(area, panel, render)?;
        }
        root_area.present()?;
        any_plotted
    };

    if any_plotted {
        log::info!("Plot saved as '{}'", path.display());
    } else {
        log::warn!("'{}' saved with placeholders only: no data to plot", path.display());
    }
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calculate_range_padding() {
        assert_eq!(calculate_range(0.0, 10.0), (-1.5, 11.5));
        assert_eq!(calculate_range(10.0, 0.0), (-1.5, 11.5));
        assert_eq!(calculate_range(0.0, 0.0), (-0.5, 0.5));
        let (lo, hi) = calculate_range(4.0, 4.0);
        assert!((lo - 3.8).abs() < 1e-12 && (hi - 4.2).abs() < 1e-12);
    }

    #[test]
    fn test_x_errors_widen_the_x_range() {
        let points = vec![(100.0, 1.0), (200.0, 2.0)];
        let mut bare = PlotConfig::new("r", "R", "y");
        bare.series
            .push(PlotSeries::markers(points.clone(), "", RGBColor(0, 0, 0)));
        let mut with_errors = PlotConfig::new("r", "R", "y");
        with_errors.series.push(
            PlotSeries::markers(points, "", RGBColor(0, 0, 0)).with_x_errors(vec![50.0, 50.0]),
        );

        let (bare_x, _) = bare.plot_ranges().unwrap();
        let (wide_x, _) = with_errors.plot_ranges().unwrap();
        assert!(wide_x.start < 50.0 && wide_x.end > 250.0, "{wide_x:?}");
        assert!(wide_x.start < bare_x.start && wide_x.end > bare_x.end);
    }

    #[test]
    fn test_plot_ranges_follow_tiny_mean_square_values() {
        let mut config = PlotConfig::new("fit", "R", "V²/Hz");
        config.series.push(PlotSeries::markers(
            vec![(250e3, 4.1e-15), (510e3, 8.3e-15), (998e3, 1.63e-14)],
            "measured",
            RGBColor(0, 0, 0),
        ));
        let (_, y) = config.plot_ranges().unwrap();
        let span = 1.63e-14 - 4.1e-15;
        assert!(y.start < 4.1e-15 && y.start > 4.1e-15 - 0.2 * span, "{y:?}");
        assert!(y.end > 1.63e-14 && y.end < 1.63e-14 + 0.2 * span, "{y:?}");

        let mut flat = PlotConfig::new("flat", "R", "V²/Hz");
        flat.series.push(PlotSeries::line(
            vec![(0.0, 2e-14), (1.0, 2e-14)],
            "",
            RGBColor(0, 0, 0),
        ));
        let (_, y) = flat.plot_ranges().unwrap();
        assert!(y.end - y.start < 1e-14 && y.start < 2e-14 && y.end > 2e-14, "{y:?}");
    }

    #[test]
    fn test_resistance_labels() {
        assert_eq!(format_resistance(998_000.0), "998 kΩ");
        assert_eq!(format_resistance(250e3), "250 kΩ");
        assert_eq!(format_resistance(50.0), "50 Ω");
    }

    #[test]
    fn test_log_scale_projection() {
        assert_eq!(AxisScale::Log.project(1000.0), Some(3.0));
        assert_eq!(AxisScale::Log.project(0.0), None);
        assert_eq!(AxisScale::Log.project(-1.0), None);
        assert_eq!(AxisScale::Linear.project(-1.0), Some(-1.0));
        assert_eq!(AxisScale::Log.tick_label(0.0), "1");
    }

    #[test]
    fn test_dash_segments_along_horizontal_line() {
        let dashes = dash_segments(&[(0.0, 0.0), (10.0, 0.0)], 10.0, 1.0, 5);
        assert_eq!(dashes.len(), 5);
        for (k, dash) in dashes.iter().enumerate() {
            assert_eq!(dash.len(), 2);
            assert!((dash[0].0 - 2.0 * k as f64).abs() < 1e-9);
            assert!((dash[1].0 - (2.0 * k as f64 + 1.0)).abs() < 1e-9);
        }
    }

    #[test]
    fn test_dash_segments_keep_interior_vertices() {
        let pts = [(0.0, 0.0), (1.0, 0.0), (1.0, 1.0)];
        let dashes = dash_segments(&pts, 1.0, 1.0, 1);
        assert_eq!(dashes.len(), 1);
        assert_eq!(dashes[0], vec![(0.0, 0.0), (1.0, 0.0)]);
        assert!(dash_segments(&pts[..1], 1.0, 1.0, 4).is_empty());
    }

    #[test]
    fn test_plot_ranges_skip_non_positive_on_log_axes() {
        let mut config = PlotConfig::new("t", "x", "y").log_log();
        config.series.push(PlotSeries::line(
            vec![(10.0, 1e-8), (100.0, 1e-7), (0.0, 1e-7), (1000.0, -1.0)],
            "",
            BLACK,
        ));
        let (x, y) = config.plot_ranges().unwrap();
        assert!((x.start - (1.0 - 0.15)).abs() < 1e-12);
        assert!((x.end - (2.0 + 0.15)).abs() < 1e-12);
        assert!(y.start < -8.0 && y.end > -7.0);

        let empty = PlotConfig::new("t", "x", "y");
        assert!(empty.plot_ranges().is_none());
    }
}

// src/plot_framework.rs
