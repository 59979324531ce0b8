// src/plot_functions/plot_band_gap.rs

use std::error::Error;
use std::path::PathBuf;

use crate::constants::{
    series_color, COLOR_DATA_POINTS, COLOR_FIT_LINE, COLOR_SMOOTHED, COLOR_TRANSITION,
};
use crate::data_analysis::band_gap::{BandGapAnalysis, IntrinsicModel};
use crate::plot_framework::{
    draw_panels, draw_single_plot, AxisScale, PanelLayout, PlotConfig, PlotSeries, RenderConfig,
    VerticalMarker,
};

const TEMPERATURE_AXIS_LABEL: &str = "Temperature (K)";
const RESISTANCE_AXIS_LABEL: &str = "Resistance (Ω)";

/// Two stacked panels: adjusted vs smoothed resistance, and dR/dT with the
/// transition temperature marked.
pub fn plot_band_gap_smoothing(
    render: &RenderConfig,
    file_name: &str,
    root_name: &str,
    analysis: &BandGapAnalysis,
) -> Result<PathBuf, Box<dyn Error>> {
    let zip = |values: &[f64]| -> Vec<(f64, f64)> {
        analysis
            .temperatures
            .iter()
            .copied()
            .zip(values.iter().copied())
            .collect()
    };

    let mut smoothing = PlotConfig::new(
        "Raw vs smoothed resistance",
        TEMPERATURE_AXIS_LABEL,
        RESISTANCE_AXIS_LABEL,
    );
    smoothing.series.push(PlotSeries::markers(
        zip(&analysis.adjusted),
        "Adjusted resistance",
        COLOR_DATA_POINTS,
    ));
    smoothing.series.push(PlotSeries::line(
        zip(&analysis.smoothed),
        "Smoothed",
        *COLOR_SMOOTHED,
    ));

    let transition = VerticalMarker {
        x: analysis.transition_temperature,
        label: format!("{:.1} K", analysis.transition_temperature),
        color: *COLOR_TRANSITION,
        dashed: false,
    };
    let mut derivative = PlotConfig::new(
        "First derivative of resistance",
        TEMPERATURE_AXIS_LABEL,
        "dR/dT (Ω/K)",
    );
    derivative.series.push(PlotSeries::markers(
        zip(&analysis.derivative),
        "dR/dT",
        COLOR_DATA_POINTS,
    ));
    derivative.series.push(PlotSeries::markers(
        vec![(
            analysis.transition_temperature,
            analysis.derivative[analysis.transition_index],
        )],
        "Steepest local minimum",
        *COLOR_TRANSITION,
    ));
    derivative.markers.push(transition);

    draw_panels(
        render,
        file_name,
        root_name,
        &[smoothing, derivative],
        PanelLayout::Stacked,
    )
}

/// `ln(R T^1.5)` against `1/T` with the regression line.
pub fn plot_band_gap_fit(
    render: &RenderConfig,
    file_name: &str,
    analysis: &BandGapAnalysis,
) -> Result<PathBuf, Box<dyn Error>> {
    let mut config = PlotConfig::new(
        "Linearization for band gap energy estimation",
        "1/T (1/K)",
        "ln(RT^3/2)",
    );
    config.series.push(PlotSeries::markers(
        analysis.linearized.clone(),
        format!(
            "{:.0}–{:.0} K",
            analysis.fit_range.0, analysis.fit_range.1
        ),
        series_color(0),
    ));

    let inv_t = analysis.linearized.iter().map(|&(x, _)| x);
    let lo = inv_t.clone().fold(f64::INFINITY, f64::min);
    let hi = inv_t.fold(f64::NEG_INFINITY, f64::max);
    let fit = &analysis.fit;
    config.series.push(PlotSeries::line(
        vec![(lo, fit.predict(lo)), (hi, fit.predict(hi))],
        format!(
            "ln(RT^3/2) = {:.4} × (1/T) + {:.4}, Eg = {:.4} eV",
            fit.slope, fit.intercept, analysis.band_gap.value
        ),
        *COLOR_FIT_LINE,
    ));

    draw_single_plot(render, file_name, &config)
}

/// Theoretical intrinsic resistance curve.
pub fn plot_intrinsic_model(
    render: &RenderConfig,
    file_name: &str,
    model: &IntrinsicModel,
    temperatures: &[f64],
) -> Result<PathBuf, Box<dyn Error>> {
    let mut config = PlotConfig::new(
        format!("Intrinsic resistance model, Eg = {} eV", model.band_gap_ev),
        TEMPERATURE_AXIS_LABEL,
        RESISTANCE_AXIS_LABEL,
    );
    config.y_scale = AxisScale::Log;
    config.series.push(PlotSeries::line(
        model.curve(temperatures),
        "R(T)",
        *COLOR_FIT_LINE,
    ));
    draw_single_plot(render, file_name, &config)
}

// src/plot_functions/plot_band_gap.rs
