// src/plot_functions/plot_band_window.rs

use std::error::Error;
use std::path::PathBuf;

use crate::constants::{series_color, COLOR_FIT_LINE, COLOR_TRANSITION};
use crate::data_analysis::band_statistics::{BandStatistics, TheoryComparison};
use crate::data_input::series::MeasurementSeries;
use crate::plot_framework::{draw_single_plot, PlotConfig, PlotSeries, RenderConfig};
use crate::plot_functions::plot_noise_spectra::{window_markers, FREQUENCY_AXIS_LABEL, NOISE_AXIS_LABEL};

/// One spectrum with its band mean drawn across the analysis window and, when
/// available, the theoretical level.
pub fn plot_band_window(
    render: &RenderConfig,
    file_name: &str,
    series: &MeasurementSeries,
    stats: &BandStatistics,
    comparison: Option<&TheoryComparison>,
) -> Result<PathBuf, Box<dyn Error>> {
    let title = format!("{}: band average", series.label);
    let mut config = PlotConfig::new(title, FREQUENCY_AXIS_LABEL, NOISE_AXIS_LABEL).log_log();

    config.series.push(PlotSeries::line(
        series.points.clone(),
        series.label.clone(),
        series_color(0),
    ));

    let (lo, hi) = (stats.window.min_hz, stats.window.max_hz);
    config.series.push(
        PlotSeries::markers(
            vec![(0.5 * (lo + hi), stats.mean)],
            format!("Band mean {:.3e} V/√Hz", stats.mean),
            *COLOR_FIT_LINE,
        )
        .with_y_errors(vec![stats.std_dev]),
    );
    config.series.push(PlotSeries::line(
        vec![(lo, stats.mean), (hi, stats.mean)],
        "",
        *COLOR_FIT_LINE,
    ));

    if let Some(cmp) = comparison {
        config.series.push(PlotSeries::dashed(
            vec![(lo, cmp.theoretical), (hi, cmp.theoretical)],
            format!("Theoretical {:.3e} V/√Hz", cmp.theoretical),
            *COLOR_TRANSITION,
        ));
    }
    config.markers = window_markers(&stats.window);

    draw_single_plot(render, file_name, &config)
}

// src/plot_functions/plot_band_window.rs
