// src/plot_functions/plot_theoretical_noise.rs

use std::error::Error;
use std::path::PathBuf;

use crate::constants::{
    series_color, COLOR_DATA_POINTS, THEORY_FREQ_MAX_HZ, THEORY_FREQ_MIN_HZ, THEORY_FREQ_POINTS,
};
use crate::data_analysis::thermal_noise::{combined_with_flicker, log_spaced, ThermalNoisePredictor};
use crate::plot_framework::{draw_single_plot, format_resistance, PlotConfig, PlotSeries, RenderConfig};
use crate::plot_functions::plot_noise_spectra::{FREQUENCY_AXIS_LABEL, NOISE_AXIS_LABEL};

/// Flat Johnson–Nyquist density for each resistance across the audio band.
pub fn plot_theoretical_densities(
    render: &RenderConfig,
    file_name: &str,
    predictor: &ThermalNoisePredictor,
    resistances: &[f64],
    temperature_k: f64,
) -> Result<PathBuf, Box<dyn Error>> {
    let mut config = PlotConfig::new(
        format!("Theoretical thermal noise at {temperature_k:.2} K"),
        FREQUENCY_AXIS_LABEL,
        NOISE_AXIS_LABEL,
    )
    .log_log();

    for (i, &r) in resistances.iter().enumerate() {
        let level = predictor.noise_density(r, temperature_k);
        config.series.push(PlotSeries::line(
            vec![(THEORY_FREQ_MIN_HZ, level), (THEORY_FREQ_MAX_HZ, level)],
            format!("{} ({level:.3e} V/√Hz)", format_resistance(r)),
            series_color(i),
        ));
    }
    draw_single_plot(render, file_name, &config)
}

/// RMS Johnson noise over the filter ENBW combined with a 1/f term.
pub fn plot_flicker_curve(
    render: &RenderConfig,
    file_name: &str,
    title: &str,
    johnson_rms_v: f64,
    alpha: f64,
) -> Result<PathBuf, Box<dyn Error>> {
    let freqs = log_spaced(THEORY_FREQ_MIN_HZ, THEORY_FREQ_MAX_HZ, THEORY_FREQ_POINTS);
    let noise = combined_with_flicker(johnson_rms_v, &freqs, alpha);

    let mut config = PlotConfig::new(title, FREQUENCY_AXIS_LABEL, "Noise (V rms)").log_log();
    config.series.push(PlotSeries::line(
        freqs.into_iter().zip(noise).collect(),
        "",
        COLOR_DATA_POINTS,
    ));
    draw_single_plot(render, file_name, &config)
}

// src/plot_functions/plot_theoretical_noise.rs
