// src/plot_functions/plot_boltzmann_fit.rs

use std::error::Error;
use std::path::PathBuf;

use crate::constants::{COLOR_DATA_POINTS, COLOR_FIT_LINE, COLOR_TRANSITION};
use crate::constants::RESISTANCE_TOLERANCE_FRACTION;
use crate::data_analysis::band_statistics::MeanSquarePoint;
use crate::data_analysis::linear_fit::LinearFit;
use crate::data_analysis::thermal_noise::ThermalNoisePredictor;
use crate::plot_framework::{draw_single_plot, PlotConfig, PlotSeries, RenderConfig};

/// Mean-square density against resistance with the fitted line and the `4 k T R`
/// expectation.
pub fn plot_boltzmann_fit(
    render: &RenderConfig,
    file_name: &str,
    points: &[MeanSquarePoint],
    fit: &LinearFit,
    predictor: &ThermalNoisePredictor,
    temperature_k: f64,
) -> Result<PathBuf, Box<dyn Error>> {
    let mut config = PlotConfig::new(
        "Mean-square noise density vs resistance",
        "Resistance (Ω)",
        "Mean-square noise (V²/Hz)",
    );

    config.series.push(
        PlotSeries::markers(
            points
                .iter()
                .map(|p| (p.resistance_ohm, p.mean_square.value))
                .collect(),
            "Measured",
            COLOR_DATA_POINTS,
        )
        .with_y_errors(points.iter().map(|p| p.mean_square.uncertainty).collect())
        .with_x_errors(
            points
                .iter()
                .map(|p| RESISTANCE_TOLERANCE_FRACTION * p.resistance_ohm)
                .collect(),
        ),
    );

    let r_max = points
        .iter()
        .map(|p| p.resistance_ohm)
        .fold(0.0, f64::max);
    config.series.push(PlotSeries::line(
        vec![(0.0, fit.predict(0.0)), (r_max, fit.predict(r_max))],
        format!("Fit: slope {:.3e} V²/(Hz·Ω)", fit.slope),
        *COLOR_FIT_LINE,
    ));
    config.series.push(PlotSeries::dashed(
        vec![
            (0.0, 0.0),
            (r_max, predictor.noise_power_density(r_max, temperature_k)),
        ],
        format!("4kTR at {temperature_k:.2} K"),
        *COLOR_TRANSITION,
    ));

    draw_single_plot(render, file_name, &config)
}

// src/plot_functions/plot_boltzmann_fit.rs
