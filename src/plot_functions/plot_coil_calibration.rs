// src/plot_functions/plot_coil_calibration.rs

use std::error::Error;
use std::path::PathBuf;

use crate::constants::{COLOR_DATA_POINTS, COLOR_TRANSITION};
use crate::data_analysis::coil_calibration::CoilCalibration;
use crate::plot_framework::{draw_single_plot, PlotConfig, PlotSeries, RenderConfig};

pub fn plot_coil_calibration(
    render: &RenderConfig,
    file_name: &str,
    calibration: &CoilCalibration,
) -> Result<PathBuf, Box<dyn Error>> {
    let mut config = PlotConfig::new(
        "Coil magnetic field over current",
        "Current (mADC)",
        "Field (G)",
    );
    config.series.push(PlotSeries::markers(
        calibration.points.clone(),
        "Data",
        COLOR_DATA_POINTS,
    ));
    config.series.push(PlotSeries::line(
        calibration
            .points
            .iter()
            .map(|&(i, _)| (i, calibration.field_at(i)))
            .collect(),
        format!("Linear fit: {:.2}x + {:.2}", calibration.gauss_per_ma, calibration.offset_gauss),
        *COLOR_TRANSITION,
    ));
    draw_single_plot(render, file_name, &config)
}

// src/plot_functions/plot_coil_calibration.rs
