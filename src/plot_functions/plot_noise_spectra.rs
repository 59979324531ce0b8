// src/plot_functions/plot_noise_spectra.rs

use plotters::style::RGBColor;
use std::error::Error;
use std::path::PathBuf;

use crate::constants::{series_color, COLOR_WINDOW_MARKER, THEORY_FREQ_MAX_HZ, THEORY_FREQ_MIN_HZ};
use crate::data_input::series::{FrequencyWindow, MeasurementSeries};
use crate::plot_framework::{draw_single_plot, PlotConfig, PlotSeries, RenderConfig, VerticalMarker};

pub const NOISE_AXIS_LABEL: &str = "Noise (V/√Hz)";
pub const FREQUENCY_AXIS_LABEL: &str = "Frequency (Hz)";

/// One measured spectrum, optionally paired with its Johnson–Nyquist level.
#[derive(Debug, Clone)]
pub struct SpectrumOverlay {
    pub series: MeasurementSeries,
    pub theoretical: Option<f64>,
    /// Total uncertainty drawn as error bars on the in-window samples.
    pub uncertainty: Option<f64>,
}

impl SpectrumOverlay {
    pub fn new(series: MeasurementSeries) -> Self {
        Self {
            series,
            theoretical: None,
            uncertainty: None,
        }
    }
}

/// In-window samples of an overlay carrying its uncertainty as error bars.
fn windowed_error_bars(
    overlay: &SpectrumOverlay,
    window: &FrequencyWindow,
    color: RGBColor,
) -> Option<PlotSeries> {
    let uncertainty = overlay.uncertainty?;
    let points = overlay.series.within(window);
    if points.is_empty() {
        return None;
    }
    let errors = vec![uncertainty; points.len()];
    Some(PlotSeries::markers(points, "", color).with_y_errors(errors))
}

/// Dashed grey bounds of an analysis window, labelled in Hz.
pub fn window_markers(window: &FrequencyWindow) -> Vec<VerticalMarker> {
    [window.min_hz, window.max_hz]
        .into_iter()
        .map(|x| VerticalMarker {
            x,
            label: format!("{x:.0} Hz"),
            color: *COLOR_WINDOW_MARKER,
            dashed: true,
        })
        .collect()
}

/// Log-log overlay of several noise spectra. Each spectrum's theoretical level is a
/// dashed line in the same colour.
pub fn plot_noise_spectra(
    render: &RenderConfig,
    file_name: &str,
    title: &str,
    spectra: &[SpectrumOverlay],
    window: Option<&FrequencyWindow>,
) -> Result<PathBuf, Box<dyn Error>> {
    let mut config = PlotConfig::new(title, FREQUENCY_AXIS_LABEL, NOISE_AXIS_LABEL).log_log();

    for (i, overlay) in spectra.iter().enumerate() {
        let color = series_color(i);
        config.series.push(PlotSeries::line(
            overlay.series.points.clone(),
            overlay.series.label.clone(),
            color,
        ));
        if let Some(bars) = window.and_then(|w| windowed_error_bars(overlay, w, color)) {
            config.series.push(bars);
        }
        if let Some(level) = overlay.theoretical {
            let freqs = overlay.series.frequencies();
            let lo = freqs.iter().copied().filter(|f| *f > 0.0).fold(f64::INFINITY, f64::min);
            let hi = freqs.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            let (lo, hi) = if lo.is_finite() && hi > lo {
                (lo, hi)
            } else {
                (THEORY_FREQ_MIN_HZ, THEORY_FREQ_MAX_HZ)
            };
            config.series.push(PlotSeries::dashed(
                vec![(lo, level), (hi, level)],
                format!("Theoretical {}", overlay.series.label),
                color,
            ));
        }
    }
    if let Some(w) = window {
        config.markers = window_markers(w);
    }

    draw_single_plot(render, file_name, &config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_markers_are_labelled() {
        let w = FrequencyWindow::new(190.0, 1500.0).unwrap();
        let markers = window_markers(&w);
        assert_eq!(markers.len(), 2);
        assert_eq!(markers[0].label, "190 Hz");
        assert_eq!(markers[1].label, "1500 Hz");
        assert!(markers.iter().all(|m| m.dashed));
    }

    #[test]
    fn test_error_bars_cover_only_the_window() {
        let series = MeasurementSeries::new(
            "998 kΩ",
            vec![(100.0, 1.0e-7), (200.0, 1.1e-7), (1000.0, 1.2e-7), (3000.0, 1.0e-7)],
        );
        let w = FrequencyWindow::new(190.0, 1500.0).unwrap();
        let color = RGBColor(0, 0, 255);

        let plain = SpectrumOverlay::new(series.clone());
        assert!(windowed_error_bars(&plain, &w, color).is_none());

        let overlay = SpectrumOverlay {
            uncertainty: Some(3e-9),
            ..SpectrumOverlay::new(series)
        };
        let bars = windowed_error_bars(&overlay, &w, color).unwrap();
        assert_eq!(bars.data, vec![(200.0, 1.1e-7), (1000.0, 1.2e-7)]);
        assert_eq!(bars.y_errors, Some(vec![3e-9, 3e-9]));
        assert!(bars.label.is_empty());
    }
}

// src/plot_functions/plot_noise_spectra.rs
