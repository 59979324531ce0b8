// src/data_analysis/band_statistics.rs

use ndarray::Array1;

use crate::constants::{RESISTANCE_TOLERANCE_FRACTION, TEMPERATURE_TOLERANCE_K};
use crate::data_analysis::estimate::PhysicalConstantEstimate;
use crate::data_analysis::thermal_noise::ThermalNoisePredictor;
use crate::data_input::series::{FrequencyWindow, MeasurementSeries};
use crate::error::{AnalysisError, AnalysisResult};

/// Mean, spread and standard error of the noise floor inside a frequency window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandStatistics {
    pub window: FrequencyWindow,
    pub count: usize,
    pub mean: f64,
    /// Sample standard deviation (ddof = 1). NaN for a single sample.
    pub std_dev: f64,
    /// Standard error of the mean, `std_dev / sqrt(count)`.
    pub sem: f64,
}

/// Component tolerances used for the theoretical uncertainty.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToleranceSpec {
    pub resistance_fraction: f64,
    /// Thermometer tolerance; `None` leaves temperature out of the budget.
    pub temperature_k: Option<f64>,
}

impl Default for ToleranceSpec {
    fn default() -> Self {
        Self {
            resistance_fraction: RESISTANCE_TOLERANCE_FRACTION,
            temperature_k: Some(TEMPERATURE_TOLERANCE_K),
        }
    }
}

impl ToleranceSpec {
    pub fn resistance_only() -> Self {
        Self {
            temperature_k: None,
            ..Self::default()
        }
    }
}

/// A band average set against the Johnson–Nyquist prediction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TheoryComparison {
    pub resistance_ohm: f64,
    pub temperature_k: f64,
    pub theoretical: f64,
    pub theoretical_uncertainty: f64,
    /// Theoretical uncertainty and measured spread in quadrature.
    pub total_uncertainty: f64,
    pub percent_error: f64,
}

/// Mean-square noise of one resistor, as fed to the Boltzmann fit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeanSquarePoint {
    pub resistance_ohm: f64,
    pub mean_square: PhysicalConstantEstimate,
}

impl BandStatistics {
    pub fn compute(series: &MeasurementSeries, window: &FrequencyWindow) -> AnalysisResult<Self> {
        let values: Array1<f64> = series
            .within(window)
            .into_iter()
            .map(|(_, v)| v)
            .collect();

        let count = values.len();
        let mean = values.mean().ok_or(AnalysisError::EmptyWindow {
            min_hz: window.min_hz,
            max_hz: window.max_hz,
        })?;
        let std_dev = if count < 2 { f64::NAN } else { values.std(1.0) };
        let sem = std_dev / (count as f64).sqrt();

        log::debug!(
            "{}: {count} samples in [{}, {}] Hz, mean {mean:.3e}, std {std_dev:.3e}",
            series.label,
            window.min_hz,
            window.max_hz
        );

        Ok(Self {
            window: *window,
            count,
            mean,
            std_dev,
            sem,
        })
    }

    pub fn mean_estimate(&self) -> PhysicalConstantEstimate {
        PhysicalConstantEstimate::new(self.mean, self.sem)
    }

    /// Mean squared noise with uncertainty `2 · mean · SEM`.
    pub fn mean_squared(&self) -> PhysicalConstantEstimate {
        PhysicalConstantEstimate::new(self.mean * self.mean, 2.0 * self.mean * self.sem)
    }

    pub fn compare(
        &self,
        predictor: &ThermalNoisePredictor,
        resistance_ohm: f64,
        temperature_k: f64,
        tolerances: &ToleranceSpec,
    ) -> TheoryComparison {
        let theoretical = predictor.noise_density(resistance_ohm, temperature_k);
        let theoretical_uncertainty = predictor.density_uncertainty(
            resistance_ohm,
            temperature_k,
            tolerances.resistance_fraction * resistance_ohm,
            tolerances.temperature_k.unwrap_or(0.0),
        );
        let total_uncertainty =
            (theoretical_uncertainty.powi(2) + self.std_dev.powi(2)).sqrt();
        TheoryComparison {
            resistance_ohm,
            temperature_k,
            theoretical,
            theoretical_uncertainty,
            total_uncertainty,
            percent_error: (self.mean - theoretical) / theoretical * 100.0,
        }
    }
}


// src/data_analysis/band_statistics.rs
