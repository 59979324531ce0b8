// src/data_input/series.rs

use crate::error::{AnalysisError, AnalysisResult};

/// A frequency-indexed noise measurement, one `(frequency_hz, value)` pair per
/// instrument sample. Frequencies are expected to increase but this is not enforced.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct MeasurementSeries {
    pub label: String,
    pub points: Vec<(f64, f64)>,
}

impl MeasurementSeries {
    pub fn new(label: impl Into<String>, points: Vec<(f64, f64)>) -> Self {
        Self {
            label: label.into(),
            points,
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn frequencies(&self) -> Vec<f64> {
        self.points.iter().map(|&(f, _)| f).collect()
    }

    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|&(_, v)| v).collect()
    }

    /// Samples inside `window`, bounds inclusive.
    pub fn within(&self, window: &FrequencyWindow) -> Vec<(f64, f64)> {
        self.points
            .iter()
            .copied()
            .filter(|&(f, _)| window.contains(f))
            .collect()
    }
}

/// Closed frequency interval `[min_hz, max_hz]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrequencyWindow {
    pub min_hz: f64,
    pub max_hz: f64,
}

impl FrequencyWindow {
    pub fn new(min_hz: f64, max_hz: f64) -> AnalysisResult<Self> {
        if !min_hz.is_finite() || !max_hz.is_finite() || min_hz > max_hz {
            return Err(AnalysisError::InvalidWindow {
                min: min_hz,
                max: max_hz,
            });
        }
        Ok(Self { min_hz, max_hz })
    }

    pub fn contains(&self, freq: f64) -> bool {
        freq >= self.min_hz && freq <= self.max_hz
    }
}

/// Semiconductor temperature sweep: `(temperature_k, resistance_ohm)` rows.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct SweepSeries {
    pub label: String,
    pub points: Vec<(f64, f64)>,
}

impl SweepSeries {
    pub fn new(label: impl Into<String>, points: Vec<(f64, f64)>) -> Self {
        Self {
            label: label.into(),
            points,
        }
    }

    pub fn temperatures(&self) -> Vec<f64> {
        self.points.iter().map(|&(t, _)| t).collect()
    }

    pub fn resistances(&self) -> Vec<f64> {
        self.points.iter().map(|&(_, r)| r).collect()
    }
}

/// One row of a Helmholtz coil calibration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalibrationPoint {
    pub current_ma: f64,
    /// Field as recorded by the gaussmeter, in kilogauss.
    pub field_kg: f64,
}


// src/data_input/series.rs
