// src/data_analysis/band_gap.rs

use crate::constants::{
    BAND_GAP_FIT_HALF_WIDTH_K, BOLTZMANN_EV, MODEL_BAND_GAP_EV, MODEL_ELECTRON_MOBILITY,
    MODEL_HOLE_MOBILITY, MODEL_PREFACTOR, SAVGOL_POLY_ORDER, SAVGOL_WINDOW,
};
use crate::data_analysis::derivative::{gradient, local_minima};
use crate::data_analysis::estimate::PhysicalConstantEstimate;
use crate::data_analysis::linear_fit::{band_gap_from_fit, linear_regression, LinearFit};
use crate::data_analysis::smoothing::savgol_filter;
use crate::data_input::series::SweepSeries;
use crate::error::{AnalysisError, AnalysisResult};

/// Tuning of the band-gap pipeline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandGapConfig {
    /// Savitzky–Golay window length in samples (odd).
    pub smoothing_window: usize,
    pub smoothing_order: usize,
    /// Subtract the minimum resistance before smoothing.
    pub shift_to_minimum: bool,
    /// Restrict the transition search to this temperature interval (K).
    pub search_range: Option<(f64, f64)>,
    /// Explicit fit interval (K). Overrides `fit_half_width_k`.
    pub fit_range: Option<(f64, f64)>,
    pub fit_half_width_k: f64,
}

impl Default for BandGapConfig {
    fn default() -> Self {
        Self {
            smoothing_window: SAVGOL_WINDOW,
            smoothing_order: SAVGOL_POLY_ORDER,
            shift_to_minimum: true,
            search_range: None,
            fit_range: None,
            fit_half_width_k: BAND_GAP_FIT_HALF_WIDTH_K,
        }
    }
}

/// Every intermediate of the pipeline, kept for plotting.
#[derive(Debug, Clone)]
pub struct BandGapAnalysis {
    pub temperatures: Vec<f64>,
    /// Resistance after the optional shift.
    pub adjusted: Vec<f64>,
    pub smoothed: Vec<f64>,
    /// dR/dT of the smoothed resistance.
    pub derivative: Vec<f64>,
    pub minima: Vec<usize>,
    pub transition_index: usize,
    pub transition_temperature: f64,
    pub fit_range: (f64, f64),
    /// `(1/T, ln(R T^1.5))` points that entered the fit.
    pub linearized: Vec<(f64, f64)>,
    pub fit: LinearFit,
    pub band_gap: PhysicalConstantEstimate,
}

impl BandGapAnalysis {
    pub fn run(sweep: &SweepSeries, config: &BandGapConfig) -> AnalysisResult<Self> {
        let temperatures = sweep.temperatures();
        let raw = sweep.resistances();

        let adjusted = if config.shift_to_minimum {
            let min = raw.iter().copied().fold(f64::INFINITY, f64::min);
            raw.iter().map(|r| r - min).collect()
        } else {
            raw
        };

        let smoothed = savgol_filter(&adjusted, config.smoothing_window, config.smoothing_order)?;
        let derivative = gradient(&smoothed, &temperatures);
        let minima = local_minima(&derivative);

        let transition_index = steepest_minimum(&minima, &derivative, &temperatures, config.search_range)
            .ok_or(AnalysisError::NoTransition)?;
        let transition_temperature = temperatures[transition_index];
        log::info!(
            "{}: {} local minima in dR/dT, steepest at {transition_temperature:.1} K",
            sweep.label,
            minima.len()
        );

        let fit_range = config.fit_range.unwrap_or((
            transition_temperature - config.fit_half_width_k,
            transition_temperature + config.fit_half_width_k,
        ));
        if fit_range.0.is_nan() || fit_range.1.is_nan() || fit_range.0 > fit_range.1 {
            return Err(AnalysisError::InvalidWindow {
                min: fit_range.0,
                max: fit_range.1,
            });
        }

        let mut dropped = 0usize;
        let linearized: Vec<(f64, f64)> = temperatures
            .iter()
            .zip(&smoothed)
            .filter(|(t, _)| **t >= fit_range.0 && **t <= fit_range.1)
            .filter_map(|(&t, &r)| {
                if r > 0.0 && t > 0.0 {
                    Some((1.0 / t, (r * t.powf(1.5)).ln()))
                } else {
                    dropped += 1;
                    None
                }
            })
            .collect();
        if dropped > 0 {
            log::warn!(
                "{}: dropped {dropped} non-positive smoothed resistances from the fit",
                sweep.label
            );
        }

        let (inv_t, ln_rt): (Vec<f64>, Vec<f64>) = linearized.iter().copied().unzip();
        let fit = linear_regression(&inv_t, &ln_rt)?;
        let band_gap = band_gap_from_fit(&fit);

        Ok(Self {
            temperatures,
            adjusted,
            smoothed,
            derivative,
            minima,
            transition_index,
            transition_temperature,
            fit_range,
            linearized,
            fit,
            band_gap,
        })
    }
}

/// The local minimum with the most negative derivative, optionally limited to a
/// temperature interval.
fn steepest_minimum(
    minima: &[usize],
    derivative: &[f64],
    temperatures: &[f64],
    search_range: Option<(f64, f64)>,
) -> Option<usize> {
    minima
        .iter()
        .copied()
        .filter(|&i| derivative[i].is_finite())
        .filter(|&i| match search_range {
            Some((lo, hi)) => temperatures[i] >= lo && temperatures[i] <= hi,
            None => true,
        })
        .min_by(|&a, &b| derivative[a].total_cmp(&derivative[b]))
}

/// Parameters of the intrinsic semiconductor resistance model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntrinsicModel {
    pub prefactor: f64,
    pub electron_mobility: f64,
    pub hole_mobility: f64,
    pub band_gap_ev: f64,
    /// Boltzmann constant in eV/K.
    pub boltzmann_ev: f64,
}

impl Default for IntrinsicModel {
    fn default() -> Self {
        Self {
            prefactor: MODEL_PREFACTOR,
            electron_mobility: MODEL_ELECTRON_MOBILITY,
            hole_mobility: MODEL_HOLE_MOBILITY,
            band_gap_ev: MODEL_BAND_GAP_EV,
            boltzmann_ev: BOLTZMANN_EV,
        }
    }
}

impl IntrinsicModel {
    /// `R(T) = A / ((μe + μh) T^1.5) · exp(Eg / 2kT)`
    pub fn resistance(&self, temperature_k: f64) -> f64 {
        self.prefactor / ((self.electron_mobility + self.hole_mobility) * temperature_k.powf(1.5))
            * (self.band_gap_ev / (2.0 * self.boltzmann_ev * temperature_k)).exp()
    }

    pub fn curve(&self, temperatures: &[f64]) -> Vec<(f64, f64)> {
        temperatures
            .iter()
            .map(|&t| (t, self.resistance(t)))
            .collect()
    }
}


// src/data_analysis/band_gap.rs
