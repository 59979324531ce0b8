// src/data_analysis/thermal_noise.rs

use crate::constants::{BOLTZMANN_CODATA, BOLTZMANN_LAB};

/// Low-pass roll-off of the lock-in output filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterRolloff {
    Db6,
    Db12,
    Db18,
    Db24,
}

impl FilterRolloff {
    pub fn from_db_per_octave(value: u32) -> Option<Self> {
        match value {
            6 => Some(FilterRolloff::Db6),
            12 => Some(FilterRolloff::Db12),
            18 => Some(FilterRolloff::Db18),
            24 => Some(FilterRolloff::Db24),
            _ => None,
        }
    }

    /// ENBW = factor / time_constant.
    fn enbw_factor(&self) -> f64 {
        match self {
            FilterRolloff::Db6 => 1.0 / 4.0,
            FilterRolloff::Db12 => 1.0 / 8.0,
            FilterRolloff::Db18 => 3.0 / 32.0,
            FilterRolloff::Db24 => 5.0 / 64.0,
        }
    }
}

/// Equivalent noise bandwidth (Hz) of the output filter.
pub fn equivalent_noise_bandwidth(time_constant_s: f64, rolloff: FilterRolloff) -> f64 {
    rolloff.enbw_factor() / time_constant_s
}

/// Johnson–Nyquist prediction with a chosen Boltzmann constant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThermalNoisePredictor {
    pub boltzmann: f64,
}

impl Default for ThermalNoisePredictor {
    fn default() -> Self {
        Self {
            boltzmann: BOLTZMANN_LAB,
        }
    }
}

impl ThermalNoisePredictor {
    pub fn codata() -> Self {
        Self {
            boltzmann: BOLTZMANN_CODATA,
        }
    }

    /// Voltage-noise spectral density `sqrt(4 k T R)` in V/√Hz.
    /// Non-positive inputs are not checked and yield NaN (or 0).
    pub fn noise_density(&self, resistance_ohm: f64, temperature_k: f64) -> f64 {
        (4.0 * self.boltzmann * temperature_k * resistance_ohm).sqrt()
    }

    /// Power spectral density `4 k T R` in V²/Hz.
    pub fn noise_power_density(&self, resistance_ohm: f64, temperature_k: f64) -> f64 {
        4.0 * self.boltzmann * temperature_k * resistance_ohm
    }

    /// RMS noise voltage over a bandwidth.
    pub fn rms_voltage(&self, resistance_ohm: f64, temperature_k: f64, enbw_hz: f64) -> f64 {
        (self.noise_power_density(resistance_ohm, temperature_k) * enbw_hz).sqrt()
    }

    /// Uncertainty of `noise_density` from resistance and temperature tolerances.
    pub fn density_uncertainty(
        &self,
        resistance_ohm: f64,
        temperature_k: f64,
        delta_r: f64,
        delta_t: f64,
    ) -> f64 {
        let density = self.noise_density(resistance_ohm, temperature_k);
        let rel_r = delta_r / (2.0 * resistance_ohm);
        let rel_t = delta_t / (2.0 * temperature_k);
        density * (rel_r * rel_r + rel_t * rel_t).sqrt()
    }
}

/// Johnson noise combined in quadrature with a 1/f term `alpha / f`.
pub fn combined_with_flicker(johnson_v: f64, frequencies: &[f64], alpha: f64) -> Vec<f64> {
    frequencies
        .iter()
        .map(|&f| {
            let flicker = alpha / f;
            (johnson_v * johnson_v + flicker * flicker).sqrt()
        })
        .collect()
}

/// `n` logarithmically spaced frequencies between `start` and `stop` inclusive.
pub fn log_spaced(start: f64, stop: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let (ls, le) = (start.log10(), stop.log10());
            let step = (le - ls) / (n - 1) as f64;
            (0..n).map(|i| 10f64.powf(ls + step * i as f64)).collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_density_matches_formula() {
        let p = ThermalNoisePredictor::default();
        for &(r, t) in &[(50.0, 300.0), (250e3, 295.65), (1.4925e6, 77.0)] {
            assert_relative_eq!(
                p.noise_density(r, t),
                (4.0 * 1.38e-23 * t * r).sqrt(),
                max_relative = 1e-15
            );
        }
    }

    #[test]
    fn test_cryostat_scenario() {
        // 4 * 1.38e-23 * 170 * 998e3 = 9.365e-15 V^2/Hz
        let p = ThermalNoisePredictor::default();
        let density = p.noise_density(998_000.0, 170.0);
        assert_relative_eq!(density * density, 9.365_232e-15, max_relative = 1e-6);
        assert_relative_eq!(density, 9.677e-8, max_relative = 1e-3);
    }

    #[test]
    fn test_monotonic_in_r_and_t() {
        let p = ThermalNoisePredictor::default();
        let mut prev = 0.0;
        for r in [1.0, 10.0, 1e3, 1e6] {
            let v = p.noise_density(r, 300.0);
            assert!(v > prev);
            prev = v;
        }
        prev = 0.0;
        for t in [4.0, 77.0, 170.0, 300.0] {
            let v = p.noise_density(1e3, t);
            assert!(v > prev);
            prev = v;
        }
    }

    #[test]
    fn test_negative_input_is_nan() {
        let p = ThermalNoisePredictor::default();
        assert!(p.noise_density(-1.0, 300.0).is_nan());
    }

    #[test]
    fn test_enbw_by_rolloff() {
        let tc = 10e-3;
        assert_relative_eq!(equivalent_noise_bandwidth(tc, FilterRolloff::Db6), 25.0, max_relative = 1e-12);
        assert_relative_eq!(equivalent_noise_bandwidth(tc, FilterRolloff::Db12), 12.5, max_relative = 1e-12);
        assert_relative_eq!(equivalent_noise_bandwidth(tc, FilterRolloff::Db18), 9.375, max_relative = 1e-12);
        assert_relative_eq!(equivalent_noise_bandwidth(tc, FilterRolloff::Db24), 7.8125, max_relative = 1e-12);
        assert_eq!(FilterRolloff::from_db_per_octave(18), Some(FilterRolloff::Db18));
        assert_eq!(FilterRolloff::from_db_per_octave(9), None);
    }

    #[test]
    fn test_rms_voltage_scales_with_bandwidth() {
        let p = ThermalNoisePredictor::default();
        let density = p.noise_density(998e3, 300.0);
        assert_relative_eq!(p.rms_voltage(998e3, 300.0, 4.0), 2.0 * density, max_relative = 1e-12);
    }

    #[test]
    fn test_density_uncertainty_one_percent() {
        // 1% in R alone is 0.5% in the density.
        let p = ThermalNoisePredictor::default();
        let s = p.noise_density(510e3, 295.65);
        assert_relative_eq!(
            p.density_uncertainty(510e3, 295.65, 5100.0, 0.0),
            0.005 * s,
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_flicker_without_alpha_is_flat() {
        let freqs = log_spaced(10.0, 10_000.0, 4);
        assert_relative_eq!(freqs[0], 10.0, max_relative = 1e-12);
        assert_relative_eq!(freqs[3], 10_000.0, max_relative = 1e-12);
        let curve = combined_with_flicker(1e-7, &freqs, 0.0);
        assert!(curve.iter().all(|&v| (v - 1e-7).abs() < 1e-20));
        let with_flicker = combined_with_flicker(1e-7, &freqs, 1e-6);
        assert!(with_flicker[0] > with_flicker[3]);
    }
}

// src/data_analysis/thermal_noise.rs
