// src/data_analysis/coil_calibration.rs

use crate::data_analysis::polyfit::{polyfit, Polynomial};
use crate::data_input::series::CalibrationPoint;
use crate::error::{AnalysisError, AnalysisResult};

const GAUSS_PER_KILOGAUSS: f64 = 1000.0;

/// Linear field-vs-current calibration of a Helmholtz coil, field in gauss.
#[derive(Debug, Clone, PartialEq)]
pub struct CoilCalibration {
    pub gauss_per_ma: f64,
    pub offset_gauss: f64,
    /// `(current_mA, field_G)` points the fit was made on.
    pub points: Vec<(f64, f64)>,
}

impl CoilCalibration {
    pub fn fit(rows: &[CalibrationPoint]) -> AnalysisResult<Self> {
        let points: Vec<(f64, f64)> = rows
            .iter()
            .map(|p| (p.current_ma, p.field_kg * GAUSS_PER_KILOGAUSS))
            .collect();
        let (current, field): (Vec<f64>, Vec<f64>) = points.iter().copied().unzip();
        if current.len() >= 2 && current.iter().all(|&c| c == current[0]) {
            return Err(AnalysisError::DegenerateX);
        }
        let Polynomial { coefficients } = polyfit(&current, &field, 1)?;
        Ok(Self {
            gauss_per_ma: coefficients[1],
            offset_gauss: coefficients[0],
            points,
        })
    }

    pub fn field_at(&self, current_ma: f64) -> f64 {
        self.gauss_per_ma * current_ma + self.offset_gauss
    }

    /// Current needed for a target field.
    pub fn current_for(&self, field_gauss: f64) -> f64 {
        (field_gauss - self.offset_gauss) / self.gauss_per_ma
    }

    pub fn equation(&self) -> String {
        format!("Fit equation: {:.2}x + {:.2}", self.gauss_per_ma, self.offset_gauss)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn rows(slope_g_per_ma: f64, offset_g: f64) -> Vec<CalibrationPoint> {
        (0..8)
            .map(|i| {
                let current_ma = 50.0 * i as f64;
                CalibrationPoint {
                    current_ma,
                    field_kg: (slope_g_per_ma * current_ma + offset_g) / 1000.0,
                }
            })
            .collect()
    }

    #[test]
    fn test_fit_converts_kilogauss() {
        let cal = CoilCalibration::fit(&rows(0.82, 1.5)).unwrap();
        assert_relative_eq!(cal.gauss_per_ma, 0.82, max_relative = 1e-9);
        assert_relative_eq!(cal.offset_gauss, 1.5, max_relative = 1e-9);
        assert_relative_eq!(cal.field_at(100.0), 83.5, max_relative = 1e-9);
        assert_relative_eq!(cal.current_for(83.5), 100.0, max_relative = 1e-9);
        assert_eq!(cal.equation(), "Fit equation: 0.82x + 1.50");
    }

    #[test]
    fn test_single_row_is_rejected() {
        let one = vec![CalibrationPoint {
            current_ma: 1.0,
            field_kg: 0.001,
        }];
        assert!(matches!(
            CoilCalibration::fit(&one),
            Err(AnalysisError::InsufficientPoints { .. })
        ));
    }
}

// src/data_analysis/coil_calibration.rs
