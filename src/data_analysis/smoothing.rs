// src/data_analysis/smoothing.rs

use nalgebra::DMatrix;

use crate::data_analysis::polyfit::polyfit;
use crate::error::{AnalysisError, AnalysisResult};

/// Convolution weights that evaluate a least-squares polynomial fit at the centre
/// of a window of `window` samples.
fn savgol_coefficients(window: usize, poly_order: usize) -> AnalysisResult<Vec<f64>> {
    let half = (window / 2) as f64;
    let a = DMatrix::from_fn(window, poly_order + 1, |i, j| (i as f64 - half).powi(j as i32));
    let ata = a.transpose() * &a;
    let ata_inv = ata
        .try_inverse()
        .ok_or_else(|| AnalysisError::Solve("singular Savitzky-Golay normal matrix".into()))?;
    // Row 0 of (AᵀA)⁻¹Aᵀ is the value of the fit at offset 0.
    let pinv = ata_inv * a.transpose();
    Ok(pinv.row(0).iter().copied().collect())
}

/// Savitzky–Golay smoothing. Samples closer than half a window to either end are
/// taken from a polynomial fitted to the first or last full window.
pub fn savgol_filter(data: &[f64], window: usize, poly_order: usize) -> AnalysisResult<Vec<f64>> {
    if window % 2 == 0 {
        return Err(AnalysisError::InvalidSmoothing(format!(
            "window length {window} must be odd"
        )));
    }
    if poly_order >= window {
        return Err(AnalysisError::InvalidSmoothing(format!(
            "polynomial order {poly_order} must be less than window length {window}"
        )));
    }
    if window > data.len() {
        return Err(AnalysisError::InvalidSmoothing(format!(
            "window length {window} exceeds data length {}",
            data.len()
        )));
    }

    let coeffs = savgol_coefficients(window, poly_order)?;
    let half = window / 2;
    let n = data.len();
    let mut smoothed = vec![0.0; n];

    for i in half..n - half {
        smoothed[i] = coeffs
            .iter()
            .zip(&data[i - half..=i + half])
            .map(|(c, y)| c * y)
            .sum();
    }

    // Edges: evaluate a fit over the first/last full window.
    let offsets: Vec<f64> = (0..window).map(|k| k as f64 - half as f64).collect();
    let head = polyfit(&offsets, &data[..window], poly_order)?;
    let tail = polyfit(&offsets, &data[n - window..], poly_order)?;
    for k in 0..half {
        smoothed[k] = head.eval(offsets[k]);
        smoothed[n - half + k] = tail.eval(offsets[half + 1 + k]);
    }

    Ok(smoothed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_five_point_quadratic_weights() {
        // Classic SG(5, 2) weights: (-3, 12, 17, 12, -3) / 35
        let c = savgol_coefficients(5, 2).unwrap();
        let expected = [-3.0, 12.0, 17.0, 12.0, -3.0].map(|v| v / 35.0);
        for (a, b) in c.iter().zip(expected.iter()) {
            assert_relative_eq!(a, b, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_cubic_is_preserved_everywhere() {
        let data: Vec<f64> = (0..40)
            .map(|i| {
                let x = i as f64 * 0.1;
                2.0 - x + 0.3 * x * x - 0.05 * x * x * x
            })
            .collect();
        let smoothed = savgol_filter(&data, 9, 3).unwrap();
        for (s, d) in smoothed.iter().zip(&data) {
            assert_relative_eq!(s, d, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_noise_is_reduced() {
        let data: Vec<f64> = (0..200)
            .map(|i| if i % 2 == 0 { 1.0 } else { -1.0 })
            .collect();
        let smoothed = savgol_filter(&data, 21, 3).unwrap();
        let interior_max = smoothed[20..180]
            .iter()
            .fold(0.0f64, |m, v| m.max(v.abs()));
        assert!(interior_max < 0.2, "max {interior_max}");
    }

    #[test]
    fn test_invalid_parameters() {
        let data = vec![0.0; 10];
        assert!(savgol_filter(&data, 4, 2).is_err());
        assert!(savgol_filter(&data, 5, 5).is_err());
        assert!(savgol_filter(&data, 11, 3).is_err());
    }
}

// src/data_analysis/smoothing.rs
