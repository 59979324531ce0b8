// src/data_analysis/polyfit.rs

use nalgebra::{DMatrix, DVector};

use crate::error::{AnalysisError, AnalysisResult};

/// Polynomial with coefficients in ascending order of power.
#[derive(Debug, Clone, PartialEq)]
pub struct Polynomial {
    pub coefficients: Vec<f64>,
}

impl Polynomial {
    pub fn degree(&self) -> usize {
        self.coefficients.len().saturating_sub(1)
    }

    /// Horner evaluation.
    pub fn eval(&self, x: f64) -> f64 {
        self.coefficients
            .iter()
            .rev()
            .fold(0.0, |acc, &c| acc * x + c)
    }
}

/// Least-squares polynomial fit of the given degree.
///
/// Columns of the Vandermonde matrix are normalised before the SVD solve and the
/// scaling is undone afterwards, which keeps high powers of large abscissae usable.
pub fn polyfit(x: &[f64], y: &[f64], degree: usize) -> AnalysisResult<Polynomial> {
    if x.len() != y.len() {
        return Err(AnalysisError::LengthMismatch {
            x_len: x.len(),
            y_len: y.len(),
        });
    }
    let m = x.len();
    let n = degree + 1;
    if m < n {
        return Err(AnalysisError::InsufficientPoints {
            required: n,
            actual: m,
        });
    }

    let mut a = DMatrix::from_fn(m, n, |i, j| x[i].powi(j as i32));
    let mut scales = vec![1.0; n];
    for (j, scale) in scales.iter_mut().enumerate() {
        let norm = a.column(j).norm();
        if norm > 0.0 {
            *scale = norm;
            a.column_mut(j).scale_mut(1.0 / norm);
        }
    }
    let b = DVector::from_column_slice(y);

    let svd = a.svd(true, true);
    let solution = svd
        .solve(&b, 1e-14)
        .map_err(|e| AnalysisError::Solve(e.to_string()))?;

    let coefficients = solution
        .iter()
        .zip(&scales)
        .map(|(c, s)| c / s)
        .collect();
    Ok(Polynomial { coefficients })
}


// src/data_analysis/polyfit.rs
