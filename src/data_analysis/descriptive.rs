// src/data_analysis/descriptive.rs

use ndarray::Array1;
use ndarray_stats::QuantileExt;

use crate::error::{AnalysisError, AnalysisResult};

/// Summary of a fixed-temperature run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DescriptiveStats {
    pub count: usize,
    pub mean: f64,
    pub median: f64,
    /// Sample standard deviation (ddof = 1); NaN for a single value.
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
}

impl DescriptiveStats {
    pub fn compute(values: &[f64]) -> AnalysisResult<Self> {
        let data: Array1<f64> = values.iter().copied().filter(|v| !v.is_nan()).collect();
        let count = data.len();
        let mean = data.mean().ok_or(AnalysisError::InsufficientPoints {
            required: 1,
            actual: 0,
        })?;
        let std_dev = if count < 2 { f64::NAN } else { data.std(1.0) };

        // NaNs are filtered above, so ordering is total.
        let min = *data
            .min()
            .map_err(|e| AnalysisError::Unordered(e.to_string()))?;
        let max = *data
            .max()
            .map_err(|e| AnalysisError::Unordered(e.to_string()))?;

        let mut sorted = data.to_vec();
        sorted.sort_by(f64::total_cmp);
        let mid = count / 2;
        let median = if count % 2 == 0 {
            0.5 * (sorted[mid - 1] + sorted[mid])
        } else {
            sorted[mid]
        };

        Ok(Self {
            count,
            mean,
            median,
            std_dev,
            min,
            max,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_odd_and_even_counts() {
        let s = DescriptiveStats::compute(&[3.0, 1.0, 2.0]).unwrap();
        assert_eq!(s.median, 2.0);
        assert_eq!(s.min, 1.0);
        assert_eq!(s.max, 3.0);
        assert_relative_eq!(s.std_dev, 1.0, max_relative = 1e-12);

        let s = DescriptiveStats::compute(&[4.0, 1.0, 3.0, 2.0]).unwrap();
        assert_eq!(s.median, 2.5);
        assert_eq!(s.mean, 2.5);
        assert_eq!(s.count, 4);
    }

    #[test]
    fn test_nan_values_are_ignored() {
        let s = DescriptiveStats::compute(&[1.0, f64::NAN, 5.0]).unwrap();
        assert_eq!(s.count, 2);
        assert_eq!(s.mean, 3.0);
    }

    #[test]
    fn test_empty_input() {
        assert!(DescriptiveStats::compute(&[]).is_err());
        let single = DescriptiveStats::compute(&[7.0]).unwrap();
        assert!(single.std_dev.is_nan());
        assert_eq!(single.median, 7.0);
    }
}

// src/data_analysis/descriptive.rs
