// src/data_analysis/derivative.rs

/// Discrete derivative dy/dx on a possibly non-uniform grid.
/// Second-order central differences inside, one-sided first-order differences at the ends.
/// A zero spacing produces a non-finite value at that point rather than an error.
pub fn gradient(y: &[f64], x: &[f64]) -> Vec<f64> {
    let n = y.len().min(x.len());
    if n < 2 {
        return Vec::new();
    }

    let mut derivative = Vec::with_capacity(n);

    // Forward difference for first point
    derivative.push((y[1] - y[0]) / (x[1] - x[0]));

    for i in 1..n - 1 {
        let hs = x[i] - x[i - 1];
        let hd = x[i + 1] - x[i];
        let denom = hs * hd * (hd + hs);
        derivative.push((hs * hs * y[i + 1] + (hd * hd - hs * hs) * y[i] - hd * hd * y[i - 1]) / denom);
    }

    // Backward difference for last point
    derivative.push((y[n - 1] - y[n - 2]) / (x[n - 1] - x[n - 2]));

    derivative
}

/// Indices of strict local minima (smaller than both neighbours). End points never qualify.
pub fn local_minima(values: &[f64]) -> Vec<usize> {
    if values.len() < 3 {
        return Vec::new();
    }
    (1..values.len() - 1)
        .filter(|&i| values[i] < values[i - 1] && values[i] < values[i + 1])
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_uniform_grid_matches_central_difference() {
        let x = [0.0, 1.0, 2.0, 3.0, 4.0];
        let y = [0.0, 1.0, 4.0, 9.0, 16.0];
        let d = gradient(&y, &x);
        assert_eq!(d, vec![1.0, 2.0, 4.0, 6.0, 7.0]);
    }

    #[test]
    fn test_non_uniform_grid_exact_for_quadratic() {
        let x = [0.0, 0.5, 2.0, 2.25, 4.0];
        let y: Vec<f64> = x.iter().map(|v| v * v).collect();
        let d = gradient(&y, &x);
        for i in 1..4 {
            assert_relative_eq!(d[i], 2.0 * x[i], epsilon = 1e-12);
        }
    }

    #[test]
    fn test_short_input() {
        assert!(gradient(&[1.0], &[0.0]).is_empty());
        assert_eq!(gradient(&[1.0, 3.0], &[0.0, 2.0]), vec![1.0, 1.0]);
    }

    #[test]
    fn test_repeated_abscissa_is_not_finite() {
        let d = gradient(&[1.0, 2.0, 3.0], &[0.0, 0.0, 1.0]);
        assert!(!d[0].is_finite());
        assert!(!d[1].is_finite());
    }

    #[test]
    fn test_local_minima() {
        assert_eq!(local_minima(&[3.0, 1.0, 2.0, 0.5, 4.0, 4.0, 5.0]), vec![1, 3]);
        // plateaus are not strict minima
        assert!(local_minima(&[2.0, 1.0, 1.0, 2.0]).is_empty());
        assert!(local_minima(&[1.0, 2.0]).is_empty());
    }
}

// src/data_analysis/derivative.rs
