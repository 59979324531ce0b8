// src/data_analysis/linear_fit.rs

use crate::constants::{BOLTZMANN_CODATA, ELEMENTARY_CHARGE};
use crate::data_analysis::estimate::PhysicalConstantEstimate;
use crate::error::{AnalysisError, AnalysisResult};

/// Ordinary least-squares fit `y = slope * x + intercept`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
    /// Pearson correlation coefficient.
    pub r_value: f64,
    /// Two-sided p-value for a null hypothesis of zero slope (Student t, n - 2 dof).
    pub p_value: f64,
    /// Standard error of the slope.
    pub std_err: f64,
    pub intercept_stderr: f64,
    pub n: usize,
}

impl LinearFit {
    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }

    pub fn slope_estimate(&self) -> PhysicalConstantEstimate {
        PhysicalConstantEstimate::new(self.slope, self.std_err)
    }

    pub fn equation(&self) -> String {
        format!("y = {:.4e} x + {:.4e}", self.slope, self.intercept)
    }
}

pub fn linear_regression(x: &[f64], y: &[f64]) -> AnalysisResult<LinearFit> {
    if x.len() != y.len() {
        return Err(AnalysisError::LengthMismatch {
            x_len: x.len(),
            y_len: y.len(),
        });
    }
    let n = x.len();
    if n < 2 {
        return Err(AnalysisError::InsufficientPoints {
            required: 2,
            actual: n,
        });
    }

    let nf = n as f64;
    let x_mean = x.iter().sum::<f64>() / nf;
    let y_mean = y.iter().sum::<f64>() / nf;

    let (mut ssxm, mut ssym, mut ssxym) = (0.0, 0.0, 0.0);
    for (&xi, &yi) in x.iter().zip(y) {
        let dx = xi - x_mean;
        let dy = yi - y_mean;
        ssxm += dx * dx;
        ssym += dy * dy;
        ssxym += dx * dy;
    }
    if ssxm == 0.0 {
        return Err(AnalysisError::DegenerateX);
    }

    let r_den = (ssxm * ssym).sqrt();
    let r_value = if r_den == 0.0 {
        0.0
    } else {
        (ssxym / r_den).clamp(-1.0, 1.0)
    };
    let slope = ssxym / ssxm;
    let intercept = y_mean - slope * x_mean;

    let (p_value, std_err, intercept_stderr) = if n == 2 {
        // Two points always lie on a line.
        let p = if y[0] == y[1] { 1.0 } else { 0.0 };
        (p, 0.0, 0.0)
    } else {
        const TINY: f64 = 1.0e-20;
        let df = (n - 2) as f64;
        let t = r_value * (df / ((1.0 - r_value + TINY) * (1.0 + r_value + TINY))).sqrt();
        let p = student_t_two_sided(t, df);
        let se = ((1.0 - r_value * r_value).max(0.0) * ssym / ssxm / df).sqrt();
        let x_sq_mean = x.iter().map(|v| v * v).sum::<f64>() / nf;
        (p, se, se * x_sq_mean.sqrt())
    };

    Ok(LinearFit {
        slope,
        intercept,
        r_value,
        p_value,
        std_err,
        intercept_stderr,
        n,
    })
}

/// Boltzmann constant from a fit of mean-square noise density against resistance:
/// `S² = 4 k T R`, so `k = slope / 4T`.
pub fn boltzmann_from_fit(fit: &LinearFit, temperature_k: f64) -> PhysicalConstantEstimate {
    let scale = 4.0 * temperature_k;
    PhysicalConstantEstimate::new(fit.slope / scale, fit.std_err / scale)
}

/// Band gap in eV from a fit of `ln(R T^1.5)` against `1/T`: `Eg = 2 k slope`.
pub fn band_gap_from_fit(fit: &LinearFit) -> PhysicalConstantEstimate {
    let scale = 2.0 * BOLTZMANN_CODATA / ELEMENTARY_CHARGE;
    PhysicalConstantEstimate::new(fit.slope * scale, fit.std_err * scale)
}

/// `P(|T| > |t|)` for Student's t with `df` degrees of freedom.
pub fn student_t_two_sided(t: f64, df: f64) -> f64 {
    if t.is_nan() {
        return f64::NAN;
    }
    if t.is_infinite() {
        return 0.0;
    }
    let x = df / (df + t * t);
    regularized_incomplete_beta(0.5 * df, 0.5, x).clamp(0.0, 1.0)
}

/// Lanczos approximation (g = 7) of `ln Γ(x)` for `x > 0`.
fn ln_gamma(x: f64) -> f64 {
    const COEFFS: [f64; 9] = [
        0.999_999_999_999_809_9,
        676.520_368_121_885_1,
        -1_259.139_216_722_402_8,
        771.323_428_777_653_1,
        -176.615_029_162_140_6,
        12.507_343_278_686_905,
        -0.138_571_095_265_720_12,
        9.984_369_578_019_572e-6,
        1.505_632_735_149_311_6e-7,
    ];
    if x < 0.5 {
        // Reflection formula
        let pi = std::f64::consts::PI;
        return (pi / (pi * x).sin()).ln() - ln_gamma(1.0 - x);
    }
    let x = x - 1.0;
    let mut a = COEFFS[0];
    let t = x + 7.5;
    for (i, &c) in COEFFS.iter().enumerate().skip(1) {
        a += c / (x + i as f64);
    }
    0.5 * (2.0 * std::f64::consts::PI).ln() + (x + 0.5) * t.ln() - t + a.ln()
}

/// `I_x(a, b)` via the continued fraction, flipping to `1 - I_{1-x}(b, a)` when
/// that converges faster.
fn regularized_incomplete_beta(a: f64, b: f64, x: f64) -> f64 {
    if x <= 0.0 {
        return 0.0;
    }
    if x >= 1.0 {
        return 1.0;
    }
    let ln_front = ln_gamma(a + b) - ln_gamma(a) - ln_gamma(b) + a * x.ln() + b * (1.0 - x).ln();
    let front = ln_front.exp();
    if x < (a + 1.0) / (a + b + 2.0) {
        front * beta_continued_fraction(a, b, x) / a
    } else {
        1.0 - front * beta_continued_fraction(b, a, 1.0 - x) / b
    }
}

fn beta_continued_fraction(a: f64, b: f64, x: f64) -> f64 {
    const MAX_ITER: usize = 300;
    const EPS: f64 = 1e-15;
    const FPMIN: f64 = 1e-300;

    let qab = a + b;
    let qap = a + 1.0;
    let qam = a - 1.0;
    let mut c = 1.0;
    let mut d = 1.0 - qab * x / qap;
    if d.abs() < FPMIN {
        d = FPMIN;
    }
    d = 1.0 / d;
    let mut h = d;

    for m in 1..=MAX_ITER {
        let m = m as f64;
        let m2 = 2.0 * m;

        let aa = m * (b - m) * x / ((qam + m2) * (a + m2));
        d = 1.0 + aa * d;
        if d.abs() < FPMIN {
            d = FPMIN;
        }
        c = 1.0 + aa / c;
        if c.abs() < FPMIN {
            c = FPMIN;
        }
        d = 1.0 / d;
        h *= d * c;

        let aa = -(a + m) * (qab + m) * x / ((a + m2) * (qap + m2));
        d = 1.0 + aa * d;
        if d.abs() < FPMIN {
            d = FPMIN;
        }
        c = 1.0 + aa / c;
        if c.abs() < FPMIN {
            c = FPMIN;
        }
        d = 1.0 / d;
        let delta = d * c;
        h *= delta;
        if (delta - 1.0).abs() < EPS {
            break;
        }
    }
    h
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_perfect_line() {
        let x: Vec<f64> = (0..10).map(|i| i as f64).collect();
        let y: Vec<f64> = x.iter().map(|v| 2.0 * v + 3.0).collect();
        let fit = linear_regression(&x, &y).unwrap();
        assert_relative_eq!(fit.slope, 2.0, max_relative = 1e-12);
        assert_relative_eq!(fit.intercept, 3.0, max_relative = 1e-12);
        assert_relative_eq!(fit.r_value, 1.0, max_relative = 1e-12);
        assert!(fit.std_err.abs() < 1e-12);
        assert!(fit.p_value < 1e-10);
        assert_relative_eq!(fit.predict(20.0), 43.0, max_relative = 1e-12);
    }

    #[test]
    fn test_noisy_line_matches_reference() {
        let x = [1.0, 2.0, 3.0, 4.0, 5.0];
        let y = [2.0, 4.0, 5.0, 4.0, 5.0];
        let fit = linear_regression(&x, &y).unwrap();
        assert_relative_eq!(fit.slope, 0.6, max_relative = 1e-12);
        assert_relative_eq!(fit.intercept, 2.2, max_relative = 1e-12);
        assert_relative_eq!(fit.r_value, 0.6f64.sqrt(), max_relative = 1e-12);
        assert_relative_eq!(fit.std_err, 0.08f64.sqrt(), max_relative = 1e-9);
        assert!((fit.p_value - 0.124).abs() < 1e-3, "p = {}", fit.p_value);
    }

    #[test]
    fn test_two_points() {
        let fit = linear_regression(&[1.0, 3.0], &[1.0, 5.0]).unwrap();
        assert_eq!(fit.slope, 2.0);
        assert_eq!(fit.intercept, -1.0);
        assert_eq!(fit.std_err, 0.0);
        assert_eq!(fit.p_value, 0.0);
    }

    #[test]
    fn test_error_conditions() {
        assert_eq!(
            linear_regression(&[1.0], &[1.0]).unwrap_err(),
            AnalysisError::InsufficientPoints {
                required: 2,
                actual: 1
            }
        );
        assert_eq!(
            linear_regression(&[1.0, 2.0], &[1.0]).unwrap_err(),
            AnalysisError::LengthMismatch { x_len: 2, y_len: 1 }
        );
        assert_eq!(
            linear_regression(&[2.0, 2.0, 2.0], &[1.0, 2.0, 3.0]).unwrap_err(),
            AnalysisError::DegenerateX
        );
    }

    #[test]
    fn test_student_t_reference_values() {
        // df = 1 is the Cauchy distribution: P(|T| > 1) = 0.5
        assert_relative_eq!(student_t_two_sided(1.0, 1.0), 0.5, max_relative = 1e-9);
        assert_relative_eq!(student_t_two_sided(0.0, 7.0), 1.0, max_relative = 1e-12);
        // 97.5th percentile of t(10) is 2.228
        assert!((student_t_two_sided(2.228, 10.0) - 0.05).abs() < 1e-3);
        assert_eq!(student_t_two_sided(f64::INFINITY, 3.0), 0.0);
    }

    #[test]
    fn test_ln_gamma() {
        assert!(ln_gamma(1.0).abs() < 1e-12);
        assert_relative_eq!(ln_gamma(5.0), 24f64.ln(), max_relative = 1e-12);
        assert_relative_eq!(ln_gamma(0.5), std::f64::consts::PI.sqrt().ln(), max_relative = 1e-12);
    }

    #[test]
    fn test_band_gap_conversion() {
        // slope = Eg / 2k in kelvin
        let eg = 1.12;
        let slope = eg * ELEMENTARY_CHARGE / (2.0 * BOLTZMANN_CODATA);
        let fit = LinearFit {
            slope,
            intercept: 0.0,
            r_value: 1.0,
            p_value: 0.0,
            std_err: 0.01 * slope,
            intercept_stderr: 0.0,
            n: 10,
        };
        let est = band_gap_from_fit(&fit);
        assert_relative_eq!(est.value, eg, max_relative = 1e-12);
        assert_relative_eq!(est.uncertainty, 0.01 * eg, max_relative = 1e-12);
    }
}

// src/data_analysis/linear_fit.rs
