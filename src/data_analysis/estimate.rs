// src/data_analysis/estimate.rs

use std::fmt;

/// A fitted or averaged quantity with its one-sigma uncertainty.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhysicalConstantEstimate {
    pub value: f64,
    pub uncertainty: f64,
}

impl PhysicalConstantEstimate {
    pub fn new(value: f64, uncertainty: f64) -> Self {
        Self { value, uncertainty }
    }

    /// Signed percent error against a reference value.
    pub fn percent_error(&self, reference: f64) -> f64 {
        (self.value - reference) / reference * 100.0
    }

    /// Uncertainty of `|percent_error|`, propagated linearly from `uncertainty`.
    pub fn percent_error_uncertainty(&self, reference: f64) -> f64 {
        self.uncertainty / reference.abs() * 100.0
    }

    pub fn percent_uncertainty(&self) -> f64 {
        (self.uncertainty / self.value).abs() * 100.0
    }

    /// True if `reference` lies within `sigmas` standard uncertainties.
    pub fn agrees_with(&self, reference: f64, sigmas: f64) -> bool {
        (self.value - reference).abs() <= sigmas * self.uncertainty
    }
}

impl fmt::Display for PhysicalConstantEstimate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3e} ± {:.2e}", self.value, self.uncertainty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent_figures() {
        let k = PhysicalConstantEstimate::new(1.449e-23, 0.069e-23);
        assert!((k.percent_error(1.38e-23) - 5.0).abs() < 1e-9);
        assert!((k.percent_error_uncertainty(1.38e-23) - 5.0).abs() < 1e-9);
        assert!((k.percent_uncertainty() - 4.761_904_76).abs() < 1e-6);
        assert!(k.agrees_with(1.38e-23, 1.01));
        assert!(!k.agrees_with(1.30e-23, 1.0));
    }

    #[test]
    fn test_display() {
        let e = PhysicalConstantEstimate::new(1.0629, 0.0157);
        assert_eq!(e.to_string(), "1.063e0 ± 1.57e-2");
    }
}

// src/data_analysis/estimate.rs
