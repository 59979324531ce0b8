// tests/y_axis_formatting_test.rs

use physlab_analysis::plot_framework::format_axis_value;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fractional_values_keep_one_decimal() {
        assert_eq!(format_axis_value(0.2), "0.2");
        assert_eq!(format_axis_value(0.4), "0.4");
        assert_eq!(format_axis_value(1.2), "1.2");
        assert_eq!(format_axis_value(-0.6), "-0.6");
    }

    #[test]
    fn test_whole_values() {
        assert_eq!(format_axis_value(0.0), "0");
        assert_eq!(format_axis_value(2.0), "2");
        assert_eq!(format_axis_value(50.0), "50");
        assert_eq!(format_axis_value(300.0), "300");
    }

    #[test]
    fn test_large_values_use_k_and_m() {
        assert_eq!(format_axis_value(1000.0), "1k");
        assert_eq!(format_axis_value(250_000.0), "250k");
        assert_eq!(format_axis_value(1_000_000.0), "1.0M");
        assert_eq!(format_axis_value(-2_000.0), "-2k");
    }

    #[test]
    fn test_small_values_use_scientific_notation() {
        assert_eq!(format_axis_value(0.005), "5.0e-3");
        assert_eq!(format_axis_value(1.5e-3), "1.5e-3");
    }
}

// tests/y_axis_formatting_test.rs
