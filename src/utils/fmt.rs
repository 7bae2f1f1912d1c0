//! Numeric display contract.
//!
//! Applies uniformly to every value placed into a trace record or final
//! answer. Purely presentational: stored values and every comparison or
//! stopping decision use the raw f64.

/// Fixed-point with 7 fractional digits when `v == 0` or `1e-4 < |v| < 1e6`,
/// scientific notation with 4 fractional digits otherwise.
pub fn format_value(v: f64) -> String {
    if v == 0.0 || (v.abs() > 1e-4 && v.abs() < 1e6) {
        format!("{:.7}", v)
    } else {
        format!("{:.4e}", v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_point_range() {
        assert_eq!(format_value(1.41421356), "1.4142136");
        assert_eq!(format_value(-0.5), "-0.5000000");
        assert_eq!(format_value(0.0), "0.0000000");
    }

    #[test]
    fn test_scientific_outside_range() {
        assert_eq!(format_value(0.00001), "1.0000e-5");
        assert_eq!(format_value(2.5e7), "2.5000e7");
    }

    #[test]
    fn test_boundaries_are_exclusive() {
        // exactly 1e-4 and 1e6 fall to scientific notation
        assert_eq!(format_value(1e-4), "1.0000e-4");
        assert_eq!(format_value(1e6), "1.0000e6");
        assert_eq!(format_value(1.0001e-4), "0.0001000");
    }
}
