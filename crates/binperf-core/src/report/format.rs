//! Number formatting shared by the reports

/// Percentage string truncated (not rounded) to two decimals, e.g. `"66.66%"`
///
/// Integral percentages keep one decimal: `0.8` gives `"80.0%"`.
pub fn to_percentage(value: f64) -> String {
    let pct = (value * 10_000.0).trunc() / 100.0;
    format!("{}%", float_repr(pct))
}

/// Truncate toward zero to four decimals
pub fn trunc(value: f64) -> f64 {
    (value * 10_000.0).trunc() / 10_000.0
}

fn float_repr(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        format!("{value}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentage() {
        assert_eq!(to_percentage(0.8), "80.0%");
        assert_eq!(to_percentage(0.6), "60.0%");
        assert_eq!(to_percentage(1.0), "100.0%");
        assert_eq!(to_percentage(0.0), "0.0%");
        assert_eq!(to_percentage(2.0 / 3.0), "66.66%");
        assert_eq!(to_percentage(0.12345), "12.34%");
    }

    #[test]
    fn test_trunc() {
        assert_eq!(trunc(0.123_456), 0.1234);
        assert_eq!(trunc(0.0), 0.0);
        assert_eq!(trunc(0.99999), 0.9999);
    }
}
