//! Axis label formatting for climatology plots

/// Fraction rendered as a percentage with two decimals, e.g. `0.1234` -> `"12.34%"`
pub fn percent_label(fraction: f64) -> String {
    format!("{:.2}%", fraction * 100.0)
}

/// Specific humidity in kg/kg rendered in g/kg with two decimals, e.g. `0.0123` -> `"12.30"`
pub fn grams_label(kg_per_kg: f64) -> String {
    format!("{:.2}", kg_per_kg * 1000.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent() {
        assert_eq!(percent_label(0.1234), "12.34%");
        assert_eq!(percent_label(0.0), "0.00%");
        assert_eq!(percent_label(-0.05), "-5.00%");
    }

    #[test]
    fn grams() {
        assert_eq!(grams_label(0.0123), "12.30");
        assert_eq!(grams_label(0.0), "0.00");
    }
}
