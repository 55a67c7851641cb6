//! Boundary rounding for monetary and rate outputs. Internal accumulation
//! stays unrounded so errors do not compound year over year.

pub(crate) fn round_currency(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

pub(crate) fn round_rate(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn currency_rounds_to_cents() {
        assert!((round_currency(1234.5678) - 1234.57).abs() < f64::EPSILON);
        assert!((round_currency(-1.234) - -1.23).abs() < f64::EPSILON);
    }

    #[test]
    fn rate_rounds_to_one_decimal() {
        assert!((round_rate(17.304) - 17.3).abs() < f64::EPSILON);
        assert!((round_rate(17.36) - 17.4).abs() < f64::EPSILON);
    }
}
