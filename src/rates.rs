//! Rate conversion and numeric sanitation
//!
//! Growth accounts and collateral appreciation use the compounded monthly
//! equivalent of the annual rate (12th root); loan interest uses the nominal
//! monthly rate (annual / 12). The asymmetry is deliberate and load-bearing:
//! unifying the two changes every projected value.

/// Monthly rate equivalent to `annual_rate` under monthly compounding.
///
/// `(1 + annual)^(1/12) - 1`, so that twelve applications reproduce the
/// annual rate exactly. Used for growth accounts and asset appreciation.
pub fn monthly_compound_rate(annual_rate: f64) -> f64 {
    (1.0 + annual_rate).powf(1.0 / 12.0) - 1.0
}

/// Nominal monthly rate: `annual / 12`. Used for loan interest accrual.
pub fn monthly_nominal_rate(annual_rate: f64) -> f64 {
    annual_rate / 12.0
}

/// Non-finite clamp applied at every accumulation step.
///
/// A pathological input (e.g. a growth rate that overflows over a 600-month
/// horizon) degrades that instrument to zero instead of propagating NaN or
/// infinity through the aggregate series.
pub fn sanitize(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_compound_rate_roundtrip() {
        // Twelve compounded months must reproduce the annual rate
        let monthly = monthly_compound_rate(0.07);
        assert_relative_eq!((1.0 + monthly).powi(12), 1.07, epsilon = 1e-12);
    }

    #[test]
    fn test_compound_vs_nominal_asymmetry() {
        // 7% annual is NOT 0.58333%/month under compounding
        let compound = monthly_compound_rate(0.07);
        let nominal = monthly_nominal_rate(0.07);
        assert!(compound < nominal);
        assert_relative_eq!(nominal, 0.07 / 12.0, epsilon = 1e-15);
    }

    #[test]
    fn test_zero_rate() {
        assert_eq!(monthly_compound_rate(0.0), 0.0);
        assert_eq!(monthly_nominal_rate(0.0), 0.0);
    }

    #[test]
    fn test_sanitize() {
        assert_eq!(sanitize(42.5), 42.5);
        assert_eq!(sanitize(-1.0), -1.0);
        assert_eq!(sanitize(f64::NAN), 0.0);
        assert_eq!(sanitize(f64::INFINITY), 0.0);
        assert_eq!(sanitize(f64::NEG_INFINITY), 0.0);
    }
}
