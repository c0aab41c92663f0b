//! Fixed monthly payment of an annuity loan

use crate::error::{ensure_principal, ensure_term, Result};
use log::debug;

/// Convert a nominal annual rate in percent to a monthly periodic rate
///
/// e.g. 6.0 (% per year) -> 0.005 per month
pub fn monthly_rate(annual_rate_percent: f64) -> f64 {
    annual_rate_percent / 12.0 / 100.0
}

/// Calculate the fixed monthly payment that amortizes `principal` over
/// `term_months` at a constant nominal annual rate.
///
/// Uses the annuity formula `P * r * (1+r)^n / ((1+r)^n - 1)`. An interest-free
/// loan (`annual_rate_percent == 0`) degenerates to `principal / term_months`.
///
/// The result is unrounded; callers round only what they display.
///
/// # Errors
/// `InvalidArgument` when `term_months` is 0 or above
/// [`MAX_TERM_MONTHS`](crate::error::MAX_TERM_MONTHS), or `principal` is not
/// positive.
/// Negative rates are not rejected here, the product policy check owns that.
pub fn compute_monthly_payment(
    principal: f64,
    annual_rate_percent: f64,
    term_months: u32,
) -> Result<f64> {
    ensure_term(term_months)?;
    ensure_principal(principal)?;

    let r = monthly_rate(annual_rate_percent);
    let n = term_months as f64;

    let payment = if r == 0.0 {
        principal / n
    } else {
        let growth = (1.0 + r).powi(term_months as i32);
        principal * r * growth / (growth - 1.0)
    };

    debug!(
        "payment: principal={:.2} rate={}% term={} -> {:.6}",
        principal, annual_rate_percent, term_months, payment
    );
    Ok(payment)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_monthly_rate() {
        assert_abs_diff_eq!(monthly_rate(6.0), 0.005, epsilon = 1e-15);
        assert_eq!(monthly_rate(0.0), 0.0);
    }

    #[test]
    fn test_six_percent_two_year_payment() {
        // 100k at 6% over 24 months
        let payment = compute_monthly_payment(100_000.0, 6.0, 24).unwrap();
        assert_abs_diff_eq!(payment, 4432.06, epsilon = 0.005);
    }

    #[test]
    fn test_zero_rate_is_straight_line() {
        let payment = compute_monthly_payment(12_000.0, 0.0, 12).unwrap();
        assert_eq!(payment, 1000.0);

        let payment = compute_monthly_payment(10_000.0, 0.0, 7).unwrap();
        assert_eq!(payment, 10_000.0 / 7.0);
    }

    #[test]
    fn test_positive_for_positive_rates() {
        for &rate in &[0.5, 3.0, 12.0, 29.9] {
            for &term in &[1u32, 6, 60, 360] {
                let payment = compute_monthly_payment(5_000.0, rate, term).unwrap();
                assert!(payment > 0.0, "rate={} term={}", rate, term);
                // Always at least the straight-line share
                assert!(payment > 5_000.0 / term as f64);
            }
        }
    }

    #[test]
    fn test_single_month_repays_principal_plus_interest() {
        let payment = compute_monthly_payment(1_200.0, 12.0, 1).unwrap();
        assert_abs_diff_eq!(payment, 1_212.0, epsilon = 1e-9);
    }

    #[test]
    fn test_zero_term_rejected() {
        assert!(compute_monthly_payment(1_000.0, 5.0, 0).is_err());
        assert!(compute_monthly_payment(1_000.0, 0.0, 0).is_err());
    }

    #[test]
    fn test_oversized_term_rejected() {
        assert!(compute_monthly_payment(1_000.0, 5.0, u32::MAX).is_err());
        assert!(compute_monthly_payment(1_000.0, 5.0, 1_201).is_err());
        assert!(compute_monthly_payment(1_000.0, 5.0, 1_200).is_ok());
    }

    #[test]
    fn test_negative_rate_passes_through() {
        // Rate sign is a policy concern, not a precondition here
        let payment = compute_monthly_payment(1_000.0, -1.0, 12).unwrap();
        assert!(payment > 0.0);
        assert!(payment < 1_000.0 / 12.0);
    }

    #[test]
    fn test_non_positive_principal_rejected() {
        assert!(compute_monthly_payment(0.0, 5.0, 12).is_err());
        assert!(compute_monthly_payment(-100.0, 5.0, 12).is_err());
    }
}
