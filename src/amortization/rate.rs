//! Annualized rates of a loan
//!
//! Two measures live here:
//! - [`compute_effective_annual_rate`]: the linear annualization of total
//!   finance charges shown on a simulation. It is NOT an internal rate of
//!   return and understates the true yield of an amortizing loan.
//! - [`actuarial_annual_rate_percent`]: the annualized internal rate of
//!   return of the borrower's cash flows, solved numerically.

use crate::error::{ensure_principal, ensure_term, Result};
use log::warn;

/// Linear effective annual rate, in percent
///
/// `(total_cost - principal) / principal * (12 / term_months) * 100`
///
/// This approximates an APR but does not solve the IRR equation: it ignores
/// that principal is repaid progressively over the term.
///
/// # Errors
/// `InvalidArgument` when `principal` is not positive or `term_months` is 0.
pub fn compute_effective_annual_rate(
    principal: f64,
    total_cost: f64,
    term_months: u32,
) -> Result<f64> {
    ensure_principal(principal)?;
    ensure_term(term_months)?;

    let total_interest = total_cost - principal;
    Ok((total_interest / principal) * (12.0 / term_months as f64) * 100.0)
}

/// Actuarial APR, in percent
///
/// Solves for the monthly rate `r` equating the net amount received
/// (`principal - fixed_fees`) with the present value of the level monthly
/// outflows (`monthly_payment + insurance_total / term_months`), then
/// compounds it: `((1 + r)^12 - 1) * 100`.
///
/// Returns `None` when the flows admit no rate or the term is out of range.
pub fn actuarial_annual_rate_percent(
    principal: f64,
    monthly_payment: f64,
    term_months: u32,
    fixed_fees: f64,
    insurance_total: f64,
) -> Option<f64> {
    ensure_term(term_months).ok()?;

    let outflow = monthly_payment + insurance_total / term_months as f64;
    let rate = solve_periodic_rate(principal - fixed_fees, outflow, term_months)?;
    Some(((1.0 + rate).powi(12) - 1.0) * 100.0)
}

/// Monthly rate at which `term_months` level payments of `outflow` are worth
/// `net_received` today
///
/// The present value of a level annuity falls as the rate rises, so the root
/// is unique. Newton-Raphson from a 5%-per-year guess, falling back to
/// bisection over `[-0.99, 10]`.
pub fn solve_periodic_rate(net_received: f64, outflow: f64, term_months: u32) -> Option<f64> {
    if ensure_term(term_months).is_err()
        || !(net_received > 0.0)
        || !(outflow > 0.0)
        || !outflow.is_finite()
    {
        return None;
    }

    let n = term_months as i32;
    // Residual grows with the rate; a root is where the annuity value matches
    let residual = |r: f64| net_received - outflow * annuity_factor(r, n);

    let mut rate = 0.05 / 12.0;
    for _ in 0..100 {
        let slope = -outflow * annuity_factor_slope(rate, n);
        if slope.abs() < 1e-20 {
            break;
        }

        let next = rate - residual(rate) / slope;
        if !next.is_finite() || next <= LOWER_RATE || next >= UPPER_RATE {
            break;
        }
        if (next - rate).abs() < 1e-12 {
            return Some(next);
        }
        rate = next;
    }

    bisect(residual)
}

const LOWER_RATE: f64 = -0.99;
const UPPER_RATE: f64 = 10.0;

/// Present value of 1 per month for `n` months: `(1 - (1+r)^-n) / r`
fn annuity_factor(r: f64, n: i32) -> f64 {
    if r.abs() < 1e-9 {
        let n = n as f64;
        return n - n * (n + 1.0) / 2.0 * r;
    }
    (1.0 - (1.0 + r).powi(-n)) / r
}

/// Derivative of [`annuity_factor`] with respect to `r`
fn annuity_factor_slope(r: f64, n: i32) -> f64 {
    if r.abs() < 1e-9 {
        let n = n as f64;
        return -n * (n + 1.0) / 2.0;
    }
    (n as f64 * (1.0 + r).powi(-n - 1) - annuity_factor(r, n)) / r
}

fn bisect(residual: impl Fn(f64) -> f64) -> Option<f64> {
    let (mut low, mut high) = (LOWER_RATE, UPPER_RATE);
    if residual(low) > 0.0 || residual(high) < 0.0 {
        warn!("periodic rate solver: no root in [{}, {}]", low, high);
        return None;
    }

    while high - low > 1e-12 {
        let mid = (low + high) / 2.0;
        if residual(mid) < 0.0 {
            low = mid;
        } else {
            high = mid;
        }
    }
    Some((low + high) / 2.0)
}
