//! Month-by-month amortization schedule

use super::payment::monthly_rate;
use super::rounding::round_currency;
use crate::error::{ensure_principal, ensure_term, Result};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::io::Write;

/// One month of the schedule, amounts rounded to cents
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AmortizationRow {
    /// 1-based month number
    pub month: u32,
    pub interest_portion: f64,
    pub principal_portion: f64,
    /// Outstanding principal after this month's payment, never negative
    pub remaining_balance: f64,
}

/// Split each payment between interest and principal for every month of the term
///
/// Returns exactly `term_months` rows numbered 1..=term_months. Feed the
/// unrounded payment from
/// [`compute_monthly_payment`](super::compute_monthly_payment) to get a final
/// balance of zero.
///
/// A payment smaller than the first month's interest produces negative
/// principal portions and a growing balance. That is reported in the log but
/// not rejected: payment adequacy is an input policy concern.
///
/// # Errors
/// `InvalidArgument` when `term_months` is 0 or `principal` is not positive.
pub fn generate_amortization_schedule(
    principal: f64,
    monthly_payment: f64,
    annual_rate_percent: f64,
    term_months: u32,
) -> Result<Vec<AmortizationRow>> {
    ensure_term(term_months)?;
    ensure_principal(principal)?;

    let r = monthly_rate(annual_rate_percent);
    if monthly_payment < principal * r {
        warn!(
            "payment {:.2} does not cover first month interest {:.2}; balance will grow",
            monthly_payment,
            principal * r
        );
    }

    let rows: Vec<AmortizationRow> = (1..=term_months)
        .scan(principal, |balance, month| {
            let interest = *balance * r;
            let principal_portion = monthly_payment - interest;
            // Carry the unrounded balance; round only the emitted row
            *balance -= principal_portion;

            Some(AmortizationRow {
                month,
                interest_portion: round_currency(interest),
                principal_portion: round_currency(principal_portion),
                remaining_balance: round_currency(*balance).max(0.0),
            })
        })
        .collect();

    debug!(
        "schedule: {} rows, final balance {:.2}",
        rows.len(),
        rows.last().map_or(0.0, |row| row.remaining_balance)
    );
    Ok(rows)
}

/// Write a schedule as CSV with a header row
pub fn write_schedule_csv<W: Write>(rows: &[AmortizationRow], writer: W) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for row in rows {
        csv_writer.serialize(row)?;
    }
    csv_writer.flush()?;
    Ok(())
}
