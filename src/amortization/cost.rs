//! Total cost of credit

/// Insurance premium over the whole term, pro-rated on a 12-month year
///
/// Simple proportion, not compounded:
/// `principal * (annual_insurance_rate_percent / 100) * (term_months / 12)`
pub fn compute_insurance_total(
    principal: f64,
    annual_insurance_rate_percent: f64,
    term_months: u32,
) -> f64 {
    principal * (annual_insurance_rate_percent / 100.0) * (term_months as f64 / 12.0)
}

/// Total amount the borrower pays: all installments, fixed fees and insurance
///
/// Pure arithmetic with no validation; inputs are assumed non-negative.
pub fn compute_total_cost(
    monthly_payment: f64,
    term_months: u32,
    fixed_fees: f64,
    principal: f64,
    annual_insurance_rate_percent: f64,
) -> f64 {
    let insurance_total =
        compute_insurance_total(principal, annual_insurance_rate_percent, term_months);
    monthly_payment * term_months as f64 + fixed_fees + insurance_total
}
