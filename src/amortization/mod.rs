//! Amortization engine: payment, cost of credit, effective rate and schedule
//!
//! Every function here is pure. Intermediate values stay at full precision;
//! rounding to cents happens only on values surfaced to the user.

mod payment;
mod cost;
mod rate;
mod schedule;
mod rounding;

pub use payment::{compute_monthly_payment, monthly_rate};
pub use cost::{compute_insurance_total, compute_total_cost};
pub use rate::{
    actuarial_annual_rate_percent, compute_effective_annual_rate, solve_periodic_rate,
};
pub use schedule::{generate_amortization_schedule, write_schedule_csv, AmortizationRow};
pub use rounding::round_currency;
