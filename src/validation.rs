//! Pre-flight check of a simulation request against a credit product
//!
//! Every rule runs; violations are collected as human-readable messages in
//! check order. A missing value fails its field's lower-bound rule only, so
//! each field contributes at most one message. A zero amount counts as
//! missing.

use crate::product::CreditProductPolicy;
use serde::{Deserialize, Serialize};

/// The fields checked against the product bounds
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationInput {
    pub amount: Option<f64>,
    pub months: Option<u32>,
    pub annual_rate: Option<f64>,
}

/// Result of a policy check
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationOutcome {
    pub is_valid: bool,
    pub errors: Vec<String>,
}

impl ValidationOutcome {
    fn from_errors(errors: Vec<String>) -> Self {
        Self {
            is_valid: errors.is_empty(),
            errors,
        }
    }
}

/// Check amount, term and rate against the product bounds
pub fn validate(input: &SimulationInput, policy: &CreditProductPolicy) -> ValidationOutcome {
    let mut errors = Vec::new();

    match input.amount {
        Some(amount) if amount > 0.0 && amount >= policy.min_amount => {
            if amount > policy.max_amount {
                errors.push(format!("maximum amount is {}", policy.max_amount));
            }
        }
        _ => errors.push(format!("minimum amount is {}", policy.min_amount)),
    }

    match input.months {
        Some(months) if months >= 1 => {
            if months > policy.max_term_months {
                errors.push(format!("maximum term is {}", policy.max_term_months));
            }
        }
        _ => errors.push("term must be at least 1 month".to_string()),
    }

    match input.annual_rate {
        Some(rate) if rate >= 0.0 => {}
        _ => errors.push("annual rate must be non-negative".to_string()),
    }

    ValidationOutcome::from_errors(errors)
}
