//! Validated loan terms fed to the amortization engine

use crate::error::{ensure_principal, ensure_term, EngineError, Result};
use serde::{Deserialize, Serialize};

/// Contractual terms of one annuity loan
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanTerms {
    /// Amount borrowed
    pub principal: f64,
    /// Nominal annual rate in percent, 0 for interest-free
    pub annual_rate_percent: f64,
    pub term_months: u32,
    /// One-off fees added to the cost of credit
    #[serde(default)]
    pub fixed_fees: f64,
    /// Annual insurance rate in percent of principal
    #[serde(default)]
    pub annual_insurance_rate_percent: f64,
}

impl LoanTerms {
    /// Create terms with no fees and no insurance
    pub fn new(principal: f64, annual_rate_percent: f64, term_months: u32) -> Result<Self> {
        let terms = Self {
            principal,
            annual_rate_percent,
            term_months,
            fixed_fees: 0.0,
            annual_insurance_rate_percent: 0.0,
        };
        terms.validate()?;
        Ok(terms)
    }

    pub fn with_fixed_fees(mut self, fixed_fees: f64) -> Result<Self> {
        self.fixed_fees = fixed_fees;
        self.validate()?;
        Ok(self)
    }

    pub fn with_insurance_rate(mut self, annual_insurance_rate_percent: f64) -> Result<Self> {
        self.annual_insurance_rate_percent = annual_insurance_rate_percent;
        self.validate()?;
        Ok(self)
    }

    /// Check the invariants: positive principal, at least one month, and
    /// non-negative rate, fees and insurance
    pub fn validate(&self) -> Result<()> {
        ensure_principal(self.principal)?;
        ensure_term(self.term_months)?;
        non_negative("annual_rate_percent", self.annual_rate_percent)?;
        non_negative("fixed_fees", self.fixed_fees)?;
        non_negative(
            "annual_insurance_rate_percent",
            self.annual_insurance_rate_percent,
        )
    }

    pub fn is_interest_free(&self) -> bool {
        self.annual_rate_percent == 0.0
    }
}

fn non_negative(param: &'static str, value: f64) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(EngineError::InvalidArgument {
            param,
            reason: format!("must be non-negative, got {}", value),
        });
    }
    Ok(())
}
