//! Credit product policy

use crate::error::{EngineError, Result, MAX_TERM_MONTHS};
use crate::loan::LoanRequest;
use serde::{Deserialize, Serialize};

/// Bounds and default pricing of one credit product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditProductPolicy {
    pub id: String,
    pub name: String,
    pub min_amount: f64,
    pub max_amount: f64,
    pub max_term_months: u32,

    // Template used to pre-fill a simulation
    pub default_annual_rate_percent: Option<f64>,
    pub default_fixed_fees: Option<f64>,
    pub default_annual_insurance_rate_percent: Option<f64>,
}

impl CreditProductPolicy {
    /// Create a product with no default pricing
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        min_amount: f64,
        max_amount: f64,
        max_term_months: u32,
    ) -> Result<Self> {
        let policy = Self {
            id: id.into(),
            name: name.into(),
            min_amount,
            max_amount,
            max_term_months,
            default_annual_rate_percent: None,
            default_fixed_fees: None,
            default_annual_insurance_rate_percent: None,
        };
        policy.check()?;
        Ok(policy)
    }

    /// Attach default rate, fees and insurance
    pub fn with_defaults(
        mut self,
        annual_rate_percent: Option<f64>,
        fixed_fees: Option<f64>,
        annual_insurance_rate_percent: Option<f64>,
    ) -> Self {
        self.default_annual_rate_percent = annual_rate_percent;
        self.default_fixed_fees = fixed_fees;
        self.default_annual_insurance_rate_percent = annual_insurance_rate_percent;
        self
    }

    /// Check `min_amount <= max_amount` and a maximum term in `1..=MAX_TERM_MONTHS`
    pub fn check(&self) -> Result<()> {
        if !(self.min_amount <= self.max_amount) {
            return Err(EngineError::InvalidPolicy {
                reason: format!(
                    "{}: min_amount {} exceeds max_amount {}",
                    self.id, self.min_amount, self.max_amount
                ),
            });
        }
        if self.max_term_months == 0 || self.max_term_months > MAX_TERM_MONTHS {
            return Err(EngineError::InvalidPolicy {
                reason: format!(
                    "{}: max_term_months must be between 1 and {}, got {}",
                    self.id, MAX_TERM_MONTHS, self.max_term_months
                ),
            });
        }
        Ok(())
    }

    /// Fill the request's missing rate, fees and insurance from this product
    ///
    /// Values the user entered win over the product template.
    pub fn apply_defaults(&self, request: &LoanRequest) -> LoanRequest {
        LoanRequest {
            product_id: request.product_id.clone(),
            amount: request.amount,
            months: request.months,
            annual_rate: request.annual_rate.or(self.default_annual_rate_percent),
            fees: request.fees.or(self.default_fixed_fees),
            insurance_rate: request
                .insurance_rate
                .or(self.default_annual_insurance_rate_percent),
        }
    }
}
