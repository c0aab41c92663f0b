//! A simulation request as entered by a user

use super::LoanTerms;
use crate::error::{EngineError, Result};
use crate::validation::SimulationInput;
use serde::{Deserialize, Serialize};

/// Raw simulation request against a credit product
///
/// Every numeric field may be missing: rate, fees and insurance are filled from
/// the product's defaults, amount and term are checked by the validator.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LoanRequest {
    pub product_id: String,
    pub amount: Option<f64>,
    pub months: Option<u32>,
    pub annual_rate: Option<f64>,
    pub fees: Option<f64>,
    pub insurance_rate: Option<f64>,
}

impl LoanRequest {
    pub fn new(product_id: impl Into<String>, amount: f64, months: u32) -> Self {
        Self {
            product_id: product_id.into(),
            amount: Some(amount),
            months: Some(months),
            ..Default::default()
        }
    }

    pub fn with_annual_rate(mut self, annual_rate: f64) -> Self {
        self.annual_rate = Some(annual_rate);
        self
    }

    pub fn with_fees(mut self, fees: f64) -> Self {
        self.fees = Some(fees);
        self
    }

    pub fn with_insurance_rate(mut self, insurance_rate: f64) -> Self {
        self.insurance_rate = Some(insurance_rate);
        self
    }

    /// The fields the product policy check looks at
    pub fn simulation_input(&self) -> SimulationInput {
        SimulationInput {
            amount: self.amount,
            months: self.months,
            annual_rate: self.annual_rate,
        }
    }

    /// Build loan terms; missing fees and insurance count as 0
    pub fn to_terms(&self) -> Result<LoanTerms> {
        let amount = self
            .amount
            .ok_or_else(|| EngineError::invalid("amount", "missing"))?;
        let months = self
            .months
            .ok_or_else(|| EngineError::invalid("months", "missing"))?;
        let annual_rate = self
            .annual_rate
            .ok_or_else(|| EngineError::invalid("annual_rate", "missing"))?;

        LoanTerms::new(amount, annual_rate, months)?
            .with_fixed_fees(self.fees.unwrap_or(0.0))?
            .with_insurance_rate(self.insurance_rate.unwrap_or(0.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_terms() {
        let terms = LoanRequest::new("personal", 20_000.0, 36)
            .with_annual_rate(7.5)
            .with_fees(250.0)
            .to_terms()
            .unwrap();
        assert_eq!(terms.principal, 20_000.0);
        assert_eq!(terms.term_months, 36);
        assert_eq!(terms.fixed_fees, 250.0);
        assert_eq!(terms.annual_insurance_rate_percent, 0.0);
    }

    #[test]
    fn test_missing_rate() {
        let result = LoanRequest::new("personal", 20_000.0, 36).to_terms();
        assert!(matches!(
            result,
            Err(EngineError::InvalidArgument { param: "annual_rate", .. })
        ));
    }

    #[test]
    fn test_simulation_input() {
        let input = LoanRequest::new("auto", 9_000.0, 12)
            .with_annual_rate(4.0)
            .simulation_input();
        assert_eq!(input.amount, Some(9_000.0));
        assert_eq!(input.months, Some(12));
        assert_eq!(input.annual_rate, Some(4.0));
    }
}
