//! Full credit simulation: validate, price, disclose and schedule
//!
//! All derived figures are computed from the unrounded monthly payment; only
//! the values placed in [`SimulationResult`] are rounded to cents.

use crate::amortization::{
    actuarial_annual_rate_percent, compute_effective_annual_rate, compute_insurance_total,
    compute_monthly_payment, compute_total_cost, generate_amortization_schedule, round_currency,
    AmortizationRow,
};
use crate::error::Result;
use crate::loan::{LoanRequest, LoanTerms};
use crate::product::ProductCatalog;
use crate::validation::{validate, ValidationOutcome};
use chrono::{DateTime, Utc};
use log::{debug, info, warn};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Figures shown to the borrower, rounded to 2 decimal places
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationResult {
    pub monthly_payment: f64,
    pub total_cost: f64,
    /// Linear annualization of finance charges (not an IRR)
    pub effective_annual_rate_percent: f64,
    /// Annualized IRR of the borrower's cash flows, when solvable
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actuarial_apr_percent: Option<f64>,
    pub amortization: Vec<AmortizationRow>,
}

/// Run the engine over one set of loan terms
pub fn simulate(terms: &LoanTerms) -> Result<SimulationResult> {
    terms.validate()?;

    let payment = compute_monthly_payment(
        terms.principal,
        terms.annual_rate_percent,
        terms.term_months,
    )?;

    let total_cost = compute_total_cost(
        payment,
        terms.term_months,
        terms.fixed_fees,
        terms.principal,
        terms.annual_insurance_rate_percent,
    );

    let effective_rate =
        compute_effective_annual_rate(terms.principal, total_cost, terms.term_months)?;

    let insurance_total = compute_insurance_total(
        terms.principal,
        terms.annual_insurance_rate_percent,
        terms.term_months,
    );
    let actuarial_apr = actuarial_annual_rate_percent(
        terms.principal,
        payment,
        terms.term_months,
        terms.fixed_fees,
        insurance_total,
    );

    let amortization = generate_amortization_schedule(
        terms.principal,
        payment,
        terms.annual_rate_percent,
        terms.term_months,
    )?;

    debug!(
        "simulated {:.2} over {} months: payment {:.6}, total {:.6}",
        terms.principal, terms.term_months, payment, total_cost
    );

    Ok(SimulationResult {
        monthly_payment: round_currency(payment),
        total_cost: round_currency(total_cost),
        effective_annual_rate_percent: round_currency(effective_rate),
        actuarial_apr_percent: actuarial_apr.map(round_currency),
        amortization,
    })
}

/// A completed simulation as it is handed to storage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationRecord {
    pub product_id: String,
    #[serde(flatten)]
    pub terms: LoanTerms,
    #[serde(flatten)]
    pub result: SimulationResult,
    pub created_at: DateTime<Utc>,
}

impl SimulationRecord {
    pub fn new(product_id: impl Into<String>, terms: LoanTerms, result: SimulationResult) -> Self {
        Self {
            product_id: product_id.into(),
            terms,
            result,
            created_at: Utc::now(),
        }
    }
}

/// What happened to a simulation request
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum SimulationOutcome {
    /// The request broke the product's rules; nothing was computed
    Rejected(ValidationOutcome),
    Completed(SimulationRecord),
}

impl SimulationOutcome {
    pub fn record(&self) -> Option<&SimulationRecord> {
        match self {
            SimulationOutcome::Completed(record) => Some(record),
            SimulationOutcome::Rejected(_) => None,
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, SimulationOutcome::Completed(_))
    }
}

/// Catalogue-backed simulation runner
///
/// # Example
/// ```ignore
/// let runner = SimulationRunner::from_csv_path("data/products.csv")?;
/// let request = LoanRequest::new("personal", 50_000.0, 48);
/// if let SimulationOutcome::Completed(record) = runner.run(&request)? {
///     println!("{}", record.result.monthly_payment);
/// }
/// ```
#[derive(Debug, Clone)]
pub struct SimulationRunner {
    catalog: ProductCatalog,
}

impl SimulationRunner {
    pub fn new(catalog: ProductCatalog) -> Self {
        Self { catalog }
    }

    /// Runner over the built-in products
    pub fn builtin() -> Self {
        Self::new(ProductCatalog::builtin())
    }

    /// Runner over a catalogue CSV file
    pub fn from_csv_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self::new(ProductCatalog::from_csv_path(path)?))
    }

    pub fn catalog(&self) -> &ProductCatalog {
        &self.catalog
    }

    /// Fill product defaults, check the product rules, then simulate
    ///
    /// # Errors
    /// `UnknownProduct` when the request names no catalogued product, or
    /// `InvalidArgument` when a value the rules do not cover (fees, insurance)
    /// is negative.
    pub fn run(&self, request: &LoanRequest) -> Result<SimulationOutcome> {
        let product = self.catalog.get(&request.product_id)?;
        let filled = product.apply_defaults(request);

        let outcome = validate(&filled.simulation_input(), product);
        if !outcome.is_valid {
            warn!(
                "request for {} rejected: {}",
                product.id,
                outcome.errors.join("; ")
            );
            return Ok(SimulationOutcome::Rejected(outcome));
        }

        let terms = filled.to_terms()?;
        let result = simulate(&terms)?;
        Ok(SimulationOutcome::Completed(SimulationRecord::new(
            product.id.clone(),
            terms,
            result,
        )))
    }

    /// Run many requests in parallel; results keep the input order
    pub fn run_batch(&self, requests: &[LoanRequest]) -> Vec<Result<SimulationOutcome>> {
        let outcomes: Vec<_> = requests.par_iter().map(|request| self.run(request)).collect();

        let completed = outcomes
            .iter()
            .filter(|outcome| matches!(outcome, Ok(o) if o.is_completed()))
            .count();
        info!("batch: {} of {} requests simulated", completed, requests.len());

        outcomes
    }
}

impl Default for SimulationRunner {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_six_percent_two_year_scenario() {
        let terms = LoanTerms::new(100_000.0, 6.0, 24).unwrap();
        let result = simulate(&terms).unwrap();

        assert_abs_diff_eq!(result.monthly_payment, 4432.06, epsilon = 1e-9);
        // 4432.061025... * 24 = 106369.4646
        assert_abs_diff_eq!(result.total_cost, 106_369.46, epsilon = 1e-6);
        assert_abs_diff_eq!(result.effective_annual_rate_percent, 3.18, epsilon = 1e-9);
        assert_eq!(result.amortization.len(), 24);
        assert_abs_diff_eq!(result.amortization[23].remaining_balance, 0.0, epsilon = 0.01);
    }

    #[test]
    fn test_interest_free_scenario() {
        let terms = LoanTerms::new(12_000.0, 0.0, 12).unwrap();
        let result = simulate(&terms).unwrap();

        assert_eq!(result.monthly_payment, 1_000.0);
        assert_eq!(result.total_cost, 12_000.0);
        assert_eq!(result.effective_annual_rate_percent, 0.0);
        assert!(result
            .amortization
            .iter()
            .all(|row| row.interest_portion == 0.0 && row.principal_portion == 1_000.0));
        assert_eq!(result.amortization[11].remaining_balance, 0.0);
    }

    #[test]
    fn test_fees_and_insurance_in_cost() {
        let terms = LoanTerms::new(20_000.0, 0.0, 12)
            .and_then(|t| t.with_fixed_fees(100.0))
            .and_then(|t| t.with_insurance_rate(0.5))
            .unwrap();
        let result = simulate(&terms).unwrap();

        assert_eq!(result.monthly_payment, 1_666.67);
        // 20000 installments + 100 fees + 100 insurance
        assert_abs_diff_eq!(result.total_cost, 20_200.0, epsilon = 1e-6);
        assert_abs_diff_eq!(result.effective_annual_rate_percent, 1.0, epsilon = 1e-9);
        assert!(result.actuarial_apr_percent.unwrap() > 1.0);
    }

    #[test]
    fn test_result_json_shape() {
        let terms = LoanTerms::new(12_000.0, 0.0, 12).unwrap();
        let json = serde_json::to_value(simulate(&terms).unwrap()).unwrap();

        assert_eq!(json["monthlyPayment"], 1000.0);
        assert_eq!(json["amortization"][0]["month"], 1);
        assert!(json["amortization"][0].get("remainingBalance").is_some());
        assert!(json.get("effectiveAnnualRatePercent").is_some());
    }

    #[test]
    fn test_runner_uses_product_defaults() {
        let runner = SimulationRunner::builtin();
        let request = LoanRequest::new("personal", 50_000.0, 48);

        let outcome = runner.run(&request).unwrap();
        let record = outcome.record().expect("should complete");
        assert_eq!(record.product_id, "personal");
        assert_eq!(record.terms.annual_rate_percent, 7.5);
        assert_eq!(record.terms.fixed_fees, 250.0);
        assert_eq!(record.terms.annual_insurance_rate_percent, 0.35);
        assert_eq!(record.result.amortization.len(), 48);
    }

    #[test]
    fn test_runner_matches_direct_simulation() {
        let runner = SimulationRunner::builtin();
        let request = LoanRequest::new("personal", 100_000.0, 24)
            .with_annual_rate(6.0)
            .with_fees(0.0)
            .with_insurance_rate(0.0);

        let outcome = runner.run(&request).unwrap();
        let record = outcome.record().unwrap();
        let direct = simulate(&LoanTerms::new(100_000.0, 6.0, 24).unwrap()).unwrap();
        assert_eq!(record.result, direct);
    }

    #[test]
    fn test_runner_rejects_out_of_policy() {
        let runner = SimulationRunner::builtin();
        let request = LoanRequest::new("personal", 1_000_000.0, 120);

        match runner.run(&request).unwrap() {
            SimulationOutcome::Rejected(outcome) => {
                assert!(!outcome.is_valid);
                assert_eq!(outcome.errors.len(), 2);
            }
            other => panic!("expected rejection, got {:?}", other),
        }
    }

    #[test]
    fn test_runner_rejects_zero_amount_on_open_product() {
        let product = crate::CreditProductPolicy::new("open", "Open", 0.0, 1_000.0, 12)
            .unwrap()
            .with_defaults(Some(5.0), None, None);
        let runner = SimulationRunner::new(ProductCatalog::new(vec![product]).unwrap());

        match runner.run(&LoanRequest::new("open", 0.0, 12)).unwrap() {
            SimulationOutcome::Rejected(outcome) => {
                assert_eq!(outcome.errors, vec!["minimum amount is 0"]);
            }
            other => panic!("expected rejection, got {:?}", other),
        }
    }

    #[test]
    fn test_runner_unknown_product() {
        let runner = SimulationRunner::builtin();
        let result = runner.run(&LoanRequest::new("yacht", 10_000.0, 12));
        assert!(matches!(result, Err(EngineError::UnknownProduct(_))));
    }

    #[test]
    fn test_batch_preserves_order() {
        let runner = SimulationRunner::builtin();
        let requests = vec![
            LoanRequest::new("consumer", 12_000.0, 12),
            LoanRequest::new("personal", 100.0, 12),
            LoanRequest::new("nope", 5_000.0, 12),
            LoanRequest::new("auto", 80_000.0, 60),
        ];

        let outcomes = runner.run_batch(&requests);
        assert_eq!(outcomes.len(), 4);
        assert_eq!(
            outcomes[0].as_ref().unwrap().record().unwrap().result.monthly_payment,
            1_000.0
        );
        assert!(!outcomes[1].as_ref().unwrap().is_completed());
        assert!(outcomes[2].is_err());
        assert_eq!(
            outcomes[3].as_ref().unwrap().record().unwrap().product_id,
            "auto"
        );
    }

    #[test]
    fn test_record_serializes_flat() {
        let terms = LoanTerms::new(12_000.0, 0.0, 12).unwrap();
        let record = SimulationRecord::new("consumer", terms, simulate(&terms).unwrap());
        let json = serde_json::to_value(SimulationOutcome::Completed(record)).unwrap();

        assert_eq!(json["status"], "completed");
        assert_eq!(json["productId"], "consumer");
        assert_eq!(json["principal"], 12_000.0);
        assert_eq!(json["monthlyPayment"], 1_000.0);
        assert!(json.get("createdAt").is_some());
    }
}
