//! Credit Simulator - loan amortization and cost-disclosure engine
//!
//! This library provides:
//! - Annuity payment calculation for fixed-rate loans
//! - Total cost of credit including fees and pro-rated insurance
//! - Linear effective annual rate and actuarial APR
//! - Month-by-month amortization schedules
//! - Credit product policies, catalogue loading and request validation
//! - Single and batch simulation runners

pub mod amortization;
pub mod error;
pub mod loan;
pub mod product;
pub mod simulation;
pub mod validation;

// Re-export commonly used types
pub use amortization::AmortizationRow;
pub use error::{EngineError, Result, MAX_TERM_MONTHS};
pub use loan::{LoanRequest, LoanTerms};
pub use product::{CreditProductPolicy, ProductCatalog};
pub use simulation::{simulate, SimulationOutcome, SimulationRecord, SimulationResult, SimulationRunner};
pub use validation::{validate, SimulationInput, ValidationOutcome};
