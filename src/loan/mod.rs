//! Loan terms and simulation requests

mod terms;
mod request;
pub mod loader;

pub use terms::LoanTerms;
pub use request::LoanRequest;
pub use loader::{load_requests, load_requests_from_reader};
