//! Error types for the credit simulation engine
//!
//! Policy violations are not errors: they are collected into a
//! [`ValidationOutcome`](crate::validation::ValidationOutcome). The variants
//! here cover programmer errors (bad arguments passed straight to the engine)
//! and the I/O around catalogues and batch files.

use thiserror::Error;

/// Errors raised by the engine and its loaders
#[derive(Error, Debug)]
pub enum EngineError {
    /// A precondition of an engine function was violated
    #[error("Invalid argument '{param}': {reason}")]
    InvalidArgument {
        /// Name of the offending parameter
        param: &'static str,
        /// What was wrong with it
        reason: String,
    },

    /// A credit product definition is inconsistent
    #[error("Invalid credit product policy: {reason}")]
    InvalidPolicy { reason: String },

    /// No product with this id in the catalogue
    #[error("Unknown credit product: {0}")]
    UnknownProduct(String),

    /// A CSV row could be read but not interpreted
    #[error("Parse error at row {row}: {reason}")]
    Parse { row: usize, reason: String },

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl EngineError {
    pub(crate) fn invalid(param: &'static str, reason: impl Into<String>) -> Self {
        EngineError::InvalidArgument {
            param,
            reason: reason.into(),
        }
    }
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, EngineError>;

/// Longest term the engine accepts (100 years)
pub const MAX_TERM_MONTHS: u32 = 1200;

/// Fail fast on a term outside `1..=MAX_TERM_MONTHS`
pub(crate) fn ensure_term(term_months: u32) -> Result<()> {
    if term_months == 0 {
        return Err(EngineError::invalid(
            "term_months",
            "term must be at least 1 month",
        ));
    }
    if term_months > MAX_TERM_MONTHS {
        return Err(EngineError::invalid(
            "term_months",
            format!("term of {} months exceeds {}", term_months, MAX_TERM_MONTHS),
        ));
    }
    Ok(())
}

/// Fail fast on a principal that is not a positive finite amount
pub(crate) fn ensure_principal(principal: f64) -> Result<()> {
    if !principal.is_finite() || principal <= 0.0 {
        return Err(EngineError::invalid(
            "principal",
            format!("must be a positive amount, got {}", principal),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_term() {
        assert!(ensure_term(1).is_ok());
        assert!(ensure_term(MAX_TERM_MONTHS).is_ok());
        assert!(ensure_term(MAX_TERM_MONTHS + 1).is_err());
        assert!(ensure_term(u32::MAX).is_err());
        assert!(matches!(
            ensure_term(0),
            Err(EngineError::InvalidArgument { param: "term_months", .. })
        ));
    }

    #[test]
    fn test_ensure_principal() {
        assert!(ensure_principal(0.01).is_ok());
        assert!(ensure_principal(0.0).is_err());
        assert!(ensure_principal(-5.0).is_err());
        assert!(ensure_principal(f64::NAN).is_err());
    }

    #[test]
    fn test_error_display() {
        let err = EngineError::UnknownProduct("auto".to_string());
        assert_eq!(err.to_string(), "Unknown credit product: auto");
    }
}
