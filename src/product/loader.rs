//! Load the credit product catalogue from CSV
//!
//! Columns: `id,name,min_amount,max_amount,max_term_months,
//! default_annual_rate_percent,default_fixed_fees,default_annual_insurance_rate_percent`.
//! Empty default cells mean the product has no template value.

use super::CreditProductPolicy;
use crate::error::{EngineError, Result};
use csv::Trim;
use std::io::Read;
use std::path::Path;

/// Default path to the product catalogue
pub const DEFAULT_CATALOG_PATH: &str = "data/products.csv";

#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    id: String,
    name: String,
    min_amount: f64,
    max_amount: f64,
    max_term_months: u32,
    default_annual_rate_percent: Option<f64>,
    default_fixed_fees: Option<f64>,
    default_annual_insurance_rate_percent: Option<f64>,
}

impl CsvRow {
    fn to_policy(self, row: usize) -> Result<CreditProductPolicy> {
        if self.id.is_empty() {
            return Err(EngineError::Parse {
                row,
                reason: "id is empty".to_string(),
            });
        }

        let policy = CreditProductPolicy::new(
            self.id,
            self.name,
            self.min_amount,
            self.max_amount,
            self.max_term_months,
        )?;

        Ok(policy.with_defaults(
            self.default_annual_rate_percent,
            self.default_fixed_fees,
            self.default_annual_insurance_rate_percent,
        ))
    }
}

/// Load all products from a CSV file
pub fn load_products<P: AsRef<Path>>(path: P) -> Result<Vec<CreditProductPolicy>> {
    let file = std::fs::File::open(path)?;
    load_products_from_reader(file)
}

/// Load products from any reader
pub fn load_products_from_reader<R: Read>(reader: R) -> Result<Vec<CreditProductPolicy>> {
    let mut csv_reader = csv::ReaderBuilder::new().trim(Trim::All).from_reader(reader);
    let mut products = Vec::new();

    for (index, result) in csv_reader.deserialize().enumerate() {
        let row: CsvRow = result?;
        products.push(row.to_policy(index + 2)?);
    }

    Ok(products)
}
