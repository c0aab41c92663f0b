//! In-memory catalogue of credit products

use super::{loader, CreditProductPolicy};
use crate::error::{EngineError, Result};
use std::collections::HashMap;
use std::path::Path;

/// Credit products keyed by id
#[derive(Debug, Clone, Default)]
pub struct ProductCatalog {
    products: HashMap<String, CreditProductPolicy>,
}

impl ProductCatalog {
    /// Build a catalogue, rejecting inconsistent or duplicate products
    pub fn new(products: Vec<CreditProductPolicy>) -> Result<Self> {
        let mut map = HashMap::with_capacity(products.len());
        for product in products {
            product.check()?;
            if map.contains_key(&product.id) {
                return Err(EngineError::InvalidPolicy {
                    reason: format!("duplicate product id {}", product.id),
                });
            }
            map.insert(product.id.clone(), product);
        }
        Ok(Self { products: map })
    }

    /// Products available when no catalogue file is supplied
    pub fn builtin() -> Self {
        let products = [
            ("personal", "Personal loan", 5_000.0, 300_000.0, 84, 7.5, 250.0, 0.35),
            ("auto", "Car loan", 10_000.0, 600_000.0, 72, 5.9, 500.0, 0.3),
            ("mortgage", "Home loan", 100_000.0, 5_000_000.0, 300, 4.5, 2_500.0, 0.25),
            ("consumer", "Interest-free consumer credit", 1_000.0, 50_000.0, 24, 0.0, 0.0, 0.0),
        ];

        let products = products
            .iter()
            .map(|&(id, name, min, max, term, rate, fees, insurance)| {
                (
                    id.to_string(),
                    CreditProductPolicy {
                        id: id.to_string(),
                        name: name.to_string(),
                        min_amount: min,
                        max_amount: max,
                        max_term_months: term,
                        default_annual_rate_percent: Some(rate),
                        default_fixed_fees: Some(fees),
                        default_annual_insurance_rate_percent: Some(insurance),
                    },
                )
            })
            .collect();

        Self { products }
    }

    /// Load a catalogue from CSV
    pub fn from_csv_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::new(loader::load_products(path)?)
    }

    pub fn get(&self, id: &str) -> Result<&CreditProductPolicy> {
        self.products
            .get(id)
            .ok_or_else(|| EngineError::UnknownProduct(id.to_string()))
    }

    /// Products sorted by id
    pub fn products(&self) -> Vec<&CreditProductPolicy> {
        let mut products: Vec<_> = self.products.values().collect();
        products.sort_by(|a, b| a.id.cmp(&b.id));
        products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}
