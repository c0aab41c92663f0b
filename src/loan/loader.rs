//! Load simulation requests from a CSV file
//!
//! Columns: `product_id,amount,months,annual_rate,fees,insurance_rate`.
//! Empty numeric cells are read as missing.

use super::LoanRequest;
use crate::error::{EngineError, Result};
use csv::{Reader, Trim};
use std::io::Read;
use std::path::Path;

/// Default location of the batch request file
pub const DEFAULT_REQUESTS_PATH: &str = "data/loan_requests.csv";

#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    product_id: String,
    amount: Option<f64>,
    months: Option<u32>,
    annual_rate: Option<f64>,
    fees: Option<f64>,
    insurance_rate: Option<f64>,
}

impl CsvRow {
    fn into_request(self, row: usize) -> Result<LoanRequest> {
        if self.product_id.is_empty() {
            return Err(EngineError::Parse {
                row,
                reason: "product_id is empty".to_string(),
            });
        }

        Ok(LoanRequest {
            product_id: self.product_id,
            amount: self.amount,
            months: self.months,
            annual_rate: self.annual_rate,
            fees: self.fees,
            insurance_rate: self.insurance_rate,
        })
    }
}

/// Load all requests from a CSV file
pub fn load_requests<P: AsRef<Path>>(path: P) -> Result<Vec<LoanRequest>> {
    let file = std::fs::File::open(path)?;
    load_requests_from_reader(file)
}

/// Load requests from any reader (e.g., string buffer, network stream)
pub fn load_requests_from_reader<R: Read>(reader: R) -> Result<Vec<LoanRequest>> {
    let mut csv_reader = csv::ReaderBuilder::new().trim(Trim::All).from_reader(reader);
    read_rows(&mut csv_reader)
}

fn read_rows<R: Read>(reader: &mut Reader<R>) -> Result<Vec<LoanRequest>> {
    let mut requests = Vec::new();

    for (index, result) in reader.deserialize().enumerate() {
        let row: CsvRow = result?;
        // +2: 1-based, after the header line
        requests.push(row.into_request(index + 2)?);
    }

    Ok(requests)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
product_id,amount,months,annual_rate,fees,insurance_rate
personal,20000,36,7.5,250,0.3
auto, 15000 ,48,,,
mortgage,,240,4.2,1500,
";

    #[test]
    fn test_load_from_reader() {
        let requests = load_requests_from_reader(SAMPLE.as_bytes()).unwrap();
        assert_eq!(requests.len(), 3);

        assert_eq!(requests[0].product_id, "personal");
        assert_eq!(requests[0].insurance_rate, Some(0.3));

        assert_eq!(requests[1].amount, Some(15_000.0));
        assert_eq!(requests[1].annual_rate, None);
        assert_eq!(requests[1].fees, None);

        assert_eq!(requests[2].amount, None);
        assert_eq!(requests[2].months, Some(240));
    }

    #[test]
    fn test_empty_product_rejected() {
        let csv = "product_id,amount,months,annual_rate,fees,insurance_rate\n,1000,12,5,,\n";
        let err = load_requests_from_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, EngineError::Parse { row: 2, .. }));
    }

    #[test]
    fn test_bad_number_rejected() {
        let csv = "product_id,amount,months,annual_rate,fees,insurance_rate\nauto,abc,12,5,,\n";
        assert!(load_requests_from_reader(csv.as_bytes()).is_err());
    }

    #[test]
    fn test_load_shipped_requests() {
        let requests = load_requests(DEFAULT_REQUESTS_PATH).expect("Failed to load requests");
        assert!(!requests.is_empty());
    }
}
