//! Run a batch of simulation requests from CSV
//!
//! Outputs one summary line per request.
//! Accepts config via environment variables:
//!   SIMULATION_INPUT   (default data/loan_requests.csv)
//!   PRODUCT_CATALOG    (default data/products.csv)
//!   SIMULATION_OUTPUT  (default batch_simulation_output.csv)
//! Pass --json to print all outcomes as JSON instead of writing CSV.

use anyhow::Context;
use credit_simulator::loan::{load_requests, loader::DEFAULT_REQUESTS_PATH};
use credit_simulator::product::DEFAULT_CATALOG_PATH;
use credit_simulator::{SimulationOutcome, SimulationRunner};
use serde::Serialize;
use std::env;
use std::time::Instant;

#[derive(Serialize)]
struct SummaryRow {
    row: usize,
    product_id: String,
    status: &'static str,
    amount: Option<f64>,
    months: Option<u32>,
    annual_rate: Option<f64>,
    monthly_payment: Option<f64>,
    total_cost: Option<f64>,
    effective_rate_pct: Option<f64>,
    actuarial_apr_pct: Option<f64>,
    detail: String,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let json_output = env::args().any(|arg| arg == "--json");
    let start = Instant::now();

    let input_path = env::var("SIMULATION_INPUT").unwrap_or_else(|_| DEFAULT_REQUESTS_PATH.to_string());
    let catalog_path = env::var("PRODUCT_CATALOG").unwrap_or_else(|_| DEFAULT_CATALOG_PATH.to_string());
    let output_path = env::var("SIMULATION_OUTPUT")
        .unwrap_or_else(|_| "batch_simulation_output.csv".to_string());

    let runner = SimulationRunner::from_csv_path(&catalog_path)
        .with_context(|| format!("loading catalogue {}", catalog_path))?;
    let requests = load_requests(&input_path)
        .with_context(|| format!("loading requests {}", input_path))?;

    if !json_output {
        println!(
            "Loaded {} products and {} requests in {:?}",
            runner.catalog().len(),
            requests.len(),
            start.elapsed()
        );
    }

    let outcomes = runner.run_batch(&requests);

    if json_output {
        let payload: Vec<serde_json::Value> = outcomes
            .iter()
            .map(|outcome| match outcome {
                Ok(outcome) => serde_json::to_value(outcome),
                Err(err) => Ok(serde_json::json!({ "status": "error", "message": err.to_string() })),
            })
            .collect::<Result<_, _>>()?;
        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }

    let mut writer = csv::Writer::from_path(&output_path)
        .with_context(|| format!("creating {}", output_path))?;

    let mut completed = 0;
    for (index, (request, outcome)) in requests.iter().zip(&outcomes).enumerate() {
        let mut row = SummaryRow {
            row: index + 1,
            product_id: request.product_id.clone(),
            status: "error",
            amount: request.amount,
            months: request.months,
            annual_rate: request.annual_rate,
            monthly_payment: None,
            total_cost: None,
            effective_rate_pct: None,
            actuarial_apr_pct: None,
            detail: String::new(),
        };

        match outcome {
            Ok(SimulationOutcome::Completed(record)) => {
                completed += 1;
                row.status = "completed";
                row.annual_rate = Some(record.terms.annual_rate_percent);
                row.monthly_payment = Some(record.result.monthly_payment);
                row.total_cost = Some(record.result.total_cost);
                row.effective_rate_pct = Some(record.result.effective_annual_rate_percent);
                row.actuarial_apr_pct = record.result.actuarial_apr_percent;
            }
            Ok(SimulationOutcome::Rejected(validation)) => {
                row.status = "rejected";
                row.detail = validation.errors.join("; ");
            }
            Err(err) => row.detail = err.to_string(),
        }

        writer.serialize(&row)?;
    }
    writer.flush()?;

    println!("Output written to {}", output_path);
    println!("\nBatch Summary:");
    println!("  Requests:  {}", requests.len());
    println!("  Completed: {}", completed);
    println!("  Other:     {}", requests.len() - completed);
    println!("\nTotal time: {:?}", start.elapsed());

    Ok(())
}
