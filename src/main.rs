//! Credit Simulator CLI
//!
//! Simulates one loan against a credit product and prints the payment,
//! cost disclosure and amortization schedule.

use anyhow::{bail, Context};
use clap::Parser;
use credit_simulator::amortization::write_schedule_csv;
use credit_simulator::{LoanRequest, ProductCatalog, SimulationOutcome, SimulationRunner};
use std::fs::File;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "credit_simulator", version, about = "Simulate an amortizing loan")]
struct Args {
    /// Credit product id
    #[arg(short, long, default_value = "personal")]
    product: String,

    /// Amount to borrow
    #[arg(short, long)]
    amount: f64,

    /// Term in months
    #[arg(short, long)]
    months: u32,

    /// Nominal annual rate in percent (product default if omitted)
    #[arg(short, long)]
    rate: Option<f64>,

    /// Fixed fees (product default if omitted)
    #[arg(long)]
    fees: Option<f64>,

    /// Annual insurance rate in percent (product default if omitted)
    #[arg(long)]
    insurance_rate: Option<f64>,

    /// Product catalogue CSV; built-in products when omitted
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Print the outcome as JSON
    #[arg(long)]
    json: bool,

    /// Write the full schedule to this CSV file
    #[arg(long)]
    schedule_csv: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let catalog = match &args.catalog {
        Some(path) => ProductCatalog::from_csv_path(path)
            .with_context(|| format!("loading catalogue {}", path.display()))?,
        None => ProductCatalog::builtin(),
    };
    let runner = SimulationRunner::new(catalog);

    let request = LoanRequest {
        product_id: args.product.clone(),
        amount: Some(args.amount),
        months: Some(args.months),
        annual_rate: args.rate,
        fees: args.fees,
        insurance_rate: args.insurance_rate,
    };

    let outcome = runner.run(&request)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    }

    let record = match outcome {
        SimulationOutcome::Completed(record) => record,
        SimulationOutcome::Rejected(validation) => {
            if !args.json {
                eprintln!("Simulation rejected for product {}:", request.product_id);
                for error in &validation.errors {
                    eprintln!("  - {}", error);
                }
            }
            bail!("{} policy violation(s)", validation.errors.len());
        }
    };

    if let Some(path) = &args.schedule_csv {
        let file = File::create(path)
            .with_context(|| format!("creating {}", path.display()))?;
        write_schedule_csv(&record.result.amortization, file)?;
        if !args.json {
            println!("Schedule written to: {}", path.display());
        }
    }

    if args.json {
        return Ok(());
    }

    let terms = &record.terms;
    let result = &record.result;

    println!("Credit Simulator v0.1.0");
    println!("=======================\n");
    println!("Product: {}", record.product_id);
    println!("  Amount:         {:.2}", terms.principal);
    println!("  Term:           {} months", terms.term_months);
    println!("  Annual rate:    {:.2}%", terms.annual_rate_percent);
    println!("  Fixed fees:     {:.2}", terms.fixed_fees);
    println!("  Insurance rate: {:.2}%", terms.annual_insurance_rate_percent);
    println!();
    println!("  Monthly payment:       {:.2}", result.monthly_payment);
    println!("  Total cost:            {:.2}", result.total_cost);
    println!("  Effective annual rate: {:.2}%", result.effective_annual_rate_percent);
    if let Some(apr) = result.actuarial_apr_percent {
        println!("  Actuarial APR:         {:.2}%", apr);
    }
    println!();

    println!("{:>5} {:>14} {:>14} {:>16}", "Month", "Interest", "Principal", "Balance");
    println!("{}", "-".repeat(52));
    for row in result.amortization.iter().take(24) {
        println!(
            "{:>5} {:>14.2} {:>14.2} {:>16.2}",
            row.month, row.interest_portion, row.principal_portion, row.remaining_balance
        );
    }
    if result.amortization.len() > 24 {
        println!("... ({} more months)", result.amortization.len() - 24);
    }

    Ok(())
}
