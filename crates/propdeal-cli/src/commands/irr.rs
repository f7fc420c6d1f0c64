use clap::Args;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::{json, Value};

use propdeal_core::irr;

/// Arguments for the standalone IRR solver
#[derive(Args)]
pub struct IrrArgs {
    /// Periodic cash flows (comma-separated, e.g. "-100000,30000,30000,130000")
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true, required = true)]
    pub cash_flows: Vec<Decimal>,

    /// Initial guess for the periodic rate
    #[arg(long, default_value = "0.10")]
    pub guess: Decimal,
}

pub fn run_irr(args: IrrArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let solution = irr::solve_irr(&args.cash_flows, args.guess);

    Ok(json!({
        "rate": solution.rate,
        "rate_pct": solution.rate * dec!(100),
        "converged": solution.converged,
        "iterations": solution.iterations,
    }))
}
