use clap::Args;
use rust_decimal::Decimal;
use serde_json::{json, Value};

use propdeal_core::amortization;

/// Arguments for the mortgage payment calculation
#[derive(Args)]
pub struct PaymentArgs {
    /// Loan principal in AED
    #[arg(long)]
    pub principal: Decimal,

    /// Annual interest rate, percent
    #[arg(long)]
    pub annual_rate_pct: Decimal,

    /// Amortization term in years
    #[arg(long)]
    pub years: u32,

    /// Also report the balance remaining after this many payments
    #[arg(long)]
    pub after_months: Option<u32>,
}

pub fn run_payment(args: PaymentArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let payment = amortization::monthly_payment(args.principal, args.annual_rate_pct, args.years);

    let mut result = json!({
        "monthly_payment": payment,
        "total_paid": payment * Decimal::from(args.years * 12),
    });

    if let Some(months) = args.after_months {
        let balance =
            amortization::remaining_balance(args.principal, args.annual_rate_pct, args.years, months);
        result["remaining_balance"] = serde_json::to_value(balance)?;
        result["principal_paid"] = serde_json::to_value(args.principal - balance)?;
    }

    Ok(result)
}
