use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use propdeal_core::grading::{self, GradeMetrics};

use crate::commands::PolicyChoice;

/// Arguments for grading pre-computed metrics.
///
/// Omitted ratios are treated as unavailable and draw that factor's
/// neutral sub-score, the same as in the full pipeline.
#[derive(Args)]
pub struct GradeArgs {
    /// Monthly cash flow after debt service, AED
    #[arg(long, allow_hyphen_values = true, default_value = "0")]
    pub monthly_cash_flow: Decimal,

    /// Net rental yield, percent
    #[arg(long)]
    pub net_yield_pct: Option<Decimal>,

    /// Gross rental yield, percent
    #[arg(long)]
    pub gross_yield_pct: Option<Decimal>,

    /// Five-year return on invested equity, percent
    #[arg(long)]
    pub roi_5y_pct: Option<Decimal>,

    /// Debt service coverage ratio
    #[arg(long)]
    pub dscr: Option<Decimal>,

    /// Five-year IRR, percent
    #[arg(long)]
    pub irr_5y_pct: Option<Decimal>,

    /// Grading policy
    #[arg(long, value_enum, default_value = "standard")]
    pub policy: PolicyChoice,
}

pub fn run_grade(args: GradeArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let metrics = GradeMetrics {
        monthly_cash_flow: args.monthly_cash_flow,
        net_yield_pct: args.net_yield_pct,
        gross_yield_pct: args.gross_yield_pct,
        roi_5y_pct: args.roi_5y_pct,
        dscr: args.dscr,
        irr_5y_pct: args.irr_5y_pct,
    };

    let result = grading::grade(&metrics, &args.policy.to_policy());
    Ok(serde_json::to_value(result)?)
}
