use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use propdeal_core::engine;
use propdeal_core::types::DealInputs;

use crate::commands::PolicyChoice;
use crate::input;

/// Arguments for the full deal analysis.
///
/// Inputs come from a JSON file, piped stdin, or individual flags. Flags
/// always win: they are applied on top of whatever record was loaded, so
/// `--input deal.json --monthly-rent 7500` re-runs a saved deal at a new
/// rent.
#[derive(Args)]
pub struct AnalyzeArgs {
    /// Path to JSON input file
    #[arg(long)]
    pub input: Option<String>,

    /// Purchase price in AED
    #[arg(long)]
    pub property_price: Option<Decimal>,

    /// Down payment, percent of the financed base
    #[arg(long)]
    pub down_payment_pct: Option<Decimal>,

    /// Agent commission, percent of the full price
    #[arg(long)]
    pub agent_fee_pct: Option<Decimal>,

    /// Apply the flat 4% DLD transfer fee
    #[arg(long)]
    pub transfer_fee: bool,

    /// Other one-off acquisition costs
    #[arg(long)]
    pub additional_upfront_costs: Option<Decimal>,

    /// Off-plan: percent of price paid before handover
    #[arg(long)]
    pub pre_handover_pct: Option<Decimal>,

    /// Mortgage term in years (0 = cash deal)
    #[arg(long)]
    pub loan_term_years: Option<u32>,

    /// Annual mortgage interest rate, percent
    #[arg(long)]
    pub annual_interest_rate_pct: Option<Decimal>,

    /// Expected monthly rent in AED
    #[arg(long)]
    pub monthly_rent: Option<Decimal>,

    /// Parking, storage, or other recurring monthly income
    #[arg(long)]
    pub additional_monthly_income: Option<Decimal>,

    /// Vacancy and collection loss, percent of gross income
    #[arg(long)]
    pub vacancy_rate_pct: Option<Decimal>,

    /// Maintenance allowance, percent of effective income
    #[arg(long)]
    pub maintenance_rate_pct: Option<Decimal>,

    /// Property management fee, percent of effective income
    #[arg(long)]
    pub management_fee_pct: Option<Decimal>,

    /// Fixed monthly fee (service charges billed monthly)
    #[arg(long)]
    pub fixed_monthly_fee: Option<Decimal>,

    /// Annual insurance premium
    #[arg(long)]
    pub annual_insurance: Option<Decimal>,

    /// Other annual expenses
    #[arg(long)]
    pub other_annual_expenses: Option<Decimal>,

    /// Annual appreciation, percent (defaults to 3)
    #[arg(long)]
    pub appreciation_rate_pct: Option<Decimal>,

    /// Grading policy
    #[arg(long, value_enum, default_value = "standard")]
    pub policy: PolicyChoice,
}

pub fn run_analyze(args: AnalyzeArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let mut inputs: DealInputs = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        DealInputs::default()
    };

    apply_overrides(&mut inputs, &args);

    let output = engine::analyze_with_policy(&inputs, &args.policy.to_policy());
    Ok(serde_json::to_value(output)?)
}

fn apply_overrides(inputs: &mut DealInputs, args: &AnalyzeArgs) {
    if let Some(v) = args.property_price {
        inputs.property_price = v;
    }
    if let Some(v) = args.down_payment_pct {
        inputs.down_payment_pct = v;
    }
    if let Some(v) = args.agent_fee_pct {
        inputs.agent_fee_pct = v;
    }
    if args.transfer_fee {
        inputs.transfer_fee_enabled = true;
    }
    if let Some(v) = args.additional_upfront_costs {
        inputs.additional_upfront_costs = v;
    }
    if let Some(v) = args.pre_handover_pct {
        inputs.pre_handover_pct = Some(v);
    }
    if let Some(v) = args.loan_term_years {
        inputs.loan_term_years = v;
    }
    if let Some(v) = args.annual_interest_rate_pct {
        inputs.annual_interest_rate_pct = v;
    }
    if let Some(v) = args.monthly_rent {
        inputs.monthly_rent = v;
    }
    if let Some(v) = args.additional_monthly_income {
        inputs.additional_monthly_income = v;
    }
    if let Some(v) = args.vacancy_rate_pct {
        inputs.vacancy_rate_pct = v;
    }
    if let Some(v) = args.maintenance_rate_pct {
        inputs.maintenance_rate_pct = v;
    }
    if let Some(v) = args.management_fee_pct {
        inputs.management_fee_pct = v;
    }
    if let Some(v) = args.fixed_monthly_fee {
        inputs.fixed_monthly_fee = v;
    }
    if let Some(v) = args.annual_insurance {
        inputs.annual_insurance = v;
    }
    if let Some(v) = args.other_annual_expenses {
        inputs.other_annual_expenses = v;
    }
    if let Some(v) = args.appreciation_rate_pct {
        inputs.appreciation_rate_pct = v;
    }
}
