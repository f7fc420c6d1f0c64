//! Pipeline entry point: one call turns a `DealInputs` record into the
//! full analysis aggregate.
//!
//! The stages form a strict data dependency chain: financing feeds
//! income/expense, which feeds ROI and IRR, which feed the grade. Every
//! stage is a pure function of its inputs, so repeated calls with the same
//! record produce identical results.

use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::cashflow::{self, FinancingResult, IncomeExpenseResult};
use crate::grading::{self, GradeMetrics, GradePolicy, GradeResult};
use crate::irr::{self, IrrResult};
use crate::types::{with_metadata, ComputationOutput, DealInputs, Percent};

/// Everything computed for one deal. Replaces any notion of cross-call
/// state: callers read results from here, never from the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DealAnalysis {
    pub financing: FinancingResult,
    pub income_expense: IncomeExpenseResult,
    /// Annual cash flow over the down payment. `None` for all-financed
    /// or zero-equity records.
    pub cash_on_cash_pct: Option<Percent>,
    pub roi_5y_pct: Option<Percent>,
    pub roi_10y_pct: Option<Percent>,
    pub irr_5y: IrrResult,
    pub irr_10y: IrrResult,
    pub grade: GradeResult,
}

/// Analyze a deal under the standard six-factor grading policy.
pub fn analyze(inputs: &DealInputs) -> ComputationOutput<DealAnalysis> {
    analyze_with_policy(inputs, &GradePolicy::standard())
}

/// Analyze a deal, grading under an explicit policy.
///
/// Infallible for any inputs record: degenerate ratios surface as `None`
/// sentinels and structural inconsistencies as warnings on the envelope.
pub fn analyze_with_policy(
    inputs: &DealInputs,
    policy: &GradePolicy,
) -> ComputationOutput<DealAnalysis> {
    let start = Instant::now();

    let (financing, warnings) = cashflow::compute_financing(inputs);
    let income_expense = cashflow::compute_income_expense(inputs, financing.monthly_payment);
    let cash_on_cash_pct =
        cashflow::cash_on_cash(income_expense.annual_cash_flow, financing.down_payment);

    let roi_5y_pct =
        cashflow::roi_over_horizon(inputs, &financing, income_expense.annual_cash_flow, 5);
    let roi_10y_pct =
        cashflow::roi_over_horizon(inputs, &financing, income_expense.annual_cash_flow, 10);

    let irr_5y = irr::property_irr(inputs, &financing, income_expense.monthly_cash_flow, 5);
    let irr_10y = irr::property_irr(inputs, &financing, income_expense.monthly_cash_flow, 10);

    let grade = grading::grade(
        &GradeMetrics {
            monthly_cash_flow: income_expense.monthly_cash_flow,
            net_yield_pct: income_expense.net_yield_pct,
            gross_yield_pct: income_expense.gross_yield_pct,
            roi_5y_pct,
            dscr: income_expense.dscr,
            irr_5y_pct: irr_5y.irr_pct,
        },
        policy,
    );

    let analysis = DealAnalysis {
        financing,
        income_expense,
        cash_on_cash_pct,
        roi_5y_pct,
        roi_10y_pct,
        irr_5y,
        irr_10y,
        grade,
    };

    let elapsed = start.elapsed().as_micros() as u64;

    with_metadata(
        "Dubai Residential Deal Analysis",
        inputs,
        warnings,
        elapsed,
        analysis,
    )
}
