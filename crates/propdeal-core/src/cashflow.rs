//! Financing split, income/expense roll-up, yields, and the simplified
//! multi-year ROI approximation.

use rust_decimal::{Decimal, MathematicalOps};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::amortization;
use crate::types::{DealInputs, Money, Percent};

/// Government (DLD) transfer fee, flat percentage of the full price.
const TRANSFER_FEE_RATE: Decimal = dec!(0.04);

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Financing terms derived once per deal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancingResult {
    /// Equity paid at handover, computed against the financed base.
    pub down_payment: Money,
    /// Financed principal: `max(0, financed base - down payment)`.
    pub loan_amount: Money,
    /// Off-plan installments paid before handover, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pre_handover_cash: Option<Money>,
    /// Down payment + pre-handover cash + agent fee + transfer fee +
    /// additional upfront costs.
    pub total_initial_investment: Money,
    /// Level monthly principal-and-interest payment.
    pub monthly_payment: Money,
}

/// Monthly and annual income, expenses, and the yield/coverage ratios.
///
/// Ratios that divide by a quantity the deal does not have are `None`:
/// DSCR without a mortgage, yields without a price. Callers render the
/// sentinel instead of a fake zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncomeExpenseResult {
    /// Gross income less vacancy loss.
    pub effective_monthly_income: Money,
    /// Maintenance + management + fixed fee + insurance/12 + other/12.
    pub monthly_operating_expenses: Money,
    pub monthly_cash_flow: Money,
    pub annual_cash_flow: Money,
    /// Annual net operating income. Pre-financing by definition: excludes
    /// debt service.
    pub noi: Money,
    pub gross_yield_pct: Option<Percent>,
    pub net_yield_pct: Option<Percent>,
    /// Monthly NOI over the monthly payment.
    pub dscr: Option<Decimal>,
}

// ---------------------------------------------------------------------------
// Financing
// ---------------------------------------------------------------------------

/// Split the price into equity, loan, and acquisition costs.
///
/// On an off-plan schedule the pre-handover share is paid in cash and only
/// the remainder is financed. Inconsistent percentage splits are computed
/// as given and surfaced as warnings, never clamped.
pub fn compute_financing(inputs: &DealInputs) -> (FinancingResult, Vec<String>) {
    let mut warnings = Vec::new();
    let price = inputs.property_price;

    if inputs.down_payment_pct > dec!(100) {
        warnings.push(format!(
            "Down payment {}% exceeds 100% of the financed base",
            inputs.down_payment_pct
        ));
    }

    let (pre_handover_cash, financed_base) = match inputs.pre_handover_pct {
        Some(pre_pct) => {
            if pre_pct + inputs.down_payment_pct > dec!(100) {
                warnings.push(format!(
                    "Pre-handover {}% plus down payment {}% exceed 100% of price — \
                     computing with the given split",
                    pre_pct, inputs.down_payment_pct
                ));
            }
            let pre = price * pre_pct / dec!(100);
            (Some(pre), price - pre)
        }
        None => (None, price),
    };

    let down_payment = financed_base * inputs.down_payment_pct / dec!(100);
    let loan_amount = (financed_base - down_payment).max(Decimal::ZERO);

    let agent_fee = price * inputs.agent_fee_pct / dec!(100);
    let transfer_fee = if inputs.transfer_fee_enabled {
        price * TRANSFER_FEE_RATE
    } else {
        Decimal::ZERO
    };

    let total_initial_investment = down_payment
        + pre_handover_cash.unwrap_or_default()
        + agent_fee
        + transfer_fee
        + inputs.additional_upfront_costs;

    let monthly_payment = amortization::monthly_payment(
        loan_amount,
        inputs.annual_interest_rate_pct,
        inputs.loan_term_years,
    );

    (
        FinancingResult {
            down_payment,
            loan_amount,
            pre_handover_cash,
            total_initial_investment,
            monthly_payment,
        },
        warnings,
    )
}

// ---------------------------------------------------------------------------
// Income / expenses / yields
// ---------------------------------------------------------------------------

/// Roll up income and operating expenses around the given debt service.
///
/// Maintenance and management fees apply to effective income, not gross
/// rent: a vacant month generates neither rent nor percentage fees.
pub fn compute_income_expense(inputs: &DealInputs, monthly_payment: Money) -> IncomeExpenseResult {
    let gross_monthly_income = inputs.monthly_rent + inputs.additional_monthly_income;
    let effective_monthly_income =
        gross_monthly_income * (Decimal::ONE - inputs.vacancy_rate_pct / dec!(100));

    let maintenance = effective_monthly_income * inputs.maintenance_rate_pct / dec!(100);
    let management = effective_monthly_income * inputs.management_fee_pct / dec!(100);
    let monthly_operating_expenses = maintenance
        + management
        + inputs.fixed_monthly_fee
        + inputs.annual_insurance / dec!(12)
        + inputs.other_annual_expenses / dec!(12);

    let monthly_noi = effective_monthly_income - monthly_operating_expenses;
    let monthly_cash_flow = monthly_noi - monthly_payment;
    let annual_cash_flow = monthly_cash_flow * dec!(12);
    let noi = monthly_noi * dec!(12);

    let price = inputs.property_price;
    let (gross_yield_pct, net_yield_pct) = if price > Decimal::ZERO {
        let annual_gross = gross_monthly_income * dec!(12);
        (
            Some(annual_gross / price * dec!(100)),
            Some(noi / price * dec!(100)),
        )
    } else {
        (None, None)
    };

    let dscr = if monthly_payment > Decimal::ZERO {
        Some(monthly_noi / monthly_payment)
    } else {
        None
    };

    IncomeExpenseResult {
        effective_monthly_income,
        monthly_operating_expenses,
        monthly_cash_flow,
        annual_cash_flow,
        noi,
        gross_yield_pct,
        net_yield_pct,
        dscr,
    }
}

/// Annual cash flow over the equity actually put down.
pub fn cash_on_cash(annual_cash_flow: Money, down_payment: Money) -> Option<Percent> {
    if down_payment <= Decimal::ZERO {
        return None;
    }
    Some(annual_cash_flow / down_payment * dec!(100))
}

/// Simplified total-return ROI over a horizon: cumulative cash flow plus
/// principal paydown plus appreciation gain, over the down payment.
///
/// This deliberately ignores cash-flow timing; the IRR module is the
/// time-value-correct counterpart.
pub fn roi_over_horizon(
    inputs: &DealInputs,
    financing: &FinancingResult,
    annual_cash_flow: Money,
    horizon_years: u32,
) -> Option<Percent> {
    if financing.down_payment <= Decimal::ZERO {
        return None;
    }

    let remaining = amortization::remaining_balance(
        financing.loan_amount,
        inputs.annual_interest_rate_pct,
        inputs.loan_term_years,
        horizon_years * 12,
    );
    let principal_paid = (financing.loan_amount - remaining).max(Decimal::ZERO);

    let growth = (Decimal::ONE + inputs.appreciation_rate_pct / dec!(100))
        .powd(Decimal::from(horizon_years));
    let appreciation_gain =
        (inputs.property_price * growth - inputs.property_price).max(Decimal::ZERO);

    let total_gain =
        annual_cash_flow * Decimal::from(horizon_years) + principal_paid + appreciation_gain;

    Some(total_gain / financing.down_payment * dec!(100))
}
