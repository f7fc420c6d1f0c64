use propdeal_core::engine::{analyze, analyze_with_policy};
use propdeal_core::grading::GradePolicy;
use propdeal_core::types::DealInputs;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// A typical ready-property deal: 1M AED apartment, 20% down, 25-year
/// mortgage at 4.5%, renting at 7,000/month.
fn marina_apartment() -> DealInputs {
    DealInputs {
        property_price: dec!(1000000),
        down_payment_pct: dec!(20),
        agent_fee_pct: dec!(2),
        transfer_fee_enabled: true,
        additional_upfront_costs: dec!(5000),
        loan_term_years: 25,
        annual_interest_rate_pct: dec!(4.5),
        monthly_rent: dec!(7000),
        vacancy_rate_pct: dec!(5),
        maintenance_rate_pct: dec!(5),
        management_fee_pct: dec!(5),
        annual_insurance: dec!(1200),
        appreciation_rate_pct: dec!(3),
        ..DealInputs::default()
    }
}

// ===========================================================================
// Full pipeline
// ===========================================================================

#[test]
fn test_full_analysis_of_typical_deal() {
    let output = analyze(&marina_apartment());
    assert!(output.warnings.is_empty());
    let a = &output.result;

    assert_eq!(a.financing.down_payment, dec!(200000));
    assert_eq!(a.financing.loan_amount, dec!(800000));
    assert_eq!(a.financing.total_initial_investment, dec!(265000));
    assert!(
        a.financing.monthly_payment > dec!(4420) && a.financing.monthly_payment < dec!(4475),
        "payment {}",
        a.financing.monthly_payment
    );

    assert_eq!(a.income_expense.effective_monthly_income, dec!(6650));
    assert_eq!(a.income_expense.noi, dec!(70620));
    assert_eq!(a.income_expense.gross_yield_pct, Some(dec!(8.4)));
    assert_eq!(a.income_expense.net_yield_pct, Some(dec!(7.062)));

    let dscr = a.income_expense.dscr.unwrap();
    assert!(dscr > dec!(1.31) && dscr < dec!(1.34), "dscr {dscr}");

    let roi5 = a.roi_5y_pct.unwrap();
    assert!(roi5 > dec!(165) && roi5 < dec!(180), "roi5 {roi5}");
    assert!(a.roi_10y_pct.unwrap() > roi5);

    assert!(a.irr_5y.converged);
    assert!(a.irr_10y.converged);
    let irr5 = a.irr_5y.irr_pct.unwrap();
    assert!(irr5 > dec!(15.5) && irr5 < dec!(18), "irr5 {irr5}");

    // 25 roi + 25 net + 20 dscr + 15 irr + 10 gross + 4 cash flow
    assert_eq!(a.grade.score, dec!(99));
    assert_eq!(a.grade.letter_grade, "A+");
}

#[test]
fn test_pipeline_is_idempotent() {
    let inputs = marina_apartment();
    let first = analyze(&inputs);
    let second = analyze(&inputs);
    assert_eq!(first.result, second.result);
}

#[test]
fn test_off_plan_financing_through_pipeline() {
    let mut inputs = marina_apartment();
    inputs.pre_handover_pct = Some(dec!(20));
    let output = analyze(&inputs);
    let fin = &output.result.financing;

    assert_eq!(fin.pre_handover_cash, Some(dec!(200000)));
    assert_eq!(fin.down_payment, dec!(160000));
    assert_eq!(fin.loan_amount, dec!(640000));
    assert_eq!(fin.total_initial_investment, dec!(425000));
    assert!(output.warnings.is_empty());
}

#[test]
fn test_inconsistent_split_surfaces_warning() {
    let mut inputs = marina_apartment();
    inputs.pre_handover_pct = Some(dec!(85));
    let output = analyze(&inputs);
    assert!(output.warnings.iter().any(|w| w.contains("exceed 100%")));
}

#[test]
fn test_score_never_drops_as_rent_rises() {
    let mut last_score = Decimal::MIN;
    for rent in [dec!(0), dec!(3000), dec!(5000), dec!(7000), dec!(9500), dec!(14000)] {
        let mut inputs = marina_apartment();
        inputs.monthly_rent = rent;
        let output = analyze(&inputs);
        let score = output.result.grade.score;
        assert!(
            score >= last_score,
            "score dropped from {last_score} to {score} at rent {rent}"
        );
        last_score = score;
    }
}

// ===========================================================================
// Degenerate deals
// ===========================================================================

#[test]
fn test_cash_purchase_has_no_debt_metrics() {
    let mut inputs = marina_apartment();
    inputs.down_payment_pct = dec!(100);
    let output = analyze(&inputs);
    let a = &output.result;

    assert_eq!(a.financing.loan_amount, Decimal::ZERO);
    assert_eq!(a.financing.monthly_payment, Decimal::ZERO);
    assert_eq!(a.income_expense.dscr, None);
    // Equity metrics still exist
    assert!(a.cash_on_cash_pct.is_some());
    assert!(a.roi_5y_pct.is_some());
}

#[test]
fn test_zero_equity_deal_has_no_equity_ratios() {
    let mut inputs = marina_apartment();
    inputs.down_payment_pct = Decimal::ZERO;
    let output = analyze(&inputs);
    let a = &output.result;

    assert_eq!(a.cash_on_cash_pct, None);
    assert_eq!(a.roi_5y_pct, None);
    assert_eq!(a.roi_10y_pct, None);
    // Grade still produced, with ROI drawing its neutral sub-score
    assert!(a.grade.score > Decimal::ZERO);
}

#[test]
fn test_empty_inputs_grade_without_panicking() {
    let output = analyze(&DealInputs::default());
    let a = &output.result;
    assert_eq!(a.income_expense.gross_yield_pct, None);
    assert_eq!(a.income_expense.net_yield_pct, None);
    assert_eq!(a.income_expense.dscr, None);
    assert_eq!(a.irr_5y.irr_pct, None);
    assert!(!a.grade.letter_grade.is_empty());
}

// ===========================================================================
// IRR exit scenario
// ===========================================================================

#[test]
fn test_appreciation_only_exit_irr() {
    // 100k in, no rent, no debt service, 500k asset appreciating 5%/year.
    // Exit proceeds 500k * 1.05^5 = 638,140.78; exact IRR 44.8716%.
    let inputs = DealInputs {
        property_price: dec!(500000),
        additional_upfront_costs: dec!(100000),
        appreciation_rate_pct: dec!(5),
        ..DealInputs::default()
    };
    let output = analyze(&inputs);
    let irr5 = &output.result.irr_5y;

    assert_eq!(output.result.financing.total_initial_investment, dec!(100000));
    assert!(irr5.converged);
    let pct = irr5.irr_pct.unwrap();
    assert!(
        (pct - dec!(44.8716)).abs() < dec!(0.01),
        "expected ~44.87%, got {pct}"
    );
}

// ===========================================================================
// Policy selection
// ===========================================================================

#[test]
fn test_legacy_policy_through_pipeline() {
    let inputs = marina_apartment();
    let output = analyze_with_policy(&inputs, &GradePolicy::legacy_v1());
    let grade = &output.result.grade;
    assert_eq!(grade.policy_version, "v1-four-factor");
    assert_eq!(grade.contributions.len(), 4);
    // roi 30 + cash 20 + net 25 + gross 20
    assert_eq!(grade.score, dec!(95));
    assert_eq!(grade.letter_grade, "A+");
}
