//! Fixed-rate mortgage amortization: level payment, remaining balance,
//! and a month-by-month schedule walk.
//!
//! All arithmetic uses `rust_decimal::Decimal`. No `f64`.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::types::{Money, Percent, Rate};

fn monthly_rate(annual_rate_pct: Percent) -> Rate {
    annual_rate_pct / dec!(100) / dec!(12)
}

/// Level annuity payment amortizing `principal` over `years * 12` months.
///
/// Returns 0 when there is nothing to finance or no term. A zero rate
/// degenerates to straight-line `principal / n`.
pub fn monthly_payment(principal: Money, annual_rate_pct: Percent, years: u32) -> Money {
    let n = years * 12;
    if principal <= Decimal::ZERO || n == 0 {
        return Decimal::ZERO;
    }

    let r = monthly_rate(annual_rate_pct);
    if r.is_zero() {
        return principal / Decimal::from(n);
    }

    // (1 + r)^n via iterative multiplication
    let one_plus_r = Decimal::ONE + r;
    let mut compound = Decimal::ONE;
    for _ in 0..n {
        compound *= one_plus_r;
    }

    let denominator = compound - Decimal::ONE;
    if denominator.is_zero() {
        // Compounding underflowed at a vanishingly small rate
        return principal / Decimal::from(n);
    }

    principal * r * compound / denominator
}

/// Principal still owed after `months_elapsed` payments of the schedule.
///
/// Closed form: `principal*(1+r)^m - pmt*((1+r)^m - 1)/r`, floored at 0 so
/// overpayment past the term never implies negative debt.
pub fn remaining_balance(
    principal: Money,
    annual_rate_pct: Percent,
    years: u32,
    months_elapsed: u32,
) -> Money {
    let n = years * 12;
    if principal <= Decimal::ZERO || n == 0 {
        return Decimal::ZERO;
    }

    let r = monthly_rate(annual_rate_pct);
    if r.is_zero() {
        let paid = principal * Decimal::from(months_elapsed.min(n)) / Decimal::from(n);
        return (principal - paid).max(Decimal::ZERO);
    }

    let pmt = monthly_payment(principal, annual_rate_pct, years);

    let one_plus_r = Decimal::ONE + r;
    let mut factor = Decimal::ONE;
    for _ in 0..months_elapsed {
        factor *= one_plus_r;
    }

    let balance = principal * factor - pmt * (factor - Decimal::ONE) / r;
    balance.max(Decimal::ZERO)
}

/// Walk the schedule month by month, recomputing the principal/interest
/// split from the running balance. Agrees with [`remaining_balance`] up to
/// rounding; exists so exit-value simulations can share one code path.
pub fn simulate_balance(
    principal: Money,
    annual_rate_pct: Percent,
    years: u32,
    months: u32,
) -> Money {
    let n = years * 12;
    if principal <= Decimal::ZERO || n == 0 {
        return Decimal::ZERO;
    }

    let r = monthly_rate(annual_rate_pct);
    let pmt = monthly_payment(principal, annual_rate_pct, years);

    let mut balance = principal;
    for _ in 0..months {
        let interest = balance * r;
        balance -= pmt - interest;
        if balance <= Decimal::ZERO {
            return Decimal::ZERO;
        }
    }
    balance
}
