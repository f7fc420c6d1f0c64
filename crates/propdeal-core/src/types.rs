use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// All monetary values, in AED. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Rates expressed as decimals (0.05 = 5%).
pub type Rate = Decimal;

/// Form-facing percentages on the 0-100 scale (5 = 5%).
pub type Percent = Decimal;

fn default_appreciation_pct() -> Percent {
    dec!(3)
}

/// The complete parameter set for one deal computation.
///
/// Every field carries a serde default so an absent or partially filled
/// record deserializes to the defined per-field default instead of failing.
/// This is the input-normalization boundary: a caller reconstructing inputs
/// from a shared link or a half-completed form gets zeros, never an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DealInputs {
    /// Purchase price in AED.
    pub property_price: Money,
    /// Down payment as a percentage of the financed base.
    pub down_payment_pct: Percent,
    /// Agent commission as a percentage of the full price.
    pub agent_fee_pct: Percent,
    /// Whether the flat 4% DLD transfer fee applies.
    pub transfer_fee_enabled: bool,
    /// Other one-off acquisition costs (valuation, registration, furnishing).
    pub additional_upfront_costs: Money,
    /// Mortgage amortization term in years. Zero means a cash deal.
    pub loan_term_years: u32,
    /// Annual mortgage interest rate, percent.
    pub annual_interest_rate_pct: Percent,
    /// Expected monthly rent in AED.
    pub monthly_rent: Money,
    /// Parking, storage, or other recurring monthly income.
    pub additional_monthly_income: Money,
    /// Vacancy and collection loss, percent of gross income.
    pub vacancy_rate_pct: Percent,
    /// Maintenance allowance, percent of effective income.
    pub maintenance_rate_pct: Percent,
    /// Property management fee, percent of effective income.
    pub management_fee_pct: Percent,
    /// Fixed monthly fee (service charges billed monthly).
    pub fixed_monthly_fee: Money,
    /// Annual insurance premium.
    pub annual_insurance: Money,
    /// Other annual expenses.
    pub other_annual_expenses: Money,
    /// Annual property appreciation, percent. Shared by the ROI
    /// approximation and the IRR exit value.
    pub appreciation_rate_pct: Percent,
    /// Off-plan only: percentage of price paid before handover.
    /// The mortgage finances the post-handover remainder.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pre_handover_pct: Option<Percent>,
}

impl Default for DealInputs {
    fn default() -> Self {
        DealInputs {
            property_price: Decimal::ZERO,
            down_payment_pct: Decimal::ZERO,
            agent_fee_pct: Decimal::ZERO,
            transfer_fee_enabled: false,
            additional_upfront_costs: Decimal::ZERO,
            loan_term_years: 0,
            annual_interest_rate_pct: Decimal::ZERO,
            monthly_rent: Decimal::ZERO,
            additional_monthly_income: Decimal::ZERO,
            vacancy_rate_pct: Decimal::ZERO,
            maintenance_rate_pct: Decimal::ZERO,
            management_fee_pct: Decimal::ZERO,
            fixed_monthly_fee: Decimal::ZERO,
            annual_insurance: Decimal::ZERO,
            other_annual_expenses: Decimal::ZERO,
            appreciation_rate_pct: default_appreciation_pct(),
            pre_handover_pct: None,
        }
    }
}

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "rust_decimal_128bit".to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_missing_fields_default_to_zero() {
        let inputs: DealInputs = serde_json::from_str(r#"{"property_price": 750000}"#).unwrap();
        assert_eq!(inputs.property_price, dec!(750000));
        assert_eq!(inputs.monthly_rent, Decimal::ZERO);
        assert_eq!(inputs.loan_term_years, 0);
        assert!(!inputs.transfer_fee_enabled);
        assert!(inputs.pre_handover_pct.is_none());
    }

    #[test]
    fn test_appreciation_defaults_to_three_percent() {
        let inputs: DealInputs = serde_json::from_str("{}").unwrap();
        assert_eq!(inputs.appreciation_rate_pct, dec!(3));
        assert_eq!(inputs, DealInputs::default());
    }

    #[test]
    fn test_round_trip() {
        let mut inputs = DealInputs::default();
        inputs.property_price = dec!(1000000);
        inputs.pre_handover_pct = Some(dec!(30));
        let json = serde_json::to_string(&inputs).unwrap();
        let back: DealInputs = serde_json::from_str(&json).unwrap();
        assert_eq!(inputs, back);
    }
}
