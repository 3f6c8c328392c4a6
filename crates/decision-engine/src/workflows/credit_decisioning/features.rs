use rust_decimal::Decimal;
use serde::Serialize;

use super::domain::ApplicantFinancials;
use crate::engine::ratio;

/// Ratios are `+inf` when income is not positive; serialized as `null`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CreditFeatures {
    pub dti: f64,
    pub affordability_ratio: f64,
    pub annual_income: Decimal,
    pub requested_amount: Decimal,
    pub employment_years: u32,
    pub missed_payments_12m: u32,
}

pub fn derive_features(financials: &ApplicantFinancials) -> CreditFeatures {
    CreditFeatures {
        dti: ratio(
            financials.monthly_debt_payments * Decimal::from(12),
            financials.annual_income,
        ),
        affordability_ratio: ratio(financials.requested_amount, financials.annual_income),
        annual_income: financials.annual_income,
        requested_amount: financials.requested_amount,
        employment_years: financials.employment_years,
        missed_payments_12m: financials.missed_payments_12m,
    }
}
