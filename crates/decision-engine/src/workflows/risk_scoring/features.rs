use rust_decimal::Decimal;

use super::domain::{CreditApplication, EmploymentStatus};
use crate::engine::ratio;

/// Derived view of a validated application. Ratios may be `+inf` but never NaN.
#[derive(Debug, Clone, PartialEq)]
pub struct RiskFeatures {
    pub credit_score: u16,
    pub annual_income: Decimal,
    /// Monthly debt as a percentage of monthly income.
    pub dti_percent: f64,
    pub employment_status: EmploymentStatus,
    pub years_employed: Decimal,
    pub loan_to_income: f64,
}

pub fn derive_features(application: &CreditApplication) -> RiskFeatures {
    // debt / (income / 12) * 100, kept exact by scaling the numerator instead.
    let dti_percent = ratio(
        application.monthly_debt_payments * Decimal::from(1_200),
        application.annual_income,
    );

    RiskFeatures {
        credit_score: application.credit_score,
        annual_income: application.annual_income,
        dti_percent,
        employment_status: application.employment_status,
        years_employed: application.years_employed,
        loan_to_income: ratio(application.requested_amount, application.annual_income),
    }
}
