use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::engine::ReasonCode;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ApplicationId(pub String);

impl fmt::Display for ApplicationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DecisionId(pub String);

impl fmt::Display for DecisionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Intake payload. Name, address, and email never leave the application record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicationRequest {
    pub full_name: String,
    pub annual_income: Decimal,
    pub monthly_debt_payments: Decimal,
    pub requested_amount: Decimal,
    pub employment_years: u32,
    pub missed_payments_12m: u32,
    pub address: String,
    pub email: String,
}

impl ApplicationRequest {
    pub fn validate(&self) -> Result<(), ApplicationValidationError> {
        for (field, value) in [
            ("full_name", &self.full_name),
            ("address", &self.address),
            ("email", &self.email),
        ] {
            if value.trim().is_empty() {
                return Err(ApplicationValidationError::EmptyField { field });
            }
        }

        if !is_plausible_email(&self.email) {
            return Err(ApplicationValidationError::InvalidEmail);
        }
        if self.annual_income <= Decimal::ZERO {
            return Err(ApplicationValidationError::NonPositive {
                field: "annual_income",
            });
        }
        if self.requested_amount <= Decimal::ZERO {
            return Err(ApplicationValidationError::NonPositive {
                field: "requested_amount",
            });
        }
        if self.monthly_debt_payments < Decimal::ZERO {
            return Err(ApplicationValidationError::Negative {
                field: "monthly_debt_payments",
            });
        }

        Ok(())
    }
}

fn is_plausible_email(email: &str) -> bool {
    match email.trim().split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
        }
        None => false,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApplicationValidationError {
    #[error("{field} must not be empty")]
    EmptyField { field: &'static str },
    #[error("{field} must be greater than zero")]
    NonPositive { field: &'static str },
    #[error("{field} must not be negative")]
    Negative { field: &'static str },
    #[error("email must be a valid address")]
    InvalidEmail,
}

/// Stored application, including the personal fields collected at intake.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicationRecord {
    pub application_id: ApplicationId,
    pub full_name: String,
    pub annual_income: Decimal,
    pub monthly_debt_payments: Decimal,
    pub requested_amount: Decimal,
    pub employment_years: u32,
    pub missed_payments_12m: u32,
    pub address: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl ApplicationRecord {
    pub fn from_request(
        application_id: ApplicationId,
        request: ApplicationRequest,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            application_id,
            full_name: request.full_name,
            annual_income: request.annual_income,
            monthly_debt_payments: request.monthly_debt_payments,
            requested_amount: request.requested_amount,
            employment_years: request.employment_years,
            missed_payments_12m: request.missed_payments_12m,
            address: request.address,
            email: request.email,
            created_at,
        }
    }

    /// Numeric inputs handed to the scoring engine.
    pub fn financials(&self) -> ApplicantFinancials {
        ApplicantFinancials {
            annual_income: self.annual_income,
            monthly_debt_payments: self.monthly_debt_payments,
            requested_amount: self.requested_amount,
            employment_years: self.employment_years,
            missed_payments_12m: self.missed_payments_12m,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApplicantFinancials {
    pub annual_income: Decimal,
    pub monthly_debt_payments: Decimal,
    pub requested_amount: Decimal,
    pub employment_years: u32,
    pub missed_payments_12m: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CreditOutcome {
    Approve,
    Refer,
    Decline,
}

impl CreditOutcome {
    pub fn band_code(&self) -> CreditReasonCode {
        match self {
            CreditOutcome::Approve => CreditReasonCode::ScoreApproveBand,
            CreditOutcome::Refer => CreditReasonCode::ScoreReferBand,
            CreditOutcome::Decline => CreditReasonCode::ScoreDeclineBand,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CreditReasonCode {
    LowDti,
    HighDti,
    CleanPaymentHistory,
    SomeMissedPayments,
    PoorPaymentHistory,
    StableEmployment,
    ModerateEmployment,
    LowCreditExposure,
    HighCreditExposure,
    ScoreApproveBand,
    ScoreReferBand,
    ScoreDeclineBand,
}

impl ReasonCode for CreditReasonCode {
    fn code(&self) -> &'static str {
        match self {
            CreditReasonCode::LowDti => "LOW_DTI",
            CreditReasonCode::HighDti => "HIGH_DTI",
            CreditReasonCode::CleanPaymentHistory => "CLEAN_PAYMENT_HISTORY",
            CreditReasonCode::SomeMissedPayments => "SOME_MISSED_PAYMENTS",
            CreditReasonCode::PoorPaymentHistory => "POOR_PAYMENT_HISTORY",
            CreditReasonCode::StableEmployment => "STABLE_EMPLOYMENT",
            CreditReasonCode::ModerateEmployment => "MODERATE_EMPLOYMENT",
            CreditReasonCode::LowCreditExposure => "LOW_CREDIT_EXPOSURE",
            CreditReasonCode::HighCreditExposure => "HIGH_CREDIT_EXPOSURE",
            CreditReasonCode::ScoreApproveBand => "SCORE_APPROVE_BAND",
            CreditReasonCode::ScoreReferBand => "SCORE_REFER_BAND",
            CreditReasonCode::ScoreDeclineBand => "SCORE_DECLINE_BAND",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionRecord {
    pub decision_id: DecisionId,
    pub application_id: ApplicationId,
    pub outcome: CreditOutcome,
    pub score: i32,
    pub reason_codes: Vec<CreditReasonCode>,
    pub timestamp: DateTime<Utc>,
}
