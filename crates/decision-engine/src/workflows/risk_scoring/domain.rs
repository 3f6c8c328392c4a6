use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::engine::WeightedScore;

pub const MIN_CREDIT_SCORE: u16 = 300;
pub const MAX_CREDIT_SCORE: u16 = 850;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EmploymentStatus {
    FullTime,
    PartTime,
    SelfEmployed,
    Unemployed,
    Retired,
}

/// Loan application scored by the batch risk scorer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreditApplication {
    pub application_id: String,
    pub credit_score: u16,
    pub annual_income: Decimal,
    pub monthly_debt_payments: Decimal,
    pub employment_status: EmploymentStatus,
    pub years_employed: Decimal,
    pub requested_amount: Decimal,
}

impl CreditApplication {
    pub fn validate(&self) -> Result<(), RiskInputError> {
        if self.application_id.trim().is_empty() {
            return Err(RiskInputError::MissingApplicationId);
        }
        if !(MIN_CREDIT_SCORE..=MAX_CREDIT_SCORE).contains(&self.credit_score) {
            return Err(RiskInputError::CreditScoreOutOfRange(self.credit_score));
        }
        if self.annual_income <= Decimal::ZERO {
            return Err(RiskInputError::NonPositiveIncome(self.annual_income));
        }
        if self.monthly_debt_payments < Decimal::ZERO {
            return Err(RiskInputError::NegativeDebt(self.monthly_debt_payments));
        }
        if self.years_employed < Decimal::ZERO {
            return Err(RiskInputError::NegativeTenure(self.years_employed));
        }
        if self.requested_amount <= Decimal::ZERO {
            return Err(RiskInputError::NonPositiveRequest(self.requested_amount));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskFactor {
    CreditScore,
    Income,
    DebtToIncome,
    Employment,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LendingDecision {
    Approved,
    ManualReview,
    Declined,
}

impl LendingDecision {
    pub fn summary(&self) -> &'static str {
        match self {
            LendingDecision::Approved => "approved",
            LendingDecision::ManualReview => "manual review",
            LendingDecision::Declined => "declined",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub application_id: String,
    pub risk_factors: Vec<WeightedScore<RiskFactor>>,
    pub total_score: i32,
    pub risk_level: RiskLevel,
    pub decision: LendingDecision,
}

/// Per-decision counts over a scored batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionTally {
    pub approved: usize,
    pub manual_review: usize,
    pub declined: usize,
}

impl DecisionTally {
    pub fn from_assessments<'a>(assessments: impl IntoIterator<Item = &'a RiskAssessment>) -> Self {
        assessments
            .into_iter()
            .fold(Self::default(), |mut tally, assessment| {
                match assessment.decision {
                    LendingDecision::Approved => tally.approved += 1,
                    LendingDecision::ManualReview => tally.manual_review += 1,
                    LendingDecision::Declined => tally.declined += 1,
                }
                tally
            })
    }

    pub fn total(&self) -> usize {
        self.approved + self.manual_review + self.declined
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RiskInputError {
    #[error("application_id must not be empty")]
    MissingApplicationId,
    #[error("credit score {0} outside 300..=850")]
    CreditScoreOutOfRange(u16),
    #[error("annual income must be positive (got {0})")]
    NonPositiveIncome(Decimal),
    #[error("monthly debt payments must not be negative (got {0})")]
    NegativeDebt(Decimal),
    #[error("years employed must not be negative (got {0})")]
    NegativeTenure(Decimal),
    #[error("requested amount must be positive (got {0})")]
    NonPositiveRequest(Decimal),
}

/// Batch scoring failure tagged with the offending record.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("application {application_id} (record {index}): {source}")]
pub struct RiskBatchError {
    pub index: usize,
    pub application_id: String,
    #[source]
    pub source: RiskInputError,
}
