use super::domain::{LendingDecision, RiskLevel};
use super::features::RiskFeatures;
use crate::engine::{EngineError, ThresholdBands};

pub(crate) fn risk_bands() -> Result<ThresholdBands<i32, RiskLevel>, EngineError> {
    ThresholdBands::new(vec![(70, RiskLevel::Low), (50, RiskLevel::Medium)], RiskLevel::High)
}

/// Medium-risk applicants are approved only when the request is small relative to income.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LendingPolicy {
    pub max_loan_to_income: f64,
}

impl Default for LendingPolicy {
    fn default() -> Self {
        Self {
            max_loan_to_income: 0.5,
        }
    }
}

impl LendingPolicy {
    pub(crate) fn decide(&self, level: RiskLevel, features: &RiskFeatures) -> LendingDecision {
        match level {
            RiskLevel::Low => LendingDecision::Approved,
            RiskLevel::Medium if features.loan_to_income < self.max_loan_to_income => {
                LendingDecision::Approved
            }
            RiskLevel::Medium => LendingDecision::ManualReview,
            RiskLevel::High => LendingDecision::Declined,
        }
    }
}
