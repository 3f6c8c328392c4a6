//! Weighted multi-factor credit risk scoring for batch loan applications.

mod domain;
mod features;
mod policy;
mod rules;

#[cfg(test)]
mod tests;

pub use domain::{
    CreditApplication, DecisionTally, EmploymentStatus, LendingDecision, RiskAssessment,
    RiskBatchError, RiskFactor, RiskInputError, RiskLevel, MAX_CREDIT_SCORE, MIN_CREDIT_SCORE,
};
pub use features::{derive_features, RiskFeatures};
pub use policy::LendingPolicy;
pub use rules::FactorWeights;

use tracing::debug;

use crate::engine::{
    EngineError, RuleSet, ScoreAggregator, ThresholdBands, WeightedScore, WeightedSum,
};
use rules::{CreditScoreFactor, DebtToIncomeFactor, EmploymentFactor, IncomeFactor};

/// Scores applications with one fixed weighted rule set.
pub struct RiskScoringEngine {
    rules: RuleSet<RiskFeatures, WeightedScore<RiskFactor>>,
    aggregator: WeightedSum,
    bands: ThresholdBands<i32, RiskLevel>,
    lending: LendingPolicy,
}

impl RiskScoringEngine {
    pub fn new(weights: FactorWeights, lending: LendingPolicy) -> Result<Self, EngineError> {
        let rules = RuleSet::new()
            .with_rule(CreditScoreFactor {
                weight: weights.credit_score(),
            })
            .with_rule(IncomeFactor {
                weight: weights.income(),
            })
            .with_rule(DebtToIncomeFactor {
                weight: weights.debt_to_income(),
            })
            .with_rule(EmploymentFactor {
                weight: weights.employment(),
            });

        Ok(Self {
            rules,
            aggregator: WeightedSum::percent(),
            bands: policy::risk_bands()?,
            lending,
        })
    }

    pub fn standard() -> Result<Self, EngineError> {
        Self::new(FactorWeights::default(), LendingPolicy::default())
    }

    pub fn factor_names(&self) -> Vec<&'static str> {
        self.rules.rule_names()
    }

    pub fn assess(&self, application: &CreditApplication) -> Result<RiskAssessment, RiskInputError> {
        application.validate()?;

        let features = derive_features(application);
        let risk_factors = self.rules.evaluate(&features);
        let total_score = self.aggregator.aggregate(risk_factors.as_slice());
        let risk_level = self.bands.classify(total_score);
        let decision = self.lending.decide(risk_level, &features);

        debug!(
            application_id = %application.application_id,
            total_score,
            ?risk_level,
            ?decision,
            "application scored"
        );

        Ok(RiskAssessment {
            application_id: application.application_id.clone(),
            risk_factors,
            total_score,
            risk_level,
            decision,
        })
    }

    /// Records are independent; one invalid record never affects another's result.
    pub fn assess_batch(
        &self,
        applications: &[CreditApplication],
    ) -> Vec<Result<RiskAssessment, RiskBatchError>> {
        applications
            .iter()
            .enumerate()
            .map(|(index, application)| {
                self.assess(application).map_err(|source| RiskBatchError {
                    index,
                    application_id: application.application_id.clone(),
                    source,
                })
            })
            .collect()
    }
}
