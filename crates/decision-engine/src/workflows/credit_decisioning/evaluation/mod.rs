mod policy;
mod rules;

pub use policy::{DecisionThresholds, DEFAULT_APPROVE_THRESHOLD, DEFAULT_REFER_THRESHOLD};

use serde::Serialize;

use super::domain::{CreditOutcome, CreditReasonCode};
use super::features::CreditFeatures;
use crate::engine::{sorted_reason_codes, Adjustment, BaselineDelta, RuleSet, ScoreAggregator};
use rules::{CreditExposureRule, DebtToIncomeRule, EmploymentTenureRule, PaymentHistoryRule};

/// Additive rules around a neutral baseline, clipped to the 0..=100 scale.
pub struct CreditDecisionEngine {
    rules: RuleSet<CreditFeatures, Adjustment<CreditReasonCode>>,
    aggregator: BaselineDelta,
    thresholds: DecisionThresholds,
}

impl CreditDecisionEngine {
    pub fn new(thresholds: DecisionThresholds) -> Self {
        let rules = RuleSet::new()
            .with_rule(DebtToIncomeRule)
            .with_rule(PaymentHistoryRule)
            .with_rule(EmploymentTenureRule)
            .with_rule(CreditExposureRule);

        Self {
            rules,
            aggregator: BaselineDelta {
                baseline: 50,
                min: 0,
                max: 100,
            },
            thresholds,
        }
    }

    pub fn thresholds(&self) -> &DecisionThresholds {
        &self.thresholds
    }

    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.rule_names()
    }

    pub fn decide(&self, features: &CreditFeatures) -> DecisionResult {
        self.decide_with(features, &self.thresholds)
    }

    /// Same rule evaluation, classified against caller-supplied thresholds.
    pub fn decide_with(
        &self,
        features: &CreditFeatures,
        thresholds: &DecisionThresholds,
    ) -> DecisionResult {
        let adjustments = self.rules.evaluate(features);
        let score = self.aggregator.aggregate(adjustments.as_slice());
        let outcome = thresholds.classify(score);

        let reason_codes = sorted_reason_codes(
            adjustments
                .iter()
                .map(|adjustment| adjustment.reason)
                .chain(std::iter::once(outcome.band_code())),
        );

        DecisionResult {
            score,
            outcome,
            reason_codes,
            adjustments,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecisionResult {
    pub score: i32,
    pub outcome: CreditOutcome,
    pub reason_codes: Vec<CreditReasonCode>,
    pub adjustments: Vec<Adjustment<CreditReasonCode>>,
}
