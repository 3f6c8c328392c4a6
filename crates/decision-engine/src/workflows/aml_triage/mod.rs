//! Heuristic AML alert generation and priority triage over a transaction ledger.

mod domain;
pub mod io;
mod rules;
mod triage;


pub use domain::{
    parse_timestamp, Alert, AmlReasonCode, Ledger, Priority, Transaction, TransactionContext,
    TransactionError, TransactionType, TriageDecision, TriageQueue, TriageRun, TriageSummary,
    DEFAULT_CURRENCY,
};
pub use io::AmlIoError;
pub use rules::{explain, ExplanationContext};

use rust_decimal::Decimal;
use tracing::info;

use crate::engine::{
    join_explanations, sorted_reason_codes, EngineError, Finding, PointTable, ReasonCode, RuleSet,
    ScoreAggregator, ThresholdBands,
};
use rules::{HighAmountRule, HighVelocityRule, RapidReversalRule, RoundAmountRule};

/// Detection windows and thresholds for the AML rule set.
#[derive(Debug, Clone, PartialEq)]
pub struct AmlRuleConfig {
    pub velocity_window_seconds: i64,
    pub reversal_window_seconds: i64,
    pub high_amount_threshold: Decimal,
}

impl Default for AmlRuleConfig {
    fn default() -> Self {
        Self {
            velocity_window_seconds: 60,
            reversal_window_seconds: 300,
            high_amount_threshold: Decimal::from(10_000),
        }
    }
}

pub struct AmlTriageEngine {
    rules: RuleSet<TransactionContext, Finding<AmlReasonCode>>,
    points: PointTable<AmlReasonCode>,
    priorities: ThresholdBands<f64, Priority>,
}

impl AmlTriageEngine {
    pub fn new(config: &AmlRuleConfig) -> Result<Self, EngineError> {
        let rules = RuleSet::new()
            .with_rule(HighVelocityRule {
                window_seconds: config.velocity_window_seconds,
            })
            .with_rule(RoundAmountRule)
            .with_rule(HighAmountRule {
                threshold: config.high_amount_threshold,
            })
            .with_rule(RapidReversalRule {
                window_seconds: config.reversal_window_seconds,
            });

        Ok(Self {
            rules,
            points: triage::reason_points(),
            priorities: triage::priority_bands()?,
        })
    }

    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.rule_names()
    }

    pub fn points_for(&self, code: AmlReasonCode) -> u32 {
        self.points.points_for(&code)
    }

    /// One alert per transaction that trips at least one rule, in ledger order.
    pub fn generate_alerts(&self, ledger: &Ledger) -> Vec<Alert> {
        let mut alerts: Vec<Alert> = ledger
            .contexts()
            .filter_map(|context| self.alert_for(&context))
            .collect();
        alerts.sort_by_key(|alert| alert.transaction.timestamp);
        alerts
    }

    fn alert_for(&self, context: &TransactionContext) -> Option<Alert> {
        let mut findings = self.rules.evaluate(context);
        if findings.is_empty() {
            return None;
        }
        findings.sort_by_key(|finding| finding.reason.code());

        let transaction = context.transaction().clone();
        Some(Alert {
            alert_id: format!("ALERT-{}", transaction.transaction_id),
            reason_codes: sorted_reason_codes(findings.iter().map(|finding| finding.reason)),
            explanation: join_explanations(findings.iter().map(|finding| &finding.explanation)),
            transaction,
        })
    }

    pub fn triage(&self, alert: &Alert) -> TriageDecision {
        let triage_score = f64::from(self.points.aggregate(alert.reason_codes.as_slice()));
        let priority = self.priorities.classify(triage_score);

        TriageDecision {
            alert: alert.clone(),
            priority,
            triage_score,
            assigned_queue: priority.queue(),
        }
    }

    pub fn run(&self, ledger: &Ledger) -> TriageRun {
        let alerts = self.generate_alerts(ledger);
        let decisions: Vec<TriageDecision> = alerts.iter().map(|alert| self.triage(alert)).collect();
        let summary = TriageSummary::from_decisions(ledger.len(), &decisions);

        info!(
            total_transactions = summary.total_transactions,
            total_alerts = summary.total_alerts,
            "aml triage complete"
        );

        TriageRun { decisions, summary }
    }
}
