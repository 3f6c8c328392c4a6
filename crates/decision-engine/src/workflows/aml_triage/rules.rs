use chrono::Duration;
use rust_decimal::Decimal;

use super::domain::{AmlReasonCode, Transaction, TransactionContext, TransactionType};
use crate::engine::{Finding, Rule};

/// Values interpolated into the per-code explanation templates.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExplanationContext {
    pub count: usize,
    pub window_seconds: i64,
    pub amount: Decimal,
    pub threshold: Decimal,
    pub beneficiary_id: String,
}

pub fn explain(code: AmlReasonCode, context: &ExplanationContext) -> String {
    match code {
        AmlReasonCode::HighVelocity => format!(
            "High velocity: {} transactions detected within {} seconds",
            context.count, context.window_seconds
        ),
        AmlReasonCode::RoundAmount => format!(
            "Round amount: Transaction amount {} is a round number (divisible by 100)",
            context.amount
        ),
        AmlReasonCode::HighAmount => format!(
            "High amount: Transaction amount {} exceeds threshold of {}",
            context.amount, context.threshold
        ),
        AmlReasonCode::RapidReversal => format!(
            "Rapid reversal: Debit followed by matching credit within {} seconds",
            context.window_seconds
        ),
        AmlReasonCode::NewBeneficiary => format!(
            "New beneficiary: First transaction to beneficiary {}",
            context.beneficiary_id
        ),
    }
}

fn window(window_seconds: i64) -> Duration {
    Duration::try_seconds(window_seconds).unwrap_or(Duration::MAX)
}

fn within_window(earlier: &Transaction, later: &Transaction, window_seconds: i64) -> bool {
    later.timestamp - earlier.timestamp <= window(window_seconds)
}

/// Three or more transactions on the account inside one window anchored at a transaction.
pub(crate) struct HighVelocityRule {
    pub(crate) window_seconds: i64,
}

impl HighVelocityRule {
    const MIN_CLUSTER: usize = 3;

    fn account_has_cluster(&self, history: &[&Transaction]) -> bool {
        if history.len() < Self::MIN_CLUSTER {
            return false;
        }

        (0..=history.len() - Self::MIN_CLUSTER).any(|start| {
            let anchor = history[start];
            let trailing = history[start + 1..]
                .iter()
                .take_while(|candidate| within_window(anchor, candidate, self.window_seconds))
                .count();
            trailing + 1 >= Self::MIN_CLUSTER
        })
    }
}

impl Rule<TransactionContext> for HighVelocityRule {
    type Effect = Finding<AmlReasonCode>;

    fn name(&self) -> &'static str {
        "high_velocity"
    }

    fn evaluate(&self, context: &TransactionContext) -> Option<Self::Effect> {
        let history: Vec<&Transaction> = context.account_history().collect();
        if !self.account_has_cluster(&history) {
            return None;
        }

        let target = context.transaction();
        let span = window(self.window_seconds);
        let count = history
            .iter()
            .filter(|candidate| (candidate.timestamp - target.timestamp).abs() <= span)
            .count();

        Some(Finding {
            reason: AmlReasonCode::HighVelocity,
            explanation: explain(
                AmlReasonCode::HighVelocity,
                &ExplanationContext {
                    count,
                    window_seconds: self.window_seconds,
                    ..ExplanationContext::default()
                },
            ),
        })
    }
}

pub(crate) struct RoundAmountRule;

impl Rule<TransactionContext> for RoundAmountRule {
    type Effect = Finding<AmlReasonCode>;

    fn name(&self) -> &'static str {
        "round_amount"
    }

    fn evaluate(&self, context: &TransactionContext) -> Option<Self::Effect> {
        let amount = context.transaction().amount;
        if !(amount % Decimal::ONE_HUNDRED).is_zero() {
            return None;
        }

        Some(Finding {
            reason: AmlReasonCode::RoundAmount,
            explanation: explain(
                AmlReasonCode::RoundAmount,
                &ExplanationContext {
                    amount,
                    ..ExplanationContext::default()
                },
            ),
        })
    }
}

pub(crate) struct HighAmountRule {
    pub(crate) threshold: Decimal,
}

impl Rule<TransactionContext> for HighAmountRule {
    type Effect = Finding<AmlReasonCode>;

    fn name(&self) -> &'static str {
        "high_amount"
    }

    fn evaluate(&self, context: &TransactionContext) -> Option<Self::Effect> {
        let amount = context.transaction().amount;
        if amount < self.threshold {
            return None;
        }

        Some(Finding {
            reason: AmlReasonCode::HighAmount,
            explanation: explain(
                AmlReasonCode::HighAmount,
                &ExplanationContext {
                    amount,
                    threshold: self.threshold,
                    ..ExplanationContext::default()
                },
            ),
        })
    }
}

/// A debit covered by a near-identical credit to the same beneficiary shortly after.
pub(crate) struct RapidReversalRule {
    pub(crate) window_seconds: i64,
}

impl RapidReversalRule {
    fn tolerance() -> Decimal {
        Decimal::new(1, 2)
    }

    fn reverses(debit: &Transaction, candidate: &Transaction) -> bool {
        candidate.transaction_type == TransactionType::Credit
            && candidate.account_id == debit.account_id
            && candidate.beneficiary_id == debit.beneficiary_id
            && (candidate.amount - debit.amount)
                .abs()
                .checked_div(debit.amount)
                .is_some_and(|drift| drift < Self::tolerance())
    }
}

impl Rule<TransactionContext> for RapidReversalRule {
    type Effect = Finding<AmlReasonCode>;

    fn name(&self) -> &'static str {
        "rapid_reversal"
    }

    fn evaluate(&self, context: &TransactionContext) -> Option<Self::Effect> {
        let debit = context.transaction();
        if debit.transaction_type != TransactionType::Debit {
            return None;
        }

        let matched = context
            .later()
            .iter()
            .filter(|candidate| candidate.timestamp > debit.timestamp)
            .take_while(|candidate| within_window(debit, candidate, self.window_seconds))
            .any(|candidate| Self::reverses(debit, candidate));
        if !matched {
            return None;
        }

        Some(Finding {
            reason: AmlReasonCode::RapidReversal,
            explanation: explain(
                AmlReasonCode::RapidReversal,
                &ExplanationContext {
                    window_seconds: self.window_seconds,
                    ..ExplanationContext::default()
                },
            ),
        })
    }
}
