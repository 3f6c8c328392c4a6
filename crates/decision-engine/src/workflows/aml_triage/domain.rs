use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

use crate::engine::ReasonCode;

pub const DEFAULT_CURRENCY: &str = "USD";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionType {
    Debit,
    Credit,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub transaction_id: String,
    pub account_id: String,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub timestamp: DateTime<Utc>,
    #[serde(with = "rust_decimal::serde::str")]
    pub amount: Decimal,
    pub transaction_type: TransactionType,
    pub beneficiary_id: String,
    #[serde(default = "default_currency", deserialize_with = "deserialize_currency")]
    pub currency: String,
}

impl Transaction {
    pub fn validate(&self) -> Result<(), TransactionError> {
        for (field, value) in [
            ("transaction_id", &self.transaction_id),
            ("account_id", &self.account_id),
            ("beneficiary_id", &self.beneficiary_id),
        ] {
            if value.trim().is_empty() {
                return Err(TransactionError::EmptyField { field });
            }
        }

        if self.amount <= Decimal::ZERO {
            return Err(TransactionError::NonPositiveAmount {
                transaction_id: self.transaction_id.clone(),
                amount: self.amount,
            });
        }

        Ok(())
    }
}

fn default_currency() -> String {
    DEFAULT_CURRENCY.to_string()
}

fn deserialize_currency<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value
        .map(|currency| currency.trim().to_string())
        .filter(|currency| !currency.is_empty())
        .unwrap_or_else(default_currency))
}

/// RFC 3339 timestamps, or naive ISO-8601 timestamps interpreted as UTC.
fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw).map_err(serde::de::Error::custom)
}

pub fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, String> {
    let trimmed = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(parsed.with_timezone(&Utc));
    }

    NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|naive| naive.and_utc())
        .map_err(|err| format!("invalid timestamp '{trimmed}': {err}"))
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransactionError {
    #[error("{field} must not be empty")]
    EmptyField { field: &'static str },
    #[error("transaction {transaction_id} has non-positive amount {amount}")]
    NonPositiveAmount {
        transaction_id: String,
        amount: Decimal,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AmlReasonCode {
    HighVelocity,
    RoundAmount,
    HighAmount,
    RapidReversal,
    NewBeneficiary,
}

impl ReasonCode for AmlReasonCode {
    fn code(&self) -> &'static str {
        match self {
            AmlReasonCode::HighVelocity => "HIGH_VELOCITY",
            AmlReasonCode::RoundAmount => "ROUND_AMOUNT",
            AmlReasonCode::HighAmount => "HIGH_AMOUNT",
            AmlReasonCode::RapidReversal => "RAPID_REVERSAL",
            AmlReasonCode::NewBeneficiary => "NEW_BENEFICIARY",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    pub alert_id: String,
    pub transaction: Transaction,
    pub reason_codes: Vec<AmlReasonCode>,
    pub explanation: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Priority {
    P1,
    P2,
    P3,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::P1 => "P1",
            Priority::P2 => "P2",
            Priority::P3 => "P3",
        }
    }

    pub fn queue(&self) -> TriageQueue {
        match self {
            Priority::P1 => TriageQueue::HighRisk,
            Priority::P2 => TriageQueue::MediumRisk,
            Priority::P3 => TriageQueue::LowRisk,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TriageQueue {
    HighRisk,
    MediumRisk,
    LowRisk,
}

impl TriageQueue {
    pub fn as_str(&self) -> &'static str {
        match self {
            TriageQueue::HighRisk => "HIGH_RISK",
            TriageQueue::MediumRisk => "MEDIUM_RISK",
            TriageQueue::LowRisk => "LOW_RISK",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriageDecision {
    pub alert: Alert,
    pub priority: Priority,
    pub triage_score: f64,
    pub assigned_queue: TriageQueue,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriageSummary {
    pub total_transactions: usize,
    pub total_alerts: usize,
    pub by_priority: BTreeMap<Priority, usize>,
    pub by_reason_code: BTreeMap<AmlReasonCode, usize>,
    pub by_queue: BTreeMap<TriageQueue, usize>,
}

impl TriageSummary {
    pub fn from_decisions(total_transactions: usize, decisions: &[TriageDecision]) -> Self {
        let mut by_priority: BTreeMap<Priority, usize> = [Priority::P1, Priority::P2, Priority::P3]
            .into_iter()
            .map(|priority| (priority, 0))
            .collect();
        let mut by_reason_code = BTreeMap::new();
        let mut by_queue = BTreeMap::new();

        for decision in decisions {
            *by_priority.entry(decision.priority).or_insert(0) += 1;
            *by_queue.entry(decision.assigned_queue).or_insert(0) += 1;
            for code in &decision.alert.reason_codes {
                *by_reason_code.entry(*code).or_insert(0) += 1;
            }
        }

        Self {
            total_transactions,
            total_alerts: decisions.len(),
            by_priority,
            by_reason_code,
            by_queue,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriageRun {
    pub decisions: Vec<TriageDecision>,
    pub summary: TriageSummary,
}

/// Immutable, timestamp-ordered transaction list shared by every rule evaluation.
#[derive(Debug, Clone, PartialEq)]
pub struct Ledger {
    transactions: Arc<[Transaction]>,
}

impl Ledger {
    /// Stable sort, so equal timestamps keep their input order.
    pub fn new(mut transactions: Vec<Transaction>) -> Self {
        transactions.sort_by_key(|transaction| transaction.timestamp);
        Self {
            transactions: transactions.into(),
        }
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    pub fn contexts(&self) -> impl Iterator<Item = TransactionContext> + '_ {
        (0..self.transactions.len()).map(|position| TransactionContext {
            ledger: Arc::clone(&self.transactions),
            position,
        })
    }
}

/// One transaction viewed against the full ledger it belongs to.
#[derive(Debug, Clone)]
pub struct TransactionContext {
    ledger: Arc<[Transaction]>,
    position: usize,
}

impl TransactionContext {
    pub fn transaction(&self) -> &Transaction {
        &self.ledger[self.position]
    }

    pub fn ledger(&self) -> &[Transaction] {
        &self.ledger
    }

    /// Transactions ordered after this one in the ledger.
    pub fn later(&self) -> &[Transaction] {
        &self.ledger[self.position + 1..]
    }

    pub fn account_history(&self) -> impl Iterator<Item = &Transaction> + '_ {
        let account_id = &self.transaction().account_id;
        self.ledger
            .iter()
            .filter(move |candidate| &candidate.account_id == account_id)
    }
}
