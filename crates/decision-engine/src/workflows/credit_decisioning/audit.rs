use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use super::domain::{ApplicationId, CreditOutcome, CreditReasonCode, DecisionId, DecisionRecord};
use super::features::CreditFeatures;

/// One line of the decision audit trail. Holds identifiers and derived numbers only.
///
/// Fields are declared in alphabetical order so each serialized line has sorted keys.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuditEntry {
    pub affordability_ratio: f64,
    pub annual_income: Decimal,
    pub application_id: ApplicationId,
    pub decision_id: DecisionId,
    pub dti: f64,
    pub employment_years: u32,
    pub missed_payments_12m: u32,
    pub outcome: CreditOutcome,
    pub reason_codes: Vec<CreditReasonCode>,
    pub request_id: String,
    pub requested_amount: Decimal,
    pub score: i32,
    pub timestamp: DateTime<Utc>,
}

impl AuditEntry {
    pub fn new(request_id: String, decision: &DecisionRecord, features: &CreditFeatures) -> Self {
        Self {
            affordability_ratio: features.affordability_ratio,
            annual_income: features.annual_income,
            application_id: decision.application_id.clone(),
            decision_id: decision.decision_id.clone(),
            dti: features.dti,
            employment_years: features.employment_years,
            missed_payments_12m: features.missed_payments_12m,
            outcome: decision.outcome,
            reason_codes: decision.reason_codes.clone(),
            request_id,
            requested_amount: features.requested_amount,
            score: decision.score,
            timestamp: decision.timestamp,
        }
    }
}

pub fn generate_request_id() -> String {
    format!("req-{}", uuid::Uuid::new_v4())
}

/// Append-only destination for audit entries.
pub trait AuditSink: Send + Sync {
    fn record(&self, entry: &AuditEntry) -> Result<(), AuditError>;
}

#[derive(Debug, thiserror::Error)]
pub enum AuditError {
    #[error("audit log io failure: {0}")]
    Io(#[from] std::io::Error),
    #[error("audit entry could not be encoded: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("audit sink unavailable: {0}")]
    Unavailable(String),
}

/// JSON Lines file; appends are serialized so concurrent decisions never interleave.
pub struct JsonlAuditLog {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonlAuditLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl AuditSink for JsonlAuditLog {
    fn record(&self, entry: &AuditEntry) -> Result<(), AuditError> {
        let mut line = serde_json::to_string(entry)?;
        line.push('\n');

        let _guard = self
            .lock
            .lock()
            .map_err(|_| AuditError::Unavailable("audit log lock poisoned".to_string()))?;

        if let Some(parent) = self.path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(line.as_bytes())?;
        Ok(())
    }
}
