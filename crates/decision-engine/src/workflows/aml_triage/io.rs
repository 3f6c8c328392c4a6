use std::fs::{self, File};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use rust_decimal::Decimal;
use serde::Serialize;

use super::domain::{Alert, Ledger, Transaction, TransactionError, TriageDecision, TriageSummary};
use crate::engine::ReasonCode;

#[derive(Debug, thiserror::Error)]
pub enum AmlIoError {
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("row {row}: {source}")]
    Csv {
        row: usize,
        #[source]
        source: csv::Error,
    },
    #[error("row {row}: {source}")]
    InvalidTransaction {
        row: usize,
        #[source]
        source: TransactionError,
    },
    #[error("failed to write csv: {0}")]
    CsvWrite(#[source] csv::Error),
    #[error("failed to encode json: {0}")]
    Json(#[from] serde_json::Error),
}

pub fn load_transactions(path: &Path) -> Result<Ledger, AmlIoError> {
    let file = File::open(path).map_err(|source| AmlIoError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    read_transactions(file)
}

/// Rows are numbered from 1, excluding the header.
pub fn read_transactions<R: Read>(reader: R) -> Result<Ledger, AmlIoError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut transactions = Vec::new();
    for (index, record) in csv_reader.deserialize::<Transaction>().enumerate() {
        let row = index + 1;
        let transaction = record.map_err(|source| AmlIoError::Csv { row, source })?;
        transaction
            .validate()
            .map_err(|source| AmlIoError::InvalidTransaction { row, source })?;
        transactions.push(transaction);
    }

    Ok(Ledger::new(transactions))
}

fn create_file(path: &Path) -> Result<File, AmlIoError> {
    let io_error = |source: io::Error| AmlIoError::Io {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_error)?;
    }
    File::create(path).map_err(io_error)
}

pub fn write_alerts_json(alerts: &[Alert], path: &Path) -> Result<(), AmlIoError> {
    let file = create_file(path)?;
    serde_json::to_writer_pretty(file, alerts)?;
    Ok(())
}

#[derive(Debug, Serialize)]
struct TriageQueueRow<'a> {
    alert_id: &'a str,
    account_id: &'a str,
    amount: Decimal,
    priority: &'static str,
    triage_score: f64,
    reason_codes: String,
    queue: &'static str,
}

/// Highest score first; ties broken by alert id.
pub fn sorted_for_queue(decisions: &[TriageDecision]) -> Vec<&TriageDecision> {
    let mut ordered: Vec<&TriageDecision> = decisions.iter().collect();
    ordered.sort_by(|left, right| {
        right
            .triage_score
            .total_cmp(&left.triage_score)
            .then_with(|| left.alert.alert_id.cmp(&right.alert.alert_id))
    });
    ordered
}

pub fn write_triage_queue<W: Write>(decisions: &[TriageDecision], writer: W) -> Result<(), AmlIoError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for decision in sorted_for_queue(decisions) {
        let reason_codes = decision
            .alert
            .reason_codes
            .iter()
            .map(|code| code.code())
            .collect::<Vec<_>>()
            .join(",");
        csv_writer
            .serialize(TriageQueueRow {
                alert_id: &decision.alert.alert_id,
                account_id: &decision.alert.transaction.account_id,
                amount: decision.alert.transaction.amount,
                priority: decision.priority.as_str(),
                triage_score: decision.triage_score,
                reason_codes,
                queue: decision.assigned_queue.as_str(),
            })
            .map_err(AmlIoError::CsvWrite)?;
    }
    csv_writer
        .flush()
        .map_err(|err| AmlIoError::CsvWrite(err.into()))
}

pub fn write_triage_queue_csv(decisions: &[TriageDecision], path: &Path) -> Result<(), AmlIoError> {
    let file = create_file(path)?;
    write_triage_queue(decisions, file)
}

pub fn write_summary_json(summary: &TriageSummary, path: &Path) -> Result<(), AmlIoError> {
    let file = create_file(path)?;
    serde_json::to_writer_pretty(file, summary)?;
    Ok(())
}
