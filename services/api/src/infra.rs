use decision_engine::workflows::aml_triage::AmlTriageEngine;
use decision_engine::workflows::credit_decisioning::{
    ApplicationId, ApplicationRecord, ApplicationRepository, AuditEntry, AuditError, AuditSink,
    DecisionId, DecisionRecord, DecisionRepository, RepositoryError,
};
use decision_engine::workflows::risk_scoring::RiskScoringEngine;
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) risk_engine: Arc<RiskScoringEngine>,
    pub(crate) aml_engine: Arc<AmlTriageEngine>,
}

fn poisoned<T>(_: T) -> RepositoryError {
    RepositoryError::Unavailable("repository mutex poisoned".to_string())
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryApplicationRepository {
    records: Arc<Mutex<HashMap<ApplicationId, ApplicationRecord>>>,
}

impl ApplicationRepository for InMemoryApplicationRepository {
    fn create(&self, record: ApplicationRecord) -> Result<ApplicationId, RepositoryError> {
        let mut guard = self.records.lock().map_err(poisoned)?;
        if guard.contains_key(&record.application_id) {
            return Err(RepositoryError::Conflict);
        }
        let id = record.application_id.clone();
        guard.insert(id.clone(), record);
        Ok(id)
    }

    fn get(&self, id: &ApplicationId) -> Result<Option<ApplicationRecord>, RepositoryError> {
        let guard = self.records.lock().map_err(poisoned)?;
        Ok(guard.get(id).cloned())
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryDecisionRepository {
    records: Arc<Mutex<HashMap<DecisionId, DecisionRecord>>>,
}

impl DecisionRepository for InMemoryDecisionRepository {
    fn create(&self, record: DecisionRecord) -> Result<DecisionId, RepositoryError> {
        let mut guard = self.records.lock().map_err(poisoned)?;
        if guard.contains_key(&record.decision_id) {
            return Err(RepositoryError::Conflict);
        }
        let id = record.decision_id.clone();
        guard.insert(id.clone(), record);
        Ok(id)
    }

    fn get(&self, id: &DecisionId) -> Result<Option<DecisionRecord>, RepositoryError> {
        let guard = self.records.lock().map_err(poisoned)?;
        Ok(guard.get(id).cloned())
    }
}

/// Keeps audit entries in memory for demos that should not touch the filesystem.
#[derive(Default, Clone)]
pub(crate) struct InMemoryAuditSink {
    entries: Arc<Mutex<Vec<AuditEntry>>>,
}

impl AuditSink for InMemoryAuditSink {
    fn record(&self, entry: &AuditEntry) -> Result<(), AuditError> {
        let mut guard = self
            .entries
            .lock()
            .map_err(|_| AuditError::Unavailable("audit mutex poisoned".to_string()))?;
        guard.push(entry.clone());
        Ok(())
    }
}

impl InMemoryAuditSink {
    pub(crate) fn entries(&self) -> Vec<AuditEntry> {
        self.entries
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }
}
