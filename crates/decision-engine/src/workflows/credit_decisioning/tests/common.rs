use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use rust_decimal::Decimal;
use serde_json::Value;

use crate::workflows::credit_decisioning::{
    credit_decisioning_router, ApplicationId, ApplicationRecord, ApplicationRepository,
    ApplicationRequest, AuditEntry, AuditError, AuditSink, CreditDecisionEngine,
    CreditDecisioningService, CreditFeatures, DecisionId, DecisionRecord, DecisionRepository,
    DecisionThresholds, RepositoryError,
};

pub(super) fn request() -> ApplicationRequest {
    ApplicationRequest {
        full_name: "Jordan Example".to_string(),
        annual_income: Decimal::from(70_000),
        monthly_debt_payments: Decimal::from(1_000),
        requested_amount: Decimal::from(12_000),
        employment_years: 7,
        missed_payments_12m: 0,
        address: "12 Harbour Road, Leeds".to_string(),
        email: "jordan@example.com".to_string(),
    }
}

pub(super) fn features(
    dti: f64,
    affordability_ratio: f64,
    employment_years: u32,
    missed_payments_12m: u32,
) -> CreditFeatures {
    CreditFeatures {
        dti,
        affordability_ratio,
        annual_income: Decimal::from(60_000),
        requested_amount: Decimal::from(15_000),
        employment_years,
        missed_payments_12m,
    }
}

pub(super) fn engine() -> CreditDecisionEngine {
    CreditDecisionEngine::new(DecisionThresholds::standard().expect("default thresholds"))
}

pub(super) type MemoryService =
    CreditDecisioningService<MemoryApplications, MemoryDecisions, MemoryAudit>;

pub(super) fn build_service() -> (
    MemoryService,
    Arc<MemoryApplications>,
    Arc<MemoryDecisions>,
    Arc<MemoryAudit>,
) {
    let applications = Arc::new(MemoryApplications::default());
    let decisions = Arc::new(MemoryDecisions::default());
    let audit = Arc::new(MemoryAudit::default());
    let service = CreditDecisioningService::new(
        applications.clone(),
        decisions.clone(),
        audit.clone(),
        engine(),
    );
    (service, applications, decisions, audit)
}

#[derive(Default, Clone)]
pub(super) struct MemoryApplications {
    pub(super) records: Arc<Mutex<HashMap<ApplicationId, ApplicationRecord>>>,
}

impl ApplicationRepository for MemoryApplications {
    fn create(&self, record: ApplicationRecord) -> Result<ApplicationId, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&record.application_id) {
            return Err(RepositoryError::Conflict);
        }
        let id = record.application_id.clone();
        guard.insert(id.clone(), record);
        Ok(id)
    }

    fn get(&self, id: &ApplicationId) -> Result<Option<ApplicationRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryDecisions {
    pub(super) records: Arc<Mutex<HashMap<DecisionId, DecisionRecord>>>,
}

impl DecisionRepository for MemoryDecisions {
    fn create(&self, record: DecisionRecord) -> Result<DecisionId, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        let id = record.decision_id.clone();
        guard.insert(id.clone(), record);
        Ok(id)
    }

    fn get(&self, id: &DecisionId) -> Result<Option<DecisionRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryAudit {
    entries: Arc<Mutex<Vec<AuditEntry>>>,
}

impl MemoryAudit {
    pub(super) fn entries(&self) -> Vec<AuditEntry> {
        self.entries.lock().expect("audit mutex poisoned").clone()
    }
}

impl AuditSink for MemoryAudit {
    fn record(&self, entry: &AuditEntry) -> Result<(), AuditError> {
        self.entries
            .lock()
            .expect("audit mutex poisoned")
            .push(entry.clone());
        Ok(())
    }
}

pub(super) struct UnavailableApplications;

impl ApplicationRepository for UnavailableApplications {
    fn create(&self, _record: ApplicationRecord) -> Result<ApplicationId, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn get(&self, _id: &ApplicationId) -> Result<Option<ApplicationRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) struct FailingAudit;

impl AuditSink for FailingAudit {
    fn record(&self, _entry: &AuditEntry) -> Result<(), AuditError> {
        Err(AuditError::Unavailable("disk full".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 4096)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

pub(super) fn router_with_service(service: MemoryService) -> axum::Router {
    credit_decisioning_router(Arc::new(service))
}
