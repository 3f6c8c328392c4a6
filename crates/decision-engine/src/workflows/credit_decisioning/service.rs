use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use super::audit::{generate_request_id, AuditEntry, AuditError, AuditSink};
use super::domain::{
    ApplicationId, ApplicationRecord, ApplicationRequest, ApplicationValidationError, DecisionId,
    DecisionRecord,
};
use super::evaluation::CreditDecisionEngine;
use super::features::derive_features;
use super::repository::{ApplicationRepository, DecisionRepository, RepositoryError};

/// Service composing persistence, the decision engine, and the audit trail.
pub struct CreditDecisioningService<R, D, A> {
    applications: Arc<R>,
    decisions: Arc<D>,
    audit: Arc<A>,
    engine: Arc<CreditDecisionEngine>,
}

impl<R, D, A> CreditDecisioningService<R, D, A>
where
    R: ApplicationRepository + 'static,
    D: DecisionRepository + 'static,
    A: AuditSink + 'static,
{
    pub fn new(
        applications: Arc<R>,
        decisions: Arc<D>,
        audit: Arc<A>,
        engine: CreditDecisionEngine,
    ) -> Self {
        Self {
            applications,
            decisions,
            audit,
            engine: Arc::new(engine),
        }
    }

    pub fn engine(&self) -> &CreditDecisionEngine {
        &self.engine
    }

    fn next_application_id(&self) -> ApplicationId {
        ApplicationId(format!("app-{}", uuid::Uuid::new_v4()))
    }

    fn next_decision_id(&self) -> DecisionId {
        DecisionId(format!("dec-{}", uuid::Uuid::new_v4()))
    }

    /// Validate and store a new application.
    pub fn submit(
        &self,
        request: ApplicationRequest,
    ) -> Result<ApplicationRecord, CreditServiceError> {
        request.validate()?;

        let record =
            ApplicationRecord::from_request(self.next_application_id(), request, Utc::now());
        self.applications.create(record.clone())?;

        info!(application_id = %record.application_id, "credit application accepted");
        Ok(record)
    }

    pub fn get_application(
        &self,
        application_id: &ApplicationId,
    ) -> Result<ApplicationRecord, CreditServiceError> {
        self.applications
            .get(application_id)?
            .ok_or_else(|| CreditServiceError::ApplicationNotFound(application_id.clone()))
    }

    /// Score a stored application, persist the decision, then append the audit entry.
    pub fn decide(
        &self,
        application_id: &ApplicationId,
    ) -> Result<DecisionRecord, CreditServiceError> {
        let application = self.get_application(application_id)?;
        let features = derive_features(&application.financials());
        let result = self.engine.decide(&features);

        let decision = DecisionRecord {
            decision_id: self.next_decision_id(),
            application_id: application.application_id,
            outcome: result.outcome,
            score: result.score,
            reason_codes: result.reason_codes,
            timestamp: Utc::now(),
        };
        self.decisions.create(decision.clone())?;

        let entry = AuditEntry::new(generate_request_id(), &decision, &features);
        if let Err(err) = self.audit.record(&entry) {
            warn!(decision_id = %decision.decision_id, error = %err, "audit append failed");
            return Err(err.into());
        }

        info!(
            application_id = %decision.application_id,
            decision_id = %decision.decision_id,
            outcome = ?decision.outcome,
            score = decision.score,
            "credit decision computed"
        );
        Ok(decision)
    }

    pub fn get_decision(
        &self,
        decision_id: &DecisionId,
    ) -> Result<DecisionRecord, CreditServiceError> {
        self.decisions
            .get(decision_id)?
            .ok_or_else(|| CreditServiceError::DecisionNotFound(decision_id.clone()))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CreditServiceError {
    #[error(transparent)]
    Validation(#[from] ApplicationValidationError),
    #[error("application {0} not found")]
    ApplicationNotFound(ApplicationId),
    #[error("decision {0} not found")]
    DecisionNotFound(DecisionId),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Audit(#[from] AuditError),
}
