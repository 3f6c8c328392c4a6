//! Credit application intake and explainable approve/refer/decline decisioning.
//!
//! Personal fields stay in the application record; the engine and the audit trail only
//! ever see derived numeric features.

pub mod audit;
pub mod domain;
pub(crate) mod evaluation;
pub mod features;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use audit::{generate_request_id, AuditEntry, AuditError, AuditSink, JsonlAuditLog};
pub use domain::{
    ApplicantFinancials, ApplicationId, ApplicationRecord, ApplicationRequest,
    ApplicationValidationError, CreditOutcome, CreditReasonCode, DecisionId, DecisionRecord,
};
pub use evaluation::{
    CreditDecisionEngine, DecisionResult, DecisionThresholds, DEFAULT_APPROVE_THRESHOLD,
    DEFAULT_REFER_THRESHOLD,
};
pub use features::{derive_features, CreditFeatures};
pub use repository::{ApplicationRepository, DecisionRepository, RepositoryError};
pub use router::credit_decisioning_router;
pub use service::{CreditDecisioningService, CreditServiceError};
