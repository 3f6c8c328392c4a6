use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde_json::json;

use super::audit::AuditSink;
use super::domain::{ApplicationId, ApplicationRequest, DecisionId};
use super::repository::{ApplicationRepository, DecisionRepository, RepositoryError};
use super::service::{CreditDecisioningService, CreditServiceError};

type SharedService<R, D, A> = Arc<CreditDecisioningService<R, D, A>>;

/// Router exposing application intake, decisioning, and record lookup.
pub fn credit_decisioning_router<R, D, A>(service: SharedService<R, D, A>) -> Router
where
    R: ApplicationRepository + 'static,
    D: DecisionRepository + 'static,
    A: AuditSink + 'static,
{
    Router::new()
        .route("/applications", post(submit_handler::<R, D, A>))
        .route(
            "/applications/:application_id",
            get(application_handler::<R, D, A>),
        )
        .route(
            "/applications/:application_id/decision",
            post(decision_handler::<R, D, A>),
        )
        .route(
            "/decisions/:decision_id",
            get(decision_lookup_handler::<R, D, A>),
        )
        .with_state(service)
}

fn error_response(error: CreditServiceError) -> Response {
    let status = match &error {
        CreditServiceError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        CreditServiceError::ApplicationNotFound(_) | CreditServiceError::DecisionNotFound(_) => {
            StatusCode::NOT_FOUND
        }
        CreditServiceError::Repository(RepositoryError::Conflict) => StatusCode::CONFLICT,
        CreditServiceError::Repository(RepositoryError::Unavailable(_))
        | CreditServiceError::Audit(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };

    let payload = json!({
        "error": error.to_string(),
    });
    (status, axum::Json(payload)).into_response()
}

pub(crate) async fn submit_handler<R, D, A>(
    State(service): State<SharedService<R, D, A>>,
    axum::Json(request): axum::Json<ApplicationRequest>,
) -> Response
where
    R: ApplicationRepository + 'static,
    D: DecisionRepository + 'static,
    A: AuditSink + 'static,
{
    match service.submit(request) {
        Ok(record) => {
            let payload = json!({
                "application_id": record.application_id,
            });
            (StatusCode::CREATED, axum::Json(payload)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn application_handler<R, D, A>(
    State(service): State<SharedService<R, D, A>>,
    Path(application_id): Path<String>,
) -> Response
where
    R: ApplicationRepository + 'static,
    D: DecisionRepository + 'static,
    A: AuditSink + 'static,
{
    match service.get_application(&ApplicationId(application_id)) {
        Ok(record) => (StatusCode::OK, axum::Json(record)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn decision_handler<R, D, A>(
    State(service): State<SharedService<R, D, A>>,
    Path(application_id): Path<String>,
) -> Response
where
    R: ApplicationRepository + 'static,
    D: DecisionRepository + 'static,
    A: AuditSink + 'static,
{
    match service.decide(&ApplicationId(application_id)) {
        Ok(decision) => (StatusCode::CREATED, axum::Json(decision)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn decision_lookup_handler<R, D, A>(
    State(service): State<SharedService<R, D, A>>,
    Path(decision_id): Path<String>,
) -> Response
where
    R: ApplicationRepository + 'static,
    D: DecisionRepository + 'static,
    A: AuditSink + 'static,
{
    match service.get_decision(&DecisionId(decision_id)) {
        Ok(decision) => (StatusCode::OK, axum::Json(decision)).into_response(),
        Err(error) => error_response(error),
    }
}
