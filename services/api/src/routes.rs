use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use decision_engine::error::AppError;
use decision_engine::workflows::aml_triage::io::read_transactions;
use decision_engine::workflows::aml_triage::TriageRun;
use decision_engine::workflows::credit_decisioning::{
    credit_decisioning_router, ApplicationRepository, AuditSink, CreditDecisioningService,
    DecisionRepository,
};
use decision_engine::workflows::risk_scoring::{
    CreditApplication, DecisionTally, RiskAssessment,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::io::Cursor;
use std::sync::Arc;
use tracing::info;

#[derive(Debug, Deserialize)]
pub(crate) struct AmlTriageRequest {
    pub(crate) transactions_csv: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct RiskBatchResponse {
    pub(crate) assessments: Vec<RiskAssessment>,
    pub(crate) tally: DecisionTally,
}

pub(crate) fn with_service_routes<R, D, A>(
    service: Arc<CreditDecisioningService<R, D, A>>,
) -> axum::Router
where
    R: ApplicationRepository + 'static,
    D: DecisionRepository + 'static,
    A: AuditSink + 'static,
{
    credit_decisioning_router(service)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route(
            "/api/v1/risk/assessments",
            axum::routing::post(risk_assessments_endpoint),
        )
        .route("/api/v1/aml/triage", axum::routing::post(aml_triage_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

/// Scores the whole batch; the first invalid record rejects the request.
pub(crate) async fn risk_assessments_endpoint(
    Extension(state): Extension<AppState>,
    Json(applications): Json<Vec<CreditApplication>>,
) -> Result<Json<RiskBatchResponse>, AppError> {
    let assessments = state
        .risk_engine
        .assess_batch(&applications)
        .into_iter()
        .collect::<Result<Vec<_>, _>>()?;
    let tally = DecisionTally::from_assessments(&assessments);

    info!(
        applications = assessments.len(),
        approved = tally.approved,
        manual_review = tally.manual_review,
        declined = tally.declined,
        "risk batch scored"
    );

    Ok(Json(RiskBatchResponse { assessments, tally }))
}

pub(crate) async fn aml_triage_endpoint(
    Extension(state): Extension<AppState>,
    Json(payload): Json<AmlTriageRequest>,
) -> Result<Json<TriageRun>, AppError> {
    let reader = Cursor::new(payload.transactions_csv.into_bytes());
    let ledger = read_transactions(reader)?;
    Ok(Json(state.aml_engine.run(&ledger)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use decision_engine::workflows::aml_triage::{AmlRuleConfig, AmlTriageEngine, Priority};
    use decision_engine::workflows::risk_scoring::{EmploymentStatus, RiskScoringEngine};
    use metrics_exporter_prometheus::PrometheusBuilder;
    use rust_decimal::Decimal;
    use std::sync::atomic::AtomicBool;

    fn state(ready: bool) -> AppState {
        AppState {
            readiness: Arc::new(AtomicBool::new(ready)),
            metrics: Arc::new(PrometheusBuilder::new().build_recorder().handle()),
            risk_engine: Arc::new(RiskScoringEngine::standard().expect("standard engine")),
            aml_engine: Arc::new(
                AmlTriageEngine::new(&AmlRuleConfig::default()).expect("default rules"),
            ),
        }
    }

    fn application(id: &str, credit_score: u16) -> CreditApplication {
        CreditApplication {
            application_id: id.to_string(),
            credit_score,
            annual_income: Decimal::from(120_000),
            monthly_debt_payments: Decimal::from(1_500),
            employment_status: EmploymentStatus::FullTime,
            years_employed: Decimal::from(5),
            requested_amount: Decimal::from(30_000),
        }
    }

    #[tokio::test]
    async fn readiness_reflects_startup_flag() {
        let response = readiness_endpoint(Extension(state(false)))
            .await
            .into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

        let response = readiness_endpoint(Extension(state(true)))
            .await
            .into_response();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn risk_endpoint_returns_assessments_and_tally() {
        let Json(body) = risk_assessments_endpoint(
            Extension(state(true)),
            Json(vec![application("APP-1", 780), application("APP-2", 800)]),
        )
        .await
        .expect("batch scores");

        assert_eq!(body.assessments.len(), 2);
        assert_eq!(body.assessments[0].total_score, 100);
        assert_eq!(body.tally.approved, 2);
    }

    #[tokio::test]
    async fn risk_endpoint_rejects_invalid_records() {
        let err = risk_assessments_endpoint(
            Extension(state(true)),
            Json(vec![application("APP-1", 780), application("APP-2", 200)]),
        )
        .await
        .err()
        .expect("credit score out of range");

        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn aml_endpoint_triages_csv_payload() {
        let request = AmlTriageRequest {
            transactions_csv: "transaction_id,account_id,timestamp,amount,transaction_type,beneficiary_id,currency\n\
                               T1,ACC-1,2024-01-15T10:00:00Z,20000.00,DEBIT,BEN-1,USD\n\
                               T2,ACC-2,2024-01-15T10:05:00Z,12.34,DEBIT,BEN-2,USD\n"
                .to_string(),
        };

        let Json(run) = aml_triage_endpoint(Extension(state(true)), Json(request))
            .await
            .expect("triage runs");

        assert_eq!(run.summary.total_transactions, 2);
        assert_eq!(run.decisions.len(), 1);
        assert_eq!(run.decisions[0].priority, Priority::P2);
        assert_eq!(run.decisions[0].triage_score, 50.0);
    }

    #[tokio::test]
    async fn aml_endpoint_rejects_malformed_rows() {
        let request = AmlTriageRequest {
            transactions_csv: "transaction_id,account_id,timestamp,amount,transaction_type,beneficiary_id\n\
                               T1,ACC-1,2024-01-15T10:00:00Z,-5.00,DEBIT,BEN-1\n"
                .to_string(),
        };

        let err = aml_triage_endpoint(Extension(state(true)), Json(request))
            .await
            .err()
            .expect("negative amount rejected");

        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn service_router_serves_health_and_credit_routes() {
        use crate::infra::{
            InMemoryApplicationRepository, InMemoryAuditSink, InMemoryDecisionRepository,
        };
        use axum::body::Body;
        use axum::http::Request;
        use decision_engine::workflows::credit_decisioning::{
            CreditDecisionEngine, DecisionThresholds,
        };
        use tower::ServiceExt;

        let service = Arc::new(CreditDecisioningService::new(
            Arc::new(InMemoryApplicationRepository::default()),
            Arc::new(InMemoryDecisionRepository::default()),
            Arc::new(InMemoryAuditSink::default()),
            CreditDecisionEngine::new(DecisionThresholds::standard().expect("default thresholds")),
        ));
        let router = with_service_routes(service).layer(Extension(state(true)));

        let health = Request::builder()
            .uri("/health")
            .body(Body::empty())
            .expect("request");
        let response = router.clone().oneshot(health).await.expect("health");
        assert_eq!(response.status(), StatusCode::OK);

        let missing = Request::builder()
            .uri("/decisions/dec-000404")
            .body(Body::empty())
            .expect("request");
        let response = router.oneshot(missing).await.expect("lookup");
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
