use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryApplicationRepository, InMemoryDecisionRepository};
use crate::routes::with_service_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use decision_engine::config::AppConfig;
use decision_engine::error::AppError;
use decision_engine::telemetry;
use decision_engine::workflows::aml_triage::AmlTriageEngine;
use decision_engine::workflows::credit_decisioning::{
    CreditDecisionEngine, CreditDecisioningService, JsonlAuditLog,
};
use decision_engine::workflows::risk_scoring::RiskScoringEngine;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
        risk_engine: Arc::new(RiskScoringEngine::standard()?),
        aml_engine: Arc::new(AmlTriageEngine::new(&config.decisioning.aml_rules())?),
    };

    let engine = CreditDecisionEngine::new(config.decisioning.thresholds()?);
    let credit_service = Arc::new(CreditDecisioningService::new(
        Arc::new(InMemoryApplicationRepository::default()),
        Arc::new(InMemoryDecisionRepository::default()),
        Arc::new(JsonlAuditLog::new(config.audit.log_path.clone())),
        engine,
    ));

    let app = with_service_routes(credit_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        audit_log = %config.audit.log_path.display(),
        "decision engine service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
