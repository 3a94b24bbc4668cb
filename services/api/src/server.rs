use crate::cli::ServeArgs;
use crate::infra::{load_default_sources, AppState, EvaluationService};
use crate::routes::evaluation_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use project_eval::config::AppConfig;
use project_eval::error::AppError;
use project_eval::evaluation::ProjectEvaluator;
use project_eval::telemetry;
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
    };

    let evaluator = ProjectEvaluator::from_config(&config.backend, config.evaluation.clone());
    let default_sources = load_default_sources(config.sources_dir.as_deref())?;
    let backend = evaluator.backend_name();
    let service = EvaluationService::new(evaluator, default_sources);

    let app = evaluation_routes(service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        backend,
        language = config.evaluation.language.code(),
        "project evaluation service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
