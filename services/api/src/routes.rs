use crate::infra::{AppState, EvaluationService};
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use project_eval::error::AppError;
use project_eval::evaluation::EvaluationBundle;
use project_eval::intake::{FormSubmission, QuestionAnswers};
use project_eval::sources::HistoricalSources;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use tracing::info;

#[derive(Debug, Serialize)]
pub(crate) struct FormAnswersResponse {
    pub(crate) question_answer_dict: QuestionAnswers,
}

#[derive(Debug, Deserialize)]
pub(crate) struct EvaluateRequest {
    pub(crate) answers: Map<String, Value>,
    #[serde(default)]
    pub(crate) project_name: Option<String>,
    #[serde(default)]
    pub(crate) sources: Option<SourcesPayload>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct SourcesPayload {
    #[serde(default)]
    pub(crate) evaluations: Value,
    #[serde(default)]
    pub(crate) intake: Value,
    #[serde(default)]
    pub(crate) staff: Value,
}

#[derive(Debug, Serialize)]
pub(crate) struct EvaluateResponse {
    pub(crate) project_name: String,
    pub(crate) backend: &'static str,
    #[serde(flatten)]
    pub(crate) bundle: EvaluationBundle,
}

pub(crate) fn evaluation_routes(service: EvaluationService) -> Router {
    Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .route("/form-answers", post(form_answers_endpoint))
        .route("/api/v1/evaluate", post(evaluate_endpoint))
        .with_state(service)
}

pub(crate) async fn healthcheck() -> Json<Value> {
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

pub(crate) async fn form_answers_endpoint(
    Json(submission): Json<FormSubmission>,
) -> Json<FormAnswersResponse> {
    Json(FormAnswersResponse {
        question_answer_dict: submission.question_answers(),
    })
}

pub(crate) async fn evaluate_endpoint(
    State(service): State<EvaluationService>,
    Json(payload): Json<EvaluateRequest>,
) -> Result<Json<EvaluateResponse>, AppError> {
    let EvaluateRequest {
        answers,
        project_name,
        sources,
    } = payload;

    if answers.is_empty() {
        return Err(AppError::InvalidRequest(
            "answers must contain at least one question".to_string(),
        ));
    }

    let sources = match sources {
        Some(SourcesPayload {
            evaluations,
            intake,
            staff,
        }) => HistoricalSources::from_values(evaluations, intake, staff),
        None => service.default_sources.as_ref().clone(),
    };

    let answers = QuestionAnswers::from_bilingual(answers);
    let context = answers.to_context(project_name.as_deref(), sources);
    let bundle = service.evaluator.evaluate(&context).await;

    info!(
        project = %context.project_name,
        impact = bundle.impact.overall_score,
        effort = bundle.effort.overall_score,
        risk = bundle.risk.overall_score,
        "project evaluated"
    );

    Ok(Json(EvaluateResponse {
        project_name: context.project_name,
        backend: service.evaluator.backend_name(),
        bundle,
    }))
}
