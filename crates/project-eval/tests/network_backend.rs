use project_eval::config::{AzureCredentials, BackendConfig, EvaluationSettings};
use project_eval::evaluation::{ProjectContext, ProjectEvaluator};
use project_eval::sources::HistoricalSources;
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const DEPLOYMENT_PATH: &str = "/openai/deployments/project-eval/chat/completions";

fn credentials(server: &MockServer) -> BackendConfig {
    BackendConfig::azure(AzureCredentials {
        endpoint: server.uri(),
        api_key: "integration-key".to_string(),
        api_version: "2024-02-15-preview".to_string(),
        deployment: "project-eval".to_string(),
    })
}

fn context() -> ProjectContext {
    ProjectContext::new(
        "Atlas",
        "Project: Atlas\nScope and Objectives: Automate intake triage",
        HistoricalSources::from_values(
            json!({"project_name": "Beacon", "metrics": {}}),
            json!({}),
            json!({"staff": "2 analysts"}),
        ),
    )
}

fn chat_reply(content: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "id": "chatcmpl-1",
        "choices": [{"index": 0, "message": {"role": "assistant", "content": content}}]
    }))
}

#[tokio::test]
async fn every_submetric_goes_through_the_deployment() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(DEPLOYMENT_PATH))
        .and(header("api-key", "integration-key"))
        .respond_with(chat_reply(
            "Sure! ```json\n{\"score_1_to_5\": 4.4, \"reason\": \"Well scoped.\"}\n```",
        ))
        .expect(10)
        .mount(&server)
        .await;

    let evaluator =
        ProjectEvaluator::from_config(&credentials(&server), EvaluationSettings::default());
    assert_eq!(evaluator.backend_name(), "azure_openai");

    let bundle = evaluator.evaluate(&context()).await;
    for metric in bundle.metrics() {
        assert_eq!(metric.overall_score, 4.4);
        assert_eq!(metric.overall_reason, "Well scoped. Well scoped.");
    }
}

#[tokio::test]
async fn server_errors_default_every_submetric_without_failing() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
        .mount(&server)
        .await;

    let evaluator =
        ProjectEvaluator::from_config(&credentials(&server), EvaluationSettings::default());
    let bundle = evaluator.evaluate(&context()).await;

    assert_eq!(bundle.risk.submetrics.len(), 5);
    for metric in bundle.metrics() {
        assert_eq!(metric.overall_score, 3.0);
        for submetric in &metric.submetrics {
            assert_eq!(submetric.score, 3.0);
            assert!(submetric.reason.starts_with("backend error:"));
            assert!(submetric.reason.contains("503"));
        }
    }
}

#[tokio::test]
async fn stalled_deployment_is_bounded_by_the_timeout() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            chat_reply("{\"score_1_to_5\": 5, \"reason\": \"too late\"}")
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let settings = EvaluationSettings {
        backend_timeout: Duration::from_millis(100),
        ..EvaluationSettings::default()
    };
    let evaluator = ProjectEvaluator::from_config(&credentials(&server), settings);
    let bundle = evaluator.evaluate(&context()).await;

    let submetric = &bundle.impact.submetrics[0];
    assert_eq!(submetric.score, 3.0);
    assert_eq!(
        submetric.reason,
        "backend error: timed out after 0.1s; defaulted to 3.0"
    );
}
