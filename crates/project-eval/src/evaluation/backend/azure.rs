use super::{BackendError, CompletionBackend, RawReply};
use crate::config::AzureCredentials;
use async_trait::async_trait;
use serde_json::json;
use tokio::sync::OnceCell;

pub const SYSTEM_INSTRUCTION: &str = "You are an expert project evaluator. You must respond with ONLY valid JSON in this exact format: {\"score_1_to_5\": number, \"reason\": \"text\"}. Do not include any markdown formatting, code blocks, or additional text.";
const TEMPERATURE: f32 = 0.1;
const MAX_TOKENS: u32 = 500;

/// Chat-completions client for an Azure OpenAI deployment.
///
/// The HTTP client is built on first use and shared by every concurrent
/// call. Transport, status and decoding failures never leave `complete`;
/// they become a defaulted reply and a warning.
pub struct AzureOpenAiBackend {
    credentials: AzureCredentials,
    client: OnceCell<reqwest::Client>,
}

impl AzureOpenAiBackend {
    pub fn new(credentials: AzureCredentials) -> Self {
        Self {
            credentials,
            client: OnceCell::new(),
        }
    }

    pub fn completions_url(&self) -> String {
        format!(
            "{}/openai/deployments/{}/chat/completions?api-version={}",
            self.credentials.endpoint.trim_end_matches('/'),
            self.credentials.deployment,
            self.credentials.api_version
        )
    }

    async fn client(&self) -> Result<&reqwest::Client, BackendError> {
        self.client
            .get_or_try_init(|| async { reqwest::Client::builder().build() })
            .await
            .map_err(BackendError::from)
    }

    /// Sends one prompt and returns the assistant message content verbatim.
    pub async fn chat(&self, prompt: &str) -> Result<String, BackendError> {
        let body = json!({
            "messages": [
                {"role": "system", "content": SYSTEM_INSTRUCTION},
                {"role": "user", "content": prompt},
            ],
            "temperature": TEMPERATURE,
            "max_tokens": MAX_TOKENS,
        });

        let response = self
            .client()
            .await?
            .post(self.completions_url())
            .header("api-key", &self.credentials.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(BackendError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let payload: serde_json::Value = response.json().await?;
        payload
            .pointer("/choices/0/message/content")
            .and_then(|content| content.as_str())
            .map(|content| content.trim().to_string())
            .filter(|content| !content.is_empty())
            .ok_or(BackendError::EmptyCompletion)
    }
}

impl std::fmt::Debug for AzureOpenAiBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AzureOpenAiBackend")
            .field("credentials", &self.credentials)
            .field("connected", &self.client.initialized())
            .finish()
    }
}

#[async_trait]
impl CompletionBackend for AzureOpenAiBackend {
    async fn complete(&self, prompt: &str) -> Result<RawReply, BackendError> {
        match self.chat(prompt).await {
            Ok(content) => Ok(RawReply::Text(content)),
            Err(err) => {
                tracing::warn!(
                    error = %err,
                    deployment = %self.credentials.deployment,
                    "azure completion failed; defaulting"
                );
                Ok(RawReply::defaulted(format!(
                    "backend error: {err}; defaulted to 3.0"
                )))
            }
        }
    }

    fn name(&self) -> &'static str {
        "azure_openai"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluation::normalize;
    use wiremock::matchers::{body_partial_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn backend_for(server: &MockServer) -> AzureOpenAiBackend {
        AzureOpenAiBackend::new(AzureCredentials {
            endpoint: format!("{}/", server.uri()),
            api_key: "test-key".to_string(),
            api_version: "2024-02-15-preview".to_string(),
            deployment: "eval-gpt".to_string(),
        })
    }

    fn completion(content: &str) -> serde_json::Value {
        json!({
            "choices": [{"index": 0, "message": {"role": "assistant", "content": content}}]
        })
    }

    #[tokio::test]
    async fn posts_chat_request_and_returns_content() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/openai/deployments/eval-gpt/chat/completions"))
            .and(query_param("api-version", "2024-02-15-preview"))
            .and(header("api-key", "test-key"))
            .and(body_partial_json(json!({"max_tokens": 500})))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion(
                r#"{"score_1_to_5": 4.5, "reason": "Clear sponsorship"}"#,
            )))
            .expect(1)
            .mount(&server)
            .await;

        let reply = backend_for(&server)
            .complete("Project: Atlas")
            .await
            .expect("azure backend never errors");
        let judgment = normalize(reply);
        assert_eq!(judgment.score, 4.5);
        assert_eq!(judgment.reason, "Clear sponsorship");
    }

    #[tokio::test]
    async fn fenced_content_survives_normalization() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion(
                "```json\n{\"score_1_to_5\": 2.1, \"reason\": \"Fenced\"}\n```",
            )))
            .mount(&server)
            .await;

        let reply = backend_for(&server)
            .complete("prompt")
            .await
            .expect("azure backend never errors");
        assert_eq!(normalize(reply).score, 2.1);
    }

    #[tokio::test]
    async fn rejected_credentials_degrade_to_default_reply() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401).set_body_string("invalid api key"))
            .mount(&server)
            .await;

        let backend = backend_for(&server);
        let err = backend.chat("prompt").await.expect_err("401 is an error");
        assert!(matches!(err, BackendError::Status { status: 401, .. }));

        let judgment = normalize(backend.complete("prompt").await.expect("defaulted reply"));
        assert_eq!(judgment.score, 3.0);
        assert!(judgment.reason.starts_with("backend error:"));
        assert!(judgment.reason.contains("401"));
    }

    #[tokio::test]
    async fn missing_content_is_an_empty_completion() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"choices": []})))
            .mount(&server)
            .await;

        let err = backend_for(&server)
            .chat("prompt")
            .await
            .expect_err("no choices");
        assert!(matches!(err, BackendError::EmptyCompletion));
    }

    #[test]
    fn url_joins_endpoint_without_double_slash() {
        let backend = AzureOpenAiBackend::new(AzureCredentials {
            endpoint: "https://example.openai.azure.com/".to_string(),
            api_key: "k".to_string(),
            api_version: "v".to_string(),
            deployment: "d".to_string(),
        });
        assert_eq!(
            backend.completions_url(),
            "https://example.openai.azure.com/openai/deployments/d/chat/completions?api-version=v"
        );
    }
}
