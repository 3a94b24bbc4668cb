//! Completion backends: the network client and the offline stand-in.

mod azure;
mod stub;

pub use azure::AzureOpenAiBackend;
pub use stub::{DeterministicBackend, STUB_REASON};

use crate::config::{BackendConfig, BackendKind};
use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::Arc;

/// Whatever a backend hands back before normalization.
#[derive(Debug, Clone, PartialEq)]
pub enum RawReply {
    Text(String),
    Bytes(Vec<u8>),
    Json(Value),
}

impl RawReply {
    /// A structurally valid reply carrying the default score.
    pub fn defaulted(reason: impl Into<String>) -> Self {
        RawReply::Json(json!({
            "score_1_to_5": super::metric::DEFAULT_SCORE,
            "reason": reason.into(),
        }))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("backend responded with status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("response carried no completion content")]
    EmptyCompletion,
    #[error("timed out after {secs}s")]
    Timeout { secs: f64 },
    #[error("{0}")]
    Other(String),
}

#[async_trait]
pub trait CompletionBackend: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<RawReply, BackendError>;

    fn name(&self) -> &'static str;
}

/// Builds the configured backend, falling back to the stand-in when the
/// network backend has no credentials.
pub fn backend_from_config(config: &BackendConfig) -> Arc<dyn CompletionBackend> {
    match (config.kind, &config.azure) {
        (BackendKind::Stub, _) => Arc::new(DeterministicBackend::new()),
        (BackendKind::Azure, Some(credentials)) => {
            Arc::new(AzureOpenAiBackend::new(credentials.clone()))
        }
        (BackendKind::Azure, None) => {
            tracing::warn!(
                "azure backend selected without credentials; using deterministic stand-in"
            );
            Arc::new(DeterministicBackend::new())
        }
    }
}
