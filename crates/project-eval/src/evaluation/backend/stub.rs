use super::{BackendError, CompletionBackend, RawReply};
use crate::evaluation::metric::round2;
use async_trait::async_trait;
use serde_json::json;
use std::time::Duration;

pub const STUB_REASON: &str = "Deterministic stub based on prompt content.";

const PREFIX_CHARS: usize = 128;
const SIMULATED_LATENCY: Duration = Duration::from_millis(10);

/// Offline stand-in whose score depends only on the prompt's leading
/// characters. Scores stay within 2.8..=3.2.
#[derive(Debug, Clone)]
pub struct DeterministicBackend {
    latency: Duration,
}

impl Default for DeterministicBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl DeterministicBackend {
    pub fn new() -> Self {
        Self {
            latency: SIMULATED_LATENCY,
        }
    }

    pub fn with_latency(latency: Duration) -> Self {
        Self { latency }
    }

    pub fn score_for(prompt: &str) -> f64 {
        let checksum: u64 = prompt
            .chars()
            .take(PREFIX_CHARS)
            .map(|c| u64::from(u32::from(c)))
            .sum();
        let tweak = (checksum % 9) as f64 * 0.05;
        round2(3.0 + tweak - 0.2)
    }
}

#[async_trait]
impl CompletionBackend for DeterministicBackend {
    async fn complete(&self, prompt: &str) -> Result<RawReply, BackendError> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        Ok(RawReply::Json(json!({
            "score_1_to_5": Self::score_for(prompt),
            "reason": STUB_REASON,
        })))
    }

    fn name(&self) -> &'static str {
        "stub"
    }
}
