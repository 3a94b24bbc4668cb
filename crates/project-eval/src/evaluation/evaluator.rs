//! Per-metric fan-out, join and aggregation.
//!
//! An evaluation resolves the metric's prompts in catalog order, renders
//! each one, dispatches every backend call concurrently and reassembles the
//! judgments in declaration order before aggregating. Nothing in here fails:
//! render errors, backend errors, timeouts and panicked tasks all default
//! the one affected submetric to 3.0.

use super::backend::{BackendError, CompletionBackend};
use super::context::{ContextResolver, ProjectContext};
use super::metric::{round2, Band, MetricId, DEFAULT_SCORE};
use super::normalizer::{normalize, Judgment};
use super::prompts::{PromptCatalog, RenderError, SubmetricPrompt};
use crate::config::EvaluationSettings;
use crate::sources::HistoricalSources;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

pub const BALANCED_REASON: &str = "Balanced across submetrics.";
pub const OVERALL_REASON_LIMIT: usize = 240;
const PROMPT_LOG_LIMIT: usize = 1000;
const JUDGMENT_LOG_LIMIT: usize = 120;

pub const IMPACT_KEYS: &[&str] = &[
    "Strategic Fit",
    "Business Value Contribution",
    "Scalability & Replicability Potential",
];
pub const EFFORT_KEYS: &[&str] = &[
    "Projected Timeline",
    "Estimated Person-Day Effort",
    "External Resource Dependency",
];
pub const RISK_KEYS: &[&str] = &[
    "Scope Definition Risk",
    "Critical Talent Dependency",
    "Solution Complexity & Innovation Risk",
    "Implementation Failure Risk",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmetricResult {
    pub key: String,
    pub name: String,
    pub score: f64,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricResult {
    pub metric: MetricId,
    pub overall_score: f64,
    pub band: Band,
    pub overall_reason: String,
    pub submetrics: Vec<SubmetricResult>,
}

/// Mean score, band and headline reason for an ordered set of submetrics.
pub fn aggregate(metric: MetricId, submetrics: Vec<SubmetricResult>) -> MetricResult {
    let overall_score = if submetrics.is_empty() {
        DEFAULT_SCORE
    } else {
        let total: f64 = submetrics.iter().map(|submetric| submetric.score).sum();
        round2(total / submetrics.len() as f64)
    };

    let headline = submetrics
        .iter()
        .map(|submetric| submetric.reason.trim())
        .filter(|reason| !reason.is_empty())
        .take(2)
        .collect::<Vec<_>>()
        .join(" ");
    let overall_reason = if headline.is_empty() {
        BALANCED_REASON.to_string()
    } else {
        truncate_chars(&headline, OVERALL_REASON_LIMIT)
    };

    MetricResult {
        metric,
        overall_score,
        band: Band::from_score(overall_score),
        overall_reason,
        submetrics,
    }
}

fn truncate_chars(text: &str, limit: usize) -> String {
    text.chars().take(limit).collect()
}

struct PlannedSubmetric {
    key: String,
    name: String,
    rendered: Result<String, RenderError>,
}

impl PlannedSubmetric {
    fn new(prompt: &SubmetricPrompt, rendered: Result<String, RenderError>) -> Self {
        Self {
            key: prompt.key.clone(),
            name: prompt.name.clone(),
            rendered,
        }
    }
}

/// Scores one metric by asking the backend about each of its submetrics.
#[derive(Clone)]
pub struct MetricEvaluator {
    metric: MetricId,
    submetric_keys: Vec<String>,
    catalog: Arc<PromptCatalog>,
    backend: Arc<dyn CompletionBackend>,
    resolver: ContextResolver,
    settings: EvaluationSettings,
}

impl std::fmt::Debug for MetricEvaluator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MetricEvaluator")
            .field("metric", &self.metric)
            .field("submetric_keys", &self.submetric_keys)
            .field("backend", &self.backend.name())
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

impl MetricEvaluator {
    pub fn new<I, S>(
        metric: MetricId,
        submetric_keys: I,
        catalog: Arc<PromptCatalog>,
        backend: Arc<dyn CompletionBackend>,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            metric,
            submetric_keys: submetric_keys.into_iter().map(Into::into).collect(),
            catalog,
            backend,
            resolver: ContextResolver::default(),
            settings: EvaluationSettings::default(),
        }
    }

    pub fn impact(catalog: Arc<PromptCatalog>, backend: Arc<dyn CompletionBackend>) -> Self {
        Self::new(MetricId::BusinessImpact, IMPACT_KEYS.iter().copied(), catalog, backend)
    }

    pub fn effort(catalog: Arc<PromptCatalog>, backend: Arc<dyn CompletionBackend>) -> Self {
        Self::new(MetricId::ResourceInvestment, EFFORT_KEYS.iter().copied(), catalog, backend)
    }

    pub fn risk(catalog: Arc<PromptCatalog>, backend: Arc<dyn CompletionBackend>) -> Self {
        Self::new(MetricId::ExecutionRisk, RISK_KEYS.iter().copied(), catalog, backend)
    }

    pub fn with_resolver(mut self, resolver: ContextResolver) -> Self {
        self.resolver = resolver;
        self
    }

    pub fn with_settings(mut self, settings: EvaluationSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn metric(&self) -> MetricId {
        self.metric
    }

    pub fn submetric_keys(&self) -> &[String] {
        &self.submetric_keys
    }

    pub fn backend_name(&self) -> &'static str {
        self.backend.name()
    }

    /// Primary path: every catalog prompt of the metric, enriched with the
    /// historical exemplar. Falls back to [`Self::evaluate`] when the catalog
    /// has nothing registered for the metric.
    pub async fn evaluate_with_sources(&self, context: &ProjectContext) -> MetricResult {
        let entries = self.catalog.prompts_for(self.metric);
        if entries.is_empty() {
            return self.evaluate(&context.project_text).await;
        }

        let planned = entries
            .into_iter()
            .map(|entry| {
                let variables =
                    self.resolver
                        .resolve(&context.project_name, &entry.label, &context.sources);
                PlannedSubmetric::new(
                    &entry.prompt,
                    entry.prompt.render(&context.project_text, &variables),
                )
            })
            .collect();

        self.dispatch(planned).await
    }

    /// Secondary path: the evaluator's own key list, with placeholder prompts
    /// for keys the catalog does not know. Historical placeholders resolve
    /// against empty corpora.
    pub async fn evaluate(&self, project_text: &str) -> MetricResult {
        let empty = HistoricalSources::empty();
        let planned = self
            .submetric_keys
            .iter()
            .map(|key| {
                let prompt = self
                    .catalog
                    .lookup(self.metric, key)
                    .cloned()
                    .unwrap_or_else(|| Arc::new(SubmetricPrompt::placeholder(key)));
                let variables = self.resolver.resolve("", key, &empty);
                PlannedSubmetric::new(&prompt, prompt.render(project_text, &variables))
            })
            .collect();

        self.dispatch(planned).await
    }

    async fn dispatch(&self, planned: Vec<PlannedSubmetric>) -> MetricResult {
        let mut judgments: Vec<Option<Judgment>> = vec![None; planned.len()];
        let mut tasks = JoinSet::new();

        for (index, plan) in planned.iter().enumerate() {
            let prompt = match &plan.rendered {
                Ok(prompt) => prompt.clone(),
                Err(err) => {
                    warn!(
                        metric = %self.metric,
                        submetric = %plan.name,
                        error = %err,
                        "prompt render failed; defaulting submetric"
                    );
                    judgments[index] =
                        Some(Judgment::defaulted(format!("template error: {err}; defaulted to 3.0")));
                    continue;
                }
            };

            if self.settings.log_prompts {
                info!(
                    metric = %self.metric,
                    submetric = %plan.name,
                    prompt = %truncate_chars(&prompt, PROMPT_LOG_LIMIT),
                    "rendered prompt"
                );
            }

            let backend = Arc::clone(&self.backend);
            let timeout = self.settings.backend_timeout;
            tasks.spawn(async move { (index, judge(backend.as_ref(), &prompt, timeout).await) });
        }

        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((index, Ok(judgment))) => judgments[index] = Some(judgment),
                Ok((index, Err(err))) => {
                    warn!(
                        metric = %self.metric,
                        submetric = %planned[index].name,
                        backend = self.backend.name(),
                        error = %err,
                        "backend call failed; defaulting submetric"
                    );
                    judgments[index] =
                        Some(Judgment::defaulted(format!("backend error: {err}; defaulted to 3.0")));
                }
                Err(err) => warn!(metric = %self.metric, error = %err, "submetric task aborted"),
            }
        }

        let submetrics = planned
            .into_iter()
            .zip(judgments)
            .map(|(plan, judgment)| {
                let judgment = judgment.unwrap_or_else(|| {
                    Judgment::defaulted("backend error: task aborted; defaulted to 3.0")
                });
                debug!(
                    metric = %self.metric,
                    submetric = %plan.name,
                    score = judgment.score,
                    "submetric scored"
                );
                if self.settings.log_judgments {
                    info!(
                        metric = %self.metric,
                        submetric = %plan.name,
                        score = judgment.score,
                        reason = %truncate_chars(&judgment.reason, JUDGMENT_LOG_LIMIT),
                        "backend judgment"
                    );
                }
                SubmetricResult {
                    key: plan.key,
                    name: plan.name,
                    score: judgment.score,
                    reason: judgment.reason,
                }
            })
            .collect();

        let result = aggregate(self.metric, submetrics);
        info!(
            metric = %self.metric,
            overall_score = result.overall_score,
            band = result.band.label(),
            "metric evaluated"
        );
        result
    }
}

async fn judge(
    backend: &dyn CompletionBackend,
    prompt: &str,
    timeout: Duration,
) -> Result<Judgment, BackendError> {
    match tokio::time::timeout(timeout, backend.complete(prompt)).await {
        Ok(reply) => reply.map(normalize),
        Err(_) => Err(BackendError::Timeout {
            secs: timeout.as_secs_f64(),
        }),
    }
}
