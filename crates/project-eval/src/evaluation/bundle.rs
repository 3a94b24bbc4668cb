use super::backend::{backend_from_config, CompletionBackend};
use super::context::{ContextResolver, ProjectContext};
use super::evaluator::{MetricEvaluator, MetricResult};
use super::prompts::PromptCatalog;
use crate::config::{BackendConfig, EvaluationSettings};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// The three metric results for one project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationBundle {
    pub impact: MetricResult,
    pub effort: MetricResult,
    pub risk: MetricResult,
}

impl EvaluationBundle {
    pub fn metrics(&self) -> [&MetricResult; 3] {
        [&self.impact, &self.effort, &self.risk]
    }
}

/// Runs the impact, effort and risk evaluators side by side.
#[derive(Debug, Clone)]
pub struct ProjectEvaluator {
    impact: MetricEvaluator,
    effort: MetricEvaluator,
    risk: MetricEvaluator,
}

impl ProjectEvaluator {
    pub fn new(backend: Arc<dyn CompletionBackend>, settings: EvaluationSettings) -> Self {
        let catalog = Arc::new(PromptCatalog::standard(settings.language));
        Self::with_parts(backend, catalog, ContextResolver::default(), settings)
    }

    pub fn from_config(backend: &BackendConfig, settings: EvaluationSettings) -> Self {
        Self::new(backend_from_config(backend), settings)
    }

    pub fn with_parts(
        backend: Arc<dyn CompletionBackend>,
        catalog: Arc<PromptCatalog>,
        resolver: ContextResolver,
        settings: EvaluationSettings,
    ) -> Self {
        let configure = |evaluator: MetricEvaluator| {
            evaluator
                .with_resolver(resolver.clone())
                .with_settings(settings.clone())
        };
        Self {
            impact: configure(MetricEvaluator::impact(Arc::clone(&catalog), Arc::clone(&backend))),
            effort: configure(MetricEvaluator::effort(Arc::clone(&catalog), Arc::clone(&backend))),
            risk: configure(MetricEvaluator::risk(catalog, backend)),
        }
    }

    pub fn backend_name(&self) -> &'static str {
        self.impact.backend_name()
    }

    pub async fn evaluate(&self, context: &ProjectContext) -> EvaluationBundle {
        let (impact, effort, risk) = tokio::join!(
            self.impact.evaluate_with_sources(context),
            self.effort.evaluate_with_sources(context),
            self.risk.evaluate_with_sources(context),
        );
        EvaluationBundle {
            impact,
            effort,
            risk,
        }
    }
}
