//! The evaluation engine: prompt registry, context resolution, backends,
//! response normalization and per-metric aggregation.

pub mod backend;
pub mod bundle;
pub mod context;
pub mod evaluator;
pub mod metric;
pub mod normalizer;
pub mod prompts;

pub use backend::{
    backend_from_config, AzureOpenAiBackend, BackendError, CompletionBackend,
    DeterministicBackend, RawReply,
};
pub use bundle::{EvaluationBundle, ProjectEvaluator};
pub use context::{ContextResolver, ExemplarSelector, FirstInCorpus, ProjectContext};
pub use evaluator::{aggregate, MetricEvaluator, MetricResult, SubmetricResult};
pub use metric::{Band, MetricId};
pub use normalizer::{normalize, Judgment};
pub use prompts::{
    CatalogEntry, PromptCatalog, PromptLanguage, PromptVariables, RenderError, SubmetricPrompt,
};
