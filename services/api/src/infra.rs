use metrics_exporter_prometheus::PrometheusHandle;
use project_eval::error::AppError;
use project_eval::evaluation::ProjectEvaluator;
use project_eval::sources::HistoricalSources;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Shared by every evaluation request; both halves are read-only.
#[derive(Clone)]
pub(crate) struct EvaluationService {
    pub(crate) evaluator: Arc<ProjectEvaluator>,
    pub(crate) default_sources: Arc<HistoricalSources>,
}

impl EvaluationService {
    pub(crate) fn new(evaluator: ProjectEvaluator, default_sources: HistoricalSources) -> Self {
        Self {
            evaluator: Arc::new(evaluator),
            default_sources: Arc::new(default_sources),
        }
    }
}

/// Corpora used when a request brings none of its own.
pub(crate) fn load_default_sources(dir: Option<&Path>) -> Result<HistoricalSources, AppError> {
    let Some(dir) = dir else {
        info!("EVAL_SOURCES_DIR not set; requests without sources use empty corpora");
        return Ok(HistoricalSources::empty());
    };

    let sources = HistoricalSources::load_dir(dir)?;
    info!(
        dir = %dir.display(),
        evaluations = sources.evaluations.len(),
        intake = sources.intake.len(),
        "default historical sources loaded"
    );
    Ok(sources)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn missing_dir_setting_yields_empty_sources() {
        let sources = load_default_sources(None).expect("no dir is fine");
        assert!(sources.evaluations.is_empty());
    }

    #[test]
    fn configured_dir_is_loaded() {
        let dir = tempfile::tempdir().expect("temp dir");
        fs::write(
            dir.path().join("evaulations.json"),
            r#"[{"project_name": "Atlas", "metrics": {}}]"#,
        )
        .expect("write evaluations");

        let sources = load_default_sources(Some(dir.path())).expect("dir loads");
        assert_eq!(sources.evaluations.names().collect::<Vec<_>>(), vec!["Atlas"]);
        assert!(sources.intake.is_empty());
    }

    #[test]
    fn malformed_corpus_is_an_error() {
        let dir = tempfile::tempdir().expect("temp dir");
        fs::write(dir.path().join("prf_answers.json"), "{not json").expect("write intake");
        let err = load_default_sources(Some(dir.path())).expect_err("bad json fails");
        assert!(matches!(err, AppError::Corpus(_)));
    }
}
