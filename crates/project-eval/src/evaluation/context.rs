//! Resolves the historical placeholder values a submetric prompt needs.

use super::prompts::PromptVariables;
use crate::sources::{is_present, value_text, HistoricalSources, ProjectCorpus, ProjectRecord};
use serde_json::Value;
use std::sync::Arc;

pub const PAST_PROJECT_NAME: &str = "past_project_name";
pub const PAST_PROJECT_COMPANY: &str = "past_project_company";
pub const PAST_PROJECT_SCOPE: &str = "past_project_scope_and_objectives";
pub const PAST_PROJECT_BUSINESS_VALUE: &str = "past_project_business_value_contribution";
pub const PAST_PROJECT_SCALABILITY: &str = "past_project_scalability_data_scope";
pub const PAST_PROJECT_DATA_SCOPE: &str = "past_project_data_scope";
pub const PAST_PROJECT_STAKEHOLDERS: &str = "past_project_stakeholders";
pub const PAST_METRIC_EVALUATION: &str = "past_metric_evaluation";
pub const PAST_METRIC_SCORE: &str = "past_metric_score";
pub const CURRENT_STAFF: &str = "current_staff";

const DEFAULT_EXEMPLAR_NAME: &str = "Example Project";
const BUSINESS_VALUE_LABEL: &str = "Business Value Contribution";
const SCALABILITY_LABEL: &str = "Scalability & Replicability Potential";

const COMPANY_FIELDS: &[&str] = &["company", "Company", "business_unit"];
const SCOPE_FIELDS: &[&str] = &["Project Scope & Objectives", "scope", "objectives"];
const DATA_SCOPE_FIELDS: &[&str] = &["data_scope", "Data Scope", "data_sources"];
const STAKEHOLDER_FIELDS: &[&str] = &["Project Stakeholders & Sponsorship", "team"];

/// Everything the engine knows about the project under evaluation.
#[derive(Debug, Clone, Default)]
pub struct ProjectContext {
    pub project_name: String,
    pub project_text: String,
    pub sources: HistoricalSources,
}

impl ProjectContext {
    pub fn new(
        project_name: impl Into<String>,
        project_text: impl Into<String>,
        sources: HistoricalSources,
    ) -> Self {
        Self {
            project_name: project_name.into(),
            project_text: project_text.into(),
            sources,
        }
    }
}

/// Chooses which historical project serves as reference material.
pub trait ExemplarSelector: Send + Sync {
    fn select<'a>(
        &self,
        project_name: &str,
        corpus: &'a ProjectCorpus,
    ) -> Option<(&'a str, &'a ProjectRecord)>;
}

/// Picks the first project of a corpus, ignoring the project being evaluated.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstInCorpus;

impl ExemplarSelector for FirstInCorpus {
    fn select<'a>(
        &self,
        _project_name: &str,
        corpus: &'a ProjectCorpus,
    ) -> Option<(&'a str, &'a ProjectRecord)> {
        corpus.first()
    }
}

#[derive(Clone)]
pub struct ContextResolver {
    selector: Arc<dyn ExemplarSelector>,
}

impl Default for ContextResolver {
    fn default() -> Self {
        Self::new(Arc::new(FirstInCorpus))
    }
}

impl std::fmt::Debug for ContextResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContextResolver").finish_non_exhaustive()
    }
}

impl ContextResolver {
    pub fn new(selector: Arc<dyn ExemplarSelector>) -> Self {
        Self { selector }
    }

    /// Builds every placeholder any catalog template references. Gaps in the
    /// corpora resolve to empty strings.
    pub fn resolve(
        &self,
        project_name: &str,
        submetric_label: &str,
        sources: &HistoricalSources,
    ) -> PromptVariables {
        let evaluation_exemplar = self.selector.select(project_name, &sources.evaluations);
        let intake = self
            .selector
            .select(project_name, &sources.intake)
            .map(|(_, record)| record);

        let metrics = evaluation_exemplar
            .and_then(|(_, record)| record.get("metrics"))
            .and_then(Value::as_object);
        let metric_field = |label: &str, field: &str| -> String {
            metrics
                .and_then(|metrics| metrics.get(label))
                .and_then(Value::as_object)
                .and_then(|entry| entry.get(field))
                .map(value_text)
                .unwrap_or_default()
        };
        let intake_field = |fields: &[&str]| -> String {
            intake
                .and_then(|record| first_present(record, fields))
                .map(value_text)
                .unwrap_or_default()
        };

        let mut variables = PromptVariables::new();
        variables.insert(
            PAST_PROJECT_NAME,
            evaluation_exemplar
                .map(|(name, _)| name)
                .unwrap_or(DEFAULT_EXEMPLAR_NAME),
        );
        variables.insert(PAST_PROJECT_COMPANY, intake_field(COMPANY_FIELDS));
        variables.insert(PAST_PROJECT_SCOPE, intake_field(SCOPE_FIELDS));
        variables.insert(
            PAST_PROJECT_BUSINESS_VALUE,
            metric_field(BUSINESS_VALUE_LABEL, "evaluation"),
        );
        variables.insert(
            PAST_PROJECT_SCALABILITY,
            metric_field(SCALABILITY_LABEL, "evaluation"),
        );
        variables.insert(PAST_PROJECT_DATA_SCOPE, intake_field(DATA_SCOPE_FIELDS));
        variables.insert(PAST_PROJECT_STAKEHOLDERS, intake_field(STAKEHOLDER_FIELDS));
        variables.insert(
            PAST_METRIC_EVALUATION,
            metric_field(submetric_label, "evaluation"),
        );
        variables.insert(PAST_METRIC_SCORE, metric_field(submetric_label, "score"));
        variables.insert(CURRENT_STAFF, value_text(sources.staff.current()));
        variables
    }
}

fn first_present<'a>(record: &'a ProjectRecord, fields: &[&str]) -> Option<&'a Value> {
    fields
        .iter()
        .filter_map(|field| record.get(*field))
        .find(|value| is_present(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sources() -> HistoricalSources {
        HistoricalSources::from_values(
            json!([
                {
                    "project_name": "Invoice OCR",
                    "metrics": {
                        "Strategic Fit": {"score": 4, "evaluation": "Directly supports cost targets."},
                        "Business Value Contribution": {"score": 5, "evaluation": "Saves 3 FTE."},
                        "Scalability & Replicability Potential": {"score": 3, "evaluation": "Reusable for AP."},
                        "Projected Timeline": {"score": 2, "evaluation": null}
                    }
                },
                {"project_name": "Churn Model", "metrics": {}}
            ]),
            json!({
                "Invoice OCR": {
                    "Company": "Acme Finance",
                    "Project Scope & Objectives": "Automate invoice capture.",
                    "data_scope": "",
                    "data_sources": "ERP exports",
                    "team": ["Finance", "IT"]
                }
            }),
            json!({"current_stuff": "4 data scientists"}),
        )
    }

    #[test]
    fn resolves_exemplar_fields_for_submetric() {
        let variables = ContextResolver::default().resolve("New Project", "Strategic Fit", &sources());

        assert_eq!(variables.get(PAST_PROJECT_NAME), Some("Invoice OCR"));
        assert_eq!(variables.get(PAST_PROJECT_COMPANY), Some("Acme Finance"));
        assert_eq!(variables.get(PAST_PROJECT_SCOPE), Some("Automate invoice capture."));
        assert_eq!(variables.get(PAST_METRIC_EVALUATION), Some("Directly supports cost targets."));
        assert_eq!(variables.get(PAST_METRIC_SCORE), Some("4"));
        assert_eq!(variables.get(PAST_PROJECT_DATA_SCOPE), Some("ERP exports"));
        assert_eq!(variables.get(PAST_PROJECT_STAKEHOLDERS), Some("[\"Finance\",\"IT\"]"));
        assert_eq!(variables.get(CURRENT_STAFF), Some("4 data scientists"));
    }

    #[test]
    fn cross_references_ignore_current_submetric() {
        let variables =
            ContextResolver::default().resolve("New Project", "Projected Timeline", &sources());

        assert_eq!(variables.get(PAST_PROJECT_BUSINESS_VALUE), Some("Saves 3 FTE."));
        assert_eq!(variables.get(PAST_PROJECT_SCALABILITY), Some("Reusable for AP."));
        assert_eq!(variables.get(PAST_METRIC_EVALUATION), Some(""));
        assert_eq!(variables.get(PAST_METRIC_SCORE), Some("2"));
    }

    #[test]
    fn empty_corpora_resolve_to_empty_strings() {
        let variables = ContextResolver::default().resolve(
            "New Project",
            "Strategic Fit",
            &HistoricalSources::from_values(json!({}), json!({}), json!({})),
        );

        assert_eq!(variables.get(PAST_PROJECT_NAME), Some(DEFAULT_EXEMPLAR_NAME));
        for (name, value) in variables.iter() {
            if name != PAST_PROJECT_NAME {
                assert_eq!(value, "", "{name} should be empty");
            }
        }
        assert_eq!(variables.len(), 10);
    }

    struct ByName(&'static str);

    impl ExemplarSelector for ByName {
        fn select<'a>(
            &self,
            _project_name: &str,
            corpus: &'a ProjectCorpus,
        ) -> Option<(&'a str, &'a ProjectRecord)> {
            corpus.iter().find(|(name, _)| *name == self.0)
        }
    }

    #[test]
    fn injected_selector_replaces_first_project_default() {
        let resolver = ContextResolver::new(Arc::new(ByName("Churn Model")));
        let variables = resolver.resolve("New Project", "Strategic Fit", &sources());

        assert_eq!(variables.get(PAST_PROJECT_NAME), Some("Churn Model"));
        assert_eq!(variables.get(PAST_METRIC_EVALUATION), Some(""));
        assert_eq!(variables.get(PAST_PROJECT_COMPANY), Some(""));
    }
}
