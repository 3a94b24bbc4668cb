//! Static catalog of submetric prompt definitions.
//!
//! Every prompt is keyed by `(metric, label)`, where the label is the display
//! name used throughout the historical decision reports. Declaration order in
//! [`RUBRIC`] is the canonical submetric order for each metric.

mod english;
mod render;
mod turkish;

pub use render::RenderError;

use super::metric::MetricId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Language the catalog templates are written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PromptLanguage {
    #[default]
    English,
    Turkish,
}

impl PromptLanguage {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "en" | "eng" | "english" => Some(Self::English),
            "tr" | "tur" | "turkish" => Some(Self::Turkish),
            _ => None,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            PromptLanguage::English => "en",
            PromptLanguage::Turkish => "tr",
        }
    }
}

/// Immutable prompt definition for one submetric.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmetricPrompt {
    pub key: String,
    pub name: String,
    pub description: String,
    pub template: String,
}

impl SubmetricPrompt {
    /// Neutral prompt used when a requested submetric has no catalog entry.
    pub fn placeholder(key: &str) -> Self {
        Self {
            key: key.to_string(),
            name: title_case(&key.replace('_', " ")),
            description: "Auto placeholder".to_string(),
            template: PLACEHOLDER_TEMPLATE.to_string(),
        }
    }

    pub fn render(
        &self,
        project_text: &str,
        variables: &PromptVariables,
    ) -> Result<String, RenderError> {
        render::render_template(&self.template, |name| {
            if name == PROJECT_TEXT {
                Some(project_text)
            } else {
                variables.get(name)
            }
        })
    }
}

const PROJECT_TEXT: &str = "project_text";

const PLACEHOLDER_TEMPLATE: &str = "Project:\n{project_text}\n\n\
Return JSON only: {{\"score_1_to_5\": 3.0, \"reason\": \"placeholder\"}}";

/// Named placeholder values resolved for one submetric prompt.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PromptVariables {
    values: BTreeMap<String, String>,
}

impl PromptVariables {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

struct RubricEntry {
    metric: MetricId,
    label: &'static str,
    key: &'static str,
    name: &'static str,
    description: &'static str,
}

const RUBRIC: &[RubricEntry] = &[
    RubricEntry {
        metric: MetricId::BusinessImpact,
        label: "Strategic Fit",
        key: "strategic_fit",
        name: "Strategic Fit",
        description: "Alignment to strategy and core objectives.",
    },
    RubricEntry {
        metric: MetricId::BusinessImpact,
        label: "Business Value Contribution",
        key: "business_value",
        name: "Business Value Contribution",
        description: "Expected measurable benefits and stakeholder impact.",
    },
    RubricEntry {
        metric: MetricId::BusinessImpact,
        label: "Scalability & Replicability Potential",
        key: "scalability",
        name: "Scalability",
        description: "Ease of replication and scale.",
    },
    RubricEntry {
        metric: MetricId::ResourceInvestment,
        label: "Projected Timeline",
        key: "duration_complexity",
        name: "Projected Timeline",
        description: "Realism of the estimated duration and schedule.",
    },
    RubricEntry {
        metric: MetricId::ResourceInvestment,
        label: "Estimated Person-Day Effort",
        key: "team_footprint",
        name: "Team Footprint",
        description: "Size/skills needed for delivery.",
    },
    RubricEntry {
        metric: MetricId::ExecutionRisk,
        label: "External Resource Dependency",
        key: "external_dependence",
        name: "External Dependence",
        description: "Reliance on vendors/external inputs.",
    },
    RubricEntry {
        metric: MetricId::ExecutionRisk,
        label: "Scope Definition Risk",
        key: "scope_definition",
        name: "Scope Definition",
        description: "Clarity of scope, goals, and acceptance.",
    },
    RubricEntry {
        metric: MetricId::ExecutionRisk,
        label: "Critical Talent Dependency",
        key: "critical_talent",
        name: "Critical Talent",
        description: "Availability of key skills/ownership.",
    },
    RubricEntry {
        metric: MetricId::ExecutionRisk,
        label: "Solution Complexity & Innovation Risk",
        key: "innovation_complexity",
        name: "Innovation Complexity",
        description: "Novelty/uncertainty of approach.",
    },
    RubricEntry {
        metric: MetricId::ExecutionRisk,
        label: "Implementation Failure Risk",
        key: "implementation_failure",
        name: "Implementation Failure",
        description: "Likelihood of delivery/adoption failure.",
    },
];

/// One `(metric, label)` registration in a catalog.
#[derive(Debug, Clone)]
pub struct CatalogEntry {
    pub metric: MetricId,
    pub label: String,
    pub prompt: Arc<SubmetricPrompt>,
}

/// Registry of submetric prompts, fixed once constructed.
#[derive(Debug, Clone)]
pub struct PromptCatalog {
    language: PromptLanguage,
    entries: Vec<CatalogEntry>,
}

impl PromptCatalog {
    pub fn standard(language: PromptLanguage) -> Self {
        let entries = RUBRIC
            .iter()
            .map(|entry| {
                let template = match language {
                    PromptLanguage::English => english::template(entry.key),
                    PromptLanguage::Turkish => turkish::template(entry.key),
                };
                CatalogEntry {
                    metric: entry.metric,
                    label: entry.label.to_string(),
                    prompt: Arc::new(SubmetricPrompt {
                        key: entry.key.to_string(),
                        name: entry.name.to_string(),
                        description: entry.description.to_string(),
                        template: template.to_string(),
                    }),
                }
            })
            .collect();

        Self { language, entries }
    }

    /// Builds a catalog from explicit entries, keeping their order.
    pub fn from_entries(language: PromptLanguage, entries: Vec<CatalogEntry>) -> Self {
        Self { language, entries }
    }

    pub fn language(&self) -> PromptLanguage {
        self.language
    }

    pub fn lookup(&self, metric: MetricId, label: &str) -> Option<&Arc<SubmetricPrompt>> {
        self.entries
            .iter()
            .find(|entry| entry.metric == metric && entry.label == label)
            .map(|entry| &entry.prompt)
    }

    /// Prompts registered for `metric`, in declaration order.
    pub fn prompts_for(&self, metric: MetricId) -> Vec<&CatalogEntry> {
        self.entries
            .iter()
            .filter(|entry| entry.metric == metric)
            .collect()
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }
}

impl Default for PromptCatalog {
    fn default() -> Self {
        Self::standard(PromptLanguage::default())
    }
}

fn title_case(value: &str) -> String {
    value
        .split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_variables() -> PromptVariables {
        let mut variables = PromptVariables::new();
        for name in [
            "past_project_name",
            "past_project_company",
            "past_project_scope_and_objectives",
            "past_project_business_value_contribution",
            "past_project_scalability_data_scope",
            "past_project_data_scope",
            "past_project_stakeholders",
            "past_metric_evaluation",
            "past_metric_score",
            "current_staff",
        ] {
            variables.insert(name, format!("<{name}>"));
        }
        variables
    }

    #[test]
    fn catalog_declares_rubric_in_order() {
        let catalog = PromptCatalog::standard(PromptLanguage::English);
        let impact: Vec<&str> = catalog
            .prompts_for(MetricId::BusinessImpact)
            .iter()
            .map(|entry| entry.label.as_str())
            .collect();
        assert_eq!(
            impact,
            vec![
                "Strategic Fit",
                "Business Value Contribution",
                "Scalability & Replicability Potential"
            ]
        );
        assert_eq!(catalog.prompts_for(MetricId::ResourceInvestment).len(), 2);
        assert_eq!(catalog.prompts_for(MetricId::ExecutionRisk).len(), 5);
    }

    #[test]
    fn lookup_is_keyed_by_metric_and_label() {
        let catalog = PromptCatalog::default();
        let prompt = catalog
            .lookup(MetricId::ExecutionRisk, "External Resource Dependency")
            .expect("prompt registered");
        assert_eq!(prompt.key, "external_dependence");
        assert!(catalog
            .lookup(MetricId::ResourceInvestment, "External Resource Dependency")
            .is_none());
    }

    #[test]
    fn every_template_renders_with_resolved_variables() {
        for language in [PromptLanguage::English, PromptLanguage::Turkish] {
            let catalog = PromptCatalog::standard(language);
            for entry in catalog.entries() {
                let rendered = entry
                    .prompt
                    .render("A new data platform", &full_variables())
                    .unwrap_or_else(|err| panic!("{} failed to render: {err}", entry.label));
                assert!(rendered.contains("A new data platform"));
                assert!(rendered.contains("\"score_1_to_5\""));
                assert!(!rendered.contains("{{"));
            }
        }
    }

    #[test]
    fn turkish_and_english_catalogs_share_keys() {
        let english = PromptCatalog::standard(PromptLanguage::English);
        let turkish = PromptCatalog::standard(PromptLanguage::Turkish);
        let english_keys: Vec<&str> = english.entries().iter().map(|e| e.prompt.key.as_str()).collect();
        let turkish_keys: Vec<&str> = turkish.entries().iter().map(|e| e.prompt.key.as_str()).collect();
        assert_eq!(english_keys, turkish_keys);
        assert_ne!(english.entries()[0].prompt.template, turkish.entries()[0].prompt.template);
    }

    #[test]
    fn render_reports_missing_variables() {
        let catalog = PromptCatalog::default();
        let prompt = catalog
            .lookup(MetricId::BusinessImpact, "Strategic Fit")
            .expect("prompt registered");
        let error = prompt
            .render("text", &PromptVariables::new())
            .expect_err("historical placeholders are required");
        assert!(matches!(error, RenderError::MissingVariable { .. }));
    }

    #[test]
    fn placeholder_prompt_needs_only_project_text() {
        let prompt = SubmetricPrompt::placeholder("data_readiness");
        assert_eq!(prompt.name, "Data Readiness");
        assert_eq!(prompt.description, "Auto placeholder");
        let rendered = prompt
            .render("Project body", &PromptVariables::new())
            .expect("placeholder renders");
        assert!(rendered.starts_with("Project:\nProject body"));
        assert!(rendered.ends_with("{\"score_1_to_5\": 3.0, \"reason\": \"placeholder\"}"));
    }

    #[test]
    fn language_codes_parse_leniently() {
        assert_eq!(PromptLanguage::parse(" TR "), Some(PromptLanguage::Turkish));
        assert_eq!(PromptLanguage::parse("english"), Some(PromptLanguage::English));
        assert_eq!(PromptLanguage::parse("de"), None);
    }
}
