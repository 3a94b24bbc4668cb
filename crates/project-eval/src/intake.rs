//! Intake-form answers: bilingual label cleanup and project text assembly.

use crate::evaluation::ProjectContext;
use crate::sources::{value_text, HistoricalSources};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

pub const PROJECT_LABEL: &str = "Project";
pub const UNKNOWN_PROJECT: &str = "Unknown Project";

const LABEL_SEPARATORS: [&str; 4] = [" - ", " – ", "–", "-"];

const DISPLAY_LABELS: &[(&str, &str)] = &[
    ("Project", "Project Name"),
    ("Project Scope & Objectives", "Scope and Objectives"),
    ("Business Value Contribution", "Business Value"),
    ("Project Stakeholders & Sponsorship", "Stakeholders"),
    ("Data Scope", "Data Sources"),
];

/// English half of a bilingual question label such as `Project - Proje`.
pub fn english_key(raw: &str) -> &str {
    for separator in LABEL_SEPARATORS {
        if let Some((english, _)) = raw.split_once(separator) {
            return english.trim();
        }
    }
    raw.trim()
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Respondent {
    #[serde(default)]
    pub email: Option<String>,
}

/// Payload posted by the intake form automation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FormSubmission {
    #[serde(default)]
    pub form_id: Option<String>,
    #[serde(default)]
    pub response_id: Option<String>,
    #[serde(default)]
    pub submitted_at: Option<String>,
    #[serde(default)]
    pub respondent: Respondent,
    #[serde(default)]
    pub answers: Map<String, Value>,
}

impl FormSubmission {
    pub fn question_answers(&self) -> QuestionAnswers {
        QuestionAnswers::from_bilingual(self.answers.clone())
    }
}

/// Question label to answer text, in submission order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct QuestionAnswers {
    entries: Map<String, Value>,
}

impl QuestionAnswers {
    /// Keeps labels as given; answers become text and nulls become empty.
    pub fn from_raw(raw: Map<String, Value>) -> Self {
        let entries = raw
            .into_iter()
            .map(|(label, answer)| (label, Value::String(value_text(&answer))))
            .collect();
        Self { entries }
    }

    /// Reduces every label to its English half first. When two labels share
    /// an English half the later answer wins.
    pub fn from_bilingual(raw: Map<String, Value>) -> Self {
        let entries = raw
            .into_iter()
            .map(|(label, answer)| {
                (
                    english_key(&label).to_string(),
                    Value::String(value_text(&answer)),
                )
            })
            .collect();
        Self { entries }
    }

    pub fn insert(&mut self, label: impl Into<String>, answer: impl Into<String>) {
        self.entries
            .insert(label.into(), Value::String(answer.into()));
    }

    pub fn get(&self, label: &str) -> Option<&str> {
        self.entries.get(label).and_then(Value::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(label, answer)| (label.as_str(), answer.as_str().unwrap_or_default()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The `Project` answer, or [`UNKNOWN_PROJECT`] when it is absent or blank.
    pub fn project_name(&self) -> String {
        self.get(PROJECT_LABEL)
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or(UNKNOWN_PROJECT)
            .to_string()
    }

    pub fn to_context(
        &self,
        project_name: Option<&str>,
        sources: HistoricalSources,
    ) -> ProjectContext {
        let project_name = project_name
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| self.project_name());
        let project_text = build_project_text(self, &project_name);
        ProjectContext::new(project_name, project_text, sources)
    }
}

impl<'de> Deserialize<'de> for QuestionAnswers {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Map::<String, Value>::deserialize(deserializer).map(Self::from_raw)
    }
}

/// Flattens the answers into the free-form description the prompts embed.
pub fn build_project_text(answers: &QuestionAnswers, project_name: &str) -> String {
    let mut lines = vec![format!("Project: {project_name}")];
    lines.extend(
        answers
            .iter()
            .map(|(label, answer)| format!("{}: {}", display_label(label), answer)),
    );
    lines.join("\n")
}

fn display_label(label: &str) -> &str {
    DISPLAY_LABELS
        .iter()
        .find(|(source, _)| *source == label)
        .map(|(_, display)| *display)
        .unwrap_or(label)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn english_key_handles_each_separator() {
        assert_eq!(english_key("Project - Proje"), "Project");
        assert_eq!(english_key("Company – Kuruluş"), "Company");
        assert_eq!(english_key("Data Scope–Veri Kapsamı"), "Data Scope");
        assert_eq!(english_key("Project-Proje"), "Project");
        assert_eq!(english_key("  Plain Label  "), "Plain Label");
    }

    #[test]
    fn spaced_separator_wins_over_inner_hyphen() {
        assert_eq!(
            english_key("Estimated Person-Day Effort - Tahmini Efor"),
            "Estimated Person-Day Effort"
        );
    }

    #[test]
    fn submission_answers_are_reduced_to_english_labels() {
        let submission: FormSubmission = serde_json::from_value(json!({
            "form_id": "f-1",
            "submitted_at": "2025-10-15T06:52:22.7895400Z",
            "respondent": {"email": "owner@example.com"},
            "answers": {
                "Project-Proje": "Atlas",
                "Company - Kuruluş": "Acme",
                "Data Scope – Veri Kapsamı": null
            }
        }))
        .expect("submission parses");

        let answers = submission.question_answers();
        let labels: Vec<&str> = answers.iter().map(|(label, _)| label).collect();
        assert_eq!(labels, vec!["Project", "Company", "Data Scope"]);
        assert_eq!(answers.get("Data Scope"), Some(""));
        assert_eq!(
            submission.respondent.email.as_deref(),
            Some("owner@example.com")
        );
    }

    #[test]
    fn minimal_submission_defaults_missing_fields() {
        let submission: FormSubmission =
            serde_json::from_value(json!({})).expect("empty submission parses");
        assert!(submission.question_answers().is_empty());
        assert!(submission.respondent.email.is_none());
    }

    #[test]
    fn project_text_relabels_known_questions_in_order() {
        let mut answers = QuestionAnswers::default();
        answers.insert("Project", "Atlas");
        answers.insert("Company", "Acme");
        answers.insert("Project Scope & Objectives", "Automate intake triage");
        answers.insert("Data Scope", "CRM exports");
        answers.insert("Budget", "120k");

        let text = build_project_text(&answers, "Atlas");
        assert_eq!(
            text,
            "Project: Atlas\nProject Name: Atlas\nCompany: Acme\n\
             Scope and Objectives: Automate intake triage\nData Sources: CRM exports\nBudget: 120k"
        );
    }

    #[test]
    fn project_name_falls_back_to_unknown() {
        let mut answers = QuestionAnswers::default();
        assert_eq!(answers.project_name(), UNKNOWN_PROJECT);
        answers.insert("Project", "   ");
        assert_eq!(answers.project_name(), UNKNOWN_PROJECT);
        answers.insert("Project", "Atlas");
        assert_eq!(answers.project_name(), "Atlas");
    }

    #[test]
    fn context_prefers_explicit_project_name() {
        let answers: QuestionAnswers =
            serde_json::from_value(json!({"Project": "Atlas", "Team size": 4}))
                .expect("answers parse");
        assert_eq!(answers.get("Team size"), Some("4"));

        let context = answers.to_context(Some("Override"), HistoricalSources::empty());
        assert_eq!(context.project_name, "Override");
        assert!(context.project_text.starts_with("Project: Override\n"));

        let context = answers.to_context(None, HistoricalSources::empty());
        assert_eq!(context.project_name, "Atlas");
    }
}
