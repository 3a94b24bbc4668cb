//! Historical corpora consumed by the evaluation engine.
//!
//! The decision-report, intake-form, and staff exports arrive in several
//! loosely-structured shapes. They are normalised here, on ingestion, so the
//! engine only ever sees a project-name keyed corpus.

use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

pub const EVALUATIONS_FILE: &str = "evaluations.json";
pub const LEGACY_EVALUATIONS_FILE: &str = "evaulations.json";
pub const INTAKE_FILE: &str = "prf_answers.json";
pub const STAFF_FILE: &str = "staff_info.json";

const PROJECT_NAME_FIELD: &str = "project_name";
const ROSTER_KEYS: &[&str] = &["current_staff", "current_stuff", "staff"];

/// A single project's record inside a corpus.
pub type ProjectRecord = Map<String, Value>;

/// Project-name keyed records, in source order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectCorpus {
    records: Map<String, Value>,
}

impl ProjectCorpus {
    /// Accepts a single record carrying `project_name`, a list of such records,
    /// or a mapping already keyed by project name.
    pub fn from_value(value: Value) -> Self {
        let mut records = Map::new();

        match value {
            Value::Object(map) if map.contains_key(PROJECT_NAME_FIELD) => {
                let name = project_name_of(&map);
                records.insert(name, Value::Object(map));
            }
            Value::Array(items) => {
                for item in items {
                    if let Value::Object(map) = item {
                        if map.contains_key(PROJECT_NAME_FIELD) {
                            let name = project_name_of(&map);
                            records.insert(name, Value::Object(map));
                        }
                    }
                }
            }
            Value::Object(map) => {
                for (name, record) in map {
                    if record.is_object() {
                        records.insert(name, record);
                    }
                }
            }
            _ => {}
        }

        Self { records }
    }

    pub fn get(&self, project_name: &str) -> Option<&ProjectRecord> {
        self.records.get(project_name).and_then(Value::as_object)
    }

    pub fn first(&self) -> Option<(&str, &ProjectRecord)> {
        self.iter().next()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ProjectRecord)> {
        self.records
            .iter()
            .filter_map(|(name, record)| record.as_object().map(|map| (name.as_str(), map)))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.records.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

fn project_name_of(map: &ProjectRecord) -> String {
    match map.get(PROJECT_NAME_FIELD) {
        Some(Value::String(name)) => name.clone(),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}

/// Staff roster export, reduced on demand to the current roster value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StaffRoster {
    raw: Value,
}

impl StaffRoster {
    pub fn from_value(raw: Value) -> Self {
        Self { raw }
    }

    /// First populated recognised roster key, else the whole export.
    pub fn current(&self) -> &Value {
        if let Value::Object(map) = &self.raw {
            for key in ROSTER_KEYS {
                if let Some(value) = map.get(*key).filter(|value| is_present(value)) {
                    return value;
                }
            }
        }
        &self.raw
    }
}

/// The three corpora supplied alongside a project under evaluation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HistoricalSources {
    pub evaluations: ProjectCorpus,
    pub intake: ProjectCorpus,
    pub staff: StaffRoster,
}

impl HistoricalSources {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_values(evaluations: Value, intake: Value, staff: Value) -> Self {
        Self {
            evaluations: ProjectCorpus::from_value(evaluations),
            intake: ProjectCorpus::from_value(intake),
            staff: StaffRoster::from_value(staff),
        }
    }

    pub fn load(
        evaluations: impl AsRef<Path>,
        intake: impl AsRef<Path>,
        staff: impl AsRef<Path>,
    ) -> Result<Self, CorpusError> {
        Ok(Self::from_values(
            read_json(evaluations.as_ref())?,
            read_json(intake.as_ref())?,
            read_json(staff.as_ref())?,
        ))
    }

    /// Loads the conventional file names from `dir`; absent files yield empty corpora.
    pub fn load_dir(dir: impl AsRef<Path>) -> Result<Self, CorpusError> {
        let dir = dir.as_ref();
        let evaluations_path = [EVALUATIONS_FILE, LEGACY_EVALUATIONS_FILE]
            .iter()
            .map(|name| dir.join(name))
            .find(|path| path.exists());

        let evaluations = match evaluations_path {
            Some(path) => read_json(&path)?,
            None => {
                warn!(dir = %dir.display(), "no evaluation corpus found; using empty corpus");
                Value::Null
            }
        };
        let intake = read_optional_json(&dir.join(INTAKE_FILE))?;
        let staff = read_optional_json(&dir.join(STAFF_FILE))?;

        let sources = Self::from_values(evaluations, intake, staff);
        debug!(
            evaluations = sources.evaluations.len(),
            intake = sources.intake.len(),
            "historical sources loaded"
        );
        Ok(sources)
    }
}

/// Reads and parses one JSON document.
pub fn read_json(path: &Path) -> Result<Value, CorpusError> {
    let content = fs::read_to_string(path).map_err(|source| CorpusError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| CorpusError::Json {
        path: path.to_path_buf(),
        source,
    })
}

fn read_optional_json(path: &Path) -> Result<Value, CorpusError> {
    if path.exists() {
        read_json(path)
    } else {
        warn!(path = %path.display(), "corpus file missing; using empty corpus");
        Ok(Value::Null)
    }
}

/// Failure to read a corpus file from disk.
#[derive(Debug, thiserror::Error)]
pub enum CorpusError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid JSON in {}: {source}", path.display())]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Mirrors the truthiness the corpora were authored against: null, empty
/// strings, empty collections and `false` count as absent.
pub(crate) fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::String(text) => !text.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
        Value::Number(_) => true,
    }
}

/// Text form of a corpus value as it appears inside a prompt.
pub(crate) fn value_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Number(number) => number.to_string(),
        Value::Bool(flag) => flag.to_string(),
        other if !is_present(other) => String::new(),
        other => other.to_string(),
    }
}
