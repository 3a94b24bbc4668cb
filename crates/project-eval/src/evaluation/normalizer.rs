//! Turns whatever the backend returned into a bounded `{score, reason}` pair.
//!
//! Backends are asked for a bare JSON object but routinely wrap it in code
//! fences, surround it with prose, quote the keys, or return it inside a
//! one-element list. Every one of those is tolerated here; anything beyond
//! repair degrades to the default score with an explanatory reason. The
//! function is total and never panics.

use super::backend::RawReply;
use super::metric::{in_score_range, round2, DEFAULT_SCORE};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const SCORE_FIELD: &str = "score_1_to_5";
pub const REASON_FIELD: &str = "reason";

pub const UNPARSEABLE_REASON: &str = "unparseable output; defaulted";
pub const NON_RECORD_REASON: &str = "non-record output; defaulted";
pub const MISSING_REASON: &str = "no reason; defaulted";

/// Canonical judgment for a single submetric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Judgment {
    pub score: f64,
    pub reason: String,
}

impl Judgment {
    pub fn defaulted(reason: impl Into<String>) -> Self {
        Self {
            score: DEFAULT_SCORE,
            reason: reason.into(),
        }
    }
}

pub fn normalize(reply: RawReply) -> Judgment {
    let parsed = match reply {
        RawReply::Bytes(bytes) => parse_text(&decode_lossy(&bytes)),
        RawReply::Text(text) => parse_text(&text),
        RawReply::Json(Value::String(text)) => parse_text(&text),
        RawReply::Json(value) => Some(value),
    };

    let Some(value) = parsed else {
        return Judgment::defaulted(UNPARSEABLE_REASON);
    };

    let Value::Object(record) = unwrap_singleton(value) else {
        return Judgment::defaulted(NON_RECORD_REASON);
    };

    let record = clean_keys(record);
    let score = coerce_score(record.get(SCORE_FIELD));
    let reason = record
        .get(REASON_FIELD)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|reason| !reason.is_empty())
        .unwrap_or(MISSING_REASON)
        .to_string();

    Judgment { score, reason }
}

/// Absent, non-numeric, or out-of-range scores fall back to the default.
pub fn coerce_score(value: Option<&Value>) -> f64 {
    let candidate = match value {
        Some(Value::Number(number)) => number.as_f64(),
        Some(Value::String(text)) => text.trim().parse::<f64>().ok(),
        _ => None,
    };

    match candidate {
        Some(score) if in_score_range(score) => round2(score),
        _ => DEFAULT_SCORE,
    }
}

/// Drops invalid sequences; valid text, replacement characters included, is kept.
fn decode_lossy(bytes: &[u8]) -> String {
    bytes.utf8_chunks().map(|chunk| chunk.valid()).collect()
}

fn parse_text(text: &str) -> Option<Value> {
    let body = strip_code_fence(text);
    if let Ok(value) = serde_json::from_str::<Value>(body) {
        return Some(value);
    }

    // Prose around the payload: scan every opening bracket, preferring the
    // first value that yields a record over any earlier non-record value.
    let mut first_value = None;
    for (start, _) in body.match_indices(['{', '[']) {
        let parsed = serde_json::Deserializer::from_str(&body[start..])
            .into_iter::<Value>()
            .next()
            .and_then(Result::ok);
        let Some(value) = parsed else {
            continue;
        };
        if unwrap_singleton(value.clone()).is_object() {
            return Some(value);
        }
        first_value.get_or_insert(value);
    }
    first_value
}

fn strip_code_fence(text: &str) -> &str {
    let mut body = text.trim();
    if let Some(rest) = body.strip_prefix("```") {
        body = rest.trim_start_matches(|c: char| c.is_ascii_alphanumeric());
    }
    if let Some(rest) = body.strip_suffix("```") {
        body = rest;
    }
    body.trim()
}

fn unwrap_singleton(value: Value) -> Value {
    match value {
        Value::Array(mut items) if items.len() == 1 && items[0].is_object() => items.remove(0),
        other => other,
    }
}

fn clean_keys(record: Map<String, Value>) -> Map<String, Value> {
    record
        .into_iter()
        .map(|(key, value)| {
            let key = key
                .trim_matches(|c: char| c.is_whitespace() || c == '"' || c == '\'')
                .to_string();
            (key, value)
        })
        .collect()
}
