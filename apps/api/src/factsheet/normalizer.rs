//! Response Normalizer — turns free-form model output into a validated
//! [`FactSheet`].
//!
//! Models asked for "JSON only" still wrap the object in markdown fences,
//! surround it with prose, or emit trailing commas. The normalizer handles
//! exactly those three failure shapes and nothing more:
//!
//! 1. If the text contains a complete ``` fence, its interior is the
//!    candidate — unconditionally, even if it later fails to parse.
//! 2. Otherwise the first balanced top-level `{...}` span is the candidate.
//! 3. Otherwise the whole trimmed text is parsed as-is (and fails naturally).
//!
//! Trailing commas before `]` or `}` are removed textually before parsing.
//! This is a surface-syntax fix, not a JSON5 parser: the pass is blind to
//! string interiors, matching the upstream behavior it replaces.

use serde_json::Value;
use thiserror::Error;
use tracing::error;

use crate::errors::AppError;
use crate::factsheet::models::FactSheet;

#[derive(Debug, Error)]
pub enum NormalizeError {
    #[error("response is not valid JSON: {0}")]
    Malformed(String),

    #[error("response JSON does not match the fact-sheet schema: {0}")]
    SchemaMismatch(String),
}

impl From<NormalizeError> for AppError {
    fn from(err: NormalizeError) -> Self {
        match err {
            NormalizeError::Malformed(detail) => AppError::MalformedResponse(detail),
            NormalizeError::SchemaMismatch(detail) => AppError::SchemaMismatch(detail),
        }
    }
}

/// Fields that must be present as JSON arrays for a sheet to be valid.
const REQUIRED_LIST_FIELDS: [&str; 4] = [
    "primary_connections",
    "education",
    "key_memberships_awards",
    "ten_things_to_know",
];

/// Extracts, repairs, parses, and validates a fact sheet from raw model output.
///
/// On failure the raw and repaired text are logged for operator debugging;
/// callers only see the typed error.
pub fn normalize_fact_sheet(raw: &str) -> Result<FactSheet, NormalizeError> {
    let candidate = extract_json_candidate(raw);
    let repaired = strip_trailing_commas(candidate);

    let value: Value = serde_json::from_str(&repaired).map_err(|e| {
        error!("Failed to parse model response as JSON: {e}");
        error!("Raw model response: {raw}");
        error!("Repaired candidate: {repaired}");
        NormalizeError::Malformed(e.to_string())
    })?;

    validate_shape(&value)?;

    serde_json::from_value(value).map_err(|e| {
        error!("Fact sheet failed final deserialization: {e}");
        NormalizeError::SchemaMismatch(e.to_string())
    })
}

/// Checks the required shape before deserializing: `person_name` must be a
/// non-empty string and each of the four list fields must be an array
/// (empty arrays are acceptable).
fn validate_shape(value: &Value) -> Result<(), NormalizeError> {
    let name_ok = value
        .get("person_name")
        .and_then(Value::as_str)
        .is_some_and(|s| !s.is_empty());
    if !name_ok {
        return Err(NormalizeError::SchemaMismatch(
            "person_name is missing or empty".to_string(),
        ));
    }

    for field in REQUIRED_LIST_FIELDS {
        if !value.get(field).is_some_and(Value::is_array) {
            return Err(NormalizeError::SchemaMismatch(format!(
                "{field} is missing or not a list"
            )));
        }
    }

    Ok(())
}

// ────────────────────────────────────────────────────────────────────────────
// Candidate extraction
// ────────────────────────────────────────────────────────────────────────────

/// Isolates the JSON candidate span from surrounding prose.
fn extract_json_candidate(raw: &str) -> &str {
    let trimmed = raw.trim();

    if let Some(interior) = fenced_block_interior(trimmed) {
        return interior;
    }

    if let Some(span) = first_balanced_object(trimmed) {
        return span;
    }

    trimmed
}

/// Returns the interior of the first complete ``` fence, skipping an optional
/// language tag (```json, ```JSON, bare ```). An opening fence with no closing
/// fence does not count.
fn fenced_block_interior(text: &str) -> Option<&str> {
    let open = text.find("```")?;
    let after_ticks = &text[open + 3..];

    // Skip a language tag: alphanumeric run immediately after the ticks.
    let tag_len = after_ticks
        .find(|c: char| !c.is_ascii_alphanumeric())
        .unwrap_or(after_ticks.len());
    let body = &after_ticks[tag_len..];

    let close = body.find("```")?;
    Some(body[..close].trim())
}

/// Scans left to right tracking brace depth and returns the first balanced
/// top-level `{...}` span. Braces inside string literals are ignored.
fn first_balanced_object(text: &str) -> Option<&str> {
    let mut depth = 0usize;
    let mut start = None;
    let mut in_string = false;
    let mut escaped = false;

    for (i, c) in text.char_indices() {
        if in_string {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }

        match c {
            '"' if depth > 0 => in_string = true,
            '{' => {
                if depth == 0 {
                    start = Some(i);
                }
                depth += 1;
            }
            '}' => {
                if depth > 0 {
                    depth -= 1;
                    if depth == 0 {
                        return Some(&text[start?..=i]);
                    }
                }
            }
            _ => {}
        }
    }

    None
}

// ────────────────────────────────────────────────────────────────────────────
// Trailing-comma repair
// ────────────────────────────────────────────────────────────────────────────

/// Removes commas that are immediately followed (modulo whitespace) by a
/// closing `]` or `}`. Deliberately blind to string interiors — this mirrors
/// the surface-level regex repair the normalizer replaces, and nothing else.
fn strip_trailing_commas(text: &str) -> String {
    let mut out = String::with_capacity(text.len());

    for (i, c) in text.char_indices() {
        if c == ',' {
            let rest = &text[i + 1..];
            let next = rest.trim_start().chars().next();
            if matches!(next, Some(']') | Some('}')) {
                continue; // drop the comma; whitespace and closer are kept
            }
        }
        out.push(c);
    }

    out
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
