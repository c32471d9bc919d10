//! Normalization of model responses
//!
//! The model is asked for either a bare commit line or a single raw JSON
//! object, but nothing guarantees it complies: responses arrive wrapped in
//! markdown fences, surrounded by prose, or cut off mid-object. Everything
//! here is total. Structured output that cannot be used is replaced by a
//! deterministic fallback draft built from the diff itself.

use serde_json::{Map, Value};
use tracing::debug;

use crate::ai::diff::parse_diff_sections;
use crate::ai::draft::CommitDraft;

/// Commit type used when the model output is unusable
pub const FALLBACK_TYPE: &str = "feat";

/// Description used when the model output is unusable
pub const FALLBACK_DESCRIPTION: &str = "automated commit message";

const FENCE: &str = "```";

/// Normalize a short-form response. Only surrounding whitespace is removed;
/// commit-format compliance is left to the model.
pub fn normalize_simple(raw: &str) -> String {
    raw.trim().to_string()
}

/// Turn a structured response into a usable draft.
///
/// 1. Strip a markdown fence if one is present.
/// 2. Slice from the first `{` to the last `}`.
/// 3. Parse strictly; require non-blank `type` and `description`.
/// 4. Otherwise return [`fallback_draft`] for `diff`.
pub fn normalize_detailed(raw: &str, diff: &str) -> CommitDraft {
    let unfenced = strip_code_fence(raw);
    let candidate = brace_span(unfenced).unwrap_or(unfenced);

    match serde_json::from_str::<Value>(candidate) {
        Ok(Value::Object(object)) => match draft_from_object(&object) {
            Some(draft) => draft,
            None => {
                debug!("model JSON lacks a usable type or description, using fallback draft");
                fallback_draft(diff)
            }
        },
        Ok(other) => {
            debug!(kind = json_kind(&other), "model JSON is not an object, using fallback draft");
            fallback_draft(diff)
        }
        Err(e) => {
            debug!(error = %e, "model output is not valid JSON, using fallback draft");
            fallback_draft(diff)
        }
    }
}

/// The draft used whenever structured output cannot be trusted.
///
/// Its body lists every file named in the diff's section headers, so the
/// result is deterministic for a given diff and never fails to build.
pub fn fallback_draft(diff: &str) -> CommitDraft {
    let mut seen: Vec<String> = Vec::new();
    let mut lines: Vec<String> = Vec::new();

    for section in parse_diff_sections(diff) {
        if seen.contains(&section.file_path) {
            continue;
        }
        lines.push(format!("- {}", section.summary()));
        seen.push(section.file_path);
    }

    let body = if lines.is_empty() {
        "Changed files: none detected in the diff".to_string()
    } else {
        format!("Changed files:\n{}", lines.join("\n"))
    };

    CommitDraft {
        commit_type: FALLBACK_TYPE.to_string(),
        scope: None,
        description: FALLBACK_DESCRIPTION.to_string(),
        body: Some(body),
        breaking_changes: false,
    }
}

/// Return the contents of the first fenced block, preferring one that holds
/// a JSON object. Text without fences is returned unchanged.
fn strip_code_fence(text: &str) -> &str {
    let mut blocks: Vec<&str> = Vec::new();
    let mut rest = text;

    while let Some(open) = rest.find(FENCE) {
        let after_open = &rest[open + FENCE.len()..];
        let body = strip_fence_tag(after_open);

        match body.find(FENCE) {
            Some(close) => {
                blocks.push(&body[..close]);
                rest = &body[close + FENCE.len()..];
            }
            None => {
                // Unterminated fence: the response was probably cut off
                blocks.push(body);
                break;
            }
        }
    }

    blocks
        .iter()
        .find(|block| block.contains('{'))
        .or_else(|| blocks.first())
        .copied()
        .map(str::trim)
        .unwrap_or(text)
}

/// Drop an optional `json` info string right after an opening fence
fn strip_fence_tag(after_open: &str) -> &str {
    let tag_len = after_open
        .char_indices()
        .find(|(_, c)| !c.is_ascii_alphanumeric())
        .map(|(i, _)| i)
        .unwrap_or(after_open.len());

    if after_open[..tag_len].eq_ignore_ascii_case("json") {
        &after_open[tag_len..]
    } else {
        after_open
    }
}

/// Slice from the first `{` to the last `}` when they are in order
fn brace_span(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (start < end).then(|| &text[start..=end])
}

/// Build a draft from a parsed object, coercing loosely typed fields.
///
/// `type` and `description` must be non-blank strings. `scope` and `body`
/// are kept only when they are non-blank strings. `breakingChanges` accepts
/// booleans, truthy strings and non-zero numbers.
fn draft_from_object(object: &Map<String, Value>) -> Option<CommitDraft> {
    let commit_type = non_blank_string(object.get("type"))?;
    let description = non_blank_string(object.get("description"))?;

    Some(CommitDraft {
        commit_type,
        scope: non_blank_string(object.get("scope")),
        description,
        body: non_blank_string(object.get("body")),
        breaking_changes: object.get("breakingChanges").map(truthy).unwrap_or(false),
    })
}

fn non_blank_string(value: Option<&Value>) -> Option<String> {
    match value {
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s.trim().to_string()),
        _ => None,
    }
}

fn truthy(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::String(s) => matches!(
            s.trim().to_ascii_lowercase().as_str(),
            "true" | "yes" | "y" | "1"
        ),
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        _ => false,
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
