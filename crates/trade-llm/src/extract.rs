//! Structured-payload extraction from model text
//!
//! The inference service does not guarantee clean output: the JSON the
//! prompt asked for may arrive wrapped in markdown fences, embedded in
//! prose, or not at all. This module recovers the one embedded payload or
//! fails loudly trying.

use crate::error::ExtractionError;
use regex::Regex;
use std::sync::LazyLock;

/// Matches the first fenced code block, tolerating an optional language tag
#[allow(clippy::unwrap_used)]
static FENCED_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    // The pattern is a compile-time constant.
    Regex::new(r"(?si)```[a-z0-9_-]*\s*(.*?)\s*```").unwrap()
});

/// How much of a bad candidate is kept for diagnostics
const SNIPPET_LEN: usize = 200;

/// Recover the single JSON payload embedded in `content`
///
/// Search order:
/// 1. the first fenced code block (```json ... ``` or untagged);
/// 2. the substring between the first `{` and the last `}`.
///
/// The candidate is parsed as JSON but not validated against any schema;
/// deserializing into the expected payload shape is the caller's concern.
/// This function is pure and synchronous.
pub fn extract_json(content: &str) -> Result<serde_json::Value, ExtractionError> {
    let candidate = locate_candidate(content).ok_or(ExtractionError::NotFound)?;

    serde_json::from_str(candidate.trim()).map_err(|_| ExtractionError::Malformed {
        snippet: candidate.chars().take(SNIPPET_LEN).collect(),
    })
}

/// Find the candidate substring most likely to hold the payload
fn locate_candidate(content: &str) -> Option<&str> {
    if let Some(caps) = FENCED_BLOCK.captures(content) {
        let inner = caps.get(1).map(|m| m.as_str()).unwrap_or_default();
        // An empty fence is no candidate; keep looking in the raw text.
        if !inner.is_empty() {
            return Some(inner);
        }
    }

    let first = content.find('{')?;
    let last = content.rfind('}')?;
    if last > first {
        Some(&content[first..=last])
    } else {
        None
    }
}
