//! Key-point normalization for extracted transcript summaries.
//!
//! Turns the raw reply of a key-point extraction step into a clean ordered
//! list: whitespace collapsed, `N.` numbering removed, blank lines dropped.

use crate::error::{Error, Result};
use crate::types::KeyPointList;
use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;
use unicode_normalization::UnicodeNormalization;

/// Regex matching a leading `N.` numbering marker and the whitespace after it.
static NUMBERING_PREFIX_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+\.(\s*)").unwrap());

const BYTE_ORDER_MARK: char = '\u{feff}';

/// Remove leading `N.` markers, repeatedly, from an already trimmed line.
///
/// A marker directly followed by a digit (`2.5x revenue`) is a decimal, not
/// numbering, and is left alone.
fn strip_numbering(line: &str) -> &str {
    let mut rest = line;
    while let Some(caps) = NUMBERING_PREFIX_REGEX.captures(rest) {
        let whole = caps.get(0).map_or(0, |m| m.end());
        let spacing = caps.get(1).map_or("", |m| m.as_str());
        let remainder = &rest[whole..];
        if spacing.is_empty() && remainder.starts_with(|c: char| c.is_ascii_digit()) {
            break;
        }
        rest = remainder;
    }
    rest
}

/// Clean a single candidate key point.
///
/// Applies NFC normalization, trims (a byte order mark counts as
/// whitespace), strips numbering, and collapses runs of whitespace. Returns
/// `None` when nothing visible is left.
pub fn clean_point(text: &str) -> Option<String> {
    let composed: String = text.nfc().collect();
    let trimmed = composed.trim_matches(|c: char| c.is_whitespace() || c == BYTE_ORDER_MARK);
    let stripped = strip_numbering(trimmed);
    let collapsed = stripped.split_whitespace().collect::<Vec<_>>().join(" ");

    if collapsed.is_empty() {
        None
    } else {
        Some(collapsed)
    }
}

/// Normalizer for key-point extraction output.
#[derive(Debug, Clone)]
pub struct KeyPointNormalizer {
    /// Whether each line is its own key point.
    split_lines: bool,
}

impl Default for KeyPointNormalizer {
    fn default() -> Self {
        Self { split_lines: true }
    }
}

impl KeyPointNormalizer {
    /// Create a normalizer that treats every line as a candidate key point.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether lines are split into separate key points.
    ///
    /// When disabled the whole text becomes one point with every whitespace
    /// run, newlines included, collapsed to a single space.
    pub fn with_split_lines(mut self, split: bool) -> Self {
        self.split_lines = split;
        self
    }

    /// Normalize raw text into key points.
    pub fn normalize(&self, raw: &str) -> KeyPointList {
        if !self.split_lines {
            return KeyPointList::from_points(clean_point(raw));
        }

        // Normalize line endings to \n first
        let text = raw.replace("\r\n", "\n").replace('\r', "\n");
        KeyPointList::from_points(text.lines())
    }

    /// Normalize an extraction reply.
    ///
    /// - A string is normalized as text.
    /// - An array contributes each string element in order.
    /// - An object carrying `error` is propagated as a collaborator failure.
    /// - Anything else yields an empty list.
    pub fn normalize_reply(&self, reply: &Value) -> Result<KeyPointList> {
        match reply {
            Value::String(text) => Ok(self.normalize(text)),
            Value::Array(items) => {
                let mut points = Vec::new();
                for item in items {
                    match item {
                        Value::String(text) => points.extend(self.normalize(text).into_vec()),
                        other => log::warn!("Skipping non-string key point: {}", other),
                    }
                }
                Ok(KeyPointList::from_points(points))
            }
            Value::Object(map) if map.contains_key("error") => {
                let message = match &map["error"] {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                Err(Error::CollaboratorFailure(message))
            }
            other => {
                log::warn!("Malformed key-point reply, returning no key points: {}", other);
                Ok(KeyPointList::new())
            }
        }
    }
}
