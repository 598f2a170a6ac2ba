// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Structured-data recovery from free-form completions.
//!
//! Completion services wrap JSON in explanatory prose more often than not.
//! `extract_json` slices from the first `{` to the last `}` and parses that
//! strictly; callers get a tagged result and must handle both arms. Parse
//! failure is never fatal anywhere in the pipeline.
//!
//! Known limitation: multiple top-level objects in one reply (or prose
//! containing stray braces) confuse the slice. The outermost-brace slice is
//! the same recovery the scanner stdout parser uses and has held up well
//! against real model output.

use serde::de::DeserializeOwned;
use serde_json::Value;

/// Outcome of trying to pull a JSON object out of a completion reply.
#[derive(Debug, Clone, PartialEq)]
pub enum Extraction {
    Parsed(Value),
    /// The raw reply, kept for logging and fallback paths.
    Malformed(String),
}

impl Extraction {
    pub fn is_parsed(&self) -> bool {
        matches!(self, Extraction::Parsed(_))
    }

    /// Deserialize the parsed value into a concrete record, or fall back to
    /// the caller's default. Covers both arms in one step for consumers that
    /// have a natural default record.
    pub fn into_record_or<T: DeserializeOwned>(self, default: T) -> T {
        match self {
            Extraction::Parsed(value) => serde_json::from_value(value).unwrap_or(default),
            Extraction::Malformed(_) => default,
        }
    }
}

/// Locate and parse the JSON object embedded in `text`.
///
/// Slices between the first `{` and the last `}` (inclusive) when both
/// exist; otherwise attempts to parse the whole text.
pub fn extract_json(text: &str) -> Extraction {
    let candidate = match (text.find('{'), text.rfind('}')) {
        (Some(start), Some(end)) if start < end => &text[start..=end],
        _ => text,
    };

    match serde_json::from_str::<Value>(candidate.trim()) {
        Ok(value) if value.is_object() => Extraction::Parsed(value),
        _ => Extraction::Malformed(text.to_string()),
    }
}

/// Convenience: extract and deserialize, substituting `default` when the
/// reply carries no parseable object.
pub fn extract_or<T: DeserializeOwned>(text: &str, default: T) -> T {
    extract_json(text).into_record_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn recovers_json_wrapped_in_prose() {
        let reply = r#"Sure! Here is the extracted context:

{"target": "192.168.1.100", "ports": null}

Let me know if you need anything else."#;

        match extract_json(reply) {
            Extraction::Parsed(value) => {
                assert_eq!(value["target"], json!("192.168.1.100"));
                assert_eq!(value["ports"], Value::Null);
            }
            Extraction::Malformed(_) => panic!("expected parse"),
        }
    }

    #[test]
    fn parses_bare_object() {
        let reply = r#"{"title": "Lab 2"}"#;
        assert!(extract_json(reply).is_parsed());
    }

    #[test]
    fn prose_wrapping_is_lossless() {
        let inner = json!({"a": 1, "b": ["x", "y"]});
        let wrapped = format!("preamble {} trailing words", inner);
        assert_eq!(extract_json(&wrapped), Extraction::Parsed(inner));
    }

    #[test]
    fn malformed_text_keeps_raw_reply() {
        let reply = "I could not produce JSON for that instruction.";
        match extract_json(reply) {
            Extraction::Malformed(raw) => assert_eq!(raw, reply),
            Extraction::Parsed(_) => panic!("expected malformed"),
        }
    }

    #[test]
    fn truncated_object_is_malformed() {
        assert!(!extract_json(r#"{"target": "192.168"#).is_parsed());
    }

    #[test]
    fn non_object_json_is_malformed() {
        // A bare array or scalar is not the record shape callers expect.
        assert!(!extract_json("[1, 2, 3]").is_parsed());
        assert!(!extract_json("42").is_parsed());
    }

    #[test]
    fn extract_or_returns_default_on_garbage() {
        #[derive(serde::Deserialize, Default, PartialEq, Debug)]
        struct Rec {
            target: Option<String>,
        }

        let rec: Rec = extract_or("no json here", Rec::default());
        assert_eq!(rec, Rec::default());
    }
}
