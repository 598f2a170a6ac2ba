// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Context extraction from a single lab instruction.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::extract::{extract_json, Extraction};
use super::prompts;
use super::provider::CompletionProvider;

/// A context field may arrive from the model as a single string or a list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    One(String),
    Many(Vec<String>),
}

impl FieldValue {
    /// First value, for fields the pipeline consumes as a scalar.
    pub fn first(&self) -> Option<&str> {
        match self {
            FieldValue::One(s) => Some(s.as_str()),
            FieldValue::Many(items) => items.first().map(String::as_str),
        }
    }
}

/// Structured parameters extracted from an instruction.
///
/// Produced fresh per instruction and immutable afterwards; the resolver
/// borrows it read-only.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContextRecord {
    pub target: Option<FieldValue>,
    pub ports: Option<FieldValue>,
    pub protocols: Option<FieldValue>,
    pub techniques: Option<FieldValue>,
    pub tools: Option<FieldValue>,
}

impl ContextRecord {
    pub fn is_empty(&self) -> bool {
        self.target.is_none()
            && self.ports.is_none()
            && self.protocols.is_none()
            && self.techniques.is_none()
            && self.tools.is_none()
    }
}

/// Asks the completion service for the context record of an instruction.
pub struct ContextAnalyzer<'a> {
    provider: &'a dyn CompletionProvider,
}

impl<'a> ContextAnalyzer<'a> {
    pub fn new(provider: &'a dyn CompletionProvider) -> Self {
        Self { provider }
    }

    /// Extract key parameters from the instruction. Extraction failure is
    /// not an error: an unparseable reply degrades to the all-empty record.
    pub async fn analyze(&self, instruction: &str) -> Result<ContextRecord> {
        let user = format!("Instruction: {}", instruction);
        let reply = self
            .provider
            .complete(prompts::CONTEXT_ANALYSIS, &user)
            .await?;

        let record = match extract_json(&reply) {
            Extraction::Parsed(value) => {
                serde_json::from_value(value).unwrap_or_else(|e| {
                    warn!("Context record had unexpected shape: {}", e);
                    ContextRecord::default()
                })
            }
            Extraction::Malformed(raw) => {
                warn!(
                    "Context extraction fell back to empty record (reply was {} chars)",
                    raw.len()
                );
                ContextRecord::default()
            }
        };

        debug!(?record, "Extracted context");
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_scalar_and_list_fields() {
        let json = r#"{
            "target": "192.168.1.100",
            "ports": ["80", "443"],
            "protocols": null,
            "tools": "nmap"
        }"#;
        let record: ContextRecord = serde_json::from_str(json).unwrap();

        assert_eq!(record.target.as_ref().unwrap().first(), Some("192.168.1.100"));
        assert_eq!(record.ports.as_ref().unwrap().first(), Some("80"));
        assert!(record.protocols.is_none());
        assert!(record.techniques.is_none());
        assert_eq!(record.tools, Some(FieldValue::One("nmap".to_string())));
    }

    #[test]
    fn tolerates_extra_keys() {
        let json = r#"{"target": "10.0.0.1", "confidence": 0.9}"#;
        let record: ContextRecord = serde_json::from_str(json).unwrap();
        assert!(!record.is_empty());
    }
}
