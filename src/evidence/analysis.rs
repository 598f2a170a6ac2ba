// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Completion-service analysis of collected evidence, and report rendering.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::EvidenceStore;
use crate::ai::extract::{extract_json, Extraction};
use crate::ai::prompts;
use crate::ai::provider::CompletionProvider;
use crate::lab::decompose::LabComponents;

/// Structured analysis of the evidence store.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisReport {
    pub patterns: Vec<String>,
    pub suspicious_activity: Vec<String>,
    pub correlations: Vec<String>,
    pub potential_targets: Vec<String>,
}

/// The analysis stage either yields a structured report or the raw reply
/// when the service would not produce parseable JSON.
#[derive(Debug, Clone)]
pub enum AnalysisOutcome {
    Report(AnalysisReport),
    Raw(String),
}

pub struct EvidenceAnalyst<'a> {
    provider: &'a dyn CompletionProvider,
}

impl<'a> EvidenceAnalyst<'a> {
    pub fn new(provider: &'a dyn CompletionProvider) -> Self {
        Self { provider }
    }

    /// Analyze the store for patterns and record the findings on it.
    /// An empty store short-circuits without a completion call.
    pub async fn analyze_patterns(&self, store: &mut EvidenceStore) -> Result<Option<AnalysisOutcome>> {
        if store.is_empty() {
            return Ok(None);
        }

        let summary = serde_json::json!({
            "dns_queries": store.dns_queries,
            "http_requests": store.http_requests,
            "network_traffic": store.network_traffic,
        });
        let user = format!("Network Evidence: {}", summary);

        let reply = self.provider.complete(prompts::EVIDENCE_ANALYSIS, &user).await?;

        let outcome = match extract_json(&reply) {
            Extraction::Parsed(value) => {
                store.findings = Some(value.clone());
                match serde_json::from_value::<AnalysisReport>(value) {
                    Ok(report) => AnalysisOutcome::Report(report),
                    Err(e) => {
                        warn!("Analysis JSON had unexpected shape: {}", e);
                        AnalysisOutcome::Raw(reply)
                    }
                }
            }
            Extraction::Malformed(raw) => {
                warn!("Evidence analysis reply was not parseable JSON");
                AnalysisOutcome::Raw(raw)
            }
        };

        Ok(Some(outcome))
    }

    /// Render the final markdown lab report from components + findings.
    pub async fn generate_report(
        &self,
        components: &LabComponents,
        store: &EvidenceStore,
    ) -> Result<String> {
        let findings = store
            .findings
            .as_ref()
            .cloned()
            .unwrap_or(serde_json::Value::Null);

        let user = format!(
            "Lab Components: {}\nEvidence Analysis: {}",
            serde_json::to_string(components)?,
            findings,
        );

        self.provider.complete(prompts::REPORT_GENERATION, &user).await
    }
}
