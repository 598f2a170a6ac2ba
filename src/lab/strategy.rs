// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Strategic planning for a decomposed lab.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::decompose::LabComponents;
use crate::ai::extract::{extract_json, Extraction};
use crate::ai::prompts;
use crate::ai::provider::CompletionProvider;

/// Recommended plan of attack for a lab.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LabPlan {
    pub tools: Vec<String>,
    pub commands: Vec<String>,
    /// Ordered steps; the runner feeds each through the instruction
    /// pipeline in sequence.
    pub sequence: Vec<String>,
    pub evidence: Vec<String>,
    pub analysis: String,
}

/// Strategy determination either yields a plan or the raw reply when the
/// service would not produce parseable JSON.
#[derive(Debug, Clone)]
pub enum StrategyOutcome {
    Plan(LabPlan),
    Raw(String),
}

impl StrategyOutcome {
    /// The executable step sequence, empty when no plan was recovered.
    pub fn sequence(&self) -> &[String] {
        match self {
            StrategyOutcome::Plan(plan) => &plan.sequence,
            StrategyOutcome::Raw(_) => &[],
        }
    }
}

pub struct LabStrategist<'a> {
    provider: &'a dyn CompletionProvider,
}

impl<'a> LabStrategist<'a> {
    pub fn new(provider: &'a dyn CompletionProvider) -> Self {
        Self { provider }
    }

    pub async fn determine_approach(&self, components: &LabComponents) -> Result<StrategyOutcome> {
        let user = format!("Lab Components: {}", serde_json::to_string(components)?);
        let reply = self.provider.complete(prompts::LAB_STRATEGY, &user).await?;

        Ok(match extract_json(&reply) {
            Extraction::Parsed(value) => match serde_json::from_value(value) {
                Ok(plan) => StrategyOutcome::Plan(plan),
                Err(e) => {
                    warn!("Strategy JSON had unexpected shape: {}", e);
                    StrategyOutcome::Raw(reply)
                }
            },
            Extraction::Malformed(raw) => {
                warn!("Strategy reply was not parseable JSON");
                StrategyOutcome::Raw(raw)
            }
        })
    }
}
