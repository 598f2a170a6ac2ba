// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Operator-facing explanations for command choices and tool output.
//!
//! Both calls degrade to a fixed string on provider failure — a missing
//! explanation never aborts an instruction.

use std::collections::HashMap;
use tracing::warn;

use super::prompts;
use super::provider::CompletionProvider;
use crate::ai::context::ContextRecord;

const EXPLANATION_UNAVAILABLE: &str = "Explanation unavailable due to an error.";
const OUTPUT_ANALYSIS_UNAVAILABLE: &str = "Output analysis unavailable";

pub struct Narrator<'a> {
    provider: &'a dyn CompletionProvider,
}

impl<'a> Narrator<'a> {
    pub fn new(provider: &'a dyn CompletionProvider) -> Self {
        Self { provider }
    }

    /// Why this command was selected and how it was customized.
    pub async fn explain_command_selection(
        &self,
        instruction: &str,
        command_type: &str,
        command: &str,
        context: &ContextRecord,
        params: &HashMap<String, String>,
    ) -> String {
        let user = format!(
            "Instruction: {}\nCommand Type: {}\nCommand: {}\nContext: {}\nParameters: {:?}",
            instruction,
            command_type,
            command,
            serde_json::to_string(context).unwrap_or_default(),
            params,
        );

        match self.provider.complete(prompts::COMMAND_EXPLANATION, &user).await {
            Ok(text) => text,
            Err(e) => {
                warn!("Error generating explanation: {:#}", e);
                EXPLANATION_UNAVAILABLE.to_string()
            }
        }
    }

    /// Technical analysis of raw command output.
    pub async fn explain_output(&self, command: &str, output: &str) -> String {
        let user = format!(
            "Command: {}\nOutput: {}\nProvide a technical analysis of this output.",
            command, output
        );

        match self.provider.complete(prompts::OUTPUT_EXPLANATION, &user).await {
            Ok(text) => text,
            Err(e) => {
                warn!("Error getting output explanation: {:#}", e);
                OUTPUT_ANALYSIS_UNAVAILABLE.to_string()
            }
        }
    }
}
