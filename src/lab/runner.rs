// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Lab run orchestration.
//!
//! One instruction at a time: context extraction → command selection →
//! template resolution → posture optimization → (delay) → execution →
//! evidence ingest → explanation → step log. A failed instruction is
//! reported and the run moves on; nothing short of operator interrupt
//! stops the sequence.

use anyhow::Result;
use std::time::Duration;
use tracing::{error, info, warn};

use super::decompose::{LabComponents, LabDecomposer};
use super::strategy::{LabStrategist, StrategyOutcome};
use crate::ai::context::ContextAnalyzer;
use crate::ai::narrate::Narrator;
use crate::ai::provider::CompletionProvider;
use crate::commands::resolver::CommandPlanner;
use crate::errors::{PipelineError, PipelineResult};
use crate::evidence::analysis::{AnalysisOutcome, EvidenceAnalyst};
use crate::evidence::EvidenceStore;
use crate::exec::{CommandOutput, Executor};
use crate::posture::PostureModel;
use crate::steplog::StepLogger;

/// What one successfully processed instruction produced.
#[derive(Debug)]
pub struct InstructionOutcome {
    pub command_type: String,
    pub command: String,
    pub output: CommandOutput,
}

pub struct LabRunner<'a> {
    provider: &'a dyn CompletionProvider,
    executor: &'a dyn Executor,
    posture: &'a PostureModel,
    steplog: StepLogger,
    pub evidence: EvidenceStore,
    components: Option<LabComponents>,
}

impl<'a> LabRunner<'a> {
    pub fn new(
        provider: &'a dyn CompletionProvider,
        executor: &'a dyn Executor,
        posture: &'a PostureModel,
        steplog: StepLogger,
    ) -> Self {
        Self {
            provider,
            executor,
            posture,
            steplog,
            evidence: EvidenceStore::new(),
            components: None,
        }
    }

    /// Process a single free-text instruction end to end.
    pub async fn process_instruction(&mut self, instruction: &str) -> PipelineResult<InstructionOutcome> {
        info!(instruction, "Processing instruction");

        let context = ContextAnalyzer::new(self.provider)
            .analyze(instruction)
            .await?;

        let planner = CommandPlanner::new(self.provider);
        let command_type = planner
            .select_command_type(instruction, &context)
            .await?
            .ok_or_else(|| PipelineError::UnknownCommandType(instruction.to_string()))?;

        let resolved = planner.resolve(command_type, &context).await?;
        info!(command = %resolved.command, command_type, "Resolved command");

        let strategy = self
            .posture
            .execution_strategy(&resolved.command, &resolved.command_type);

        if !strategy.safe_to_scan {
            warn!("Scanning may trigger IDS/IPS alerts. Proceeding with caution.");
        }
        if strategy.split_scan {
            info!(
                delay_secs = strategy.delay_secs,
                "Splitting scan for stealth; delaying before execution"
            );
            tokio::time::sleep(Duration::from_secs_f64(strategy.delay_secs)).await;
        }

        let output = self
            .executor
            .execute(&strategy.command)
            .await
            .map_err(|e| PipelineError::Transport(format!("{:#}", e)))?;

        if !output.stdout.is_empty() && output.stderr.is_empty() {
            self.evidence
                .ingest(&resolved.command_type, &strategy.command, &output.stdout);
        }

        let narrator = Narrator::new(self.provider);
        let mut explanation = narrator
            .explain_command_selection(
                instruction,
                &resolved.command_type,
                &strategy.command,
                &context,
                &resolved.params,
            )
            .await;
        if !output.stdout.is_empty() {
            let output_explanation = narrator
                .explain_output(&strategy.command, &output.stdout)
                .await;
            explanation = format!("{}\n\nOutput Analysis:\n{}", explanation, output_explanation);
        }

        if let Err(e) = self.steplog.log_step(
            &strategy.command,
            Some(&output.stdout),
            Some(&output.stderr),
            Some(&explanation),
        ) {
            warn!("Failed to write step log: {:#}", e);
        }

        Ok(InstructionOutcome {
            command_type: resolved.command_type,
            command: strategy.command,
            output,
        })
    }

    /// Run a batch of instruction lines, reporting each failure and
    /// continuing with the next.
    pub async fn run_instructions(&mut self, instructions: &[String]) {
        let total = instructions.iter().filter(|l| !l.trim().is_empty()).count();
        let mut index = 0;

        for instruction in instructions {
            let instruction = instruction.trim();
            if instruction.is_empty() {
                continue;
            }
            index += 1;
            println!("\n[{}/{}] Processing: {}", index, total, instruction);

            match self.process_instruction(instruction).await {
                Ok(outcome) if !outcome.output.stderr.is_empty() => {
                    println!("Error occurred: {}", outcome.output.stderr.trim());
                }
                Ok(outcome) if !outcome.output.stdout.is_empty() => {
                    println!("Command executed successfully.");
                }
                Ok(_) => {
                    println!("Command executed but returned no output.");
                }
                Err(e) => {
                    error!("Instruction failed: {}", e);
                    println!("Could not complete instruction: {}", e);
                }
            }
        }
    }

    /// Decompose a full lab document, plan, and execute the plan.
    pub async fn run_document(&mut self, text: &str) -> Result<()> {
        println!("\nAnalyzing lab document...");
        let components = LabDecomposer::new(self.provider).decompose(text).await;

        println!("\nLab Components:");
        println!("Title: {}", display_or_unknown(&components.title));
        println!("Objective: {}", display_or_unknown(&components.objective));
        println!("Target: {}", display_or_unknown(&components.target));
        println!("Approach: {}", display_or_unknown(&components.approach));

        println!("\nDetermining lab strategy...");
        let strategy = match LabStrategist::new(self.provider)
            .determine_approach(&components)
            .await
        {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!("Error determining lab strategy: {:#}", e);
                StrategyOutcome::Raw(String::new())
            }
        };

        if let StrategyOutcome::Plan(ref plan) = strategy {
            if !plan.tools.is_empty() {
                println!("Tools: {}", plan.tools.join(", "));
            }
            if !plan.commands.is_empty() {
                println!("Commands: {}", plan.commands.join(", "));
            }
        }

        self.components = Some(components);

        let sequence = strategy.sequence().to_vec();
        if sequence.is_empty() {
            println!("No strategy sequence available. Processing document lines as instructions.");
            let lines: Vec<String> = text.lines().map(str::to_string).collect();
            self.run_instructions(&lines).await;
        } else {
            println!("\nRecommended Sequence:");
            for (i, step) in sequence.iter().enumerate() {
                println!("{}. {}", i + 1, step);
            }
            self.run_instructions(&sequence).await;
        }

        self.finish().await
    }

    /// Analyze collected evidence and write the report.
    pub async fn finish(&mut self) -> Result<()> {
        println!("\nAnalyzing collected evidence...");
        let analyst = EvidenceAnalyst::new(self.provider);

        match analyst.analyze_patterns(&mut self.evidence).await {
            Ok(None) => {
                println!("No evidence collected yet");
                return Ok(());
            }
            Ok(Some(AnalysisOutcome::Report(report))) => {
                if !report.patterns.is_empty() {
                    println!("\nIdentified Patterns:");
                    for pattern in &report.patterns {
                        println!("- {}", pattern);
                    }
                }
                if !report.potential_targets.is_empty() {
                    println!("\nPotential Targets:");
                    for target in &report.potential_targets {
                        println!("- {}", target);
                    }
                }
            }
            Ok(Some(AnalysisOutcome::Raw(raw))) => {
                println!("{}", raw);
            }
            Err(e) => {
                warn!("Error analyzing evidence: {:#}", e);
                return Ok(());
            }
        }

        let Some(components) = self.components.clone() else {
            info!("No lab components; skipping report generation");
            return Ok(());
        };

        println!("\nGenerating lab report...");
        match analyst.generate_report(&components, &self.evidence).await {
            Ok(report) => {
                let path = self.steplog.write_report(&report)?;
                println!("Lab report generated: {}", path.display());
            }
            Err(e) => warn!("Error generating report: {:#}", e),
        }

        if self.evidence.dropped_lines > 0 {
            info!(
                dropped = self.evidence.dropped_lines,
                "Some tool output lines were not parseable as evidence"
            );
        }

        println!("\nLab execution completed!");
        println!("Log file: {}", self.steplog.log_file().display());
        Ok(())
    }
}

/// Whether the pasted text reads like a full lab document rather than a
/// list of standalone instructions.
pub fn looks_like_lab_document(text: &str) -> bool {
    let line_count = text.lines().count();
    line_count > 5 && (text.to_lowercase().contains("lab") || text.contains('#'))
}

fn display_or_unknown(value: &str) -> &str {
    if value.is_empty() {
        "Unknown"
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_inputs_are_instruction_lists() {
        assert!(!looks_like_lab_document("scan the network\nfind open ports"));
    }

    #[test]
    fn long_marked_documents_are_labs() {
        let doc = "# Lab 3\nline\nline\nline\nline\nline\nline";
        assert!(looks_like_lab_document(doc));

        let doc = "Lab exercise\nline\nline\nline\nline\nline\nline";
        assert!(looks_like_lab_document(doc));
    }

    #[test]
    fn long_unmarked_text_is_not_a_lab() {
        let doc = "alpha\nbeta\ngamma\ndelta\nepsilon\nzeta\neta";
        assert!(!looks_like_lab_document(doc));
    }
}
