// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Per-run step log.
//!
//! One timestamped file per lab run; every executed instruction appends a
//! numbered block with the command, its output and the generated
//! explanation. The final report lands in the same directory.

use anyhow::{Context, Result};
use chrono::Local;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

pub struct StepLogger {
    log_dir: PathBuf,
    log_file: PathBuf,
    step_count: u32,
}

impl StepLogger {
    pub fn new<P: AsRef<Path>>(log_dir: P) -> Result<Self> {
        let log_dir = log_dir.as_ref().to_path_buf();
        fs::create_dir_all(&log_dir)
            .with_context(|| format!("Failed to create log directory {:?}", log_dir))?;

        let timestamp = Local::now().format("%Y%m%d_%H%M%S");
        let log_file = log_dir.join(format!("lab_log_{}.txt", timestamp));

        Ok(Self {
            log_dir,
            log_file,
            step_count: 0,
        })
    }

    pub fn log_step(
        &mut self,
        command: &str,
        output: Option<&str>,
        error: Option<&str>,
        explanation: Option<&str>,
    ) -> Result<()> {
        self.step_count += 1;

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_file)
            .with_context(|| format!("Failed to open step log {:?}", self.log_file))?;

        let divider = "=".repeat(50);
        writeln!(file, "\n{}", divider)?;
        writeln!(file, "Step {}", self.step_count)?;
        writeln!(file, "Time: {}", Local::now().format("%Y-%m-%d %H:%M:%S"))?;
        writeln!(file, "Command: {}\n", command)?;

        if let Some(output) = output.filter(|o| !o.is_empty()) {
            writeln!(file, "Output:\n{}", output)?;
        }
        if let Some(error) = error.filter(|e| !e.is_empty()) {
            writeln!(file, "Errors:\n{}", error)?;
        }
        if let Some(explanation) = explanation.filter(|e| !e.is_empty()) {
            writeln!(file, "\nExplanation:\n{}", explanation)?;
        }

        writeln!(file, "{}", divider)?;
        Ok(())
    }

    /// Write the final markdown report next to the step log.
    pub fn write_report(&self, report: &str) -> Result<PathBuf> {
        let path = self.log_dir.join("lab_report.md");
        fs::write(&path, report)
            .with_context(|| format!("Failed to write report to {:?}", path))?;
        Ok(path)
    }

    pub fn log_file(&self) -> &Path {
        &self.log_file
    }

    pub fn steps_logged(&self) -> u32 {
        self.step_count
    }
}
