// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Command executor seam.
//!
//! The pipeline hands a fully optimized command string across this trait
//! and gets raw stdout/stderr back. The default implementation runs the
//! command through a local shell; a remote transport (SSH into the lab
//! box) would implement the same trait.

use anyhow::{Context, Result};
use std::process::Stdio;
use std::time::Duration;
use tracing::debug;

use crate::config::ExecutorConfig;

#[derive(Debug, Clone, Default)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
}

#[async_trait::async_trait]
pub trait Executor: Send + Sync {
    async fn execute(&self, command: &str) -> Result<CommandOutput>;
}

/// Runs commands through `sh -c` on the local machine.
pub struct ShellExecutor {
    shell: String,
    timeout: Duration,
}

impl ShellExecutor {
    pub fn new(config: &ExecutorConfig) -> Self {
        Self {
            shell: config.shell.clone(),
            timeout: Duration::from_secs(config.timeout_secs),
        }
    }
}

#[async_trait::async_trait]
impl Executor for ShellExecutor {
    async fn execute(&self, command: &str) -> Result<CommandOutput> {
        debug!(%command, "Executing");

        let mut cmd = tokio::process::Command::new(&self.shell);
        cmd.arg("-c")
            .arg(command)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        let output = tokio::time::timeout(self.timeout, cmd.output())
            .await
            .map_err(|_| anyhow::anyhow!("Command timed out after {:?}", self.timeout))?
            .with_context(|| format!("Failed to execute via '{}'", self.shell))?;

        Ok(CommandOutput {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        })
    }
}

/// Prints commands instead of running them. Used by `--dry-run`.
pub struct DryRunExecutor;

#[async_trait::async_trait]
impl Executor for DryRunExecutor {
    async fn execute(&self, command: &str) -> Result<CommandOutput> {
        println!("[dry-run] {}", command);
        Ok(CommandOutput::default())
    }
}
