// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Luotain - AI-assisted lab reconnaissance CLI.
//!
//! Reads a lab document (file or stdin), decomposes it, generates and
//! throttles reconnaissance commands, executes them, and writes a step log
//! plus a markdown report.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::Read;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

use luotain::ai::provider::{create_provider, ProviderType};
use luotain::commands::catalog;
use luotain::config;
use luotain::exec::{DryRunExecutor, Executor, ShellExecutor};
use luotain::lab::{looks_like_lab_document, LabRunner};
use luotain::posture::PostureModel;
use luotain::steplog::StepLogger;

/// Luotain - AI-assisted lab reconnaissance
#[derive(Parser)]
#[command(name = "luotain")]
#[command(author = "Bountyy Oy <info@bountyy.fi>")]
#[command(version = "0.3.0")]
#[command(about = "Turns lab instructions into throttled recon commands.", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    /// Configuration file path (yaml, toml or json)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a lab document or instruction list
    Run {
        /// Lab document file; reads stdin when omitted
        lab_file: Option<PathBuf>,

        /// Completion provider: openai or ollama
        #[arg(long, default_value = "openai")]
        provider: String,

        /// Model override
        #[arg(long)]
        model: Option<String>,

        /// API key (or set OPENAI_API_KEY)
        #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
        api_key: Option<String>,

        /// Provider base URL override (self-hosted endpoints)
        #[arg(long)]
        base_url: Option<String>,

        /// Print commands instead of executing them
        #[arg(long)]
        dry_run: bool,

        /// Directory for step logs and the report
        #[arg(long, default_value = "lab_logs")]
        log_dir: PathBuf,
    },

    /// List the command template catalog
    Templates,
}

fn init_tracing(verbose: bool, debug: bool) {
    let default = if debug {
        "luotain=debug"
    } else if verbose {
        "luotain=info"
    } else {
        "luotain=warn"
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.debug);

    match cli.command {
        Commands::Templates => {
            for t in catalog::COMMAND_TEMPLATES {
                println!("{:<20} {}", t.name, t.template);
            }
            Ok(())
        }
        Commands::Run {
            lab_file,
            provider,
            model,
            api_key,
            base_url,
            dry_run,
            log_dir,
        } => {
            let app_config = config::load_or_default(cli.config.as_deref())
                .context("Failed to load configuration")?;

            let provider_type: ProviderType = provider.parse()?;
            let provider = create_provider(provider_type, model, api_key, base_url)?;
            info!(
                provider = provider.name(),
                model = provider.model(),
                "Completion provider ready"
            );

            let text = match lab_file {
                Some(path) => std::fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read lab file {:?}", path))?,
                None => {
                    let mut buf = String::new();
                    std::io::stdin()
                        .read_to_string(&mut buf)
                        .context("Failed to read lab document from stdin")?;
                    buf
                }
            };
            if text.trim().is_empty() {
                anyhow::bail!("No instructions provided");
            }

            let posture = PostureModel::from_config(&app_config);
            let executor: Box<dyn Executor> = if dry_run {
                Box::new(DryRunExecutor)
            } else {
                Box::new(ShellExecutor::new(&app_config.executor))
            };
            let steplog = StepLogger::new(&log_dir)?;

            let mut runner = LabRunner::new(provider.as_ref(), executor.as_ref(), &posture, steplog);

            if looks_like_lab_document(&text) {
                runner.run_document(&text).await?;
            } else {
                let lines: Vec<String> = text.lines().map(str::to_string).collect();
                runner.run_instructions(&lines).await;
                runner.finish().await?;
            }

            Ok(())
        }
    }
}
