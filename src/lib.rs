// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Luotain — AI-assisted security-lab reconnaissance pipeline.
//!
//! Turns free-text lab instructions into concrete, posture-throttled
//! reconnaissance commands and assembles tool output into evidence and a
//! report. The deterministic core sits between a natural-language
//! completion service and the actual tool invocation:
//!
//! - `ai`: completion providers, structured-reply extraction, context
//!   analysis and explanations
//! - `commands`: the template catalog and layered template resolution
//! - `posture`: network-defense posture model and scan-strategy optimizer
//! - `evidence`: line-oriented parsers and the append-only evidence store
//! - `lab`: document decomposition, strategy, and the run loop
//! - `exec`: the command-executor seam
//! - `steplog`: per-run step logging and report output

pub mod ai;
pub mod commands;
pub mod config;
pub mod errors;
pub mod evidence;
pub mod exec;
pub mod lab;
pub mod posture;
pub mod steplog;
