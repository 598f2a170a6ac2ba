// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Completion-service layer.
//!
//! Architecture:
//! - `provider`: completion backend abstraction (OpenAI-compatible, Ollama)
//! - `extract`: structured-data recovery from free-form replies
//! - `prompts`: every system prompt the pipeline sends
//! - `context`: instruction → `ContextRecord` extraction
//! - `narrate`: selection/output explanations for the step log
//!
//! Nothing in this module trusts the service to return valid JSON; every
//! consumer goes through `extract` and handles the `Malformed` arm.

pub mod context;
pub mod extract;
pub mod narrate;
pub mod prompts;
pub mod provider;
