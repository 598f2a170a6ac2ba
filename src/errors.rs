// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Pipeline failure taxonomy.
//!
//! Extraction failures are deliberately NOT represented here — a completion
//! that cannot be parsed degrades to a default record (see `ai::extract`).
//! The variants below abort the current instruction only, never the run.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    /// The completion service named a command type that is not in the
    /// catalog and no fuzzy match was found.
    #[error("could not determine command type (got {0:?})")]
    UnknownCommandType(String),

    /// A template placeholder had no context-derived value and no default.
    /// Hard failure: an unfilled placeholder produces an invalid command.
    #[error("template '{command_type}' references '{{{placeholder}}}' with no context or default value")]
    UnresolvedPlaceholder {
        command_type: String,
        placeholder: String,
    },

    /// The executor collaborator reported an error for the command.
    #[error("command execution failed: {0}")]
    Transport(String),

    /// The completion service itself failed (network, HTTP status, ...).
    #[error(transparent)]
    Completion(#[from] anyhow::Error),
}

pub type PipelineResult<T> = std::result::Result<T, PipelineError>;
