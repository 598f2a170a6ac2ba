// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

pub mod catalog;
pub mod resolver;

pub use catalog::{CommandTemplate, COMMAND_TEMPLATES, DEFAULT_PARAMS};
pub use resolver::{CommandPlanner, ResolvedCommand};
