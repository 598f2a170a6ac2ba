// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Lab document handling: decomposition, strategy, and run orchestration.

pub mod decompose;
pub mod runner;
pub mod strategy;

pub use decompose::{LabComponents, LabDecomposer};
pub use runner::{looks_like_lab_document, InstructionOutcome, LabRunner};
pub use strategy::{LabPlan, LabStrategist, StrategyOutcome};
