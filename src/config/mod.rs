// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

pub mod core;
pub mod loader;

pub use core::{
    AppConfig, CommonPorts, ExecutorConfig, LlmConfig, MonitoringConfig, NetworkConfig,
    RateLimits, ScanStrategyConfig, SecurityStatus, TrafficBaselines,
};
pub use loader::{load_or_default, ConfigFormat, ConfigLoader};
