// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Application configuration.
//!
//! Everything the pipeline knows about the lab network — subnet, traffic
//! baselines, security posture, monitoring and scan-strategy limits — is
//! loaded once at startup into an immutable `AppConfig` and passed by
//! reference into the components that need it. No ambient globals.

use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub network: NetworkConfig,

    #[serde(default)]
    pub baselines: TrafficBaselines,

    #[serde(default)]
    pub ports: CommonPorts,

    #[serde(default)]
    pub security: SecurityStatus,

    #[serde(default)]
    pub monitoring: MonitoringConfig,

    #[serde(default)]
    pub rate_limits: RateLimits,

    #[validate(nested)]
    #[serde(default)]
    pub scan_strategy: ScanStrategyConfig,

    #[serde(default)]
    pub llm: LlmConfig,

    #[serde(default)]
    pub executor: ExecutorConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkConfig {
    pub subnet: String,
    pub gateway: String,
    pub interface: String,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            subnet: "192.168.1.0/24".to_string(),
            gateway: "192.168.1.1".to_string(),
            interface: "eth0".to_string(),
        }
    }
}

/// Observed idle traffic rates on the lab network, packets per second.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrafficBaselines {
    pub rx_pps: u32,
    pub tx_pps: u32,
}

impl Default for TrafficBaselines {
    fn default() -> Self {
        Self { rx_pps: 50, tx_pps: 30 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommonPorts {
    pub tcp: Vec<u16>,
    pub udp: Vec<u16>,
}

impl Default for CommonPorts {
    fn default() -> Self {
        Self {
            tcp: vec![21, 22, 23, 25, 53, 80, 443, 3389, 8080],
            udp: vec![53, 67, 68, 123, 161],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityStatus {
    pub ids_present: bool,
    pub waf_present: bool,
    /// Default policy of the lab firewall, e.g. "ACCEPT" or "DROP".
    pub firewall_policy: String,
}

impl Default for SecurityStatus {
    fn default() -> Self {
        Self {
            ids_present: false,
            waf_present: false,
            firewall_policy: "ACCEPT".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct MonitoringConfig {
    pub active_monitoring: bool,
    pub scheduled_monitoring: bool,
    #[serde(default)]
    pub available_tools: Vec<String>,
}

/// Known rate limits on the lab network, requests/queries per second.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimits {
    pub api: u32,
    pub dns: u32,
    pub scan: u32,
}

impl Default for RateLimits {
    fn default() -> Self {
        Self { api: 100, dns: 50, scan: 100 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ScanStrategyConfig {
    /// Hard ceiling on packets per second before posture clamping.
    #[validate(range(min = 1))]
    pub max_scan_rate: u32,

    /// Extra seconds added between packets on top of 1/rate.
    pub recommended_interval: f64,

    pub stealth_required: bool,

    /// Time window in which scanning is considered safe ("any" disables
    /// the window check entirely).
    pub safe_scan_window: String,
}

impl Default for ScanStrategyConfig {
    fn default() -> Self {
        Self {
            max_scan_rate: 100,
            recommended_interval: 0.5,
            stealth_required: false,
            safe_scan_window: "any".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// "openai" or "ollama".
    pub provider: String,
    pub model: Option<String>,
    /// Falls back to the provider's conventional env var when absent.
    pub api_key: Option<String>,
    /// Override for self-hosted or mock endpoints.
    pub base_url: Option<String>,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: "openai".to_string(),
            model: None,
            api_key: None,
            base_url: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutorConfig {
    pub shell: String,
    pub timeout_secs: u64,
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            shell: "sh".to_string(),
            timeout_secs: 300,
        }
    }
}
