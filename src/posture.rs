// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Network-defense posture and scan-strategy optimization.
//!
//! `PostureModel` is an immutable snapshot of what we know about the lab
//! network's defenses, built once from config and shared by reference for
//! the whole run. The optimizer methods are pure functions of the model:
//! no I/O, no mutation, no surprises.

use serde::{Deserialize, Serialize};

use crate::config::AppConfig;

/// Snapshot of inferred network/defense facts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostureModel {
    pub ids_present: bool,
    pub waf_present: bool,
    pub firewall_policy: String,
    pub active_monitoring: bool,
    pub stealth_required: bool,
    pub max_scan_rate: u32,
    pub recommended_interval: f64,
    pub safe_scan_window: String,
    pub tcp_ports: Vec<u16>,
    pub udp_ports: Vec<u16>,
    pub gateway: String,
}

/// Per-command execution plan derived from the posture. Recomputed for
/// every command, never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct ExecutionStrategy {
    pub command: String,
    pub delay_secs: f64,
    pub split_scan: bool,
    pub safe_to_scan: bool,
}

impl PostureModel {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            ids_present: config.security.ids_present,
            waf_present: config.security.waf_present,
            firewall_policy: config.security.firewall_policy.clone(),
            active_monitoring: config.monitoring.active_monitoring,
            stealth_required: config.scan_strategy.stealth_required,
            max_scan_rate: config.scan_strategy.max_scan_rate,
            recommended_interval: config.scan_strategy.recommended_interval,
            safe_scan_window: config.scan_strategy.safe_scan_window.clone(),
            tcp_ports: config.ports.tcp.clone(),
            udp_ports: config.ports.udp.clone(),
            gateway: config.network.gateway.clone(),
        }
    }

    /// Packets per second we are willing to send for this scan type.
    ///
    /// Clamped to 10 when an IDS is watching and to 5 when stealth is
    /// required, then scaled by scan noisiness: SYN scans run at the
    /// clamped rate, connect scans at half, UDP at a third (floor 1).
    pub fn optimal_scan_rate(&self, scan_type: &str) -> u32 {
        let mut rate = self.max_scan_rate;

        if self.ids_present {
            rate = rate.min(10);
        }
        if self.stealth_required {
            rate = rate.min(5);
        }

        match scan_type {
            "syn" => rate,
            "connect" => (rate / 2).max(1),
            "udp" => (rate / 3).max(1),
            _ => rate,
        }
    }

    /// Seconds to wait between packets: 1/rate plus the configured
    /// interval. Monotonic — a lower allowed rate means a larger delay.
    pub fn scan_delay(&self, scan_type: &str) -> f64 {
        let rate = self.optimal_scan_rate(scan_type);
        let delay = if rate > 0 { 1.0 / rate as f64 } else { 1.0 };
        delay + self.recommended_interval
    }

    /// Port list worth scanning for the protocol family.
    pub fn optimal_ports(&self, scan_type: &str) -> &[u16] {
        match scan_type {
            "tcp" => &self.tcp_ports,
            "udp" => &self.udp_ports,
            _ => &[],
        }
    }

    /// Permissive OR-of-conditions policy: any single "safe" signal
    /// overrides all risk signals. Not a weighted risk score.
    pub fn is_safe_to_scan(&self) -> bool {
        if !self.ids_present && !self.waf_present && !self.active_monitoring {
            return true;
        }
        if self.firewall_policy == "ACCEPT" {
            return true;
        }
        if self.safe_scan_window == "any" {
            return true;
        }
        false
    }

    /// Mutate a command for the current posture.
    ///
    /// Unsafe posture: nmap commands gain a slower timing template,
    /// fragmentation and a gateway decoy; masscan commands get their rate
    /// argument rewritten down. Safe posture with no IDS: the inverse —
    /// faster timing, or a rate raised toward 10k. Each directive is only
    /// appended when absent, so re-applying is a no-op. Commands matching
    /// neither tool family pass through untouched.
    pub fn optimize_command(&self, command: &str, command_type: &str) -> String {
        let mut command = command.to_string();

        if !self.is_safe_to_scan() {
            if command.contains("nmap") {
                if !command.contains("-T") {
                    command.push_str(" -T2");
                }
                if !command.contains("-f") {
                    command.push_str(" -f");
                }
                if !command.contains("-D") {
                    command.push_str(&format!(" -D {}", self.gateway));
                }
            } else if command.contains("masscan") {
                let rate = self.optimal_scan_rate(command_type);
                command = command.replace("--rate=1000", &format!("--rate={}", rate));
            }
        } else if !self.ids_present {
            if command.contains("nmap") {
                if !command.contains("-T") {
                    command.push_str(" -T4");
                }
            } else if command.contains("masscan") {
                let rate = self.max_scan_rate.min(10_000);
                command = command.replace("--rate=1000", &format!("--rate={}", rate));
            }
        }

        command
    }

    /// Compose mutation, delay and split decision for one command.
    pub fn execution_strategy(&self, command: &str, command_type: &str) -> ExecutionStrategy {
        ExecutionStrategy {
            command: self.optimize_command(command, command_type),
            delay_secs: self.scan_delay(command_type),
            split_scan: self.ids_present || self.stealth_required,
            safe_to_scan: self.is_safe_to_scan(),
        }
    }
}
