// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Command template catalog.
//!
//! Pure data: a fixed mapping from command-type identifier to a
//! parameterized command line, plus the default value table. Template text
//! is bit-exact against the tool CLIs it drives (tshark, nmap, arp-scan,
//! hping3, masscan, nc) — do not reformat.
//!
//! Declaration order matters: fuzzy command-type resolution is
//! first-match-wins over this order (see `resolver`).

use once_cell::sync::Lazy;
use regex::Regex;

#[derive(Debug, Clone, Copy)]
pub struct CommandTemplate {
    pub name: &'static str,
    pub template: &'static str,
}

pub const COMMAND_TEMPLATES: &[CommandTemplate] = &[
    // Network reconnaissance
    CommandTemplate {
        name: "dns_analysis",
        template: "tshark -i {interface} -Y 'dns' -T fields -e dns.qry.name -e ip.src {additional_filters}",
    },
    CommandTemplate {
        name: "http_traffic",
        template: "tshark -i {interface} -Y 'http || https' -T fields -e ip.src -e http.host -e http.request.uri {additional_filters}",
    },
    // Port scanning
    CommandTemplate {
        name: "tcp_syn_scan",
        template: "nmap -sS {verbosity} {target}",
    },
    CommandTemplate {
        name: "tcp_connect_scan",
        template: "nmap -sT {verbosity} {target}",
    },
    CommandTemplate {
        name: "udp_scan",
        template: "nmap -sU {verbosity} {top_ports} {target}",
    },
    CommandTemplate {
        name: "service_scan",
        template: "nmap -sV {verbosity} {additional_flags} {target}",
    },
    CommandTemplate {
        name: "os_detection",
        template: "nmap -O {verbosity} {target}",
    },
    CommandTemplate {
        name: "all_ports_scan",
        template: "nmap -p- {verbosity} {target}",
    },
    CommandTemplate {
        name: "aggressive_scan",
        template: "nmap -A {verbosity} {target}",
    },
    // Custom port scanning
    CommandTemplate {
        name: "custom_port_scan",
        template: "nmap -p {port_list} {verbosity} {target}",
    },
    CommandTemplate {
        name: "non_standard_ports",
        template: "nmap -p {port_list} {verbosity} {target}",
    },
    // Host discovery
    CommandTemplate {
        name: "ping_sweep",
        template: "nmap -sn {target}",
    },
    CommandTemplate {
        name: "arp_scan",
        template: "arp-scan {target_network}",
    },
    // Specific tools
    CommandTemplate {
        name: "hping3_scan",
        template: "hping3 -S -p {initial_port} --scan {port_range} {target}",
    },
    CommandTemplate {
        name: "masscan_quick",
        template: "masscan -p {port_range} {target} --rate={rate}",
    },
    CommandTemplate {
        name: "netcat_scan",
        template: "nc -zv {target} {port_range}",
    },
];

/// Fallback values for any placeholder the context does not pin down.
pub const DEFAULT_PARAMS: &[(&str, &str)] = &[
    ("interface", "eth0"),
    ("verbosity", "-v"),
    ("target", "192.168.1.0/24"),
    ("top_ports", "--top-ports 20"),
    ("additional_flags", ""),
    ("additional_filters", ""),
    ("port_list", "21,22,23,25,80,443,3389"),
    ("port_range", "1-1000"),
    ("initial_port", "80"),
    ("target_network", "--localnet"),
    ("rate", "1000"),
];

static PLACEHOLDER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{([a-z_]+)\}").expect("placeholder regex"));

/// Exact-name lookup.
pub fn template_for(name: &str) -> Option<&'static CommandTemplate> {
    COMMAND_TEMPLATES.iter().find(|t| t.name == name)
}

/// Catalog identifiers in declaration order.
pub fn known_types() -> Vec<&'static str> {
    COMMAND_TEMPLATES.iter().map(|t| t.name).collect()
}

/// Enumerate the placeholder names a template references, in order of
/// appearance. Duplicates are kept; substitution treats them uniformly.
pub fn placeholders(template: &str) -> Vec<&str> {
    PLACEHOLDER_RE
        .captures_iter(template)
        .map(|c| c.get(1).expect("capture group").as_str())
        .collect()
}

pub fn default_for(name: &str) -> Option<&'static str> {
    DEFAULT_PARAMS
        .iter()
        .find(|(k, _)| *k == name)
        .map(|(_, v)| *v)
}
