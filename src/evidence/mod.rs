// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Evidence collection from raw tool output.
//!
//! Line-oriented, best-effort parsers for the three output families the
//! catalog produces: tshark DNS capture, tshark HTTP capture, and nmap
//! port-scan reports. Lines that fail a family's token precondition are
//! skipped and counted, never fatal — lab tool output is irregular and a
//! half-parseable capture is still evidence.

pub mod analysis;

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DnsQueryRecord {
    pub query: String,
    pub source: String,
    pub timestamp: DateTime<Local>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpRequestRecord {
    pub source: String,
    pub host: String,
    pub uri: String,
    pub timestamp: DateTime<Local>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrafficRecord {
    pub source: String,
    pub destination: String,
    pub protocol: String,
    pub info: String,
    pub timestamp: DateTime<Local>,
}

/// Append-only store for one lab run. Populated during execution, read
/// during analysis and report generation; the two phases never overlap.
#[derive(Debug, Default, Serialize)]
pub struct EvidenceStore {
    pub dns_queries: Vec<DnsQueryRecord>,
    pub http_requests: Vec<HttpRequestRecord>,
    pub network_traffic: Vec<TrafficRecord>,
    /// Populated by the analysis stage; empty until then.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub findings: Option<serde_json::Value>,
    /// Lines dropped by the parsers for failing a family's token
    /// precondition. Exposed so silent loss is at least visible.
    pub dropped_lines: u64,
}

impl EvidenceStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.dns_queries.is_empty()
            && self.http_requests.is_empty()
            && self.network_traffic.is_empty()
    }

    pub fn record_count(&self) -> usize {
        self.dns_queries.len() + self.http_requests.len() + self.network_traffic.len()
    }

    pub fn add_dns_query(&mut self, query: &str, source: &str) {
        self.dns_queries.push(DnsQueryRecord {
            query: query.to_string(),
            source: source.to_string(),
            timestamp: Local::now(),
        });
    }

    pub fn add_http_request(&mut self, source: &str, host: &str, uri: &str) {
        self.http_requests.push(HttpRequestRecord {
            source: source.to_string(),
            host: host.to_string(),
            uri: uri.to_string(),
            timestamp: Local::now(),
        });
    }

    pub fn add_network_traffic(&mut self, source: &str, destination: &str, protocol: &str, info: &str) {
        self.network_traffic.push(TrafficRecord {
            source: source.to_string(),
            destination: destination.to_string(),
            protocol: protocol.to_string(),
            info: info.to_string(),
            timestamp: Local::now(),
        });
    }

    /// Parse raw tool output into evidence records.
    ///
    /// Dispatch is on the command type AND a substring of the command
    /// string — defense against a mismatched type/command pair producing
    /// nonsense records.
    pub fn ingest(&mut self, command_type: &str, command: &str, output: &str) {
        let before = self.record_count();

        if command_type == "dns_analysis" && command.contains("dns") {
            self.ingest_dns(output);
        } else if command_type == "http_traffic"
            && (command.contains("http") || command.contains("https"))
        {
            self.ingest_http(output);
        } else if command.contains("nmap") {
            self.ingest_nmap(output);
        }

        debug!(
            command_type,
            new_records = self.record_count() - before,
            dropped = self.dropped_lines,
            "Evidence ingest complete"
        );
    }

    /// tshark DNS field output: `<query> <source-ip>` per line.
    fn ingest_dns(&mut self, output: &str) {
        for line in output.lines() {
            let parts: Vec<&str> = line.split_whitespace().collect();
            if parts.len() >= 2 {
                self.add_dns_query(parts[0], parts[1]);
            } else if !line.trim().is_empty() {
                self.dropped_lines += 1;
            }
        }
    }

    /// tshark HTTP field output: `<source-ip> <host> <uri>` per line.
    fn ingest_http(&mut self, output: &str) {
        for line in output.lines() {
            let parts: Vec<&str> = line.split_whitespace().collect();
            if parts.len() >= 3 {
                self.add_http_request(parts[0], parts[1], parts[2]);
            } else if !line.trim().is_empty() {
                self.dropped_lines += 1;
            }
        }
    }

    /// nmap report output. A "scan report for" line moves the current-host
    /// cursor; open-tcp port lines under it become traffic records. Lines
    /// before any host marker are ignored.
    fn ingest_nmap(&mut self, output: &str) {
        let mut current_host: Option<String> = None;

        for line in output.lines() {
            if line.contains("scan report for") {
                if let Some((_, host)) = line.split_once("for") {
                    current_host = Some(host.trim().to_string());
                }
                continue;
            }

            let Some(host) = current_host.as_deref() else {
                continue;
            };

            if line.contains("open") && line.contains("tcp") {
                let parts: Vec<&str> = line.split_whitespace().collect();
                if parts.len() >= 3 {
                    if let Some((port, protocol)) = parts[0].split_once('/') {
                        let state = parts[1];
                        let service = parts[2];
                        let info = format!("Port {} is {}, running {}", port, state, service);
                        let host = host.to_string();
                        self.add_network_traffic("scanner", &host, protocol, &info);
                    } else {
                        self.dropped_lines += 1;
                    }
                } else {
                    self.dropped_lines += 1;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dns_lines_become_query_records() {
        let mut store = EvidenceStore::new();
        store.ingest(
            "dns_analysis",
            "tshark -i eth0 -Y 'dns' -T fields -e dns.qry.name -e ip.src ",
            "google.com 192.168.1.100\nexample.com 192.168.1.101",
        );

        assert_eq!(store.dns_queries.len(), 2);
        assert_eq!(store.dns_queries[0].query, "google.com");
        assert_eq!(store.dns_queries[0].source, "192.168.1.100");
        assert_eq!(store.dns_queries[1].query, "example.com");
        assert_eq!(store.dns_queries[1].source, "192.168.1.101");
        assert_eq!(store.dropped_lines, 0);
    }

    #[test]
    fn short_dns_lines_are_dropped_and_counted() {
        let mut store = EvidenceStore::new();
        store.ingest(
            "dns_analysis",
            "tshark -Y 'dns'",
            "google.com 192.168.1.100\nlonesome-token\n\n",
        );

        assert_eq!(store.dns_queries.len(), 1);
        assert_eq!(store.dropped_lines, 1);
    }

    #[test]
    fn mismatched_type_and_command_is_ignored() {
        let mut store = EvidenceStore::new();
        // dns_analysis type but the command has no "dns" in it
        store.ingest("dns_analysis", "tshark -Y 'arp'", "google.com 192.168.1.100");
        assert!(store.is_empty());
    }

    #[test]
    fn http_lines_become_request_records() {
        let mut store = EvidenceStore::new();
        store.ingest(
            "http_traffic",
            "tshark -Y 'http || https' -T fields",
            "192.168.1.50 example.com /index.html\n192.168.1.51 test.org /login",
        );

        assert_eq!(store.http_requests.len(), 2);
        assert_eq!(store.http_requests[0].source, "192.168.1.50");
        assert_eq!(store.http_requests[0].host, "example.com");
        assert_eq!(store.http_requests[1].uri, "/login");
    }

    #[test]
    fn nmap_report_tracks_host_cursor() {
        let output = "\
Starting Nmap 7.94\n\
Nmap scan report for 192.168.1.105\n\
Host is up (0.0010s latency).\n\
22/tcp  open  ssh\n\
80/tcp  open  http\n\
Nmap scan report for 192.168.1.106\n\
443/tcp open  https\n";

        let mut store = EvidenceStore::new();
        store.ingest("tcp_syn_scan", "nmap -sS -v 192.168.1.0/24", output);

        assert_eq!(store.network_traffic.len(), 3);
        assert_eq!(store.network_traffic[0].destination, "192.168.1.105");
        assert_eq!(store.network_traffic[0].protocol, "tcp");
        assert_eq!(
            store.network_traffic[0].info,
            "Port 22 is open, running ssh"
        );
        assert_eq!(store.network_traffic[2].destination, "192.168.1.106");
        assert_eq!(store.network_traffic[2].info, "Port 443 is open, running https");
    }

    #[test]
    fn port_lines_before_any_host_marker_are_ignored() {
        let mut store = EvidenceStore::new();
        store.ingest("tcp_syn_scan", "nmap -sS 10.0.0.1", "22/tcp open ssh\n");
        assert!(store.network_traffic.is_empty());
    }

    #[test]
    fn malformed_port_tokens_are_dropped() {
        let output = "\
Nmap scan report for 10.0.0.1\n\
22 open tcp-ish\n\
80/tcp open\n";

        let mut store = EvidenceStore::new();
        store.ingest("tcp_syn_scan", "nmap -sS 10.0.0.1", output);

        // First line has no port/proto pair; second fails the 3-token rule.
        assert!(store.network_traffic.is_empty());
        assert_eq!(store.dropped_lines, 2);
    }
}
