// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Lab-document decomposition.
//!
//! Primary path: the completion service returns the components as JSON.
//! Fallback path: independent pattern extractions over the raw document,
//! used whenever the service reply carries no parseable object. Each
//! extraction stands alone — a miss on one field never disturbs another.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::ai::extract::{extract_json, Extraction};
use crate::ai::prompts;
use crate::ai::provider::CompletionProvider;

/// Decomposed lab document. Produced once per document, read-only after.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabComponents {
    pub title: String,
    pub objective: String,
    pub tasks: Vec<String>,
    pub target: String,
    pub approach: String,
    pub deliverables: Vec<String>,
}

static TITLE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"#\s*([^\n]+)").expect("title regex"));

static OBJECTIVE_RES: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)objective[^\n.]*\bis to\s+([^\n]+)",
        r"(?i)your task[^\n.]*\bis to\s+([^\n]+)",
        r"(?i)goal[^\n.]*\bis to\s+([^\n]+)",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("objective regex"))
    .collect()
});

static BULLET_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[-*•]\s*([^\n]+)").expect("bullet regex"));

static IPV4_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(?:\d{1,3}\.){3}\d{1,3}(?:/\d{1,2})?\b").expect("ipv4 regex")
});

/// Words that mark an adjacent IPv4 literal as the intended target.
const TARGET_INDICATORS: &[&str] = &["target", "host", "machine", "server", "computer"];

static INDICATOR_RES: Lazy<Vec<Regex>> = Lazy::new(|| {
    TARGET_INDICATORS
        .iter()
        .map(|ind| {
            Regex::new(&format!(r"(?i){}[:\s]+((?:\d{{1,3}}\.){{3}}\d{{1,3}})", ind))
                .expect("indicator regex")
        })
        .collect()
});

static TARGET_PHRASE_RES: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)identify\s+([^\n.,]+)",
        r"(?i)find\s+([^\n.,]+)",
        r"(?i)determine\s+([^\n.,]+)",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("target phrase regex"))
    .collect()
});

static DELIVERABLE_MARKER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)report|submit|deliverable").expect("deliverable regex"));

pub struct LabDecomposer<'a> {
    provider: &'a dyn CompletionProvider,
}

impl<'a> LabDecomposer<'a> {
    pub fn new(provider: &'a dyn CompletionProvider) -> Self {
        Self { provider }
    }

    /// Decompose a full lab document. Never fails: any breakdown on the
    /// completion path falls through to the pattern extractors.
    pub async fn decompose(&self, text: &str) -> LabComponents {
        let user = format!("Lab Instructions:\n\n{}", text);

        match self.provider.complete(prompts::LAB_DECOMPOSITION, &user).await {
            Ok(reply) => match extract_json(&reply) {
                Extraction::Parsed(value) => match serde_json::from_value(value) {
                    Ok(components) => {
                        debug!("Lab components extracted via completion service");
                        components
                    }
                    Err(e) => {
                        warn!("Lab component JSON had unexpected shape: {}", e);
                        fallback_extract(text)
                    }
                },
                Extraction::Malformed(_) => {
                    warn!("Lab decomposition reply was not parseable JSON; using pattern fallback");
                    fallback_extract(text)
                }
            },
            Err(e) => {
                warn!("Error parsing lab document: {:#}", e);
                fallback_extract(text)
            }
        }
    }
}

/// Pattern-based decomposition of the raw document text.
pub fn fallback_extract(text: &str) -> LabComponents {
    LabComponents {
        title: extract_title(text),
        objective: extract_objective(text),
        tasks: extract_bullets(text),
        target: extract_target(text),
        approach: extract_approach(text),
        deliverables: extract_deliverables(text),
    }
}

fn extract_title(text: &str) -> String {
    if let Some(caps) = TITLE_RE.captures(text) {
        return caps[1].trim().to_string();
    }

    // No heading marker: a short first line is probably the title.
    let first_line = text.trim().lines().next().unwrap_or("").trim();
    if !first_line.is_empty() && first_line.len() < 100 {
        first_line.to_string()
    } else {
        String::new()
    }
}

/// Cut an objective capture back to its clause: stop at the first
/// sentence break and shed a trailing period.
fn trim_clause(s: &str) -> &str {
    let s = match s.find(". ") {
        Some(idx) => &s[..idx],
        None => s.trim_end().trim_end_matches('.'),
    };
    s.trim()
}

fn extract_objective(text: &str) -> String {
    for re in OBJECTIVE_RES.iter() {
        if let Some(caps) = re.captures(text) {
            return trim_clause(caps.get(1).expect("capture").as_str()).to_string();
        }
    }
    String::new()
}

fn extract_bullets(text: &str) -> Vec<String> {
    BULLET_RE
        .captures_iter(text)
        .map(|c| c[1].trim().to_string())
        .collect()
}

fn extract_target(text: &str) -> String {
    // Tier 1: an IPv4 literal introduced by an indicator word.
    if IPV4_RE.is_match(text) {
        for re in INDICATOR_RES.iter() {
            if let Some(caps) = re.captures(text) {
                return caps[1].to_string();
            }
        }
        // Tier 2: no indicator, first IPv4 anywhere wins.
        if let Some(m) = IPV4_RE.find(text) {
            return m.as_str().to_string();
        }
    }

    // Tier 3: no IP at all — the phrase after identify/find/determine.
    for re in TARGET_PHRASE_RES.iter() {
        if let Some(caps) = re.captures(text) {
            return caps[1].trim().to_string();
        }
    }

    String::new()
}

/// "passive" outranks "active" when both appear; fixed priority order.
fn extract_approach(text: &str) -> String {
    let lower = text.to_lowercase();
    if lower.contains("passive") {
        "passive".to_string()
    } else if lower.contains("active") {
        "active".to_string()
    } else {
        String::new()
    }
}

fn extract_deliverables(text: &str) -> Vec<String> {
    let Some(m) = DELIVERABLE_MARKER_RE.find(text) else {
        return Vec::new();
    };

    // Bullets within a 500-char window after the marker.
    let start = m.start();
    let mut end = (start + 500).min(text.len());
    while !text.is_char_boundary(end) {
        end -= 1;
    }

    extract_bullets(&text[start..end])
}

#[cfg(test)]
mod tests {
    use super::*;

    const LAB_DOC: &str = "\
# Lab 2: Network Traffic Analysis\n\
\n\
Your objective in this lab is to identify the host generating unusual DNS traffic.\n\
The target host 192.168.1.105 is on the lab subnet. Use passive observation first.\n\
\n\
Tasks:\n\
- Capture DNS traffic on the lab interface\n\
- Identify the most active source address\n\
\n\
Report your findings:\n\
- Submit a list of observed DNS queries\n\
- Document the suspicious host\n";

    #[test]
    fn extracts_heading_title() {
        assert_eq!(
            extract_title(LAB_DOC),
            "Lab 2: Network Traffic Analysis"
        );
    }

    #[test]
    fn first_short_line_is_title_when_no_heading() {
        let text = "Intro to Port Scanning\n\nDo some scanning.";
        assert_eq!(extract_title(text), "Intro to Port Scanning");
    }

    #[test]
    fn extracts_objective_clause() {
        assert_eq!(
            extract_objective(LAB_DOC),
            "identify the host generating unusual DNS traffic"
        );
    }

    #[test]
    fn objective_stops_at_sentence_break() {
        let text = "The goal here is to map the subnet. Then write it up.";
        assert_eq!(extract_objective(text), "map the subnet");
    }

    #[test]
    fn indicator_prefixed_ip_beats_first_ip() {
        let text = "The gateway is 10.0.0.1. Scan the target: 10.0.0.42 tomorrow.";
        assert_eq!(extract_target(text), "10.0.0.42");
    }

    #[test]
    fn first_ip_wins_without_indicator() {
        let text = "Addresses observed: 172.16.0.9 and 172.16.0.10.";
        assert_eq!(extract_target(text), "172.16.0.9");
    }

    #[test]
    fn phrase_target_when_no_ip_present() {
        let text = "You must identify the rogue DHCP server on the network.";
        assert_eq!(extract_target(text), "the rogue DHCP server on the network");
    }

    #[test]
    fn passive_outranks_active() {
        assert_eq!(extract_approach("use active and passive methods"), "passive");
        assert_eq!(extract_approach("active scanning only"), "active");
        assert_eq!(extract_approach("observe quietly"), "");
    }

    #[test]
    fn deliverables_come_from_window_after_marker() {
        let deliverables = extract_deliverables(LAB_DOC);
        assert_eq!(
            deliverables,
            vec![
                "Submit a list of observed DNS queries",
                "Document the suspicious host",
            ]
        );
    }

    #[test]
    fn no_marker_means_no_deliverables() {
        assert!(extract_deliverables("just a plain paragraph").is_empty());
    }

    #[test]
    fn full_fallback_covers_the_document() {
        let components = fallback_extract(LAB_DOC);
        assert_eq!(components.title, "Lab 2: Network Traffic Analysis");
        assert_eq!(
            components.objective,
            "identify the host generating unusual DNS traffic"
        );
        assert_eq!(components.target, "192.168.1.105");
        assert_eq!(components.approach, "passive");
        assert!(!components.tasks.is_empty());
        assert_eq!(components.deliverables.len(), 2);
    }

    #[test]
    fn components_deserialize_with_missing_keys() {
        let json = r#"{"title": "Lab 1", "tasks": ["scan"]}"#;
        let c: LabComponents = serde_json::from_str(json).unwrap();
        assert_eq!(c.title, "Lab 1");
        assert!(c.objective.is_empty());
        assert!(c.deliverables.is_empty());
    }
}
