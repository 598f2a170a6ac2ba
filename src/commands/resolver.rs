// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Command-type selection and template resolution.
//!
//! Selection delegates the choice to the completion service, then validates
//! the reply against the catalog: cleaned exact match first, then a
//! case-insensitive substring fuzzy match in catalog order.
//!
//! Resolution enumerates every placeholder in the chosen template up front
//! and fills each from a layered lookup — context-derived parameters, then
//! the default table, then hard failure. Missing values are detected before
//! substitution, not via a substitution error afterwards.

use std::collections::HashMap;

use serde_json::Value;
use tracing::{debug, warn};

use super::catalog::{self, CommandTemplate};
use crate::ai::context::ContextRecord;
use crate::ai::extract::{extract_json, Extraction};
use crate::ai::prompts;
use crate::ai::provider::CompletionProvider;
use crate::errors::{PipelineError, PipelineResult};

/// A fully substituted command, ready for posture optimization.
///
/// Invariant: `command` contains no unresolved `{placeholder}`.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedCommand {
    pub command_type: String,
    pub command: String,
    pub params: HashMap<String, String>,
}

/// Normalize a completion-service reply into a catalog identifier shape:
/// quotes stripped, trimmed, lowercased, `-` folded to `_`.
fn clean_reply(raw: &str) -> String {
    raw.replace(['\'', '"'], "")
        .trim()
        .to_lowercase()
        .replace('-', "_")
}

/// Match a raw reply against the catalog. Exact match first, then
/// first-match-wins substring search in catalog declaration order.
pub fn match_command_type(raw: &str) -> Option<&'static str> {
    let cleaned = clean_reply(raw);
    if cleaned.is_empty() {
        return None;
    }

    if let Some(t) = catalog::template_for(&cleaned) {
        return Some(t.name);
    }

    for t in catalog::COMMAND_TEMPLATES {
        if t.name.to_lowercase().contains(&cleaned) {
            warn!(
                "Command type {:?} not in catalog; using similar type {:?}",
                raw, t.name
            );
            return Some(t.name);
        }
    }

    None
}

/// Turn a JSON parameter value into the string that lands in the command
/// line. Arrays are comma-joined; null is treated as absent.
fn stringify_param(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Array(items) => Some(
            items
                .iter()
                .filter_map(stringify_param)
                .collect::<Vec<_>>()
                .join(","),
        ),
        Value::Null => None,
        Value::Object(_) => None,
    }
}

/// Substitute every placeholder in `template` from `params`, failing on the
/// first name that has no value. The merged map must already include
/// defaults; this function performs no lookup layering of its own.
pub fn fill_template(
    template: &CommandTemplate,
    params: &HashMap<String, String>,
) -> PipelineResult<String> {
    for name in catalog::placeholders(template.template) {
        if !params.contains_key(name) {
            return Err(PipelineError::UnresolvedPlaceholder {
                command_type: template.name.to_string(),
                placeholder: name.to_string(),
            });
        }
    }

    let mut command = template.template.to_string();
    for name in catalog::placeholders(template.template) {
        command = command.replace(&format!("{{{}}}", name), &params[name]);
    }
    Ok(command)
}

/// Merge context-derived parameters over the default table. Every default
/// entry missing from `params` is inserted.
pub fn merge_defaults(mut params: HashMap<String, String>) -> HashMap<String, String> {
    for (key, value) in catalog::DEFAULT_PARAMS {
        params
            .entry((*key).to_string())
            .or_insert_with(|| (*value).to_string());
    }
    params
}

pub struct CommandPlanner<'a> {
    provider: &'a dyn CompletionProvider,
}

impl<'a> CommandPlanner<'a> {
    pub fn new(provider: &'a dyn CompletionProvider) -> Self {
        Self { provider }
    }

    /// Ask the completion service which catalog entry fits the instruction,
    /// then validate its answer. `None` means "could not determine command
    /// type" and aborts the current instruction upstream.
    pub async fn select_command_type(
        &self,
        instruction: &str,
        context: &ContextRecord,
    ) -> PipelineResult<Option<&'static str>> {
        let system = prompts::command_selection(&catalog::known_types());
        let user = format!(
            "Instruction: {}\nContext: {}",
            instruction,
            serde_json::to_string(context).unwrap_or_default()
        );

        let reply = self.provider.complete(&system, &user).await?;
        debug!(reply = %reply, "Command type selection reply");
        Ok(match_command_type(&reply))
    }

    /// Resolve `command_type` into a concrete command string.
    pub async fn resolve(
        &self,
        command_type: &str,
        context: &ContextRecord,
    ) -> PipelineResult<ResolvedCommand> {
        let template = catalog::template_for(command_type)
            .ok_or_else(|| PipelineError::UnknownCommandType(command_type.to_string()))?;

        let system = prompts::command_customization(template.template, catalog::DEFAULT_PARAMS);
        let user = format!(
            "Context: {}",
            serde_json::to_string(context).unwrap_or_default()
        );

        let reply = self.provider.complete(&system, &user).await?;

        let context_params: HashMap<String, String> = match extract_json(&reply) {
            Extraction::Parsed(Value::Object(map)) => map
                .iter()
                .filter_map(|(k, v)| stringify_param(v).map(|s| (k.clone(), s)))
                .collect(),
            Extraction::Parsed(_) | Extraction::Malformed(_) => {
                warn!("Parameter extraction failed; falling back to defaults only");
                HashMap::new()
            }
        };

        let params = merge_defaults(context_params);
        let command = fill_template(template, &params)?;
        debug!(%command, "Resolved command");

        Ok(ResolvedCommand {
            command_type: template.name.to_string(),
            command,
            params,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::catalog::template_for;

    #[test]
    fn exact_match_survives_quote_noise() {
        assert_eq!(match_command_type("'tcp_syn_scan'"), Some("tcp_syn_scan"));
        assert_eq!(match_command_type("\"ping_sweep\"\n"), Some("ping_sweep"));
    }

    #[test]
    fn fuzzy_match_survives_case_and_punctuation_noise() {
        assert_eq!(match_command_type("Tcp-Syn-Scan"), Some("tcp_syn_scan"));
        assert_eq!(match_command_type("SYN_SCAN"), Some("tcp_syn_scan"));
        assert_eq!(match_command_type("masscan"), Some("masscan_quick"));
    }

    #[test]
    fn unmatched_reply_yields_none() {
        assert_eq!(match_command_type("metasploit_module"), None);
        assert_eq!(match_command_type(""), None);
        assert_eq!(match_command_type("\"\""), None);
    }

    #[test]
    fn substring_match_is_first_match_wins_in_catalog_order() {
        // "scan" is a substring of many identifiers; the first catalog
        // entry containing it wins deterministically.
        assert_eq!(match_command_type("scan"), Some("tcp_syn_scan"));
    }

    #[test]
    fn defaults_cover_an_empty_parameter_map() {
        let template = template_for("tcp_syn_scan").unwrap();
        let params = merge_defaults(HashMap::new());
        let command = fill_template(template, &params).unwrap();
        assert_eq!(command, "nmap -sS -v 192.168.1.0/24");
        assert!(!command.contains('{'));
    }

    #[test]
    fn context_params_override_defaults() {
        let template = template_for("custom_port_scan").unwrap();
        let mut context_params = HashMap::new();
        context_params.insert("target".to_string(), "192.168.1.100".to_string());
        context_params.insert("port_list".to_string(), "8080,8443".to_string());

        let params = merge_defaults(context_params);
        let command = fill_template(template, &params).unwrap();
        assert_eq!(command, "nmap -p 8080,8443 -v 192.168.1.100");
    }

    #[test]
    fn missing_placeholder_is_a_hard_failure() {
        let template = CommandTemplate {
            name: "bogus",
            template: "tool --flag {nonexistent_param} {target}",
        };
        let params = merge_defaults(HashMap::new());
        let err = fill_template(&template, &params).unwrap_err();
        match err {
            PipelineError::UnresolvedPlaceholder {
                command_type,
                placeholder,
            } => {
                assert_eq!(command_type, "bogus");
                assert_eq!(placeholder, "nonexistent_param");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn every_catalog_entry_resolves_with_defaults_alone() {
        let params = merge_defaults(HashMap::new());
        for t in catalog::COMMAND_TEMPLATES {
            let command = fill_template(t, &params).unwrap();
            assert!(
                !command.contains('{') && !command.contains('}'),
                "{} left placeholders: {}",
                t.name,
                command
            );
        }
    }

    #[test]
    fn stringify_handles_model_value_shapes() {
        use serde_json::json;
        assert_eq!(stringify_param(&json!("80")), Some("80".to_string()));
        assert_eq!(stringify_param(&json!(443)), Some("443".to_string()));
        assert_eq!(
            stringify_param(&json!(["21", "22", 23])),
            Some("21,22,23".to_string())
        );
        assert_eq!(stringify_param(&json!(null)), None);
    }
}
