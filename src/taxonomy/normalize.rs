//! Maps raw rule findings onto the KWCAG checklist
//!
//! The reverse index (rule ID → checklist item) is built once and cached;
//! rules absent from the table fall into the `기타` bucket so no finding is
//! ever dropped.

use std::collections::HashMap;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::rules::{Impact, RawViolation, ViolationNode};
use crate::taxonomy::items::{KwcagItem, Principle, KWCAG_ITEMS, UNMAPPED_ID, UNMAPPED_NAME};

/// A raw finding annotated with its KWCAG classification
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KwcagViolation {
    #[serde(rename = "kwcagId")]
    pub kwcag_id: String,
    #[serde(rename = "kwcagName")]
    pub kwcag_name: String,
    pub principle: Principle,
    #[serde(rename = "ruleId")]
    pub rule_id: String,
    pub description: String,
    pub impact: Impact,
    pub help: String,
    #[serde(rename = "helpUrl")]
    pub help_url: String,
    pub nodes: Vec<ViolationNode>,
}

fn rule_index() -> &'static HashMap<&'static str, &'static KwcagItem> {
    static INDEX: OnceLock<HashMap<&'static str, &'static KwcagItem>> = OnceLock::new();
    INDEX.get_or_init(|| {
        let mut index = HashMap::new();
        for item in KWCAG_ITEMS {
            for rule in item.rules {
                index.insert(*rule, item);
            }
        }
        index
    })
}

/// Looks up the checklist item that subsumes `rule_id`, if any
pub fn item_for_rule(rule_id: &str) -> Option<&'static KwcagItem> {
    rule_index().get(rule_id).copied()
}

/// Classifies raw findings under KWCAG items
///
/// # Arguments
/// * `raw` - findings as produced by the rule sources
///
/// # Returns
/// One `KwcagViolation` per input finding, in input order. A missing
/// impact defaults to `minor`.
pub fn normalize_violations(raw: Vec<RawViolation>) -> Vec<KwcagViolation> {
    raw.into_iter()
        .map(|violation| {
            let impact = violation.impact.unwrap_or_default();
            match item_for_rule(&violation.id) {
                Some(item) => KwcagViolation {
                    kwcag_id: item.id.to_string(),
                    kwcag_name: item.check_item.to_string(),
                    principle: item.principle,
                    rule_id: violation.id,
                    description: violation.description,
                    impact,
                    help: violation.help,
                    help_url: violation.help_url,
                    nodes: violation.nodes,
                },
                None => {
                    debug!(rule = %violation.id, "rule not in KWCAG table, bucketing as 기타");
                    KwcagViolation {
                        kwcag_id: UNMAPPED_ID.to_string(),
                        kwcag_name: UNMAPPED_NAME.to_string(),
                        principle: Principle::Other,
                        rule_id: violation.id,
                        description: violation.description,
                        impact,
                        help: violation.help,
                        help_url: violation.help_url,
                        nodes: violation.nodes,
                    }
                }
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(id: &str, impact: Option<Impact>) -> RawViolation {
        RawViolation {
            id: id.to_string(),
            impact,
            description: "desc".to_string(),
            help: "help".to_string(),
            help_url: "https://example.com".to_string(),
            nodes: vec![],
        }
    }

    #[test]
    fn maps_known_rule_to_item() {
        let out = normalize_violations(vec![raw("image-alt", Some(Impact::Critical))]);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].kwcag_id, "1.1.1");
        assert_eq!(out[0].principle, Principle::Perceivable);
        assert_eq!(out[0].impact, Impact::Critical);
    }

    #[test]
    fn custom_rules_map_to_aria_item() {
        let out = normalize_violations(vec![raw("custom-aria-tab-missing-selected", None)]);
        assert_eq!(out[0].kwcag_id, "4.1.2");
        assert_eq!(out[0].principle, Principle::Robust);
    }

    #[test]
    fn unknown_rule_falls_back_to_other() {
        let out = normalize_violations(vec![raw("empty-heading", None)]);
        assert_eq!(out[0].kwcag_id, UNMAPPED_ID);
        assert_eq!(out[0].kwcag_name, UNMAPPED_NAME);
        assert_eq!(out[0].principle, Principle::Other);
    }

    #[test]
    fn missing_impact_defaults_to_minor() {
        let out = normalize_violations(vec![raw("label", None)]);
        assert_eq!(out[0].impact, Impact::Minor);
    }

    #[test]
    fn rule_ids_are_unique_across_table() {
        let mut seen = std::collections::HashSet::new();
        for item in KWCAG_ITEMS {
            for rule in item.rules {
                assert!(seen.insert(*rule), "duplicate rule mapping: {rule}");
            }
        }
    }

    #[test]
    fn table_has_thirty_three_items() {
        assert_eq!(KWCAG_ITEMS.len(), 33);
    }
}
