//! Cross-page violation deduplication
//!
//! Workers report findings as they finish; the aggregate keys each finding
//! by its content signature. First sight of a signature allocates the next
//! violation number (monotonic, gap-free), repeat sightings only bump that
//! violation's occurrence count.

use std::collections::HashMap;
use std::sync::OnceLock;

use regex::Regex;

use crate::audit::types::Violation;

/// Composite dedup key for one finding
///
/// Structured on purpose: joining the components into one string would make
/// the key ambiguous whenever a selector or snippet contains the delimiter.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) struct Signature {
    pub rule_id: String,
    pub selector: String,
    pub html: String,
}

/// Selectors that indicate a page-template element repeated across pages
fn common_ui_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)(header|footer|nav|gnb|lnb|sidebar|aside|menu|global)")
            .unwrap_or_else(|_| unreachable!("static pattern"))
    })
}

pub(crate) fn is_common_ui(selector: &str) -> bool {
    common_ui_regex().is_match(selector)
}

/// Run-wide deduplicated violation list
///
/// Shared across audit workers behind a mutex; every method is a short
/// critical section.
#[derive(Default)]
pub(crate) struct Aggregate {
    index: HashMap<Signature, usize>,
    violations: Vec<Violation>,
}

impl Aggregate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one finding
    ///
    /// `build` is only invoked on first sight of the signature and receives
    /// the allocated violation number and the common-UI flag. Returns true
    /// when a new violation record was created.
    pub fn record<F>(&mut self, signature: Signature, build: F) -> bool
    where
        F: FnOnce(u32, bool) -> Violation,
    {
        if let Some(&slot) = self.index.get(&signature) {
            let count = self.violations[slot].occurrence_count.get_or_insert(1);
            *count += 1;
            return false;
        }

        let number = self.violations.len() as u32 + 1;
        let is_common = is_common_ui(&signature.selector);
        let mut violation = build(number, is_common);
        violation.violation_number = number;
        violation.occurrence_count = Some(1);
        violation.is_common = Some(is_common);

        self.index.insert(signature, self.violations.len());
        self.violations.push(violation);
        true
    }

    pub fn len(&self) -> usize {
        self.violations.len()
    }

    pub fn into_violations(self) -> Vec<Violation> {
        self.violations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::taxonomy::Principle;

    fn signature(rule: &str, selector: &str, html: &str) -> Signature {
        Signature {
            rule_id: rule.to_string(),
            selector: selector.to_string(),
            html: html.to_string(),
        }
    }

    fn violation(page: &str) -> Violation {
        Violation {
            page_url: page.to_string(),
            page_title: "t".to_string(),
            depth1: String::new(),
            depth2: String::new(),
            depth3: String::new(),
            depth4: String::new(),
            platform: "PC".to_string(),
            inspector: "시스템".to_string(),
            inspection_date: "2026-01-01".to_string(),
            violation_number: 0,
            kwcag_id: "1.1.1".to_string(),
            kwcag_name: "적절한 대체 텍스트 제공".to_string(),
            principle: Principle::Perceivable,
            rule_id: "image-alt".to_string(),
            description: String::new(),
            impact: "critical".to_string(),
            affected_code: "<img>".to_string(),
            help: String::new(),
            help_url: String::new(),
            selector: Some("#logo".to_string()),
            occurrence_count: None,
            is_common: None,
            screenshot_path: None,
            bounding_box: None,
        }
    }

    #[test]
    fn test_first_sight_allocates_number() {
        let mut agg = Aggregate::new();
        let fresh = agg.record(signature("image-alt", "#logo", "<img>"), |_, _| {
            violation("https://ex.test/p1")
        });
        assert!(fresh);
        let violations = agg.into_violations();
        assert_eq!(violations[0].violation_number, 1);
        assert_eq!(violations[0].occurrence_count, Some(1));
    }

    #[test]
    fn test_repeat_signature_bumps_count_only() {
        let mut agg = Aggregate::new();
        agg.record(signature("image-alt", "#logo", "<img>"), |_, _| {
            violation("https://ex.test/p1")
        });
        let fresh = agg.record(signature("image-alt", "#logo", "<img>"), |_, _| {
            violation("https://ex.test/p2")
        });
        assert!(!fresh);

        let violations = agg.into_violations();
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].occurrence_count, Some(2));
        // First-processed page wins
        assert_eq!(violations[0].page_url, "https://ex.test/p1");
    }

    #[test]
    fn test_numbers_contiguous_from_one() {
        let mut agg = Aggregate::new();
        for i in 0..5 {
            agg.record(signature("image-alt", &format!("#img-{i}"), "<img>"), |_, _| {
                violation("https://ex.test/")
            });
        }
        let numbers: Vec<u32> = agg
            .into_violations()
            .iter()
            .map(|v| v.violation_number)
            .collect();
        assert_eq!(numbers, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_common_ui_detection() {
        assert!(is_common_ui("header > nav > a"));
        assert!(is_common_ui("#GNB li"));
        assert!(is_common_ui("footer .copyright"));
        assert!(!is_common_ui("#content article img"));
    }

    #[test]
    fn test_record_marks_common_ui() {
        let mut agg = Aggregate::new();
        agg.record(signature("link-name", "footer > a", "<a></a>"), |_, _| {
            violation("https://ex.test/")
        });
        assert_eq!(agg.into_violations()[0].is_common, Some(true));
    }
}
