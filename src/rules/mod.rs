//! Rule sources: the accessibility oracle and custom rules behind one seam
//!
//! The page auditor does not care where a finding came from. The
//! general-purpose rule engine and the custom ARIA pattern checks alike
//! implement `RuleSource`, which also carries the region-scoping capability
//! used to re-scan dynamically revealed content (modals, dropdowns) without
//! special cases.

mod aria;
mod dom;
mod types;
mod wcag;

pub use aria::AriaRuleSource;
pub use types::{Impact, RawViolation, Scope, ViolationNode};
pub use wcag::WcagRuleSource;

use crate::browser::Page;
use crate::Result;
use async_trait::async_trait;

/// A producer of raw rule violations for a page or page region
#[async_trait]
pub trait RuleSource: Send + Sync {
    /// Stable identifier for logging
    fn id(&self) -> &'static str;

    /// Analyzes the page (or a region of it) and returns raw findings
    async fn analyze(&self, page: &dyn Page, scope: &Scope) -> Result<Vec<RawViolation>>;
}

/// The default rule-source set: the static WCAG oracle plus the custom
/// ARIA pattern checks
///
/// Built once per audit run and shared between the main scan and the
/// dynamic-interaction pass.
pub fn default_rule_sources() -> Vec<std::sync::Arc<dyn RuleSource>> {
    vec![
        std::sync::Arc::new(WcagRuleSource),
        std::sync::Arc::new(AriaRuleSource),
    ]
}
