use crate::browser::BoundingBox;
use serde::{Deserialize, Serialize};

/// Severity of a rule failure
///
/// Raw findings may omit this; normalization defaults missing values to
/// `Minor` so every violation carries an impact downstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Impact {
    Critical,
    Serious,
    Moderate,
    #[default]
    Minor,
}

impl std::fmt::Display for Impact {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Impact::Critical => "critical",
            Impact::Serious => "serious",
            Impact::Moderate => "moderate",
            Impact::Minor => "minor",
        };
        write!(f, "{s}")
    }
}

/// One offending element within a raw violation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViolationNode {
    /// HTML snippet of the element (capped at 200 characters)
    pub html: String,

    /// Selector chain locating the element
    pub target: Vec<String>,

    #[serde(rename = "failureSummary", default)]
    pub failure_summary: String,

    #[serde(rename = "boundingBox", skip_serializing_if = "Option::is_none", default)]
    pub bounding_box: Option<BoundingBox>,
}

/// One rule failure on one page, as produced by a rule source
///
/// Ephemeral: produced per audit call and consumed immediately by the
/// taxonomy normalizer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawViolation {
    /// Rule identifier (axe rule ID or a `custom-`-prefixed synthetic ID)
    pub id: String,

    #[serde(default)]
    pub impact: Option<Impact>,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub help: String,

    #[serde(rename = "helpUrl", default)]
    pub help_url: String,

    pub nodes: Vec<ViolationNode>,
}

/// Analysis scope for a rule source
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scope {
    /// The whole document
    Document,
    /// Only the subtree rooted at this selector (dynamically revealed
    /// regions: modals, dropdowns, layer popups)
    Region(String),
}
