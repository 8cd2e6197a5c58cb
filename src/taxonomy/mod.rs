//! KWCAG 2.2 taxonomy and classification of raw findings

pub mod items;
pub mod normalize;

pub use items::{AutomationLevel, KwcagItem, Principle, KWCAG_ITEMS, UNMAPPED_ID, UNMAPPED_NAME};
pub use normalize::{item_for_rule, normalize_violations, KwcagViolation};
