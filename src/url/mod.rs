//! URL normalization and crawl containment policy
//!
//! This module decides which discovered links become crawl frontier entries:
//! - Canonicalization (fragment strip, trailing-slash strip, relative
//!   resolution) so the visited set has one key per page
//! - Same-origin containment (hostname-exact) plus exclusion patterns

mod normalize;
mod policy;

pub use normalize::normalize_url;
pub use policy::{check_candidate, UrlPolicy};
