//! Configuration loading, parsing, and validation
//!
//! Audit runs are driven by a TOML file describing the target site, the
//! optional login phase, crawler budgets, audit toggles and output paths.

mod parser;
mod types;
mod validation;

pub use parser::{compute_config_hash, load_config, load_config_with_hash};
pub use types::{
    AuditConfig, AuditOptions, CrawlerConfig, LoginConfig, OutputConfig, Platform, TargetConfig,
};
pub use validation::validate;
