//! Jindan: a KWCAG/SEO web audit pipeline
//!
//! This crate crawls a website breadth-first, runs automated accessibility
//! checks on every discovered page, deduplicates and scores the violations
//! against the KWCAG 2.2 checklist and derives a remediation cost estimate.

pub mod audit;
pub mod browser;
pub mod config;
pub mod cost;
pub mod crawler;
pub mod output;
pub mod rules;
pub mod seo;
pub mod taxonomy;
pub mod url;

use thiserror::Error;

/// Main error type for Jindan operations
///
/// Only initialization-class failures are meant to escape the top-level
/// `run_audit`; per-page and per-element failures are absorbed into the
/// result (empty violations, `errors[]` entries) per the recovery policy.
#[derive(Debug, Error)]
pub enum AuditError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Browser resource unavailable: {message}. {hint}")]
    Browser { message: String, hint: String },

    #[error("Operation not supported by this browser backend: {0}")]
    Unsupported(&'static str),

    #[error("Navigation timeout for {url}")]
    NavigationTimeout { url: String },

    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("URL error: {0}")]
    UrlError(#[from] UrlError),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Rule source '{source_id}' failed: {message}")]
    RuleSource { source_id: String, message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Crawl error: {0}")]
    Crawl(String),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Invalid exclusion pattern: {0}")]
    InvalidPattern(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing host in URL")]
    MissingHost,
}

/// Result type alias for Jindan operations
pub type Result<T> = std::result::Result<T, AuditError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use audit::{run_audit, AuditEvent, AuditResult, Orchestrator, PageInfo, Violation};
pub use config::AuditConfig;
pub use cost::{calculate_cost, CostReport};
pub use crawler::{CrawlResult, Crawler};
pub use taxonomy::{normalize_violations, KwcagViolation, Principle};
pub use url::{normalize_url, UrlPolicy};
