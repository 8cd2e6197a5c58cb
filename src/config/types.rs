use serde::{Deserialize, Serialize};

/// Main configuration structure for a Jindan audit run
#[derive(Debug, Clone, Deserialize)]
pub struct AuditConfig {
    pub target: TargetConfig,
    #[serde(default)]
    pub login: LoginConfig,
    #[serde(default)]
    pub crawler: CrawlerConfig,
    #[serde(default)]
    pub audit: AuditOptions,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Target site identification
#[derive(Debug, Clone, Deserialize)]
pub struct TargetConfig {
    /// Seed URL the crawl starts from
    pub url: String,

    /// Platform tag recorded on every violation
    #[serde(default)]
    pub platform: Platform,

    /// Inspector display name recorded on every violation
    #[serde(default = "default_inspector")]
    pub inspector: String,
}

/// Platform a page set is audited as
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Platform {
    #[default]
    #[serde(rename = "PC")]
    Pc,
    Mobile,
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Platform::Pc => write!(f, "PC"),
            Platform::Mobile => write!(f, "Mobile"),
        }
    }
}

/// Authentication side-channel configuration
///
/// When `enabled`, the run begins with a login phase before crawling. With
/// credentials present the generic form-filling heuristic is attempted;
/// otherwise the manual human-in-the-loop flow blocks until the operator
/// closes the login page.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct LoginConfig {
    #[serde(default)]
    pub enabled: bool,

    #[serde(rename = "login-url")]
    pub login_url: Option<String>,

    pub id: Option<String>,

    pub password: Option<String>,

    /// Where the authenticated session blob is persisted for reuse
    #[serde(rename = "storage-state-path", default = "default_storage_state_path")]
    pub storage_state_path: String,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// Maximum traversal depth from the seed URL (the seed is depth 1)
    #[serde(rename = "max-depth", default = "default_max_depth")]
    pub max_depth: u32,

    /// Maximum number of accepted pages per crawl
    #[serde(rename = "max-pages", default = "default_max_pages")]
    pub max_pages: usize,

    /// Additional exclusion patterns on top of the built-in set
    #[serde(rename = "exclude-patterns", default)]
    pub exclude_patterns: Vec<String>,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            max_depth: default_max_depth(),
            max_pages: default_max_pages(),
            exclude_patterns: Vec::new(),
        }
    }
}

/// Audit phase toggles and tuning
#[derive(Debug, Clone, Deserialize)]
pub struct AuditOptions {
    /// Run the accessibility scan over the crawled page set
    #[serde(rename = "enable-accessibility", default = "default_true")]
    pub enable_accessibility: bool,

    /// Run the SEO/AI-friendliness sub-analysis
    #[serde(rename = "enable-seo", default)]
    pub enable_seo: bool,

    /// Run the dynamic-interaction pass on each audited page
    #[serde(rename = "enable-dynamic-check", default = "default_true")]
    pub enable_dynamic_check: bool,

    /// Number of concurrent audit workers
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,

    /// Directory full-page screenshots are written to
    #[serde(rename = "screenshot-dir", default = "default_screenshot_dir")]
    pub screenshot_dir: String,
}

impl Default for AuditOptions {
    fn default() -> Self {
        Self {
            enable_accessibility: true,
            enable_seo: false,
            enable_dynamic_check: true,
            concurrency: default_concurrency(),
            screenshot_dir: default_screenshot_dir(),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Path the JSON audit report is written to
    #[serde(rename = "report-path", default = "default_report_path")]
    pub report_path: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            report_path: default_report_path(),
        }
    }
}

fn default_inspector() -> String {
    "시스템".to_string()
}

fn default_storage_state_path() -> String {
    "./auth_state.json".to_string()
}

fn default_max_depth() -> u32 {
    4
}

fn default_max_pages() -> usize {
    500
}

fn default_true() -> bool {
    true
}

fn default_concurrency() -> usize {
    5
}

fn default_screenshot_dir() -> String {
    "./screenshots".to_string()
}

fn default_report_path() -> String {
    "./audit-report.json".to_string()
}
