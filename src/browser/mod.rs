//! Browser resource collaborator
//!
//! The pipeline drives whatever can navigate pages and answer DOM questions;
//! the concrete engine stays behind the `Browser`/`BrowserContext`/`Page`
//! traits. `http.rs` provides the built-in backend (plain HTTP + HTML
//! parsing) used by the CLI; richer backends (a real browser engine) plug in
//! through the same traits. Operations a backend cannot perform report
//! `AuditError::Unsupported`, which the auditor treats as per-page or
//! per-element recoverable.

mod http;
#[cfg(test)]
pub(crate) mod scripted;
mod types;

pub use http::HttpBrowser;
pub use types::{BoundingBox, Clickable, Link, Viewport};

use crate::Result;
use async_trait::async_trait;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// A launched browser resource
#[async_trait]
pub trait Browser: Send + Sync {
    /// Opens an isolated session context, optionally restoring persisted
    /// session state (cookies/storage) from `storage_state_path`
    async fn new_context(
        &self,
        viewport: Viewport,
        storage_state_path: Option<&Path>,
    ) -> Result<Arc<dyn BrowserContext>>;

    /// Releases the browser resource
    async fn close(&self) -> Result<()>;
}

/// An isolated browsing session shared by the workers of one phase
#[async_trait]
pub trait BrowserContext: Send + Sync {
    /// Opens a fresh page/tab in this context
    async fn new_page(&self) -> Result<Box<dyn Page>>;

    /// Persists session state (cookies/storage) to disk for reuse
    async fn save_storage_state(&self, path: &Path) -> Result<()>;
}

/// One open page/tab
///
/// Within a page, operations are strictly sequential; concurrency happens
/// across pages, each worker owning its own `Page`.
#[async_trait]
pub trait Page: Send + Sync {
    /// Navigates to a URL, resolving once the DOM is ready
    async fn goto(&mut self, url: &Url, timeout: Duration) -> Result<()>;

    /// Best-effort wait for network idle; callers tolerate a timeout here
    async fn wait_for_network_idle(&mut self, timeout: Duration) -> Result<()>;

    /// The page's current URL, if any navigation has happened
    fn current_url(&self) -> Option<&Url>;

    /// Document title
    async fn title(&self) -> Result<String>;

    /// Serialized document markup
    async fn content(&self) -> Result<String>;

    /// All anchor targets with their visible text
    async fn links(&self) -> Result<Vec<Link>>;

    /// Captures a full-page screenshot to `path`
    async fn screenshot(&self, path: &Path) -> Result<()>;

    /// Evaluates a script in the page and returns its JSON result
    async fn evaluate(&self, script: &str) -> Result<serde_json::Value>;

    /// Resolves the bounding box of the first element matching `selector`;
    /// `None` when the element is hidden or detached
    async fn bounding_box(&self, selector: &str) -> Result<Option<BoundingBox>>;

    /// Visible clickable elements matching `selector`, capped at `limit`
    async fn clickables(&self, selector: &str, limit: usize) -> Result<Vec<Clickable>>;

    /// Clicks the element at `selector`
    async fn click(&mut self, selector: &str, timeout: Duration) -> Result<()>;

    /// Sends a keyboard key (e.g. "Escape") to the page
    async fn press(&mut self, key: &str) -> Result<()>;

    /// Navigates back in this page's history
    async fn go_back(&mut self) -> Result<()>;

    /// Fills a form field with a value
    async fn fill(&mut self, selector: &str, value: &str) -> Result<()>;

    /// Returns the first sub-selector of a comma-separated selector list
    /// that currently matches an element, if any
    async fn query_first(&self, selector: &str) -> Result<Option<String>>;

    /// Blocks until the operator closes this page (manual-login flow)
    async fn wait_for_close(&mut self) -> Result<()>;

    /// Closes the page
    async fn close(&mut self) -> Result<()>;
}

/// Maps a browser acquisition failure to a user-facing remediation hint
///
/// Surfaced on `AuditError::Browser` so a failed run carries one clear,
/// actionable message instead of an engine-internal error string.
pub fn browser_error_guide(message: &str) -> String {
    if message.contains("Executable doesn't exist") || message.contains("browserType.launch") {
        "브라우저가 설치되어 있지 않거나 경로를 찾을 수 없습니다. Chrome 브라우저를 설치하거나 최신 버전으로 업데이트해 주세요.".to_string()
    } else if message.contains("dns") || message.contains("connect") {
        "네트워크 연결을 확인해 주세요.".to_string()
    } else {
        message.to_string()
    }
}
