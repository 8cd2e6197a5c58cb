//! JSON report writer

use std::fs;
use std::path::Path;

use tracing::info;

use crate::audit::AuditResult;
use crate::Result;

/// Serializes the audit result to pretty-printed JSON at `path`
///
/// Parent directories are created as needed.
pub fn write_report(result: &AuditResult, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let json = serde_json::to_string_pretty(result)?;
    fs::write(path, json)?;
    info!(path = %path.display(), "report written");
    Ok(())
}
