//! Audit phase: per-page auditing, cross-page deduplication and the
//! pipeline orchestrator

mod auditor;
mod dedup;
mod orchestrator;
pub(crate) mod types;

pub use orchestrator::{run_audit, Orchestrator};
pub use types::{AuditEvent, AuditResult, AuditSummary, PageInfo, ProgressFn, Violation};
