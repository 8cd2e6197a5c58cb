//! Report export and terminal summary
//!
//! The JSON report is the complete `AuditResult` document; the terminal
//! summary is a condensed view for interactive runs.

mod report;
mod summary;

pub use report::write_report;
pub use summary::print_summary;
