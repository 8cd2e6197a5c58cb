use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::browser::BoundingBox;
use crate::taxonomy::Principle;

/// One crawled page with its 4-level breadcrumb path
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageInfo {
    pub url: String,
    pub title: String,
    pub depth1: String,
    pub depth2: String,
    pub depth3: String,
    pub depth4: String,
}

/// One deduplicated violation across the whole run
///
/// Field names serialize in camelCase so the report matches the shape
/// downstream report viewers consume.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Violation {
    pub page_url: String,
    pub page_title: String,
    pub depth1: String,
    pub depth2: String,
    pub depth3: String,
    pub depth4: String,
    pub platform: String,
    pub inspector: String,
    pub inspection_date: String,
    pub violation_number: u32,
    pub kwcag_id: String,
    pub kwcag_name: String,
    pub principle: Principle,
    pub rule_id: String,
    pub description: String,
    pub impact: String,
    pub affected_code: String,
    pub help: String,
    pub help_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selector: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub occurrence_count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_common: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub screenshot_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bounding_box: Option<BoundingBox>,
}

/// Counts grouped three ways over the deduplicated violation list
///
/// `BTreeMap` keeps the JSON key order stable across runs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditSummary {
    pub by_principle: BTreeMap<String, u32>,
    pub by_impact: BTreeMap<String, u32>,
    pub by_kwcag_item: BTreeMap<String, u32>,
}

/// The pipeline's single output artifact
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditResult {
    pub start_time: String,
    pub end_time: String,
    pub total_pages: usize,
    pub total_violations: usize,
    pub pages: Vec<PageInfo>,
    pub violations: Vec<Violation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seo_result: Option<crate::seo::SeoResult>,
    pub summary: AuditSummary,
}

/// Progress events emitted while the pipeline runs
#[derive(Debug, Clone)]
pub enum AuditEvent {
    Log(String),
    Progress {
        current: usize,
        total: usize,
        url: String,
    },
}

/// Progress callback shared by the crawler and the orchestrator
pub type ProgressFn = dyn Fn(AuditEvent) + Send + Sync;

pub(crate) fn emit(on_progress: Option<&ProgressFn>, event: AuditEvent) {
    if let Some(callback) = on_progress {
        callback(event);
    }
}
