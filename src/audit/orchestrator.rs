//! Full-pipeline orchestration
//!
//! Runs login, crawl, the bounded-concurrency audit pool, the optional SEO
//! analysis and the summary pass, and assembles the `AuditResult`.
//! Initialization failures (the browser resource cannot be acquired) are
//! fatal; per-page failures never are.

use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use chrono::{Local, Utc};
use tracing::{debug, info, warn};
use url::Url;

use crate::audit::auditor::PageAuditor;
use crate::audit::dedup::{Aggregate, Signature};
use crate::audit::types::{emit, AuditEvent, AuditResult, AuditSummary, PageInfo, ProgressFn, Violation};
use crate::browser::{browser_error_guide, Browser, Viewport};
use crate::config::{AuditConfig, Platform};
use crate::crawler::{perform_login, Crawler};
use crate::rules::default_rule_sources;
use crate::seo::{HttpSeoAnalyzer, SeoAnalyzer};
use crate::url::{normalize_url, UrlPolicy};
use crate::{AuditError, Result};

const MOBILE_VIEWPORT: Viewport = Viewport {
    width: 375,
    height: 812,
};

/// Runs the whole audit pipeline over one browser resource
pub struct Orchestrator {
    config: AuditConfig,
    browser: Arc<dyn Browser>,
    seo_analyzer: Option<Arc<dyn SeoAnalyzer>>,
}

/// Convenience entry point: build an orchestrator and run it once
pub async fn run_audit(
    config: AuditConfig,
    browser: Arc<dyn Browser>,
    on_progress: Option<Arc<ProgressFn>>,
) -> Result<AuditResult> {
    Orchestrator::new(config, browser).run(on_progress).await
}

impl Orchestrator {
    pub fn new(config: AuditConfig, browser: Arc<dyn Browser>) -> Self {
        Self {
            config,
            browser,
            seo_analyzer: None,
        }
    }

    /// Replaces the default HTTP-backed SEO analyzer
    pub fn with_seo_analyzer(mut self, analyzer: Arc<dyn SeoAnalyzer>) -> Self {
        self.seo_analyzer = Some(analyzer);
        self
    }

    /// Drives the pipeline end to end, then releases the browser resource
    pub async fn run(&self, on_progress: Option<Arc<ProgressFn>>) -> Result<AuditResult> {
        let result = self.run_inner(on_progress).await;
        if let Err(e) = self.browser.close().await {
            debug!(error = %e, "browser close failed");
        }
        result
    }

    async fn run_inner(&self, on_progress: Option<Arc<ProgressFn>>) -> Result<AuditResult> {
        let progress = on_progress.as_deref();
        let start_time = Utc::now().to_rfc3339();

        let seed = normalize_url(&self.config.target.url, None)?;
        let policy = UrlPolicy::new(&seed, &self.config.crawler.exclude_patterns)?;
        let viewport = match self.config.target.platform {
            Platform::Pc => Viewport::default(),
            Platform::Mobile => MOBILE_VIEWPORT,
        };

        // 1. Optional blocking login phase
        let state_path = PathBuf::from(&self.config.login.storage_state_path);
        if self.config.login.enabled {
            let login_context = self
                .browser
                .new_context(viewport, None)
                .await
                .map_err(fatal_browser)?;
            if let Err(e) = perform_login(&login_context, &self.config.login, progress).await {
                warn!(error = %e, "login phase failed, continuing unauthenticated");
            }
        }
        let restore = (self.config.login.enabled && state_path.exists())
            .then_some(state_path.as_path());

        // 2. Crawl
        emit(
            progress,
            AuditEvent::Log(format!("페이지 크롤링 시작: {seed}")),
        );
        let crawl_context = self
            .browser
            .new_context(viewport, restore)
            .await
            .map_err(fatal_browser)?;
        let crawler = Crawler::new(
            crawl_context,
            policy,
            self.config.crawler.max_depth,
            self.config.crawler.max_pages,
        );
        let crawl = crawler.crawl(seed.as_str(), progress).await?;
        for error in &crawl.errors {
            emit(progress, AuditEvent::Log(format!("탐색 오류: {error}")));
        }
        info!(
            pages = crawl.pages.len(),
            found = crawl.total_found,
            "crawl phase complete"
        );

        // 3. Accessibility worker pool
        let violations = if self.config.audit.enable_accessibility && !crawl.pages.is_empty() {
            emit(
                progress,
                AuditEvent::Log(format!("접근성 검사 시작 ({}개 페이지)", crawl.pages.len())),
            );
            let audit_context = self
                .browser
                .new_context(viewport, restore)
                .await
                .map_err(fatal_browser)?;
            let auditor = Arc::new(PageAuditor::new(
                audit_context,
                default_rule_sources(),
                &self.config.audit.screenshot_dir,
                self.config.audit.enable_dynamic_check,
            ));
            self.run_worker_pool(auditor, &crawl.pages, on_progress.clone())
                .await?
        } else {
            Vec::new()
        };

        // 4. Optional SEO/AI analysis; failure is logged and the field omitted
        let seo_result = if self.config.audit.enable_seo {
            emit(
                progress,
                AuditEvent::Log("SEO 및 AI 친화도 분석 시작".to_string()),
            );
            match self.run_seo(&seed).await {
                Ok(result) => Some(result),
                Err(e) => {
                    warn!(error = %e, "SEO analysis failed, omitting from result");
                    emit(progress, AuditEvent::Log(format!("SEO 분석 오류: {e}")));
                    None
                }
            }
        } else {
            None
        };

        // 5. Summaries over the final deduplicated list
        let summary = summarize(&violations);

        emit(progress, AuditEvent::Log("진단 완료".to_string()));
        Ok(AuditResult {
            start_time,
            end_time: Utc::now().to_rfc3339(),
            total_pages: crawl.pages.len(),
            total_violations: violations.len(),
            pages: crawl.pages,
            violations,
            seo_result,
            summary,
        })
    }

    async fn run_seo(&self, seed: &Url) -> Result<crate::seo::SeoResult> {
        match &self.seo_analyzer {
            Some(analyzer) => analyzer.analyze(seed).await,
            None => HttpSeoAnalyzer::new()?.analyze(seed).await,
        }
    }

    /// Fixed-size worker pool over the crawled page set
    ///
    /// Workers claim page indices through an atomic cursor; the dedup
    /// aggregate is the only other shared state and sits behind a mutex
    /// whose critical sections never span an await.
    async fn run_worker_pool(
        &self,
        auditor: Arc<PageAuditor>,
        pages: &[PageInfo],
        on_progress: Option<Arc<ProgressFn>>,
    ) -> Result<Vec<Violation>> {
        let pages: Arc<Vec<PageInfo>> = Arc::new(pages.to_vec());
        let cursor = Arc::new(AtomicUsize::new(0));
        let completed = Arc::new(AtomicUsize::new(0));
        let aggregate = Arc::new(Mutex::new(Aggregate::new()));
        let platform = self.config.target.platform.to_string();
        let inspector = self.config.target.inspector.clone();

        let worker_count = pages.len().min(self.config.audit.concurrency.max(1));
        let mut handles = Vec::with_capacity(worker_count);
        for _ in 0..worker_count {
            let auditor = Arc::clone(&auditor);
            let pages = Arc::clone(&pages);
            let cursor = Arc::clone(&cursor);
            let completed = Arc::clone(&completed);
            let aggregate = Arc::clone(&aggregate);
            let on_progress = on_progress.clone();
            let platform = platform.clone();
            let inspector = inspector.clone();

            handles.push(tokio::spawn(async move {
                loop {
                    let index = cursor.fetch_add(1, Ordering::SeqCst);
                    let Some(info) = pages.get(index) else {
                        break;
                    };

                    audit_one(&auditor, &aggregate, info, &platform, &inspector).await;

                    let current = completed.fetch_add(1, Ordering::SeqCst) + 1;
                    emit(
                        on_progress.as_deref(),
                        AuditEvent::Progress {
                            current,
                            total: pages.len(),
                            url: info.url.clone(),
                        },
                    );
                }
            }));
        }

        for handle in handles {
            if let Err(e) = handle.await {
                warn!(error = %e, "audit worker panicked");
            }
        }

        match Arc::try_unwrap(aggregate) {
            Ok(mutex) => {
                let aggregate = mutex
                    .into_inner()
                    .unwrap_or_else(|poisoned| poisoned.into_inner());
                info!(unique_violations = aggregate.len(), "audit pool complete");
                Ok(aggregate.into_violations())
            }
            Err(_) => Err(AuditError::Crawl(
                "audit workers did not release shared state".to_string(),
            )),
        }
    }
}

/// Audits one page and folds its findings into the shared aggregate
async fn audit_one(
    auditor: &PageAuditor,
    aggregate: &Mutex<Aggregate>,
    info: &PageInfo,
    platform: &str,
    inspector: &str,
) {
    let url = match Url::parse(&info.url) {
        Ok(url) => url,
        Err(e) => {
            warn!(url = %info.url, error = %e, "unparseable page URL skipped");
            return;
        }
    };

    let outcome = auditor.audit_page(&url).await;
    let inspection_date = Local::now().format("%Y-%m-%d").to_string();

    let mut aggregate = aggregate
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    for finding in &outcome.violations {
        for node in &finding.nodes {
            let selector = node.target.join(" > ");
            let signature = Signature {
                rule_id: finding.rule_id.clone(),
                selector: selector.clone(),
                html: node.html.clone(),
            };
            aggregate.record(signature, |number, is_common| Violation {
                page_url: info.url.clone(),
                page_title: info.title.clone(),
                depth1: info.depth1.clone(),
                depth2: info.depth2.clone(),
                depth3: info.depth3.clone(),
                depth4: info.depth4.clone(),
                platform: platform.to_string(),
                inspector: inspector.to_string(),
                inspection_date: inspection_date.clone(),
                violation_number: number,
                kwcag_id: finding.kwcag_id.clone(),
                kwcag_name: finding.kwcag_name.clone(),
                principle: finding.principle,
                rule_id: finding.rule_id.clone(),
                description: finding.description.clone(),
                impact: finding.impact.to_string(),
                affected_code: node.html.clone(),
                help: if finding.help.is_empty() {
                    node.failure_summary.clone()
                } else {
                    finding.help.clone()
                },
                help_url: finding.help_url.clone(),
                selector: Some(selector.clone()),
                occurrence_count: Some(1),
                is_common: Some(is_common),
                screenshot_path: outcome.screenshot_path.clone(),
                bounding_box: node.bounding_box.clone(),
            });
        }
    }
}

/// Counts violations by principle, impact and checklist item in one pass
pub(crate) fn summarize(violations: &[Violation]) -> AuditSummary {
    let mut summary = AuditSummary::default();
    for violation in violations {
        *summary
            .by_principle
            .entry(violation.principle.as_str().to_string())
            .or_insert(0) += 1;
        *summary.by_impact.entry(violation.impact.clone()).or_insert(0) += 1;
        *summary
            .by_kwcag_item
            .entry(violation.kwcag_id.clone())
            .or_insert(0) += 1;
    }
    summary
}

fn fatal_browser(error: AuditError) -> AuditError {
    let message = error.to_string();
    let hint = browser_error_guide(&message);
    AuditError::Browser { message, hint }
}
