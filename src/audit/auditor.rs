//! Single-page accessibility audit
//!
//! `audit_page` never fails: any page-level error yields an outcome with an
//! empty violation list and the title `"Error"` so the batch continues. The
//! dynamic-interaction pass is heuristic and best-effort throughout; an
//! element that misbehaves only loses its own check.

use std::path::PathBuf;
use std::sync::Arc;
use std::sync::OnceLock;
use std::time::Duration;

use chrono::Utc;
use regex::Regex;
use tracing::{debug, warn};

use crate::browser::{BrowserContext, Page};
use crate::rules::{RawViolation, RuleSource, Scope};
use crate::taxonomy::{normalize_violations, KwcagViolation};
use crate::AuditError;

const NAV_TIMEOUT: Duration = Duration::from_secs(60);
const IDLE_TIMEOUT: Duration = Duration::from_secs(10);
const CLICK_TIMEOUT: Duration = Duration::from_secs(2);
const CLICK_SETTLE: Duration = Duration::from_millis(500);
const MAX_DYNAMIC_ELEMENTS: usize = 10;

const CLICKABLE_SELECTOR: &str = "button, [role=\"button\"], .btn, .dropdown-toggle";
const MODAL_SELECTOR: &str = ".modal, .layer-popup, .dropdown-menu, [role=\"dialog\"]";

/// Buttons whose text suggests a destructive action are never clicked
fn destructive_text_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)로그아웃|logout|삭제|delete|탈퇴")
            .unwrap_or_else(|_| unreachable!("static pattern"))
    })
}

/// Result of auditing one page
pub(crate) struct PageAuditOutcome {
    pub url: String,
    pub title: String,
    pub violations: Vec<KwcagViolation>,
    pub screenshot_path: Option<String>,
    pub timestamp: String,
}

/// Audits pages against the configured rule sources
///
/// One auditor is shared by all workers; each `audit_page` call opens and
/// closes its own page, so calls are independent and safe to run
/// concurrently.
pub(crate) struct PageAuditor {
    context: Arc<dyn BrowserContext>,
    sources: Vec<Arc<dyn RuleSource>>,
    screenshot_dir: PathBuf,
    enable_dynamic_check: bool,
}

impl PageAuditor {
    pub fn new(
        context: Arc<dyn BrowserContext>,
        sources: Vec<Arc<dyn RuleSource>>,
        screenshot_dir: impl Into<PathBuf>,
        enable_dynamic_check: bool,
    ) -> Self {
        Self {
            context,
            sources,
            screenshot_dir: screenshot_dir.into(),
            enable_dynamic_check,
        }
    }

    /// Audits one page, absorbing every page-level failure
    pub async fn audit_page(&self, url: &url::Url) -> PageAuditOutcome {
        let timestamp = Utc::now().to_rfc3339();

        let mut page = match self.context.new_page().await {
            Ok(page) => page,
            Err(e) => {
                warn!(url = %url, error = %e, "could not open page for audit");
                return error_outcome(url, timestamp);
            }
        };

        let outcome = match self.audit_inner(page.as_mut(), url, &timestamp).await {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!(url = %url, error = %e, "page audit failed");
                error_outcome(url, timestamp)
            }
        };

        if let Err(e) = page.close().await {
            debug!(url = %url, error = %e, "audit page close failed");
        }

        outcome
    }

    async fn audit_inner(
        &self,
        page: &mut dyn Page,
        url: &url::Url,
        timestamp: &str,
    ) -> crate::Result<PageAuditOutcome> {
        page.goto(url, NAV_TIMEOUT).await?;
        if page.wait_for_network_idle(IDLE_TIMEOUT).await.is_err() {
            debug!(url = %url, "network idle wait timed out, auditing loaded DOM");
        }

        let title = page.title().await.unwrap_or_default();
        let screenshot_path = self.capture_screenshot(page, url).await;

        let mut raw: Vec<RawViolation> = Vec::new();
        for source in &self.sources {
            match source.analyze(page, &Scope::Document).await {
                Ok(findings) => raw.extend(findings),
                Err(AuditError::Unsupported(op)) => {
                    debug!(source = source.id(), op, "rule source skipped on this backend");
                }
                Err(e) => {
                    warn!(source = source.id(), url = %url, error = %e, "rule source failed");
                }
            }
        }

        self.attach_bounding_boxes(page, &mut raw).await;

        if self.enable_dynamic_check {
            let mut dynamic = self.dynamic_pass(page, url).await;
            self.attach_bounding_boxes(page, &mut dynamic).await;
            raw.extend(dynamic);
        }

        Ok(PageAuditOutcome {
            url: url.to_string(),
            title,
            violations: normalize_violations(raw),
            screenshot_path,
            timestamp: timestamp.to_string(),
        })
    }

    /// Captures a full-page screenshot to a content-addressed filename;
    /// failure is logged, never fatal
    async fn capture_screenshot(&self, page: &dyn Page, url: &url::Url) -> Option<String> {
        if let Err(e) = std::fs::create_dir_all(&self.screenshot_dir) {
            warn!(dir = %self.screenshot_dir.display(), error = %e, "screenshot dir unavailable");
            return None;
        }

        let filename = format!(
            "{}_{}.png",
            sanitize_for_filename(url.as_str()),
            Utc::now().timestamp_millis()
        );
        let path = self.screenshot_dir.join(&filename);

        match page.screenshot(&path).await {
            Ok(()) => Some(path.to_string_lossy().into_owned()),
            Err(AuditError::Unsupported(_)) => None,
            Err(e) => {
                warn!(url = %url, error = %e, "screenshot capture failed");
                None
            }
        }
    }

    /// Resolves each node's live bounding box through its first target
    /// selector; hidden or detached elements silently skip attachment
    async fn attach_bounding_boxes(&self, page: &dyn Page, violations: &mut [RawViolation]) {
        for violation in violations.iter_mut() {
            for node in violation.nodes.iter_mut() {
                let Some(selector) = node.target.first() else {
                    continue;
                };
                if let Ok(Some(bounding_box)) = page.bounding_box(selector).await {
                    node.bounding_box = Some(bounding_box);
                }
            }
        }
    }

    /// Clicks up to 10 visible non-destructive elements and re-scans any
    /// freshly opened modal/popup region
    async fn dynamic_pass(&self, page: &mut dyn Page, original_url: &url::Url) -> Vec<RawViolation> {
        let clickables = match page.clickables(CLICKABLE_SELECTOR, MAX_DYNAMIC_ELEMENTS).await {
            Ok(clickables) => clickables,
            Err(AuditError::Unsupported(_)) => return Vec::new(),
            Err(e) => {
                debug!(error = %e, "clickable discovery failed, skipping dynamic pass");
                return Vec::new();
            }
        };

        let mut findings = Vec::new();
        for clickable in clickables {
            if destructive_text_regex().is_match(&clickable.text) {
                continue;
            }

            if let Err(e) = page.click(&clickable.selector, CLICK_TIMEOUT).await {
                debug!(selector = %clickable.selector, error = %e, "click failed, element skipped");
                continue;
            }
            tokio::time::sleep(CLICK_SETTLE).await;

            // A click that navigated away is not scored; restore and move on
            if page.current_url().is_some_and(|url| url != original_url) {
                if let Err(e) = page.go_back().await {
                    debug!(error = %e, "go_back failed after navigation");
                }
                continue;
            }

            if let Ok(Some(region)) = page.query_first(MODAL_SELECTOR).await {
                let scope = Scope::Region(region);
                for source in &self.sources {
                    match source.analyze(page, &scope).await {
                        Ok(region_findings) => findings.extend(region_findings),
                        Err(e) => {
                            debug!(source = source.id(), error = %e, "region scan failed");
                        }
                    }
                }
            }

            if let Err(e) = page.press("Escape").await {
                debug!(error = %e, "escape press failed");
            }
        }

        findings
    }
}

fn error_outcome(url: &url::Url, timestamp: String) -> PageAuditOutcome {
    PageAuditOutcome {
        url: url.to_string(),
        title: "Error".to_string(),
        violations: Vec::new(),
        screenshot_path: None,
        timestamp,
    }
}

fn sanitize_for_filename(url: &str) -> String {
    url.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '_'
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_for_filename() {
        assert_eq!(
            sanitize_for_filename("https://ex.test/a?q=1"),
            "https___ex_test_a_q_1"
        );
    }

    #[test]
    fn test_destructive_text_matches_bilingual() {
        let re = destructive_text_regex();
        assert!(re.is_match("로그아웃"));
        assert!(re.is_match("Logout"));
        assert!(re.is_match("회원 탈퇴"));
        assert!(re.is_match("Delete account"));
        assert!(!re.is_match("더보기"));
    }

    mod dynamic {
        use super::super::*;
        use crate::browser::scripted::{Action, Script, ScriptedBrowser};
        use crate::browser::Clickable;
        use crate::rules::default_rule_sources;
        use url::Url;

        const CLEAN_PAGE: &str = r#"<html lang="ko"><head><title>홈</title></head><body><p>본문</p></body></html>"#;

        fn auditor_over(script: Script) -> (PageAuditor, std::sync::Arc<std::sync::Mutex<Vec<Action>>>, tempfile::TempDir) {
            let dir = tempfile::tempdir().unwrap();
            let browser = ScriptedBrowser::new(script);
            let actions = browser.actions();
            let auditor =
                PageAuditor::new(browser.context(), default_rule_sources(), dir.path(), true);
            (auditor, actions, dir)
        }

        #[tokio::test]
        async fn test_revealed_overlay_is_scanned_and_dismissed() {
            let mut script = Script::default().with_page("https://ex.test/", CLEAN_PAGE);
            script.clickables = vec![
                Clickable {
                    selector: "#menu-open".to_string(),
                    text: "메뉴".to_string(),
                },
                Clickable {
                    selector: "#logout-button".to_string(),
                    text: "로그아웃".to_string(),
                },
            ];
            script.modal_on_click.insert(
                "#menu-open".to_string(),
                r#"<div class="modal"><img src="pop.png"></div>"#.to_string(),
            );

            let (auditor, actions, _dir) = auditor_over(script);
            let outcome = auditor
                .audit_page(&Url::parse("https://ex.test/").unwrap())
                .await;

            // The base page is clean; the only finding comes from the overlay
            assert!(outcome
                .violations
                .iter()
                .any(|v| v.rule_id == "image-alt" && v.kwcag_id == "1.1.1"));
            assert!(!outcome
                .violations
                .iter()
                .any(|v| v.rule_id == "html-has-lang" || v.rule_id == "document-title"));

            let actions = actions.lock().unwrap();
            assert!(actions.contains(&Action::Click("#menu-open".to_string())));
            assert!(!actions.contains(&Action::Click("#logout-button".to_string())));
            assert!(actions.contains(&Action::Press("Escape".to_string())));
        }

        #[tokio::test]
        async fn test_navigating_click_restores_and_is_not_scored() {
            let mut script = Script::default().with_page("https://ex.test/", CLEAN_PAGE);
            script.clickables = vec![Clickable {
                selector: "#away".to_string(),
                text: "더보기".to_string(),
            }];
            script
                .navigate_on_click
                .insert("#away".to_string(), "https://ex.test/other".to_string());

            let (auditor, actions, _dir) = auditor_over(script);
            let outcome = auditor
                .audit_page(&Url::parse("https://ex.test/").unwrap())
                .await;

            assert!(outcome.violations.is_empty());
            let actions = actions.lock().unwrap();
            assert!(actions.contains(&Action::GoBack));
            assert!(!actions.contains(&Action::Press("Escape".to_string())));
        }
    }
}
