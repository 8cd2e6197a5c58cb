//! Breadth-first crawl of the target site
//!
//! The crawler owns the frontier queue, the visited set and the depth/page
//! budgets. It emits one `PageInfo` per accepted page with a 4-level
//! breadcrumb path derived from the traversal ancestry. A navigation failure
//! drops that URL (recorded in `errors`) and never halts the crawl.

mod login;

pub use login::perform_login;

use std::collections::{HashSet, VecDeque};
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};
use url::Url;

use crate::audit::types::{emit, AuditEvent, PageInfo, ProgressFn};
use crate::browser::BrowserContext;
use crate::url::{check_candidate, normalize_url, UrlPolicy};
use crate::Result;

/// Per-page navigation timeout
pub(crate) const NAV_TIMEOUT: Duration = Duration::from_secs(60);

/// Best-effort network-idle wait after navigation
pub(crate) const IDLE_TIMEOUT: Duration = Duration::from_secs(10);

/// Outcome of one crawl
#[derive(Debug, Clone)]
pub struct CrawlResult {
    /// Accepted pages in traversal order
    pub pages: Vec<PageInfo>,
    /// Total in-scope candidate URLs discovered (enqueued), whether or not
    /// the budgets allowed visiting them
    pub total_found: usize,
    /// One message per URL that failed to load
    pub errors: Vec<String>,
}

struct FrontierEntry {
    url: Url,
    depth: u32,
    /// Display titles of the accepted pages along the path from the seed
    ancestors: Vec<String>,
    /// Anchor text of the link this URL was discovered through
    link_text: Option<String>,
}

/// BFS traversal engine over one browsing context
pub struct Crawler {
    context: Arc<dyn BrowserContext>,
    policy: UrlPolicy,
    max_depth: u32,
    max_pages: usize,
}

impl Crawler {
    pub fn new(
        context: Arc<dyn BrowserContext>,
        policy: UrlPolicy,
        max_depth: u32,
        max_pages: usize,
    ) -> Self {
        Self {
            context,
            policy,
            max_depth,
            max_pages,
        }
    }

    /// Crawls breadth-first from `seed`
    ///
    /// # Arguments
    /// * `seed` - start URL; it is normalized and counts as depth 1
    /// * `on_progress` - optional observer for log events
    ///
    /// # Returns
    /// The accepted page list, the discovered-URL count and per-URL error
    /// messages. Only failing to open a page in the context is fatal.
    pub async fn crawl(&self, seed: &str, on_progress: Option<&ProgressFn>) -> Result<CrawlResult> {
        let seed = normalize_url(seed, None)?;

        let mut frontier = VecDeque::new();
        frontier.push_back(FrontierEntry {
            url: seed.clone(),
            depth: 1,
            ancestors: Vec::new(),
            link_text: None,
        });

        let mut visited: HashSet<String> = HashSet::new();
        let mut pages: Vec<PageInfo> = Vec::new();
        let mut errors: Vec<String> = Vec::new();
        let mut total_found = 1usize;

        let mut page = self.context.new_page().await?;

        while let Some(entry) = frontier.pop_front() {
            if pages.len() >= self.max_pages {
                info!(max_pages = self.max_pages, "page budget reached, stopping crawl");
                break;
            }
            if entry.depth > self.max_depth {
                continue;
            }
            if !visited.insert(entry.url.as_str().to_string()) {
                continue;
            }

            emit(
                on_progress,
                AuditEvent::Log(format!("페이지 탐색 중: {}", entry.url)),
            );

            if let Err(e) = page.goto(&entry.url, NAV_TIMEOUT).await {
                warn!(url = %entry.url, error = %e, "navigation failed, dropping URL");
                errors.push(format!("{}: {e}", entry.url));
                continue;
            }
            // Timeout here is expected on busy pages; audit whatever loaded
            if page.wait_for_network_idle(IDLE_TIMEOUT).await.is_err() {
                debug!(url = %entry.url, "network idle wait timed out");
            }

            let page_title = page.title().await.unwrap_or_default();
            let display_title = entry
                .link_text
                .as_deref()
                .filter(|text| !text.is_empty())
                .map(str::to_string)
                .unwrap_or_else(|| {
                    if page_title.is_empty() {
                        entry.url.to_string()
                    } else {
                        page_title.clone()
                    }
                });

            pages.push(page_info(&entry.url, &display_title, &entry.ancestors));
            debug!(url = %entry.url, depth = entry.depth, "page accepted");

            if entry.depth >= self.max_depth {
                continue;
            }

            let links = match page.links().await {
                Ok(links) => links,
                Err(e) => {
                    warn!(url = %entry.url, error = %e, "link collection failed");
                    continue;
                }
            };

            let mut child_ancestors = entry.ancestors.clone();
            child_ancestors.push(display_title);

            let mut seen_here: HashSet<String> = HashSet::new();
            for link in links {
                let normalized = match check_candidate(&self.policy, &link.url, Some(&entry.url)) {
                    Ok(Some(url)) => url,
                    Ok(None) => continue,
                    Err(e) => {
                        debug!(href = %link.url, error = %e, "unparseable link skipped");
                        continue;
                    }
                };
                if visited.contains(normalized.as_str()) {
                    continue;
                }
                if !seen_here.insert(normalized.as_str().to_string()) {
                    continue;
                }

                total_found += 1;
                frontier.push_back(FrontierEntry {
                    url: normalized,
                    depth: entry.depth + 1,
                    ancestors: child_ancestors.clone(),
                    link_text: Some(link.text.trim().to_string()).filter(|t| !t.is_empty()),
                });
            }
        }

        if let Err(e) = page.close().await {
            debug!(error = %e, "crawl page close failed");
        }

        info!(
            pages = pages.len(),
            found = total_found,
            errors = errors.len(),
            "crawl finished"
        );

        Ok(CrawlResult {
            pages,
            total_found,
            errors,
        })
    }
}

/// Builds a `PageInfo` with the breadcrumb padded/truncated to 4 slots:
/// at most the first 3 ancestors, then the page's own display title
fn page_info(url: &Url, display_title: &str, ancestors: &[String]) -> PageInfo {
    let mut crumbs: Vec<String> = ancestors.iter().take(3).cloned().collect();
    crumbs.push(display_title.to_string());
    crumbs.resize(4, String::new());

    let mut crumbs = crumbs.into_iter();
    PageInfo {
        url: url.to_string(),
        title: display_title.to_string(),
        depth1: crumbs.next().unwrap_or_default(),
        depth2: crumbs.next().unwrap_or_default(),
        depth3: crumbs.next().unwrap_or_default(),
        depth4: crumbs.next().unwrap_or_default(),
    }
}
