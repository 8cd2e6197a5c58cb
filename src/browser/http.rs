//! HTTP-backed browser implementation
//!
//! Navigation is a plain GET and DOM questions are answered from the parsed
//! response body. No scripts run, so everything JavaScript-dependent
//! (screenshots, evaluation, clicking) reports `Unsupported` and the
//! pipeline degrades per its recovery policy. Cookies are kept in the
//! client's jar, so a heuristic form login performed in one phase carries
//! into the next within the same process.

use crate::browser::{BoundingBox, Browser, BrowserContext, Clickable, Link, Page, Viewport};
use crate::{AuditError, Result};
use async_trait::async_trait;
use reqwest::Client;
use scraper::{Html, Selector};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// Browser resource backed by a shared HTTP client
pub struct HttpBrowser {
    client: Client,
}

impl HttpBrowser {
    /// Builds the HTTP client and wraps it as a browser resource
    ///
    /// Failure here is the fatal initialization case: the caller converts it
    /// into `AuditError::Browser` with a remediation hint.
    pub fn launch() -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("jindan/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .cookie_store(true)
            .gzip(true)
            .brotli(true)
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Browser for HttpBrowser {
    async fn new_context(
        &self,
        _viewport: Viewport,
        storage_state_path: Option<&Path>,
    ) -> Result<Arc<dyn BrowserContext>> {
        if let Some(path) = storage_state_path {
            // Session blobs cannot be restored into the in-process jar
            tracing::warn!(
                "HTTP backend cannot restore storage state from {}; continuing without it",
                path.display()
            );
        }

        Ok(Arc::new(HttpContext {
            client: self.client.clone(),
        }))
    }

    async fn close(&self) -> Result<()> {
        Ok(())
    }
}

struct HttpContext {
    client: Client,
}

#[async_trait]
impl BrowserContext for HttpContext {
    async fn new_page(&self) -> Result<Box<dyn Page>> {
        Ok(Box::new(HttpPage {
            client: self.client.clone(),
            current: None,
            history: Vec::new(),
        }))
    }

    async fn save_storage_state(&self, _path: &Path) -> Result<()> {
        Err(AuditError::Unsupported(
            "storage state persistence (HTTP backend)",
        ))
    }
}

struct HttpPage {
    client: Client,
    /// Current document: final URL after redirects plus response body
    current: Option<(Url, String)>,
    history: Vec<(Url, String)>,
}

impl HttpPage {
    fn document(&self) -> Result<&(Url, String)> {
        self.current
            .as_ref()
            .ok_or(AuditError::Unsupported("page accessed before navigation"))
    }
}

#[async_trait]
impl Page for HttpPage {
    async fn goto(&mut self, url: &Url, timeout: Duration) -> Result<()> {
        let request = self.client.get(url.clone()).send();

        let response = tokio::time::timeout(timeout, request)
            .await
            .map_err(|_| AuditError::NavigationTimeout {
                url: url.to_string(),
            })?
            .map_err(|source| AuditError::Http {
                url: url.to_string(),
                source,
            })?;

        let final_url = response.url().clone();
        let body = response.text().await.map_err(|source| AuditError::Http {
            url: url.to_string(),
            source,
        })?;

        if let Some(previous) = self.current.take() {
            self.history.push(previous);
        }
        self.current = Some((final_url, body));
        Ok(())
    }

    async fn wait_for_network_idle(&mut self, _timeout: Duration) -> Result<()> {
        // A completed GET is as idle as this backend gets
        Ok(())
    }

    fn current_url(&self) -> Option<&Url> {
        self.current.as_ref().map(|(url, _)| url)
    }

    async fn title(&self) -> Result<String> {
        let (_, html) = self.document()?;
        let document = Html::parse_document(html);
        let selector = Selector::parse("title").map_err(|_| {
            AuditError::Unsupported("title selector")
        })?;

        Ok(document
            .select(&selector)
            .next()
            .map(|el| collapse_whitespace(&el.text().collect::<String>()))
            .unwrap_or_default())
    }

    async fn content(&self) -> Result<String> {
        Ok(self.document()?.1.clone())
    }

    async fn links(&self) -> Result<Vec<Link>> {
        let (_, html) = self.document()?;
        let document = Html::parse_document(html);
        let selector =
            Selector::parse("a[href]").map_err(|_| AuditError::Unsupported("anchor selector"))?;

        Ok(document
            .select(&selector)
            .filter_map(|el| {
                el.value().attr("href").map(|href| Link {
                    url: href.to_string(),
                    text: collapse_whitespace(&el.text().collect::<String>()),
                })
            })
            .collect())
    }

    async fn screenshot(&self, _path: &Path) -> Result<()> {
        Err(AuditError::Unsupported("screenshot (HTTP backend)"))
    }

    async fn evaluate(&self, _script: &str) -> Result<serde_json::Value> {
        Err(AuditError::Unsupported("script evaluation (HTTP backend)"))
    }

    async fn bounding_box(&self, _selector: &str) -> Result<Option<BoundingBox>> {
        // No layout engine; bounding boxes are silently absent
        Ok(None)
    }

    async fn clickables(&self, _selector: &str, _limit: usize) -> Result<Vec<Clickable>> {
        // Clicking has no effect without scripts, so offer no candidates
        Ok(Vec::new())
    }

    async fn click(&mut self, _selector: &str, _timeout: Duration) -> Result<()> {
        Err(AuditError::Unsupported("click (HTTP backend)"))
    }

    async fn press(&mut self, _key: &str) -> Result<()> {
        Err(AuditError::Unsupported("keyboard input (HTTP backend)"))
    }

    async fn go_back(&mut self) -> Result<()> {
        match self.history.pop() {
            Some(previous) => {
                self.current = Some(previous);
                Ok(())
            }
            None => Err(AuditError::Unsupported("history is empty")),
        }
    }

    async fn fill(&mut self, _selector: &str, _value: &str) -> Result<()> {
        Err(AuditError::Unsupported("form fill (HTTP backend)"))
    }

    async fn query_first(&self, selector: &str) -> Result<Option<String>> {
        let (_, html) = self.document()?;
        let document = Html::parse_document(html);

        for part in selector.split(',') {
            let part = part.trim();
            let Ok(parsed) = Selector::parse(part) else {
                continue;
            };
            if document.select(&parsed).next().is_some() {
                return Ok(Some(part.to_string()));
            }
        }

        Ok(None)
    }

    async fn wait_for_close(&mut self) -> Result<()> {
        Err(AuditError::Unsupported(
            "interactive login window (HTTP backend)",
        ))
    }

    async fn close(&mut self) -> Result<()> {
        self.current = None;
        self.history.clear();
        Ok(())
    }
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn serve(html: &str) -> (MockServer, Url) {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(200).set_body_string(html.to_string()))
            .mount(&server)
            .await;
        let url = Url::parse(&server.uri()).unwrap();
        (server, url)
    }

    #[tokio::test]
    async fn test_goto_and_title() {
        let (_server, url) = serve("<html><head><title>  Hello  World </title></head></html>").await;
        let browser = HttpBrowser::launch().unwrap();
        let context = browser.new_context(Viewport::default(), None).await.unwrap();
        let mut page = context.new_page().await.unwrap();

        page.goto(&url, Duration::from_secs(5)).await.unwrap();
        assert_eq!(page.title().await.unwrap(), "Hello World");
    }

    #[tokio::test]
    async fn test_links_extraction() {
        let html = r#"<html><body>
            <a href="/a">Page A</a>
            <a href="https://other.test/">External</a>
            <a name="anchor-without-href">skip</a>
        </body></html>"#;
        let (_server, url) = serve(html).await;
        let browser = HttpBrowser::launch().unwrap();
        let context = browser.new_context(Viewport::default(), None).await.unwrap();
        let mut page = context.new_page().await.unwrap();

        page.goto(&url, Duration::from_secs(5)).await.unwrap();
        let links = page.links().await.unwrap();

        assert_eq!(links.len(), 2);
        assert_eq!(links[0].url, "/a");
        assert_eq!(links[0].text, "Page A");
    }

    #[tokio::test]
    async fn test_query_first_picks_matching_branch() {
        let html = r#"<html><body><div class="dropdown-menu">x</div></body></html>"#;
        let (_server, url) = serve(html).await;
        let browser = HttpBrowser::launch().unwrap();
        let context = browser.new_context(Viewport::default(), None).await.unwrap();
        let mut page = context.new_page().await.unwrap();

        page.goto(&url, Duration::from_secs(5)).await.unwrap();
        let hit = page
            .query_first(".modal, .layer-popup, .dropdown-menu, [role=\"dialog\"]")
            .await
            .unwrap();

        assert_eq!(hit.as_deref(), Some(".dropdown-menu"));
    }

    #[tokio::test]
    async fn test_unsupported_operations() {
        let browser = HttpBrowser::launch().unwrap();
        let context = browser.new_context(Viewport::default(), None).await.unwrap();
        let mut page = context.new_page().await.unwrap();

        assert!(matches!(
            page.evaluate("1 + 1").await,
            Err(AuditError::Unsupported(_))
        ));
        assert!(matches!(
            page.screenshot(Path::new("/tmp/x.png")).await,
            Err(AuditError::Unsupported(_))
        ));
    }
}
