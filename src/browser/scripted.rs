//! Scripted in-memory backend for testing interaction flows
//!
//! Serves canned markup per URL and simulates the behaviors the HTTP backend
//! cannot: clickable discovery, clicks that reveal an overlay or navigate
//! away, form filling and key presses. Every interaction is appended to a
//! shared action log so tests can assert on the exact sequence driven by the
//! code under test.

use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use scraper::{Html, Selector};
use url::Url;

use crate::browser::{BoundingBox, Browser, BrowserContext, Clickable, Link, Page, Viewport};
use crate::{AuditError, Result};

/// One recorded page interaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Action {
    Goto(String),
    Click(String),
    Fill(String, String),
    Press(String),
    GoBack,
    WaitForClose,
    SaveState(String),
}

/// Site behavior shared by every page the backend opens
#[derive(Default)]
pub(crate) struct Script {
    /// URL to markup; navigating anywhere else fails
    pub pages: HashMap<String, String>,
    /// Candidates surfaced for the dynamic-interaction pass
    pub clickables: Vec<Clickable>,
    /// Clicking this selector reveals the given overlay markup
    pub modal_on_click: HashMap<String, String>,
    /// Clicking this selector navigates the page to the given URL
    pub navigate_on_click: HashMap<String, String>,
}

impl Script {
    pub fn with_page(mut self, url: &str, markup: &str) -> Self {
        self.pages.insert(url.to_string(), markup.to_string());
        self
    }
}

pub(crate) struct ScriptedBrowser {
    script: Arc<Script>,
    actions: Arc<Mutex<Vec<Action>>>,
}

impl ScriptedBrowser {
    pub fn new(script: Script) -> Self {
        Self {
            script: Arc::new(script),
            actions: Arc::default(),
        }
    }

    /// Handle to the action log, valid after the browser is consumed
    pub fn actions(&self) -> Arc<Mutex<Vec<Action>>> {
        Arc::clone(&self.actions)
    }

    pub fn context(&self) -> Arc<dyn BrowserContext> {
        Arc::new(ScriptedContext {
            script: Arc::clone(&self.script),
            actions: Arc::clone(&self.actions),
        })
    }
}

#[async_trait]
impl Browser for ScriptedBrowser {
    async fn new_context(
        &self,
        _viewport: Viewport,
        _storage_state_path: Option<&Path>,
    ) -> Result<Arc<dyn BrowserContext>> {
        Ok(self.context())
    }

    async fn close(&self) -> Result<()> {
        Ok(())
    }
}

struct ScriptedContext {
    script: Arc<Script>,
    actions: Arc<Mutex<Vec<Action>>>,
}

#[async_trait]
impl BrowserContext for ScriptedContext {
    async fn new_page(&self) -> Result<Box<dyn Page>> {
        Ok(Box::new(ScriptedPage {
            script: Arc::clone(&self.script),
            actions: Arc::clone(&self.actions),
            current: None,
            history: Vec::new(),
            overlay: None,
        }))
    }

    async fn save_storage_state(&self, path: &Path) -> Result<()> {
        self.actions
            .lock()
            .unwrap()
            .push(Action::SaveState(path.to_string_lossy().into_owned()));
        Ok(())
    }
}

struct ScriptedPage {
    script: Arc<Script>,
    actions: Arc<Mutex<Vec<Action>>>,
    current: Option<Url>,
    /// Markup revealed by the last overlay-opening click
    overlay: Option<String>,
    history: Vec<Url>,
}

impl ScriptedPage {
    fn log(&self, action: Action) {
        self.actions.lock().unwrap().push(action);
    }

    /// Current markup with any open overlay appended; the lenient HTML
    /// parser reparents the trailing overlay into the document body
    fn markup(&self) -> Option<String> {
        let url = self.current.as_ref()?;
        let base = self.script.pages.get(url.as_str())?;
        match &self.overlay {
            Some(overlay) => Some(format!("{base}{overlay}")),
            None => Some(base.clone()),
        }
    }
}

#[async_trait]
impl Page for ScriptedPage {
    async fn goto(&mut self, url: &Url, _timeout: Duration) -> Result<()> {
        self.log(Action::Goto(url.to_string()));
        if !self.script.pages.contains_key(url.as_str()) {
            return Err(AuditError::NavigationTimeout {
                url: url.to_string(),
            });
        }

        if let Some(previous) = self.current.take() {
            self.history.push(previous);
        }
        self.current = Some(url.clone());
        self.overlay = None;
        Ok(())
    }

    async fn wait_for_network_idle(&mut self, _timeout: Duration) -> Result<()> {
        Ok(())
    }

    fn current_url(&self) -> Option<&Url> {
        self.current.as_ref()
    }

    async fn title(&self) -> Result<String> {
        let Some(markup) = self.markup() else {
            return Ok(String::new());
        };
        let document = Html::parse_document(&markup);
        let selector =
            Selector::parse("title").map_err(|_| AuditError::Unsupported("title selector"))?;

        Ok(document
            .select(&selector)
            .next()
            .map(|el| el.text().collect::<String>().trim().to_string())
            .unwrap_or_default())
    }

    async fn content(&self) -> Result<String> {
        self.markup()
            .ok_or(AuditError::Unsupported("no scripted document"))
    }

    async fn links(&self) -> Result<Vec<Link>> {
        let markup = self
            .markup()
            .ok_or(AuditError::Unsupported("no scripted document"))?;
        let document = Html::parse_document(&markup);
        let selector =
            Selector::parse("a[href]").map_err(|_| AuditError::Unsupported("anchor selector"))?;

        Ok(document
            .select(&selector)
            .filter_map(|el| {
                el.value().attr("href").map(|href| Link {
                    url: href.to_string(),
                    text: el.text().collect::<String>().trim().to_string(),
                })
            })
            .collect())
    }

    async fn screenshot(&self, _path: &Path) -> Result<()> {
        Err(AuditError::Unsupported("screenshot (scripted backend)"))
    }

    async fn evaluate(&self, _script: &str) -> Result<serde_json::Value> {
        Err(AuditError::Unsupported("script evaluation (scripted backend)"))
    }

    async fn bounding_box(&self, _selector: &str) -> Result<Option<BoundingBox>> {
        Ok(None)
    }

    async fn clickables(&self, _selector: &str, limit: usize) -> Result<Vec<Clickable>> {
        Ok(self.script.clickables.iter().take(limit).cloned().collect())
    }

    async fn click(&mut self, selector: &str, _timeout: Duration) -> Result<()> {
        self.log(Action::Click(selector.to_string()));

        if let Some(target) = self.script.navigate_on_click.get(selector) {
            let url = Url::parse(target).map_err(|e| AuditError::Crawl(e.to_string()))?;
            if let Some(previous) = self.current.take() {
                self.history.push(previous);
            }
            self.current = Some(url);
            self.overlay = None;
        } else if let Some(markup) = self.script.modal_on_click.get(selector) {
            self.overlay = Some(markup.clone());
        }

        Ok(())
    }

    async fn press(&mut self, key: &str) -> Result<()> {
        self.log(Action::Press(key.to_string()));
        if key == "Escape" {
            self.overlay = None;
        }
        Ok(())
    }

    async fn go_back(&mut self) -> Result<()> {
        self.log(Action::GoBack);
        self.overlay = None;
        match self.history.pop() {
            Some(previous) => {
                self.current = Some(previous);
                Ok(())
            }
            None => Err(AuditError::Unsupported("history is empty")),
        }
    }

    async fn fill(&mut self, selector: &str, value: &str) -> Result<()> {
        self.log(Action::Fill(selector.to_string(), value.to_string()));
        Ok(())
    }

    async fn query_first(&self, selector: &str) -> Result<Option<String>> {
        let Some(markup) = self.markup() else {
            return Ok(None);
        };
        let document = Html::parse_document(&markup);

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
        self.log(Action::WaitForClose);
        Ok(())
    }

    async fn close(&mut self) -> Result<()> {
        self.current = None;
        self.history.clear();
        self.overlay = None;
        Ok(())
    }
}
