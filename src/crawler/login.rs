//! Pre-crawl authentication side-channel
//!
//! Two flows share one entry point. With credentials configured, a generic
//! form-filling heuristic searches for id/password/submit controls. Without
//! them, the login page is handed to the operator and the run blocks until
//! that page is closed. Either way the session state is persisted afterward
//! so the crawl and audit phases reuse it.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use crate::audit::types::{emit, AuditEvent, ProgressFn};
use crate::browser::BrowserContext;
use crate::config::LoginConfig;
use crate::crawler::IDLE_TIMEOUT;
use crate::url::normalize_url;
use crate::Result;

const ID_FIELD_SELECTOR: &str = "input[type=\"email\"], input[name*=\"id\"], \
     input[name*=\"user\"], input[name*=\"email\"], input[type=\"text\"]";
const PASSWORD_FIELD_SELECTOR: &str = "input[type=\"password\"]";
const SUBMIT_SELECTOR: &str = "button[type=\"submit\"], input[type=\"submit\"], \
     form button";

const SUBMIT_TIMEOUT: Duration = Duration::from_secs(10);

/// Runs the configured login flow and persists session state
///
/// Login failures are reported but non-fatal; the run continues
/// unauthenticated. Only failing to open a page at all is an error.
pub async fn perform_login(
    context: &Arc<dyn BrowserContext>,
    login: &LoginConfig,
    on_progress: Option<&ProgressFn>,
) -> Result<()> {
    let Some(login_url) = login.login_url.as_deref() else {
        return Ok(());
    };
    let login_url = normalize_url(login_url, None)?;

    emit(
        on_progress,
        AuditEvent::Log("로그인 프로세스 시작...".to_string()),
    );

    let mut page = context.new_page().await?;
    page.goto(&login_url, super::NAV_TIMEOUT).await?;

    let outcome = match (login.id.as_deref(), login.password.as_deref()) {
        (Some(id), Some(password)) => form_login(page.as_mut(), id, password).await,
        _ => manual_login(page.as_mut()).await,
    };

    match outcome {
        Ok(()) => info!("login flow finished"),
        Err(e) => warn!(error = %e, "login failed, continuing unauthenticated"),
    }

    if let Err(e) = page.close().await {
        warn!(error = %e, "login page close failed");
    }

    // Session persistence is best-effort; an unauthenticated crawl still runs
    let state_path = Path::new(&login.storage_state_path);
    if let Err(e) = context.save_storage_state(state_path).await {
        warn!(path = %state_path.display(), error = %e, "session state not persisted");
    }

    Ok(())
}

/// Locates the usual login form controls and submits credentials
async fn form_login(page: &mut dyn crate::browser::Page, id: &str, password: &str) -> Result<()> {
    let Some(id_selector) = page.query_first(ID_FIELD_SELECTOR).await? else {
        return Err(crate::AuditError::Crawl(
            "login form: no id/email field found".to_string(),
        ));
    };
    let Some(password_selector) = page.query_first(PASSWORD_FIELD_SELECTOR).await? else {
        return Err(crate::AuditError::Crawl(
            "login form: no password field found".to_string(),
        ));
    };

    page.fill(&id_selector, id).await?;
    page.fill(&password_selector, password).await?;

    match page.query_first(SUBMIT_SELECTOR).await? {
        Some(submit) => page.click(&submit, SUBMIT_TIMEOUT).await?,
        None => page.press("Enter").await?,
    }

    if page.wait_for_network_idle(IDLE_TIMEOUT).await.is_err() {
        info!("post-login idle wait timed out, proceeding");
    }
    Ok(())
}

/// Hands the page to the operator and blocks until it is closed
async fn manual_login(page: &mut dyn crate::browser::Page) -> Result<()> {
    info!("로그인 완료 후 창을 닫아 주세요");
    page.wait_for_close().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::browser::scripted::{Action, Script, ScriptedBrowser};

    const LOGIN_FORM: &str = r#"<html><head><title>로그인</title></head><body><form>
        <input type="text" name="userid">
        <input type="password" name="pw">
        <button type="submit">로그인</button>
    </form></body></html>"#;

    fn config(id: Option<&str>, password: Option<&str>) -> LoginConfig {
        LoginConfig {
            enabled: true,
            login_url: Some("https://ex.test/login".to_string()),
            id: id.map(str::to_string),
            password: password.map(str::to_string),
            storage_state_path: "./auth_state.json".to_string(),
        }
    }

    #[tokio::test]
    async fn test_form_login_finds_fields_then_submits() {
        let script = Script::default().with_page("https://ex.test/login", LOGIN_FORM);
        let browser = ScriptedBrowser::new(script);
        let actions = browser.actions();

        perform_login(&browser.context(), &config(Some("tester"), Some("secret")), None)
            .await
            .unwrap();

        let actions = actions.lock().unwrap();
        // Each control resolves to the first matching sub-selector
        assert!(actions.contains(&Action::Fill(
            r#"input[name*="id"]"#.to_string(),
            "tester".to_string()
        )));
        assert!(actions.contains(&Action::Fill(
            r#"input[type="password"]"#.to_string(),
            "secret".to_string()
        )));
        assert!(actions.contains(&Action::Click(r#"button[type="submit"]"#.to_string())));
        assert!(actions.iter().any(|a| matches!(a, Action::SaveState(_))));
    }

    #[tokio::test]
    async fn test_missing_password_field_is_nonfatal() {
        let script = Script::default().with_page(
            "https://ex.test/login",
            r#"<html><body><form><input type="text" name="userid"></form></body></html>"#,
        );
        let browser = ScriptedBrowser::new(script);
        let actions = browser.actions();

        perform_login(&browser.context(), &config(Some("tester"), Some("secret")), None)
            .await
            .unwrap();

        let actions = actions.lock().unwrap();
        assert!(!actions.iter().any(|a| matches!(a, Action::Fill(..))));
    }

    #[tokio::test]
    async fn test_without_credentials_waits_for_operator() {
        let script = Script::default().with_page("https://ex.test/login", LOGIN_FORM);
        let browser = ScriptedBrowser::new(script);
        let actions = browser.actions();

        perform_login(&browser.context(), &config(None, None), None)
            .await
            .unwrap();

        let actions = actions.lock().unwrap();
        assert!(actions.contains(&Action::WaitForClose));
        assert!(!actions.iter().any(|a| matches!(a, Action::Fill(..))));
    }
}
