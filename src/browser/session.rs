use std::time::Duration;

use chromiumoxide::browser::Browser;
use chromiumoxide::cdp::browser_protocol::network::SetUserAgentOverrideParams;
use chromiumoxide::Page;
use futures::StreamExt;
use tempfile::TempDir;
use tokio::task::JoinHandle;
use tokio::time::timeout;

use super::launcher::BrowserLauncher;
use crate::config::BrowserSettings;
use crate::error::{Result, VidscrapeError};

/// Resolves once the DOM has been parsed; does not wait for subresources.
const DOM_READY_JS: &str = r#"
new Promise(resolve => {
    if (document.readyState !== 'loading') {
        resolve(true);
    } else {
        document.addEventListener('DOMContentLoaded', () => resolve(true), { once: true });
    }
})
"#;

/// A disposable browser session: one process, one page, one request.
///
/// Never shared or pooled. Callers must invoke [`close`](Self::close) on
/// every exit path; teardown is best-effort and never masks a prior error.
pub struct ScrapeSession {
    browser: Browser,
    page: Page,
    handler_task: JoinHandle<()>,
    navigation_timeout: Duration,
    settle: Duration,
    // Held so the profile directory outlives the browser process.
    _user_data_dir: TempDir,
}

impl ScrapeSession {
    /// Launch a browser and open the session's single page.
    pub async fn launch(settings: &BrowserSettings) -> Result<Self> {
        let user_data_dir = TempDir::new()?;
        let launcher = BrowserLauncher::from_settings(settings);
        let (browser, mut handler) = launcher.launch(user_data_dir.path()).await?;

        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    tracing::debug!("Browser event error: {}", e);
                }
            }
        });

        let page = match Self::open_page(&browser, settings).await {
            Ok(page) => page,
            Err(e) => {
                Self::teardown(browser, handler_task).await;
                return Err(e);
            }
        };

        Ok(Self {
            browser,
            page,
            handler_task,
            navigation_timeout: Duration::from_secs(settings.navigation_timeout_secs),
            settle: Duration::from_millis(settings.settle_ms),
            _user_data_dir: user_data_dir,
        })
    }

    async fn open_page(browser: &Browser, settings: &BrowserSettings) -> Result<Page> {
        let page = browser
            .new_page("about:blank")
            .await
            .map_err(|e| VidscrapeError::BrowserLaunch(format!("Failed to open page: {}", e)))?;

        page.set_user_agent(SetUserAgentOverrideParams::new(
            settings.user_agent.clone(),
        ))
        .await
        .map_err(|e| VidscrapeError::BrowserLaunch(format!("Failed to set user agent: {}", e)))?;

        Ok(page)
    }

    /// Navigate to `url` and wait for the DOM to be parsed, under the hard
    /// navigation timeout. Subresources and network idle are not awaited.
    pub async fn navigate(&self, url: &str) -> Result<()> {
        tracing::info!("Navigating to {}", url);

        let nav = async {
            self.page
                .goto(url)
                .await
                .map_err(|e| VidscrapeError::Navigation(e.to_string()))?;

            self.page
                .evaluate(DOM_READY_JS)
                .await
                .map_err(|e| VidscrapeError::Navigation(e.to_string()))?;

            Ok(())
        };

        match timeout(self.navigation_timeout, nav).await {
            Ok(result) => result,
            Err(_) => Err(VidscrapeError::NavigationTimeout(
                self.navigation_timeout.as_secs(),
            )),
        }
    }

    /// Fixed settling delay, run inside the page's own execution context so
    /// client-side rendering gets a chance to materialize content.
    pub async fn settle(&self) -> Result<()> {
        let js = format!(
            "new Promise(resolve => setTimeout(resolve, {}))",
            self.settle.as_millis()
        );

        self.page
            .evaluate(js)
            .await
            .map_err(|e| VidscrapeError::Extraction(e.to_string()))?;

        Ok(())
    }

    /// The session's single page.
    pub fn page(&self) -> &Page {
        &self.page
    }

    /// Close the browser process. Best-effort: failures are logged and
    /// swallowed so they never mask the error that led here.
    pub async fn close(self) {
        Self::teardown(self.browser, self.handler_task).await;
    }

    async fn teardown(mut browser: Browser, handler_task: JoinHandle<()>) {
        if let Err(e) = browser.close().await {
            tracing::debug!("Browser close failed: {}", e);
        }
        let _ = browser.wait().await;
        handler_task.abort();
    }
}
