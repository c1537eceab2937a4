pub mod extract;

pub use extract::VideoRecord;

use std::sync::Arc;

use async_trait::async_trait;

use crate::browser::ScrapeSession;
use crate::config::Config;
use crate::error::Result;

/// The seam between the HTTP plumbing and the rendering pipeline.
#[async_trait]
pub trait VideoScraper: Send + Sync {
    /// Render the target page for `limit` records and extract them.
    async fn scrape(&self, limit: u32) -> Result<Vec<VideoRecord>>;
}

/// Production pipeline: disposable Chromium session per request.
pub struct ChromeScraper {
    config: Arc<Config>,
}

impl ChromeScraper {
    pub fn new(config: Arc<Config>) -> Self {
        Self { config }
    }
}

#[async_trait]
impl VideoScraper for ChromeScraper {
    async fn scrape(&self, limit: u32) -> Result<Vec<VideoRecord>> {
        let url = self.config.scrape.page_url(limit);
        let session = ScrapeSession::launch(&self.config.browser).await?;

        run_session(session, &url).await
    }
}

/// Session operations the pipeline drives. Narrow on purpose so the
/// teardown contract can be exercised without a real browser.
#[async_trait]
pub(crate) trait SessionOps: Send {
    async fn navigate(&self, url: &str) -> Result<()>;
    async fn settle(&self) -> Result<()>;
    async fn extract(&self) -> Result<Vec<VideoRecord>>;
    async fn close(self);
}

#[async_trait]
impl SessionOps for ScrapeSession {
    async fn navigate(&self, url: &str) -> Result<()> {
        ScrapeSession::navigate(self, url).await
    }

    async fn settle(&self) -> Result<()> {
        ScrapeSession::settle(self).await
    }

    async fn extract(&self) -> Result<Vec<VideoRecord>> {
        extract::extract(self.page()).await
    }

    async fn close(self) {
        ScrapeSession::close(self).await;
    }
}

/// Drive navigate, settle and extract, then close the session on every
/// exit path. An error after launch returns zero records - there is no
/// partial-result behavior.
pub(crate) async fn run_session<S: SessionOps>(session: S, url: &str) -> Result<Vec<VideoRecord>> {
    let result = drive(&session, url).await;
    session.close().await;
    result
}

async fn drive<S: SessionOps>(session: &S, url: &str) -> Result<Vec<VideoRecord>> {
    session.navigate(url).await?;
    session.settle().await?;
    session.extract().await
}
