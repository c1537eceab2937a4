use std::sync::Arc;

use clap::Parser;

use crate::config::Config;
use crate::error::Result;
use crate::scraper::ChromeScraper;
use crate::server::{self, AppState};

/// Video scraper API - headless rendering and heuristic extraction
#[derive(Parser)]
#[command(name = "vidscrape")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Port to listen on
    #[arg(short, long, env = "PORT")]
    pub port: Option<u16>,

    /// Bind address
    #[arg(long, env = "VIDSCRAPE_HOST")]
    pub host: Option<String>,

    /// Browser executable path (overrides auto-discovery)
    #[arg(long, env = "VIDSCRAPE_BROWSER_PATH")]
    pub browser_path: Option<String>,
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        let mut config = Config::load()?;

        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(host) = self.host {
            config.server.host = host;
        }
        if let Some(path) = self.browser_path {
            config.browser.executable = Some(path);
        }

        let config = Arc::new(config);
        let scraper = Arc::new(ChromeScraper::new(Arc::clone(&config)));
        let app = server::router(AppState::new(scraper, &config));

        let addr = format!("{}:{}", config.server.host, config.server.port);
        let listener = tokio::net::TcpListener::bind(&addr).await?;

        tracing::info!("Video scraper API running on http://{}", addr);
        tracing::info!(
            "Usage: GET /api/scrape?limit={} (max {})",
            config.scrape.default_limit,
            config.scrape.max_limit
        );

        axum::serve(listener, app).await?;

        Ok(())
    }
}
