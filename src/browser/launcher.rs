use std::path::{Path, PathBuf};

use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::handler::Handler;

use super::discovery;
use crate::config::BrowserSettings;
use crate::error::{Result, VidscrapeError};

/// Launch flags required for constrained container hosts; removing any of
/// them breaks rendering there.
const LAUNCH_ARGS: &[&str] = &[
    "--no-sandbox",
    "--disable-setuid-sandbox",
    "--disable-dev-shm-usage",
    "--disable-accelerated-2d-canvas",
    "--no-first-run",
    "--no-zygote",
    "--disable-gpu",
    "--disable-web-security",
    "--disable-features=VizDisplayCompositor",
    "--single-process",
];

/// Browser launcher that starts a hardened headless instance
pub struct BrowserLauncher {
    executable: Option<PathBuf>,
}

impl BrowserLauncher {
    /// Create a launcher from browser settings. A configured executable
    /// override wins; otherwise platform discovery runs, and if nothing
    /// resolves the engine's bundled default is used.
    pub fn from_settings(settings: &BrowserSettings) -> Self {
        let executable = match &settings.executable {
            Some(path) => Some(PathBuf::from(shellexpand::tilde(path).to_string())),
            None => discovery::discover(),
        };

        Self { executable }
    }

    /// Launch the browser with a disposable user-data directory and return
    /// the CDP connection plus its event handler stream.
    pub async fn launch(&self, user_data_dir: &Path) -> Result<(Browser, Handler)> {
        let mut builder = BrowserConfig::builder()
            .no_sandbox()
            .user_data_dir(user_data_dir)
            .args(LAUNCH_ARGS.iter().copied());

        match &self.executable {
            Some(path) => {
                tracing::debug!("Using rendering engine at {:?}", path);
                builder = builder.chrome_executable(path);
            }
            None => {
                tracing::debug!("No engine resolved, using bundled default");
            }
        }

        let config = builder.build().map_err(VidscrapeError::BrowserLaunch)?;

        Browser::launch(config)
            .await
            .map_err(|e| VidscrapeError::BrowserLaunch(e.to_string()))
    }
}
