use std::path::PathBuf;

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

use crate::error::{Result, VidscrapeError};

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Browser configuration
    #[serde(default)]
    pub browser: BrowserSettings,

    /// Scrape pipeline configuration
    #[serde(default)]
    pub scrape: ScrapeConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address
    #[serde(default = "default_host")]
    pub host: String,

    /// Listen port
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrowserSettings {
    /// Browser executable path (overrides auto-discovery)
    pub executable: Option<String>,

    /// User agent sent with every page
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Hard navigation timeout in seconds
    #[serde(default = "default_navigation_timeout_secs")]
    pub navigation_timeout_secs: u64,

    /// Fixed settling delay after navigation, in milliseconds
    #[serde(default = "default_settle_ms")]
    pub settle_ms: u64,
}

impl Default for BrowserSettings {
    fn default() -> Self {
        Self {
            executable: None,
            user_agent: default_user_agent(),
            navigation_timeout_secs: default_navigation_timeout_secs(),
            settle_ms: default_settle_ms(),
        }
    }
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36".to_string()
}

fn default_navigation_timeout_secs() -> u64 {
    60
}

fn default_settle_ms() -> u64 {
    3000
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrapeConfig {
    /// Base URL of the target site
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Limit applied when the caller omits one
    #[serde(default = "default_limit")]
    pub default_limit: u32,

    /// Upper bound on the caller-supplied limit
    #[serde(default = "default_max_limit")]
    pub max_limit: u32,

    /// Cap on concurrent browser sessions. `None` leaves admission
    /// unbounded: N in-flight requests launch N full browser processes.
    #[serde(default)]
    pub max_sessions: Option<usize>,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            default_limit: default_limit(),
            max_limit: default_max_limit(),
            max_sessions: None,
        }
    }
}

fn default_base_url() -> String {
    "https://batibot.org".to_string()
}

fn default_limit() -> u32 {
    20
}

fn default_max_limit() -> u32 {
    100
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            browser: BrowserSettings::default(),
            scrape: ScrapeConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from all sources (defaults, file, env)
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        let config: Config = Figment::new()
            // Start with defaults
            .merge(Serialized::defaults(Config::default()))
            // Merge config file if exists
            .merge(Toml::file(&config_path))
            // Merge environment variables (VIDSCRAPE_SERVER__PORT etc.)
            .merge(Env::prefixed("VIDSCRAPE_").split("__"))
            .extract()
            .map_err(|e| VidscrapeError::Config(e.to_string()))?;

        Ok(config)
    }

    /// Get the configuration file path
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("vidscrape")
            .join("config.toml")
    }
}

impl ScrapeConfig {
    /// Target page URL for a given record limit
    pub fn page_url(&self, limit: u32) -> String {
        format!(
            "{}/load_more_random.php?start=0&limit={}",
            self.base_url.trim_end_matches('/'),
            limit
        )
    }
}
