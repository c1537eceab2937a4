use thiserror::Error;

#[derive(Error, Debug)]
pub enum VidscrapeError {
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Browser launch failed: {0}")]
    BrowserLaunch(String),

    #[error("Navigation timed out after {0}s")]
    NavigationTimeout(u64),

    #[error("Navigation failed: {0}")]
    Navigation(String),

    #[error("Page evaluation failed: {0}")]
    Extraction(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, VidscrapeError>;
