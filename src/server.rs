use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json};
use axum::routing::get;
use axum::Router;
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::sync::Semaphore;
use tower_http::cors::CorsLayer;

use crate::config::Config;
use crate::error::VidscrapeError;
use crate::scraper::VideoScraper;

/// Shared server state
#[derive(Clone)]
pub struct AppState {
    scraper: Arc<dyn VideoScraper>,
    /// Admission control for browser sessions. `None` leaves concurrency
    /// unbounded: N in-flight requests run N full browser processes. Set
    /// `scrape.max_sessions` to bound it.
    limiter: Option<Arc<Semaphore>>,
    default_limit: u32,
    max_limit: u32,
}

impl AppState {
    pub fn new(scraper: Arc<dyn VideoScraper>, config: &Config) -> Self {
        let limiter = config
            .scrape
            .max_sessions
            .map(|n| Arc::new(Semaphore::new(n)));

        Self {
            scraper,
            limiter,
            default_limit: config.scrape.default_limit,
            max_limit: config.scrape.max_limit,
        }
    }
}

/// Error responses the API surfaces
#[derive(Debug)]
enum ApiError {
    /// Rejected before any browser work happens.
    InvalidLimit,
    /// Pipeline failure after validation.
    ScrapeFailed(String),
}

impl From<VidscrapeError> for ApiError {
    fn from(e: VidscrapeError) -> Self {
        match e {
            VidscrapeError::InvalidParameter(_) => ApiError::InvalidLimit,
            other => ApiError::ScrapeFailed(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        match self {
            ApiError::InvalidLimit => (
                StatusCode::BAD_REQUEST,
                Json(json!({
                    "error": "Limit must be an integer between 1 and 100"
                })),
            )
                .into_response(),
            ApiError::ScrapeFailed(message) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "success": false,
                    "error": "Failed to scrape videos",
                    "message": message
                })),
            )
                .into_response(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ScrapeParams {
    limit: Option<String>,
}

/// Parse and validate the caller-supplied limit. The raw string is kept so
/// non-numeric input rejects with the fixed envelope instead of a framework
/// rejection.
fn parse_limit(raw: Option<&str>, default: u32, max: u32) -> crate::error::Result<u32> {
    let Some(raw) = raw else {
        return Ok(default);
    };

    raw.trim()
        .parse::<i64>()
        .ok()
        .filter(|n| (1..=i64::from(max)).contains(n))
        .map(|n| n as u32)
        .ok_or_else(|| VidscrapeError::InvalidParameter(raw.to_string()))
}

/// Scrape endpoint
async fn scrape(
    State(state): State<AppState>,
    Query(params): Query<ScrapeParams>,
) -> Result<Json<Value>, ApiError> {
    let limit = parse_limit(params.limit.as_deref(), state.default_limit, state.max_limit)?;

    let _permit = match &state.limiter {
        Some(semaphore) => Some(
            Arc::clone(semaphore)
                .acquire_owned()
                .await
                .map_err(|e| ApiError::ScrapeFailed(e.to_string()))?,
        ),
        None => None,
    };

    tracing::info!("Scraping with limit: {}", limit);

    let videos = state.scraper.scrape(limit).await.map_err(|e| {
        tracing::error!("Scrape failed: {}", e);
        ApiError::from(e)
    })?;

    Ok(Json(json!({
        "success": true,
        "count": videos.len(),
        "limit": limit,
        "videos": videos
    })))
}

/// Health check endpoint
async fn health() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "message": "Video scraper API is running"
    }))
}

/// Root endpoint with usage instructions
async fn usage() -> impl IntoResponse {
    Json(json!({
        "message": "Video Scraper API",
        "endpoints": {
            "/api/scrape": "GET - Scrape videos (accepts ?limit parameter, default: 20, max: 100)",
            "/api/health": "GET - Health check"
        },
        "example": "/api/scrape?limit=10"
    }))
}

/// Build the application router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/scrape", get(scrape))
        .route("/api/health", get(health))
        .route("/", get(usage))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
