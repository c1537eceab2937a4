use chromiumoxide::Page;
use serde::{Deserialize, Serialize};

use crate::error::{Result, VidscrapeError};

/// One playable item discovered on the rendered page.
///
/// A record is only kept when all three content fields are non-empty; no
/// partially populated record survives extraction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoRecord {
    /// Origin tag: the source element's tag name, or `"container"` for
    /// records produced by the container pass.
    #[serde(default)]
    pub kind: String,

    /// URL of the playable resource, absolute or relative.
    #[serde(default)]
    pub media_url: String,

    /// URL of a preview image.
    #[serde(default)]
    pub thumbnail_url: String,

    /// Human-readable title.
    #[serde(default)]
    pub title: String,
}

impl VideoRecord {
    /// Completeness invariant: every content field non-empty.
    pub fn is_complete(&self) -> bool {
        !self.media_url.is_empty() && !self.thumbnail_url.is_empty() && !self.title.is_empty()
    }
}

/// Two-pass heuristic extraction, evaluated against the live DOM.
///
/// Pass A walks native playable and embedded-frame elements; pass B walks
/// generic block containers carrying data attributes. Each pass keeps a
/// candidate only when media URL, thumbnail and title all resolved. The
/// passes are an unordered union: concatenation order is incidental, not a
/// ranking, and nothing deduplicates a native element from a container that
/// wraps it.
const EXTRACT_JS: &str = r#"
(() => {
    const videos = [];

    document.querySelectorAll('video, iframe').forEach(el => {
        const title = el.getAttribute('title') ||
            el.getAttribute('alt') ||
            el.getAttribute('data-title') ||
            el.closest('div')?.getAttribute('data-title') ||
            el.closest('article')?.querySelector('h1, h2, h3, h4, h5, h6')?.innerText?.trim() ||
            el.closest('div')?.querySelector('h1, h2, h3, h4, h5, h6')?.innerText?.trim();

        const mediaUrl = el.src || el.getAttribute('src');
        const thumbnailUrl = el.poster || el.getAttribute('poster');

        if (mediaUrl && thumbnailUrl && title) {
            videos.push({ kind: el.tagName, mediaUrl, thumbnailUrl, title });
        }
    });

    document.querySelectorAll('div, article, section').forEach(el => {
        const mediaUrl = el.getAttribute('data-video-url') ||
            el.getAttribute('data-video') ||
            el.querySelector('a')?.href;

        const thumbnailUrl = el.getAttribute('data-thumbnail') ||
            el.getAttribute('data-poster') ||
            el.querySelector('img')?.src;

        const title = el.getAttribute('data-title') ||
            el.getAttribute('title') ||
            el.getAttribute('aria-label') ||
            el.querySelector('h1, h2, h3, h4, h5, h6')?.innerText?.trim() ||
            el.querySelector('[class*="title"], [class*="name"], [class*="heading"]')?.innerText?.trim() ||
            el.querySelector('img')?.getAttribute('alt') ||
            el.querySelector('a')?.getAttribute('title');

        if (mediaUrl && thumbnailUrl && title) {
            videos.push({ kind: 'container', mediaUrl, thumbnailUrl, title });
        }
    });

    return videos;
})()
"#;

/// Run the heuristic passes against the page's current DOM snapshot.
///
/// Absence of matches is an empty list, not an error; only a failure of the
/// evaluation context itself errors. The completeness predicate is applied
/// again on the Rust side - the in-page filter and this one are independent
/// code paths and both must hold.
pub async fn extract(page: &Page) -> Result<Vec<VideoRecord>> {
    let evaluated = page
        .evaluate(EXTRACT_JS)
        .await
        .map_err(|e| VidscrapeError::Extraction(e.to_string()))?;

    let records: Vec<VideoRecord> = evaluated
        .into_value()
        .map_err(|e| VidscrapeError::Extraction(e.to_string()))?;

    Ok(filter_complete(records))
}

/// Final completeness filter over the combined pass results.
pub fn filter_complete(records: Vec<VideoRecord>) -> Vec<VideoRecord> {
    records
        .into_iter()
        .filter(VideoRecord::is_complete)
        .collect()
}
