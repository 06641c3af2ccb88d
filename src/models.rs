//! Data models for listing entries, extracted article content and feed items.
//!
//! - [`ArticleStub`]: an article reference discovered on a listing page
//! - [`ArticleContent`]: the fields extracted from the article's own page
//! - [`FeedItem`]: a stub plus (optionally) its content, the unit of output
//! - [`CrawlStats`]: per-crawl success/failure counters
//!
//! Field names match the JSON artifact. Every optional field is omitted from
//! the output when its resolver found nothing.

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// An article reference as found on a source's listing page.
///
/// `scraped_at` is fixed-width ISO-8601 UTC (`2024-01-01T10:00:00.000000Z`),
/// so plain string ordering is chronological ordering.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ArticleStub {
    /// Link text or heading, trimmed, at least 10 characters.
    pub title: String,
    /// Absolute URL on the source's own host.
    pub url: String,
    /// Fixed source identifier, e.g. `"vtm"`.
    pub source: String,
    /// Capture timestamp, assigned once when the stub is created.
    pub scraped_at: String,
    /// Raw date text from the listing card, unvalidated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    /// Raw teaser text from the listing card.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ArticleStub {
    /// Create a stub stamped with the current UTC time.
    pub fn new(title: String, url: String, source: &str) -> Self {
        Self {
            title,
            url,
            source: source.to_string(),
            scraped_at: capture_timestamp(),
            date: None,
            description: None,
        }
    }
}

/// Current time in the fixed-width form used for `scraped_at`.
pub fn capture_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Fields extracted from an article page. Each one is present only if its
/// resolver succeeded.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct ArticleContent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paragraphs: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// Raw publish date: an ISO `datetime` attribute or free text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta_description: Option<String>,
    /// Tag labels in document order, duplicates kept.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    /// Known programme names found in the body, in keyword-table order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detected_programs: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_broadcast_info: Option<bool>,
    /// Unique time/date mentions, at most five.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub broadcast_hints: Option<Vec<String>>,
}

impl ArticleContent {
    /// True when no resolver produced anything.
    pub fn is_empty(&self) -> bool {
        *self == ArticleContent::default()
    }
}

/// One entry of the output feed.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct FeedItem {
    #[serde(flatten)]
    pub stub: ArticleStub,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<ArticleContent>,
}

impl From<ArticleStub> for FeedItem {
    fn from(stub: ArticleStub) -> Self {
        Self {
            stub,
            content: None,
        }
    }
}

/// Outcome counters for one crawl over a source's stubs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CrawlStats {
    /// Pages fetched with at least one extracted field.
    pub succeeded: usize,
    /// Pages fetched but nothing could be extracted.
    pub empty: usize,
    /// Pages that could not be fetched.
    pub failed: usize,
}

impl CrawlStats {
    pub fn attempted(&self) -> usize {
        self.succeeded + self.empty + self.failed
    }
}
