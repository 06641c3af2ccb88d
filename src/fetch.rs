//! Page fetching.
//!
//! [`PageFetcher`] is the one seam between the pipeline and the network: it
//! takes a URL and returns the page body, or a [`ScrapeError`] describing why
//! it could not. Parsing happens in the caller so that `scraper::Html`
//! (which is not `Send`) never lives across an `.await`.
//!
//! [`HttpFetcher`] is the production implementation, a single long-lived
//! `reqwest::Client` with a fixed timeout and identification header, shared
//! by every source in a run for connection reuse. One attempt per URL; no
//! retries.

use crate::error::{Result, ScrapeError};
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, instrument, warn};

pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch `url` and return its body as text.
    async fn fetch_page(&self, url: &str) -> Result<String>;
}

pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(user_agent: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    #[instrument(level = "debug", skip(self))]
    async fn fetch_page(&self, url: &str) -> Result<String> {
        let response = self.client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                ScrapeError::Timeout {
                    url: url.to_string(),
                }
            } else {
                ScrapeError::Http(e)
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!(%url, status = status.as_u16(), "Non-success status");
            return Err(ScrapeError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        debug!(%url, bytes = body.len(), "Fetched page");
        Ok(body)
    }
}
