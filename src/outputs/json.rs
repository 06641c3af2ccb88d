//! JSON feed artifact.
//!
//! The feed is a single UTF-8 JSON array of [`FeedItem`]s, indented for
//! humans, newest item first. Absent optional fields are omitted.

use crate::error::Result;
use crate::models::FeedItem;
use std::path::Path;
use tokio::fs;
use tracing::{info, instrument};

/// Serialize `items` and write them to `path`, replacing any previous file.
///
/// # Arguments
///
/// * `items` - Feed items, already in output order
/// * `path` - Destination file; its parent must exist
///
/// # Returns
///
/// `Ok(())` on success, or an error if serialization or the write fails.
#[instrument(level = "info", skip_all, fields(path = %path.display(), count = items.len()))]
pub async fn write_feed(items: &[FeedItem], path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(items)?;
    fs::write(path, json).await?;
    info!("Wrote JSON feed");
    Ok(())
}
