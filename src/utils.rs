//! Helpers shared by the listing extractor, the content heuristics and the
//! output writers: element text, selector parsing, URL resolution, and a
//! few string and filesystem utilities.

use scraper::{ElementRef, Selector};
use std::error::Error;
use std::path::Path;
use tokio::fs;
use tracing::{info, instrument, warn};
use url::Url;

/// Truncate a string for logging purposes.
///
/// Strings longer than `max` bytes are cut at the nearest char boundary at or
/// below `max` and suffixed with `"…(+N bytes)"`.
///
/// ```ignore
/// assert_eq!(truncate_for_log("short", 100), "short");
/// ```
pub fn truncate_for_log(s: &str, max: usize) -> String {
    if s.len() <= max {
        return s.to_string();
    }
    let mut cut = max;
    while !s.is_char_boundary(cut) {
        cut -= 1;
    }
    format!("{}…(+{} bytes)", &s[..cut], s.len() - cut)
}

/// Join text fragments and collapse runs of whitespace into single spaces.
pub fn collapse_whitespace<'a>(parts: impl IntoIterator<Item = &'a str>) -> String {
    let mut out = String::new();
    for part in parts {
        for word in part.split_whitespace() {
            if !out.is_empty() {
                out.push(' ');
            }
            out.push_str(word);
        }
    }
    out
}

/// Whitespace-normalized text content of an element.
pub fn element_text(element: &ElementRef) -> String {
    collapse_whitespace(element.text())
}

/// Parse a CSS selector, logging instead of failing on bad input.
pub fn parse_selector(css: &str) -> Option<Selector> {
    match Selector::parse(css) {
        Ok(selector) => Some(selector),
        Err(e) => {
            warn!(selector = css, error = %e, "Invalid CSS selector; skipping");
            None
        }
    }
}

/// True when any class of the element contains `needle`.
pub fn class_contains(element: &ElementRef, needle: &str) -> bool {
    element.value().classes().any(|class| class.contains(needle))
}

/// Non-empty, trimmed attribute value.
pub fn attr_value(element: &ElementRef, name: &str) -> Option<String> {
    element
        .value()
        .attr(name)
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

/// Resolve `href` against `base`, returning an absolute http(s) URL.
pub fn resolve_url(base: &Url, href: &str) -> Option<Url> {
    let resolved = base.join(href.trim()).ok()?;
    matches!(resolved.scheme(), "http" | "https").then_some(resolved)
}

/// Host comparison that ignores a leading `www.`.
pub fn same_host(a: &Url, b: &Url) -> bool {
    match (a.host_str(), b.host_str()) {
        (Some(a), Some(b)) => {
            a.trim_start_matches("www.")
                .eq_ignore_ascii_case(b.trim_start_matches("www."))
        }
        _ => false,
    }
}

/// Ensure the directory that will hold `path` exists and is writable.
///
/// Creates missing parents, then writes and removes a probe file next to the
/// target.
#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub async fn ensure_writable_parent(path: &Path) -> Result<(), Box<dyn Error>> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => std::path::PathBuf::from("."),
    };
    fs::create_dir_all(&parent).await?;
    let probe = parent.join(".__probe_write__");
    fs::write(&probe, b"").await?;
    let _ = fs::remove_file(&probe).await;
    info!(dir = %parent.display(), "Output directory is writable");
    Ok(())
}
