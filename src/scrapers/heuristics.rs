//! Per-field resolvers for article pages.
//!
//! Each resolver is a small function from a parsed document to an optional
//! value, built from an ordered list of candidates tried with short-circuit
//! evaluation. A miss is a normal outcome and yields `None`; no resolver can
//! stop another from running.

use crate::error::{Result, ScrapeError};
use crate::models::ArticleContent;
use crate::scrapers::profiles::SiteProfile;
use crate::utils::{attr_value, class_contains, element_text, parse_selector, resolve_url};
use itertools::Itertools;
use regex::{Regex, RegexBuilder};
use scraper::{ElementRef, Html};
use url::Url;

/// Paragraphs at or below this many characters are captions and boilerplate.
pub const MIN_PARAGRAPH_CHARS: usize = 20;

/// Extract every field from an article page.
///
/// `page_url` is the article's own URL; relative image sources resolve
/// against it.
pub fn extract_content(
    html: &str,
    page_url: &Url,
    profile: &SiteProfile,
    broadcast: &BroadcastMatcher,
) -> ArticleContent {
    let document = Html::parse_document(html);

    let paragraphs = body_paragraphs(&document, &profile.body_selectors);
    let full_text = paragraphs.as_ref().map(|p| p.join(" "));
    let summary = paragraphs.as_ref().and_then(|p| p.first().cloned());

    let detected_programs = full_text
        .as_deref()
        .map(|text| detect_programs(text, &profile.program_keywords))
        .filter(|found| !found.is_empty());

    let hints = full_text.as_deref().map(|text| broadcast.hints(text));
    let has_broadcast_info = hints.as_ref().map(|h| !h.is_empty());
    let broadcast_hints = hints.filter(|h| !h.is_empty());

    ArticleContent {
        paragraphs,
        full_text,
        summary,
        published_date: published_date(&document),
        image_url: image_url(&document, &profile.image_selectors, page_url),
        meta_description: meta_description(&document),
        tags: tags(&document),
        detected_programs,
        has_broadcast_info,
        broadcast_hints,
    }
}

/// Paragraphs of the first body container that matches, longer than
/// [`MIN_PARAGRAPH_CHARS`].
pub fn body_paragraphs(document: &Html, containers: &[String]) -> Option<Vec<String>> {
    let container = containers.iter().find_map(|css| first_match(document, css))?;
    let p = parse_selector("p")?;
    let paragraphs: Vec<String> = container
        .select(&p)
        .map(|el| element_text(&el))
        .filter(|text| text.chars().count() > MIN_PARAGRAPH_CHARS)
        .collect();
    (!paragraphs.is_empty()).then_some(paragraphs)
}

/// `<time>` (attribute before text), then the `article:published_time`
/// meta tag, then any element whose class mentions a date.
pub fn published_date(document: &Html) -> Option<String> {
    first_match(document, "time")
        .and_then(|time| attr_value(&time, "datetime").or_else(|| text_of(&time)))
        .or_else(|| meta_content(document, "meta[property='article:published_time']"))
        .or_else(|| {
            let selector =
                parse_selector("[class*='date'], [class*='published'], [class*='time']")?;
            document.select(&selector).find_map(|el| text_of(&el))
        })
}

/// First selector in priority order that yields a usable image URL.
pub fn image_url(document: &Html, selectors: &[String], page_url: &Url) -> Option<String> {
    selectors.iter().find_map(|css| {
        let selector = parse_selector(css)?;
        document
            .select(&selector)
            .find_map(|el| image_source(&el))
            .and_then(|src| resolve_url(page_url, &src))
            .map(|url| url.to_string())
    })
}

fn image_source(element: &ElementRef) -> Option<String> {
    if element.value().name() == "meta" {
        attr_value(element, "content")
    } else {
        attr_value(element, "src").or_else(|| attr_value(element, "data-src"))
    }
}

/// `description` meta tag, else `og:description`.
pub fn meta_description(document: &Html) -> Option<String> {
    meta_content(document, "meta[name='description']")
        .or_else(|| meta_content(document, "meta[property='og:description']"))
}

/// Labels of link-like elements (`a`, or anything with `role="link"`)
/// carrying a class that contains `tag`, in document order.
pub fn tags(document: &Html) -> Option<Vec<String>> {
    let selector = parse_selector("a, [role='link']")?;
    let tags: Vec<String> = document
        .select(&selector)
        .filter(|el| class_contains(el, "tag"))
        .filter_map(|el| text_of(&el))
        .collect();
    (!tags.is_empty()).then_some(tags)
}

/// Keywords that occur in `text`, case-insensitively, in keyword order.
pub fn detect_programs(text: &str, keywords: &[String]) -> Vec<String> {
    let haystack = text.to_lowercase();
    keywords
        .iter()
        .filter(|keyword| haystack.contains(keyword.to_lowercase().as_str()))
        .cloned()
        .collect()
}

/// Compiled broadcast-time patterns.
#[derive(Debug, Clone)]
pub struct BroadcastMatcher {
    patterns: Vec<Regex>,
    max_hints: usize,
}

impl BroadcastMatcher {
    pub fn new(patterns: &[String], max_hints: usize) -> Result<Self> {
        let patterns = patterns
            .iter()
            .map(|p| {
                RegexBuilder::new(p)
                    .case_insensitive(true)
                    .build()
                    .map_err(|e| ScrapeError::Config(format!("bad broadcast pattern {p:?}: {e}")))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            patterns,
            max_hints,
        })
    }

    pub fn from_profile(profile: &SiteProfile) -> Result<Self> {
        Self::new(&profile.broadcast_patterns, profile.max_broadcast_hints)
    }

    /// Unique matches, pattern by pattern, capped at `max_hints`.
    pub fn hints(&self, text: &str) -> Vec<String> {
        self.patterns
            .iter()
            .flat_map(|re| re.find_iter(text).map(|m| m.as_str().to_string()))
            .unique()
            .take(self.max_hints)
            .collect()
    }
}

fn first_match<'d>(document: &'d Html, css: &str) -> Option<ElementRef<'d>> {
    let selector = parse_selector(css)?;
    document.select(&selector).next()
}

fn meta_content(document: &Html, css: &str) -> Option<String> {
    first_match(document, css).and_then(|meta| attr_value(&meta, "content"))
}

fn text_of(element: &ElementRef) -> Option<String> {
    Some(element_text(element)).filter(|t| !t.is_empty())
}
