//! Declarative site profiles.
//!
//! Everything that varies between press sites lives here as data: the link
//! strategy chain, the body and image selector priorities, and the keyword
//! and pattern tables used by the skip filter and the content heuristics.
//! A YAML config can override any field; omitted fields fall back to the
//! VTM defaults below.

use serde::{Deserialize, Serialize};

/// One step of the listing link-selection chain.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct LinkStrategy {
    /// Short label used in logs and diagnostics.
    pub name: String,
    /// CSS selector matching candidate `<a>` elements.
    pub selector: String,
}

impl LinkStrategy {
    fn new(name: &str, selector: &str) -> Self {
        Self {
            name: name.to_string(),
            selector: selector.to_string(),
        }
    }
}

/// Everything the pipeline needs to know about a single press site.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SiteProfile {
    /// Identifier written into every item's `source` field.
    pub source: String,
    /// Scheme and host; relative links are resolved against it.
    pub base_url: String,
    /// Listing page, when it is not the base URL itself.
    pub listing_url: Option<String>,
    /// Tried in order; the first one with any match is used.
    pub link_strategies: Vec<LinkStrategy>,
    /// Article body containers, first match wins.
    pub body_selectors: Vec<String>,
    /// Hero image candidates, first match wins. `meta` elements yield their
    /// `content`, everything else its `src`.
    pub image_selectors: Vec<String>,
    /// Substrings marking boilerplate pages, matched case-insensitively.
    pub skip_keywords: Vec<String>,
    /// Programme names, matched case-insensitively, in reporting order.
    pub program_keywords: Vec<String>,
    /// Case-insensitive regexes for airing times and dates.
    pub broadcast_patterns: Vec<String>,
    pub max_broadcast_hints: usize,
}

impl SiteProfile {
    pub fn listing_url(&self) -> &str {
        self.listing_url.as_deref().unwrap_or(&self.base_url)
    }
}

impl Default for SiteProfile {
    fn default() -> Self {
        vtm()
    }
}

const WEEKDAYS: &str = "maandag|dinsdag|woensdag|donderdag|vrijdag|zaterdag|zondag";
const MONTHS: &str =
    "januari|februari|maart|april|mei|juni|juli|augustus|september|oktober|november|december";

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Patterns for airing times and Dutch date mentions.
pub fn default_broadcast_patterns() -> Vec<String> {
    vec![
        r"\b\d{1,2}(?:u|:)\d{2}\b".to_string(),
        format!(r"\b(?:{WEEKDAYS})\s+\d{{1,2}}\s+(?:{MONTHS})\b"),
        format!(r"\b\d{{1,2}}\s+(?:{MONTHS})\b"),
    ]
}

/// VTM press site, <https://communicatie.vtm.be>.
pub fn vtm() -> SiteProfile {
    SiteProfile {
        source: "vtm".to_string(),
        base_url: "https://communicatie.vtm.be".to_string(),
        listing_url: None,
        link_strategies: vec![
            LinkStrategy::new("primary card link", "a.card__link"),
            LinkStrategy::new("article link", "article a[href]"),
            LinkStrategy::new("internal link", "a[href^='/']"),
            LinkStrategy::new("alternate card", ".card a[href], .teaser a[href]"),
            LinkStrategy::new("post link", "a.post-link, .post a[href]"),
        ],
        body_selectors: strings(&[
            "article",
            ".article-content",
            ".content",
            "main",
            ".post-content",
        ]),
        image_selectors: strings(&[
            "img.hero-image",
            ".hero img",
            "img.featured-image",
            ".featured-image img",
            "article img",
            "meta[property='og:image']",
        ]),
        skip_keywords: strings(&[
            "cookie",
            "privacy",
            "disclaimer",
            "contact",
            "voorwaarden",
            "terms",
            "vacature",
            "careers",
            "jobs",
            "over ons",
            "over-ons",
            "login",
            "inloggen",
        ]),
        program_keywords: strings(&[
            "the voice",
            "thuis",
            "familie",
            "vtm nieuws",
            "blind getrouwd",
            "lego masters",
            "dancing with the stars",
            "the masked singer",
            "hotel romantiek",
            "de verraders",
            "k3",
        ]),
        broadcast_patterns: default_broadcast_patterns(),
        max_broadcast_hints: 5,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listing_url_defaults_to_base() {
        let profile = vtm();
        assert_eq!(profile.listing_url(), "https://communicatie.vtm.be");

        let profile = SiteProfile {
            listing_url: Some("https://communicatie.vtm.be/nieuws".to_string()),
            ..vtm()
        };
        assert_eq!(profile.listing_url(), "https://communicatie.vtm.be/nieuws");
    }

    #[test]
    fn test_partial_yaml_falls_back_to_defaults() {
        let yaml = "source: vier\nbase_url: https://pers.vier.be\n";
        let profile: SiteProfile = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(profile.source, "vier");
        assert_eq!(profile.base_url, "https://pers.vier.be");
        assert_eq!(profile.link_strategies, vtm().link_strategies);
        assert_eq!(profile.max_broadcast_hints, 5);
    }

    #[test]
    fn test_program_keywords_are_lowercase() {
        for keyword in vtm().program_keywords {
            assert_eq!(keyword, keyword.to_lowercase());
        }
    }
}
