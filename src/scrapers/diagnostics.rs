//! Pre-flight structure report for a listing page.
//!
//! Counts what the link strategies and the card heuristics would see, so a
//! markup change on the site shows up in the logs before a crawl returns
//! nothing.

use crate::scrapers::profiles::SiteProfile;
use crate::utils::{parse_selector, resolve_url, same_host};
use scraper::Html;
use tracing::info;
use url::Url;

#[derive(Debug, Default, Clone, PartialEq)]
pub struct ListingDiagnostics {
    /// Match count per link strategy, in chain order.
    pub strategy_matches: Vec<(String, usize)>,
    pub links: usize,
    pub internal_links: usize,
    pub articles: usize,
    pub cards: usize,
    pub time_elements: usize,
}

impl ListingDiagnostics {
    pub fn from_document(document: &Html, profile: &SiteProfile, base: &Url) -> Self {
        let count = |css: &str| {
            parse_selector(css)
                .map(|s| document.select(&s).count())
                .unwrap_or(0)
        };

        let strategy_matches = profile
            .link_strategies
            .iter()
            .map(|s| (s.name.clone(), count(&s.selector)))
            .collect();

        let hrefs: Vec<&str> = parse_selector("a[href]")
            .map(|s| {
                document
                    .select(&s)
                    .filter_map(|a| a.value().attr("href"))
                    .collect()
            })
            .unwrap_or_default();
        let internal_links = hrefs
            .iter()
            .filter_map(|href| resolve_url(base, href))
            .filter(|url| same_host(url, base))
            .count();

        Self {
            strategy_matches,
            links: hrefs.len(),
            internal_links,
            articles: count("article"),
            cards: count("[class*='card']:not(a)"),
            time_elements: count("time"),
        }
    }

    /// The strategy the listing extractor would pick.
    pub fn winning_strategy(&self) -> Option<&str> {
        self.strategy_matches
            .iter()
            .find(|(_, n)| *n > 0)
            .map(|(name, _)| name.as_str())
    }

    pub fn log(&self, source: &str) {
        for (name, matches) in &self.strategy_matches {
            info!(source, strategy = %name, matches, "Link strategy matches");
        }
        info!(
            source,
            links = self.links,
            internal_links = self.internal_links,
            articles = self.articles,
            cards = self.cards,
            time_elements = self.time_elements,
            winner = self.winning_strategy().unwrap_or("none"),
            "Listing structure"
        );
    }
}
