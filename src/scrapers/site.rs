//! A configured press site: one [`SiteProfile`] wired to a fetcher.

use crate::error::{Result, ScrapeError};
use crate::fetch::PageFetcher;
use crate::models::{CrawlStats, FeedItem};
use crate::scrapers::Scraper;
use crate::scrapers::crawl::Crawler;
use crate::scrapers::diagnostics::ListingDiagnostics;
use crate::scrapers::filter::retain_relevant;
use crate::scrapers::heuristics::BroadcastMatcher;
use crate::scrapers::listing::{ListingOutcome, extract_stubs};
use crate::scrapers::profiles::SiteProfile;
use async_trait::async_trait;
use scraper::{Html, Selector};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, instrument};
use url::Url;

/// Items and counters from one run over a site.
#[derive(Debug)]
pub struct SiteReport {
    pub items: Vec<FeedItem>,
    pub stats: CrawlStats,
    /// Link strategy that produced the candidates.
    pub strategy: Option<String>,
    /// Stubs dropped by the relevance filter.
    pub skipped: usize,
}

pub struct PressSite {
    profile: SiteProfile,
    base: Url,
    broadcast: BroadcastMatcher,
    fetcher: Arc<dyn PageFetcher>,
    delay: Duration,
}

impl PressSite {
    /// Validate the profile and bind it to a fetcher.
    ///
    /// Bad URLs, selectors or patterns are reported here rather than
    /// silently skipped mid-crawl.
    pub fn new(profile: SiteProfile, fetcher: Arc<dyn PageFetcher>, delay: Duration) -> Result<Self> {
        let base = Url::parse(&profile.base_url).map_err(|e| ScrapeError::InvalidUrl {
            url: profile.base_url.clone(),
            reason: e.to_string(),
        })?;
        validate_selectors(&profile)?;
        let broadcast = BroadcastMatcher::from_profile(&profile)?;
        Ok(Self {
            profile,
            base,
            broadcast,
            fetcher,
            delay,
        })
    }

    pub fn source(&self) -> &str {
        &self.profile.source
    }

    /// Run listing, filter and crawl for this site.
    ///
    /// # Returns
    ///
    /// A [`SiteReport`] with the items in discovery order and the crawl
    /// counters. Errors only when the listing page cannot be fetched.
    #[instrument(level = "info", skip_all, fields(source = %self.profile.source))]
    pub async fn run(&self) -> Result<SiteReport> {
        let listing_url = self.profile.listing_url();
        info!(url = %listing_url, "Scraping listing page");
        let body = self.fetcher.fetch_page(listing_url).await?;

        let listing = self.parse_listing(&body);
        let found = listing.stubs.len();
        let stubs = retain_relevant(listing.stubs, &self.profile.skip_keywords);
        let skipped = found - stubs.len();
        info!(
            candidates = listing.candidates,
            found,
            skipped,
            kept = stubs.len(),
            "Filtered listing stubs"
        );

        let crawler = Crawler::new(
            self.fetcher.as_ref(),
            &self.profile,
            &self.broadcast,
            self.delay,
        );
        let (items, stats) = crawler.crawl(stubs).await;

        Ok(SiteReport {
            items,
            stats,
            strategy: listing.strategy,
            skipped,
        })
    }

    /// Fetch the listing page and report its structure without crawling.
    #[instrument(level = "info", skip_all, fields(source = %self.profile.source))]
    pub async fn diagnose(&self) -> Result<ListingDiagnostics> {
        let body = self.fetcher.fetch_page(self.profile.listing_url()).await?;
        let document = Html::parse_document(&body);
        let diagnostics = ListingDiagnostics::from_document(&document, &self.profile, &self.base);
        diagnostics.log(&self.profile.source);
        Ok(diagnostics)
    }

    fn parse_listing(&self, body: &str) -> ListingOutcome {
        let document = Html::parse_document(body);
        extract_stubs(&document, &self.profile, &self.base)
    }
}

#[async_trait]
impl Scraper for PressSite {
    fn base_url(&self) -> &str {
        &self.profile.base_url
    }

    async fn scrape_articles(&self) -> Result<Vec<FeedItem>> {
        let report = self.run().await?;
        info!(
            source = %self.profile.source,
            strategy = report.strategy.as_deref().unwrap_or("none"),
            items = report.items.len(),
            skipped = report.skipped,
            attempted = report.stats.attempted(),
            succeeded = report.stats.succeeded,
            empty = report.stats.empty,
            failed = report.stats.failed,
            "Scraper finished"
        );
        Ok(report.items)
    }
}

fn validate_selectors(profile: &SiteProfile) -> Result<()> {
    let all = profile
        .link_strategies
        .iter()
        .map(|s| &s.selector)
        .chain(&profile.body_selectors)
        .chain(&profile.image_selectors);
    for css in all {
        Selector::parse(css).map_err(|e| {
            ScrapeError::Config(format!(
                "source {}: invalid selector {css:?}: {e}",
                profile.source
            ))
        })?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::testing::StaticFetcher;
    use crate::scrapers::profiles::{LinkStrategy, vtm};

    const LISTING: &str = r#"
        <html><body>
          <div class="card">
            <a class="card__link" href="/nieuws/the-voice">The Voice start op 14 februari</a>
          </div>
          <div class="card">
            <a class="card__link" href="/nieuws/thuis">Thuis viert zijn 30ste verjaardag</a>
          </div>
          <div class="card">
            <a class="card__link" href="https://communicatie.vtm.be/nieuws/familie">Familie krijgt een nieuw gezicht</a>
          </div>
          <div class="card">
            <a class="card__link" href="/privacy">Privacyverklaring van DPG Media</a>
          </div>
        </body></html>
    "#;

    fn article(text: &str) -> String {
        format!("<html><body><article><p>{text}</p></article></body></html>")
    }

    fn site(fetcher: StaticFetcher) -> PressSite {
        PressSite::new(vtm(), Arc::new(fetcher), Duration::ZERO).unwrap()
    }

    #[tokio::test]
    async fn test_end_to_end_with_one_failed_article() {
        let fetcher = StaticFetcher::new()
            .with_page("https://communicatie.vtm.be", LISTING)
            .with_page(
                "https://communicatie.vtm.be/nieuws/the-voice",
                &article("The Voice keert terug op zondag 14 februari om 20u35."),
            )
            .with_page(
                "https://communicatie.vtm.be/nieuws/familie",
                &article("Familie verwelkomt een nieuw personage in de straat."),
            );
        let report = site(fetcher).run().await.unwrap();

        assert_eq!(report.strategy.as_deref(), Some("primary card link"));
        assert_eq!(report.skipped, 1);
        assert_eq!(report.items.len(), 3);
        assert_eq!(
            report.items.iter().filter(|i| i.content.is_some()).count(),
            2
        );
        assert_eq!(report.stats.failed, 1);
        assert_eq!(report.stats.succeeded, 2);
        assert!(report.items[1].content.is_none());
        assert_eq!(report.items[1].stub.url, "https://communicatie.vtm.be/nieuws/thuis");
    }

    #[tokio::test]
    async fn test_listing_failure_propagates() {
        let err = site(StaticFetcher::new()).scrape_articles().await.unwrap_err();
        assert!(matches!(err, ScrapeError::Status { status: 404, .. }));
    }

    #[tokio::test]
    async fn test_skipped_stubs_are_never_fetched() {
        let fetcher = Arc::new(StaticFetcher::new().with_page("https://communicatie.vtm.be", LISTING));
        let site = PressSite::new(vtm(), fetcher.clone(), Duration::ZERO).unwrap();
        site.scrape_articles().await.unwrap();
        assert!(!fetcher.requests().iter().any(|url| url.contains("privacy")));
        assert_eq!(fetcher.requests().len(), 4);
    }

    #[tokio::test]
    async fn test_diagnose_reports_winning_strategy() {
        let fetcher = StaticFetcher::new().with_page("https://communicatie.vtm.be", LISTING);
        let diag = site(fetcher).diagnose().await.unwrap();
        assert_eq!(diag.winning_strategy(), Some("primary card link"));
        assert_eq!(diag.cards, 4);
    }

    #[test]
    fn test_invalid_profile_is_rejected() {
        let profile = SiteProfile {
            link_strategies: vec![LinkStrategy {
                name: "broken".to_string(),
                selector: "a[[".to_string(),
            }],
            ..vtm()
        };
        let result = PressSite::new(profile, Arc::new(StaticFetcher::new()), Duration::ZERO);
        assert!(matches!(result, Err(ScrapeError::Config(_))));

        let profile = SiteProfile {
            base_url: "not a url".to_string(),
            ..vtm()
        };
        let result = PressSite::new(profile, Arc::new(StaticFetcher::new()), Duration::ZERO);
        assert!(matches!(result, Err(ScrapeError::InvalidUrl { .. })));
    }

    #[test]
    fn test_base_url_exposed() {
        assert_eq!(site(StaticFetcher::new()).base_url(), "https://communicatie.vtm.be");
    }

    #[tokio::test]
    async fn test_trait_object_yields_run_items() {
        let fetcher = StaticFetcher::new()
            .with_page("https://communicatie.vtm.be", LISTING)
            .with_page(
                "https://communicatie.vtm.be/nieuws/thuis",
                &article("Thuis viert zijn verjaardag met een extra lange aflevering."),
            );
        let site = site(fetcher);
        let scraper: &dyn Scraper = &site;

        let items = scraper.scrape_articles().await.unwrap();
        let urls: Vec<&str> = items.iter().map(|i| i.stub.url.as_str()).collect();
        assert_eq!(
            urls,
            vec![
                "https://communicatie.vtm.be/nieuws/the-voice",
                "https://communicatie.vtm.be/nieuws/thuis",
                "https://communicatie.vtm.be/nieuws/familie"
            ]
        );
        assert!(items[1].content.is_some());
    }
}
