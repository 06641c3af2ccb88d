//! Listing page extraction.
//!
//! Candidate links come from the first [`LinkStrategy`] in the profile whose
//! selector matches anything; later strategies are only consulted when every
//! earlier one matched nothing, and results are never merged. Each candidate
//! then passes through the link filters (anchor, external host, short title)
//! and becomes an [`ArticleStub`] with optional date and teaser text pulled
//! from the surrounding card.

use crate::models::ArticleStub;
use crate::scrapers::profiles::{LinkStrategy, SiteProfile};
use crate::utils::{
    attr_value, class_contains, element_text, parse_selector, resolve_url, same_host,
};
use scraper::{ElementRef, Html};
use tracing::{debug, info};
use url::Url;

/// Links whose resolved title is shorter than this are decoration.
pub const MIN_TITLE_CHARS: usize = 10;

const BLOCK_TAGS: &[&str] = &["article", "li", "section", "div"];
const DESCRIPTION_HINTS: &[&str] = &["excerpt", "description", "summary", "intro"];

/// Result of running the strategy chain over a listing document.
#[derive(Debug, Default)]
pub struct ListingOutcome {
    /// Name of the strategy that produced candidates, if any did.
    pub strategy: Option<String>,
    /// Raw matches of that strategy, before filtering.
    pub candidates: usize,
    pub stubs: Vec<ArticleStub>,
}

/// Run the strategy chain and turn surviving links into stubs.
///
/// # Arguments
///
/// * `document` - Parsed listing page
/// * `profile` - Site profile supplying the link strategies and source name
/// * `base` - URL relative links resolve against and hosts are compared to
///
/// # Returns
///
/// A [`ListingOutcome`] naming the winning strategy. When no strategy
/// matches, the outcome is empty; that is not an error.
pub fn extract_stubs(document: &Html, profile: &SiteProfile, base: &Url) -> ListingOutcome {
    let Some((strategy, links)) = first_matching_strategy(document, &profile.link_strategies)
    else {
        info!(source = %profile.source, "No link strategy matched the listing page");
        return ListingOutcome::default();
    };

    let candidates = links.len();
    let stubs: Vec<ArticleStub> = links
        .into_iter()
        .filter_map(|link| stub_from_link(&link, base, &profile.source))
        .collect();

    info!(
        source = %profile.source,
        strategy = %strategy.name,
        candidates,
        stubs = stubs.len(),
        "Extracted listing links"
    );

    ListingOutcome {
        strategy: Some(strategy.name.clone()),
        candidates,
        stubs,
    }
}

/// First strategy whose selector matches at least one element, with its matches.
pub fn first_matching_strategy<'d, 's>(
    document: &'d Html,
    strategies: &'s [LinkStrategy],
) -> Option<(&'s LinkStrategy, Vec<ElementRef<'d>>)> {
    strategies.iter().find_map(|strategy| {
        let selector = parse_selector(&strategy.selector)?;
        let links: Vec<ElementRef<'d>> = document.select(&selector).collect();
        debug!(strategy = %strategy.name, matches = links.len(), "Tried link strategy");
        (!links.is_empty()).then_some((strategy, links))
    })
}

/// Apply the link filters to one candidate and build its stub.
pub fn stub_from_link(link: &ElementRef, base: &Url, source: &str) -> Option<ArticleStub> {
    let href = link.value().attr("href").map(str::trim).unwrap_or_default();
    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    let url = resolve_url(base, href)?;
    if !same_host(&url, base) {
        debug!(%url, "Skipping external link");
        return None;
    }

    let title = link_title(link)?;
    if title.chars().count() < MIN_TITLE_CHARS {
        return None;
    }

    let mut stub = ArticleStub::new(title, url.to_string(), source);
    stub.date = card_date(link);
    stub.description = card_description(link);
    Some(stub)
}

/// Link text (nested headings included), else the `title` attribute.
fn link_title(link: &ElementRef) -> Option<String> {
    non_empty_text(link).or_else(|| attr_value(link, "title"))
}

/// Nearest block-level ancestor: the listing card the link sits in.
fn card_of<'a>(link: &ElementRef<'a>) -> Option<ElementRef<'a>> {
    let mut current = link.parent();
    while let Some(node) = current {
        if let Some(el) = ElementRef::wrap(node) {
            if BLOCK_TAGS.contains(&el.value().name()) {
                return Some(el);
            }
        }
        current = node.parent();
    }
    None
}

/// Search the link itself, then its card.
fn within_card<'a, T>(link: &ElementRef<'a>, find: impl Fn(&ElementRef<'a>) -> Option<T>) -> Option<T> {
    find(link).or_else(|| card_of(link).and_then(|card| find(&card)))
}

fn card_date(link: &ElementRef) -> Option<String> {
    let time = parse_selector("time")?;
    let classed = parse_selector("[class]")?;
    within_card(link, |scope| {
        scope
            .select(&time)
            .find_map(|t| attr_value(&t, "datetime").or_else(|| non_empty_text(&t)))
            .or_else(|| {
                scope
                    .select(&classed)
                    .filter(|el| class_contains(el, "date"))
                    .find_map(|el| non_empty_text(&el))
            })
    })
}

/// First `p` or `div` whose class reads like a teaser.
fn card_description(link: &ElementRef) -> Option<String> {
    let blocks = parse_selector("p[class], div[class]")?;
    within_card(link, |scope| {
        scope
            .select(&blocks)
            .filter(|el| DESCRIPTION_HINTS.iter().any(|hint| class_contains(el, hint)))
            .find_map(|el| non_empty_text(&el))
    })
}

fn non_empty_text(element: &ElementRef) -> Option<String> {
    Some(element_text(element)).filter(|t| !t.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scrapers::profiles::vtm;

    fn base() -> Url {
        Url::parse("https://communicatie.vtm.be").unwrap()
    }

    fn extract(html: &str) -> ListingOutcome {
        extract_stubs(&Html::parse_document(html), &vtm(), &base())
    }

    #[test]
    fn test_first_strategy_wins_without_merging() {
        let html = r#"
            <div class="card"><a class="card__link" href="/nieuws/the-voice">The Voice start op 14 februari</a></div>
            <article><a href="/nieuws/familie">Familie viert dertig jaar op antenne</a></article>
        "#;
        let outcome = extract(html);
        assert_eq!(outcome.strategy.as_deref(), Some("primary card link"));
        assert_eq!(outcome.stubs.len(), 1);
        assert_eq!(outcome.stubs[0].url, "https://communicatie.vtm.be/nieuws/the-voice");
    }

    #[test]
    fn test_falls_back_to_article_links() {
        let html = r#"
            <article><a href="/nieuws/familie">Familie viert dertig jaar op antenne</a></article>
            <article><a href="/nieuws/thuis">Thuis neemt afscheid van een icoon</a></article>
        "#;
        let outcome = extract(html);
        assert_eq!(outcome.strategy.as_deref(), Some("article link"));
        assert_eq!(outcome.stubs.len(), 2);
    }

    #[test]
    fn test_no_strategy_matches() {
        let outcome = extract("<p>Geen links hier</p>");
        assert!(outcome.strategy.is_none());
        assert!(outcome.stubs.is_empty());
    }

    #[test]
    fn test_filters_anchor_external_and_short_titles() {
        let html = r##"
            <a class="card__link" href="#top">Terug naar boven van de pagina</a>
            <a class="card__link" href="">Lege link met een lange titel</a>
            <a class="card__link" href="https://www.vrt.be/nieuws">Extern bericht met lange titel</a>
            <a class="card__link" href="/kort">Kort</a>
            <a class="card__link" href="https://communicatie.vtm.be/absoluut">Absolute interne link blijft</a>
            <a class="card__link" href="/relatief">Relatieve interne link blijft</a>
        "##;
        let outcome = extract(html);
        assert_eq!(outcome.candidates, 6);
        let urls: Vec<&str> = outcome.stubs.iter().map(|s| s.url.as_str()).collect();
        assert_eq!(
            urls,
            vec![
                "https://communicatie.vtm.be/absoluut",
                "https://communicatie.vtm.be/relatief"
            ]
        );
        for stub in &outcome.stubs {
            assert!(stub.title.trim().chars().count() >= MIN_TITLE_CHARS);
            assert_eq!(stub.source, "vtm");
        }
    }

    #[test]
    fn test_title_falls_back_to_title_attribute() {
        let html = r#"<a class="card__link" href="/x" title="Titel uit het attribuut"><img src="/i.png"></a>"#;
        let outcome = extract(html);
        assert_eq!(outcome.stubs[0].title, "Titel uit het attribuut");
    }

    #[test]
    fn test_title_includes_nested_heading_text() {
        let html = r#"
            <a class="card__link" href="/nieuws/familie">
              <img src="/i.png"><h3> Familie krijgt  een nieuw gezicht </h3>
            </a>
        "#;
        let outcome = extract(html);
        assert_eq!(outcome.stubs[0].title, "Familie krijgt een nieuw gezicht");
    }

    #[test]
    fn test_card_date_and_description() {
        let html = r#"
            <div class="card">
              <div class="card__meta"><time datetime="2024-02-01T09:00:00+01:00">1 februari</time></div>
              <a class="card__link" href="/nieuws/the-voice">The Voice start op 14 februari</a>
              <p class="card__excerpt">  De coaches zijn  terug. </p>
            </div>
            <div class="card">
              <span class="card__date">3 maart 2024</span>
              <a class="card__link" href="/nieuws/thuis">Thuis gaat in de zomerpauze</a>
            </div>
        "#;
        let outcome = extract(html);
        assert_eq!(outcome.stubs.len(), 2);
        assert_eq!(outcome.stubs[0].date.as_deref(), Some("2024-02-01T09:00:00+01:00"));
        assert_eq!(outcome.stubs[0].description.as_deref(), Some("De coaches zijn terug."));
        assert_eq!(outcome.stubs[1].date.as_deref(), Some("3 maart 2024"));
        assert_eq!(outcome.stubs[1].description, None);
    }

    #[test]
    fn test_repeated_links_are_not_deduplicated() {
        let html = r#"
            <a class="card__link" href="/nieuws/the-voice">The Voice start op 14 februari</a>
            <a class="card__link" href="/nieuws/the-voice">The Voice start op 14 februari</a>
        "#;
        assert_eq!(extract(html).stubs.len(), 2);
    }
}
