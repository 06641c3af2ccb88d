//! Relevance filter applied to listing stubs before any article is fetched.

use crate::models::ArticleStub;

/// True when the title or URL mentions any of the boilerplate keywords
/// (cookie policy, privacy, contact, careers, ...), ignoring case on both sides.
pub fn should_skip(title: &str, url: &str, keywords: &[String]) -> bool {
    let title = title.to_lowercase();
    let url = url.to_lowercase();
    keywords.iter().any(|keyword| {
        let keyword = keyword.to_lowercase();
        title.contains(&keyword) || url.contains(&keyword)
    })
}

/// Keep only the stubs worth fetching, preserving their order.
pub fn retain_relevant(stubs: Vec<ArticleStub>, keywords: &[String]) -> Vec<ArticleStub> {
    stubs
        .into_iter()
        .filter(|stub| !should_skip(&stub.title, &stub.url, keywords))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scrapers::profiles::vtm;

    #[test]
    fn test_cookie_policy_is_skipped() {
        let keywords = vtm().skip_keywords;
        assert!(should_skip(
            "Cookiebeleid van VTM",
            "https://communicatie.vtm.be/cookiebeleid",
            &keywords
        ));
    }

    #[test]
    fn test_programme_news_is_kept() {
        let keywords = vtm().skip_keywords;
        assert!(!should_skip(
            "The Voice start op 14 februari",
            "https://communicatie.vtm.be/nieuws/the-voice-start-op-14-februari",
            &keywords
        ));
    }

    #[test]
    fn test_url_alone_can_trigger_skip() {
        let keywords = vtm().skip_keywords;
        assert!(should_skip(
            "Lees meer over onze werking",
            "https://communicatie.vtm.be/privacy-verklaring",
            &keywords
        ));
    }

    #[test]
    fn test_mixed_case_keyword_still_matches() {
        let keywords = vec!["Privacy".to_string()];
        assert!(should_skip(
            "Privacyverklaring van VTM",
            "https://communicatie.vtm.be/privacy",
            &keywords
        ));
        assert!(!should_skip(
            "Thuis neemt afscheid",
            "https://communicatie.vtm.be/nieuws/thuis",
            &keywords
        ));
    }

    #[test]
    fn test_retain_relevant_preserves_order() {
        let keywords = vtm().skip_keywords;
        let stubs = vec![
            ArticleStub::new("Familie viert dertig jaar".into(), "https://communicatie.vtm.be/a".into(), "vtm"),
            ArticleStub::new("Contacteer de persdienst".into(), "https://communicatie.vtm.be/b".into(), "vtm"),
            ArticleStub::new("Thuis neemt afscheid".into(), "https://communicatie.vtm.be/c".into(), "vtm"),
        ];
        let kept = retain_relevant(stubs, &keywords);
        let titles: Vec<&str> = kept.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, vec!["Familie viert dertig jaar", "Thuis neemt afscheid"]);
    }
}
