//! Listing-page link collection.
//!
//! The listing page is a soup of anchors: site navigation, headline links,
//! and "Read more …" teaser duplicates. This module boils it down to an
//! ordered, deduplicated list of articles worth visiting:
//!
//! | Rule | Effect |
//! |------|--------|
//! | href must contain the article path pattern | drops nav and external links |
//! | title must be non-empty after trimming | drops image-only anchors |
//! | title must not be the placeholder | drops "Read more …" duplicates |
//! | first occurrence of each URL wins | one entry per article |
//!
//! Document order is preserved, so the article loop visits pages in the
//! order the listing presents them.

use itertools::Itertools;
use scraper::{Html, Selector};
use tracing::{debug, info};
use url::Url;

use crate::models::ArticleLink;
use crate::utils::absolutize;

/// Anchor text the listing uses for its duplicate teaser links.
pub const PLACEHOLDER_TITLE: &str = "Read more …";

/// Collect the unique article links from a rendered listing document.
///
/// Relative hrefs are resolved against `base_url`; an href that resolves
/// to nothing usable is dropped rather than reported.
///
/// # Arguments
/// * `html` - the listing page's rendered HTML.
/// * `base_url` - the URL the listing was loaded from.
/// * `article_path_pattern` - substring an href must contain to count as
///   an article.
///
/// # Returns
/// Deduplicated [`ArticleLink`]s in document order.
pub fn collect_article_links(
    html: &str,
    base_url: &str,
    article_path_pattern: &str,
) -> Vec<ArticleLink> {
    let document = Html::parse_document(html);
    let base = Url::parse(base_url).ok();
    let anchor_selector = Selector::parse("a[href]").unwrap();

    let links: Vec<ArticleLink> = document
        .select(&anchor_selector)
        .filter_map(|element| {
            let href = element.value().attr("href")?;
            if !href.contains(article_path_pattern) {
                return None;
            }
            let link = absolutize(href, base.as_ref())?;
            let title = element.text().collect::<Vec<_>>().join(" ").trim().to_string();
            if title.is_empty() || title == PLACEHOLDER_TITLE {
                return None;
            }
            Some(ArticleLink { title, link })
        })
        .unique_by(|article| article.link.clone())
        .collect();

    info!(count = links.len(), "Collected unique article links");
    debug!(links = ?links, "Article links");

    links
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://news.example";

    fn anchor(href: &str, title: &str) -> String {
        format!("<a href=\"{href}\">{title}</a>")
    }

    fn listing(anchors: &[String]) -> String {
        format!("<html><body>{}</body></html>", anchors.concat())
    }

    #[test]
    fn test_collects_matching_anchors_in_document_order() {
        let html = listing(&[
            anchor("/index.php/articles/ferry-delay", "Ferry delayed"),
            anchor("/index.php/articles/gala-day", "Gala day announced"),
        ]);

        let links = collect_article_links(&html, BASE, "/index.php/articles/");

        assert_eq!(links.len(), 2);
        assert_eq!(links[0].title, "Ferry delayed");
        assert_eq!(links[0].link, "https://news.example/index.php/articles/ferry-delay");
        assert_eq!(links[1].title, "Gala day announced");
        assert_eq!(links[1].link, "https://news.example/index.php/articles/gala-day");
    }

    #[test]
    fn test_ignores_anchors_outside_the_article_path() {
        let html = listing(&[
            anchor("/index.php/contact", "Contact us"),
            anchor("https://elsewhere.example/story", "Syndicated story"),
            anchor("/index.php/articles/real-story", "Real story"),
        ]);

        let links = collect_article_links(&html, BASE, "/index.php/articles/");

        assert_eq!(links.len(), 1);
        assert_eq!(links[0].title, "Real story");
    }

    #[test]
    fn test_first_occurrence_wins_for_repeated_urls() {
        let html = listing(&[
            anchor("/index.php/articles/storm", "Storm warning issued"),
            anchor("/index.php/articles/storm", "Another anchor, same page"),
        ]);

        let links = collect_article_links(&html, BASE, "/index.php/articles/");

        assert_eq!(links.len(), 1);
        assert_eq!(links[0].title, "Storm warning issued");
    }

    #[test]
    fn test_placeholder_and_empty_titles_are_dropped() {
        let html = listing(&[
            anchor("/index.php/articles/one", "Read more …"),
            anchor("/index.php/articles/two", "   "),
            anchor("/index.php/articles/three", ""),
            anchor("/index.php/articles/four", "Kept headline"),
        ]);

        let links = collect_article_links(&html, BASE, "/index.php/articles/");

        assert_eq!(links.len(), 1);
        assert_eq!(links[0].title, "Kept headline");
    }

    #[test]
    fn test_placeholder_match_is_exact_not_substring() {
        let html = listing(&[anchor(
            "/index.php/articles/ferries",
            "Read more … about the ferries",
        )]);

        let links = collect_article_links(&html, BASE, "/index.php/articles/");

        assert_eq!(links.len(), 1);
        assert_eq!(links[0].title, "Read more … about the ferries");
    }

    #[test]
    fn test_duplicate_bare_and_placeholder_anchor_pairs_collapse() {
        // Listing pages typically emit a headline anchor plus a teaser
        // anchor per card; only one survives, under the headline title.
        let html = listing(&[
            anchor("/index.php/articles/u1", "A"),
            anchor("/index.php/articles/u1", "A"),
            anchor("/index.php/articles/u2", "Read more …"),
            anchor("/index.php/articles/u3", "B"),
        ]);

        let links = collect_article_links(&html, BASE, "/index.php/articles/");

        assert_eq!(
            links,
            vec![
                ArticleLink {
                    title: "A".to_string(),
                    link: "https://news.example/index.php/articles/u1".to_string(),
                },
                ArticleLink {
                    title: "B".to_string(),
                    link: "https://news.example/index.php/articles/u3".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_absolute_hrefs_pass_through() {
        let html = listing(&[anchor(
            "https://news.example/index.php/articles/abs",
            "Already absolute",
        )]);

        let links = collect_article_links(&html, BASE, "/index.php/articles/");

        assert_eq!(links.len(), 1);
        assert_eq!(links[0].link, "https://news.example/index.php/articles/abs");
    }

    #[test]
    fn test_same_input_yields_same_output() {
        let html = listing(&[
            anchor("/index.php/articles/a", "First"),
            anchor("/index.php/articles/b", "Second"),
        ]);

        let first = collect_article_links(&html, BASE, "/index.php/articles/");
        let second = collect_article_links(&html, BASE, "/index.php/articles/");

        assert_eq!(first, second);
    }
}
