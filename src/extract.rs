//! Article-page extraction.
//!
//! One article page yields two facts: the body text under the content
//! container, and the URL of the first image that looks like an article
//! photo. Parsing is split off from navigation so the selector logic can
//! be tested on plain HTML strings.

use scraper::{Html, Selector};
use tracing::{debug, instrument};
use url::Url;

use crate::config::HarvestConfig;
use crate::error::HarvestError;
use crate::models::{ArticleContent, ArticleLink};
use crate::session::{PageSession, WaitUntil};
use crate::utils::absolutize;

/// Body text recorded when an article page has no readable body.
pub const NO_CONTENT_SENTINEL: &str = "No content found";

/// Navigate to an article and pull its body text and image candidate.
#[instrument(level = "info", skip_all, fields(link = %link.link))]
pub async fn extract_article<S: PageSession>(
    session: &S,
    link: &ArticleLink,
    config: &HarvestConfig,
) -> Result<ArticleContent, HarvestError> {
    session.navigate(&link.link, WaitUntil::DomContentLoaded).await?;
    let html = session.content().await?;
    parse_article(&html, &link.link, &config.body_selector, &config.image_src_pattern)
}

/// Read the body text and image candidate out of a rendered article
/// document.
///
/// The body is the concatenated text of the first element matching
/// `body_selector`; a missing or empty body becomes the
/// [`NO_CONTENT_SENTINEL`] so the article still produces a record. The
/// image candidate is the src of the first `img` element anywhere in the
/// document whose src contains `image_src_pattern`, resolved against
/// `page_url`.
pub fn parse_article(
    html: &str,
    page_url: &str,
    body_selector: &str,
    image_src_pattern: &str,
) -> Result<ArticleContent, HarvestError> {
    let document = Html::parse_document(html);
    let body = Selector::parse(body_selector)
        .map_err(|e| HarvestError::Extraction(format!("body selector {body_selector}: {e}")))?;
    let image_selector = Selector::parse("img[src]").unwrap();

    let content = document
        .select(&body)
        .next()
        .map(|element| element.text().collect::<Vec<_>>().join(" ").trim().to_string())
        .filter(|text| !text.is_empty())
        .unwrap_or_else(|| NO_CONTENT_SENTINEL.to_string());

    let base = Url::parse(page_url).ok();
    let image = document
        .select(&image_selector)
        .filter_map(|element| element.value().attr("src"))
        .find(|src| src.contains(image_src_pattern))
        .and_then(|src| absolutize(src, base.as_ref()));

    debug!(content_bytes = content.len(), image = ?image, "Parsed article page");

    Ok(ArticleContent { content, image })
}
