//! The harvest run: one listing pass, then the article loop.
//!
//! Control flow for a run:
//!
//! 1. Navigate to the listing page (failure aborts the run).
//! 2. One bounded consent check; a failed dismissal is logged and the run
//!    continues with the overlay up.
//! 3. Collect the deduplicated article links from the rendered listing.
//! 4. Visit each article in listing order: extract the body, resolve the
//!    image, append a record. An article-scoped failure is logged with
//!    the article's title and skipped; the loop moves on.
//! 5. Pace with a fixed delay between consecutive articles.
//!
//! The caller writes the accumulated records afterwards; no output leaves
//! this module.

use tokio::time::sleep;
use tracing::{debug, error, info, instrument, warn};

use crate::config::HarvestConfig;
use crate::consent;
use crate::error::HarvestError;
use crate::extract;
use crate::images::{self, FallbackImages};
use crate::links;
use crate::models::{ArticleLink, ArticleRecord};
use crate::output::Accumulator;
use crate::session::{PageSession, WaitUntil};
use crate::utils::truncate_for_log;

/// Run the whole harvest against an open session and return the filled
/// accumulator. The caller flushes it to disk.
///
/// Listing-page failures abort. Article-page failures are skipped, except
/// run-scoped ones (an unreadable fallback image) which abort mid-loop.
#[instrument(level = "info", skip_all, fields(listing_url = %config.listing_url))]
pub async fn run_harvest<S: PageSession>(
    session: &S,
    config: &HarvestConfig,
    fallbacks: &mut FallbackImages,
) -> Result<Accumulator, HarvestError> {
    info!("Navigating to the listing page");
    session
        .navigate(&config.listing_url, WaitUntil::DomContentLoaded)
        .await?;

    match consent::dismiss_consent_if_present(
        session,
        &config.consent_selector,
        config.consent_timeout(),
    )
    .await
    {
        Ok(outcome) => info!(?outcome, "Consent check complete"),
        Err(e) => warn!(error = %e, "Consent dismissal failed; continuing"),
    }

    info!("Extracting unique titles and links");
    let listing_html = session.content().await?;
    let article_links = links::collect_article_links(
        &listing_html,
        &config.listing_url,
        &config.article_path_pattern,
    );

    let mut accumulator = Accumulator::new();
    let total = article_links.len();
    for (index, link) in article_links.iter().enumerate() {
        info!(current = index + 1, total, title = %link.title, "Processing article");
        match process_article(session, link, config, fallbacks).await {
            Ok(record) => accumulator.record(record),
            Err(e) if e.aborts_run() => {
                error!(title = %link.title, error = %e, "Unrecoverable failure while processing article");
                return Err(e);
            }
            Err(e) => {
                error!(title = %link.title, error = %e, "Error processing article; skipping");
            }
        }
        if index + 1 < total {
            sleep(config.inter_article_delay()).await;
        }
    }

    info!(
        processed = accumulator.len(),
        skipped = total - accumulator.len(),
        "Article loop complete"
    );

    Ok(accumulator)
}

/// Visit one article and build its output record.
async fn process_article<S: PageSession>(
    session: &S,
    link: &ArticleLink,
    config: &HarvestConfig,
    fallbacks: &mut FallbackImages,
) -> Result<ArticleRecord, HarvestError> {
    let article = extract::extract_article(session, link, config).await?;
    debug!(
        title = %link.title,
        content_preview = %truncate_for_log(&article.content, 200),
        image = ?article.image,
        "Extracted article"
    );
    let image = images::resolve_image(session, article.image.as_deref(), fallbacks).await?;
    Ok(ArticleRecord {
        title: link.title.clone(),
        link: link.link.clone(),
        content: article.content,
        image,
    })
}
