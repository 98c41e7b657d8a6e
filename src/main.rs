//! # Stornoway Harvest
//!
//! A single-run harvester that turns the We Love Stornoway news listing
//! into one JSON document of articles with embedded images.
//!
//! ## Features
//!
//! - Drives a real browser session so consent overlays and late-rendered
//!   markup behave as they do for a reader
//! - Dismisses the consent dialog once, when it appears
//! - Collects deduplicated article links from the listing page
//! - Extracts each article's body text and photo, with bundled fallback
//!   images rotated in for articles without one
//! - Writes a single pretty-printed JSON file per run
//!
//! ## Usage
//!
//! ```sh
//! stornoway_harvest -o articles_with_images.json
//! ```
//!
//! ## Architecture
//!
//! The application follows a pipeline architecture:
//! 1. **Listing**: Navigate to the listing page, handle consent, collect
//!    article links
//! 2. **Articles**: Visit each link in order, extract body and image,
//!    skip articles that fail
//! 3. **Output**: Serialize every record into one JSON array file

use chrono::Local;
use clap::Parser;
use std::error::Error;
use tracing::{debug, error, info, instrument, warn};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod cli;
mod config;
mod consent;
mod error;
mod extract;
mod harvest;
mod images;
mod links;
mod models;
mod output;
mod session;
#[cfg(test)]
mod testutil;
mod utils;

use cli::Cli;
use config::HarvestConfig;
use images::FallbackImages;
use session::ChromeSession;
use utils::ensure_writable_dir;

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("stornoway_harvest starting up");

    // Parse CLI
    let args = Cli::parse();
    debug!(?args.config, ?args.output, "Parsed CLI arguments");

    // ---- Load configuration ----
    let mut config = match &args.config {
        Some(path) => match HarvestConfig::load(path) {
            Ok(config) => config,
            Err(e) => {
                error!(path = %path.display(), error = %e, "Failed to load config file");
                return Err(e.into());
            }
        },
        None => HarvestConfig::default(),
    };
    config.apply_cli(&args);

    let local_date = Local::now().date_naive().to_string();
    info!(
        %local_date,
        listing_url = %config.listing_url,
        output = %config.output_path.display(),
        "Harvest configured"
    );

    // Early check: the output location must be writable before we spend
    // minutes visiting articles.
    if let Some(parent) = config
        .output_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
    {
        if let Err(e) = ensure_writable_dir(parent).await {
            error!(
                path = %parent.display(),
                error = %e,
                "Output directory is not writable (fix perms or choose a different path)"
            );
            return Err(e.into());
        }
    }

    // ---- Open the browser session ----
    let session = match ChromeSession::launch(!args.headful) {
        Ok(session) => session,
        Err(e) => {
            error!(error = %e, "Failed to launch the browser session");
            return Err(e.into());
        }
    };

    // ---- Harvest ----
    debug!(fallback_images = config.fallback_paths.len(), "Fallback image set ready");
    let mut fallbacks = FallbackImages::new(config.fallback_paths.clone());
    let accumulator = match harvest::run_harvest(&session, &config, &mut fallbacks).await {
        Ok(accumulator) => accumulator,
        Err(e) => {
            error!(error = %e, "Harvest aborted");
            return Err(e.into());
        }
    };
    if accumulator.is_empty() {
        warn!("No articles were harvested; writing an empty document");
    }

    // ---- Write final JSON after all articles processed ----
    info!("Saving articles with images in JSON");
    if let Err(e) = accumulator.flush(&config.output_path).await {
        error!(error = %e, "Failed to write final JSON");
        return Err(e.into());
    }

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        articles = accumulator.len(),
        "Execution complete"
    );

    Ok(())
}
