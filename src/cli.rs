//! Command-line interface definitions for the Stornoway harvester.
//!
//! This module defines the CLI arguments and options using the `clap` crate.
//! Everything has a sensible default; a bare invocation harvests the live
//! site into `articles_with_images.json`.

use clap::Parser;
use std::path::PathBuf;

/// Command-line arguments for the Stornoway harvester.
///
/// Flags override values from the optional YAML config file, which in turn
/// overrides the compiled-in defaults.
///
/// # Examples
///
/// ```sh
/// # Harvest the live site with defaults
/// stornoway_harvest
///
/// # Custom output location and gentler pacing
/// stornoway_harvest -o out/articles.json --delay-ms 5000
///
/// # Full option file, visible browser window for debugging
/// stornoway_harvest -c harvest.yaml --headful
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Optional path to a YAML config file with harvest options
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output file path for the harvested JSON document
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Listing page URL to harvest article links from
    #[arg(long, env = "HARVEST_LISTING_URL")]
    pub listing_url: Option<String>,

    /// Delay between article visits in milliseconds
    #[arg(long)]
    pub delay_ms: Option<u64>,

    /// Launch the browser with a visible window instead of headless
    #[arg(long, default_value_t = false)]
    pub headful: bool,
}
