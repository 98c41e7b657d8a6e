//! Harvest configuration: compile-time defaults with optional overrides.
//!
//! The baseline is a set of constants describing the target site: the
//! listing URL, the DOM patterns for article links, body text and images,
//! the consent-button selector, the fallback image set, and the pacing
//! delay. All of them can be overridden from an optional YAML file passed
//! with `--config`, and a few common ones again from individual CLI flags.
//!
//! Precedence, lowest to highest: compile-time defaults, YAML file, CLI
//! flags. Unknown YAML keys are rejected so a typo never silently falls
//! back to a default.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use tracing::info;

use crate::cli::Cli;
use crate::error::HarvestError;

/// The news listing page the harvest starts from.
pub const DEFAULT_LISTING_URL: &str = "https://welovestornoway.com";

/// Path fragment that marks an anchor as an article link.
pub const DEFAULT_ARTICLE_PATH_PATTERN: &str = "/index.php/articles/";

/// The "do not consent" control of the site's consent overlay.
pub const DEFAULT_CONSENT_SELECTOR: &str = "button.fc-button.fc-cta-do-not-consent";

/// The main article body element on an article page.
pub const DEFAULT_BODY_SELECTOR: &str = ".com-content-article__body";

/// Src fragment that marks an `img` element as the article's image.
pub const DEFAULT_IMAGE_SRC_PATTERN: &str = "/images/00Articles";

/// The shipped fallback images, used round-robin for imageless articles.
pub const DEFAULT_FALLBACK_PATHS: [&str; 3] = [
    "picture/fallback1.png",
    "picture/fallback2.png",
    "picture/fallback3.png",
];

/// Fixed pacing delay between article visits.
pub const DEFAULT_INTER_ARTICLE_DELAY_MS: u64 = 2000;

/// How long to wait for the consent control before treating it as absent.
pub const DEFAULT_CONSENT_TIMEOUT_MS: u64 = 5000;

/// Output document path, overwritten on every run.
pub const DEFAULT_OUTPUT_PATH: &str = "articles_with_images.json";

/// Everything a harvest run needs to know about its target.
///
/// Deserializable from the optional `--config` YAML file; every field is
/// optional there and falls back to the compile-time default.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HarvestConfig {
    /// URL of the listing page enumerating article links.
    pub listing_url: String,
    /// Substring an anchor's href must contain to count as an article.
    pub article_path_pattern: String,
    /// CSS selector of the consent dialog's "do not consent" control.
    pub consent_selector: String,
    /// CSS selector of the article body element.
    pub body_selector: String,
    /// Substring an `img` src must contain to count as the article image.
    pub image_src_pattern: String,
    /// Ordered fallback image files, cycled for imageless articles.
    pub fallback_paths: Vec<PathBuf>,
    /// Fixed delay between article visits, in milliseconds.
    pub inter_article_delay_ms: u64,
    /// Bounded wait for the consent control, in milliseconds.
    pub consent_timeout_ms: u64,
    /// Where the output document is written.
    pub output_path: PathBuf,
}

impl Default for HarvestConfig {
    fn default() -> Self {
        Self {
            listing_url: DEFAULT_LISTING_URL.to_string(),
            article_path_pattern: DEFAULT_ARTICLE_PATH_PATTERN.to_string(),
            consent_selector: DEFAULT_CONSENT_SELECTOR.to_string(),
            body_selector: DEFAULT_BODY_SELECTOR.to_string(),
            image_src_pattern: DEFAULT_IMAGE_SRC_PATTERN.to_string(),
            fallback_paths: DEFAULT_FALLBACK_PATHS.iter().map(PathBuf::from).collect(),
            inter_article_delay_ms: DEFAULT_INTER_ARTICLE_DELAY_MS,
            consent_timeout_ms: DEFAULT_CONSENT_TIMEOUT_MS,
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
        }
    }
}

impl HarvestConfig {
    /// Parse a YAML document into a config, defaults filling any gap.
    pub fn from_yaml(text: &str) -> Result<Self, HarvestError> {
        serde_yaml::from_str(text)
            .map_err(|e| HarvestError::Setup(format!("invalid config file: {e}")))
    }

    /// Load a YAML config file from disk.
    pub fn load(path: &Path) -> Result<Self, HarvestError> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            HarvestError::Setup(format!("cannot read config file {}: {e}", path.display()))
        })?;
        let config = Self::from_yaml(&text)?;
        info!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Fold CLI flags over the config; flags win over file values.
    pub fn apply_cli(&mut self, cli: &Cli) {
        if let Some(listing_url) = &cli.listing_url {
            self.listing_url = listing_url.clone();
        }
        if let Some(output) = &cli.output {
            self.output_path = output.clone();
        }
        if let Some(delay_ms) = cli.delay_ms {
            self.inter_article_delay_ms = delay_ms;
        }
    }

    /// The pacing delay as a [`Duration`].
    pub fn inter_article_delay(&self) -> Duration {
        Duration::from_millis(self.inter_article_delay_ms)
    }

    /// The consent wait bound as a [`Duration`].
    pub fn consent_timeout(&self) -> Duration {
        Duration::from_millis(self.consent_timeout_ms)
    }
}
