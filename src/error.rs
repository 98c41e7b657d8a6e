//! Error taxonomy for the harvest run.
//!
//! Every failure in the pipeline is one of five kinds, each with its own
//! propagation rule:
//!
//! | Variant | Scope | Effect |
//! |---------|-------|--------|
//! | [`HarvestError::Setup`] | run | fatal; aborts before or during the loop |
//! | [`HarvestError::Navigation`] | listing page: run / article page: article | listing failure aborts, article failure skips that article |
//! | [`HarvestError::Extraction`] | article | skips that article |
//! | [`HarvestError::ImageFetch`] | article | skips that article (never partially recorded) |
//! | [`HarvestError::Write`] | run | fatal; logged, prior console output is the only record |
//!
//! Article-scoped errors are caught at the article loop boundary in
//! [`crate::harvest`] and never escalate. [`HarvestError::aborts_run`]
//! encodes the carve-out: `Setup` raised mid-loop (an unreadable fallback
//! image) still ends the run.

use thiserror::Error;

/// All failure modes of a harvest run.
#[derive(Debug, Error)]
pub enum HarvestError {
    /// The browser session could not start, or a local resource the run
    /// depends on (a fallback image) is missing or unreadable.
    #[error("setup failed: {0}")]
    Setup(String),

    /// A page failed to load within the session's navigation timeout.
    #[error("navigation to {url} failed: {message}")]
    Navigation { url: String, message: String },

    /// A selector could not be parsed or evaluated against the rendered
    /// document. Body-text absence and image absence are not errors; they
    /// fall back to the sentinel string and the local image set instead.
    #[error("extraction failed: {0}")]
    Extraction(String),

    /// The candidate image bytes could not be fetched.
    #[error("image fetch from {url} failed: {message}")]
    ImageFetch { url: String, message: String },

    /// The final output document could not be serialized or written.
    #[error("write to {path} failed: {message}")]
    Write { path: String, message: String },
}

impl HarvestError {
    /// Whether this error must end the whole run even when raised while
    /// processing a single article.
    ///
    /// `Navigation`, `Extraction`, and `ImageFetch` are recovered at the
    /// article loop boundary (log, skip, continue). `Setup` and `Write`
    /// are not: an unreadable fallback image fails the run when first
    /// needed, and a failed output write has nothing left to recover to.
    pub fn aborts_run(&self) -> bool {
        matches!(self, HarvestError::Setup(_) | HarvestError::Write { .. })
    }
}
