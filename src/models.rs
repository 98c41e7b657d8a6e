//! Data models for harvested articles.
//!
//! This module defines the three shapes an article passes through on its
//! way from the listing page to the output file:
//!
//! - [`ArticleLink`]: a title/URL pair discovered on the listing page
//! - [`ArticleContent`]: body text and candidate image URL pulled from one
//!   article page, consumed immediately by the image resolver
//! - [`ArticleRecord`]: the finished output unit with the image resolved
//!   to base64 text
//!
//! Only [`ArticleRecord`] is serialized; the field order (`title`, `link`,
//! `content`, `image`) matches the output document's object shape.

use serde::{Deserialize, Serialize};

/// An article discovered on the listing page.
///
/// Links are unique by `link` within a run and carry the first-seen title.
/// Titles are never empty and never the listing's "Read more …" filler
/// anchors; the link collector filters both before constructing these.
///
/// # Fields
///
/// * `title` - The anchor text, whitespace-trimmed
/// * `link` - The absolute article URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleLink {
    /// The article's headline as it appeared on the listing page.
    pub title: String,
    /// The absolute URL of the article page.
    pub link: String,
}

/// The raw yield of one article page.
///
/// Created by the article extractor and handed straight to the image
/// resolver; it never outlives the processing of its own article.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleContent {
    /// The main body element's visible text, trimmed, or the
    /// "No content found" sentinel when the body is absent or empty.
    pub content: String,
    /// Absolute URL of the first article image, if one was found.
    pub image: Option<String>,
}

/// One finished entry of the output document.
///
/// Records are appended in discovery order and immutable once appended.
/// Articles that fail during processing never become records; there are no
/// partial entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleRecord {
    /// The article's headline.
    pub title: String,
    /// The absolute URL of the article page.
    pub link: String,
    /// The extracted body text or the "No content found" sentinel.
    pub content: String,
    /// Base64 of the fetched article image or of the assigned fallback
    /// image. Plain base64 text, no data-URI prefix.
    pub image: String,
}
