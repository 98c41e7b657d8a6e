//! Image resolution with round-robin local fallbacks.
//!
//! Every record carries an image as base64 text. Articles with a real
//! photo get it fetched and encoded; articles without one draw from a
//! small set of bundled placeholder images, rotated so consecutive
//! imageless articles do not all share the same picture.

use std::path::{Path, PathBuf};

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use tracing::{debug, info, instrument};

use crate::error::HarvestError;
use crate::session::PageSession;

/// The ordered local fallback set with its round-robin cursor.
///
/// The cursor only counts articles that actually used a fallback: the
/// Nth such article gets image `(N - 1) % len`, and the cursor advances
/// only after the file was read successfully.
#[derive(Debug)]
pub struct FallbackImages {
    paths: Vec<PathBuf>,
    cursor: usize,
}

impl FallbackImages {
    pub fn new(paths: Vec<PathBuf>) -> Self {
        Self { paths, cursor: 0 }
    }

    fn current(&self) -> Option<&Path> {
        self.paths.get(self.cursor).map(PathBuf::as_path)
    }

    fn advance(&mut self) {
        if !self.paths.is_empty() {
            self.cursor = (self.cursor + 1) % self.paths.len();
        }
    }
}

/// Resolve an article's image to base64 text.
///
/// A present `candidate` URL is fetched through the session; a fetch
/// failure propagates to the caller, which skips the article. With no
/// candidate the next fallback file is read instead. An unreadable or
/// missing fallback file is a `Setup` error: the bundled images are part
/// of the installation, so a broken set should stop the run rather than
/// degrade every remaining article.
#[instrument(level = "info", skip_all)]
pub async fn resolve_image<S: PageSession>(
    session: &S,
    candidate: Option<&str>,
    fallbacks: &mut FallbackImages,
) -> Result<String, HarvestError> {
    match candidate {
        Some(url) => {
            debug!(%url, "Fetching article image");
            let bytes = session.fetch_bytes(url).await?;
            Ok(STANDARD.encode(bytes))
        }
        None => {
            let path = fallbacks
                .current()
                .ok_or_else(|| {
                    HarvestError::Setup("no fallback images configured".to_string())
                })?
                .to_path_buf();
            let bytes = tokio::fs::read(&path).await.map_err(|e| {
                HarvestError::Setup(format!("fallback image {} unreadable: {e}", path.display()))
            })?;
            fallbacks.advance();
            info!(path = %path.display(), "Article has no image; using fallback");
            Ok(STANDARD.encode(bytes))
        }
    }
}
