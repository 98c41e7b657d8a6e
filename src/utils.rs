//! Utility functions for logging previews, URL resolution, and file system
//! checks.

use std::fs as stdfs;
use std::path::Path;

use tokio::fs;
use tracing::{info, instrument};
use url::Url;

use crate::error::HarvestError;

/// Truncate a string for logging purposes.
///
/// Long strings are cut after `max` characters with an ellipsis and byte
/// count indicator appended. The cut lands on a character boundary, so
/// scraped multi-byte text is safe to preview.
///
/// # Arguments
///
/// * `s` - The string to potentially truncate
/// * `max` - Maximum number of characters to keep
///
/// # Returns
///
/// The original string if it fits, otherwise a truncated version with
/// `"…(+N bytes)"` appended.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(truncate_for_log("short", 100), "short");
/// assert_eq!(truncate_for_log(&"a".repeat(500), 10), "aaaaaaaaaa…(+490 bytes)");
/// ```
pub fn truncate_for_log(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        None => s.to_string(),
        Some((cut, _)) => format!("{}…(+{} bytes)", &s[..cut], s.len() - cut),
    }
}

/// Resolve an href or src attribute to an absolute URL string.
///
/// Already-absolute values pass through unchanged; relative values are
/// joined against `base`. Values that resolve to nothing usable yield
/// `None`.
pub fn absolutize(href: &str, base: Option<&Url>) -> Option<String> {
    if let Ok(absolute) = Url::parse(href) {
        return Some(absolute.to_string());
    }
    base.and_then(|base| base.join(href).ok())
        .map(|url| url.to_string())
}

/// Ensure a directory exists and is writable.
///
/// Creates the directory if it doesn't exist, then performs a write test
/// by creating and immediately deleting a probe file. Run before the
/// harvest starts so an unwritable output location fails in seconds, not
/// after the whole article loop.
///
/// # Errors
///
/// Returns a setup error if the directory cannot be created or is not
/// writable (permission denied, read-only filesystem, etc.).
#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub async fn ensure_writable_dir(path: &Path) -> Result<(), HarvestError> {
    fs::create_dir_all(path).await.map_err(|e| {
        HarvestError::Setup(format!("creating {}: {e}", path.display()))
    })?;
    // Try a small sync write using std fs (simpler error surface)
    let probe_path = path.join("..__probe_write__");
    match stdfs::File::create(&probe_path) {
        Ok(_) => {
            let _ = stdfs::remove_file(&probe_path);
            info!("Output directory is writable");
            Ok(())
        }
        Err(e) => Err(HarvestError::Setup(format!(
            "output directory {} is not writable: {e}",
            path.display()
        ))),
    }
}
