//! Output accumulation and the final JSON write.

use std::path::Path;

use tokio::fs;
use tracing::{info, instrument};

use crate::error::HarvestError;
use crate::models::ArticleRecord;

/// Ordered collection of finished records, flushed to disk once per run.
#[derive(Debug, Default)]
pub struct Accumulator {
    records: Vec<ArticleRecord>,
}

impl Accumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record; append order is output order.
    pub fn record(&mut self, record: ArticleRecord) {
        self.records.push(record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[ArticleRecord] {
        &self.records
    }

    /// Serialize every record as a pretty-printed JSON array and replace
    /// whatever `path` held before.
    ///
    /// Runs exactly once, after the article loop; nothing is written
    /// incrementally, so a file from an earlier run stays intact until a
    /// new run completes its loop.
    #[instrument(level = "info", skip_all, fields(path = %path.display()))]
    pub async fn flush(&self, path: &Path) -> Result<(), HarvestError> {
        let json = serde_json::to_string_pretty(self.records()).map_err(|e| {
            HarvestError::Write {
                path: path.display().to_string(),
                message: e.to_string(),
            }
        })?;

        info!(count = self.records.len(), "Writing article records");
        fs::write(path, &json).await.map_err(|e| HarvestError::Write {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        info!(bytes = json.len(), "Wrote harvest output");

        Ok(())
    }
}
