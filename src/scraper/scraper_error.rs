use thiserror::Error;

use crate::inventory::snapshot::SnapshotError;

#[derive(Debug, Error)]
pub enum ScraperError {
    #[error("Network error: {0}")]
    Network(String),
    #[error("Blocked by site: {0}")]
    Blocked(String),
    #[error("JSON parse error: {0}")]
    JsonParse(String),
    #[error("Unexpected data shape: {0}")]
    UnexpectedShape(String),
    #[error("Gave up after {0} pages without reaching the last one")]
    PageLimit(u32),
    #[error("Failed to write snapshot: {0}")]
    Snapshot(#[from] SnapshotError),
}

impl ScraperError {
    /// Blocks and shape errors will not fix themselves on retry.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ScraperError::Network(_) | ScraperError::JsonParse(_))
    }
}
