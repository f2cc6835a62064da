//! Content-store access trait and its error taxonomy.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::entries::CatalogEntry;
use crate::domain::taxonomy::FilterSelection;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("transport error: {0}")]
    Transport(String),
    #[error("store returned status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("failed to decode store response: {0}")]
    Decode(String),
}

impl StoreError {
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport(message.into())
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode(message.into())
    }

    /// Transport failures may heal on a retry; status and decode errors
    /// will not.
    pub fn is_transient(&self) -> bool {
        matches!(self, StoreError::Transport(_))
    }
}

/// Read-only window onto the catalog held by the external document store.
///
/// Implementations must return entries sorted by title ascending,
/// windowed to `[page * PAGE_SIZE, (page + 1) * PAGE_SIZE)`. An empty
/// vector means the window lies past the end of the result set; errors
/// are reserved for actual failures, so the loader never confuses
/// end-of-data with a failed fetch.
#[async_trait]
pub trait ContentStore: Send + Sync {
    async fn fetch_page(
        &self,
        filter: Option<&FilterSelection>,
        page: u32,
    ) -> Result<Vec<CatalogEntry>, StoreError>;
}
