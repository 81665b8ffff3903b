use cinedeck_core::error::ApiError;
use cinedeck_core::types::{MovieRecord, SearchHit};

/// A movie-metadata source that can look titles up and search them.
#[async_trait::async_trait]
pub trait MovieApi: Send + Sync {
    fn name(&self) -> &str;

    /// Get card-level details for one title.
    async fn lookup_by_id(&self, id: &str) -> Result<MovieRecord, ApiError>;

    /// Get details for the detail view, including the full plot.
    async fn lookup_detail(&self, id: &str) -> Result<MovieRecord, ApiError>;

    /// Search titles by free text. An empty result is `ApiError::NotFound`.
    async fn search_by_title(&self, query: &str) -> Result<Vec<SearchHit>, ApiError>;
}
