use crate::domain::ItemId;
use crate::error::{CatalogResult, HistoryResult};
use crate::models::{SearchableItem, TagFilter, ValuedHistoryRecord};
use async_trait::async_trait;

/// Source of a provider's catalog.
///
/// Invoked synchronously by `Provider::reload`. Implementations read
/// whatever backs the catalog (a file, the host OS, a fixture) and return
/// fully constructed items.
pub trait CatalogLoader: Send + Sync {
    /// Load the complete catalog.
    fn load(&self) -> CatalogResult<Vec<SearchableItem>>;
}

/// Store of past user selections, keyed by the exact query string.
#[async_trait]
pub trait HistoryRepository: Send + Sync {
    /// Items previously selected for `query`, each with its usage count.
    async fn previous_selections(&self, query: &str) -> HistoryResult<Vec<ValuedHistoryRecord>>;

    /// Record that `item_id` was selected for `query`.
    async fn record_selection(&self, query: &str, item_id: &ItemId) -> HistoryResult<()>;
}

/// Read-only view of the user preferences the aggregator consults.
///
/// Both values are read once at the start of each aggregation pass.
pub trait PreferenceSource: Send + Sync {
    /// Maximum number of results handed to the display layer.
    fn max_result_count(&self) -> usize;

    /// Current include/exclude tag sets.
    fn tag_filter(&self) -> TagFilter;
}
