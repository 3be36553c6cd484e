//! Launcher service layer.
//!
//! Validates requests and orchestrates the aggregator, history, and
//! preferences on behalf of the MCP handlers.

use crate::domain::ItemId;
use crate::error::{SearchError, SearchResult};
use crate::models::ScoredItem;
use crate::normalizer::normalize_query;
use crate::observability::SearchMetrics;
use crate::preferences::{Preferences, TagState};
use crate::search::ResultAggregator;
use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;

/// Longest query accepted, in bytes.
const MAX_QUERY_LENGTH: usize = 500;

/// One result as handed to the display layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultEntry {
    pub id: String,
    pub name: String,
    /// Name with `{` `}` around highlighted regions
    pub display_name: String,
    pub relevance: i32,
    /// Tier label: prefix, word, substring, fuzzy or none
    pub tier: String,
    /// Id scheme, e.g. `app` or `contact`
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<String>,
}

impl From<&ScoredItem> for ResultEntry {
    fn from(scored: &ScoredItem) -> Self {
        Self {
            id: scored.id().to_string(),
            name: scored.item.name().to_string(),
            display_name: scored.display_name.clone(),
            relevance: scored.relevance,
            tier: scored.tier.label().to_string(),
            kind: scored.item.kind().scheme().to_string(),
            tags: scored.item.tags().map(str::to_string),
        }
    }
}

/// Response from a search.
#[derive(Debug, Clone, Serialize)]
pub struct SearchResponse {
    /// Query as received
    pub query: String,

    /// Ordered, bounded results
    pub results: Vec<ResultEntry>,

    /// Limit that was applied
    pub max_results: usize,
}

/// Outcome of a tag toggle.
#[derive(Debug, Clone, Serialize)]
pub struct TagToggleResponse {
    pub tag: String,
    pub state: TagState,
    /// Whether the include/exclude sets changed
    pub changed: bool,
}

/// Launcher service trait for business operations.
#[async_trait]
pub trait LauncherService: Send + Sync {
    /// Rank every provider against `query`, superseding any query in flight.
    ///
    /// An absent query is treated as empty.
    async fn search(&self, query: Option<String>) -> SearchResult<SearchResponse>;

    /// Every item, optionally for a single provider, ordered by name.
    async fn list_items(&self, provider: Option<String>) -> SearchResult<Vec<ResultEntry>>;

    /// Look up a single item by id.
    async fn get_item(&self, id: &str) -> SearchResult<ResultEntry>;

    /// Record that the user launched `id` after typing `query`.
    async fn record_selection(&self, query: &str, id: &str) -> SearchResult<()>;

    /// Change a tag's toggle state.
    async fn set_tag_state(&self, tag: &str, state: TagState) -> SearchResult<TagToggleResponse>;

    /// Store a raw maximum result count, returning the value in effect.
    async fn set_max_result_count(&self, raw: &str) -> SearchResult<usize>;

    /// Reload every provider's catalog, returning the total item count.
    async fn reload_catalogs(&self) -> SearchResult<usize>;

    /// Counter summary.
    fn metrics(&self) -> &SearchMetrics;
}

/// Default implementation of LauncherService.
pub struct LauncherServiceImpl {
    aggregator: Arc<ResultAggregator>,
    preferences: Arc<Preferences>,
}

/// Validation helper functions.
impl LauncherServiceImpl {
    fn validate_query(query: &str) -> Result<(), String> {
        if query.len() > MAX_QUERY_LENGTH {
            return Err(format!(
                "Search query too long (max {} characters)",
                MAX_QUERY_LENGTH
            ));
        }
        Ok(())
    }

    fn validate_item_id(id: &str) -> Result<ItemId, String> {
        ItemId::new(id.trim()).map_err(|e| e.to_string())
    }

    fn validate_tag(tag: &str) -> Result<(), String> {
        if tag.trim().is_empty() {
            return Err("Tag cannot be empty".to_string());
        }
        if tag.chars().any(char::is_whitespace) {
            return Err("Tag cannot contain whitespace".to_string());
        }
        Ok(())
    }
}

impl LauncherServiceImpl {
    /// Create a new launcher service.
    pub fn new(aggregator: Arc<ResultAggregator>, preferences: Arc<Preferences>) -> Self {
        Self {
            aggregator,
            preferences,
        }
    }

    pub fn aggregator(&self) -> &Arc<ResultAggregator> {
        &self.aggregator
    }
}

#[async_trait]
impl LauncherService for LauncherServiceImpl {
    async fn search(&self, query: Option<String>) -> SearchResult<SearchResponse> {
        let query = query.unwrap_or_else(|| normalize_query(None));
        Self::validate_query(&query).map_err(SearchError::InvalidQuery)?;

        let outcome = self.aggregator.search_detailed(&query).await?;

        Ok(SearchResponse {
            results: outcome.results.iter().map(ResultEntry::from).collect(),
            max_results: outcome.max_results,
            query,
        })
    }

    async fn list_items(&self, provider: Option<String>) -> SearchResult<Vec<ResultEntry>> {
        let items = self.aggregator.list_all(provider.as_deref())?;
        Ok(items.iter().map(ResultEntry::from).collect())
    }

    async fn get_item(&self, id: &str) -> SearchResult<ResultEntry> {
        let id = Self::validate_item_id(id).map_err(SearchError::InvalidQuery)?;

        self.aggregator
            .find_item(id.as_str())
            .map(|scored| ResultEntry::from(&scored))
            .ok_or_else(|| SearchError::NotFound(format!("item '{}'", id)))
    }

    async fn record_selection(&self, query: &str, id: &str) -> SearchResult<()> {
        Self::validate_query(query).map_err(SearchError::InvalidQuery)?;
        let id = Self::validate_item_id(id).map_err(SearchError::InvalidQuery)?;

        if self.aggregator.find_item(id.as_str()).is_none() {
            return Err(SearchError::NotFound(format!("item '{}'", id)));
        }

        self.aggregator.record_selection(query, &id).await
    }

    async fn set_tag_state(&self, tag: &str, state: TagState) -> SearchResult<TagToggleResponse> {
        Self::validate_tag(tag).map_err(SearchError::InvalidQuery)?;

        let changed = self.preferences.set_tag_state(tag, state);
        Ok(TagToggleResponse {
            tag: tag.to_string(),
            state: self.preferences.tag_state(tag),
            changed,
        })
    }

    async fn set_max_result_count(&self, raw: &str) -> SearchResult<usize> {
        Ok(self.preferences.set_max_result_count(raw))
    }

    async fn reload_catalogs(&self) -> SearchResult<usize> {
        let aggregator = Arc::clone(&self.aggregator);
        let reloaded = tokio::task::spawn_blocking(move || aggregator.reload_all())
            .await
            .map_err(|e| SearchError::ProviderFailed {
                provider: "*".to_string(),
                reason: e.to_string(),
            })?;

        // Providers that did reload still contribute their tags.
        self.preferences.refresh_togglable(self.aggregator.known_tags());
        reloaded
    }

    fn metrics(&self) -> &SearchMetrics {
        self.aggregator.metrics()
    }
}
