//! Cross-provider merge: history boost, tag filter, ordering, truncation.

use crate::domain::ItemId;
use crate::error::{SearchError, SearchResult};
use crate::models::{compare_by_name, ScoredItem, TagFilter};
use crate::normalizer::normalize;
use crate::observability::{SearchMetrics, Timer};
use crate::providers::Provider;
use crate::repositories::{HistoryRepository, PreferenceSource};
use futures::future::join_all;
use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, Mutex, PoisonError};
use tokio_util::sync::CancellationToken;

/// Relevance added per recorded selection of an item for the same query.
pub const HISTORY_BOOST: i32 = 25;

/// Collaborator state read once at the start of a pass.
#[derive(Debug, Clone, Default)]
pub struct QuerySnapshot {
    /// Usage count per previously selected item
    pub known_ids: HashMap<ItemId, u32>,

    /// Include/exclude tag sets
    pub tag_filter: TagFilter,

    /// Maximum number of results to keep
    pub max_results: usize,
}

/// Results of a completed query and the limit that bounded them.
#[derive(Debug, Clone)]
pub struct QueryOutcome {
    pub results: Vec<ScoredItem>,
    pub max_results: usize,
}

/// Merge per-provider batches into the final ordered, bounded list.
///
/// Filtered items are dropped, survivors are boosted by their usage count,
/// then stably sorted by descending relevance and truncated. Ties keep
/// batch order, then order within a batch.
pub fn merge(snapshot: &QuerySnapshot, batches: Vec<Vec<ScoredItem>>) -> Vec<ScoredItem> {
    let mut merged: Vec<ScoredItem> = batches
        .into_iter()
        .flatten()
        .filter(|scored| snapshot.tag_filter.allows(&scored.item))
        .map(|mut scored| {
            if let Some(&count) = snapshot.known_ids.get(scored.id()) {
                let count = i32::try_from(count).unwrap_or(i32::MAX);
                scored.boost(HISTORY_BOOST.saturating_mul(count));
            }
            scored
        })
        .collect();

    merged.sort_by(|a, b| b.relevance.cmp(&a.relevance));
    merged.truncate(snapshot.max_results);
    merged
}

/// Runs a query across every provider and merges the outcome.
///
/// Starting a query cancels the one before it; a superseded query resolves
/// to [`SearchError::Cancelled`] instead of results.
pub struct ResultAggregator {
    providers: Vec<Arc<Provider>>,
    history: Arc<dyn HistoryRepository>,
    preferences: Arc<dyn PreferenceSource>,
    metrics: SearchMetrics,
    current: Mutex<Option<CancellationToken>>,
}

impl ResultAggregator {
    pub fn new(
        providers: Vec<Arc<Provider>>,
        history: Arc<dyn HistoryRepository>,
        preferences: Arc<dyn PreferenceSource>,
    ) -> Self {
        Self {
            providers,
            history,
            preferences,
            metrics: SearchMetrics::new(),
            current: Mutex::new(None),
        }
    }

    pub fn providers(&self) -> &[Arc<Provider>] {
        &self.providers
    }

    /// Provider registered under `name`.
    pub fn provider(&self, name: &str) -> Option<&Arc<Provider>> {
        self.providers.iter().find(|p| p.name() == name)
    }

    pub fn metrics(&self) -> &SearchMetrics {
        &self.metrics
    }

    /// Cancel the query in flight, if any, and hand out a token for the next.
    pub fn begin_query(&self) -> CancellationToken {
        let token = CancellationToken::new();
        let previous = self
            .current
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .replace(token.clone());

        if let Some(previous) = previous {
            if !previous.is_cancelled() {
                previous.cancel();
                self.metrics.track_superseded();
            }
        }
        token
    }

    /// Run `query`, superseding whatever query was running.
    pub async fn search(&self, query: &str) -> SearchResult<Vec<ScoredItem>> {
        Ok(self.search_detailed(query).await?.results)
    }

    /// Like [`Self::search`], also reporting the limit the query ran with.
    pub async fn search_detailed(&self, query: &str) -> SearchResult<QueryOutcome> {
        let token = self.begin_query();
        self.execute(query, token).await
    }

    /// Run `query` under an explicit cancellation token.
    pub async fn search_with_token(
        &self,
        query: &str,
        token: CancellationToken,
    ) -> SearchResult<Vec<ScoredItem>> {
        Ok(self.execute(query, token).await?.results)
    }

    /// A blank query yields no results without consulting any provider.
    async fn execute(&self, query: &str, token: CancellationToken) -> SearchResult<QueryOutcome> {
        if normalize(query).is_empty() {
            tracing::debug!("Empty query, skipping providers");
            return Ok(QueryOutcome {
                results: Vec::new(),
                max_results: self.preferences.max_result_count(),
            });
        }

        let timer = Timer::new("search");
        let snapshot = self.snapshot(query).await;
        Self::check(&token)?;

        let passes = self.providers.iter().map(|provider| {
            let provider = Arc::clone(provider);
            let query = query.to_string();
            let token = token.clone();
            let metrics = self.metrics.clone();

            tokio::task::spawn_blocking(move || {
                let pass_timer = Timer::new(format!("rank:{}", provider.name()));
                let result = provider.get_results_cancellable(&query, &token);
                if !matches!(result, Err(SearchError::Cancelled)) {
                    metrics.track_provider_pass(provider.name(), pass_timer.finish(), result.is_ok());
                }
                result
            })
        });
        let outcomes = join_all(passes).await;

        let mut batches = Vec::with_capacity(outcomes.len());
        for (provider, outcome) in self.providers.iter().zip(outcomes) {
            Self::check(&token)?;
            match outcome {
                Ok(Ok(results)) => batches.push(results),
                Ok(Err(SearchError::Cancelled)) => return Err(SearchError::Cancelled),
                Ok(Err(e)) => {
                    tracing::warn!(provider = %provider.name(), error = %e, "Provider pass failed, skipping");
                }
                Err(e) => {
                    self.metrics.track_provider_pass(provider.name(), 0, false);
                    tracing::warn!(provider = %provider.name(), error = %e, "Provider task aborted, skipping");
                }
            }
        }

        let results = merge(&snapshot, batches);
        Self::check(&token)?;

        self.metrics.track_query(timer.finish(), results.len());
        Ok(QueryOutcome {
            results,
            max_results: snapshot.max_results,
        })
    }

    /// Read history and preferences for one pass.
    ///
    /// A failing history store degrades to no boost.
    pub async fn snapshot(&self, query: &str) -> QuerySnapshot {
        let known_ids = match self.history.previous_selections(query).await {
            Ok(records) => records
                .into_iter()
                .map(|record| (record.item_id, record.usage_count))
                .collect(),
            Err(e) => {
                tracing::warn!(error = %e, "History lookup failed, ranking without boost");
                HashMap::new()
            }
        };

        QuerySnapshot {
            known_ids,
            tag_filter: self.preferences.tag_filter(),
            max_results: self.preferences.max_result_count(),
        }
    }

    /// Every item that passes the tag filter, ordered by name.
    ///
    /// Restricted to one provider when `provider_name` is given. No boost
    /// and no truncation apply.
    pub fn list_all(&self, provider_name: Option<&str>) -> SearchResult<Vec<ScoredItem>> {
        let providers: Vec<&Arc<Provider>> = match provider_name {
            Some(name) => vec![self
                .provider(name)
                .ok_or_else(|| SearchError::NotFound(format!("provider '{}'", name)))?],
            None => self.providers.iter().collect(),
        };

        let filter = self.preferences.tag_filter();
        let mut all: Vec<ScoredItem> = providers
            .into_iter()
            .flat_map(|provider| provider.get_all())
            .filter(|scored| filter.allows(&scored.item))
            .collect();
        all.sort_by(|a, b| compare_by_name(&a.item, &b.item));
        Ok(all)
    }

    /// Look an item up across providers, clearing any stale highlight.
    pub fn find_item(&self, id: &str) -> Option<ScoredItem> {
        self.providers
            .iter()
            .find_map(|provider| provider.find_by_id(id, true))
    }

    /// Record that the user picked `item_id` for `query`.
    pub async fn record_selection(&self, query: &str, item_id: &ItemId) -> SearchResult<()> {
        self.history.record_selection(query, item_id).await?;
        Ok(())
    }

    /// Reload every provider, returning the total item count.
    ///
    /// A failing provider keeps its previous catalog and does not stop the
    /// others from reloading. Failures are reported together as one
    /// [`SearchError::ProviderFailed`] naming every failed provider.
    pub fn reload_all(&self) -> SearchResult<usize> {
        let mut total = 0;
        let mut failures = Vec::new();

        for provider in &self.providers {
            match provider.reload() {
                Ok(count) => total += count,
                Err(e) => {
                    tracing::warn!(provider = %provider.name(), error = %e, "Catalog reload failed");
                    failures.push((provider.name(), e.to_string()));
                }
            }
        }

        if failures.is_empty() {
            return Ok(total);
        }

        Err(SearchError::ProviderFailed {
            provider: failures
                .iter()
                .map(|(name, _)| *name)
                .collect::<Vec<_>>()
                .join(", "),
            reason: failures
                .iter()
                .map(|(name, reason)| format!("{}: {}", name, reason))
                .collect::<Vec<_>>()
                .join("; "),
        })
    }

    /// Distinct tags across all providers.
    pub fn known_tags(&self) -> BTreeSet<String> {
        self.providers
            .iter()
            .flat_map(|provider| provider.known_tags())
            .collect()
    }

    fn check(token: &CancellationToken) -> SearchResult<()> {
        if token.is_cancelled() {
            Err(SearchError::Cancelled)
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::MatchTier;
    use crate::models::{ItemKind, SearchableItem};

    fn scored(key: &str, tier: MatchTier, tags: Option<&str>) -> ScoredItem {
        let item = SearchableItem::new(
            ItemId::from_parts("app", key).unwrap(),
            key,
            ItemKind::Application {
                package_name: key.to_string(),
                activity_name: None,
            },
        );
        let item = match tags {
            Some(tags) => item.with_tags(tags),
            None => item,
        };
        ScoredItem::matched(Arc::new(item), tier)
    }

    fn snapshot(max_results: usize) -> QuerySnapshot {
        QuerySnapshot {
            max_results,
            ..QuerySnapshot::default()
        }
    }

    const PREFIX: MatchTier = MatchTier::ExactPrefix { len: 1 };
    const SUBSTRING: MatchTier = MatchTier::Substring { start: 1, len: 1 };

    #[test]
    fn test_merge_orders_by_relevance() {
        let batches = vec![
            vec![scored("a", SUBSTRING, None)],
            vec![scored("b", PREFIX, None), scored("c", SUBSTRING, None)],
        ];
        let ids: Vec<String> = merge(&snapshot(10), batches)
            .iter()
            .map(|s| s.id().key().to_string())
            .collect();
        assert_eq!(ids, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_merge_truncates() {
        let batch = (0..10)
            .map(|i| scored(&format!("item{}", i), PREFIX, None))
            .collect();
        assert_eq!(merge(&snapshot(3), vec![batch]).len(), 3);
    }

    #[test]
    fn test_merge_boosts_from_history() {
        let mut snap = snapshot(10);
        snap.known_ids
            .insert(ItemId::from_parts("app", "a").unwrap(), 4);

        let merged = merge(
            &snap,
            vec![vec![scored("b", PREFIX, None), scored("a", SUBSTRING, None)]],
        );
        assert_eq!(merged[0].id().key(), "a");
        assert_eq!(merged[0].relevance, 4 + 100);
        assert_eq!(merged[1].relevance, 100);
    }

    #[test]
    fn test_merge_applies_tag_filter() {
        let mut snap = snapshot(10);
        snap.tag_filter.exclude.insert("work".to_string());

        let merged = merge(
            &snap,
            vec![vec![
                scored("mail", PREFIX, Some("work")),
                scored("games", PREFIX, Some("fun")),
                scored("maps", PREFIX, None),
            ]],
        );
        let ids: Vec<&str> = merged.iter().map(|s| s.id().key()).collect();
        assert_eq!(ids, vec!["games", "maps"]);
    }

    /// Preferences whose limit changes after the first read.
    struct ShiftingLimit {
        reads: std::sync::atomic::AtomicUsize,
    }

    impl PreferenceSource for ShiftingLimit {
        fn max_result_count(&self) -> usize {
            match self.reads.fetch_add(1, std::sync::atomic::Ordering::SeqCst) {
                0 => 2,
                _ => 50,
            }
        }

        fn tag_filter(&self) -> TagFilter {
            TagFilter::default()
        }
    }

    #[tokio::test]
    async fn test_outcome_reports_the_limit_used() {
        use crate::repositories::{InMemoryHistoryRepository, StaticCatalog};

        let items = ["cab", "cafe", "cake", "camera"]
            .into_iter()
            .map(|key| {
                SearchableItem::new(
                    ItemId::from_parts("app", key).unwrap(),
                    key,
                    ItemKind::Application {
                        package_name: key.to_string(),
                        activity_name: None,
                    },
                )
            })
            .collect();
        let provider = Provider::new("applications", Arc::new(StaticCatalog::new(items)));
        provider.reload().unwrap();

        let preferences = Arc::new(ShiftingLimit {
            reads: Default::default(),
        });
        let aggregator = ResultAggregator::new(
            vec![Arc::new(provider)],
            Arc::new(InMemoryHistoryRepository::new()),
            preferences.clone(),
        );

        let outcome = aggregator.search_detailed("ca").await.unwrap();
        assert_eq!(outcome.max_results, 2);
        assert_eq!(outcome.results.len(), 2);
        // The preference has moved on since the query read it.
        assert_eq!(preferences.max_result_count(), 50);
    }
}
