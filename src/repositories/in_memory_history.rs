use super::traits::HistoryRepository;
use crate::domain::ItemId;
use crate::error::HistoryResult;
use crate::models::ValuedHistoryRecord;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use tokio::sync::RwLock;

#[derive(Debug, Clone, Copy)]
struct SelectionStats {
    count: u32,
    last_selected: DateTime<Utc>,
}

/// Process-local selection history.
///
/// Counts are kept per exact query string. Lookups return the most used
/// items first, breaking ties by most recent selection.
#[derive(Debug, Default)]
pub struct InMemoryHistoryRepository {
    selections: RwLock<HashMap<String, HashMap<ItemId, SelectionStats>>>,
}

impl InMemoryHistoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct queries with at least one recorded selection.
    pub async fn query_count(&self) -> usize {
        self.selections.read().await.len()
    }

    /// Forget every recorded selection.
    pub async fn clear(&self) {
        self.selections.write().await.clear();
    }
}

#[async_trait]
impl HistoryRepository for InMemoryHistoryRepository {
    async fn previous_selections(&self, query: &str) -> HistoryResult<Vec<ValuedHistoryRecord>> {
        let selections = self.selections.read().await;
        let Some(for_query) = selections.get(query) else {
            return Ok(Vec::new());
        };

        let mut entries: Vec<(&ItemId, &SelectionStats)> = for_query.iter().collect();
        entries.sort_by(|(a_id, a), (b_id, b)| {
            b.count
                .cmp(&a.count)
                .then_with(|| b.last_selected.cmp(&a.last_selected))
                .then_with(|| a_id.cmp(b_id))
        });

        Ok(entries
            .into_iter()
            .map(|(id, stats)| ValuedHistoryRecord::new(id.clone(), stats.count))
            .collect())
    }

    async fn record_selection(&self, query: &str, item_id: &ItemId) -> HistoryResult<()> {
        let mut selections = self.selections.write().await;
        let stats = selections
            .entry(query.to_string())
            .or_default()
            .entry(item_id.clone())
            .or_insert(SelectionStats {
                count: 0,
                last_selected: Utc::now(),
            });
        stats.count = stats.count.saturating_add(1);
        stats.last_selected = Utc::now();

        tracing::debug!(query, item_id = %item_id, count = stats.count, "Recorded selection");
        Ok(())
    }
}
