use async_trait::async_trait;
use launcher_search::domain::ItemId;
use launcher_search::error::{HistoryError, HistoryResult};
use launcher_search::models::ValuedHistoryRecord;
use launcher_search::repositories::HistoryRepository;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Mock history repository for testing.
///
/// Holds preset usage counts per query and tracks method calls.
#[allow(dead_code)]
#[derive(Clone, Default)]
pub struct MockHistoryRepository {
    selections: Arc<Mutex<HashMap<String, Vec<ValuedHistoryRecord>>>>,
    unavailable: Arc<Mutex<bool>>,
    call_counts: Arc<Mutex<HashMap<String, usize>>>,
}

#[allow(dead_code)]
impl MockHistoryRepository {
    /// Create a new empty MockHistoryRepository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Preset the usage count of `item_id` for `query`.
    pub fn add_selection(&self, query: &str, item_id: &str, usage_count: u32) {
        let mut selections = self.selections.lock().unwrap();
        selections
            .entry(query.to_string())
            .or_default()
            .push(ValuedHistoryRecord::new(
                ItemId::new(item_id).unwrap(),
                usage_count,
            ));
    }

    /// Make every call fail.
    pub fn set_unavailable(&self, unavailable: bool) {
        *self.unavailable.lock().unwrap() = unavailable;
    }

    /// Get the number of times a method was called.
    pub fn get_call_count(&self, method: &str) -> usize {
        let counts = self.call_counts.lock().unwrap();
        *counts.get(method).unwrap_or(&0)
    }

    fn track_call(&self, method: &str) {
        let mut counts = self.call_counts.lock().unwrap();
        *counts.entry(method.to_string()).or_insert(0) += 1;
    }

    fn check_available(&self) -> HistoryResult<()> {
        if *self.unavailable.lock().unwrap() {
            return Err(HistoryError::Unavailable("mock offline".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl HistoryRepository for MockHistoryRepository {
    async fn previous_selections(&self, query: &str) -> HistoryResult<Vec<ValuedHistoryRecord>> {
        self.track_call("previous_selections");
        self.check_available()?;

        let selections = self.selections.lock().unwrap();
        Ok(selections.get(query).cloned().unwrap_or_default())
    }

    async fn record_selection(&self, query: &str, item_id: &ItemId) -> HistoryResult<()> {
        self.track_call("record_selection");
        self.check_available()?;

        let mut selections = self.selections.lock().unwrap();
        let records = selections.entry(query.to_string()).or_default();
        match records.iter_mut().find(|r| &r.item_id == item_id) {
            Some(record) => record.usage_count += 1,
            None => records.push(ValuedHistoryRecord::new(item_id.clone(), 1)),
        }
        Ok(())
    }
}
