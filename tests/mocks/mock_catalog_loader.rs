use launcher_search::error::{CatalogError, CatalogResult};
use launcher_search::models::SearchableItem;
use launcher_search::repositories::CatalogLoader;
use std::sync::{Arc, Mutex};

/// Mock catalog loader for testing.
///
/// Serves whatever items it currently holds, can be told to fail, and counts
/// loads so tests can verify reload behavior.
#[allow(dead_code)]
#[derive(Clone, Default)]
pub struct MockCatalogLoader {
    items: Arc<Mutex<Vec<SearchableItem>>>,
    fail_with: Arc<Mutex<Option<String>>>,
    load_count: Arc<Mutex<usize>>,
}

#[allow(dead_code)]
impl MockCatalogLoader {
    /// Create a loader serving `items`.
    pub fn new(items: Vec<SearchableItem>) -> Self {
        Self {
            items: Arc::new(Mutex::new(items)),
            ..Self::default()
        }
    }

    /// Replace the items served by the next load.
    pub fn set_items(&self, items: Vec<SearchableItem>) {
        *self.items.lock().unwrap() = items;
    }

    /// Make every subsequent load fail with `reason`.
    pub fn fail_with(&self, reason: &str) {
        *self.fail_with.lock().unwrap() = Some(reason.to_string());
    }

    /// Let loads succeed again.
    pub fn recover(&self) {
        *self.fail_with.lock().unwrap() = None;
    }

    /// Number of load calls so far.
    pub fn load_count(&self) -> usize {
        *self.load_count.lock().unwrap()
    }
}

impl CatalogLoader for MockCatalogLoader {
    fn load(&self) -> CatalogResult<Vec<SearchableItem>> {
        *self.load_count.lock().unwrap() += 1;

        if let Some(reason) = self.fail_with.lock().unwrap().clone() {
            return Err(CatalogError::Other(reason));
        }
        Ok(self.items.lock().unwrap().clone())
    }
}
