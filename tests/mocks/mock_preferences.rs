use launcher_search::models::TagFilter;
use launcher_search::repositories::PreferenceSource;
use std::sync::{Arc, Mutex};

/// Mock preference source for testing.
///
/// Counts reads so tests can check values are snapshotted once per pass.
#[allow(dead_code)]
#[derive(Clone)]
pub struct MockPreferences {
    max_result_count: Arc<Mutex<usize>>,
    filter: Arc<Mutex<TagFilter>>,
    reads: Arc<Mutex<usize>>,
}

#[allow(dead_code)]
impl MockPreferences {
    pub fn new(max_result_count: usize) -> Self {
        Self {
            max_result_count: Arc::new(Mutex::new(max_result_count)),
            filter: Arc::new(Mutex::new(TagFilter::default())),
            reads: Arc::new(Mutex::new(0)),
        }
    }

    pub fn exclude(&self, tag: &str) {
        self.filter.lock().unwrap().exclude.insert(tag.to_string());
    }

    pub fn include(&self, tag: &str) {
        self.filter.lock().unwrap().include.insert(tag.to_string());
    }

    pub fn set_max_result_count(&self, count: usize) {
        *self.max_result_count.lock().unwrap() = count;
    }

    /// Total reads of either preference.
    pub fn reads(&self) -> usize {
        *self.reads.lock().unwrap()
    }
}

impl Default for MockPreferences {
    fn default() -> Self {
        Self::new(5)
    }
}

impl PreferenceSource for MockPreferences {
    fn max_result_count(&self) -> usize {
        *self.reads.lock().unwrap() += 1;
        *self.max_result_count.lock().unwrap()
    }

    fn tag_filter(&self) -> TagFilter {
        *self.reads.lock().unwrap() += 1;
        self.filter.lock().unwrap().clone()
    }
}
