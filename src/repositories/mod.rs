//! Data access seams: catalog loading, selection history, and preferences.

mod in_memory_history;
mod json_catalog;
mod traits;

pub use in_memory_history::InMemoryHistoryRepository;
pub use json_catalog::{parse_catalog, CatalogEntry, JsonCatalogLoader, StaticCatalog};
pub use traits::{CatalogLoader, HistoryRepository, PreferenceSource};
