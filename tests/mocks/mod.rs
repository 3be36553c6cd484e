//! In-memory collaborators for integration tests.

mod mock_catalog_loader;
mod mock_history_repository;
mod mock_preferences;

#[allow(unused_imports)]
pub use mock_catalog_loader::MockCatalogLoader;
#[allow(unused_imports)]
pub use mock_history_repository::MockHistoryRepository;
#[allow(unused_imports)]
pub use mock_preferences::MockPreferences;
