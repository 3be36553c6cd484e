//! Launcher search server - main entry point
//!
//! Loads the catalogs, then serves launcher search over the Model Context
//! Protocol on stdin/stdout.

use anyhow::Result;
use launcher_search::preferences::Preferences;
use launcher_search::providers::Provider;
use launcher_search::repositories::{
    CatalogLoader, HistoryRepository, InMemoryHistoryRepository, JsonCatalogLoader,
    PreferenceSource, StaticCatalog,
};
use launcher_search::search::ResultAggregator;
use launcher_search::services::{LauncherService, LauncherServiceImpl};
use launcher_search::{Config, LauncherMcpServer};
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

/// Provider name and id scheme for every category, in registration order.
const PROVIDERS: [(&str, &str); 4] = [
    ("applications", "app"),
    ("contacts", "contact"),
    ("settings", "setting"),
    ("shortcuts", "shortcut"),
];

fn build_providers(config: &Config) -> Vec<Arc<Provider>> {
    PROVIDERS
        .iter()
        .map(|(name, scheme)| {
            let loader: Arc<dyn CatalogLoader> = match &config.catalog_path {
                Some(path) => Arc::new(JsonCatalogLoader::for_scheme(path, *scheme)),
                None => Arc::new(StaticCatalog::default()),
            };
            Arc::new(Provider::new(*name, loader))
        })
        .collect()
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let config = Config::from_env();

    // Initialize logging (stderr only to avoid polluting stdout/MCP communication)
    let default_level = config
        .as_ref()
        .map(|cfg| cfg.log_level.clone())
        .unwrap_or_else(|_| "error".to_string());
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = match config {
        Ok(cfg) => {
            info!("Configuration loaded successfully");
            cfg
        }
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    match &config.catalog_path {
        Some(path) => info!("Starting launcher search with catalog: {}", path.display()),
        None => warn!("LAUNCHER_CATALOG_PATH not set, starting with empty catalogs"),
    }

    let providers = build_providers(&config);
    let history = Arc::new(InMemoryHistoryRepository::new()) as Arc<dyn HistoryRepository>;
    let preferences = Arc::new(Preferences::from_config(&config));

    let aggregator = Arc::new(ResultAggregator::new(
        providers,
        history,
        preferences.clone() as Arc<dyn PreferenceSource>,
    ));
    let service = Arc::new(LauncherServiceImpl::new(aggregator, preferences));

    match service.reload_catalogs().await {
        Ok(item_count) => info!(
            "Catalogs loaded: {} items, max {} results per query",
            item_count, config.max_result_count
        ),
        // Providers that loaded keep serving; failed ones stay empty.
        Err(e) => warn!("Catalog load incomplete: {}", e),
    }

    let server = LauncherMcpServer::new(service as Arc<dyn LauncherService>);

    info!("Starting MCP server with stdio transport");
    launcher_search::server::run_server(server).await?;

    info!("Launcher search shutdown complete");
    Ok(())
}
