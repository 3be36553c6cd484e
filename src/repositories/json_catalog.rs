//! Catalog loaders backed by JSON files or fixed item lists.

use super::traits::CatalogLoader;
use crate::domain::ItemId;
use crate::error::{CatalogError, CatalogResult};
use crate::models::{ItemKind, SearchableItem};
use serde::Deserialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// One entry of a JSON catalog file.
///
/// ```json
/// { "id": "app://org.calendar", "name": "Calendar", "tags": "work",
///   "type": "application", "package_name": "org.calendar" }
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogEntry {
    /// Provider-namespaced id
    pub id: String,

    /// Display name
    pub name: String,

    /// Space-separated tags
    #[serde(default)]
    pub tags: Option<String>,

    /// Category payload
    #[serde(flatten)]
    pub kind: ItemKind,
}

/// Parse a JSON catalog document into items.
///
/// Entries with an invalid id or an empty name are rejected, as are
/// duplicate ids.
pub fn parse_catalog(json: &str) -> CatalogResult<Vec<SearchableItem>> {
    let entries: Vec<CatalogEntry> = serde_json::from_str(json)?;
    let mut seen = HashSet::with_capacity(entries.len());
    let mut items = Vec::with_capacity(entries.len());

    for (index, entry) in entries.into_iter().enumerate() {
        let id = ItemId::new(entry.id).map_err(|e| CatalogError::InvalidEntry {
            index,
            reason: e.to_string(),
        })?;

        if entry.name.trim().is_empty() {
            return Err(CatalogError::InvalidEntry {
                index,
                reason: "name cannot be empty".to_string(),
            });
        }

        if !seen.insert(id.clone()) {
            return Err(CatalogError::DuplicateId(id.into_inner()));
        }

        let item = SearchableItem::new(id, entry.name, entry.kind);
        items.push(match entry.tags {
            Some(tags) => item.with_tags(tags),
            None => item,
        });
    }

    Ok(items)
}

/// Loads one provider's share of a JSON catalog file.
///
/// A single file may hold every kind of item; each loader keeps only the
/// entries whose id scheme matches its own.
#[derive(Debug, Clone)]
pub struct JsonCatalogLoader {
    path: PathBuf,
    scheme: Option<String>,
}

impl JsonCatalogLoader {
    /// Load every entry of the file.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            scheme: None,
        }
    }

    /// Load only entries whose id uses `scheme`.
    pub fn for_scheme(path: impl Into<PathBuf>, scheme: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            scheme: Some(scheme.into()),
        }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CatalogLoader for JsonCatalogLoader {
    fn load(&self) -> CatalogResult<Vec<SearchableItem>> {
        let json = std::fs::read_to_string(&self.path)?;
        let items = parse_catalog(&json)?;

        let items: Vec<SearchableItem> = match &self.scheme {
            Some(scheme) => items
                .into_iter()
                .filter(|item| item.id().scheme() == scheme)
                .collect(),
            None => items,
        };

        tracing::debug!(
            path = %self.path.display(),
            scheme = self.scheme.as_deref().unwrap_or("*"),
            count = items.len(),
            "Loaded catalog from file"
        );

        Ok(items)
    }
}

/// A fixed, in-memory catalog.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    items: Vec<SearchableItem>,
}

impl StaticCatalog {
    /// Create a catalog that always loads `items`.
    pub fn new(items: Vec<SearchableItem>) -> Self {
        Self { items }
    }
}

impl CatalogLoader for StaticCatalog {
    fn load(&self) -> CatalogResult<Vec<SearchableItem>> {
        Ok(self.items.clone())
    }
}
