//! A provider owns one category's catalog and ranks it against queries.

use crate::domain::ItemId;
use crate::error::{CatalogResult, SearchError, SearchResult};
use crate::matching::MatchTier;
use crate::models::{ScoredItem, SearchableItem};
use crate::normalizer::{normalize, phone_query};
use crate::repositories::CatalogLoader;
use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock};
use tokio_util::sync::CancellationToken;

/// Items ranked between two cancellation checks.
const CANCEL_CHECK_INTERVAL: usize = 64;

type Catalog = Arc<Vec<Arc<SearchableItem>>>;

/// Rank one item against an already normalized query.
///
/// The name is classified first. Contacts whose name does not match fall
/// back to their nickname, then to their phone digits when the query looks
/// like a number; such matches show the plain name.
pub fn rank_item(query: &str, item: &Arc<SearchableItem>) -> Option<ScoredItem> {
    let tier = MatchTier::classify(query, item.name_normalized());
    if tier.is_match() {
        return Some(ScoredItem::matched(Arc::clone(item), tier));
    }

    let tier = item
        .nickname_normalized()
        .map(|nickname| MatchTier::classify(query, nickname))
        .filter(MatchTier::is_match)
        .or_else(|| {
            let phone = item.phone_normalized()?;
            let digits = phone_query(query)?;
            Some(MatchTier::classify(&digits, phone)).filter(MatchTier::is_match)
        })?;

    let mut scored = ScoredItem::matched(Arc::clone(item), tier);
    scored.reset_display_name();
    Some(scored)
}

/// Owner of one ordered catalog of [`SearchableItem`]s.
///
/// Passes over the same provider are serialized, and a reload waits for any
/// pass in flight. The catalog itself is swapped wholesale, so a pass always
/// iterates a stable snapshot.
pub struct Provider {
    name: String,
    loader: Arc<dyn CatalogLoader>,
    catalog: RwLock<Catalog>,
    last_pass: Mutex<HashMap<ItemId, ScoredItem>>,
    pass_lock: Mutex<()>,
}

impl std::fmt::Debug for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Provider")
            .field("name", &self.name)
            .field("len", &self.len())
            .finish()
    }
}

impl Provider {
    /// Create an empty provider; call [`Provider::reload`] to fill it.
    pub fn new(name: impl Into<String>, loader: Arc<dyn CatalogLoader>) -> Self {
        Self {
            name: name.into(),
            loader,
            catalog: RwLock::new(Arc::new(Vec::new())),
            last_pass: Mutex::new(HashMap::new()),
            pass_lock: Mutex::new(()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Replace the catalog with a fresh load.
    ///
    /// On failure the previous catalog stays in place.
    pub fn reload(&self) -> CatalogResult<usize> {
        let _pass = lock(&self.pass_lock);

        let items: Vec<Arc<SearchableItem>> =
            self.loader.load()?.into_iter().map(Arc::new).collect();
        let count = items.len();

        *self.catalog.write().unwrap_or_else(PoisonError::into_inner) = Arc::new(items);
        lock(&self.last_pass).clear();

        tracing::info!(provider = %self.name, count, "Catalog reloaded");
        Ok(count)
    }

    /// Number of items in the current catalog.
    pub fn len(&self) -> usize {
        self.snapshot().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Rank the catalog against a raw query.
    ///
    /// Matches come back in catalog order; scoring order is left to the
    /// aggregator.
    pub fn get_results(&self, query: &str) -> Vec<ScoredItem> {
        // A token nobody holds can never be cancelled.
        self.get_results_cancellable(query, &CancellationToken::new())
            .unwrap_or_default()
    }

    /// Rank the catalog, giving up as soon as `token` is cancelled.
    ///
    /// An abandoned pass returns [`SearchError::Cancelled`] and leaves no
    /// trace in the provider.
    pub fn get_results_cancellable(
        &self,
        query: &str,
        token: &CancellationToken,
    ) -> SearchResult<Vec<ScoredItem>> {
        if token.is_cancelled() {
            return Err(SearchError::Cancelled);
        }

        let _pass = lock(&self.pass_lock);
        let catalog = self.snapshot();
        let query = normalize(query);

        let mut results = Vec::new();
        for (index, item) in catalog.iter().enumerate() {
            if index % CANCEL_CHECK_INTERVAL == 0 && token.is_cancelled() {
                tracing::trace!(provider = %self.name, index, "Ranking pass abandoned");
                return Err(SearchError::Cancelled);
            }
            if let Some(scored) = rank_item(&query, item) {
                results.push(scored);
            }
        }

        let mut last_pass = lock(&self.last_pass);
        last_pass.clear();
        last_pass.extend(
            results
                .iter()
                .map(|scored| (scored.id().clone(), scored.clone())),
        );

        tracing::debug!(
            provider = %self.name,
            query = %query,
            candidates = catalog.len(),
            matches = results.len(),
            "Ranking pass completed"
        );

        Ok(results)
    }

    /// Look up an item by id.
    ///
    /// With `allow_side_effect`, any highlight from the last pass is
    /// discarded and the item comes back with its plain name. Without it,
    /// the last pass's record is returned untouched when there is one.
    pub fn find_by_id(&self, id: &str, allow_side_effect: bool) -> Option<ScoredItem> {
        let item = self
            .snapshot()
            .iter()
            .find(|item| item.id().as_str() == id)
            .cloned()?;

        let mut last_pass = lock(&self.last_pass);
        if allow_side_effect {
            last_pass.remove(item.id());
            return Some(ScoredItem::unranked(item));
        }

        Some(
            last_pass
                .get(item.id())
                .cloned()
                .unwrap_or_else(|| ScoredItem::unranked(item)),
        )
    }

    /// First item whose raw name equals `name` exactly.
    pub fn find_by_name(&self, name: &str) -> Option<Arc<SearchableItem>> {
        self.snapshot()
            .iter()
            .find(|item| item.name() == name)
            .cloned()
    }

    /// Every item with its plain name, in catalog order.
    pub fn get_all(&self) -> Vec<ScoredItem> {
        lock(&self.last_pass).clear();
        self.snapshot()
            .iter()
            .cloned()
            .map(ScoredItem::unranked)
            .collect()
    }

    /// Remove an item from the catalog, returning whether it was present.
    pub fn remove(&self, id: &ItemId) -> bool {
        let _pass = lock(&self.pass_lock);
        let mut catalog = self.catalog.write().unwrap_or_else(PoisonError::into_inner);

        let Some(position) = catalog.iter().position(|item| item.id() == id) else {
            return false;
        };

        let mut items = catalog.as_ref().clone();
        items.remove(position);
        *catalog = Arc::new(items);
        lock(&self.last_pass).remove(id);

        tracing::info!(provider = %self.name, item_id = %id, "Item removed");
        true
    }

    /// Distinct tags carried by taggable items.
    pub fn known_tags(&self) -> BTreeSet<String> {
        self.snapshot()
            .iter()
            .filter(|item| item.supports_tags())
            .flat_map(|item| {
                item.tag_list()
                    .into_iter()
                    .map(str::to_string)
                    .collect::<Vec<_>>()
            })
            .collect()
    }

    fn snapshot(&self) -> Catalog {
        Arc::clone(&self.catalog.read().unwrap_or_else(PoisonError::into_inner))
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ItemKind;
    use crate::repositories::StaticCatalog;

    fn app(key: &str, name: &str) -> SearchableItem {
        SearchableItem::new(
            ItemId::from_parts("app", key).unwrap(),
            name,
            ItemKind::Application {
                package_name: format!("org.{}", key),
                activity_name: None,
            },
        )
    }

    fn contact(key: &str, name: &str, nickname: &str) -> SearchableItem {
        SearchableItem::new(
            ItemId::from_parts("contact", key).unwrap(),
            name,
            ItemKind::Contact {
                lookup_key: key.to_string(),
                phone: String::new(),
                nickname: Some(nickname.to_string()),
            },
        )
    }

    fn provider(items: Vec<SearchableItem>) -> Provider {
        let provider = Provider::new("test", Arc::new(StaticCatalog::new(items)));
        provider.reload().unwrap();
        provider
    }

    #[test]
    fn test_rank_item_tiers() {
        let calendar = Arc::new(app("calendar", "Calendar"));
        let scored = rank_item("cal", &calendar).unwrap();
        assert_eq!(scored.relevance, 100);
        assert_eq!(scored.display_name, "{Cal}endar");

        assert!(rank_item("xyz", &calendar).is_none());
    }

    #[test]
    fn test_nickname_fallback_has_no_highlight() {
        let bob = Arc::new(contact("1", "Robert Smith", "Bobby"));
        let scored = rank_item("bob", &bob).unwrap();
        assert_eq!(scored.relevance, 100);
        assert_eq!(scored.display_name, "Robert Smith");

        // Name matches win over the nickname.
        let scored = rank_item("rob", &bob).unwrap();
        assert_eq!(scored.display_name, "{Rob}ert Smith");
    }

    #[test]
    fn test_phone_fallback_for_numeric_queries() {
        let alice = Arc::new(SearchableItem::new(
            ItemId::from_parts("contact", "7").unwrap(),
            "Alice Martin",
            ItemKind::Contact {
                lookup_key: "7".to_string(),
                phone: "+33 6 12-34-56-78".to_string(),
                nickname: None,
            },
        ));

        let scored = rank_item("+33 6", &alice).unwrap();
        assert_eq!(scored.relevance, 100);
        assert_eq!(scored.display_name, "Alice Martin");

        let scored = rank_item(&normalize("12 34"), &alice).unwrap();
        assert_eq!(scored.relevance, 4);

        // Text queries never reach the phone number.
        assert!(rank_item("x33", &alice).is_none());
        assert!(rank_item("99", &alice).is_none());
    }

    #[test]
    fn test_results_in_catalog_order() {
        let provider = provider(vec![
            app("recall", "Recall"),
            app("maps", "Maps"),
            app("calendar", "Calendar"),
        ]);
        let results = provider.get_results("cal");
        let names: Vec<&str> = results.iter().map(|r| r.item.name()).collect();
        assert_eq!(names, vec!["Recall", "Calendar"]);
    }

    #[test]
    fn test_cancelled_pass_leaves_no_trace() {
        let provider = provider(vec![app("calendar", "Calendar")]);
        let token = CancellationToken::new();
        token.cancel();

        let result = provider.get_results_cancellable("cal", &token);
        assert!(matches!(result, Err(SearchError::Cancelled)));

        let found = provider.find_by_id("app://calendar", false).unwrap();
        assert_eq!(found.display_name, "Calendar");
        assert_eq!(found.relevance, 0);
    }

    #[test]
    fn test_find_by_id_side_effect() {
        let provider = provider(vec![app("calendar", "Calendar")]);
        provider.get_results("cal");

        let peek = provider.find_by_id("app://calendar", false).unwrap();
        assert_eq!(peek.display_name, "{Cal}endar");

        let reset = provider.find_by_id("app://calendar", true).unwrap();
        assert_eq!(reset.display_name, "Calendar");

        let peek = provider.find_by_id("app://calendar", false).unwrap();
        assert_eq!(peek.display_name, "Calendar");

        assert!(provider.find_by_id("app://missing", true).is_none());
    }

    #[test]
    fn test_remove_and_known_tags() {
        let provider = provider(vec![
            app("calendar", "Calendar").with_tags("work daily"),
            app("games", "Games").with_tags("fun"),
        ]);
        assert_eq!(provider.known_tags().len(), 3);

        assert!(provider.remove(&ItemId::from_parts("app", "games").unwrap()));
        assert!(!provider.remove(&ItemId::from_parts("app", "games").unwrap()));
        assert_eq!(provider.len(), 1);
        assert!(!provider.known_tags().contains("fun"));
    }
}
