//! Per-pass result record for a catalog item.

use super::item::SearchableItem;
use crate::domain::ItemId;
use crate::matching::MatchTier;
use std::sync::Arc;

/// A catalog item as seen by one ranking pass.
///
/// Holds the transient relevance and highlighted display name. Created
/// fresh by every pass; the shared [`SearchableItem`] is never touched.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredItem {
    /// The catalog entity
    pub item: Arc<SearchableItem>,

    /// Current relevance; `0` means not a match
    pub relevance: i32,

    /// Tier that produced the relevance
    pub tier: MatchTier,

    /// Name with `{` `}` around the highlighted region(s); literal braces
    /// and backslashes are backslash-escaped
    pub display_name: String,
}

impl ScoredItem {
    /// Record a match, highlighting `tier`'s region if it has one.
    pub fn matched(item: Arc<SearchableItem>, tier: MatchTier) -> Self {
        let display_name = match tier.highlight() {
            Some(range) => item.display_name_with(&[range]),
            None => item.plain_display_name(),
        };
        Self {
            relevance: tier.relevance(),
            tier,
            display_name,
            item,
        }
    }

    /// Record an item with no score and its plain name as display name.
    pub fn unranked(item: Arc<SearchableItem>) -> Self {
        Self {
            display_name: item.plain_display_name(),
            relevance: 0,
            tier: MatchTier::NoMatch,
            item,
        }
    }

    /// Id of the underlying item.
    pub fn id(&self) -> &ItemId {
        self.item.id()
    }

    /// Add a history boost to the relevance.
    pub fn boost(&mut self, amount: i32) {
        self.relevance = self.relevance.saturating_add(amount);
    }

    /// Drop any highlight, showing the plain name.
    pub fn reset_display_name(&mut self) {
        self.display_name = self.item.plain_display_name();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ItemKind;

    fn item(name: &str) -> Arc<SearchableItem> {
        Arc::new(SearchableItem::new(
            ItemId::new("app://test").unwrap(),
            name,
            ItemKind::Application {
                package_name: "org.test".to_string(),
                activity_name: None,
            },
        ))
    }

    #[test]
    fn test_matched_prefix() {
        let scored = ScoredItem::matched(item("Calendar"), MatchTier::ExactPrefix { len: 3 });
        assert_eq!(scored.relevance, 100);
        assert_eq!(scored.display_name, "{Cal}endar");
    }

    #[test]
    fn test_matched_fuzzy_has_plain_name() {
        let scored = ScoredItem::matched(item("Google"), MatchTier::Fuzzy { distance: 1, limit: 3 });
        assert_eq!(scored.relevance, 2);
        assert_eq!(scored.display_name, "Google");
    }

    #[test]
    fn test_boost_and_reset() {
        let mut scored = ScoredItem::matched(item("Calendar"), MatchTier::ExactPrefix { len: 3 });
        scored.boost(50);
        assert_eq!(scored.relevance, 150);
        scored.reset_display_name();
        assert_eq!(scored.display_name, "Calendar");
    }

    #[test]
    fn test_unranked() {
        let scored = ScoredItem::unranked(item("Maps"));
        assert_eq!(scored.relevance, 0);
        assert_eq!(scored.tier, MatchTier::NoMatch);
        assert_eq!(scored.display_name, "Maps");
    }
}
