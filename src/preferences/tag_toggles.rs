//! Tri-state tag toggles backing the include/exclude tag sets.

use crate::models::TagFilter;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Number of catalog tags offered as togglable when none are configured.
pub const DEFAULT_TOGGLABLE_COUNT: usize = 5;

/// State of a single togglable tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum TagState {
    /// Neither hidden nor required
    Default,
    /// Items with this tag are excluded
    Hide,
    /// Items must carry this tag (or another shown tag)
    Show,
}

/// The hidden and must-show tag sets plus the tags a user may toggle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagToggles {
    hidden: BTreeSet<String>,
    must_show: BTreeSet<String>,
    togglable: BTreeSet<String>,
}

impl TagToggles {
    /// Build toggles from persisted sets.
    ///
    /// Tags already hidden or shown are always togglable.
    pub fn new(
        togglable: BTreeSet<String>,
        must_show: BTreeSet<String>,
        hidden: BTreeSet<String>,
    ) -> Self {
        let togglable = togglable
            .into_iter()
            .chain(must_show.iter().cloned())
            .chain(hidden.iter().cloned())
            .collect();
        Self {
            hidden,
            must_show,
            togglable,
        }
    }

    /// Current state of `tag`.
    pub fn state(&self, tag: &str) -> TagState {
        if self.hidden.contains(tag) {
            TagState::Hide
        } else if self.must_show.contains(tag) {
            TagState::Show
        } else {
            TagState::Default
        }
    }

    /// Move `tag` to `state`, returning whether anything changed.
    ///
    /// Tags outside the togglable set are left alone.
    pub fn set_state(&mut self, tag: &str, state: TagState) -> bool {
        if !self.togglable.contains(tag) {
            return false;
        }

        let before = self.state(tag);
        if before == state {
            return false;
        }

        self.hidden.remove(tag);
        self.must_show.remove(tag);
        match state {
            TagState::Hide => {
                self.hidden.insert(tag.to_string());
            }
            TagState::Show => {
                self.must_show.insert(tag.to_string());
            }
            TagState::Default => {}
        }
        true
    }

    /// Replace the togglable set.
    ///
    /// Without a configured set, the first [`DEFAULT_TOGGLABLE_COUNT`] known
    /// catalog tags in sorted order are offered. Hidden and shown tags that
    /// fall outside the new set are pruned.
    pub fn load_togglable<I, S>(&mut self, configured: Option<BTreeSet<String>>, known_tags: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.togglable = match configured {
            Some(tags) if !tags.is_empty() => tags,
            _ => known_tags
                .into_iter()
                .map(Into::into)
                .collect::<BTreeSet<String>>()
                .into_iter()
                .take(DEFAULT_TOGGLABLE_COUNT)
                .collect(),
        };
        self.prune();
    }

    /// Drop hidden and shown tags that are no longer togglable.
    pub fn prune(&mut self) {
        let togglable = &self.togglable;
        self.hidden.retain(|tag| togglable.contains(tag));
        self.must_show.retain(|tag| togglable.contains(tag));
    }

    pub fn togglable(&self) -> &BTreeSet<String> {
        &self.togglable
    }

    pub fn hidden(&self) -> &BTreeSet<String> {
        &self.hidden
    }

    pub fn must_show(&self) -> &BTreeSet<String> {
        &self.must_show
    }

    /// The filter the aggregator applies.
    pub fn filter(&self) -> TagFilter {
        TagFilter::new(self.must_show.clone(), self.hidden.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(tags: &[&str]) -> BTreeSet<String> {
        tags.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn test_state_transitions() {
        let mut toggles = TagToggles::new(set(&["work", "games"]), BTreeSet::new(), BTreeSet::new());
        assert_eq!(toggles.state("work"), TagState::Default);

        assert!(toggles.set_state("work", TagState::Hide));
        assert_eq!(toggles.state("work"), TagState::Hide);
        assert!(!toggles.set_state("work", TagState::Hide));

        assert!(toggles.set_state("work", TagState::Show));
        assert_eq!(toggles.state("work"), TagState::Show);
        assert!(toggles.hidden().is_empty());

        assert!(toggles.set_state("work", TagState::Default));
        assert!(toggles.must_show().is_empty());
    }

    #[test]
    fn test_non_togglable_tag_is_ignored() {
        let mut toggles = TagToggles::new(set(&["work"]), BTreeSet::new(), BTreeSet::new());
        assert!(!toggles.set_state("games", TagState::Hide));
        assert_eq!(toggles.state("games"), TagState::Default);
    }

    #[test]
    fn test_persisted_sets_are_togglable() {
        let toggles = TagToggles::new(BTreeSet::new(), set(&["home"]), set(&["work"]));
        assert!(toggles.togglable().contains("home"));
        assert!(toggles.togglable().contains("work"));
        assert_eq!(toggles.filter(), TagFilter::new(set(&["home"]), set(&["work"])));
    }

    #[test]
    fn test_load_togglable_defaults_to_first_known_tags() {
        let mut toggles = TagToggles::default();
        toggles.load_togglable(None, ["g", "b", "f", "a", "e", "c", "d", "a"]);
        assert_eq!(toggles.togglable(), &set(&["a", "b", "c", "d", "e"]));
    }

    #[test]
    fn test_load_togglable_prunes() {
        let mut toggles = TagToggles::new(BTreeSet::new(), set(&["home"]), set(&["work"]));
        toggles.load_togglable(Some(set(&["work"])), Vec::<String>::new());
        assert_eq!(toggles.state("work"), TagState::Hide);
        assert_eq!(toggles.state("home"), TagState::Default);
        assert!(toggles.must_show().is_empty());
    }
}
