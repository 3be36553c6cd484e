//! Tag splitting and the include/exclude tag filter.

use super::item::SearchableItem;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeSet;

static TAG_SPLIT_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("Failed to compile tag split regex"));

/// Split a raw tag string on runs of whitespace, dropping empty pieces.
pub fn split_tags(tags: &str) -> Vec<&str> {
    TAG_SPLIT_REGEX
        .split(tags)
        .filter(|tag| !tag.is_empty())
        .collect()
}

/// Snapshot of the process-wide include/exclude tag sets.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagFilter {
    /// Items carrying any of these tags are dropped
    pub exclude: BTreeSet<String>,

    /// When non-empty, items must carry at least one of these tags
    pub include: BTreeSet<String>,
}

impl TagFilter {
    /// Create a filter from include and exclude sets.
    pub fn new(include: BTreeSet<String>, exclude: BTreeSet<String>) -> Self {
        Self { exclude, include }
    }

    /// Whether neither set constrains anything.
    pub fn is_empty(&self) -> bool {
        self.exclude.is_empty() && self.include.is_empty()
    }

    /// Whether `item` survives the filter.
    ///
    /// Items whose kind does not support tags always pass. A tagged item
    /// fails when one of its tags is excluded, or when an include set exists
    /// and none of its tags is in it. An untagged item fails only when an
    /// include set exists.
    pub fn allows(&self, item: &SearchableItem) -> bool {
        if !item.supports_tags() {
            return true;
        }

        let tags = item.tag_list();
        if tags.is_empty() {
            return self.include.is_empty();
        }

        if tags.iter().any(|tag| self.exclude.contains(*tag)) {
            return false;
        }

        self.include.is_empty() || tags.iter().any(|tag| self.include.contains(*tag))
    }
}
