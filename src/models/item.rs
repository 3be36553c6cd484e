//! The catalog entity ranked by providers.

use crate::domain::ItemId;
use crate::normalizer::{map_position, normalize, normalize_phone, normalize_with_map};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::ops::Range;

use super::tags::split_tags;

/// Category-specific payload of a catalog item.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ItemKind {
    /// An installed application
    Application {
        package_name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        activity_name: Option<String>,
    },

    /// A contact phone entry
    Contact {
        #[serde(default)]
        lookup_key: String,
        #[serde(default)]
        phone: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        nickname: Option<String>,
    },

    /// A system settings panel
    Setting {
        setting_name: String,
        #[serde(default)]
        package_name: String,
    },

    /// An application shortcut
    Shortcut {
        package_name: String,
        #[serde(default)]
        intent_uri: String,
    },
}

impl ItemKind {
    /// Whether items of this kind take part in tag filtering.
    pub fn supports_tags(&self) -> bool {
        matches!(self, Self::Application { .. } | Self::Shortcut { .. })
    }

    /// The id scheme conventionally used by this kind.
    pub fn scheme(&self) -> &'static str {
        match self {
            Self::Application { .. } => "app",
            Self::Contact { .. } => "contact",
            Self::Setting { .. } => "setting",
            Self::Shortcut { .. } => "shortcut",
        }
    }
}

/// A searchable catalog entry.
///
/// The raw name and its normalized form are fixed at construction. Ranking
/// passes never mutate an item; they produce [`super::ScoredItem`] records.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchableItem {
    id: ItemId,
    name: String,
    name_normalized: String,
    position_map: Option<Vec<usize>>,
    nickname_normalized: Option<String>,
    phone_normalized: Option<String>,
    tags: Option<String>,
    kind: ItemKind,
}

impl SearchableItem {
    /// Create an item, normalizing its name and recording the position map.
    pub fn new(id: ItemId, name: impl Into<String>, kind: ItemKind) -> Self {
        let name = name.into();
        let normalized = normalize_with_map(&name);

        let nickname_normalized = match &kind {
            ItemKind::Contact {
                nickname: Some(nickname),
                ..
            } if !nickname.is_empty() => Some(normalize(nickname)),
            _ => None,
        };

        let phone_normalized = match &kind {
            ItemKind::Contact { phone, .. } => Some(normalize_phone(phone)),
            _ => None,
        }
        .filter(|digits| !digits.is_empty());

        Self {
            id,
            name,
            name_normalized: normalized.text,
            position_map: Some(normalized.position_map),
            nickname_normalized,
            phone_normalized,
            tags: None,
            kind,
        }
    }

    /// Attach a space-separated tag string.
    pub fn with_tags(mut self, tags: impl Into<String>) -> Self {
        self.tags = Some(tags.into());
        self
    }

    /// Globally unique, provider-namespaced id.
    pub fn id(&self) -> &ItemId {
        &self.id
    }

    /// Raw display text.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Canonical search form of the name.
    pub fn name_normalized(&self) -> &str {
        &self.name_normalized
    }

    /// Normalized-to-raw byte offset map, if one was recorded.
    pub fn position_map(&self) -> Option<&[usize]> {
        self.position_map.as_deref()
    }

    /// Canonical form of a contact's nickname.
    pub fn nickname_normalized(&self) -> Option<&str> {
        self.nickname_normalized.as_deref()
    }

    /// Digits of a contact's phone number.
    pub fn phone_normalized(&self) -> Option<&str> {
        self.phone_normalized.as_deref()
    }

    /// Raw tag string.
    pub fn tags(&self) -> Option<&str> {
        self.tags.as_deref()
    }

    /// Category payload.
    pub fn kind(&self) -> &ItemKind {
        &self.kind
    }

    /// Whether this item takes part in tag filtering.
    pub fn supports_tags(&self) -> bool {
        self.kind.supports_tags()
    }

    /// Individual tags, split on whitespace.
    pub fn tag_list(&self) -> Vec<&str> {
        self.tags.as_deref().map(split_tags).unwrap_or_default()
    }

    /// Map a normalized offset to an offset into [`Self::name`].
    ///
    /// Offsets past the mapped range resolve to the end of the name.
    pub fn map_position(&self, position: usize) -> usize {
        map_position(self.position_map(), position, &self.name)
    }

    /// The name as shown without highlights, with markers escaped.
    pub fn plain_display_name(&self) -> String {
        let mut display = String::with_capacity(self.name.len());
        push_escaped(&mut display, &self.name);
        display
    }

    /// The name with each normalized range wrapped in `{` `}`.
    ///
    /// Ranges are applied left to right; zero-width ranges add no markers.
    /// Literal braces and backslashes in the name are escaped, see
    /// [`push_escaped`].
    pub fn display_name_with(&self, ranges: &[Range<usize>]) -> String {
        let mut display = String::with_capacity(self.name.len() + ranges.len() * 2);
        let mut last_end = 0;

        for range in ranges {
            let start = self.map_position(range.start).max(last_end);
            let end = self.map_position(range.end).max(start);
            if start == end {
                continue;
            }
            push_escaped(&mut display, &self.name[last_end..start]);
            display.push('{');
            push_escaped(&mut display, &self.name[start..end]);
            display.push('}');
            last_end = end;
        }

        push_escaped(&mut display, &self.name[last_end..]);
        display
    }

    /// The raw tag string with a byte range wrapped in `{` `}`.
    ///
    /// Returns `None` when the item has no tags or the range is not valid
    /// for the tag string. Escaping follows [`push_escaped`].
    pub fn display_tags_with(&self, range: Range<usize>) -> Option<String> {
        let tags = self.tags.as_deref()?;
        if range.start > range.end
            || range.end > tags.len()
            || !tags.is_char_boundary(range.start)
            || !tags.is_char_boundary(range.end)
        {
            return None;
        }

        let mut display = String::with_capacity(tags.len() + 2);
        push_escaped(&mut display, &tags[..range.start]);
        display.push('{');
        push_escaped(&mut display, &tags[range.clone()]);
        display.push('}');
        push_escaped(&mut display, &tags[range.end..]);
        Some(display)
    }
}

/// Append `text` with highlight markers escaped.
///
/// Display strings reserve `{` and `}` for highlight markers. A literal
/// `{`, `}` or `\` in a name is written as `\{`, `\}` or `\\`, so every
/// unescaped brace in a display string is a marker.
pub fn push_escaped(out: &mut String, text: &str) {
    for c in text.chars() {
        if matches!(c, '{' | '}' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
}

/// Order items by human-readable name, falling back to id for equal names.
///
/// Names compare case- and accent-insensitively first, then by raw text.
pub fn compare_by_name(a: &SearchableItem, b: &SearchableItem) -> Ordering {
    a.name_normalized
        .cmp(&b.name_normalized)
        .then_with(|| a.name.cmp(&b.name))
        .then_with(|| a.id.cmp(&b.id))
}
