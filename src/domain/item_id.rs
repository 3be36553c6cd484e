//! ItemId value object.

use super::errors::ValidationError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

const SCHEME_SEPARATOR: &str = "://";

/// A provider-namespaced item identifier such as `app://org.calendar`.
///
/// The scheme prefix keeps ids unique across providers, so two providers
/// can never hand the aggregator colliding ids.
///
/// # Example
///
/// ```
/// use launcher_search::domain::ItemId;
///
/// let id = ItemId::new("app://org.calendar").unwrap();
/// assert_eq!(id.scheme(), "app");
/// assert_eq!(id.as_str(), "app://org.calendar");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId(String);

impl ItemId {
    /// Create a new ItemId, validating that it's non-empty and namespaced.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::EmptyId` for an empty string and
    /// `ValidationError::MissingScheme` when no `scheme://` prefix is present.
    pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
        let id = id.into();
        if id.is_empty() {
            return Err(ValidationError::EmptyId);
        }
        match id.find(SCHEME_SEPARATOR) {
            Some(pos) if pos > 0 => Ok(Self(id)),
            _ => Err(ValidationError::MissingScheme(id)),
        }
    }

    /// Build an id from a scheme and a provider-local key.
    pub fn from_parts(scheme: &str, key: &str) -> Result<Self, ValidationError> {
        Self::new(format!("{}{}{}", scheme, SCHEME_SEPARATOR, key))
    }

    /// The provider namespace, e.g. `app` or `contact`.
    pub fn scheme(&self) -> &str {
        // Construction guarantees the separator is present.
        self.0
            .split_once(SCHEME_SEPARATOR)
            .map(|(scheme, _)| scheme)
            .unwrap_or_default()
    }

    /// The provider-local part after `scheme://`.
    pub fn key(&self) -> &str {
        self.0
            .split_once(SCHEME_SEPARATOR)
            .map(|(_, key)| key)
            .unwrap_or_default()
    }

    /// Get the ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert into the underlying String.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Serialize for ItemId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ItemId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        ItemId::new(s).map_err(serde::de::Error::custom)
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
