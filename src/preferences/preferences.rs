//! User preferences consulted by the aggregator.

use super::tag_toggles::{TagState, TagToggles};
use crate::config::Config;
use crate::models::TagFilter;
use crate::repositories::PreferenceSource;
use std::collections::BTreeSet;
use std::sync::{PoisonError, RwLock};

/// Result count used when the stored value is missing or unusable.
pub const DEFAULT_MAX_RESULT_COUNT: usize = 5;

/// Largest accepted result count.
pub const MAX_RESULT_COUNT_CEILING: usize = 1000;

/// Interpret a stored "maximum result count" value.
///
/// Values that do not parse as a number (including NaN) fall back to
/// [`DEFAULT_MAX_RESULT_COUNT`]. Fractions truncate; the result is clamped
/// to `1..=1000`.
///
/// ```
/// use launcher_search::preferences::parse_max_result_count;
///
/// assert_eq!(parse_max_result_count("12"), 12);
/// assert_eq!(parse_max_result_count("0"), 1);
/// assert_eq!(parse_max_result_count("99999999999999999999"), 1000);
/// assert_eq!(parse_max_result_count("lots"), 5);
/// ```
pub fn parse_max_result_count(raw: &str) -> usize {
    let value = match raw.trim().parse::<f64>() {
        Ok(value) if !value.is_nan() => value,
        _ => return DEFAULT_MAX_RESULT_COUNT,
    };

    let value = value.trunc();
    if value < 1.0 {
        1
    } else if value > MAX_RESULT_COUNT_CEILING as f64 {
        MAX_RESULT_COUNT_CEILING
    } else {
        value as usize
    }
}

#[derive(Debug)]
struct PreferenceState {
    max_result_count: usize,
    toggles: TagToggles,
    configured_togglable: Option<BTreeSet<String>>,
}

/// Process-wide preferences with interior mutability.
///
/// Readers get a copy of the current values; writers replace them under a
/// short write lock.
#[derive(Debug)]
pub struct Preferences {
    state: RwLock<PreferenceState>,
}

impl Preferences {
    /// Create preferences with a result limit and no tag constraints.
    pub fn new(max_result_count: usize) -> Self {
        Self {
            state: RwLock::new(PreferenceState {
                max_result_count: max_result_count.clamp(1, MAX_RESULT_COUNT_CEILING),
                toggles: TagToggles::default(),
                configured_togglable: None,
            }),
        }
    }

    /// Seed preferences from configuration.
    pub fn from_config(config: &Config) -> Self {
        let toggles = TagToggles::new(
            config.togglable_tags.clone().unwrap_or_default(),
            config.include_tags.clone(),
            config.exclude_tags.clone(),
        );
        Self {
            state: RwLock::new(PreferenceState {
                max_result_count: config.max_result_count.clamp(1, MAX_RESULT_COUNT_CEILING),
                toggles,
                configured_togglable: config.togglable_tags.clone(),
            }),
        }
    }

    /// Store a raw result count value, returning the interpreted count.
    pub fn set_max_result_count(&self, raw: &str) -> usize {
        let count = parse_max_result_count(raw);
        self.write().max_result_count = count;
        count
    }

    /// Current state of a tag.
    pub fn tag_state(&self, tag: &str) -> TagState {
        self.read().toggles.state(tag)
    }

    /// Change a tag's state, returning whether the filter changed.
    pub fn set_tag_state(&self, tag: &str, state: TagState) -> bool {
        let changed = self.write().toggles.set_state(tag, state);
        if changed {
            tracing::info!(tag, ?state, "Tag state changed");
        }
        changed
    }

    /// Recompute the togglable set from the tags present in the catalogs.
    pub fn refresh_togglable<I, S>(&self, known_tags: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut state = self.write();
        let configured = state.configured_togglable.clone();
        state.toggles.load_togglable(configured, known_tags);
    }

    /// Copy of the current toggles.
    pub fn toggles(&self) -> TagToggles {
        self.read().toggles.clone()
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, PreferenceState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, PreferenceState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for Preferences {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_RESULT_COUNT)
    }
}

impl PreferenceSource for Preferences {
    fn max_result_count(&self) -> usize {
        self.read().max_result_count
    }

    fn tag_filter(&self) -> TagFilter {
        self.read().toggles.filter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_max_result_count() {
        assert_eq!(parse_max_result_count("5"), 5);
        assert_eq!(parse_max_result_count(" 42 "), 42);
        assert_eq!(parse_max_result_count("7.9"), 7);
        assert_eq!(parse_max_result_count("-3"), 1);
        assert_eq!(parse_max_result_count("0.5"), 1);
        assert_eq!(parse_max_result_count("1000"), 1000);
        assert_eq!(parse_max_result_count("1001"), 1000);
        assert_eq!(parse_max_result_count("99999999999999999999"), 1000);
        assert_eq!(parse_max_result_count("inf"), 1000);
    }

    #[test]
    fn test_parse_max_result_count_fallback() {
        assert_eq!(parse_max_result_count(""), DEFAULT_MAX_RESULT_COUNT);
        assert_eq!(parse_max_result_count("ten"), DEFAULT_MAX_RESULT_COUNT);
        assert_eq!(parse_max_result_count("NaN"), DEFAULT_MAX_RESULT_COUNT);
    }

    #[test]
    fn test_preferences_set_max_result_count() {
        let prefs = Preferences::default();
        assert_eq!(prefs.max_result_count(), 5);
        assert_eq!(prefs.set_max_result_count("20"), 20);
        assert_eq!(prefs.max_result_count(), 20);
    }

    #[test]
    fn test_preferences_from_config() {
        let config = Config {
            max_result_count: 0,
            include_tags: ["home".to_string()].into_iter().collect(),
            exclude_tags: ["work".to_string()].into_iter().collect(),
            ..Config::default()
        };
        let prefs = Preferences::from_config(&config);
        assert_eq!(prefs.max_result_count(), 1);
        assert_eq!(prefs.tag_state("home"), TagState::Show);
        assert_eq!(prefs.tag_state("work"), TagState::Hide);

        let filter = prefs.tag_filter();
        assert!(filter.include.contains("home"));
        assert!(filter.exclude.contains("work"));
    }

    #[test]
    fn test_preferences_tag_toggling() {
        let prefs = Preferences::default();
        prefs.refresh_togglable(["work", "games"]);
        assert!(prefs.set_tag_state("games", TagState::Hide));
        assert!(!prefs.set_tag_state("games", TagState::Hide));
        assert!(!prefs.set_tag_state("unknown", TagState::Hide));
        assert!(prefs.tag_filter().exclude.contains("games"));
    }
}
