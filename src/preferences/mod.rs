//! User preferences: result limit and tag toggles.

#[allow(clippy::module_inception)]
mod preferences;
mod tag_toggles;

pub use preferences::{
    parse_max_result_count, Preferences, DEFAULT_MAX_RESULT_COUNT, MAX_RESULT_COUNT_CEILING,
};
pub use tag_toggles::{TagState, TagToggles, DEFAULT_TOGGLABLE_COUNT};
