//! Configuration management for the launcher search server.
//!
//! Configuration comes from environment variables, optionally seeded from a
//! `.env` file. Nothing here writes to stdout, which the MCP transport owns.

use crate::error::{ConfigError, ConfigResult};
use crate::preferences::{parse_max_result_count, DEFAULT_MAX_RESULT_COUNT};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeSet;
use std::env;
use std::path::PathBuf;

static TAG_LIST_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\s,]+").expect("Failed to compile tag list regex"));

/// Configuration for the launcher search server.
#[derive(Debug, Clone)]
pub struct Config {
    /// JSON catalog file shared by all providers (default: none, empty catalogs)
    pub catalog_path: Option<PathBuf>,

    /// Maximum number of results per query (default: 5, clamped to 1..=1000)
    pub max_result_count: usize,

    /// Tags an item must carry one of
    pub include_tags: BTreeSet<String>,

    /// Tags that hide an item
    pub exclude_tags: BTreeSet<String>,

    /// Tags a user may toggle; `None` offers the first few catalog tags
    pub togglable_tags: Option<BTreeSet<String>>,

    /// Log level (default: "error")
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Optional environment variables:
    /// - `LAUNCHER_CATALOG_PATH`: JSON catalog file
    /// - `MAX_RESULT_COUNT`: maximum results per query (default: 5)
    /// - `LAUNCHER_INCLUDE_TAGS`: space or comma separated tags to require
    /// - `LAUNCHER_EXCLUDE_TAGS`: space or comma separated tags to hide
    /// - `LAUNCHER_TOGGLABLE_TAGS`: space or comma separated togglable tags
    /// - `LOG_LEVEL`: logging level (default: "error")
    pub fn from_env() -> ConfigResult<Self> {
        // dotenvy does not print to stdout
        let _ = dotenvy::dotenv();

        let catalog_path = match env::var("LAUNCHER_CATALOG_PATH") {
            Ok(path) if path.trim().is_empty() => {
                return Err(ConfigError::InvalidValue {
                    var: "LAUNCHER_CATALOG_PATH".to_string(),
                    reason: "Cannot be empty".to_string(),
                });
            }
            Ok(path) => Some(PathBuf::from(path)),
            Err(_) => None,
        };

        let max_result_count = Self::parse_env_result_count("MAX_RESULT_COUNT");
        let include_tags = Self::parse_env_tags("LAUNCHER_INCLUDE_TAGS").unwrap_or_default();
        let exclude_tags = Self::parse_env_tags("LAUNCHER_EXCLUDE_TAGS").unwrap_or_default();
        let togglable_tags = Self::parse_env_tags("LAUNCHER_TOGGLABLE_TAGS");

        if let Some(tag) = include_tags.intersection(&exclude_tags).next() {
            return Err(ConfigError::InvalidValue {
                var: "LAUNCHER_INCLUDE_TAGS".to_string(),
                reason: format!("Tag '{}' is also excluded", tag),
            });
        }

        let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "error".to_string());

        Ok(Config {
            catalog_path,
            max_result_count,
            include_tags,
            exclude_tags,
            togglable_tags,
            log_level,
        })
    }

    /// Read a result count, applying the same fallback and clamping as the
    /// stored preference.
    fn parse_env_result_count(var_name: &str) -> usize {
        match env::var(var_name) {
            Ok(val) => parse_max_result_count(&val),
            Err(_) => DEFAULT_MAX_RESULT_COUNT,
        }
    }

    /// Read a tag list. Unset or blank variables yield `None`.
    fn parse_env_tags(var_name: &str) -> Option<BTreeSet<String>> {
        let raw = env::var(var_name).ok()?;
        let tags: BTreeSet<String> = TAG_LIST_REGEX
            .split(&raw)
            .filter(|tag| !tag.is_empty())
            .map(str::to_string)
            .collect();
        (!tags.is_empty()).then_some(tags)
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            catalog_path: None,
            max_result_count: DEFAULT_MAX_RESULT_COUNT,
            include_tags: BTreeSet::new(),
            exclude_tags: BTreeSet::new(),
            togglable_tags: None,
            log_level: "error".to_string(),
        }
    }
}
