//! Launcher Search - the in-memory search and ranking engine behind an
//! application launcher.
//!
//! Given a partial, user-typed query, every provider (applications, contacts,
//! settings, shortcuts) ranks its catalog with a strict tier policy, and the
//! aggregator merges the results with history boosting, tag filtering and a
//! result limit. Highlighted regions of each display name are delimited with
//! `{` and `}`; a literal `{`, `}` or `\` in a name is escaped with a
//! backslash.
//!
//! # Architecture
//!
//! - **normalizer**: case folding and accent stripping with position maps
//! - **matching**: bounded edit distance and the relevance tiers
//! - **domain**: validated value objects
//! - **models**: catalog items, per-pass scored records, tag filter
//! - **providers**: per-category catalogs and their ranking pass
//! - **search**: cross-provider aggregation with cancellation
//! - **repositories**: catalog, history and preference collaborators
//! - **preferences**: result limit and tag toggles
//! - **services**: validation and orchestration for the server
//! - **server**: MCP protocol server
//! - **observability**: search counters
//! - **config**: configuration from environment variables
//! - **error**: error types

pub mod config;
pub mod domain;
pub mod error;
pub mod matching;
pub mod models;
pub mod normalizer;
pub mod observability;
pub mod preferences;
pub mod providers;
pub mod repositories;
pub mod search;
pub mod server;
pub mod services;

pub use config::Config;
pub use domain::ItemId;
pub use error::{CatalogError, ConfigError, HistoryError, NormalizeError, SearchError};
pub use matching::{FuzzyMatcher, MatchTier};
pub use models::{ItemKind, ScoredItem, SearchableItem, TagFilter};
pub use normalizer::{normalize, normalize_with_map};
pub use observability::SearchMetrics;
pub use preferences::{Preferences, TagState};
pub use providers::Provider;
pub use search::ResultAggregator;
pub use server::LauncherMcpServer;
