//! Error types for the launcher search engine.
//!
//! This module defines custom error types using `thiserror` for precise error handling.

use thiserror::Error;

/// Errors that can occur while normalizing text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NormalizeError {
    /// Input text was absent
    #[error("Invalid input: text is absent")]
    InvalidInput,
}

/// Errors that can occur while loading a provider catalog.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Catalog source could not be read
    #[error("Failed to read catalog: {0}")]
    Io(#[from] std::io::Error),

    /// Catalog source is not valid JSON
    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// A catalog entry failed validation
    #[error("Invalid catalog entry {index}: {reason}")]
    InvalidEntry { index: usize, reason: String },

    /// Two entries share the same id
    #[error("Duplicate item id in catalog: {0}")]
    DuplicateId(String),

    /// Generic catalog error
    #[error("Catalog error: {0}")]
    Other(String),
}

/// Errors that can occur when reading or writing selection history.
#[derive(Error, Debug)]
pub enum HistoryError {
    /// History backend is unavailable
    #[error("History unavailable: {0}")]
    Unavailable(String),
}

/// Errors that can occur during configuration loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Environment variable has invalid value
    #[error("Invalid value for {var}: {reason}")]
    InvalidValue { var: String, reason: String },
}

/// Errors that can occur during search operations.
#[derive(Error, Debug)]
pub enum SearchError {
    /// The query was superseded by a newer one
    #[error("Search cancelled: superseded by a newer query")]
    Cancelled,

    /// Invalid search parameters
    #[error("Invalid search parameters: {0}")]
    InvalidQuery(String),

    /// A provider pass failed to complete
    #[error("Provider {provider} failed: {reason}")]
    ProviderFailed { provider: String, reason: String },

    /// History lookup or update failed
    #[error(transparent)]
    History(#[from] HistoryError),

    /// Item or provider not found
    #[error("Not found: {0}")]
    NotFound(String),
}

/// Convenience type alias for Results with NormalizeError
pub type NormalizeResult<T> = Result<T, NormalizeError>;

/// Convenience type alias for Results with CatalogError
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Convenience type alias for Results with HistoryError
pub type HistoryResult<T> = Result<T, HistoryError>;

/// Convenience type alias for Results with ConfigError
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Convenience type alias for Results with SearchError
pub type SearchResult<T> = Result<T, SearchError>;
