//! Domain validation errors.

use std::fmt;

/// Errors that can occur during domain value object validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The provided ID is empty.
    EmptyId,

    /// The provided ID has no `scheme://` namespace prefix.
    MissingScheme(String),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyId => write!(f, "ID cannot be empty"),
            Self::MissingScheme(id) => {
                write!(f, "ID must be namespaced as scheme://..., got: {}", id)
            }
        }
    }
}

impl std::error::Error for ValidationError {}
