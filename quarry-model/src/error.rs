//! Error types for entity hydration.

use thiserror::Error;

/// Result type for model operations.
pub type ModelResult<T> = Result<T, ModelError>;

/// Errors that can occur while hydrating entities.
///
/// Guard failures are not errors: malformed polymorphic arrays are dropped
/// during hydration. Only construction failures surface here.
#[derive(Debug, Error)]
pub enum ModelError {
    /// No constructor is registered for the discriminant.
    #[error("{registry}: no variant registered for kind {kind:?}")]
    UnknownKind {
        registry: &'static str,
        kind: String,
    },

    /// The raw object carries no usable discriminant.
    #[error("{registry}: raw object has no kind")]
    MissingKind { registry: &'static str },

    /// Hydration input was not a JSON object.
    #[error("expected a JSON object for {resource}, got {found}")]
    NotAnObject {
        resource: &'static str,
        found: &'static str,
    },

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ModelError {
    /// Returns true for registry lookups that found no constructor.
    pub fn is_unknown_kind(&self) -> bool {
        matches!(self, ModelError::UnknownKind { .. })
    }
}
