//! Resolution error types.

use quarry_client::ApiError;
use quarry_model::ModelError;
use quarry_types::ObjectId;
use thiserror::Error;

/// Result type for resolution and helper operations.
pub type ResolveResult<T> = Result<T, ResolveError>;

/// Errors that can occur while resolving candidates or running helpers.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// Every candidate was empty or unresolvable.
    #[error("no resolvable {kind} in the given input")]
    Unresolvable { kind: &'static str },

    /// A direct channel was requested between a user and themself.
    #[error("cannot open a direct channel with yourself (user {0})")]
    SelfReference(ObjectId),

    /// An operation needed a context entity that was neither given nor set.
    #[error("no {0} given and none set on the helper")]
    MissingContext(&'static str),

    #[error("API error: {0}")]
    Api(#[from] ApiError),

    #[error("model error: {0}")]
    Model(#[from] ModelError),
}

impl ResolveError {
    /// Returns true if resolution ran out of candidates.
    pub fn is_unresolvable(&self) -> bool {
        matches!(self, ResolveError::Unresolvable { .. })
    }
}
