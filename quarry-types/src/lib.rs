//! Core type definitions for Quarry.
//!
//! This crate defines the leaf building blocks every hydrated entity relies on:
//! - Object identifiers and the "unsaved" sentinel
//! - Coercion primitives that turn loosely-typed JSON into typed values
//! - Structural guards that gate polymorphic construction
//!
//! Concrete entities (pages, channels, users, ...) live in `quarry-model`.

pub mod cast;
pub mod guards;
mod ids;

pub use guards::{are_objects_of, is_of, sort_objects_of, sort_objects_where, Sorted};
pub use ids::{is_id_shaped, ObjectId};

/// A raw JSON object as returned by the remote API.
pub type RawObject = serde_json::Map<String, serde_json::Value>;

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in type operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid identifier: {0:?}")]
    InvalidId(String),
}
