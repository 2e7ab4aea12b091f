//! Entity model for Quarry.
//!
//! Turns loosely-typed API payloads into canonical, validated entities:
//! - [`Source`]: the apply engine every entity hydrates itself through
//! - [`Entity`]: the contract shared by all domain types (identity, apply, raw form)
//! - [`VariantRegistry`]: discriminant-keyed constructors for heterogeneous collections
//! - [`compose`], [`messaging`], [`system`]: the concrete entities
//!
//! Hydration never fails on malformed polymorphic arrays; those are dropped
//! and the field keeps its previous value. It does fail, with a
//! [`ModelError`], when a well-formed element names a kind nobody registered.

mod apply;
pub mod compose;
mod entity;
mod error;
pub mod messaging;
mod registry;
pub mod system;

pub use apply::Source;
pub use entity::Entity;
pub use error::{ModelError, ModelResult};
pub use registry::{VariantRegistry, KIND_FIELD};
