use crate::apply::{json_type_name, Source};
use crate::error::{ModelError, ModelResult};
use quarry_types::{ObjectId, RawObject};
use serde::Serialize;
use serde_json::Value;
use std::fmt;

/// A domain object hydrated from remote API payloads.
///
/// Implementors list their own fields in [`Entity::apply`]; the provided
/// constructors build on it. `apply` must be idempotent and must leave
/// fields whose keys are absent from the source untouched.
pub trait Entity: Clone + Default + fmt::Debug + Serialize + Send + Sync + Sized {
    /// Resource name used in logs and errors (e.g. "page").
    const RESOURCE: &'static str;

    /// Raw key carrying the identity (e.g. "pageID").
    const ID_FIELD: &'static str;

    /// The identity, [`ObjectId::NONE`] while unsaved.
    fn id(&self) -> ObjectId;

    /// Copies every recognised field present in `source` onto `self`.
    fn apply(&mut self, source: &Source<'_>) -> ModelResult<()>;

    /// Returns true once the entity has been persisted.
    fn is_saved(&self) -> bool {
        self.id().is_saved()
    }

    /// Identity comparison. Two unsaved entities are never the same entity.
    fn same_entity(&self, other: &Self) -> bool {
        self.is_saved() && other.is_saved() && self.id() == other.id()
    }

    /// Applies a raw object.
    fn apply_raw(&mut self, raw: &RawObject) -> ModelResult<()> {
        self.apply(&Source::new(raw))
    }

    /// Builds a fresh entity from a raw object.
    fn from_raw(raw: &RawObject) -> ModelResult<Self> {
        let mut entity = Self::default();
        entity.apply_raw(raw)?;
        Ok(entity)
    }

    /// Builds a fresh entity from a JSON value, which must be an object.
    fn from_value(value: &Value) -> ModelResult<Self> {
        match value {
            Value::Object(raw) => Self::from_raw(raw),
            other => Err(ModelError::NotAnObject {
                resource: Self::RESOURCE,
                found: json_type_name(other),
            }),
        }
    }

    /// Parses a JSON document and builds an entity from it.
    fn from_json(json: &str) -> ModelResult<Self> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_value(&value)
    }

    /// The raw representation; feeding it back through [`Entity::from_raw`]
    /// yields an equal entity.
    fn to_raw(&self) -> RawObject {
        match serde_json::to_value(self) {
            Ok(Value::Object(raw)) => raw,
            _ => RawObject::new(),
        }
    }
}
