//! The apply engine.
//!
//! Every entity hydrates itself by walking its own field list and calling
//! [`Source::apply`] once per field with the field's raw key, a mutable
//! reference to the typed field and a coercer from [`quarry_types::cast`].
//! Absent keys leave the field untouched; present keys (including `null`)
//! are coerced and assigned.

use quarry_types::RawObject;
use serde_json::Value;

/// A read-only view over a raw payload being applied to an entity.
#[derive(Debug, Clone, Copy)]
pub struct Source<'a> {
    raw: &'a RawObject,
}

impl<'a> Source<'a> {
    /// Wraps a raw object.
    pub fn new(raw: &'a RawObject) -> Self {
        Self { raw }
    }

    /// Wraps a JSON value if it is an object.
    pub fn from_value(value: &'a Value) -> Option<Self> {
        value.as_object().map(Self::new)
    }

    /// The underlying raw object.
    pub fn raw(&self) -> &'a RawObject {
        self.raw
    }

    /// Returns true if `key` is present.
    pub fn has(&self, key: &str) -> bool {
        self.raw.contains_key(key)
    }

    /// Returns the raw value under `key`.
    pub fn get(&self, key: &str) -> Option<&'a Value> {
        self.raw.get(key)
    }

    /// Returns a source over the nested object under `key`, if any.
    pub fn nested(&self, key: &str) -> Option<Source<'a>> {
        self.raw.get(key).and_then(Source::from_value)
    }

    /// Coerces `raw[key]` into `target` if the key is present.
    ///
    /// Returns whether the field was assigned.
    pub fn apply<T, F>(&self, key: &str, target: &mut T, coerce: F) -> bool
    where
        F: FnOnce(&Value, &T) -> T,
    {
        match self.raw.get(key) {
            Some(value) => {
                *target = coerce(value, target);
                true
            }
            None => false,
        }
    }
}

/// Human-readable JSON type name, for error messages.
pub(crate) fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
