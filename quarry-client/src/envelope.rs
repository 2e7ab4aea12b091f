//! Response shapes shared by every API operation.

use crate::error::{ApiError, ApiResult};
use quarry_types::RawObject;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// A list response: `{ "set": [...], "filter": {...} }`.
///
/// Elements are kept as raw values; hydration decides what to do with
/// anything that is not an object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListEnvelope {
    #[serde(default)]
    pub set: Vec<Value>,
    #[serde(default)]
    pub filter: RawObject,
}

impl ListEnvelope {
    pub fn from_value(value: Value) -> ApiResult<Self> {
        match value {
            Value::Object(_) => Ok(serde_json::from_value(value)?),
            other => Err(ApiError::UnexpectedShape(format!("expected list envelope, got {other}"))),
        }
    }

    pub fn len(&self) -> usize {
        self.set.len()
    }

    pub fn is_empty(&self) -> bool {
        self.set.is_empty()
    }

    /// Elements that are objects, in order.
    pub fn objects(&self) -> impl Iterator<Item = &RawObject> {
        self.set.iter().filter_map(Value::as_object)
    }
}

/// Query parameters for list operations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Filter(BTreeMap<String, String>);

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.0.insert(key.into(), value.to_string());
        self
    }

    pub fn limit(self, limit: usize) -> Self {
        self.with("limit", limit)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}
