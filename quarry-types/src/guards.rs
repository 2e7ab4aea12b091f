//! Structural guards.
//!
//! Guards decide whether an untyped JSON value is safe to treat as a known
//! shape before polymorphic construction is attempted. A property counts as
//! defined when the key exists and its value is not `null`.

use crate::RawObject;
use serde_json::Value;

/// Returns true if `value` is an object with a defined `property`.
#[must_use]
pub fn is_of(value: &Value, property: &str) -> bool {
    value
        .as_object()
        .and_then(|map| map.get(property))
        .is_some_and(|v| !v.is_null())
}

/// Returns true if `value` is an array whose every element passes [`is_of`].
///
/// An empty array passes; anything that is not an array fails.
#[must_use]
pub fn are_objects_of(value: &Value, property: &str) -> bool {
    value
        .as_array()
        .is_some_and(|items| items.iter().all(|item| is_of(item, property)))
}

/// Outcome of checking an array element by element.
#[derive(Debug, Default)]
pub struct Sorted<'a> {
    /// Elements that passed the guard, in input order.
    pub accepted: Vec<&'a RawObject>,
    /// Input indices of the elements that failed.
    pub rejected: Vec<usize>,
}

impl Sorted<'_> {
    /// True if nothing was rejected.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.rejected.is_empty()
    }
}

/// Splits an array into elements that pass [`is_of`] and the indices of
/// those that do not. A non-array input yields an empty result.
#[must_use]
pub fn sort_objects_of<'a>(value: &'a Value, property: &str) -> Sorted<'a> {
    sort_objects_where(value, |map| map.get(property).is_some_and(|v| !v.is_null()))
}

/// Like [`sort_objects_of`] with a caller-supplied check on each object.
/// Non-object elements are always rejected.
#[must_use]
pub fn sort_objects_where<'a, F>(value: &'a Value, mut accept: F) -> Sorted<'a>
where
    F: FnMut(&RawObject) -> bool,
{
    let mut sorted = Sorted::default();
    let Some(items) = value.as_array() else {
        return sorted;
    };

    for (idx, item) in items.iter().enumerate() {
        match item.as_object() {
            Some(map) if accept(map) => sorted.accepted.push(map),
            _ => sorted.rejected.push(idx),
        }
    }
    sorted
}
