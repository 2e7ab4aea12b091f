//! Coercion primitives.
//!
//! Every coercer takes the raw JSON value and the field's current value and
//! returns the new typed value. JSON `null` counts as "present but empty" and
//! resets the field to its type default. The current value is only consulted
//! where the raw input is unusable but not empty (e.g. a non-numeric string
//! given for a number).

use crate::{ObjectId, RawObject};
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde_json::Value;
use std::collections::BTreeMap;

/// Coerces to a string. Composite values collapse to `""`.
pub fn string(value: &Value, _current: &String) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null | Value::Array(_) | Value::Object(_) => String::new(),
    }
}

/// Coerces to a float.
pub fn number(value: &Value, current: &f64) -> f64 {
    match value {
        Value::Number(n) => n.as_f64().unwrap_or(*current),
        Value::String(s) if s.trim().is_empty() => 0.0,
        Value::String(s) => s.trim().parse().unwrap_or(*current),
        Value::Bool(b) => f64::from(u8::from(*b)),
        Value::Null => 0.0,
        Value::Array(_) | Value::Object(_) => *current,
    }
}

/// Coerces to an integer. Fractional numbers are truncated toward zero.
pub fn integer(value: &Value, current: &i64) -> i64 {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f.trunc() as i64))
            .unwrap_or(*current),
        Value::String(s) if s.trim().is_empty() => 0,
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().map(|f| f.trunc() as i64))
                .unwrap_or(*current)
        }
        Value::Bool(b) => i64::from(*b),
        Value::Null => 0,
        Value::Array(_) | Value::Object(_) => *current,
    }
}

/// Coerces to a boolean.
///
/// `"false"` and `"0"` are false even though they are non-empty strings.
pub fn boolean(value: &Value, _current: &bool) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !matches!(s.trim(), "" | "0" | "false"),
        Value::Null => false,
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Coerces to an identifier, mapping anything unusable to [`ObjectId::NONE`].
pub fn id(value: &Value, _current: &ObjectId) -> ObjectId {
    match value {
        Value::String(s) => ObjectId::parse(s).unwrap_or(ObjectId::NONE),
        Value::Number(n) => n.as_u64().map_or(ObjectId::NONE, ObjectId::new),
        _ => ObjectId::NONE,
    }
}

/// Coerces to a UTC timestamp.
///
/// Accepts RFC 3339 strings, naive ISO-8601 date-times (read as UTC),
/// plain dates and millisecond epoch numbers. Falsy or unparseable input
/// yields `None` instead of an invalid date.
pub fn date(value: &Value, _current: &Option<DateTime<Utc>>) -> Option<DateTime<Utc>> {
    match value {
        Value::String(s) => parse_date(s),
        Value::Number(n) => n
            .as_i64()
            .filter(|ms| *ms != 0)
            .and_then(|ms| Utc.timestamp_millis_opt(ms).single()),
        _ => None,
    }
}

fn parse_date(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Coerces to a list of strings. Non-string elements are dropped.
pub fn string_list(value: &Value, _current: &Vec<String>) -> Vec<String> {
    match value {
        Value::Array(items) => items
            .iter()
            .filter_map(|v| v.as_str().map(str::to_string))
            .collect(),
        _ => Vec::new(),
    }
}

/// Coerces to a list of identifiers. Unusable elements are dropped.
pub fn id_list(value: &Value, _current: &Vec<ObjectId>) -> Vec<ObjectId> {
    match value {
        Value::Array(items) => items
            .iter()
            .map(|v| id(v, &ObjectId::NONE))
            .filter(ObjectId::is_saved)
            .collect(),
        _ => Vec::new(),
    }
}

/// Coerces to a label map. Only string values are kept.
pub fn labels(value: &Value, _current: &BTreeMap<String, String>) -> BTreeMap<String, String> {
    match value {
        Value::Object(map) => map
            .iter()
            .filter_map(|(k, v)| v.as_str().map(|s| (k.clone(), s.to_string())))
            .collect(),
        _ => BTreeMap::new(),
    }
}

/// Coerces to a nested raw object. Non-objects become empty.
pub fn object(value: &Value, _current: &RawObject) -> RawObject {
    match value {
        Value::Object(map) => map.clone(),
        _ => RawObject::new(),
    }
}

/// Keeps the raw value as-is.
pub fn json(value: &Value, _current: &Value) -> Value {
    value.clone()
}
