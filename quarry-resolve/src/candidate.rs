//! Inputs accepted by the resolver.

use crate::error::ResolveResult;
use futures::future::BoxFuture;
use quarry_model::Entity;
use quarry_types::{is_id_shaped, ObjectId, RawObject};
use serde_json::Value;
use std::fmt;
use std::future::Future;

/// One value offered to a [`crate::Resolver`].
pub enum Candidate<'a, T> {
    /// Falsy input; always skipped.
    Empty,
    /// An identifier or a handle.
    Text(String),
    /// A plain object that may carry the target's identity field.
    Object(RawObject),
    /// An already-typed entity, returned as is.
    Entity(T),
    /// A value that has to be awaited before it can be inspected.
    Pending(BoxFuture<'a, ResolveResult<Candidate<'a, T>>>),
    /// Any other truthy value (numbers, arrays, `true`); never resolves.
    Opaque(Value),
}

impl<'a, T: Entity> Candidate<'a, T> {
    pub fn entity(entity: T) -> Self {
        Candidate::Entity(entity)
    }

    /// Wraps a future producing another candidate.
    pub fn pending<F>(future: F) -> Self
    where
        F: Future<Output = ResolveResult<Candidate<'a, T>>> + Send + 'a,
    {
        Candidate::Pending(Box::pin(future))
    }

    /// Returns true for inputs that are skipped without inspection.
    pub fn is_empty(&self) -> bool {
        matches!(self, Candidate::Empty)
    }

    /// The identifier this candidate names without any remote call, if any.
    ///
    /// Pending values and handles have no known id until resolved.
    pub fn peek_id(&self) -> Option<ObjectId> {
        let id = match self {
            Candidate::Text(s) => text_id(s)?,
            Candidate::Entity(e) => e.id(),
            Candidate::Object(raw) => match raw.get(T::ID_FIELD)? {
                Value::String(s) => text_id(s)?,
                Value::Number(n) => ObjectId::new(n.as_u64()?),
                _ => return None,
            },
            _ => return None,
        };
        id.is_saved().then_some(id)
    }

    /// Awaits pending values until a settled candidate remains.
    pub(crate) async fn settle(self) -> ResolveResult<Self> {
        let mut current = self;
        loop {
            match current {
                Candidate::Pending(future) => current = future.await?,
                settled => return Ok(settled),
            }
        }
    }
}

fn text_id(s: &str) -> Option<ObjectId> {
    is_id_shaped(s).then(|| ObjectId::parse(s).ok()).flatten()
}

impl<T> From<&str> for Candidate<'_, T> {
    fn from(s: &str) -> Self {
        Self::from(s.to_string())
    }
}

impl<T> From<String> for Candidate<'_, T> {
    fn from(s: String) -> Self {
        if s.is_empty() {
            Candidate::Empty
        } else {
            Candidate::Text(s)
        }
    }
}

impl<T> From<ObjectId> for Candidate<'_, T> {
    fn from(id: ObjectId) -> Self {
        if id.is_saved() {
            Candidate::Text(id.to_string())
        } else {
            Candidate::Empty
        }
    }
}

impl<T> From<RawObject> for Candidate<'_, T> {
    fn from(raw: RawObject) -> Self {
        Candidate::Object(raw)
    }
}

impl<T> From<Value> for Candidate<'_, T> {
    fn from(value: Value) -> Self {
        match value {
            Value::Null | Value::Bool(false) => Candidate::Empty,
            Value::Number(ref n) if n.as_f64().is_some_and(|f| f == 0.0 || f.is_nan()) => {
                Candidate::Empty
            }
            Value::String(s) => Self::from(s),
            Value::Object(raw) => Candidate::Object(raw),
            other => Candidate::Opaque(other),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Candidate<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Candidate::Empty => f.write_str("Empty"),
            Candidate::Text(s) => f.debug_tuple("Text").field(s).finish(),
            Candidate::Object(raw) => f.debug_tuple("Object").field(raw).finish(),
            Candidate::Entity(e) => f.debug_tuple("Entity").field(e).finish(),
            Candidate::Pending(_) => f.write_str("Pending(..)"),
            Candidate::Opaque(v) => f.debug_tuple("Opaque").field(v).finish(),
        }
    }
}
