//! Ordered, first-wins resolution of heterogeneous candidates.

use crate::candidate::Candidate;
use crate::error::{ResolveError, ResolveResult};
use async_trait::async_trait;
use quarry_client::ListEnvelope;
use quarry_model::Entity;
use quarry_types::{is_id_shaped, ObjectId};
use serde_json::Value;
use tracing::{debug, trace};

/// Remote lookups a [`Resolver`] falls back on.
#[async_trait]
pub trait Lookup<T: Entity>: Send + Sync {
    /// Fetches the entity with the given id. Failures are final.
    async fn find_by_id(&self, id: ObjectId) -> ResolveResult<T>;

    /// Fetches the entity with the given handle, `None` if nothing matches.
    ///
    /// The default has no handle support and never matches.
    async fn find_by_handle(&self, _handle: &str) -> ResolveResult<Option<T>> {
        Ok(None)
    }
}

/// Turns an ordered list of candidates into one entity.
///
/// Candidates are tried strictly in order, one at a time; the first one that
/// resolves wins and later ones are never inspected.
pub struct Resolver<'l, T: Entity> {
    lookup: &'l dyn Lookup<T>,
}

impl<'l, T: Entity> Resolver<'l, T> {
    pub fn new(lookup: &'l dyn Lookup<T>) -> Self {
        Self { lookup }
    }

    /// Resolves the first usable candidate.
    ///
    /// Fails with [`ResolveError::Unresolvable`] once every candidate has been
    /// skipped. A failed id lookup fails the whole call immediately.
    pub async fn resolve<'c, I>(&self, candidates: I) -> ResolveResult<T>
    where
        I: IntoIterator<Item = Candidate<'c, T>>,
    {
        for (position, candidate) in candidates.into_iter().enumerate() {
            trace!(resource = T::RESOURCE, position, ?candidate, "trying candidate");
            if let Some(entity) = self.attempt(candidate).await? {
                return Ok(entity);
            }
        }
        Err(self.unresolvable())
    }

    /// Resolves a single candidate.
    pub async fn resolve_one(&self, candidate: Candidate<'_, T>) -> ResolveResult<T> {
        self.resolve([candidate]).await
    }

    async fn attempt(&self, candidate: Candidate<'_, T>) -> ResolveResult<Option<T>> {
        match candidate.settle().await? {
            Candidate::Empty | Candidate::Opaque(_) | Candidate::Pending(_) => Ok(None),
            Candidate::Text(text) => self.from_text(&text).await,
            Candidate::Entity(entity) => Ok(Some(entity)),
            Candidate::Object(raw) => {
                let Some(identity) = raw.get(T::ID_FIELD) else {
                    return Ok(None);
                };
                // Only the identity is used; an object naming an id that does
                // not resolve ends the search.
                let text = match identity {
                    Value::String(s) => s.clone(),
                    Value::Number(n) => n.as_u64().map(|id| id.to_string()).unwrap_or_default(),
                    _ => String::new(),
                };
                if text.is_empty() || text == ObjectId::NONE.to_string() {
                    return Ok(None);
                }
                match self.from_text(&text).await? {
                    Some(entity) => Ok(Some(entity)),
                    None => Err(self.unresolvable()),
                }
            }
        }
    }

    async fn from_text(&self, text: &str) -> ResolveResult<Option<T>> {
        if text.is_empty() {
            return Ok(None);
        }
        if is_id_shaped(text) {
            let id = ObjectId::parse(text).unwrap_or(ObjectId::NONE);
            if !id.is_saved() {
                return Ok(None);
            }
            debug!(resource = T::RESOURCE, %id, "looking up by id");
            return self.lookup.find_by_id(id).await.map(Some);
        }
        debug!(resource = T::RESOURCE, handle = text, "looking up by handle");
        self.lookup.find_by_handle(text).await
    }

    fn unresolvable(&self) -> ResolveError {
        ResolveError::Unresolvable { kind: T::RESOURCE }
    }
}

/// Hydrates the first object of a list response whose `field` equals `value`.
///
/// The list is expected to be filtered already; objects that do not match
/// are ignored all the same.
pub(crate) fn first_of<T: Entity>(
    list: &ListEnvelope,
    field: &str,
    value: &str,
) -> ResolveResult<Option<T>> {
    list.objects()
        .find(|raw| raw.get(field).and_then(Value::as_str) == Some(value))
        .map(T::from_raw)
        .transpose()
        .map_err(ResolveError::from)
}
