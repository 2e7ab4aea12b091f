//! Discriminant-keyed variant registry.
//!
//! Maps a `kind` string to a constructor so heterogeneous collections can be
//! hydrated without a central type switch. Registration is expected to finish
//! during start-up; the table is still guarded by a lock so late registration
//! is safe, merely unusual.

use crate::apply::Source;
use crate::error::{ModelError, ModelResult};
use quarry_types::RawObject;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::debug;

/// Raw key holding the discriminant.
pub const KIND_FIELD: &str = "kind";

type Maker<V> = Arc<dyn Fn(&Source<'_>) -> ModelResult<V> + Send + Sync>;

/// A table of constructors keyed by discriminant.
pub struct VariantRegistry<V> {
    name: &'static str,
    makers: RwLock<HashMap<String, Maker<V>>>,
}

impl<V> VariantRegistry<V> {
    /// Creates an empty registry. `name` appears in errors and logs.
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            makers: RwLock::new(HashMap::new()),
        }
    }

    /// The registry's name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Registers a constructor. A later registration for the same kind
    /// replaces the earlier one.
    pub fn set<F>(&self, kind: impl Into<String>, maker: F)
    where
        F: Fn(&Source<'_>) -> ModelResult<V> + Send + Sync + 'static,
    {
        let kind = kind.into();
        let mut makers = self.makers.write().unwrap_or_else(PoisonError::into_inner);
        if makers.insert(kind.clone(), Arc::new(maker)).is_some() {
            debug!("{}: replaced constructor for kind {:?}", self.name, kind);
        }
    }

    /// Returns true if `kind` has a constructor.
    pub fn contains(&self, kind: &str) -> bool {
        self.makers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(kind)
    }

    /// Registered kinds, sorted.
    pub fn kinds(&self) -> Vec<String> {
        let mut kinds: Vec<String> = self
            .makers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect();
        kinds.sort();
        kinds
    }

    /// Constructs the variant named by `raw["kind"]`.
    ///
    /// Any string, the empty one included, is looked up; only an absent or
    /// non-string `kind` is [`ModelError::MissingKind`].
    pub fn make(&self, raw: &RawObject) -> ModelResult<V> {
        let kind = raw
            .get(KIND_FIELD)
            .and_then(Value::as_str)
            .ok_or(ModelError::MissingKind {
                registry: self.name,
            })?;

        // Clone the constructor out so the lock is not held while it runs.
        let maker = self
            .makers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(kind)
            .cloned()
            .ok_or_else(|| ModelError::UnknownKind {
                registry: self.name,
                kind: kind.to_string(),
            })?;

        maker(&Source::new(raw))
    }
}

impl<V> fmt::Debug for VariantRegistry<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VariantRegistry")
            .field("name", &self.name)
            .field("kinds", &self.kinds())
            .finish()
    }
}
