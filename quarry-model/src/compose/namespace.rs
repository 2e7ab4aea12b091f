use crate::apply::Source;
use crate::entity::Entity;
use crate::error::ModelResult;
use chrono::{DateTime, Utc};
use quarry_types::{cast, ObjectId, RawObject};
use serde::Serialize;
use std::collections::BTreeMap;

/// A namespace groups modules, pages and charts into one application.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Namespace {
    #[serde(rename = "namespaceID")]
    pub namespace_id: ObjectId,
    pub name: String,
    /// URL-friendly alternate key.
    pub slug: String,
    pub enabled: bool,
    pub meta: RawObject,
    pub labels: BTreeMap<String, String>,

    #[serde(rename = "createdAt", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(rename = "updatedAt", skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(rename = "deletedAt", skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,

    #[serde(rename = "canUpdateNamespace")]
    pub can_update_namespace: bool,
    #[serde(rename = "canDeleteNamespace")]
    pub can_delete_namespace: bool,
    #[serde(rename = "canManageNamespace")]
    pub can_manage_namespace: bool,
}

impl Entity for Namespace {
    const RESOURCE: &'static str = "namespace";
    const ID_FIELD: &'static str = "namespaceID";

    fn id(&self) -> ObjectId {
        self.namespace_id
    }

    fn apply(&mut self, src: &Source<'_>) -> ModelResult<()> {
        src.apply("namespaceID", &mut self.namespace_id, cast::id);
        src.apply("name", &mut self.name, cast::string);
        src.apply("slug", &mut self.slug, cast::string);
        src.apply("enabled", &mut self.enabled, cast::boolean);
        src.apply("meta", &mut self.meta, cast::object);
        src.apply("labels", &mut self.labels, cast::labels);
        src.apply("createdAt", &mut self.created_at, cast::date);
        src.apply("updatedAt", &mut self.updated_at, cast::date);
        src.apply("deletedAt", &mut self.deleted_at, cast::date);
        src.apply("canUpdateNamespace", &mut self.can_update_namespace, cast::boolean);
        src.apply("canDeleteNamespace", &mut self.can_delete_namespace, cast::boolean);
        src.apply("canManageNamespace", &mut self.can_manage_namespace, cast::boolean);
        Ok(())
    }
}
