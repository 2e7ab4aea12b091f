use crate::apply::Source;
use crate::entity::Entity;
use crate::error::ModelResult;
use chrono::{DateTime, Utc};
use quarry_types::{cast, ObjectId};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct User {
    #[serde(rename = "userID")]
    pub user_id: ObjectId,
    pub username: String,
    pub email: String,
    pub name: String,
    pub handle: String,
    /// Account kind, empty for regular users ("bot", "sys", ...).
    pub kind: String,
    pub labels: BTreeMap<String, String>,

    #[serde(rename = "createdAt", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(rename = "updatedAt", skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(rename = "suspendedAt", skip_serializing_if = "Option::is_none")]
    pub suspended_at: Option<DateTime<Utc>>,
    #[serde(rename = "deletedAt", skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl User {
    /// The best available display label.
    pub fn display_name(&self) -> &str {
        [&self.name, &self.handle, &self.username, &self.email]
            .into_iter()
            .find(|s| !s.is_empty())
            .map_or("", String::as_str)
    }

    pub fn is_suspended(&self) -> bool {
        self.suspended_at.is_some()
    }
}

impl Entity for User {
    const RESOURCE: &'static str = "user";
    const ID_FIELD: &'static str = "userID";

    fn id(&self) -> ObjectId {
        self.user_id
    }

    fn apply(&mut self, src: &Source<'_>) -> ModelResult<()> {
        src.apply("userID", &mut self.user_id, cast::id);
        src.apply("username", &mut self.username, cast::string);
        src.apply("email", &mut self.email, cast::string);
        src.apply("name", &mut self.name, cast::string);
        src.apply("handle", &mut self.handle, cast::string);
        src.apply("kind", &mut self.kind, cast::string);
        src.apply("labels", &mut self.labels, cast::labels);
        src.apply("createdAt", &mut self.created_at, cast::date);
        src.apply("updatedAt", &mut self.updated_at, cast::date);
        src.apply("suspendedAt", &mut self.suspended_at, cast::date);
        src.apply("deletedAt", &mut self.deleted_at, cast::date);
        Ok(())
    }
}
