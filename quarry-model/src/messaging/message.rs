use crate::apply::Source;
use crate::entity::Entity;
use crate::error::ModelResult;
use chrono::{DateTime, Utc};
use quarry_types::{cast, ObjectId};
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Message {
    #[serde(rename = "messageID")]
    pub message_id: ObjectId,
    #[serde(rename = "channelID")]
    pub channel_id: ObjectId,
    #[serde(rename = "userID")]
    pub user_id: ObjectId,
    /// Message type, empty for plain text.
    #[serde(rename = "type")]
    pub kind: String,
    pub message: String,
    /// Thread root, [`ObjectId::NONE`] for top-level messages.
    #[serde(rename = "replyTo")]
    pub reply_to: ObjectId,
    pub replies: i64,

    #[serde(rename = "createdAt", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(rename = "updatedAt", skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(rename = "deletedAt", skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,

    #[serde(rename = "canEdit")]
    pub can_edit: bool,
    #[serde(rename = "canDelete")]
    pub can_delete: bool,
}

impl Message {
    pub fn is_reply(&self) -> bool {
        self.reply_to.is_saved()
    }
}

impl Entity for Message {
    const RESOURCE: &'static str = "message";
    const ID_FIELD: &'static str = "messageID";

    fn id(&self) -> ObjectId {
        self.message_id
    }

    fn apply(&mut self, src: &Source<'_>) -> ModelResult<()> {
        src.apply("messageID", &mut self.message_id, cast::id);
        src.apply("channelID", &mut self.channel_id, cast::id);
        src.apply("userID", &mut self.user_id, cast::id);
        src.apply("type", &mut self.kind, cast::string);
        src.apply("message", &mut self.message, cast::string);
        src.apply("replyTo", &mut self.reply_to, cast::id);
        src.apply("replies", &mut self.replies, cast::integer);
        src.apply("createdAt", &mut self.created_at, cast::date);
        src.apply("updatedAt", &mut self.updated_at, cast::date);
        src.apply("deletedAt", &mut self.deleted_at, cast::date);
        src.apply("canEdit", &mut self.can_edit, cast::boolean);
        src.apply("canDelete", &mut self.can_delete, cast::boolean);
        Ok(())
    }
}
