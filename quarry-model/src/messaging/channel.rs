use crate::apply::Source;
use crate::entity::Entity;
use crate::error::ModelResult;
use chrono::{DateTime, Utc};
use quarry_types::{cast, ObjectId};
use serde::Serialize;
use serde_json::Value;

/// Visibility of a channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChannelType {
    #[default]
    Public,
    Private,
    /// Direct conversation between a fixed set of users.
    Group,
}

impl ChannelType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChannelType::Public => "public",
            ChannelType::Private => "private",
            ChannelType::Group => "group",
        }
    }

    /// Unknown strings keep the current value, `null` resets to the default.
    fn coerce(value: &Value, current: &Self) -> Self {
        match value {
            Value::Null => Self::default(),
            Value::String(s) => match s.as_str() {
                "" | "public" => ChannelType::Public,
                "private" => ChannelType::Private,
                "group" => ChannelType::Group,
                _ => *current,
            },
            _ => *current,
        }
    }
}

/// Who may join a channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MembershipPolicy {
    #[default]
    Default,
    /// Members cannot leave.
    Forced,
    Featured,
}

impl MembershipPolicy {
    fn coerce(value: &Value, current: &Self) -> Self {
        match value {
            Value::Null => Self::default(),
            Value::String(s) => match s.as_str() {
                "" | "default" => MembershipPolicy::Default,
                "forced" => MembershipPolicy::Forced,
                "featured" => MembershipPolicy::Featured,
                _ => *current,
            },
            _ => *current,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Channel {
    #[serde(rename = "channelID")]
    pub channel_id: ObjectId,
    pub name: String,
    pub topic: String,
    #[serde(rename = "type")]
    pub kind: ChannelType,
    #[serde(rename = "membershipPolicy")]
    pub membership_policy: MembershipPolicy,
    pub members: Vec<ObjectId>,

    #[serde(rename = "createdAt", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(rename = "updatedAt", skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(rename = "archivedAt", skip_serializing_if = "Option::is_none")]
    pub archived_at: Option<DateTime<Utc>>,
    #[serde(rename = "deletedAt", skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,

    #[serde(rename = "canUpdate")]
    pub can_update: bool,
    #[serde(rename = "canArchive")]
    pub can_archive: bool,
    #[serde(rename = "canPart")]
    pub can_part: bool,
    #[serde(rename = "canJoin")]
    pub can_join: bool,
}

impl Channel {
    /// True for direct-message channels.
    pub fn is_direct(&self) -> bool {
        self.kind == ChannelType::Group
    }

    pub fn is_member(&self, user_id: ObjectId) -> bool {
        user_id.is_saved() && self.members.contains(&user_id)
    }
}

impl Entity for Channel {
    const RESOURCE: &'static str = "channel";
    const ID_FIELD: &'static str = "channelID";

    fn id(&self) -> ObjectId {
        self.channel_id
    }

    fn apply(&mut self, src: &Source<'_>) -> ModelResult<()> {
        src.apply("channelID", &mut self.channel_id, cast::id);
        src.apply("name", &mut self.name, cast::string);
        src.apply("topic", &mut self.topic, cast::string);
        src.apply("type", &mut self.kind, ChannelType::coerce);
        src.apply("membershipPolicy", &mut self.membership_policy, MembershipPolicy::coerce);
        src.apply("members", &mut self.members, cast::id_list);
        src.apply("createdAt", &mut self.created_at, cast::date);
        src.apply("updatedAt", &mut self.updated_at, cast::date);
        src.apply("archivedAt", &mut self.archived_at, cast::date);
        src.apply("deletedAt", &mut self.deleted_at, cast::date);
        src.apply("canUpdate", &mut self.can_update, cast::boolean);
        src.apply("canArchive", &mut self.can_archive, cast::boolean);
        src.apply("canPart", &mut self.can_part, cast::boolean);
        src.apply("canJoin", &mut self.can_join, cast::boolean);
        Ok(())
    }
}
