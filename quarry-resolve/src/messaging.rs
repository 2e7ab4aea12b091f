//! Messaging helpers: channels, messages and direct conversations.

use crate::candidate::Candidate;
use crate::error::{ResolveError, ResolveResult};
use crate::resolver::{Lookup, Resolver};
use crate::system::UserLookup;
use async_trait::async_trait;
use quarry_client::{MessagingApi, SystemApi};
use quarry_model::messaging::{Channel, ChannelType, Message};
use quarry_model::system::User;
use quarry_model::Entity;
use quarry_types::{ObjectId, RawObject};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::debug;

/// Channels by id. Channels have no handle.
pub struct ChannelLookup<'a> {
    pub api: &'a dyn MessagingApi,
}

#[async_trait]
impl Lookup<Channel> for ChannelLookup<'_> {
    async fn find_by_id(&self, id: ObjectId) -> ResolveResult<Channel> {
        Ok(Channel::from_raw(&self.api.channel_read(id).await?)?)
    }
}

/// Resolves channels and posts messages, falling back on a context channel.
#[derive(Clone)]
pub struct MessagingHelper {
    api: Arc<dyn MessagingApi>,
    users: Arc<dyn SystemApi>,
    channel: Option<Channel>,
}

impl MessagingHelper {
    pub fn new(api: Arc<dyn MessagingApi>, users: Arc<dyn SystemApi>) -> Self {
        Self {
            api,
            users,
            channel: None,
        }
    }

    /// Sets the channel used when a call names none.
    pub fn with_channel(mut self, channel: Channel) -> Self {
        self.channel = Some(channel);
        self
    }

    /// Resolves a channel; the context channel is tried last.
    pub async fn resolve_channel<'c>(
        &self,
        candidates: Vec<Candidate<'c, Channel>>,
    ) -> ResolveResult<Channel> {
        let lookup = ChannelLookup { api: self.api.as_ref() };
        let context = self.channel.clone().map(Candidate::Entity);
        Resolver::new(&lookup)
            .resolve(candidates.into_iter().chain(context))
            .await
    }

    /// Posts `text` to the first resolvable channel.
    pub async fn send_message<'c>(
        &self,
        text: &str,
        channel: Vec<Candidate<'c, Channel>>,
    ) -> ResolveResult<Message> {
        let channel = self.resolve_channel(channel).await?;
        self.post(channel.channel_id, message_payload(text, None))
            .await
    }

    /// Posts `text` as a reply in the thread of `parent`.
    pub async fn send_reply(&self, text: &str, parent: &Message) -> ResolveResult<Message> {
        self.post(parent.channel_id, message_payload(text, Some(parent.message_id)))
            .await
    }

    /// Creates a direct (group) channel between `me` and `other`.
    ///
    /// Naming the same user twice fails with [`ResolveError::SelfReference`],
    /// before any remote call when both ids are known up front.
    pub async fn direct_channel<'c>(
        &self,
        me: Candidate<'c, User>,
        other: Candidate<'c, User>,
    ) -> ResolveResult<Channel> {
        if let (Some(a), Some(b)) = (me.peek_id(), other.peek_id()) {
            if a == b {
                return Err(ResolveError::SelfReference(a));
            }
        }

        let lookup = UserLookup { api: self.users.as_ref() };
        let resolver = Resolver::new(&lookup);
        let me = resolver.resolve_one(me).await?;
        let other = resolver.resolve_one(other).await?;
        if me.user_id == other.user_id {
            return Err(ResolveError::SelfReference(me.user_id));
        }

        debug!(me = %me.user_id, other = %other.user_id, "creating direct channel");
        let mut payload = RawObject::new();
        payload.insert("type".into(), json!(ChannelType::Group.as_str()));
        payload.insert(
            "members".into(),
            json!([me.user_id.to_string(), other.user_id.to_string()]),
        );
        Ok(Channel::from_raw(&self.api.channel_create(&payload).await?)?)
    }

    async fn post(&self, channel_id: ObjectId, payload: RawObject) -> ResolveResult<Message> {
        debug!(%channel_id, "posting message");
        Ok(Message::from_raw(
            &self.api.message_create(channel_id, &payload).await?,
        )?)
    }
}

fn message_payload(text: &str, reply_to: Option<ObjectId>) -> RawObject {
    let mut payload = RawObject::new();
    payload.insert("message".into(), Value::String(text.to_string()));
    if let Some(parent) = reply_to {
        payload.insert("replyTo".into(), Value::String(parent.to_string()));
    }
    payload
}
