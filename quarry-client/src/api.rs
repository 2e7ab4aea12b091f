//! Remote API seams.
//!
//! Each trait groups the operations of one API service. Operations resolve
//! to a single raw object or a [`ListEnvelope`]; the client does not hydrate
//! anything, that is left to the caller.

use crate::envelope::{Filter, ListEnvelope};
use crate::error::ApiResult;
use async_trait::async_trait;
use quarry_types::{ObjectId, RawObject};

/// Low-code application service.
#[async_trait]
pub trait ComposeApi: Send + Sync {
    async fn namespace_read(&self, namespace_id: ObjectId) -> ApiResult<RawObject>;

    async fn namespace_list(&self, filter: &Filter) -> ApiResult<ListEnvelope>;

    async fn module_read(&self, namespace_id: ObjectId, module_id: ObjectId) -> ApiResult<RawObject>;

    async fn module_list(&self, namespace_id: ObjectId, filter: &Filter) -> ApiResult<ListEnvelope>;

    async fn page_read(&self, namespace_id: ObjectId, page_id: ObjectId) -> ApiResult<RawObject>;

    async fn page_list(&self, namespace_id: ObjectId, filter: &Filter) -> ApiResult<ListEnvelope>;
}

/// Messaging service.
#[async_trait]
pub trait MessagingApi: Send + Sync {
    async fn channel_read(&self, channel_id: ObjectId) -> ApiResult<RawObject>;

    /// Creates a channel from a raw payload (`name`, `type`, `members`, ...).
    async fn channel_create(&self, payload: &RawObject) -> ApiResult<RawObject>;

    /// Posts a message (`message`, optional `replyTo`) to a channel.
    async fn message_create(&self, channel_id: ObjectId, payload: &RawObject) -> ApiResult<RawObject>;
}

/// System service.
#[async_trait]
pub trait SystemApi: Send + Sync {
    async fn user_read(&self, user_id: ObjectId) -> ApiResult<RawObject>;

    async fn user_list(&self, filter: &Filter) -> ApiResult<ListEnvelope>;
}
