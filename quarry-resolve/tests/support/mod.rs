//! In-memory API double shared by the resolver tests.

#![allow(dead_code)]

use async_trait::async_trait;
use quarry_client::{
    ApiError, ApiResult, ComposeApi, Filter, ListEnvelope, MessagingApi, SystemApi,
};
use quarry_types::{ObjectId, RawObject};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn raw(value: Value) -> RawObject {
    match value {
        Value::Object(raw) => raw,
        other => panic!("not an object: {other}"),
    }
}

/// Serves canned objects and records every remote call.
#[derive(Default)]
pub struct FakeApi {
    pub namespaces: Vec<RawObject>,
    pub modules: Vec<RawObject>,
    pub pages: Vec<RawObject>,
    pub channels: Vec<RawObject>,
    pub users: Vec<RawObject>,
    ignore_filters: bool,
    calls: Mutex<Vec<String>>,
    created: Mutex<Vec<RawObject>>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_users(mut self, users: Vec<Value>) -> Self {
        self.users = users.into_iter().map(raw).collect();
        self
    }

    pub fn with_channels(mut self, channels: Vec<Value>) -> Self {
        self.channels = channels.into_iter().map(raw).collect();
        self
    }

    pub fn with_namespaces(mut self, namespaces: Vec<Value>) -> Self {
        self.namespaces = namespaces.into_iter().map(raw).collect();
        self
    }

    pub fn with_modules(mut self, modules: Vec<Value>) -> Self {
        self.modules = modules.into_iter().map(raw).collect();
        self
    }

    pub fn with_pages(mut self, pages: Vec<Value>) -> Self {
        self.pages = pages.into_iter().map(raw).collect();
        self
    }

    /// Makes list operations return every object, as a server that does
    /// not understand the filter would.
    pub fn ignoring_filters(mut self) -> Self {
        self.ignore_filters = true;
        self
    }

    pub fn shared(self) -> Arc<Self> {
        Arc::new(self)
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn created(&self) -> Vec<RawObject> {
        self.created.lock().unwrap().clone()
    }

    fn effective(&self, filter: &Filter) -> Filter {
        if self.ignore_filters {
            Filter::new()
        } else {
            filter.clone()
        }
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

fn read(set: &[RawObject], id_field: &str, id: ObjectId) -> ApiResult<RawObject> {
    let wanted = Value::String(id.to_string());
    set.iter()
        .find(|raw| raw.get(id_field) == Some(&wanted))
        .cloned()
        .ok_or_else(|| ApiError::NotFound(format!("{id_field} {id}")))
}

fn list(set: &[RawObject], filter: &Filter) -> ListEnvelope {
    let limit = filter
        .get("limit")
        .and_then(|l| l.parse().ok())
        .unwrap_or(usize::MAX);
    let matching = set
        .iter()
        .filter(|raw| {
            filter
                .iter()
                .filter(|(key, _)| *key != "limit")
                .all(|(key, value)| raw.get(key).and_then(Value::as_str) == Some(value))
        })
        .take(limit)
        .cloned()
        .map(Value::Object)
        .collect();
    ListEnvelope {
        set: matching,
        filter: RawObject::new(),
    }
}

fn scoped(set: &[RawObject], namespace_id: ObjectId) -> Vec<RawObject> {
    let wanted = Value::String(namespace_id.to_string());
    set.iter()
        .filter(|raw| raw.get("namespaceID") == Some(&wanted))
        .cloned()
        .collect()
}

#[async_trait]
impl ComposeApi for FakeApi {
    async fn namespace_read(&self, namespace_id: ObjectId) -> ApiResult<RawObject> {
        self.record(format!("namespace_read:{namespace_id}"));
        read(&self.namespaces, "namespaceID", namespace_id)
    }

    async fn namespace_list(&self, filter: &Filter) -> ApiResult<ListEnvelope> {
        self.record("namespace_list".to_string());
        Ok(list(&self.namespaces, &self.effective(filter)))
    }

    async fn module_read(&self, namespace_id: ObjectId, module_id: ObjectId) -> ApiResult<RawObject> {
        self.record(format!("module_read:{namespace_id}:{module_id}"));
        read(&scoped(&self.modules, namespace_id), "moduleID", module_id)
    }

    async fn module_list(&self, namespace_id: ObjectId, filter: &Filter) -> ApiResult<ListEnvelope> {
        self.record(format!("module_list:{namespace_id}"));
        Ok(list(&scoped(&self.modules, namespace_id), filter))
    }

    async fn page_read(&self, namespace_id: ObjectId, page_id: ObjectId) -> ApiResult<RawObject> {
        self.record(format!("page_read:{namespace_id}:{page_id}"));
        read(&scoped(&self.pages, namespace_id), "pageID", page_id)
    }

    async fn page_list(&self, namespace_id: ObjectId, filter: &Filter) -> ApiResult<ListEnvelope> {
        self.record(format!("page_list:{namespace_id}"));
        Ok(list(&scoped(&self.pages, namespace_id), filter))
    }
}

#[async_trait]
impl MessagingApi for FakeApi {
    async fn channel_read(&self, channel_id: ObjectId) -> ApiResult<RawObject> {
        self.record(format!("channel_read:{channel_id}"));
        read(&self.channels, "channelID", channel_id)
    }

    async fn channel_create(&self, payload: &RawObject) -> ApiResult<RawObject> {
        self.record("channel_create".to_string());
        self.created.lock().unwrap().push(payload.clone());
        let mut channel = payload.clone();
        channel.insert("channelID".into(), json!("900"));
        Ok(channel)
    }

    async fn message_create(&self, channel_id: ObjectId, payload: &RawObject) -> ApiResult<RawObject> {
        self.record(format!("message_create:{channel_id}"));
        self.created.lock().unwrap().push(payload.clone());
        let mut message = payload.clone();
        message.insert("messageID".into(), json!("700"));
        message.insert("channelID".into(), json!(channel_id.to_string()));
        Ok(message)
    }
}

#[async_trait]
impl SystemApi for FakeApi {
    async fn user_read(&self, user_id: ObjectId) -> ApiResult<RawObject> {
        self.record(format!("user_read:{user_id}"));
        read(&self.users, "userID", user_id)
    }

    async fn user_list(&self, filter: &Filter) -> ApiResult<ListEnvelope> {
        self.record("user_list".to_string());
        Ok(list(&self.users, &self.effective(filter)))
    }
}
