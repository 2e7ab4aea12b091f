//! HTTP implementation of the API seams.
//!
//! Successful responses arrive wrapped as `{ "response": ... }`, failures as
//! `{ "error": { "message": ... } }` (sometimes with a 200 status).

use crate::api::{ComposeApi, MessagingApi, SystemApi};
use crate::config::ClientConfig;
use crate::envelope::{Filter, ListEnvelope};
use crate::error::{ApiError, ApiResult};
use async_trait::async_trait;
use quarry_types::{ObjectId, RawObject};
use reqwest::{Client, Method, StatusCode};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};
use uuid::Uuid;

/// Header carrying the per-request correlation id.
pub const REQUEST_ID_HEADER: &str = "X-Request-Id";

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// reqwest-backed client for all API services.
#[derive(Debug, Clone)]
pub struct HttpClient {
    config: ClientConfig,
    client: Client,
}

impl HttpClient {
    /// Builds a client, validating the configuration first.
    pub fn new(config: ClientConfig) -> ApiResult<Self> {
        config.validate()?;
        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent.clone())
            .build()?;
        Ok(Self { config, client })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Sends a request and unwraps the response envelope.
    async fn send(
        &self,
        method: Method,
        path: &str,
        filter: Option<&Filter>,
        body: Option<&RawObject>,
    ) -> ApiResult<Value> {
        let request_id = Uuid::new_v4();
        debug!(%method, path, %request_id, "API request");

        let mut request = self
            .client
            .request(method.clone(), self.config.url(path))
            .header(REQUEST_ID_HEADER, request_id.to_string());
        if let Some(token) = &self.config.token {
            request = request.bearer_auth(token);
        }
        if let Some(filter) = filter.filter(|f| !f.is_empty()) {
            request = request.query(filter);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;
        let parsed: Option<Value> = serde_json::from_str(&text).ok();

        if let Some(message) = parsed.as_ref().and_then(error_message) {
            warn!(%method, path, %request_id, status = status.as_u16(), "API error: {}", message);
            return Err(match status {
                StatusCode::NOT_FOUND => ApiError::NotFound(message),
                StatusCode::UNAUTHORIZED => ApiError::AuthRequired,
                _ => ApiError::Api {
                    status: status.as_u16(),
                    message,
                },
            });
        }

        match status {
            StatusCode::NOT_FOUND => return Err(ApiError::NotFound(path.to_string())),
            StatusCode::UNAUTHORIZED => return Err(ApiError::AuthRequired),
            s if !s.is_success() => {
                return Err(ApiError::Api {
                    status: s.as_u16(),
                    message: text,
                });
            }
            _ => {}
        }

        match parsed {
            Some(Value::Object(mut envelope)) => envelope
                .remove("response")
                .ok_or_else(|| ApiError::UnexpectedShape(format!("{path}: missing response"))),
            _ => Err(ApiError::UnexpectedShape(format!("{path}: body is not a JSON object"))),
        }
    }

    async fn object(
        &self,
        method: Method,
        path: &str,
        body: Option<&RawObject>,
    ) -> ApiResult<RawObject> {
        match self.send(method, path, None, body).await? {
            Value::Object(raw) => Ok(raw),
            other => Err(ApiError::UnexpectedShape(format!(
                "{path}: expected an object, got {other}"
            ))),
        }
    }

    async fn list(&self, path: &str, filter: &Filter) -> ApiResult<ListEnvelope> {
        let value = self.send(Method::GET, path, Some(filter), None).await?;
        ListEnvelope::from_value(value)
    }
}

/// Extracts the message from an `{ "error": { "message": ... } }` body.
fn error_message(body: &Value) -> Option<String> {
    let error = body.get("error")?;
    serde_json::from_value::<ErrorBody>(error.clone())
        .ok()
        .map(|e| e.message)
}

#[async_trait]
impl ComposeApi for HttpClient {
    async fn namespace_read(&self, namespace_id: ObjectId) -> ApiResult<RawObject> {
        self.object(Method::GET, &format!("/compose/namespace/{namespace_id}"), None)
            .await
    }

    async fn namespace_list(&self, filter: &Filter) -> ApiResult<ListEnvelope> {
        self.list("/compose/namespace/", filter).await
    }

    async fn module_read(&self, namespace_id: ObjectId, module_id: ObjectId) -> ApiResult<RawObject> {
        let path = format!("/compose/namespace/{namespace_id}/module/{module_id}");
        self.object(Method::GET, &path, None).await
    }

    async fn module_list(&self, namespace_id: ObjectId, filter: &Filter) -> ApiResult<ListEnvelope> {
        self.list(&format!("/compose/namespace/{namespace_id}/module/"), filter)
            .await
    }

    async fn page_read(&self, namespace_id: ObjectId, page_id: ObjectId) -> ApiResult<RawObject> {
        let path = format!("/compose/namespace/{namespace_id}/page/{page_id}");
        self.object(Method::GET, &path, None).await
    }

    async fn page_list(&self, namespace_id: ObjectId, filter: &Filter) -> ApiResult<ListEnvelope> {
        self.list(&format!("/compose/namespace/{namespace_id}/page/"), filter)
            .await
    }
}

#[async_trait]
impl MessagingApi for HttpClient {
    async fn channel_read(&self, channel_id: ObjectId) -> ApiResult<RawObject> {
        self.object(Method::GET, &format!("/messaging/channels/{channel_id}"), None)
            .await
    }

    async fn channel_create(&self, payload: &RawObject) -> ApiResult<RawObject> {
        self.object(Method::POST, "/messaging/channels/", Some(payload))
            .await
    }

    async fn message_create(&self, channel_id: ObjectId, payload: &RawObject) -> ApiResult<RawObject> {
        let path = format!("/messaging/channels/{channel_id}/messages/");
        self.object(Method::POST, &path, Some(payload)).await
    }
}

#[async_trait]
impl SystemApi for HttpClient {
    async fn user_read(&self, user_id: ObjectId) -> ApiResult<RawObject> {
        self.object(Method::GET, &format!("/system/users/{user_id}"), None)
            .await
    }

    async fn user_list(&self, filter: &Filter) -> ApiResult<ListEnvelope> {
        self.list("/system/users/", filter).await
    }
}
