//! REST client for the property service.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::Amenity;
use crate::wizard::PropertyPayload;

use super::{ApiError, PropertyApi, PropertyRecord};

/// HTTP client for the property service.
pub struct HttpPropertyApi {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

/// Error body returned by the service on validation failures.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
    error: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AdminCreateBody<'a> {
    #[serde(flatten)]
    payload: &'a PropertyPayload,
    target_owner_id: Uuid,
}

impl HttpPropertyApi {
    /// * `base_url` - e.g. `http://localhost:8080/api`; a trailing slash is ignored.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(client, base_url))
    }

    /// Reuses an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client,
            base_url,
            token: None,
        }
    }

    /// Bearer token forwarded on every request.
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token.filter(|value| !value.trim().is_empty());
        self
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(ApiError::Status {
            status: status.as_u16(),
            message: error_message(&body, status.canonical_reason()),
        })
    }

    async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ApiError> {
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<T>().await?)
    }
}

/// Picks the most useful message out of an error response body.
pub(crate) fn error_message(body: &str, reason: Option<&str>) -> String {
    if let Ok(parsed) = serde_json::from_str::<ErrorBody>(body) {
        if let Some(message) = parsed.message.or(parsed.error) {
            if !message.trim().is_empty() {
                return message.trim().to_string();
            }
        }
    }
    let trimmed = body.trim();
    if !trimmed.is_empty() && trimmed.len() <= 200 && !trimmed.starts_with('<') {
        return trimmed.to_string();
    }
    reason.unwrap_or("Request failed").to_string()
}

#[async_trait]
impl PropertyApi for HttpPropertyApi {
    async fn create_property(&self, payload: &PropertyPayload) -> Result<PropertyRecord, ApiError> {
        let response = self
            .authorize(self.client.post(self.url("properties")))
            .json(payload)
            .send()
            .await?;
        Self::parse_response(response).await
    }

    async fn update_property(
        &self,
        id: Uuid,
        payload: &PropertyPayload,
    ) -> Result<PropertyRecord, ApiError> {
        let response = self
            .authorize(self.client.put(self.url(&format!("properties/{id}"))))
            .json(payload)
            .send()
            .await?;
        Self::parse_response(response).await
    }

    async fn admin_create_property(
        &self,
        payload: &PropertyPayload,
        target_owner_id: Uuid,
    ) -> Result<PropertyRecord, ApiError> {
        let body = AdminCreateBody {
            payload,
            target_owner_id,
        };
        let response = self
            .authorize(self.client.post(self.url("admin/properties")))
            .json(&body)
            .send()
            .await?;
        Self::parse_response(response).await
    }

    async fn get_property(&self, id: Uuid) -> Result<PropertyRecord, ApiError> {
        let response = self
            .authorize(self.client.get(self.url(&format!("properties/{id}"))))
            .send()
            .await?;
        Self::parse_response(response).await
    }

    async fn list_amenities(&self) -> Result<Vec<Amenity>, ApiError> {
        let response = self
            .authorize(self.client.get(self.url("amenities")))
            .send()
            .await?;
        Self::parse_response(response).await
    }
}
