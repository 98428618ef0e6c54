//! HTTP client for the role service

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use reqwest::RequestBuilder;
use reqwest::Response;
use url::Url;

use crate::Config;
use crate::api::ROLE_COLLECTION;
use crate::api::RoleApi;
use crate::error::ApiError;
use crate::error::Error;
use crate::model::Envelope;
use crate::model::Record;
use crate::model::RecordDraft;
use crate::model::RecordId;

/// REST client for the role collection.
///
/// Cheap to clone (uses `Arc` internally).
///
/// # Example
///
/// ```ignore
/// use sysprompt_lib::RoleClient;
///
/// let client = RoleClient::builder()
///     .url("http://localhost:7001/api")
///     .user("polly")
///     .build()?;
///
/// let records = client.list().await?;
/// ```
#[derive(Clone)]
pub struct RoleClient {
    inner: Arc<RoleClientInner>,
}

struct RoleClientInner {
    base_url: String,
    user: String,
    http_client: Client,
    timeout: Option<Duration>,
}

impl RoleClient {
    /// Creates a new builder for constructing a client.
    pub fn builder() -> RoleClientBuilder<Missing> {
        RoleClientBuilder::new()
    }

    /// Builds a client from a [`Config`].
    pub fn from_config(config: &Config) -> Result<Self, Error> {
        let mut builder = Self::builder().url(&config.api_url).user(&config.user);
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        builder.build()
    }

    /// Returns the base URL of the service.
    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    /// Returns the operator name sent with writes.
    pub fn user(&self) -> &str {
        &self.inner.user
    }

    fn collection_url(&self) -> String {
        format!("{}/{}", self.inner.base_url, ROLE_COLLECTION)
    }

    fn record_url(&self, id: RecordId) -> String {
        format!("{}/{}/{}", self.inner.base_url, ROLE_COLLECTION, id)
    }

    async fn send(&self, mut request: RequestBuilder) -> Result<Response, ApiError> {
        if let Some(timeout) = self.inner.timeout {
            request = request.timeout(timeout);
        }
        request
            .send()
            .await
            .map_err(|e| ApiError::from_transport(e, self.inner.timeout))
    }

    /// Sends a request and turns non-2xx statuses into [`ApiError::Http`].
    async fn send_checked(&self, request: RequestBuilder) -> Result<Response, ApiError> {
        let response = self.send(request).await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        let message = if body.is_empty() {
            status.canonical_reason().unwrap_or_default().to_string()
        } else {
            body
        };
        Err(ApiError::http(status.as_u16(), message))
    }
}

#[async_trait]
impl RoleApi for RoleClient {
    async fn list(&self) -> Result<Vec<Record>, Error> {
        let url = self.collection_url();
        log::debug!("GET {}", url);

        let response = self.send_checked(self.inner.http_client.get(&url)).await?;
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::from_transport(e, self.inner.timeout))?;
        let envelope: Envelope = serde_json::from_str(&body)
            .map_err(|e| ApiError::parse_with_body(e.to_string(), body.clone()))?;

        Ok(envelope.into_records()?)
    }

    async fn create(&self, draft: &RecordDraft) -> Result<(), Error> {
        let url = self.collection_url();
        log::debug!("POST {}", url);

        let payload = draft.payload(None, &self.inner.user);
        self.send_checked(self.inner.http_client.post(&url).json(&payload))
            .await?;
        Ok(())
    }

    async fn update(&self, id: RecordId, draft: &RecordDraft) -> Result<(), Error> {
        let url = self.collection_url();
        log::debug!("PUT {} (id {})", url, id);

        let payload = draft.payload(Some(id), &self.inner.user);
        self.send_checked(self.inner.http_client.put(&url).json(&payload))
            .await?;
        Ok(())
    }

    async fn delete(&self, id: RecordId) -> Result<(), Error> {
        let url = self.record_url(id);
        log::debug!("DELETE {}", url);

        self.send_checked(self.inner.http_client.delete(&url))
            .await?;
        Ok(())
    }
}

// =============================================================================
// Typestate Builder
// =============================================================================

/// Marker type for missing required builder fields.
pub struct Missing;

/// Marker type for set builder fields.
pub struct Set<T>(T);

/// Builder for constructing a [`RoleClient`].
///
/// The base URL is required and checked at compile time; it is parsed when
/// [`build`](RoleClientBuilder::build) runs.
pub struct RoleClientBuilder<U> {
    url: U,
    user: String,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    http_client: Option<Client>,
}

impl RoleClientBuilder<Missing> {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            url: Missing,
            user: Config::default().user,
            timeout: None,
            connect_timeout: None,
            http_client: None,
        }
    }

    /// Sets the base URL, e.g. `http://host:7001/api`.
    pub fn url(self, url: impl Into<String>) -> RoleClientBuilder<Set<String>> {
        RoleClientBuilder {
            url: Set(url.into()),
            user: self.user,
            timeout: self.timeout,
            connect_timeout: self.connect_timeout,
            http_client: self.http_client,
        }
    }
}

impl Default for RoleClientBuilder<Missing> {
    fn default() -> Self {
        Self::new()
    }
}

impl<U> RoleClientBuilder<U> {
    /// Sets the operator name sent with create/update requests.
    pub fn user(mut self, user: impl Into<String>) -> Self {
        self.user = user.into();
        self
    }

    /// Sets the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the connection timeout.
    ///
    /// This is applied when building the HTTP client.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Sets a custom HTTP client.
    pub fn http_client(mut self, client: Client) -> Self {
        self.http_client = Some(client);
        self
    }
}

impl RoleClientBuilder<Set<String>> {
    /// Builds the [`RoleClient`].
    pub fn build(self) -> Result<RoleClient, Error> {
        let raw = self.url.0;
        let parsed = Url::parse(&raw).map_err(|e| ApiError::InvalidUrl(format!("{raw}: {e}")))?;
        if parsed.cannot_be_a_base() || !matches!(parsed.scheme(), "http" | "https") {
            return Err(ApiError::InvalidUrl(raw).into());
        }

        let http_client = match self.http_client {
            Some(client) => client,
            None => {
                let mut builder = Client::builder();
                if let Some(timeout) = self.connect_timeout {
                    builder = builder.connect_timeout(timeout);
                }
                builder.build().map_err(ApiError::from)?
            }
        };

        Ok(RoleClient {
            inner: Arc::new(RoleClientInner {
                base_url: raw.trim_end_matches('/').to_string(),
                user: self.user,
                http_client,
                timeout: self.timeout,
            }),
        })
    }
}
