//! REST client implementation for the ChartMogul API.
//!
//! This module provides the [`RestClient`] type for making REST API requests
//! with path normalization.

use std::collections::HashMap;
use std::sync::Arc;

use crate::clients::rest::RestError;
use crate::clients::{HttpClient, HttpMethod, HttpRequest, HttpResponse};
use crate::config::ChartMogulConfig;

/// REST API client for the ChartMogul API.
///
/// Provides convenient methods (`get`, `post`, `put`, `patch`, `delete`) for
/// making REST API requests. Cloning is cheap: clones share one underlying
/// connection pool, so a single client can be handed to many resources.
///
/// # Thread Safety
///
/// `RestClient` is `Send + Sync`, making it safe to share across async tasks.
///
/// # Example
///
/// ```rust,ignore
/// use chartmogul::{ChartMogulConfig, ApiKey, RestClient};
///
/// let config = ChartMogulConfig::builder()
///     .api_key(ApiKey::new("api-key").unwrap())
///     .build()
///     .unwrap();
///
/// let client = RestClient::new(&config)?;
///
/// let response = client.get("/v1/customers", None).await?;
/// println!("Customers: {}", response.body);
/// ```
#[derive(Debug, Clone)]
pub struct RestClient {
    /// The shared HTTP client for making requests.
    http_client: Arc<HttpClient>,
}

// Verify RestClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<RestClient>();
};

impl RestClient {
    /// Creates a new REST client from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`RestError::Http`] if the HTTP client cannot be created.
    pub fn new(config: &ChartMogulConfig) -> Result<Self, RestError> {
        let http_client = HttpClient::new(config)?;

        tracing::debug!(
            base_uri = http_client.base_uri(),
            "Created ChartMogul REST client"
        );

        Ok(Self {
            http_client: Arc::new(http_client),
        })
    }

    /// Returns the base URI requests are sent to.
    #[must_use]
    pub fn base_uri(&self) -> &str {
        self.http_client.base_uri()
    }

    /// Sends a GET request to the specified path.
    ///
    /// # Errors
    ///
    /// Returns [`RestError::InvalidPath`] if the path is invalid (e.g., empty).
    /// Returns [`RestError::Http`] for HTTP-level errors.
    pub async fn get(
        &self,
        path: &str,
        query: Option<HashMap<String, String>>,
    ) -> Result<HttpResponse, RestError> {
        self.send(HttpMethod::Get, path, None, query).await
    }

    /// Sends a POST request with a JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`RestError::InvalidPath`] if the path is invalid.
    /// Returns [`RestError::Http`] for HTTP-level errors.
    pub async fn post(
        &self,
        path: &str,
        body: serde_json::Value,
    ) -> Result<HttpResponse, RestError> {
        self.send(HttpMethod::Post, path, Some(body), None).await
    }

    /// Sends a PUT request with a JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`RestError::InvalidPath`] if the path is invalid.
    /// Returns [`RestError::Http`] for HTTP-level errors.
    pub async fn put(&self, path: &str, body: serde_json::Value) -> Result<HttpResponse, RestError> {
        self.send(HttpMethod::Put, path, Some(body), None).await
    }

    /// Sends a PATCH request with a JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`RestError::InvalidPath`] if the path is invalid.
    /// Returns [`RestError::Http`] for HTTP-level errors.
    pub async fn patch(
        &self,
        path: &str,
        body: serde_json::Value,
    ) -> Result<HttpResponse, RestError> {
        self.send(HttpMethod::Patch, path, Some(body), None).await
    }

    /// Sends a DELETE request to the specified path.
    ///
    /// # Errors
    ///
    /// Returns [`RestError::InvalidPath`] if the path is invalid.
    /// Returns [`RestError::Http`] for HTTP-level errors.
    pub async fn delete(
        &self,
        path: &str,
        query: Option<HashMap<String, String>>,
    ) -> Result<HttpResponse, RestError> {
        self.send(HttpMethod::Delete, path, None, query).await
    }

    /// Sends a DELETE request that carries a JSON body.
    ///
    /// Attribute removal endpoints take the names to remove in the body.
    ///
    /// # Errors
    ///
    /// Returns [`RestError::InvalidPath`] if the path is invalid.
    /// Returns [`RestError::Http`] for HTTP-level errors.
    pub async fn delete_with_body(
        &self,
        path: &str,
        body: serde_json::Value,
    ) -> Result<HttpResponse, RestError> {
        self.send(HttpMethod::Delete, path, Some(body), None).await
    }

    /// Builds and sends a request.
    ///
    /// This is the single entry point every resource call goes through.
    ///
    /// # Errors
    ///
    /// Returns [`RestError::InvalidPath`] if the path is invalid.
    /// Returns [`RestError::Http`] for HTTP-level errors.
    pub async fn send(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<serde_json::Value>,
        query: Option<HashMap<String, String>>,
    ) -> Result<HttpResponse, RestError> {
        let normalized_path = normalize_path(path)?;

        let mut builder = HttpRequest::builder(method, normalized_path);

        if let Some(body_value) = body {
            builder = builder.body(body_value);
        }

        if let Some(query_params) = query.filter(|q| !q.is_empty()) {
            builder = builder.query(query_params);
        }

        let request = builder.build().map_err(|e| RestError::Http(e.into()))?;

        self.http_client.request(request).await.map_err(Into::into)
    }
}

/// Normalizes a REST API path.
///
/// Leading and trailing slashes are stripped; the HTTP client joins the
/// result onto the base URI.
///
/// # Examples
///
/// ```rust,ignore
/// assert_eq!(normalize_path("/v1/customers")?, "v1/customers");
/// assert_eq!(normalize_path("v1/customers/")?, "v1/customers");
/// ```
fn normalize_path(path: &str) -> Result<String, RestError> {
    let trimmed = path.trim().trim_matches('/');

    if trimmed.is_empty() {
        return Err(RestError::InvalidPath {
            path: path.to_string(),
        });
    }

    Ok(trimmed.to_string())
}
