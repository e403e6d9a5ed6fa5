//! HTTP client types for ChartMogul API communication.
//!
//! This module provides the transport layer used by every resource:
//!
//! - [`HttpClient`]: The async HTTP client for API communication
//! - [`HttpRequest`]: A request to be sent to the API
//! - [`HttpResponse`]: A parsed response from the API
//! - [`HttpMethod`]: Supported HTTP methods
//! - [`rest::RestClient`]: Higher-level, cheaply cloneable REST client
//! - [`rest::RestError`]: REST-specific error types
//!
//! # Example
//!
//! ```rust,ignore
//! use chartmogul::{ChartMogulConfig, ApiKey};
//! use chartmogul::clients::{HttpClient, HttpRequest, HttpMethod};
//!
//! let config = ChartMogulConfig::builder()
//!     .api_key(ApiKey::new("api-key").unwrap())
//!     .build()
//!     .unwrap();
//!
//! let client = HttpClient::new(&config)?;
//! let request = HttpRequest::builder(HttpMethod::Get, "v1/customers")
//!     .query_param("per_page", "20")
//!     .build()
//!     .unwrap();
//!
//! let response = client.request(request).await?;
//! ```
//!
//! # Retry Behavior
//!
//! Requests are sent once. Transport failures and non-2xx responses are
//! returned to the caller unchanged.

mod errors;
mod http_client;
mod http_request;
mod http_response;
pub mod rest;

pub use errors::{HttpError, HttpResponseError, InvalidHttpRequestError};
pub use http_client::{HttpClient, SDK_VERSION};
pub use http_request::{HttpMethod, HttpRequest, HttpRequestBuilder};
pub use http_response::HttpResponse;

pub use rest::{RestClient, RestError};
