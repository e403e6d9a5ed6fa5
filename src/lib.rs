//! # ChartMogul API Rust SDK
//!
//! An async Rust SDK for the ChartMogul REST API, mapping API resources to
//! typed records with the calls that operate on them.
//!
//! ## Overview
//!
//! This SDK provides:
//! - Type-safe configuration via [`ChartMogulConfig`] and [`ChartMogulConfigBuilder`]
//! - Validated newtypes for the API key and base URL
//! - An async HTTP client authenticating with HTTP Basic auth
//! - A resource layer with path templates, typed decoding and partial updates
//! - The [`Customer`](rest::resources::Customer) resource with tags, custom
//!   attributes, search and merge
//!
//! ## Quick Start
//!
//! ```rust
//! use chartmogul::{ApiKey, ChartMogulConfig};
//!
//! let config = ChartMogulConfig::builder()
//!     .api_key(ApiKey::new("your-api-key").unwrap())
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.base_url().as_ref(), "https://api.chartmogul.com");
//! ```
//!
//! Or read the key from `CHARTMOGUL_API_KEY`:
//!
//! ```rust,ignore
//! let config = chartmogul::ChartMogulConfig::from_env()?;
//! ```
//!
//! ## Working with Customers
//!
//! ```rust,ignore
//! use chartmogul::{ChartMogulConfig, RestClient};
//! use chartmogul::rest::resources::{Customer, NewCustomAttribute};
//!
//! let client = RestClient::new(&ChartMogulConfig::from_env()?)?;
//!
//! let mut customer = Customer::retrieve(&client, "cus_de305d54").await?;
//! customer.add_tags(&["vip"]).await?;
//! customer
//!     .add_custom_attributes(&[NewCustomAttribute::new("channel", "Facebook")])
//!     .await?;
//!
//! println!("{:?}", customer.custom_attributes());
//! ```
//!
//! ## Errors
//!
//! Resource calls return [`rest::ResourceError`]. Calls that cannot be
//! addressed (missing uuid, unresolved path placeholder) fail before any
//! request is sent. Non-2xx responses are never retried.
//!
//! ## Design Principles
//!
//! - **No global state**: Configuration is instance-based and passed explicitly
//! - **Fail-fast validation**: All newtypes validate on construction
//! - **Thread-safe**: All types are `Send + Sync`
//! - **Async-first**: Designed for use with Tokio async runtime
//! - **Server-authoritative**: Local records change only from server responses

pub mod clients;
pub mod config;
pub mod error;
pub mod rest;

// Re-export public types at crate root for convenience
pub use config::{ApiKey, BaseUrl, ChartMogulConfig, ChartMogulConfigBuilder};
pub use error::ConfigError;

// Re-export HTTP client types
pub use clients::{
    HttpClient, HttpError, HttpMethod, HttpRequest, HttpRequestBuilder, HttpResponse,
    HttpResponseError, InvalidHttpRequestError, RestClient, RestError,
};

// Re-export resource types
pub use rest::{Resource, ResourceError};
