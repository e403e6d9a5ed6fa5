//! Configuration types for the ChartMogul API SDK.
//!
//! This module provides the core configuration types used to initialize
//! and configure the SDK for API communication with ChartMogul.
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`ChartMogulConfig`]: The main configuration struct holding all SDK settings
//! - [`ChartMogulConfigBuilder`]: A builder for constructing [`ChartMogulConfig`] instances
//! - [`ApiKey`]: A validated API key newtype with masked debug output
//! - [`BaseUrl`]: A validated API base URL
//!
//! # Example
//!
//! ```rust
//! use chartmogul::{ChartMogulConfig, ApiKey};
//!
//! let config = ChartMogulConfig::builder()
//!     .api_key(ApiKey::new("my-api-key").unwrap())
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.base_url().as_ref(), "https://api.chartmogul.com");
//! ```

mod newtypes;

pub use newtypes::{ApiKey, BaseUrl};

use std::time::Duration;

use crate::error::ConfigError;

/// Environment variable holding the API key.
pub const API_KEY_ENV: &str = "CHARTMOGUL_API_KEY";

/// Environment variable overriding the API base URL.
pub const API_URL_ENV: &str = "CHARTMOGUL_API_URL";

/// Configuration for the ChartMogul API SDK.
///
/// # Thread Safety
///
/// `ChartMogulConfig` is `Clone`, `Send`, and `Sync`, making it safe to share
/// across threads and async tasks.
///
/// # Example
///
/// ```rust
/// use chartmogul::{ChartMogulConfig, ApiKey, BaseUrl};
///
/// let config = ChartMogulConfig::builder()
///     .api_key(ApiKey::new("your-api-key").unwrap())
///     .base_url(BaseUrl::new("https://api.chartmogul.com").unwrap())
///     .user_agent_prefix("MyApp/1.0")
///     .build()
///     .unwrap();
///
/// assert_eq!(config.user_agent_prefix(), Some("MyApp/1.0"));
/// ```
#[derive(Clone, Debug)]
pub struct ChartMogulConfig {
    api_key: ApiKey,
    base_url: BaseUrl,
    user_agent_prefix: Option<String>,
    timeout: Option<Duration>,
}

impl ChartMogulConfig {
    /// Creates a new builder for constructing a `ChartMogulConfig`.
    #[must_use]
    pub fn builder() -> ChartMogulConfigBuilder {
        ChartMogulConfigBuilder::new()
    }

    /// Builds a configuration from environment variables.
    ///
    /// Reads [`API_KEY_ENV`] (required) and [`API_URL_ENV`] (optional).
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingEnvVar`] if the API key variable is unset,
    /// or the validation error of the value that was found.
    pub fn from_env() -> Result<Self, ConfigError> {
        let key = std::env::var(API_KEY_ENV)
            .map_err(|_| ConfigError::MissingEnvVar { name: API_KEY_ENV })?;

        let mut builder = Self::builder().api_key(ApiKey::new(key)?);
        if let Ok(url) = std::env::var(API_URL_ENV) {
            builder = builder.base_url(BaseUrl::new(url)?);
        }
        builder.build()
    }

    /// Returns the API key.
    #[must_use]
    pub const fn api_key(&self) -> &ApiKey {
        &self.api_key
    }

    /// Returns the API base URL.
    #[must_use]
    pub const fn base_url(&self) -> &BaseUrl {
        &self.base_url
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }

    /// Returns the request timeout, if configured.
    #[must_use]
    pub const fn timeout(&self) -> Option<Duration> {
        self.timeout
    }
}

// Verify ChartMogulConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ChartMogulConfig>();
};

/// Builder for constructing [`ChartMogulConfig`] instances.
///
/// `api_key` is required. All other fields have sensible defaults.
///
/// # Defaults
///
/// - `base_url`: `https://api.chartmogul.com`
/// - `user_agent_prefix`: `None`
/// - `timeout`: `None` (no client-side timeout)
#[derive(Debug, Default)]
pub struct ChartMogulConfigBuilder {
    api_key: Option<ApiKey>,
    base_url: Option<BaseUrl>,
    user_agent_prefix: Option<String>,
    timeout: Option<Duration>,
}

impl ChartMogulConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the API key (required).
    #[must_use]
    pub fn api_key(mut self, key: ApiKey) -> Self {
        self.api_key = Some(key);
        self
    }

    /// Sets the API base URL.
    #[must_use]
    pub fn base_url(mut self, url: BaseUrl) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Sets the user agent prefix for HTTP requests.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Sets the timeout applied to every request by the HTTP client.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Builds the [`ChartMogulConfig`], validating that required fields are set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if `api_key` is not set.
    pub fn build(self) -> Result<ChartMogulConfig, ConfigError> {
        let api_key = self
            .api_key
            .ok_or(ConfigError::MissingRequiredField { field: "api_key" })?;

        Ok(ChartMogulConfig {
            api_key,
            base_url: self.base_url.unwrap_or_default(),
            user_agent_prefix: self.user_agent_prefix,
            timeout: self.timeout,
        })
    }
}
