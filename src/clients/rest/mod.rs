//! REST API client for the ChartMogul API.
//!
//! This module provides a higher-level REST API client built on top of the
//! [`HttpClient`](crate::clients::HttpClient).
//!
//! - [`RestClient`]: The REST API client with `get()`, `post()`, `put()`,
//!   `patch()` and `delete()` methods
//! - [`RestError`]: Error type for REST API operations
//!
//! # Path Normalization
//!
//! Leading and trailing slashes are stripped, so `/v1/customers` and
//! `v1/customers` address the same endpoint. Empty paths are rejected.

mod client;
mod errors;

pub use client::RestClient;
pub use errors::RestError;
