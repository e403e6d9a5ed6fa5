//! REST resource infrastructure for the ChartMogul API.
//!
//! This module provides the substrate every resource builds on:
//!
//! - **[`RestResource`] trait**: name, path templates and declared attributes
//! - **[`Resource<T>`]**: a record bound to the client it was fetched through,
//!   with read-only `Deref` access
//! - **[`RequestService`]**: resolves a path template, sends the request and
//!   decodes the response
//! - **[`Updatable`]**: partial updates via PATCH for resources that opt in
//! - **Path building**: `:name` placeholder templates
//! - **[`ResourceError`]**: configuration, API, decode and not-found errors
//!
//! # Example
//!
//! ```rust,ignore
//! use chartmogul::{ApiKey, ChartMogulConfig, RestClient};
//! use chartmogul::rest::resources::{Customer, CustomerListParams};
//!
//! let config = ChartMogulConfig::from_env()?;
//! let client = RestClient::new(&config)?;
//!
//! // Retrieve one customer
//! let mut customer = Customer::retrieve(&client, "cus_de305d54").await?;
//! println!("{:?}: {:?}", customer.name, customer.mrr);
//!
//! // Tag it; local tags mirror the server's answer
//! customer.add_tags(&["vip"]).await?;
//!
//! // Change a writable field and send it
//! let mut record = customer.into_inner();
//! record.name = Some("Example Inc.".to_string());
//! let mut customer = chartmogul::rest::Resource::new(record, client.clone());
//! customer.update().await?;
//!
//! // List customers page by page
//! let mut page = Customer::all(&client, &CustomerListParams::default()).await?;
//! while let Some(next) = page.next_page().await? {
//!     page = next;
//! }
//! ```

mod errors;
mod path;
mod request;
mod resource;
mod update;

pub mod resources;

// Public exports
pub use errors::ResourceError;
pub use path::{build_path, get_path, placeholders, ResolvedPath, ResourceOperation, ResourcePath};
pub use request::RequestService;
pub use resource::{Resource, RestResource};
pub use update::{update, Updatable};

pub(crate) use resource::serialize_to_query;
