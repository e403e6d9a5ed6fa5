//! Path templates for REST resources.
//!
//! Every resource declares a table of [`ResourcePath`]s, one per operation it
//! supports. Templates address the API relative to the base URL and name
//! their parameters with `:name` placeholders:
//!
//! - `/v1/customers` (no parameters)
//! - `/v1/customers/:customer_uuid` (one parameter)
//!
//! [`build_path`] substitutes the placeholders. A placeholder without a
//! value, or with an empty value, makes resolution fail with
//! [`ResourceError::PathResolutionFailed`] before any request is sent.
//! Parameters the template does not consume are returned as query
//! parameters.
//!
//! # Example
//!
//! ```rust
//! use chartmogul::rest::{build_path, get_path, ResourceOperation, ResourcePath};
//! use chartmogul::HttpMethod;
//! use std::collections::HashMap;
//!
//! const PATHS: &[ResourcePath] = &[
//!     ResourcePath::new(HttpMethod::Get, ResourceOperation::All, "/v1/customers"),
//!     ResourcePath::new(
//!         HttpMethod::Get,
//!         ResourceOperation::Retrieve,
//!         "/v1/customers/:customer_uuid",
//!     ),
//! ];
//!
//! let path = get_path(PATHS, ResourceOperation::Retrieve).unwrap();
//!
//! let mut params = HashMap::new();
//! params.insert("customer_uuid".to_string(), "cus_1".to_string());
//!
//! let resolved = build_path("Customer", path.template, &params).unwrap();
//! assert_eq!(resolved.path, "/v1/customers/cus_1");
//! assert!(resolved.query.is_empty());
//! ```

use std::collections::HashMap;

use crate::clients::HttpMethod;
use crate::rest::ResourceError;

/// Operations that can be performed on a REST resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceOperation {
    /// Fetch a single resource by its key (GET).
    Retrieve,
    /// List resources, optionally filtered (GET).
    All,
    /// Search resources (GET).
    Search,
    /// Create a new resource (POST).
    Create,
    /// Partially update an existing resource (PATCH).
    Update,
    /// Delete a resource (DELETE).
    Delete,
}

impl ResourceOperation {
    /// Returns the default HTTP method for this operation.
    #[must_use]
    pub const fn default_http_method(&self) -> HttpMethod {
        match self {
            Self::Retrieve | Self::All | Self::Search => HttpMethod::Get,
            Self::Create => HttpMethod::Post,
            Self::Update => HttpMethod::Patch,
            Self::Delete => HttpMethod::Delete,
        }
    }

    /// Returns the operation name as a string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Retrieve => "retrieve",
            Self::All => "all",
            Self::Search => "search",
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }
}

/// A path configuration for a REST resource operation.
///
/// # Example
///
/// ```rust
/// use chartmogul::rest::{ResourcePath, ResourceOperation};
/// use chartmogul::HttpMethod;
///
/// const CUSTOMER_UPDATE: ResourcePath = ResourcePath::new(
///     HttpMethod::Patch,
///     ResourceOperation::Update,
///     "/v1/customers/:customer_uuid",
/// );
///
/// assert_eq!(CUSTOMER_UPDATE.placeholders(), vec!["customer_uuid"]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourcePath {
    /// The HTTP method for this path.
    pub http_method: HttpMethod,
    /// The operation this path is used for.
    pub operation: ResourceOperation,
    /// The URL template with `:name` placeholders.
    pub template: &'static str,
}

impl ResourcePath {
    /// Creates a new `ResourcePath`.
    ///
    /// This is a `const fn` to allow paths to be defined as constants.
    #[must_use]
    pub const fn new(
        http_method: HttpMethod,
        operation: ResourceOperation,
        template: &'static str,
    ) -> Self {
        Self {
            http_method,
            operation,
            template,
        }
    }

    /// Returns the placeholder names in this path's template, in order.
    #[must_use]
    pub fn placeholders(&self) -> Vec<&'static str> {
        placeholders(self.template)
    }
}

/// The result of resolving a path template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPath {
    /// The path with every placeholder substituted.
    pub path: String,
    /// Parameters the template did not consume.
    pub query: HashMap<String, String>,
}

/// Selects the path declared for an operation.
///
/// Returns `None` if the resource does not support the operation.
#[must_use]
pub fn get_path(paths: &[ResourcePath], operation: ResourceOperation) -> Option<&ResourcePath> {
    paths.iter().find(|p| p.operation == operation)
}

/// Returns the placeholder names in a template, in order of appearance.
///
/// A placeholder is a `:` followed by one or more ASCII letters, digits or
/// underscores, so `:customer` and `:customer_uuid` are distinct names.
#[must_use]
pub fn placeholders(template: &str) -> Vec<&str> {
    let mut names = Vec::new();
    let mut rest = template;

    while let Some(pos) = rest.find(':') {
        let after = &rest[pos + 1..];
        let len = placeholder_len(after);
        if len > 0 {
            names.push(&after[..len]);
        }
        rest = &after[len..];
    }

    names
}

/// Resolves a path template against a parameter map.
///
/// Each `:name` placeholder is replaced by the percent-encoded value of
/// `params[name]`. Parameters that do not appear in the template are
/// returned in [`ResolvedPath::query`].
///
/// # Errors
///
/// Returns [`ResourceError::PathResolutionFailed`] listing every placeholder
/// whose value is missing or empty.
///
/// # Example
///
/// ```rust
/// use chartmogul::rest::build_path;
/// use std::collections::HashMap;
///
/// let mut params = HashMap::new();
/// params.insert("customer_uuid".to_string(), "cus_1".to_string());
/// params.insert("per_page".to_string(), "20".to_string());
///
/// let resolved = build_path("Customer", "/v1/customers/:customer_uuid", &params).unwrap();
/// assert_eq!(resolved.path, "/v1/customers/cus_1");
/// assert_eq!(resolved.query.get("per_page").map(String::as_str), Some("20"));
///
/// let error = build_path("Customer", "/v1/customers/:customer_uuid", &HashMap::new());
/// assert!(error.is_err());
/// ```
#[allow(clippy::implicit_hasher)]
pub fn build_path(
    resource: &'static str,
    template: &'static str,
    params: &HashMap<String, String>,
) -> Result<ResolvedPath, ResourceError> {
    let mut path = String::with_capacity(template.len());
    let mut consumed: Vec<&str> = Vec::new();
    let mut missing: Vec<String> = Vec::new();
    let mut rest = template;

    while let Some(pos) = rest.find(':') {
        path.push_str(&rest[..pos]);
        let after = &rest[pos + 1..];
        let len = placeholder_len(after);

        if len == 0 {
            path.push(':');
            rest = after;
            continue;
        }

        let name = &after[..len];
        match params.get(name).filter(|value| !value.is_empty()) {
            Some(value) => {
                path.push_str(&urlencoding::encode(value));
                consumed.push(name);
            }
            None => missing.push(name.to_string()),
        }
        rest = &after[len..];
    }
    path.push_str(rest);

    if !missing.is_empty() {
        return Err(ResourceError::PathResolutionFailed {
            resource,
            template,
            missing,
        });
    }

    let query = params
        .iter()
        .filter(|(key, _)| !consumed.contains(&key.as_str()))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();

    Ok(ResolvedPath { path, query })
}

fn placeholder_len(s: &str) -> usize {
    s.find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
        .unwrap_or(s.len())
}

// Verify types are Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ResourceOperation>();
    assert_send_sync::<ResourcePath>();
    assert_send_sync::<ResolvedPath>();
};
