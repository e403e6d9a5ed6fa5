//! Resource-specific error types for REST API operations.
//!
//! Every resource operation returns [`ResourceError`]. The variants fall into
//! five families:
//!
//! - **Configuration**: [`ResourceError::PathResolutionFailed`],
//!   [`ResourceError::UnsupportedOperation`] and [`ResourceError::MissingKey`].
//!   Raised before any request is sent.
//! - **API**: [`ResourceError::Api`] for every non-2xx response, 404 included.
//! - **Decode**: [`ResourceError::Decode`] when a response body is not JSON or
//!   does not have the expected shape.
//! - **Input**: [`ResourceError::Encode`] when a request body cannot be
//!   serialized, [`ResourceError::EmptyInput`] when a call that needs at least
//!   one value is given none. Both are raised before any request is sent.
//! - **Not found**: [`ResourceError::NotFound`] for logical absence detected
//!   by the SDK itself, such as an empty lookup result.
//!
//! # Example
//!
//! ```rust,ignore
//! use chartmogul::rest::ResourceError;
//! use chartmogul::rest::resources::Customer;
//!
//! match Customer::find_by_external_id(&client, "ext-1").await {
//!     Ok(customer) => println!("Found: {:?}", customer.name),
//!     Err(ResourceError::NotFound { resource, lookup }) => {
//!         println!("No {resource} matching {lookup}");
//!     }
//!     Err(ResourceError::Api { code, message, .. }) => println!("API error {code}: {message}"),
//!     Err(e) => println!("Other error: {e}"),
//! }
//! ```

use std::collections::HashMap;

use crate::clients::{HttpError, RestError};
use thiserror::Error;

/// Error type for REST resource operations.
#[derive(Debug, Error)]
pub enum ResourceError {
    /// A path template still has placeholders after substitution.
    #[error("Cannot resolve path '{template}' for {resource}: missing {missing:?}")]
    PathResolutionFailed {
        /// The type name of the resource.
        resource: &'static str,
        /// The path template that was being resolved.
        template: &'static str,
        /// Placeholder names that had no value.
        missing: Vec<String>,
    },

    /// The resource declares no path for the requested operation.
    #[error("{resource} does not support '{operation}'")]
    UnsupportedOperation {
        /// The type name of the resource.
        resource: &'static str,
        /// The operation that was requested.
        operation: &'static str,
    },

    /// An operation needs the resource's identifying key, which is unset.
    #[error("{resource}::{operation} requires '{key}' to be set")]
    MissingKey {
        /// The type name of the resource.
        resource: &'static str,
        /// The operation being attempted (e.g., "update", "add_tags").
        operation: &'static str,
        /// The name of the missing key.
        key: &'static str,
    },

    /// The API answered with a non-2xx status.
    #[error("API error {code}: {message}")]
    Api {
        /// The HTTP status code.
        code: u16,
        /// Serialized error fields from the response body.
        message: String,
        /// The response body as returned by the server.
        body: serde_json::Value,
        /// The request ID for debugging (from X-Request-Id header).
        request_id: Option<String>,
    },

    /// A response body could not be decoded.
    #[error("Failed to decode {context}: {message}")]
    Decode {
        /// The resource name or request path being decoded.
        context: String,
        /// The decoder's error message.
        message: String,
    },

    /// A request body or query could not be serialized.
    #[error("Failed to encode {context}: {message}")]
    Encode {
        /// The resource name or request part being encoded.
        context: String,
        /// The serializer's error message.
        message: String,
    },

    /// An operation that takes one or more values was given none.
    #[error("{resource}::{operation} needs at least one value")]
    EmptyInput {
        /// The type name of the resource.
        resource: &'static str,
        /// The operation being attempted (e.g., "add_tags").
        operation: &'static str,
    },

    /// A lookup completed but matched nothing.
    #[error("{resource} matching {lookup} not found")]
    NotFound {
        /// The type name of the resource.
        resource: &'static str,
        /// Description of the lookup (e.g., "external_id=ext-1").
        lookup: String,
    },

    /// An attribute name that the resource does not declare was read.
    #[error("{resource} has no attribute '{name}'")]
    UnknownAttribute {
        /// The type name of the resource.
        resource: &'static str,
        /// The requested attribute name.
        name: String,
    },

    /// A transport-level error (network failure, invalid request).
    #[error(transparent)]
    Http(HttpError),

    /// A REST-level error (invalid path).
    #[error(transparent)]
    Rest(RestError),
}

impl From<HttpError> for ResourceError {
    fn from(error: HttpError) -> Self {
        match error {
            HttpError::Response(e) => Self::Api {
                code: e.code,
                message: e.message,
                body: e.body,
                request_id: e.error_reference,
            },
            HttpError::InvalidJson { path, source } => Self::Decode {
                context: path,
                message: source.to_string(),
            },
            other => Self::Http(other),
        }
    }
}

impl From<RestError> for ResourceError {
    fn from(error: RestError) -> Self {
        match error {
            RestError::Http(e) => e.into(),
            other => Self::Rest(other),
        }
    }
}

impl ResourceError {
    /// Creates a decode error for a resource from a serde error.
    #[must_use]
    pub fn decode(resource: &'static str, error: &serde_json::Error) -> Self {
        Self::Decode {
            context: resource.to_string(),
            message: error.to_string(),
        }
    }

    /// Creates an encode error for an outgoing body from a serde error.
    #[must_use]
    pub fn encode(context: &str, error: &serde_json::Error) -> Self {
        Self::Encode {
            context: context.to_string(),
            message: error.to_string(),
        }
    }

    /// Returns `true` if the error was raised before a request was sent
    /// because the call could not be addressed.
    #[must_use]
    pub const fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::PathResolutionFailed { .. }
                | Self::UnsupportedOperation { .. }
                | Self::MissingKey { .. }
        )
    }

    /// Returns the HTTP status code for API errors.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Api { code, .. } => Some(*code),
            _ => None,
        }
    }

    /// Returns the request ID if available.
    #[must_use]
    pub fn request_id(&self) -> Option<&str> {
        match self {
            Self::Api { request_id, .. } => request_id.as_deref(),
            _ => None,
        }
    }

    /// Returns field-level validation messages from an API error body.
    ///
    /// Returns an empty map for every other variant.
    #[must_use]
    pub fn validation_errors(&self) -> HashMap<String, Vec<String>> {
        match self {
            Self::Api { body, .. } => parse_validation_errors(body),
            _ => HashMap::new(),
        }
    }
}

/// Parses validation errors from an API response body.
///
/// ChartMogul reports errors in several shapes:
/// ```json
/// {"code": 422, "message": "Email is invalid", "param": "email"}
/// {"errors": {"email": "has already been taken", "name": ["can't be blank"]}}
/// {"errors": ["Something went wrong"]}
/// {"error": "Customer not found"}
/// ```
/// Messages without a field land under `"base"`.
fn parse_validation_errors(body: &serde_json::Value) -> HashMap<String, Vec<String>> {
    let mut result: HashMap<String, Vec<String>> = HashMap::new();

    match body.get("errors") {
        Some(serde_json::Value::Object(map)) => {
            for (field, messages) in map {
                let msgs: Vec<String> = match messages {
                    serde_json::Value::Array(arr) => arr
                        .iter()
                        .filter_map(|v| v.as_str().map(ToString::to_string))
                        .collect(),
                    serde_json::Value::String(s) => vec![s.clone()],
                    _ => vec![messages.to_string()],
                };
                result.insert(field.clone(), msgs);
            }
        }
        Some(serde_json::Value::Array(arr)) => {
            let msgs: Vec<String> = arr
                .iter()
                .filter_map(|v| v.as_str().map(ToString::to_string))
                .collect();
            if !msgs.is_empty() {
                result.insert("base".to_string(), msgs);
            }
        }
        Some(serde_json::Value::String(s)) => {
            result.insert("base".to_string(), vec![s.clone()]);
        }
        _ => {}
    }

    if let Some(message) = body.get("message").and_then(serde_json::Value::as_str) {
        let field = body
            .get("param")
            .and_then(serde_json::Value::as_str)
            .unwrap_or("base");
        result
            .entry(field.to_string())
            .or_default()
            .push(message.to_string());
    }

    if let Some(error) = body.get("error").and_then(serde_json::Value::as_str) {
        result
            .entry("base".to_string())
            .or_default()
            .push(error.to_string());
    }

    result
}

// Verify ResourceError is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ResourceError>();
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::{HttpResponseError, InvalidHttpRequestError};
    use serde_json::json;

    fn api_error(code: u16, body: serde_json::Value) -> ResourceError {
        HttpError::Response(HttpResponseError {
            code,
            message: body.to_string(),
            body,
            error_reference: Some("req-1".to_string()),
        })
        .into()
    }

    #[test]
    fn test_http_404_stays_an_api_error() {
        let error = api_error(404, json!({"error": "Customer not found"}));

        assert!(matches!(error, ResourceError::Api { code: 404, .. }));
        assert_eq!(error.status(), Some(404));
        assert_eq!(error.request_id(), Some("req-1"));
    }

    #[test]
    fn test_invalid_json_maps_to_decode() {
        let source = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let error: ResourceError = HttpError::InvalidJson {
            path: "v1/customers".to_string(),
            source,
        }
        .into();

        assert!(matches!(error, ResourceError::Decode { ref context, .. } if context == "v1/customers"));
    }

    #[test]
    fn test_rest_http_errors_are_unwrapped() {
        let rest = RestError::Http(HttpError::Response(HttpResponseError {
            code: 500,
            message: "boom".to_string(),
            body: json!({}),
            error_reference: None,
        }));
        let error: ResourceError = rest.into();
        assert!(matches!(error, ResourceError::Api { code: 500, .. }));

        let rest = RestError::InvalidPath {
            path: String::new(),
        };
        let error: ResourceError = rest.into();
        assert!(matches!(error, ResourceError::Rest(_)));
    }

    #[test]
    fn test_invalid_request_stays_transport_error() {
        let error: ResourceError = HttpError::InvalidRequest(InvalidHttpRequestError::MissingBody {
            method: "post".to_string(),
        })
        .into();
        assert!(matches!(error, ResourceError::Http(_)));
    }

    #[test]
    fn test_configuration_classification() {
        let path_error = ResourceError::PathResolutionFailed {
            resource: "Customer",
            template: "/v1/customers/:customer_uuid",
            missing: vec!["customer_uuid".to_string()],
        };
        assert!(path_error.is_configuration());
        assert!(path_error.to_string().contains("customer_uuid"));

        let key_error = ResourceError::MissingKey {
            resource: "Customer",
            operation: "add_tags",
            key: "uuid",
        };
        assert!(key_error.is_configuration());
        assert_eq!(key_error.to_string(), "Customer::add_tags requires 'uuid' to be set");

        let not_found = ResourceError::NotFound {
            resource: "Customer",
            lookup: "external_id=x".to_string(),
        };
        assert!(!not_found.is_configuration());
    }

    #[test]
    fn test_input_errors_are_not_response_errors() {
        let source = serde_json::to_value(std::collections::BTreeMap::from([((1, 2), 3)]))
            .unwrap_err();
        let encode = ResourceError::encode("Customer", &source);
        assert!(matches!(encode, ResourceError::Encode { ref context, .. } if context == "Customer"));
        assert!(encode.to_string().starts_with("Failed to encode Customer"));
        assert!(!encode.is_configuration());

        let empty = ResourceError::EmptyInput {
            resource: "Customer",
            operation: "add_tags",
        };
        assert_eq!(empty.to_string(), "Customer::add_tags needs at least one value");
        assert!(empty.status().is_none());
    }

    #[test]
    fn test_validation_errors_from_message_and_param() {
        let error = api_error(
            422,
            json!({"code": 422, "message": "Email is invalid", "param": "email"}),
        );
        let errors = error.validation_errors();
        assert_eq!(errors.get("email"), Some(&vec!["Email is invalid".to_string()]));
    }

    #[test]
    fn test_validation_errors_object_format() {
        let error = api_error(
            422,
            json!({"errors": {"email": "has already been taken", "name": ["can't be blank"]}}),
        );
        let errors = error.validation_errors();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors.get("name"), Some(&vec!["can't be blank".to_string()]));
    }

    #[test]
    fn test_validation_errors_array_and_error_formats() {
        let errors = parse_validation_errors(&json!({"errors": ["Error 1", "Error 2"]}));
        assert_eq!(errors.get("base").map(Vec::len), Some(2));

        let errors = parse_validation_errors(&json!({"error": "Unauthorized"}));
        assert_eq!(errors.get("base"), Some(&vec!["Unauthorized".to_string()]));
    }

    #[test]
    fn test_validation_errors_empty_for_non_api_errors() {
        let error = ResourceError::NotFound {
            resource: "Customer",
            lookup: "x".to_string(),
        };
        assert!(error.validation_errors().is_empty());
    }
}
