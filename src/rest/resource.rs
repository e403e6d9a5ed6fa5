//! The resource substrate shared by every API entity.
//!
//! A resource type is a plain serde struct that implements [`RestResource`]:
//! it declares its name, its primary path template, the operations it
//! supports and the attribute names it exposes. Values fetched from the API
//! come back as [`Resource<T>`], which pairs the record with the
//! [`RestClient`] it was fetched through so that further calls need no new
//! credentials.
//!
//! # Implementing a Resource
//!
//! ```rust,ignore
//! use chartmogul::rest::{RestResource, ResourceOperation, ResourcePath};
//! use chartmogul::HttpMethod;
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Debug, Clone, Serialize, Deserialize)]
//! pub struct Plan {
//!     pub uuid: Option<String>,
//!     pub name: Option<String>,
//! }
//!
//! impl RestResource for Plan {
//!     const NAME: &'static str = "Plan";
//!     const PATH: &'static str = "/v1/plans/:plan_uuid";
//!     const PATHS: &'static [ResourcePath] = &[
//!         ResourcePath::new(HttpMethod::Get, ResourceOperation::Retrieve, "/v1/plans/:plan_uuid"),
//!     ];
//!     const FIELDS: &'static [&'static str] = &["uuid", "name"];
//!     const KEY: &'static str = "uuid";
//!
//!     fn key(&self) -> Option<&str> {
//!         self.uuid.as_deref()
//!     }
//!
//!     fn path_params(&self) -> HashMap<String, String> {
//!         self.key()
//!             .map(|uuid| HashMap::from([("plan_uuid".to_string(), uuid.to_string())]))
//!             .unwrap_or_default()
//!     }
//! }
//! ```

use std::collections::HashMap;
use std::ops::Deref;

use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

use crate::clients::RestClient;
use crate::rest::{ResourceError, ResourcePath};

/// A typed representation of one kind of server-side entity.
///
/// # Associated Constants
///
/// - `NAME`: The resource name used in errors and logs (e.g., "Customer")
/// - `PATH`: The primary path template of the resource
/// - `PATHS`: One path per supported operation
/// - `FIELDS`: Attribute names readable through [`Resource::attribute`]
/// - `KEY`: Name of the identifying attribute
pub trait RestResource: Serialize + DeserializeOwned + Clone + Send + Sync + Sized {
    /// The name of the resource (e.g., "Customer").
    const NAME: &'static str;

    /// The primary path template, with `:name` placeholders.
    const PATH: &'static str;

    /// Available paths for this resource, one per supported operation.
    const PATHS: &'static [ResourcePath];

    /// The declared attribute names.
    ///
    /// Attributes outside this list are tolerated when decoding but are never
    /// exposed.
    const FIELDS: &'static [&'static str];

    /// The name of the identifying attribute.
    const KEY: &'static str = "id";

    /// Returns the identifying key, or `None` if it is unset or empty.
    fn key(&self) -> Option<&str> {
        None
    }

    /// Returns the values substituted into this resource's own path
    /// templates, keyed by placeholder name.
    fn path_params(&self) -> HashMap<String, String> {
        HashMap::new()
    }
}

/// A resource record bound to the client it was fetched through.
///
/// `Resource<T>` dereferences to `T` for read access. It does not implement
/// `DerefMut`: fields change only through operations that write the server's
/// response back into the record.
///
/// # Example
///
/// ```rust,ignore
/// let customer = Customer::retrieve(&client, "cus_1").await?;
///
/// // Deref to Customer
/// println!("Name: {:?}", customer.name);
///
/// // Generic read by attribute name
/// let email = customer.attribute("email")?;
///
/// // Further calls reuse the bound client
/// let client = customer.client().clone();
/// ```
#[derive(Debug, Clone)]
pub struct Resource<T> {
    data: T,
    client: RestClient,
}

impl<T: RestResource> Resource<T> {
    /// Binds a record to a client.
    ///
    /// Use this for transient instances that only carry the fields an
    /// operation needs, such as a customer known by uuid alone.
    #[must_use]
    pub const fn new(data: T, client: RestClient) -> Self {
        Self { data, client }
    }

    /// Returns the client this resource is bound to.
    #[must_use]
    pub const fn client(&self) -> &RestClient {
        &self.client
    }

    /// Returns the resource name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        T::NAME
    }

    /// Returns the resource's primary path template.
    #[must_use]
    pub const fn path(&self) -> &'static str {
        T::PATH
    }

    /// Reads a declared attribute by name.
    ///
    /// Unset attributes read as `Value::Null`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::UnknownAttribute`] if `name` is not one of
    /// the resource's declared attributes.
    pub fn attribute(&self, name: &str) -> Result<Value, ResourceError> {
        if !T::FIELDS.contains(&name) {
            return Err(ResourceError::UnknownAttribute {
                resource: T::NAME,
                name: name.to_string(),
            });
        }

        let value =
            serde_json::to_value(&self.data).map_err(|e| ResourceError::encode(T::NAME, &e))?;

        Ok(match value {
            Value::Object(mut map) => map.remove(name).unwrap_or(Value::Null),
            _ => Value::Null,
        })
    }

    /// Returns the identifying key, or an error naming the operation that
    /// needed it.
    pub(crate) fn require_key(&self, operation: &'static str) -> Result<&str, ResourceError> {
        self.data.key().ok_or(ResourceError::MissingKey {
            resource: T::NAME,
            operation,
            key: T::KEY,
        })
    }

    /// Unbinds the record from its client.
    #[must_use]
    pub fn into_inner(self) -> T {
        self.data
    }

    /// Overwrites the record with a server response.
    pub(crate) fn replace(&mut self, data: T) {
        self.data = data;
    }

    pub(crate) fn data_mut(&mut self) -> &mut T {
        &mut self.data
    }
}

impl<T> Deref for Resource<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.data
    }
}

/// Serializes a params struct to a query parameter map.
///
/// `None` fields are skipped, arrays are joined with commas and nested
/// objects are sent as JSON strings.
pub(crate) fn serialize_to_query<T: Serialize>(
    params: &T,
) -> Result<HashMap<String, String>, ResourceError> {
    let value =
        serde_json::to_value(params).map_err(|e| ResourceError::encode("query parameters", &e))?;

    let mut query = HashMap::new();

    if let Value::Object(map) = value {
        for (key, val) in map {
            match val {
                Value::Null => {}
                Value::String(s) => {
                    query.insert(key, s);
                }
                Value::Number(n) => {
                    query.insert(key, n.to_string());
                }
                Value::Bool(b) => {
                    query.insert(key, b.to_string());
                }
                Value::Array(arr) => {
                    let values: Vec<String> = arr
                        .iter()
                        .filter_map(|v| match v {
                            Value::String(s) => Some(s.clone()),
                            Value::Number(n) => Some(n.to_string()),
                            _ => None,
                        })
                        .collect();
                    if !values.is_empty() {
                        query.insert(key, values.join(","));
                    }
                }
                Value::Object(_) => {
                    query.insert(key, val.to_string());
                }
            }
        }
    }

    Ok(query)
}
