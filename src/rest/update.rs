//! Partial updates for resources that support them.
//!
//! A resource opts in by implementing [`Updatable`], which extracts the
//! client-writable subset of its fields. [`update`] sends that subset with a
//! PATCH to the resource's own update path and overwrites the local record
//! with the server's response.

use serde::Serialize;

use crate::rest::{
    RequestService, Resource, ResourceError, ResourceOperation, RestResource,
};

/// A resource that can be partially updated.
///
/// # Example
///
/// ```rust,ignore
/// let mut customer = Customer::retrieve(&client, "cus_1").await?;
/// customer.update().await?;
/// ```
pub trait Updatable: RestResource {
    /// The request body type holding the writable fields.
    type Update: Serialize;

    /// Returns the fields the client may send in an update, taken from the
    /// record's current values.
    fn writable_fields(&self) -> Self::Update;
}

/// Sends the resource's writable fields and stores the server's response.
///
/// # Errors
///
/// Returns [`ResourceError::MissingKey`] if the resource's key is unset,
/// [`ResourceError::UnsupportedOperation`] if it declares no update path and
/// [`ResourceError::Api`] for non-2xx responses. The local record is left
/// untouched on error.
pub async fn update<T: Updatable>(resource: &mut Resource<T>) -> Result<(), ResourceError> {
    let key = resource.require_key("update")?.to_string();

    let body = serde_json::to_value(resource.writable_fields())
        .map_err(|e| ResourceError::encode(T::NAME, &e))?;

    tracing::debug!(resource = T::NAME, key = %key, "Updating resource");

    let updated = RequestService::<T>::for_operation(resource.client(), ResourceOperation::Update)?
        .update(&resource.path_params(), body)
        .await?;

    resource.replace(updated.into_inner());
    Ok(())
}

impl<T: Updatable> Resource<T> {
    /// Sends this resource's writable fields with a PATCH and replaces the
    /// local record with the server's response.
    ///
    /// # Errors
    ///
    /// See [`update`].
    pub async fn update(&mut self) -> Result<(), ResourceError> {
        update(self).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::{HttpMethod, RestClient};
    use crate::config::{ApiKey, BaseUrl, ChartMogulConfig};
    use crate::rest::ResourcePath;
    use serde::{Deserialize, Serializer};
    use std::collections::HashMap;

    /// A body the serializer always rejects.
    struct Unencodable;

    impl Serialize for Unencodable {
        fn serialize<S: Serializer>(&self, _serializer: S) -> Result<S::Ok, S::Error> {
            Err(serde::ser::Error::custom("unsupported value"))
        }
    }

    #[derive(Debug, Clone, Serialize, Deserialize)]
    struct MockPlan {
        uuid: Option<String>,
    }

    impl RestResource for MockPlan {
        const NAME: &'static str = "Plan";
        const PATH: &'static str = "/v1/plans/:plan_uuid";
        const PATHS: &'static [ResourcePath] = &[ResourcePath::new(
            HttpMethod::Patch,
            ResourceOperation::Update,
            "/v1/plans/:plan_uuid",
        )];
        const FIELDS: &'static [&'static str] = &["uuid"];
        const KEY: &'static str = "uuid";

        fn key(&self) -> Option<&str> {
            self.uuid.as_deref()
        }

        fn path_params(&self) -> HashMap<String, String> {
            self.key()
                .map(|uuid| HashMap::from([("plan_uuid".to_string(), uuid.to_string())]))
                .unwrap_or_default()
        }
    }

    impl Updatable for MockPlan {
        type Update = Unencodable;

        fn writable_fields(&self) -> Unencodable {
            Unencodable
        }
    }

    fn plan(uuid: Option<&str>) -> Resource<MockPlan> {
        let config = ChartMogulConfig::builder()
            .api_key(ApiKey::new("test-key").unwrap())
            // Nothing listens here; every case fails before sending.
            .base_url(BaseUrl::new("http://127.0.0.1:9").unwrap())
            .build()
            .unwrap();
        let client = RestClient::new(&config).unwrap();
        Resource::new(
            MockPlan {
                uuid: uuid.map(String::from),
            },
            client,
        )
    }

    #[tokio::test]
    async fn test_unserializable_body_is_an_encode_error() {
        let mut resource = plan(Some("pl_1"));

        let error = resource.update().await.unwrap_err();

        assert!(matches!(error, ResourceError::Encode { ref context, .. } if context == "Plan"));
        assert!(error.to_string().contains("unsupported value"));
        assert_eq!(resource.uuid.as_deref(), Some("pl_1"));
    }

    #[tokio::test]
    async fn test_update_without_key_fails_first() {
        let mut resource = plan(None);

        let error = resource.update().await.unwrap_err();

        assert!(matches!(
            error,
            ResourceError::MissingKey {
                resource: "Plan",
                operation: "update",
                key: "uuid"
            }
        ));
    }
}
