//! Request dispatch for REST resources.
//!
//! [`RequestService`] turns a resource type, a parameter map and an optional
//! body into one HTTP exchange and a typed result. The path template is
//! resolved before anything is sent, so a missing placeholder never reaches
//! the network.

use std::collections::HashMap;
use std::marker::PhantomData;

use serde_json::Value;

use crate::clients::{HttpMethod, HttpResponse, RestClient};
use crate::rest::{
    build_path, get_path, Resource, ResourceError, ResourceOperation, ResourcePath, RestResource,
};

/// Issues requests for resource type `T` against one declared route.
///
/// The route's HTTP method is the one sent. `create`, `update` and
/// `destroy` only run on a service built for that operation with
/// [`RequestService::for_operation`].
///
/// # Example
///
/// ```rust,ignore
/// use chartmogul::rest::RequestService;
/// use chartmogul::rest::resources::Customer;
/// use std::collections::HashMap;
///
/// let params = HashMap::from([("customer_uuid".to_string(), "cus_1".to_string())]);
/// let customer = RequestService::<Customer>::new(&client).all(&params).await?;
/// ```
#[derive(Debug)]
pub struct RequestService<'a, T> {
    client: &'a RestClient,
    route: ResourcePath,
    _resource: PhantomData<fn() -> T>,
}

impl<'a, T: RestResource> RequestService<'a, T> {
    /// Creates a retrieve service for the resource's primary path.
    #[must_use]
    pub const fn new(client: &'a RestClient) -> Self {
        Self::with_path(client, T::PATH)
    }

    /// Creates a retrieve service for an explicit path template.
    ///
    /// Use [`RequestService::send`] to issue other methods against it.
    #[must_use]
    pub const fn with_path(client: &'a RestClient, template: &'static str) -> Self {
        let operation = ResourceOperation::Retrieve;
        Self {
            client,
            route: ResourcePath::new(operation.default_http_method(), operation, template),
            _resource: PhantomData,
        }
    }

    /// Creates a service for the route the resource declares for
    /// `operation`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::UnsupportedOperation`] if the resource has no
    /// path for the operation.
    pub fn for_operation(
        client: &'a RestClient,
        operation: ResourceOperation,
    ) -> Result<Self, ResourceError> {
        let route = get_path(T::PATHS, operation).ok_or(ResourceError::UnsupportedOperation {
            resource: T::NAME,
            operation: operation.as_str(),
        })?;
        Ok(Self {
            client,
            route: *route,
            _resource: PhantomData,
        })
    }

    /// Returns the path template this service resolves.
    #[must_use]
    pub const fn template(&self) -> &'static str {
        self.route.template
    }

    /// Returns the route this service dispatches to.
    #[must_use]
    pub const fn route(&self) -> &ResourcePath {
        &self.route
    }

    /// Fetches the resource.
    ///
    /// Parameters fill the template's placeholders; the rest are sent as
    /// query parameters.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::PathResolutionFailed`] if a placeholder has
    /// no value, [`ResourceError::UnsupportedOperation`] if the service was
    /// built for a write operation, [`ResourceError::Api`] for non-2xx
    /// responses and [`ResourceError::Decode`] if the body does not match
    /// `T`.
    #[allow(clippy::implicit_hasher)]
    pub async fn all(&self, params: &HashMap<String, String>) -> Result<Resource<T>, ResourceError> {
        self.expect_operation(
            "all",
            &[
                ResourceOperation::Retrieve,
                ResourceOperation::All,
                ResourceOperation::Search,
            ],
        )?;
        let response = self.send(self.route.http_method, params, None).await?;
        self.bind(response)
    }

    /// Creates a resource.
    ///
    /// # Errors
    ///
    /// Same as [`RequestService::all`]; the service must be built for
    /// [`ResourceOperation::Create`].
    #[allow(clippy::implicit_hasher)]
    pub async fn create(
        &self,
        params: &HashMap<String, String>,
        body: Value,
    ) -> Result<Resource<T>, ResourceError> {
        self.expect_operation("create", &[ResourceOperation::Create])?;
        let response = self.send(self.route.http_method, params, Some(body)).await?;
        self.bind(response)
    }

    /// Partially updates a resource.
    ///
    /// # Errors
    ///
    /// Same as [`RequestService::all`]; the service must be built for
    /// [`ResourceOperation::Update`].
    #[allow(clippy::implicit_hasher)]
    pub async fn update(
        &self,
        params: &HashMap<String, String>,
        body: Value,
    ) -> Result<Resource<T>, ResourceError> {
        self.expect_operation("update", &[ResourceOperation::Update])?;
        let response = self.send(self.route.http_method, params, Some(body)).await?;
        self.bind(response)
    }

    /// Deletes a resource.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::UnsupportedOperation`] unless the service was
    /// built for [`ResourceOperation::Delete`],
    /// [`ResourceError::PathResolutionFailed`] if a placeholder has no value
    /// and [`ResourceError::Api`] for non-2xx responses.
    #[allow(clippy::implicit_hasher)]
    pub async fn destroy(&self, params: &HashMap<String, String>) -> Result<(), ResourceError> {
        self.expect_operation("destroy", &[ResourceOperation::Delete])?;
        self.send(self.route.http_method, params, None).await?;
        Ok(())
    }

    /// Resolves the template and sends a request with an explicit method,
    /// without decoding the response.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::PathResolutionFailed`] if a placeholder has
    /// no value and [`ResourceError::Api`] for non-2xx responses.
    #[allow(clippy::implicit_hasher)]
    pub async fn send(
        &self,
        method: HttpMethod,
        params: &HashMap<String, String>,
        body: Option<Value>,
    ) -> Result<HttpResponse, ResourceError> {
        let resolved = build_path(T::NAME, self.route.template, params)?;

        tracing::debug!(
            resource = T::NAME,
            method = %method,
            path = %resolved.path,
            "Dispatching resource request"
        );

        let response = self
            .client
            .send(method, &resolved.path, body, Some(resolved.query))
            .await?;

        Ok(response)
    }

    fn expect_operation(
        &self,
        call: &'static str,
        allowed: &[ResourceOperation],
    ) -> Result<(), ResourceError> {
        if allowed.contains(&self.route.operation) {
            Ok(())
        } else {
            Err(ResourceError::UnsupportedOperation {
                resource: T::NAME,
                operation: call,
            })
        }
    }

    fn bind(&self, response: HttpResponse) -> Result<Resource<T>, ResourceError> {
        let data = decode::<T>(response.body)?;
        Ok(Resource::new(data, self.client.clone()))
    }
}

/// Decodes a JSON body into a resource type.
pub(crate) fn decode<T: RestResource>(body: Value) -> Result<T, ResourceError> {
    serde_json::from_value(body).map_err(|e| ResourceError::decode(T::NAME, &e))
}
