//! Customer resource implementation.
//!
//! Besides the standard retrieve/list/update/delete operations, customers
//! carry two attribute collections with their own endpoints: tags and
//! custom attributes. Every attribute operation overwrites the local
//! collection with the list the server returns.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::clients::{HttpMethod, RestClient};
use crate::rest::{
    RequestService, Resource, ResourceError, ResourceOperation, ResourcePath, RestResource,
    Updatable,
};

use super::customers::{CustomerListParams, Customers};

const TAGS_PATH: &str = "/v1/customers/:customer_uuid/attributes/tags";
const CUSTOM_ATTRIBUTES_PATH: &str = "/v1/customers/:customer_uuid/attributes/custom";
const MERGE_PATH: &str = "/v1/customers/merges";

/// Postal address of a customer.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct CustomerAddress {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(
        rename = "address_zip",
        alias = "zip",
        skip_serializing_if = "Option::is_none"
    )]
    pub zip: Option<String>,
}

/// The `attributes` object of a customer.
///
/// `tags` and `custom` are always present once the customer has been
/// fetched. Other attribute sources (e.g. `stripe`, `clearbit`) are kept in
/// `extra`.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct CustomerAttributes {
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub custom: Map<String, Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A customer record.
///
/// Financial fields (`mrr`, `arr`, `currency`, `currency_sign`) and
/// provenance fields are owned by the server and never sent in updates.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Customer {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub external_ids: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_since: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lead_created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub free_trial_started_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub attributes: CustomerAttributes,
    #[serde(default)]
    pub address: CustomerAddress,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zip: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mrr: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arr: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency_sign: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub billing_system_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub billing_system_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chartmogul_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_source_uuid: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub data_source_uuids: Vec<String>,
}

impl RestResource for Customer {
    const NAME: &'static str = "Customer";
    const PATH: &'static str = "/v1/customers/:customer_uuid";

    const PATHS: &'static [ResourcePath] = &[
        ResourcePath::new(
            HttpMethod::Get,
            ResourceOperation::Retrieve,
            "/v1/customers/:customer_uuid",
        ),
        ResourcePath::new(HttpMethod::Post, ResourceOperation::Create, "/v1/customers"),
        ResourcePath::new(
            HttpMethod::Patch,
            ResourceOperation::Update,
            "/v1/customers/:customer_uuid",
        ),
        ResourcePath::new(
            HttpMethod::Delete,
            ResourceOperation::Delete,
            "/v1/customers/:customer_uuid",
        ),
    ];

    const FIELDS: &'static [&'static str] = &[
        "id",
        "uuid",
        "external_id",
        "external_ids",
        "name",
        "email",
        "status",
        "customer_since",
        "lead_created_at",
        "free_trial_started_at",
        "attributes",
        "address",
        "city",
        "country",
        "state",
        "zip",
        "mrr",
        "arr",
        "currency",
        "currency_sign",
        "billing_system_url",
        "billing_system_type",
        "chartmogul_url",
        "data_source_uuid",
        "data_source_uuids",
    ];

    const KEY: &'static str = "uuid";

    fn key(&self) -> Option<&str> {
        self.uuid.as_deref().filter(|uuid| !uuid.is_empty())
    }

    fn path_params(&self) -> HashMap<String, String> {
        self.key()
            .map(|uuid| HashMap::from([("customer_uuid".to_string(), uuid.to_string())]))
            .unwrap_or_default()
    }
}

/// The writable subset of a [`Customer`], sent by `update()`.
///
/// Top-level location fields fall back to the customer's address when unset.
#[derive(Debug, Clone, Serialize, Default, PartialEq, Eq)]
pub struct CustomerUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_source_uuid: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub data_source_uuids: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub external_ids: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zip: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lead_created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub free_trial_started_at: Option<DateTime<Utc>>,
}

impl Updatable for Customer {
    type Update = CustomerUpdate;

    fn writable_fields(&self) -> CustomerUpdate {
        CustomerUpdate {
            name: self.name.clone(),
            email: self.email.clone(),
            data_source_uuid: self.data_source_uuid.clone(),
            data_source_uuids: self.data_source_uuids.clone(),
            external_ids: self.external_ids.clone(),
            city: self.city.clone().or_else(|| self.address.city.clone()),
            country: self.country.clone().or_else(|| self.address.country.clone()),
            state: self.state.clone().or_else(|| self.address.state.clone()),
            zip: self.zip.clone().or_else(|| self.address.zip.clone()),
            lead_created_at: self.lead_created_at,
            free_trial_started_at: self.free_trial_started_at,
        }
    }
}

/// Identifies one side of a customer merge.
#[derive(Debug, Clone, Serialize, Default, PartialEq, Eq)]
pub struct MergeTarget {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_uuid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_source_uuid: Option<String>,
}

impl MergeTarget {
    /// A customer addressed by its ChartMogul uuid.
    #[must_use]
    pub fn customer_uuid(uuid: impl Into<String>) -> Self {
        Self {
            customer_uuid: Some(uuid.into()),
            ..Default::default()
        }
    }

    /// A customer addressed by its external id within a data source.
    #[must_use]
    pub fn external_id(external_id: impl Into<String>, data_source_uuid: impl Into<String>) -> Self {
        Self {
            external_id: Some(external_id.into()),
            data_source_uuid: Some(data_source_uuid.into()),
            ..Default::default()
        }
    }
}

#[derive(Serialize)]
struct MergeRequest<'a> {
    from: &'a MergeTarget,
    into: &'a MergeTarget,
}

/// A custom attribute to add to a customer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewCustomAttribute {
    /// Attribute type (`String`, `Integer`, `Decimal`, `Timestamp`, `Boolean`).
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub attribute_type: Option<String>,
    pub key: String,
    pub value: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl NewCustomAttribute {
    #[must_use]
    pub fn new(key: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            attribute_type: None,
            key: key.into(),
            value: value.into(),
            source: None,
        }
    }

    #[must_use]
    pub fn with_type(mut self, attribute_type: impl Into<String>) -> Self {
        self.attribute_type = Some(attribute_type.into());
        self
    }

    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }
}

/// Attributes set when creating a customer.
#[derive(Debug, Clone, Serialize, Default, PartialEq)]
pub struct NewCustomerAttributes {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub custom: Vec<NewCustomAttribute>,
}

/// Request body for [`Customer::create`].
#[derive(Debug, Clone, Serialize, Default, PartialEq)]
pub struct NewCustomer {
    pub data_source_uuid: String,
    pub external_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zip: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lead_created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub free_trial_started_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attributes: Option<NewCustomerAttributes>,
}

impl NewCustomer {
    #[must_use]
    pub fn new(data_source_uuid: impl Into<String>, external_id: impl Into<String>) -> Self {
        Self {
            data_source_uuid: data_source_uuid.into(),
            external_id: external_id.into(),
            ..Default::default()
        }
    }
}

/// Attribute operations take one or more values.
fn require_values(operation: &'static str, count: usize) -> Result<(), ResourceError> {
    if count == 0 {
        return Err(ResourceError::EmptyInput {
            resource: Customer::NAME,
            operation,
        });
    }
    Ok(())
}

#[derive(Deserialize)]
struct TagsBody {
    tags: Vec<String>,
}

#[derive(Deserialize)]
struct CustomBody {
    custom: Map<String, Value>,
}

impl Customer {
    /// Creates a record holding only a uuid.
    ///
    /// Bind it with [`Resource::new`] to run attribute operations on a
    /// customer without fetching it first.
    #[must_use]
    pub fn with_uuid(uuid: impl Into<String>) -> Self {
        Self {
            uuid: Some(uuid.into()),
            ..Default::default()
        }
    }

    /// Returns the customer's tags.
    #[must_use]
    pub fn tags(&self) -> &[String] {
        &self.attributes.tags
    }

    /// Returns the customer's custom attributes.
    #[must_use]
    pub const fn custom_attributes(&self) -> &Map<String, Value> {
        &self.attributes.custom
    }

    /// Fetches a customer by uuid.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::PathResolutionFailed`] without sending a
    /// request if `uuid` is empty, and [`ResourceError::Api`] if the API
    /// rejects the request (including 404).
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let customer = Customer::retrieve(&client, "cus_de305d54").await?;
    /// println!("{:?} has tags {:?}", customer.name, customer.tags());
    /// ```
    pub async fn retrieve(client: &RestClient, uuid: &str) -> Result<Resource<Self>, ResourceError> {
        let params = HashMap::from([("customer_uuid".to_string(), uuid.to_string())]);
        RequestService::<Self>::new(client).all(&params).await
    }

    /// Lists customers matching the given filters.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Api`] if the API rejects the request.
    pub async fn all(
        client: &RestClient,
        params: &CustomerListParams,
    ) -> Result<Resource<Customers>, ResourceError> {
        Customers::all(client, params).await
    }

    /// Searches customers by email.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Api`] if the API rejects the request.
    pub async fn search(client: &RestClient, email: &str) -> Result<Resource<Customers>, ResourceError> {
        Customers::search(client, email).await
    }

    /// Returns the first customer with the given external id.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::NotFound`] if the listing is empty. HTTP
    /// errors from the listing are returned as [`ResourceError::Api`].
    pub async fn find_by_external_id(
        client: &RestClient,
        external_id: &str,
    ) -> Result<Resource<Self>, ResourceError> {
        let params = CustomerListParams {
            external_id: Some(external_id.to_string()),
            ..Default::default()
        };

        Customers::all(client, &params)
            .await?
            .into_resources()
            .into_iter()
            .next()
            .ok_or_else(|| ResourceError::NotFound {
                resource: Self::NAME,
                lookup: format!("external_id={external_id}"),
            })
    }

    /// Merges the customer `from` into the customer `into`.
    ///
    /// Returns `true` once the API has accepted the merge.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Api`] for any non-2xx response.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let merged = Customer::merge(
    ///     &client,
    ///     &MergeTarget::customer_uuid("cus_1"),
    ///     &MergeTarget::customer_uuid("cus_2"),
    /// )
    /// .await?;
    /// assert!(merged);
    /// ```
    pub async fn merge(
        client: &RestClient,
        from: &MergeTarget,
        into: &MergeTarget,
    ) -> Result<bool, ResourceError> {
        let body = serde_json::to_value(MergeRequest { from, into })
            .map_err(|e| ResourceError::encode(Self::NAME, &e))?;

        tracing::debug!(?from, ?into, "Merging customers");

        client.post(MERGE_PATH, body).await?;
        Ok(true)
    }

    /// Creates a customer.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Api`] if the API rejects the customer.
    pub async fn create(
        client: &RestClient,
        customer: &NewCustomer,
    ) -> Result<Resource<Self>, ResourceError> {
        let body =
            serde_json::to_value(customer).map_err(|e| ResourceError::encode(Self::NAME, &e))?;

        RequestService::<Self>::for_operation(client, ResourceOperation::Create)?
            .create(&HashMap::new(), body)
            .await
    }
}

impl Resource<Customer> {
    /// Adds tags and stores the tag list the server returns.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::EmptyInput`] if `tags` is empty,
    /// [`ResourceError::MissingKey`] if the customer has no uuid and
    /// [`ResourceError::Api`] for non-2xx responses. Nothing is sent in the
    /// first two cases.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let tags = customer.add_tags(&["vip", "enterprise"]).await?;
    /// ```
    pub async fn add_tags(&mut self, tags: &[&str]) -> Result<&[String], ResourceError> {
        require_values("add_tags", tags.len())?;
        let body = serde_json::json!({ "tags": tags });
        let response = self
            .send_attributes("add_tags", HttpMethod::Post, TAGS_PATH, body)
            .await?;
        self.store_tags(response)
    }

    /// Removes tags and stores the tag list the server returns.
    ///
    /// # Errors
    ///
    /// Same as `add_tags`.
    pub async fn remove_tags(&mut self, tags: &[&str]) -> Result<&[String], ResourceError> {
        require_values("remove_tags", tags.len())?;
        let body = serde_json::json!({ "tags": tags });
        let response = self
            .send_attributes("remove_tags", HttpMethod::Delete, TAGS_PATH, body)
            .await?;
        self.store_tags(response)
    }

    /// Adds custom attributes and stores the attributes the server returns.
    ///
    /// # Errors
    ///
    /// Same as `add_tags`.
    pub async fn add_custom_attributes(
        &mut self,
        attributes: &[NewCustomAttribute],
    ) -> Result<&Map<String, Value>, ResourceError> {
        require_values("add_custom_attributes", attributes.len())?;
        let body = serde_json::json!({ "custom": attributes });
        let response = self
            .send_attributes(
                "add_custom_attributes",
                HttpMethod::Post,
                CUSTOM_ATTRIBUTES_PATH,
                body,
            )
            .await?;
        self.store_custom(response)
    }

    /// Removes custom attributes by name and stores the attributes the
    /// server returns.
    ///
    /// # Errors
    ///
    /// Same as `add_tags`.
    pub async fn remove_custom_attributes(
        &mut self,
        names: &[&str],
    ) -> Result<&Map<String, Value>, ResourceError> {
        require_values("remove_custom_attributes", names.len())?;
        let body = serde_json::json!({ "custom": names });
        let response = self
            .send_attributes(
                "remove_custom_attributes",
                HttpMethod::Delete,
                CUSTOM_ATTRIBUTES_PATH,
                body,
            )
            .await?;
        self.store_custom(response)
    }

    /// Replaces the named custom attributes.
    ///
    /// All mappings are merged into one body and sent in a single PUT; later
    /// mappings win on duplicate names. The merged mapping must name at least
    /// one attribute.
    ///
    /// # Errors
    ///
    /// Same as `add_tags`.
    pub async fn update_custom_attributes(
        &mut self,
        attributes: &[Map<String, Value>],
    ) -> Result<&Map<String, Value>, ResourceError> {
        let merged: Map<String, Value> = attributes
            .iter()
            .flat_map(|map| map.iter().map(|(k, v)| (k.clone(), v.clone())))
            .collect();
        require_values("update_custom_attributes", merged.len())?;

        let body = serde_json::json!({ "custom": merged });
        let response = self
            .send_attributes(
                "update_custom_attributes",
                HttpMethod::Put,
                CUSTOM_ATTRIBUTES_PATH,
                body,
            )
            .await?;
        self.store_custom(response)
    }

    /// Deletes the customer.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::MissingKey`] if the customer has no uuid and
    /// [`ResourceError::Api`] for non-2xx responses.
    pub async fn destroy(self) -> Result<(), ResourceError> {
        self.require_key("destroy")?;

        RequestService::<Customer>::for_operation(self.client(), ResourceOperation::Delete)?
            .destroy(&self.path_params())
            .await
    }

    async fn send_attributes(
        &self,
        operation: &'static str,
        method: HttpMethod,
        template: &'static str,
        body: Value,
    ) -> Result<Value, ResourceError> {
        let uuid = self.require_key(operation)?;

        tracing::debug!(customer = uuid, operation, "Updating customer attributes");

        let response = RequestService::<Customer>::with_path(self.client(), template)
            .send(method, &self.path_params(), Some(body))
            .await?;

        Ok(response.body)
    }

    fn store_tags(&mut self, response: Value) -> Result<&[String], ResourceError> {
        let TagsBody { tags } = serde_json::from_value(response)
            .map_err(|e| ResourceError::decode(Customer::NAME, &e))?;
        self.data_mut().attributes.tags = tags;
        Ok(self.tags())
    }

    fn store_custom(&mut self, response: Value) -> Result<&Map<String, Value>, ResourceError> {
        let CustomBody { custom } = serde_json::from_value(response)
            .map_err(|e| ResourceError::decode(Customer::NAME, &e))?;
        self.data_mut().attributes.custom = custom;
        Ok(self.custom_attributes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rest::get_path;
    use serde_json::json;

    fn customer_json() -> Value {
        json!({
            "id": 74596140,
            "uuid": "cus_de305d54-75b4-431b-adb2-eb6b9e546012",
            "external_id": "34916129",
            "external_ids": ["34916129"],
            "name": "Example Company",
            "email": "bob@examplecompany.com",
            "status": "Active",
            "customer-since": null,
            "customer_since": "2015-06-09T13:16:00-04:00",
            "attributes": {
                "tags": ["important", "Prio1"],
                "stripe": {"uid": 7, "coupon": true},
                "clearbit": {},
                "custom": {"CAC": 213, "channel": "Facebook"}
            },
            "address": {
                "address_zip": "0185128",
                "city": "Nowhereville",
                "country": "US",
                "state": "Alaska"
            },
            "mrr": 3000.0,
            "arr": 36000.0,
            "billing-system-url": "https://dashboard.stripe.com/customers/cus_4Z2ZpyJFuQ0XMb",
            "billing_system_url": "https://dashboard.stripe.com/customers/cus_4Z2ZpyJFuQ0XMb",
            "chartmogul_url": "https://app.chartmogul.com/#customers/12345",
            "billing_system_type": "Stripe",
            "currency": "USD",
            "currency_sign": "$",
            "data_source_uuid": "ds_fef05d54-47b4-431b-aed2-eb6b9e545430",
            "data_source_uuids": ["ds_fef05d54-47b4-431b-aed2-eb6b9e545430"]
        })
    }

    #[test]
    fn test_customer_deserialization_tolerates_unknown_fields() {
        let customer: Customer = serde_json::from_value(customer_json()).unwrap();

        assert_eq!(customer.id, Some(74596140));
        assert_eq!(customer.key(), Some("cus_de305d54-75b4-431b-adb2-eb6b9e546012"));
        assert_eq!(customer.tags(), &["important".to_string(), "Prio1".to_string()]);
        assert_eq!(customer.custom_attributes()["CAC"], json!(213));
        assert_eq!(customer.attributes.extra["stripe"], json!({"uid": 7, "coupon": true}));
        assert_eq!(customer.address.zip.as_deref(), Some("0185128"));
        assert_eq!(customer.mrr, Some(3000.0));
        assert_eq!(
            customer.customer_since.unwrap().to_rfc3339(),
            "2015-06-09T17:16:00+00:00"
        );
    }

    #[test]
    fn test_attribute_containers_default_to_empty() {
        let customer: Customer = serde_json::from_value(json!({"uuid": "cus_1"})).unwrap();

        assert!(customer.tags().is_empty());
        assert!(customer.custom_attributes().is_empty());
    }

    #[test]
    fn test_writable_fields_exclude_server_owned_fields() {
        let customer: Customer = serde_json::from_value(customer_json()).unwrap();

        let body = serde_json::to_value(customer.writable_fields()).unwrap();

        assert_eq!(body["name"], "Example Company");
        assert_eq!(body["email"], "bob@examplecompany.com");
        for read_only in ["id", "uuid", "mrr", "arr", "currency", "chartmogul_url", "status"] {
            assert!(body.get(read_only).is_none(), "{read_only} must not be sent");
        }
    }

    #[test]
    fn test_writable_fields_fall_back_to_address() {
        let customer: Customer = serde_json::from_value(customer_json()).unwrap();

        let update = customer.writable_fields();

        assert_eq!(update.city.as_deref(), Some("Nowhereville"));
        assert_eq!(update.zip.as_deref(), Some("0185128"));

        let customer = Customer {
            city: Some("Berlin".to_string()),
            ..customer
        };
        assert_eq!(customer.writable_fields().city.as_deref(), Some("Berlin"));
    }

    #[test]
    fn test_path_params_use_customer_uuid() {
        let customer = Customer::with_uuid("cus_1");
        assert_eq!(customer.path_params()["customer_uuid"], "cus_1");

        let customer = Customer::with_uuid("");
        assert!(customer.key().is_none());
        assert!(customer.path_params().is_empty());
    }

    #[test]
    fn test_merge_target_serialization() {
        let body = serde_json::to_value(MergeRequest {
            from: &MergeTarget::customer_uuid("cus_1"),
            into: &MergeTarget::external_id("ext_2", "ds_1"),
        })
        .unwrap();

        assert_eq!(
            body,
            json!({
                "from": {"customer_uuid": "cus_1"},
                "into": {"external_id": "ext_2", "data_source_uuid": "ds_1"}
            })
        );
    }

    #[test]
    fn test_new_custom_attribute_serialization() {
        let attribute = NewCustomAttribute::new("channel", "Facebook")
            .with_type("String")
            .with_source("integration");

        assert_eq!(
            serde_json::to_value(&attribute).unwrap(),
            json!({"type": "String", "key": "channel", "value": "Facebook", "source": "integration"})
        );

        let bare = NewCustomAttribute::new("age", 42);
        assert_eq!(serde_json::to_value(&bare).unwrap(), json!({"key": "age", "value": 42}));
    }

    #[test]
    fn test_new_customer_serialization() {
        let customer = NewCustomer {
            name: Some("Adam Smith".to_string()),
            attributes: Some(NewCustomerAttributes {
                tags: vec!["vip".to_string()],
                custom: vec![],
            }),
            ..NewCustomer::new("ds_1", "cus_0001")
        };

        assert_eq!(
            serde_json::to_value(&customer).unwrap(),
            json!({
                "data_source_uuid": "ds_1",
                "external_id": "cus_0001",
                "name": "Adam Smith",
                "attributes": {"tags": ["vip"]}
            })
        );
    }

    #[test]
    fn test_customer_path_constants_are_correct() {
        let retrieve = get_path(Customer::PATHS, ResourceOperation::Retrieve).unwrap();
        assert_eq!(retrieve.template, Customer::PATH);
        assert_eq!(retrieve.http_method, HttpMethod::Get);

        let update = get_path(Customer::PATHS, ResourceOperation::Update).unwrap();
        assert_eq!(update.http_method, HttpMethod::Patch);
        assert_eq!(update.placeholders(), vec!["customer_uuid"]);

        let create = get_path(Customer::PATHS, ResourceOperation::Create).unwrap();
        assert_eq!(create.template, "/v1/customers");

        assert!(get_path(Customer::PATHS, ResourceOperation::Search).is_none());
        assert_eq!(Customer::NAME, "Customer");
    }
}
