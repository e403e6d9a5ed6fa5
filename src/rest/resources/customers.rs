//! Paginated customer listings.
//!
//! List and search endpoints return a page of customers plus a pagination
//! marker. Current endpoints paginate by cursor (`has_more` + `cursor`);
//! older responses carry `current_page`/`total_pages` instead. A fetched
//! page remembers the request that produced it, so
//! `next_page()` can follow either style.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::clients::{HttpMethod, RestClient};
use crate::rest::{
    serialize_to_query, RequestService, Resource, ResourceError, ResourceOperation, ResourcePath,
    RestResource,
};

use super::customer::Customer;

/// One page of customers.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Customers {
    #[serde(default)]
    pub entries: Vec<Customer>,
    #[serde(default)]
    pub has_more: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_pages: Option<u32>,
    #[serde(skip)]
    origin: Option<ListOrigin>,
}

/// The request a page was fetched with.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ListOrigin {
    operation: ResourceOperation,
    params: HashMap<String, String>,
}

impl RestResource for Customers {
    const NAME: &'static str = "Customers";
    const PATH: &'static str = "/v1/customers";

    const PATHS: &'static [ResourcePath] = &[
        ResourcePath::new(HttpMethod::Get, ResourceOperation::All, "/v1/customers"),
        ResourcePath::new(
            HttpMethod::Get,
            ResourceOperation::Search,
            "/v1/customers/search",
        ),
    ];

    const FIELDS: &'static [&'static str] = &[
        "entries",
        "has_more",
        "cursor",
        "current_page",
        "total_pages",
    ];
}

/// Filters for listing customers.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct CustomerListParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_source_uuid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
    /// Customer status, e.g. `Active`, `Cancelled`, `Lead`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Billing system, e.g. `Stripe`, `Recurly`, `Custom`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub per_page: Option<u32>,
}

impl Customers {
    /// Lists customers matching the given filters.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Api`] if the API rejects the request and
    /// [`ResourceError::Decode`] if the response is not a customer listing.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let params = CustomerListParams {
    ///     status: Some("Active".to_string()),
    ///     per_page: Some(50),
    ///     ..Default::default()
    /// };
    /// let page = Customers::all(&client, &params).await?;
    /// for customer in page.iter() {
    ///     println!("{:?}", customer.email);
    /// }
    /// ```
    pub async fn all(
        client: &RestClient,
        params: &CustomerListParams,
    ) -> Result<Resource<Self>, ResourceError> {
        let query = serialize_to_query(params)?;
        Self::fetch(client, ResourceOperation::All, query).await
    }

    /// Searches customers by email.
    ///
    /// # Errors
    ///
    /// Same as [`Customers::all`].
    pub async fn search(client: &RestClient, email: &str) -> Result<Resource<Self>, ResourceError> {
        let params = HashMap::from([("email".to_string(), email.to_string())]);
        Self::fetch(client, ResourceOperation::Search, params).await
    }

    async fn fetch(
        client: &RestClient,
        operation: ResourceOperation,
        params: HashMap<String, String>,
    ) -> Result<Resource<Self>, ResourceError> {
        let mut page = RequestService::<Self>::for_operation(client, operation)?
            .all(&params)
            .await?;

        tracing::debug!(
            operation = operation.as_str(),
            entries = page.entries.len(),
            has_more = page.has_more,
            "Fetched customer page"
        );

        page.data_mut().origin = Some(ListOrigin { operation, params });
        Ok(page)
    }

    /// Returns the first customer on this page.
    #[must_use]
    pub fn first(&self) -> Option<&Customer> {
        self.entries.first()
    }

    /// Returns the number of customers on this page.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if this page has no customers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over the customers on this page.
    pub fn iter(&self) -> std::slice::Iter<'_, Customer> {
        self.entries.iter()
    }

    /// Returns the request parameters for the following page, or `None` on
    /// the last page.
    fn next_page_params(&self) -> Option<(ResourceOperation, HashMap<String, String>)> {
        let (operation, mut params) = self.origin.as_ref().map_or_else(
            || (ResourceOperation::All, HashMap::new()),
            |origin| (origin.operation, origin.params.clone()),
        );

        match (&self.cursor, self.current_page, self.total_pages) {
            (Some(cursor), _, _) if self.has_more && !cursor.is_empty() => {
                params.insert("cursor".to_string(), cursor.clone());
            }
            (_, Some(current), Some(total)) if current < total => {
                params.remove("cursor");
                params.insert("page".to_string(), (current + 1).to_string());
            }
            _ => return None,
        }

        Some((operation, params))
    }
}

impl<'a> IntoIterator for &'a Customers {
    type Item = &'a Customer;
    type IntoIter = std::slice::Iter<'a, Customer>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl Resource<Customers> {
    /// Fetches the page after this one with the same filters.
    ///
    /// Returns `Ok(None)` on the last page.
    ///
    /// # Errors
    ///
    /// Same as [`Customers::all`].
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let mut page = Customers::all(&client, &CustomerListParams::default()).await?;
    /// loop {
    ///     for customer in page.iter() {
    ///         println!("{:?}", customer.uuid);
    ///     }
    ///     match page.next_page().await? {
    ///         Some(next) => page = next,
    ///         None => break,
    ///     }
    /// }
    /// ```
    pub async fn next_page(&self) -> Result<Option<Self>, ResourceError> {
        match self.next_page_params() {
            Some((operation, params)) => Customers::fetch(self.client(), operation, params)
                .await
                .map(Some),
            None => Ok(None),
        }
    }

    /// Binds every customer on this page to this page's client.
    #[must_use]
    pub fn into_resources(self) -> Vec<Resource<Customer>> {
        let client = self.client().clone();
        self.into_inner()
            .entries
            .into_iter()
            .map(|customer| Resource::new(customer, client.clone()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rest::get_path;
    use serde_json::json;

    fn page(value: serde_json::Value) -> Customers {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_customers_deserialization() {
        let customers = page(json!({
            "entries": [
                {"uuid": "cus_1", "external_id": "ext_1"},
                {"uuid": "cus_2", "external_id": "ext_2"}
            ],
            "has_more": true,
            "cursor": "MjAyMy0wMy0xMFQxMjo0MjozMC4wMDBa"
        }));

        assert_eq!(customers.len(), 2);
        assert!(!customers.is_empty());
        assert_eq!(customers.first().unwrap().uuid.as_deref(), Some("cus_1"));
        assert!(customers.has_more);
        assert_eq!(
            customers.iter().filter_map(|c| c.external_id.as_deref()).collect::<Vec<_>>(),
            vec!["ext_1", "ext_2"]
        );
    }

    #[test]
    fn test_empty_listing() {
        let customers = page(json!({"entries": [], "has_more": false}));
        assert!(customers.is_empty());
        assert!(customers.first().is_none());
        assert!(customers.next_page_params().is_none());
    }

    #[test]
    fn test_next_page_params_follow_cursor_and_keep_filters() {
        let mut customers = page(json!({"entries": [], "has_more": true, "cursor": "c2"}));
        customers.origin = Some(ListOrigin {
            operation: ResourceOperation::All,
            params: HashMap::from([
                ("status".to_string(), "Active".to_string()),
                ("cursor".to_string(), "c1".to_string()),
            ]),
        });

        let (operation, params) = customers.next_page_params().unwrap();

        assert_eq!(operation, ResourceOperation::All);
        assert_eq!(params["status"], "Active");
        assert_eq!(params["cursor"], "c2");
    }

    #[test]
    fn test_next_page_params_stop_when_no_more() {
        let customers = page(json!({"entries": [], "has_more": false, "cursor": "c2"}));
        assert!(customers.next_page_params().is_none());
    }

    #[test]
    fn test_next_page_params_support_page_numbers() {
        let mut customers = page(json!({"entries": [], "current_page": 1, "total_pages": 3}));
        customers.origin = Some(ListOrigin {
            operation: ResourceOperation::Search,
            params: HashMap::from([("email".to_string(), "bob@example.com".to_string())]),
        });

        let (operation, params) = customers.next_page_params().unwrap();

        assert_eq!(operation, ResourceOperation::Search);
        assert_eq!(params["page"], "2");
        assert_eq!(params["email"], "bob@example.com");

        let last = page(json!({"entries": [], "current_page": 3, "total_pages": 3}));
        assert!(last.next_page_params().is_none());
    }

    #[test]
    fn test_list_params_serialize_only_set_filters() {
        let params = CustomerListParams {
            external_id: Some("ext_1".to_string()),
            per_page: Some(20),
            ..Default::default()
        };

        let query = serialize_to_query(&params).unwrap();

        assert_eq!(query.len(), 2);
        assert_eq!(query["external_id"], "ext_1");
        assert_eq!(query["per_page"], "20");
    }

    #[test]
    fn test_customers_paths() {
        assert_eq!(
            get_path(Customers::PATHS, ResourceOperation::All).unwrap().template,
            "/v1/customers"
        );
        assert_eq!(
            get_path(Customers::PATHS, ResourceOperation::Search).unwrap().template,
            "/v1/customers/search"
        );
    }
}
