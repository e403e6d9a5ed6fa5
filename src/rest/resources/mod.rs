//! ChartMogul REST resource implementations.
//!
//! # Customer Resource
//!
//! ```rust,ignore
//! use chartmogul::rest::resources::{Customer, CustomerListParams, MergeTarget};
//!
//! // Find a customer by external id
//! let customer = Customer::find_by_external_id(&client, "34916129").await?;
//!
//! // Search by email
//! let page = Customer::search(&client, "bob@examplecompany.com").await?;
//!
//! // Merge two customers
//! Customer::merge(
//!     &client,
//!     &MergeTarget::customer_uuid("cus_1"),
//!     &MergeTarget::customer_uuid("cus_2"),
//! )
//! .await?;
//! ```

mod customer;
mod customers;

pub use customer::{
    Customer, CustomerAddress, CustomerAttributes, CustomerUpdate, MergeTarget,
    NewCustomAttribute, NewCustomer, NewCustomerAttributes,
};
pub use customers::{CustomerListParams, Customers};
