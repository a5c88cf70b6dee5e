//! DynamoDB storage backend for customer records.
//!
//! Items live in a single table keyed by `pk`/`sk` (both the customer id) with
//! a secondary index on `Email` for lookups by address.

mod conversions;
mod error;
mod keys;
mod repository;

pub use conversions::{attribute_to_json, customer_to_item, item_to_customer, json_to_attribute};
pub use keys::{EMAIL_INDEX_NAME, PARTITION_KEY, SORT_KEY};
pub use repository::DynamoDbCustomerRepository;
