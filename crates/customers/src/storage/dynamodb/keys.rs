//! DynamoDB key generation functions.
//!
//! A customer item is addressed by a partition key and a sort key that are
//! both the string form of the customer id.

use uuid::Uuid;

/// Partition key attribute name.
pub const PARTITION_KEY: &str = "pk";

/// Sort key attribute name.
pub const SORT_KEY: &str = "sk";

/// Default name of the secondary index over `Email`.
pub const EMAIL_INDEX_NAME: &str = "Email-id-index";

/// Generate the partition key for a customer.
pub fn customer_pk(id: Uuid) -> String {
    id.to_string()
}

/// Generate the sort key for a customer (same as the partition key).
pub fn customer_sk(id: Uuid) -> String {
    id.to_string()
}
