//! Table configuration types (Functional Core - pure data).

use customers::storage::dynamodb::{EMAIL_INDEX_NAME, PARTITION_KEY, SORT_KEY};
use customers_core::customer::Customer;

/// Table schema configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableConfig {
    pub table_name: String,
    pub partition_key: KeyAttribute,
    pub sort_key: Option<KeyAttribute>,
    pub gsis: Vec<GsiConfig>,
}

/// A string-typed key attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyAttribute {
    pub name: String,
}

impl KeyAttribute {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
        }
    }
}

/// Global Secondary Index configuration. Projections are always ALL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GsiConfig {
    pub name: String,
    pub partition_key: KeyAttribute,
    pub sort_key: Option<KeyAttribute>,
}

impl TableConfig {
    /// Sets the table name.
    pub fn with_table_name(mut self, name: &str) -> Self {
        self.table_name = name.to_string();
        self
    }

    /// Every key attribute of the table and its indexes, without duplicates.
    pub fn key_attributes(&self) -> Vec<&KeyAttribute> {
        let mut attributes: Vec<&KeyAttribute> = Vec::new();
        let candidates = std::iter::once(&self.partition_key)
            .chain(self.sort_key.as_ref())
            .chain(self.gsis.iter().flat_map(|gsi| gsi.key_attributes()));

        for attribute in candidates {
            if !attributes.iter().any(|a| a.name == attribute.name) {
                attributes.push(attribute);
            }
        }
        attributes
    }
}

impl GsiConfig {
    pub fn key_attributes(&self) -> impl Iterator<Item = &KeyAttribute> {
        std::iter::once(&self.partition_key).chain(self.sort_key.as_ref())
    }
}

/// Returns the canonical table configuration for customer records.
///
/// Items are keyed by `pk`/`sk` (both the customer id) and looked up by
/// email through `Email-id-index`.
pub fn customers_table_config() -> TableConfig {
    TableConfig {
        table_name: "customers".to_string(),
        partition_key: KeyAttribute::new(PARTITION_KEY),
        sort_key: Some(KeyAttribute::new(SORT_KEY)),
        gsis: vec![GsiConfig {
            name: EMAIL_INDEX_NAME.to_string(),
            partition_key: KeyAttribute::new(Customer::EMAIL_ATTRIBUTE),
            sort_key: Some(KeyAttribute::new(Customer::ID_ATTRIBUTE)),
        }],
    }
}
