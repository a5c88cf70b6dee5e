//! AWS SDK client setup (Imperative Shell).

use aws_sdk_dynamodb::types::{IndexStatus, KeySchemaElement, KeyType};
use aws_sdk_dynamodb::Client;

use crate::aws::AwsTarget;

use super::error::{DynamodbError, Result};
use super::planning::{GsiState, GsiStatus, TableState, TableStatus};

/// Creates a DynamoDB client for the given target.
pub async fn create_client(target: &AwsTarget) -> Client {
    Client::new(&target.load().await)
}

fn key_name(schema: &[KeySchemaElement], key_type: KeyType) -> Option<String> {
    schema
        .iter()
        .find(|k| *k.key_type() == key_type)
        .map(|k| k.attribute_name().to_string())
}

fn gsi_status(status: Option<&IndexStatus>) -> GsiStatus {
    match status {
        Some(IndexStatus::Creating) => GsiStatus::Creating,
        Some(IndexStatus::Updating) => GsiStatus::Updating,
        Some(IndexStatus::Deleting) => GsiStatus::Deleting,
        _ => GsiStatus::Active,
    }
}

fn table_status(status: Option<&aws_sdk_dynamodb::types::TableStatus>) -> TableStatus {
    use aws_sdk_dynamodb::types::TableStatus as Sdk;
    match status {
        Some(Sdk::Creating) => TableStatus::Creating,
        Some(Sdk::Updating) => TableStatus::Updating,
        Some(Sdk::Deleting) => TableStatus::Deleting,
        _ => TableStatus::Active,
    }
}

/// Fetches current table state, returns None if table doesn't exist.
pub async fn get_table_state(client: &Client, table_name: &str) -> Result<Option<TableState>> {
    let response = match client.describe_table().table_name(table_name).send().await {
        Ok(response) => response,
        Err(err)
            if err
                .as_service_error()
                .is_some_and(|e| e.is_resource_not_found_exception()) =>
        {
            return Ok(None);
        }
        Err(err) => {
            return Err(DynamodbError::AwsSdk(
                aws_sdk_dynamodb::error::DisplayErrorContext(&err).to_string(),
            ))
        }
    };

    let table = response.table().ok_or_else(|| {
        DynamodbError::AwsSdk(format!("DescribeTable returned no table for '{}'", table_name))
    })?;

    let gsis = table
        .global_secondary_indexes()
        .iter()
        .map(|gsi| GsiState {
            name: gsi.index_name().unwrap_or_default().to_string(),
            status: gsi_status(gsi.index_status()),
            partition_key: key_name(gsi.key_schema(), KeyType::Hash),
            sort_key: key_name(gsi.key_schema(), KeyType::Range),
        })
        .collect();

    Ok(Some(TableState {
        status: table_status(table.table_status()),
        partition_key: key_name(table.key_schema(), KeyType::Hash),
        sort_key: key_name(table.key_schema(), KeyType::Range),
        gsis,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(name: &str, key_type: KeyType) -> KeySchemaElement {
        KeySchemaElement::builder()
            .attribute_name(name)
            .key_type(key_type)
            .build()
            .unwrap()
    }

    #[test]
    fn test_key_name() {
        let schema = vec![key("pk", KeyType::Hash), key("sk", KeyType::Range)];

        assert_eq!(key_name(&schema, KeyType::Hash).as_deref(), Some("pk"));
        assert_eq!(key_name(&schema, KeyType::Range).as_deref(), Some("sk"));
        assert_eq!(key_name(&schema[..1], KeyType::Range), None);
    }

    #[test]
    fn test_unknown_status_counts_as_active() {
        assert_eq!(gsi_status(None), GsiStatus::Active);
        assert_eq!(table_status(None), TableStatus::Active);
        assert_eq!(
            gsi_status(Some(&IndexStatus::Creating)),
            GsiStatus::Creating
        );
    }
}
