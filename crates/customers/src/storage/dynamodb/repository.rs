//! DynamoDB repository implementation.
//!
//! Implements `CustomerRepository` from `customers_core::storage` using DynamoDB.

use async_trait::async_trait;
use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Client;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use customers_core::customer::Customer;
use customers_core::storage::{CustomerRepository, Result};
use customers_core::timestamp;

use crate::config::{load_aws_config, StorageConfig};

use super::conversions::{customer_key, customer_to_item, item_to_customer};
use super::error::{map_delete_item_error, map_get_item_error, map_put_item_error, map_query_error};
use super::keys::EMAIL_INDEX_NAME;

/// Rejects the write unless the stored record predates the caller's request.
const UPDATE_CONDITION: &str = "#updated_at < :request_started";

/// DynamoDB-based customer repository.
///
/// Holds no state besides the client; concurrent writers to the same customer
/// are arbitrated by DynamoDB's conditional writes.
#[derive(Debug, Clone)]
pub struct DynamoDbCustomerRepository {
    client: Client,
    table_name: String,
    email_index_name: String,
}

impl DynamoDbCustomerRepository {
    /// Creates a new repository with the given DynamoDB client and table name.
    pub fn new(client: Client, table_name: impl Into<String>) -> Self {
        Self {
            client,
            table_name: table_name.into(),
            email_index_name: EMAIL_INDEX_NAME.to_string(),
        }
    }

    /// Uses a different secondary index for email lookups.
    pub fn with_email_index(mut self, index_name: impl Into<String>) -> Self {
        self.email_index_name = index_name.into();
        self
    }

    /// Creates a new repository from environment configuration.
    ///
    /// Uses the AWS SDK default credential chain and [`StorageConfig::from_env`]
    /// for the table and index names.
    pub async fn from_env() -> Self {
        let sdk_config = load_aws_config().await;
        Self::from_config(Client::new(&sdk_config), &StorageConfig::from_env())
    }

    /// Creates a new repository from an explicit storage configuration.
    pub fn from_config(client: Client, config: &StorageConfig) -> Self {
        Self::new(client, &config.table_name).with_email_index(&config.email_index_name)
    }

    /// Get the table name.
    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    /// Get the email index name.
    pub fn email_index_name(&self) -> &str {
        &self.email_index_name
    }
}

#[async_trait]
impl CustomerRepository for DynamoDbCustomerRepository {
    #[tracing::instrument(skip(self, customer), fields(table = %self.table_name, customer_id = %customer.id))]
    async fn create(&self, customer: &Customer) -> Result<Customer> {
        let stored = customer.stamped(Utc::now());
        let item = customer_to_item(&stored)?;

        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(item))
            .send()
            .await
            .map_err(|e| map_put_item_error(e, stored.id))?;

        tracing::debug!(updated_at = %stored.updated_at, "Customer stored");
        Ok(stored)
    }

    #[tracing::instrument(skip(self), fields(table = %self.table_name))]
    async fn get(&self, id: Uuid) -> Result<Option<Customer>> {
        let result = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .set_key(Some(customer_key(id)))
            .send()
            .await
            .map_err(map_get_item_error)?;

        match result.item {
            Some(item) => Ok(Some(item_to_customer(&item)?)),
            None => {
                tracing::debug!("Customer not found");
                Ok(None)
            }
        }
    }

    #[tracing::instrument(skip(self, email), fields(table = %self.table_name, index = %self.email_index_name))]
    async fn get_by_email(&self, email: &str) -> Result<Option<Customer>> {
        let result = self
            .client
            .query()
            .table_name(&self.table_name)
            .index_name(&self.email_index_name)
            .key_condition_expression("#email = :email")
            .expression_attribute_names("#email", Customer::EMAIL_ATTRIBUTE)
            .expression_attribute_values(":email", AttributeValue::S(email.to_string()))
            .limit(1)
            .send()
            .await
            .map_err(map_query_error)?;

        let items = result.items.unwrap_or_default();
        match items.first() {
            Some(item) => Ok(Some(item_to_customer(item)?)),
            None => {
                tracing::debug!("No customer with this email");
                Ok(None)
            }
        }
    }

    #[tracing::instrument(
        skip(self, customer, request_started_at),
        fields(table = %self.table_name, customer_id = %customer.id, request_started_at = %request_started_at)
    )]
    async fn update(
        &self,
        customer: &Customer,
        request_started_at: DateTime<Utc>,
    ) -> Result<Customer> {
        let stored = customer.stamped(Utc::now());
        let item = customer_to_item(&stored)?;

        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(item))
            .condition_expression(UPDATE_CONDITION)
            .expression_attribute_names("#updated_at", Customer::UPDATED_AT_ATTRIBUTE)
            .expression_attribute_values(
                ":request_started",
                AttributeValue::S(timestamp::format(&request_started_at)),
            )
            .send()
            .await
            .map_err(|e| {
                let err = map_put_item_error(e, stored.id);
                if err.is_conflict() {
                    tracing::warn!("Customer changed after the request started, update rejected");
                }
                err
            })?;

        tracing::debug!(updated_at = %stored.updated_at, "Customer updated");
        Ok(stored)
    }

    #[tracing::instrument(skip(self), fields(table = %self.table_name))]
    async fn delete(&self, id: Uuid) -> Result<()> {
        self.client
            .delete_item()
            .table_name(&self.table_name)
            .set_key(Some(customer_key(id)))
            .send()
            .await
            .map_err(map_delete_item_error)?;

        tracing::debug!("Customer deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_sdk_dynamodb::config::{BehaviorVersion, Credentials, Region};
    use aws_smithy_runtime::client::http::test_util::{capture_request, CaptureRequestReceiver};
    use chrono::TimeZone;
    use serde_json::Value;

    fn offline_client() -> Client {
        let config = aws_sdk_dynamodb::Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new("us-east-1"))
            .build();
        Client::from_conf(config)
    }

    #[test]
    fn test_new_uses_default_email_index() {
        let repo = DynamoDbCustomerRepository::new(offline_client(), "customers");

        assert_eq!(repo.table_name(), "customers");
        assert_eq!(repo.email_index_name(), "Email-id-index");
    }

    #[test]
    fn test_from_config() {
        let config = StorageConfig {
            table_name: "customers-test".to_string(),
            email_index_name: "by-email".to_string(),
            ..StorageConfig::default()
        };
        let repo = DynamoDbCustomerRepository::from_config(offline_client(), &config);

        assert_eq!(repo.table_name(), "customers-test");
        assert_eq!(repo.email_index_name(), "by-email");
    }

    #[tokio::test]
    async fn test_get_all_is_unsupported_without_backend_call() {
        // No credentials or endpoint are configured; a backend call would fail
        // with a connection error instead.
        let repo = DynamoDbCustomerRepository::new(offline_client(), "customers");

        let result = repo.get_all().await;
        assert!(matches!(
            result,
            Err(customers_core::storage::RepositoryError::Unsupported { operation: "get_all" })
        ));
    }

    /// Repository whose client records the first request instead of sending it.
    fn capturing_repository() -> (DynamoDbCustomerRepository, CaptureRequestReceiver) {
        let (http_client, receiver) = capture_request(None);
        let config = aws_sdk_dynamodb::Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new("us-east-1"))
            .credentials_provider(Credentials::new("akid", "secret", None, None, "test"))
            .http_client(http_client)
            .build();
        let repo = DynamoDbCustomerRepository::new(Client::from_conf(config), "customers");
        (repo, receiver)
    }

    fn sent_body(receiver: CaptureRequestReceiver, target: &str) -> Value {
        let request = receiver.expect_request();
        assert_eq!(
            request.headers().get("x-amz-target"),
            Some(format!("DynamoDB_20120810.{}", target).as_str())
        );
        serde_json::from_slice(request.body().bytes().unwrap()).unwrap()
    }

    fn sample_customer() -> Customer {
        Customer::new("nick@example.com", "Nick Chapsas", "nickchapsas")
            .with_id(Uuid::parse_str("550e8400-e29b-41d4-a716-446655440001").unwrap())
    }

    #[tokio::test]
    async fn test_update_sends_conditional_put() {
        let (repo, receiver) = capturing_repository();
        let request_started_at = Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 1).unwrap();

        // The canned response is empty; only the outgoing request matters here.
        let _ = repo.update(&sample_customer(), request_started_at).await;

        let body = sent_body(receiver, "PutItem");
        assert_eq!(body["TableName"], "customers");
        assert_eq!(body["ConditionExpression"], "#updated_at < :request_started");
        assert_eq!(body["ExpressionAttributeNames"]["#updated_at"], "UpdatedAt");
        assert_eq!(
            body["ExpressionAttributeValues"][":request_started"]["S"],
            "2024-01-15T12:00:01.000000000Z"
        );
        assert_eq!(body["Item"]["pk"]["S"], "550e8400-e29b-41d4-a716-446655440001");
        assert_eq!(body["Item"]["Email"]["S"], "nick@example.com");
    }

    #[tokio::test]
    async fn test_create_sends_unconditional_put() {
        let (repo, receiver) = capturing_repository();

        let _ = repo.create(&sample_customer()).await;

        let body = sent_body(receiver, "PutItem");
        assert!(body.get("ConditionExpression").is_none());
        assert_eq!(body["Item"]["sk"]["S"], "550e8400-e29b-41d4-a716-446655440001");
    }

    #[tokio::test]
    async fn test_get_by_email_queries_email_index() {
        let (repo, receiver) = capturing_repository();

        let _ = repo.get_by_email("nick@example.com").await;

        let body = sent_body(receiver, "Query");
        assert_eq!(body["IndexName"], "Email-id-index");
        assert_eq!(body["KeyConditionExpression"], "#email = :email");
        assert_eq!(body["ExpressionAttributeNames"]["#email"], "Email");
        assert_eq!(body["ExpressionAttributeValues"][":email"]["S"], "nick@example.com");
        assert_eq!(body["Limit"], 1);
    }
}
