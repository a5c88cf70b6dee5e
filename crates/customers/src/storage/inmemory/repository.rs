//! In-memory customer repository implementation.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use tokio::sync::RwLock;
use uuid::Uuid;

use customers_core::customer::Customer;
use customers_core::storage::{CustomerRepository, RepositoryError, Result};
use customers_core::timestamp;

/// In-memory customer repository.
///
/// Records are kept as the same JSON documents the DynamoDB backend writes, so
/// reads go through the same deserialization rules. Data is lost when the last
/// clone of the repository is dropped.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCustomerRepository {
    documents: Arc<RwLock<HashMap<Uuid, Value>>>,
}

impl InMemoryCustomerRepository {
    /// Creates a new empty in-memory repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored customers.
    pub async fn len(&self) -> usize {
        self.documents.read().await.len()
    }

    /// True when no customer is stored.
    pub async fn is_empty(&self) -> bool {
        self.documents.read().await.is_empty()
    }

    /// Stores a raw document under `id`, bypassing serialization.
    ///
    /// Lets tests seed records the way another writer could have left them.
    pub async fn insert_document(&self, id: Uuid, document: Value) {
        self.documents.write().await.insert(id, document);
    }
}

fn to_document(customer: &Customer) -> Result<Value> {
    serde_json::to_value(customer).map_err(|e| RepositoryError::Serialization(e.to_string()))
}

fn from_document(document: &Value) -> Result<Customer> {
    serde_json::from_value(document.clone())
        .map_err(|e| RepositoryError::InvalidData(format!("Invalid customer document: {}", e)))
}

fn stored_updated_at(document: &Value) -> Option<&str> {
    document.get(Customer::UPDATED_AT_ATTRIBUTE)?.as_str()
}

#[async_trait]
impl CustomerRepository for InMemoryCustomerRepository {
    #[tracing::instrument(skip(self, customer), fields(customer_id = %customer.id))]
    async fn create(&self, customer: &Customer) -> Result<Customer> {
        let stored = customer.stamped(Utc::now());
        let document = to_document(&stored)?;

        self.documents.write().await.insert(stored.id, document);
        Ok(stored)
    }

    #[tracing::instrument(skip(self))]
    async fn get(&self, id: Uuid) -> Result<Option<Customer>> {
        let documents = self.documents.read().await;
        documents.get(&id).map(from_document).transpose()
    }

    #[tracing::instrument(skip(self, email))]
    async fn get_by_email(&self, email: &str) -> Result<Option<Customer>> {
        let documents = self.documents.read().await;
        documents
            .values()
            .find(|doc| doc.get(Customer::EMAIL_ATTRIBUTE).and_then(Value::as_str) == Some(email))
            .map(from_document)
            .transpose()
    }

    #[tracing::instrument(
        skip(self, customer, request_started_at),
        fields(customer_id = %customer.id, request_started_at = %request_started_at)
    )]
    async fn update(
        &self,
        customer: &Customer,
        request_started_at: DateTime<Utc>,
    ) -> Result<Customer> {
        let request_started = timestamp::format(&request_started_at);
        let mut documents = self.documents.write().await;

        // Same predicate as the conditional write: a record without the
        // attribute, or no record at all, never passes.
        let unchanged = documents
            .get(&customer.id)
            .and_then(stored_updated_at)
            .is_some_and(|updated_at| updated_at < request_started.as_str());
        if !unchanged {
            tracing::warn!("Customer changed after the request started, update rejected");
            return Err(RepositoryError::ConcurrencyConflict { id: customer.id });
        }

        let stored = customer.stamped(Utc::now());
        documents.insert(stored.id, to_document(&stored)?);
        Ok(stored)
    }

    #[tracing::instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> Result<()> {
        self.documents.write().await.remove(&id);
        Ok(())
    }
}
