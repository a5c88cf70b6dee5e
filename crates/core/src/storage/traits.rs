use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::customer::Customer;

use super::{ImageResult, ImageUpload, RepositoryError, Result, StoredImage, UploadReceipt};

/// Repository for customer records.
#[async_trait]
pub trait CustomerRepository: Send + Sync {
    /// Stores a customer, replacing any record with the same id.
    ///
    /// The stored copy carries a fresh `updated_at`, which is returned.
    async fn create(&self, customer: &Customer) -> Result<Customer>;

    /// Gets a customer by id.
    async fn get(&self, id: Uuid) -> Result<Option<Customer>>;

    /// Gets a customer by email. If several share the address, any one of them is returned.
    async fn get_by_email(&self, email: &str) -> Result<Option<Customer>>;

    /// Listing customers is not supported; always fails with `Unsupported`.
    async fn get_all(&self) -> Result<Vec<Customer>> {
        Err(RepositoryError::Unsupported {
            operation: "get_all",
        })
    }

    /// Replaces a customer, but only if the stored record was last written
    /// strictly before `request_started_at`.
    ///
    /// Fails with `ConcurrencyConflict` otherwise, including when no record exists.
    async fn update(
        &self,
        customer: &Customer,
        request_started_at: DateTime<Utc>,
    ) -> Result<Customer>;

    /// Deletes a customer by id. Deleting an unknown id succeeds.
    async fn delete(&self, id: Uuid) -> Result<()>;
}

/// Object storage for customer images, one image per customer.
#[async_trait]
pub trait CustomerImageStore: Send + Sync {
    /// Stores an image for the customer, replacing any previous one.
    async fn upload(&self, customer_id: Uuid, image: ImageUpload) -> ImageResult<UploadReceipt>;

    /// Reads back the customer's image, `None` if there is none.
    async fn fetch(&self, customer_id: Uuid) -> ImageResult<Option<StoredImage>>;

    /// Deletes the customer's image. Deleting a missing image succeeds.
    async fn delete(&self, customer_id: Uuid) -> ImageResult<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NoopRepository;

    #[async_trait]
    impl CustomerRepository for NoopRepository {
        async fn create(&self, customer: &Customer) -> Result<Customer> {
            Ok(customer.clone())
        }

        async fn get(&self, _id: Uuid) -> Result<Option<Customer>> {
            Ok(None)
        }

        async fn get_by_email(&self, _email: &str) -> Result<Option<Customer>> {
            Ok(None)
        }

        async fn update(
            &self,
            customer: &Customer,
            _request_started_at: DateTime<Utc>,
        ) -> Result<Customer> {
            Ok(customer.clone())
        }

        async fn delete(&self, _id: Uuid) -> Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_get_all_is_unsupported_by_default() {
        let result = NoopRepository.get_all().await;
        assert_eq!(
            result,
            Err(RepositoryError::Unsupported {
                operation: "get_all"
            })
        );
    }
}
