//! S3 image store implementation.
//!
//! Implements `CustomerImageStore` from `customers_core::storage` using S3.

use async_trait::async_trait;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client;
use uuid::Uuid;

use customers_core::storage::{
    image_key, CustomerImageStore, ImageResult, ImageStoreError, ImageUpload, StoredImage,
    UploadReceipt,
};

use crate::config::{load_aws_config, StorageConfig};

use super::error::{is_missing_object, map_delete_object_error, map_get_object_error, map_put_object_error};

/// User metadata entry holding the uploader's filename.
pub const ORIGINAL_NAME_METADATA: &str = "originalname";
/// User metadata entry holding the filename extension, leading dot included.
pub const EXTENSION_METADATA: &str = "extension";

/// S3-based customer image store.
#[derive(Debug, Clone)]
pub struct S3ImageStore {
    client: Client,
    bucket: String,
}

impl S3ImageStore {
    /// Creates a new store with the given S3 client and bucket name.
    pub fn new(client: Client, bucket: impl Into<String>) -> Self {
        Self {
            client,
            bucket: bucket.into(),
        }
    }

    /// Creates a new store from environment configuration.
    ///
    /// Uses the AWS SDK default credential chain and [`StorageConfig::from_env`]
    /// for the bucket name and addressing style.
    pub async fn from_env() -> Self {
        let sdk_config = load_aws_config().await;
        let config = StorageConfig::from_env();
        let s3_config = aws_sdk_s3::config::Builder::from(&sdk_config)
            .force_path_style(config.s3_force_path_style)
            .build();
        Self::from_config(Client::from_conf(s3_config), &config)
    }

    /// Creates a new store from an explicit storage configuration.
    pub fn from_config(client: Client, config: &StorageConfig) -> Self {
        Self::new(client, &config.images_bucket)
    }

    /// Get the bucket name.
    pub fn bucket(&self) -> &str {
        &self.bucket
    }
}

#[async_trait]
impl CustomerImageStore for S3ImageStore {
    #[tracing::instrument(
        skip(self, image),
        fields(bucket = %self.bucket, content_type = %image.content_type, size = image.body.len())
    )]
    async fn upload(&self, customer_id: Uuid, image: ImageUpload) -> ImageResult<UploadReceipt> {
        let key = image_key(customer_id);
        let extension = image.extension();

        let output = self
            .client
            .put_object()
            .bucket(&self.bucket)
            .key(&key)
            .content_type(image.content_type)
            .metadata(ORIGINAL_NAME_METADATA, image.file_name)
            .metadata(EXTENSION_METADATA, extension)
            .body(ByteStream::from(image.body))
            .send()
            .await
            .map_err(map_put_object_error)?;

        tracing::debug!(key = %key, "Image stored");
        Ok(UploadReceipt {
            key,
            e_tag: output.e_tag().map(str::to_string),
            version_id: output.version_id().map(str::to_string),
        })
    }

    #[tracing::instrument(skip(self), fields(bucket = %self.bucket))]
    async fn fetch(&self, customer_id: Uuid) -> ImageResult<Option<StoredImage>> {
        let result = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(image_key(customer_id))
            .send()
            .await;

        let output = match result {
            Ok(output) => output,
            Err(err) if err.as_service_error().is_some_and(is_missing_object) => {
                tracing::debug!("Image not found");
                return Ok(None);
            }
            Err(err) => return Err(map_get_object_error(err)),
        };

        let content_type = output.content_type().map(str::to_string);
        let metadata = output.metadata().cloned().unwrap_or_default();
        let body = output
            .body
            .collect()
            .await
            .map_err(|e| ImageStoreError::Body(e.to_string()))?
            .into_bytes()
            .to_vec();

        Ok(Some(StoredImage {
            customer_id,
            content_type,
            original_name: metadata.get(ORIGINAL_NAME_METADATA).cloned(),
            extension: metadata.get(EXTENSION_METADATA).cloned(),
            body,
        }))
    }

    #[tracing::instrument(skip(self), fields(bucket = %self.bucket))]
    async fn delete(&self, customer_id: Uuid) -> ImageResult<()> {
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(image_key(customer_id))
            .send()
            .await
            .map_err(map_delete_object_error)?;

        tracing::debug!("Image deleted");
        Ok(())
    }
}
