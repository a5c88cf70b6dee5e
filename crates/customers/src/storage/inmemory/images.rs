//! In-memory image store implementation.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use customers_core::storage::{
    image_key, CustomerImageStore, ImageResult, ImageUpload, StoredImage, UploadReceipt,
};

#[derive(Debug, Clone)]
struct StoredObject {
    content_type: String,
    original_name: String,
    extension: String,
    body: Vec<u8>,
}

/// In-memory customer image store, keyed the same way as the S3 bucket.
///
/// Uploads are not versioned, so receipts carry no version id.
#[derive(Debug, Clone, Default)]
pub struct InMemoryImageStore {
    objects: Arc<RwLock<HashMap<String, StoredObject>>>,
}

impl InMemoryImageStore {
    /// Creates a new empty in-memory image store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Keys of all stored objects, sorted.
    pub async fn keys(&self) -> Vec<String> {
        let objects = self.objects.read().await;
        let mut keys: Vec<String> = objects.keys().cloned().collect();
        keys.sort();
        keys
    }
}

#[async_trait]
impl CustomerImageStore for InMemoryImageStore {
    async fn upload(&self, customer_id: Uuid, image: ImageUpload) -> ImageResult<UploadReceipt> {
        let key = image_key(customer_id);
        let object = StoredObject {
            extension: image.extension(),
            content_type: image.content_type,
            original_name: image.file_name,
            body: image.body,
        };

        let mut objects = self.objects.write().await;
        objects.insert(key.clone(), object);
        Ok(UploadReceipt {
            key,
            e_tag: None,
            version_id: None,
        })
    }

    async fn fetch(&self, customer_id: Uuid) -> ImageResult<Option<StoredImage>> {
        let objects = self.objects.read().await;
        Ok(objects.get(&image_key(customer_id)).map(|object| StoredImage {
            customer_id,
            content_type: Some(object.content_type.clone()),
            original_name: Some(object.original_name.clone()),
            extension: Some(object.extension.clone()),
            body: object.body.clone(),
        }))
    }

    async fn delete(&self, customer_id: Uuid) -> ImageResult<()> {
        let mut objects = self.objects.write().await;
        objects.remove(&image_key(customer_id));
        Ok(())
    }
}
