mod error;
mod traits;
mod types;

pub use error::{ImageResult, ImageStoreError, RepositoryError, Result};
pub use traits::{CustomerImageStore, CustomerRepository};
pub use types::{image_key, ImageUpload, StoredImage, UploadReceipt, IMAGE_KEY_PREFIX};
