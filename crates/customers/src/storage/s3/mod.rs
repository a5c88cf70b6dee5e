//! S3 storage backend for customer images.
//!
//! One object per customer at `images/<customer_id>`, with the uploader's
//! filename and its extension kept as user metadata.

mod error;
mod store;

pub use store::{S3ImageStore, EXTENSION_METADATA, ORIGINAL_NAME_METADATA};
