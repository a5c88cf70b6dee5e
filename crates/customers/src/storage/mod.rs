//! Storage backend implementations.
//!
//! This module provides concrete implementations of the ports defined in
//! `customers_core::storage`. Backends are selected at compile time via
//! feature flags.
//!
//! # Feature Flags
//!
//! - `dynamodb` (default): customer records in DynamoDB using `aws-sdk-dynamodb`
//! - `s3` (default): customer images in S3 using `aws-sdk-s3`
//! - `inmemory` (default): in-process implementations of both ports
//!
//! # Examples
//!
//! Build with only the in-memory backend:
//! ```bash
//! cargo build -p customers --no-default-features --features inmemory
//! ```

#[cfg(feature = "dynamodb")]
pub mod dynamodb;

#[cfg(feature = "s3")]
pub mod s3;

#[cfg(feature = "inmemory")]
pub mod inmemory;

#[cfg(feature = "dynamodb")]
pub use dynamodb::DynamoDbCustomerRepository;

#[cfg(feature = "s3")]
pub use s3::S3ImageStore;

#[cfg(feature = "inmemory")]
pub use inmemory::{InMemoryCustomerRepository, InMemoryImageStore};
