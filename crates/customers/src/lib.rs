//! Storage backends for the customers service.
//!
//! Implements the ports from `customers_core::storage`:
//!
//! - `dynamodb`: customer records in DynamoDB (`aws-sdk-dynamodb`)
//! - `s3`: customer images in S3 (`aws-sdk-s3`)
//! - `inmemory`: both ports over in-process maps, for tests and local development
//!
//! Each backend sits behind the cargo feature of the same name. The features
//! are additive; all three are enabled by default.

pub mod config;
pub mod storage;
pub mod telemetry;

pub use config::StorageConfig;
