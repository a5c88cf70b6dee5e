//! Error types for S3 operations.

use thiserror::Error;

/// Result type alias for s3 module.
pub type Result<T> = std::result::Result<T, S3Error>;

/// Errors that can occur during S3 operations.
#[derive(Error, Debug)]
pub enum S3Error {
    #[error("AWS SDK error: {0}")]
    AwsSdk(String),

    #[error("Operation cancelled by user")]
    UserCancelled,

    #[error("Prompt failed: {0}")]
    Prompt(#[from] dialoguer::Error),
}
