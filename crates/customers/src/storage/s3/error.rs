//! S3 error mapping.
//!
//! Maps AWS SDK errors to `ImageStoreError` from `customers_core::storage`.

use std::fmt::Debug;

use aws_sdk_s3::error::{DisplayErrorContext, SdkError};
use aws_sdk_s3::operation::delete_object::DeleteObjectError;
use aws_sdk_s3::operation::get_object::GetObjectError;
use aws_sdk_s3::operation::put_object::PutObjectError;
use customers_core::storage::ImageStoreError;

fn is_transport_failure<E, R>(err: &SdkError<E, R>) -> bool {
    matches!(
        err,
        SdkError::ConstructionFailure(_) | SdkError::DispatchFailure(_) | SdkError::TimeoutError(_)
    )
}

fn map_transport_error<E, R>(err: &SdkError<E, R>) -> Option<ImageStoreError>
where
    E: std::error::Error + 'static,
    R: Debug,
{
    is_transport_failure(err)
        .then(|| ImageStoreError::ConnectionFailed(DisplayErrorContext(err).to_string()))
}

/// Map a service error of any S3 operation to ImageStoreError.
pub fn map_service_error<E: std::error::Error>(operation: &str, err: E) -> ImageStoreError {
    ImageStoreError::Backend(format!("{} failed: {}", operation, DisplayErrorContext(&err)))
}

/// True when a GetObject failure only means there is no object at the key.
pub fn is_missing_object(err: &GetObjectError) -> bool {
    err.is_no_such_key()
}

/// Map a PutObject SDK error to ImageStoreError.
pub fn map_put_object_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<PutObjectError, R>,
) -> ImageStoreError {
    if let Some(transport) = map_transport_error(&err) {
        return transport;
    }
    map_service_error("PutObject", err.into_service_error())
}

/// Map a GetObject SDK error to ImageStoreError.
///
/// Callers check [`is_missing_object`] first; a missing object is not an error.
pub fn map_get_object_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<GetObjectError, R>,
) -> ImageStoreError {
    if let Some(transport) = map_transport_error(&err) {
        return transport;
    }
    map_service_error("GetObject", err.into_service_error())
}

/// Map a DeleteObject SDK error to ImageStoreError.
pub fn map_delete_object_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<DeleteObjectError, R>,
) -> ImageStoreError {
    if let Some(transport) = map_transport_error(&err) {
        return transport;
    }
    map_service_error("DeleteObject", err.into_service_error())
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_sdk_s3::types::error::{InvalidObjectState, NoSuchKey};

    #[test]
    fn test_no_such_key_is_missing_object() {
        let err = GetObjectError::NoSuchKey(NoSuchKey::builder().build());
        assert!(is_missing_object(&err));
    }

    #[test]
    fn test_other_get_errors_are_not_missing_objects() {
        let err = GetObjectError::InvalidObjectState(InvalidObjectState::builder().build());
        assert!(!is_missing_object(&err));
    }

    #[test]
    fn test_service_error_names_operation() {
        let err = GetObjectError::InvalidObjectState(InvalidObjectState::builder().build());
        match map_service_error("GetObject", err) {
            ImageStoreError::Backend(message) => assert!(message.starts_with("GetObject failed")),
            other => panic!("expected Backend error, got {:?}", other),
        }
    }

    #[test]
    fn test_get_object_service_error_is_backend_error() {
        let err: SdkError<GetObjectError, ()> = SdkError::service_error(
            GetObjectError::InvalidObjectState(InvalidObjectState::builder().build()),
            (),
        );

        match map_get_object_error(err) {
            ImageStoreError::Backend(message) => assert!(message.starts_with("GetObject failed")),
            other => panic!("expected Backend error, got {:?}", other),
        }
    }

    #[test]
    fn test_transport_failure_is_connection_error() {
        let err: SdkError<PutObjectError, ()> = SdkError::timeout_error("timed out");
        assert!(matches!(
            map_put_object_error(err),
            ImageStoreError::ConnectionFailed(_)
        ));
    }
}
