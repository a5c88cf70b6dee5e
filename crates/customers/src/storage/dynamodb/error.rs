//! DynamoDB error mapping.
//!
//! Maps AWS SDK errors to `RepositoryError` from `customers_core::storage`.
//! Transport failures (request construction, dispatch, timeouts) become
//! `ConnectionFailed`; everything the service answered goes through the
//! per-operation mapping.

use std::fmt::Debug;

use aws_sdk_dynamodb::error::{DisplayErrorContext, SdkError};
use aws_sdk_dynamodb::operation::delete_item::DeleteItemError;
use aws_sdk_dynamodb::operation::get_item::GetItemError;
use aws_sdk_dynamodb::operation::put_item::PutItemError;
use aws_sdk_dynamodb::operation::query::QueryError;
use customers_core::storage::RepositoryError;
use uuid::Uuid;

fn is_transport_failure<E, R>(err: &SdkError<E, R>) -> bool {
    matches!(
        err,
        SdkError::ConstructionFailure(_) | SdkError::DispatchFailure(_) | SdkError::TimeoutError(_)
    )
}

/// Map a GetItem SDK error to RepositoryError.
pub fn map_get_item_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<GetItemError, R>,
) -> RepositoryError {
    if is_transport_failure(&err) {
        return map_connection_error(DisplayErrorContext(&err));
    }
    map_get_item_service_error(err.into_service_error())
}

/// Map a GetItem service error to RepositoryError.
pub fn map_get_item_service_error(err: GetItemError) -> RepositoryError {
    match err {
        GetItemError::ResourceNotFoundException(_) => {
            RepositoryError::QueryFailed("Table not found".to_string())
        }
        GetItemError::ProvisionedThroughputExceededException(_) => {
            RepositoryError::QueryFailed("Throughput exceeded, please retry".to_string())
        }
        GetItemError::RequestLimitExceeded(_) => {
            RepositoryError::QueryFailed("Request limit exceeded, please retry".to_string())
        }
        GetItemError::InternalServerError(_) => {
            RepositoryError::QueryFailed("DynamoDB internal server error".to_string())
        }
        err => RepositoryError::QueryFailed(format!("GetItem failed: {}", DisplayErrorContext(&err))),
    }
}

/// Map a Query SDK error to RepositoryError.
pub fn map_query_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<QueryError, R>,
) -> RepositoryError {
    if is_transport_failure(&err) {
        return map_connection_error(DisplayErrorContext(&err));
    }
    map_query_service_error(err.into_service_error())
}

/// Map a Query service error to RepositoryError.
pub fn map_query_service_error(err: QueryError) -> RepositoryError {
    match err {
        QueryError::ResourceNotFoundException(_) => {
            RepositoryError::QueryFailed("Table or index not found".to_string())
        }
        QueryError::ProvisionedThroughputExceededException(_) => {
            RepositoryError::QueryFailed("Throughput exceeded, please retry".to_string())
        }
        QueryError::RequestLimitExceeded(_) => {
            RepositoryError::QueryFailed("Request limit exceeded, please retry".to_string())
        }
        QueryError::InternalServerError(_) => {
            RepositoryError::QueryFailed("DynamoDB internal server error".to_string())
        }
        err => RepositoryError::QueryFailed(format!("Query failed: {}", DisplayErrorContext(&err))),
    }
}

/// Map a PutItem SDK error to RepositoryError.
///
/// A failed condition means the stored record was written after the caller's
/// request started (or does not exist), so it maps to `ConcurrencyConflict`.
pub fn map_put_item_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<PutItemError, R>,
    id: Uuid,
) -> RepositoryError {
    if is_transport_failure(&err) {
        return map_connection_error(DisplayErrorContext(&err));
    }
    map_put_item_service_error(err.into_service_error(), id)
}

/// Map a PutItem service error to RepositoryError.
pub fn map_put_item_service_error(err: PutItemError, id: Uuid) -> RepositoryError {
    match err {
        PutItemError::ConditionalCheckFailedException(_) => {
            RepositoryError::ConcurrencyConflict { id }
        }
        PutItemError::ResourceNotFoundException(_) => {
            RepositoryError::QueryFailed("Table not found".to_string())
        }
        PutItemError::ProvisionedThroughputExceededException(_) => {
            RepositoryError::QueryFailed("Throughput exceeded, please retry".to_string())
        }
        PutItemError::RequestLimitExceeded(_) => {
            RepositoryError::QueryFailed("Request limit exceeded, please retry".to_string())
        }
        PutItemError::ItemCollectionSizeLimitExceededException(_) => {
            RepositoryError::QueryFailed("Item collection size limit exceeded".to_string())
        }
        PutItemError::TransactionConflictException(_) => {
            RepositoryError::QueryFailed("Transaction conflict, please retry".to_string())
        }
        PutItemError::InternalServerError(_) => {
            RepositoryError::QueryFailed("DynamoDB internal server error".to_string())
        }
        err => RepositoryError::QueryFailed(format!("PutItem failed: {}", DisplayErrorContext(&err))),
    }
}

/// Map a DeleteItem SDK error to RepositoryError.
pub fn map_delete_item_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<DeleteItemError, R>,
) -> RepositoryError {
    if is_transport_failure(&err) {
        return map_connection_error(DisplayErrorContext(&err));
    }
    map_delete_item_service_error(err.into_service_error())
}

/// Map a DeleteItem service error to RepositoryError.
pub fn map_delete_item_service_error(err: DeleteItemError) -> RepositoryError {
    match err {
        DeleteItemError::ResourceNotFoundException(_) => {
            RepositoryError::QueryFailed("Table not found".to_string())
        }
        DeleteItemError::ProvisionedThroughputExceededException(_) => {
            RepositoryError::QueryFailed("Throughput exceeded, please retry".to_string())
        }
        DeleteItemError::RequestLimitExceeded(_) => {
            RepositoryError::QueryFailed("Request limit exceeded, please retry".to_string())
        }
        DeleteItemError::ItemCollectionSizeLimitExceededException(_) => {
            RepositoryError::QueryFailed("Item collection size limit exceeded".to_string())
        }
        DeleteItemError::TransactionConflictException(_) => {
            RepositoryError::QueryFailed("Transaction conflict, please retry".to_string())
        }
        DeleteItemError::InternalServerError(_) => {
            RepositoryError::QueryFailed("DynamoDB internal server error".to_string())
        }
        err => {
            RepositoryError::QueryFailed(format!("DeleteItem failed: {}", DisplayErrorContext(&err)))
        }
    }
}

/// Map a generic connection/config error to RepositoryError.
pub fn map_connection_error(err: impl std::fmt::Display) -> RepositoryError {
    RepositoryError::ConnectionFailed(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_sdk_dynamodb::types::error::{
        ConditionalCheckFailedException, ProvisionedThroughputExceededException,
        ResourceNotFoundException,
    };

    fn customer_id() -> Uuid {
        Uuid::parse_str("550e8400-e29b-41d4-a716-446655440001").unwrap()
    }

    #[test]
    fn test_conditional_check_failure_is_a_conflict() {
        let err = PutItemError::ConditionalCheckFailedException(
            ConditionalCheckFailedException::builder()
                .message("The conditional request failed")
                .build(),
        );

        assert_eq!(
            map_put_item_service_error(err, customer_id()),
            RepositoryError::ConcurrencyConflict { id: customer_id() }
        );
    }

    #[test]
    fn test_put_item_missing_table() {
        let err = PutItemError::ResourceNotFoundException(
            ResourceNotFoundException::builder().build(),
        );

        assert_eq!(
            map_put_item_service_error(err, customer_id()),
            RepositoryError::QueryFailed("Table not found".to_string())
        );
    }

    #[test]
    fn test_get_item_throughput_exceeded() {
        let err = GetItemError::ProvisionedThroughputExceededException(
            ProvisionedThroughputExceededException::builder().build(),
        );

        assert_eq!(
            map_get_item_service_error(err),
            RepositoryError::QueryFailed("Throughput exceeded, please retry".to_string())
        );
    }

    #[test]
    fn test_query_missing_index() {
        let err = QueryError::ResourceNotFoundException(ResourceNotFoundException::builder().build());

        assert_eq!(
            map_query_service_error(err),
            RepositoryError::QueryFailed("Table or index not found".to_string())
        );
    }

    #[test]
    fn test_delete_item_missing_table() {
        let err =
            DeleteItemError::ResourceNotFoundException(ResourceNotFoundException::builder().build());

        assert_eq!(
            map_delete_item_service_error(err),
            RepositoryError::QueryFailed("Table not found".to_string())
        );
    }

    #[test]
    fn test_transport_failure_is_connection_error() {
        let err: SdkError<PutItemError, ()> = SdkError::construction_failure("no region configured");

        assert!(matches!(
            map_put_item_error(err, customer_id()),
            RepositoryError::ConnectionFailed(_)
        ));
    }

    #[test]
    fn test_map_connection_error() {
        assert_eq!(
            map_connection_error("connection refused"),
            RepositoryError::ConnectionFailed("connection refused".to_string())
        );
    }
}
