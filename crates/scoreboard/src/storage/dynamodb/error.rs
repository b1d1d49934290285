//! DynamoDB error mapping.
//!
//! Maps AWS SDK errors to `StoreError` from `scoreboard_core::store`.

use std::fmt::Debug;

use aws_sdk_dynamodb::error::{DisplayErrorContext, SdkError};
use aws_sdk_dynamodb::operation::put_item::PutItemError;
use aws_sdk_dynamodb::operation::scan::ScanError;
use aws_sdk_dynamodb::operation::update_item::UpdateItemError;
use scoreboard_core::store::StoreError;

/// Transport-level failures never reached the service.
fn transport_error<E, R>(err: &SdkError<E, R>) -> Option<StoreError>
where
    E: std::error::Error + 'static,
    R: Debug,
{
    match err {
        SdkError::DispatchFailure(_) | SdkError::TimeoutError(_) => Some(
            StoreError::ConnectionFailed(DisplayErrorContext(err).to_string()),
        ),
        _ => None,
    }
}

/// Map a Scan SDK error to StoreError.
pub fn map_scan_error<R: Debug + Send + Sync + 'static>(err: SdkError<ScanError, R>) -> StoreError {
    if let Some(error) = transport_error(&err) {
        return error;
    }
    match err.into_service_error() {
        ScanError::ResourceNotFoundException(_) => {
            StoreError::QueryFailed("Table not found".to_string())
        }
        ScanError::ProvisionedThroughputExceededException(_) => {
            StoreError::QueryFailed("Throughput exceeded".to_string())
        }
        ScanError::RequestLimitExceeded(_) => {
            StoreError::QueryFailed("Request limit exceeded".to_string())
        }
        ScanError::InternalServerError(_) => {
            StoreError::QueryFailed("DynamoDB internal server error".to_string())
        }
        err => StoreError::QueryFailed(format!("Scan failed: {:?}", err)),
    }
}

/// Map an UpdateItem SDK error to StoreError.
pub fn map_update_item_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<UpdateItemError, R>,
) -> StoreError {
    if let Some(error) = transport_error(&err) {
        return error;
    }
    match err.into_service_error() {
        UpdateItemError::ResourceNotFoundException(_) => {
            StoreError::QueryFailed("Table not found".to_string())
        }
        UpdateItemError::ProvisionedThroughputExceededException(_) => {
            StoreError::QueryFailed("Throughput exceeded".to_string())
        }
        UpdateItemError::RequestLimitExceeded(_) => {
            StoreError::QueryFailed("Request limit exceeded".to_string())
        }
        UpdateItemError::ItemCollectionSizeLimitExceededException(_) => {
            StoreError::QueryFailed("Item collection size limit exceeded".to_string())
        }
        UpdateItemError::TransactionConflictException(_) => {
            StoreError::QueryFailed("Transaction conflict".to_string())
        }
        UpdateItemError::InternalServerError(_) => {
            StoreError::QueryFailed("DynamoDB internal server error".to_string())
        }
        err => StoreError::QueryFailed(format!("UpdateItem failed: {:?}", err)),
    }
}

/// Map a PutItem SDK error to StoreError.
pub fn map_put_item_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<PutItemError, R>,
) -> StoreError {
    if let Some(error) = transport_error(&err) {
        return error;
    }
    match err.into_service_error() {
        PutItemError::ResourceNotFoundException(_) => {
            StoreError::QueryFailed("Table not found".to_string())
        }
        PutItemError::ProvisionedThroughputExceededException(_) => {
            StoreError::QueryFailed("Throughput exceeded".to_string())
        }
        PutItemError::RequestLimitExceeded(_) => {
            StoreError::QueryFailed("Request limit exceeded".to_string())
        }
        PutItemError::ItemCollectionSizeLimitExceededException(_) => {
            StoreError::QueryFailed("Item collection size limit exceeded".to_string())
        }
        PutItemError::TransactionConflictException(_) => {
            StoreError::QueryFailed("Transaction conflict".to_string())
        }
        PutItemError::InternalServerError(_) => {
            StoreError::QueryFailed("DynamoDB internal server error".to_string())
        }
        err => StoreError::QueryFailed(format!("PutItem failed: {:?}", err)),
    }
}
