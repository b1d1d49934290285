//! DynamoDB storage backend implementation.
//!
//! This module provides a DynamoDB-based implementation of the `DataStore`
//! trait using `aws-sdk-dynamodb`. The table has a single string hash key,
//! `UserId`, and no secondary indexes.

mod conversions;
mod error;
mod expressions;
mod store;

pub use store::DynamoDbStore;
