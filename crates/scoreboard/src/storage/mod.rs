//! Storage backend implementations.
//!
//! This module provides concrete implementations of the `DataStore` trait
//! defined in `scoreboard_core::store`:
//!
//! - `dynamodb`: AWS DynamoDB backend using `aws-sdk-dynamodb`
//! - `inmemory`: `BTreeMap` backend for tests and local experiments

pub mod dynamodb;
pub mod inmemory;

pub use dynamodb::DynamoDbStore;
pub use inmemory::InMemoryStore;
