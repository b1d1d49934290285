//! In-memory storage backend for testing.
//!
//! This module provides an in-memory implementation of `DataStore` that keeps
//! rows in a `BTreeMap` wrapped in `Arc<RwLock<_>>`. This is useful for testing
//! and development scenarios where persistence is not required.
//!
//! # Example
//!
//! ```rust,ignore
//! use scoreboard::storage::inmemory::InMemoryStore;
//!
//! let store = InMemoryStore::new();
//! // Use store for testing...
//! ```

mod store;

pub use store::InMemoryStore;
