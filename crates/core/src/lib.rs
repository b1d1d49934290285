//! scoreboard_core - pure types and traits for the scoreboard project.
//!
//! Everything here is free of I/O: the player record and its diffing rules,
//! the `DataStore` and `DisplaySink` capabilities, and the error taxonomy.
//! Concrete stores and the synchronizer actor live in the `scoreboard` crate.

pub mod display;
pub mod error;
pub mod player;
pub mod store;

pub use error::{Result, SyncError};
