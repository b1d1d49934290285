//! Keeps a player's record in sync with a DynamoDB table.
//!
//! The pure parts (record types, diffing, formatting, the store and display
//! traits) live in `scoreboard_core`. This crate holds the storage backends,
//! the record synchronizer task and the command-line front-end.

pub mod cli;
pub mod config;
pub mod display;
pub mod output;
pub mod storage;
pub mod sync;
