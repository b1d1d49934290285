//! Display sink capability.
//!
//! The synchronizer reports progress through three one-way notifications.
//! How (and whether) they render is up to the implementation.

use serde::{Deserialize, Serialize};

/// Write-only target for user-facing text.
pub trait DisplaySink: Send + Sync {
    /// Clears whatever is currently shown.
    fn clear(&self);

    /// Appends a line of informational text.
    fn append(&self, text: &str);

    /// Shows an error description.
    fn error(&self, text: &str);
}

/// A single display notification, for sinks that forward or record them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "text", rename_all = "snake_case")]
pub enum DisplayEvent {
    Clear,
    Append(String),
    Error(String),
}
