//! Record synchronization.
//!
//! `RecordSynchronizer::initialize` spawns a task that owns the current
//! player record and hands back a cloneable [`SyncHandle`]. Edits are sent to
//! the task as commands and answered through oneshot replies; browse
//! operations only read the store and run on the caller's task.

mod actor;
mod handle;

pub use actor::fetch_fields;
pub use handle::{BrowseQuery, RecordSynchronizer, SyncHandle};
