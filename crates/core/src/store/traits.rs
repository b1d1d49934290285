use std::pin::Pin;

use async_trait::async_trait;
use tokio_stream::Stream;

use super::{AttrValue, Item, Result, ScanFilter};

/// A lazily evaluated sequence of scanned rows.
///
/// Nothing is requested from the store until the stream is first polled.
pub type ItemStream = Pin<Box<dyn Stream<Item = Result<Item>> + Send>>;

/// A key-value table addressable by a single partition key.
///
/// Implementations are bound to one table at construction time.
#[async_trait]
pub trait DataStore: Send + Sync {
    /// Gets the rows whose partition key equals `key`, projected to `projection`.
    ///
    /// This has filter-scan semantics: implementations may read the whole
    /// table and keep only the matching rows.
    async fn get_by_key(&self, key: &str, projection: &[&str]) -> Result<Vec<Item>>;

    /// Sets a single attribute on the row identified by `key`.
    ///
    /// Every other attribute is left untouched.
    async fn update_field(&self, key: &str, field: &str, value: AttrValue) -> Result<()>;

    /// Writes a full row, creating it or replacing the existing one.
    async fn upsert(&self, item: Item) -> Result<()>;

    /// Scans every row, projected to `projection`. Single page only.
    fn scan_all(&self, projection: &[&str]) -> ItemStream;

    /// Scans the rows matching `filter`, projected to `projection`. Single page only.
    fn scan_filtered(&self, filter: &ScanFilter, projection: &[&str]) -> ItemStream;
}
