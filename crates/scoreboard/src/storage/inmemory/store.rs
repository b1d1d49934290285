//! In-memory data store implementation.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use scoreboard_core::player::USER_ID_ATTR;
use scoreboard_core::store::{
    project, AttrValue, DataStore, Item, ItemStream, Result, ScanFilter, StoreError,
};

/// In-memory storage backend for testing.
///
/// Rows are keyed by their `UserId` string. Data is not persisted and will be
/// lost when the last clone of the store is dropped.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    rows: Arc<RwLock<BTreeMap<String, Item>>>,
}

impl InMemoryStore {
    /// Creates a new empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with `items`.
    pub async fn with_items(items: impl IntoIterator<Item = Item>) -> Result<Self> {
        let store = Self::new();
        for item in items {
            store.upsert(item).await?;
        }
        Ok(store)
    }

    /// Returns a copy of the stored row for `key`, if any.
    pub async fn get(&self, key: &str) -> Option<Item> {
        self.rows.read().await.get(key).cloned()
    }

    /// Number of stored rows.
    pub async fn len(&self) -> usize {
        self.rows.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.rows.read().await.is_empty()
    }

    /// Snapshot the rows matching `filter` on first poll, then yield them.
    fn scan_stream(&self, filter: Option<ScanFilter>, projection: &[&str]) -> ItemStream {
        let rows = Arc::clone(&self.rows);
        let projection: Vec<String> = projection.iter().map(|p| p.to_string()).collect();

        Box::pin(async_stream::stream! {
            let projection: Vec<&str> = projection.iter().map(String::as_str).collect();
            let snapshot: Vec<Item> = rows
                .read()
                .await
                .values()
                .filter(|item| filter.as_ref().is_none_or(|f| f.matches(item)))
                .map(|item| project(item, &projection))
                .collect();

            for item in snapshot {
                yield Ok(item);
            }
        })
    }
}

fn key_of(item: &Item) -> Result<String> {
    item.get(USER_ID_ATTR)
        .and_then(AttrValue::as_s)
        .map(str::to_string)
        .ok_or_else(|| StoreError::InvalidData(format!("Missing or invalid field: {USER_ID_ATTR}")))
}

#[async_trait]
impl DataStore for InMemoryStore {
    async fn get_by_key(&self, key: &str, projection: &[&str]) -> Result<Vec<Item>> {
        let filter = ScanFilter::equals(USER_ID_ATTR, AttrValue::S(key.to_string()));
        let rows = self.rows.read().await;
        Ok(rows
            .values()
            .filter(|item| filter.matches(item))
            .map(|item| project(item, projection))
            .collect())
    }

    async fn update_field(&self, key: &str, field: &str, value: AttrValue) -> Result<()> {
        if field == USER_ID_ATTR {
            return Err(StoreError::InvalidData(format!(
                "Cannot update key attribute {USER_ID_ATTR}"
            )));
        }
        let mut rows = self.rows.write().await;
        let row = rows.entry(key.to_string()).or_insert_with(|| {
            let mut item = Item::new();
            item.insert(USER_ID_ATTR.to_string(), AttrValue::S(key.to_string()));
            item
        });
        row.insert(field.to_string(), value);
        Ok(())
    }

    async fn upsert(&self, item: Item) -> Result<()> {
        let key = key_of(&item)?;
        self.rows.write().await.insert(key, item);
        Ok(())
    }

    fn scan_all(&self, projection: &[&str]) -> ItemStream {
        self.scan_stream(None, projection)
    }

    fn scan_filtered(&self, filter: &ScanFilter, projection: &[&str]) -> ItemStream {
        self.scan_stream(Some(filter.clone()), projection)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scoreboard_core::player::{PlayerRecord, HIGH_SCORE_ATTR, INITIALS_ATTR};
    use tokio_stream::StreamExt;

    async fn seeded_store() -> InMemoryStore {
        InMemoryStore::with_items([
            PlayerRecord::new("A").with_initials("AB").with_high_score(10).to_item(),
            PlayerRecord::new("B").with_initials("XY").with_high_score(0).to_item(),
            PlayerRecord::new("C").with_initials("QQ").with_high_score(3).to_item(),
        ])
        .await
        .unwrap()
    }

    async fn collect(mut stream: ItemStream) -> Vec<Item> {
        let mut items = Vec::new();
        while let Some(item) = stream.next().await {
            items.push(item.unwrap());
        }
        items
    }

    #[tokio::test]
    async fn test_get_by_key_projects_fields() {
        let store = seeded_store().await;

        let rows = store
            .get_by_key("A", &[INITIALS_ATTR, HIGH_SCORE_ATTR])
            .await
            .unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].len(), 2);
        assert_eq!(rows[0].get(INITIALS_ATTR), Some(&AttrValue::S("AB".into())));
        assert!(!rows[0].contains_key(USER_ID_ATTR));
    }

    #[tokio::test]
    async fn test_get_by_unknown_key_is_empty() {
        let store = seeded_store().await;

        assert!(store.get_by_key("nobody", &[]).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_field_touches_only_that_attribute() {
        let store = seeded_store().await;

        store
            .update_field("A", INITIALS_ATTR, AttrValue::S("CD".into()))
            .await
            .unwrap();

        let row = store.get("A").await.unwrap();
        assert_eq!(row.get(INITIALS_ATTR), Some(&AttrValue::S("CD".into())));
        assert_eq!(row.get(HIGH_SCORE_ATTR), Some(&AttrValue::number(10)));
    }

    #[tokio::test]
    async fn test_update_field_creates_missing_row() {
        let store = InMemoryStore::new();

        store
            .update_field("Z", HIGH_SCORE_ATTR, AttrValue::number(7))
            .await
            .unwrap();

        let row = store.get("Z").await.unwrap();
        assert_eq!(row.get(USER_ID_ATTR), Some(&AttrValue::S("Z".into())));
        assert_eq!(row.get(HIGH_SCORE_ATTR), Some(&AttrValue::number(7)));
        assert!(!row.contains_key(INITIALS_ATTR));
    }

    #[tokio::test]
    async fn test_update_key_attribute_is_rejected() {
        let store = seeded_store().await;

        let result = store
            .update_field("A", USER_ID_ATTR, AttrValue::S("B".into()))
            .await;

        assert!(matches!(result, Err(StoreError::InvalidData(_))));
    }

    #[tokio::test]
    async fn test_upsert_replaces_whole_row() {
        let store = seeded_store().await;
        let mut item = Item::new();
        item.insert(USER_ID_ATTR.to_string(), AttrValue::S("A".into()));
        item.insert(INITIALS_ATTR.to_string(), AttrValue::S("NEW".into()));

        store.upsert(item.clone()).await.unwrap();

        assert_eq!(store.get("A").await, Some(item));
        assert_eq!(store.len().await, 3);
    }

    #[tokio::test]
    async fn test_upsert_without_key_is_rejected() {
        let store = InMemoryStore::new();

        let result = store.upsert(Item::new()).await;

        assert!(matches!(result, Err(StoreError::InvalidData(_))));
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_scan_all_returns_every_row() {
        let store = seeded_store().await;

        let items = collect(store.scan_all(&[USER_ID_ATTR])).await;

        assert_eq!(items.len(), 3);
        assert!(items.iter().all(|item| item.len() == 1));
    }

    #[tokio::test]
    async fn test_scan_filtered_high_scores() {
        let store = seeded_store().await;
        let filter = ScanFilter::greater_than(HIGH_SCORE_ATTR, AttrValue::number(0));

        let items = collect(store.scan_filtered(&filter, &[])).await;
        let ids: Vec<&str> = items
            .iter()
            .filter_map(|item| item.get(USER_ID_ATTR).and_then(AttrValue::as_s))
            .collect();

        assert_eq!(ids, vec!["A", "C"]);
    }

    #[tokio::test]
    async fn test_scan_is_lazy() {
        let store = InMemoryStore::new();
        let stream = store.scan_all(&[]);

        store
            .upsert(PlayerRecord::new("late").to_item())
            .await
            .unwrap();

        assert_eq!(collect(stream).await.len(), 1);
    }
}
