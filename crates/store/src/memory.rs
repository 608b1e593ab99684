//! In-memory collaborator implementations
//!
//! Process-local stand-ins for the remote record and object stores, used by
//! the demo binary and the test suite. Rows live in a `Vec` behind an async
//! lock so list order is stable (insertion order), matching how screens
//! display rows.

use crate::traits::{ObjectStore, RecordStore};
use async_trait::async_trait;
use shopdesk_core::{Identifiable, Record, StoreError, StoreResult};
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

// ============================================================================
// MemoryTable
// ============================================================================

/// In-memory `RecordStore` over one row type
#[derive(Debug, Default)]
pub struct MemoryTable<R: Record> {
    rows: RwLock<Vec<R>>,
}

impl<R: Record> MemoryTable<R> {
    /// Create an empty table
    pub fn new() -> Self {
        Self {
            rows: RwLock::new(Vec::new()),
        }
    }

    /// Create a table pre-populated with rows
    pub fn with_rows(rows: Vec<R>) -> Self {
        Self {
            rows: RwLock::new(rows),
        }
    }

    /// Number of rows currently stored
    pub async fn len(&self) -> usize {
        self.rows.read().await.len()
    }

    /// Check whether the table is empty
    pub async fn is_empty(&self) -> bool {
        self.rows.read().await.is_empty()
    }
}

#[async_trait]
impl<R: Record> RecordStore<R> for MemoryTable<R> {
    async fn list_all(&self) -> StoreResult<Vec<R>> {
        Ok(self.rows.read().await.clone())
    }

    async fn create(&self, insert: R::Insert) -> StoreResult<R> {
        let row = R::materialize(insert);
        let mut rows = self.rows.write().await;
        rows.push(row.clone());
        tracing::debug!("created {} {}", R::NOUN, row.id());
        Ok(row)
    }

    async fn update(&self, id: Uuid, patch: R::Patch) -> StoreResult<R> {
        let mut rows = self.rows.write().await;
        let row = rows
            .iter_mut()
            .find(|row| row.id() == id)
            .ok_or(StoreError::NotFound(id))?;
        row.apply_patch(patch);
        tracing::debug!("updated {} {}", R::NOUN, id);
        Ok(row.clone())
    }

    async fn delete(&self, id: Uuid) -> StoreResult<R> {
        let mut rows = self.rows.write().await;
        let index = rows
            .iter()
            .position(|row| row.id() == id)
            .ok_or(StoreError::NotFound(id))?;
        tracing::debug!("deleted {} {}", R::NOUN, id);
        Ok(rows.remove(index))
    }
}

// ============================================================================
// MemoryObjectStore
// ============================================================================

/// In-memory `ObjectStore` keyed by path
#[derive(Debug)]
pub struct MemoryObjectStore {
    base_url: String,
    objects: RwLock<HashMap<String, Vec<u8>>>,
}

impl MemoryObjectStore {
    /// Create an empty object store serving URLs under `base_url`
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            objects: RwLock::new(HashMap::new()),
        }
    }

    /// Check whether an object exists at `path`
    pub async fn contains(&self, path: &str) -> bool {
        self.objects.read().await.contains_key(path)
    }

    /// Number of stored objects
    pub async fn object_count(&self) -> usize {
        self.objects.read().await.len()
    }
}

impl Default for MemoryObjectStore {
    fn default() -> Self {
        Self::new("memory://bucket")
    }
}

#[async_trait]
impl ObjectStore for MemoryObjectStore {
    async fn upload(&self, key: &str, bytes: Vec<u8>) -> StoreResult<String> {
        let mut objects = self.objects.write().await;
        objects.insert(key.to_string(), bytes);
        Ok(key.to_string())
    }

    fn public_url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    async fn remove(&self, path: &str) -> StoreResult<()> {
        let mut objects = self.objects.write().await;
        objects
            .remove(path)
            .map(|_| ())
            .ok_or_else(|| StoreError::storage(path, "no object at path"))
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[derive(Debug, Clone, PartialEq)]
    struct TestRow {
        id: Uuid,
        label: String,
    }

    #[derive(Debug, Clone, Default)]
    struct TestPatch {
        label: Option<String>,
    }

    impl Identifiable for TestRow {
        fn id(&self) -> Uuid {
            self.id
        }
    }

    impl Record for TestRow {
        type Insert = String;
        type Patch = TestPatch;

        const NOUN: &'static str = "test row";

        fn materialize(insert: Self::Insert) -> Self {
            Self {
                id: Uuid::new_v4(),
                label: insert,
            }
        }

        fn apply_patch(&mut self, patch: Self::Patch) {
            if let Some(label) = patch.label {
                self.label = label;
            }
        }
    }

    #[tokio::test]
    async fn test_create_list_preserves_insertion_order() {
        let table = MemoryTable::<TestRow>::new();
        table.create("first".into()).await.unwrap();
        table.create("second".into()).await.unwrap();

        let labels: Vec<String> = table
            .list_all()
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.label)
            .collect();
        assert_eq!(labels, vec!["first".to_string(), "second".to_string()]);
    }

    #[tokio::test]
    async fn test_update_patches_in_place() {
        let table = MemoryTable::<TestRow>::new();
        let row = table.create("before".into()).await.unwrap();

        let updated = table
            .update(
                row.id,
                TestPatch {
                    label: Some("after".into()),
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.label, "after");
        assert_eq!(table.len().await, 1);
    }

    #[tokio::test]
    async fn test_update_missing_row_is_not_found() {
        let table = MemoryTable::<TestRow>::new();
        let id = Uuid::new_v4();
        let err = table.update(id, TestPatch::default()).await.unwrap_err();
        assert_eq!(err, StoreError::NotFound(id));
    }

    #[tokio::test]
    async fn test_delete_returns_removed_row() {
        let table = MemoryTable::<TestRow>::new();
        let row = table.create("gone".into()).await.unwrap();

        let removed = table.delete(row.id).await.unwrap();
        assert_eq!(removed.label, "gone");
        assert!(table.is_empty().await);
        assert!(table.delete(row.id).await.is_err());
    }

    #[tokio::test]
    async fn test_object_store_round_trip() {
        let storage = MemoryObjectStore::new("https://cdn.test");
        let path = storage.upload("product/1/a.jpg", vec![1, 2, 3]).await.unwrap();
        assert_eq!(path, "product/1/a.jpg");
        assert!(storage.contains(&path).await);
        assert_eq!(
            storage.public_url(&path),
            "https://cdn.test/product/1/a.jpg"
        );

        storage.remove(&path).await.unwrap();
        assert!(!storage.contains(&path).await);
        assert!(storage.remove(&path).await.is_err());
    }
}
