//! Asset-draft reconciliation
//!
//! An `ImageDraft` is the client-held staging state for one record's
//! attached images: the persisted set, locally added files, and existing ids
//! marked for removal (undoable until commit). The draft is purely local and
//! synchronous to mutate; it is consumed exactly once at submit time by
//! `ImageReconciler::apply`, which turns it into upload/create/delete side
//! effects against the object store and the metadata table.

use crate::join::join_all_or_first_error;
use shopdesk_core::{ImageId, LocalFile, OpsError, OpsResult};
use shopdesk_model::{ImageRow, ImageRowInsert};
use shopdesk_store::{ObjectStore, RecordStore};
use std::collections::HashSet;
use std::sync::Arc;
use uuid::Uuid;

// ============================================================================
// LocalImage
// ============================================================================

/// A locally staged image: owned exclusively by the draft until its upload
/// succeeds, never persisted before that.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalImage {
    /// Client-generated id, disjoint from the persisted id space
    pub id: ImageId,
    /// The staged binary
    pub file: LocalFile,
    /// Local preview reference for display before upload
    pub preview: String,
}

impl LocalImage {
    /// Stage a file, generating a fresh id and preview reference
    pub fn new(file: LocalFile) -> Self {
        let id = Uuid::new_v4();
        let preview = format!("local://{id}/{}", file.file_name);
        Self { id, file, preview }
    }
}

// ============================================================================
// ImageDraft
// ============================================================================

/// Staged additions and removals for one record's image set.
///
/// Invariants: `removed_ids` only ever contains ids present in `existing`;
/// a marked row stays in `existing` until commit so the removal can be
/// undone; `added` ids live in a different id space than persisted rows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImageDraft {
    existing: Vec<ImageRow>,
    added: Vec<LocalImage>,
    removed_ids: HashSet<ImageId>,
}

impl ImageDraft {
    /// Empty draft for a record being created
    pub fn new() -> Self {
        Self::default()
    }

    /// Draft seeded with a record's current persisted images (edit mode)
    pub fn seeded(existing: Vec<ImageRow>) -> Self {
        Self {
            existing,
            ..Default::default()
        }
    }

    /// The persisted images, including rows marked for removal
    pub fn existing(&self) -> &[ImageRow] {
        &self.existing
    }

    /// The locally staged additions
    pub fn added(&self) -> &[LocalImage] {
        &self.added
    }

    /// The existing ids currently marked for removal
    pub fn removed_ids(&self) -> &HashSet<ImageId> {
        &self.removed_ids
    }

    /// Check whether an existing row is marked for removal
    pub fn is_marked_removed(&self, id: ImageId) -> bool {
        self.removed_ids.contains(&id)
    }

    /// Check whether committing this draft would do anything
    pub fn has_changes(&self) -> bool {
        !self.added.is_empty() || !self.removed_ids.is_empty()
    }

    /// Stage one `LocalImage` per file, returning the generated ids
    pub fn add_files(&mut self, files: Vec<LocalFile>) -> Vec<ImageId> {
        let staged: Vec<LocalImage> = files.into_iter().map(LocalImage::new).collect();
        let ids = staged.iter().map(|image| image.id).collect();
        self.added.extend(staged);
        ids
    }

    /// Mark an existing image for removal. Idempotent; ids not present in
    /// `existing` are ignored, keeping `removed_ids ⊆ existing`.
    pub fn mark_removed(&mut self, id: ImageId) {
        if self.existing.iter().any(|row| row.id == id) {
            self.removed_ids.insert(id);
        }
    }

    /// Undo a pending removal
    pub fn undo_remove(&mut self, id: ImageId) {
        self.removed_ids.remove(&id);
    }

    /// Drop a staged addition entirely; a never-committed image has no
    /// server-side trace to clean up
    pub fn remove_added(&mut self, id: ImageId) {
        self.added.retain(|image| image.id != id);
    }

    /// The persisted rows that would survive a commit
    pub fn kept_existing(&self) -> Vec<ImageRow> {
        self.existing
            .iter()
            .filter(|row| !self.removed_ids.contains(&row.id))
            .cloned()
            .collect()
    }

    /// Consume the draft, keeping only the surviving persisted rows.
    /// Used when a submit has nothing staged and the current set stands.
    pub fn into_existing(self) -> Vec<ImageRow> {
        let removed = self.removed_ids;
        self.existing
            .into_iter()
            .filter(|row| !removed.contains(&row.id))
            .collect()
    }
}

// ============================================================================
// ImageReconciler
// ============================================================================

/// Commits an `ImageDraft` against the object store and the metadata table.
#[derive(Clone)]
pub struct ImageReconciler {
    records: Arc<dyn RecordStore<ImageRow>>,
    storage: Arc<dyn ObjectStore>,
    scope: String,
}

impl ImageReconciler {
    /// Create a reconciler writing object keys under `scope/` (one scope per
    /// record type, e.g. "product" or "note")
    pub fn new(
        records: Arc<dyn RecordStore<ImageRow>>,
        storage: Arc<dyn ObjectStore>,
        scope: impl Into<String>,
    ) -> Self {
        Self {
            records,
            storage,
            scope: scope.into(),
        }
    }

    /// Apply a draft for the given parent record.
    ///
    /// Removals run first, sequentially: the stored object is deleted
    /// best-effort (a failure is logged and skipped so a transient storage
    /// error cannot make the metadata row permanently un-deletable), then
    /// the metadata row is deleted. Additions then run concurrently; within
    /// one addition the upload settles before its metadata row is created,
    /// since the row needs the resolved path and URL. The addition group is
    /// joined fail-fast without sibling cancellation.
    ///
    /// Returns the final asset set: surviving existing rows plus newly
    /// created rows.
    pub async fn apply(&self, parent_id: Uuid, draft: ImageDraft) -> OpsResult<Vec<ImageRow>> {
        let ImageDraft {
            existing,
            added,
            removed_ids,
        } = draft;

        for id in &removed_ids {
            let Some(row) = existing.iter().find(|row| row.id == *id) else {
                continue;
            };
            if let Err(err) = self.storage.remove(&row.path).await {
                tracing::warn!("storage delete failed for '{}': {err}", row.path);
            }
            self.records.delete(*id).await?;
        }

        let mut handles = Vec::with_capacity(added.len());
        for image in added {
            let records = Arc::clone(&self.records);
            let storage = Arc::clone(&self.storage);
            let key = object_key(&self.scope, parent_id, &image.file);
            handles.push(tokio::spawn(async move {
                let path = storage.upload(&key, image.file.bytes).await?;
                let url = storage.public_url(&path);
                let row = records
                    .create(ImageRowInsert {
                        parent_id,
                        path,
                        url,
                    })
                    .await?;
                Ok::<ImageRow, OpsError>(row)
            }));
        }
        let created = join_all_or_first_error(handles).await?;

        let mut final_set: Vec<ImageRow> = existing
            .into_iter()
            .filter(|row| !removed_ids.contains(&row.id))
            .collect();
        final_set.extend(created);
        Ok(final_set)
    }
}

impl std::fmt::Debug for ImageReconciler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageReconciler")
            .field("scope", &self.scope)
            .finish_non_exhaustive()
    }
}

/// Storage key for a fresh upload: namespaced by scope and parent id, named
/// by a server-independent fresh identifier
fn object_key(scope: &str, parent_id: Uuid, file: &LocalFile) -> String {
    format!("{scope}/{parent_id}/{}.{}", Uuid::new_v4(), file.extension())
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;
    use shopdesk_core::{Record, StoreError, StoreResult};
    use shopdesk_store::{MemoryObjectStore, MemoryTable};

    fn file(name: &str) -> LocalFile {
        LocalFile::new(name, vec![1, 2, 3])
    }

    fn persisted(parent_id: Uuid, path: &str) -> ImageRow {
        ImageRow::materialize(ImageRowInsert {
            parent_id,
            path: path.into(),
            url: format!("memory://bucket/{path}"),
        })
    }

    // ------------------------------------------------------------------
    // Draft mutations
    // ------------------------------------------------------------------

    #[test]
    fn test_mark_and_undo_round_trip() {
        let parent_id = Uuid::new_v4();
        let row = persisted(parent_id, "note/a/1.jpg");
        let mut draft = ImageDraft::seeded(vec![row.clone()]);
        let before = draft.removed_ids().clone();

        draft.mark_removed(row.id);
        assert!(draft.is_marked_removed(row.id));
        // marked, not removed: the row stays visible for undo
        assert_eq!(draft.existing().len(), 1);

        draft.mark_removed(row.id); // idempotent
        assert_eq!(draft.removed_ids().len(), 1);

        draft.undo_remove(row.id);
        assert_eq!(draft.removed_ids(), &before);
    }

    #[test]
    fn test_mark_removed_ignores_unknown_ids() {
        let mut draft = ImageDraft::seeded(vec![persisted(Uuid::new_v4(), "p/1.jpg")]);
        draft.mark_removed(Uuid::new_v4());
        assert!(draft.removed_ids().is_empty());
        assert!(!draft.has_changes());
    }

    #[test]
    fn test_add_then_remove_added_round_trip() {
        let mut draft = ImageDraft::new();
        let ids = draft.add_files(vec![file("a.png")]);
        assert_eq!(draft.added().len(), 1);
        assert_eq!(draft.added()[0].id, ids[0]);
        assert!(draft.added()[0].preview.starts_with("local://"));

        draft.remove_added(ids[0]);
        assert!(draft.added().is_empty());
        assert!(!draft.has_changes());
    }

    #[test]
    fn test_kept_existing_excludes_marked_rows() {
        let parent_id = Uuid::new_v4();
        let keep = persisted(parent_id, "p/keep.jpg");
        let drop = persisted(parent_id, "p/drop.jpg");
        let mut draft = ImageDraft::seeded(vec![keep.clone(), drop.clone()]);
        draft.mark_removed(drop.id);

        assert_eq!(draft.kept_existing(), vec![keep.clone()]);
        assert_eq!(draft.into_existing(), vec![keep]);
    }

    // ------------------------------------------------------------------
    // Commit sequencing
    // ------------------------------------------------------------------

    fn reconciler_fixture() -> (Arc<MemoryTable<ImageRow>>, Arc<MemoryObjectStore>, ImageReconciler)
    {
        let records = Arc::new(MemoryTable::<ImageRow>::new());
        let storage = Arc::new(MemoryObjectStore::new("memory://bucket"));
        let reconciler = ImageReconciler::new(
            Arc::clone(&records) as Arc<dyn RecordStore<ImageRow>>,
            Arc::clone(&storage) as Arc<dyn ObjectStore>,
            "product",
        );
        (records, storage, reconciler)
    }

    #[tokio::test]
    async fn test_apply_removal_deletes_object_and_row() {
        let (records, storage, reconciler) = reconciler_fixture();
        let parent_id = Uuid::new_v4();

        let path = storage.upload("product/old/1.jpg", vec![9]).await.unwrap();
        let row = records
            .create(ImageRowInsert {
                parent_id,
                path: path.clone(),
                url: storage.public_url(&path),
            })
            .await
            .unwrap();

        let mut draft = ImageDraft::seeded(vec![row.clone()]);
        draft.mark_removed(row.id);

        let final_set = reconciler.apply(parent_id, draft).await.unwrap();
        assert!(final_set.is_empty());
        assert!(!storage.contains(&path).await);
        assert!(records.is_empty().await);
    }

    #[tokio::test]
    async fn test_apply_additions_upload_then_create() {
        let (records, storage, reconciler) = reconciler_fixture();
        let parent_id = Uuid::new_v4();

        let mut draft = ImageDraft::new();
        draft.add_files(vec![file("a.png"), file("b.jpg")]);

        let final_set = reconciler.apply(parent_id, draft).await.unwrap();
        assert_eq!(final_set.len(), 2);
        assert_eq!(storage.object_count().await, 2);
        assert_eq!(records.len().await, 2);

        for row in &final_set {
            assert_eq!(row.parent_id, parent_id);
            assert!(row.path.starts_with(&format!("product/{parent_id}/")));
            assert_eq!(row.url, storage.public_url(&row.path));
            assert!(storage.contains(&row.path).await);
        }
    }

    #[tokio::test]
    async fn test_apply_merges_survivors_and_created() {
        let (records, storage, reconciler) = reconciler_fixture();
        let parent_id = Uuid::new_v4();

        let keep_path = storage.upload("product/keep.jpg", vec![1]).await.unwrap();
        let keep = records
            .create(ImageRowInsert {
                parent_id,
                path: keep_path.clone(),
                url: storage.public_url(&keep_path),
            })
            .await
            .unwrap();
        let drop_path = storage.upload("product/drop.jpg", vec![2]).await.unwrap();
        let drop = records
            .create(ImageRowInsert {
                parent_id,
                path: drop_path.clone(),
                url: storage.public_url(&drop_path),
            })
            .await
            .unwrap();

        let mut draft = ImageDraft::seeded(vec![keep.clone(), drop.clone()]);
        draft.mark_removed(drop.id);
        draft.add_files(vec![file("new.png")]);

        let final_set = reconciler.apply(parent_id, draft).await.unwrap();
        assert_eq!(final_set.len(), 2);
        assert!(final_set.iter().any(|row| row.id == keep.id));
        assert!(!final_set.iter().any(|row| row.id == drop.id));
        assert!(!storage.contains(&drop_path).await);
    }

    #[tokio::test]
    async fn test_storage_delete_failure_is_not_fatal() {
        let (records, storage, reconciler) = reconciler_fixture();
        let parent_id = Uuid::new_v4();

        // metadata row whose object is already gone: the storage delete
        // fails, the row delete still happens
        let row = records
            .create(ImageRowInsert {
                parent_id,
                path: "product/ghost.jpg".into(),
                url: storage.public_url("product/ghost.jpg"),
            })
            .await
            .unwrap();

        let mut draft = ImageDraft::seeded(vec![row.clone()]);
        draft.mark_removed(row.id);

        let final_set = reconciler.apply(parent_id, draft).await.unwrap();
        assert!(final_set.is_empty());
        assert!(records.is_empty().await);
    }

    // ------------------------------------------------------------------
    // Fail-fast commit, orphaned side effects
    // ------------------------------------------------------------------

    /// Metadata table whose creates always fail, for partial-failure tests
    #[derive(Debug, Default)]
    struct RejectingCatalog;

    #[async_trait]
    impl RecordStore<ImageRow> for RejectingCatalog {
        async fn list_all(&self) -> StoreResult<Vec<ImageRow>> {
            Ok(Vec::new())
        }

        async fn create(&self, insert: <ImageRow as Record>::Insert) -> StoreResult<ImageRow> {
            Err(StoreError::conflict("image", format!("rejected {}", insert.path)))
        }

        async fn update(
            &self,
            id: Uuid,
            _patch: <ImageRow as Record>::Patch,
        ) -> StoreResult<ImageRow> {
            Err(StoreError::NotFound(id))
        }

        async fn delete(&self, id: Uuid) -> StoreResult<ImageRow> {
            Err(StoreError::NotFound(id))
        }
    }

    #[tokio::test]
    async fn test_failed_create_surfaces_but_uploads_persist() {
        let storage = Arc::new(MemoryObjectStore::new("memory://bucket"));
        let reconciler = ImageReconciler::new(
            Arc::new(RejectingCatalog) as Arc<dyn RecordStore<ImageRow>>,
            Arc::clone(&storage) as Arc<dyn ObjectStore>,
            "note",
        );

        let mut draft = ImageDraft::new();
        draft.add_files(vec![file("a.png"), file("b.png")]);

        let err = reconciler.apply(Uuid::new_v4(), draft).await.unwrap_err();
        assert!(err.is_store());

        // completed uploads are left in place, never rolled back
        tokio::task::yield_now().await;
        assert!(storage.object_count().await >= 1);
    }
}
