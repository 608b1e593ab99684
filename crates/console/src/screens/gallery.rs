//! Generic parent-with-images screen
//!
//! The screen shape shared by products and notes: each row is a parent
//! record joined with its persisted gallery images. Submits carry an
//! `ImageDraft` alongside the value bag; the draft is committed by the
//! engine's reconciler after the parent row settles.

use shopdesk_core::{Labelled, OpsResult, Record};
use shopdesk_engine::{DialogState, ImageDraft, ImageReconciler};
use shopdesk_model::ImageRow;
use shopdesk_store::{ObjectStore, RecordStore};
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

// ============================================================================
// WithImages
// ============================================================================

/// A parent row joined with its gallery images
#[derive(Debug, Clone, PartialEq)]
pub struct WithImages<R> {
    pub parent: R,
    pub images: Vec<ImageRow>,
}

impl<R> WithImages<R> {
    /// Seed an edit dialog's image draft from this row's persisted gallery
    pub fn image_draft(&self) -> ImageDraft {
        ImageDraft::seeded(self.images.clone())
    }
}

// ============================================================================
// GalleryScreen
// ============================================================================

/// A screen over a record type that owns attached images
pub struct GalleryScreen<R: Record + Labelled> {
    rows: Vec<WithImages<R>>,
    /// Dialog and busy state, threaded per screen instance
    pub dialogs: DialogState,
    records: Arc<dyn RecordStore<R>>,
    image_records: Arc<dyn RecordStore<ImageRow>>,
    reconciler: ImageReconciler,
}

impl<R: Record + Labelled> GalleryScreen<R> {
    /// Create a screen over the record table, its image metadata table, and
    /// the object store; `scope` namespaces this screen's storage keys
    pub fn new(
        records: Arc<dyn RecordStore<R>>,
        image_records: Arc<dyn RecordStore<ImageRow>>,
        storage: Arc<dyn ObjectStore>,
        scope: impl Into<String>,
    ) -> Self {
        Self {
            rows: Vec::new(),
            dialogs: DialogState::new(),
            records,
            reconciler: ImageReconciler::new(Arc::clone(&image_records), storage, scope),
            image_records,
        }
    }

    /// The joined rows as of the last confirmed mutation or refetch
    pub fn rows(&self) -> &[WithImages<R>] {
        &self.rows
    }

    /// Look up a joined row by parent id
    pub fn row(&self, id: Uuid) -> Option<&WithImages<R>> {
        self.rows.iter().find(|row| row.parent.id() == id)
    }

    /// Case-insensitive search over each parent's search text
    pub fn search(&self, query: &str) -> Vec<&WithImages<R>> {
        let needle = query.to_lowercase();
        self.rows
            .iter()
            .filter(|row| row.parent.search_text().to_lowercase().contains(&needle))
            .collect()
    }

    /// Fetch parents and image rows and join them by parent key
    pub async fn refetch(&mut self) -> OpsResult<()> {
        let parents = self.records.list_all().await?;
        let images = self.image_records.list_all().await?;

        let mut by_parent: HashMap<Uuid, Vec<ImageRow>> = HashMap::new();
        for image in images {
            by_parent.entry(image.parent_id).or_default().push(image);
        }
        self.rows = parents
            .into_iter()
            .map(|parent| {
                let images = by_parent.remove(&parent.id()).unwrap_or_default();
                WithImages { parent, images }
            })
            .collect();
        Ok(())
    }

    /// Create the parent, then commit the image draft against its fresh id
    pub async fn submit_add(&mut self, draft: R::Insert, images: ImageDraft) -> OpsResult<()> {
        self.dialogs.begin_busy(format!("Adding {}", R::NOUN));
        let result = self.create_with_images(draft, images).await;
        self.dialogs.reset_all();

        let row = result?;
        tracing::info!(
            "created {} '{}' with {} image(s)",
            R::NOUN,
            row.parent.row_label(),
            row.images.len()
        );
        self.rows.push(row);
        Ok(())
    }

    /// Update the parent, then commit the image draft if it stages anything
    pub async fn submit_edit(
        &mut self,
        id: Uuid,
        patch: R::Patch,
        images: ImageDraft,
    ) -> OpsResult<()> {
        let label = self
            .row(id)
            .map(|row| row.parent.row_label())
            .unwrap_or_else(|| R::NOUN.to_string());
        self.dialogs.begin_busy(format!("Editing {label}"));
        let result = self.update_with_images(id, patch, images).await;
        self.dialogs.reset_all();

        let row = result?;
        tracing::info!("updated {} '{}'", R::NOUN, row.parent.row_label());
        if let Some(slot) = self.rows.iter_mut().find(|row| row.parent.id() == id) {
            *slot = row;
        }
        Ok(())
    }

    /// Delete the parent; image rows cascade at the collaborator boundary,
    /// stored objects are left for the reclamation sweep
    pub async fn confirm_delete(&mut self, id: Uuid) -> OpsResult<()> {
        let label = self
            .row(id)
            .map(|row| row.parent.row_label())
            .unwrap_or_else(|| R::NOUN.to_string());
        self.dialogs.begin_busy(format!("Deleting {label}"));
        let result = self.records.delete(id).await;
        self.dialogs.reset_all();

        let removed = result?;
        tracing::info!("deleted {} '{}'", R::NOUN, removed.row_label());
        self.rows.retain(|row| row.parent.id() != id);
        Ok(())
    }

    async fn create_with_images(
        &self,
        draft: R::Insert,
        images: ImageDraft,
    ) -> OpsResult<WithImages<R>> {
        let parent = self.records.create(draft).await?;
        let images = self.reconciler.apply(parent.id(), images).await?;
        Ok(WithImages { parent, images })
    }

    async fn update_with_images(
        &self,
        id: Uuid,
        patch: R::Patch,
        images: ImageDraft,
    ) -> OpsResult<WithImages<R>> {
        let parent = self.records.update(id, patch).await?;
        let images = if images.has_changes() {
            self.reconciler.apply(id, images).await?
        } else {
            images.into_existing()
        };
        Ok(WithImages { parent, images })
    }
}

impl<R: Record + Labelled> std::fmt::Debug for GalleryScreen<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GalleryScreen")
            .field("noun", &R::NOUN)
            .field("rows", &self.rows.len())
            .field("dialogs", &self.dialogs)
            .finish_non_exhaustive()
    }
}
