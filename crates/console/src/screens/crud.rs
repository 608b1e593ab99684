//! Generic CRUD screen
//!
//! The plain-record screen shape shared by supplies and expenses: an
//! in-memory row list, the dialog state machine, and submit handlers that
//! call the collaborator and fold confirmed results back into the list.
//!
//! The row list only ever reflects confirmed server state: it is mutated
//! after a remote call settles, never optimistically. On failure the dialog
//! still closes and the busy label still clears; the error travels back to
//! the caller's error channel.

use shopdesk_core::{Labelled, OpsResult, Record};
use shopdesk_engine::DialogState;
use shopdesk_store::RecordStore;
use std::sync::Arc;
use uuid::Uuid;

/// A screen over one plain record type
pub struct CrudScreen<R: Record + Labelled> {
    rows: Vec<R>,
    /// Dialog and busy state, threaded per screen instance
    pub dialogs: DialogState,
    store: Arc<dyn RecordStore<R>>,
}

impl<R: Record + Labelled> CrudScreen<R> {
    /// Create a screen over a record store collaborator
    pub fn new(store: Arc<dyn RecordStore<R>>) -> Self {
        Self {
            rows: Vec::new(),
            dialogs: DialogState::new(),
            store,
        }
    }

    /// The rows as of the last confirmed mutation or refetch
    pub fn rows(&self) -> &[R] {
        &self.rows
    }

    /// Look up a row by id
    pub fn row(&self, id: Uuid) -> Option<&R> {
        self.rows.iter().find(|row| row.id() == id)
    }

    /// Case-insensitive search over each row's search text
    pub fn search(&self, query: &str) -> Vec<&R> {
        let needle = query.to_lowercase();
        self.rows
            .iter()
            .filter(|row| row.search_text().to_lowercase().contains(&needle))
            .collect()
    }

    /// Replace the row list with the store's current contents
    pub async fn refetch(&mut self) -> OpsResult<()> {
        self.rows = self.store.list_all().await?;
        Ok(())
    }

    /// Create a record from a submitted draft
    pub async fn submit_add(&mut self, draft: R::Insert) -> OpsResult<()> {
        self.dialogs.begin_busy(format!("Adding {}", R::NOUN));
        let result = self.store.create(draft).await;
        self.dialogs.reset_all();

        let row = result?;
        tracing::info!("created {} '{}'", R::NOUN, row.row_label());
        self.rows.push(row);
        Ok(())
    }

    /// Update the record currently targeted by the edit dialog
    pub async fn submit_edit(&mut self, id: Uuid, patch: R::Patch) -> OpsResult<()> {
        let label = self
            .row(id)
            .map(Labelled::row_label)
            .unwrap_or_else(|| R::NOUN.to_string());
        self.dialogs.begin_busy(format!("Editing {label}"));
        let result = self.store.update(id, patch).await;
        self.dialogs.reset_all();

        let updated = result?;
        tracing::info!("updated {} '{}'", R::NOUN, updated.row_label());
        if let Some(row) = self.rows.iter_mut().find(|row| row.id() == id) {
            *row = updated;
        }
        Ok(())
    }

    /// Delete the record currently targeted by the confirmation dialog
    pub async fn confirm_delete(&mut self, id: Uuid) -> OpsResult<()> {
        let label = self
            .row(id)
            .map(Labelled::row_label)
            .unwrap_or_else(|| R::NOUN.to_string());
        self.dialogs.begin_busy(format!("Deleting {label}"));
        let result = self.store.delete(id).await;
        self.dialogs.reset_all();

        let removed = result?;
        tracing::info!("deleted {} '{}'", R::NOUN, removed.row_label());
        self.rows.retain(|row| row.id() != id);
        Ok(())
    }
}

impl<R: Record + Labelled> std::fmt::Debug for CrudScreen<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CrudScreen")
            .field("noun", &R::NOUN)
            .field("rows", &self.rows.len())
            .field("dialogs", &self.dialogs)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use shopdesk_model::{Supply, SupplyDraft};
    use shopdesk_store::MemoryTable;

    fn screen() -> CrudScreen<Supply> {
        CrudScreen::new(Arc::new(MemoryTable::<Supply>::new()))
    }

    fn draft(name: &str) -> SupplyDraft {
        SupplyDraft {
            name: name.into(),
            supplier: "Acme".into(),
            quantity: Some(5),
            unit_cost: Some(1.5),
            description: String::new(),
        }
    }

    #[tokio::test]
    async fn test_add_edit_delete_cycle() {
        let mut screen = screen();

        screen.dialogs.start_add();
        screen.submit_add(draft("Shea butter")).await.unwrap();
        assert!(screen.dialogs.is_idle());
        assert_eq!(screen.rows().len(), 1);

        let id = screen.rows()[0].id;
        screen.dialogs.start_edit(id);
        let mut patch = screen.rows()[0].as_draft();
        patch.quantity = Some(9);
        screen.submit_edit(id, patch).await.unwrap();
        assert_eq!(screen.rows()[0].quantity, 9);
        assert!(screen.dialogs.is_idle());

        screen.dialogs.start_delete(id);
        screen.confirm_delete(id).await.unwrap();
        assert!(screen.rows().is_empty());
        assert!(screen.dialogs.is_idle());
    }

    #[tokio::test]
    async fn test_failure_still_closes_dialog_and_clears_busy() {
        let mut screen = screen();
        let missing = Uuid::new_v4();

        screen.dialogs.start_delete(missing);
        let err = screen.confirm_delete(missing).await.unwrap_err();
        assert!(err.is_store());

        // best effort, report, move on: the dialog closed anyway
        assert!(screen.dialogs.is_idle());
        assert!(!screen.dialogs.is_busy());
    }

    #[tokio::test]
    async fn test_failed_edit_leaves_rows_untouched() {
        let mut screen = screen();
        screen.submit_add(draft("Jars")).await.unwrap();

        let err = screen
            .submit_edit(Uuid::new_v4(), draft("Lids"))
            .await
            .unwrap_err();
        assert!(err.is_store());
        assert_eq!(screen.rows()[0].name, "Jars");
    }

    #[tokio::test]
    async fn test_refetch_replaces_rows() {
        let store = Arc::new(MemoryTable::<Supply>::new());
        let mut screen = CrudScreen::new(store.clone() as Arc<dyn RecordStore<Supply>>);

        store.create(draft("Wax")).await.unwrap();
        assert!(screen.rows().is_empty());

        screen.refetch().await.unwrap();
        assert_eq!(screen.rows().len(), 1);
    }

    #[tokio::test]
    async fn test_search_matches_label_and_supplier() {
        let mut screen = screen();
        screen.submit_add(draft("Shea butter")).await.unwrap();
        screen.submit_add(draft("Beeswax")).await.unwrap();

        assert_eq!(screen.search("shea").len(), 1);
        assert_eq!(screen.search("acme").len(), 2);
        assert!(screen.search("nothing").is_empty());
    }
}
