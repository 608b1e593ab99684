//! Generic parent-with-line-items screen
//!
//! The screen shape shared by orders and purchases: each row is a parent
//! record joined with its owned line items. Creation persists the parent
//! first, then the children with the parent key attached; editing diffs the
//! edited item list against the snapshot and executes the resulting
//! deletions, patches, and insertions in that fixed group order.

use shopdesk_core::{ChildRecord, Labelled, OpsError, OpsResult, Record};
use shopdesk_engine::{DialogState, diff_children, join_all_or_first_error};
use shopdesk_store::RecordStore;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use uuid::Uuid;

// ============================================================================
// WithItems
// ============================================================================

/// A parent row joined with its line items
#[derive(Debug, Clone, PartialEq)]
pub struct WithItems<P, C> {
    pub parent: P,
    pub items: Vec<C>,
}

// ============================================================================
// LineItemScreen
// ============================================================================

/// A screen over a parent record type and its child line items
pub struct LineItemScreen<P: Record + Labelled, C: ChildRecord> {
    rows: Vec<WithItems<P, C>>,
    /// Dialog and busy state, threaded per screen instance
    pub dialogs: DialogState,
    parents: Arc<dyn RecordStore<P>>,
    children: Arc<dyn RecordStore<C>>,
}

impl<P: Record + Labelled, C: ChildRecord> LineItemScreen<P, C> {
    /// Create a screen over the parent and child store collaborators
    pub fn new(parents: Arc<dyn RecordStore<P>>, children: Arc<dyn RecordStore<C>>) -> Self {
        Self {
            rows: Vec::new(),
            dialogs: DialogState::new(),
            parents,
            children,
        }
    }

    /// The joined rows as of the last confirmed mutation or refetch
    pub fn rows(&self) -> &[WithItems<P, C>] {
        &self.rows
    }

    /// Look up a joined row by parent id
    pub fn row(&self, id: Uuid) -> Option<&WithItems<P, C>> {
        self.rows.iter().find(|row| row.parent.id() == id)
    }

    /// Case-insensitive search over each parent's search text
    pub fn search(&self, query: &str) -> Vec<&WithItems<P, C>> {
        let needle = query.to_lowercase();
        self.rows
            .iter()
            .filter(|row| row.parent.search_text().to_lowercase().contains(&needle))
            .collect()
    }

    /// Fetch parents and children and join them by parent key
    pub async fn refetch(&mut self) -> OpsResult<()> {
        let parents = self.parents.list_all().await?;
        let children = self.children.list_all().await?;

        let mut by_parent: HashMap<Uuid, Vec<C>> = HashMap::new();
        for child in children {
            by_parent.entry(child.parent_id()).or_default().push(child);
        }
        self.rows = parents
            .into_iter()
            .map(|parent| {
                let items = by_parent.remove(&parent.id()).unwrap_or_default();
                WithItems { parent, items }
            })
            .collect();
        Ok(())
    }

    /// Create the parent, then its line items with the parent key attached
    pub async fn submit_add(&mut self, draft: P::Insert, items: Vec<C::Insert>) -> OpsResult<()> {
        self.dialogs.begin_busy(format!("Adding {}", P::NOUN));
        let result = self.create_with_items(draft, items).await;
        self.dialogs.reset_all();

        let row = result?;
        tracing::info!(
            "created {} '{}' with {} item(s)",
            P::NOUN,
            row.parent.row_label(),
            row.items.len()
        );
        self.rows.push(row);
        Ok(())
    }

    /// Update the parent, then reconcile the edited item list against the
    /// snapshot taken when the edit dialog opened
    pub async fn submit_edit(
        &mut self,
        id: Uuid,
        patch: P::Patch,
        edited: Vec<C::Insert>,
    ) -> OpsResult<()> {
        let label = self
            .row(id)
            .map(|row| row.parent.row_label())
            .unwrap_or_else(|| P::NOUN.to_string());
        self.dialogs.begin_busy(format!("Editing {label}"));
        let result = self.apply_edit(id, patch, edited).await;
        self.dialogs.reset_all();

        let row = result?;
        tracing::info!("updated {} '{}'", P::NOUN, row.parent.row_label());
        if let Some(slot) = self.rows.iter_mut().find(|row| row.parent.id() == id) {
            *slot = row;
        }
        Ok(())
    }

    /// Delete the parent; children cascade at the collaborator boundary
    pub async fn confirm_delete(&mut self, id: Uuid) -> OpsResult<()> {
        let label = self
            .row(id)
            .map(|row| row.parent.row_label())
            .unwrap_or_else(|| P::NOUN.to_string());
        self.dialogs.begin_busy(format!("Deleting {label}"));
        let result = self.parents.delete(id).await;
        self.dialogs.reset_all();

        let removed = result?;
        tracing::info!("deleted {} '{}'", P::NOUN, removed.row_label());
        self.rows.retain(|row| row.parent.id() != id);
        Ok(())
    }

    async fn create_with_items(
        &self,
        draft: P::Insert,
        items: Vec<C::Insert>,
    ) -> OpsResult<WithItems<P, C>> {
        let parent = self.parents.create(draft).await?;
        let parent_id = parent.id();

        let mut handles = Vec::with_capacity(items.len());
        for mut item in items {
            C::attach_parent(&mut item, parent_id);
            let children = Arc::clone(&self.children);
            handles.push(tokio::spawn(async move {
                children.create(item).await.map_err(OpsError::from)
            }));
        }
        let items = join_all_or_first_error(handles).await?;
        Ok(WithItems { parent, items })
    }

    /// Executes the three diff groups strictly in order: deletions, then
    /// patches, then insertions. Members of a group run concurrently; a
    /// group only starts once the previous one has fully settled, so a new
    /// row never races a row mid-deletion on a uniqueness constraint and no
    /// patch lands on a row about to be superseded.
    async fn apply_edit(
        &self,
        id: Uuid,
        patch: P::Patch,
        edited: Vec<C::Insert>,
    ) -> OpsResult<WithItems<P, C>> {
        let parent = self.parents.update(id, patch).await?;

        let snapshot: Vec<C> = self
            .row(id)
            .map(|row| row.items.clone())
            .unwrap_or_default();
        let diff = diff_children(&snapshot, &edited);

        let mut deletes = Vec::with_capacity(diff.to_delete_ids.len());
        for child_id in diff.to_delete_ids.iter().copied() {
            let children = Arc::clone(&self.children);
            deletes.push(tokio::spawn(async move {
                children
                    .delete(child_id)
                    .await
                    .map(|_| ())
                    .map_err(OpsError::from)
            }));
        }
        join_all_or_first_error(deletes).await?;

        let mut updates = Vec::with_capacity(diff.to_update.len());
        for pending in diff.to_update {
            let children = Arc::clone(&self.children);
            updates.push(tokio::spawn(async move {
                children
                    .update(pending.id, pending.patch)
                    .await
                    .map_err(OpsError::from)
            }));
        }
        let updated = join_all_or_first_error(updates).await?;

        let mut creates = Vec::with_capacity(diff.to_create.len());
        for mut insert in diff.to_create {
            C::attach_parent(&mut insert, id);
            let children = Arc::clone(&self.children);
            creates.push(tokio::spawn(async move {
                children.create(insert).await.map_err(OpsError::from)
            }));
        }
        let created = join_all_or_first_error(creates).await?;

        // fold the confirmed results over the snapshot
        let deleted: HashSet<Uuid> = diff.to_delete_ids.into_iter().collect();
        let updated_by_id: HashMap<Uuid, C> =
            updated.into_iter().map(|item| (item.id(), item)).collect();
        let mut items: Vec<C> = Vec::with_capacity(snapshot.len() + created.len());
        for item in snapshot {
            if deleted.contains(&item.id()) {
                continue;
            }
            match updated_by_id.get(&item.id()) {
                Some(fresh) => items.push(fresh.clone()),
                None => items.push(item),
            }
        }
        items.extend(created);

        Ok(WithItems { parent, items })
    }
}

impl<P: Record + Labelled, C: ChildRecord> std::fmt::Debug for LineItemScreen<P, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LineItemScreen")
            .field("noun", &P::NOUN)
            .field("rows", &self.rows.len())
            .field("dialogs", &self.dialogs)
            .finish_non_exhaustive()
    }
}
