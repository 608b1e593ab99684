//! Child-collection diff engine
//!
//! Reconciles an edited list of line items against the snapshot that was
//! persisted when the edit dialog opened, producing the create/update/delete
//! operation sets the orchestrator executes. Pure: no collaborator calls,
//! no clock, no randomness.

use shopdesk_core::ChildRecord;
use std::collections::{HashMap, HashSet};
use uuid::Uuid;

// ============================================================================
// ChildDiff
// ============================================================================

/// A pending update for one persisted child row
pub struct ChildPatch<C: ChildRecord> {
    pub id: Uuid,
    pub patch: C::Patch,
}

/// The operation sets derived from one diff.
///
/// These are sets, not sequences: the result does not depend on the order of
/// the edited list.
pub struct ChildDiff<C: ChildRecord> {
    /// Rows with no id: to be created once the parent key is attached
    pub to_create: Vec<C::Insert>,
    /// Rows whose fields changed: minimal patches, differing columns only
    pub to_update: Vec<ChildPatch<C>>,
    /// Original rows absent from the edited list
    pub to_delete_ids: Vec<Uuid>,
}

impl<C: ChildRecord> Default for ChildDiff<C> {
    fn default() -> Self {
        Self {
            to_create: Vec::new(),
            to_update: Vec::new(),
            to_delete_ids: Vec::new(),
        }
    }
}

impl<C: ChildRecord> ChildDiff<C> {
    /// Check whether the diff carries no operations at all
    pub fn is_empty(&self) -> bool {
        self.to_create.is_empty() && self.to_update.is_empty() && self.to_delete_ids.is_empty()
    }

    /// Total number of operations across the three sets
    pub fn operation_count(&self) -> usize {
        self.to_create.len() + self.to_update.len() + self.to_delete_ids.len()
    }
}

impl<C: ChildRecord> std::fmt::Debug for ChildDiff<C>
where
    C::Insert: std::fmt::Debug,
    C::Patch: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChildDiff")
            .field("to_create", &self.to_create)
            .field(
                "to_update",
                &self
                    .to_update
                    .iter()
                    .map(|p| (p.id, &p.patch))
                    .collect::<Vec<_>>(),
            )
            .field("to_delete_ids", &self.to_delete_ids)
            .finish()
    }
}

// ============================================================================
// diff_children
// ============================================================================

/// Reconcile an edited child list against its persisted snapshot.
///
/// - An edited row without an id becomes a creation; its parent foreign key
///   is left for the caller to fill in after the parent itself is persisted.
/// - An edited row whose id matches an original row is marked kept; a patch
///   is emitted only if at least one column differs.
/// - An edited row carrying an id the snapshot does not know is ignored: it
///   produces neither an update nor a delete. Logged at `warn` because it
///   can also mask a stale id, which the caller cannot distinguish from a
///   row deleted elsewhere.
/// - Every original row never marked kept is emitted as a deletion.
pub fn diff_children<C: ChildRecord>(original: &[C], edited: &[C::Insert]) -> ChildDiff<C> {
    let by_id: HashMap<Uuid, &C> = original.iter().map(|row| (row.id(), row)).collect();
    let mut kept: HashSet<Uuid> = HashSet::new();
    let mut diff = ChildDiff::default();

    for row in edited {
        let Some(id) = C::insert_id(row) else {
            diff.to_create.push(row.clone());
            continue;
        };

        kept.insert(id);
        let Some(before) = by_id.get(&id) else {
            tracing::warn!("diff: edited {} carries unrecognized id {id}", C::NOUN);
            continue;
        };

        if let Some(patch) = before.diff_against(row) {
            diff.to_update.push(ChildPatch { id, patch });
        }
    }

    for row in original {
        if !kept.contains(&row.id()) {
            diff.to_delete_ids.push(row.id());
        }
    }

    diff
}

// ============================================================================
// Tests
// ============================================================================
