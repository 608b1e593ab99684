//! Core traits for Shopdesk
//!
//! This module defines the behaviors shared by every record type: identity,
//! display labelling, the insert/patch shapes a store needs, and the extra
//! contract child rows satisfy so the diff engine can reconcile them.

use uuid::Uuid;

// ============================================================================
// Identifiable Trait
// ============================================================================

/// Trait for types that have a unique identifier
pub trait Identifiable {
    /// Get the unique identifier
    fn id(&self) -> Uuid;

    /// Check if this matches another identifier
    fn matches_id(&self, id: Uuid) -> bool {
        self.id() == id
    }
}

// ============================================================================
// Labelled Trait
// ============================================================================

/// Trait for rows that can be named in dialogs and searched in tables.
///
/// `row_label` feeds busy-overlay text ("Editing Order #1042"); `search_text`
/// feeds the table search box.
pub trait Labelled {
    /// Human-readable label for this row
    fn row_label(&self) -> String;

    /// Text matched against a search query (defaults to the label)
    fn search_text(&self) -> String {
        self.row_label()
    }
}

// ============================================================================
// Record Trait
// ============================================================================

/// Trait for rows persisted by a record store.
///
/// `Insert` is the shape a form produces and a store consumes to create a
/// row; `Patch` is the shape an update consumes. The store owns identity and
/// timestamps: `materialize` exists so a fake store can emulate server-side
/// row construction.
pub trait Record: Identifiable + Clone + Send + Sync + 'static {
    /// Insert shape (no id, no server-assigned columns)
    type Insert: Clone + Send + Sync + 'static;

    /// Patch shape (one optional slot per mutable column)
    type Patch: Clone + Send + Sync + 'static;

    /// Noun used in dialog labels and log lines ("product", "order")
    const NOUN: &'static str;

    /// Build a full row from an insert, assigning identity and timestamps
    fn materialize(insert: Self::Insert) -> Self;

    /// Apply a partial patch in place
    fn apply_patch(&mut self, patch: Self::Patch);
}

// ============================================================================
// ChildRecord Trait
// ============================================================================

/// Trait for rows owned by exactly one parent via foreign key (line items).
///
/// The extra operations exist for the diff engine: an edited child list is a
/// list of `Insert` shapes where a present `id` means "this row was
/// persisted before", and the parent key on a fresh insert is left for the
/// caller to fill in once the parent itself has an id.
pub trait ChildRecord: Record {
    /// The owning parent's id
    fn parent_id(&self) -> Uuid;

    /// The persisted id carried by an edited row, if any
    fn insert_id(insert: &Self::Insert) -> Option<Uuid>;

    /// Fill in the parent foreign key on an insert
    fn attach_parent(insert: &mut Self::Insert, parent_id: Uuid);

    /// Field-by-field comparison against an edited row; `None` when nothing
    /// differs, otherwise a patch containing exactly the differing columns
    fn diff_against(&self, edited: &Self::Insert) -> Option<Self::Patch>;

    /// Re-express this persisted row as an insert shape (seeds edit forms)
    fn as_insert(&self) -> Self::Insert;
}
