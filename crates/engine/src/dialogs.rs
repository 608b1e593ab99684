//! CRUD dialog lifecycle
//!
//! One `DialogState` per screen instance tracks which of the three dialogs
//! is open, which record it targets, and the single busy label shared across
//! the screen's operations. The state is threaded through the screen that
//! owns it, never ambient, so multiple screen instances cannot interfere.
//!
//! Screens only ever open one dialog at a time; mutual exclusion is a usage
//! convention, not hard-enforced here. One busy label per instance means two
//! dialogs cannot be mid-submit simultaneously within one screen.

use uuid::Uuid;

/// Visibility and busy state for a screen's add/edit/delete dialogs
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DialogState {
    add_open: bool,
    edit_target: Option<Uuid>,
    delete_target: Option<Uuid>,
    busy_label: Option<String>,
}

impl DialogState {
    /// Fresh state with every dialog closed
    pub fn new() -> Self {
        Self::default()
    }

    // ========================================================================
    // Transitions
    // ========================================================================

    /// Open the add dialog
    pub fn start_add(&mut self) {
        self.add_open = true;
    }

    /// Open the edit dialog targeting a record
    pub fn start_edit(&mut self, id: Uuid) {
        self.edit_target = Some(id);
    }

    /// Open the delete confirmation targeting a record
    pub fn start_delete(&mut self, id: Uuid) {
        self.delete_target = Some(id);
    }

    /// Close the add dialog
    pub fn close_add(&mut self) {
        self.add_open = false;
    }

    /// Close the edit dialog
    pub fn close_edit(&mut self) {
        self.edit_target = None;
    }

    /// Close the delete confirmation
    pub fn close_delete(&mut self) {
        self.delete_target = None;
    }

    /// Close every dialog and clear the busy label.
    ///
    /// Runs on the guaranteed path after every submit, success or failure:
    /// the dialog closes and the overlay clears; errors travel separately.
    pub fn reset_all(&mut self) {
        self.add_open = false;
        self.edit_target = None;
        self.delete_target = None;
        self.busy_label = None;
    }

    // ========================================================================
    // Busy tracking
    // ========================================================================

    /// Mark a submit as in flight with a human-readable label
    pub fn begin_busy(&mut self, label: impl Into<String>) {
        self.busy_label = Some(label.into());
    }

    /// Clear the busy label without touching dialog visibility
    pub fn clear_busy(&mut self) {
        self.busy_label = None;
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Check whether the add dialog is open
    pub fn add_open(&self) -> bool {
        self.add_open
    }

    /// The record targeted by the edit dialog, if open
    pub fn edit_target(&self) -> Option<Uuid> {
        self.edit_target
    }

    /// The record targeted by the delete confirmation, if open
    pub fn delete_target(&self) -> Option<Uuid> {
        self.delete_target
    }

    /// Check whether a submit is in flight
    pub fn is_busy(&self) -> bool {
        self.busy_label.is_some()
    }

    /// The busy overlay label, if a submit is in flight
    pub fn busy_label(&self) -> Option<&str> {
        self.busy_label.as_deref()
    }

    /// Check whether no dialog is open and nothing is in flight
    pub fn is_idle(&self) -> bool {
        !self.add_open
            && self.edit_target.is_none()
            && self.delete_target.is_none()
            && self.busy_label.is_none()
    }
}

// ============================================================================
// Tests
// ============================================================================
