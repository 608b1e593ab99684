//! # Shopdesk Engine
//!
//! The entity-reconciliation engine every Shopdesk screen reuses:
//!
//! - **Forms**: descriptor-driven form building with per-field parsing,
//!   validation, and visibility rules (`FieldDescriptor`, `FormModel`)
//! - **Diff**: pure reconciliation of an edited line-item list against its
//!   persisted snapshot into create/update/delete sets (`diff_children`)
//! - **Assets**: staged image additions and undoable removals, committed as
//!   upload/create/delete side effects (`ImageDraft`, `ImageReconciler`)
//! - **Dialogs**: add/edit/delete dialog lifecycle with a single busy label
//!   per screen (`DialogState`)
//! - **Join**: the shared fail-fast concurrency policy
//!   (`join_all_or_first_error`)
//!

pub mod assets;
pub mod dialogs;
pub mod diff;
pub mod forms;
pub mod join;

// Re-export commonly used items at crate root
pub use assets::{ImageDraft, ImageReconciler, LocalImage};
pub use dialogs::DialogState;
pub use diff::{ChildDiff, ChildPatch, diff_children};
pub use forms::{
    FieldDescriptor, FieldKind, FieldLayout, FieldValue, FormModel, non_negative, one_of, required,
};
pub use join::join_all_or_first_error;

// Re-export core vocabulary the engine speaks
pub use shopdesk_core::{FieldErrors, LocalFile, Mode, OpsError, OpsResult};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
