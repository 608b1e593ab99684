//! # Shopdesk Console
//!
//! The screen layer of the Shopdesk operations console: per-record-type
//! screens that instantiate form models, embed image drafts and line-item
//! editors, and wire submits through the dialog orchestrator to the
//! collaborator stores, folding confirmed results into in-memory list state.
//!
//! Rendering is out of scope: screens expose field descriptor vectors and
//! reconciled read models; a UI layer consumes both.
//!

pub mod config;
pub mod demo;
pub mod screens;

// Re-export commonly used items at crate root
pub use config::ConsoleConfig;
pub use screens::{
    CrudScreen, ExpensesScreen, GalleryScreen, LineItemScreen, NoteWithImages, NotesScreen,
    OrderWithItems, OrdersScreen, ProductWithImages, ProductsScreen, PurchaseWithItems,
    PurchasesScreen, SuppliesScreen, WithImages, WithItems,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
