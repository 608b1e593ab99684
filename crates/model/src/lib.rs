//! # Shopdesk Model
//!
//! Record rows for the Shopdesk operations console: the persisted shapes the
//! remote store hands back, the insert/draft shapes forms produce, and the
//! patch shapes updates consume.
//!
//! ## Core Concepts
//!
//! - **Row**: a persisted record with an id and timestamps (`Order`,
//!   `Product`, ...)
//! - **Draft**: the editable shape a form works on; numeric fields stay
//!   `Option` so "not entered" is distinguishable from zero
//! - **Patch**: what an update sends; line items use minimal patches
//!   produced by the diff engine
//! - **Child rows**: line items owned by one parent via foreign key,
//!   implementing `ChildRecord` from `shopdesk_core`
//!

pub mod expense;
pub mod image;
pub mod note;
pub mod order;
pub mod product;
pub mod purchase;
pub mod supply;

// Re-export commonly used types at crate root
pub use expense::{EXPENSE_CATEGORIES, Expense, ExpenseDraft};
pub use image::{ImageRow, ImageRowInsert, ImageRowPatch};
pub use note::{Note, NoteDraft};
pub use order::{Order, OrderDraft, OrderItem, OrderItemDraft, OrderItemPatch};
pub use product::{PRODUCT_TYPES, Product, ProductDraft};
pub use purchase::{Purchase, PurchaseDraft, PurchaseItem, PurchaseItemDraft, PurchaseItemPatch};
pub use supply::{Supply, SupplyDraft};

// Re-export core traits that are commonly used with the model
pub use shopdesk_core::{ChildRecord, Identifiable, Labelled, Record};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
