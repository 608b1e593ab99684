//! Screens of the operations console
//!
//! Three generic shapes cover every record type: `CrudScreen` for plain
//! rows, `LineItemScreen` for parents with owned line items, and
//! `GalleryScreen` for parents with attached images. The per-record modules
//! pin the generic shapes to their types and define the field descriptors
//! the forms are built from.

pub mod crud;
pub mod expenses;
pub mod gallery;
pub mod line_items;
pub mod notes;
pub mod orders;
pub mod products;
pub mod purchases;
pub mod supplies;

pub use crud::CrudScreen;
pub use expenses::{ExpensesScreen, expense_fields, expenses_screen};
pub use gallery::{GalleryScreen, WithImages};
pub use line_items::{LineItemScreen, WithItems};
pub use notes::{NOTE_IMAGE_SCOPE, NoteWithImages, NotesScreen, note_fields, notes_screen};
pub use orders::{
    OrderWithItems, OrdersScreen, order_fields, order_item_draft, orders_screen,
};
pub use products::{
    PRODUCT_IMAGE_SCOPE, ProductWithImages, ProductsScreen, product_fields, products_screen,
};
pub use purchases::{
    PurchaseWithItems, PurchasesScreen, purchase_fields, purchase_item_draft, purchases_screen,
};
pub use supplies::{SuppliesScreen, supplies_screen, supply_fields};
