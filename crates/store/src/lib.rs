//! # Shopdesk Store
//!
//! The collaborator boundary of the Shopdesk console: traits for the remote
//! record store (opaque CRUD over one table) and the remote object store
//! (binary blobs by path), plus in-memory implementations for the demo
//! binary and tests.
//!
//! The engine and the screens only ever see `Arc<dyn RecordStore<_>>` and
//! `Arc<dyn ObjectStore>`; swapping in a real backend is a wiring change.
//!

pub mod memory;
pub mod traits;

// Re-export commonly used items at crate root
pub use memory::{MemoryObjectStore, MemoryTable};
pub use traits::{ObjectStore, RecordStore};

// Re-export the error surface collaborators speak
pub use shopdesk_core::{StoreError, StoreResult};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
