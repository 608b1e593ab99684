//! Collaborator traits
//!
//! The console core never talks to a concrete backend: every screen works
//! against these two traits. A record store is an opaque CRUD surface over
//! one table; an object store holds binary blobs addressed by path. Every
//! method that crosses this boundary is a suspension point.

use async_trait::async_trait;
use shopdesk_core::{Record, StoreResult};
use uuid::Uuid;

// ============================================================================
// RecordStore Trait
// ============================================================================

/// Opaque CRUD interface over one table of `R` rows.
///
/// `delete` returns the removed row so callers can still read its foreign
/// keys (e.g. to locate which parent a deleted child belonged to).
#[async_trait]
pub trait RecordStore<R: Record>: Send + Sync {
    /// Fetch every row
    async fn list_all(&self) -> StoreResult<Vec<R>>;

    /// Create a row; the store assigns identity and timestamps
    async fn create(&self, insert: R::Insert) -> StoreResult<R>;

    /// Patch a row by id, returning the updated row
    async fn update(&self, id: Uuid, patch: R::Patch) -> StoreResult<R>;

    /// Delete a row by id, returning the removed row
    async fn delete(&self, id: Uuid) -> StoreResult<R>;
}

// ============================================================================
// ObjectStore Trait
// ============================================================================

/// Binary blob storage addressed by path.
///
/// `remove` failures are treated as non-fatal by callers (logged, then the
/// metadata row is deleted anyway), so a transient storage error cannot make
/// a metadata row permanently un-deletable.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Store bytes under a key, returning the persisted path
    async fn upload(&self, key: &str, bytes: Vec<u8>) -> StoreResult<String>;

    /// Resolve the public URL for a stored path
    fn public_url(&self, path: &str) -> String;

    /// Remove a stored object
    async fn remove(&self, path: &str) -> StoreResult<()>;
}
