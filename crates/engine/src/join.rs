//! Fail-fast join policy for concurrent collaborator calls
//!
//! Groups of remote operations (child creations, image uploads) run as
//! spawned tasks and are joined through `join_all_or_first_error`, the one
//! named policy every screen shares.

use shopdesk_core::{OpsError, OpsResult};
use tokio::task::JoinHandle;

/// Await a group of spawned tasks, returning every result or the first error
/// encountered in join order.
///
/// Siblings are NOT cancelled on failure: dropping a `JoinHandle` detaches
/// its task, so in-flight members run to completion and their side effects
/// persist. For an upload group this can leave a completed upload with no
/// metadata record; the orphaned object is unreferenced and reclaimable by a
/// separate sweep, and is never rolled back here.
pub async fn join_all_or_first_error<T>(handles: Vec<JoinHandle<OpsResult<T>>>) -> OpsResult<Vec<T>> {
    let mut results = Vec::with_capacity(handles.len());
    for handle in handles {
        match handle.await {
            Ok(Ok(value)) => results.push(value),
            Ok(Err(err)) => return Err(err),
            Err(join_err) => {
                return Err(OpsError::internal(format!("joined task failed: {join_err}")));
            }
        }
    }
    Ok(results)
}

// ============================================================================
// Tests
// ============================================================================
