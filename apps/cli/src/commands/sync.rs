//! # Sync Commands
//!
//! Refresh from the remote store, or wipe local data.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::ApiError;
use crate::state::AppState;

/// Result of a successful sync.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncReport {
    /// Products received from the remote store.
    pub synced: usize,
}

/// Replaces the local list with the remote collection.
///
/// On failure the list has already been reloaded from the local snapshot;
/// the error only tells the user that happened.
pub async fn sync_products(state: &mut AppState) -> Result<SyncReport, ApiError> {
    match state.store.sync_from_remote().await {
        Ok(synced) => Ok(SyncReport { synced }),
        Err(err) => {
            warn!(error = %err, "Sync failed");
            Err(err.into())
        }
    }
}

/// Deletes every local product. The remote store is not touched.
///
/// Returns how many products were removed.
pub async fn clear_products(state: &mut AppState) -> Result<usize, ApiError> {
    let cleared = state.store.clear().await?;
    state.edit.cancel();
    Ok(cleared)
}
