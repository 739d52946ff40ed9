//! # Product Store
//!
//! Owns the in-memory product list and keeps it in step with the remote
//! collection and the local snapshot.
//!
//! ## Mutation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        ProductStore mutation                            │
//! │                                                                         │
//! │  1. Validate input          ── ValidationError → abort, nothing changes │
//! │  2. Remote call             ── failure → warn!, keep going              │
//! │  3. Build next list         ── clone of current + change                │
//! │  4. Write snapshot          ── failure → Persistence, nothing changes   │
//! │  5. Swap in-memory list                                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The local list is authoritative for the session: a remote failure never
//! blocks a local mutation. After every successful mutation the snapshot
//! deserializes to exactly [`ProductStore::list`].
//!
//! The list never holds two records with the same id. Lists coming from the
//! remote or the snapshot are collapsed on load, keeping the later record in
//! the position of the first.

use tracing::{debug, error, info, warn};

use vitrina_core::{Product, ProductId, ProductInput, ProvisionalIds};
use vitrina_db::{Database, DbError};

use crate::config::AppConfig;
use crate::error::{SyncError, SyncResult};
use crate::remote::RemoteCatalog;

/// The product catalog as seen by the UI.
///
/// Mutating operations take `&mut self`, so at most one runs at a time.
#[derive(Debug)]
pub struct ProductStore {
    /// Current list, in insertion order.
    products: Vec<Product>,

    remote: RemoteCatalog,

    db: Database,

    /// Key of the snapshot row.
    snapshot_key: String,

    ids: ProvisionalIds,
}

impl ProductStore {
    /// Opens a store using the remote settings from `config`.
    ///
    /// The list starts from the local snapshot; call
    /// [`sync_from_remote`](Self::sync_from_remote) to refresh it.
    pub async fn open(config: &AppConfig, db: Database) -> SyncResult<Self> {
        let remote = RemoteCatalog::new(config)?;
        Self::with_remote(remote, db, config.snapshot_key()).await
    }

    /// Opens a store around an existing remote client.
    pub async fn with_remote(
        remote: RemoteCatalog,
        db: Database,
        snapshot_key: impl Into<String>,
    ) -> SyncResult<Self> {
        let mut store = ProductStore {
            products: Vec::new(),
            remote,
            db,
            snapshot_key: snapshot_key.into(),
            ids: ProvisionalIds::new(),
        };

        store.products = store.startup_snapshot().await?;

        info!(
            count = store.products.len(),
            remote = %store.remote.collection_url(),
            online = store.remote.is_enabled(),
            "Product store opened"
        );

        Ok(store)
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Current in-memory list.
    pub fn list(&self) -> &[Product] {
        &self.products
    }

    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    pub fn is_online(&self) -> bool {
        self.remote.is_enabled()
    }

    /// Reads the persisted snapshot. A missing snapshot is an empty list.
    pub async fn load_snapshot(&self) -> SyncResult<Vec<Product>> {
        let products = self
            .db
            .snapshots()
            .load_json::<Vec<Product>>(&self.snapshot_key)
            .await?;
        Ok(collapse_duplicate_ids(products.unwrap_or_default()))
    }

    // =========================================================================
    // Sync
    // =========================================================================

    /// Replaces the list with the remote collection.
    ///
    /// ## Returns
    /// * `Ok(count)` - list replaced and persisted
    /// * `Err(RemoteUnavailable)` - remote failed; list reloaded from snapshot
    pub async fn sync_from_remote(&mut self) -> SyncResult<usize> {
        match self.remote.fetch_all().await {
            Ok(products) => {
                let products = collapse_duplicate_ids(products);
                let count = products.len();
                self.commit(products).await?;
                info!(count, "Synced products from remote");
                Ok(count)
            }
            Err(err) => {
                warn!(error = %err, "Remote fetch failed, loading local snapshot");
                self.products = self.load_snapshot().await?;
                Err(SyncError::RemoteUnavailable(err.to_string()))
            }
        }
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Creates a product.
    ///
    /// The record is posted with a provisional id. If the remote accepts it
    /// the server's record is kept, otherwise the provisional one.
    pub async fn create(&mut self, input: &ProductInput) -> SyncResult<Product> {
        let draft = input.validated()?;

        let products = &self.products;
        let id = self.ids.next(|candidate| products.iter().any(|p| p.id == candidate));
        let provisional = Product::from_draft(id, draft);

        let record = match self.remote.create(&provisional).await {
            Ok(saved) => {
                debug!(provisional_id = id, id = saved.id, "Remote accepted product");
                saved
            }
            Err(err) => {
                warn!(id, error = %err, "Remote create failed, keeping provisional record");
                provisional
            }
        };

        let mut next = self.products.clone();
        match next.iter_mut().find(|p| p.id == record.id) {
            Some(existing) => *existing = record.clone(),
            None => next.push(record.clone()),
        }
        self.commit(next).await?;

        info!(id = record.id, name = %record.name, "Product created");
        Ok(record)
    }

    /// Replaces the product with `id`.
    ///
    /// Fails with `NotFound` before contacting the remote if `id` is not in
    /// the list.
    pub async fn update(&mut self, id: ProductId, input: &ProductInput) -> SyncResult<Product> {
        let draft = input.validated()?;

        let index = self
            .products
            .iter()
            .position(|p| p.id == id)
            .ok_or(SyncError::NotFound(id))?;
        let record = Product::from_draft(id, draft);

        if let Err(err) = self.remote.update(id, &record).await {
            warn!(id, error = %err, "Remote update failed, applying locally");
        }

        let mut next = self.products.clone();
        next[index] = record.clone();
        self.commit(next).await?;

        info!(id, "Product updated");
        Ok(record)
    }

    /// Removes the product with `id`, returning it if it was present.
    pub async fn delete(&mut self, id: ProductId) -> SyncResult<Option<Product>> {
        if let Err(err) = self.remote.delete(id).await {
            warn!(id, error = %err, "Remote delete failed, removing locally");
        }

        let mut next = self.products.clone();
        let removed = next
            .iter()
            .position(|p| p.id == id)
            .map(|index| next.remove(index));
        self.commit(next).await?;

        match &removed {
            Some(_) => info!(id, "Product deleted"),
            None => debug!(id, "Delete of unknown product"),
        }
        Ok(removed)
    }

    /// Empties the list and the snapshot. Never touches the remote.
    pub async fn clear(&mut self) -> SyncResult<usize> {
        let count = self.products.len();
        self.commit(Vec::new()).await?;
        info!(count, "Cleared local products");
        Ok(count)
    }

    /// Releases the snapshot database.
    pub async fn close(self) {
        self.db.close().await;
    }

    // =========================================================================
    // Internals
    // =========================================================================

    /// Persists `next` and only then makes it the current list.
    async fn commit(&mut self, next: Vec<Product>) -> SyncResult<()> {
        if let Err(err) = self.db.snapshots().save_json(&self.snapshot_key, &next).await {
            error!(key = %self.snapshot_key, error = %err, "Failed to persist snapshot");
            return Err(err.into());
        }

        self.products = next;
        Ok(())
    }

    /// Snapshot for a fresh store. An unreadable snapshot is logged and
    /// replaced by the next successful mutation.
    async fn startup_snapshot(&self) -> SyncResult<Vec<Product>> {
        match self.load_snapshot().await {
            Err(SyncError::Persistence(DbError::CorruptSnapshot { key, reason })) => {
                warn!(key = %key, reason = %reason, "Ignoring unreadable snapshot");
                Ok(Vec::new())
            }
            other => other,
        }
    }
}

/// Keeps one record per id: the last one wins, at the first one's position.
fn collapse_duplicate_ids(products: Vec<Product>) -> Vec<Product> {
    let mut unique: Vec<Product> = Vec::with_capacity(products.len());

    for product in products {
        match unique.iter_mut().find(|p| p.id == product.id) {
            Some(existing) => {
                warn!(id = product.id, "Duplicate product id, keeping the later record");
                *existing = product;
            }
            None => unique.push(product),
        }
    }

    unique
}
