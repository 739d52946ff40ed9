//! # vitrina-sync: Product Store & Remote Sync for Vitrina
//!
//! Keeps the product list in step with a remote HTTP collection while
//! staying usable when that collection is unreachable.
//!
//! ## Architecture Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         ProductStore                                    │
//! │                                                                         │
//! │   list() / get()  ◄── in-memory Vec<Product> (authoritative)           │
//! │                                                                         │
//! │   create / update / delete                                             │
//! │        │                                                                │
//! │        ├──► RemoteCatalog ── HTTP ──► {base}/products                  │
//! │        │      (failure logged, never blocks the local change)          │
//! │        │                                                                │
//! │        └──► SnapshotRepository ── SQLite ──► snapshots["products"]     │
//! │               (written before the in-memory list is swapped)           │
//! │                                                                         │
//! │   sync_from_remote                                                      │
//! │        ok   → replace list, write snapshot                             │
//! │        err  → reload snapshot, report RemoteUnavailable                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//! - [`config`] - Remote and storage settings (TOML + env)
//! - [`error`] - Sync error types
//! - [`remote`] - HTTP client for the remote collection
//! - [`store`] - The product store
//!
//! ## Usage
//!
//! ```rust,ignore
//! use vitrina_core::ProductInput;
//! use vitrina_db::{Database, DbConfig};
//! use vitrina_sync::{AppConfig, ProductStore};
//!
//! let config = AppConfig::load(None)?;
//! let db = Database::new(DbConfig::new("vitrina.db")).await?;
//! let mut store = ProductStore::open(&config, db).await?;
//!
//! if let Err(e) = store.sync_from_remote().await {
//!     eprintln!("working offline: {e}");
//! }
//! store.create(&ProductInput::new("Mouse", 25.0, None)).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod config;
pub mod error;
pub mod remote;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use config::{AppConfig, RemoteMode, RemoteSettings, StorageSettings};
pub use error::{SyncError, SyncResult};
pub use remote::RemoteCatalog;
pub use store::ProductStore;
