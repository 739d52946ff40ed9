//! # vitrina-db: Snapshot Storage for Vitrina
//!
//! This crate stores the local snapshot of the product list. It plays the
//! role browser "local storage" plays for a web client: a set of keys, each
//! holding one serialized value.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Vitrina Data Flow                                │
//! │                                                                         │
//! │  ProductStore (vitrina-sync)                                           │
//! │       │  save_json("products", &list)                                   │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     vitrina-db (THIS CRATE)                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌────────────────────┐  ┌────────────┐  │   │
//! │  │   │   Database    │    │ SnapshotRepository │  │ Migrations │  │   │
//! │  │   │   (pool.rs)   │◄───│  get / put / json  │  │ (embedded) │  │   │
//! │  │   └───────────────┘    └────────────────────┘  └────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite file: snapshots(key, value, updated_at)                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use vitrina_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("vitrina.db")).await?;
//! db.snapshots().save_json("products", &products).await?;
//! let restored: Option<Vec<Product>> = db.snapshots().load_json("products").await?;
//! ```

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};
pub use repository::snapshot::SnapshotRepository;
