//! # vitrina-core: Pure Product Logic for Vitrina
//!
//! This crate holds the product catalog's domain model with zero I/O
//! dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Vitrina Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    apps/cli (shell + commands)                  │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │           vitrina-sync (ProductStore, remote client)            │   │
//! │  └───────────────┬─────────────────────────────┬───────────────────┘   │
//! │                  │                             │                        │
//! │  ┌───────────────▼──────────────┐  ┌───────────▼───────────────────┐   │
//! │  │ ★ vitrina-core (THIS CRATE) ★│  │ vitrina-db (snapshot storage) │   │
//! │  │  Product • Input • Ids       │  └───────────────────────────────┘   │
//! │  └──────────────────────────────┘                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, ProductInput, ProductDraft)
//! - [`validation`] - Input validation rules
//! - [`id`] - Provisional id generation
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use vitrina_core::{Product, ProductInput};
//!
//! let draft = ProductInput::new("Mouse", 25.0, None).validated().unwrap();
//! let product = Product::from_draft(1_700_000_000_000, draft);
//!
//! assert_eq!(product.description, "Sin descripción");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod id;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::ValidationError;
pub use id::ProvisionalIds;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Description stored when the user leaves the field empty.
pub const DEFAULT_DESCRIPTION: &str = "Sin descripción";

/// Minimum number of characters in a product name (after trimming).
pub const MIN_NAME_LEN: usize = 3;
