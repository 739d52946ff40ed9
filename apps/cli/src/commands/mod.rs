//! # Command Handlers
//!
//! Every user action the CLI can perform, as plain async functions over
//! [`AppState`](crate::state::AppState).
//!
//! ## Command Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  product.rs   list_products, submit_product, begin_edit,               │
//! │               cancel_edit, delete_product                              │
//! │  sync.rs      sync_products, clear_products                            │
//! │  config.rs    show_config, save_config                                 │
//! │                                                                         │
//! │  Each returns a DTO or an ApiError; the caller turns the outcome into  │
//! │  a Notice:                                                             │
//! │      [OK] Product added: Mouse ($25.00)                                │
//! │      [ERROR] name must be at least 3 characters                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod product;
pub mod sync;

pub use config::{save_config, show_config};
pub use product::{
    begin_edit, cancel_edit, delete_product, list_products, submit_product, ProductDto,
    ProductForm, SubmitOutcome,
};
pub use sync::{clear_products, sync_products, SyncReport};

use std::fmt;

use crate::error::ApiError;

/// Kind of a transient notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// One-line message shown after a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Notice {
            kind: NoticeKind::Success,
            message: message.into(),
        }
    }

    pub fn error(err: &ApiError) -> Self {
        Notice {
            kind: NoticeKind::Error,
            message: err.message.clone(),
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self.kind {
            NoticeKind::Success => "[OK]",
            NoticeKind::Error => "[ERROR]",
        };
        write!(f, "{} {}", tag, self.message)
    }
}
