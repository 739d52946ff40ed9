//! # State Module
//!
//! Everything a command handler can touch, owned in one place.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         AppState                                        │
//! │                                                                         │
//! │  ┌──────────────────┐  ┌──────────────────┐  ┌──────────────────┐      │
//! │  │  ProductStore    │  │   EditState      │  │   ConfigState    │      │
//! │  │                  │  │                  │  │                  │      │
//! │  │  list + remote   │  │  id being edited │  │  currency format │      │
//! │  │  + snapshot      │  │  (or none)       │  │                  │      │
//! │  └──────────────────┘  └──────────────────┘  └──────────────────┘      │
//! │                                                                         │
//! │  Handlers take `&mut AppState`; nothing is shared across threads.      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod config;

pub use config::ConfigState;

use vitrina_core::ProductId;
use vitrina_sync::ProductStore;

/// Application state passed to every handler.
#[derive(Debug)]
pub struct AppState {
    pub store: ProductStore,
    pub edit: EditState,
    pub config: ConfigState,
}

impl AppState {
    pub fn new(store: ProductStore, config: ConfigState) -> Self {
        AppState {
            store,
            edit: EditState::default(),
            config,
        }
    }

    /// Releases the store's database.
    pub async fn close(self) {
        self.store.close().await;
    }
}

/// Which product, if any, the next submit should update.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EditState {
    editing: Option<ProductId>,
}

impl EditState {
    pub fn begin(&mut self, id: ProductId) {
        self.editing = Some(id);
    }

    /// Ends the edit, returning the id that was being edited.
    pub fn cancel(&mut self) -> Option<ProductId> {
        self.editing.take()
    }

    pub fn current(&self) -> Option<ProductId> {
        self.editing
    }

    /// Ends the edit only if it targets `id`.
    pub fn forget(&mut self, id: ProductId) -> bool {
        if self.editing == Some(id) {
            self.editing = None;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edit_marker() {
        let mut edit = EditState::default();
        assert_eq!(edit.current(), None);

        edit.begin(5);
        assert_eq!(edit.current(), Some(5));

        assert!(!edit.forget(6));
        assert_eq!(edit.current(), Some(5));

        assert!(edit.forget(5));
        assert_eq!(edit.cancel(), None);
    }
}
