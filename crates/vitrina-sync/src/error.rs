//! # Sync Error Types
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  SyncError                                                              │
//! │  ├── Configuration   InvalidConfig, InvalidUrl, ConfigLoad/SaveFailed  │
//! │  ├── Remote          Network, HttpStatus, InvalidResponse,             │
//! │  │                   RemoteDisabled, RemoteUnavailable                 │
//! │  │                   (degrade to local-only behavior, never fatal)     │
//! │  ├── Store           Validation, NotFound                              │
//! │  └── Persistence     DbError from the snapshot repository              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;
use vitrina_core::{ProductId, ValidationError};
use vitrina_db::DbError;

/// Result type alias for sync operations.
pub type SyncResult<T> = Result<T, SyncError>;

/// Every failure the store, its remote client or its configuration can report.
#[derive(Debug, Error)]
pub enum SyncError {
    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// Invalid configuration value.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Invalid remote URL.
    #[error("Invalid remote URL: {0}")]
    InvalidUrl(String),

    /// Failed to load config file.
    #[error("Failed to load config: {0}")]
    ConfigLoadFailed(String),

    /// Failed to save config file.
    #[error("Failed to save config: {0}")]
    ConfigSaveFailed(String),

    // =========================================================================
    // Remote Errors
    // =========================================================================
    /// The request never produced a response (refused, DNS, timeout).
    #[error("Network error: {0}")]
    Network(String),

    /// The remote answered with a non-2xx status.
    #[error("Remote returned HTTP {status}: {message}")]
    HttpStatus { status: u16, message: String },

    /// The response body could not be decoded.
    #[error("Invalid response from remote: {0}")]
    InvalidResponse(String),

    /// Remote calls are turned off (offline mode).
    #[error("Remote store is disabled (offline mode)")]
    RemoteDisabled,

    /// A full sync failed and the local snapshot was used instead.
    #[error("Remote store unavailable, using local data: {0}")]
    RemoteUnavailable(String),

    // =========================================================================
    // Store Errors
    // =========================================================================
    /// Input rejected before any mutation.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// No product with this id in the list.
    #[error("Product not found: {0}")]
    NotFound(ProductId),

    // =========================================================================
    // Persistence Errors
    // =========================================================================
    /// Reading or writing the local snapshot failed.
    #[error("Snapshot storage failed: {0}")]
    Persistence(#[from] DbError),
}

// =============================================================================
// Error Conversions
// =============================================================================

impl From<reqwest::Error> for SyncError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            SyncError::InvalidResponse(err.to_string())
        } else if let Some(status) = err.status() {
            SyncError::HttpStatus {
                status: status.as_u16(),
                message: err.to_string(),
            }
        } else {
            SyncError::Network(err.to_string())
        }
    }
}

impl From<url::ParseError> for SyncError {
    fn from(err: url::ParseError) -> Self {
        SyncError::InvalidUrl(err.to_string())
    }
}

impl From<std::io::Error> for SyncError {
    fn from(err: std::io::Error) -> Self {
        SyncError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::de::Error> for SyncError {
    fn from(err: toml::de::Error) -> Self {
        SyncError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::ser::Error> for SyncError {
    fn from(err: toml::ser::Error) -> Self {
        SyncError::ConfigSaveFailed(err.to_string())
    }
}

// =============================================================================
// Error Categorization
// =============================================================================

impl SyncError {
    /// Returns true if the remote store could not serve the request.
    ///
    /// Mutations swallow these (after logging) and keep the local change.
    pub fn is_remote_failure(&self) -> bool {
        matches!(
            self,
            SyncError::Network(_)
                | SyncError::HttpStatus { .. }
                | SyncError::InvalidResponse(_)
                | SyncError::RemoteDisabled
                | SyncError::RemoteUnavailable(_)
        )
    }

    /// Returns true if this error indicates a configuration problem.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            SyncError::InvalidConfig(_)
                | SyncError::InvalidUrl(_)
                | SyncError::ConfigLoadFailed(_)
                | SyncError::ConfigSaveFailed(_)
        )
    }
}
