//! # API Error Type
//!
//! Unified error type for command handlers.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  Handler                    Layer error                 Notification    │
//! │  ───────                    ───────────                 ────────────    │
//! │                                                                         │
//! │  submit_product ──► SyncError::Validation ──┐                          │
//! │  begin_edit     ──► SyncError::NotFound ────┤                          │
//! │  sync_products  ──► SyncError::Remote… ─────┼──► ApiError ──► [ERROR] …│
//! │  open_state     ──► DbError ────────────────┤                          │
//! │  run            ──► SyncError::InvalidConfig┘                          │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Storage failures are logged with their detail and shown to the user with
//! a generic message.

use serde::Serialize;
use vitrina_core::ValidationError;
use vitrina_db::DbError;
use vitrina_sync::SyncError;

/// Error returned from command handlers.
///
/// ## Serialization
/// ```json
/// {
///   "code": "NOT_FOUND",
///   "message": "Product not found: 1700000000000"
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for handler results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// No product with the requested id
    NotFound,

    /// Input validation failed
    ValidationError,

    /// The remote store could not be reached or answered with an error
    RemoteUnavailable,

    /// Reading or writing the local snapshot failed
    StorageError,

    /// Configuration file or environment is invalid
    ConfigError,

    /// Anything else
    Internal,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: impl std::fmt::Display) -> Self {
        ApiError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    /// Creates a storage error.
    pub fn storage(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::StorageError, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }
}

/// Converts snapshot storage errors to API errors.
impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::ConnectionFailed(e) => {
                tracing::error!("Database connection failed: {}", e);
                ApiError::storage("Could not open local storage")
            }
            DbError::MigrationFailed(e) => {
                tracing::error!("Database migration failed: {}", e);
                ApiError::storage("Local storage migration failed")
            }
            DbError::QueryFailed(e) => {
                tracing::error!("Database query failed: {}", e);
                ApiError::storage("Error saving data locally")
            }
            DbError::PoolExhausted => ApiError::storage("Local storage is busy"),
            DbError::CorruptSnapshot { key, reason } => {
                tracing::error!(key = %key, "Corrupt snapshot: {}", reason);
                ApiError::storage(format!("Local data '{}' is unreadable", key))
            }
            DbError::Internal(e) => {
                tracing::error!("Internal database error: {}", e);
                ApiError::storage("Error saving data locally")
            }
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation(err.to_string())
    }
}

/// Converts store errors to API errors.
impl From<SyncError> for ApiError {
    fn from(err: SyncError) -> Self {
        match err {
            SyncError::Validation(e) => e.into(),
            SyncError::NotFound(id) => ApiError::not_found("Product", id),
            SyncError::Persistence(e) => e.into(),
            e if e.is_remote_failure() => ApiError::new(ErrorCode::RemoteUnavailable, e.to_string()),
            e if e.is_config_error() => ApiError::new(ErrorCode::ConfigError, e.to_string()),
            e => ApiError::internal(e.to_string()),
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}
