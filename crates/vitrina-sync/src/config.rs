//! # Configuration
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     VITRINA_REMOTE_MODE=offline                                        │
//! │     VITRINA_API_URL=http://localhost:3000                              │
//! │     VITRINA_REMOTE_TIMEOUT=10                                          │
//! │     VITRINA_DB_PATH=/tmp/vitrina.db                                    │
//! │     VITRINA_SNAPSHOT_KEY=products                                      │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/vitrina/config.toml (Linux)                              │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [remote]
//! mode = "online"                  # online | offline
//! base_url = "http://localhost:3000"
//! collection = "products"
//! timeout_secs = 10                # 0 = no timeout
//!
//! [storage]
//! database_path = "/var/lib/vitrina/vitrina.db"
//! snapshot_key = "products"
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

use crate::error::{SyncError, SyncResult};

// =============================================================================
// Remote Mode
// =============================================================================

/// Whether the store talks to the remote collection at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RemoteMode {
    /// Try the remote first, fall back to the local snapshot.
    #[default]
    Online,

    /// Skip every remote call; local snapshot only.
    Offline,
}

impl RemoteMode {
    pub fn is_enabled(&self) -> bool {
        matches!(self, RemoteMode::Online)
    }
}

impl std::fmt::Display for RemoteMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RemoteMode::Online => write!(f, "online"),
            RemoteMode::Offline => write!(f, "offline"),
        }
    }
}

impl std::str::FromStr for RemoteMode {
    type Err = SyncError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "online" | "remote" => Ok(RemoteMode::Online),
            "offline" | "local" | "disabled" => Ok(RemoteMode::Offline),
            other => Err(SyncError::InvalidConfig(format!(
                "Unknown remote mode: '{}'. Valid options: online, offline",
                other
            ))),
        }
    }
}

// =============================================================================
// Remote Settings
// =============================================================================

/// Where and how to reach the remote collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteSettings {
    #[serde(default)]
    pub mode: RemoteMode,

    /// Server root, e.g. `http://localhost:3000`.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Collection path segment under the base URL.
    #[serde(default = "default_collection")]
    pub collection: String,

    /// Per-request timeout in seconds. 0 disables the timeout.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://localhost:3000".to_string()
}

fn default_collection() -> String {
    "products".to_string()
}

fn default_timeout() -> u64 {
    10
}

impl Default for RemoteSettings {
    fn default() -> Self {
        RemoteSettings {
            mode: RemoteMode::default(),
            base_url: default_base_url(),
            collection: default_collection(),
            timeout_secs: default_timeout(),
        }
    }
}

// =============================================================================
// Storage Settings
// =============================================================================

/// Where the local snapshot lives.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageSettings {
    /// SQLite file. Defaults to the platform data directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database_path: Option<PathBuf>,

    /// Key holding the serialized product list.
    #[serde(default = "default_snapshot_key")]
    pub snapshot_key: String,
}

fn default_snapshot_key() -> String {
    "products".to_string()
}

impl Default for StorageSettings {
    fn default() -> Self {
        StorageSettings {
            database_path: None,
            snapshot_key: default_snapshot_key(),
        }
    }
}

// =============================================================================
// App Config
// =============================================================================

/// Complete configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub remote: RemoteSettings,

    #[serde(default)]
    pub storage: StorageSettings,
}

impl AppConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (config.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> SyncResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_overrides(|name| std::env::var(name).ok());
        config.validate()?;

        Ok(config)
    }

    /// Saves configuration to file.
    pub fn save(&self, config_path: Option<PathBuf>) -> SyncResult<()> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or_else(|| SyncError::ConfigSaveFailed("No config path available".into()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents)?;

        info!(?path, "Config saved");
        Ok(())
    }

    /// Validates the configuration.
    pub fn validate(&self) -> SyncResult<()> {
        self.collection_url()?;

        if self.storage.snapshot_key.trim().is_empty() {
            return Err(SyncError::InvalidConfig(
                "snapshot_key must not be empty".into(),
            ));
        }

        Ok(())
    }

    /// Applies overrides from a variable lookup (the process environment in
    /// production).
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(mode) = lookup("VITRINA_REMOTE_MODE") {
            match mode.parse() {
                Ok(parsed) => {
                    debug!(mode = %mode, "Overriding remote mode from environment");
                    self.remote.mode = parsed;
                }
                Err(_) => warn!(mode = %mode, "Unknown remote mode in environment"),
            }
        }

        if let Some(url) = lookup("VITRINA_API_URL") {
            debug!(url = %url, "Overriding remote URL from environment");
            self.remote.base_url = url;
        }

        if let Some(timeout) = lookup("VITRINA_REMOTE_TIMEOUT") {
            match timeout.parse::<u64>() {
                Ok(secs) => self.remote.timeout_secs = secs,
                Err(_) => warn!(timeout = %timeout, "Ignoring invalid remote timeout"),
            }
        }

        if let Some(path) = lookup("VITRINA_DB_PATH") {
            self.storage.database_path = Some(PathBuf::from(path));
        }

        if let Some(key) = lookup("VITRINA_SNAPSHOT_KEY") {
            self.storage.snapshot_key = key;
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "vitrina", "vitrina")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    /// Full URL of the remote collection, e.g. `http://localhost:3000/products`.
    pub fn collection_url(&self) -> SyncResult<Url> {
        let mut base = Url::parse(self.remote.base_url.trim())?;

        if !matches!(base.scheme(), "http" | "https") {
            return Err(SyncError::InvalidUrl(format!(
                "Remote URL must start with http:// or https://, got: {}",
                self.remote.base_url
            )));
        }

        let collection = self.remote.collection.trim().trim_matches('/');
        if collection.is_empty() {
            return Err(SyncError::InvalidConfig(
                "collection must not be empty".into(),
            ));
        }

        // Url::join replaces the last segment unless the base ends with '/'.
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        Ok(base.join(collection)?)
    }

    /// Per-request timeout, if any.
    pub fn timeout(&self) -> Option<Duration> {
        match self.remote.timeout_secs {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        }
    }

    pub fn mode(&self) -> RemoteMode {
        self.remote.mode
    }

    pub fn snapshot_key(&self) -> &str {
        &self.storage.snapshot_key
    }

    /// Snapshot database file: configured path, else the platform data dir.
    pub fn database_path(&self) -> Option<PathBuf> {
        self.storage.database_path.clone().or_else(|| {
            directories::ProjectDirs::from("com", "vitrina", "vitrina")
                .map(|dirs| dirs.data_dir().join("vitrina.db"))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_remote_mode_parsing() {
        assert_eq!("online".parse::<RemoteMode>().unwrap(), RemoteMode::Online);
        assert_eq!("OFFLINE".parse::<RemoteMode>().unwrap(), RemoteMode::Offline);
        assert_eq!("local".parse::<RemoteMode>().unwrap(), RemoteMode::Offline);
        assert!("sometimes".parse::<RemoteMode>().is_err());
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.mode(), RemoteMode::Online);
        assert_eq!(config.snapshot_key(), "products");
        assert_eq!(config.timeout(), Some(Duration::from_secs(10)));
        assert_eq!(
            config.collection_url().unwrap().as_str(),
            "http://localhost:3000/products"
        );
    }

    #[test]
    fn test_collection_url_keeps_base_path() {
        let mut config = AppConfig::default();
        config.remote.base_url = "https://api.example.com/v1".into();
        config.remote.collection = "/products/".into();

        assert_eq!(
            config.collection_url().unwrap().as_str(),
            "https://api.example.com/v1/products"
        );
    }

    #[test]
    fn test_config_validation() {
        let mut config = AppConfig::default();
        assert!(config.validate().is_ok());

        config.remote.base_url = "ws://localhost:3000".into();
        assert!(config.validate().unwrap_err().is_config_error());

        config.remote.base_url = "not a url".into();
        assert!(config.validate().is_err());

        config.remote.base_url = "http://localhost:3000".into();
        config.storage.snapshot_key = "  ".into();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_overrides() {
        let vars: HashMap<&str, &str> = [
            ("VITRINA_REMOTE_MODE", "offline"),
            ("VITRINA_API_URL", "http://10.0.0.5:3000"),
            ("VITRINA_REMOTE_TIMEOUT", "0"),
            ("VITRINA_DB_PATH", "/tmp/v.db"),
            ("VITRINA_SNAPSHOT_KEY", "catalog"),
        ]
        .into_iter()
        .collect();

        let mut config = AppConfig::default();
        config.apply_overrides(|name| vars.get(name).map(|v| v.to_string()));

        assert_eq!(config.mode(), RemoteMode::Offline);
        assert_eq!(config.remote.base_url, "http://10.0.0.5:3000");
        assert_eq!(config.timeout(), None);
        assert_eq!(config.database_path(), Some(PathBuf::from("/tmp/v.db")));
        assert_eq!(config.snapshot_key(), "catalog");
    }

    #[test]
    fn test_invalid_overrides_are_ignored() {
        let mut config = AppConfig::default();
        config.apply_overrides(|name| match name {
            "VITRINA_REMOTE_MODE" => Some("sideways".into()),
            "VITRINA_REMOTE_TIMEOUT" => Some("soon".into()),
            _ => None,
        });

        assert_eq!(config.mode(), RemoteMode::Online);
        assert_eq!(config.remote.timeout_secs, 10);
    }

    #[test]
    fn test_file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = AppConfig::default();
        config.remote.mode = RemoteMode::Offline;
        config.storage.snapshot_key = "catalog".into();
        config.save(Some(path.clone())).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("[remote]"));
        assert!(contents.contains("[storage]"));

        let loaded: AppConfig = toml::from_str(&contents).unwrap();
        assert_eq!(loaded.mode(), RemoteMode::Offline);
        assert_eq!(loaded.snapshot_key(), "catalog");
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let config: AppConfig = toml::from_str("[remote]\nmode = \"offline\"\n").unwrap();
        assert_eq!(config.mode(), RemoteMode::Offline);
        assert_eq!(config.remote.collection, "products");
        assert_eq!(config.storage.snapshot_key, "products");
    }
}
