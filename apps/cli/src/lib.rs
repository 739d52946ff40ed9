//! # vitrina-cli: Command-Line Front End for Vitrina
//!
//! ## Startup Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  1. init_tracing(-v count)     RUST_LOG wins when set                  │
//! │  2. AppConfig::load            defaults → config.toml → VITRINA_* env  │
//! │  3. --offline                  forces RemoteMode::Offline              │
//! │  4. open_state                 SQLite snapshot → ProductStore          │
//! │  5. one-shot command           dispatch::execute, print, exit          │
//! │     or shell                   startup sync, then line loop            │
//! │  6. AppState::close            release the snapshot database           │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//! - [`cli`] - clap definitions
//! - [`commands`] - Command handlers and notices
//! - [`dispatch`] - Command routing and rendering
//! - [`error`] - `ApiError`
//! - [`shell`] - Interactive shell
//! - [`state`] - Application state

pub mod cli;
pub mod commands;
pub mod dispatch;
pub mod error;
pub mod shell;
pub mod state;

use std::path::PathBuf;

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;
use tracing_subscriber::EnvFilter;

use vitrina_db::{Database, DbConfig};
use vitrina_sync::{AppConfig, ProductStore, RemoteMode};

use crate::cli::{is_yes, Cli, Command};
use crate::commands::{save_config, show_config, Notice};
use crate::error::{ApiError, ErrorCode};
use crate::state::{AppState, ConfigState};

/// Runs the parsed command line.
pub async fn run(cli: Cli) -> Result<(), ApiError> {
    let mut config = AppConfig::load(cli.config.clone())?;
    if cli.offline {
        config.remote.mode = RemoteMode::Offline;
    }

    match cli.command {
        Command::Config { save } => {
            if save {
                save_config(&config, cli.config)?;
                println!("{}", Notice::success("Config saved"));
            } else {
                print!("{}", show_config(&config)?);
            }
            Ok(())
        }

        Command::Shell => {
            let mut state = open_state(&config).await?;
            let stdin = BufReader::new(tokio::io::stdin());
            let mut stdout = std::io::stdout();

            let result = shell::run(&mut state, stdin, &mut stdout).await;
            state.close().await;
            result.map_err(|e| ApiError::internal(format!("Terminal I/O failed: {}", e)))
        }

        Command::Catalog(command) => {
            if let Some(question) = command.confirmation() {
                if !confirm(&question).await? {
                    println!("Cancelled");
                    return Ok(());
                }
            }

            let mut state = open_state(&config).await?;
            let result = dispatch::execute(&mut state, command).await;
            state.close().await;

            println!("{}", result?);
            Ok(())
        }
    }
}

/// Opens the snapshot database and the product store.
pub async fn open_state(config: &AppConfig) -> Result<AppState, ApiError> {
    let path = database_path(config)?;
    let db = Database::new(DbConfig::new(&path)).await?;
    let store = ProductStore::open(config, db).await?;

    info!(path = %path.display(), mode = %config.mode(), "Vitrina ready");
    Ok(AppState::new(store, ConfigState::from_env()))
}

/// Resolves the database file and creates its directory.
fn database_path(config: &AppConfig) -> Result<PathBuf, ApiError> {
    let path = config.database_path().ok_or_else(|| {
        ApiError::new(
            ErrorCode::ConfigError,
            "Could not determine a data directory; set VITRINA_DB_PATH",
        )
    })?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| {
            ApiError::storage(format!("Could not create {}: {}", parent.display(), e))
        })?;
    }

    Ok(path)
}

/// Asks a yes/no question on the terminal.
async fn confirm(question: &str) -> Result<bool, ApiError> {
    use std::io::Write;

    print!("{}", question);
    std::io::stdout()
        .flush()
        .map_err(|e| ApiError::internal(e.to_string()))?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let answer = lines
        .next_line()
        .await
        .map_err(|e| ApiError::internal(e.to_string()))?
        .unwrap_or_default();

    Ok(is_yes(&answer))
}

/// Initializes the tracing subscriber.
///
/// ## Log Levels
/// - no flag: `warn,vitrina=info`
/// - `-v`: `info,vitrina=debug`
/// - `-vv`: `debug`
/// - `-vvv`: `trace`
///
/// `RUST_LOG` overrides all of the above. Logs go to stderr so stdout stays
/// clean for `list --json`.
pub fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn,vitrina=info",
        1 => "info,vitrina=debug",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::CatalogCommand;

    fn offline_config(db_path: PathBuf) -> AppConfig {
        let mut config = AppConfig::default();
        config.remote.mode = RemoteMode::Offline;
        config.storage.database_path = Some(db_path);
        config
    }

    #[tokio::test]
    async fn test_products_survive_restart() {
        let dir = tempfile::tempdir().unwrap();
        let config = offline_config(dir.path().join("data").join("vitrina.db"));

        let mut state = open_state(&config).await.unwrap();
        dispatch::execute(
            &mut state,
            CatalogCommand::Add {
                name: "Mouse".into(),
                price: "25".into(),
                description: None,
            },
        )
        .await
        .unwrap();
        state.close().await;

        let state = open_state(&config).await.unwrap();
        let products = state.store.list();
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].name, "Mouse");
        assert_eq!(products[0].description, "Sin descripción");
        state.close().await;
    }

    #[test]
    fn test_database_path_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b").join("vitrina.db");

        let path = database_path(&offline_config(nested.clone())).unwrap();

        assert_eq!(path, nested);
        assert!(dir.path().join("a").join("b").is_dir());
    }
}
