//! # Argument Parsing
//!
//! clap definitions for the `vitrina` binary and for lines typed into the
//! interactive shell. Both share [`CatalogCommand`].
//!
//! ```text
//! vitrina [--config PATH] [--offline] [-v…] <COMMAND>
//!
//!   list [--json]                         add NAME PRICE [DESCRIPTION]
//!   update ID NAME PRICE [DESCRIPTION]    delete ID [--yes]
//!   sync                                  clear [--yes]
//!   shell                                 config [--save]
//!
//! shell> edit ID | save NAME PRICE [DESCRIPTION] | cancel | quit | …
//! ```

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

use vitrina_core::ProductId;

/// Vitrina - product catalog with offline-first sync
#[derive(Parser, Debug)]
#[command(name = "vitrina")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Config file (default: platform config directory)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Never contact the remote store
    #[arg(long, global = true)]
    pub offline: bool,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    #[command(flatten)]
    Catalog(CatalogCommand),

    /// Interactive shell: loads local data, syncs, then reads commands
    Shell,

    /// Show the effective configuration
    Config {
        /// Write it to the config file instead
        #[arg(long)]
        save: bool,
    },
}

/// Commands available both as subcommands and inside the shell.
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum CatalogCommand {
    /// List products
    List {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Add a product (in the shell, saves the product being edited)
    #[command(visible_alias = "save")]
    Add {
        /// At least 3 characters
        name: String,
        /// Number greater than 0
        #[arg(allow_hyphen_values = true)]
        price: String,
        /// Optional; defaults to "Sin descripción"
        description: Option<String>,
    },

    /// Replace the fields of a product
    Update {
        id: ProductId,
        name: String,
        #[arg(allow_hyphen_values = true)]
        price: String,
        description: Option<String>,
    },

    /// Delete a product
    Delete {
        id: ProductId,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Replace local products with the remote collection
    Sync,

    /// Delete every local product (the remote store is untouched)
    Clear {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

impl CatalogCommand {
    /// Question to ask before running a destructive command, if any.
    pub fn confirmation(&self) -> Option<String> {
        match self {
            CatalogCommand::Delete { id, yes: false } => {
                Some(format!("Delete product {}? [y/N] ", id))
            }
            CatalogCommand::Clear { yes: false } => {
                Some("Delete ALL local products? [y/N] ".to_string())
            }
            _ => None,
        }
    }
}

/// Accepts y/yes (and s/si/sí).
pub fn is_yes(answer: &str) -> bool {
    matches!(
        answer.trim().to_lowercase().as_str(),
        "y" | "yes" | "s" | "si" | "sí"
    )
}

/// One line typed into the shell.
#[derive(Parser, Debug)]
#[command(name = "vitrina", no_binary_name = true, disable_version_flag = true)]
pub struct ShellLine {
    #[command(subcommand)]
    pub command: ShellCommand,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum ShellCommand {
    #[command(flatten)]
    Catalog(CatalogCommand),

    /// Start editing a product; the next `save` updates it
    Edit { id: ProductId },

    /// Abandon the current edit
    Cancel,

    /// Leave the shell
    #[command(visible_alias = "exit")]
    Quit,
}
