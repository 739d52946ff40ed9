//! # Interactive Shell
//!
//! Line-oriented front end over the command handlers.
//!
//! ## Session
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  startup   list already loaded from the snapshot                       │
//! │            → initial sync (skipped in offline mode)                    │
//! │                                                                         │
//! │  loop      prompt → read line → tokenize → ShellLine::try_parse_from   │
//! │              edit / cancel      → EditState                            │
//! │              delete / clear     → ask for confirmation first           │
//! │              everything else    → dispatch::execute                    │
//! │            print [OK] … / [ERROR] …                                    │
//! │                                                                         │
//! │  exit      `quit`, `exit`, or end of input                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use clap::Parser;
use std::io::{self, Write};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::debug;

use crate::cli::{is_yes, ShellCommand, ShellLine};
use crate::commands::{begin_edit, cancel_edit, sync_products, Notice};
use crate::dispatch;
use crate::error::ApiError;
use crate::state::AppState;

/// Runs the shell until `quit` or end of input.
pub async fn run<R, W>(state: &mut AppState, input: R, out: &mut W) -> io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut lines = input.lines();

    writeln!(out, "{}", startup(state).await)?;

    loop {
        write!(out, "{}", prompt(state))?;
        out.flush()?;

        let Some(line) = lines.next_line().await? else {
            writeln!(out)?;
            break;
        };

        let tokens = match tokenize(&line) {
            Ok(tokens) if tokens.is_empty() => continue,
            Ok(tokens) => tokens,
            Err(reason) => {
                writeln!(out, "{}", Notice::error(&ApiError::validation(reason)))?;
                continue;
            }
        };

        let command = match ShellLine::try_parse_from(&tokens) {
            Ok(parsed) => parsed.command,
            Err(e) => {
                // Also covers `help` and `--help`.
                write!(out, "{}", e)?;
                continue;
            }
        };
        debug!(?command, "Shell command");

        match command {
            ShellCommand::Quit => break,

            ShellCommand::Edit { id } => {
                let notice = match begin_edit(state, id) {
                    Ok(p) => Notice::success(format!(
                        "Editing {}: {} ({}) - {}. Use `save NAME PRICE [DESCRIPTION]` or `cancel`.",
                        p.id,
                        p.name,
                        state.config.format_price(p.price),
                        p.description
                    )),
                    Err(e) => Notice::error(&e),
                };
                writeln!(out, "{}", notice)?;
            }

            ShellCommand::Cancel => {
                cancel_edit(state);
                writeln!(out, "{}", Notice::success("Edit cancelled"))?;
            }

            ShellCommand::Catalog(command) => {
                if let Some(question) = command.confirmation() {
                    write!(out, "{}", question)?;
                    out.flush()?;
                    let answer = lines.next_line().await?.unwrap_or_default();
                    if !is_yes(&answer) {
                        writeln!(out, "Cancelled")?;
                        continue;
                    }
                }

                match dispatch::execute(state, command).await {
                    Ok(text) => writeln!(out, "{}", text)?,
                    Err(e) => writeln!(out, "{}", Notice::error(&e))?,
                }
            }
        }
    }

    Ok(())
}

/// Initial sync, like a page load: local data first, then the server.
async fn startup(state: &mut AppState) -> Notice {
    if !state.store.is_online() {
        return Notice::success(format!(
            "Offline mode: {} local products",
            state.store.list().len()
        ));
    }

    match sync_products(state).await {
        Ok(report) => Notice::success(format!(
            "{} products synced from the server",
            report.synced
        )),
        Err(e) => Notice::error(&e),
    }
}

fn prompt(state: &AppState) -> String {
    match state.edit.current() {
        Some(id) => format!("vitrina (editing {})> ", id),
        None => "vitrina> ".to_string(),
    }
}

/// Splits a line into words, honoring quotes and backslash escapes.
///
/// ```rust
/// use vitrina_cli::shell::tokenize;
///
/// assert_eq!(
///     tokenize(r#"add "Teclado mecánico" 40 'RGB, USB'"#).unwrap(),
///     vec!["add", "Teclado mecánico", "40", "RGB, USB"]
/// );
/// ```
pub fn tokenize(line: &str) -> Result<Vec<String>, String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_token = false;
    let mut quote: Option<char> = None;
    let mut chars = line.chars();

    while let Some(c) = chars.next() {
        match (quote, c) {
            (Some('\''), '\'') => quote = None,
            (Some('\''), c) => current.push(c),
            (_, '\\') => match chars.next() {
                Some(escaped) => {
                    current.push(escaped);
                    in_token = true;
                }
                None => return Err("Trailing backslash".to_string()),
            },
            (Some('"'), '"') => quote = None,
            (Some(_), c) => current.push(c),
            (None, '"' | '\'') => {
                quote = Some(c);
                in_token = true;
            }
            (None, c) if c.is_whitespace() => {
                if in_token {
                    tokens.push(std::mem::take(&mut current));
                    in_token = false;
                }
            }
            (None, c) => {
                current.push(c);
                in_token = true;
            }
        }
    }

    if quote.is_some() {
        return Err("Unterminated quote".to_string());
    }
    if in_token {
        tokens.push(current);
    }

    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::{failing_remote, state_for};
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn run_script(state: &mut AppState, script: &str) -> String {
        let mut out = Vec::new();
        run(state, script.as_bytes(), &mut out).await.unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_tokenize() {
        assert_eq!(tokenize("  list  ").unwrap(), vec!["list"]);
        assert_eq!(tokenize("").unwrap(), Vec::<String>::new());
        assert_eq!(
            tokenize(r#"add Mouse 25 "Sin cable""#).unwrap(),
            vec!["add", "Mouse", "25", "Sin cable"]
        );
        assert_eq!(tokenize(r"add Mouse\ Pro 25").unwrap(), vec!["add", "Mouse Pro", "25"]);
        assert_eq!(tokenize(r#"add "" 25"#).unwrap(), vec!["add", "", "25"]);
        assert_eq!(tokenize(r#"say 'it\'"#).unwrap(), vec!["say", "it\\"]);
        assert!(tokenize(r#"add "Mouse 25"#).is_err());
    }

    #[tokio::test]
    async fn test_session_with_unreachable_remote() {
        let server = failing_remote().await;
        let mut state = state_for(&server).await;

        let out = run_script(&mut state, "add Mouse 25\nadd ab 10\nlist\nquit\n").await;

        assert!(out.contains("[ERROR] Remote store unavailable"));
        assert!(out.contains("[OK] Product added: Mouse ($25.00)"));
        assert!(out.contains("[ERROR] name must be at least 3 characters"));
        assert!(out.contains("Sin descripción"));
        assert_eq!(state.store.list().len(), 1);
    }

    #[tokio::test]
    async fn test_startup_sync_loads_remote_products() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/products"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"id": 1, "name": "Mouse", "price": 25.0, "description": "Sin descripción"}
            ])))
            .mount(&server)
            .await;
        let mut state = state_for(&server).await;

        let out = run_script(&mut state, "").await;

        assert!(out.starts_with("[OK] 1 products synced from the server"));
        assert_eq!(state.store.list().len(), 1);
    }

    #[tokio::test]
    async fn test_edit_then_save_updates() {
        let server = failing_remote().await;
        let mut state = state_for(&server).await;
        let out = run_script(&mut state, "add Mouse 25\n").await;
        assert!(out.contains("Product added"));
        let id = state.store.list()[0].id;

        let script = format!("edit {id}\nsave \"Mouse Pro\" 30\nlist\n");
        let out = run_script(&mut state, &script).await;

        assert!(out.contains(&format!("vitrina (editing {id})> ")));
        assert!(out.contains("[OK] Product updated: Mouse Pro ($30.00)"));
        assert_eq!(state.store.list().len(), 1);
        assert_eq!(state.store.list()[0].name, "Mouse Pro");
        assert_eq!(state.edit.current(), None);
    }

    #[tokio::test]
    async fn test_edit_unknown_and_cancel() {
        let server = failing_remote().await;
        let mut state = state_for(&server).await;

        let out = run_script(&mut state, "edit 404\ncancel\n").await;

        assert!(out.contains("[ERROR] Product not found: 404"));
        assert!(out.contains("[OK] Edit cancelled"));
    }

    #[tokio::test]
    async fn test_delete_asks_for_confirmation() {
        let server = failing_remote().await;
        let mut state = state_for(&server).await;
        run_script(&mut state, "add Mouse 25\n").await;
        let id = state.store.list()[0].id;

        let out = run_script(&mut state, &format!("delete {id}\nn\n")).await;
        assert!(out.contains("Cancelled"));
        assert_eq!(state.store.list().len(), 1);

        let out = run_script(&mut state, &format!("delete {id}\ny\n")).await;
        assert!(out.contains("[OK] Product deleted: Mouse"));
        assert!(state.store.list().is_empty());
    }

    #[tokio::test]
    async fn test_parse_errors_do_not_end_session() {
        let server = failing_remote().await;
        let mut state = state_for(&server).await;

        let out = run_script(&mut state, "frobnicate\nadd \"Mouse 25\nclear --yes\n").await;

        assert!(out.contains("unrecognized subcommand"));
        assert!(out.contains("[ERROR] Unterminated quote"));
        assert!(out.contains("[OK] All local data deleted (0 products)"));
    }
}
