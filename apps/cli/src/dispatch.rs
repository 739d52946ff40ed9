//! # Dispatch
//!
//! Routes a [`CatalogCommand`] to its handler and renders the outcome as
//! text: a product table, JSON, or an `[OK]` notice. Errors are returned
//! for the caller to render.

use vitrina_core::ProductId;

use crate::cli::CatalogCommand;
use crate::commands::{
    self, begin_edit, clear_products, delete_product, list_products, submit_product,
    sync_products, Notice, ProductDto, ProductForm, SubmitOutcome,
};
use crate::error::ApiError;
use crate::state::{AppState, ConfigState};

/// Runs `command` and returns what to print.
pub async fn execute(state: &mut AppState, command: CatalogCommand) -> Result<String, ApiError> {
    match command {
        CatalogCommand::List { json } => {
            let products = list_products(state)?;
            if json {
                serde_json::to_string_pretty(&products)
                    .map_err(|e| ApiError::internal(format!("Failed to encode products: {}", e)))
            } else {
                Ok(render_products(&products, &state.config, state.edit.current()))
            }
        }

        CatalogCommand::Add {
            name,
            price,
            description,
        } => {
            let outcome = submit_product(state, ProductForm::new(name, price, description)).await?;
            Ok(submit_notice(&outcome, &state.config).to_string())
        }

        CatalogCommand::Update {
            id,
            name,
            price,
            description,
        } => {
            let previous = state.edit.current();
            begin_edit(state, id)?;

            let result = submit_product(state, ProductForm::new(name, price, description)).await;
            if result.is_err() {
                restore_edit(state, previous);
            }
            Ok(submit_notice(&result?, &state.config).to_string())
        }

        CatalogCommand::Delete { id, .. } => {
            let notice = match delete_product(state, id).await? {
                Some(removed) => Notice::success(format!("Product deleted: {}", removed.name)),
                None => Notice::success(format!("No local product with id {}", id)),
            };
            Ok(notice.to_string())
        }

        CatalogCommand::Sync => {
            let report = sync_products(state).await?;
            Ok(Notice::success(format!("{} products synced from the server", report.synced)).to_string())
        }

        CatalogCommand::Clear { .. } => {
            let cleared = clear_products(state).await?;
            Ok(Notice::success(format!("All local data deleted ({} products)", cleared)).to_string())
        }
    }
}

fn restore_edit(state: &mut AppState, previous: Option<ProductId>) {
    match previous {
        Some(id) => state.edit.begin(id),
        None => {
            commands::cancel_edit(state);
        }
    }
}

fn submit_notice(outcome: &SubmitOutcome, config: &ConfigState) -> Notice {
    let (verb, product) = match outcome {
        SubmitOutcome::Created(p) => ("added", p),
        SubmitOutcome::Updated(p) => ("updated", p),
    };

    Notice::success(format!(
        "Product {}: {} ({})",
        verb,
        product.name,
        config.format_price(product.price)
    ))
}

/// Renders products as an aligned table. The product being edited is
/// marked with `*`.
pub fn render_products(
    products: &[ProductDto],
    config: &ConfigState,
    editing: Option<ProductId>,
) -> String {
    if products.is_empty() {
        return "No products yet. Add one with `add NAME PRICE [DESCRIPTION]`.".to_string();
    }

    let rows: Vec<[String; 4]> = products
        .iter()
        .map(|p| {
            [
                p.id.to_string(),
                p.name.clone(),
                config.format_price(p.price),
                p.description.clone(),
            ]
        })
        .collect();

    let header = ["ID", "NAME", "PRICE", "DESCRIPTION"];
    let width = |col: usize| {
        rows.iter()
            .map(|r| r[col].chars().count())
            .chain(std::iter::once(header[col].len()))
            .max()
            .unwrap_or(0)
    };
    let (w_id, w_name, w_price) = (width(0), width(1), width(2));

    let mut out = format!(
        "  {:<w_id$}  {:<w_name$}  {:>w_price$}  {}",
        header[0], header[1], header[2], header[3]
    );

    for (product, row) in products.iter().zip(&rows) {
        let marker = if Some(product.id) == editing { '*' } else { ' ' };
        out.push('\n');
        out.push_str(&format!(
            "{} {:<w_id$}  {:<w_name$}  {:>w_price$}  {}",
            marker, row[0], row[1], row[2], row[3]
        ));
    }

    out.push_str(&format!("\n{} product(s)", products.len()));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::{failing_remote, state_for};
    use crate::error::ErrorCode;

    fn add(name: &str, price: &str) -> CatalogCommand {
        CatalogCommand::Add {
            name: name.into(),
            price: price.into(),
            description: None,
        }
    }

    #[tokio::test]
    async fn test_add_renders_currency_notice() {
        let server = failing_remote().await;
        let mut state = state_for(&server).await;

        let out = execute(&mut state, add("Mouse", "25")).await.unwrap();

        assert_eq!(out, "[OK] Product added: Mouse ($25.00)");
    }

    #[tokio::test]
    async fn test_update_command() {
        let server = failing_remote().await;
        let mut state = state_for(&server).await;
        execute(&mut state, add("Mouse", "25")).await.unwrap();
        let id = state.store.list()[0].id;

        let out = execute(
            &mut state,
            CatalogCommand::Update {
                id,
                name: "Mouse Pro".into(),
                price: "30".into(),
                description: None,
            },
        )
        .await
        .unwrap();

        assert_eq!(out, "[OK] Product updated: Mouse Pro ($30.00)");
        assert_eq!(state.edit.current(), None);
    }

    #[tokio::test]
    async fn test_failed_update_restores_edit_marker() {
        let server = failing_remote().await;
        let mut state = state_for(&server).await;
        execute(&mut state, add("Mouse", "25")).await.unwrap();
        execute(&mut state, add("Teclado", "40")).await.unwrap();
        let (first, second) = (state.store.list()[0].id, state.store.list()[1].id);
        begin_edit(&mut state, first).unwrap();

        let err = execute(
            &mut state,
            CatalogCommand::Update {
                id: second,
                name: "Teclado".into(),
                price: "0".into(),
                description: None,
            },
        )
        .await
        .unwrap_err();

        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(state.edit.current(), Some(first));
    }

    #[tokio::test]
    async fn test_update_unknown_id() {
        let server = failing_remote().await;
        let mut state = state_for(&server).await;

        let err = execute(
            &mut state,
            CatalogCommand::Update {
                id: 5,
                name: "Mouse".into(),
                price: "10".into(),
                description: None,
            },
        )
        .await
        .unwrap_err();

        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn test_list_json() {
        let server = failing_remote().await;
        let mut state = state_for(&server).await;
        execute(&mut state, add("Mouse", "25")).await.unwrap();

        let out = execute(&mut state, CatalogCommand::List { json: true })
            .await
            .unwrap();
        let parsed: Vec<ProductDto> = serde_json::from_str(&out).unwrap();

        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].name, "Mouse");
    }

    #[tokio::test]
    async fn test_delete_and_clear_notices() {
        let server = failing_remote().await;
        let mut state = state_for(&server).await;
        execute(&mut state, add("Mouse", "25")).await.unwrap();
        execute(&mut state, add("Teclado", "40")).await.unwrap();
        let id = state.store.list()[0].id;

        let out = execute(&mut state, CatalogCommand::Delete { id, yes: true })
            .await
            .unwrap();
        assert_eq!(out, "[OK] Product deleted: Mouse");

        let out = execute(&mut state, CatalogCommand::Clear { yes: true })
            .await
            .unwrap();
        assert_eq!(out, "[OK] All local data deleted (1 products)");
    }

    #[test]
    fn test_render_products_table() {
        let products = vec![
            ProductDto {
                id: 1,
                name: "Mouse".into(),
                price: 25.0,
                description: "Sin descripción".into(),
            },
            ProductDto {
                id: 12,
                name: "Teclado mecánico".into(),
                price: 140.5,
                description: "RGB".into(),
            },
        ];

        let table = render_products(&products, &ConfigState::default(), Some(12));
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "  ID  NAME                PRICE  DESCRIPTION");
        assert_eq!(lines[1], "  1   Mouse              $25.00  Sin descripción");
        assert_eq!(lines[2], "* 12  Teclado mecánico  $140.50  RGB");
        assert_eq!(lines[3], "2 product(s)");
    }

    #[test]
    fn test_render_empty() {
        let out = render_products(&[], &ConfigState::default(), None);
        assert!(out.starts_with("No products yet."));
    }
}
