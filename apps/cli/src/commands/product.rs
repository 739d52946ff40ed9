//! # Product Commands
//!
//! List, create, edit and delete products.
//!
//! ## Edit Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   begin_edit(17) ──► EditState = Some(17)                              │
//! │        │                                                                │
//! │        ├── submit_product(form) ──► store.update(17, …)                │
//! │        │                            EditState = None                    │
//! │        │                                                                │
//! │        ├── cancel_edit() ─────────► EditState = None                    │
//! │        │                                                                │
//! │        └── delete_product(17) ────► EditState = None                    │
//! │                                                                         │
//! │   No edit in progress: submit_product(form) ──► store.create(…)        │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::{debug, info};

use vitrina_core::validation::{parse_price, validate_product_name};
use vitrina_core::{Product, ProductId, ProductInput};
use vitrina_sync::SyncError;

use crate::error::ApiError;
use crate::state::AppState;

/// Product as shown to the user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDto {
    pub id: ProductId,
    pub name: String,
    pub price: f64,
    pub description: String,
}

impl From<Product> for ProductDto {
    fn from(p: Product) -> Self {
        ProductDto {
            id: p.id,
            name: p.name,
            price: p.price,
            description: p.description,
        }
    }
}

/// The product form as typed: the price is still text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductForm {
    pub name: String,
    pub price: String,
    pub description: Option<String>,
}

impl ProductForm {
    pub fn new(name: impl Into<String>, price: impl Into<String>, description: Option<String>) -> Self {
        ProductForm {
            name: name.into(),
            price: price.into(),
            description,
        }
    }

    /// Checks the name, then parses the price.
    fn to_input(&self) -> Result<ProductInput, ApiError> {
        validate_product_name(&self.name)?;
        let price = parse_price(&self.price)?;

        Ok(ProductInput::new(
            self.name.clone(),
            price,
            self.description.as_deref(),
        ))
    }
}

/// What a submit did.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    Created(ProductDto),
    Updated(ProductDto),
}

impl SubmitOutcome {
    pub fn product(&self) -> &ProductDto {
        match self {
            SubmitOutcome::Created(p) | SubmitOutcome::Updated(p) => p,
        }
    }
}

/// Returns the current product list.
pub fn list_products(state: &AppState) -> Result<Vec<ProductDto>, ApiError> {
    let products: Vec<ProductDto> = state
        .store
        .list()
        .iter()
        .cloned()
        .map(ProductDto::from)
        .collect();

    debug!(count = products.len(), "Listed products");
    Ok(products)
}

/// Saves the form: updates the product being edited, or creates a new one.
///
/// ## Edit Marker
/// Cleared after a successful update, and when the edited product no longer
/// exists. Kept on validation errors so the user can fix the input.
pub async fn submit_product(
    state: &mut AppState,
    form: ProductForm,
) -> Result<SubmitOutcome, ApiError> {
    let start = Instant::now();
    let input = form.to_input()?;

    let outcome = match state.edit.current() {
        Some(id) => {
            let result = state.store.update(id, &input).await;
            if matches!(result, Ok(_) | Err(SyncError::NotFound(_))) {
                state.edit.cancel();
            }
            SubmitOutcome::Updated(result?.into())
        }
        None => SubmitOutcome::Created(state.store.create(&input).await?.into()),
    };

    info!(
        id = outcome.product().id,
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Product submitted"
    );
    Ok(outcome)
}

/// Starts editing `id` and returns its current values.
pub fn begin_edit(state: &mut AppState, id: ProductId) -> Result<ProductDto, ApiError> {
    let product = state
        .store
        .get(id)
        .cloned()
        .ok_or_else(|| ApiError::not_found("Product", id))?;

    state.edit.begin(id);
    debug!(id, "Editing product");
    Ok(product.into())
}

/// Abandons the current edit, returning the id that was being edited.
pub fn cancel_edit(state: &mut AppState) -> Option<ProductId> {
    state.edit.cancel()
}

/// Deletes `id`, returning the removed product if it was in the list.
pub async fn delete_product(
    state: &mut AppState,
    id: ProductId,
) -> Result<Option<ProductDto>, ApiError> {
    let removed = state.store.delete(id).await?;

    if state.edit.forget(id) {
        debug!(id, "Deleted product was being edited");
    }

    Ok(removed.map(ProductDto::from))
}
