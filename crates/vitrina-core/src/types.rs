//! # Domain Types
//!
//! ## Type Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ProductInput ──validated()──► ProductDraft ──from_draft(id)──► Product │
//! │  (raw form data)               (clean fields)                (stored)  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `Product` serializes to exactly the JSON shape the remote collection and
//! the local snapshot use:
//! ```json
//! { "id": 1700000000000, "name": "Mouse", "price": 25.0, "description": "Sin descripción" }
//! ```

use serde::{Deserialize, Serialize};

use crate::validation::{
    normalize_description, validate_price, validate_product_name, ValidationResult,
};
use crate::DEFAULT_DESCRIPTION;

/// Product identifier (server-assigned or provisional).
pub type ProductId = i64;

// =============================================================================
// Product
// =============================================================================

/// A product in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,

    pub name: String,

    pub price: f64,

    /// Records written by other clients may omit the description.
    #[serde(default = "default_description")]
    pub description: String,
}

fn default_description() -> String {
    DEFAULT_DESCRIPTION.to_string()
}

impl Product {
    /// Builds a product from validated data.
    pub fn from_draft(id: ProductId, draft: ProductDraft) -> Self {
        Product {
            id,
            name: draft.name,
            price: draft.price,
            description: draft.description,
        }
    }
}

// =============================================================================
// Product Input
// =============================================================================

/// Raw product data as entered by the user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductInput {
    pub name: String,
    pub price: f64,
    #[serde(default)]
    pub description: Option<String>,
}

impl ProductInput {
    pub fn new(name: impl Into<String>, price: f64, description: Option<&str>) -> Self {
        ProductInput {
            name: name.into(),
            price,
            description: description.map(str::to_string),
        }
    }

    /// Validates and normalizes the input.
    ///
    /// ## Errors
    /// - `TooShort`/`Required` when the trimmed name has fewer than 3 characters
    /// - `MustBePositive` when the price is not a finite number above 0
    pub fn validated(&self) -> ValidationResult<ProductDraft> {
        let name = validate_product_name(&self.name)?;
        let price = validate_price(self.price)?;

        Ok(ProductDraft {
            name,
            price,
            description: normalize_description(self.description.as_deref()),
        })
    }
}

/// Product fields that passed validation. Only obtainable through
/// [`ProductInput::validated`].
#[derive(Debug, Clone, PartialEq)]
pub struct ProductDraft {
    name: String,
    price: f64,
    description: String,
}
