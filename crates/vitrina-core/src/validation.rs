//! # Validation Module
//!
//! Input validation for product data.
//!
//! ## Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Field         Rule                                  Error              │
//! │  ───────────   ───────────────────────────────────   ──────────────────│
//! │  name          trimmed, at least 3 characters        Required/TooShort  │
//! │  price         finite number, > 0                    MustBePositive     │
//! │  price (text)  must parse as a number                InvalidFormat      │
//! │  description   optional, empty → "Sin descripción"   (never fails)      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;
use crate::{DEFAULT_DESCRIPTION, MIN_NAME_LEN};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Validates a product name and returns it trimmed.
///
/// Length is counted in characters, so "Café" is four long.
///
/// ## Example
/// ```rust
/// use vitrina_core::validation::validate_product_name;
///
/// assert_eq!(validate_product_name("  Mouse ").unwrap(), "Mouse");
/// assert!(validate_product_name("TV").is_err());
/// ```
pub fn validate_product_name(name: &str) -> ValidationResult<String> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.chars().count() < MIN_NAME_LEN {
        return Err(ValidationError::TooShort {
            field: "name".to_string(),
            min: MIN_NAME_LEN,
        });
    }

    Ok(name.to_string())
}

/// Validates a price.
///
/// NaN and infinities are rejected along with zero and negatives.
pub fn validate_price(price: f64) -> ValidationResult<f64> {
    if !price.is_finite() || price <= 0.0 {
        return Err(ValidationError::MustBePositive {
            field: "price".to_string(),
        });
    }

    Ok(price)
}

/// Parses a price typed by the user, then validates it.
///
/// ## Example
/// ```rust
/// use vitrina_core::validation::parse_price;
///
/// assert_eq!(parse_price(" 25.5 ").unwrap(), 25.5);
/// assert!(parse_price("abc").is_err());
/// assert!(parse_price("0").is_err());
/// ```
pub fn parse_price(raw: &str) -> ValidationResult<f64> {
    let raw = raw.trim();

    if raw.is_empty() {
        return Err(ValidationError::Required {
            field: "price".to_string(),
        });
    }

    let price = raw
        .parse::<f64>()
        .map_err(|_| ValidationError::InvalidFormat {
            field: "price".to_string(),
            reason: format!("'{}' is not a number", raw),
        })?;

    validate_price(price)
}

/// Normalizes a description: trimmed, or the default when blank.
pub fn normalize_description(description: Option<&str>) -> String {
    match description.map(str::trim) {
        Some(d) if !d.is_empty() => d.to_string(),
        _ => DEFAULT_DESCRIPTION.to_string(),
    }
}
