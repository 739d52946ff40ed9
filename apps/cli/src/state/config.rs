//! # Display Configuration
//!
//! How the CLI renders money. Read-only after startup.

use serde::{Deserialize, Serialize};

/// Display settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigState {
    /// Currency symbol (for display)
    pub currency_symbol: String,

    /// Number of decimal places for prices
    pub currency_decimals: u8,
}

impl Default for ConfigState {
    fn default() -> Self {
        ConfigState {
            currency_symbol: "$".to_string(),
            currency_decimals: 2,
        }
    }
}

impl ConfigState {
    /// Defaults plus environment overrides.
    ///
    /// ## Environment Variables
    /// - `VITRINA_CURRENCY_SYMBOL`: Override the currency symbol
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = ConfigState::default();

        if let Some(symbol) = lookup("VITRINA_CURRENCY_SYMBOL") {
            config.currency_symbol = symbol;
        }

        config
    }

    /// Formats a price for display.
    ///
    /// ## Example
    /// ```rust
    /// use vitrina_cli::state::ConfigState;
    ///
    /// let config = ConfigState::default();
    /// assert_eq!(config.format_price(25.0), "$25.00");
    /// assert_eq!(config.format_price(1234.5), "$1234.50");
    /// ```
    pub fn format_price(&self, price: f64) -> String {
        format!(
            "{}{}{:.*}",
            if price < 0.0 { "-" } else { "" },
            self.currency_symbol,
            self.currency_decimals as usize,
            price.abs()
        )
    }
}
