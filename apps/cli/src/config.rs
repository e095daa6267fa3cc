//! # Configuration
//!
//! Settings read once at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Command-line flags (`--data-dir`)
//! 2. Environment variables (`COURSEHUB_*`)
//! 3. Defaults (this file)
//!
//! Read-only after startup, so no locking.

use std::path::PathBuf;

use coursehub_core::{Money, DEFAULT_MAX_PRICE_DOLLARS};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigState {
    /// Directory holding `state.json`. `None` if the platform has no
    /// per-user data folder and nothing was configured.
    pub data_dir: Option<PathBuf>,

    /// Currency symbol (for display)
    pub currency_symbol: String,

    /// Price ceiling of the catalog view when `--max-price` is not given,
    /// in whole currency units.
    pub max_price: i64,
}

impl Default for ConfigState {
    /// `$`, a $500 ceiling, and the platform data folder:
    /// - **Linux**: `~/.local/share/coursehub`
    /// - **macOS**: `~/Library/Application Support/com.coursehub.coursehub`
    /// - **Windows**: `%APPDATA%\coursehub\coursehub\data`
    fn default() -> Self {
        ConfigState {
            data_dir: default_data_dir(),
            currency_symbol: "$".to_string(),
            max_price: DEFAULT_MAX_PRICE_DOLLARS,
        }
    }
}

impl ConfigState {
    /// Creates a new ConfigState from environment variables and defaults.
    ///
    /// ## Environment Variables
    /// - `COURSEHUB_DATA_DIR`: Override the data directory
    /// - `COURSEHUB_CURRENCY_SYMBOL`: Override the currency symbol
    /// - `COURSEHUB_MAX_PRICE`: Override the default price ceiling (e.g., "250")
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = ConfigState::default();

        if let Some(dir) = lookup("COURSEHUB_DATA_DIR") {
            config.data_dir = Some(PathBuf::from(dir));
        }

        if let Some(symbol) = lookup("COURSEHUB_CURRENCY_SYMBOL") {
            config.currency_symbol = symbol;
        }

        if let Some(raw) = lookup("COURSEHUB_MAX_PRICE") {
            match raw.trim().parse::<i64>() {
                Ok(max) if max >= 0 => config.max_price = max,
                _ => warn!(value = %raw, "Ignoring invalid COURSEHUB_MAX_PRICE"),
            }
        }

        config
    }

    /// Default price ceiling as money.
    pub fn max_price_money(&self) -> Money {
        Money::from_dollars(self.max_price)
    }

    /// Formats an amount as a currency string with two decimals.
    ///
    /// ## Example
    /// ```rust
    /// # use coursehub_cli::config::ConfigState;
    /// # use coursehub_core::Money;
    /// let config = ConfigState::default();
    /// assert_eq!(config.format_currency(Money::from_cents(1234)), "$12.34");
    /// ```
    pub fn format_currency(&self, amount: Money) -> String {
        let cents = amount.cents();
        let sign = if cents < 0 { "-" } else { "" };
        let whole = (cents / 100).unsigned_abs();
        let frac = (cents % 100).unsigned_abs();

        format!("{sign}{}{whole}.{frac:02}", self.currency_symbol)
    }
}

fn default_data_dir() -> Option<PathBuf> {
    ProjectDirs::from("com", "coursehub", "coursehub").map(|dirs| dirs.data_dir().to_path_buf())
}
