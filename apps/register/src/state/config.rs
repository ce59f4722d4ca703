//! # Configuration State
//!
//! Stores register configuration loaded at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`BARPOS_*`)
//! 2. Defaults (this file)
//!
//! Configuration is read-only after initialization, so no mutex needed.

use std::path::PathBuf;

use barpos_core::Money;
use directories::UserDirs;
use serde::{Deserialize, Serialize};

/// Register configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigState {
    /// Store name (shown on receipts)
    pub store_name: String,

    /// Currency symbol (for display)
    pub currency_symbol: String,

    /// Folder the transaction export is written to
    pub export_dir: PathBuf,

    /// Start with the five default drinks; `false` starts empty
    pub seed_catalog: bool,
}

impl Default for ConfigState {
    /// ## Default Values
    /// - Store: "Bar POS"
    /// - Currency: `$`
    /// - Export: the user's download folder, or the working directory
    /// - Catalog: seeded
    fn default() -> Self {
        ConfigState {
            store_name: "Bar POS".to_string(),
            currency_symbol: "$".to_string(),
            export_dir: default_export_dir(),
            seed_catalog: true,
        }
    }
}

impl ConfigState {
    /// Creates a new ConfigState from environment variables and defaults.
    ///
    /// ## Environment Variables
    /// - `BARPOS_STORE_NAME`: Override store name
    /// - `BARPOS_CURRENCY_SYMBOL`: Override currency symbol
    /// - `BARPOS_EXPORT_DIR`: Folder for exported history
    /// - `BARPOS_SEED_CATALOG`: `false`/`0`/`no` starts with an empty catalog
    pub fn from_env() -> Self {
        ConfigState::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from any key lookup, falling back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = ConfigState::default();

        if let Some(store_name) = lookup("BARPOS_STORE_NAME") {
            config.store_name = store_name;
        }

        if let Some(symbol) = lookup("BARPOS_CURRENCY_SYMBOL") {
            config.currency_symbol = symbol;
        }

        if let Some(dir) = lookup("BARPOS_EXPORT_DIR").filter(|d| !d.trim().is_empty()) {
            config.export_dir = PathBuf::from(dir);
        }

        if let Some(seed) = lookup("BARPOS_SEED_CATALOG") {
            config.seed_catalog = parse_flag(&seed).unwrap_or(config.seed_catalog);
        }

        config
    }

    /// Formats a cent amount as a currency string.
    ///
    /// ## Example
    /// ```rust
    /// use barpos_register::state::ConfigState;
    ///
    /// let config = ConfigState::default();
    /// assert_eq!(config.format_currency(1234), "$12.34");
    /// ```
    pub fn format_currency(&self, cents: i64) -> String {
        Money::from_cents(cents).format_with_symbol(&self.currency_symbol)
    }
}

fn default_export_dir() -> PathBuf {
    UserDirs::new()
        .and_then(|dirs| dirs.download_dir().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from("."))
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
