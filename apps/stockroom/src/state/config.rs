//! # Configuration State
//!
//! Stores the catalog configuration loaded at startup.
//!
//! ## Thread Safety
//! Read-only after initialization, so no mutex needed.

use serde::Serialize;
use stockroom_catalog::CatalogConfig;
use stockroom_core::Money;

/// Application configuration.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigState {
    /// Catalog source and departments.
    pub catalog: CatalogConfig,

    /// Currency code (ISO 4217)
    pub currency_code: String,
}

impl ConfigState {
    pub fn new(catalog: CatalogConfig) -> Self {
        ConfigState {
            catalog,
            currency_code: "USD".to_string(),
        }
    }

    /// Departments shown on the department browser.
    pub fn departments(&self) -> &[String] {
        self.catalog.departments()
    }

    /// Formats a price for display, e.g. `$10.99`.
    pub fn format_price(&self, cents: i64) -> String {
        Money::from_cents(cents).to_string()
    }
}

impl Default for ConfigState {
    fn default() -> Self {
        Self::new(CatalogConfig::default())
    }
}
