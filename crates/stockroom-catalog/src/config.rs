//! # Catalog Configuration
//!
//! Where the catalog comes from and which departments the browser shows.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     STOCKROOM_CATALOG_URL=https://example.com/products.json            │
//! │     STOCKROOM_TIMEOUT_SECS=10                                          │
//! │     STOCKROOM_DEPARTMENTS=Kitchen,Garden                               │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/stockroom/catalog.toml (Linux)                           │
//! │     ~/Library/Application Support/com.stockroom.stockroom/... (macOS)  │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     the public demo catalog, 30 s timeout, Kitchen/Clothing/Toys       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # catalog.toml
//! [source]
//! url = "https://run.mocky.io/v3/a7d24cab-cb3a-4b37-a0d8-8b6a75bf5aee"
//! timeout_secs = 30
//!
//! [inventory]
//! departments = ["Kitchen", "Clothing", "Toys"]
//! ```

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use stockroom_core::DEFAULT_DEPARTMENTS;
use tracing::{debug, info, warn};
use url::Url;

use crate::error::{CatalogError, CatalogResult};

/// Demo endpoint serving a JSON array of products.
pub const DEFAULT_CATALOG_URL: &str =
    "https://run.mocky.io/v3/a7d24cab-cb3a-4b37-a0d8-8b6a75bf5aee";

const SUPPORTED_SCHEMES: [&str; 3] = ["http", "https", "file"];

// =============================================================================
// Sections
// =============================================================================

/// `[source]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceSettings {
    /// Catalog location (`http`, `https` or `file` URL).
    #[serde(default = "default_url")]
    pub url: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_url() -> String {
    DEFAULT_CATALOG_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for SourceSettings {
    fn default() -> Self {
        SourceSettings {
            url: default_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// `[inventory]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventorySettings {
    /// Departments listed on the department browser, in display order.
    #[serde(default = "default_departments")]
    pub departments: Vec<String>,
}

fn default_departments() -> Vec<String> {
    DEFAULT_DEPARTMENTS.iter().map(|d| d.to_string()).collect()
}

impl Default for InventorySettings {
    fn default() -> Self {
        InventorySettings {
            departments: default_departments(),
        }
    }
}

// =============================================================================
// Catalog Config
// =============================================================================

/// Complete catalog configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogConfig {
    #[serde(default)]
    pub source: SourceSettings,

    #[serde(default)]
    pub inventory: InventorySettings,
}

impl CatalogConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (catalog.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> CatalogResult<Self> {
        let mut config = Self::from_file(config_path)?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load catalog config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Reads the TOML file, or defaults when it does not exist.
    fn from_file(config_path: Option<PathBuf>) -> CatalogResult<Self> {
        match config_path.or_else(Self::default_config_path) {
            Some(path) if path.exists() => {
                info!(?path, "Loading catalog config from file");
                let contents = std::fs::read_to_string(&path)?;
                Ok(toml::from_str(&contents)?)
            }
            Some(path) => {
                debug!(?path, "Config file not found, using defaults");
                Ok(Self::default())
            }
            None => Ok(Self::default()),
        }
    }

    /// Validates the configuration.
    pub fn validate(&self) -> CatalogResult<()> {
        self.source_url()?;

        if self.source.timeout_secs == 0 {
            return Err(CatalogError::InvalidConfig(
                "timeout_secs must be greater than 0".into(),
            ));
        }

        if self.inventory.departments.is_empty() {
            return Err(CatalogError::InvalidConfig(
                "at least one department must be configured".into(),
            ));
        }

        if self.inventory.departments.iter().any(|d| d.trim().is_empty()) {
            return Err(CatalogError::InvalidConfig(
                "department names must not be blank".into(),
            ));
        }

        Ok(())
    }

    /// Applies `STOCKROOM_*` environment variable overrides.
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies overrides from any key lookup.
    fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("STOCKROOM_CATALOG_URL") {
            debug!(url = %url, "Overriding catalog URL from environment");
            self.source.url = url;
        }

        if let Some(timeout) = lookup("STOCKROOM_TIMEOUT_SECS") {
            match timeout.trim().parse::<u64>() {
                Ok(secs) => self.source.timeout_secs = secs,
                Err(_) => warn!(value = %timeout, "Ignoring non-numeric STOCKROOM_TIMEOUT_SECS"),
            }
        }

        if let Some(departments) = lookup("STOCKROOM_DEPARTMENTS") {
            let parsed: Vec<String> = departments
                .split(',')
                .map(str::trim)
                .filter(|d| !d.is_empty())
                .map(String::from)
                .collect();
            if parsed.is_empty() {
                warn!("Ignoring empty STOCKROOM_DEPARTMENTS");
            } else {
                self.inventory.departments = parsed;
            }
        }
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "stockroom", "stockroom")
            .map(|dirs| dirs.config_dir().join("catalog.toml"))
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    /// Parsed catalog URL with a supported scheme.
    pub fn source_url(&self) -> CatalogResult<Url> {
        let url = Url::parse(&self.source.url)?;
        if !SUPPORTED_SCHEMES.contains(&url.scheme()) {
            return Err(CatalogError::InvalidUrl(format!(
                "Catalog URL must use http, https or file, got: {}",
                self.source.url
            )));
        }
        Ok(url)
    }

    /// Request timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.source.timeout_secs)
    }

    /// Departments for the department browser.
    pub fn departments(&self) -> &[String] {
        &self.inventory.departments
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = CatalogConfig::default();
        assert_eq!(config.source.url, DEFAULT_CATALOG_URL);
        assert_eq!(config.timeout(), Duration::from_secs(30));
        assert_eq!(config.departments(), ["Kitchen", "Clothing", "Toys"]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = CatalogConfig::default();

        config.source.url = "ftp://example.com/products".to_string();
        assert!(matches!(config.validate(), Err(CatalogError::InvalidUrl(_))));

        config.source.url = "not a url".to_string();
        assert!(config.validate().is_err());

        config.source.url = "file:///tmp/products.json".to_string();
        assert!(config.validate().is_ok());

        config.source.timeout_secs = 0;
        assert!(config.validate().is_err());

        config.source.timeout_secs = 5;
        config.inventory.departments.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: CatalogConfig = toml::from_str(
            r#"
            [source]
            url = "http://localhost:8080/products"
            "#,
        )
        .unwrap();

        assert_eq!(config.source.url, "http://localhost:8080/products");
        assert_eq!(config.source.timeout_secs, 30);
        assert_eq!(config.inventory.departments.len(), 3);
    }

    #[test]
    fn test_serialized_config_loads_back() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("catalog.toml");

        let mut config = CatalogConfig::default();
        config.source.url = "http://localhost:9000/catalog".to_string();
        config.inventory.departments = vec!["Garden".to_string()];
        std::fs::write(&path, toml::to_string_pretty(&config).unwrap()).unwrap();

        let loaded = CatalogConfig::from_file(Some(path)).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let loaded = CatalogConfig::from_file(Some(dir.path().join("absent.toml"))).unwrap();
        assert_eq!(loaded, CatalogConfig::default());
    }

    #[test]
    fn test_malformed_file_falls_back() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("catalog.toml");
        std::fs::write(&path, "[source\nurl = ").unwrap();

        assert!(matches!(
            CatalogConfig::from_file(Some(path.clone())),
            Err(CatalogError::ConfigLoadFailed(_))
        ));
        assert_eq!(
            CatalogConfig::load_or_default(Some(path)).inventory,
            InventorySettings::default()
        );
    }

    #[test]
    fn test_overrides() {
        let vars: HashMap<&str, &str> = [
            ("STOCKROOM_CATALOG_URL", "https://example.com/p.json"),
            ("STOCKROOM_TIMEOUT_SECS", "7"),
            ("STOCKROOM_DEPARTMENTS", " Garden , Tools ,,"),
        ]
        .into_iter()
        .collect();

        let mut config = CatalogConfig::default();
        config.apply_overrides(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.source.url, "https://example.com/p.json");
        assert_eq!(config.source.timeout_secs, 7);
        assert_eq!(config.departments(), ["Garden", "Tools"]);
    }

    #[test]
    fn test_bad_overrides_are_ignored() {
        let mut config = CatalogConfig::default();
        config.apply_overrides(|key| match key {
            "STOCKROOM_TIMEOUT_SECS" => Some("soon".to_string()),
            "STOCKROOM_DEPARTMENTS" => Some(" , ".to_string()),
            _ => None,
        });
        assert_eq!(config, CatalogConfig::default());
    }
}
