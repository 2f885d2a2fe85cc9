//! # stockroom-catalog: Catalog Source and Loader
//!
//! Everything between "where is the catalog" and "the store has products".
//!
//! ## Modules
//!
//! - [`config`] - `catalog.toml`, environment overrides, validation
//! - [`source`] - HTTP, file and in-memory catalog sources
//! - [`loader`] - the async load with `Idle → InFlight → Loaded | Failed`
//! - [`error`] - Catalog error types
//!
//! ## Example
//! ```rust,ignore
//! let config = CatalogConfig::load_or_default(None);
//! let inventory = SharedInventory::default();
//! let loader = CatalogLoader::new(source_from_config(&config)?, inventory.clone());
//!
//! match loader.load().await {
//!     Ok(report) => println!("{} products", report.loaded),
//!     Err(e) => eprintln!("{}", e), // store unchanged
//! }
//! ```

pub mod config;
pub mod error;
pub mod loader;
pub mod source;

pub use config::{CatalogConfig, DEFAULT_CATALOG_URL};
pub use error::{CatalogError, CatalogResult};
pub use loader::{CatalogLoader, LoadStatus};
pub use source::{
    source_from_config, CatalogSource, FileCatalogSource, HttpCatalogSource, StaticCatalogSource,
};
