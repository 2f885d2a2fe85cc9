//! # stockroom-core: Pure Business Logic for Stockroom
//!
//! This crate is the **heart** of Stockroom. It contains the product model,
//! validation rules, catalog record coercion and the View Pipeline as pure
//! functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Stockroom Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Console / UI layer                           │   │
//! │  │   Products ──► Departments ──► Add Product ──► Record Delivery │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ commands                               │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │     stockroom-store (collection)   stockroom-catalog (fetch)    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ stockroom-core (THIS CRATE) ★                   │   │
//! │  │                                                                 │   │
//! │  │   ┌─────────┐ ┌─────────┐ ┌──────────┐ ┌─────────┐ ┌────────┐  │   │
//! │  │   │  types  │ │  money  │ │  ingest  │ │  query  │ │summary │  │   │
//! │  │   │ Product │ │  Money  │ │RawRecord │ │  View   │ │Dashbd  │  │   │
//! │  │   └─────────┘ └─────────┘ └──────────┘ └─────────┘ └────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • PURE FUNCTIONS                          │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, NewProduct, ProductPatch)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`error`] - Domain error types
//! - [`validation`] - Field rules for new products
//! - [`ingest`] - Coercion of untrusted catalog records
//! - [`query`] - The View Pipeline (search, filter, sort)
//! - [`summary`] - Dashboard and department roll-ups
//!
//! ## Example Usage
//!
//! ```rust
//! use stockroom_core::query::{apply_query, ProductQuery, SortKey};
//! use stockroom_core::Product;
//!
//! let products: Vec<Product> = Vec::new();
//! let query = ProductQuery::default().sorted_by(SortKey::Price);
//! assert!(apply_query(&products, &query).is_empty());
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod ingest;
pub mod money;
pub mod query;
pub mod summary;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{FieldErrors, RecordError, ValidationError};
pub use money::Money;
pub use query::{apply_query, DepartmentFilter, ProductQuery, SortDirection, SortKey};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Stock level at or below which a product counts as "low stock".
///
/// ## Business Reason
/// Fixed system-wide. The product list badge, the low-stock filter and the
/// dashboard counter all read this one value.
pub const LOW_STOCK_THRESHOLD: i64 = 10;

/// Departments shown on the department browser when none are configured.
pub const DEFAULT_DEPARTMENTS: [&str; 3] = ["Kitchen", "Clothing", "Toys"];

/// Department filter value that matches every product.
pub const ALL_DEPARTMENTS: &str = "all";
