//! # Commands Module
//!
//! Every operation the console (or any other front end) can invoke.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs        ◄─── You are here (exports)
//! ├── catalog.rs    ◄─── Load catalog, load status
//! ├── product.rs    ◄─── List, details, add, update, deliveries
//! ├── view.rs       ◄─── Search, department, low-stock, sort
//! └── dashboard.rs  ◄─── Totals and per-department summaries
//! ```
//!
//! ## State Injection
//! Each command borrows only the state it needs:
//! ```rust,ignore
//! // Only needs the store
//! fn get_product(inventory: &InventoryState, id: ProductId)
//!
//! // Only needs the query
//! fn set_search(view: &ViewState, term: &str)
//!
//! // Needs both
//! fn list_products(inventory: &InventoryState, view: &ViewState)
//! ```
//!
//! Every command returns `Result<T, ApiError>`; the error serializes to
//! `{ "code": "NOT_FOUND", "message": "..." }`.

pub mod catalog;
pub mod dashboard;
pub mod product;
pub mod view;
