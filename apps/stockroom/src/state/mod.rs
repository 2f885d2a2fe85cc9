//! # State Module
//!
//! Separate state types, each command asks only for the ones it needs.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────────┐  ┌──────────────────┐  ┌──────────────────────┐  │
//! │  │  InventoryState  │  │    ViewState     │  │    ConfigState       │  │
//! │  │                  │  │                  │  │                      │  │
//! │  │  SharedInventory │  │  ProductQuery    │  │  CatalogConfig       │  │
//! │  │  CatalogLoader   │  │  memoized list   │  │  currency            │  │
//! │  └──────────────────┘  └──────────────────┘  └──────────────────────┘  │
//! │                                                                         │
//! │  THREAD SAFETY:                                                        │
//! │  • InventoryState: Arc<Mutex<InventoryStore>> behind closure access   │
//! │  • ViewState: Mutex around query + memo                               │
//! │  • ConfigState: Read-only after initialization                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod inventory;
mod view;

pub use config::ConfigState;
pub use inventory::InventoryState;
pub use view::ViewState;
