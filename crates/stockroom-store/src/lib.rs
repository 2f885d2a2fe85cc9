//! # stockroom-store: In-Memory Inventory Store
//!
//! Owns the product collection for one session and applies every mutation
//! to it.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       stockroom-store                                   │
//! │                                                                         │
//! │  ┌──────────────────┐      ┌──────────────────┐                         │
//! │  │ SharedInventory  │─────►│ InventoryStore   │                         │
//! │  │ Arc<Mutex<..>>   │      │  products        │                         │
//! │  └──────────────────┘      │  revision        │──► InventoryObserver(s) │
//! │                            │  IdAllocator     │                         │
//! │                            └────────┬─────────┘                         │
//! │                                     │                                   │
//! │                 stockroom-core: ingest, validation, ProductPatch       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Nothing here is persisted; the collection is rebuilt from the catalog on
//! every load.

pub mod error;
pub mod id;
pub mod observer;
pub mod shared;
pub mod store;

pub use error::{StoreError, StoreResult};
pub use id::IdAllocator;
pub use observer::{InventoryObserver, StoreEvent, SubscriptionId};
pub use shared::SharedInventory;
pub use store::{InventoryStore, LoadReport};
