//! # Inventory State
//!
//! The shared store plus the loader that fills it.
//!
//! Both halves point at the same [`SharedInventory`], so a load is visible
//! to every command as soon as it commits.

use std::sync::Arc;

use stockroom_catalog::{CatalogLoader, CatalogSource};
use stockroom_store::{InventoryObserver, InventoryStore, SharedInventory, SubscriptionId};

/// Application inventory state.
#[derive(Clone)]
pub struct InventoryState {
    inventory: SharedInventory,
    loader: CatalogLoader,
}

impl InventoryState {
    /// Creates an empty store that loads from `source`.
    pub fn new(source: Arc<dyn CatalogSource>) -> Self {
        Self::with_store(InventoryStore::new(), source)
    }

    /// Uses a pre-built store (custom id allocator in tests).
    pub fn with_store(store: InventoryStore, source: Arc<dyn CatalogSource>) -> Self {
        let inventory = SharedInventory::new(store);
        let loader = CatalogLoader::new(source, inventory.clone());
        InventoryState { inventory, loader }
    }

    /// The shared store.
    pub fn inventory(&self) -> &SharedInventory {
        &self.inventory
    }

    /// The catalog loader.
    pub fn loader(&self) -> &CatalogLoader {
        &self.loader
    }

    /// Registers an observer on the store.
    pub fn subscribe(&self, observer: Arc<dyn InventoryObserver>) -> SubscriptionId {
        self.inventory.with_store_mut(|store| store.subscribe(observer))
    }
}
