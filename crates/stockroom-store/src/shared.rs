//! # Shared Inventory Handle
//!
//! The store is created once and shared by reference between the loader,
//! the commands and the console.
//!
//! ## Thread Safety
//! `Arc<Mutex<InventoryStore>>`: most operations mutate, and every one of
//! them is short. Access only goes through closures, so a lock can never be
//! held across an `.await`.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::store::InventoryStore;

/// Cloneable handle to one [`InventoryStore`].
#[derive(Debug, Clone, Default)]
pub struct SharedInventory {
    store: Arc<Mutex<InventoryStore>>,
}

impl SharedInventory {
    /// Wraps a store.
    pub fn new(store: InventoryStore) -> Self {
        SharedInventory {
            store: Arc::new(Mutex::new(store)),
        }
    }

    /// Executes a function with read access to the store.
    ///
    /// ## Usage
    /// ```rust
    /// use stockroom_store::SharedInventory;
    ///
    /// let inventory = SharedInventory::default();
    /// assert_eq!(inventory.with_store(|store| store.len()), 0);
    /// ```
    pub fn with_store<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&InventoryStore) -> R,
    {
        let store = self.lock();
        f(&store)
    }

    /// Executes a function with write access to the store.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// inventory.with_store_mut(|store| store.record_delivery(id, 1))?;
    /// ```
    pub fn with_store_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut InventoryStore) -> R,
    {
        let mut store = self.lock();
        f(&mut store)
    }

    /// A panicking observer poisons the mutex; the collection itself is
    /// still consistent because notification happens after commit.
    fn lock(&self) -> MutexGuard<'_, InventoryStore> {
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_clones_share_one_store() {
        let inventory = SharedInventory::default();
        let other = inventory.clone();

        other.with_store_mut(|store| {
            store.load(&[json!({"id": 1, "name": "Kite", "department": "Toys", "price": 15})]);
        });

        assert_eq!(inventory.with_store(|store| store.len()), 1);
        assert_eq!(
            inventory.with_store(|store| store.get(1).map(|p| p.name.clone())),
            Some("Kite".to_string())
        );
    }
}
