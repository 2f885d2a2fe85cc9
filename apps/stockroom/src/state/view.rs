//! # View State
//!
//! The current product-list query and the last pipeline output.
//!
//! ## Memoization
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  visible(inventory)                                                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  key = (store.revision(), query)                                        │
//! │       │                                                                 │
//! │       ├── key == memo.key ──► memo.output            (no recompute)    │
//! │       │                                                                 │
//! │       └── otherwise ────────► apply_query(products, query)             │
//! │                               memo = (key, output)                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Any committed store mutation bumps the revision, so a stale list is
//! never served.
//!
//! ## Lock Order
//! Store first, then view. `visible` takes both in that order and nothing
//! takes them the other way round.

use std::sync::{Mutex, MutexGuard, PoisonError};

use stockroom_core::{apply_query, Product, ProductQuery};
use stockroom_store::SharedInventory;

#[derive(Debug, Clone)]
struct Memo {
    revision: u64,
    query: ProductQuery,
    output: Vec<Product>,
}

#[derive(Debug, Default)]
struct ViewCache {
    query: ProductQuery,
    memo: Option<Memo>,
    computations: u64,
}

impl ViewCache {
    fn visible(&mut self, revision: u64, products: &[Product]) -> Vec<Product> {
        if let Some(memo) = &self.memo {
            if memo.revision == revision && memo.query == self.query {
                return memo.output.clone();
            }
        }

        let output = apply_query(products, &self.query);
        self.computations += 1;
        self.memo = Some(Memo {
            revision,
            query: self.query.clone(),
            output: output.clone(),
        });
        output
    }
}

/// Application view state.
#[derive(Debug, Default)]
pub struct ViewState {
    cache: Mutex<ViewCache>,
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from `query` instead of the default.
    pub fn with_query(query: ProductQuery) -> Self {
        ViewState {
            cache: Mutex::new(ViewCache {
                query,
                ..ViewCache::default()
            }),
        }
    }

    /// Current query.
    pub fn query(&self) -> ProductQuery {
        self.lock().query.clone()
    }

    /// Changes the query and returns the new one.
    pub fn update_query<F>(&self, f: F) -> ProductQuery
    where
        F: FnOnce(&mut ProductQuery),
    {
        let mut cache = self.lock();
        f(&mut cache.query);
        cache.query.clone()
    }

    /// The product list for the current query.
    pub fn visible(&self, inventory: &SharedInventory) -> Vec<Product> {
        inventory.with_store(|store| {
            let mut cache = self.lock();
            cache.visible(store.revision(), store.products())
        })
    }

    /// How many times the pipeline actually ran.
    pub fn computations(&self) -> u64 {
        self.lock().computations
    }

    fn lock(&self) -> MutexGuard<'_, ViewCache> {
        self.cache.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use stockroom_core::SortKey;

    fn inventory() -> SharedInventory {
        let inventory = SharedInventory::default();
        inventory.with_store_mut(|store| {
            store.load(&[
                json!({"id": 1, "name": "Whisk", "department": "Kitchen", "price": 9, "stock": 5}),
                json!({"id": 2, "name": "Kite", "department": "Toys", "price": 15, "stock": 15}),
            ]);
        });
        inventory
    }

    #[test]
    fn test_memo_hit_until_something_changes() {
        let inventory = inventory();
        let view = ViewState::new();

        let first = view.visible(&inventory);
        let second = view.visible(&inventory);
        assert_eq!(first, second);
        assert_eq!(view.computations(), 1);

        view.update_query(|q| q.sort_key = SortKey::Price);
        view.visible(&inventory);
        assert_eq!(view.computations(), 2);

        inventory.with_store_mut(|store| store.record_delivery(1, 1)).unwrap();
        let after = view.visible(&inventory);
        assert_eq!(view.computations(), 3);
        assert_eq!(after[0].stock, 6);
    }

    #[test]
    fn test_setting_same_query_keeps_memo() {
        let inventory = inventory();
        let view = ViewState::new();
        view.visible(&inventory);

        view.update_query(|q| q.sort_key = SortKey::Name);
        view.visible(&inventory);
        assert_eq!(view.computations(), 1);
    }
}
