//! # Inventory Store
//!
//! The single source of truth for the session's product collection.
//!
//! ## Operations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Inventory Store Operations                           │
//! │                                                                         │
//! │  Caller                   Store Operation          Collection Change    │
//! │  ──────                   ───────────────          ─────────────────    │
//! │                                                                         │
//! │  Catalog loaded ─────────► load(records) ────────► replaced wholesale   │
//! │                                                                         │
//! │  Catalog failed ─────────► report_load_failure() ► (unchanged)         │
//! │                                                                         │
//! │  Add Product form ───────► add_product(new) ─────► push(product)       │
//! │                                                                         │
//! │  Edit ───────────────────► update_product(id, p) ► merge in place      │
//! │                                                                         │
//! │  Record Delivery ────────► record_delivery(id, n) ► stock += n,        │
//! │                                                     delivered += n      │
//! │                                                                         │
//! │  NOTE: every committed change bumps `revision` and then notifies       │
//! │        observers. Failed operations change nothing and notify nobody.  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - Ids are unique within the collection and never reassigned
//! - The collection order is insertion order and carries no meaning
//! - There is no delete

use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use stockroom_core::ingest::{ingest_records, RejectedRecord};
use stockroom_core::validation::{validate_delivery_amount, validate_new_product};
use stockroom_core::{NewProduct, Product, ProductId, ProductPatch};
use tracing::{debug, error, info, warn};

use crate::error::{StoreError, StoreResult};
use crate::id::IdAllocator;
use crate::observer::{InventoryObserver, StoreEvent, SubscriptionId};

/// What happened to one catalog payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadReport {
    /// Products now in the collection.
    pub loaded: usize,
    /// Records that were dropped, with reasons.
    pub rejected: Vec<RejectedRecord>,
}

impl LoadReport {
    /// Number of dropped records.
    pub fn rejected_count(&self) -> usize {
        self.rejected.len()
    }
}

/// In-memory product collection with observers.
///
/// ## Usage
/// ```rust
/// use stockroom_store::InventoryStore;
/// use serde_json::json;
///
/// let mut store = InventoryStore::new();
/// let report = store.load(&[json!({
///     "id": 1, "name": "Whisk", "department": "Kitchen", "price": 8.99, "stock": 12
/// })]);
///
/// assert_eq!(report.loaded, 1);
/// assert_eq!(store.get(1).map(|p| p.price_cents), Some(899));
/// ```
pub struct InventoryStore {
    products: Vec<Product>,
    ids: IdAllocator,
    revision: u64,
    observers: Vec<(SubscriptionId, Arc<dyn InventoryObserver>)>,
    next_subscription: SubscriptionId,
}

impl InventoryStore {
    /// Creates an empty store with time-derived ids.
    pub fn new() -> Self {
        Self::with_id_allocator(IdAllocator::clock())
    }

    /// Creates an empty store with a custom id generator.
    pub fn with_id_allocator(ids: IdAllocator) -> Self {
        InventoryStore {
            products: Vec::new(),
            ids,
            revision: 0,
            observers: Vec::new(),
            next_subscription: 1,
        }
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// The current collection.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Looks up a product by id.
    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Number of products.
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Returns true if the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Counter of committed mutations. Changes iff the collection changed.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Replaces the whole collection with a catalog payload.
    ///
    /// Bad records are dropped and reported, never fatal. Ids already
    /// issued this session stay reserved, so a later `add_product` cannot
    /// reuse them.
    pub fn load(&mut self, records: &[Value]) -> LoadReport {
        debug!(records = records.len(), "Loading catalog payload");

        let ingested = ingest_records(records);
        for rejected in &ingested.rejected {
            warn!(index = rejected.index, reason = %rejected.reason, "Dropping catalog record");
        }

        for product in &ingested.products {
            self.ids.observe(product.id);
        }

        let report = LoadReport {
            loaded: ingested.products.len(),
            rejected: ingested.rejected,
        };

        self.products = ingested.products;
        self.revision += 1;

        info!(
            loaded = report.loaded,
            rejected = report.rejected_count(),
            revision = self.revision,
            "Catalog loaded"
        );

        self.notify(&StoreEvent::Loaded {
            count: report.loaded,
            rejected: report.rejected_count(),
        });
        report
    }

    /// Signals a failed catalog fetch. The collection is left as it was.
    pub fn report_load_failure(&self, message: &str) {
        error!(error = %message, products = self.products.len(), "Catalog load failed");
        self.notify(&StoreEvent::LoadFailed {
            message: message.to_string(),
        });
    }

    /// Validates and appends a new product with a fresh id.
    ///
    /// ## Returns
    /// - `Ok(Product)` - the stored product, `delivered` defaulted to 0
    /// - `Err(StoreError::Validation)` - every failing field, nothing stored
    pub fn add_product(&mut self, new: NewProduct) -> StoreResult<Product> {
        debug!(name = %new.name, sku = %new.sku, "Adding product");

        validate_new_product(&new)?;

        let id = self.ids.next_id();
        let product = new.into_product(id);
        self.products.push(product.clone());
        self.revision += 1;

        info!(id = product.id, sku = %product.sku, "Product added");

        self.notify(&StoreEvent::ProductAdded {
            product: product.clone(),
        });
        Ok(product)
    }

    /// Merges `patch` into the product with `id`.
    ///
    /// Any patch is accepted, including one that changes `stock` alone.
    /// Callers that mean "a delivery arrived" should use
    /// [`InventoryStore::record_delivery`].
    pub fn update_product(&mut self, id: ProductId, patch: ProductPatch) -> StoreResult<Product> {
        debug!(id, ?patch, "Updating product");

        let product = self
            .products
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(StoreError::NotFound(id))?;

        patch.apply_to(product);
        let updated = product.clone();
        self.revision += 1;

        info!(id, stock = updated.stock, delivered = updated.delivered, "Product updated");

        self.notify(&StoreEvent::ProductUpdated {
            product: updated.clone(),
        });
        Ok(updated)
    }

    /// Records `amount` units arriving for product `id`.
    ///
    /// ## Behavior
    /// ```text
    /// stock     = stock + amount
    /// delivered = delivered + amount
    /// ```
    /// committed as one update. `amount` must be at least 1.
    pub fn record_delivery(&mut self, id: ProductId, amount: i64) -> StoreResult<Product> {
        validate_delivery_amount(amount).map_err(|e| StoreError::invalid_delivery(id, e.to_string()))?;

        let current = self.get(id).ok_or(StoreError::NotFound(id))?;
        let stock = current
            .stock
            .checked_add(amount)
            .ok_or_else(|| StoreError::invalid_delivery(id, "stock would overflow"))?;
        let delivered = current
            .delivered
            .checked_add(amount)
            .ok_or_else(|| StoreError::invalid_delivery(id, "delivered would overflow"))?;

        let patch = ProductPatch::default()
            .with_stock(stock)
            .with_delivered(delivered);
        self.update_product(id, patch)
    }

    // =========================================================================
    // Observers
    // =========================================================================

    /// Registers an observer for every future committed change.
    ///
    /// Observers run synchronously inside the mutating call and must not
    /// call back into the store.
    pub fn subscribe(&mut self, observer: Arc<dyn InventoryObserver>) -> SubscriptionId {
        let id = self.next_subscription;
        self.next_subscription += 1;
        self.observers.push((id, observer));
        debug!(subscription = id, "Observer subscribed");
        id
    }

    /// Removes an observer. Returns false if the id was unknown.
    pub fn unsubscribe(&mut self, subscription: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(id, _)| *id != subscription);
        self.observers.len() != before
    }

    fn notify(&self, event: &StoreEvent) {
        for (_, observer) in &self.observers {
            observer.on_event(event);
        }
    }
}

impl Default for InventoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for InventoryStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InventoryStore")
            .field("products", &self.products.len())
            .field("revision", &self.revision)
            .field("observers", &self.observers.len())
            .finish()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
