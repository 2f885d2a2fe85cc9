//! # Store Observers
//!
//! The notification side of the store. Observers are told about every
//! committed change, after the collection has been updated.
//!
//! ```text
//! InventoryStore::add_product()
//!      │
//!      ├── validate ── fail ──► Err(StoreError)     (no event)
//!      │
//!      ├── commit (push, revision += 1)
//!      │
//!      └── notify ──► observer.on_event(ProductAdded { .. })
//!                      ├── toast emitter   "Product added successfully"
//!                      └── view cache      (revision changed)
//! ```

use serde::Serialize;
use stockroom_core::Product;

/// Handle returned by `subscribe`, used to unsubscribe.
pub type SubscriptionId = u64;

/// Something that happened to the collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum StoreEvent {
    /// The collection was replaced by a catalog load.
    #[serde(rename_all = "camelCase")]
    Loaded { count: usize, rejected: usize },

    /// A catalog load failed; the collection is unchanged.
    LoadFailed { message: String },

    /// A product was appended.
    ProductAdded { product: Product },

    /// A product was modified in place.
    ProductUpdated { product: Product },
}

impl StoreEvent {
    /// Success or failure, as shown by a notification.
    pub fn is_success(&self) -> bool {
        !matches!(self, StoreEvent::LoadFailed { .. })
    }

    /// User-facing notification text.
    pub fn message(&self) -> String {
        match self {
            StoreEvent::Loaded { count, rejected: 0 } => format!("Loaded {} products", count),
            StoreEvent::Loaded { count, rejected } => format!(
                "Loaded {} products ({} invalid records skipped)",
                count, rejected
            ),
            StoreEvent::LoadFailed { .. } => "Failed to fetch products".to_string(),
            StoreEvent::ProductAdded { .. } => "Product added successfully".to_string(),
            StoreEvent::ProductUpdated { .. } => "Product updated successfully".to_string(),
        }
    }
}

/// Receiver of store events.
pub trait InventoryObserver: Send + Sync {
    /// Called once per committed change.
    fn on_event(&self, event: &StoreEvent);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_messages() {
        assert_eq!(
            StoreEvent::Loaded { count: 3, rejected: 0 }.message(),
            "Loaded 3 products"
        );
        assert_eq!(
            StoreEvent::Loaded { count: 3, rejected: 2 }.message(),
            "Loaded 3 products (2 invalid records skipped)"
        );

        let failed = StoreEvent::LoadFailed {
            message: "timeout".to_string(),
        };
        assert!(!failed.is_success());
        assert_eq!(failed.message(), "Failed to fetch products");
    }

    #[test]
    fn test_event_serializes_with_kind_tag() {
        let json = serde_json::to_value(StoreEvent::LoadFailed {
            message: "boom".to_string(),
        })
        .unwrap();
        assert_eq!(json["kind"], "loadFailed");
        assert_eq!(json["message"], "boom");
    }
}
