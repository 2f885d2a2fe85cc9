//! # Domain Types
//!
//! Core domain types used throughout Stockroom.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │   NewProduct    │   │  ProductPatch   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (u64)       │   │  (no id)        │   │  every field    │       │
//! │  │  name, sku      │   │  validated on   │   │  Option<T>      │       │
//! │  │  price_cents    │   │  add            │   │  merged on      │       │
//! │  │  stock          │   │                 │   │  update         │       │
//! │  │  delivered      │   │                 │   │                 │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐                                                    │
//! │  │   StockLevel    │  Low (≤ 10) / InStock, drives the list badge      │
//! │  └─────────────────┘                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identity
//! - `id`: assigned once (by the catalog or by the store), never reused
//! - `sku`: human-readable business code, NOT enforced unique

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::LOW_STOCK_THRESHOLD;

/// Product identifier. Unique within a session's collection.
pub type ProductId = u64;

// =============================================================================
// Product
// =============================================================================

/// A catalog item tracked by the inventory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Product {
    /// Unique identifier, never reassigned.
    pub id: ProductId,

    /// Display name.
    pub name: String,

    /// Department label ("Kitchen", "Toys", ...). Matched case-insensitively.
    pub department: String,

    /// Free-text description.
    pub description: String,

    /// Price in cents (smallest currency unit).
    pub price_cents: i64,

    /// Units currently on hand.
    pub stock: i64,

    /// Stock Keeping Unit - business identifier.
    pub sku: String,

    /// Who delivers this product.
    pub supplier: String,

    /// Cumulative units ever received.
    pub delivered: i64,

    /// Display hint only.
    pub image_url: String,
}

impl Product {
    /// Returns the price as a Money type.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }

    /// Value of the units currently on hand.
    #[inline]
    pub fn stock_value(&self) -> Money {
        self.price().multiply_quantity(self.stock)
    }

    /// True when stock is at or below [`LOW_STOCK_THRESHOLD`].
    #[inline]
    pub fn is_low_stock(&self) -> bool {
        self.stock <= LOW_STOCK_THRESHOLD
    }

    /// Badge shown next to the product in lists.
    pub fn stock_level(&self) -> StockLevel {
        if self.is_low_stock() {
            StockLevel::Low
        } else {
            StockLevel::InStock
        }
    }

    /// Case-insensitive department comparison.
    pub fn in_department(&self, department: &str) -> bool {
        self.department.to_lowercase() == department.to_lowercase()
    }
}

// =============================================================================
// Stock Level
// =============================================================================

/// Coarse stock indicator for list views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum StockLevel {
    /// At or below the low-stock threshold.
    Low,
    /// Above the threshold.
    InStock,
}

impl std::fmt::Display for StockLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StockLevel::Low => write!(f, "Low Stock"),
            StockLevel::InStock => write!(f, "In Stock"),
        }
    }
}

// =============================================================================
// New Product
// =============================================================================

/// Field data for a product that does not exist yet (no id).
///
/// Checked by [`crate::validation::validate_new_product`] before the store
/// accepts it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct NewProduct {
    pub name: String,
    pub department: String,
    pub description: String,
    pub price_cents: i64,
    pub stock: i64,
    pub sku: String,
    pub supplier: String,
    pub image_url: String,
    /// Defaults to 0 when absent.
    pub delivered: Option<i64>,
}

impl NewProduct {
    /// Attaches an id, producing the stored Product.
    pub fn into_product(self, id: ProductId) -> Product {
        Product {
            id,
            name: self.name,
            department: self.department,
            description: self.description,
            price_cents: self.price_cents,
            stock: self.stock,
            sku: self.sku,
            supplier: self.supplier,
            delivered: self.delivered.unwrap_or(0),
            image_url: self.image_url,
        }
    }
}

// =============================================================================
// Product Patch
// =============================================================================

/// Partial update: `Some` fields overwrite, `None` fields are left alone.
///
/// The id is not patchable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub department: Option<String>,
    pub description: Option<String>,
    pub price_cents: Option<i64>,
    pub stock: Option<i64>,
    pub sku: Option<String>,
    pub supplier: Option<String>,
    pub delivered: Option<i64>,
    pub image_url: Option<String>,
}

impl ProductPatch {
    /// Returns true if the patch changes nothing.
    pub fn is_empty(&self) -> bool {
        *self == ProductPatch::default()
    }

    /// Sets the new stock level.
    pub fn with_stock(mut self, stock: i64) -> Self {
        self.stock = Some(stock);
        self
    }

    /// Sets the new cumulative delivered count.
    pub fn with_delivered(mut self, delivered: i64) -> Self {
        self.delivered = Some(delivered);
        self
    }

    /// Merges this patch into `product` in place.
    pub fn apply_to(&self, product: &mut Product) {
        if let Some(name) = &self.name {
            product.name = name.clone();
        }
        if let Some(department) = &self.department {
            product.department = department.clone();
        }
        if let Some(description) = &self.description {
            product.description = description.clone();
        }
        if let Some(price_cents) = self.price_cents {
            product.price_cents = price_cents;
        }
        if let Some(stock) = self.stock {
            product.stock = stock;
        }
        if let Some(sku) = &self.sku {
            product.sku = sku.clone();
        }
        if let Some(supplier) = &self.supplier {
            product.supplier = supplier.clone();
        }
        if let Some(delivered) = self.delivered {
            product.delivered = delivered;
        }
        if let Some(image_url) = &self.image_url {
            product.image_url = image_url.clone();
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_product() -> Product {
        Product {
            id: 1,
            name: "Chef Knife".to_string(),
            department: "Kitchen".to_string(),
            description: "8 inch blade".to_string(),
            price_cents: 4999,
            stock: 12,
            sku: "KIT-001".to_string(),
            supplier: "Blades Inc".to_string(),
            delivered: 40,
            image_url: "https://example.com/knife.jpg".to_string(),
        }
    }

    #[test]
    fn test_stock_level_threshold() {
        let mut product = sample_product();
        assert_eq!(product.stock_level(), StockLevel::InStock);

        product.stock = 10;
        assert!(product.is_low_stock());
        assert_eq!(product.stock_level(), StockLevel::Low);
        assert_eq!(product.stock_level().to_string(), "Low Stock");
    }

    #[test]
    fn test_in_department_ignores_case() {
        let product = sample_product();
        assert!(product.in_department("kitchen"));
        assert!(product.in_department("KITCHEN"));
        assert!(!product.in_department("toys"));
    }

    #[test]
    fn test_stock_value() {
        let product = sample_product();
        assert_eq!(product.stock_value().cents(), 4999 * 12);
    }

    #[test]
    fn test_patch_leaves_unspecified_fields() {
        let mut product = sample_product();
        let before = product.clone();

        let patch = ProductPatch::default().with_stock(15).with_delivered(43);
        patch.apply_to(&mut product);

        assert_eq!(product.stock, 15);
        assert_eq!(product.delivered, 43);
        assert_eq!(product.name, before.name);
        assert_eq!(product.price_cents, before.price_cents);
        assert_eq!(product.id, before.id);
    }

    #[test]
    fn test_empty_patch() {
        assert!(ProductPatch::default().is_empty());
        assert!(!ProductPatch::default().with_stock(1).is_empty());
    }

    #[test]
    fn test_patch_deserializes_camel_case() {
        let patch: ProductPatch =
            serde_json::from_str(r#"{"imageUrl": "x.png", "stock": 3}"#).unwrap();
        assert_eq!(patch.image_url.as_deref(), Some("x.png"));
        assert_eq!(patch.stock, Some(3));
        assert!(patch.name.is_none());
    }

    #[test]
    fn test_new_product_defaults_delivered() {
        let new = NewProduct {
            name: "Yo-yo".to_string(),
            department: "Toys".to_string(),
            description: "Classic".to_string(),
            price_cents: 299,
            stock: 5,
            sku: "TOY-9".to_string(),
            supplier: "Fun Co".to_string(),
            image_url: "yo.png".to_string(),
            delivered: None,
        };
        let product = new.into_product(77);
        assert_eq!(product.id, 77);
        assert_eq!(product.delivered, 0);
    }
}
