//! # Product Commands
//!
//! List, inspect, create and update products.
//!
//! ## Add Product Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Add Product form                                                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  NewProductInput { price: "12.50", stock: 4, ... }                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  price text ──► Money::parse_decimal ──► cents                          │
//! │       │              │                                                  │
//! │       │              └── unparseable ──► VALIDATION_ERROR { price }     │
//! │       ▼                                                                 │
//! │  store.add_product(NewProduct)                                          │
//! │       │                                                                 │
//! │       ├── field rules fail ──► VALIDATION_ERROR { field: message }      │
//! │       └── ok ──► ProductDto (new id), "Product added successfully"      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use stockroom_core::{
    validation::{validate_new_product, validate_product_edit},
    FieldErrors, Money, NewProduct, Product, ProductId,
    ProductPatch, StockLevel, ValidationError,
};
use tracing::{debug, info};

use crate::error::ApiError;
use crate::state::{InventoryState, ViewState};

/// Units recorded by a delivery when no amount is given.
pub const DEFAULT_DELIVERY_AMOUNT: i64 = 1;

/// Product DTO for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDto {
    pub id: ProductId,
    pub name: String,
    pub department: String,
    pub description: String,
    pub price_cents: i64,
    /// "$12.50"
    pub price_display: String,
    pub stock: i64,
    pub stock_level: StockLevel,
    pub sku: String,
    pub supplier: String,
    pub delivered: i64,
    pub image_url: String,
}

impl From<Product> for ProductDto {
    fn from(p: Product) -> Self {
        ProductDto {
            price_display: p.price().to_string(),
            stock_level: p.stock_level(),
            id: p.id,
            name: p.name,
            department: p.department,
            description: p.description,
            price_cents: p.price_cents,
            stock: p.stock,
            sku: p.sku,
            supplier: p.supplier,
            delivered: p.delivered,
            image_url: p.image_url,
        }
    }
}

/// Add Product form submission. Price is the text the user typed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProductInput {
    pub name: String,
    pub department: String,
    pub description: String,
    pub price: String,
    pub stock: i64,
    pub sku: String,
    pub supplier: String,
    pub image_url: String,
    pub delivered: Option<i64>,
}

impl NewProductInput {
    /// Converts the form into a [`NewProduct`], reporting every bad field.
    ///
    /// An unparseable price is reported alongside the other field rules so
    /// the form can show all messages at once.
    pub fn into_new_product(self) -> Result<NewProduct, FieldErrors> {
        let parsed = Money::parse_decimal(&self.price);

        let product = NewProduct {
            name: self.name,
            department: self.department,
            description: self.description,
            // placeholder passes the price rule so only the format error shows
            price_cents: parsed.map_or(1, |m| m.cents()),
            stock: self.stock,
            sku: self.sku,
            supplier: self.supplier,
            image_url: self.image_url,
            delivered: self.delivered,
        };

        let mut errors = match validate_new_product(&product) {
            Ok(()) => FieldErrors::new(),
            Err(errors) => errors,
        };
        if parsed.is_none() {
            errors.push(ValidationError::InvalidFormat {
                field: "price".to_string(),
                reason: format!("'{}' is not a decimal amount", self.price.trim()),
            });
        }

        errors.into_result().map(|()| product)
    }
}

/// The product list for the current view (search, filter, sort applied).
pub fn list_products(
    inventory: &InventoryState,
    view: &ViewState,
) -> Result<Vec<ProductDto>, ApiError> {
    let products = view.visible(inventory.inventory());
    debug!(count = products.len(), "list_products");
    Ok(products.into_iter().map(ProductDto::from).collect())
}

/// Product details screen.
pub fn get_product(inventory: &InventoryState, id: ProductId) -> Result<ProductDto, ApiError> {
    debug!(id, "get_product");

    inventory
        .inventory()
        .with_store(|store| store.get(id).cloned())
        .map(ProductDto::from)
        .ok_or_else(|| ApiError::not_found("Product", id))
}

/// Creates a product from the Add Product form.
pub fn add_product(
    inventory: &InventoryState,
    input: NewProductInput,
) -> Result<ProductDto, ApiError> {
    debug!(name = %input.name, "add_product");

    let new = input.into_new_product()?;
    let product = inventory
        .inventory()
        .with_store_mut(|store| store.add_product(new))?;

    info!(id = product.id, name = %product.name, "Product added");
    Ok(ProductDto::from(product))
}

/// Overwrites the fields present in `patch`.
///
/// A non-positive price or any `stock`/`delivered` value is a
/// VALIDATION_ERROR; those two move only through [`record_delivery`].
pub fn update_product(
    inventory: &InventoryState,
    id: ProductId,
    patch: ProductPatch,
) -> Result<ProductDto, ApiError> {
    debug!(id, ?patch, "update_product");

    validate_product_edit(&patch)?;
    let product = inventory
        .inventory()
        .with_store_mut(|store| store.update_product(id, patch))?;

    Ok(ProductDto::from(product))
}

/// Adds `amount` units (default 1) to both stock and delivered.
pub fn record_delivery(
    inventory: &InventoryState,
    id: ProductId,
    amount: Option<i64>,
) -> Result<ProductDto, ApiError> {
    let amount = amount.unwrap_or(DEFAULT_DELIVERY_AMOUNT);
    debug!(id, amount, "record_delivery");

    let product = inventory
        .inventory()
        .with_store_mut(|store| store.record_delivery(id, amount))?;

    info!(id, amount, stock = product.stock, "Delivery recorded");
    Ok(ProductDto::from(product))
}
