//! # Validation Module
//!
//! Field rules applied before the store accepts a new product.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: UI form                                                      │
//! │  ├── Immediate per-field feedback                                      │
//! │  └── Not trusted                                                       │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE (called by InventoryStore::add_product)          │
//! │  ├── Every rule is checked, every failure is reported                  │
//! │  └── No mutation happens unless all rules pass                         │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Store invariants                                             │
//! │  └── Fresh unique id, delivered defaults to 0                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use stockroom_core::validation::{validate_price_cents, validate_required};
//!
//! assert!(validate_required("sku", "KIT-001").is_ok());
//! assert!(validate_required("sku", "   ").is_err());
//! assert!(validate_price_cents(0).is_err());
//! ```

use crate::error::{FieldErrors, ValidationError};
use crate::types::{NewProduct, ProductPatch};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates that a text field is not blank.
pub fn validate_required(field: &str, value: &str) -> ValidationResult<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a price in cents.
///
/// ## Rules
/// - Must be strictly positive: a product cannot be added for free
///
/// ## Example
/// ```rust
/// use stockroom_core::validation::validate_price_cents;
///
/// assert!(validate_price_cents(1).is_ok());   // $0.01
/// assert!(validate_price_cents(0).is_err());  // free
/// assert!(validate_price_cents(-100).is_err());
/// ```
pub fn validate_price_cents(cents: i64) -> ValidationResult<()> {
    if cents <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "price".to_string(),
        });
    }

    Ok(())
}

/// Validates a unit count (stock, delivered) that may be zero.
pub fn validate_non_negative(field: &str, value: i64) -> ValidationResult<()> {
    if value < 0 {
        return Err(ValidationError::Negative {
            field: field.to_string(),
        });
    }

    Ok(())
}

/// Validates the number of units received in one delivery.
///
/// ## User Workflow
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Product Details: Record Delivery                                       │
/// │                                                                         │
/// │  User clicks "Record Delivery" (amount = 1)                            │
/// │       │                                                                 │
/// │       ▼                                                                 │
/// │  validate_delivery_amount(1) ← THIS FUNCTION                           │
/// │       │                                                                 │
/// │       ├── amount < 1? → Error: "delivery amount must be greater than 0"│
/// │       │                                                                 │
/// │       └── OK → stock += 1, delivered += 1                              │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn validate_delivery_amount(amount: i64) -> ValidationResult<()> {
    if amount < 1 {
        return Err(ValidationError::MustBePositive {
            field: "delivery amount".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Composite Validators
// =============================================================================

/// Validates every field of a new product and reports all failures.
///
/// ## Rules
/// | Field       | Rule            |
/// |-------------|-----------------|
/// | name        | not blank       |
/// | department  | not blank       |
/// | description | not blank       |
/// | price       | > 0             |
/// | stock       | >= 0            |
/// | sku         | not blank       |
/// | supplier    | not blank       |
/// | imageUrl    | not blank       |
/// | delivered   | >= 0 if present |
pub fn validate_new_product(product: &NewProduct) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();

    let checks = [
        validate_required("name", &product.name),
        validate_required("department", &product.department),
        validate_required("description", &product.description),
        validate_price_cents(product.price_cents),
        validate_non_negative("stock", product.stock),
        validate_required("sku", &product.sku),
        validate_required("supplier", &product.supplier),
        validate_required("imageUrl", &product.image_url),
        product
            .delivered
            .map_or(Ok(()), |d| validate_non_negative("delivered", d)),
    ];

    for check in checks {
        if let Err(e) = check {
            errors.push(e);
        }
    }

    errors.into_result()
}

/// Validates a user edit of an existing product.
///
/// Present text fields follow the same rules as a new product and a
/// present price must be positive. `stock` and `delivered` are rejected
/// outright: they move together through
/// `InventoryStore::record_delivery` only.
pub fn validate_product_edit(patch: &ProductPatch) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();

    let text_fields = [
        ("name", &patch.name),
        ("department", &patch.department),
        ("description", &patch.description),
        ("sku", &patch.sku),
        ("supplier", &patch.supplier),
        ("imageUrl", &patch.image_url),
    ];
    for (field, value) in text_fields {
        if let Some(Err(e)) = value.as_deref().map(|v| validate_required(field, v)) {
            errors.push(e);
        }
    }

    if let Some(Err(e)) = patch.price_cents.map(validate_price_cents) {
        errors.push(e);
    }

    for (field, value) in [("stock", patch.stock), ("delivered", patch.delivered)] {
        if value.is_some() {
            errors.push(ValidationError::NotEditable {
                field: field.to_string(),
            });
        }
    }

    errors.into_result()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_new_product() -> NewProduct {
        NewProduct {
            name: "Linen Shirt".to_string(),
            department: "Clothing".to_string(),
            description: "Breathable summer shirt".to_string(),
            price_cents: 3500,
            stock: 0,
            sku: "CLO-100".to_string(),
            supplier: "Threads Ltd".to_string(),
            image_url: "https://example.com/shirt.jpg".to_string(),
            delivered: None,
        }
    }

    #[test]
    fn test_validate_required() {
        assert!(validate_required("name", "Mug").is_ok());
        assert!(validate_required("name", "").is_err());
        assert!(validate_required("name", " \t ").is_err());
    }

    #[test]
    fn test_validate_price_cents() {
        assert!(validate_price_cents(1).is_ok());
        assert!(validate_price_cents(1099).is_ok());
        assert!(validate_price_cents(0).is_err());
        assert!(validate_price_cents(-1).is_err());
    }

    #[test]
    fn test_validate_non_negative() {
        assert!(validate_non_negative("stock", 0).is_ok());
        assert!(validate_non_negative("stock", 12).is_ok());
        assert!(validate_non_negative("stock", -1).is_err());
    }

    #[test]
    fn test_validate_delivery_amount() {
        assert!(validate_delivery_amount(1).is_ok());
        assert!(validate_delivery_amount(0).is_err());
        assert!(validate_delivery_amount(-3).is_err());
    }

    #[test]
    fn test_validate_new_product_ok() {
        assert!(validate_new_product(&valid_new_product()).is_ok());
    }

    #[test]
    fn test_validate_new_product_reports_every_field() {
        let product = NewProduct {
            name: String::new(),
            department: String::new(),
            description: " ".to_string(),
            price_cents: 0,
            stock: -1,
            sku: String::new(),
            supplier: String::new(),
            image_url: String::new(),
            delivered: Some(-2),
        };

        let errors = validate_new_product(&product).unwrap_err();
        assert_eq!(errors.len(), 9);
        for field in [
            "name",
            "department",
            "description",
            "price",
            "stock",
            "sku",
            "supplier",
            "imageUrl",
            "delivered",
        ] {
            assert!(errors.mentions(field), "missing error for {}", field);
        }
    }

    #[test]
    fn test_validate_new_product_price_only() {
        let mut product = valid_new_product();
        product.price_cents = 0;

        let errors = validate_new_product(&product).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors.mentions("price"));
    }

    #[test]
    fn test_validate_product_edit() {
        let rename = ProductPatch {
            name: Some("Chef Knife".to_string()),
            price_cents: Some(2500),
            ..ProductPatch::default()
        };
        assert!(validate_product_edit(&rename).is_ok());
        assert!(validate_product_edit(&ProductPatch::default()).is_ok());

        let bad = ProductPatch {
            sku: Some("  ".to_string()),
            price_cents: Some(-300),
            ..ProductPatch::default()
        }
        .with_stock(-7)
        .with_delivered(999);

        let errors = validate_product_edit(&bad).unwrap_err();
        assert_eq!(errors.len(), 4);
        assert!(errors.mentions("sku"));
        assert!(errors.mentions("price"));
        assert!(errors.mentions("stock"));
        assert!(errors.mentions("delivered"));
    }
}
