//! # Store Error Types
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  FieldErrors (stockroom-core validation)                               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreError (this module) ← Adds the product id where relevant         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ApiError (in the app) ← Serialized for the UI                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every variant means "nothing was changed".

use stockroom_core::{FieldErrors, ProductId};
use thiserror::Error;

/// Inventory store errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No product with this id exists in the collection.
    ///
    /// ## When This Occurs
    /// - Updating a product that was never loaded or added
    /// - Recording a delivery after a reload dropped the product
    #[error("Product not found: {0}")]
    NotFound(ProductId),

    /// A new product failed one or more field rules.
    #[error("Validation failed: {0}")]
    Validation(#[from] FieldErrors),

    /// A delivery amount was zero or would overflow the counters.
    #[error("Invalid delivery for product {id}: {reason}")]
    InvalidDelivery { id: ProductId, reason: String },
}

impl StoreError {
    /// Creates an InvalidDelivery error.
    pub fn invalid_delivery(id: ProductId, reason: impl Into<String>) -> Self {
        StoreError::InvalidDelivery {
            id,
            reason: reason.into(),
        }
    }

    /// Returns true if this is a NotFound error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound(_))
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
