//! # API Error Type
//!
//! Unified error type for Stockroom commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Stockroom                              │
//! │                                                                         │
//! │  Command Function                                                       │
//! │  Result<T, ApiError>                                                    │
//! │         │                                                               │
//! │         ├── StoreError::NotFound ────────────► NOT_FOUND                │
//! │         ├── StoreError::Validation ──────────► VALIDATION_ERROR + fields│
//! │         ├── StoreError::InvalidDelivery ─────► INVALID_INPUT            │
//! │         ├── CatalogError (fetch / payload) ──► LOAD_FAILED              │
//! │         ├── CatalogError::LoadInProgress ────► LOAD_IN_PROGRESS         │
//! │         └── CatalogError (config) ───────────► INVALID_INPUT            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Serialization
//! ```json
//! {
//!   "code": "VALIDATION_ERROR",
//!   "message": "price must be greater than 0",
//!   "fields": { "price": "price must be greater than 0" }
//! }
//! ```

use std::collections::BTreeMap;

use serde::Serialize;
use stockroom_catalog::CatalogError;
use stockroom_core::FieldErrors;
use stockroom_store::StoreError;

/// API error returned from commands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,

    /// Field → message pairs for form errors
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<BTreeMap<String, String>>,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Unknown product id
    NotFound,

    /// A new product failed field rules
    ValidationError,

    /// The catalog could not be fetched or parsed
    LoadFailed,

    /// A catalog load is already running
    LoadInProgress,

    /// A command argument is unusable
    InvalidInput,

    /// Internal error
    Internal,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
            fields: None,
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: impl std::fmt::Display) -> Self {
        ApiError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    /// Creates an invalid input error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::InvalidInput, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }
}

/// Converts field validation failures to API errors.
impl From<FieldErrors> for ApiError {
    fn from(errors: FieldErrors) -> Self {
        ApiError {
            code: ErrorCode::ValidationError,
            message: errors.to_string(),
            fields: Some(errors.messages()),
        }
    }
}

/// Converts store errors to API errors.
impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(id) => ApiError::not_found("Product", id),
            StoreError::Validation(errors) => ApiError::from(errors),
            StoreError::InvalidDelivery { id, reason } => ApiError::invalid_input(format!(
                "Cannot record delivery for product {}: {}",
                id, reason
            )),
        }
    }
}

/// Converts catalog errors to API errors.
impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::LoadInProgress => ApiError::new(
                ErrorCode::LoadInProgress,
                "Products are already being loaded",
            ),
            e if e.is_config_error() => ApiError::invalid_input(e.to_string()),
            e => {
                tracing::error!("Catalog load failed: {}", e);
                ApiError::new(ErrorCode::LoadFailed, "Failed to fetch products")
            }
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}
