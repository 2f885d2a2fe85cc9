//! # Error Types
//!
//! Domain-specific error types for stockroom-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  stockroom-core errors (this file)                                     │
//! │  ├── ValidationError  - One failed field rule                          │
//! │  ├── FieldErrors      - Every failed rule of one submission            │
//! │  └── RecordError      - Why a catalog record was dropped               │
//! │                                                                         │
//! │  stockroom-store errors (separate crate)                               │
//! │  └── StoreError       - NotFound / Validation / InvalidDelivery        │
//! │                                                                         │
//! │  stockroom-catalog errors (separate crate)                             │
//! │  └── CatalogError     - Fetch, payload and config failures             │
//! │                                                                         │
//! │  App errors                                                            │
//! │  └── ApiError         - What the UI sees (serialized)                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include the field name in every validation message
//! 3. Errors are enum variants, never String
//! 4. A submission reports ALL failing fields at once, not just the first

use std::collections::BTreeMap;
use std::fmt;

use thiserror::Error;

// =============================================================================
// Validation Error
// =============================================================================

/// A single field rule violation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or blank.
    #[error("{field} is required")]
    Required { field: String },

    /// Value must be strictly greater than zero.
    #[error("{field} must be greater than 0")]
    MustBePositive { field: String },

    /// Value must not be below zero.
    #[error("{field} cannot be negative")]
    Negative { field: String },

    /// Field may not be set by a plain edit.
    #[error("{field} can only change by recording a delivery")]
    NotEditable { field: String },

    /// Invalid format (e.g. "12.3.4" for a price).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    /// Returns the name of the field this error is about.
    pub fn field(&self) -> &str {
        match self {
            ValidationError::Required { field }
            | ValidationError::MustBePositive { field }
            | ValidationError::Negative { field }
            | ValidationError::NotEditable { field }
            | ValidationError::InvalidFormat { field, .. } => field,
        }
    }
}

// =============================================================================
// Field Errors
// =============================================================================

/// Every rule violation found while validating one submission.
///
/// ## User Workflow
/// ```text
/// Add Product form submitted
///      │
///      ▼
/// validate_new_product() ──► FieldErrors [name, price]
///      │
///      ▼
/// UI shows one message under each offending field
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    errors: Vec<ValidationError>,
}

impl FieldErrors {
    /// Creates an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a violation.
    pub fn push(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    /// Returns true if no rule failed.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Number of failed rules.
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Returns true if any violation concerns `field`.
    pub fn mentions(&self, field: &str) -> bool {
        self.errors.iter().any(|e| e.field() == field)
    }

    /// Iterates over the individual violations.
    pub fn iter(&self) -> impl Iterator<Item = &ValidationError> {
        self.errors.iter()
    }

    /// Field → message pairs, one per field, for form display.
    pub fn messages(&self) -> BTreeMap<String, String> {
        self.errors
            .iter()
            .map(|e| (e.field().to_string(), e.to_string()))
            .collect()
    }

    /// Converts into `Ok(())` when empty, otherwise `Err(self)`.
    pub fn into_result(self) -> Result<(), FieldErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self
            .errors
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ");
        write!(f, "{}", joined)
    }
}

impl std::error::Error for FieldErrors {}

impl From<ValidationError> for FieldErrors {
    fn from(error: ValidationError) -> Self {
        FieldErrors {
            errors: vec![error],
        }
    }
}

// =============================================================================
// Record Error
// =============================================================================

/// Why a raw catalog record could not be turned into a Product.
///
/// Dropped records are counted and reported, they never abort a load.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    /// The record is not a JSON object.
    #[error("record is not an object")]
    NotAnObject,

    /// A required field is absent or null.
    #[error("missing field '{0}'")]
    MissingField(&'static str),

    /// A field has the wrong JSON type or cannot be coerced.
    #[error("field '{field}' is invalid: {reason}")]
    InvalidField { field: &'static str, reason: String },

    /// Another record in the same payload already uses this id.
    #[error("duplicate id {0}")]
    DuplicateId(u64),
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "sku".to_string(),
        };
        assert_eq!(err.to_string(), "sku is required");

        let err = ValidationError::MustBePositive {
            field: "price".to_string(),
        };
        assert_eq!(err.to_string(), "price must be greater than 0");

        let err = ValidationError::Negative {
            field: "stock".to_string(),
        };
        assert_eq!(err.to_string(), "stock cannot be negative");
    }

    #[test]
    fn test_field_errors_collects_all() {
        let mut errors = FieldErrors::new();
        assert!(errors.is_empty());

        errors.push(ValidationError::Required {
            field: "name".to_string(),
        });
        errors.push(ValidationError::MustBePositive {
            field: "price".to_string(),
        });

        assert_eq!(errors.len(), 2);
        assert!(errors.mentions("price"));
        assert!(!errors.mentions("sku"));
        assert_eq!(
            errors.to_string(),
            "name is required; price must be greater than 0"
        );

        let messages = errors.messages();
        assert_eq!(messages["name"], "name is required");
    }

    #[test]
    fn test_field_errors_into_result() {
        assert!(FieldErrors::new().into_result().is_ok());

        let single: FieldErrors = ValidationError::Required {
            field: "supplier".to_string(),
        }
        .into();
        assert!(single.into_result().is_err());
    }

    #[test]
    fn test_record_error_messages() {
        assert_eq!(
            RecordError::MissingField("name").to_string(),
            "missing field 'name'"
        );
        assert_eq!(RecordError::DuplicateId(7).to_string(), "duplicate id 7");
    }
}
