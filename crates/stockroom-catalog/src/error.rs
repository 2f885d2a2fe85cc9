//! # Catalog Error Types
//!
//! ## Error Categories
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Catalog Error Categories                           │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │  Configuration  │  │   Transport     │  │     Payload             │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  InvalidConfig  │  │  RequestFailed  │  │  InvalidPayload         │ │
//! │  │  InvalidUrl     │  │  Timeout        │  │                         │ │
//! │  │  ConfigLoad     │  │  HttpStatus     │  │                         │ │
//! │  │                 │  │  ReadFailed     │  │                         │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! │                                                                         │
//! │  LoadInProgress - a second load was requested while one is in flight   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every error except `LoadInProgress` leaves the store on its previous
//! collection. Nothing is retried automatically.

use thiserror::Error;

/// Result type alias for catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Errors from loading configuration or fetching the catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// A setting has an unusable value.
    #[error("Invalid catalog configuration: {0}")]
    InvalidConfig(String),

    /// The catalog URL does not parse or uses an unsupported scheme.
    #[error("Invalid catalog URL: {0}")]
    InvalidUrl(String),

    /// The config file could not be read or parsed.
    #[error("Failed to load config: {0}")]
    ConfigLoadFailed(String),

    // =========================================================================
    // Transport Errors
    // =========================================================================
    /// The request never produced a response.
    #[error("Catalog request failed: {0}")]
    RequestFailed(String),

    /// No response within the configured timeout.
    #[error("Catalog request timed out after {0} seconds")]
    Timeout(u64),

    /// The endpoint answered with a non-success status.
    #[error("Catalog endpoint returned HTTP {status}")]
    HttpStatus { status: u16, body: String },

    /// A local catalog file could not be read.
    #[error("Failed to read catalog file {path}: {message}")]
    ReadFailed { path: String, message: String },

    // =========================================================================
    // Payload Errors
    // =========================================================================
    /// The body is not JSON, or not a JSON array.
    #[error("Invalid catalog payload: {0}")]
    InvalidPayload(String),

    // =========================================================================
    // Loader Errors
    // =========================================================================
    /// Another load has not finished yet.
    #[error("A catalog load is already in progress")]
    LoadInProgress,
}

// =============================================================================
// Error Conversions
// =============================================================================

impl From<url::ParseError> for CatalogError {
    fn from(err: url::ParseError) -> Self {
        CatalogError::InvalidUrl(err.to_string())
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(err: serde_json::Error) -> Self {
        CatalogError::InvalidPayload(err.to_string())
    }
}

impl From<std::io::Error> for CatalogError {
    fn from(err: std::io::Error) -> Self {
        CatalogError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::de::Error> for CatalogError {
    fn from(err: toml::de::Error) -> Self {
        CatalogError::ConfigLoadFailed(err.to_string())
    }
}

// =============================================================================
// Error Categorization
// =============================================================================

impl CatalogError {
    /// Returns true if this error indicates a configuration problem.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            CatalogError::InvalidConfig(_)
                | CatalogError::InvalidUrl(_)
                | CatalogError::ConfigLoadFailed(_)
        )
    }

    /// Returns true if the fetch itself failed (the store kept its data).
    pub fn is_load_failure(&self) -> bool {
        matches!(
            self,
            CatalogError::RequestFailed(_)
                | CatalogError::Timeout(_)
                | CatalogError::HttpStatus { .. }
                | CatalogError::ReadFailed { .. }
                | CatalogError::InvalidPayload(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categories() {
        assert!(CatalogError::InvalidUrl("x".into()).is_config_error());
        assert!(!CatalogError::InvalidUrl("x".into()).is_load_failure());

        let status = CatalogError::HttpStatus {
            status: 503,
            body: String::new(),
        };
        assert!(status.is_load_failure());
        assert_eq!(status.to_string(), "Catalog endpoint returned HTTP 503");

        assert!(!CatalogError::LoadInProgress.is_load_failure());
        assert!(!CatalogError::LoadInProgress.is_config_error());
    }

    #[test]
    fn test_json_error_is_payload_error() {
        let err: CatalogError = serde_json::from_str::<serde_json::Value>("{oops")
            .unwrap_err()
            .into();
        assert!(matches!(err, CatalogError::InvalidPayload(_)));
    }
}
