//! # Catalog Sources
//!
//! A catalog source returns the raw product records, nothing more. Coercion
//! and validation of individual records happen in the store.
//!
//! ```text
//! ┌───────────────────────┐
//! │   dyn CatalogSource   │  fetch() -> Vec<serde_json::Value>
//! └───────────┬───────────┘
//!             │
//!   ┌─────────┼──────────────────────┐
//!   ▼         ▼                      ▼
//! Http      File                  Static
//! GET url   tokio::fs::read       records held in memory
//! ```
//!
//! The payload must be a JSON array. Anything else is an
//! [`CatalogError::InvalidPayload`] and the whole fetch fails.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

use crate::config::CatalogConfig;
use crate::error::{CatalogError, CatalogResult};

/// Longest response body kept in an `HttpStatus` error.
const MAX_ERROR_BODY: usize = 512;

/// Something that can produce the catalog payload.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Fetches every raw product record.
    async fn fetch(&self) -> CatalogResult<Vec<Value>>;

    /// Human-readable location, for logs.
    fn describe(&self) -> String;
}

/// Splits a catalog body into records.
pub fn parse_payload(body: &str) -> CatalogResult<Vec<Value>> {
    match serde_json::from_str::<Value>(body)? {
        Value::Array(records) => Ok(records),
        other => Err(CatalogError::InvalidPayload(format!(
            "expected a JSON array of products, got {}",
            json_kind(&other)
        ))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Builds the source a config points at.
pub fn source_from_config(config: &CatalogConfig) -> CatalogResult<Arc<dyn CatalogSource>> {
    let url = config.source_url()?;
    match url.scheme() {
        "file" => {
            let path = url
                .to_file_path()
                .map_err(|_| CatalogError::InvalidUrl(format!("Not a local file path: {}", url)))?;
            Ok(Arc::new(FileCatalogSource::new(path)))
        }
        _ => Ok(Arc::new(HttpCatalogSource::new(url, config.timeout())?)),
    }
}

// =============================================================================
// HTTP Source
// =============================================================================

/// One GET against the catalog endpoint.
#[derive(Debug, Clone)]
pub struct HttpCatalogSource {
    client: Client,
    url: Url,
    timeout: Duration,
}

impl HttpCatalogSource {
    /// Creates a source with its own client.
    pub fn new(url: Url, timeout: Duration) -> CatalogResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CatalogError::InvalidConfig(format!("HTTP client: {}", e)))?;

        Ok(HttpCatalogSource {
            client,
            url,
            timeout,
        })
    }
}

#[async_trait]
impl CatalogSource for HttpCatalogSource {
    async fn fetch(&self) -> CatalogResult<Vec<Value>> {
        debug!(url = %self.url, "GET catalog");

        let response = self
            .client
            .get(self.url.clone())
            .header("accept", "application/json")
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    CatalogError::Timeout(self.timeout.as_secs())
                } else {
                    CatalogError::RequestFailed(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let mut body = response.text().await.unwrap_or_default();
            let cut = body
                .char_indices()
                .nth(MAX_ERROR_BODY)
                .map_or(body.len(), |(i, _)| i);
            body.truncate(cut);
            warn!(status = status.as_u16(), "Catalog endpoint returned an error status");
            return Err(CatalogError::HttpStatus {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await.map_err(|e| {
            if e.is_timeout() {
                CatalogError::Timeout(self.timeout.as_secs())
            } else {
                CatalogError::RequestFailed(e.to_string())
            }
        })?;

        parse_payload(&body)
    }

    fn describe(&self) -> String {
        self.url.to_string()
    }
}

// =============================================================================
// File Source
// =============================================================================

/// A JSON file on disk, for offline use and fixtures.
#[derive(Debug, Clone)]
pub struct FileCatalogSource {
    path: PathBuf,
}

impl FileCatalogSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileCatalogSource { path: path.into() }
    }
}

#[async_trait]
impl CatalogSource for FileCatalogSource {
    async fn fetch(&self) -> CatalogResult<Vec<Value>> {
        debug!(path = %self.path.display(), "Reading catalog file");

        let body = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| CatalogError::ReadFailed {
                path: self.path.display().to_string(),
                message: e.to_string(),
            })?;

        parse_payload(&body)
    }

    fn describe(&self) -> String {
        format!("file {}", self.path.display())
    }
}

// =============================================================================
// Static Source
// =============================================================================

/// Records held in memory.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalogSource {
    records: Vec<Value>,
}

impl StaticCatalogSource {
    pub fn new(records: Vec<Value>) -> Self {
        StaticCatalogSource { records }
    }
}

#[async_trait]
impl CatalogSource for StaticCatalogSource {
    async fn fetch(&self) -> CatalogResult<Vec<Value>> {
        Ok(self.records.clone())
    }

    fn describe(&self) -> String {
        format!("{} in-memory records", self.records.len())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn catalog() -> Value {
        json!([
            {"id": 1, "name": "Whisk", "department": "Kitchen", "price": 8.99, "stock": 12},
            {"id": 2, "name": "Kite", "department": "Toys", "price": "15.00", "stock": 3}
        ])
    }

    fn http_source(server: &MockServer, route: &str) -> HttpCatalogSource {
        let url = Url::parse(&format!("{}{}", server.uri(), route)).unwrap();
        HttpCatalogSource::new(url, Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn test_parse_payload() {
        assert_eq!(parse_payload("[]").unwrap().len(), 0);
        assert_eq!(parse_payload(&catalog().to_string()).unwrap().len(), 2);

        assert!(matches!(
            parse_payload(r#"{"products": []}"#),
            Err(CatalogError::InvalidPayload(msg)) if msg.contains("an object")
        ));
        assert!(matches!(
            parse_payload("<html>"),
            Err(CatalogError::InvalidPayload(_))
        ));
    }

    #[tokio::test]
    async fn test_http_source_fetches_array() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/products"))
            .respond_with(ResponseTemplate::new(200).set_body_json(catalog()))
            .expect(1)
            .mount(&server)
            .await;

        let records = http_source(&server, "/products").fetch().await.unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1]["name"], "Kite");
    }

    #[tokio::test]
    async fn test_http_source_error_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
            .mount(&server)
            .await;

        let err = http_source(&server, "/products").fetch().await.unwrap_err();
        match err {
            CatalogError::HttpStatus { status, body } => {
                assert_eq!(status, 503);
                assert_eq!(body, "maintenance");
            }
            other => panic!("expected HttpStatus, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_http_source_rejects_non_array() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"error": "nope"})))
            .mount(&server)
            .await;

        let err = http_source(&server, "/").fetch().await.unwrap_err();
        assert!(matches!(err, CatalogError::InvalidPayload(_)));
    }

    #[tokio::test]
    async fn test_http_source_timeout() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(catalog())
                    .set_delay(Duration::from_secs(3)),
            )
            .mount(&server)
            .await;

        let url = Url::parse(&server.uri()).unwrap();
        let source = HttpCatalogSource::new(url, Duration::from_millis(200)).unwrap();
        assert!(matches!(
            source.fetch().await,
            Err(CatalogError::Timeout(_))
        ));
    }

    #[tokio::test]
    async fn test_file_source() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("products.json");
        std::fs::write(&path, catalog().to_string()).unwrap();

        let records = FileCatalogSource::new(&path).fetch().await.unwrap();
        assert_eq!(records.len(), 2);

        let missing = FileCatalogSource::new(dir.path().join("absent.json"));
        assert!(matches!(
            missing.fetch().await,
            Err(CatalogError::ReadFailed { .. })
        ));
    }

    #[tokio::test]
    async fn test_source_from_config_file_url() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("products.json");
        std::fs::write(&path, "[]").unwrap();

        let mut config = CatalogConfig::default();
        config.source.url = Url::from_file_path(&path).unwrap().to_string();

        let source = source_from_config(&config).unwrap();
        assert!(source.describe().starts_with("file "));
        assert!(source.fetch().await.unwrap().is_empty());
    }

    #[test]
    fn test_source_from_config_rejects_bad_scheme() {
        let mut config = CatalogConfig::default();
        config.source.url = "ftp://example.com/products.json".to_string();
        assert!(source_from_config(&config).is_err());
    }
}
