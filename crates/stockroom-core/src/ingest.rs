//! # Catalog Record Ingestion
//!
//! Turns untrusted catalog JSON into [`Product`] values.
//!
//! ## Coercion Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Field        Required   Accepted JSON              Missing / null      │
//! │  ───────────  ────────   ───────────────────────    ─────────────────   │
//! │  id           yes        integer, "123"             record dropped      │
//! │  name         yes        non-blank string           record dropped      │
//! │  department   yes        non-blank string           record dropped      │
//! │  price        yes        number, "19.99" (>= 0)     record dropped      │
//! │  stock        no         integer, "5" (>= 0)        0                   │
//! │  delivered    no         integer, "5" (>= 0)        0                   │
//! │  description  no         string, number, bool       ""                  │
//! │  sku          no         string, number, bool       ""                  │
//! │  supplier     no         string, number, bool       ""                  │
//! │  imageUrl     no         string, number, bool       ""                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A bad record never aborts the batch: it is dropped and listed in the
//! [`IngestReport`]. When two records share an id the first one wins.

use std::collections::HashSet;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::RecordError;
use crate::money::Money;
use crate::types::{Product, ProductId};

/// A record that was dropped, with its position in the payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RejectedRecord {
    pub index: usize,
    #[serde(serialize_with = "serialize_reason")]
    pub reason: RecordError,
}

fn serialize_reason<S: serde::Serializer>(reason: &RecordError, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&reason.to_string())
}

/// Outcome of ingesting one catalog payload.
#[derive(Debug, Clone, Default)]
pub struct IngestReport {
    /// Accepted products, in payload order.
    pub products: Vec<Product>,
    /// Dropped records.
    pub rejected: Vec<RejectedRecord>,
}

impl IngestReport {
    /// Number of dropped records.
    pub fn rejected_count(&self) -> usize {
        self.rejected.len()
    }
}

/// Coerces a whole payload, dropping bad records and duplicate ids.
pub fn ingest_records(records: &[Value]) -> IngestReport {
    let mut report = IngestReport::default();
    let mut seen: HashSet<ProductId> = HashSet::with_capacity(records.len());

    for (index, record) in records.iter().enumerate() {
        let outcome = product_from_record(record).and_then(|product| {
            if seen.insert(product.id) {
                Ok(product)
            } else {
                Err(RecordError::DuplicateId(product.id))
            }
        });

        match outcome {
            Ok(product) => report.products.push(product),
            Err(reason) => report.rejected.push(RejectedRecord { index, reason }),
        }
    }

    report
}

/// Coerces a single record.
pub fn product_from_record(record: &Value) -> Result<Product, RecordError> {
    let fields = record.as_object().ok_or(RecordError::NotAnObject)?;

    let id = required(fields, "id").and_then(|v| coerce_id(v))?;
    let name = required(fields, "name").and_then(|v| coerce_label("name", v))?;
    let department = required(fields, "department").and_then(|v| coerce_label("department", v))?;
    let price = required(fields, "price").and_then(coerce_price)?;

    Ok(Product {
        id,
        name,
        department,
        description: optional_text(fields, "description")?,
        price_cents: price.cents(),
        stock: optional_count(fields, "stock")?,
        sku: optional_text(fields, "sku")?,
        supplier: optional_text(fields, "supplier")?,
        delivered: optional_count(fields, "delivered")?,
        image_url: optional_text(fields, "imageUrl")?,
    })
}

// =============================================================================
// Field Helpers
// =============================================================================

fn present<'a>(fields: &'a Map<String, Value>, field: &'static str) -> Option<&'a Value> {
    fields.get(field).filter(|v| !v.is_null())
}

fn required<'a>(fields: &'a Map<String, Value>, field: &'static str) -> Result<&'a Value, RecordError> {
    present(fields, field).ok_or(RecordError::MissingField(field))
}

fn invalid(field: &'static str, reason: impl Into<String>) -> RecordError {
    RecordError::InvalidField {
        field,
        reason: reason.into(),
    }
}

/// Integer from a JSON integer, an integral float, or a numeric string.
fn coerce_integer(field: &'static str, value: &Value) -> Result<i64, RecordError> {
    match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                return Ok(i);
            }
            match n.as_f64() {
                Some(f) if f.is_finite() && f.fract() == 0.0 && f.abs() < 9.0e15 => Ok(f as i64),
                _ => Err(invalid(field, format!("{} is not a whole number", n))),
            }
        }
        Value::String(s) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| invalid(field, format!("'{}' is not a whole number", s))),
        other => Err(invalid(field, format!("expected a number, got {}", type_name(other)))),
    }
}

fn coerce_id(value: &Value) -> Result<ProductId, RecordError> {
    let id = coerce_integer("id", value)?;
    ProductId::try_from(id).map_err(|_| invalid("id", "must not be negative"))
}

fn coerce_label(field: &'static str, value: &Value) -> Result<String, RecordError> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Ok(s.clone()),
        Value::String(_) => Err(invalid(field, "must not be blank")),
        other => Err(invalid(field, format!("expected a string, got {}", type_name(other)))),
    }
}

fn coerce_price(value: &Value) -> Result<Money, RecordError> {
    let text = match value {
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        other => {
            return Err(invalid(
                "price",
                format!("expected a number, got {}", type_name(other)),
            ))
        }
    };

    let price = Money::parse_decimal(&text)
        .ok_or_else(|| invalid("price", format!("'{}' is not a decimal amount", text)))?;
    if price.is_negative() {
        return Err(invalid("price", "must not be negative"));
    }
    Ok(price)
}

fn optional_count(fields: &Map<String, Value>, field: &'static str) -> Result<i64, RecordError> {
    match present(fields, field) {
        None => Ok(0),
        Some(value) => {
            let count = coerce_integer(field, value)?;
            if count < 0 {
                return Err(invalid(field, "must not be negative"));
            }
            Ok(count)
        }
    }
}

fn optional_text(fields: &Map<String, Value>, field: &'static str) -> Result<String, RecordError> {
    match present(fields, field) {
        None => Ok(String::new()),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(Value::Number(n)) => Ok(n.to_string()),
        Some(Value::Bool(b)) => Ok(b.to_string()),
        Some(other) => Err(invalid(
            field,
            format!("expected a string, got {}", type_name(other)),
        )),
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn full_record(id: u64) -> Value {
        json!({
            "id": id,
            "department": "Kitchen",
            "name": "Chef Knife",
            "description": "8 inch blade",
            "price": 49.99,
            "stock": 12,
            "sku": "KIT-001",
            "supplier": "Blades Inc",
            "delivered": 40,
            "imageUrl": "https://example.com/knife.jpg"
        })
    }

    #[test]
    fn test_full_record() {
        let product = product_from_record(&full_record(1)).unwrap();
        assert_eq!(product.id, 1);
        assert_eq!(product.price_cents, 4999);
        assert_eq!(product.stock, 12);
        assert_eq!(product.delivered, 40);
        assert_eq!(product.image_url, "https://example.com/knife.jpg");
    }

    #[test]
    fn test_missing_counts_default_to_zero() {
        let record = json!({"id": 2, "name": "Mug", "department": "Kitchen", "price": 5});
        let product = product_from_record(&record).unwrap();
        assert_eq!(product.stock, 0);
        assert_eq!(product.delivered, 0);
        assert_eq!(product.sku, "");
        assert_eq!(product.price_cents, 500);
    }

    #[test]
    fn test_numeric_strings_are_coerced() {
        let record = json!({
            "id": "3",
            "name": "Teddy",
            "department": "Toys",
            "price": "12.50",
            "stock": " 7 ",
            "delivered": 9.0,
            "sku": 12345
        });
        let product = product_from_record(&record).unwrap();
        assert_eq!(product.id, 3);
        assert_eq!(product.price_cents, 1250);
        assert_eq!(product.stock, 7);
        assert_eq!(product.delivered, 9);
        assert_eq!(product.sku, "12345");
    }

    #[test]
    fn test_bad_records_are_described() {
        assert_eq!(
            product_from_record(&json!("nope")),
            Err(RecordError::NotAnObject)
        );
        assert_eq!(
            product_from_record(&json!({"name": "x", "department": "y", "price": 1})),
            Err(RecordError::MissingField("id"))
        );
        assert_eq!(
            product_from_record(&json!({"id": 1, "name": null, "department": "y", "price": 1})),
            Err(RecordError::MissingField("name"))
        );
        assert!(matches!(
            product_from_record(&json!({"id": 1, "name": "x", "department": "y", "price": "cheap"})),
            Err(RecordError::InvalidField { field: "price", .. })
        ));
        assert!(matches!(
            product_from_record(&json!({"id": 1, "name": "x", "department": "y", "price": 1, "stock": -4})),
            Err(RecordError::InvalidField { field: "stock", .. })
        ));
        assert!(matches!(
            product_from_record(&json!({"id": 1, "name": "x", "department": "y", "price": 1, "stock": 2.5})),
            Err(RecordError::InvalidField { field: "stock", .. })
        ));
        assert!(matches!(
            product_from_record(&json!({"id": -1, "name": "x", "department": "y", "price": 1})),
            Err(RecordError::InvalidField { field: "id", .. })
        ));
    }

    #[test]
    fn test_ingest_drops_bad_and_duplicate_records() {
        let records = vec![
            full_record(1),
            json!({"id": 2}),
            full_record(3),
            full_record(1),
        ];

        let report = ingest_records(&records);
        assert_eq!(report.products.len(), 2);
        assert_eq!(report.rejected_count(), 2);
        assert_eq!(report.rejected[0].index, 1);
        assert_eq!(report.rejected[1].reason, RecordError::DuplicateId(1));

        let ids: Vec<_> = report.products.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }
}
