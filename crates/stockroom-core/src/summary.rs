//! # Dashboard Roll-ups
//!
//! Aggregates shown on the dashboard and the department browser.
//!
//! ```text
//! ┌──────────────── Dashboard ────────────────┐
//! │  Total Stock    Delivered    Low Stock     │
//! │     1,204          3,530          7        │
//! └────────────────────────────────────────────┘
//!
//! ┌──── Kitchen ────┐ ┌──── Clothing ───┐ ┌───── Toys ──────┐
//! │ 12 products     │ │ 9 products      │ │ 14 products     │
//! │ 340 in stock    │ │ 122 in stock    │ │ 510 in stock    │
//! │ 3 low stock     │ │ 4 low stock     │ │ 0 low stock     │
//! └─────────────────┘ └─────────────────┘ └─────────────────┘
//! ```
//!
//! All functions read a collection snapshot and never fail.

use serde::Serialize;
use ts_rs::TS;

use crate::money::Money;
use crate::query::compare_names;
use crate::types::Product;

/// Totals across the whole collection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct DashboardSummary {
    pub total_products: usize,
    pub total_stock: i64,
    pub total_delivered: i64,
    pub low_stock_count: usize,
    /// Sum of price × stock, clamped at `i64::MAX` cents.
    pub inventory_value: Money,
}

/// Totals for one department.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct DepartmentSummary {
    /// Department label as configured, e.g. "Kitchen".
    pub name: String,
    /// Lower-cased label used in `/products?department=` links.
    pub slug: String,
    pub product_count: usize,
    pub total_stock: i64,
    pub low_stock_count: usize,
}

impl DepartmentSummary {
    /// Location of the product list filtered to this department.
    pub fn products_location(&self) -> String {
        format!("/products?department={}", self.slug)
    }
}

/// Computes the dashboard totals.
pub fn dashboard_summary(products: &[Product]) -> DashboardSummary {
    products
        .iter()
        .fold(DashboardSummary::default(), |mut acc, product| {
            acc.total_products += 1;
            acc.total_stock = acc.total_stock.saturating_add(product.stock);
            acc.total_delivered = acc.total_delivered.saturating_add(product.delivered);
            if product.is_low_stock() {
                acc.low_stock_count += 1;
            }
            acc.inventory_value += product.stock_value();
            acc
        })
}

/// Computes one summary per entry of `departments`, in the given order.
///
/// Products are matched case-insensitively; a department with no products
/// still gets a zeroed summary.
pub fn department_summaries<S: AsRef<str>>(
    products: &[Product],
    departments: &[S],
) -> Vec<DepartmentSummary> {
    departments
        .iter()
        .map(|department| {
            let name = department.as_ref();
            let members = products.iter().filter(|p| p.in_department(name));

            let mut summary = DepartmentSummary {
                name: name.to_string(),
                slug: name.to_lowercase(),
                ..DepartmentSummary::default()
            };
            for product in members {
                summary.product_count += 1;
                summary.total_stock = summary.total_stock.saturating_add(product.stock);
                if product.is_low_stock() {
                    summary.low_stock_count += 1;
                }
            }
            summary
        })
        .collect()
}

/// Department labels present in the collection, deduplicated
/// case-insensitively (first spelling wins), in name order.
pub fn distinct_departments(products: &[Product]) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    let mut labels = Vec::new();

    for product in products {
        let key = product.department.to_lowercase();
        if !seen.contains(&key) {
            seen.push(key);
            labels.push(product.department.clone());
        }
    }

    labels.sort_by(|a, b| compare_names(a, b));
    labels
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: u64, department: &str, stock: i64, delivered: i64) -> Product {
        Product {
            id,
            name: format!("Item {}", id),
            department: department.to_string(),
            description: String::new(),
            price_cents: 250,
            stock,
            sku: format!("SKU-{}", id),
            supplier: "Acme".to_string(),
            delivered,
            image_url: String::new(),
        }
    }

    fn collection() -> Vec<Product> {
        vec![
            product(1, "Kitchen", 5, 20),
            product(2, "kitchen", 30, 30),
            product(3, "Toys", 10, 12),
            product(4, "Garden", 11, 0),
        ]
    }

    #[test]
    fn test_dashboard_summary() {
        let summary = dashboard_summary(&collection());
        assert_eq!(summary.total_products, 4);
        assert_eq!(summary.total_stock, 56);
        assert_eq!(summary.total_delivered, 62);
        assert_eq!(summary.low_stock_count, 2);
        assert_eq!(summary.inventory_value.cents(), 56 * 250);
    }

    #[test]
    fn test_dashboard_summary_clamps_huge_values() {
        let record = serde_json::json!({
            "id": 9,
            "name": "Yacht",
            "department": "Toys",
            "price": "10000000000000",
            "stock": 10000,
        });
        let yacht = crate::ingest::product_from_record(&record).unwrap();
        let products = vec![yacht.clone(), yacht];

        let summary = dashboard_summary(&products);
        assert_eq!(summary.inventory_value.cents(), i64::MAX);
        assert_eq!(summary.total_stock, 20000);
    }

    #[test]
    fn test_dashboard_summary_empty() {
        assert_eq!(dashboard_summary(&[]), DashboardSummary::default());
    }

    #[test]
    fn test_department_summaries_follow_configured_order() {
        let summaries = department_summaries(&collection(), &["Kitchen", "Clothing", "Toys"]);
        assert_eq!(summaries.len(), 3);

        assert_eq!(summaries[0].name, "Kitchen");
        assert_eq!(summaries[0].product_count, 2);
        assert_eq!(summaries[0].total_stock, 35);
        assert_eq!(summaries[0].low_stock_count, 1);
        assert_eq!(summaries[0].products_location(), "/products?department=kitchen");

        assert_eq!(summaries[1].product_count, 0);
        assert_eq!(summaries[1].total_stock, 0);

        assert_eq!(summaries[2].low_stock_count, 1);
    }

    #[test]
    fn test_distinct_departments() {
        assert_eq!(
            distinct_departments(&collection()),
            vec!["Garden".to_string(), "Kitchen".to_string(), "Toys".to_string()]
        );
    }
}
