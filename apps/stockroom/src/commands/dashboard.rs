//! # Dashboard Commands
//!
//! Totals for the dashboard and one card per configured department.

use serde::Serialize;
use stockroom_core::summary::{
    dashboard_summary, department_summaries, distinct_departments, DashboardSummary,
    DepartmentSummary,
};
use tracing::debug;

use crate::error::ApiError;
use crate::state::{ConfigState, InventoryState};

/// One department card with its browse link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentCardDto {
    #[serde(flatten)]
    pub summary: DepartmentSummary,
    pub location: String,
}

/// Department browser contents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentsDto {
    /// Configured departments, in configured order.
    pub cards: Vec<DepartmentCardDto>,
    /// Departments present in the catalog but not configured.
    pub unlisted: Vec<String>,
}

/// Whole-collection totals.
pub fn get_summary(inventory: &InventoryState) -> Result<DashboardSummary, ApiError> {
    let summary = inventory
        .inventory()
        .with_store(|store| dashboard_summary(store.products()));

    debug!(
        products = summary.total_products,
        low_stock = summary.low_stock_count,
        "get_summary"
    );
    Ok(summary)
}

/// Per-department cards for the configured department list.
pub fn get_departments(
    inventory: &InventoryState,
    config: &ConfigState,
) -> Result<DepartmentsDto, ApiError> {
    let configured = config.departments();

    let (summaries, present) = inventory.inventory().with_store(|store| {
        (
            department_summaries(store.products(), configured),
            distinct_departments(store.products()),
        )
    });

    let unlisted = present
        .into_iter()
        .filter(|label| !configured.iter().any(|c| c.eq_ignore_ascii_case(label)))
        .collect();

    let cards = summaries
        .into_iter()
        .map(|summary| DepartmentCardDto {
            location: summary.products_location(),
            summary,
        })
        .collect();

    debug!(configured = configured.len(), "get_departments");
    Ok(DepartmentsDto { cards, unlisted })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::Arc;
    use stockroom_catalog::StaticCatalogSource;
    use stockroom_core::Money;

    fn seeded() -> InventoryState {
        let inventory = InventoryState::new(Arc::new(StaticCatalogSource::new(vec![])));
        inventory.inventory().with_store_mut(|store| {
            store.load(&[
                json!({"id": 1, "name": "Whisk", "department": "kitchen", "price": 2, "stock": 5, "delivered": 10}),
                json!({"id": 2, "name": "Kite", "department": "Toys", "price": 3, "stock": 15}),
                json!({"id": 3, "name": "Rake", "department": "Garden", "price": 10, "stock": 1}),
            ]);
        });
        inventory
    }

    #[test]
    fn test_summary_totals() {
        let summary = get_summary(&seeded()).unwrap();
        assert_eq!(summary.total_products, 3);
        assert_eq!(summary.total_stock, 21);
        assert_eq!(summary.total_delivered, 10);
        assert_eq!(summary.low_stock_count, 2);
        assert_eq!(summary.inventory_value, Money::from_cents(1000 + 4500 + 1000));
    }

    #[test]
    fn test_department_cards() {
        let departments = get_departments(&seeded(), &ConfigState::default()).unwrap();

        let names: Vec<&str> = departments
            .cards
            .iter()
            .map(|c| c.summary.name.as_str())
            .collect();
        assert_eq!(names, ["Kitchen", "Clothing", "Toys"]);

        assert_eq!(departments.cards[0].summary.product_count, 1);
        assert_eq!(departments.cards[0].location, "/products?department=kitchen");
        assert_eq!(departments.cards[1].summary.product_count, 0);
        assert_eq!(departments.unlisted, ["Garden"]);
    }
}
