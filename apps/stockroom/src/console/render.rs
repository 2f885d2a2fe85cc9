//! Plain-text rendering of command results.

use std::fmt::Write;

use stockroom_catalog::LoadStatus;
use stockroom_core::summary::DashboardSummary;

use crate::commands::catalog::{CatalogStatusDto, LoadSummaryDto};
use crate::commands::dashboard::DepartmentsDto;
use crate::commands::product::ProductDto;
use crate::error::ApiError;

const NAME_WIDTH: usize = 28;
const DEPARTMENT_WIDTH: usize = 12;

fn clip(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        text.to_string()
    } else {
        let mut clipped: String = text.chars().take(width.saturating_sub(1)).collect();
        clipped.push('…');
        clipped
    }
}

/// Product list as a fixed-width table.
pub fn product_table(products: &[ProductDto]) -> String {
    if products.is_empty() {
        return "No products match the current view.".to_string();
    }

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:>15}  {:<nw$}  {:<dw$}  {:>10}  {:>7}  {}",
        "ID",
        "NAME",
        "DEPARTMENT",
        "PRICE",
        "STOCK",
        "STATUS",
        nw = NAME_WIDTH,
        dw = DEPARTMENT_WIDTH,
    );
    for p in products {
        let _ = writeln!(
            out,
            "{:>15}  {:<nw$}  {:<dw$}  {:>10}  {:>7}  {}",
            p.id,
            clip(&p.name, NAME_WIDTH),
            clip(&p.department, DEPARTMENT_WIDTH),
            p.price_display,
            p.stock,
            p.stock_level,
            nw = NAME_WIDTH,
            dw = DEPARTMENT_WIDTH,
        );
    }
    let _ = write!(out, "{} product(s)", products.len());
    out
}

/// Product details screen.
pub fn product_details(p: &ProductDto) -> String {
    let rows = [
        ("ID", p.id.to_string()),
        ("Name", p.name.clone()),
        ("Department", p.department.clone()),
        ("Description", p.description.clone()),
        ("Price", p.price_display.clone()),
        ("Stock", format!("{} ({})", p.stock, p.stock_level)),
        ("Delivered", p.delivered.to_string()),
        ("SKU", p.sku.clone()),
        ("Supplier", p.supplier.clone()),
        ("Image", p.image_url.clone()),
    ];

    rows.iter()
        .map(|(label, value)| format!("{:<12} {}", label, value))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn load_summary(summary: &LoadSummaryDto) -> String {
    let mut out = format!("Loaded {} product(s)", summary.loaded);
    if summary.rejected > 0 {
        let _ = write!(out, ", skipped {} invalid record(s):", summary.rejected);
        for reason in &summary.rejected_reasons {
            let _ = write!(out, "\n  - {}", reason);
        }
    }
    out
}

pub fn catalog_status(status: &CatalogStatusDto) -> String {
    let state = match &status.status {
        LoadStatus::Idle => "not loaded yet".to_string(),
        LoadStatus::InFlight => "loading...".to_string(),
        LoadStatus::Loaded {
            count,
            rejected,
            loaded_at,
        } => format!(
            "loaded {} ({} skipped) at {}",
            count,
            rejected,
            loaded_at.format("%Y-%m-%d %H:%M:%S UTC")
        ),
        LoadStatus::Failed { message } => format!("failed: {}", message),
    };

    format!(
        "Source:   {}\nStatus:   {}\nProducts: {}",
        status.source, state, status.product_count
    )
}

pub fn dashboard(summary: &DashboardSummary) -> String {
    format!(
        "Products:        {}\nTotal stock:     {}\nTotal delivered: {}\nLow stock:       {}\nInventory value: {}",
        summary.total_products,
        summary.total_stock,
        summary.total_delivered,
        summary.low_stock_count,
        summary.inventory_value,
    )
}

pub fn departments(departments: &DepartmentsDto) -> String {
    let mut out = String::new();
    for card in &departments.cards {
        let s = &card.summary;
        let _ = writeln!(
            out,
            "{:<dw$}  {:>4} products  {:>6} in stock  {:>4} low  → {}",
            s.name,
            s.product_count,
            s.total_stock,
            s.low_stock_count,
            card.location,
            dw = DEPARTMENT_WIDTH,
        );
    }
    if !departments.unlisted.is_empty() {
        let _ = writeln!(out, "Also in catalog: {}", departments.unlisted.join(", "));
    }
    out.trim_end().to_string()
}

/// Error line plus one line per offending field.
pub fn error(err: &ApiError) -> String {
    let mut out = format!("✘ {}", err);
    if let Some(fields) = &err.fields {
        for (field, message) in fields {
            let _ = write!(out, "\n  {}: {}", field, message);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use stockroom_core::StockLevel;

    fn dto(name: &str) -> ProductDto {
        ProductDto {
            id: 1,
            name: name.to_string(),
            department: "Kitchen".to_string(),
            description: "d".to_string(),
            price_cents: 950,
            price_display: "$9.50".to_string(),
            stock: 5,
            stock_level: StockLevel::Low,
            sku: "K-1".to_string(),
            supplier: "Acme".to_string(),
            delivered: 0,
            image_url: String::new(),
        }
    }

    #[test]
    fn test_product_table() {
        let table = product_table(&[dto("Whisk")]);
        assert!(table.contains("Whisk"));
        assert!(table.contains("$9.50"));
        assert!(table.contains("Low Stock"));
        assert!(table.ends_with("1 product(s)"));

        assert_eq!(product_table(&[]), "No products match the current view.");
    }

    #[test]
    fn test_clip_long_names() {
        let long = "x".repeat(40);
        let clipped = clip(&long, NAME_WIDTH);
        assert_eq!(clipped.chars().count(), NAME_WIDTH);
        assert!(clipped.ends_with('…'));
    }
}
