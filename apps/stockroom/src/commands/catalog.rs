//! # Catalog Commands
//!
//! Trigger a catalog load and report its progress.

use serde::Serialize;
use stockroom_catalog::LoadStatus;
use tracing::{debug, info};

use crate::error::ApiError;
use crate::state::InventoryState;

/// Outcome of a successful load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadSummaryDto {
    pub loaded: usize,
    pub rejected: usize,
    /// One line per dropped record: "record 3: price is missing".
    pub rejected_reasons: Vec<String>,
}

/// Catalog status for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogStatusDto {
    pub source: String,
    pub status: LoadStatus,
    pub product_count: usize,
}

/// Fetches the catalog and replaces the collection.
///
/// A second call while a load is running fails with `LOAD_IN_PROGRESS`.
/// A failed fetch leaves the current collection in place.
pub async fn load_catalog(inventory: &InventoryState) -> Result<LoadSummaryDto, ApiError> {
    debug!("load_catalog");

    let report = inventory.loader().load().await?;

    info!(
        loaded = report.loaded,
        rejected = report.rejected_count(),
        "Catalog loaded"
    );

    Ok(LoadSummaryDto {
        loaded: report.loaded,
        rejected: report.rejected_count(),
        rejected_reasons: report
            .rejected
            .iter()
            .map(|r| format!("record {}: {}", r.index, r.reason))
            .collect(),
    })
}

/// Current load state plus where the catalog comes from.
pub async fn catalog_status(inventory: &InventoryState) -> Result<CatalogStatusDto, ApiError> {
    let status = inventory.loader().status().await;
    let product_count = inventory.inventory().with_store(|store| store.len());

    Ok(CatalogStatusDto {
        source: inventory.loader().source_description(),
        status,
        product_count,
    })
}
