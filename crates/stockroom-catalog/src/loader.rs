//! # Catalog Loader
//!
//! Runs the one async step of the system: fetch the catalog, then hand it
//! to the store.
//!
//! ## Load State Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │     ┌──────┐   load()   ┌──────────┐   fetch ok   ┌──────────────────┐  │
//! │     │ Idle │───────────►│ InFlight │─────────────►│ Loaded{count,..} │  │
//! │     └──────┘            └────┬─────┘              └──────────────────┘  │
//! │                              │  ▲                                       │
//! │                   fetch err  │  │ load() again                          │
//! │                              ▼  │ (manual retry)                        │
//! │                         ┌──────────────┐                                │
//! │                         │ Failed{msg}  │  store keeps previous data     │
//! │                         └──────────────┘                                │
//! │                                                                         │
//! │  load() while InFlight ──► Err(LoadInProgress), nothing else happens   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The store lock is only taken after the fetch completes, never across the
//! `.await`. If the `load()` future is dropped mid-fetch, the status goes
//! back to what it was before the load started.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use stockroom_store::{LoadReport, SharedInventory};
use tokio::sync::RwLock;
use tracing::{error, info, warn};

use crate::error::{CatalogError, CatalogResult};
use crate::source::CatalogSource;

/// Observable state of the catalog load.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum LoadStatus {
    /// No load has been started.
    #[default]
    Idle,

    /// A fetch is running.
    InFlight,

    /// The last load replaced the collection.
    #[serde(rename_all = "camelCase")]
    Loaded {
        count: usize,
        rejected: usize,
        loaded_at: DateTime<Utc>,
    },

    /// The last load failed; the collection is whatever it was before.
    Failed { message: String },
}

impl LoadStatus {
    /// Returns true while a fetch is running.
    pub fn is_in_flight(&self) -> bool {
        matches!(self, LoadStatus::InFlight)
    }
}

/// Fetches the catalog into a shared store.
///
/// ## Usage
/// ```rust,ignore
/// let loader = CatalogLoader::new(source_from_config(&config)?, inventory.clone());
/// let report = loader.load().await?;
/// ```
#[derive(Clone)]
pub struct CatalogLoader {
    source: Arc<dyn CatalogSource>,
    inventory: SharedInventory,
    status: Arc<RwLock<LoadStatus>>,
}

impl CatalogLoader {
    /// Creates an idle loader.
    pub fn new(source: Arc<dyn CatalogSource>, inventory: SharedInventory) -> Self {
        CatalogLoader {
            source,
            inventory,
            status: Arc::new(RwLock::new(LoadStatus::Idle)),
        }
    }

    /// Returns the current load status.
    pub async fn status(&self) -> LoadStatus {
        self.status.read().await.clone()
    }

    /// Where the catalog comes from.
    pub fn source_description(&self) -> String {
        self.source.describe()
    }

    /// Fetches the catalog and replaces the store's collection.
    ///
    /// ## Returns
    /// - `Ok(LoadReport)` - collection replaced, observers notified
    /// - `Err(LoadInProgress)` - another load is running, nothing changed
    /// - `Err(..)` - fetch failed, store untouched, observers told
    pub async fn load(&self) -> CatalogResult<LoadReport> {
        let guard = {
            let mut status = self.status.write().await;
            if status.is_in_flight() {
                warn!("Rejecting overlapping catalog load");
                return Err(CatalogError::LoadInProgress);
            }
            let previous = std::mem::replace(&mut *status, LoadStatus::InFlight);
            InFlightGuard::new(self.status.clone(), previous)
        };

        info!(source = %self.source.describe(), "Fetching catalog");

        match self.source.fetch().await {
            Ok(records) => {
                let report = self.inventory.with_store_mut(|store| store.load(&records));
                info!(
                    loaded = report.loaded,
                    rejected = report.rejected_count(),
                    "Catalog load complete"
                );

                guard
                    .settle(LoadStatus::Loaded {
                        count: report.loaded,
                        rejected: report.rejected_count(),
                        loaded_at: Utc::now(),
                    })
                    .await;
                Ok(report)
            }
            Err(e) => {
                error!(error = %e, "Catalog fetch failed");
                let message = e.to_string();
                self.inventory
                    .with_store(|store| store.report_load_failure(&message));

                guard.settle(LoadStatus::Failed { message }).await;
                Err(e)
            }
        }
    }
}

/// Owns the `InFlight` status of one load.
///
/// Dropped without [`settle`](Self::settle) finishing, it writes back
/// `on_drop`: the pre-load status, or the final status once it is known.
struct InFlightGuard {
    status: Arc<RwLock<LoadStatus>>,
    on_drop: Option<LoadStatus>,
}

impl InFlightGuard {
    fn new(status: Arc<RwLock<LoadStatus>>, previous: LoadStatus) -> Self {
        InFlightGuard {
            status,
            on_drop: Some(previous),
        }
    }

    async fn settle(mut self, outcome: LoadStatus) {
        self.on_drop = Some(outcome.clone());
        *self.status.write().await = outcome;
        self.on_drop = None;
    }
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        let Some(restore) = self.on_drop.take() else {
            return;
        };
        warn!("Catalog load cancelled, leaving InFlight");

        // only this load can be in flight while the guard lives
        match self.status.try_write() {
            Ok(mut status) => {
                if status.is_in_flight() {
                    *status = restore;
                }
            }
            Err(_) => {
                let Ok(handle) = tokio::runtime::Handle::try_current() else {
                    error!("No runtime to reset catalog load status");
                    return;
                };
                let status = self.status.clone();
                handle.spawn(async move {
                    let mut status = status.write().await;
                    if status.is_in_flight() {
                        *status = restore;
                    }
                });
            }
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::StaticCatalogSource;
    use async_trait::async_trait;
    use serde_json::{json, Value};
    use std::sync::Mutex;
    use stockroom_store::{InventoryObserver, StoreEvent};
    use tokio::sync::Notify;

    struct FailingSource;

    #[async_trait]
    impl CatalogSource for FailingSource {
        async fn fetch(&self) -> CatalogResult<Vec<Value>> {
            Err(CatalogError::RequestFailed("connection refused".to_string()))
        }

        fn describe(&self) -> String {
            "failing".to_string()
        }
    }

    /// Blocks in `fetch` until released.
    struct GatedSource {
        gate: Notify,
        records: Vec<Value>,
    }

    #[async_trait]
    impl CatalogSource for GatedSource {
        async fn fetch(&self) -> CatalogResult<Vec<Value>> {
            self.gate.notified().await;
            Ok(self.records.clone())
        }

        fn describe(&self) -> String {
            "gated".to_string()
        }
    }

    #[derive(Default)]
    struct Recorder {
        events: Mutex<Vec<StoreEvent>>,
    }

    impl InventoryObserver for Recorder {
        fn on_event(&self, event: &StoreEvent) {
            self.events.lock().unwrap().push(event.clone());
        }
    }

    fn records() -> Vec<Value> {
        vec![
            json!({"id": 1, "name": "Whisk", "department": "Kitchen", "price": 8.99, "stock": 5}),
            json!({"id": 2, "name": "Kite", "department": "Toys", "price": 15, "stock": 15}),
            json!({"id": 3, "name": "Scarf", "department": "Clothing", "price": "12.5", "stock": 8}),
        ]
    }

    #[tokio::test]
    async fn test_successful_load() {
        let inventory = SharedInventory::default();
        let loader = CatalogLoader::new(
            Arc::new(StaticCatalogSource::new(records())),
            inventory.clone(),
        );
        assert_eq!(loader.status().await, LoadStatus::Idle);

        let report = loader.load().await.unwrap();
        assert_eq!(report.loaded, 3);
        assert_eq!(inventory.with_store(|s| s.len()), 3);
        assert!(matches!(
            loader.status().await,
            LoadStatus::Loaded { count: 3, rejected: 0, .. }
        ));
    }

    #[tokio::test]
    async fn test_failed_load_keeps_previous_collection() {
        let inventory = SharedInventory::default();
        CatalogLoader::new(Arc::new(StaticCatalogSource::new(records())), inventory.clone())
            .load()
            .await
            .unwrap();

        let recorder = Arc::new(Recorder::default());
        inventory.with_store_mut(|s| s.subscribe(recorder.clone()));

        let loader = CatalogLoader::new(Arc::new(FailingSource), inventory.clone());
        let err = loader.load().await.unwrap_err();

        assert!(err.is_load_failure());
        assert_eq!(inventory.with_store(|s| s.len()), 3);
        assert!(matches!(loader.status().await, LoadStatus::Failed { .. }));

        let events = recorder.events.lock().unwrap().clone();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].message(), "Failed to fetch products");
    }

    #[tokio::test]
    async fn test_failed_load_can_be_retried() {
        let inventory = SharedInventory::default();
        let failing = CatalogLoader::new(Arc::new(FailingSource), inventory.clone());
        assert!(failing.load().await.is_err());
        assert!(failing.load().await.is_err());
        assert!(matches!(failing.status().await, LoadStatus::Failed { .. }));
    }

    #[tokio::test]
    async fn test_overlapping_load_is_rejected() {
        let inventory = SharedInventory::default();
        let source = Arc::new(GatedSource {
            gate: Notify::new(),
            records: records(),
        });
        let loader = CatalogLoader::new(source.clone(), inventory.clone());

        let first = tokio::spawn({
            let loader = loader.clone();
            async move { loader.load().await }
        });

        while !loader.status().await.is_in_flight() {
            tokio::task::yield_now().await;
        }

        assert!(matches!(
            loader.load().await,
            Err(CatalogError::LoadInProgress)
        ));
        assert!(inventory.with_store(|s| s.is_empty()));

        source.gate.notify_one();
        let report = first.await.unwrap().unwrap();
        assert_eq!(report.loaded, 3);
        assert_eq!(inventory.with_store(|s| s.len()), 3);
    }

    #[tokio::test]
    async fn test_cancelled_load_resets_status() {
        let inventory = SharedInventory::default();
        let source = Arc::new(GatedSource {
            gate: Notify::new(),
            records: records(),
        });
        let loader = CatalogLoader::new(source.clone(), inventory.clone());

        let pending = tokio::spawn({
            let loader = loader.clone();
            async move { loader.load().await }
        });
        while !loader.status().await.is_in_flight() {
            tokio::task::yield_now().await;
        }

        pending.abort();
        assert!(pending.await.unwrap_err().is_cancelled());
        while loader.status().await.is_in_flight() {
            tokio::task::yield_now().await;
        }
        assert_eq!(loader.status().await, LoadStatus::Idle);
        assert!(inventory.with_store(|s| s.is_empty()));

        // stored permit lets the next fetch through
        source.gate.notify_one();
        let report = loader.load().await.unwrap();
        assert_eq!(report.loaded, 3);
        assert!(matches!(
            loader.status().await,
            LoadStatus::Loaded { count: 3, .. }
        ));
    }

    #[tokio::test]
    async fn test_cancelled_reload_restores_previous_status() {
        let inventory = SharedInventory::default();
        let source = Arc::new(GatedSource {
            gate: Notify::new(),
            records: records(),
        });
        let loader = CatalogLoader::new(source.clone(), inventory.clone());

        source.gate.notify_one();
        loader.load().await.unwrap();
        let loaded = loader.status().await;

        let reload = tokio::spawn({
            let loader = loader.clone();
            async move { loader.load().await }
        });
        while !loader.status().await.is_in_flight() {
            tokio::task::yield_now().await;
        }
        reload.abort();
        let _ = reload.await;
        while loader.status().await.is_in_flight() {
            tokio::task::yield_now().await;
        }

        assert_eq!(loader.status().await, loaded);
        assert_eq!(inventory.with_store(|s| s.len()), 3);
    }

    #[test]
    fn test_status_serialization() {
        let json = serde_json::to_value(LoadStatus::Failed {
            message: "boom".to_string(),
        })
        .unwrap();
        assert_eq!(json["state"], "failed");

        let json = serde_json::to_value(LoadStatus::InFlight).unwrap();
        assert_eq!(json["state"], "inFlight");
    }
}
