//! # Toast Notifications
//!
//! Turns store events into short success/failure notices.
//!
//! ```text
//! InventoryStore ──on_event──► ToastEmitter ──► tracing (info!/error!)
//!                                   │
//!                                   └──► pending queue ──► console prints
//!                                                          after each command
//! ```

use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};

use serde::Serialize;
use stockroom_store::{InventoryObserver, StoreEvent};
use tracing::{error, info};

/// Oldest toasts are dropped past this many.
const MAX_PENDING: usize = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastKind {
    Success,
    Error,
}

/// One notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Toast {
    pub kind: ToastKind,
    pub message: String,
}

impl std::fmt::Display for Toast {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            ToastKind::Success => write!(f, "✔ {}", self.message),
            ToastKind::Error => write!(f, "✘ {}", self.message),
        }
    }
}

/// Observer that logs every event and queues it for display.
#[derive(Debug, Default)]
pub struct ToastEmitter {
    pending: Mutex<VecDeque<Toast>>,
}

impl ToastEmitter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes every queued toast, oldest first.
    pub fn drain(&self) -> Vec<Toast> {
        let mut pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
        pending.drain(..).collect()
    }
}

impl InventoryObserver for ToastEmitter {
    fn on_event(&self, event: &StoreEvent) {
        let toast = Toast {
            kind: if event.is_success() {
                ToastKind::Success
            } else {
                ToastKind::Error
            },
            message: event.message(),
        };

        match toast.kind {
            ToastKind::Success => info!(toast = %toast.message, "Notification"),
            ToastKind::Error => error!(toast = %toast.message, ?event, "Notification"),
        }

        let mut pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
        if pending.len() == MAX_PENDING {
            pending.pop_front();
        }
        pending.push_back(toast);
    }
}
