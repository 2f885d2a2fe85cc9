//! # Product Id Allocation
//!
//! ```text
//! next_id() = max(clock_ms, highest_seen + 1)
//!
//!   highest_seen ── raised by every issued id and every loaded id
//!   clock_ms     ── milliseconds since the Unix epoch (Clock mode only)
//! ```
//!
//! Ids are strictly increasing within a session, so two adds in the same
//! millisecond, or a catalog that already uses "future" ids, never collide.

use chrono::Utc;
use stockroom_core::ProductId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum IdMode {
    Clock,
    Sequential,
}

/// Generator for fresh product ids.
#[derive(Debug, Clone)]
pub struct IdAllocator {
    mode: IdMode,
    highest_seen: ProductId,
}

impl IdAllocator {
    /// Time-derived ids (the default for a running app).
    pub fn clock() -> Self {
        IdAllocator {
            mode: IdMode::Clock,
            highest_seen: 0,
        }
    }

    /// 1, 2, 3, ... above anything already seen. Deterministic for tests.
    pub fn sequential() -> Self {
        IdAllocator {
            mode: IdMode::Sequential,
            highest_seen: 0,
        }
    }

    /// Records an id that exists in the collection.
    pub fn observe(&mut self, id: ProductId) {
        self.highest_seen = self.highest_seen.max(id);
    }

    /// Returns a fresh id greater than every id seen so far.
    pub fn next_id(&mut self) -> ProductId {
        let floor = self.highest_seen.saturating_add(1);
        let id = match self.mode {
            IdMode::Clock => now_millis().max(floor),
            IdMode::Sequential => floor,
        };
        self.highest_seen = id;
        id
    }
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self::clock()
    }
}

fn now_millis() -> ProductId {
    ProductId::try_from(Utc::now().timestamp_millis()).unwrap_or(0)
}
