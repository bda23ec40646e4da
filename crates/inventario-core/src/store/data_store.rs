// ── Central reactive data store ──
//
// In-memory copies of products, movements and statistics. Each starts
// empty, is overwritten by every successful fetch and is broadcast to
// subscribers via `watch` channels.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use inventario_api::{Movement, Product, Statistics};
use tokio::sync::watch;

use super::slot::{Slot, Versioned};

/// Central reactive store for the three backend resources.
pub struct DataStore {
    pub(crate) products: Slot<Vec<Product>>,
    pub(crate) movements: Slot<Vec<Movement>>,
    pub(crate) statistics: Slot<Statistics>,
    pub(crate) last_refresh: watch::Sender<Option<DateTime<Utc>>>,
}

impl Default for DataStore {
    fn default() -> Self {
        Self::new()
    }
}

impl DataStore {
    pub fn new() -> Self {
        let (last_refresh, _) = watch::channel(None);
        Self {
            products: Slot::new(Vec::new()),
            movements: Slot::new(Vec::new()),
            statistics: Slot::new(Statistics::default()),
            last_refresh,
        }
    }

    // ── Snapshot accessors ───────────────────────────────────────────

    pub fn products_snapshot(&self) -> Arc<Vec<Product>> {
        self.products.snapshot()
    }

    pub fn movements_snapshot(&self) -> Arc<Vec<Movement>> {
        self.movements.snapshot()
    }

    pub fn statistics_snapshot(&self) -> Arc<Statistics> {
        self.statistics.snapshot()
    }

    // ── Request tokens ───────────────────────────────────────────────

    pub(crate) fn reserve_products(&self) -> u64 {
        self.products.reserve()
    }

    pub(crate) fn reserve_movements(&self) -> u64 {
        self.movements.reserve()
    }

    pub(crate) fn reserve_statistics(&self) -> u64 {
        self.statistics.reserve()
    }

    // ── Mutations ────────────────────────────────────────────────────

    pub(crate) fn apply_products(&self, generation: u64, products: Vec<Product>) -> bool {
        self.touch(self.products.apply(generation, products))
    }

    pub(crate) fn apply_movements(&self, generation: u64, movements: Vec<Movement>) -> bool {
        self.touch(self.movements.apply(generation, movements))
    }

    pub(crate) fn apply_statistics(&self, generation: u64, statistics: Statistics) -> bool {
        self.touch(self.statistics.apply(generation, statistics))
    }

    fn touch(&self, applied: bool) -> bool {
        if applied {
            self.last_refresh.send_replace(Some(Utc::now()));
        }
        applied
    }

    // ── Subscriptions ────────────────────────────────────────────────

    pub fn subscribe_products(&self) -> watch::Receiver<Versioned<Vec<Product>>> {
        self.products.subscribe()
    }

    pub fn subscribe_movements(&self) -> watch::Receiver<Versioned<Vec<Movement>>> {
        self.movements.subscribe()
    }

    pub fn subscribe_statistics(&self) -> watch::Receiver<Versioned<Statistics>> {
        self.statistics.subscribe()
    }

    // ── Metadata ─────────────────────────────────────────────────────

    pub fn last_refresh(&self) -> Option<DateTime<Utc>> {
        *self.last_refresh.borrow()
    }
}
