//! Shared helpers for the sync integration tests.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use feedboard_db::source::{Filter, Query, Record, Returning};
use feedboard_db::{DataError, DataSource, MemorySource, SharedSource};
use feedboard_events::{SharedNotifier, Toast, ToastBus};
use serde_json::Value;
use tokio::sync::{broadcast, oneshot, Notify};

// ---------------------------------------------------------------------------
// Harness
// ---------------------------------------------------------------------------

/// In-memory backend plus a toast bus with one collecting subscriber.
pub struct Harness {
    pub source: Arc<MemorySource>,
    pub bus: Arc<ToastBus>,
    toasts: broadcast::Receiver<Toast>,
}

impl Harness {
    pub fn new() -> Self {
        let bus = Arc::new(ToastBus::default());
        let toasts = bus.subscribe();
        Self {
            source: Arc::new(MemorySource::feedback()),
            bus,
            toasts,
        }
    }

    pub fn shared_source(&self) -> SharedSource {
        self.source.clone()
    }

    pub fn notifier(&self) -> SharedNotifier {
        self.bus.clone()
    }

    /// Every toast raised since the previous call.
    pub fn take_toasts(&mut self) -> Vec<Toast> {
        let mut collected = Vec::new();
        while let Ok(toast) = self.toasts.try_recv() {
            collected.push(toast);
        }
        collected
    }

    pub fn take_titles(&mut self) -> Vec<String> {
        self.take_toasts().into_iter().map(|t| t.title).collect()
    }
}

// ---------------------------------------------------------------------------
// GatedSource
// ---------------------------------------------------------------------------

/// Wraps a [`MemorySource`] so one select can be held back.
///
/// A held select reads its rows immediately but only returns them once the
/// gate is released, so its result reflects the state at call time.
pub struct GatedSource {
    inner: Arc<MemorySource>,
    gate: Mutex<Option<oneshot::Receiver<()>>>,
    parked: Notify,
}

impl GatedSource {
    pub fn new(inner: Arc<MemorySource>) -> Self {
        Self {
            inner,
            gate: Mutex::new(None),
            parked: Notify::new(),
        }
    }

    /// Hold the next select until the returned sender fires or is dropped.
    pub fn hold_next_select(&self) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        *self.gate.lock().unwrap() = Some(rx);
        tx
    }

    /// Wait until a held select has read its rows.
    pub async fn wait_parked(&self) {
        self.parked.notified().await;
    }
}

#[async_trait]
impl DataSource for GatedSource {
    async fn select(&self, query: &Query) -> Result<Vec<Record>, DataError> {
        let gate = self.gate.lock().unwrap().take();
        let rows = self.inner.select(query).await;
        if let Some(gate) = gate {
            self.parked.notify_one();
            let _ = gate.await;
        }
        rows
    }

    async fn insert(
        &self,
        table: &str,
        rows: Vec<Record>,
        returning: Returning,
    ) -> Result<Vec<Record>, DataError> {
        self.inner.insert(table, rows, returning).await
    }

    async fn update(
        &self,
        table: &str,
        changes: Record,
        filters: &[Filter],
        returning: Returning,
    ) -> Result<Vec<Record>, DataError> {
        self.inner.update(table, changes, filters, returning).await
    }

    async fn delete(&self, table: &str, filters: &[Filter]) -> Result<(), DataError> {
        self.inner.delete(table, filters).await
    }

    async fn rpc(&self, function: &str, args: Record) -> Result<Value, DataError> {
        self.inner.rpc(function, args).await
    }
}
