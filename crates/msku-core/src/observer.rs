//! Batch progress events.
//!
//! The processor never logs directly; it reports to a [`BatchObserver`]
//! supplied by the caller. [`TracingObserver`] forwards to `tracing`,
//! [`EventLog`] records events for later inspection.

use msku_ingest::ColumnDetection;
use tracing::{debug, info, warn};

/// Something notable that happened while processing a batch.
#[derive(Debug, Clone, PartialEq)]
pub enum BatchEvent {
    /// The identifier column was chosen. `detection` is `None` when the
    /// caller named the column explicitly.
    ColumnSelected {
        column: String,
        detection: Option<ColumnDetection>,
    },
    /// Detection found nothing; the first column is used instead.
    ColumnFallback { column: String },
    /// Classifier pre-pass over the unique identifiers finished.
    CategoriesGenerated { categories: usize, identifiers: usize },
    /// One category produced by the pre-pass.
    CategoryGroup { category: String, count: usize },
    /// Every row has an MSKU.
    Completed {
        total: usize,
        mapped: usize,
        success_rate: f64,
    },
}

pub trait BatchObserver {
    fn on_event(&mut self, event: &BatchEvent);
}

/// Discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl BatchObserver for NoopObserver {
    fn on_event(&mut self, _event: &BatchEvent) {}
}

/// Forwards events to `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl BatchObserver for TracingObserver {
    fn on_event(&mut self, event: &BatchEvent) {
        match event {
            BatchEvent::ColumnSelected { column, detection } => match detection {
                Some(found) => info!(column = %column, method = ?found.method, "identifier column detected"),
                None => info!(column = %column, "identifier column set explicitly"),
            },
            BatchEvent::ColumnFallback { column } => {
                warn!(column = %column, "no identifier column detected, using first column");
            }
            BatchEvent::CategoriesGenerated {
                categories,
                identifiers,
            } => info!(categories, identifiers, "generated mapping categories"),
            BatchEvent::CategoryGroup { category, count } => {
                debug!(category = %category, count, "category group");
            }
            BatchEvent::Completed {
                total,
                mapped,
                success_rate,
            } => info!(total, mapped, success_rate, "batch processed"),
        }
    }
}

/// Keeps every event in order.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Vec<BatchEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[BatchEvent] {
        &self.events
    }

    pub fn into_events(self) -> Vec<BatchEvent> {
        self.events
    }
}

impl BatchObserver for EventLog {
    fn on_event(&mut self, event: &BatchEvent) {
        self.events.push(event.clone());
    }
}

impl<T: BatchObserver + ?Sized> BatchObserver for &mut T {
    fn on_event(&mut self, event: &BatchEvent) {
        (**self).on_event(event);
    }
}
