use std::sync::Arc;

use crate::models::{DashboardStats, TransactionRecord};

/// Point-in-time copy of the aggregation state.
///
/// Records are shared with the live window, so taking a snapshot never copies
/// transaction payloads, and later evictions cannot tear a snapshot already taken.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    /// Retained records, most recent first.
    pub window: Vec<Arc<TransactionRecord>>,
    /// Session-wide counters, including evicted records.
    pub stats: DashboardStats,
    /// Mutation count of the store at the time the snapshot was taken.
    pub revision: u64,
    /// Maximum window length of the originating store.
    pub capacity: usize
}

impl Snapshot {
    pub fn is_empty(&self) -> bool {
        self.window.is_empty()
    }

    pub fn len(&self) -> usize {
        self.window.len()
    }

    pub fn records(&self) -> impl Iterator<Item = &TransactionRecord> {
        self.window.iter().map(|record| record.as_ref())
    }
}
