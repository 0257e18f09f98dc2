use std::collections::VecDeque;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::models::{DashboardStats, TransactionRecord};
use crate::storage::{Snapshot, StoreError, DEFAULT_CAPACITY};

/// Bounded, most-recent-first window of transactions plus session counters.
///
/// `initialize` and `ingest` are the only mutating operations. Callers sharing a
/// store across tasks are expected to serialize them (the dashboard wraps the
/// store in a mutex).
#[derive(Debug)]
pub struct AggregationStore {
    capacity: usize,
    window: VecDeque<Arc<TransactionRecord>>,
    stats: DashboardStats,
    revision: u64
}

impl AggregationStore {
    /// Creates an empty store retaining at most `capacity` records (minimum 1).
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);

        Self {
            capacity,
            window: VecDeque::with_capacity(capacity + 1),
            stats: DashboardStats::default(),
            revision: 0
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Replaces all state with a bulk seed.
    ///
    /// `seed_transactions` must already be ordered most-recent-first; only the
    /// first `capacity` valid records are retained. Counters are taken from
    /// `seed_stats` verbatim since server-side totals cover far more history
    /// than the window.
    ///
    /// # Errors
    /// Returns `StoreError::InconsistentStats` if the counters break their
    /// invariants, in which case the store is left as it was.
    pub fn initialize<I>(&mut self, seed_transactions: I, seed_stats: DashboardStats) -> Result<(), StoreError>
    where
        I: IntoIterator<Item = TransactionRecord>
    {
        if !seed_stats.is_consistent() {
            return Err(StoreError::InconsistentStats(seed_stats));
        }

        let window: VecDeque<_> = seed_transactions.into_iter()
            .filter(|record| match record.validate() {
                Ok(_) => true,
                Err(error) => {
                    warn!("Skipping seed record: {error}");
                    false
                }
            })
            .take(self.capacity)
            .map(Arc::new)
            .collect();

        debug!("Store initialized with {} records and {:?}", window.len(), seed_stats);

        self.window = window;
        self.stats = seed_stats;
        self.revision += 1;

        Ok(())
    }

    /// Pushes one record onto the front of the window, evicting the oldest
    /// records beyond capacity, and advances the counters.
    ///
    /// # Errors
    /// Returns `StoreError::InvalidRecord` if the record fails validation or
    /// the counters would overflow. State is unchanged on error.
    pub fn ingest(&mut self, transaction: TransactionRecord) -> Result<(), StoreError> {
        transaction.validate()?;
        let stats = self.stats.advanced_by(&transaction)?;

        self.window.push_front(Arc::new(transaction));

        while self.window.len() > self.capacity {
            if let Some(evicted) = self.window.pop_back() {
                debug!("Evicted transaction [{}] from window", evicted.id);
            }
        }

        self.stats = stats;
        self.revision += 1;

        Ok(())
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            window: self.window.iter().cloned().collect(),
            stats: self.stats,
            revision: self.revision,
            capacity: self.capacity
        }
    }
}

impl Default for AggregationStore {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
