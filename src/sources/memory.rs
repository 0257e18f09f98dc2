use std::collections::VecDeque;

use async_trait::async_trait;

use crate::models::{DashboardStats, TransactionRecord};
use crate::sources::{EventSource, HistoricalSource, SourceError};

/// Historical source serving fixed data, or a fixed outage.
pub struct StaticHistory {
    stats: Option<DashboardStats>,
    transactions: Option<Vec<TransactionRecord>>
}

impl StaticHistory {
    pub fn new(stats: DashboardStats, transactions: Vec<TransactionRecord>) -> Self {
        Self {
            stats: Some(stats),
            transactions: Some(transactions)
        }
    }

    /// A source whose every fetch fails with `Unavailable`.
    pub fn unavailable() -> Self {
        Self {
            stats: None,
            transactions: None
        }
    }

    pub fn without_stats(mut self) -> Self {
        self.stats = None;
        self
    }

    pub fn without_transactions(mut self) -> Self {
        self.transactions = None;
        self
    }
}

#[async_trait]
impl HistoricalSource for StaticHistory {
    async fn fetch_stats(&self) -> Result<DashboardStats, SourceError> {
        self.stats.ok_or_else(|| SourceError::Unavailable("stats are not available".to_string()))
    }

    async fn fetch_recent_transactions(&self) -> Result<Vec<TransactionRecord>, SourceError> {
        self.transactions.clone()
            .ok_or_else(|| SourceError::Unavailable("transactions are not available".to_string()))
    }
}

/// Event source replaying a fixed list of records, then ending.
pub struct ScriptedFeed {
    pending: VecDeque<TransactionRecord>
}

impl ScriptedFeed {
    pub fn new(records: impl IntoIterator<Item = TransactionRecord>) -> Self {
        Self {
            pending: records.into_iter().collect()
        }
    }
}

#[async_trait]
impl EventSource for ScriptedFeed {
    async fn next_transaction(&mut self) -> Option<TransactionRecord> {
        self.pending.pop_front()
    }
}
