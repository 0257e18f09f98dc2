mod csv_history;
mod errors;
mod memory;
mod simulated_feed;
#[cfg(test)]
mod tests;

use async_trait::async_trait;

use crate::models::{DashboardStats, TransactionRecord};

pub use csv_history::CsvHistory;
pub use errors::SourceError;
pub use memory::{ScriptedFeed, StaticHistory};
pub use simulated_feed::SimulatedFeed;

/// Bulk data used to seed a dashboard session.
#[async_trait]
pub trait HistoricalSource: Send + Sync {
    /// Session-wide counters, usually covering more history than the window.
    async fn fetch_stats(&self) -> Result<DashboardStats, SourceError>;

    /// Recent records, most recent first.
    async fn fetch_recent_transactions(&self) -> Result<Vec<TransactionRecord>, SourceError>;
}

/// Live producer polled once per dashboard tick.
#[async_trait]
pub trait EventSource: Send {
    /// The next record, or `None` once the source is exhausted.
    async fn next_transaction(&mut self) -> Option<TransactionRecord>;
}
