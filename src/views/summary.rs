use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

use crate::models::TransactionRecord;
use crate::storage::Snapshot;
use crate::views::percentage;

/// Headline numbers over the whole session, not just the window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KpiSummary {
    pub total_transactions: u64,
    pub flagged_transactions: u64,
    pub total_volume: Decimal,
    /// Two decimal places, `"0"` before any transaction is known.
    pub fraud_rate: String,
    pub average_amount: Decimal
}

pub fn kpi_summary(snapshot: &Snapshot) -> KpiSummary {
    let stats = snapshot.stats;

    let average_amount = if stats.total_transactions == 0 {
        Decimal::ZERO
    } else {
        (stats.total_volume / Decimal::from(stats.total_transactions))
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    };

    KpiSummary {
        total_transactions: stats.total_transactions,
        flagged_transactions: stats.flagged_transactions,
        total_volume: stats.total_volume,
        fraud_rate: percentage(stats.flagged_transactions, stats.total_transactions, 2),
        average_amount
    }
}

/// The most recent `length` records, newest first.
pub fn activity_feed(snapshot: &Snapshot, length: usize) -> Vec<TransactionRecord> {
    snapshot.records().take(length).cloned().collect()
}
