use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::errors::RecordError;
use crate::models::TransactionRecord;

/// Session-wide counters, as reported by the historical source and then
/// advanced by every ingested transaction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_transactions: u64,
    pub flagged_transactions: u64,
    pub total_volume: Decimal
}

impl DashboardStats {
    pub fn new(total_transactions: u64, flagged_transactions: u64, total_volume: Decimal) -> Self {
        Self {
            total_transactions,
            flagged_transactions,
            total_volume
        }
    }

    /// Flagged never exceeds total and volume is never negative.
    pub fn is_consistent(&self) -> bool {
        self.flagged_transactions <= self.total_transactions && self.total_volume >= Decimal::ZERO
    }

    /// Returns the counters advanced by one transaction, leaving `self` untouched.
    pub fn advanced_by(&self, transaction: &TransactionRecord) -> Result<DashboardStats, RecordError> {
        let total_transactions = self.total_transactions.checked_add(1)
            .ok_or_else(|| RecordError::overflow(transaction))?;

        let flagged_transactions = if transaction.is_flagged() {
            self.flagged_transactions.checked_add(1)
                .ok_or_else(|| RecordError::overflow(transaction))?
        } else {
            self.flagged_transactions
        };

        let total_volume = self.total_volume.checked_add(transaction.amount)
            .ok_or_else(|| RecordError::overflow(transaction))?;

        Ok(DashboardStats {
            total_transactions,
            flagged_transactions,
            total_volume
        })
    }
}
