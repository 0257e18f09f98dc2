mod errors;
mod stats;
mod transaction;

use serde::{Deserialize, Serialize};

pub use errors::RecordError;
pub use stats::DashboardStats;
pub use transaction::TransactionRecord;

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionType {
    Payment,
    Transfer,
    CashOut,
    CashIn,
    Debit
}

impl TransactionType {
    /// Every known type, in the order the dashboard presents them.
    pub const ALL: [TransactionType; 5] = [
        TransactionType::Payment,
        TransactionType::Transfer,
        TransactionType::CashOut,
        TransactionType::CashIn,
        TransactionType::Debit
    ];

    pub fn label(&self) -> &'static str {
        match self {
            TransactionType::Payment => "Payment",
            TransactionType::Transfer => "Transfer",
            TransactionType::CashOut => "Cash Out",
            TransactionType::CashIn => "Cash In",
            TransactionType::Debit => "Debit"
        }
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    Pending,
    Processed,
    Flagged
}
