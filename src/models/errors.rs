use crate::models::{TransactionRecord, TransactionType};
use crate::types::TransactionId;
use rust_decimal::Decimal;
use thiserror::Error;

/// Reasons a transaction record is refused by the aggregation store.
#[derive(Debug, Error, PartialEq)]
pub enum RecordError {
    #[error("Transaction [{transaction_id}]:[{transaction_type:?}] has a negative amount [{amount}]")]
    NegativeAmount {
        transaction_id: TransactionId,
        transaction_type: TransactionType,
        amount: Decimal
    },
    #[error("Transaction of type [{transaction_type:?}] has an empty id")]
    EmptyId {
        transaction_type: TransactionType
    },
    #[error("Numeric overflow occurred for transaction [{transaction_id}]:[{transaction_type:?}]")]
    Overflow {
        transaction_id: TransactionId,
        transaction_type: TransactionType
    }
}

impl RecordError {
    pub fn negative_amount(tx: &TransactionRecord) -> Self {
        Self::NegativeAmount {
            transaction_id: tx.id.clone(),
            transaction_type: tx.transaction_type,
            amount: tx.amount
        }
    }

    pub fn empty_id(tx: &TransactionRecord) -> Self {
        Self::EmptyId {
            transaction_type: tx.transaction_type
        }
    }

    pub fn overflow(tx: &TransactionRecord) -> Self {
        Self::Overflow {
            transaction_id: tx.id.clone(),
            transaction_type: tx.transaction_type
        }
    }
}
