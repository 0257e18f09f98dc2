use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::errors::RecordError;
use crate::models::{TransactionStatus, TransactionType};
use crate::types::{AccountName, RiskScore, TransactionId};

/// A single pre-labelled transaction as delivered by the event source.
///
/// Status and risk score are assigned upstream; the aggregation core never
/// changes them. Field names mirror the dashboard API so records can be read
/// from CSV exports or JSON payloads without remapping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRecord {
    /// Unique transaction identifier.
    pub id: TransactionId,
    /// When the transaction happened.
    pub timestamp: DateTime<Utc>,
    /// The kind of movement (payment, transfer, etc.)
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    /// Amount moved; must not be negative.
    //NOTE: Read as text so CSV fields never pass through f64
    #[serde(with = "rust_decimal::serde::str")]
    pub amount: Decimal,
    /// Originating account.
    pub name_orig: AccountName,
    /// Destination account.
    pub name_dest: AccountName,
    /// Processing status assigned by the source.
    pub status: TransactionStatus,
    /// Risk score assigned by an upstream scorer, if any.
    #[serde(default)]
    pub risk_score: Option<RiskScore>
}

impl TransactionRecord {
    pub fn new(
        id: impl Into<TransactionId>,
        timestamp: DateTime<Utc>,
        transaction_type: TransactionType,
        amount: Decimal,
        name_orig: impl Into<AccountName>,
        name_dest: impl Into<AccountName>,
        status: TransactionStatus
    ) -> Self {
        Self {
            id: id.into(),
            timestamp,
            transaction_type,
            amount,
            name_orig: name_orig.into(),
            name_dest: name_dest.into(),
            status,
            risk_score: None
        }
    }

    pub fn with_risk_score(mut self, risk_score: RiskScore) -> Self {
        self.risk_score = Some(risk_score);
        self
    }

    pub fn is_flagged(&self) -> bool {
        self.status == TransactionStatus::Flagged
    }

    /// Checks the record is fit for aggregation.
    ///
    /// # Errors
    /// Returns `RecordError` if:
    /// - The id is blank.
    /// - The amount is negative.
    pub fn validate(&self) -> Result<(), RecordError> {
        if self.id.trim().is_empty() {
            return Err(RecordError::empty_id(self))
        }

        if self.amount < Decimal::ZERO {
            return Err(RecordError::negative_amount(self))
        }

        Ok(())
    }
}
