use crate::models::{DashboardStats, RecordError};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum StoreError {
    #[error("Invalid record: {0}")]
    InvalidRecord(#[from] RecordError),
    #[error("Seed stats are inconsistent: {0:?}")]
    InconsistentStats(DashboardStats)
}
