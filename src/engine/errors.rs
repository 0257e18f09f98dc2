use crate::storage::StoreError;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum DashboardError {
    #[error("Dashboard subscription is already running")]
    AlreadyStarted,
    #[error("Dashboard subscription has been closed")]
    SubscriptionClosed,
    #[error(transparent)]
    Store(#[from] StoreError)
}
