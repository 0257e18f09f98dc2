//! Real-time aggregation core of the fraud-monitoring dashboard.
//!
//! Live transactions flow from an [`sources::EventSource`] into the
//! [`storage::AggregationStore`] owned by an [`engine::Dashboard`], which
//! serves chart-ready [`views::DashboardViews`] computed from snapshots.

pub mod engine;
pub mod models;
pub mod sources;
pub mod storage;
pub mod types;
pub mod views;
