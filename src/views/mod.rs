//! Chart-ready projections of an aggregation snapshot.
//!
//! Every calculator here is a pure function of a `Snapshot` (and, for the
//! hourly flow, of the current instant). Output records share the keys
//! `label` and `value` so presentation bindings never need to remap fields
//! between refreshes.

mod fraud_distribution;
mod hourly_flow;
mod risk_histogram;
mod summary;
mod type_breakdown;

use chrono::{DateTime, DurationRound, TimeDelta, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

use crate::models::TransactionRecord;
use crate::storage::Snapshot;

pub use fraud_distribution::{fraud_distribution, FraudDistribution};
pub use hourly_flow::{hourly_flow, HourlyBucket, HOURS_IN_FLOW};
pub use risk_histogram::{risk_histogram, RiskHistogram, RISK_BUCKET_LABELS};
pub use summary::{activity_feed, kpi_summary, KpiSummary};
pub use type_breakdown::{type_breakdown, TypeShare};

/// A labelled count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewPoint {
    pub label: String,
    pub value: u64
}

impl ViewPoint {
    pub fn new(label: impl Into<String>, value: u64) -> Self {
        Self {
            label: label.into(),
            value
        }
    }
}

/// Everything the dashboard page renders, computed from one snapshot.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardViews {
    pub hourly_flow: Vec<HourlyBucket>,
    pub fraud_distribution: FraudDistribution,
    pub type_breakdown: Vec<TypeShare>,
    pub risk_histogram: RiskHistogram,
    pub summary: KpiSummary,
    pub activity: Vec<TransactionRecord>,
    pub revision: u64,
    /// Start of the UTC hour the views belong to. The hourly flow ends here.
    pub hour_start: DateTime<Utc>
}

impl DashboardViews {
    pub fn compute(snapshot: &Snapshot, now: DateTime<Utc>, feed_length: usize) -> Self {
        Self {
            hourly_flow: hourly_flow(snapshot, now),
            fraud_distribution: fraud_distribution(snapshot),
            type_breakdown: type_breakdown(snapshot),
            risk_histogram: risk_histogram(snapshot),
            summary: kpi_summary(snapshot),
            activity: activity_feed(snapshot, feed_length),
            revision: snapshot.revision,
            hour_start: now.duration_trunc(TimeDelta::hours(1)).unwrap_or(now)
        }
    }
}

/// `part / whole` as a percentage string with exactly `decimals` places, or
/// `"0"` when `whole` is zero.
pub(crate) fn percentage(part: u64, whole: u64, decimals: u32) -> String {
    if whole == 0 {
        return "0".to_string();
    }

    let mut rate = (Decimal::from(part) * Decimal::ONE_HUNDRED / Decimal::from(whole))
        .round_dp_with_strategy(decimals, RoundingStrategy::MidpointAwayFromZero);
    rate.rescale(decimals);

    rate.to_string()
}
