use chrono::{DateTime, Duration, Timelike, Utc};
use serde::Serialize;

use crate::storage::Snapshot;

pub const HOURS_IN_FLOW: usize = 24;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HourlyBucket {
    /// `HH:00` in UTC.
    pub label: String,
    pub value: u64,
    pub flagged: u64,
    pub hour: u32
}

/// Transaction counts for the 24 hourly buckets ending at `now`, oldest first.
///
/// Records are matched on hour-of-day only. Two records from different days
/// that share an hour land in the same bucket.
pub fn hourly_flow(snapshot: &Snapshot, now: DateTime<Utc>) -> Vec<HourlyBucket> {
    let mut counts = [0u64; HOURS_IN_FLOW];
    let mut flagged = [0u64; HOURS_IN_FLOW];

    for record in snapshot.records() {
        let hour = record.timestamp.hour() as usize;
        counts[hour] += 1;

        if record.is_flagged() {
            flagged[hour] += 1;
        }
    }

    (0..HOURS_IN_FLOW as i64).rev()
        .map(|hours_ago| {
            let hour = (now - Duration::hours(hours_ago)).hour();

            HourlyBucket {
                label: format!("{hour:02}:00"),
                value: counts[hour as usize],
                flagged: flagged[hour as usize],
                hour
            }
        })
        .collect()
}
