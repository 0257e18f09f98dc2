use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::storage::Snapshot;
use crate::types::RiskScore;
use crate::views::ViewPoint;

pub const RISK_BUCKET_LABELS: [&str; 5] = ["0-20", "20-40", "40-60", "60-80", "80-100"];

const BUCKET_WIDTH: u32 = 20;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskHistogram {
    pub buckets: Vec<ViewPoint>,
    /// Window records that arrived without a risk score.
    pub unscored: u64
}

/// Buckets the risk scores carried by window records into five fixed-width
/// ranges. Lower bounds are inclusive; a score of exactly 100 lands in `80-100`.
pub fn risk_histogram(snapshot: &Snapshot) -> RiskHistogram {
    let mut counts = [0u64; RISK_BUCKET_LABELS.len()];
    let mut unscored = 0;

    for record in snapshot.records() {
        match record.risk_score {
            Some(score) => counts[bucket_index(score)] += 1,
            None => unscored += 1
        }
    }

    RiskHistogram {
        buckets: RISK_BUCKET_LABELS.iter()
            .zip(counts)
            .map(|(label, count)| ViewPoint::new(*label, count))
            .collect(),
        unscored
    }
}

fn bucket_index(score: RiskScore) -> usize {
    let index = (score.value() / Decimal::from(BUCKET_WIDTH)).floor()
        .to_usize()
        .unwrap_or(0);

    index.min(RISK_BUCKET_LABELS.len() - 1)
}
