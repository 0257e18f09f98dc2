use serde::Serialize;

use crate::storage::Snapshot;
use crate::views::{percentage, ViewPoint};

pub const LEGITIMATE_LABEL: &str = "Legitimate";
pub const FLAGGED_LABEL: &str = "Flagged";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FraudDistribution {
    /// `Legitimate` then `Flagged`.
    pub buckets: Vec<ViewPoint>,
    /// Flagged share of the window, one decimal place, `"0"` when empty.
    pub fraud_rate: String
}

impl FraudDistribution {
    pub fn legitimate(&self) -> u64 {
        self.count_for(LEGITIMATE_LABEL)
    }

    pub fn flagged(&self) -> u64 {
        self.count_for(FLAGGED_LABEL)
    }

    fn count_for(&self, label: &str) -> u64 {
        self.buckets.iter()
            .find(|bucket| bucket.label == label)
            .map(|bucket| bucket.value)
            .unwrap_or(0)
    }
}

/// Splits the window into flagged and everything else.
pub fn fraud_distribution(snapshot: &Snapshot) -> FraudDistribution {
    let total = snapshot.len() as u64;
    let flagged = snapshot.records().filter(|record| record.is_flagged()).count() as u64;

    FraudDistribution {
        buckets: vec![
            ViewPoint::new(LEGITIMATE_LABEL, total - flagged),
            ViewPoint::new(FLAGGED_LABEL, flagged),
        ],
        fraud_rate: percentage(flagged, total, 1)
    }
}
