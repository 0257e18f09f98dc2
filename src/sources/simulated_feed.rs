use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rust_decimal::Decimal;

use crate::models::{DashboardStats, TransactionRecord, TransactionStatus, TransactionType};
use crate::sources::{EventSource, StaticHistory};
use crate::types::RiskScore;

const PROBABILITY_FLAGGED: f64 = 0.05;
const PROBABILITY_PENDING: f64 = 0.15;

/// Relative frequency of each type, in `TransactionType::ALL` order.
const TYPE_WEIGHTS: [u32; 5] = [35, 25, 20, 15, 5];

/// Synthetic event source for demos and load testing.
///
/// Records are plausible rather than realistic: flagged transactions carry
/// high risk scores, everything else low to medium ones.
pub struct SimulatedFeed {
    rng: StdRng,
    sequence: u64
}

impl SimulatedFeed {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
            sequence: 0
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            sequence: 0
        }
    }

    /// Generates one record stamped with `timestamp`.
    pub fn generate(&mut self, timestamp: DateTime<Utc>) -> TransactionRecord {
        self.sequence += 1;

        let transaction_type = self.pick_type();
        let amount = Decimal::new(self.rng.gen_range(1_000..5_000_000), 2);
        let name_orig = format!("C{}", self.rng.gen_range(100_000_000..999_999_999u64));
        let name_dest = match transaction_type {
            TransactionType::Payment => format!("M{}", self.rng.gen_range(100_000_000..999_999_999u64)),
            _ => format!("C{}", self.rng.gen_range(100_000_000..999_999_999u64))
        };

        let status = if self.rng.gen_bool(PROBABILITY_FLAGGED) {
            TransactionStatus::Flagged
        } else if self.rng.gen_bool(PROBABILITY_PENDING) {
            TransactionStatus::Pending
        } else {
            TransactionStatus::Processed
        };

        let score = match status {
            TransactionStatus::Flagged => self.rng.gen_range(60..=100u8),
            _ => self.rng.gen_range(0..60u8)
        };

        let record = TransactionRecord::new(
            format!("TX{:010}", self.sequence),
            timestamp,
            transaction_type,
            amount,
            name_orig,
            name_dest,
            status
        );

        match RiskScore::try_from(score) {
            Ok(risk_score) => record.with_risk_score(risk_score),
            Err(_) => record
        }
    }

    /// Builds a historical source of `count` records spread over the last day,
    /// most recent first, with stats aggregated over all of them.
    pub fn backfill(&mut self, count: usize, now: DateTime<Utc>) -> StaticHistory {
        let spacing = Duration::seconds(86_400 / count.max(1) as i64);
        let mut stats = DashboardStats::default();
        let mut records = Vec::with_capacity(count);

        for index in 0..count {
            let record = self.generate(now - spacing * index as i32);

            if let Ok(advanced) = stats.advanced_by(&record) {
                stats = advanced;
                records.push(record);
            }
        }

        StaticHistory::new(stats, records)
    }

    fn pick_type(&mut self) -> TransactionType {
        let total: u32 = TYPE_WEIGHTS.iter().sum();
        let mut roll = self.rng.gen_range(0..total);

        for (transaction_type, weight) in TransactionType::ALL.iter().zip(TYPE_WEIGHTS) {
            if roll < weight {
                return *transaction_type;
            }
            roll -= weight;
        }

        TransactionType::Payment
    }
}

impl Default for SimulatedFeed {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EventSource for SimulatedFeed {
    async fn next_transaction(&mut self) -> Option<TransactionRecord> {
        Some(self.generate(Utc::now()))
    }
}
