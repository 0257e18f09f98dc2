use super::{AggregationStore, StoreError, DEFAULT_CAPACITY};
use crate::models::{DashboardStats, RecordError, TransactionRecord, TransactionStatus, TransactionType};
use anyhow::Result;
use chrono::{Duration, TimeZone, Utc};
use rust_decimal::Decimal;
use std::str::FromStr;

fn create_record(id: &str, amount: &str, status: TransactionStatus) -> Result<TransactionRecord> {
    Ok(TransactionRecord::new(
        id,
        Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap(),
        TransactionType::Payment,
        Decimal::from_str(amount)?,
        "C1",
        "M1",
        status
    ))
}

fn window_ids(store: &AggregationStore) -> Vec<String> {
    store.snapshot().records().map(|record| record.id.clone()).collect()
}

#[test]
fn test_new_store_starts_empty() {
    let store = AggregationStore::default();
    let snapshot = store.snapshot();

    assert_eq!(store.capacity(), DEFAULT_CAPACITY);
    assert!(snapshot.is_empty());
    assert_eq!(snapshot.stats, DashboardStats::default());
    assert_eq!(snapshot.revision, 0);
}

#[test]
fn test_ingest_beyond_capacity_evicts_oldest_first() -> Result<()> {
    let mut store = AggregationStore::new(3);

    for id in ["A", "B", "C", "D"] {
        store.ingest(create_record(id, "1", TransactionStatus::Processed)?)?;
    }

    let snapshot = store.snapshot();

    assert_eq!(window_ids(&store), vec!["D", "C", "B"]);
    assert_eq!(snapshot.stats.total_transactions, 4);
    assert_eq!(snapshot.stats.total_volume, Decimal::from(4));

    Ok(())
}

#[test]
fn test_window_never_exceeds_capacity_and_flagged_never_exceeds_total() -> Result<()> {
    let mut store = AggregationStore::new(5);

    for index in 0..40 {
        let status = if index % 3 == 0 { TransactionStatus::Flagged } else { TransactionStatus::Pending };
        store.ingest(create_record(&format!("tx-{index}"), "2.5", status)?)?;

        let snapshot = store.snapshot();

        assert!(snapshot.len() <= 5);
        assert!(snapshot.stats.flagged_transactions <= snapshot.stats.total_transactions);
    }

    Ok(())
}

#[test]
fn test_eviction_keeps_arrival_order_of_survivors() -> Result<()> {
    let capacity = 4;
    let mut store = AggregationStore::new(capacity);

    for index in 0..=capacity {
        store.ingest(create_record(&format!("tx-{index}"), "1", TransactionStatus::Processed)?)?;
    }

    assert_eq!(window_ids(&store), vec!["tx-4", "tx-3", "tx-2", "tx-1"]);

    Ok(())
}

#[test]
fn test_counters_survive_eviction() -> Result<()> {
    let mut store = AggregationStore::new(1);

    store.ingest(create_record("tx-1", "10", TransactionStatus::Flagged)?)?;
    store.ingest(create_record("tx-2", "5", TransactionStatus::Processed)?)?;

    let snapshot = store.snapshot();

    assert_eq!(snapshot.len(), 1);
    assert_eq!(snapshot.stats.total_transactions, 2);
    assert_eq!(snapshot.stats.flagged_transactions, 1);
    assert_eq!(snapshot.stats.total_volume, Decimal::from(15));

    Ok(())
}

#[test]
fn test_negative_amount_is_rejected_and_state_is_unchanged() -> Result<()> {
    let mut store = AggregationStore::new(3);
    store.ingest(create_record("tx-1", "7", TransactionStatus::Processed)?)?;
    let before = store.snapshot();

    let result = store.ingest(create_record("tx-2", "-5", TransactionStatus::Processed)?);
    let after = store.snapshot();

    assert!(matches!(result, Err(StoreError::InvalidRecord(RecordError::NegativeAmount { .. }))));
    assert_eq!(after.stats, before.stats);
    assert_eq!(after.revision, before.revision);
    assert_eq!(window_ids(&store), vec!["tx-1"]);

    Ok(())
}

#[test]
fn test_initialize_reproduces_seed_counters_exactly() -> Result<()> {
    let mut store = AggregationStore::new(3);
    let stats = DashboardStats::new(284_719, 1_247, Decimal::from_str("45829173.55")?);

    store.initialize(Vec::new(), stats)?;

    assert_eq!(store.snapshot().stats, stats);

    Ok(())
}

#[test]
fn test_initialize_truncates_seed_to_capacity_and_replaces_state() -> Result<()> {
    let mut store = AggregationStore::new(2);
    store.ingest(create_record("old", "1", TransactionStatus::Processed)?)?;

    let base = Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap();
    let seed = (0..4)
        .map(|index| -> Result<TransactionRecord> {
            let mut record = create_record(&format!("seed-{index}"), "1", TransactionStatus::Processed)?;
            record.timestamp = base - Duration::minutes(index);
            Ok(record)
        })
        .collect::<Result<Vec<_>>>()?;

    store.initialize(seed, DashboardStats::new(100, 3, Decimal::from(400)))?;

    assert_eq!(window_ids(&store), vec!["seed-0", "seed-1"]);
    assert_eq!(store.snapshot().stats.total_transactions, 100);

    Ok(())
}

#[test]
fn test_initialize_skips_invalid_seed_records() -> Result<()> {
    let mut store = AggregationStore::new(2);
    let seed = vec![
        create_record("seed-0", "1", TransactionStatus::Processed)?,
        create_record("seed-1", "-1", TransactionStatus::Processed)?,
        create_record("seed-2", "1", TransactionStatus::Processed)?,
    ];

    store.initialize(seed, DashboardStats::default())?;

    assert_eq!(window_ids(&store), vec!["seed-0", "seed-2"]);

    Ok(())
}

#[test]
fn test_initialize_rejects_inconsistent_stats() -> Result<()> {
    let mut store = AggregationStore::new(2);
    store.ingest(create_record("tx-1", "1", TransactionStatus::Processed)?)?;

    let result = store.initialize(Vec::new(), DashboardStats::new(1, 2, Decimal::ZERO));

    assert!(matches!(result, Err(StoreError::InconsistentStats(_))));
    assert_eq!(window_ids(&store), vec!["tx-1"]);
    assert_eq!(store.snapshot().stats.total_transactions, 1);

    Ok(())
}

#[test]
fn test_snapshot_is_isolated_from_later_ingestion() -> Result<()> {
    let mut store = AggregationStore::new(2);
    store.ingest(create_record("tx-1", "1", TransactionStatus::Processed)?)?;

    let snapshot = store.snapshot();

    store.ingest(create_record("tx-2", "1", TransactionStatus::Processed)?)?;
    store.ingest(create_record("tx-3", "1", TransactionStatus::Processed)?)?;

    assert_eq!(snapshot.len(), 1);
    assert_eq!(snapshot.window[0].id, "tx-1");
    assert_eq!(snapshot.stats.total_transactions, 1);
    assert!(store.snapshot().revision > snapshot.revision);

    Ok(())
}

#[test]
fn test_zero_capacity_is_raised_to_one() -> Result<()> {
    let mut store = AggregationStore::new(0);
    store.ingest(create_record("tx-1", "1", TransactionStatus::Processed)?)?;

    assert_eq!(store.capacity(), 1);
    assert_eq!(store.snapshot().len(), 1);

    Ok(())
}
