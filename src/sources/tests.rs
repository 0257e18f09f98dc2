use super::{CsvHistory, EventSource, HistoricalSource, ScriptedFeed, SimulatedFeed, SourceError, StaticHistory};

use std::io::Write;
use std::str::FromStr;

use anyhow::{anyhow, Result};
use chrono::{TimeZone, Utc};
use rust_decimal::Decimal;
use tempfile::NamedTempFile;

use crate::models::{DashboardStats, TransactionRecord, TransactionStatus, TransactionType};

fn create_temporary_csv(rows: &[&str]) -> Result<NamedTempFile> {
    let mut file = NamedTempFile::new()?;

    writeln!(file, "id,timestamp,type,amount,nameOrig,nameDest,status,riskScore")?;

    for row in rows {
        writeln!(file, "{row}")?;
    }

    Ok(file)
}

#[tokio::test]
async fn test_csv_history_aggregates_stats_over_every_valid_row() -> Result<()> {
    let file = create_temporary_csv(&[
        "tx-1,2024-03-01T08:00:00Z,PAYMENT,100.50,C1,M1,processed,12",
        "tx-2,2024-03-01T09:00:00Z,TRANSFER,200,C2,C3,flagged,91.5",
        "tx-3,2024-03-01T10:00:00Z,CASH_OUT,-3,C4,C5,pending,",
        "tx-4,2024-03-01T11:00:00Z,WIRE,1,C6,C7,pending,",
        "tx-5,2024-03-01T07:00:00Z,DEBIT,49.50,C8,C9,pending,",
    ])?;

    let history = CsvHistory::new(file.path());
    let stats = history.fetch_stats().await?;

    assert_eq!(stats, DashboardStats::new(3, 1, Decimal::from(350)));

    Ok(())
}

#[tokio::test]
async fn test_csv_history_returns_most_recent_first() -> Result<()> {
    let file = create_temporary_csv(&[
        "tx-1,2024-03-01T08:00:00Z,PAYMENT,1,C1,M1,processed,",
        "tx-2,2024-03-01T10:00:00Z,CASH_IN,1,C2,C3,processed,",
        "tx-3,2024-03-01T09:00:00Z,DEBIT,1,C4,C5,flagged,70",
    ])?;

    let history = CsvHistory::new(file.path());
    let records = history.fetch_recent_transactions().await?;
    let ids: Vec<_> = records.iter().map(|record| record.id.as_str()).collect();

    assert_eq!(ids, vec!["tx-2", "tx-3", "tx-1"]);
    assert!(records[1].risk_score.is_some());
    assert!(records[0].risk_score.is_none());

    Ok(())
}

#[tokio::test]
async fn test_csv_history_reports_missing_file_as_unavailable() {
    let history = CsvHistory::new("does-not-exist.csv");

    assert!(matches!(history.fetch_stats().await, Err(SourceError::Unavailable(_))));
    assert!(matches!(history.fetch_recent_transactions().await, Err(SourceError::Unavailable(_))));
}

#[tokio::test]
async fn test_static_history_can_fail_each_fetch_independently() -> Result<()> {
    let stats = DashboardStats::new(10, 1, Decimal::from(5));
    let history = StaticHistory::new(stats, Vec::new()).without_transactions();

    assert_eq!(history.fetch_stats().await?, stats);
    assert!(history.fetch_recent_transactions().await.is_err());

    let history = StaticHistory::unavailable();

    assert!(history.fetch_stats().await.is_err());

    Ok(())
}

#[tokio::test]
async fn test_scripted_feed_replays_in_order_then_ends() -> Result<()> {
    let timestamp = Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap();
    let records = ["tx-1", "tx-2"].iter()
        .map(|id| TransactionRecord::new(*id, timestamp, TransactionType::Payment, Decimal::ONE, "C1", "M1", TransactionStatus::Pending));
    let mut feed = ScriptedFeed::new(records);

    assert_eq!(feed.next_transaction().await.ok_or_else(|| anyhow!("feed ended early"))?.id, "tx-1");
    assert_eq!(feed.next_transaction().await.ok_or_else(|| anyhow!("feed ended early"))?.id, "tx-2");
    assert!(feed.next_transaction().await.is_none());

    Ok(())
}

#[tokio::test]
async fn test_simulated_feed_produces_valid_records() -> Result<()> {
    let mut feed = SimulatedFeed::with_seed(7);

    for _ in 0..200 {
        let record = feed.next_transaction().await.ok_or_else(|| anyhow!("simulated feed ended"))?;

        record.validate()?;
        assert!(record.risk_score.is_some());
    }

    Ok(())
}

#[test]
fn test_simulated_feed_is_deterministic_for_a_seed() {
    let timestamp = Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap();
    let mut first = SimulatedFeed::with_seed(42);
    let mut second = SimulatedFeed::with_seed(42);

    for _ in 0..20 {
        assert_eq!(first.generate(timestamp), second.generate(timestamp));
    }
}

#[tokio::test]
async fn test_simulated_backfill_is_most_recent_first_with_matching_stats() -> Result<()> {
    let now = Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap();
    let history = SimulatedFeed::with_seed(3).backfill(60, now);

    let stats = history.fetch_stats().await?;
    let records = history.fetch_recent_transactions().await?;
    let volume: Decimal = records.iter().map(|record| record.amount).sum();

    assert_eq!(records.len(), 60);
    assert_eq!(stats.total_transactions, 60);
    assert_eq!(stats.total_volume, volume);
    assert!(records.windows(2).all(|pair| pair[0].timestamp >= pair[1].timestamp));
    assert!(Decimal::from_str("0")? < volume);

    Ok(())
}

#[tokio::test]
async fn test_csv_history_keeps_amount_precision_and_scale() -> Result<()> {
    let file = create_temporary_csv(&[
        "tx-1,2024-03-01T08:00:00Z,TRANSFER,12345678901234567.89,C1,C2,processed,12.50",
        "tx-2,2024-03-01T09:00:00Z,PAYMENT,0.10,C3,M1,pending,",
    ])?;

    let history = CsvHistory::new(file.path());
    let records = history.fetch_recent_transactions().await?;
    let stats = history.fetch_stats().await?;

    assert_eq!(records[1].amount.to_string(), "12345678901234567.89");
    assert_eq!(records[0].amount.to_string(), "0.10");
    assert_eq!(records[1].risk_score.map(|score| score.to_string()), Some("12.50".to_string()));
    assert_eq!(stats.total_volume, Decimal::from_str("12345678901234567.99")?);

    Ok(())
}
