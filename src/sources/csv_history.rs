use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use csv::{ReaderBuilder, Trim};
use tokio::task::spawn_blocking;
use tracing::{debug, warn};

use crate::models::{DashboardStats, TransactionRecord};
use crate::sources::{HistoricalSource, SourceError};

/// Historical source backed by a CSV export of the transaction API.
///
/// Expected header: `id,timestamp,type,amount,nameOrig,nameDest,status,riskScore`.
/// Stats are aggregated over every valid row in the file; malformed rows are
/// logged and skipped.
pub struct CsvHistory {
    path: PathBuf
}

impl CsvHistory {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf()
        }
    }

    async fn load(&self) -> Result<Vec<TransactionRecord>, SourceError> {
        let path = self.path.clone();

        spawn_blocking(move || read_records(&path)).await?
    }
}

fn read_records(path: &Path) -> Result<Vec<TransactionRecord>, SourceError> {
    let file = File::open(path)?;

    let mut reader = ReaderBuilder::new()
        .trim(Trim::All)
        .flexible(true)
        .from_reader(BufReader::new(file));

    let mut records = Vec::new();

    for result in reader.deserialize::<TransactionRecord>() {
        match result {
            Ok(record) => match record.validate() {
                Ok(_) => records.push(record),
                Err(error) => warn!("Skipping CSV record: {error}")
            },
            Err(error) => {
                warn!("CSV deserialization error: {error}");
            }
        }
    }

    debug!("Loaded {} records from {}", records.len(), path.display());

    Ok(records)
}

#[async_trait]
impl HistoricalSource for CsvHistory {
    async fn fetch_stats(&self) -> Result<DashboardStats, SourceError> {
        let records = self.load().await?;
        let mut stats = DashboardStats::default();

        for record in &records {
            stats = stats.advanced_by(record)
                .map_err(|error| SourceError::Unavailable(error.to_string()))?;
        }

        Ok(stats)
    }

    async fn fetch_recent_transactions(&self) -> Result<Vec<TransactionRecord>, SourceError> {
        let mut records = self.load().await?;
        records.sort_by(|left, right| right.timestamp.cmp(&left.timestamp));

        Ok(records)
    }
}
