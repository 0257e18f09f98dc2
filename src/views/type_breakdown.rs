use serde::Serialize;

use crate::models::TransactionType;
use crate::storage::Snapshot;
use crate::views::percentage;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeShare {
    pub label: String,
    pub value: u64,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    /// Percentage of the window, one decimal place.
    pub share: String
}

/// Counts the window per transaction type. All known types are listed, in
/// presentation order, even when absent from the window.
pub fn type_breakdown(snapshot: &Snapshot) -> Vec<TypeShare> {
    let total = snapshot.len() as u64;

    TransactionType::ALL.iter()
        .map(|transaction_type| {
            let value = snapshot.records()
                .filter(|record| record.transaction_type == *transaction_type)
                .count() as u64;

            TypeShare {
                label: transaction_type.label().to_string(),
                value,
                transaction_type: *transaction_type,
                share: percentage(value, total, 1)
            }
        })
        .collect()
}
