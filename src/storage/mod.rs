mod aggregation_store;
mod errors;
mod snapshot;
#[cfg(test)]
mod tests;

pub use aggregation_store::AggregationStore;
pub use errors::StoreError;
pub use snapshot::Snapshot;

/// Number of records the window retains unless configured otherwise.
pub const DEFAULT_CAPACITY: usize = 50;
