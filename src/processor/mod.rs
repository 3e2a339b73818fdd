use thiserror::Error;

pub mod record;
pub mod report;
pub mod stats_processor;

use crate::processor::record::KeyStats;

/// Error type used across the crate
#[derive(Debug, Error)]
pub enum ProcessorError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Outcome of one pipeline run.
///
/// Malformed lines never surface individually; only their aggregate count
/// does. A key appears in `entries` only if at least one valid record
/// carried it, so `count > 0` and `min <= max` hold for every entry.
#[derive(Debug, Default)]
pub struct StatsReport {
    /// `(key, statistics)` pairs, ascending by raw key bytes
    pub entries: Vec<(Vec<u8>, KeyStats)>,
    /// Valid records folded into the statistics
    pub rows_processed: u64,
    /// Non-empty lines dropped as malformed
    pub rows_skipped: u64,
}
