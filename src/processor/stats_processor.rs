use ahash::AHashMap;
use memchr::{memchr, memchr_iter};
use memmap2::Mmap;
use rayon::prelude::*;
use std::fs::File;
use std::path::Path;
use tracing::{debug, info};

use crate::processor::record::{parse_record, KeyStats};
use crate::processor::{ProcessorError, StatsReport};

/// Parallel aggregation pipeline for `<key>;<value>` files
///
/// Memory-maps the input, splits it into byte ranges aligned to line starts,
/// folds each range into a local map on the Rayon pool, then merges the
/// partial maps after the join. Workers share nothing mutable, so the hot
/// loop takes no locks.
///
/// # Examples
///
/// ```no_run
/// # use stats_processor::processor::stats_processor::StatsProcessor;
/// let processor = StatsProcessor::new();
/// let stats = processor.process_file("measurements.txt".as_ref()).unwrap();
/// println!("{} distinct keys", stats.entries.len());
/// ```
#[derive(Debug, Clone)]
pub struct StatsProcessor {
    workers: usize,
}

impl StatsProcessor {
    /// One byte range per thread of the current Rayon pool
    pub fn new() -> Self {
        Self::with_workers(rayon::current_num_threads())
    }

    /// Fixed number of byte ranges, clamped to at least one.
    ///
    /// Execution parallelism still comes from the Rayon pool in scope; pin a
    /// pool with `ThreadPoolBuilder` + `install` to control it exactly.
    pub fn with_workers(workers: usize) -> Self {
        StatsProcessor {
            workers: workers.max(1),
        }
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Runs the full pipeline over a file.
    ///
    /// # Errors
    /// Returns [`ProcessorError::Io`] if the file cannot be opened or
    /// mapped. Malformed records are not errors; they are dropped and
    /// counted in the returned [`StatsReport`].
    pub fn process_file(&self, path: &Path) -> Result<StatsReport, ProcessorError> {
        let file = File::open(path)?;
        if file.metadata()?.len() == 0 {
            // mapping a zero-length file fails on some platforms; an empty
            // input is a legitimate (empty) result, not an error
            return Ok(StatsReport::default());
        }
        let mmap = unsafe { Mmap::map(&file)? };
        Ok(self.process_bytes(&mmap))
    }

    /// Runs the pipeline over an in-memory buffer.
    pub fn process_bytes(&self, data: &[u8]) -> StatsReport {
        let ranges = split_ranges(data, self.workers);
        debug!(
            bytes = data.len(),
            ranges = ranges.len(),
            "split input at line boundaries"
        );

        let partials: Vec<ChunkStats<'_>> = ranges
            .par_iter()
            .map(|&(start, end)| fold_chunk(&data[start..end]))
            .collect();

        let (merged, rows_processed, rows_skipped) = merge_partials(partials);

        let mut entries: Vec<(Vec<u8>, KeyStats)> = merged
            .into_iter()
            .map(|(key, stats)| (key.to_vec(), stats))
            .collect();
        entries.sort_unstable_by(|a, b| a.0.cmp(&b.0));

        info!(
            rows_processed,
            rows_skipped,
            keys = entries.len(),
            "aggregation complete"
        );

        StatsReport {
            entries,
            rows_processed,
            rows_skipped,
        }
    }
}

impl Default for StatsProcessor {
    fn default() -> Self {
        Self::new()
    }
}

/// Per-range aggregation state produced by one worker.
///
/// Keys borrow from the mapped input; nothing is copied until the final
/// merge freezes the surviving keys.
#[derive(Debug, Default)]
struct ChunkStats<'a> {
    stats: AHashMap<&'a [u8], KeyStats>,
    rows: u64,
    skipped: u64,
}

impl<'a> ChunkStats<'a> {
    fn consume_line(&mut self, line: &'a [u8]) {
        if line.is_empty() {
            return;
        }
        match parse_record(line) {
            Some((key, value)) => {
                self.rows += 1;
                self.stats
                    .entry(key)
                    .and_modify(|stats| stats.record(value))
                    .or_insert_with(|| KeyStats::from_value(value));
            }
            None => self.skipped += 1,
        }
    }
}

/// Splits `data` into exactly `workers` half-open byte ranges that cover
/// `[0, len)` once.
///
/// Candidate boundaries sit at `i * (len / workers)` and advance forward
/// (never backward) to just past the next newline, so no range begins
/// mid-line. The first range starts at 0, the last ends at `len`; trailing
/// ranges may be empty when there are fewer lines than workers. Empty input
/// yields a single empty range.
fn split_ranges(data: &[u8], workers: usize) -> Vec<(usize, usize)> {
    let len = data.len();
    if len == 0 {
        return vec![(0, 0)];
    }

    let target = len / workers;
    let mut ranges = Vec::with_capacity(workers);
    let mut start = 0;

    for i in 1..workers {
        let candidate = i * target;
        let end = match memchr(b'\n', &data[candidate..]) {
            Some(pos) => candidate + pos + 1,
            None => len,
        };
        ranges.push((start, end));
        start = end;
    }
    ranges.push((start, len));

    ranges
}

/// Aggregates every line of one byte range into a local map.
///
/// Tolerates a range with zero lines and a final line without terminator.
/// Interior empty lines are split artifacts and are ignored.
fn fold_chunk(chunk: &[u8]) -> ChunkStats<'_> {
    let mut out = ChunkStats::default();
    let mut start = 0;

    for newline_pos in memchr_iter(b'\n', chunk) {
        out.consume_line(&chunk[start..newline_pos]);
        start = newline_pos + 1;
    }
    if start < chunk.len() {
        out.consume_line(&chunk[start..]);
    }

    out
}

/// Folds the workers' partial mappings into one.
///
/// The fold is associative and commutative, so the result does not depend
/// on the order in which partials arrive.
fn merge_partials<'a>(
    partials: Vec<ChunkStats<'a>>,
) -> (AHashMap<&'a [u8], KeyStats>, u64, u64) {
    let mut merged: AHashMap<&'a [u8], KeyStats> = AHashMap::new();
    let mut rows = 0;
    let mut skipped = 0;

    for partial in partials {
        rows += partial.rows;
        skipped += partial.skipped;
        for (key, stats) in partial.stats {
            merged
                .entry(key)
                .and_modify(|merged_stats| merged_stats.merge(&stats))
                .or_insert(stats);
        }
    }

    (merged, rows, skipped)
}
