//! # stats-processor
//!
//! `stats-processor` is a high-performance, memory-efficient aggregator for
//! large `<key>;<value>` text files written in Rust. It supports:
//!
//! - Memory-mapped input (zero-copy for multi-gigabyte files)
//! - Byte-accurate file splitting at line boundaries
//! - Parallel per-range aggregation with Rayon (no shared state, no locks)
//! - Associative, commutative merging of per-worker partial results
//! - Deterministic report formatting (byte-sorted keys, round-up to one
//!   decimal place)
//!
//! Malformed lines (missing delimiter, unparseable value) are dropped
//! silently and only counted; I/O failures abort the run before any output
//! is produced.
//!
//! # Example
//!
//! ```no_run
//! use stats_processor::processor::{report, stats_processor::StatsProcessor};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let processor = StatsProcessor::new();
//!
//!     // Aggregate the whole file: per-key min / mean / max
//!     let stats = processor.process_file("measurements.txt".as_ref())?;
//!
//!     // Render the sorted `key=min/mean/max` report
//!     report::write_report(&stats, std::io::stdout().lock())?;
//!
//!     Ok(())
//! }
//! ```

pub mod processor;
