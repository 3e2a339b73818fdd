use std::env;
use std::path::PathBuf;

use stats_processor::processor::stats_processor::StatsProcessor;

#[global_allocator]
static ALLOC: dhat::Alloc = dhat::Alloc;

fn main() {
    let _profiler = dhat::Profiler::new_heap();

    let path: PathBuf = env::args()
        .nth(1)
        .unwrap_or_else(|| "data/measurements.txt".to_string())
        .into();
    let stats = StatsProcessor::new().process_file(&path).unwrap();

    println!(
        "Memory benchmark finished: {} keys. See dhat-heap.json for details",
        stats.entries.len()
    );
}
