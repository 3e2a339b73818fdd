use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use clap::Parser;
use jemallocator::Jemalloc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use stats_processor::processor::report::write_report;
use stats_processor::processor::stats_processor::StatsProcessor;

#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

/// Per-key min/mean/max aggregation over a `<key>;<value>` file
#[derive(Parser)]
#[command(version, about)]
struct Args {
    /// Input file of `<key>;<value>` lines
    input: PathBuf,
    /// Report destination; standard output when omitted
    output: Option<PathBuf>,
    /// Number of byte ranges to process in parallel (defaults to core count)
    #[arg(short, long)]
    workers: Option<usize>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();
    let args = Args::parse();

    let processor = match args.workers {
        Some(workers) => StatsProcessor::with_workers(workers),
        None => StatsProcessor::new(),
    };

    let start = Instant::now();
    let stats = processor
        .process_file(&args.input)
        .with_context(|| format!("failed to process {}", args.input.display()))?;
    info!(
        elapsed = ?start.elapsed(),
        keys = stats.entries.len(),
        "pipeline finished"
    );

    // the output file is only created once the whole run has succeeded
    match &args.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            let mut out = BufWriter::new(file);
            write_report(&stats, &mut out)?;
            out.flush()?;
        }
        None => {
            let stdout = io::stdout();
            let mut out = BufWriter::new(stdout.lock());
            write_report(&stats, &mut out)?;
            out.flush()?;
        }
    }

    Ok(())
}
