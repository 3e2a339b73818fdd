use std::io::Write;
use std::path::Path;

use stats_processor::processor::report::write_report;
use stats_processor::processor::stats_processor::StatsProcessor;
use tempfile::NamedTempFile;

fn write_input(input: &str) -> NamedTempFile {
    let mut tmp = NamedTempFile::new().unwrap();
    write!(tmp, "{}", input).unwrap();
    tmp
}

fn run_pipeline(input: &str, workers: usize) -> String {
    let tmp = write_input(input);
    let stats = StatsProcessor::with_workers(workers)
        .process_file(tmp.path())
        .unwrap();

    let mut out = Vec::new();
    write_report(&stats, &mut out).unwrap();
    String::from_utf8(out).unwrap()
}

#[test]
fn test_end_to_end_with_malformed_lines() {
    let input = "Tokyo;10.0\nTokyo;20.0\nParis;5.5\nbadline\nParis;x\n";
    assert_eq!(
        run_pipeline(input, 4),
        "Paris=5.5/5.5/5.5\nTokyo=10.0/15.0/20.0\n"
    );
}

#[test]
fn test_malformed_lines_only_counted() {
    let tmp = write_input("Tokyo;10.0\nTokyo;20.0\nParis;5.5\nbadline\nParis;x\n");
    let stats = StatsProcessor::with_workers(2)
        .process_file(tmp.path())
        .unwrap();
    assert_eq!(stats.rows_processed, 3);
    assert_eq!(stats.rows_skipped, 2);
}

#[test]
fn test_keys_sorted_by_bytes() {
    let output = run_pipeline("Paris;1.0\nAmsterdam;2.0\nZurich;3.0\n", 2);
    let keys: Vec<&str> = output
        .lines()
        .map(|line| line.split('=').next().unwrap())
        .collect();
    assert_eq!(keys, vec!["Amsterdam", "Paris", "Zurich"]);
}

#[test]
fn test_min_mean_max_ordering() {
    let tmp = write_input("a;3.5\na;-1.25\na;7.75\nb;2.0\n");
    let stats = StatsProcessor::with_workers(3)
        .process_file(tmp.path())
        .unwrap();
    for (_, key_stats) in &stats.entries {
        let mean = key_stats.mean();
        assert!(key_stats.min <= mean && mean <= key_stats.max);
    }
}

#[test]
fn test_empty_input_produces_empty_report() {
    assert_eq!(run_pipeline("", 4), "");
}

#[test]
fn test_all_malformed_produces_empty_report() {
    assert_eq!(run_pipeline("no delimiter\n;\nkey;not-a-number\n", 3), "");
}

#[test]
fn test_missing_trailing_newline() {
    assert_eq!(
        run_pipeline("a;1.0\nb;2.0", 4),
        "a=1.0/1.0/1.0\nb=2.0/2.0/2.0\n"
    );
}

#[test]
fn test_worker_counts_agree() {
    // integer-valued measurements keep f64 sums exact, so the report must
    // be byte-identical for every worker count
    let mut input = String::new();
    for i in 0..1000 {
        input.push_str(&format!("key-{};{}\n", i % 7, i % 101));
    }

    let reference = run_pipeline(&input, 1);
    for workers in [2, 3, 5, 8, 16, 64] {
        assert_eq!(run_pipeline(&input, workers), reference);
    }
}

#[test]
fn test_idempotent_over_same_file() {
    let tmp = write_input("Oslo;4.2\nOslo;-3.0\nRome;11.9\n");
    let first = {
        let stats = StatsProcessor::new().process_file(tmp.path()).unwrap();
        let mut out = Vec::new();
        write_report(&stats, &mut out).unwrap();
        out
    };
    let second = {
        let stats = StatsProcessor::new().process_file(tmp.path()).unwrap();
        let mut out = Vec::new();
        write_report(&stats, &mut out).unwrap();
        out
    };
    assert_eq!(first, second);
}

#[test]
fn test_missing_input_is_fatal() {
    let result = StatsProcessor::new().process_file(Path::new("/definitely/not/here.txt"));
    assert!(result.is_err());
}
