use rand::Rng;
use std::env;
use std::fs::File;
use std::io::{BufWriter, Write};

const KEYS: &[&str] = &[
    "Amsterdam",
    "Athens",
    "Berlin",
    "Bucharest",
    "Copenhagen",
    "Dublin",
    "Helsinki",
    "Lisbon",
    "London",
    "Madrid",
    "Oslo",
    "Paris",
    "Prague",
    "Reykjavik",
    "Rome",
    "Sofia",
    "Stockholm",
    "Tokyo",
    "Vienna",
    "Zurich",
];

fn main() {
    let mut args = env::args().skip(1);
    let path = args
        .next()
        .unwrap_or_else(|| "data/measurements.txt".to_string());
    let rows: u64 = args
        .next()
        .map(|n| n.parse().expect("row count must be an integer"))
        .unwrap_or(10_000_000);

    let file = File::create(&path).unwrap();
    let mut writer = BufWriter::new(file);

    let mut rng = rand::rng();
    for _ in 0..rows {
        let key = KEYS[rng.random_range(0..KEYS.len())];
        let value = rng.random_range(-999..=999) as f64 / 10.0;
        writeln!(writer, "{};{:.1}", key, value).unwrap();
    }

    println!("Sample data generated: {} ({} rows)", path, rows);
}
