use std::io::{self, Write};

use crate::processor::StatsReport;

/// Rounds toward positive infinity to one decimal place.
///
/// Non-exact values always move upward regardless of sign; exact
/// one-decimal values are left unchanged.
///
/// ```
/// # use stats_processor::processor::report::round_up;
/// assert_eq!(round_up(2.449), 2.5);
/// assert_eq!(round_up(-2.45), -2.4);
/// assert_eq!(round_up(2.0), 2.0);
/// ```
pub fn round_up(x: f64) -> f64 {
    (x * 10.0).ceil() / 10.0
}

/// Writes the final report: one `key=min/mean/max` line per key.
///
/// Keys are already sorted ascending by raw bytes in [`StatsReport`]; each
/// number is rounded up and rendered fixed-point with exactly one
/// fractional digit. The mean is computed before rounding.
pub fn write_report<W: Write>(report: &StatsReport, mut out: W) -> io::Result<()> {
    for (key, stats) in &report.entries {
        if stats.count == 0 {
            continue;
        }
        out.write_all(key)?;
        writeln!(
            out,
            "={:.1}/{:.1}/{:.1}",
            round_up(stats.min),
            round_up(stats.mean()),
            round_up(stats.max)
        )?;
    }
    Ok(())
}
