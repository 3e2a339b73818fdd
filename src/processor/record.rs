use memchr::memchr;

/// Field delimiter between the key and the value
pub const DELIMITER: u8 = b';';

/// Splits one line (terminator already stripped) into a `(key, value)` record.
///
/// The key is the raw byte substring before the first delimiter, used
/// verbatim with no trimming. The value must parse as a finite decimal
/// number (sign, fractional part, and exponent accepted). Lines without a
/// delimiter or with an unparseable value return `None`; malformed input is
/// expected noise, never an error.
pub fn parse_record(line: &[u8]) -> Option<(&[u8], f64)> {
    let sep = memchr(DELIMITER, line)?;
    let value: f64 = fast_float::parse(&line[sep + 1..]).ok()?;
    if !value.is_finite() {
        return None;
    }
    Some((&line[..sep], value))
}

/// Running statistics for one key
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeyStats {
    pub min: f64,
    pub max: f64,
    pub sum: f64,
    pub count: u64,
}

impl KeyStats {
    /// Statistics seeded from the first observation of a key
    pub fn from_value(value: f64) -> Self {
        KeyStats {
            min: value,
            max: value,
            sum: value,
            count: 1,
        }
    }

    /// Folds one more observation into the statistics.
    pub fn record(&mut self, value: f64) {
        self.min = self.min.min(value);
        self.max = self.max.max(value);
        self.sum += value;
        self.count += 1;
    }

    /// Combines statistics gathered over disjoint sets of records.
    ///
    /// Associative and commutative, so partial results may be folded in any
    /// order.
    pub fn merge(&mut self, other: &KeyStats) {
        self.min = self.min.min(other.min);
        self.max = self.max.max(other.max);
        self.sum += other.sum;
        self.count += other.count;
    }

    /// Arithmetic mean, derived on demand and never stored.
    pub fn mean(&self) -> f64 {
        self.sum / self.count as f64
    }
}
