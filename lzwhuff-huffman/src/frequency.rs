//! Byte frequency counting.

/// Number of distinct byte symbols.
pub const ALPHABET_SIZE: usize = 256;

/// Occurrence counts for every byte value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: [u64; ALPHABET_SIZE],
}

impl FrequencyTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self {
            counts: [0; ALPHABET_SIZE],
        }
    }

    /// Count every byte of `data`.
    pub fn from_bytes(data: &[u8]) -> Self {
        let mut table = Self::new();
        for &byte in data {
            table.add(byte);
        }
        table
    }

    /// Add one occurrence of `symbol`.
    #[inline]
    pub fn add(&mut self, symbol: u8) {
        self.counts[symbol as usize] += 1;
    }

    /// Add `count` occurrences of `symbol`, saturating at `u64::MAX`.
    pub fn add_count(&mut self, symbol: u8, count: u64) {
        let slot = &mut self.counts[symbol as usize];
        *slot = slot.saturating_add(count);
    }

    /// Occurrences of `symbol`.
    pub fn count(&self, symbol: u8) -> u64 {
        self.counts[symbol as usize]
    }

    /// Number of symbols with a nonzero count.
    pub fn distinct(&self) -> usize {
        self.counts.iter().filter(|&&c| c > 0).count()
    }

    /// Sum of all counts, or `None` if it does not fit in a `u64`.
    pub fn total(&self) -> Option<u64> {
        self.counts
            .iter()
            .try_fold(0u64, |sum, &count| sum.checked_add(count))
    }

    /// True if no symbol has been counted.
    pub fn is_empty(&self) -> bool {
        self.counts.iter().all(|&c| c == 0)
    }

    /// Nonzero entries in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, u64)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .filter(|&(_, &c)| c > 0)
            .map(|(symbol, &c)| (symbol as u8, c))
    }
}

impl Default for FrequencyTable {
    fn default() -> Self {
        Self::new()
    }
}

impl FromIterator<(u8, u64)> for FrequencyTable {
    fn from_iter<I: IntoIterator<Item = (u8, u64)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (symbol, count) in iter {
            table.add_count(symbol, count);
        }
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_bytes() {
        let table = FrequencyTable::from_bytes(b"AAAAABBCD");
        assert_eq!(table.count(b'A'), 5);
        assert_eq!(table.count(b'B'), 2);
        assert_eq!(table.count(b'C'), 1);
        assert_eq!(table.count(b'Z'), 0);
        assert_eq!(table.distinct(), 4);
        assert_eq!(table.total(), Some(9));
    }

    #[test]
    fn test_iter_ascending_nonzero() {
        let table = FrequencyTable::from_bytes(b"zyxzz\x00");
        let entries: Vec<_> = table.iter().collect();
        assert_eq!(entries, vec![(0, 1), (b'x', 1), (b'y', 1), (b'z', 3)]);
    }

    #[test]
    fn test_empty() {
        let table = FrequencyTable::default();
        assert!(table.is_empty());
        assert_eq!(table.distinct(), 0);
        assert_eq!(table.iter().count(), 0);
    }

    #[test]
    fn test_collect() {
        let table: FrequencyTable = [(1u8, 10u64), (200, 3), (1, 2)].into_iter().collect();
        assert_eq!(table.count(1), 12);
        assert_eq!(table.count(200), 3);
        assert_eq!(table.total(), Some(15));
    }

    #[test]
    fn test_total_overflow() {
        let table: FrequencyTable = [(1u8, 1u64 << 63), (2, 1 << 63)].into_iter().collect();
        assert_eq!(table.total(), None);

        let mut saturated = FrequencyTable::new();
        saturated.add_count(7, u64::MAX);
        saturated.add_count(7, 5);
        assert_eq!(saturated.count(7), u64::MAX);
    }
}
