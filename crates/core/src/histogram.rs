//! Byte frequency analysis.
//!
//! A [`Histogram`] records how often each of the 256 possible byte values
//! occurs in a source. It is built in a single pass and feeds the code
//! builder; the alphabet is fixed at bytes, so storage is a flat array
//! of 256 counters regardless of source size.
//!
//! # Ordering
//!
//! Code assignment depends on symbol order, so [`Histogram::sorted_entries`]
//! defines the one deterministic order used everywhere order matters:
//! descending count, ties broken by ascending symbol value.

use crate::error::Result;
use std::io::Read;

/// Exact occurrence counts for every byte value observed in a source.
#[derive(Debug, Clone)]
pub struct Histogram {
    counts: [u64; 256],
}

impl Histogram {
    /// Create an empty histogram (no bytes observed).
    pub fn new() -> Self {
        Self { counts: [0; 256] }
    }

    /// Build a histogram from an in-memory byte slice.
    pub fn from_bytes(data: &[u8]) -> Self {
        let mut histogram = Self::new();
        for &byte in data {
            histogram.record(byte);
        }
        histogram
    }

    /// Build a histogram by scanning a byte source once.
    ///
    /// An empty source yields an empty histogram.
    ///
    /// # Errors
    /// Propagates read errors from the source as `Error::Io`.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self> {
        let mut histogram = Self::new();
        let mut buf = [0u8; 8192];
        loop {
            let n = reader.read(&mut buf)?;
            if n == 0 {
                break;
            }
            for &byte in &buf[..n] {
                histogram.record(byte);
            }
        }
        Ok(histogram)
    }

    /// Record one occurrence of a byte value.
    pub fn record(&mut self, symbol: u8) {
        self.counts[symbol as usize] += 1;
    }

    /// Occurrence count for a byte value (0 if never observed).
    pub fn count(&self, symbol: u8) -> u64 {
        self.counts[symbol as usize]
    }

    /// Total number of bytes observed.
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Number of distinct byte values observed (0-256).
    pub fn distinct_symbols(&self) -> usize {
        self.counts.iter().filter(|&&c| c > 0).count()
    }

    /// True if no bytes were observed.
    pub fn is_empty(&self) -> bool {
        self.counts.iter().all(|&c| c == 0)
    }

    /// Observed symbols in the canonical construction order:
    /// descending count, ties broken by ascending symbol value.
    pub fn sorted_entries(&self) -> Vec<(u8, u64)> {
        let mut entries: Vec<(u8, u64)> = self
            .counts
            .iter()
            .enumerate()
            .filter(|(_, &count)| count > 0)
            .map(|(symbol, &count)| (symbol as u8, count))
            .collect();

        entries.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
        entries
    }
}

impl Default for Histogram {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_source() {
        let histogram = Histogram::from_bytes(b"");
        assert!(histogram.is_empty());
        assert_eq!(histogram.total(), 0);
        assert_eq!(histogram.distinct_symbols(), 0);
        assert!(histogram.sorted_entries().is_empty());
    }

    #[test]
    fn test_exact_counts() {
        let histogram = Histogram::from_bytes(b"abracadabra");
        assert_eq!(histogram.count(b'a'), 5);
        assert_eq!(histogram.count(b'b'), 2);
        assert_eq!(histogram.count(b'r'), 2);
        assert_eq!(histogram.count(b'c'), 1);
        assert_eq!(histogram.count(b'd'), 1);
        assert_eq!(histogram.count(b'z'), 0);
        assert_eq!(histogram.total(), 11);
        assert_eq!(histogram.distinct_symbols(), 5);
    }

    #[test]
    fn test_sorted_entries_order() {
        // b and r tie at 2, c and d tie at 1: ties break by symbol value
        let histogram = Histogram::from_bytes(b"abracadabra");
        let entries = histogram.sorted_entries();
        assert_eq!(
            entries,
            vec![(b'a', 5), (b'b', 2), (b'r', 2), (b'c', 1), (b'd', 1)]
        );
    }

    #[test]
    fn test_from_reader_matches_from_bytes() {
        let data: Vec<u8> = (0..4096u32).map(|i| (i % 251) as u8).collect();
        let from_reader = Histogram::from_reader(&data[..]).unwrap();
        let from_bytes = Histogram::from_bytes(&data);
        for symbol in 0..=255u8 {
            assert_eq!(from_reader.count(symbol), from_bytes.count(symbol));
        }
    }

    #[test]
    fn test_read_error_propagates() {
        struct FailingReader;
        impl Read for FailingReader {
            fn read(&mut self, _buf: &mut [u8]) -> std::io::Result<usize> {
                Err(std::io::Error::new(std::io::ErrorKind::Other, "boom"))
            }
        }

        let result = Histogram::from_reader(FailingReader);
        assert!(matches!(result, Err(crate::error::Error::Io(_))));
    }

    #[test]
    fn test_all_byte_values() {
        let data: Vec<u8> = (0..=255).collect();
        let histogram = Histogram::from_bytes(&data);
        assert_eq!(histogram.distinct_symbols(), 256);
        // Uniform counts: order falls back to ascending symbol value
        let entries = histogram.sorted_entries();
        for (i, &(symbol, count)) in entries.iter().enumerate() {
            assert_eq!(symbol as usize, i);
            assert_eq!(count, 1);
        }
    }
}
