//! Shannon-Fano-Elias code construction.
//!
//! Builds a prefix-free code table from a histogram using cumulative
//! probabilities:
//!
//! 1. Sort symbols by descending count (ties by ascending symbol value).
//! 2. For each symbol, p_i = count_i / total and c_i = sum of p_j for j < i.
//! 3. Code length L_i = ceil(-log2(p_i)), floored to a minimum of 1 bit.
//! 4. The L_i code bits come from repeatedly doubling c_i: if the running
//!    value reaches 1, emit a 1 bit and subtract 1, otherwise emit a 0 bit.
//!
//! Because c_{i+1} - c_i = p_i >= 2^-L_i under the descending sort, the
//! truncated cumulative values all differ within their code lengths, which
//! makes the resulting code set prefix-free by construction. Decode still
//! treats a non-matching exhausted stream as an error rather than trusting
//! this.
//!
//! A single-symbol alphabet cannot be entropy-coded below 1 bit, so it is
//! special-cased to the one-bit code `0`.

use crate::error::{CodeError, Result};
use crate::histogram::Histogram;
use crate::table::CodeTable;
use tracing::warn;

/// A variable-length bit string assigned to one symbol, MSB-first.
///
/// # Invariants
/// - `1 <= len <= 64`
/// - bits above the low `len` positions are zero
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CodeWord {
    bits: u64,
    len: u16,
}

impl CodeWord {
    /// Maximum representable code length in bits.
    pub const MAX_LEN: u16 = 64;

    /// Create a codeword from the low `len` bits of `bits`.
    ///
    /// Higher bits are masked off. `len` must be in 1..=64.
    pub fn new(bits: u64, len: u16) -> Self {
        debug_assert!(len >= 1 && len <= Self::MAX_LEN);
        let mask = if len == 64 { u64::MAX } else { (1u64 << len) - 1 };
        Self {
            bits: bits & mask,
            len,
        }
    }

    /// The code bits, right-aligned in the low `len` positions.
    pub fn bits(&self) -> u64 {
        self.bits
    }

    /// Code length in bits (always >= 1).
    pub fn len(&self) -> u16 {
        self.len
    }

    /// Bit at position `i`, counting MSB-first from 0.
    pub fn bit(&self, i: u16) -> bool {
        debug_assert!(i < self.len);
        (self.bits >> (self.len - 1 - i)) & 1 == 1
    }

    /// True if `self` is a proper prefix of `other`.
    pub fn is_prefix_of(&self, other: &CodeWord) -> bool {
        self.len < other.len && (other.bits >> (other.len - self.len)) == self.bits
    }
}

impl std::fmt::Display for CodeWord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for i in 0..self.len {
            f.write_str(if self.bit(i) { "1" } else { "0" })?;
        }
        Ok(())
    }
}

/// Build a prefix-free code table from a histogram.
///
/// An empty histogram yields an empty table (the empty-file case).
/// Exactly one distinct symbol yields the single-bit code `0`.
///
/// A symbol whose probability computes to <= 0 is skipped with a warning;
/// that cannot happen for a real histogram whose counts are all >= 1 and
/// is handled defensively rather than assigned a code.
///
/// # Errors
/// `CodeError::CodeTooLong` if a computed length exceeds 64 bits (cannot
/// occur for u64 counts; defensive bound of the codeword representation).
pub fn build_code_table(histogram: &Histogram) -> Result<CodeTable> {
    let entries = histogram.sorted_entries();
    let mut table = CodeTable::new();

    if entries.is_empty() {
        return Ok(table);
    }

    if entries.len() == 1 {
        table.insert(entries[0].0, CodeWord::new(0, 1));
        return Ok(table);
    }

    let total = histogram.total();
    if total == 0 {
        // Unreachable for a non-empty histogram; return an empty table
        // rather than dividing by zero.
        return Ok(table);
    }
    let total = total as f64;

    let mut cumulative = 0.0f64;
    for &(symbol, count) in &entries {
        let probability = count as f64 / total;
        if probability <= 0.0 {
            warn!("skipping symbol {symbol:#04x} with non-positive probability");
            continue;
        }

        let length = (-probability.log2()).ceil().max(1.0);
        if length > CodeWord::MAX_LEN as f64 {
            return Err(CodeError::CodeTooLong {
                length: length as u32,
            }
            .into());
        }
        let length = length as u16;

        // Shannon-Fano-Elias bit generation: the code is the first
        // `length` bits of the binary expansion of the cumulative
        // probability, produced by repeated doubling.
        let mut bits = 0u64;
        let mut value = cumulative;
        for _ in 0..length {
            value *= 2.0;
            if value >= 1.0 {
                bits = (bits << 1) | 1;
                value -= 1.0;
            } else {
                bits <<= 1;
            }
        }

        table.insert(symbol, CodeWord::new(bits, length));
        cumulative += probability;
    }

    Ok(table)
}
