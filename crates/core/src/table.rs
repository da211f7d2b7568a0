//! Code tables and the table artifact format.
//!
//! A [`CodeTable`] maps each observed symbol to its codeword; the decoder
//! builds an independent [`ReverseTable`] (code -> symbol) from it. The
//! two are never shared between operations.
//!
//! # Table Artifact Format
//!
//! ```text
//! +--------------------+
//! | entry_count (2)    |  u16 little-endian
//! +--------------------+
//! | linking_id (8)     |  u64 little-endian
//! +--------------------+
//! | per entry:         |
//! |   symbol (1)       |  u8
//! |   code_length (2)  |  u16 little-endian
//! |   code bits (var)  |  code_length bytes, one b'0'/b'1' byte per bit
//! +--------------------+
//! ```
//!
//! Code bits are stored unpacked, one byte per bit. That trades space for
//! simplicity and is part of the format; packing them would be a format
//! version bump, not a drop-in change.
//!
//! Entries are serialized in ascending symbol order so the artifact is
//! reproducible regardless of how the table was populated.

use crate::code::CodeWord;
use crate::error::{FormatError, Result};
use std::collections::HashMap;

/// Size of the table artifact prefix: entry_count (2) + linking_id (8)
pub const TABLE_PREFIX_SIZE: usize = 10;

/// Forward mapping from symbol to codeword, one entry per observed symbol.
#[derive(Debug, Clone)]
pub struct CodeTable {
    codes: [Option<CodeWord>; 256],
}

impl CodeTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self { codes: [None; 256] }
    }

    /// Assign a codeword to a symbol, replacing any previous assignment.
    pub fn insert(&mut self, symbol: u8, code: CodeWord) {
        self.codes[symbol as usize] = Some(code);
    }

    /// Codeword for a symbol, if the symbol is in the table.
    pub fn get(&self, symbol: u8) -> Option<CodeWord> {
        self.codes[symbol as usize]
    }

    /// Number of symbols with an assigned codeword.
    pub fn len(&self) -> usize {
        self.codes.iter().filter(|c| c.is_some()).count()
    }

    /// True if no symbol has a codeword.
    pub fn is_empty(&self) -> bool {
        self.codes.iter().all(|c| c.is_none())
    }

    /// Entries in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, CodeWord)> + '_ {
        self.codes
            .iter()
            .enumerate()
            .filter_map(|(symbol, code)| code.map(|c| (symbol as u8, c)))
    }

    /// Serialize the table artifact, binding it to `linking_id`.
    pub fn serialize(&self, linking_id: u64) -> Vec<u8> {
        let body_len: usize = self.iter().map(|(_, code)| 3 + code.len() as usize).sum();
        let mut bytes = Vec::with_capacity(TABLE_PREFIX_SIZE + body_len);

        bytes.extend_from_slice(&(self.len() as u16).to_le_bytes());
        bytes.extend_from_slice(&linking_id.to_le_bytes());

        for (symbol, code) in self.iter() {
            bytes.push(symbol);
            bytes.extend_from_slice(&code.len().to_le_bytes());
            for i in 0..code.len() {
                bytes.push(if code.bit(i) { b'1' } else { b'0' });
            }
        }

        bytes
    }

    /// Parse a table artifact, returning the table and its stored
    /// linking id for the caller to verify against the container header.
    ///
    /// # Errors
    /// - `FormatError::TooShort` if the prefix doesn't fit
    /// - `FormatError::TableTruncated` if the declared entry count
    ///   outruns the byte stream
    /// - `FormatError::TrailingBytes` if bytes remain after the last entry
    /// - `FormatError::EmptyCode` / `CodeTooLong` / `InvalidCodeBit` /
    ///   `DuplicateSymbol` for malformed entries
    pub fn deserialize(bytes: &[u8]) -> Result<(Self, u64)> {
        if bytes.len() < TABLE_PREFIX_SIZE {
            return Err(FormatError::TooShort {
                required: TABLE_PREFIX_SIZE,
                actual: bytes.len(),
            }
            .into());
        }

        let entry_count = u16::from_le_bytes(bytes[0..2].try_into().unwrap()) as usize;
        let linking_id = u64::from_le_bytes(bytes[2..10].try_into().unwrap());

        let mut table = Self::new();
        let mut pos = TABLE_PREFIX_SIZE;

        for parsed in 0..entry_count {
            let truncated = FormatError::TableTruncated {
                declared: entry_count,
                parsed,
            };
            if bytes.len() < pos + 3 {
                return Err(truncated.into());
            }

            let symbol = bytes[pos];
            let code_length =
                u16::from_le_bytes(bytes[pos + 1..pos + 3].try_into().unwrap()) as usize;
            pos += 3;

            if code_length == 0 {
                return Err(FormatError::EmptyCode { symbol }.into());
            }
            if code_length > CodeWord::MAX_LEN as usize {
                return Err(FormatError::CodeTooLong {
                    symbol,
                    length: code_length,
                }
                .into());
            }
            if bytes.len() < pos + code_length {
                return Err(truncated.into());
            }

            let mut bits = 0u64;
            for &bit_byte in &bytes[pos..pos + code_length] {
                bits = match bit_byte {
                    b'0' => bits << 1,
                    b'1' => (bits << 1) | 1,
                    _ => {
                        return Err(FormatError::InvalidCodeBit {
                            symbol,
                            byte: bit_byte,
                        }
                        .into())
                    }
                };
            }
            pos += code_length;

            if table.get(symbol).is_some() {
                return Err(FormatError::DuplicateSymbol { symbol }.into());
            }
            table.insert(symbol, CodeWord::new(bits, code_length as u16));
        }

        if pos != bytes.len() {
            return Err(FormatError::TrailingBytes {
                extra: bytes.len() - pos,
            }
            .into());
        }

        Ok((table, linking_id))
    }
}

impl Default for CodeTable {
    fn default() -> Self {
        Self::new()
    }
}

/// Reverse mapping from codeword to symbol, owned by a single decode
/// operation.
///
/// Also tracks the longest code in the table: once a pending bit buffer
/// grows past it, no code can ever match and the payload is corrupt.
#[derive(Debug)]
pub struct ReverseTable {
    map: HashMap<(u64, u16), u8>,
    max_code_len: u16,
}

impl ReverseTable {
    /// Build the reverse mapping from a forward table.
    pub fn from_table(table: &CodeTable) -> Self {
        let mut map = HashMap::with_capacity(table.len());
        let mut max_code_len = 0;
        for (symbol, code) in table.iter() {
            map.insert((code.bits(), code.len()), symbol);
            max_code_len = max_code_len.max(code.len());
        }
        Self { map, max_code_len }
    }

    /// Symbol whose code exactly equals the given bit string, if any.
    pub fn lookup(&self, bits: u64, len: u16) -> Option<u8> {
        self.map.get(&(bits, len)).copied()
    }

    /// Length of the longest code in the table (0 for an empty table).
    pub fn max_code_len(&self) -> u16 {
        self.max_code_len
    }

    /// True if the table has no codes.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_table() -> CodeTable {
        let mut table = CodeTable::new();
        table.insert(b'a', CodeWord::new(0b0, 1));
        table.insert(b'b', CodeWord::new(0b10, 2));
        table.insert(b'c', CodeWord::new(0b110, 3));
        table.insert(b'd', CodeWord::new(0b111, 3));
        table
    }

    #[test]
    fn test_serialize_deserialize_round_trip() {
        let table = sample_table();
        let bytes = table.serialize(0xDEAD_BEEF_CAFE_F00D);

        let (parsed, linking_id) = CodeTable::deserialize(&bytes).unwrap();
        assert_eq!(linking_id, 0xDEAD_BEEF_CAFE_F00D);
        assert_eq!(parsed.len(), 4);
        for (symbol, code) in table.iter() {
            assert_eq!(parsed.get(symbol), Some(code));
        }
    }

    #[test]
    fn test_serialized_layout() {
        let mut table = CodeTable::new();
        table.insert(0x41, CodeWord::new(0b101, 3));
        let bytes = table.serialize(7);

        assert_eq!(&bytes[0..2], &1u16.to_le_bytes());
        assert_eq!(&bytes[2..10], &7u64.to_le_bytes());
        assert_eq!(bytes[10], 0x41);
        assert_eq!(&bytes[11..13], &3u16.to_le_bytes());
        assert_eq!(&bytes[13..16], b"101");
        assert_eq!(bytes.len(), 16);
    }

    #[test]
    fn test_empty_table_round_trip() {
        let table = CodeTable::new();
        let bytes = table.serialize(42);
        assert_eq!(bytes.len(), TABLE_PREFIX_SIZE);

        let (parsed, linking_id) = CodeTable::deserialize(&bytes).unwrap();
        assert!(parsed.is_empty());
        assert_eq!(linking_id, 42);
    }

    #[test]
    fn test_too_short_prefix() {
        let result = CodeTable::deserialize(&[0u8; 5]);
        assert!(matches!(
            result,
            Err(crate::error::Error::Format(FormatError::TooShort { .. }))
        ));
    }

    #[test]
    fn test_truncated_entries() {
        let table = sample_table();
        let bytes = table.serialize(1);

        // Cut the stream mid-entry
        let result = CodeTable::deserialize(&bytes[..bytes.len() - 2]);
        assert!(matches!(
            result,
            Err(crate::error::Error::Format(FormatError::TableTruncated { .. }))
        ));
    }

    #[test]
    fn test_declared_count_exceeds_stream() {
        let table = sample_table();
        let mut bytes = table.serialize(1);
        // Declare one more entry than the stream holds
        bytes[0..2].copy_from_slice(&5u16.to_le_bytes());

        let result = CodeTable::deserialize(&bytes);
        assert!(matches!(
            result,
            Err(crate::error::Error::Format(FormatError::TableTruncated { .. }))
        ));
    }

    #[test]
    fn test_trailing_bytes_rejected() {
        let table = sample_table();
        let mut bytes = table.serialize(1);
        bytes.push(0xFF);

        let result = CodeTable::deserialize(&bytes);
        assert!(matches!(
            result,
            Err(crate::error::Error::Format(FormatError::TrailingBytes { .. }))
        ));
    }

    #[test]
    fn test_invalid_code_bit_byte() {
        let mut table = CodeTable::new();
        table.insert(b'x', CodeWord::new(0b01, 2));
        let mut bytes = table.serialize(1);
        let last = bytes.len() - 1;
        bytes[last] = b'2';

        let result = CodeTable::deserialize(&bytes);
        assert!(matches!(
            result,
            Err(crate::error::Error::Format(FormatError::InvalidCodeBit { .. }))
        ));
    }

    #[test]
    fn test_duplicate_symbol_rejected() {
        // Two entries for the same symbol, hand-built
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&2u16.to_le_bytes());
        bytes.extend_from_slice(&9u64.to_le_bytes());
        for code in [b"0".as_slice(), b"1".as_slice()] {
            bytes.push(b'a');
            bytes.extend_from_slice(&1u16.to_le_bytes());
            bytes.extend_from_slice(code);
        }

        let result = CodeTable::deserialize(&bytes);
        assert!(matches!(
            result,
            Err(crate::error::Error::Format(FormatError::DuplicateSymbol { .. }))
        ));
    }

    #[test]
    fn test_zero_length_code_rejected() {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&1u16.to_le_bytes());
        bytes.extend_from_slice(&9u64.to_le_bytes());
        bytes.push(b'a');
        bytes.extend_from_slice(&0u16.to_le_bytes());

        let result = CodeTable::deserialize(&bytes);
        assert!(matches!(
            result,
            Err(crate::error::Error::Format(FormatError::EmptyCode { .. }))
        ));
    }

    #[test]
    fn test_reverse_table_lookup() {
        let table = sample_table();
        let reverse = ReverseTable::from_table(&table);

        assert_eq!(reverse.lookup(0b0, 1), Some(b'a'));
        assert_eq!(reverse.lookup(0b10, 2), Some(b'b'));
        assert_eq!(reverse.lookup(0b110, 3), Some(b'c'));
        assert_eq!(reverse.lookup(0b111, 3), Some(b'd'));
        // Same bits, wrong length: no match
        assert_eq!(reverse.lookup(0b0, 2), None);
        assert_eq!(reverse.max_code_len(), 3);
        assert!(!reverse.is_empty());
    }

    #[test]
    fn test_reverse_table_empty() {
        let reverse = ReverseTable::from_table(&CodeTable::new());
        assert!(reverse.is_empty());
        assert_eq!(reverse.max_code_len(), 0);
    }
}
