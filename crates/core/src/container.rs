//! Container format for the encoded artifact.
//!
//! The encoded artifact is a fixed header followed by the packed payload:
//!
//! ```text
//! +----------------------+
//! | original_len (8)     |  u64 little-endian, exact decode-stop count
//! +----------------------+
//! | table_entries (2)    |  u16 little-endian, entries in the table artifact
//! +----------------------+
//! | linking_id (8)       |  u64 little-endian, binds artifact to its table
//! +----------------------+
//! | packed payload       |  absent entirely when original_len == 0
//! | (variable)           |
//! +----------------------+
//! ```
//!
//! `original_len` is what lets the decoder stop exactly and discard pad
//! bits. `table_entries` is wide enough for all 256 possible symbols.
//! The decoder must verify `linking_id` against the id stored inside the
//! table artifact before trusting the pairing.

use crate::error::{FormatError, Result};

/// Size of the container header in bytes
pub const HEADER_SIZE: usize = 18;

/// Fixed-layout preamble of the encoded artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContainerHeader {
    /// Number of bytes in the original source (the decode-stop count)
    pub original_len: u64,

    /// Number of entries in the companion table artifact
    pub table_entries: u16,

    /// Identifier binding this artifact to its table artifact
    pub linking_id: u64,
}

impl ContainerHeader {
    /// Serialize the header into its fixed wire layout.
    pub fn serialize(&self) -> [u8; HEADER_SIZE] {
        let mut bytes = [0u8; HEADER_SIZE];
        bytes[0..8].copy_from_slice(&self.original_len.to_le_bytes());
        bytes[8..10].copy_from_slice(&self.table_entries.to_le_bytes());
        bytes[10..18].copy_from_slice(&self.linking_id.to_le_bytes());
        bytes
    }

    /// Parse the header off the front of an encoded artifact, returning
    /// it together with the remaining payload bytes.
    ///
    /// # Errors
    /// `FormatError::TooShort` if the artifact cannot hold a header.
    pub fn parse(bytes: &[u8]) -> Result<(Self, &[u8])> {
        if bytes.len() < HEADER_SIZE {
            return Err(FormatError::TooShort {
                required: HEADER_SIZE,
                actual: bytes.len(),
            }
            .into());
        }

        let original_len = u64::from_le_bytes(bytes[0..8].try_into().unwrap());
        let table_entries = u16::from_le_bytes(bytes[8..10].try_into().unwrap());
        let linking_id = u64::from_le_bytes(bytes[10..18].try_into().unwrap());

        Ok((
            Self {
                original_len,
                table_entries,
                linking_id,
            },
            &bytes[HEADER_SIZE..],
        ))
    }
}
