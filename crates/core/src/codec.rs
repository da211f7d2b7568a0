//! Top-level encode and decode operations.
//!
//! This is the collaborator interface of the codec: byte slices in,
//! artifact bytes out. File naming, directory layout, and artifact
//! lookup by linking id are the caller's concern; the codec only
//! exposes and checks the id for consistency.
//!
//! Each operation owns its histogram, tables, and buffer state for its
//! whole duration; nothing is shared across operations, so concurrent
//! encodes on different sources need no coordination beyond distinct
//! linking ids and distinct artifact paths.

use crate::bitio::{BitPacker, BitUnpacker};
use crate::code::build_code_table;
use crate::container::{ContainerHeader, HEADER_SIZE};
use crate::error::{CodecError, Result};
use crate::histogram::Histogram;
use crate::id::IdSource;
use crate::table::{CodeTable, ReverseTable};

/// The pair of artifacts produced by one encode operation.
#[derive(Debug, Clone)]
pub struct EncodeOutput {
    /// Serialized table artifact
    pub table: Vec<u8>,

    /// Serialized encoded artifact (container header + packed payload)
    pub encoded: Vec<u8>,

    /// Linking id shared by both artifacts
    pub linking_id: u64,
}

/// Encode a byte source into a (table artifact, encoded artifact) pair.
///
/// A zero-length source produces an empty table and an encoded artifact
/// consisting of a header with `original_len = 0` and no payload bytes.
///
/// # Errors
/// - `Error::Code` if code construction fails
/// - `CodecError::UnknownSymbol` if a source byte has no code (cannot
///   happen when the table came from this source's histogram)
pub fn encode(source: &[u8], ids: &mut dyn IdSource) -> Result<EncodeOutput> {
    let histogram = Histogram::from_bytes(source);
    let code_table = build_code_table(&histogram)?;
    let linking_id = ids.next_id();

    let table = code_table.serialize(linking_id);

    let header = ContainerHeader {
        original_len: source.len() as u64,
        table_entries: code_table.len() as u16,
        linking_id,
    };

    let mut encoded = Vec::with_capacity(HEADER_SIZE + source.len() / 2 + 1);
    encoded.extend_from_slice(&header.serialize());

    if !source.is_empty() {
        let mut packer = BitPacker::new(&code_table);
        for &byte in source {
            packer.push_symbol(byte)?;
        }
        encoded.extend_from_slice(&packer.finish());
    }

    Ok(EncodeOutput {
        table,
        encoded,
        linking_id,
    })
}

/// Decode an encoded artifact using its companion table artifact.
///
/// Verifies that the two artifacts carry the same linking id and that
/// the header's entry count matches the table before decoding exactly
/// `original_len` bytes.
///
/// # Errors
/// - `Error::Format` if either artifact is malformed or truncated
/// - `CodecError::MismatchedId` if the artifacts were not produced by
///   the same encode operation
/// - `CodecError::TableMismatch` if the header's declared entry count
///   disagrees with the table artifact
/// - `CodecError::EmptyTable` / `CorruptPayload` from the unpacker
pub fn decode(encoded: &[u8], table: &[u8]) -> Result<Vec<u8>> {
    let (header, payload) = ContainerHeader::parse(encoded)?;
    let (code_table, table_id) = CodeTable::deserialize(table)?;

    if header.linking_id != table_id {
        return Err(CodecError::MismatchedId {
            header: header.linking_id,
            table: table_id,
        }
        .into());
    }

    if header.table_entries as usize != code_table.len() {
        return Err(CodecError::TableMismatch {
            header: header.table_entries as usize,
            table: code_table.len(),
        }
        .into());
    }

    if header.original_len == 0 {
        return Ok(Vec::new());
    }

    let reverse = ReverseTable::from_table(&code_table);
    let mut unpacker = BitUnpacker::new(&reverse, header.original_len)?;
    for &byte in payload {
        if unpacker.is_done() {
            break;
        }
        unpacker.feed(byte)?;
    }

    unpacker.finish()
}
