//! Bit-level packing and unpacking of coded symbols.
//!
//! Both directions work MSB-first: the first bit of the first codeword
//! lands in bit 7 of the first payload byte.
//!
//! # Padding Rule
//!
//! [`BitPacker::finish`] right-pads the final partial byte with zero
//! bits. Pad bits are never interpreted on decode: the container header
//! carries the original byte count and [`BitUnpacker`] stops as soon as
//! that many symbols have been emitted. The codec could not rely on
//! "no more matchable code" instead, because pad bits may well form a
//! valid (spurious) codeword.

use crate::error::{CodecError, Result};
use crate::table::{CodeTable, ReverseTable};

/// Packs codewords into bytes during encode.
///
/// # Invariants
/// - `pending_len < 8`: full bytes are flushed as soon as they complete
#[derive(Debug)]
pub struct BitPacker<'a> {
    table: &'a CodeTable,
    bytes: Vec<u8>,
    /// Unflushed tail bits, right-aligned in the low `pending_len` positions
    pending_bits: u8,
    pending_len: u8,
}

impl<'a> BitPacker<'a> {
    /// Create a packer that encodes with the given code table.
    pub fn new(table: &'a CodeTable) -> Self {
        Self {
            table,
            bytes: Vec::new(),
            pending_bits: 0,
            pending_len: 0,
        }
    }

    /// Append the codeword for one source byte.
    ///
    /// # Errors
    /// `CodecError::UnknownSymbol` if the byte has no code. This cannot
    /// happen for bytes drawn from the histogram that built the table,
    /// but the table and the source are decoupled at this interface, so
    /// it is checked.
    pub fn push_symbol(&mut self, symbol: u8) -> Result<()> {
        let code = self
            .table
            .get(symbol)
            .ok_or(CodecError::UnknownSymbol { symbol })?;
        for i in 0..code.len() {
            self.push_bit(code.bit(i));
        }
        Ok(())
    }

    fn push_bit(&mut self, bit: bool) {
        self.pending_bits = (self.pending_bits << 1) | bit as u8;
        self.pending_len += 1;
        if self.pending_len == 8 {
            self.bytes.push(self.pending_bits);
            self.pending_bits = 0;
            self.pending_len = 0;
        }
    }

    /// Total number of bits appended so far (including the pending tail).
    pub fn bit_len(&self) -> usize {
        self.bytes.len() * 8 + self.pending_len as usize
    }

    /// Flush the pending tail (zero-padded on the right) and return the
    /// packed payload. Consumes the packer.
    pub fn finish(mut self) -> Vec<u8> {
        if self.pending_len > 0 {
            self.bytes.push(self.pending_bits << (8 - self.pending_len));
        }
        self.bytes
    }
}

/// Unpacks payload bytes back into symbols during decode.
///
/// Accumulates bits into a pending buffer and probes the reverse table
/// after every bit; the prefix-free property guarantees at most one code
/// can match. Stops once the declared number of symbols has been emitted,
/// leaving any trailing pad bits uninterpreted.
#[derive(Debug)]
pub struct BitUnpacker<'a> {
    table: &'a ReverseTable,
    pending_bits: u64,
    pending_len: u16,
    output: Vec<u8>,
    target: u64,
}

impl<'a> BitUnpacker<'a> {
    /// Create an unpacker that decodes `target` symbols with `table`.
    ///
    /// # Errors
    /// `CodecError::EmptyTable` if `target > 0` but the table has no
    /// codes: nothing could ever be decoded.
    pub fn new(table: &'a ReverseTable, target: u64) -> Result<Self> {
        if target > 0 && table.is_empty() {
            return Err(CodecError::EmptyTable { expected: target }.into());
        }
        Ok(Self {
            table,
            pending_bits: 0,
            pending_len: 0,
            output: Vec::with_capacity(target.min(1 << 20) as usize),
            target,
        })
    }

    /// True once the declared symbol count has been emitted.
    pub fn is_done(&self) -> bool {
        self.output.len() as u64 == self.target
    }

    /// Consume one payload byte, MSB-first. Bits past the point where
    /// the target count is reached are discarded without interpretation.
    ///
    /// # Errors
    /// `CodecError::CorruptPayload` if the pending buffer grows longer
    /// than the longest code in the table, since no code can match it.
    pub fn feed(&mut self, byte: u8) -> Result<()> {
        for i in (0..8).rev() {
            if self.is_done() {
                break;
            }

            self.pending_bits = (self.pending_bits << 1) | ((byte >> i) & 1) as u64;
            self.pending_len += 1;

            if self.pending_len > self.table.max_code_len() {
                return Err(CodecError::CorruptPayload {
                    decoded: self.output.len() as u64,
                    expected: self.target,
                }
                .into());
            }

            if let Some(symbol) = self.table.lookup(self.pending_bits, self.pending_len) {
                self.output.push(symbol);
                self.pending_bits = 0;
                self.pending_len = 0;
            }
        }
        Ok(())
    }

    /// Finish decoding and return the output.
    ///
    /// # Errors
    /// `CodecError::CorruptPayload` if the payload ran out before the
    /// declared symbol count was reached.
    pub fn finish(self) -> Result<Vec<u8>> {
        if !self.is_done() {
            return Err(CodecError::CorruptPayload {
                decoded: self.output.len() as u64,
                expected: self.target,
            }
            .into());
        }
        Ok(self.output)
    }
}
