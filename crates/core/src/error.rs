//! Error types for the shannon-codec system.
//!
//! All operations return structured errors rather than panicking.
//! A failed encode or decode is terminal for that operation: no partial
//! result is valid, and the caller decides whether to retry with
//! different inputs. No automatic retries happen inside the core.

use thiserror::Error;

/// Top-level error type for all operations in the system.
///
/// Each variant corresponds to a specific failure domain:
/// - Code: code table construction failures
/// - Format: malformed or truncated artifacts
/// - Codec: encode/decode state machine failures
/// - I/O: source/sink read and write failures
#[derive(Debug, Error)]
pub enum Error {
    /// Code construction error (e.g., code length out of range)
    #[error("code construction error: {0}")]
    Code(#[from] CodeError),

    /// Malformed or truncated artifact
    #[error("format error: {0}")]
    Format(#[from] FormatError),

    /// Encode/decode failure
    #[error("codec error: {0}")]
    Codec(#[from] CodecError),

    /// File or stream I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Code table construction errors.
#[derive(Debug, Error)]
pub enum CodeError {
    /// Computed code length exceeds the 64-bit codeword bound
    #[error("code length {length} exceeds maximum 64")]
    CodeTooLong { length: u32 },
}

/// Artifact parsing errors.
#[derive(Debug, Error)]
pub enum FormatError {
    /// Artifact is too short to contain its fixed-size prefix
    #[error("artifact too short: need at least {required} bytes, got {actual}")]
    TooShort { required: usize, actual: usize },

    /// Declared entry count does not match the actual byte stream
    #[error("table truncated: declared {declared} entries, ran out after {parsed}")]
    TableTruncated { declared: usize, parsed: usize },

    /// Trailing bytes after the last declared table entry
    #[error("table has {extra} trailing bytes after the last entry")]
    TrailingBytes { extra: usize },

    /// A stored code bit byte was neither b'0' nor b'1'
    #[error("invalid code bit byte {byte:#04x} for symbol {symbol:#04x}")]
    InvalidCodeBit { symbol: u8, byte: u8 },

    /// A table entry declares a zero-length code
    #[error("zero-length code for symbol {symbol:#04x}")]
    EmptyCode { symbol: u8 },

    /// A stored code is longer than the 64-bit codeword bound
    #[error("stored code for symbol {symbol:#04x} is {length} bits, maximum is 64")]
    CodeTooLong { symbol: u8, length: usize },

    /// The same symbol appears in more than one table entry
    #[error("duplicate table entry for symbol {symbol:#04x}")]
    DuplicateSymbol { symbol: u8 },
}

/// Encode/decode errors.
#[derive(Debug, Error)]
pub enum CodecError {
    /// Source byte has no code in the table
    #[error("symbol {symbol:#04x} not present in code table")]
    UnknownSymbol { symbol: u8 },

    /// Encoded artifact and table artifact carry different linking ids
    #[error("linking id mismatch: encoded artifact has {header:#018x}, table has {table:#018x}")]
    MismatchedId { header: u64, table: u64 },

    /// Header's declared entry count disagrees with the table artifact
    #[error("table mismatch: header declares {header} entries, table has {table}")]
    TableMismatch { header: usize, table: usize },

    /// Empty code table cannot produce the declared nonzero output
    #[error("empty code table but {expected} output bytes declared")]
    EmptyTable { expected: u64 },

    /// Payload exhausted before the declared original size was reached
    #[error("corrupt payload: decoded {decoded} of {expected} bytes before payload ran out")]
    CorruptPayload { decoded: u64, expected: u64 },
}

/// Type alias for Result with our Error type
pub type Result<T> = std::result::Result<T, Error>;
