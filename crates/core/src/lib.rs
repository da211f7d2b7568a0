//! shannon-codec-core: static Shannon-Fano-Elias entropy codec
//!
//! Compresses an arbitrary byte stream into a bit-packed encoding plus a
//! detachable code table, and reverses the process exactly:
//! - `histogram`: single-pass byte frequency analysis
//! - `code`: prefix-free code construction from cumulative probabilities
//! - `table`: code tables and the table artifact format
//! - `bitio`: bit-level encode/decode state machines
//! - `container`: encoded-artifact header (size, table entries, linking id)
//! - `codec`: top-level encode/decode over byte slices
//! - `id`: linking id generation as an injected capability
//!
//! # Design Principles
//!
//! - **No panics**: all failures are structured errors
//! - **Deterministic**: symbol ordering and artifact layouts are fully
//!   specified, so identical inputs produce identical artifacts for a
//!   given linking id
//! - **Exact**: the decoder stops at the declared original size; padding
//!   bits are never interpreted
//!
//! The code table is static per operation: it is built once from the full
//! source and never updated during encoding.

pub mod bitio;
pub mod code;
pub mod codec;
pub mod container;
pub mod error;
pub mod histogram;
pub mod id;
pub mod table;

// Re-export commonly used types
pub use codec::{decode, encode, EncodeOutput};
pub use error::{Error, Result};
pub use id::{FixedIdSource, IdSource, RandomIdSource};
