//! # huffpress
//!
//! Byte-level Huffman compression with a self-describing container format.
//!
//! ## Quick Start
//!
//! ```rust
//! use huffpress::HuffmanCodec;
//!
//! let data = b"the quick brown fox jumps over the lazy dog";
//!
//! // Build a codec from the data's own byte distribution and compress.
//! let codec = HuffmanCodec::from_bytes(data)?;
//! let encoded = codec.encode(data)?;
//!
//! // The artifact carries its frequency table, so decoding is standalone.
//! let decoded = huffpress::decode(&encoded)?;
//! assert_eq!(decoded, data.to_vec());
//! # Ok::<(), huffpress::HuffError>(())
//! ```
//!
//! File-to-file helpers ([`encode_file`], [`decode_file`]) wrap the same
//! codec with atomic output writes for the CLI.

pub mod code;
pub mod codec;
pub mod error;
pub mod format;
pub mod freq;
pub mod hufftree;

// Internal modules - not part of the public API
mod bit_vec;
mod min_heap;

// Re-export the main types for convenience
pub use code::{resolve_path, CodeBook, CodePath};
pub use codec::{decode, decode_file, encode_file, HuffmanCodec};
pub use error::{HuffError, Result};
pub use format::EncodedFile;
pub use freq::FrequencyTable;
pub use hufftree::{HuffNode, HuffmanTree};
