//! # lzwhuff Core
//!
//! Shared building blocks for the lzwhuff compressor:
//!
//! - [`bitstream`]: MSB-first bit packing with explicit padding
//! - [`crc`]: CRC-32 checksum for artifact verification
//! - [`error`]: Error type shared by every codec stage
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │ CLI: lzwhuff compress / decompress / info / test / bench│
//! ├─────────────────────────────────────────────────────────┤
//! │ Pipeline: artifact container, LZW → Huffman, reports    │
//! ├──────────────────────────┬──────────────────────────────┤
//! │ LZW codec                │ Huffman codec                │
//! ├──────────────────────────┴──────────────────────────────┤
//! │ Core (this crate): bit packing, CRC, errors             │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust
//! use lzwhuff_core::bitstream::{PadBit, pack_codes, unpack_codes};
//!
//! let packed = pack_codes(&[65, 66, 256], 9, PadBit::One).unwrap();
//! assert_eq!(packed.bytes.len(), 4);
//! assert_eq!(unpack_codes(&packed.bytes, 9, None).unwrap(), vec![65, 66, 256]);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]
#![allow(clippy::module_name_repetitions)]

pub mod bitstream;
pub mod crc;
pub mod error;

pub use bitstream::{BitReader, BitWriter, PackedBits, PadBit};
pub use crc::Crc32;
pub use error::{LzwHuffError, Result};
