//! Error types for lzwhuff operations.
//!
//! Every codec stage reports structural violations through [`LzwHuffError`].
//! None of these conditions are transient, so callers should never retry:
//! a second attempt on the same input reproduces the same failure.

use std::io;
use thiserror::Error;

/// The main error type for lzwhuff operations.
#[derive(Debug, Error)]
pub enum LzwHuffError {
    /// I/O error from underlying reader/writer.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Ran out of bits while reading.
    #[error("Unexpected end of data at bit position {position}")]
    UnexpectedEof {
        /// Bit position where the read failed.
        position: u64,
    },

    /// A code width that cannot be packed or does not match the dictionary bound.
    #[error("Invalid bit width: {0}")]
    InvalidBitWidth(u8),

    /// A declared bit length is longer than the data backing it.
    #[error("Invalid bit length: {bit_len} bits declared, {available} available")]
    InvalidBitLength {
        /// Declared number of meaningful bits.
        bit_len: u64,
        /// Number of bits actually present.
        available: u64,
    },

    /// Dictionary bound outside the supported range.
    #[error("Invalid dictionary size: {size} (must be between {min} and {max})")]
    InvalidDictSize {
        /// Requested size.
        size: u32,
        /// Smallest accepted size.
        min: u32,
        /// Largest accepted size.
        max: u32,
    },

    /// An LZW code that references no dictionary entry.
    #[error("Malformed LZW code {code} at index {index} (next code {next_code})")]
    MalformedCode {
        /// The offending code.
        code: u32,
        /// Position of the code in the code stream.
        index: usize,
        /// Decoder's next unassigned code when the code was read.
        next_code: u32,
    },

    /// A Huffman tree was requested for an empty frequency table.
    #[error("Cannot build a Huffman tree from an empty frequency table")]
    EmptyTree,

    /// A bit sequence that leads to no node in the Huffman tree.
    #[error("Invalid Huffman code at bit position {bit_position}")]
    InvalidHuffmanCode {
        /// Bit position where the invalid code was found.
        bit_position: u64,
    },

    /// Huffman input ended in the middle of a code.
    #[error("Truncated Huffman stream at bit position {bit_position}")]
    TruncatedStream {
        /// Bit position where the input ran out.
        bit_position: u64,
    },

    /// A byte that has no entry in the codebook.
    #[error("Symbol {0:#04x} has no Huffman code")]
    UnknownSymbol(u8),

    /// A Huffman code that does not fit the 64-bit code representation.
    #[error("Huffman code for symbol {symbol:#04x} is {length} bits long")]
    CodeTooLong {
        /// Symbol whose code overflowed.
        symbol: u8,
        /// Depth of the symbol in the tree.
        length: usize,
    },

    /// Invalid magic number in artifact header.
    #[error("Invalid magic number: expected {expected:02x?}, found {found:02x?}")]
    InvalidMagic {
        /// Expected magic bytes.
        expected: Vec<u8>,
        /// Actual magic bytes found.
        found: Vec<u8>,
    },

    /// Artifact written by an unknown format version.
    #[error("Unsupported artifact version: {0}")]
    UnsupportedVersion(u8),

    /// Invalid header format.
    #[error("Invalid header: {message}")]
    InvalidHeader {
        /// Description of the header error.
        message: String,
    },

    /// CRC checksum mismatch.
    #[error("CRC mismatch: expected {expected:#x}, computed {computed:#x}")]
    ChecksumMismatch {
        /// Expected CRC value from the artifact.
        expected: u32,
        /// Computed CRC value from data.
        computed: u32,
    },

    /// Decoding would produce more bytes than the caller allows.
    #[error("Output limit exceeded: {needed} bytes needed, limit is {limit}")]
    OutputLimitExceeded {
        /// Maximum number of output bytes.
        limit: usize,
        /// Output length the next code would reach.
        needed: usize,
    },

    /// Decoded output differs from the original input.
    #[error(
        "Round-trip mismatch at offset {offset}: expected {expected_len} bytes, got {actual_len}"
    )]
    RoundTripMismatch {
        /// First differing byte offset.
        offset: usize,
        /// Length of the original input.
        expected_len: usize,
        /// Length of the decoded output.
        actual_len: usize,
    },
}

/// Result type alias for lzwhuff operations.
pub type Result<T> = std::result::Result<T, LzwHuffError>;

impl LzwHuffError {
    /// Create an unexpected EOF error.
    pub fn unexpected_eof(position: u64) -> Self {
        Self::UnexpectedEof { position }
    }

    /// Create an invalid bit length error.
    pub fn invalid_bit_length(bit_len: u64, available: u64) -> Self {
        Self::InvalidBitLength { bit_len, available }
    }

    /// Create an invalid dictionary size error.
    pub fn invalid_dict_size(size: u32, min: u32, max: u32) -> Self {
        Self::InvalidDictSize { size, min, max }
    }

    /// Create a malformed code error.
    pub fn malformed_code(code: u32, index: usize, next_code: u32) -> Self {
        Self::MalformedCode {
            code,
            index,
            next_code,
        }
    }

    /// Create an invalid Huffman code error.
    pub fn invalid_huffman(bit_position: u64) -> Self {
        Self::InvalidHuffmanCode { bit_position }
    }

    /// Create a truncated stream error.
    pub fn truncated(bit_position: u64) -> Self {
        Self::TruncatedStream { bit_position }
    }

    /// Create an invalid magic error.
    pub fn invalid_magic(expected: impl Into<Vec<u8>>, found: impl Into<Vec<u8>>) -> Self {
        Self::InvalidMagic {
            expected: expected.into(),
            found: found.into(),
        }
    }

    /// Create an invalid header error.
    pub fn invalid_header(message: impl Into<String>) -> Self {
        Self::InvalidHeader {
            message: message.into(),
        }
    }

    /// Create an output limit error.
    pub fn output_limit(limit: usize, needed: usize) -> Self {
        Self::OutputLimitExceeded { limit, needed }
    }

    /// Create a CRC mismatch error.
    pub fn checksum_mismatch(expected: u32, computed: u32) -> Self {
        Self::ChecksumMismatch { expected, computed }
    }

    /// Compare decoded output against the original and build a mismatch
    /// error if they differ.
    pub fn check_round_trip(original: &[u8], decoded: &[u8]) -> Result<()> {
        if original == decoded {
            return Ok(());
        }
        let offset = original
            .iter()
            .zip(decoded)
            .position(|(a, b)| a != b)
            .unwrap_or_else(|| original.len().min(decoded.len()));
        Err(Self::RoundTripMismatch {
            offset,
            expected_len: original.len(),
            actual_len: decoded.len(),
        })
    }
}
