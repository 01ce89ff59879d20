//! # lzwhuff-lzw: Bounded-Dictionary LZW
//!
//! LZW (Lempel-Ziv-Welch) compression and decompression with a capped
//! dictionary and fixed-width code packing.
//!
//! ## Stream format
//!
//! - **Initial alphabet**: codes `0..=255` are the single bytes; new entries
//!   start at 256. There are no clear or end-of-information codes.
//! - **Bounded dictionary**: once `max_dict_size` entries exist the
//!   dictionary is frozen and encoding continues with what it has.
//! - **Fixed width**: every code is written with `ceil(log2(next_code))`
//!   bits, where `next_code` is the dictionary size after encoding.
//! - **MSB-first packing**: the last byte is padded with 1-bits.
//!
//! Width and dictionary bound are not stored in the stream; callers keep
//! them alongside the data (the pipeline crate writes them into its header).
//!
//! ## Example
//!
//! ```rust
//! use lzwhuff_lzw::{LzwConfig, compress, decompress};
//!
//! let original = b"TOBEORNOTTOBEORTOBEORNOT";
//! let config = LzwConfig::DEFAULT;
//!
//! let stream = compress(original, config).unwrap();
//! assert_eq!(stream.code_count, 16);
//!
//! let decompressed = decompress(&stream.data, stream.bit_width, config).unwrap();
//! assert_eq!(decompressed, original);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

mod config;
mod decoder;
mod dictionary;
mod encoder;

pub use config::{
    DEFAULT_DICT_SIZE, INITIAL_CODES, LzwConfig, MAX_DICT_SIZE, MIN_DICT_SIZE, bit_width_for,
};
pub use decoder::LzwDecoder;
pub use dictionary::LzwDictionary;
pub use encoder::{LzwEncoder, LzwStream};
pub use lzwhuff_core::error::{LzwHuffError, Result};

/// Compress data with LZW under the given dictionary bound.
///
/// # Example
///
/// ```rust
/// use lzwhuff_lzw::{LzwConfig, compress};
///
/// let stream = compress(b"ABABABABABABABAB", LzwConfig::DEFAULT).unwrap();
/// assert_eq!(stream.bit_width, 9);
/// assert!(stream.data.len() < 16);
/// ```
pub fn compress(data: &[u8], config: LzwConfig) -> Result<LzwStream> {
    let mut encoder = LzwEncoder::new(config)?;
    encoder.encode(data)
}

/// Decompress an LZW stream packed at `bit_width` bits per code.
///
/// `config` must carry the same dictionary bound used to compress.
pub fn decompress(data: &[u8], bit_width: u8, config: LzwConfig) -> Result<Vec<u8>> {
    let mut decoder = LzwDecoder::new(config)?;
    decoder.decode(data, bit_width)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip() {
        let original = b"TOBEORNOTTOBEORTOBEORNOT";
        let stream = compress(original, LzwConfig::DEFAULT).unwrap();
        let decompressed = decompress(&stream.data, stream.bit_width, LzwConfig::DEFAULT).unwrap();
        assert_eq!(decompressed, original);
    }

    #[test]
    fn test_310_byte_no_truncation() {
        let original = b"This is a test of compression! ".repeat(10);
        assert_eq!(original.len(), 310);

        let stream = compress(&original, LzwConfig::DEFAULT).unwrap();
        let decompressed = decompress(&stream.data, stream.bit_width, LzwConfig::DEFAULT).unwrap();
        assert_eq!(decompressed.len(), 310);
        assert_eq!(decompressed, &original[..]);
    }

    #[test]
    fn test_empty_input() {
        let stream = compress(b"", LzwConfig::DEFAULT).unwrap();
        assert!(stream.data.is_empty());
        let decompressed = decompress(&stream.data, stream.bit_width, LzwConfig::DEFAULT).unwrap();
        assert!(decompressed.is_empty());
    }

    #[test]
    fn test_all_byte_values() {
        let original: Vec<u8> = (0..=255).collect();
        let stream = compress(&original, LzwConfig::DEFAULT).unwrap();
        let decompressed = decompress(&stream.data, stream.bit_width, LzwConfig::DEFAULT).unwrap();
        assert_eq!(decompressed, original);
    }

    #[test]
    fn test_large_input() {
        let original = b"The quick brown fox jumps over the lazy dog. ".repeat(100);
        let stream = compress(&original, LzwConfig::DEFAULT).unwrap();
        let decompressed = decompress(&stream.data, stream.bit_width, LzwConfig::DEFAULT).unwrap();
        assert_eq!(decompressed, original);
    }
}
