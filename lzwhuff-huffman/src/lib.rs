//! # lzwhuff-huffman: Byte-Oriented Huffman Coding
//!
//! Static Huffman coding over the 256 byte values. The code is derived from
//! the frequencies of the data being encoded, so the decoder needs the same
//! frequency table to rebuild the tree.
//!
//! ## Pieces
//!
//! - [`FrequencyTable`]: occurrence counts per byte
//! - [`HuffmanTree`]: arena tree with deterministic tie-breaking, and the
//!   bit-serial decoder
//! - [`Codebook`]: per-symbol codes derived from the tree
//! - [`encode`]: codes concatenated MSB-first, padded with 0-bits
//!
//! ## Example
//!
//! ```rust
//! use lzwhuff_huffman::{compress, decompress};
//!
//! let original = b"AAAAABBCD";
//! let compressed = compress(original).unwrap();
//! assert_eq!(compressed.stream.bit_len, 15);
//!
//! let decoded = decompress(
//!     &compressed.stream.data,
//!     compressed.stream.bit_len,
//!     &compressed.frequencies,
//! )
//! .unwrap();
//! assert_eq!(decoded, original);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

mod codebook;
mod encoder;
mod frequency;
mod tree;

pub use codebook::{Code, Codebook, MAX_CODE_LENGTH};
pub use encoder::{HuffmanStream, encode};
pub use frequency::{ALPHABET_SIZE, FrequencyTable};
pub use lzwhuff_core::error::{LzwHuffError, Result};
pub use tree::{HuffmanNode, HuffmanTree};

/// Output of [`compress`]: the encoded bits and the table needed to decode them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanCompressed {
    /// Frequencies of the input bytes.
    pub frequencies: FrequencyTable,
    /// Encoded data.
    pub stream: HuffmanStream,
}

/// Count `data`, build its tree and codebook, and encode it.
///
/// Empty input gives an empty table and an empty stream.
pub fn compress(data: &[u8]) -> Result<HuffmanCompressed> {
    let frequencies = FrequencyTable::from_bytes(data);
    if frequencies.is_empty() {
        return Ok(HuffmanCompressed {
            frequencies,
            stream: HuffmanStream::default(),
        });
    }

    let tree = HuffmanTree::build(&frequencies)?;
    let codebook = Codebook::from_tree(&tree)?;
    let stream = encode(data, &codebook)?;

    Ok(HuffmanCompressed {
        frequencies,
        stream,
    })
}

/// Decode `bit_len` bits of `data` with the tree rebuilt from `frequencies`.
///
/// An empty table only decodes an empty stream.
pub fn decompress(data: &[u8], bit_len: u64, frequencies: &FrequencyTable) -> Result<Vec<u8>> {
    if frequencies.is_empty() {
        if bit_len == 0 {
            return Ok(Vec::new());
        }
        return Err(LzwHuffError::EmptyTree);
    }

    let tree = HuffmanTree::build(frequencies)?;
    tree.decode(data, bit_len)
}
