//! # lzwhuff-pipeline: LZW + Huffman Compression
//!
//! Chains the two codec stages and wraps the result in a small container
//! that records every decode parameter:
//!
//! 1. LZW encodes the input into fixed-width codes packed into bytes
//! 2. Huffman codes those packed bytes using their own frequencies
//! 3. The header stores the dictionary bound, code width and count, the
//!    frequency table, the payload bit length and a CRC-32 of the input
//!
//! Decompression runs the stages in reverse and checks length and CRC.
//!
//! ## Example
//!
//! ```rust
//! use lzwhuff_pipeline::{Artifact, PipelineConfig, compress, decompress};
//!
//! let original = b"abcabcabcabc".repeat(1000);
//! let artifact = compress(&original, &PipelineConfig::default()).unwrap();
//!
//! let bytes = artifact.to_bytes().unwrap();
//! assert!(bytes.len() < original.len());
//!
//! let parsed = Artifact::from_bytes(&bytes).unwrap();
//! assert_eq!(decompress(&parsed).unwrap(), original);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

mod artifact;
mod pipeline;
mod report;

pub use artifact::{
    ARTIFACT_MAGIC, ARTIFACT_VERSION, Artifact, ArtifactHeader, FIXED_HEADER_LEN,
    FREQUENCY_ENTRY_LEN, Method,
};
pub use lzwhuff_core::error::{LzwHuffError, Result};
pub use lzwhuff_lzw::{DEFAULT_DICT_SIZE, MAX_DICT_SIZE, MIN_DICT_SIZE};
pub use pipeline::{PipelineConfig, compress, compress_verified, decompress, decompress_parts};
pub use report::{CompressionReport, StageReport};
