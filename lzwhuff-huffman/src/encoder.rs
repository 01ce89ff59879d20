//! Huffman encoding.

use crate::codebook::Codebook;
use lzwhuff_core::bitstream::{BitWriter, PadBit};
use lzwhuff_core::error::{LzwHuffError, Result};
use log::debug;

/// Bit-packed output of [`encode`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HuffmanStream {
    /// Concatenated codes, MSB-first, last byte padded with 0-bits.
    pub data: Vec<u8>,
    /// Number of meaningful bits in `data`.
    pub bit_len: u64,
}

/// Replace every byte of `data` with its code from `codebook`.
///
/// # Errors
///
/// [`LzwHuffError::UnknownSymbol`] if a byte has no code.
pub fn encode(data: &[u8], codebook: &Codebook) -> Result<HuffmanStream> {
    let mut writer = BitWriter::with_capacity(data.len());
    for &byte in data {
        let code = codebook
            .code(byte)
            .ok_or(LzwHuffError::UnknownSymbol(byte))?;
        writer.write_bits(code.bits, code.len)?;
    }

    let packed = writer.finish(PadBit::Zero);
    debug!(
        "Huffman encoded {} bytes into {} bits ({} bytes)",
        data.len(),
        packed.bit_len,
        packed.bytes.len()
    );

    Ok(HuffmanStream {
        data: packed.bytes,
        bit_len: packed.bit_len,
    })
}
