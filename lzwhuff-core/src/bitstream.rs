//! MSB-first bit packing for code streams.
//!
//! Both codec stages store their output MSB-first: the first bit written
//! lands in the most significant bit of the first byte. The final byte is
//! padded up to a byte boundary with a caller-chosen [`PadBit`]; the number
//! of meaningful bits is reported alongside the bytes so a reader never has
//! to guess where data ends.
//!
//! # Example
//!
//! ```
//! use lzwhuff_core::bitstream::{BitReader, BitWriter, PadBit};
//!
//! let mut writer = BitWriter::new();
//! writer.write_bits(0b101, 3).unwrap();
//! writer.write_bits(0b1100, 4).unwrap();
//! let packed = writer.finish(PadBit::One);
//! assert_eq!(packed.bytes, vec![0b1011_1001]);
//! assert_eq!(packed.bit_len, 7);
//!
//! let mut reader = BitReader::with_bit_len(&packed.bytes, packed.bit_len).unwrap();
//! assert_eq!(reader.read_bits(3).unwrap(), 0b101);
//! assert_eq!(reader.read_bits(4).unwrap(), 0b1100);
//! assert!(reader.is_exhausted());
//! ```

use crate::error::{LzwHuffError, Result};

/// Value used to fill the unused tail of the final byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PadBit {
    /// Pad with 0-bits.
    #[default]
    Zero,
    /// Pad with 1-bits.
    One,
}

/// Byte-aligned output of a [`BitWriter`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PackedBits {
    /// Packed bytes, padded to a byte boundary.
    pub bytes: Vec<u8>,
    /// Number of meaningful bits in `bytes`.
    pub bit_len: u64,
}

/// MSB-first bit writer backed by a `Vec<u8>`.
#[derive(Debug)]
pub struct BitWriter {
    /// Output buffer.
    output: Vec<u8>,
    /// Bit buffer (MSB-first, right-aligned).
    buffer: u64,
    /// Number of pending bits in buffer (always < 8 between calls).
    bits_in_buffer: u8,
    /// Total bits written.
    total_bits_written: u64,
}

impl BitWriter {
    /// Create a new, empty writer.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Create a writer with room for `bytes` output bytes.
    pub fn with_capacity(bytes: usize) -> Self {
        Self {
            output: Vec::with_capacity(bytes),
            buffer: 0,
            bits_in_buffer: 0,
            total_bits_written: 0,
        }
    }

    /// Total number of bits written so far.
    pub fn bits_written(&self) -> u64 {
        self.total_bits_written
    }

    /// Write the low `count` bits of `value`, most significant first.
    ///
    /// `count` may be 0 to 64.
    pub fn write_bits(&mut self, value: u64, count: u8) -> Result<()> {
        match count {
            0 => Ok(()),
            1..=32 => {
                self.write_chunk(value as u32, count);
                Ok(())
            }
            33..=64 => {
                let high = count - 32;
                self.write_chunk((value >> 32) as u32, high);
                self.write_chunk(value as u32, 32);
                Ok(())
            }
            _ => Err(LzwHuffError::InvalidBitWidth(count)),
        }
    }

    /// Write a single bit.
    #[inline]
    pub fn write_bit(&mut self, bit: bool) {
        self.write_chunk(bit as u32, 1);
    }

    #[inline]
    fn write_chunk(&mut self, value: u32, count: u8) {
        let mask = if count == 32 {
            u32::MAX
        } else {
            (1u32 << count) - 1
        };
        self.buffer = (self.buffer << count) | (value & mask) as u64;
        self.bits_in_buffer += count;
        self.total_bits_written += count as u64;

        while self.bits_in_buffer >= 8 {
            let byte = (self.buffer >> (self.bits_in_buffer - 8)) as u8;
            self.output.push(byte);
            self.bits_in_buffer -= 8;
        }
        self.buffer &= (1u64 << self.bits_in_buffer) - 1;
    }

    /// Pad the final partial byte and return the packed output.
    ///
    /// Nothing is appended when the stream already ends on a byte boundary.
    pub fn finish(mut self, pad: PadBit) -> PackedBits {
        if self.bits_in_buffer > 0 {
            let remaining = 8 - self.bits_in_buffer;
            let fill = match pad {
                PadBit::Zero => 0,
                PadBit::One => (1u64 << remaining) - 1,
            };
            let byte = ((self.buffer << remaining) | fill) as u8;
            self.output.push(byte);
        }
        PackedBits {
            bytes: self.output,
            bit_len: self.total_bits_written,
        }
    }
}

impl Default for BitWriter {
    fn default() -> Self {
        Self::new()
    }
}

/// MSB-first bit reader over a byte slice.
///
/// The reader can be limited to a number of meaningful bits so trailing
/// padding is never mistaken for data.
#[derive(Debug, Clone)]
pub struct BitReader<'a> {
    /// Input data.
    data: &'a [u8],
    /// Number of readable bits.
    limit: u64,
    /// Current bit position.
    position: u64,
}

impl<'a> BitReader<'a> {
    /// Create a reader over every bit of `data`.
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            limit: data.len() as u64 * 8,
            position: 0,
        }
    }

    /// Create a reader limited to the first `bit_len` bits of `data`.
    pub fn with_bit_len(data: &'a [u8], bit_len: u64) -> Result<Self> {
        let available = data.len() as u64 * 8;
        if bit_len > available {
            return Err(LzwHuffError::invalid_bit_length(bit_len, available));
        }
        Ok(Self {
            data,
            limit: bit_len,
            position: 0,
        })
    }

    /// Current bit position.
    pub fn bit_position(&self) -> u64 {
        self.position
    }

    /// Number of bits left before the limit.
    pub fn bits_remaining(&self) -> u64 {
        self.limit - self.position
    }

    /// True once every meaningful bit has been consumed.
    pub fn is_exhausted(&self) -> bool {
        self.position >= self.limit
    }

    /// Read a single bit.
    #[inline]
    pub fn read_bit(&mut self) -> Result<bool> {
        if self.position >= self.limit {
            return Err(LzwHuffError::unexpected_eof(self.position));
        }
        let byte = self.data[(self.position / 8) as usize];
        let shift = 7 - (self.position % 8) as u8;
        self.position += 1;
        Ok((byte >> shift) & 1 != 0)
    }

    /// Read `count` bits (0 to 64) as an integer, first bit most significant.
    pub fn read_bits(&mut self, count: u8) -> Result<u64> {
        if count > 64 {
            return Err(LzwHuffError::InvalidBitWidth(count));
        }
        if self.bits_remaining() < count as u64 {
            return Err(LzwHuffError::unexpected_eof(self.position));
        }

        let mut value = 0u64;
        let mut remaining = count;
        while remaining > 0 {
            let byte = self.data[(self.position / 8) as usize];
            let offset = (self.position % 8) as u8;
            let available = 8 - offset;
            let take = available.min(remaining);
            let shift = available - take;
            let bits = (byte as u64 >> shift) & ((1u64 << take) - 1);
            value = (value << take) | bits;
            self.position += take as u64;
            remaining -= take;
        }
        Ok(value)
    }
}

/// Pack `codes` at a fixed `width` (1 to 32 bits each).
///
/// Every code must fit in `width` bits.
pub fn pack_codes(codes: &[u32], width: u8, pad: PadBit) -> Result<PackedBits> {
    if width == 0 || width > 32 {
        return Err(LzwHuffError::InvalidBitWidth(width));
    }
    let total_bits = codes.len() as u64 * width as u64;
    let mut writer = BitWriter::with_capacity(total_bits.div_ceil(8) as usize);
    for &code in codes {
        if width < 32 && code >> width != 0 {
            return Err(LzwHuffError::InvalidBitWidth(width));
        }
        writer.write_bits(code as u64, width)?;
    }
    Ok(writer.finish(pad))
}

/// Unpack fixed-width codes.
///
/// With `count = None` every whole `width`-bit chunk is read and a shorter
/// tail is treated as padding. With an explicit count, exactly that many
/// codes are read.
pub fn unpack_codes(data: &[u8], width: u8, count: Option<usize>) -> Result<Vec<u32>> {
    if width == 0 || width > 32 {
        return Err(LzwHuffError::InvalidBitWidth(width));
    }
    let mut reader = BitReader::new(data);
    let count = count.unwrap_or((reader.bits_remaining() / width as u64) as usize);
    let mut codes = Vec::with_capacity(count);
    for _ in 0..count {
        codes.push(reader.read_bits(width)? as u32);
    }
    Ok(codes)
}
