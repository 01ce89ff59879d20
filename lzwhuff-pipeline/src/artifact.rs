//! Artifact container: header parsing, validation and writing.
//!
//! An artifact is a fixed header, a frequency table, and the payload. Every
//! parameter the decoder needs travels in the header, so an artifact can be
//! decoded by a process that never saw the original input.
//!
//! ```text
//! magic "LZWH" | version | method | max_dict_size u32 | bit_width u8
//! code_count u64 | lzw_len u64 | original_len u64 | crc32 u32
//! payload_bits u64 | symbol_count u16 | (symbol u8, count u64) * n
//! payload
//! ```
//!
//! All integers are little-endian.

use lzwhuff_core::error::{LzwHuffError, Result};
use lzwhuff_huffman::FrequencyTable;
use lzwhuff_lzw::{INITIAL_CODES, LzwConfig, bit_width_for};
use serde::Serialize;
use std::fmt;
use std::io::{Cursor, Read, Write};

/// Artifact magic bytes.
pub const ARTIFACT_MAGIC: [u8; 4] = *b"LZWH";

/// Current artifact format version.
pub const ARTIFACT_VERSION: u8 = 1;

/// Size of the header before the frequency table.
pub const FIXED_HEADER_LEN: usize = 49;

/// Size of one frequency table entry.
pub const FREQUENCY_ENTRY_LEN: usize = 9;

/// Which stages produced the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Method {
    /// LZW only; the payload is the packed code stream.
    Lzw,
    /// LZW followed by Huffman coding of the packed code stream.
    #[default]
    LzwHuffman,
}

impl Method {
    /// Byte stored in the header.
    pub fn to_byte(self) -> u8 {
        match self {
            Method::Lzw => 0,
            Method::LzwHuffman => 1,
        }
    }

    /// Parse the header byte.
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            0 => Some(Method::Lzw),
            1 => Some(Method::LzwHuffman),
            _ => None,
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Method::Lzw => write!(f, "LZW"),
            Method::LzwHuffman => write!(f, "LZW + Huffman"),
        }
    }
}

/// Artifact header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactHeader {
    /// Stages applied.
    pub method: Method,
    /// LZW dictionary bound.
    pub max_dict_size: u32,
    /// Width of every LZW code.
    pub lzw_bit_width: u8,
    /// Number of LZW codes.
    pub code_count: u64,
    /// Length of the packed LZW stream in bytes.
    pub lzw_len: u64,
    /// Length of the original input.
    pub original_len: u64,
    /// CRC-32 of the original input.
    pub crc32: u32,
    /// Meaningful bits in the payload.
    pub payload_bits: u64,
    /// Byte frequencies of the packed LZW stream (empty for [`Method::Lzw`]).
    pub frequencies: FrequencyTable,
}

impl ArtifactHeader {
    /// Payload size in bytes.
    pub fn payload_len(&self) -> u64 {
        self.payload_bits.div_ceil(8)
    }

    /// Encoded size of this header.
    pub fn encoded_len(&self) -> usize {
        FIXED_HEADER_LEN + self.frequencies.distinct() * FREQUENCY_ENTRY_LEN
    }

    /// Dictionary configuration recorded in the header.
    pub fn lzw_config(&self) -> Result<LzwConfig> {
        LzwConfig::new(self.max_dict_size).map_err(|_| {
            LzwHuffError::invalid_header(format!(
                "dictionary size {} out of range",
                self.max_dict_size
            ))
        })
    }

    /// Check that every field is consistent with the others.
    pub fn validate(&self) -> Result<()> {
        self.lzw_config()?;

        if (self.original_len == 0) != (self.code_count == 0) || self.code_count > self.original_len
        {
            return Err(LzwHuffError::invalid_header(format!(
                "{} codes cannot encode {} bytes",
                self.code_count, self.original_len
            )));
        }

        // Each code except the last added one entry until the bound was hit
        let next_code = if self.code_count == 0 {
            INITIAL_CODES
        } else {
            let grown = (INITIAL_CODES as u64).saturating_add(self.code_count - 1);
            grown.min(self.max_dict_size as u64) as u32
        };
        let expected_width = bit_width_for(next_code);
        if self.lzw_bit_width != expected_width {
            return Err(LzwHuffError::invalid_header(format!(
                "bit width {} does not match {} codes (expected {})",
                self.lzw_bit_width, self.code_count, expected_width
            )));
        }

        let lzw_bits = self
            .code_count
            .checked_mul(self.lzw_bit_width as u64)
            .ok_or_else(|| LzwHuffError::invalid_header("code count overflows"))?;
        if lzw_bits.div_ceil(8) != self.lzw_len {
            return Err(LzwHuffError::invalid_header(format!(
                "LZW length {} does not hold {} codes of {} bits",
                self.lzw_len, self.code_count, self.lzw_bit_width
            )));
        }

        match self.method {
            Method::Lzw => {
                if !self.frequencies.is_empty() {
                    return Err(LzwHuffError::invalid_header(
                        "LZW-only artifact carries a frequency table",
                    ));
                }
                if self.lzw_len.checked_mul(8) != Some(self.payload_bits) {
                    return Err(LzwHuffError::invalid_header(format!(
                        "payload of {} bits does not match LZW length {}",
                        self.payload_bits, self.lzw_len
                    )));
                }
            }
            Method::LzwHuffman => {
                let total = self
                    .frequencies
                    .total()
                    .ok_or_else(|| LzwHuffError::invalid_header("frequency counts overflow"))?;
                if total != self.lzw_len {
                    return Err(LzwHuffError::invalid_header(format!(
                        "frequencies sum to {}, LZW length is {}",
                        total, self.lzw_len
                    )));
                }
                if (self.payload_bits == 0) != (self.lzw_len == 0) {
                    return Err(LzwHuffError::invalid_header(format!(
                        "payload of {} bits for {} LZW bytes",
                        self.payload_bits, self.lzw_len
                    )));
                }
            }
        }

        Ok(())
    }

    /// Write the header to a writer.
    pub fn write<W: Write>(&self, writer: &mut W) -> Result<()> {
        writer.write_all(&ARTIFACT_MAGIC)?;
        writer.write_all(&[ARTIFACT_VERSION, self.method.to_byte()])?;
        writer.write_all(&self.max_dict_size.to_le_bytes())?;
        writer.write_all(&[self.lzw_bit_width])?;
        writer.write_all(&self.code_count.to_le_bytes())?;
        writer.write_all(&self.lzw_len.to_le_bytes())?;
        writer.write_all(&self.original_len.to_le_bytes())?;
        writer.write_all(&self.crc32.to_le_bytes())?;
        writer.write_all(&self.payload_bits.to_le_bytes())?;

        // At most 256 distinct byte values
        let symbol_count = self.frequencies.distinct() as u16;
        writer.write_all(&symbol_count.to_le_bytes())?;
        for (symbol, count) in self.frequencies.iter() {
            writer.write_all(&[symbol])?;
            writer.write_all(&count.to_le_bytes())?;
        }

        Ok(())
    }

    /// Read and validate a header from a reader.
    pub fn read<R: Read>(reader: &mut R) -> Result<Self> {
        let mut buf = [0u8; FIXED_HEADER_LEN];
        reader.read_exact(&mut buf)?;

        if buf[0..4] != ARTIFACT_MAGIC {
            return Err(LzwHuffError::invalid_magic(
                ARTIFACT_MAGIC.to_vec(),
                buf[0..4].to_vec(),
            ));
        }

        let version = buf[4];
        if version != ARTIFACT_VERSION {
            return Err(LzwHuffError::UnsupportedVersion(version));
        }

        let method = Method::from_byte(buf[5])
            .ok_or_else(|| LzwHuffError::invalid_header(format!("unknown method {}", buf[5])))?;

        let max_dict_size = u32::from_le_bytes([buf[6], buf[7], buf[8], buf[9]]);
        let lzw_bit_width = buf[10];
        let code_count = read_u64(&buf[11..19]);
        let lzw_len = read_u64(&buf[19..27]);
        let original_len = read_u64(&buf[27..35]);
        let crc32 = u32::from_le_bytes([buf[35], buf[36], buf[37], buf[38]]);
        let payload_bits = read_u64(&buf[39..47]);
        let symbol_count = u16::from_le_bytes([buf[47], buf[48]]) as usize;

        if symbol_count > lzwhuff_huffman::ALPHABET_SIZE {
            return Err(LzwHuffError::invalid_header(format!(
                "{} frequency entries",
                symbol_count
            )));
        }

        let mut frequencies = FrequencyTable::new();
        let mut previous: Option<u8> = None;
        let mut entry = [0u8; FREQUENCY_ENTRY_LEN];
        for _ in 0..symbol_count {
            reader.read_exact(&mut entry)?;
            let symbol = entry[0];
            let count = read_u64(&entry[1..]);

            if previous.is_some_and(|p| symbol <= p) {
                return Err(LzwHuffError::invalid_header(format!(
                    "frequency entry {:#04x} out of order",
                    symbol
                )));
            }
            if count == 0 {
                return Err(LzwHuffError::invalid_header(format!(
                    "zero count for symbol {:#04x}",
                    symbol
                )));
            }
            frequencies.add_count(symbol, count);
            previous = Some(symbol);
        }

        let header = Self {
            method,
            max_dict_size,
            lzw_bit_width,
            code_count,
            lzw_len,
            original_len,
            crc32,
            payload_bits,
            frequencies,
        };
        header.validate()?;
        Ok(header)
    }
}

fn read_u64(bytes: &[u8]) -> u64 {
    let mut buf = [0u8; 8];
    buf.copy_from_slice(&bytes[..8]);
    u64::from_le_bytes(buf)
}

/// A complete compressed artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    /// Decode parameters.
    pub header: ArtifactHeader,
    /// Compressed data.
    pub payload: Vec<u8>,
}

impl Artifact {
    /// Total encoded size in bytes.
    pub fn encoded_len(&self) -> usize {
        self.header.encoded_len() + self.payload.len()
    }

    /// Write header and payload.
    pub fn write<W: Write>(&self, writer: &mut W) -> Result<()> {
        self.header.write(writer)?;
        writer.write_all(&self.payload)?;
        Ok(())
    }

    /// Read an artifact, consuming exactly the bytes it occupies.
    pub fn read<R: Read>(reader: &mut R) -> Result<Self> {
        let header = ArtifactHeader::read(reader)?;
        let expected = header.payload_len();

        let mut payload = Vec::new();
        reader.take(expected).read_to_end(&mut payload)?;
        if payload.len() as u64 != expected {
            return Err(LzwHuffError::invalid_header(format!(
                "payload truncated: {} of {} bytes",
                payload.len(),
                expected
            )));
        }

        Ok(Self { header, payload })
    }

    /// Serialize to a byte vector.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut out = Vec::with_capacity(self.encoded_len());
        self.write(&mut out)?;
        Ok(out)
    }

    /// Parse a byte slice holding exactly one artifact.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let mut cursor = Cursor::new(data);
        let artifact = Self::read(&mut cursor)?;
        let trailing = data.len() as u64 - cursor.position();
        if trailing != 0 {
            return Err(LzwHuffError::invalid_header(format!(
                "{} trailing bytes after payload",
                trailing
            )));
        }
        Ok(artifact)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_header() -> ArtifactHeader {
        // Three 9-bit codes: 27 bits in 4 bytes
        let frequencies: FrequencyTable = [(0x00, 1), (0x41, 2), (0xFF, 1)].into_iter().collect();
        ArtifactHeader {
            method: Method::LzwHuffman,
            max_dict_size: 4096,
            lzw_bit_width: 9,
            code_count: 3,
            lzw_len: 4,
            original_len: 4,
            crc32: 0xDEADBEEF,
            payload_bits: 6,
            frequencies,
        }
    }

    #[test]
    fn test_method_byte() {
        for method in [Method::Lzw, Method::LzwHuffman] {
            assert_eq!(Method::from_byte(method.to_byte()), Some(method));
        }
        assert_eq!(Method::from_byte(2), None);
        assert_eq!(Method::LzwHuffman.to_string(), "LZW + Huffman");
    }

    #[test]
    fn test_header_layout() {
        let header = sample_header();
        let mut out = Vec::new();
        header.write(&mut out).unwrap();

        assert_eq!(out.len(), FIXED_HEADER_LEN + 3 * FREQUENCY_ENTRY_LEN);
        assert_eq!(out.len(), header.encoded_len());
        assert_eq!(&out[0..4], b"LZWH");
        assert_eq!(out[4], ARTIFACT_VERSION);
        assert_eq!(out[5], 1);
        assert_eq!(&out[6..10], &4096u32.to_le_bytes());
        assert_eq!(out[10], 9);
        assert_eq!(&out[35..39], &0xDEADBEEFu32.to_le_bytes());
        assert_eq!(&out[47..49], &3u16.to_le_bytes());
        assert_eq!(out[49], 0x00);
        assert_eq!(out[58], 0x41);
        assert_eq!(&out[59..67], &2u64.to_le_bytes());

        let parsed = ArtifactHeader::read(&mut Cursor::new(&out)).unwrap();
        assert_eq!(parsed, header);
    }

    #[test]
    fn test_invalid_magic() {
        let mut out = Vec::new();
        sample_header().write(&mut out).unwrap();
        out[0] = b'X';
        assert!(matches!(
            ArtifactHeader::read(&mut Cursor::new(&out)),
            Err(LzwHuffError::InvalidMagic { .. })
        ));
    }

    #[test]
    fn test_unsupported_version() {
        let mut out = Vec::new();
        sample_header().write(&mut out).unwrap();
        out[4] = 9;
        assert!(matches!(
            ArtifactHeader::read(&mut Cursor::new(&out)),
            Err(LzwHuffError::UnsupportedVersion(9))
        ));
    }

    #[test]
    fn test_unknown_method() {
        let mut out = Vec::new();
        sample_header().write(&mut out).unwrap();
        out[5] = 7;
        assert!(matches!(
            ArtifactHeader::read(&mut Cursor::new(&out)),
            Err(LzwHuffError::InvalidHeader { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_inconsistent_fields() {
        let mut header = sample_header();
        header.max_dict_size = 100;
        assert!(header.validate().is_err());

        let mut header = sample_header();
        header.lzw_bit_width = 12;
        assert!(header.validate().is_err());

        let mut header = sample_header();
        header.lzw_len = 5;
        assert!(header.validate().is_err());

        let mut header = sample_header();
        header.frequencies.add(0x10);
        assert!(header.validate().is_err());

        let mut header = sample_header();
        header.method = Method::Lzw;
        assert!(header.validate().is_err());

        let mut header = sample_header();
        header.original_len = 0;
        assert!(header.validate().is_err());
    }

    #[test]
    fn test_unordered_frequency_entries() {
        let mut out = Vec::new();
        sample_header().write(&mut out).unwrap();
        // Swap the first two entries
        let (first, second) = (49, 58);
        for i in 0..FREQUENCY_ENTRY_LEN {
            out.swap(first + i, second + i);
        }
        assert!(matches!(
            ArtifactHeader::read(&mut Cursor::new(&out)),
            Err(LzwHuffError::InvalidHeader { .. })
        ));
    }

    #[test]
    fn test_overflowing_frequency_counts() {
        // Both counts exceed 2^63; their wrapped sum equals lzw_len
        let mut header = sample_header();
        header.frequencies = [(0x41, (1u64 << 63) + 2), (0x42, (1u64 << 63) + 2)]
            .into_iter()
            .collect();
        let mut out = Vec::new();
        header.write(&mut out).unwrap();

        match ArtifactHeader::read(&mut Cursor::new(&out)) {
            Err(LzwHuffError::InvalidHeader { message }) => {
                assert!(message.contains("overflow"), "{}", message)
            }
            other => panic!("expected InvalidHeader, got {:?}", other),
        }

        header.frequencies = [(1, 1u64 << 63), (2, 1u64 << 63)].into_iter().collect();
        assert!(matches!(
            header.validate(),
            Err(LzwHuffError::InvalidHeader { .. })
        ));
    }

    #[test]
    fn test_zero_frequency_entry() {
        let mut out = Vec::new();
        sample_header().write(&mut out).unwrap();
        out[50..58].copy_from_slice(&0u64.to_le_bytes());
        assert!(matches!(
            ArtifactHeader::read(&mut Cursor::new(&out)),
            Err(LzwHuffError::InvalidHeader { .. })
        ));
    }

    #[test]
    fn test_artifact_bytes() {
        let artifact = Artifact {
            header: sample_header(),
            payload: vec![0b1011_0000],
        };
        let bytes = artifact.to_bytes().unwrap();
        assert_eq!(bytes.len(), artifact.encoded_len());
        assert_eq!(Artifact::from_bytes(&bytes).unwrap(), artifact);

        let mut trailing = bytes.clone();
        trailing.push(0);
        assert!(matches!(
            Artifact::from_bytes(&trailing),
            Err(LzwHuffError::InvalidHeader { .. })
        ));

        assert!(matches!(
            Artifact::from_bytes(&bytes[..bytes.len() - 1]),
            Err(LzwHuffError::InvalidHeader { .. })
        ));
    }

    #[test]
    fn test_truncated_header() {
        let mut out = Vec::new();
        sample_header().write(&mut out).unwrap();
        assert!(matches!(
            ArtifactHeader::read(&mut Cursor::new(&out[..20])),
            Err(LzwHuffError::Io(_))
        ));
    }
}
