//! CRC-32 (ISO 3309 / ITU-T V.42) checksum of artifact inputs.
//!
//! ```
//! use lzwhuff_core::crc::Crc32;
//!
//! let mut crc = Crc32::new();
//! crc.update(b"Hello, ");
//! crc.update(b"World!");
//! assert_eq!(crc.bytes_hashed(), 13);
//! assert_eq!(crc.value(), Crc32::compute(b"Hello, World!"));
//! ```

/// Reflected form of the generator polynomial 0x04C11DB7.
const POLYNOMIAL: u32 = 0xEDB8_8320;

const TABLE: [u32; 256] = build_table();

const fn build_table() -> [u32; 256] {
    let mut table = [0u32; 256];
    let mut n = 0;
    while n < 256 {
        let mut value = n as u32;
        let mut bit = 0;
        while bit < 8 {
            let lsb = value & 1;
            value >>= 1;
            if lsb == 1 {
                value ^= POLYNOMIAL;
            }
            bit += 1;
        }
        table[n] = value;
        n += 1;
    }
    table
}

/// Running CRC-32 over any number of slices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Crc32 {
    state: u32,
    bytes: u64,
}

impl Crc32 {
    /// Start a new checksum.
    pub const fn new() -> Self {
        Self {
            state: u32::MAX,
            bytes: 0,
        }
    }

    /// Feed more bytes.
    pub fn update(&mut self, data: &[u8]) {
        self.state = data.iter().fold(self.state, |state, &byte| {
            TABLE[((state as u8) ^ byte) as usize] ^ (state >> 8)
        });
        self.bytes += data.len() as u64;
    }

    /// Checksum of everything fed so far.
    pub fn value(&self) -> u32 {
        !self.state
    }

    /// Number of bytes fed so far.
    pub fn bytes_hashed(&self) -> u64 {
        self.bytes
    }

    /// Checksum of a single slice.
    pub fn compute(data: &[u8]) -> u32 {
        let mut crc = Self::new();
        crc.update(data);
        crc.value()
    }
}

impl Default for Crc32 {
    fn default() -> Self {
        Self::new()
    }
}
