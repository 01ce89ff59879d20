//! LZW encoder (compression).

use crate::config::{LzwConfig, bit_width_for};
use crate::dictionary::LzwDictionary;
use lzwhuff_core::bitstream::{PadBit, pack_codes};
use lzwhuff_core::error::Result;
use log::debug;

/// Bit-packed output of [`LzwEncoder::encode`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LzwStream {
    /// Codes packed MSB-first at `bit_width` bits, last byte padded with 1-bits.
    pub data: Vec<u8>,
    /// Width of every code in the stream.
    pub bit_width: u8,
    /// Number of codes in the stream.
    pub code_count: usize,
    /// Dictionary size when encoding finished.
    pub next_code: u32,
}

/// LZW encoder for compression.
#[derive(Debug)]
pub struct LzwEncoder {
    /// Dictionary for string lookup.
    dict: LzwDictionary,
}

impl LzwEncoder {
    /// Create a new LZW encoder with the given configuration.
    pub fn new(config: LzwConfig) -> Result<Self> {
        let dict = LzwDictionary::new(config)?;
        Ok(Self { dict })
    }

    /// Encode `input` into a sequence of dictionary codes.
    ///
    /// # Algorithm
    ///
    /// 1. Start from the 256 single-byte entries
    /// 2. Extend the current match greedily while `match + byte` is known
    /// 3. On a miss, emit the code for the match, add `match + byte` unless
    ///    the dictionary is frozen, and restart the match at `byte`
    /// 4. Emit the code for the final pending match
    ///
    /// The dictionary is reset first, so every call starts from the same
    /// state. Empty input yields no codes.
    pub fn encode_codes(&mut self, input: &[u8]) -> Vec<u32> {
        self.dict.reset();

        let Some((&first, rest)) = input.split_first() else {
            return Vec::new();
        };

        let mut codes = Vec::with_capacity(input.len() / 2 + 1);
        let mut current = first as u32;

        for (offset, &byte) in rest.iter().enumerate() {
            if let Some(code) = self.dict.find(current, byte) {
                current = code;
                continue;
            }

            codes.push(current);
            if self.dict.add_string(current, byte).is_some() && self.dict.is_frozen() {
                debug!(
                    "LZW dictionary frozen at {} entries after {} input bytes",
                    self.dict.len(),
                    offset + 2
                );
            }
            current = byte as u32;
        }

        codes.push(current);
        codes
    }

    /// Encode `input` and pack the codes at a single fixed width.
    ///
    /// The width is `ceil(log2(next_code))` over the dictionary size at the
    /// end of encoding, so earlier codes are widened to match later ones.
    pub fn encode(&mut self, input: &[u8]) -> Result<LzwStream> {
        let codes = self.encode_codes(input);
        let next_code = self.dict.next_code();
        let bit_width = bit_width_for(next_code);
        let packed = pack_codes(&codes, bit_width, PadBit::One)?;

        debug!(
            "LZW encoded {} bytes into {} codes of {} bits ({} bytes, dictionary {}/{})",
            input.len(),
            codes.len(),
            bit_width,
            packed.bytes.len(),
            next_code,
            self.dict.config().max_dict_size
        );

        Ok(LzwStream {
            data: packed.bytes,
            bit_width,
            code_count: codes.len(),
            next_code,
        })
    }

    /// Code the next dictionary entry would receive.
    pub fn next_code(&self) -> u32 {
        self.dict.next_code()
    }

    /// Number of dictionary entries, initial alphabet included.
    pub fn dictionary_len(&self) -> usize {
        self.dict.len()
    }

    /// True if the last encode filled the dictionary.
    pub fn is_frozen(&self) -> bool {
        self.dict.is_frozen()
    }

    /// Reset the encoder to initial state.
    pub fn reset(&mut self) {
        self.dict.reset();
    }
}
