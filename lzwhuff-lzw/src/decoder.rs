//! LZW decoder (decompression).
//!
//! The decoder rebuilds the encoder's dictionary from the code stream alone.
//! It runs one entry behind the encoder: the entry the encoder added after
//! emitting code `i` is added here while reading code `i + 1`, under the same
//! freeze condition, so both sides always agree on every code's meaning.

use crate::config::{LzwConfig, MIN_DICT_SIZE, bit_width_for};
use crate::dictionary::LzwDictionary;
use lzwhuff_core::bitstream::unpack_codes;
use lzwhuff_core::error::{LzwHuffError, Result};
use log::debug;

/// LZW decoder for decompression.
#[derive(Debug)]
pub struct LzwDecoder {
    /// Dictionary for code lookup.
    dict: LzwDictionary,
    /// Largest output a single decode may produce.
    output_limit: Option<usize>,
}

impl LzwDecoder {
    /// Create a new LZW decoder with the given configuration.
    pub fn new(config: LzwConfig) -> Result<Self> {
        let dict = LzwDictionary::new(config)?;
        Ok(Self {
            dict,
            output_limit: None,
        })
    }

    /// Cap the output of every decode at `limit` bytes.
    ///
    /// A chain of pending codes grows each entry by one byte, so a short
    /// code stream can expand quadratically. With a limit the decoder stops
    /// with [`LzwHuffError::OutputLimitExceeded`] before allocating past it.
    pub fn with_output_limit(mut self, limit: usize) -> Self {
        self.output_limit = Some(limit);
        self
    }

    /// Current output limit, if any.
    pub fn output_limit(&self) -> Option<usize> {
        self.output_limit
    }

    /// Decode a packed stream whose code count is implied by its length.
    ///
    /// The encoder pads at most 7 bits and codes are at least 8 bits wide,
    /// so `floor(total_bits / bit_width)` is always the exact code count and
    /// the padding can never be read as a code.
    pub fn decode(&mut self, input: &[u8], bit_width: u8) -> Result<Vec<u8>> {
        self.check_bit_width(bit_width)?;
        let codes = unpack_codes(input, bit_width, None)?;
        self.decode_codes(&codes)
    }

    /// Decode a packed stream holding exactly `code_count` codes.
    ///
    /// `input` must be exactly as long as `code_count` codes need.
    pub fn decode_exact(
        &mut self,
        input: &[u8],
        bit_width: u8,
        code_count: usize,
    ) -> Result<Vec<u8>> {
        self.check_bit_width(bit_width)?;

        let needed_bits = code_count as u64 * bit_width as u64;
        let available = input.len() as u64 * 8;
        if needed_bits.div_ceil(8) != input.len() as u64 {
            return Err(LzwHuffError::invalid_bit_length(needed_bits, available));
        }

        let codes = unpack_codes(input, bit_width, Some(code_count))?;
        self.decode_codes(&codes)
    }

    /// Decode a sequence of codes back into bytes.
    ///
    /// # Errors
    ///
    /// [`LzwHuffError::MalformedCode`] if a code names no entry and is not
    /// the one entry the encoder defined just before emitting it.
    pub fn decode_codes(&mut self, codes: &[u32]) -> Result<Vec<u8>> {
        self.dict.reset();

        let Some((&first, rest)) = codes.split_first() else {
            return Ok(Vec::new());
        };

        if first >= MIN_DICT_SIZE {
            return Err(LzwHuffError::malformed_code(first, 0, self.dict.next_code()));
        }
        let limit = self.output_limit.unwrap_or(usize::MAX);
        if limit == 0 {
            return Err(LzwHuffError::output_limit(limit, 1));
        }

        let mut output = Vec::with_capacity(codes.len().saturating_mul(2).min(limit));
        output.push(first as u8);
        let mut prev = first;

        for (i, &code) in rest.iter().enumerate() {
            let next_code = self.dict.next_code();

            // First byte of the entry `code` stands for. When `code` is the
            // entry about to be defined, that entry is `prev + first(prev)`.
            let first_byte = if code < next_code {
                self.dict.first_byte(code)
            } else if code == next_code && !self.dict.is_frozen() {
                self.dict.first_byte(prev)
            } else {
                None
            };
            let Some(first_byte) = first_byte else {
                return Err(LzwHuffError::malformed_code(code, i + 1, next_code));
            };

            self.dict.add_string_decode(prev, first_byte);

            let Some(len) = self.dict.string_len(code) else {
                return Err(LzwHuffError::malformed_code(code, i + 1, next_code));
            };
            let needed = output.len().saturating_add(len);
            if needed > limit {
                return Err(LzwHuffError::output_limit(limit, needed));
            }

            if !self.dict.append_string(code, &mut output) {
                return Err(LzwHuffError::malformed_code(code, i + 1, next_code));
            }
            prev = code;
        }

        debug!(
            "LZW decoded {} codes into {} bytes (dictionary {})",
            codes.len(),
            output.len(),
            self.dict.len()
        );

        Ok(output)
    }

    fn check_bit_width(&self, bit_width: u8) -> Result<()> {
        let min = bit_width_for(MIN_DICT_SIZE);
        let max = self.dict.config().max_bit_width();
        if bit_width < min || bit_width > max {
            return Err(LzwHuffError::InvalidBitWidth(bit_width));
        }
        Ok(())
    }

    /// Number of dictionary entries after the last decode.
    pub fn dictionary_len(&self) -> usize {
        self.dict.len()
    }

    /// Reset the decoder to initial state.
    pub fn reset(&mut self) {
        self.dict.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::LzwEncoder;

    #[test]
    fn test_decode_simple() {
        let config = LzwConfig::DEFAULT;
        let original = b"TOBEORNOTTOBEORTOBEORNOT";

        let mut encoder = LzwEncoder::new(config).unwrap();
        let stream = encoder.encode(original).unwrap();

        let mut decoder = LzwDecoder::new(config).unwrap();
        let decompressed = decoder.decode(&stream.data, stream.bit_width).unwrap();
        assert_eq!(decompressed, original);
    }

    #[test]
    fn test_decode_pending_code() {
        // "ABABABAB" emits 258 while the decoder has only defined up to 257
        let mut decoder = LzwDecoder::new(LzwConfig::new(260).unwrap()).unwrap();
        let decompressed = decoder.decode_codes(&[65, 66, 256, 258, 66]).unwrap();
        assert_eq!(decompressed, b"ABABABAB");
    }

    #[test]
    fn test_decode_exact_count() {
        let config = LzwConfig::DEFAULT;
        let original = b"ABABABABABABABABAB";

        let mut encoder = LzwEncoder::new(config).unwrap();
        let stream = encoder.encode(original).unwrap();

        let mut decoder = LzwDecoder::new(config).unwrap();
        let decompressed = decoder
            .decode_exact(&stream.data, stream.bit_width, stream.code_count)
            .unwrap();
        assert_eq!(decompressed, original);

        // A count that disagrees with the blob length is rejected
        assert!(matches!(
            decoder.decode_exact(&stream.data, stream.bit_width, stream.code_count + 5),
            Err(LzwHuffError::InvalidBitLength { .. })
        ));
    }

    #[test]
    fn test_decode_empty() {
        let mut decoder = LzwDecoder::new(LzwConfig::DEFAULT).unwrap();
        assert!(decoder.decode(&[], 8).unwrap().is_empty());
        assert!(decoder.decode_exact(&[], 8, 0).unwrap().is_empty());
    }

    #[test]
    fn test_malformed_first_code() {
        let mut decoder = LzwDecoder::new(LzwConfig::DEFAULT).unwrap();
        assert!(matches!(
            decoder.decode_codes(&[300]),
            Err(LzwHuffError::MalformedCode {
                code: 300,
                index: 0,
                ..
            })
        ));
    }

    #[test]
    fn test_malformed_code_beyond_next() {
        let mut decoder = LzwDecoder::new(LzwConfig::DEFAULT).unwrap();
        // After "A" the decoder is about to define 256; 257 cannot appear yet
        assert!(matches!(
            decoder.decode_codes(&[65, 257]),
            Err(LzwHuffError::MalformedCode {
                code: 257,
                index: 1,
                next_code: 256
            })
        ));
    }

    #[test]
    fn test_pending_code_rejected_when_frozen() {
        let mut decoder = LzwDecoder::new(LzwConfig::new(256).unwrap()).unwrap();
        assert!(matches!(
            decoder.decode_codes(&[65, 256]),
            Err(LzwHuffError::MalformedCode { code: 256, .. })
        ));
    }

    #[test]
    fn test_output_limit_stops_pending_chain() {
        // 65, 256, 257, ... each refer to the entry being defined, so entry
        // k is k + 2 bytes of 'A' and the output grows quadratically
        let codes: Vec<u32> = std::iter::once(65).chain(256..4096).collect();
        let mut decoder = LzwDecoder::new(LzwConfig::DEFAULT)
            .unwrap()
            .with_output_limit(1000);
        assert_eq!(decoder.output_limit(), Some(1000));

        match decoder.decode_codes(&codes) {
            Err(LzwHuffError::OutputLimitExceeded { limit, needed }) => {
                assert_eq!(limit, 1000);
                assert!(needed > 1000);
            }
            other => panic!("expected OutputLimitExceeded, got {:?}", other),
        }

        // The same chain fits when the limit allows it: 1 + 2 + ... + 5
        let mut decoder = LzwDecoder::new(LzwConfig::DEFAULT)
            .unwrap()
            .with_output_limit(15);
        assert_eq!(decoder.decode_codes(&codes[..5]).unwrap(), vec![b'A'; 15]);
    }

    #[test]
    fn test_output_limit_exact_fit() {
        let mut decoder = LzwDecoder::new(LzwConfig::DEFAULT)
            .unwrap()
            .with_output_limit(8);
        assert_eq!(
            decoder.decode_codes(&[65, 66, 256, 258, 66]).unwrap(),
            b"ABABABAB"
        );

        let mut decoder = LzwDecoder::new(LzwConfig::DEFAULT)
            .unwrap()
            .with_output_limit(7);
        assert!(matches!(
            decoder.decode_codes(&[65, 66, 256, 258, 66]),
            Err(LzwHuffError::OutputLimitExceeded {
                limit: 7,
                needed: 8
            })
        ));
    }

    #[test]
    fn test_invalid_bit_width() {
        let mut decoder = LzwDecoder::new(LzwConfig::DEFAULT).unwrap();
        assert!(matches!(
            decoder.decode(&[0, 0], 7),
            Err(LzwHuffError::InvalidBitWidth(7))
        ));
        assert!(matches!(
            decoder.decode(&[0, 0], 13),
            Err(LzwHuffError::InvalidBitWidth(13))
        ));
    }

    #[test]
    fn test_decode_all_same() {
        let config = LzwConfig::DEFAULT;
        let original = vec![b'X'; 500];

        let mut encoder = LzwEncoder::new(config).unwrap();
        let stream = encoder.encode(&original).unwrap();

        let mut decoder = LzwDecoder::new(config).unwrap();
        let decompressed = decoder.decode(&stream.data, stream.bit_width).unwrap();
        assert_eq!(decompressed, original);
        assert_eq!(decoder.dictionary_len(), stream.next_code as usize);
    }
}
