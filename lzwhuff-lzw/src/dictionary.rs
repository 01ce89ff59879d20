//! LZW dictionary (code table) management.
//!
//! Every entry past the initial alphabet is stored as `(prefix code, byte)`:
//! the sequence of an entry is the sequence of its prefix followed by one
//! byte. This keeps each entry constant-size while describing exactly the
//! same sequence-to-code mapping as a table of full byte strings.

use crate::config::{INITIAL_CODES, LzwConfig};
use lzwhuff_core::error::Result;
use std::collections::HashMap;

/// Prefix marker for the single-byte entries.
const NO_PREFIX: u32 = u32::MAX;

#[derive(Debug, Clone, Copy)]
struct Entry {
    /// Code of the sequence without its last byte.
    prefix: u32,
    /// Last byte of the sequence.
    byte: u8,
    /// First byte of the sequence.
    first: u8,
    /// Sequence length in bytes.
    len: u32,
}

/// LZW dictionary for encoding and decoding.
///
/// The table maps codes to sequences. The encoder also keeps a reverse
/// lookup from `(prefix, byte)` to code.
#[derive(Debug)]
pub struct LzwDictionary {
    /// Code table, indexed by code.
    entries: Vec<Entry>,
    /// Reverse lookup: (prefix code, next byte) -> code (for encoding only).
    reverse: HashMap<(u32, u8), u32>,
    /// Configuration.
    config: LzwConfig,
}

impl LzwDictionary {
    /// Create a new dictionary holding the 256 single-byte entries.
    pub fn new(config: LzwConfig) -> Result<Self> {
        config.validate()?;

        let mut dict = Self {
            entries: Vec::with_capacity(INITIAL_CODES as usize),
            reverse: HashMap::new(),
            config,
        };
        dict.reset();
        Ok(dict)
    }

    /// Reset the dictionary to its initial state.
    pub fn reset(&mut self) {
        self.entries.clear();
        self.reverse.clear();
        self.entries.extend((0..INITIAL_CODES).map(|i| Entry {
            prefix: NO_PREFIX,
            byte: i as u8,
            first: i as u8,
            len: 1,
        }));
    }

    /// Find the code for `prefix` extended by `byte` (for encoding).
    #[inline]
    pub fn find(&self, prefix: u32, byte: u8) -> Option<u32> {
        self.reverse.get(&(prefix, byte)).copied()
    }

    /// Add `prefix + byte` to the dictionary (for encoding).
    ///
    /// Returns the assigned code, or `None` when the dictionary is frozen.
    pub fn add_string(&mut self, prefix: u32, byte: u8) -> Option<u32> {
        let code = self.push_entry(prefix, byte)?;
        self.reverse.insert((prefix, byte), code);
        Some(code)
    }

    /// Add `prefix + byte` to the dictionary (for decoding).
    ///
    /// Same as [`add_string`](Self::add_string) without maintaining the
    /// reverse map, which the decoder never consults.
    pub fn add_string_decode(&mut self, prefix: u32, byte: u8) -> Option<u32> {
        self.push_entry(prefix, byte)
    }

    fn push_entry(&mut self, prefix: u32, byte: u8) -> Option<u32> {
        if self.is_frozen() {
            return None;
        }
        let parent = *self.entries.get(prefix as usize)?;
        let code = self.next_code();
        self.entries.push(Entry {
            prefix,
            byte,
            first: parent.first,
            len: parent.len + 1,
        });
        Some(code)
    }

    /// True if `code` has an entry.
    #[inline]
    pub fn contains(&self, code: u32) -> bool {
        (code as usize) < self.entries.len()
    }

    /// First byte of the sequence for `code`.
    #[inline]
    pub fn first_byte(&self, code: u32) -> Option<u8> {
        self.entries.get(code as usize).map(|e| e.first)
    }

    /// Length of the sequence for `code`.
    pub fn string_len(&self, code: u32) -> Option<usize> {
        self.entries.get(code as usize).map(|e| e.len as usize)
    }

    /// Append the sequence for `code` to `out`.
    ///
    /// Returns `false` (leaving `out` untouched) if `code` has no entry.
    pub fn append_string(&self, code: u32, out: &mut Vec<u8>) -> bool {
        let Some(entry) = self.entries.get(code as usize) else {
            return false;
        };
        let start = out.len();
        out.resize(start + entry.len as usize, 0);

        let mut pos = out.len();
        let mut current = *entry;
        loop {
            pos -= 1;
            out[pos] = current.byte;
            if current.prefix == NO_PREFIX {
                break;
            }
            current = self.entries[current.prefix as usize];
        }
        debug_assert_eq!(pos, start);
        true
    }

    /// The full sequence for `code`.
    pub fn get_string(&self, code: u32) -> Option<Vec<u8>> {
        let mut out = Vec::new();
        self.append_string(code, &mut out).then_some(out)
    }

    /// Number of entries, initial alphabet included.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false: the initial alphabet is never removed.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Code that the next added entry will receive.
    #[inline]
    pub fn next_code(&self) -> u32 {
        self.entries.len() as u32
    }

    /// True once the dictionary has reached its bound.
    #[inline]
    pub fn is_frozen(&self) -> bool {
        self.next_code() >= self.config.max_dict_size
    }

    /// Get the configuration.
    pub fn config(&self) -> &LzwConfig {
        &self.config
    }
}
