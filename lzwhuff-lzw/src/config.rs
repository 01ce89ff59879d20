//! LZW dictionary bound and code-width arithmetic.

use lzwhuff_core::error::{LzwHuffError, Result};

/// Number of single-byte entries every dictionary starts with.
pub const INITIAL_CODES: u32 = 256;

/// Smallest accepted dictionary bound (the initial alphabet alone).
pub const MIN_DICT_SIZE: u32 = INITIAL_CODES;

/// Largest accepted dictionary bound (24-bit codes).
pub const MAX_DICT_SIZE: u32 = 1 << 24;

/// Default dictionary bound (12-bit codes).
pub const DEFAULT_DICT_SIZE: u32 = 1 << 12;

/// LZW configuration parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LzwConfig {
    /// Upper bound on dictionary entries, initial alphabet included.
    ///
    /// Once the dictionary holds this many entries it is frozen: encoding
    /// continues with the existing entries and nothing new is added.
    pub max_dict_size: u32,
}

impl LzwConfig {
    /// Default configuration: 4096 entries.
    pub const DEFAULT: Self = Self {
        max_dict_size: DEFAULT_DICT_SIZE,
    };

    /// Create a configuration, validating the dictionary bound.
    pub fn new(max_dict_size: u32) -> Result<Self> {
        let config = Self { max_dict_size };
        config.validate()?;
        Ok(config)
    }

    /// Check that the dictionary bound is within `256..=2^24`.
    pub fn validate(&self) -> Result<()> {
        if !(MIN_DICT_SIZE..=MAX_DICT_SIZE).contains(&self.max_dict_size) {
            return Err(LzwHuffError::invalid_dict_size(
                self.max_dict_size,
                MIN_DICT_SIZE,
                MAX_DICT_SIZE,
            ));
        }
        Ok(())
    }

    /// Widest code a stream produced under this bound can use.
    pub fn max_bit_width(&self) -> u8 {
        bit_width_for(self.max_dict_size)
    }
}

impl Default for LzwConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// `ceil(log2(next_code))`: the width needed for every code below `next_code`.
pub fn bit_width_for(next_code: u32) -> u8 {
    if next_code <= 1 {
        return 0;
    }
    (u32::BITS - (next_code - 1).leading_zeros()) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = LzwConfig::default();
        assert_eq!(config.max_dict_size, 4096);
        assert_eq!(config.max_bit_width(), 12);
    }

    #[test]
    fn test_bounds() {
        assert!(LzwConfig::new(256).is_ok());
        assert!(LzwConfig::new(MAX_DICT_SIZE).is_ok());
        assert!(matches!(
            LzwConfig::new(255),
            Err(LzwHuffError::InvalidDictSize { size: 255, .. })
        ));
        assert!(LzwConfig::new(MAX_DICT_SIZE + 1).is_err());
    }

    #[test]
    fn test_bit_width_for() {
        assert_eq!(bit_width_for(256), 8);
        assert_eq!(bit_width_for(257), 9);
        assert_eq!(bit_width_for(260), 9);
        assert_eq!(bit_width_for(512), 9);
        assert_eq!(bit_width_for(513), 10);
        assert_eq!(bit_width_for(4096), 12);
        assert_eq!(bit_width_for(MAX_DICT_SIZE), 24);
    }
}
