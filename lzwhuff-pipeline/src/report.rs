//! Compression statistics.

use crate::artifact::Method;
use serde::Serialize;
use std::fmt;

/// Size comparison for one method.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StageReport {
    /// Stages measured.
    pub method: Method,
    /// Input size in bits.
    pub original_bits: u64,
    /// Stored payload size in bits (whole bytes, header excluded).
    pub compressed_bits: u64,
    /// `original_bits / compressed_bits`, absent when nothing was stored.
    pub ratio: Option<f64>,
}

impl StageReport {
    /// Build a report from byte sizes.
    pub fn new(method: Method, original_len: u64, payload_len: u64) -> Self {
        let original_bits = original_len * 8;
        let compressed_bits = payload_len * 8;
        let ratio = (compressed_bits > 0).then(|| original_bits as f64 / compressed_bits as f64);
        Self {
            method,
            original_bits,
            compressed_bits,
            ratio,
        }
    }

    /// Fraction of the input saved, e.g. `0.75` for a 4:1 ratio.
    pub fn space_saving(&self) -> Option<f64> {
        self.ratio.map(|r| 1.0 - 1.0 / r)
    }
}

/// Results of a verified compression run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompressionReport {
    /// Name of the input, if it came from a file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    /// LZW dictionary bound.
    pub max_dict_size: u32,
    /// Width of every LZW code.
    pub bit_width: u8,
    /// Number of LZW codes.
    pub code_count: u64,
    /// LZW stage alone.
    pub lzw: StageReport,
    /// LZW followed by Huffman.
    pub lzw_huffman: StageReport,
    /// True once both stages decoded back to the input.
    pub verified: bool,
}

impl CompressionReport {
    /// Attach the input's name.
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Report for the given method.
    pub fn stage(&self, method: Method) -> &StageReport {
        match method {
            Method::Lzw => &self.lzw,
            Method::LzwHuffman => &self.lzw_huffman,
        }
    }
}

impl fmt::Display for CompressionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for stage in [&self.lzw, &self.lzw_huffman] {
            if let Some(source) = &self.source {
                writeln!(f, "File: {}", source)?;
            }
            writeln!(f, "max_dict_size: {}", self.max_dict_size)?;
            writeln!(
                f,
                "Size before ({}): {} bits",
                stage.method, stage.original_bits
            )?;
            writeln!(
                f,
                "Size after ({}): {} bits",
                stage.method, stage.compressed_bits
            )?;
            match stage.ratio {
                Some(ratio) => writeln!(f, "Compression Ratio ({}): {:.4}", stage.method, ratio)?,
                None => writeln!(f, "Compression Ratio ({}): n/a", stage.method)?,
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> CompressionReport {
        CompressionReport {
            source: None,
            max_dict_size: 4096,
            bit_width: 12,
            code_count: 100,
            lzw: StageReport::new(Method::Lzw, 1000, 150),
            lzw_huffman: StageReport::new(Method::LzwHuffman, 1000, 125),
            verified: true,
        }
    }

    #[test]
    fn test_ratio() {
        let stage = StageReport::new(Method::Lzw, 1000, 250);
        assert_eq!(stage.original_bits, 8000);
        assert_eq!(stage.compressed_bits, 2000);
        assert_eq!(stage.ratio, Some(4.0));
        assert_eq!(stage.space_saving(), Some(0.75));
    }

    #[test]
    fn test_ratio_empty() {
        let stage = StageReport::new(Method::LzwHuffman, 0, 0);
        assert_eq!(stage.ratio, None);
        assert_eq!(stage.space_saving(), None);
    }

    #[test]
    fn test_display_block() {
        let text = sample().with_source("wiki_sample.txt").to_string();
        let expected = "File: wiki_sample.txt\n\
                        max_dict_size: 4096\n\
                        Size before (LZW): 8000 bits\n\
                        Size after (LZW): 1200 bits\n\
                        Compression Ratio (LZW): 6.6667\n\
                        \n\
                        File: wiki_sample.txt\n\
                        max_dict_size: 4096\n\
                        Size before (LZW + Huffman): 8000 bits\n\
                        Size after (LZW + Huffman): 1000 bits\n\
                        Compression Ratio (LZW + Huffman): 8.0000\n\
                        \n";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_serialize() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["max_dict_size"], 4096);
        assert_eq!(json["lzw"]["method"], "lzw");
        assert_eq!(json["lzw_huffman"]["method"], "lzw-huffman");
        assert_eq!(json["lzw_huffman"]["ratio"], 8.0);
        assert!(json.get("source").is_none());

        let empty = StageReport::new(Method::Lzw, 0, 0);
        assert!(serde_json::to_value(empty).unwrap()["ratio"].is_null());
    }
}
