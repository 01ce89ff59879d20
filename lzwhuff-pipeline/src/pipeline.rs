//! LZW → Huffman orchestration.

use crate::artifact::{Artifact, ArtifactHeader, Method};
use crate::report::{CompressionReport, StageReport};
use lzwhuff_core::Crc32;
use lzwhuff_core::error::{LzwHuffError, Result};
use lzwhuff_huffman::{FrequencyTable, HuffmanTree};
use lzwhuff_lzw::{LzwConfig, LzwDecoder, LzwEncoder, LzwStream};
use log::{debug, info};
use std::borrow::Cow;

/// Pipeline configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PipelineConfig {
    /// Stages to apply.
    pub method: Method,
    /// LZW dictionary bound.
    pub lzw: LzwConfig,
}

impl PipelineConfig {
    /// Create a configuration, validating the dictionary bound.
    pub fn new(max_dict_size: u32, method: Method) -> Result<Self> {
        Ok(Self {
            method,
            lzw: LzwConfig::new(max_dict_size)?,
        })
    }

    /// Same configuration with a different method.
    pub fn with_method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    /// LZW dictionary bound.
    pub fn max_dict_size(&self) -> u32 {
        self.lzw.max_dict_size
    }
}

/// Compress `raw` into a self-describing artifact.
pub fn compress(raw: &[u8], config: &PipelineConfig) -> Result<Artifact> {
    let lzw = encode_lzw(raw, config)?;
    assemble(raw, &lzw, config, Crc32::compute(raw))
}

/// Decode an artifact and check the result against its header.
///
/// # Errors
///
/// Any decoding error from either stage, [`LzwHuffError::InvalidHeader`]
/// if the header is inconsistent, [`LzwHuffError::OutputLimitExceeded`] as
/// soon as LZW decoding would pass the recorded length,
/// [`LzwHuffError::RoundTripMismatch`] if the output comes up short, and
/// [`LzwHuffError::ChecksumMismatch`] if the CRC does not match.
pub fn decompress(artifact: &Artifact) -> Result<Vec<u8>> {
    let header = &artifact.header;
    header.validate()?;
    if artifact.payload.len() as u64 != header.payload_len() {
        return Err(LzwHuffError::invalid_header(format!(
            "payload is {} bytes, header declares {} bits",
            artifact.payload.len(),
            header.payload_bits
        )));
    }

    let lzw_bytes: Cow<'_, [u8]> = match header.method {
        Method::Lzw => Cow::Borrowed(artifact.payload.as_slice()),
        Method::LzwHuffman => Cow::Owned(lzwhuff_huffman::decompress(
            &artifact.payload,
            header.payload_bits,
            &header.frequencies,
        )?),
    };
    if lzw_bytes.len() as u64 != header.lzw_len {
        return Err(LzwHuffError::invalid_header(format!(
            "Huffman stage produced {} bytes, header declares {}",
            lzw_bytes.len(),
            header.lzw_len
        )));
    }

    // A well-formed stream never expands past the declared length
    let limit = usize::try_from(header.original_len).unwrap_or(usize::MAX);
    let mut decoder = LzwDecoder::new(header.lzw_config()?)?.with_output_limit(limit);
    let raw = decoder.decode_exact(&lzw_bytes, header.lzw_bit_width, header.code_count as usize)?;

    if raw.len() as u64 != header.original_len {
        return Err(LzwHuffError::RoundTripMismatch {
            offset: raw.len().min(header.original_len as usize),
            expected_len: header.original_len as usize,
            actual_len: raw.len(),
        });
    }

    let computed = Crc32::compute(&raw);
    if computed != header.crc32 {
        return Err(LzwHuffError::checksum_mismatch(header.crc32, computed));
    }

    debug!(
        "Decompressed {} payload bytes into {} bytes",
        artifact.payload.len(),
        raw.len()
    );
    Ok(raw)
}

/// Invert both stages given the tree and parameters directly.
///
/// The LZW code count is derived from the length of the Huffman output.
/// No length or checksum verification is possible here.
pub fn decompress_parts(
    payload: &[u8],
    tree: &HuffmanTree,
    huffman_bits: u64,
    lzw_bit_width: u8,
    max_dict_size: u32,
) -> Result<Vec<u8>> {
    let lzw_bytes = tree.decode(payload, huffman_bits)?;
    let mut decoder = LzwDecoder::new(LzwConfig::new(max_dict_size)?)?;
    decoder.decode(&lzw_bytes, lzw_bit_width)
}

/// Compress, then decode with both methods and require exact equality.
///
/// The LZW pass runs once; its stream feeds both the LZW-only and the
/// LZW + Huffman artifacts, and the report compares the two. The returned
/// artifact uses `config.method`.
///
/// # Errors
///
/// [`LzwHuffError::RoundTripMismatch`] if either artifact fails to decode
/// back to `raw`, plus any error from compressing or decoding.
pub fn compress_verified(
    raw: &[u8],
    config: &PipelineConfig,
) -> Result<(Artifact, CompressionReport)> {
    let lzw = encode_lzw(raw, config)?;
    let crc = Crc32::compute(raw);

    let lzw_only = assemble(raw, &lzw, &config.with_method(Method::Lzw), crc)?;
    let combined = assemble(raw, &lzw, &config.with_method(Method::LzwHuffman), crc)?;

    for artifact in [&lzw_only, &combined] {
        let decoded = decompress(artifact)?;
        LzwHuffError::check_round_trip(raw, &decoded)?;
    }

    let original_len = raw.len() as u64;
    let report = CompressionReport {
        source: None,
        max_dict_size: config.max_dict_size(),
        bit_width: lzw.bit_width,
        code_count: lzw.code_count as u64,
        lzw: StageReport::new(Method::Lzw, original_len, lzw_only.payload.len() as u64),
        lzw_huffman: StageReport::new(
            Method::LzwHuffman,
            original_len,
            combined.payload.len() as u64,
        ),
        verified: true,
    };

    info!(
        "Verified {} bytes at dictionary size {}: LZW {} bytes, LZW + Huffman {} bytes",
        raw.len(),
        config.max_dict_size(),
        lzw_only.payload.len(),
        combined.payload.len()
    );

    let artifact = match config.method {
        Method::Lzw => lzw_only,
        Method::LzwHuffman => combined,
    };
    Ok((artifact, report))
}

fn encode_lzw(raw: &[u8], config: &PipelineConfig) -> Result<LzwStream> {
    let mut encoder = LzwEncoder::new(config.lzw)?;
    encoder.encode(raw)
}

fn assemble(raw: &[u8], lzw: &LzwStream, config: &PipelineConfig, crc32: u32) -> Result<Artifact> {
    let lzw_len = lzw.data.len() as u64;

    let (payload, payload_bits, frequencies) = match config.method {
        Method::Lzw => (lzw.data.clone(), lzw_len * 8, FrequencyTable::new()),
        Method::LzwHuffman => {
            let compressed = lzwhuff_huffman::compress(&lzw.data)?;
            (
                compressed.stream.data,
                compressed.stream.bit_len,
                compressed.frequencies,
            )
        }
    };

    debug!(
        "{}: {} bytes -> {} LZW bytes -> {} payload bytes",
        config.method,
        raw.len(),
        lzw_len,
        payload.len()
    );

    Ok(Artifact {
        header: ArtifactHeader {
            method: config.method,
            max_dict_size: config.max_dict_size(),
            lzw_bit_width: lzw.bit_width,
            code_count: lzw.code_count as u64,
            lzw_len,
            original_len: raw.len() as u64,
            crc32,
            payload_bits,
            frequencies,
        },
        payload,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &[u8] = b"TOBEORNOTTOBEORTOBEORNOT#TOBEORNOTTOBEORTOBEORNOT";

    #[test]
    fn test_roundtrip_both_methods() {
        for method in [Method::Lzw, Method::LzwHuffman] {
            let config = PipelineConfig::default().with_method(method);
            let artifact = compress(SAMPLE, &config).unwrap();
            assert_eq!(artifact.header.method, method);
            assert_eq!(decompress(&artifact).unwrap(), SAMPLE);
        }
    }

    #[test]
    fn test_empty_input() {
        let artifact = compress(b"", &PipelineConfig::default()).unwrap();
        assert!(artifact.payload.is_empty());
        assert_eq!(artifact.header.code_count, 0);
        assert_eq!(artifact.header.lzw_bit_width, 8);
        assert_eq!(artifact.header.crc32, 0);
        assert!(decompress(&artifact).unwrap().is_empty());
    }

    #[test]
    fn test_lzw_only_payload_is_lzw_stream() {
        let config = PipelineConfig::default().with_method(Method::Lzw);
        let artifact = compress(SAMPLE, &config).unwrap();
        let stream = lzwhuff_lzw::compress(SAMPLE, config.lzw).unwrap();
        assert_eq!(artifact.payload, stream.data);
        assert!(artifact.header.frequencies.is_empty());
    }

    #[test]
    fn test_checksum_mismatch() {
        let mut artifact = compress(SAMPLE, &PipelineConfig::default()).unwrap();
        artifact.header.crc32 ^= 1;
        assert!(matches!(
            decompress(&artifact),
            Err(LzwHuffError::ChecksumMismatch { .. })
        ));
    }

    #[test]
    fn test_payload_length_checked() {
        let mut artifact = compress(SAMPLE, &PipelineConfig::default()).unwrap();
        artifact.payload.push(0);
        assert!(matches!(
            decompress(&artifact),
            Err(LzwHuffError::InvalidHeader { .. })
        ));
    }

    #[test]
    fn test_decompress_parts() {
        let config = PipelineConfig::default();
        let artifact = compress(SAMPLE, &config).unwrap();
        let tree = HuffmanTree::build(&artifact.header.frequencies).unwrap();
        let raw = decompress_parts(
            &artifact.payload,
            &tree,
            artifact.header.payload_bits,
            artifact.header.lzw_bit_width,
            config.max_dict_size(),
        )
        .unwrap();
        assert_eq!(raw, SAMPLE);
    }

    #[test]
    fn test_compress_verified() {
        let (artifact, report) = compress_verified(SAMPLE, &PipelineConfig::default()).unwrap();
        assert!(report.verified);
        assert_eq!(report.max_dict_size, 4096);
        assert_eq!(report.bit_width, artifact.header.lzw_bit_width);
        assert_eq!(report.lzw.original_bits, SAMPLE.len() as u64 * 8);
        assert_eq!(
            report.lzw_huffman.compressed_bits,
            artifact.payload.len() as u64 * 8
        );
        assert_eq!(artifact.header.method, Method::LzwHuffman);
    }

    #[test]
    fn test_invalid_config() {
        assert!(matches!(
            PipelineConfig::new(255, Method::Lzw),
            Err(LzwHuffError::InvalidDictSize { .. })
        ));
    }
}
