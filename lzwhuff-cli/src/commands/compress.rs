//! Compress command implementation.

use crate::utils::{artifact_path, format_ratio};
use log::info;
use lzwhuff_pipeline::{Method, PipelineConfig, StageReport, compress};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

pub fn cmd_compress(
    input: &Path,
    output: Option<&Path>,
    dict_size: u32,
    method: Method,
) -> Result<(), Box<dyn std::error::Error>> {
    let data = fs::read(input)?;
    let config = PipelineConfig::new(dict_size, method)?;
    let artifact = compress(&data, &config)?;

    let output = output.map_or_else(|| artifact_path(input), Path::to_path_buf);
    let mut writer = BufWriter::new(File::create(&output)?);
    artifact.write(&mut writer)?;
    writer.flush()?;

    let stage = StageReport::new(method, data.len() as u64, artifact.payload.len() as u64);
    info!(
        "{} codes of {} bits, {} header bytes",
        artifact.header.code_count,
        artifact.header.lzw_bit_width,
        artifact.header.encoded_len()
    );
    println!(
        "{} -> {} ({} -> {} bytes, {}, ratio {})",
        input.display(),
        output.display(),
        data.len(),
        artifact.encoded_len(),
        method,
        format_ratio(stage.ratio)
    );
    Ok(())
}
