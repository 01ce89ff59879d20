//! Info command implementation.

use crate::utils::format_ratio;
use lzwhuff_pipeline::{Artifact, ArtifactHeader, Method, StageReport};
use serde::Serialize;
use std::fs::{self, File};
use std::io::BufReader;
use std::path::Path;

/// Header fields as printed by `info --json`.
#[derive(Serialize)]
struct ArtifactInfo<'a> {
    file: String,
    size: u64,
    method: Method,
    max_dict_size: u32,
    bit_width: u8,
    code_count: u64,
    lzw_len: u64,
    original_len: u64,
    crc32: String,
    payload_bits: u64,
    symbols: usize,
    stage: &'a StageReport,
}

pub fn cmd_info(artifact_file: &Path, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let mut reader = BufReader::new(File::open(artifact_file)?);
    let artifact = Artifact::read(&mut reader)?;
    let size = fs::metadata(artifact_file)?.len();
    let header = &artifact.header;
    let stage = StageReport::new(
        header.method,
        header.original_len,
        artifact.payload.len() as u64,
    );

    if json {
        let info = ArtifactInfo {
            file: artifact_file.display().to_string(),
            size,
            method: header.method,
            max_dict_size: header.max_dict_size,
            bit_width: header.lzw_bit_width,
            code_count: header.code_count,
            lzw_len: header.lzw_len,
            original_len: header.original_len,
            crc32: format!("{:08x}", header.crc32),
            payload_bits: header.payload_bits,
            symbols: header.frequencies.distinct(),
            stage: &stage,
        };
        println!("{}", serde_json::to_string_pretty(&info)?);
        return Ok(());
    }

    print_header(artifact_file, size, header);
    println!();
    println!("Sizes:");
    println!("  Original: {} bytes", header.original_len);
    println!("  LZW stream: {} bytes", header.lzw_len);
    println!(
        "  Payload: {} bytes ({} bits)",
        artifact.payload.len(),
        header.payload_bits
    );
    println!("  Header: {} bytes", header.encoded_len());
    println!("  Compression ratio: {}", format_ratio(stage.ratio));
    if let Some(saving) = stage.space_saving() {
        println!("  Space saving: {:.1}%", saving * 100.0);
    }
    Ok(())
}

fn print_header(artifact_file: &Path, size: u64, header: &ArtifactHeader) {
    println!("Artifact Information");
    println!("====================");
    println!("File: {}", artifact_file.display());
    println!("Size: {} bytes", size);
    println!("Method: {}", header.method);
    println!();
    println!("LZW:");
    println!("  Max dictionary size: {}", header.max_dict_size);
    println!("  Code width: {} bits", header.lzw_bit_width);
    println!("  Codes: {}", header.code_count);
    if header.method == Method::LzwHuffman {
        println!();
        println!("Huffman:");
        println!("  Symbols: {}", header.frequencies.distinct());
    }
    println!();
    println!("CRC-32: {:08x}", header.crc32);
}
