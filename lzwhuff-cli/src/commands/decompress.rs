//! Decompress command implementation.

use crate::utils::restored_path;
use lzwhuff_pipeline::{Artifact, decompress};
use std::fs::{self, File};
use std::io::BufReader;
use std::path::Path;

pub fn cmd_decompress(
    artifact_file: &Path,
    output: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut reader = BufReader::new(File::open(artifact_file)?);
    let artifact = Artifact::read(&mut reader)?;
    let data = decompress(&artifact)?;

    let output = output.map_or_else(|| restored_path(artifact_file), Path::to_path_buf);
    if output == artifact_file {
        return Err(format!("refusing to overwrite {}", artifact_file.display()).into());
    }
    fs::write(&output, &data)?;

    println!(
        "{} -> {} ({} bytes)",
        artifact_file.display(),
        output.display(),
        data.len()
    );
    Ok(())
}
