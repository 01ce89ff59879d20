//! Bench command implementation.
//!
//! Runs every file through both methods at each dictionary size, verifying
//! each round trip, and prints one result block per run.

use crate::utils::create_progress_bar;
use log::info;
use lzwhuff_pipeline::{
    CompressionReport, DEFAULT_DICT_SIZE, Method, PipelineConfig, compress_verified,
};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

pub fn cmd_bench(
    files: &[PathBuf],
    dict_sizes: &[u32],
    json: bool,
    report_file: Option<&Path>,
    progress: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let dict_sizes = if dict_sizes.is_empty() {
        &[DEFAULT_DICT_SIZE][..]
    } else {
        dict_sizes
    };
    let configs = dict_sizes
        .iter()
        .map(|&size| PipelineConfig::new(size, Method::LzwHuffman))
        .collect::<Result<Vec<_>, _>>()?;

    let pb = create_progress_bar((files.len() * configs.len()) as u64, progress && !json);
    let mut reports: Vec<CompressionReport> = Vec::with_capacity(files.len() * configs.len());

    for file in files {
        let data = fs::read(file)?;
        for config in &configs {
            pb.set_message(format!("{} @ {}", file.display(), config.max_dict_size()));
            let (_, report) = compress_verified(&data, config)?;
            reports.push(report.with_source(file.display().to_string()));
            pb.inc(1);
        }
        info!("Finished {}", file.display());
    }
    pb.finish_and_clear();

    if json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    } else {
        for report in &reports {
            print!("{}", report);
        }
    }

    if let Some(path) = report_file {
        let mut out = OpenOptions::new().create(true).append(true).open(path)?;
        for report in &reports {
            write!(out, "{}", report)?;
        }
        info!("Appended {} results to {}", reports.len(), path.display());
    }

    Ok(())
}
