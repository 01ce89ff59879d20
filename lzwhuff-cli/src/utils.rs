//! Utility functions for the CLI.

use indicatif::{ProgressBar, ProgressStyle};
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Extension given to artifacts.
pub const ARTIFACT_EXTENSION: &str = "lzwh";

/// Create a progress bar with standard styling.
pub fn create_progress_bar(len: u64, enable: bool) -> ProgressBar {
    if !enable {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new(len);
    let style = ProgressStyle::default_bar()
        .template("[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▓▒░ ");
    pb.set_style(style);
    pb
}

/// `input` with `.lzwh` appended.
pub fn artifact_path(input: &Path) -> PathBuf {
    let mut name = OsString::from(input.as_os_str());
    name.push(".");
    name.push(ARTIFACT_EXTENSION);
    PathBuf::from(name)
}

/// `artifact` with a trailing `.lzwh` removed, or `.out` appended otherwise.
pub fn restored_path(artifact: &Path) -> PathBuf {
    if artifact.extension().is_some_and(|ext| ext == ARTIFACT_EXTENSION) {
        return artifact.with_extension("");
    }
    let mut name = OsString::from(artifact.as_os_str());
    name.push(".out");
    PathBuf::from(name)
}

/// Render an optional ratio.
pub fn format_ratio(ratio: Option<f64>) -> String {
    match ratio {
        Some(r) => format!("{:.3}:1", r),
        None => "n/a".to_string(),
    }
}
