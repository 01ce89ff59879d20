//! lzwhuff CLI - two-stage LZW + Huffman compressor
//!
//! Compresses files into `.lzwh` artifacts and reproduces the batch
//! comparison of LZW alone against LZW followed by Huffman coding.

mod commands;
mod utils;

use clap::{Parser, Subcommand, ValueEnum};
use commands::{cmd_bench, cmd_compress, cmd_decompress, cmd_info, cmd_test};
use log::LevelFilter;
use lzwhuff_pipeline::{DEFAULT_DICT_SIZE, Method};
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "lzwhuff")]
#[command(author, version, about = "Bounded-dictionary LZW followed by Huffman coding")]
#[command(long_about = "
lzwhuff compresses data in two lossless stages: LZW with a capped
dictionary, then Huffman coding of the packed LZW codes.

Examples:
  lzwhuff compress wiki_sample.txt
  lzwhuff compress lena.bmp -d 65536 -m lzw
  lzwhuff decompress wiki_sample.txt.lzwh -o restored.txt
  lzwhuff info wiki_sample.txt.lzwh
  lzwhuff test *.lzwh
  lzwhuff bench wiki_sample.txt lena.bmp -d 4096 -d 65536 --report results.txt
")]
struct Cli {
    /// Increase log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compress a file into an artifact
    #[command(alias = "c")]
    Compress {
        /// File to compress
        input: PathBuf,

        /// Output artifact (default: <input>.lzwh)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Maximum LZW dictionary size (256 to 16777216)
        #[arg(short = 'd', long, default_value_t = DEFAULT_DICT_SIZE)]
        dict_size: u32,

        /// Stages to apply
        #[arg(short, long, value_enum, default_value = "lzw-huffman")]
        method: MethodArg,
    },

    /// Restore the original file from an artifact
    #[command(alias = "x")]
    Decompress {
        /// Artifact to decompress
        artifact: PathBuf,

        /// Output file (default: artifact name without .lzwh)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show the header of an artifact
    #[command(alias = "i")]
    Info {
        /// Artifact to inspect
        artifact: PathBuf,

        /// Output as JSON (machine-readable)
        #[arg(short, long)]
        json: bool,
    },

    /// Decode artifacts and verify their checksums
    #[command(alias = "t")]
    Test {
        /// Artifacts to test
        #[arg(required = true)]
        artifacts: Vec<PathBuf>,
    },

    /// Compare LZW and LZW + Huffman on files, verifying every round trip
    Bench {
        /// Files to measure
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Dictionary sizes to try (repeatable, default 4096)
        #[arg(short = 'd', long = "dict-size")]
        dict_sizes: Vec<u32>,

        /// Output as JSON (machine-readable)
        #[arg(short, long)]
        json: bool,

        /// Append result blocks to this file
        #[arg(short, long)]
        report: Option<PathBuf>,

        /// Hide the progress bar
        #[arg(long)]
        no_progress: bool,
    },
}

/// Compression method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum MethodArg {
    /// LZW only
    Lzw,
    /// LZW followed by Huffman coding
    LzwHuffman,
}

impl From<MethodArg> for Method {
    fn from(arg: MethodArg) -> Self {
        match arg {
            MethodArg::Lzw => Method::Lzw,
            MethodArg::LzwHuffman => Method::LzwHuffman,
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    // Log to stderr so JSON on stdout stays parseable
    if let Err(e) = TermLogger::init(
        level,
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    ) {
        eprintln!("Warning: logging unavailable: {}", e);
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Compress {
            input,
            output,
            dict_size,
            method,
        } => cmd_compress(&input, output.as_deref(), dict_size, method.into()),
        Commands::Decompress { artifact, output } => cmd_decompress(&artifact, output.as_deref()),
        Commands::Info { artifact, json } => cmd_info(&artifact, json),
        Commands::Test { artifacts } => cmd_test(&artifacts),
        Commands::Bench {
            files,
            dict_sizes,
            json,
            report,
            no_progress,
        } => cmd_bench(&files, &dict_sizes, json, report.as_deref(), !no_progress),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
