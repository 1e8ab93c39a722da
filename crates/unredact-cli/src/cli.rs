use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// Remove PDF redaction annotations and black box overlays.
///
/// This only removes overlay marks; it cannot recover content that was
/// permanently redacted.
#[derive(Debug, Parser)]
#[command(name = "unredact", about, version)]
pub struct Cli {
    /// Path to the input PDF
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Output path. Default: <FILE base>_unredacted.pdf next to the input
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Summary format
    #[arg(long, value_enum, default_value_t = SummaryFormat::Text)]
    pub format: SummaryFormat,
}

/// How the result is reported on stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SummaryFormat {
    /// One human-readable line
    Text,
    /// The full per-page report as JSON
    Json,
}
