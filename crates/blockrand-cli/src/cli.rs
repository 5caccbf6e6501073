//! CLI argument definitions for the block randomization tool.

use std::path::PathBuf;

use clap::{Args, Parser, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use blockrand_model::config::{DEFAULT_BLOCK_PREFIX, DEFAULT_TARGET};
use blockrand_render::{DEFAULT_BASENAME, DEFAULT_DPI, DEFAULT_OUTPUT_DIR};

#[derive(Parser)]
#[command(
    name = "blockrand",
    version,
    about = "Block randomization schedule generator with heatmap output",
    long_about = "Generate a block-randomized treatment allocation sequence.\n\n\
                  Every block holds each treatment equally often in a shuffled order.\n\
                  The sequence is printed as a table and drawn as a heatmap (PNG and SVG).\n\
                  Running without arguments uses 30 subjects, Treatment/Control and\n\
                  5 occurrences of each arm per block."
)]
pub struct Cli {
    #[command(flatten)]
    pub randomization: RandomizationArgs,

    #[command(flatten)]
    pub output: OutputArgs,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Args)]
pub struct RandomizationArgs {
    /// Target number of subjects; whole blocks are generated to cover it.
    #[arg(long = "target", value_name = "N", default_value_t = DEFAULT_TARGET)]
    pub target: usize,

    /// Treatment arm label (repeat for each arm; default: Treatment, Control).
    #[arg(long = "treatment", value_name = "LABEL", conflicts_with = "arms")]
    pub treatments: Vec<String>,

    /// Number of arms, labelled A, B, C, ... (2 to 10).
    #[arg(long = "arms", value_name = "N")]
    pub arms: Option<usize>,

    /// Occurrences of each treatment within one block (default: 5).
    #[arg(long = "multiplier", value_name = "N", conflicts_with = "block_size")]
    pub multiplier: Option<usize>,

    /// Subjects per block; must be a multiple of the number of arms.
    #[arg(long = "block-size", value_name = "N")]
    pub block_size: Option<usize>,

    /// Prefix for block names.
    #[arg(long = "block-prefix", value_name = "PREFIX", default_value = DEFAULT_BLOCK_PREFIX)]
    pub block_prefix: String,

    /// Seed the shuffle for a reproducible sequence (unseeded by default).
    #[arg(long = "seed", value_name = "SEED")]
    pub seed: Option<u64>,
}

#[derive(Args)]
pub struct OutputArgs {
    /// Directory for the heatmap images (created if absent).
    #[arg(long = "output-dir", value_name = "DIR", default_value = DEFAULT_OUTPUT_DIR)]
    pub output_dir: PathBuf,

    /// File name stem for the heatmap images.
    #[arg(long = "basename", value_name = "NAME", default_value = DEFAULT_BASENAME)]
    pub basename: String,

    /// Raster resolution of the PNG output.
    #[arg(long = "dpi", value_name = "DPI", default_value_t = DEFAULT_DPI)]
    pub dpi: u32,

    /// Image format to generate.
    #[arg(long = "format", value_enum, default_value = "both")]
    pub format: OutputFormatArg,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum OutputFormatArg {
    Png,
    Svg,
    Both,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
