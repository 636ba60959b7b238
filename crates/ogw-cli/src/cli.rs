//! Command-line interface definitions

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// OGW - compose Open Graph images from JSON scene files
#[derive(Parser, Debug)]
#[command(name = "ogw")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Verbose logging
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Display supported input and output formats
    #[command(alias = "i")]
    Info,

    /// Render a scene file to an image
    #[command(alias = "r")]
    Render(RenderArgs),
}

#[derive(Parser, Debug)]
pub struct RenderArgs {
    /// Scene description (JSON)
    pub scene: PathBuf,

    /// Output file path
    #[arg(short = 'o', long = "output")]
    pub output: PathBuf,

    /// Extra font file, registered after the scene's own fonts
    #[arg(short = 'f', long = "font", action = ArgAction::Append)]
    pub fonts: Vec<PathBuf>,

    /// Output format
    #[arg(short = 'O', long = "format", default_value = "png")]
    pub format: FormatArg,

    /// JPEG quality (1-100)
    #[arg(short = 'q', long = "quality", default_value = "90")]
    pub quality: u8,

    /// PNG compression level
    #[arg(long = "compression", default_value = "default")]
    pub compression: CompressionArg,

    /// Fail on the first broken node instead of skipping it
    #[arg(long = "strict")]
    pub strict: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum FormatArg {
    /// RGBA PNG
    Png,
    /// Baseline JPEG, alpha dropped
    #[value(alias = "jpg")]
    Jpeg,
    /// Raw RGBA8 bytes, row-major
    Raw,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum CompressionArg {
    Fast,
    Default,
    Best,
}
