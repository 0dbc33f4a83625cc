//! CLI argument parsing using clap.

use clap::Parser;
use distzip_core::BuildOptions;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "distzip")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "Examples:\n  \
    distzip\n  \
    distzip dist/theme.zip\n  \
    distzip --config custom-config.txt\n  \
    distzip theme.zip --verbose")]
pub struct Cli {
    /// Path to the output zip file
    #[arg(value_name = "DESTINATION", default_value = "output.zip")]
    pub destination: PathBuf,

    /// Path to configuration file
    #[arg(short, long, value_name = "FILE", default_value = ".distzip")]
    pub config: PathBuf,

    /// Working directory (default: current directory)
    #[arg(short = 'd', long, value_name = "DIR")]
    pub cwd: Option<PathBuf>,

    /// Show verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Compression level (0 stores files uncompressed)
    #[arg(
        short = 'l',
        long,
        default_value_t = 9,
        value_parser = clap::value_parser!(u8).range(0..=9)
    )]
    pub compression_level: u8,

    /// Let wildcards match hidden files and directories
    #[arg(long)]
    pub include_hidden: bool,

    /// Follow symbolic links to directories while expanding `**`
    #[arg(long)]
    pub follow_symlinks: bool,
}

impl Cli {
    /// Build options selected on the command line.
    pub fn build_options(&self) -> BuildOptions {
        BuildOptions::default()
            .with_compression_level(self.compression_level)
            .with_include_hidden(self.include_hidden)
            .with_follow_symlinks(self.follow_symlinks)
    }
}
