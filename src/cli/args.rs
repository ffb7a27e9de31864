//! Command line argument definitions.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Media Proxy - Generate editing proxies for a folder of media
#[derive(Parser, Debug)]
#[command(name = "media-proxy")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Skip preflight checks
    #[arg(long, global = true)]
    pub skip_preflight: bool,

    /// Path to a config.toml (default: user config directory)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate proxies for every media file in a directory
    Process {
        /// Directory containing media files
        #[arg(value_name = "DIR")]
        path: PathBuf,

        /// Encode in software instead of CUDA/NVENC
        #[arg(long)]
        no_hwaccel: bool,

        /// Also process subdirectories (Proxy/ and Originals/ are skipped)
        #[arg(short, long)]
        recursive: bool,

        /// Write a JSON report of the run
        #[arg(long, value_name = "REPORT")]
        report: Option<PathBuf>,
    },

    /// Show what would be done for a single file
    Inspect {
        /// Media file to inspect
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Plan for software encoding instead of CUDA/NVENC
        #[arg(long)]
        no_hwaccel: bool,
    },
}
