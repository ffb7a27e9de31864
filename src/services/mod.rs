//! External tool services.
//!
//! Everything that spawns ffmpeg or ffprobe goes through [`MediaToolkit`],
//! so the analysis and workflow code can run against a fake in tests.

pub mod ffmpeg;
pub mod ffprobe;
pub mod pix_fmts;

use crate::models::config::ToolsConfig;
use crate::models::media::MediaSummary;
use crate::models::plan::TranscodePlan;
use crate::Result;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Check that a tool runs and accepts `-version`.
pub fn is_installed(program: &Path) -> bool {
    Command::new(program)
        .arg("-version")
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

/// First line of a tool's `-version` output.
pub fn get_version(program: &Path) -> Result<String> {
    let output = Command::new(program).arg("-version").output()?;

    let stdout = String::from_utf8_lossy(&output.stdout);
    let first_line = stdout.lines().next().unwrap_or("unknown");

    Ok(first_line.to_string())
}

/// Operations the pipeline needs from the media toolchain.
pub trait MediaToolkit {
    /// Probe one file for format and stream metadata.
    fn probe(&self, path: &Path) -> Result<MediaSummary>;

    /// Raw pixel format listing (`ffmpeg -pix_fmts`).
    fn list_pixel_formats(&self) -> Result<String>;

    /// Run a transcode plan to completion, forwarding its console output.
    fn transcode(&self, plan: &TranscodePlan) -> Result<()>;
}

/// The real toolchain: ffmpeg and ffprobe executables.
#[derive(Debug, Clone)]
pub struct FfmpegTools {
    ffmpeg: PathBuf,
    ffprobe: PathBuf,
}

impl FfmpegTools {
    /// Create from configured (or default) program locations.
    pub fn from_config(config: &ToolsConfig) -> Self {
        Self {
            ffmpeg: config.ffmpeg_program(),
            ffprobe: config.ffprobe_program(),
        }
    }
}

impl MediaToolkit for FfmpegTools {
    fn probe(&self, path: &Path) -> Result<MediaSummary> {
        ffprobe::probe(&self.ffprobe, path)
    }

    fn list_pixel_formats(&self) -> Result<String> {
        ffmpeg::list_pixel_formats(&self.ffmpeg)
    }

    fn transcode(&self, plan: &TranscodePlan) -> Result<()> {
        ffmpeg::run_plan(&self.ffmpeg, plan)
    }
}
