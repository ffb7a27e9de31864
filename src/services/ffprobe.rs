//! FFprobe service for extracting stream metadata.

use crate::models::media::MediaSummary;
use crate::Result;
use std::path::Path;
use std::process::Command;

/// Probe a media file with ffprobe.
pub fn probe(program: &Path, path: &Path) -> Result<MediaSummary> {
    let output = Command::new(program)
        .args([
            "-hide_banner",
            "-loglevel",
            "fatal",
            "-show_error",
            "-show_format",
            "-show_streams",
            "-show_private_data",
            "-print_format",
            "json",
        ])
        .arg(path)
        .output()
        .map_err(|e| crate::Error::ProbeExecutionFailed {
            path: path.display().to_string(),
            output: e.to_string(),
        })?;

    if !output.status.success() {
        let mut combined = String::from_utf8_lossy(&output.stderr).trim().to_string();
        let stdout = String::from_utf8_lossy(&output.stdout);
        if !stdout.trim().is_empty() {
            if !combined.is_empty() {
                combined.push('\n');
            }
            combined.push_str(stdout.trim());
        }
        return Err(crate::Error::ProbeExecutionFailed {
            path: path.display().to_string(),
            output: format!("{} ({})", combined, output.status),
        });
    }

    parse_probe_output(&output.stdout, path)
}

/// Decode ffprobe JSON output.
pub fn parse_probe_output(json: &[u8], path: &Path) -> Result<MediaSummary> {
    serde_json::from_slice(json).map_err(|e| crate::Error::ProbeParseFailed {
        path: path.display().to_string(),
        source: e,
    })
}
