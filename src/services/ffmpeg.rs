//! FFmpeg service: pixel format listing and transcode execution.

use crate::models::plan::TranscodePlan;
use crate::Result;
use std::path::Path;
use std::process::{Command, Stdio};

/// List all pixel formats known to ffmpeg.
///
/// Returns stdout and stderr concatenated; the table goes to stdout but
/// some builds print warnings around it.
pub fn list_pixel_formats(program: &Path) -> Result<String> {
    let output = Command::new(program)
        .args(["-hide_banner", "-pix_fmts"])
        .output()
        .map_err(|e| crate::Error::CatalogExecutionFailed(e.to_string()))?;

    if !output.status.success() {
        return Err(crate::Error::CatalogExecutionFailed(format!(
            "{} exited with {}: {}",
            program.display(),
            output.status,
            String::from_utf8_lossy(&output.stderr).trim()
        )));
    }

    let mut listing = String::from_utf8_lossy(&output.stdout).into_owned();
    listing.push_str(&String::from_utf8_lossy(&output.stderr));
    Ok(listing)
}

/// Run a transcode plan with stdout/stderr forwarded to ours.
///
/// `program` replaces the plan's program token so a configured ffmpeg
/// location is honoured.
pub fn run_plan(program: &Path, plan: &TranscodePlan) -> Result<()> {
    let target = Path::new(plan.output().unwrap_or_default())
        .display()
        .to_string();

    tracing::info!("Executing ffmpeg command: {}", plan);

    let status = Command::new(program)
        .args(&plan.args)
        .stdin(Stdio::null())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .map_err(|e| crate::Error::TranscodeExecutionFailed {
            path: target.clone(),
            message: format!("failed to spawn {}: {}", program.display(), e),
        })?;

    if !status.success() {
        return Err(crate::Error::TranscodeExecutionFailed {
            path: target,
            message: format!("ffmpeg exited with {}", status),
        });
    }

    Ok(())
}
