//! FFprobe preflight check.

use super::{resolve_tool, CheckResult};
use crate::services;
use std::path::Path;

/// Check if ffprobe is resolvable and runs.
pub fn check(program: &Path) -> CheckResult {
    match resolve_tool(program) {
        Some(resolved) if services::is_installed(&resolved) => {
            match services::get_version(&resolved) {
                Ok(version) => CheckResult::ok("ffprobe", &format!("installed ({})", version)),
                Err(_) => CheckResult::ok("ffprobe", "installed"),
            }
        }
        _ => CheckResult::fail(
            "ffprobe",
            "not found",
            "Install FFmpeg: sudo apt install ffmpeg",
        ),
    }
}
