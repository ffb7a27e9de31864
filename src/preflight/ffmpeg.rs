//! FFmpeg preflight check.

use super::{resolve_tool, CheckResult};
use crate::services;
use std::path::Path;

/// Check if ffmpeg is resolvable and runs.
pub fn check(program: &Path) -> CheckResult {
    let Some(resolved) = resolve_tool(program) else {
        return CheckResult::fail(
            "ffmpeg",
            &format!("{} not found", program.display()),
            "Install FFmpeg: sudo apt install ffmpeg",
        );
    };

    if !services::is_installed(&resolved) {
        return CheckResult::fail(
            "ffmpeg",
            &format!("{} does not run", resolved.display()),
            "Check the [tools] section of your config",
        );
    }

    match services::get_version(&resolved) {
        Ok(version) => CheckResult::ok("ffmpeg", &format!("installed ({})", version)),
        Err(_) => CheckResult::ok("ffmpeg", "installed"),
    }
}
