//! Preflight checks module.
//!
//! Both ffmpeg and ffprobe must be resolvable before any file is touched.

mod ffmpeg;
mod ffprobe;

use crate::models::config::ToolsConfig;
use crate::Result;
use colored::Colorize;
use std::path::{Path, PathBuf};

/// Result of a preflight check.
#[derive(Debug)]
pub struct CheckResult {
    pub name: String,
    pub success: bool,
    pub message: String,
    pub hint: Option<String>,
}

impl CheckResult {
    pub fn ok(name: &str, message: &str) -> Self {
        Self {
            name: name.to_string(),
            success: true,
            message: message.to_string(),
            hint: None,
        }
    }

    pub fn fail(name: &str, message: &str, hint: &str) -> Self {
        Self {
            name: name.to_string(),
            success: false,
            message: message.to_string(),
            hint: Some(hint.to_string()),
        }
    }
}

/// Resolve a program name or path to an executable on disk.
pub fn resolve_tool(program: &Path) -> Option<PathBuf> {
    which::which(program).ok()
}

/// Run all preflight checks.
pub fn run_preflight_checks(tools: &ToolsConfig) -> Vec<CheckResult> {
    vec![
        ffmpeg::check(&tools.ffmpeg_program()),
        ffprobe::check(&tools.ffprobe_program()),
    ]
}

/// Print preflight check results.
pub fn print_results(results: &[CheckResult]) {
    for result in results {
        if result.success {
            println!(
                "{} {}: {}",
                "[OK]".green(),
                result.name.bold(),
                result.message
            );
        } else {
            println!(
                "{} {}: {}",
                "[FAIL]".red(),
                result.name.bold(),
                result.message
            );
            if let Some(ref hint) = result.hint {
                println!("  {} {}", "->".yellow(), hint);
            }
        }
    }
}

/// Fail with the first tool that did not pass.
pub fn ensure_passed(results: &[CheckResult]) -> Result<()> {
    match results.iter().find(|r| !r.success) {
        Some(failed) => Err(crate::Error::ToolNotFound(failed.name.clone())),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_passed() {
        let results = vec![CheckResult::ok("ffmpeg", "installed")];
        assert!(ensure_passed(&results).is_ok());

        let results = vec![
            CheckResult::ok("ffmpeg", "installed"),
            CheckResult::fail("ffprobe", "not found", "install it"),
        ];
        assert!(matches!(
            ensure_passed(&results),
            Err(crate::Error::ToolNotFound(name)) if name == "ffprobe"
        ));
    }

    #[test]
    fn test_missing_tool_fails() {
        let tools = ToolsConfig {
            ffmpeg: Some(PathBuf::from("/nonexistent/bin/ffmpeg")),
            ffprobe: Some(PathBuf::from("/nonexistent/bin/ffprobe")),
        };
        let results = run_preflight_checks(&tools);

        assert_eq!(results.len(), 2);
        assert!(results.iter().all(|r| !r.success && r.hint.is_some()));
    }
}
