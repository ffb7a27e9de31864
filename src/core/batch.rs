//! Batch driver.
//!
//! Runs the proxy workflow over a list of files, one at a time. A failing
//! file is logged and recorded; the batch moves on to the next one.

use crate::core::workflow::{ProxyOutcome, ProxyWorkflow};
use crate::models::report::{BatchReport, FileOutcome, FileReport};
use crate::Result;
use chrono::Utc;
use std::fs;
use std::path::{Path, PathBuf};

/// Current report format version.
pub const REPORT_VERSION: &str = "1.0";

/// Process every file in order.
pub fn run_batch(
    workflow: &mut ProxyWorkflow<'_>,
    source_path: &Path,
    files: &[PathBuf],
) -> Result<BatchReport> {
    let mut report = BatchReport {
        version: REPORT_VERSION.to_string(),
        started_at: Utc::now().to_rfc3339(),
        finished_at: String::new(),
        source_path: source_path.to_path_buf(),
        files: Vec::with_capacity(files.len()),
    };

    for (idx, file) in files.iter().enumerate() {
        tracing::debug!("[{}/{}] {}", idx + 1, files.len(), file.display());

        let entry = match workflow.process(file) {
            Ok(ProxyOutcome::Skipped { proxy }) => {
                tracing::info!("File {} has not been changed", file.display());
                FileReport {
                    path: file.clone(),
                    outcome: FileOutcome::Skipped,
                    proxy_path: Some(proxy),
                    audio_remediated: false,
                    reason: None,
                }
            }
            Ok(ProxyOutcome::Succeeded {
                proxy,
                audio_remediated,
            }) => {
                tracing::info!(
                    "File {} has been processed and saved as {}",
                    file.display(),
                    proxy.display()
                );
                FileReport {
                    path: file.clone(),
                    outcome: FileOutcome::Succeeded,
                    proxy_path: Some(proxy),
                    audio_remediated,
                    reason: None,
                }
            }
            Err(e) if e.is_file_scoped() => {
                tracing::error!("Error processing file {}: {}", file.display(), e);
                FileReport {
                    path: file.clone(),
                    outcome: FileOutcome::Failed,
                    proxy_path: None,
                    audio_remediated: false,
                    reason: Some(e.to_string()),
                }
            }
            Err(e) => return Err(e),
        };

        report.files.push(entry);
    }

    report.finished_at = Utc::now().to_rfc3339();

    tracing::info!(
        "Batch finished: {} succeeded, {} skipped, {} failed",
        report.count(FileOutcome::Succeeded),
        report.count(FileOutcome::Skipped),
        report.count(FileOutcome::Failed)
    );

    Ok(report)
}

/// Save a report as pretty JSON, creating parent directories.
pub fn save_report(report: &BatchReport, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let json = serde_json::to_string_pretty(report)?;
    fs::write(path, json)?;

    tracing::info!("Report saved to: {}", path.display());
    Ok(())
}

/// Load a report from JSON.
pub fn load_report(path: &Path) -> Result<BatchReport> {
    if !path.exists() {
        return Err(crate::Error::PathNotFound(path.display().to_string()));
    }

    let content = fs::read_to_string(path)?;
    let report = serde_json::from_str(&content)?;
    Ok(report)
}
