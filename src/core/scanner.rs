//! Directory scanner module.
//!
//! Lists the media files a batch run should process.

use crate::core::planner::{ORIGINALS_DIR, PROXY_DIR};
use crate::models::config::ScanConfig;
use crate::utils::fs::get_extension;
use crate::Result;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// Result of scanning a directory.
#[derive(Debug, Default)]
pub struct ScanResult {
    /// Media files to process, sorted by path.
    pub files: Vec<PathBuf>,
    /// Files skipped for their extension.
    pub skipped: Vec<PathBuf>,
    /// Total files scanned.
    pub total_files_scanned: usize,
}

/// Check if a path has one of the configured media extensions.
pub fn is_media_file(path: &Path, extensions: &[String]) -> bool {
    get_extension(path)
        .map(|ext| extensions.iter().any(|e| e.eq_ignore_ascii_case(&ext)))
        .unwrap_or(false)
}

/// Generated directories never hold sources.
fn is_generated_dir(entry: &DirEntry) -> bool {
    entry.depth() > 0
        && entry.file_type().is_dir()
        && matches!(
            entry.file_name().to_str(),
            Some(PROXY_DIR) | Some(ORIGINALS_DIR)
        )
}

/// Scan a directory for media files.
///
/// Only the top level is listed unless `config.recursive` is set; `Proxy`
/// and `Originals` directories are never entered.
pub fn scan_directory(path: &Path, config: &ScanConfig) -> Result<ScanResult> {
    if !path.exists() {
        return Err(crate::Error::PathNotFound(path.display().to_string()));
    }
    if !path.is_dir() {
        return Err(crate::Error::NotADirectory(path.display().to_string()));
    }

    let max_depth = if config.recursive { usize::MAX } else { 1 };
    let mut result = ScanResult::default();

    for entry in WalkDir::new(path)
        .min_depth(1)
        .max_depth(max_depth)
        .follow_links(false)
        .into_iter()
        .filter_entry(|e| !is_generated_dir(e))
        .filter_map(|e| e.ok())
    {
        if !entry.file_type().is_file() {
            continue;
        }
        result.total_files_scanned += 1;

        let entry_path = entry.path();
        if is_media_file(entry_path, &config.extensions) {
            result.files.push(entry_path.to_path_buf());
        } else {
            tracing::info!("Skipping non-media file: {}", entry_path.display());
            result.skipped.push(entry_path.to_path_buf());
        }
    }

    result.files.sort();
    result.skipped.sort();

    tracing::info!(
        "Scanned {} files: {} media, {} skipped",
        result.total_files_scanned,
        result.files.len(),
        result.skipped.len()
    );

    Ok(result)
}
