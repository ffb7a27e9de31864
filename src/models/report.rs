//! Batch run report model.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Report of one `process` run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BatchReport {
    /// Report version.
    pub version: String,
    /// Start timestamp (RFC 3339).
    pub started_at: String,
    /// End timestamp (RFC 3339).
    pub finished_at: String,
    /// Directory that was processed.
    pub source_path: PathBuf,
    /// Per-file results, in processing order.
    pub files: Vec<FileReport>,
}

impl BatchReport {
    pub fn count(&self, outcome: FileOutcome) -> usize {
        self.files.iter().filter(|f| f.outcome == outcome).count()
    }

    pub fn failures(&self) -> impl Iterator<Item = &FileReport> {
        self.files
            .iter()
            .filter(|f| f.outcome == FileOutcome::Failed)
    }
}

/// Result for a single file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileReport {
    /// Source file.
    pub path: PathBuf,
    /// Terminal state.
    pub outcome: FileOutcome,
    /// Proxy file, when one exists or was produced.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proxy_path: Option<PathBuf>,
    /// Whether the original was moved to `Originals/` and regenerated.
    #[serde(default)]
    pub audio_remediated: bool,
    /// Failure cause.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Terminal state of the proxy workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileOutcome {
    Succeeded,
    Skipped,
    Failed,
}

impl std::fmt::Display for FileOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FileOutcome::Succeeded => write!(f, "succeeded"),
            FileOutcome::Skipped => write!(f, "skipped"),
            FileOutcome::Failed => write!(f, "failed"),
        }
    }
}
