//! Error types for the media proxy tool.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the media proxy tool.
#[derive(Error, Debug)]
pub enum Error {
    // Preflight errors
    #[error("{0} not found. Install FFmpeg: sudo apt install ffmpeg")]
    ToolNotFound(String),

    // File system errors
    #[error("Path not found: {0}")]
    PathNotFound(String),

    #[error("Not a directory: {0}")]
    NotADirectory(String),

    // Probe errors
    #[error("ffprobe failed for {path}: {output}")]
    ProbeExecutionFailed { path: String, output: String },

    #[error("Could not decode ffprobe output for {path}: {source}")]
    ProbeParseFailed {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("No video or audio stream found: {0}")]
    NoUsableStreams(String),

    // Pixel format catalog errors
    #[error("Bit depth not found for pixel format: {0}")]
    BitDepthNotFound(String),

    #[error("Could not list pixel formats: {0}")]
    CatalogExecutionFailed(String),

    // Workflow errors
    #[error("Could not prepare proxy directory {path}: {source}")]
    ProxyDirectoryUnavailable {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Transcode failed for {path}: {message}")]
    TranscodeExecutionFailed { path: String, message: String },

    #[error("Original file already exists: {0}")]
    OriginalAlreadyExists(String),

    #[error("Could not move {path} to Originals: {source}")]
    OriginalRelocationFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },

    // Configuration errors
    #[error("Invalid config file {path}: {message}")]
    InvalidConfig { path: String, message: String },

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // JSON errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Whether this error ends processing of a single file only.
    ///
    /// Everything except missing tools is file-scoped; the batch moves on.
    pub fn is_file_scoped(&self) -> bool {
        !matches!(self, Error::ToolNotFound(_))
    }
}
