//! Configuration model.

use crate::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Media extensions processed by default.
pub const DEFAULT_EXTENSIONS: &[&str] = &[
    "mp4", "avi", "mkv", "mov", "flv", "wmv", "mp3", "wav", "aac", "ogg", "flac",
];

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Use CUDA decoding and the NVENC encoder.
    pub hwaccel: bool,
    /// External tool locations.
    pub tools: ToolsConfig,
    /// Candidate selection.
    pub scan: ScanConfig,
}

/// External tool configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolsConfig {
    /// Explicit ffmpeg path; looked up on PATH when unset.
    pub ffmpeg: Option<PathBuf>,
    /// Explicit ffprobe path; looked up on PATH when unset.
    pub ffprobe: Option<PathBuf>,
}

/// Scan configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Extensions (without dot, case-insensitive) treated as media.
    pub extensions: Vec<String>,
    /// Descend into subdirectories.
    pub recursive: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            hwaccel: true,
            tools: ToolsConfig::default(),
            scan: ScanConfig::default(),
        }
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            extensions: DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            recursive: false,
        }
    }
}

impl ToolsConfig {
    /// ffmpeg program to invoke.
    pub fn ffmpeg_program(&self) -> PathBuf {
        self.ffmpeg.clone().unwrap_or_else(|| PathBuf::from("ffmpeg"))
    }

    /// ffprobe program to invoke.
    pub fn ffprobe_program(&self) -> PathBuf {
        self.ffprobe.clone().unwrap_or_else(|| PathBuf::from("ffprobe"))
    }
}

/// Get the configuration directory path.
fn dirs_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("media_proxy")
}

/// Parse configuration from TOML text.
pub fn parse_config(content: &str, origin: &Path) -> Result<Config> {
    toml::from_str(content).map_err(|e| crate::Error::InvalidConfig {
        path: origin.display().to_string(),
        message: e.to_string(),
    })
}

/// Load configuration.
///
/// An explicit path must exist and parse. Without one, the user config file
/// is used when it is readable and valid, otherwise defaults.
pub fn load_config(explicit: Option<&Path>) -> Result<Config> {
    if let Some(path) = explicit {
        let content = std::fs::read_to_string(path).map_err(|e| crate::Error::InvalidConfig {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        return parse_config(&content, path);
    }

    let config_path = dirs_config_path().join("config.toml");

    if config_path.exists() {
        if let Ok(content) = std::fs::read_to_string(&config_path) {
            match parse_config(&content, &config_path) {
                Ok(config) => return Ok(config),
                Err(e) => tracing::warn!("Ignoring config file: {}", e),
            }
        }
    }

    Ok(Config::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert!(config.hwaccel);
        assert!(!config.scan.recursive);
        assert_eq!(config.scan.extensions.len(), 11);
        assert_eq!(config.tools.ffmpeg_program(), PathBuf::from("ffmpeg"));
        assert_eq!(config.tools.ffprobe_program(), PathBuf::from("ffprobe"));
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = parse_config(
            "hwaccel = false\n[tools]\nffmpeg = \"/opt/ffmpeg/bin/ffmpeg\"\n",
            Path::new("config.toml"),
        )
        .unwrap();

        assert!(!config.hwaccel);
        assert_eq!(
            config.tools.ffmpeg_program(),
            PathBuf::from("/opt/ffmpeg/bin/ffmpeg")
        );
        assert_eq!(config.tools.ffprobe_program(), PathBuf::from("ffprobe"));
        assert!(config.scan.extensions.iter().any(|e| e == "mkv"));
    }

    #[test]
    fn test_invalid_toml() {
        let result = parse_config("hwaccel = \"maybe\"", Path::new("bad.toml"));
        assert!(matches!(result, Err(crate::Error::InvalidConfig { .. })));
    }
}
