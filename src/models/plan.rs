//! Transcode plan model.

use serde::{Deserialize, Serialize};
use std::ffi::{OsStr, OsString};
use std::fmt;

/// What a plan produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanKind {
    /// Downscaled proxy under `Proxy/`.
    Proxy,
    /// Original regenerated from `Originals/` with PCM audio.
    OriginalConversion,
}

/// One external transcode invocation.
///
/// Tokens are the program name followed by its arguments; the last
/// argument is always the output path. Arguments are kept as OS strings
/// so file names that are not valid UTF-8 reach ffmpeg unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscodePlan {
    pub kind: PlanKind,
    pub program: String,
    pub args: Vec<OsString>,
}

impl TranscodePlan {
    /// All tokens, program first.
    pub fn tokens(&self) -> Vec<&OsStr> {
        std::iter::once(OsStr::new(&self.program))
            .chain(self.args.iter().map(OsString::as_os_str))
            .collect()
    }

    /// Path passed to `-i`.
    pub fn input(&self) -> Option<&OsStr> {
        self.flag_value("-i")
    }

    /// Output path (the last argument).
    pub fn output(&self) -> Option<&OsStr> {
        self.args.last().map(OsString::as_os_str)
    }

    /// Value following a flag, if the flag is present.
    pub fn flag_value(&self, flag: &str) -> Option<&OsStr> {
        self.args
            .iter()
            .position(|a| a == flag)
            .and_then(|i| self.args.get(i + 1))
            .map(OsString::as_os_str)
    }
}

/// Lossy rendering for logs.
impl fmt::Display for TranscodePlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered: Vec<_> = self.tokens().iter().map(|t| t.to_string_lossy()).collect();
        write!(f, "{}", rendered.join(" "))
    }
}
