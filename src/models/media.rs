//! Media-related data models.

use serde::{Deserialize, Serialize};

/// Kind of an elementary stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamKind {
    Video,
    Audio,
    Other,
}

/// One elementary stream, as reported by ffprobe.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StreamDescriptor {
    /// Stream index within the container.
    #[serde(default)]
    pub index: u32,
    /// Raw stream type (e.g., "video", "audio", "subtitle").
    #[serde(default)]
    pub codec_type: String,
    /// Codec name (e.g., "h264", "aac").
    #[serde(default)]
    pub codec_name: String,
    /// Codec profile (e.g., "High").
    #[serde(default, rename = "profile")]
    pub codec_profile: Option<String>,
    /// Width in pixels (video only).
    #[serde(default)]
    pub width: Option<u32>,
    /// Height in pixels (video only).
    #[serde(default)]
    pub height: Option<u32>,
    /// Bitrate as reported (ffprobe emits it as a string).
    #[serde(default)]
    pub bit_rate: Option<String>,
    /// Pixel format name (video only).
    #[serde(default, rename = "pix_fmt")]
    pub pixel_format: Option<String>,
}

impl StreamDescriptor {
    /// Classify the stream by its `codec_type`.
    pub fn kind(&self) -> StreamKind {
        match self.codec_type.as_str() {
            "video" => StreamKind::Video,
            "audio" => StreamKind::Audio,
            _ => StreamKind::Other,
        }
    }
}

/// Container-level information.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FormatDescriptor {
    /// File path as seen by ffprobe.
    #[serde(default, rename = "filename")]
    pub file_path: String,
    /// Duration in seconds (string as reported).
    #[serde(default)]
    pub duration: Option<String>,
    /// Overall bitrate (string as reported).
    #[serde(default)]
    pub bit_rate: Option<String>,
}

/// Full probe result for one file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MediaSummary {
    #[serde(default)]
    pub format: FormatDescriptor,
    #[serde(default)]
    pub streams: Vec<StreamDescriptor>,
}

/// Reduced decision record for one file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MediaProperties {
    pub has_video_stream: bool,
    pub has_audio_stream: bool,
    /// Height >= width of the last video stream seen.
    pub is_vertical: bool,
    /// Support status of the last audio stream seen.
    pub unsupported_audio_format: bool,
    /// 0 without video, otherwise at least 8.
    pub highest_bit_depth: u32,
}

impl MediaProperties {
    /// Whether the file has anything a proxy can be made from.
    pub fn has_usable_streams(&self) -> bool {
        self.has_video_stream || self.has_audio_stream
    }
}

/// Default bit depth used when a pixel format cannot be resolved.
pub const DEFAULT_BIT_DEPTH: u32 = 8;

/// Outcome of a bit depth lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BitDepth {
    /// Found in the pixel format catalog.
    Resolved(u32),
    /// Lookup failed; `depth` is the substituted default.
    Defaulted { depth: u32, cause: String },
}

impl BitDepth {
    /// Fall back to the default depth, remembering why.
    pub fn defaulted(cause: impl Into<String>) -> Self {
        BitDepth::Defaulted {
            depth: DEFAULT_BIT_DEPTH,
            cause: cause.into(),
        }
    }

    /// The usable depth regardless of how it was obtained.
    pub fn value(&self) -> u32 {
        match self {
            BitDepth::Resolved(depth) => *depth,
            BitDepth::Defaulted { depth, .. } => *depth,
        }
    }
}

/// Pixel format catalog row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelFormatEntry {
    pub name: String,
    pub nb_components: u32,
    pub bits_per_pixel: u32,
    /// Raw bit depth field, e.g. "8" or "10-10-10".
    pub bit_depth: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stream_kind() {
        let mut stream = StreamDescriptor {
            codec_type: "video".to_string(),
            ..Default::default()
        };
        assert_eq!(stream.kind(), StreamKind::Video);

        stream.codec_type = "audio".to_string();
        assert_eq!(stream.kind(), StreamKind::Audio);

        stream.codec_type = "subtitle".to_string();
        assert_eq!(stream.kind(), StreamKind::Other);
    }

    #[test]
    fn test_bit_depth_value() {
        assert_eq!(BitDepth::Resolved(10).value(), 10);
        assert_eq!(BitDepth::defaulted("missing").value(), 8);
    }
}
