//! Media analyzer.
//!
//! Reduces a probe result to the handful of properties the plan builder
//! needs. Streams are folded in order and the last video stream decides
//! orientation, the last audio stream decides audio support.

use crate::models::media::{
    BitDepth, MediaProperties, MediaSummary, StreamKind, DEFAULT_BIT_DEPTH,
};
use crate::services::pix_fmts::PixelFormatCatalog;
use crate::services::MediaToolkit;

/// Audio codecs that editors decode without conversion.
const SUPPORTED_AUDIO_CODECS: &[&str] = &["mp3", "opus", "flac", "ac3"];

/// Check if an audio codec can be left untouched.
///
/// Any PCM variant is supported, plus a fixed set of compressed codecs.
pub fn is_audio_codec_supported(codec_name: &str) -> bool {
    codec_name.contains("pcm_") || SUPPORTED_AUDIO_CODECS.contains(&codec_name)
}

/// Analyze a probe result.
///
/// Never fails: pixel formats that cannot be resolved count as 8-bit.
pub fn analyze(
    summary: &MediaSummary,
    catalog: &mut PixelFormatCatalog,
    toolkit: &dyn MediaToolkit,
) -> MediaProperties {
    let mut props = MediaProperties::default();

    for stream in &summary.streams {
        match stream.kind() {
            StreamKind::Video => {
                props.has_video_stream = true;

                let pixel_format = stream.pixel_format.as_deref().unwrap_or_default();
                let bit_depth = match catalog.resolve(toolkit, pixel_format) {
                    BitDepth::Resolved(depth) => depth,
                    BitDepth::Defaulted { depth, cause } => {
                        tracing::warn!(
                            "Could not get bit depth for pixel format '{}' (stream {}): {}",
                            pixel_format,
                            stream.index,
                            cause
                        );
                        tracing::warn!("Using default bit depth of {}", depth);
                        depth
                    }
                };

                tracing::debug!(
                    "Bit depth for pixel format '{}': {}",
                    pixel_format,
                    bit_depth
                );

                props.highest_bit_depth = props
                    .highest_bit_depth
                    .max(bit_depth)
                    .max(DEFAULT_BIT_DEPTH);

                let width = stream.width.unwrap_or(0);
                let height = stream.height.unwrap_or(0);
                props.is_vertical = height >= width;
            }
            StreamKind::Audio => {
                props.has_audio_stream = true;
                props.unsupported_audio_format = !is_audio_codec_supported(&stream.codec_name);
            }
            StreamKind::Other => {}
        }
    }

    props
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::media::StreamDescriptor;
    use crate::models::plan::TranscodePlan;
    use crate::Result;
    use std::path::Path;

    const LISTING: &str = "IO... yuv420p                3             12      8-8-8\n\
IO... yuv420p10le            3             15      10-10-10\n\
IO... yuv444p12le            3             36      12-12-12\n\
IO..B monob                  1              1      1\n";

    struct NoTools;

    impl MediaToolkit for NoTools {
        fn probe(&self, path: &Path) -> Result<MediaSummary> {
            Err(crate::Error::PathNotFound(path.display().to_string()))
        }

        fn list_pixel_formats(&self) -> Result<String> {
            Err(crate::Error::CatalogExecutionFailed("unavailable".to_string()))
        }

        fn transcode(&self, _plan: &TranscodePlan) -> Result<()> {
            Ok(())
        }
    }

    fn video(width: u32, height: u32, pix_fmt: &str) -> StreamDescriptor {
        StreamDescriptor {
            codec_type: "video".to_string(),
            codec_name: "h264".to_string(),
            width: Some(width),
            height: Some(height),
            pixel_format: Some(pix_fmt.to_string()),
            ..Default::default()
        }
    }

    fn audio(codec: &str) -> StreamDescriptor {
        StreamDescriptor {
            codec_type: "audio".to_string(),
            codec_name: codec.to_string(),
            ..Default::default()
        }
    }

    fn run(streams: Vec<StreamDescriptor>) -> MediaProperties {
        let summary = MediaSummary {
            streams,
            ..Default::default()
        };
        let mut catalog = PixelFormatCatalog::from_listing(LISTING);
        analyze(&summary, &mut catalog, &NoTools)
    }

    #[test]
    fn test_is_audio_codec_supported() {
        assert!(is_audio_codec_supported("pcm_s16le"));
        assert!(is_audio_codec_supported("pcm_anything"));
        assert!(is_audio_codec_supported("mp3"));
        assert!(is_audio_codec_supported("opus"));
        assert!(is_audio_codec_supported("flac"));
        assert!(is_audio_codec_supported("ac3"));
        assert!(!is_audio_codec_supported("aac"));
        assert!(!is_audio_codec_supported("eac3"));
        assert!(!is_audio_codec_supported("MP3"));
        assert!(!is_audio_codec_supported(""));
    }

    #[test]
    fn test_no_streams() {
        let props = run(vec![]);
        assert_eq!(props, MediaProperties::default());
        assert!(!props.has_usable_streams());
        assert_eq!(props.highest_bit_depth, 0);
    }

    #[test]
    fn test_landscape_video_with_aac() {
        let props = run(vec![video(1920, 1080, "yuv420p"), audio("aac")]);
        assert_eq!(
            props,
            MediaProperties {
                has_video_stream: true,
                has_audio_stream: true,
                is_vertical: false,
                unsupported_audio_format: true,
                highest_bit_depth: 8,
            }
        );
    }

    #[test]
    fn test_square_is_vertical() {
        let props = run(vec![video(1080, 1080, "yuv420p")]);
        assert!(props.is_vertical);
    }

    #[test]
    fn test_last_video_stream_decides_orientation() {
        let props = run(vec![video(1080, 1920, "yuv420p"), video(1920, 1080, "yuv420p")]);
        assert!(!props.is_vertical);

        let props = run(vec![video(1920, 1080, "yuv420p"), video(1080, 1920, "yuv420p")]);
        assert!(props.is_vertical);
    }

    #[test]
    fn test_highest_bit_depth_across_streams() {
        let props = run(vec![
            video(1920, 1080, "yuv420p10le"),
            video(1920, 1080, "yuv444p12le"),
            video(1920, 1080, "yuv420p"),
        ]);
        assert_eq!(props.highest_bit_depth, 12);
    }

    #[test]
    fn test_unknown_pixel_format_defaults_to_8() {
        let props = run(vec![video(1920, 1080, "made_up_fmt")]);
        assert_eq!(props.highest_bit_depth, 8);

        let mut no_pix_fmt = video(640, 480, "");
        no_pix_fmt.pixel_format = None;
        assert_eq!(run(vec![no_pix_fmt]).highest_bit_depth, 8);
    }

    #[test]
    fn test_low_depth_formats_floor_at_8() {
        let props = run(vec![video(640, 480, "monob")]);
        assert_eq!(props.highest_bit_depth, 8);
    }

    #[test]
    fn test_catalog_unavailable_defaults_to_8() {
        let summary = MediaSummary {
            streams: vec![video(1920, 1080, "yuv420p10le")],
            ..Default::default()
        };
        let mut catalog = PixelFormatCatalog::new();
        let props = analyze(&summary, &mut catalog, &NoTools);
        assert!(props.has_video_stream);
        assert_eq!(props.highest_bit_depth, 8);
    }

    #[test]
    fn test_last_audio_stream_decides_support() {
        let props = run(vec![audio("aac"), audio("flac")]);
        assert!(!props.unsupported_audio_format);

        let props = run(vec![audio("flac"), audio("aac")]);
        assert!(props.unsupported_audio_format);
    }

    #[test]
    fn test_other_streams_ignored() {
        let subtitle = StreamDescriptor {
            codec_type: "subtitle".to_string(),
            codec_name: "mov_text".to_string(),
            ..Default::default()
        };
        let props = run(vec![subtitle]);
        assert!(!props.has_video_stream);
        assert!(!props.has_audio_stream);
    }

    #[test]
    fn test_audio_only_flac() {
        let props = run(vec![audio("flac")]);
        assert!(!props.has_video_stream);
        assert!(props.has_audio_stream);
        assert!(!props.unsupported_audio_format);
        assert_eq!(props.highest_bit_depth, 0);
    }
}
