//! Transcode plan builder.
//!
//! Pure functions that turn analyzed properties and paths into ffmpeg
//! invocations. Nothing here touches the filesystem or spawns processes.

use crate::models::media::MediaProperties;
use crate::models::plan::{PlanKind, TranscodePlan};
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Subdirectory holding proxies.
pub const PROXY_DIR: &str = "Proxy";
/// Subdirectory holding untouched originals.
pub const ORIGINALS_DIR: &str = "Originals";
/// Proxy container extension.
pub const PROXY_EXTENSION: &str = "mov";

const FFMPEG: &str = "ffmpeg";
const HWACCEL_DEVICE: &str = "cuda";
const HW_VIDEO_ENCODER: &str = "h264_nvenc";
const SW_VIDEO_ENCODER: &str = "libx264";
const PROXY_PIXEL_FORMAT: &str = "yuv420p";
const PROXY_MAX_RATE: &str = "6M";
const PROXY_PRESET: &str = "fast";
const VERTICAL_SCALE: &str = "scale=540:-2";
const HORIZONTAL_SCALE: &str = "scale=960:-2";
const PCM_AUDIO_CODEC: &str = "pcm_s16le";

/// `<dir>/Proxy/<stem>.mov` for a source at `<dir>/<stem>.<ext>`.
pub fn proxy_path_for(source: &Path) -> PathBuf {
    let parent = source.parent().unwrap_or_else(|| Path::new(""));
    let stem = source.file_stem().unwrap_or_default();

    let mut file_name = stem.to_os_string();
    file_name.push(".");
    file_name.push(PROXY_EXTENSION);

    parent.join(PROXY_DIR).join(file_name)
}

/// `<dir>/Originals/<name>` for a source at `<dir>/<name>`.
pub fn original_path_for(source: &Path) -> PathBuf {
    let parent = source.parent().unwrap_or_else(|| Path::new(""));
    let file_name = source.file_name().unwrap_or_default();

    parent.join(ORIGINALS_DIR).join(file_name)
}

fn base_args() -> Vec<OsString> {
    ["-y", "-hide_banner", "-loglevel", "error"]
        .into_iter()
        .map(OsString::from)
        .collect()
}

fn push_all(args: &mut Vec<OsString>, tokens: &[&str]) {
    args.extend(tokens.iter().map(OsString::from));
}

/// Build the proxy transcode.
///
/// Video is downscaled to 960 wide (540 when vertical), capped in bitrate
/// and flattened to 8-bit when the source is deeper. Unsupported audio is
/// forced to PCM; supported audio gets no flags.
pub fn build_proxy_plan(
    source: &Path,
    proxy: &Path,
    props: &MediaProperties,
    hwaccel: bool,
) -> TranscodePlan {
    let mut args = base_args();

    if hwaccel {
        push_all(&mut args, &["-hwaccel", HWACCEL_DEVICE]);
    }

    push_all(&mut args, &["-i"]);
    args.push(source.as_os_str().to_os_string());

    if props.has_video_stream {
        let encoder = if hwaccel {
            HW_VIDEO_ENCODER
        } else {
            SW_VIDEO_ENCODER
        };
        push_all(&mut args, &["-c:v", encoder]);

        if props.highest_bit_depth > 8 {
            push_all(&mut args, &["-pix_fmt", PROXY_PIXEL_FORMAT]);
        }

        push_all(
            &mut args,
            &["-maxrate", PROXY_MAX_RATE, "-preset", PROXY_PRESET],
        );

        let scale = if props.is_vertical {
            VERTICAL_SCALE
        } else {
            HORIZONTAL_SCALE
        };
        push_all(&mut args, &["-vf", scale]);
    }

    if props.has_audio_stream && props.unsupported_audio_format {
        push_all(&mut args, &["-c:a", PCM_AUDIO_CODEC]);
    }

    args.push(proxy.as_os_str().to_os_string());

    TranscodePlan {
        kind: PlanKind::Proxy,
        program: FFMPEG.to_string(),
        args,
    }
}

/// Build the transcode that regenerates an original from `Originals/`.
///
/// `current` is the path the original used to occupy; video is copied and
/// audio forced to PCM.
pub fn build_original_conversion_plan(current: &Path) -> TranscodePlan {
    let mut args = base_args();

    push_all(&mut args, &["-i"]);
    args.push(original_path_for(current).into_os_string());
    push_all(&mut args, &["-c:v", "copy", "-c:a", PCM_AUDIO_CODEC]);
    args.push(current.as_os_str().to_os_string());

    TranscodePlan {
        kind: PlanKind::OriginalConversion,
        program: FFMPEG.to_string(),
        args,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsStr;

    fn props(video: bool, audio: bool) -> MediaProperties {
        MediaProperties {
            has_video_stream: video,
            has_audio_stream: audio,
            is_vertical: false,
            unsupported_audio_format: false,
            highest_bit_depth: if video { 8 } else { 0 },
        }
    }

    #[test]
    fn test_proxy_path_for() {
        assert_eq!(
            proxy_path_for(Path::new("/media/clip.MP4")),
            PathBuf::from("/media/Proxy/clip.mov")
        );
        assert_eq!(
            proxy_path_for(Path::new("/media/take.2.mkv")),
            PathBuf::from("/media/Proxy/take.2.mov")
        );
        assert_eq!(
            proxy_path_for(Path::new("clip.mov")),
            PathBuf::from("Proxy/clip.mov")
        );
    }

    #[test]
    fn test_original_path_for() {
        assert_eq!(
            original_path_for(Path::new("/media/clip.MP4")),
            PathBuf::from("/media/Originals/clip.MP4")
        );
    }

    #[test]
    fn test_proxy_plan_hwaccel_landscape() {
        let plan = build_proxy_plan(
            Path::new("/m/a.mp4"),
            Path::new("/m/Proxy/a.mov"),
            &props(true, true),
            true,
        );

        assert_eq!(
            plan.tokens(),
            vec![
                "ffmpeg", "-y", "-hide_banner", "-loglevel", "error", "-hwaccel", "cuda", "-i",
                "/m/a.mp4", "-c:v", "h264_nvenc", "-maxrate", "6M", "-preset", "fast", "-vf",
                "scale=960:-2", "/m/Proxy/a.mov",
            ]
        );
        assert_eq!(plan.kind, PlanKind::Proxy);
    }

    #[test]
    fn test_proxy_plan_software_vertical_high_depth() {
        let mut p = props(true, true);
        p.is_vertical = true;
        p.highest_bit_depth = 10;
        p.unsupported_audio_format = true;

        let plan = build_proxy_plan(Path::new("a.mkv"), Path::new("Proxy/a.mov"), &p, false);

        assert_eq!(
            plan.tokens(),
            vec![
                "ffmpeg", "-y", "-hide_banner", "-loglevel", "error", "-i", "a.mkv", "-c:v",
                "libx264", "-pix_fmt", "yuv420p", "-maxrate", "6M", "-preset", "fast", "-vf",
                "scale=540:-2", "-c:a", "pcm_s16le", "Proxy/a.mov",
            ]
        );
    }

    #[test]
    fn test_proxy_plan_8bit_keeps_pixel_format() {
        let plan = build_proxy_plan(Path::new("a"), Path::new("b"), &props(true, false), false);
        assert!(plan.flag_value("-pix_fmt").is_none());
    }

    #[test]
    fn test_proxy_plan_audio_only_supported() {
        let plan = build_proxy_plan(Path::new("a.flac"), Path::new("b.mov"), &props(false, true), true);

        assert!(plan.flag_value("-c:v").is_none());
        assert!(plan.flag_value("-vf").is_none());
        assert!(plan.flag_value("-c:a").is_none());
        assert_eq!(plan.input(), Some(OsStr::new("a.flac")));
        assert_eq!(plan.output(), Some(OsStr::new("b.mov")));
    }

    #[test]
    fn test_unsupported_flag_without_audio_stream_is_ignored() {
        let mut p = props(true, false);
        p.unsupported_audio_format = true;
        let plan = build_proxy_plan(Path::new("a"), Path::new("b"), &p, true);
        assert!(plan.flag_value("-c:a").is_none());
    }

    #[test]
    fn test_proxy_plan_is_deterministic() {
        let p = props(true, true);
        let first = build_proxy_plan(Path::new("x.mp4"), Path::new("Proxy/x.mov"), &p, true);
        let second = build_proxy_plan(Path::new("x.mp4"), Path::new("Proxy/x.mov"), &p, true);
        assert_eq!(first, second);
    }

    #[test]
    fn test_original_conversion_plan() {
        let plan = build_original_conversion_plan(Path::new("/m/a.mp4"));

        assert_eq!(
            plan.tokens(),
            vec![
                "ffmpeg", "-y", "-hide_banner", "-loglevel", "error", "-i",
                "/m/Originals/a.mp4", "-c:v", "copy", "-c:a", "pcm_s16le", "/m/a.mp4",
            ]
        );
        assert_eq!(plan.kind, PlanKind::OriginalConversion);
    }

    #[test]
    fn test_plan_display() {
        let plan = build_original_conversion_plan(Path::new("a.mp4"));
        assert_eq!(
            plan.to_string(),
            "ffmpeg -y -hide_banner -loglevel error -i Originals/a.mp4 -c:v copy -c:a pcm_s16le a.mp4"
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_plans_keep_non_utf8_paths() {
        use std::os::unix::ffi::OsStrExt;

        let source = Path::new(OsStr::from_bytes(b"/media/clip\xff.mp4"));
        let proxy = proxy_path_for(source);

        let plan = build_proxy_plan(source, &proxy, &props(true, true), true);
        assert_eq!(plan.input(), Some(source.as_os_str()));
        assert_eq!(plan.output(), Some(proxy.as_os_str()));
        assert_eq!(
            plan.output().map(OsStr::as_bytes),
            Some(&b"/media/Proxy/clip\xff.mov"[..])
        );

        let conversion = build_original_conversion_plan(source);
        assert_eq!(
            conversion.input().map(OsStr::as_bytes),
            Some(&b"/media/Originals/clip\xff.mp4"[..])
        );
        assert_eq!(conversion.output(), Some(source.as_os_str()));
    }
}
