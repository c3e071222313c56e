//! FFprobe-based media probing.
//!
//! Shells out to `ffprobe -v quiet -print_format json -show_format -show_streams`
//! and maps the JSON output into [`MediaInfo`].

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::command::ToolCommand;
use crate::error::{Error, Result};
use crate::probe::types::{MediaInfo, Stream, StreamKind};

/// A prober backed by the `ffprobe` CLI.
#[derive(Debug, Clone)]
pub struct FfprobeProber {
    /// Path to the ffprobe binary.
    ffprobe_path: PathBuf,
}

impl FfprobeProber {
    /// Create a new prober using the given ffprobe path.
    pub fn new(ffprobe_path: PathBuf) -> Self {
        Self { ffprobe_path }
    }

    /// Create a prober that finds ffprobe on `PATH`.
    pub fn from_path() -> Option<Self> {
        which::which("ffprobe")
            .ok()
            .map(|p| Self { ffprobe_path: p })
    }

    /// Probe a media file and return its metadata.
    pub async fn probe(&self, path: &Path) -> Result<MediaInfo> {
        if !path.exists() {
            return Err(Error::file_not_found(path));
        }

        tracing::debug!("probing: {}", path.display());

        let mut cmd = ToolCommand::new(self.ffprobe_path.clone());
        cmd.args([
            "-v", "quiet",
            "-print_format", "json",
            "-show_format",
            "-show_streams",
        ]);
        cmd.arg(path.to_string_lossy().as_ref());

        let output = cmd.execute().await?;
        let ff: FfprobeOutput = serde_json::from_slice(&output.stdout)
            .map_err(|e| Error::parse_error("ffprobe", format!("JSON parse error: {e}")))?;

        Ok(map_ffprobe_output(path, ff))
    }
}

// ---------------------------------------------------------------------------
// JSON structures
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct FfprobeOutput {
    #[serde(default)]
    format: FfprobeFormat,
    #[serde(default)]
    streams: Vec<FfprobeStream>,
}

#[derive(Debug, Default, Deserialize)]
struct FfprobeFormat {
    format_name: Option<String>,
    duration: Option<String>,
    size: Option<String>,
    #[serde(default)]
    tags: BTreeMap<String, String>,
}

#[derive(Debug, Deserialize)]
struct FfprobeStream {
    index: u32,
    codec_type: Option<String>,
    codec_name: Option<String>,
    width: Option<u32>,
    height: Option<u32>,
    #[serde(default)]
    disposition: FfprobeDisposition,
    #[serde(default)]
    tags: BTreeMap<String, String>,
}

#[derive(Debug, Default, Deserialize)]
struct FfprobeDisposition {
    #[serde(default)]
    default: u8,
    #[serde(default)]
    forced: u8,
}

// ---------------------------------------------------------------------------
// Mapping
// ---------------------------------------------------------------------------

fn map_ffprobe_output(path: &Path, output: FfprobeOutput) -> MediaInfo {
    let duration = output
        .format
        .duration
        .and_then(|s| s.parse::<f64>().ok())
        .map(Duration::from_secs_f64);

    let file_size = output
        .format
        .size
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(0);

    let streams = output.streams.into_iter().map(map_stream).collect();

    MediaInfo {
        file_path: path.to_path_buf(),
        file_size,
        container: output.format.format_name.unwrap_or_default(),
        duration,
        tags: output.format.tags,
        streams,
    }
}

fn map_stream(stream: FfprobeStream) -> Stream {
    let kind = match stream.codec_type.as_deref() {
        Some("video") => StreamKind::Video,
        Some("audio") => StreamKind::Audio,
        Some("subtitle") => StreamKind::Subtitle,
        Some("attachment") => StreamKind::Attachment,
        _ => StreamKind::Other,
    };

    Stream {
        index: stream.index,
        kind,
        codec: stream.codec_name,
        width: stream.width,
        height: stream.height,
        language: stream.tags.get("language").cloned(),
        title: stream.tags.get("title").cloned(),
        default: stream.disposition.default == 1,
        forced: stream.disposition.forced == 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MOVIE_JSON: &str = r#"{
        "streams": [
            {
                "index": 0,
                "codec_name": "h264",
                "codec_type": "video",
                "width": 1920,
                "height": 1080,
                "disposition": { "default": 1, "forced": 0 }
            },
            {
                "index": 1,
                "codec_name": "aac",
                "codec_type": "audio",
                "tags": { "language": "eng" }
            },
            {
                "index": 2,
                "codec_name": "subrip",
                "codec_type": "subtitle",
                "tags": { "language": "pol", "title": "Polski" }
            }
        ],
        "format": {
            "format_name": "matroska,webm",
            "duration": "5400.040000",
            "size": "1073741824"
        }
    }"#;

    #[test]
    fn maps_movie_json() {
        let ff: FfprobeOutput = serde_json::from_str(MOVIE_JSON).unwrap();
        let info = map_ffprobe_output(Path::new("/test/movie.mkv"), ff);

        assert_eq!(info.container, "matroska,webm");
        assert_eq!(info.file_size, 1073741824);
        assert_eq!(info.duration, Some(Duration::from_secs_f64(5400.04)));
        assert_eq!(info.streams.len(), 3);

        assert_eq!(info.streams[0].kind, StreamKind::Video);
        assert_eq!(info.streams[0].width, Some(1920));
        assert!(info.streams[0].default);

        assert_eq!(info.streams[1].kind, StreamKind::Audio);
        assert_eq!(info.streams[1].language.as_deref(), Some("eng"));

        assert_eq!(info.streams[2].kind, StreamKind::Subtitle);
        assert_eq!(info.streams[2].index, 2);
        assert_eq!(info.streams[2].title.as_deref(), Some("Polski"));
    }

    #[test]
    fn tolerates_missing_fields() {
        let ff: FfprobeOutput = serde_json::from_str(r#"{"format": {}, "streams": []}"#).unwrap();
        let info = map_ffprobe_output(Path::new("/test/empty.bin"), ff);
        assert_eq!(info.container, "");
        assert_eq!(info.file_size, 0);
        assert!(info.duration.is_none());
        assert!(info.streams.is_empty());
    }

    #[test]
    fn unknown_codec_type_maps_to_other() {
        let json = r#"{"format": {}, "streams": [{"index": 0, "codec_type": "data"}]}"#;
        let ff: FfprobeOutput = serde_json::from_str(json).unwrap();
        let info = map_ffprobe_output(Path::new("/test/x"), ff);
        assert_eq!(info.streams[0].kind, StreamKind::Other);
    }

    #[tokio::test]
    async fn probe_missing_file_errors() {
        let prober = FfprobeProber::new(PathBuf::from("ffprobe"));
        let err = prober
            .probe(Path::new("/definitely/not/here.mkv"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::FileNotFound { .. }));
    }
}
