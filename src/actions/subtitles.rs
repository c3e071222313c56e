//! Subtitle conversion to WebVTT.
//!
//! Both standalone subtitle files and subtitle tracks embedded in video
//! containers are converted by a single ffmpeg invocation with the
//! `webvtt` muxer. The format conversion itself happens inside ffmpeg;
//! this module only assembles the command line, optionally pipes the
//! output through the external WebVTT parser, and writes the result.

use std::path::PathBuf;

use encoding_rs::{Encoding, UTF_8};
use subtp::vtt::WebVtt;

use super::{resolve_out_path, ActiveGuard, SUBTITLES_ACTIVE};
use crate::command::ToolCommand;
use crate::encoding::detect_file_encoding;
use crate::error::{Error, Result};
use crate::tools::ToolRegistry;

/// Options for [`subs_to_vtt`] and [`video_subs_to_vtt`].
#[derive(Debug, Clone)]
pub struct SubtitleOptions {
    /// Subtitle file, or video file when extracting an embedded track.
    pub input: PathBuf,
    /// Explicit output file path.
    pub out_path: Option<PathBuf>,
    /// Output directory; the file name is derived from the input stem.
    pub out_dir: Option<PathBuf>,
    /// Convert even when the output file already exists.
    pub overwrite: bool,
    /// Source character encoding; detected from the file when unset.
    pub encoding: Option<&'static Encoding>,
    /// Global stream index to extract (`-map 0:<n>`).
    pub stream_index: Option<u32>,
    /// Pipe ffmpeg output through the WebVTT parser before writing,
    /// instead of letting ffmpeg write the file directly.
    pub sanitize: bool,
}

impl SubtitleOptions {
    /// Options for converting `input` with everything else defaulted.
    pub fn new(input: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            out_path: None,
            out_dir: None,
            overwrite: false,
            encoding: None,
            stream_index: None,
            sanitize: false,
        }
    }
}

/// Convert a standalone subtitle file to WebVTT.
///
/// The source charset is detected from the file unless
/// [`SubtitleOptions::encoding`] is set. Returns the output path; when the
/// output already exists and `overwrite` is false, nothing is spawned.
pub async fn subs_to_vtt(registry: &ToolRegistry, opts: &SubtitleOptions) -> Result<PathBuf> {
    convert(registry, opts, false).await
}

/// Extract a subtitle track from a video container and convert it to WebVTT.
///
/// Charset detection is skipped: ffmpeg decodes the embedded track itself.
/// Pair with [`MediaInfo::subtitle_track`](crate::MediaInfo::subtitle_track)
/// to pick [`SubtitleOptions::stream_index`].
pub async fn video_subs_to_vtt(registry: &ToolRegistry, opts: &SubtitleOptions) -> Result<PathBuf> {
    convert(registry, opts, true).await
}

async fn convert(
    registry: &ToolRegistry,
    opts: &SubtitleOptions,
    from_video: bool,
) -> Result<PathBuf> {
    let out_path = resolve_out_path(
        &opts.input,
        opts.out_path.as_deref(),
        opts.out_dir.as_deref(),
        "vtt",
    )?;

    let _guard = ActiveGuard::raise(&SUBTITLES_ACTIVE);

    if !opts.overwrite && out_path.exists() {
        tracing::debug!("subtitles already exist: {}", out_path.display());
        return Ok(out_path);
    }

    if !opts.input.exists() {
        return Err(Error::file_not_found(&opts.input));
    }

    let encoding = match opts.encoding {
        Some(e) => e,
        // The demuxed track is already decoded text; no sniffing needed.
        None if from_video => UTF_8,
        None => detect_file_encoding(&opts.input)?,
    };

    let ffmpeg = registry.require("ffmpeg")?;

    tracing::info!(
        "converting subtitles to vtt: {} -> {}",
        opts.input.display(),
        out_path.display()
    );

    let mut cmd = ToolCommand::new(ffmpeg.path.clone());
    cmd.timeout(ffmpeg.timeout);
    cmd.args(["-y", "-sub_charenc"]);
    cmd.arg(encoding.name());
    cmd.arg("-i");
    cmd.arg(opts.input.to_string_lossy().as_ref());

    if let Some(index) = opts.stream_index {
        tracing::debug!("extracting from stream {index}");
        cmd.arg("-map");
        cmd.arg(format!("0:{index}"));
    }

    cmd.args(["-f", "webvtt"]);

    if opts.sanitize {
        cmd.arg("pipe:1");
        let output = cmd.execute().await?;
        let rendered = sanitize_vtt(&output.stdout_text())?;
        std::fs::write(&out_path, rendered)?;
    } else {
        cmd.arg(out_path.to_string_lossy().as_ref());
        cmd.execute().await?;
    }

    Ok(out_path)
}

/// Validate WebVTT text through the external parser and re-render it.
fn sanitize_vtt(text: &str) -> Result<String> {
    let vtt = WebVtt::parse(text).map_err(|e| Error::parse_error("webvtt", e.to_string()))?;
    Ok(vtt.render())
}
