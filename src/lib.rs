//! # castprep
//!
//! Probing and extraction helpers around the `ffprobe`/`ffmpeg` CLI tools,
//! for preparing local media for cast playback.
//!
//! This crate provides:
//!
//! - **Tool discovery** ([`ToolRegistry`]) -- find and cache paths to
//!   ffmpeg and ffprobe, with config overrides.
//! - **Command execution** ([`ToolCommand`]) -- async builder with timeout
//!   support for running external processes.
//! - **Probing** ([`FfprobeProber`], [`MediaInfo`]) -- parse ffprobe JSON
//!   and answer stream-property questions (video vs cover picture,
//!   embedded subtitles, embedded cover art, music tags, subtitle track
//!   selection by language preference).
//! - **Actions** ([`actions`]) -- convert subtitles to WebVTT
//!   ([`subs_to_vtt`], [`video_subs_to_vtt`]) and extract embedded cover
//!   art to JPEG ([`cover_to_jpg`]), plus external cover lookup.
//! - **Charset detection** ([`encoding`]) -- delegated to
//!   `chardetng`/`encoding_rs`, feeding ffmpeg's `-sub_charenc`.
//!
//! All media work happens inside the external binaries; nothing here
//! decodes or encodes.
//!
//! ## Example
//!
//! ```no_run
//! use castprep::{probe, actions, ToolRegistry, ToolPaths};
//!
//! # async fn example() -> castprep::Result<()> {
//! let info = probe("/path/to/movie.mkv").await?;
//! if info.has_embedded_subtitles() {
//!     let registry = ToolRegistry::discover(&ToolPaths::default());
//!     let mut opts = actions::SubtitleOptions::new(&info.file_path);
//!     opts.out_dir = Some("/tmp".into());
//!     opts.stream_index = info.subtitle_track("pl/en/eng");
//!     actions::video_subs_to_vtt(&registry, &opts).await?;
//! }
//! # Ok(())
//! # }
//! ```

pub mod actions;
pub mod command;
pub mod encoding;
mod error;
pub mod probe;
pub mod search;
pub mod tools;

// ---- Re-exports for convenience ----

pub use actions::{
    cover_active, cover_to_jpg, subs_to_vtt, subtitles_active, video_subs_to_vtt, CoverOptions,
    SubtitleOptions,
};
pub use command::{ToolCommand, ToolOutput};
pub use error::{Error, Result};
pub use probe::{FfprobeProber, MediaInfo, Stream, StreamKind};
pub use search::{find_file_in_dir, SearchOptions};
pub use tools::{ToolConfig, ToolInfo, ToolPaths, ToolRegistry};

/// Probe a media file with ffprobe found on `PATH`.
///
/// This is the main entry point for probing files. Use
/// [`FfprobeProber::new`] to probe with an explicit ffprobe path.
pub async fn probe<P: AsRef<std::path::Path>>(path: P) -> Result<MediaInfo> {
    let prober =
        FfprobeProber::from_path().ok_or_else(|| Error::tool_not_found("ffprobe"))?;
    prober.probe(path.as_ref()).await
}
