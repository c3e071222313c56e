//! Media probing via the `ffprobe` CLI.
//!
//! [`FfprobeProber`] runs ffprobe with JSON output and maps the result
//! into [`MediaInfo`], which carries the predicates the extraction
//! actions sequence on (is this a video, does it embed subtitles or
//! cover art, which stream holds a requested subtitle language).

pub mod ffprobe;
pub mod types;

pub use self::ffprobe::FfprobeProber;
pub use self::types::{MediaInfo, Stream, StreamKind};
