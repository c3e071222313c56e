//! Media information types.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Embedded cover art is stored as a one-frame video stream with one of
/// these codecs, so a stream carrying them is not motion video.
const PICTURE_CODECS: &[&str] = &["mjpeg", "png"];

/// Information about a media file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaInfo {
    /// Path to the media file.
    pub file_path: PathBuf,
    /// File size in bytes.
    pub file_size: u64,
    /// Container format (e.g. "matroska,webm").
    pub container: String,
    /// Duration of the media.
    pub duration: Option<Duration>,
    /// Format-level tags as reported by the container.
    pub tags: BTreeMap<String, String>,
    /// All streams, in container order.
    pub streams: Vec<Stream>,
}

/// Stream classification.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StreamKind {
    /// Video stream (including embedded cover pictures).
    Video,
    /// Audio stream.
    Audio,
    /// Subtitle stream.
    Subtitle,
    /// Attachment (fonts, etc).
    Attachment,
    /// Anything else ffprobe reports.
    Other,
}

/// Information about a single stream.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Stream {
    /// Global stream index as reported by ffprobe; used for `-map 0:<n>`.
    pub index: u32,
    /// Stream classification.
    pub kind: StreamKind,
    /// Codec name (e.g. "h264", "aac", "subrip", "mjpeg").
    pub codec: Option<String>,
    /// Width in pixels, for video streams.
    pub width: Option<u32>,
    /// Height in pixels, for video streams.
    pub height: Option<u32>,
    /// Language tag, if the container carries one.
    pub language: Option<String>,
    /// Title tag, if the container carries one.
    pub title: Option<String>,
    /// Whether this is the default track.
    pub default: bool,
    /// Whether this is a forced track.
    pub forced: bool,
}

impl Stream {
    fn codec_is(&self, name: &str) -> bool {
        self.codec.as_deref() == Some(name)
    }
}

impl MediaInfo {
    /// Whether the file carries motion video.
    ///
    /// A lone picture stream (mjpeg/png cover art) does not qualify, and
    /// neither does a single-stream file: real video containers carry at
    /// least a video and an audio stream.
    pub fn is_video(&self) -> bool {
        if self.streams.len() < 2 {
            return false;
        }

        self.streams.iter().any(|s| {
            s.kind == StreamKind::Video
                && !PICTURE_CODECS.iter().any(|&c| s.codec_is(c))
        })
    }

    /// Whether the file is a video with at least one embedded subtitle track.
    pub fn has_embedded_subtitles(&self) -> bool {
        self.is_video() && self.streams.iter().any(|s| s.kind == StreamKind::Subtitle)
    }

    /// Whether the file carries an audio stream.
    pub fn is_audio(&self) -> bool {
        self.streams.iter().any(|s| s.kind == StreamKind::Audio)
    }

    /// Whether the file carries embedded cover art (an mjpeg picture stream).
    pub fn has_embedded_cover(&self) -> bool {
        self.streams.iter().any(|s| s.codec_is("mjpeg"))
    }

    /// Format-level music tags with normalized (lowercase) keys.
    ///
    /// Some containers write uppercase tag keys (`TITLE`, `ARTIST`, ...);
    /// when an uppercase `TITLE` is present every key is lowercased.
    /// A tag map without any title at all yields `None`.
    pub fn music_tags(&self) -> Option<BTreeMap<String, String>> {
        if self.tags.contains_key("TITLE") {
            Some(
                self.tags
                    .iter()
                    .map(|(k, v)| (k.to_lowercase(), v.clone()))
                    .collect(),
            )
        } else if self.tags.contains_key("title") {
            Some(self.tags.clone())
        } else {
            None
        }
    }

    /// Find the global index of a subtitle stream matching a language
    /// preference list.
    ///
    /// `preferred` is a `/`-separated list tried in order (e.g. `"pl/en/eng"`).
    /// For each language the `language` tag is matched first; streams that
    /// only carry the language in their `title` tag are matched as a
    /// fallback.
    pub fn subtitle_track(&self, preferred: &str) -> Option<u32> {
        preferred
            .split('/')
            .filter(|lang| !lang.is_empty())
            .find_map(|lang| self.subtitle_track_for(&lang.to_lowercase()))
    }

    fn subtitle_track_for(&self, lang: &str) -> Option<u32> {
        tracing::debug!("searching for subtitle language: {lang}");

        let matches = |tag: &Option<String>| {
            tag.as_deref().is_some_and(|t| {
                let t = t.to_lowercase();
                // "eng" matches "eng", "english" and "English (eng)" style tags.
                t == lang || t.starts_with(lang) || t.contains(&format!("({lang}"))
            })
        };

        let subs = || self.streams.iter().filter(|s| s.kind == StreamKind::Subtitle);

        let found = subs()
            .find(|s| matches(&s.language))
            // Workaround for streams without language metadata.
            .or_else(|| subs().find(|s| matches(&s.title)));

        match found {
            Some(stream) => {
                tracing::debug!("found subtitle track at stream index {}", stream.index);
                Some(stream.index)
            }
            None => {
                tracing::debug!("requested subtitle language not found");
                None
            }
        }
    }
}
