//! Extraction actions that shell out to ffmpeg.
//!
//! Each action resolves its output path, short-circuits when the output
//! already exists, and otherwise runs a single ffmpeg invocation. A
//! process-wide busy flag is raised for the duration of each action so a
//! front-end can poll whether an extraction is still running.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

use crate::error::{Error, Result};

mod cover;
mod subtitles;

pub use cover::{cover_to_jpg, find_cover_in_dir, possible_cover_names, CoverOptions};
pub use subtitles::{subs_to_vtt, video_subs_to_vtt, SubtitleOptions};

static SUBTITLES_ACTIVE: AtomicBool = AtomicBool::new(false);
static COVER_ACTIVE: AtomicBool = AtomicBool::new(false);

/// Whether a subtitle conversion is currently running.
pub fn subtitles_active() -> bool {
    SUBTITLES_ACTIVE.load(Ordering::SeqCst)
}

/// Whether a cover extraction is currently running.
pub fn cover_active() -> bool {
    COVER_ACTIVE.load(Ordering::SeqCst)
}

/// RAII guard that raises a busy flag and clears it on every exit path.
pub(crate) struct ActiveGuard(&'static AtomicBool);

impl ActiveGuard {
    pub(crate) fn raise(flag: &'static AtomicBool) -> Self {
        flag.store(true, Ordering::SeqCst);
        Self(flag)
    }
}

impl Drop for ActiveGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// Resolve the output path for an action.
///
/// An explicit `out_path` wins; otherwise the input's file stem is joined
/// to `out_dir` with the given extension.
pub(crate) fn resolve_out_path(
    input: &Path,
    out_path: Option<&Path>,
    out_dir: Option<&Path>,
    ext: &str,
) -> Result<PathBuf> {
    if let Some(p) = out_path {
        return Ok(p.to_path_buf());
    }

    let dir = out_dir.ok_or_else(|| {
        Error::InvalidInput("no output file path or directory".to_string())
    })?;

    let stem = input
        .file_stem()
        .ok_or_else(|| Error::InvalidInput(format!("invalid input path: {}", input.display())))?;

    Ok(dir.join(format!("{}.{ext}", stem.to_string_lossy())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_out_path_wins() {
        let out = resolve_out_path(
            Path::new("/media/movie.mkv"),
            Some(Path::new("/tmp/subs.vtt")),
            Some(Path::new("/ignored")),
            "vtt",
        )
        .unwrap();
        assert_eq!(out, PathBuf::from("/tmp/subs.vtt"));
    }

    #[test]
    fn out_dir_uses_input_stem() {
        let out = resolve_out_path(
            Path::new("/media/Some Movie.mkv"),
            None,
            Some(Path::new("/tmp")),
            "vtt",
        )
        .unwrap();
        assert_eq!(out, PathBuf::from("/tmp/Some Movie.vtt"));
    }

    #[test]
    fn neither_output_is_invalid() {
        let err = resolve_out_path(Path::new("/media/movie.mkv"), None, None, "vtt").unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn guard_clears_flag_on_drop() {
        static FLAG: AtomicBool = AtomicBool::new(false);
        {
            let _guard = ActiveGuard::raise(&FLAG);
            assert!(FLAG.load(Ordering::SeqCst));
        }
        assert!(!FLAG.load(Ordering::SeqCst));
    }
}
