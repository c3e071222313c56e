//! Embedded cover art extraction and external cover lookup.

use std::path::{Path, PathBuf};

use super::{resolve_out_path, ActiveGuard, COVER_ACTIVE};
use crate::command::ToolCommand;
use crate::error::{Error, Result};
use crate::search::{find_file_in_dir, SearchOptions};
use crate::tools::ToolRegistry;

/// Options for [`cover_to_jpg`].
#[derive(Debug, Clone)]
pub struct CoverOptions {
    /// Music file with an embedded cover picture.
    pub input: PathBuf,
    /// Explicit output file path.
    pub out_path: Option<PathBuf>,
    /// Output directory; the file name is derived from the input stem.
    pub out_dir: Option<PathBuf>,
    /// Extract even when the output file already exists.
    pub overwrite: bool,
}

impl CoverOptions {
    /// Options for extracting from `input` with everything else defaulted.
    pub fn new(input: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            out_path: None,
            out_dir: None,
            overwrite: false,
        }
    }
}

/// Extract the embedded cover picture to a JPEG file.
///
/// The picture stream is copied, not transcoded (`-c copy`), so the input
/// must actually embed an mjpeg cover — check with
/// [`MediaInfo::has_embedded_cover`](crate::MediaInfo::has_embedded_cover)
/// first. Returns the output path; when the output already exists and
/// `overwrite` is false, nothing is spawned.
pub async fn cover_to_jpg(registry: &ToolRegistry, opts: &CoverOptions) -> Result<PathBuf> {
    let out_path = resolve_out_path(
        &opts.input,
        opts.out_path.as_deref(),
        opts.out_dir.as_deref(),
        "jpg",
    )?;

    let _guard = ActiveGuard::raise(&COVER_ACTIVE);

    if !opts.overwrite && out_path.exists() {
        tracing::debug!("cover already exists: {}", out_path.display());
        return Ok(out_path);
    }

    if !opts.input.exists() {
        return Err(Error::file_not_found(&opts.input));
    }

    let ffmpeg = registry.require("ffmpeg")?;

    tracing::info!(
        "extracting cover: {} -> {}",
        opts.input.display(),
        out_path.display()
    );

    let mut cmd = ToolCommand::new(ffmpeg.path.clone());
    cmd.timeout(ffmpeg.timeout);
    cmd.args(["-y", "-i"]);
    cmd.arg(opts.input.to_string_lossy().as_ref());
    cmd.args(["-c", "copy"]);
    cmd.arg(out_path.to_string_lossy().as_ref());
    cmd.execute().await?;

    Ok(out_path)
}

/// Build the candidate file names for an external cover image.
///
/// Each base name is emitted as-is, Capitalized, and UPPERCASE, crossed
/// with each extension in lowercase and uppercase:
/// `cover.jpg`, `Cover.jpg`, `COVER.jpg`, ..., `COVER.JPG`.
pub fn possible_cover_names(names: &[&str], extensions: &[&str]) -> Vec<String> {
    let mut possible = Vec::new();

    for ext in extensions {
        for ext in [ext.to_lowercase(), ext.to_uppercase()] {
            for name in names {
                possible.push(format!("{name}.{ext}"));
                possible.push(format!("{}.{ext}", capitalize(name)));
                possible.push(format!("{}.{ext}", name.to_uppercase()));
            }
        }
    }

    possible
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Find an external cover image in a directory.
///
/// `candidates` is typically built with [`possible_cover_names`]; the
/// first one present in the directory listing wins.
pub fn find_cover_in_dir(dir: &Path, candidates: &[String]) -> Result<PathBuf> {
    find_file_in_dir(dir, candidates, &SearchOptions::default())
}
