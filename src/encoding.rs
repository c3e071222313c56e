//! Subtitle character-encoding detection.
//!
//! Detection is delegated to `encoding_rs` (BOM sniffing) and `chardetng`
//! (statistical detection). The returned encoding's canonical name is what
//! ffmpeg's `-sub_charenc` option expects.

use std::path::Path;

use chardetng::EncodingDetector;
use encoding_rs::{Encoding, UTF_8};

use crate::error::Result;

/// Detect the character encoding of a byte buffer.
///
/// Detection priority:
/// 1. BOM (Byte Order Mark) - most reliable
/// 2. UTF-8 validation - if valid UTF-8, assume UTF-8
/// 3. chardetng statistical detection - for legacy encodings
pub fn detect_encoding(buffer: &[u8]) -> &'static Encoding {
    if buffer.is_empty() {
        return UTF_8;
    }

    if let Some((encoding, _bom_len)) = Encoding::for_bom(buffer) {
        return encoding;
    }

    if std::str::from_utf8(buffer).is_ok() {
        return UTF_8;
    }

    // chardetng always produces a guess (windows-1252 at worst).
    let mut detector = EncodingDetector::new();
    detector.feed(buffer, true);
    detector.guess(None, true)
}

/// Detect the character encoding of a subtitle file.
///
/// # Errors
///
/// Only fails when the file cannot be read; the detector itself always
/// yields a guess.
pub fn detect_file_encoding(path: &Path) -> Result<&'static Encoding> {
    let buffer = std::fs::read(path)?;
    let encoding = detect_encoding(&buffer);
    tracing::debug!(
        "detected charset {} for {}",
        encoding.name(),
        path.display()
    );
    Ok(encoding)
}
