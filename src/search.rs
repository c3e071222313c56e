//! Directory search for companion files (external covers, subtitle files).

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Options for [`find_file_in_dir`].
#[derive(Debug, Clone, Default)]
pub struct SearchOptions {
    /// Subdirectory names to also accept as matches.
    pub extra_dirs: Vec<String>,
    /// When a match is itself a directory, search one level inside it.
    pub descend: bool,
}

/// Find the first of `names` present in `dir`.
///
/// The directory is listed once and candidates are checked in the order
/// given: `names` first, then [`SearchOptions::extra_dirs`]. With
/// [`SearchOptions::descend`], a match that turns out to be a directory is
/// searched one more level for `names` only; there is no deeper recursion.
///
/// # Errors
///
/// - [`Error::InvalidInput`] when `names` is empty.
/// - [`Error::Io`] when the directory cannot be read.
/// - [`Error::NoMatch`] when nothing matched.
pub fn find_file_in_dir(dir: &Path, names: &[String], opts: &SearchOptions) -> Result<PathBuf> {
    if names.is_empty() {
        return Err(Error::InvalidInput(
            "no file names to search for".to_string(),
        ));
    }

    let entries: Vec<String> = std::fs::read_dir(dir)?
        .filter_map(|e| e.ok())
        .map(|e| e.file_name().to_string_lossy().to_string())
        .collect();

    let found = names
        .iter()
        .chain(opts.extra_dirs.iter())
        .find(|name| entries.iter().any(|e| e == *name));

    let Some(found) = found else {
        return Err(Error::NoMatch {
            dir: dir.to_path_buf(),
        });
    };

    let full_path = dir.join(found);

    if opts.descend && full_path.is_dir() {
        let inner = SearchOptions::default();
        return find_file_in_dir(&full_path, names, &inner);
    }

    tracing::debug!("found {} in {}", found, dir.display());
    Ok(full_path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn finds_first_candidate_present() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("folder.jpg"), b"x").unwrap();
        std::fs::write(dir.path().join("cover.jpg"), b"x").unwrap();

        let found = find_file_in_dir(
            dir.path(),
            &names(&["cover.jpg", "folder.jpg"]),
            &SearchOptions::default(),
        )
        .unwrap();
        assert_eq!(found, dir.path().join("cover.jpg"));
    }

    #[test]
    fn no_match_errors() {
        let dir = tempfile::tempdir().unwrap();
        let err = find_file_in_dir(
            dir.path(),
            &names(&["cover.jpg"]),
            &SearchOptions::default(),
        )
        .unwrap_err();
        assert!(matches!(err, Error::NoMatch { .. }));
    }

    #[test]
    fn empty_names_is_invalid() {
        let dir = tempfile::tempdir().unwrap();
        let err = find_file_in_dir(dir.path(), &[], &SearchOptions::default()).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn missing_dir_is_io_error() {
        let err = find_file_in_dir(
            Path::new("/definitely/not/here"),
            &names(&["cover.jpg"]),
            &SearchOptions::default(),
        )
        .unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn descends_into_matched_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("Covers")).unwrap();
        std::fs::write(dir.path().join("Covers").join("front.jpg"), b"x").unwrap();

        let opts = SearchOptions {
            extra_dirs: vec!["Covers".to_string()],
            descend: true,
        };
        let found = find_file_in_dir(dir.path(), &names(&["front.jpg"]), &opts).unwrap();
        assert_eq!(found, dir.path().join("Covers").join("front.jpg"));
    }

    #[test]
    fn without_descend_returns_the_dir_itself() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("Covers")).unwrap();

        let opts = SearchOptions {
            extra_dirs: vec!["Covers".to_string()],
            descend: false,
        };
        let found = find_file_in_dir(dir.path(), &names(&["front.jpg"]), &opts).unwrap();
        assert_eq!(found, dir.path().join("Covers"));
    }
}
