//! Filesystem checks.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use crate::error::{Error, Result};

/// Check that `path` exists and is not a directory.
///
/// # Errors
///
/// [`Error::AssertionFailed`] when the path is missing or a directory,
/// [`Error::Io`] when its metadata cannot be read.
pub fn file_exists(path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    match inspect(path)? {
        Some(PathKind::File) => Ok(()),
        Some(PathKind::Dir) => Err(Error::assertion(format!(
            "expected a file, found a directory\n  path: {}",
            path.display()
        ))),
        None => Err(Error::assertion(format!(
            "file does not exist\n  path: {}",
            path.display()
        ))),
    }
}

/// Check that `path` exists and is a directory.
///
/// # Errors
///
/// [`Error::AssertionFailed`] when the path is missing or not a directory,
/// [`Error::Io`] when its metadata cannot be read.
pub fn dir_exists(path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    match inspect(path)? {
        Some(PathKind::Dir) => Ok(()),
        Some(PathKind::File) => Err(Error::assertion(format!(
            "expected a directory, found a file\n  path: {}",
            path.display()
        ))),
        None => Err(Error::assertion(format!(
            "directory does not exist\n  path: {}",
            path.display()
        ))),
    }
}

/// Check that nothing exists at `path`.
///
/// # Errors
///
/// [`Error::AssertionFailed`] when something does, [`Error::Io`] when the
/// metadata lookup fails for a reason other than absence.
pub fn path_missing(path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    match inspect(path)? {
        None => Ok(()),
        Some(kind) => Err(Error::assertion(format!(
            "path exists\n  path: {}\n  kind: {}",
            path.display(),
            kind.as_str()
        ))),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PathKind {
    File,
    Dir,
}

impl PathKind {
    fn as_str(self) -> &'static str {
        match self {
            Self::File => "file",
            Self::Dir => "directory",
        }
    }
}

fn inspect(path: &Path) -> Result<Option<PathKind>> {
    match fs::metadata(path) {
        Ok(meta) if meta.is_dir() => Ok(Some(PathKind::Dir)),
        Ok(_) => Ok(Some(PathKind::File)),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
        Err(source) => Err(Error::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_checks() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("config.toml");
        std::fs::write(&file, "x = 1").unwrap();

        assert!(file_exists(&file).is_ok());
        assert!(dir_exists(dir.path()).is_ok());
        assert!(path_missing(dir.path().join("nope")).is_ok());
    }

    #[test]
    fn test_wrong_kind() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("a.txt");
        std::fs::write(&file, "").unwrap();

        let err = file_exists(dir.path()).unwrap_err();
        assert!(err.to_string().starts_with("expected a file, found a directory"));
        let err = dir_exists(&file).unwrap_err();
        assert!(err.to_string().starts_with("expected a directory, found a file"));
    }

    #[test]
    fn test_missing_and_present() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("gone");

        let err = file_exists(&missing).unwrap_err();
        assert!(matches!(err, Error::AssertionFailed(_)));
        assert!(err.to_string().starts_with("file does not exist\n  path: "));

        let err = path_missing(dir.path()).unwrap_err();
        assert!(err.to_string().ends_with("  kind: directory"));
    }
}
