//! Scratch space on the local filesystem using `tempfile`.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use ebpack_core::{
    application::{ApplicationError, ports::ScratchSpace},
    error::{EbpackError, EbpackResult},
};

/// Production scratch space: unique directories under a base directory.
#[derive(Debug, Clone, Default)]
pub struct TempScratchSpace {
    base: Option<PathBuf>,
}

impl TempScratchSpace {
    /// Use the system temporary directory (`TMPDIR` on Unix).
    pub fn new() -> Self {
        Self { base: None }
    }

    /// Use `base` instead of the system temporary directory.
    pub fn in_dir(base: impl Into<PathBuf>) -> Self {
        Self {
            base: Some(base.into()),
        }
    }

    pub fn base(&self) -> PathBuf {
        self.base.clone().unwrap_or_else(std::env::temp_dir)
    }
}

impl ScratchSpace for TempScratchSpace {
    fn create_dir(&self, prefix: &str) -> EbpackResult<PathBuf> {
        let base = self.base();
        let dir = tempfile::Builder::new()
            .prefix(prefix)
            .tempdir_in(&base)
            .map_err(|e| map_io_error(&base, e, "create scratch directory"))?;
        // ownership moves to the caller, who removes it through `remove_dir_all`
        Ok(dir.keep())
    }

    fn write_file(&self, dir: &Path, suffix: &str, content: &str) -> EbpackResult<PathBuf> {
        let mut file = tempfile::Builder::new()
            .prefix("tmp")
            .suffix(suffix)
            .tempfile_in(dir)
            .map_err(|e| map_io_error(dir, e, "create file"))?;

        file.write_all(content.as_bytes())
            .and_then(|()| file.flush())
            .map_err(|e| map_io_error(file.path(), e, "write file"))?;

        let (handle, path) = file
            .keep()
            .map_err(|e| map_io_error(dir, e.error, "keep file"))?;
        drop(handle);
        Ok(path)
    }

    fn remove_dir_all(&self, dir: &Path) -> EbpackResult<()> {
        std::fs::remove_dir_all(dir).map_err(|e| map_io_error(dir, e, "remove directory"))
    }
}

fn map_io_error(path: &Path, e: io::Error, operation: &str) -> EbpackError {
    ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: format!("Failed to {}: {}", operation, e),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn creates_prefixed_unique_directories() {
        let base = tempfile::tempdir().unwrap();
        let space = TempScratchSpace::in_dir(base.path());

        let a = space.create_dir("easybuild-docker").unwrap();
        let b = space.create_dir("easybuild-docker").unwrap();

        assert_ne!(a, b);
        for dir in [&a, &b] {
            assert!(dir.is_dir());
            assert_eq!(dir.parent(), Some(base.path()));
            let name = dir.file_name().unwrap().to_str().unwrap();
            assert!(name.starts_with("easybuild-docker"), "{name}");
        }
    }

    #[test]
    fn writes_file_with_suffix_and_content() {
        let base = tempfile::tempdir().unwrap();
        let space = TempScratchSpace::in_dir(base.path());
        let dir = space.create_dir("easybuild-docker").unwrap();

        let file = space
            .write_file(&dir, "Dockerfile.foo-1.2.3", "FROM ubuntu:16.04\n")
            .unwrap();

        assert_eq!(file.parent(), Some(dir.as_path()));
        let name = file.file_name().unwrap().to_str().unwrap();
        assert!(name.ends_with("Dockerfile.foo-1.2.3"), "{name}");
        assert_eq!(fs::read_to_string(&file).unwrap(), "FROM ubuntu:16.04\n");
    }

    #[test]
    fn remove_deletes_directory_and_contents() {
        let base = tempfile::tempdir().unwrap();
        let space = TempScratchSpace::in_dir(base.path());
        let dir = space.create_dir("easybuild-docker").unwrap();
        space.write_file(&dir, "Dockerfile.x", "x").unwrap();

        space.remove_dir_all(&dir).unwrap();
        assert!(!dir.exists());
    }

    #[test]
    fn write_into_missing_directory_fails() {
        let base = tempfile::tempdir().unwrap();
        let space = TempScratchSpace::in_dir(base.path());
        let err = space
            .write_file(&base.path().join("gone"), "Dockerfile.x", "x")
            .unwrap_err();
        assert!(err.to_string().contains("Failed to create file"));
    }

    #[test]
    fn missing_base_fails_to_create() {
        let base = tempfile::tempdir().unwrap();
        let space = TempScratchSpace::in_dir(base.path().join("nope"));
        assert!(space.create_dir("easybuild-docker").is_err());
    }
}
