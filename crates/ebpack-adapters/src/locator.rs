//! Executable lookup on a search path.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use tracing::trace;

use ebpack_core::application::ports::ToolLocator;

/// Finds executables the way a shell does: first match on `PATH` wins.
#[derive(Debug, Clone, Default)]
pub struct SearchPathLocator {
    dirs: Vec<PathBuf>,
}

impl SearchPathLocator {
    /// Search the directories of the current process `PATH`.
    pub fn from_env() -> Self {
        Self::from_path_var(std::env::var_os("PATH").as_deref())
    }

    /// Search the directories of a `PATH`-style value.
    pub fn from_path_var(value: Option<&OsStr>) -> Self {
        let dirs = value
            .map(|v| std::env::split_paths(v).collect())
            .unwrap_or_default();
        Self { dirs }
    }

    /// Search exactly these directories, in order.
    pub fn with_dirs(dirs: impl IntoIterator<Item = PathBuf>) -> Self {
        Self {
            dirs: dirs.into_iter().collect(),
        }
    }

    pub fn dirs(&self) -> &[PathBuf] {
        &self.dirs
    }
}

impl ToolLocator for SearchPathLocator {
    fn locate(&self, executable: &str) -> Option<PathBuf> {
        if executable.is_empty() {
            return None;
        }

        // a name with a separator is a path, not something to search for
        let as_path = Path::new(executable);
        if as_path.components().count() > 1 {
            return is_executable(as_path).then(|| as_path.to_path_buf());
        }

        self.dirs
            .iter()
            .filter(|dir| !dir.as_os_str().is_empty())
            .map(|dir| dir.join(executable))
            .inspect(|candidate| trace!(candidate = %candidate.display(), "Checking"))
            .find(|candidate| is_executable(candidate))
    }
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;

    std::fs::metadata(path)
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[cfg(unix)]
    fn make_executable(path: &Path) {
        use std::os::unix::fs::PermissionsExt;
        let mut perms = fs::metadata(path).unwrap().permissions();
        perms.set_mode(0o755);
        fs::set_permissions(path, perms).unwrap();
    }

    #[test]
    fn empty_search_path_finds_nothing() {
        let locator = SearchPathLocator::from_path_var(None);
        assert!(locator.locate("docker").is_none());
    }

    #[test]
    fn missing_executable_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let locator = SearchPathLocator::with_dirs([dir.path().to_path_buf()]);
        assert!(locator.locate("docker").is_none());
    }

    #[cfg(unix)]
    #[test]
    fn first_match_wins() {
        let first = tempfile::tempdir().unwrap();
        let second = tempfile::tempdir().unwrap();
        for dir in [&first, &second] {
            let exe = dir.path().join("docker");
            fs::write(&exe, "#!/bin/sh\n").unwrap();
            make_executable(&exe);
        }

        let path_var = std::env::join_paths([first.path(), second.path()]).unwrap();
        let locator = SearchPathLocator::from_path_var(Some(path_var.as_os_str()));
        assert_eq!(locator.locate("docker"), Some(first.path().join("docker")));
    }

    #[cfg(unix)]
    #[test]
    fn non_executable_file_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("docker"), "not a program").unwrap();

        let locator = SearchPathLocator::with_dirs([dir.path().to_path_buf()]);
        assert!(locator.locate("docker").is_none());
    }

    #[test]
    fn directory_is_not_an_executable() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("docker")).unwrap();

        let locator = SearchPathLocator::with_dirs([dir.path().to_path_buf()]);
        assert!(locator.locate("docker").is_none());
    }

    #[cfg(unix)]
    #[test]
    fn explicit_path_is_checked_directly() {
        let dir = tempfile::tempdir().unwrap();
        let exe = dir.path().join("podman");
        fs::write(&exe, "#!/bin/sh\n").unwrap();
        make_executable(&exe);

        let locator = SearchPathLocator::from_path_var(None);
        let explicit = exe.to_str().unwrap();
        assert_eq!(locator.locate(explicit), Some(exe.clone()));
    }
}
