//! In-memory scratch space for testing.

use std::{
    collections::{BTreeMap, BTreeSet},
    path::{Path, PathBuf},
    sync::{Arc, RwLock},
};

use ebpack_core::{
    application::{ApplicationError, ports::ScratchSpace},
    error::EbpackResult,
};

/// In-memory scratch space for testing.
///
/// Clones share state, so a test can keep a handle while the packager owns
/// another.
#[derive(Debug, Clone, Default)]
pub struct MemoryScratchSpace {
    inner: Arc<RwLock<Inner>>,
}

#[derive(Debug, Default)]
struct Inner {
    counter: u64,
    dirs: BTreeSet<PathBuf>,
    files: BTreeMap<PathBuf, String>,
    created: Vec<PathBuf>,
    fail_writes: bool,
    fail_removals: bool,
}

impl MemoryScratchSpace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every `write_file` fail.
    pub fn failing_writes(self) -> Self {
        self.write_inner(|i| i.fail_writes = true);
        self
    }

    /// Make every `remove_dir_all` fail.
    pub fn failing_removals(self) -> Self {
        self.write_inner(|i| i.fail_removals = true);
        self
    }

    /// Every directory ever created, in order.
    pub fn created_dirs(&self) -> Vec<PathBuf> {
        self.read_inner(|i| i.created.clone())
    }

    /// Directories that still exist.
    pub fn live_dirs(&self) -> Vec<PathBuf> {
        self.read_inner(|i| i.dirs.iter().cloned().collect())
    }

    /// Read a file's content (testing helper).
    pub fn read_file(&self, path: &Path) -> Option<String> {
        self.read_inner(|i| i.files.get(path).cloned())
    }

    /// Every file ever written with its content, including removed ones.
    pub fn written(&self) -> Vec<(PathBuf, String)> {
        self.read_inner(|i| i.files.iter().map(|(p, c)| (p.clone(), c.clone())).collect())
    }

    fn read_inner<T>(&self, f: impl FnOnce(&Inner) -> T) -> T {
        match self.inner.read() {
            Ok(guard) => f(&guard),
            Err(poisoned) => f(&poisoned.into_inner()),
        }
    }

    fn write_inner<T>(&self, f: impl FnOnce(&mut Inner) -> T) -> T {
        match self.inner.write() {
            Ok(mut guard) => f(&mut guard),
            Err(poisoned) => f(&mut poisoned.into_inner()),
        }
    }
}

impl ScratchSpace for MemoryScratchSpace {
    fn create_dir(&self, prefix: &str) -> EbpackResult<PathBuf> {
        Ok(self.write_inner(|i| {
            i.counter += 1;
            let dir = PathBuf::from(format!("/memory/{prefix}{:06}", i.counter));
            i.dirs.insert(dir.clone());
            i.created.push(dir.clone());
            dir
        }))
    }

    fn write_file(&self, dir: &Path, suffix: &str, content: &str) -> EbpackResult<PathBuf> {
        self.write_inner(|i| {
            if i.fail_writes || !i.dirs.contains(dir) {
                return Err(ApplicationError::FilesystemError {
                    path: dir.to_path_buf(),
                    reason: "Failed to write file: simulated failure".into(),
                }
                .into());
            }
            i.counter += 1;
            let path = dir.join(format!("tmp{:06}{suffix}", i.counter));
            i.files.insert(path.clone(), content.to_string());
            Ok(path)
        })
    }

    fn remove_dir_all(&self, dir: &Path) -> EbpackResult<()> {
        self.write_inner(|i| {
            if i.fail_removals {
                return Err(ApplicationError::FilesystemError {
                    path: dir.to_path_buf(),
                    reason: "Failed to remove directory: simulated failure".into(),
                }
                .into());
            }
            i.dirs.remove(dir);
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lifecycle() {
        let space = MemoryScratchSpace::new();
        let dir = space.create_dir("easybuild-docker").unwrap();
        let file = space.write_file(&dir, "Dockerfile.a-1", "x").unwrap();

        assert_eq!(space.live_dirs(), vec![dir.clone()]);
        assert_eq!(file.parent(), Some(dir.as_path()));
        assert_eq!(space.read_file(&file).as_deref(), Some("x"));

        space.remove_dir_all(&dir).unwrap();
        assert!(space.live_dirs().is_empty());
        assert_eq!(space.created_dirs(), vec![dir]);
    }

    #[test]
    fn simulated_failures() {
        let space = MemoryScratchSpace::new().failing_writes().failing_removals();
        let dir = space.create_dir("p").unwrap();
        assert!(space.write_file(&dir, "s", "c").is_err());
        assert!(space.remove_dir_all(&dir).is_err());
        assert_eq!(space.live_dirs(), vec![dir]);
    }

    #[test]
    fn write_outside_created_dir_fails() {
        let space = MemoryScratchSpace::new();
        assert!(space.write_file(Path::new("/elsewhere"), "s", "c").is_err());
    }
}
