//! Scoped ownership of a scratch directory.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::application::ports::ScratchSpace;
use crate::error::EbpackResult;

/// Owns a directory created through a [`ScratchSpace`] and removes it.
///
/// Call [`ScratchGuard::release`] to remove the directory and observe a
/// removal failure. A guard dropped without `release` (early return, panic)
/// removes the directory best-effort and only logs a failure.
pub struct ScratchGuard<'a> {
    space: &'a dyn ScratchSpace,
    dir: Option<PathBuf>,
}

impl<'a> ScratchGuard<'a> {
    pub fn create(space: &'a dyn ScratchSpace, prefix: &str) -> EbpackResult<Self> {
        let dir = space.create_dir(prefix)?;
        debug!(path = %dir.display(), "Scratch directory created");
        Ok(Self {
            space,
            dir: Some(dir),
        })
    }

    pub fn path(&self) -> &Path {
        // only `release` and `drop` take the path, and both consume the guard
        self.dir.as_deref().unwrap_or(Path::new(""))
    }

    /// Remove the directory now.
    pub fn release(mut self) -> EbpackResult<()> {
        match self.dir.take() {
            Some(dir) => {
                self.space.remove_dir_all(&dir)?;
                debug!(path = %dir.display(), "Scratch directory removed");
                Ok(())
            }
            None => Ok(()),
        }
    }
}

impl Drop for ScratchGuard<'_> {
    fn drop(&mut self) {
        if let Some(dir) = self.dir.take() {
            if let Err(e) = self.space.remove_dir_all(&dir) {
                warn!(
                    error = %e,
                    path = %dir.display(),
                    "Failed to remove scratch directory"
                );
            }
        }
    }
}
