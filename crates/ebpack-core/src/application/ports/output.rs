//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `ebpack-adapters` crate provides implementations.

use std::path::{Path, PathBuf};

#[cfg(test)]
use mockall::automock;

use crate::domain::BuildDescriptor;
use crate::error::EbpackResult;

/// Port for the full-version convention of the build framework.
///
/// Implemented by:
/// - `ebpack_adapters::naming::EasyBuildFullVersion`
#[cfg_attr(test, automock)]
pub trait FullVersionResolver: Send + Sync {
    /// Software version including toolchain and suffix qualifiers.
    fn determine_full_version(&self, descriptor: &BuildDescriptor) -> EbpackResult<String>;
}

/// Port for the module naming scheme active inside generated images.
///
/// Implemented by:
/// - `ebpack_adapters::naming::EasyBuildMns` (flat)
/// - `ebpack_adapters::naming::HierarchicalMns`
#[cfg_attr(test, automock)]
pub trait ModuleNamingScheme: Send + Sync {
    /// Path segments, relative to the module install root, that a login
    /// shell must `module use` to see the descriptor's module.
    fn determine_init_module_paths(&self, descriptor: &BuildDescriptor)
    -> EbpackResult<Vec<String>>;
}

/// Port for finding executables.
///
/// Implemented by:
/// - `ebpack_adapters::SearchPathLocator`
#[cfg_attr(test, automock)]
pub trait ToolLocator: Send + Sync {
    /// Absolute path of `executable`, or `None` when it cannot be found.
    fn locate(&self, executable: &str) -> Option<PathBuf>;
}

/// Captured result of a finished command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
}

/// Port for running external commands synchronously.
///
/// Implemented by:
/// - `ebpack_adapters::ProcessRunner`
#[cfg_attr(test, automock)]
pub trait CommandRunner: Send + Sync {
    /// Run `program` with `args` in `cwd` and wait for it to exit.
    ///
    /// A non-zero exit status is an error.
    fn run(&self, program: &Path, args: &[String], cwd: &Path) -> EbpackResult<CommandOutput>;
}

/// Port for short-lived scratch directories.
///
/// Implemented by:
/// - `ebpack_adapters::TempScratchSpace` (production)
/// - `ebpack_adapters::MemoryScratchSpace` (testing)
///
/// Names are unique per call, so concurrent users never collide.
#[cfg_attr(test, automock)]
pub trait ScratchSpace: Send + Sync {
    /// Create a new, uniquely-named directory whose name starts with `prefix`.
    fn create_dir(&self, prefix: &str) -> EbpackResult<PathBuf>;

    /// Write `content` to a new, uniquely-named file in `dir` whose name
    /// ends with `suffix`. The file is closed before returning.
    fn write_file(&self, dir: &Path, suffix: &str, content: &str) -> EbpackResult<PathBuf>;

    /// Remove a directory and all contents.
    fn remove_dir_all(&self, dir: &Path) -> EbpackResult<()>;
}
