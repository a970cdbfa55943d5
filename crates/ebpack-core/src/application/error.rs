//! Application layer errors.
//!
//! These errors represent failures in orchestration and in the collaborators
//! behind the ports. Descriptor and template problems are `DomainError`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::{EbpackError, ErrorCategory};

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// The selected packaging tool is not on the search path.
    #[error("Selected packaging tool '{tool}' not found")]
    ToolNotFound { tool: String },

    /// An external command could not be started or exited unsuccessfully.
    #[error("Command '{command}' failed ({status}): {stderr}")]
    CommandFailed {
        command: String,
        status: String,
        stderr: String,
    },

    /// Filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// The operation failed and removing its scratch directory failed too.
    ///
    /// `primary` is the causal failure; `cleanup` is reported alongside it.
    #[error("{primary} (cleanup also failed: {cleanup})")]
    CleanupFailed {
        primary: Box<EbpackError>,
        cleanup: Box<EbpackError>,
    },

    /// A naming collaborator could not produce a value.
    #[error("{collaborator} failed for '{descriptor}': {reason}")]
    ResolverFailed {
        collaborator: &'static str,
        descriptor: String,
        reason: String,
    },

    /// No builtin template with that name.
    #[error("Unknown Dockerfile template '{name}' (known: {known})")]
    UnknownTemplate { name: String, known: String },

    /// No module naming scheme with that name.
    #[error("Unknown module naming scheme '{name}' (known: {known})")]
    UnknownNamingScheme { name: String, known: String },

    /// A descriptor file could not be read or parsed.
    #[error("Failed to load descriptor {path}: {reason}")]
    DescriptorLoad { path: PathBuf, reason: String },
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::ToolNotFound { tool } => vec![
                format!("Install '{}' and make sure it is on your PATH", tool),
                "Or point docker.executable in the configuration at the binary".into(),
            ],
            Self::CommandFailed { command, .. } => vec![
                format!("Try running '{}' by hand", command),
                "Check the command output above for details".into(),
            ],
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that the temporary directory is writable".into(),
                "Set scratch.base_dir to use a different location".into(),
            ],
            Self::CleanupFailed { primary, .. } => {
                let mut s = primary.suggestions();
                s.push("A temporary directory may have been left behind".into());
                s
            }
            Self::UnknownTemplate { known, .. } => {
                vec![format!("Set docker.template to one of: {}", known)]
            }
            Self::UnknownNamingScheme { known, .. } => {
                vec![format!("Set modules.naming_scheme to one of: {}", known)]
            }
            Self::DescriptorLoad { path, .. } => vec![
                format!("Check {}", path.display()),
                "Descriptors are .toml or .json files with at least name and version".into(),
            ],
            Self::ResolverFailed { .. } => vec!["Check the descriptor's toolchain fields".into()],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ToolNotFound { .. } => ErrorCategory::NotFound,
            Self::CommandFailed { .. } | Self::FilesystemError { .. } => ErrorCategory::Internal,
            Self::CleanupFailed { primary, .. } => primary.category(),
            Self::ResolverFailed { .. } => ErrorCategory::Validation,
            Self::UnknownTemplate { .. } | Self::UnknownNamingScheme { .. } => {
                ErrorCategory::Configuration
            }
            Self::DescriptorLoad { .. } => ErrorCategory::Validation,
        }
    }
}
