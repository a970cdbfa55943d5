//! CLI errors: exit codes, suggestions and terminal rendering.

use std::error::Error as _;

use owo_colors::OwoColorize;
use thiserror::Error;

use ebpack_core::domain::DomainError;
use ebpack_core::error::{EbpackError, ErrorCategory as CoreCategory};

pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    /// An error propagated from core or the adapters.
    #[error(transparent)]
    Core(#[from] EbpackError),

    /// A configuration file or value could not be used.
    #[error("Configuration error: {message}")]
    ConfigError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("I/O error: {message}")]
    IoError {
        message: String,
        #[source]
        source: std::io::Error,
    },
}

impl From<DomainError> for CliError {
    fn from(err: DomainError) -> Self {
        CliError::Core(err.into())
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::IoError {
            message: err.to_string(),
            source: err,
        }
    }
}

impl CliError {
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Core(core) => core.suggestions(),
            Self::ConfigError { message, .. } => vec![
                format!("Configuration issue: {}", message),
                "Run 'ebpack config path' to see where the config file is read from".into(),
                "Run 'ebpack config list' to see the effective values".into(),
            ],
            Self::IoError { .. } => vec![
                "Check file permissions".into(),
                "If stdout is a closed pipe, this can be ignored".into(),
            ],
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Core(core) => match core.category() {
                CoreCategory::Validation => ErrorCategory::UserError,
                CoreCategory::NotFound => ErrorCategory::NotFound,
                CoreCategory::Configuration => ErrorCategory::Configuration,
                CoreCategory::Internal => ErrorCategory::Internal,
            },
            Self::ConfigError { .. } => ErrorCategory::Configuration,
            Self::IoError { .. } => ErrorCategory::Internal,
        }
    }

    /// Exit code to pass to the OS.
    ///
    /// | Category      | Code |
    /// |---------------|------|
    /// | User error    |  2   |
    /// | Not found     |  3   |
    /// | Configuration |  4   |
    /// | Internal      |  1   |
    pub fn exit_code(&self) -> u8 {
        match self.category() {
            ErrorCategory::UserError => 2,
            ErrorCategory::NotFound => 3,
            ErrorCategory::Configuration => 4,
            ErrorCategory::Internal => 1,
        }
    }

    pub fn format_colored(&self, verbose: bool) -> String {
        let mut output = format!("\n{} {}\n\n", "✗".red().bold(), "Error:".red().bold());
        output.push_str(&format!("  {}\n", self.to_string().red()));

        if verbose {
            let mut source = self.source();
            while let Some(err) = source {
                output.push_str(&format!("\n  {} {}\n", "→".dimmed(), err.to_string().dimmed()));
                source = err.source();
            }
        }

        let suggestions = self.suggestions();
        if !suggestions.is_empty() {
            output.push_str(&format!("\n{}\n", "Suggestions:".yellow().bold()));
            for suggestion in suggestions {
                output.push_str(&format!("  {}\n", suggestion));
            }
        }

        if !verbose {
            output.push_str(&format!(
                "\n{} {}\n",
                "\u{2139}".blue(),
                "Use -v / --verbose for more details.".dimmed(),
            ));
        }
        output
    }

    pub fn format_plain(&self, verbose: bool) -> String {
        let mut out = format!("\nError: {}\n", self);

        if verbose {
            let mut src = self.source();
            while let Some(err) = src {
                out.push_str(&format!("  Caused by: {err}\n"));
                src = err.source();
            }
        }

        let suggestions = self.suggestions();
        if !suggestions.is_empty() {
            out.push_str("\nSuggestions:\n");
            for s in &suggestions {
                out.push_str(&format!("  {s}\n"));
            }
        }

        if !verbose {
            out.push_str("\nUse -v / --verbose for more details.\n");
        }
        out
    }

    pub fn log(&self) {
        match self.category() {
            ErrorCategory::UserError => tracing::warn!("User error: {}", self),
            ErrorCategory::NotFound => tracing::warn!("Not found: {}", self),
            ErrorCategory::Configuration => tracing::error!("Configuration error: {}", self),
            ErrorCategory::Internal => tracing::error!("Internal error: {}", self),
        }

        if let Some(source) = self.source() {
            tracing::debug!("Caused by: {}", source);
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    UserError,
    NotFound,
    Configuration,
    Internal,
}

#[cfg(test)]
mod tests {
    use super::*;
    use ebpack_core::application::ApplicationError;
    use std::io;
    use std::path::PathBuf;

    fn core(err: impl Into<EbpackError>) -> CliError {
        CliError::Core(err.into())
    }

    #[test]
    fn missing_engine_is_not_found() {
        let err = core(ApplicationError::ToolNotFound {
            tool: "docker".into(),
        });
        assert_eq!(err.exit_code(), 3);
        assert_eq!(err.to_string(), "Selected packaging tool 'docker' not found");
        assert!(err.suggestions().iter().any(|s| s.contains("PATH")));
    }

    #[test]
    fn invalid_descriptor_is_user_error() {
        let err: CliError = DomainError::MissingRequiredField { field: "version" }.into();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn unknown_scheme_is_configuration_error() {
        let err = core(ApplicationError::UnknownNamingScheme {
            name: "flat".into(),
            known: "easybuild, hierarchical".into(),
        });
        assert_eq!(err.exit_code(), 4);
    }

    #[test]
    fn failed_command_is_internal() {
        let err = core(ApplicationError::CommandFailed {
            command: "docker --version".into(),
            status: "exit status: 1".into(),
            stderr: "daemon down".into(),
        });
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn config_error_exit_code() {
        let err = CliError::ConfigError {
            message: "x".into(),
            source: None,
        };
        assert_eq!(err.exit_code(), 4);
    }

    #[test]
    fn format_plain_has_header_and_suggestions() {
        let err = core(ApplicationError::DescriptorLoad {
            path: PathBuf::from("foo.toml"),
            reason: "missing field `version`".into(),
        });
        let s = err.format_plain(false);
        assert!(s.contains("Error: Failed to load descriptor foo.toml"));
        assert!(s.contains("Suggestions:"));
        assert!(s.contains("--verbose"));
    }

    #[test]
    fn format_plain_verbose_shows_cause() {
        let err: CliError = io::Error::new(io::ErrorKind::BrokenPipe, "pipe closed").into();
        let s = err.format_plain(true);
        assert!(s.contains("Caused by: pipe closed"));
        assert!(!s.contains("--verbose"));
    }
}
