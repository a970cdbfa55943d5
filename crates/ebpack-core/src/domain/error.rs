// ============================================================================
// domain/error.rs - DOMAIN ERRORS
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (so they can be carried inside cleanup reports)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    // ========================================================================
    // Descriptor Errors
    // ========================================================================
    #[error("Required field missing: {field}")]
    MissingRequiredField { field: &'static str },

    #[error("Invalid build descriptor '{name}': {reason}")]
    InvalidDescriptor { name: String, reason: String },

    #[error("Invalid packaging tool release '{value}': {reason}")]
    InvalidToolRelease { value: String, reason: String },

    #[error("No build targets given")]
    NoBuildTargets,

    // ========================================================================
    // Template Errors
    // ========================================================================
    #[error("Malformed template '{template}' at byte {position}: {reason}")]
    MalformedTemplate {
        template: String,
        position: usize,
        reason: String,
    },

    #[error("Template '{template}' references unresolved placeholder '{placeholder}'")]
    UnresolvedPlaceholder {
        template: String,
        placeholder: String,
    },

    #[error("Parameter '{parameter}' is not used by template '{template}'")]
    UnusedParameter { template: String, parameter: String },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::MissingRequiredField { field } => vec![
                format!("The descriptor field '{}' must not be empty", field),
                "Every descriptor needs at least a name and a version".into(),
            ],
            Self::InvalidDescriptor { reason, .. } => vec![
                format!("Details: {}", reason),
                "Check the descriptor file for typos".into(),
            ],
            Self::InvalidToolRelease { .. } => vec![
                "Set tool.version in the configuration file".into(),
                "Or override it with --tool-version".into(),
            ],
            Self::NoBuildTargets => vec!["Pass at least one descriptor file".into()],
            Self::MalformedTemplate { .. }
            | Self::UnresolvedPlaceholder { .. }
            | Self::UnusedParameter { .. } => vec![
                "The Dockerfile template and its parameters disagree".into(),
                "Placeholders use {name}; literal braces are written {{ and }}".into(),
            ],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::MissingRequiredField { .. }
            | Self::InvalidDescriptor { .. }
            | Self::NoBuildTargets => ErrorCategory::Validation,
            Self::InvalidToolRelease { .. } => ErrorCategory::Configuration,
            Self::MalformedTemplate { .. }
            | Self::UnresolvedPlaceholder { .. }
            | Self::UnusedParameter { .. } => ErrorCategory::Template,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Configuration,
    Template,
}
