//! Application layer errors.
//!
//! These errors represent failures in orchestration, not business logic.
//! Business logic errors are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::{ErrorCategory, SkelError};

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// No generator registered under the requested key.
    #[error("Unknown template kind '{key}'")]
    UnknownTemplateKind { key: String },

    /// A descriptor could not be turned into a file resource.
    #[error("Invalid descriptor for {class_name}: {reason}")]
    InvalidDescriptor { class_name: String, reason: String },

    /// Destination exists and overwriting was not authorized.
    #[error("Refusing to overwrite existing file {path}")]
    WriteConflict { path: PathBuf },

    /// Underlying storage failure.
    #[error("I/O failure at {path}: {reason}")]
    IoFailure { path: PathBuf, reason: String },

    /// Input stayed invalid after every allowed attempt.
    #[error("No valid answer to '{prompt}' after {attempts} attempt(s): {reason}")]
    InvalidUserInput {
        prompt: String,
        attempts: usize,
        reason: String,
    },

    /// The prompt itself could not be shown or answered.
    #[error("Could not ask '{prompt}': {reason}")]
    PromptFailed { prompt: String, reason: String },

    /// Generation stopped part way. Files in `emitted` stay on disk.
    #[error("Generating {class_name} stopped after {} file(s): {cause}", emitted.len())]
    Aborted {
        class_name: String,
        emitted: Vec<PathBuf>,
        cause: Box<SkelError>,
    },

    /// In-memory adapter state was poisoned by a panicking writer.
    #[error("Adapter state lock poisoned")]
    LockPoisoned,
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::UnknownTemplateKind { key } => vec![
                format!("No template is registered as '{key}'"),
                "Try: skel templates to see registered templates".into(),
            ],
            Self::InvalidDescriptor { class_name, .. } => vec![
                format!("Check the name and parameters given for {class_name}"),
                "Parameter names must be unique".into(),
            ],
            Self::WriteConflict { path } => vec![
                format!("File already exists: {}", path.display()),
                "Use --force to overwrite (destructive)".into(),
                "Or choose a different class name".into(),
            ],
            Self::IoFailure { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
                "Check available disk space".into(),
            ],
            Self::InvalidUserInput { .. } => vec![
                "Class names look like Order or App\\ReadModel\\Order".into(),
                "Parameters are a name followed by a type such as string or DateTimeImmutable"
                    .into(),
            ],
            Self::PromptFailed { .. } => vec![
                "Run the command in an interactive terminal".into(),
                "Or pass --class-name and --param with --no-interaction".into(),
            ],
            Self::Aborted { emitted, cause, .. } => {
                let mut suggestions = cause.suggestions();
                if !emitted.is_empty() {
                    suggestions.push("These files were written before the failure:".into());
                    suggestions.extend(emitted.iter().map(|p| format!("  • {}", p.display())));
                }
                suggestions
            }
            Self::LockPoisoned => vec!["Retry the command".into()],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::UnknownTemplateKind { .. } => ErrorCategory::Configuration,
            Self::InvalidDescriptor { .. } => ErrorCategory::Validation,
            Self::WriteConflict { .. } => ErrorCategory::Conflict,
            Self::IoFailure { .. } | Self::LockPoisoned => ErrorCategory::Internal,
            Self::InvalidUserInput { .. } | Self::PromptFailed { .. } => ErrorCategory::Validation,
            Self::Aborted { cause, .. } => cause.category(),
        }
    }
}
