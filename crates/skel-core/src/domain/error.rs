// ============================================================================
// domain/error.rs - READ-MODEL DOMAIN ERRORS
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (they travel inside `Aborted` application errors)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors (400-level equivalent)
    // ========================================================================
    #[error("Invalid class name '{name}': {reason}")]
    InvalidClassName { name: String, reason: String },

    #[error("Class name '{name}' must not end with the '{suffix}' suffix")]
    SuffixedBaseName { name: String, suffix: &'static str },

    #[error("Invalid parameter '{input}': {reason}")]
    InvalidParameter { input: String, reason: String },

    #[error("Invalid type '{input}': {reason}")]
    InvalidType { input: String, reason: String },

    #[error("Duplicate {member} '{name}' in class {class_name}")]
    DuplicateMember {
        class_name: String,
        member: &'static str,
        name: String,
    },

    #[error("Parameter '{name}' was already given")]
    DuplicateParameter { name: String },

    #[error("Absolute paths not allowed: {path}")]
    AbsolutePathNotAllowed { path: String },

    // ========================================================================
    // Resolution Errors
    // ========================================================================
    #[error("Class {class_name} is outside the namespace prefix '{prefix}'")]
    OutsideNamespacePrefix { class_name: String, prefix: String },

    #[error("{class_name} is already a specification and cannot be paired")]
    SpecOfSpec { class_name: String },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidClassName { .. } => vec![
                "Class names are PHP identifiers separated by '\\'".into(),
                "Examples: Order, App\\ReadModel\\Order".into(),
            ],
            Self::SuffixedBaseName { suffix, .. } => vec![
                format!("Drop the '{suffix}' suffix, it is appended automatically"),
                "Example: Order generates OrderEntity, OrderRepository, ...".into(),
            ],
            Self::InvalidParameter { .. } | Self::DuplicateParameter { .. } => vec![
                "Parameters are written as name:type".into(),
                "Examples: id:string, placedAt:DateTimeImmutable".into(),
            ],
            Self::InvalidType { .. } => vec![
                "Use a scalar (int, float, string, bool, array, mixed)".into(),
                "Or a class name such as DateTimeImmutable".into(),
            ],
            Self::OutsideNamespacePrefix { prefix, .. } => vec![
                format!("Put the class under the '{prefix}' namespace"),
                "Or change layout.namespace_prefix in your configuration".into(),
            ],
            _ => vec!["See documentation for more details".into()],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidClassName { .. }
            | Self::SuffixedBaseName { .. }
            | Self::InvalidParameter { .. }
            | Self::InvalidType { .. }
            | Self::DuplicateParameter { .. } => ErrorCategory::Validation,
            Self::OutsideNamespacePrefix { .. } => ErrorCategory::Configuration,
            _ => ErrorCategory::Internal,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Configuration,
    Internal,
}
