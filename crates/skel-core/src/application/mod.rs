//! Application layer for skel.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (ReadModelService, InputService, FileEmitter)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer but contains no
//! business logic itself. Templates and naming rules live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

pub use services::{
    EmittedFile, FileEmitter, FileKind, GenerationReport, GenerationSession, GenerationStage,
    InputPreset, InputService, ReadModelService, TemplateOptions, TemplateRegistry,
};

// Re-export port traits (for adapter implementation)
pub use ports::{Filesystem, Prompter, SourceRenderer};

pub use error::ApplicationError;
