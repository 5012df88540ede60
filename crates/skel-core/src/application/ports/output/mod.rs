//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `skel-adapters` crate and the CLI provide implementations.

use std::path::Path;

use crate::domain::{ClassSource, OverwritePolicy};
use crate::error::SkelResult;

/// Port for filesystem operations.
///
/// Implemented by:
/// - `skel_adapters::filesystem::LocalFilesystem` (production)
/// - `skel_adapters::filesystem::MemoryFilesystem` (dry runs, testing)
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem: Send + Sync {
    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> SkelResult<()>;

    /// Write content to a file.
    ///
    /// With [`OverwritePolicy::Fail`] an existing file is left untouched and
    /// `ApplicationError::WriteConflict` is returned.
    fn write_file(&self, path: &Path, content: &str, policy: OverwritePolicy) -> SkelResult<()>;
}

/// Port turning a class descriptor into PHP source text.
///
/// Implemented by `skel_adapters::renderer::PhpRenderer`.
#[cfg_attr(test, mockall::automock)]
pub trait SourceRenderer: Send + Sync {
    /// Render the full file, opening tag included. Must be deterministic.
    fn render(&self, source: &ClassSource) -> SkelResult<String>;
}

/// Port for asking the user questions.
///
/// Implemented by:
/// - `skel-cli`'s terminal and non-interactive prompters
/// - `skel_adapters::prompter::ScriptedPrompter` (testing)
#[cfg_attr(test, mockall::automock)]
pub trait Prompter {
    /// Ask for a line of text. The answer is returned untrimmed.
    fn input(&self, prompt: &str) -> SkelResult<String>;

    /// Ask a yes/no question.
    fn confirm(&self, prompt: &str, default: bool) -> SkelResult<bool>;

    /// Tell the user their last answer was rejected.
    fn notify_invalid(&self, message: &str) {
        let _ = message;
    }
}
