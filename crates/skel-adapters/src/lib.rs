//! Infrastructure adapters for skel.
//!
//! This crate implements the ports defined in `skel_core::application::ports`.
//! It contains all external dependencies and I/O operations.

pub mod filesystem;
pub mod prompter;
pub mod renderer;

// Re-export commonly used adapters
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use prompter::ScriptedPrompter;
pub use renderer::PhpRenderer;
