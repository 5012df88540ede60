//! Core domain layer for skel.
//!
//! This module contains pure read-model generation logic with no I/O. File
//! writing, rendering to text and prompting are handled via ports (traits)
//! defined in the application layer.
//!
//! - **No I/O**: No filesystem, terminal, or external calls
//! - **No external crates**: Only std library + thiserror + serde derives
//! - **Immutable entities**: Descriptors are Clone + PartialEq and never mutated
//!   after `build()`
//! - **Pure templates**: `read_model` and `spec` are deterministic functions

pub mod entities;
pub mod error;
pub mod read_model;
pub mod spec;
pub mod value_objects;

mod validation;

// Re-exports for convenience
pub use entities::{
    class_source::{Method, Property, ReturnType, SourceKind, Visibility},
    common::RelativePath,
    ClassSource, ClassSourceBuilder, FileResource, ProjectLayout,
};

pub use error::{DomainError, ErrorCategory};

pub use value_objects::{
    ClassName, OverwritePolicy, Parameter, Profile, ReadModelName, Role, ScalarType, SpecPolicy,
    TypeRef,
};

pub use validation::DomainValidator;
