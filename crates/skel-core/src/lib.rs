//! skel core - hexagonal read-model generator.
//!
//! This crate provides the domain and application layers for skel, which
//! writes the PHP skeleton of a Broadway read model (entity, repository,
//! factory, projector and their phpspec files), following hexagonal
//! (ports and adapters) architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │             skel-cli (CLI)              │
//! │     (Implements Driving Ports)          │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │ (ReadModelService, InputService, ...)   │
//! │         Orchestrates Use Cases          │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │ (Driven: Filesystem, Renderer, Prompt)  │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │     skel-adapters (Infrastructure)      │
//! │ (LocalFilesystem, PhpRenderer, etc)     │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │        Domain Layer (Pure Logic)        │
//! │ (ClassName, ClassSource, read_model)    │
//! │        No External Dependencies         │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use skel_core::prelude::*;
//!
//! # fn run(
//! #     renderer: Box<dyn SourceRenderer>,
//! #     filesystem: Box<dyn Filesystem>,
//! #     prompter: &dyn Prompter,
//! # ) -> SkelResult<()> {
//! // 1. Pick the templates of a profile
//! let registry = TemplateRegistry::for_profile(Profile::Plain, &TemplateOptions::default())?;
//!
//! // 2. Wire the adapters
//! let emitter = FileEmitter::new(renderer, filesystem, ProjectLayout::default());
//! let service = ReadModelService::new(Profile::Plain, registry, emitter);
//!
//! // 3. Ask for the class name and properties, then generate
//! let session = InputService::default().collect(prompter, &InputPreset::default())?;
//! let report = service.generate(&session, prompter)?;
//! println!("{} files written", report.files.len());
//! # Ok(())
//! # }
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        FileEmitter, GenerationReport, GenerationSession, InputPreset, InputService,
        ReadModelService, TemplateOptions, TemplateRegistry,
        ports::{Filesystem, Prompter, SourceRenderer},
    };
    pub use crate::domain::{
        ClassName, ClassSource, FileResource, OverwritePolicy, Parameter, Profile, ProjectLayout,
        ReadModelName, Role, SpecPolicy, TypeRef,
    };
    pub use crate::error::{SkelError, SkelResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
