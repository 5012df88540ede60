//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish
//! high-level use cases like "collect input" or "generate a read model".

pub mod emission_service;
pub mod input_service;
pub mod read_model_service;
pub mod template_registry;

pub use emission_service::FileEmitter;
pub use input_service::{GenerationSession, InputPreset, InputService};
pub use read_model_service::{
    EmittedFile, FileKind, GenerationReport, GenerationStage, ReadModelService, spec_question,
};
pub use template_registry::{Generator, TemplateOptions, TemplateRegistry};
