pub mod class_source;
pub mod common;
pub mod file_resource;
pub mod layout;

pub use crate::domain::DomainError;
pub use class_source::{ClassSource, ClassSourceBuilder};
pub use file_resource::FileResource;
pub use layout::ProjectLayout;
