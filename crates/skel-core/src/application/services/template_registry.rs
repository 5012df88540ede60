//! Template Registry - explicit table of class generators.
//!
//! Generators are looked up by key (`read-entity`, `read-repository`, ...)
//! instead of being resolved by name at runtime. Each profile gets its own
//! populated registry from [`TemplateRegistry::for_profile`].

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use tracing::{debug, instrument};

use crate::{
    application::ApplicationError,
    domain::{ClassName, ClassSource, DomainError, Parameter, Profile, Role, read_model},
    error::SkelResult,
};

/// A pure function from (class name, parameters) to a descriptor.
pub type Generator =
    Arc<dyn Fn(&ClassName, &[Parameter]) -> Result<ClassSource, DomainError> + Send + Sync>;

/// Knobs that change what the built-in templates produce.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateOptions {
    /// Parent of persistence-engine entities. `None` uses
    /// [`read_model::DEFAULT_ENTITY_BASE_CLASS`].
    pub entity_base_class: Option<ClassName>,
}

/// Keyed collection of generators.
#[derive(Clone, Default)]
pub struct TemplateRegistry {
    generators: HashMap<String, Generator>,
}

impl TemplateRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry populated with the templates `profile` needs.
    pub fn for_profile(profile: Profile, options: &TemplateOptions) -> SkelResult<Self> {
        let mut registry = Self::new();

        match profile {
            Profile::Plain => {
                registry.register(Role::Entity.template_key(), |class, params| {
                    read_model::entity(class, params, None)
                });
                registry.register(Role::Repository.template_key(), read_model::repository);
            }
            Profile::PersistenceEngine => {
                let base = match &options.entity_base_class {
                    Some(base) => base.clone(),
                    None => ClassName::parse(read_model::DEFAULT_ENTITY_BASE_CLASS)?,
                };
                registry.register(Role::Entity.template_key(), move |class, params| {
                    read_model::entity(class, params, Some(&base))
                });
                registry.register(
                    Role::Repository.template_key(),
                    read_model::persistence_repository,
                );
                registry.register(Role::Factory.template_key(), read_model::factory);
            }
        }
        registry.register(Role::Projector.template_key(), read_model::projector);

        debug!(profile = %profile, templates = registry.generators.len(), "Registry populated");
        Ok(registry)
    }

    /// Register `generator` under `key`, replacing any previous entry.
    pub fn register<F>(&mut self, key: impl Into<String>, generator: F)
    where
        F: Fn(&ClassName, &[Parameter]) -> Result<ClassSource, DomainError> + Send + Sync + 'static,
    {
        self.generators.insert(key.into(), Arc::new(generator));
    }

    /// Build the descriptor for `class_name` with the generator at `key`.
    #[instrument(skip(self, parameters), fields(class = %class_name, params = parameters.len()))]
    pub fn create(
        &self,
        key: &str,
        class_name: &ClassName,
        parameters: &[Parameter],
    ) -> SkelResult<ClassSource> {
        let generator = self
            .generators
            .get(key)
            .ok_or_else(|| ApplicationError::UnknownTemplateKind {
                key: key.to_string(),
            })?;

        generator(class_name, parameters).map_err(|e| {
            ApplicationError::InvalidDescriptor {
                class_name: class_name.fqn(),
                reason: e.to_string(),
            }
            .into()
        })
    }

    pub fn contains(&self, key: &str) -> bool {
        self.generators.contains_key(key)
    }

    /// Registered keys, sorted.
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.generators.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }
}

impl fmt::Debug for TemplateRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TemplateRegistry")
            .field("keys", &self.keys())
            .finish()
    }
}
