//! PSR-4 style mapping from class names to project-relative file paths.

use std::path::PathBuf;

use crate::domain::{
    entities::{class_source::ClassSource, common::RelativePath},
    error::DomainError,
};

/// Where generated classes and their specs live inside the project.
///
/// `App\ReadModel\OrderEntity` with prefix `App` lands in
/// `src/ReadModel/OrderEntity.php`; its spec in
/// `spec/ReadModel/OrderEntitySpec.php`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectLayout {
    source_dir: RelativePath,
    spec_dir: RelativePath,
    namespace_prefix: Vec<String>,
}

impl ProjectLayout {
    pub fn new(
        source_dir: impl Into<PathBuf>,
        spec_dir: impl Into<PathBuf>,
        namespace_prefix: Option<&str>,
    ) -> Result<Self, DomainError> {
        Ok(Self {
            source_dir: RelativePath::try_new(source_dir)?,
            spec_dir: RelativePath::try_new(spec_dir)?,
            namespace_prefix: namespace_prefix
                .map(|p| {
                    p.split('\\')
                        .filter(|s| !s.is_empty())
                        .map(str::to_string)
                        .collect()
                })
                .unwrap_or_default(),
        })
    }

    pub fn namespace_prefix(&self) -> Option<String> {
        if self.namespace_prefix.is_empty() {
            None
        } else {
            Some(self.namespace_prefix.join("\\"))
        }
    }

    /// Destination of a descriptor, relative to the project root.
    ///
    /// Specs are placed by their subject's namespace, so the `spec\` root
    /// namespace never shows up as a directory.
    pub fn resolve(&self, source: &ClassSource) -> Result<RelativePath, DomainError> {
        let (root, namespace_owner) = match source.subject() {
            Some(subject) => (&self.spec_dir, subject),
            None => (&self.source_dir, source.name()),
        };

        let segments = namespace_owner.namespace_segments();
        let relative = segments
            .strip_prefix(self.namespace_prefix.as_slice())
            .ok_or_else(|| DomainError::OutsideNamespacePrefix {
                class_name: source.name().fqn(),
                prefix: self.namespace_prefix.join("\\"),
            })?;

        let mut path = root.clone();
        for segment in relative {
            path = path.join(segment)?;
        }
        path.join(format!("{}.php", source.name().short_name()))
    }
}

impl Default for ProjectLayout {
    fn default() -> Self {
        Self {
            source_dir: RelativePath(PathBuf::from("src")),
            spec_dir: RelativePath(PathBuf::from("spec")),
            namespace_prefix: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::ClassName;
    use std::path::Path;

    fn class(name: &str) -> ClassSource {
        ClassSource::builder(ClassName::parse(name).unwrap())
            .build()
            .unwrap()
    }

    #[test]
    fn default_layout_maps_namespaces_to_directories() {
        let path = ProjectLayout::default()
            .resolve(&class("App\\ReadModel\\OrderEntity"))
            .unwrap();
        assert_eq!(path.as_path(), Path::new("src/App/ReadModel/OrderEntity.php"));
    }

    #[test]
    fn prefix_is_stripped() {
        let layout = ProjectLayout::new("src", "spec", Some("App\\")).unwrap();
        let path = layout.resolve(&class("App\\ReadModel\\OrderEntity")).unwrap();
        assert_eq!(path.as_path(), Path::new("src/ReadModel/OrderEntity.php"));
    }

    #[test]
    fn class_outside_prefix_is_unresolvable() {
        let layout = ProjectLayout::new("src", "spec", Some("App")).unwrap();
        assert!(matches!(
            layout.resolve(&class("Billing\\InvoiceEntity")),
            Err(DomainError::OutsideNamespacePrefix { .. })
        ));
    }

    #[test]
    fn specs_follow_their_subject() {
        let subject = ClassName::parse("App\\ReadModel\\OrderEntity").unwrap();
        let spec = ClassSource::builder(
            subject
                .with_suffix("Spec")
                .under_root_namespace("spec"),
        )
        .spec_of(subject)
        .build()
        .unwrap();

        let layout = ProjectLayout::new("src", "spec", Some("App")).unwrap();
        assert_eq!(
            layout.resolve(&spec).unwrap().as_path(),
            Path::new("spec/ReadModel/OrderEntitySpec.php")
        );
    }

    #[test]
    fn absolute_directories_are_rejected() {
        assert!(ProjectLayout::new("/src", "spec", None).is_err());
    }
}
