//! File emission - descriptor to file on disk.
//!
//! 1. Validate the descriptor and resolve its path through the layout
//! 2. Render it with the `SourceRenderer` port
//! 3. Write it through the `Filesystem` port with the overwrite policy

use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument};

use crate::{
    application::{
        ApplicationError,
        ports::{Filesystem, SourceRenderer},
    },
    domain::{
        ClassSource, DomainError, DomainValidator as validator, FileResource, OverwritePolicy,
        ProjectLayout, spec,
    },
    error::SkelResult,
};

/// Renders descriptors and writes them below a project root.
pub struct FileEmitter {
    renderer: Box<dyn SourceRenderer>,
    filesystem: Box<dyn Filesystem>,
    layout: ProjectLayout,
    root: PathBuf,
    overwrite: OverwritePolicy,
}

impl FileEmitter {
    /// Emitter writing relative to the current directory, refusing to
    /// overwrite.
    pub fn new(
        renderer: Box<dyn SourceRenderer>,
        filesystem: Box<dyn Filesystem>,
        layout: ProjectLayout,
    ) -> Self {
        Self {
            renderer,
            filesystem,
            layout,
            root: PathBuf::new(),
            overwrite: OverwritePolicy::default(),
        }
    }

    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = root.into();
        self
    }

    pub fn with_overwrite(mut self, overwrite: OverwritePolicy) -> Self {
        self.overwrite = overwrite;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn layout(&self) -> &ProjectLayout {
        &self.layout
    }

    /// Render `source` and work out where it belongs. Nothing is written.
    #[instrument(skip_all, fields(class = %source.name()))]
    pub fn to_file_resource(&self, source: &ClassSource) -> SkelResult<FileResource> {
        validator::validate_class_source(source).map_err(|e| invalid(source, e))?;
        let path = self.layout.resolve(source).map_err(|e| invalid(source, e))?;
        let content = self.renderer.render(source)?;

        debug!(path = %path, bytes = content.len(), "Rendered");
        Ok(FileResource::new(path, content))
    }

    /// Write `resource`, creating missing parent directories.
    ///
    /// Returns the path written, joined onto the root.
    #[instrument(skip_all, fields(path = %resource.path()))]
    pub fn emit(&self, resource: &FileResource) -> SkelResult<PathBuf> {
        let path = self.root.join(resource.path());

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            if !self.filesystem.exists(parent) {
                self.filesystem.create_dir_all(parent)?;
            }
        }

        self.filesystem
            .write_file(&path, resource.content(), self.overwrite)?;

        info!(path = %path.display(), "Wrote file");
        Ok(path)
    }

    /// Derive the phpspec specification of `source`.
    pub fn create_paired_spec(&self, source: &ClassSource) -> SkelResult<ClassSource> {
        spec::paired_spec(source).map_err(|e| invalid(source, e))
    }
}

fn invalid(source: &ClassSource, error: DomainError) -> crate::error::SkelError {
    ApplicationError::InvalidDescriptor {
        class_name: source.name().fqn(),
        reason: error.to_string(),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{MockFilesystem, MockSourceRenderer};
    use crate::domain::{ClassName, read_model};
    use crate::error::SkelError;
    use mockall::predicate::{always, eq};

    fn entity() -> ClassSource {
        read_model::entity(
            &ClassName::parse("App\\ReadModel\\OrderEntity").unwrap(),
            &["id:string".parse().unwrap()],
            None,
        )
        .unwrap()
    }

    fn renderer() -> MockSourceRenderer {
        let mut renderer = MockSourceRenderer::new();
        renderer
            .expect_render()
            .returning(|source| Ok(format!("<?php // {}\n", source.name())));
        renderer
    }

    #[test]
    fn file_resource_path_follows_layout() {
        let layout = ProjectLayout::new("src", "spec", Some("App")).unwrap();
        let emitter = FileEmitter::new(
            Box::new(renderer()),
            Box::new(MockFilesystem::new()),
            layout,
        );

        let resource = emitter.to_file_resource(&entity()).unwrap();
        assert_eq!(
            resource.path().as_path(),
            Path::new("src/ReadModel/OrderEntity.php")
        );
        assert_eq!(resource.content(), "<?php // App\\ReadModel\\OrderEntity\n");
    }

    #[test]
    fn equal_descriptors_resolve_to_equal_resources() {
        let emitter = FileEmitter::new(
            Box::new(renderer()),
            Box::new(MockFilesystem::new()),
            ProjectLayout::new("src", "spec", Some("App")).unwrap(),
        );

        let (first, second) = (entity(), entity());
        assert_eq!(first, second);
        assert_eq!(
            emitter.to_file_resource(&first).unwrap(),
            emitter.to_file_resource(&second).unwrap()
        );
    }

    #[test]
    fn unresolvable_path_is_invalid_descriptor() {
        let layout = ProjectLayout::new("src", "spec", Some("Billing")).unwrap();
        let emitter = FileEmitter::new(
            Box::new(renderer()),
            Box::new(MockFilesystem::new()),
            layout,
        );

        assert!(matches!(
            emitter.to_file_resource(&entity()),
            Err(SkelError::Application(ApplicationError::InvalidDescriptor { .. }))
        ));
    }

    #[test]
    fn emit_creates_parent_and_passes_policy() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists()
            .with(eq(PathBuf::from("out/src/App/ReadModel")))
            .return_const(false);
        fs.expect_create_dir_all()
            .with(eq(PathBuf::from("out/src/App/ReadModel")))
            .times(1)
            .returning(|_| Ok(()));
        fs.expect_write_file()
            .with(
                eq(PathBuf::from("out/src/App/ReadModel/OrderEntity.php")),
                always(),
                eq(OverwritePolicy::Overwrite),
            )
            .times(1)
            .returning(|_, _, _| Ok(()));

        let emitter = FileEmitter::new(Box::new(renderer()), Box::new(fs), ProjectLayout::default())
            .with_root("out")
            .with_overwrite(OverwritePolicy::Overwrite);

        let resource = emitter.to_file_resource(&entity()).unwrap();
        let written = emitter.emit(&resource).unwrap();
        assert_eq!(written, PathBuf::from("out/src/App/ReadModel/OrderEntity.php"));
    }

    #[test]
    fn write_conflict_is_propagated() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().return_const(true);
        fs.expect_write_file().returning(|path, _, _| {
            Err(ApplicationError::WriteConflict {
                path: path.to_path_buf(),
            }
            .into())
        });

        let emitter = FileEmitter::new(Box::new(renderer()), Box::new(fs), ProjectLayout::default());
        let resource = emitter.to_file_resource(&entity()).unwrap();
        assert!(matches!(
            emitter.emit(&resource),
            Err(SkelError::Application(ApplicationError::WriteConflict { .. }))
        ));
    }

    #[test]
    fn paired_spec_of_spec_is_invalid_descriptor() {
        let emitter = FileEmitter::new(
            Box::new(renderer()),
            Box::new(MockFilesystem::new()),
            ProjectLayout::default(),
        );
        let spec = emitter.create_paired_spec(&entity()).unwrap();
        assert_eq!(spec.name().fqn(), "spec\\App\\ReadModel\\OrderEntitySpec");
        assert!(matches!(
            emitter.create_paired_spec(&spec),
            Err(SkelError::Application(ApplicationError::InvalidDescriptor { .. }))
        ));
    }
}
