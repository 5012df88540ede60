use crate::domain::entities::common::RelativePath;

/// A rendered file ready for materialization.
///
/// This is the output of `to_file_resource`. It contains no business logic,
/// only data, and is consumed once by the write step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileResource {
    path: RelativePath,
    content: String,
}

impl FileResource {
    pub fn new(path: RelativePath, content: String) -> Self {
        Self { path, content }
    }

    pub fn path(&self) -> &RelativePath {
        &self.path
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn size(&self) -> usize {
        self.content.len()
    }
}
