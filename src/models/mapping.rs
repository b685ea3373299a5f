// file: src/models/mapping.rs
// description: source readme to documentation target mapping
// reference: internal data structures

use std::path::{Path, PathBuf};

/// One configured source→target pair. Both paths are relative to the project root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadmeMapping {
    pub repository: String,
    pub source: String,
    pub target: String,
}

impl ReadmeMapping {
    pub fn new(repository: &str, source: &str, target: &str) -> Self {
        Self {
            repository: repository.to_string(),
            source: source.to_string(),
            target: target.to_string(),
        }
    }

    pub fn source_path(&self, project_root: &Path) -> PathBuf {
        project_root.join(&self.source)
    }

    pub fn target_path(&self, project_root: &Path) -> PathBuf {
        project_root.join(&self.target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_join_project_root() {
        let mapping = ReadmeMapping::new("repo", "repo/README.md", "docs/repo.md");
        let root = Path::new("/project");

        assert_eq!(mapping.source_path(root), PathBuf::from("/project/repo/README.md"));
        assert_eq!(mapping.target_path(root), PathBuf::from("/project/docs/repo.md"));
    }
}
