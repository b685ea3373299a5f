// file: src/repository/registry.rs
// description: registered source repositories with their local roots and browse urls
// reference: configurable repository layout

use crate::config::Config;
use crate::error::{Result, SyncError};
use crate::utils::Validator;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{error, info};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryEntry {
    pub name: String,
    pub root: PathBuf,
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct RepositoryRegistry {
    entries: BTreeMap<String, RepositoryEntry>,
    branch: String,
}

impl RepositoryRegistry {
    pub fn new(branch: &str) -> Self {
        Self {
            entries: BTreeMap::new(),
            branch: branch.to_string(),
        }
    }

    /// Union of `repositories[].name` and `repository_urls` keys, each rooted at
    /// `<project_root>/<name>`.
    pub fn from_config(config: &Config, project_root: &Path) -> Self {
        let mut registry = Self::new(&config.default_branch);

        for repo in &config.repositories {
            registry.register(&repo.name, project_root.join(&repo.name), None);
        }

        for (name, url) in &config.repository_urls {
            registry.register(name, project_root.join(name), Some(url.clone()));
        }

        registry
    }

    pub fn register(&mut self, name: &str, root: PathBuf, url: Option<String>) {
        let entry = self
            .entries
            .entry(name.to_string())
            .or_insert_with(|| RepositoryEntry {
                name: name.to_string(),
                root,
                url: None,
            });

        if url.is_some() {
            entry.url = url;
        }
    }

    pub fn get(&self, name: &str) -> Option<&RepositoryEntry> {
        self.entries.get(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> impl Iterator<Item = &RepositoryEntry> {
        self.entries.values()
    }

    pub fn roots(&self) -> impl Iterator<Item = &Path> {
        self.entries.values().map(|e| e.root.as_path())
    }

    /// Fails when any registered root is missing or not a directory. Nothing may
    /// be written before this passes.
    pub fn validate(&self) -> Result<()> {
        let missing: Vec<String> = self
            .entries
            .values()
            .filter_map(|entry| {
                if !entry.root.exists() {
                    Some(entry.name.clone())
                } else if Validator::validate_directory(&entry.root).is_err() {
                    Some(format!("{} (not a directory)", entry.name))
                } else {
                    None
                }
            })
            .collect();

        if !missing.is_empty() {
            error!("Missing source repositories:");
            for repo in &missing {
                error!("  - {}", repo);
            }
            error!("Please clone the required repositories before running sync.");
            return Err(SyncError::MissingRepositories(missing));
        }

        info!("All {} source repositories found", self.entries.len());
        Ok(())
    }

    /// Browse URL for a file inside the named repository, `#` when unknown.
    pub fn browse_url(&self, name: &str, file: &Path) -> String {
        let Some(entry) = self.entries.get(name) else {
            return "#".to_string();
        };
        let Some(base) = entry.url.as_deref() else {
            return "#".to_string();
        };
        let base = base.trim_end_matches('/');

        match Validator::normalize(file).strip_prefix(Validator::normalize(&entry.root)) {
            Ok(inner) if inner.as_os_str().is_empty() => base.to_string(),
            Ok(inner) => format!("{}/blob/{}/{}", base, self.branch, Validator::to_slash(inner)),
            Err(_) => base.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn registry(root: &Path) -> RepositoryRegistry {
        let mut registry = RepositoryRegistry::new("main");
        registry.register(
            "i4h-workflows",
            root.join("i4h-workflows"),
            Some("https://github.com/isaac-for-healthcare/i4h-workflows/".to_string()),
        );
        registry.register("i4h-asset-catalog", root.join("i4h-asset-catalog"), None);
        registry
    }

    #[test]
    fn test_validate_all_present() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join("i4h-workflows")).unwrap();
        fs::create_dir(temp.path().join("i4h-asset-catalog")).unwrap();

        assert!(registry(temp.path()).validate().is_ok());
    }

    #[test]
    fn test_validate_reports_every_missing_repository() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("i4h-workflows"), "not a dir").unwrap();

        let err = registry(temp.path()).validate().unwrap_err();
        match err {
            SyncError::MissingRepositories(names) => assert_eq!(
                names,
                vec![
                    "i4h-asset-catalog".to_string(),
                    "i4h-workflows (not a directory)".to_string()
                ]
            ),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_browse_url() {
        let root = Path::new("/project");
        let registry = registry(root);

        assert_eq!(
            registry.browse_url("i4h-workflows", Path::new("/project/i4h-workflows/workflows/README.md")),
            "https://github.com/isaac-for-healthcare/i4h-workflows/blob/main/workflows/README.md"
        );
        assert_eq!(
            registry.browse_url("i4h-asset-catalog", Path::new("/project/i4h-asset-catalog/README.md")),
            "#"
        );
        assert_eq!(registry.browse_url("unknown", Path::new("/project/unknown/README.md")), "#");
    }

    #[test]
    fn test_url_attached_to_existing_entry() {
        let mut registry = RepositoryRegistry::new("main");
        registry.register("repo", PathBuf::from("/p/repo"), None);
        registry.register("repo", PathBuf::from("/p/repo"), Some("https://x/repo".to_string()));

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get("repo").unwrap().url.as_deref(), Some("https://x/repo"));
    }
}
