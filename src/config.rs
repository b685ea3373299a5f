// file: src/config.rs
// description: synchronization configuration loaded from yaml with env overrides
// reference: https://docs.rs/config

use crate::error::{Result, SyncError};
use crate::models::ReadmeMapping;
use crate::utils::Validator;
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_PATH: &str = "scripts/readme-sync-config.yml";
const ENV_PREFIX: &str = "README_SYNC";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Project root that repositories, sources and targets are relative to.
    #[serde(default = "default_base_path")]
    pub base_path: PathBuf,

    /// Documentation root, relative to `base_path`.
    #[serde(default = "default_docs_dir")]
    pub docs_dir: PathBuf,

    #[serde(default = "default_branch")]
    pub default_branch: String,

    #[serde(default = "default_report_file")]
    pub report_file: String,

    #[serde(default)]
    pub repositories: Vec<RepositoryConfig>,

    #[serde(default)]
    pub content_thresholds: ContentThresholds,

    #[serde(default)]
    pub repository_urls: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RepositoryConfig {
    pub name: String,
    #[serde(default)]
    pub main_readme: Option<ReadmeEntry>,
    #[serde(default)]
    pub sub_readmes: Vec<ReadmeEntry>,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct ReadmeEntry {
    pub source: String,
    pub target: String,
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
pub struct ContentThresholds {
    #[serde(default = "default_minimum_length")]
    pub minimum_length: usize,
    #[serde(default = "default_critical_threshold")]
    pub critical_threshold: usize,
}

impl Default for ContentThresholds {
    fn default() -> Self {
        Self {
            minimum_length: default_minimum_length(),
            critical_threshold: default_critical_threshold(),
        }
    }
}

fn default_base_path() -> PathBuf {
    PathBuf::from(".")
}

fn default_docs_dir() -> PathBuf {
    PathBuf::from("docs")
}

fn default_branch() -> String {
    "main".to_string()
}

fn default_report_file() -> String {
    "documentation-needs-report.md".to_string()
}

fn default_minimum_length() -> usize {
    500
}

fn default_critical_threshold() -> usize {
    100
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        dotenv().ok();

        let builder = config::Config::builder()
            .add_source(config::File::from(path))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            );

        Self::build(builder)
    }

    /// Parses a yaml document directly, without file or environment sources.
    pub fn from_yaml(content: &str) -> Result<Self> {
        let builder = config::Config::builder()
            .add_source(config::File::from_str(content, config::FileFormat::Yaml));

        Self::build(builder)
    }

    fn build(builder: config::ConfigBuilder<config::builder::DefaultState>) -> Result<Self> {
        let settings = builder
            .build()
            .map_err(|e| SyncError::Config(e.to_string()))?;

        let config: Config = settings
            .try_deserialize()
            .map_err(|e| SyncError::Config(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    /// Canonical project root. Must exist.
    pub fn project_root(&self) -> Result<PathBuf> {
        fs::canonicalize(&self.base_path).map_err(|e| {
            SyncError::Config(format!(
                "Cannot resolve base_path {}: {}",
                self.base_path.display(),
                e
            ))
        })
    }

    /// Every configured source→target pair, in configuration order.
    pub fn mappings(&self) -> Vec<ReadmeMapping> {
        self.repositories
            .iter()
            .flat_map(|repo| {
                repo.main_readme
                    .iter()
                    .chain(repo.sub_readmes.iter())
                    .map(|entry| ReadmeMapping::new(&repo.name, &entry.source, &entry.target))
            })
            .collect()
    }

    fn validate(&self) -> Result<()> {
        let thresholds = &self.content_thresholds;
        if thresholds.critical_threshold > thresholds.minimum_length {
            return Err(SyncError::Config(format!(
                "critical_threshold ({}) must not exceed minimum_length ({})",
                thresholds.critical_threshold, thresholds.minimum_length
            )));
        }

        for repo in &self.repositories {
            if repo.name.trim().is_empty() {
                return Err(SyncError::Config(
                    "repository name must not be empty".to_string(),
                ));
            }
        }

        for (name, url) in &self.repository_urls {
            Validator::validate_url(url)
                .map_err(|e| SyncError::Config(format!("repository_urls.{}: {}", name, e)))?;
        }

        if self.report_file.trim().is_empty() {
            return Err(SyncError::Config("report_file must not be empty".to_string()));
        }

        Ok(())
    }
}
