// file: src/lib.rs
// description: library entry point and public api exports
// reference: rust library patterns
#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/readme.md"))]

pub mod assets;
pub mod config;
pub mod content;
pub mod error;
pub mod models;
pub mod parser;
pub mod pipeline;
pub mod repository;
pub mod utils;

pub use assets::{AssetCopier, CopyAction, PathResolver, ResolvedPath};
pub use config::{Config, ContentThresholds, DEFAULT_CONFIG_PATH, ReadmeEntry, RepositoryConfig};
pub use content::{ContentAnnotator, Severity};
pub use error::{Result, SyncError};
pub use models::{
    ImageReference, ImageStats, ReadmeMapping, RepairStats, ReportStatus, SparseRecord,
    SyncOutcome,
};
pub use parser::{Frontmatter, MarkdownParser};
pub use pipeline::{
    BrokenImageRepairer, ProgressTracker, ReadmeSynchronizer, SyncOptions, SyncReportGenerator,
};
pub use repository::{ImageLocator, ImageMatch, RepositoryRegistry};
pub use utils::Validator;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        let _thresholds = ContentThresholds::default();
        let _resolver = PathResolver::new("/project", "docs");
        let _options = SyncOptions::default();
    }
}
