// file: src/assets/resolver.rs
// description: path algebra between source repository layout and published documentation layout
// reference: https://doc.rust-lang.org/std/path/

use crate::models::image::is_external_reference;
use crate::utils::Validator;
use std::path::{Component, Path, PathBuf};
use tracing::debug;

/// Canonical asset directory, relative to the documentation root.
pub const ASSETS_SUBDIR: &str = "assets/images";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedPath {
    /// Leave the reference exactly as written.
    Unchanged,
    /// Image that must be copied to the asset directory and referenced from there.
    Asset { source: PathBuf, reference: String },
    /// Non-image file, re-expressed relative to the target document.
    Relative(String),
}

#[derive(Debug, Clone)]
pub struct PathResolver {
    project_root: PathBuf,
    docs_dir: PathBuf,
}

impl PathResolver {
    /// `docs_dir` may be absolute or relative to `project_root`.
    pub fn new(project_root: impl Into<PathBuf>, docs_dir: impl AsRef<Path>) -> Self {
        let project_root = Validator::normalize(&project_root.into());
        let docs_dir = Validator::normalize(&project_root.join(docs_dir));

        Self {
            project_root,
            docs_dir,
        }
    }

    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    pub fn docs_dir(&self) -> &Path {
        &self.docs_dir
    }

    pub fn assets_dir(&self) -> PathBuf {
        self.docs_dir.join(ASSETS_SUBDIR)
    }

    pub fn asset_destination(&self, file_name: &str) -> PathBuf {
        self.assets_dir().join(file_name)
    }

    /// Rewrites `raw`, as written in `source_doc`, so it resolves from `target_doc`
    /// once published.
    pub fn resolve(&self, raw: &str, source_doc: &Path, target_doc: &Path) -> ResolvedPath {
        if is_external_reference(raw) {
            return ResolvedPath::Unchanged;
        }

        let source_dir = source_doc.parent().unwrap_or_else(|| Path::new(""));
        let resolved = Validator::normalize(&source_dir.join(raw));

        if !Validator::is_within(&resolved, &self.project_root) {
            debug!("Reference {} resolves outside the project, keeping it", raw);
            return ResolvedPath::Unchanged;
        }

        if Validator::is_image(&resolved) {
            let Some(file_name) = resolved.file_name().and_then(|n| n.to_str()) else {
                return ResolvedPath::Unchanged;
            };

            return match self.asset_reference(file_name, target_doc) {
                Some(reference) => ResolvedPath::Asset {
                    source: resolved.clone(),
                    reference,
                },
                None => {
                    debug!(
                        "Target {} is outside the documentation root, keeping {}",
                        target_doc.display(),
                        raw
                    );
                    ResolvedPath::Unchanged
                }
            };
        }

        let target_dir = Validator::normalize(target_doc.parent().unwrap_or_else(|| Path::new("")));
        ResolvedPath::Relative(relative_path(&target_dir, &resolved))
    }

    /// Reference from `document` to `assets/images/<file_name>`.
    ///
    /// A page at `docs/a/b.md` is served as `a/b/index.html`, so the number of
    /// `../` segments is the document's component count below the documentation
    /// root: its directory depth plus one.
    pub fn asset_reference(&self, file_name: &str, document: &Path) -> Option<String> {
        let document = Validator::normalize(document);
        let relative = document.strip_prefix(&self.docs_dir).ok()?;
        let depth = relative.components().count();

        Some(format!(
            "{}{}/{}",
            "../".repeat(depth),
            ASSETS_SUBDIR,
            file_name
        ))
    }
}

/// Forward-slash path from directory `from_dir` to `to`. Both must be normalized.
pub fn relative_path(from_dir: &Path, to: &Path) -> String {
    if let Ok(stripped) = to.strip_prefix(from_dir) {
        let direct = Validator::to_slash(stripped);
        return if direct.is_empty() { ".".to_string() } else { direct };
    }

    let from: Vec<Component> = from_dir.components().collect();
    let target: Vec<Component> = to.components().collect();
    let common = from
        .iter()
        .zip(target.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let mut parts: Vec<String> = vec!["..".to_string(); from.len() - common];
    parts.extend(
        target[common..]
            .iter()
            .map(|c| c.as_os_str().to_string_lossy().into_owned()),
    );

    parts.join("/")
}
