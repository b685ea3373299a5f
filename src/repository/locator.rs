// file: src/repository/locator.rs
// description: filename index of images across registered source repositories
// reference: https://docs.rs/walkdir

use crate::utils::Validator;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use walkdir::{DirEntry, WalkDir};

const SKIPPED_DIRS: &[&str] = &["node_modules", "__pycache__", "target", "build", "dist", "venv"];

/// Outcome of looking an image up by filename.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageMatch {
    NotFound,
    Unique(PathBuf),
    /// Several files share the name; `chosen` is the first in walk order.
    Ambiguous {
        chosen: PathBuf,
        candidates: Vec<PathBuf>,
    },
}

impl ImageMatch {
    pub fn path(&self) -> Option<&Path> {
        match self {
            ImageMatch::NotFound => None,
            ImageMatch::Unique(path) => Some(path),
            ImageMatch::Ambiguous { chosen, .. } => Some(chosen),
        }
    }
}

/// Built once per repair pass. Repositories are walked in registry order and
/// each tree in file-name order, so the first match is deterministic.
#[derive(Debug, Default)]
pub struct ImageLocator {
    index: HashMap<String, Vec<PathBuf>>,
}

impl ImageLocator {
    pub fn build<'a>(roots: impl IntoIterator<Item = &'a Path>) -> Self {
        let mut index: HashMap<String, Vec<PathBuf>> = HashMap::new();
        let mut indexed = 0usize;

        for root in roots {
            debug!("Indexing images under {}", root.display());

            for entry in WalkDir::new(root)
                .follow_links(false)
                .sort_by_file_name()
                .into_iter()
                .filter_entry(|e| e.depth() == 0 || !is_skipped_dir(e))
                .filter_map(|e| e.ok())
            {
                if !entry.file_type().is_file() || !Validator::is_image(entry.path()) {
                    continue;
                }

                if let Some(name) = entry.file_name().to_str() {
                    index
                        .entry(name.to_string())
                        .or_default()
                        .push(entry.path().to_path_buf());
                    indexed += 1;
                }
            }
        }

        info!("Indexed {} images in source repositories", indexed);
        Self { index }
    }

    /// Looks up the final path segment of `reference`.
    pub fn locate(&self, reference: &str) -> ImageMatch {
        let file_name = reference.rsplit(['/', '\\']).next().unwrap_or(reference);

        match self.index.get(file_name).map(Vec::as_slice) {
            None | Some([]) => ImageMatch::NotFound,
            Some([only]) => ImageMatch::Unique(only.clone()),
            Some(all) => ImageMatch::Ambiguous {
                chosen: all[0].clone(),
                candidates: all.to_vec(),
            },
        }
    }

    pub fn len(&self) -> usize {
        self.index.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}

fn is_skipped_dir(entry: &DirEntry) -> bool {
    if !entry.file_type().is_dir() {
        return false;
    }

    let name = entry.file_name().to_string_lossy();
    name.starts_with('.') || SKIPPED_DIRS.contains(&name.as_ref())
}
