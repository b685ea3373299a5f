// file: src/pipeline/repair.rs
// description: site-wide repair of image references that do not resolve after publishing
// reference: https://docs.rs/walkdir

use crate::assets::{AssetCopier, PathResolver};
use crate::error::{Result, SyncError};
use crate::models::{ImageReference, RepairStats};
use crate::parser::MarkdownParser;
use crate::pipeline::progress::ProgressTracker;
use crate::repository::{ImageLocator, ImageMatch, RepositoryRegistry};
use crate::utils::Validator;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

const SKIPPED_FILE: &str = "README.md";

pub struct BrokenImageRepairer<'a> {
    resolver: &'a PathResolver,
    registry: &'a RepositoryRegistry,
    copier: AssetCopier,
    progress: ProgressTracker,
    parser: MarkdownParser,
}

impl<'a> BrokenImageRepairer<'a> {
    pub fn new(
        resolver: &'a PathResolver,
        registry: &'a RepositoryRegistry,
        copier: AssetCopier,
        progress: ProgressTracker,
    ) -> Self {
        Self {
            resolver,
            registry,
            copier,
            progress,
            parser: MarkdownParser::new(),
        }
    }

    /// Failures are logged and counted per file and never abort the pass.
    pub fn run(&self) -> RepairStats {
        let mut stats = RepairStats::default();
        let docs_dir = self.resolver.docs_dir();

        if !docs_dir.is_dir() {
            warn!("Documentation directory {} not found, nothing to repair", docs_dir.display());
            return stats;
        }

        let documents = self.documents(docs_dir);
        let locator = ImageLocator::build(self.registry.roots());

        self.progress.set_length(documents.len());
        for document in &documents {
            self.progress
                .set_message(Validator::to_slash(document.strip_prefix(docs_dir).unwrap_or(document)));
            stats.files_checked += 1;

            if let Err(e) = self.repair_file(document, &locator, &mut stats) {
                warn!("Failed to repair {}: {}", document.display(), e);
            }
            self.progress.inc();
        }
        self.progress.finish("Image repair complete");

        info!(
            "Fixed {} images in {} of {} documentation files",
            stats.images_fixed, stats.files_fixed, stats.files_checked
        );
        stats
    }

    /// Every markdown page below the documentation root except `README.md` files.
    fn documents(&self, docs_dir: &Path) -> Vec<PathBuf> {
        let mut documents = Vec::new();

        for entry in WalkDir::new(docs_dir).sort_by_file_name() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Skipping unreadable documentation entry: {}", e);
                    continue;
                }
            };
            let path = entry.path();

            if !entry.file_type().is_file() || entry.file_name() == SKIPPED_FILE {
                continue;
            }
            if Validator::validate_markdown_extension(path).is_ok() {
                documents.push(path.to_path_buf());
            }
        }

        documents
    }

    /// Repairs one page in place. Returns whether its content changed.
    pub fn repair_file(
        &self,
        document: &Path,
        locator: &ImageLocator,
        stats: &mut RepairStats,
    ) -> Result<bool> {
        let content = fs::read_to_string(document).map_err(|e| SyncError::file_op(document, e))?;

        let candidates: BTreeSet<String> = self
            .parser
            .image_references(document, &content)
            .into_iter()
            .filter(|reference| self.is_candidate(reference))
            .map(|reference| reference.raw)
            .collect();

        let mut updates: Vec<(String, String)> = Vec::new();

        for raw in candidates {
            let found = locator.locate(&raw);

            let image = match &found {
                ImageMatch::NotFound => {
                    debug!("No source image for {} in {}", raw, document.display());
                    stats.unresolved += 1;
                    continue;
                }
                ImageMatch::Unique(path) => path,
                ImageMatch::Ambiguous { chosen, candidates } => {
                    warn!(
                        "{} matches {} files, using {}",
                        raw,
                        candidates.len(),
                        chosen.display()
                    );
                    stats.ambiguous += 1;
                    chosen
                }
            };

            let Some(file_name) = image.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            let Some(new_path) = self.resolver.asset_reference(file_name, document) else {
                continue;
            };

            if let Err(e) = self
                .copier
                .ensure_fresh(image, &self.resolver.asset_destination(file_name))
            {
                warn!("Could not copy {}: {}", image.display(), e);
                stats.unresolved += 1;
                continue;
            }

            stats.images_fixed += 1;
            // the asset was missing; the reference itself is already canonical
            if new_path != raw {
                updates.push((raw, new_path));
            }
        }

        updates.sort_by(|(a, _), (b, _)| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));

        let mut repaired = content.clone();
        for (old, new) in &updates {
            let (replaced, count) = replace_references(&repaired, old, new);
            if count > 0 {
                info!("Fixed image path in {}: {} -> {}", document.display(), old, new);
            }
            stats.references_updated += count;
            repaired = replaced;
        }

        if repaired == content {
            return Ok(false);
        }

        stats.files_fixed += 1;
        if self.copier.is_dry_run() {
            info!("[DRY RUN] Would update {}", document.display());
        } else {
            fs::write(document, repaired).map_err(|e| SyncError::file_op(document, e))?;
        }

        Ok(true)
    }

    /// Site-absolute `/assets/...` references missing on disk, and every relative
    /// reference that is not already a canonical path to an existing asset.
    pub fn is_candidate(&self, reference: &ImageReference) -> bool {
        if let Some(site_path) = reference.raw.strip_prefix('/') {
            return site_path.starts_with("assets/")
                && !self.resolver.docs_dir().join(site_path).exists();
        }

        if reference.is_external() {
            return false;
        }

        let file_name = reference.file_name();
        let already_canonical = self
            .resolver
            .asset_reference(file_name, &reference.document)
            .is_some_and(|canonical| canonical == reference.raw)
            && self.resolver.asset_destination(file_name).is_file();

        !already_canonical
    }
}

/// Replaces every occurrence of `old` that is not embedded in a longer path.
fn replace_references(content: &str, old: &str, new: &str) -> (String, usize) {
    let mut result = String::with_capacity(content.len());
    let mut count = 0;
    let mut last = 0;

    for (start, _) in content.match_indices(old) {
        let end = start + old.len();
        let embedded_before = content[..start].chars().next_back().is_some_and(is_path_char);
        let embedded_after = content[end..]
            .chars()
            .next()
            .is_some_and(|c| c != '.' && is_path_char(c));

        if embedded_before || embedded_after {
            continue;
        }

        result.push_str(&content[last..start]);
        result.push_str(new);
        last = end;
        count += 1;
    }

    result.push_str(&content[last..]);
    (result, count)
}

fn is_path_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '/' | '.' | '_' | '-')
}
