// file: src/pipeline/orchestrator.rs
// description: coordinates registry validation, readme synchronization, image repair and reporting
// reference: sequential synchronization workflow

use crate::assets::{AssetCopier, CopyAction, PathResolver, ResolvedPath};
use crate::config::Config;
use crate::content::ContentAnnotator;
use crate::error::{Result, SyncError};
use crate::models::{ImageStats, MappingResult, ReadmeMapping, SparseRecord, SyncOutcome};
use crate::parser::{MarkdownParser, apply_replacements};
use crate::pipeline::progress::ProgressTracker;
use crate::pipeline::repair::BrokenImageRepairer;
use crate::pipeline::report::SyncReportGenerator;
use crate::repository::RepositoryRegistry;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};

#[derive(Debug, Clone, Copy, Default)]
pub struct SyncOptions {
    pub dry_run: bool,
    pub fix_all_images: bool,
    pub show_progress: bool,
    pub colored: bool,
}

pub struct ReadmeSynchronizer {
    config: Config,
    options: SyncOptions,
    project_root: PathBuf,
    registry: RepositoryRegistry,
    resolver: PathResolver,
    copier: AssetCopier,
    annotator: ContentAnnotator,
    parser: MarkdownParser,
}

impl ReadmeSynchronizer {
    pub fn new(config: Config, options: SyncOptions) -> Result<Self> {
        let project_root = config.project_root()?;
        Ok(Self::with_root(config, options, project_root))
    }

    /// Uses `project_root` as given instead of resolving `base_path`.
    pub fn with_root(config: Config, options: SyncOptions, project_root: PathBuf) -> Self {
        let registry = RepositoryRegistry::from_config(&config, &project_root);
        let resolver = PathResolver::new(project_root.clone(), &config.docs_dir);
        let annotator = ContentAnnotator::new(project_root.clone(), config.content_thresholds);

        Self {
            options,
            registry,
            resolver,
            copier: AssetCopier::new(options.dry_run),
            annotator,
            parser: MarkdownParser::new(),
            project_root,
            config,
        }
    }

    pub fn registry(&self) -> &RepositoryRegistry {
        &self.registry
    }

    pub fn resolver(&self) -> &PathResolver {
        &self.resolver
    }

    /// Full run: precondition check, every mapping, the optional repair pass and
    /// the report. Per-mapping failures never abort the run.
    pub fn sync_all(&self) -> Result<SyncOutcome> {
        if self.options.dry_run {
            info!("Running in DRY RUN mode - no files will be modified");
        }

        self.registry.validate()?;

        let mut outcome = self.sync_readmes();

        if self.options.fix_all_images {
            info!("Scanning documentation for broken image references...");
            let repairer = BrokenImageRepairer::new(
                &self.resolver,
                &self.registry,
                self.copier,
                self.tracker_for(0),
            );
            outcome.repair = Some(repairer.run());
        }

        let report = SyncReportGenerator::new(
            self.resolver.docs_dir().join(&self.config.report_file),
            self.config.content_thresholds,
        );
        outcome.report = report.generate(&outcome.needs_content, self.options.dry_run)?;

        self.log_summary(&outcome);
        Ok(outcome)
    }

    /// Processes every configured mapping. Per-mapping failures are counted and
    /// never stop the loop.
    pub fn sync_readmes(&self) -> SyncOutcome {
        let mappings = self.config.mappings();
        let progress = self.tracker_for(mappings.len());
        let mut outcome = SyncOutcome::new();
        let mut current_repository: Option<&str> = None;

        for mapping in &mappings {
            if current_repository != Some(mapping.repository.as_str()) {
                info!("Processing repository: {}", mapping.repository);
                current_repository = Some(mapping.repository.as_str());
            }

            progress.set_message(mapping.target.clone());

            match self.process_readme(mapping) {
                Ok(result) => {
                    debug!(
                        "Composed {} ({} chars)",
                        result.target.display(),
                        result.content_length
                    );
                    outcome.record_success(result);
                }
                Err(e) => {
                    error!("Failed to sync {}: {}", mapping.source, e);
                    outcome.record_error();
                }
            }

            progress.inc();
        }

        progress.finish("Synchronization complete");
        outcome
    }

    pub fn process_readme(&self, mapping: &ReadmeMapping) -> Result<MappingResult> {
        let source = mapping.source_path(&self.project_root);
        let target = mapping.target_path(&self.project_root);

        if !source.is_file() {
            return Err(SyncError::SourceNotFound(source));
        }

        let content = fs::read_to_string(&source).map_err(|e| SyncError::file_op(&source, e))?;

        let (rewritten, images) = self.fix_image_paths(&content, &source, &target);
        let content_length = rewritten.trim().chars().count();
        let severity = self.annotator.classify(content_length);
        debug!("{}: {} chars, {}", mapping.source, content_length, severity.label());

        let browse_url = self.registry.browse_url(&mapping.repository, &source);
        let annotation = self
            .annotator
            .annotate(&source, &content, content_length, &browse_url)?;
        let document = annotation.wrap(&rewritten);

        if self.options.dry_run {
            info!("[DRY RUN] Would sync: {} -> {}", mapping.source, mapping.target);
        } else {
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent).map_err(|e| SyncError::file_op(parent, e))?;
            }
            fs::write(&target, document).map_err(|e| SyncError::file_op(&target, e))?;
            info!("Synced: {} -> {}", mapping.source, mapping.target);
        }

        let sparse = severity.is_sparse().then(|| {
            warn!(
                "{} has minimal content ({} chars, {})",
                mapping.source,
                content_length,
                severity.label()
            );
            SparseRecord {
                source: mapping.source.clone(),
                target: mapping.target.clone(),
                content_length,
            }
        });

        Ok(MappingResult {
            target,
            content_length,
            sparse,
            images,
        })
    }

    /// Rewrites every image reference in `content` so it resolves from `target`.
    /// Images are copied into the asset directory first; a reference whose copy
    /// fails keeps its original path.
    pub fn fix_image_paths(&self, content: &str, source: &Path, target: &Path) -> (String, ImageStats) {
        let mut stats = ImageStats::default();
        let mut replacements = Vec::new();

        for reference in self.parser.image_references(source, content) {
            match self.resolver.resolve(&reference.raw, source, target) {
                ResolvedPath::Unchanged => {}
                ResolvedPath::Relative(path) => {
                    if path != reference.raw {
                        stats.rewritten += 1;
                        replacements.push((reference.span.clone(), path));
                    }
                }
                ResolvedPath::Asset {
                    source: image,
                    reference: new_path,
                } => {
                    let Some(file_name) = image.file_name().and_then(|n| n.to_str()) else {
                        continue;
                    };
                    let destination = self.resolver.asset_destination(file_name);

                    match self.copier.ensure_fresh(&image, &destination) {
                        Ok(action) => {
                            match action {
                                CopyAction::Copied | CopyAction::WouldCopy => stats.copied += 1,
                                CopyAction::UpToDate => stats.up_to_date += 1,
                            }
                            debug!(
                                "{}:{} {} -> {}",
                                source.display(),
                                reference.line,
                                reference.raw,
                                new_path
                            );
                            stats.rewritten += 1;
                            replacements.push((reference.span.clone(), new_path));
                        }
                        Err(e) => {
                            warn!(
                                "Image {} referenced at {}:{} not copied: {}",
                                reference.raw,
                                source.display(),
                                reference.line,
                                e
                            );
                            stats.failed += 1;
                        }
                    }
                }
            }
        }

        (apply_replacements(content, replacements), stats)
    }

    fn tracker_for(&self, total: usize) -> ProgressTracker {
        if self.options.show_progress {
            ProgressTracker::new(total, self.options.colored)
        } else {
            ProgressTracker::hidden(total)
        }
    }

    fn log_summary(&self, outcome: &SyncOutcome) {
        info!("=== Synchronization Summary ===");
        info!("Processed: {}", outcome.processed);
        info!("Warnings: {}", outcome.warnings);
        info!("Errors: {}", outcome.errors);
        info!(
            "Images: {} rewritten, {} copied, {} up to date, {} failed",
            outcome.images.rewritten,
            outcome.images.copied,
            outcome.images.up_to_date,
            outcome.images.failed
        );

        if let Some(repair) = &outcome.repair {
            info!(
                "Repair: {} files checked, {} fixed, {} images, {} unresolved, {} ambiguous",
                repair.files_checked,
                repair.files_fixed,
                repair.images_fixed,
                repair.unresolved,
                repair.ambiguous
            );
        }
    }
}
