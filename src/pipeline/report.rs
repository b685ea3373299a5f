// file: src/pipeline/report.rs
// description: documentation needs report for pages flagged as sparse
// reference: markdown table generation

use crate::config::ContentThresholds;
use crate::content::Severity;
use crate::error::{Result, SyncError};
use crate::models::{ReportStatus, SparseRecord};
use chrono::{DateTime, SecondsFormat, Utc};
use std::fs;
use std::path::PathBuf;
use tracing::info;

pub struct SyncReportGenerator {
    path: PathBuf,
    thresholds: ContentThresholds,
}

impl SyncReportGenerator {
    pub fn new(path: impl Into<PathBuf>, thresholds: ContentThresholds) -> Self {
        Self {
            path: path.into(),
            thresholds,
        }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Writes the report when at least one page is sparse. In dry-run the rendered
    /// report is handed back instead.
    pub fn generate(&self, records: &[SparseRecord], dry_run: bool) -> Result<ReportStatus> {
        if records.is_empty() {
            info!("No documentation needs report needed - all files have sufficient content");
            return Ok(ReportStatus::Skipped);
        }

        let content = self.render(records, Utc::now());

        if dry_run {
            info!(
                "[DRY RUN] Would generate documentation needs report: {}",
                self.path.display()
            );
            return Ok(ReportStatus::Preview(content));
        }

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| SyncError::file_op(parent, e))?;
        }
        fs::write(&self.path, content).map_err(|e| SyncError::file_op(&self.path, e))?;

        info!("Documentation needs report generated: {}", self.path.display());
        Ok(ReportStatus::Written(self.path.clone()))
    }

    pub fn render(&self, records: &[SparseRecord], generated_at: DateTime<Utc>) -> String {
        let mut sorted: Vec<&SparseRecord> = records.iter().collect();
        sorted.sort_by_key(|r| r.content_length);

        let mut content = format!(
            "# Documentation Needs Report\n\n\
             This report lists all README files that need additional content from the engineering team.\n\n\
             Generated: {}\n\n\
             ## Files Needing Documentation\n\n\
             Total files with minimal content: {}\n\n\
             | Source File | Target Documentation | Current Length | Status |\n\
             |------------|---------------------|----------------|---------|\n",
            generated_at.to_rfc3339_opts(SecondsFormat::Secs, true),
            records.len()
        );

        for record in sorted {
            let severity = Severity::classify(record.content_length, &self.thresholds);
            content.push_str(&format!(
                "| `{}` | `{}` | {} chars | {} |\n",
                record.source,
                record.target,
                record.content_length,
                severity.label()
            ));
        }

        content.push_str(&format!(
            "\n\n## Action Items\n\n\
             1. Review each file listed above\n\
             2. Add comprehensive documentation including:\n   \
             - Overview/Introduction\n   \
             - Prerequisites/Requirements\n   \
             - Installation/Setup instructions\n   \
             - Usage examples\n   \
             - API reference (if applicable)\n   \
             - Troubleshooting guide\n   \
             - Links to related documentation\n\n\
             ## Priority Guidelines\n\n\
             - **{}** (< {} chars): These files are essentially empty and need immediate attention\n\
             - **{}** (< {} chars): These files have some content but need significant expansion\n",
            Severity::Critical.label(),
            self.thresholds.critical_threshold,
            Severity::NeedsExpansion.label(),
            self.thresholds.minimum_length
        ));

        content
    }
}
