// file: src/models/outcome.rs
// description: per-mapping results and aggregate statistics for one synchronization run
// reference: internal data structures

use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SparseRecord {
    pub source: String,
    pub target: String,
    pub content_length: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImageStats {
    pub rewritten: usize,
    pub copied: usize,
    pub up_to_date: usize,
    pub failed: usize,
}

impl ImageStats {
    pub fn merge(&mut self, other: &ImageStats) {
        self.rewritten += other.rewritten;
        self.copied += other.copied;
        self.up_to_date += other.up_to_date;
        self.failed += other.failed;
    }
}

/// Result of one successfully written (or dry-run) mapping.
#[derive(Debug, Clone)]
pub struct MappingResult {
    pub target: PathBuf,
    pub content_length: usize,
    pub sparse: Option<SparseRecord>,
    pub images: ImageStats,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepairStats {
    pub files_checked: usize,
    pub files_fixed: usize,
    pub images_fixed: usize,
    pub references_updated: usize,
    pub unresolved: usize,
    pub ambiguous: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ReportStatus {
    #[default]
    Skipped,
    Written(PathBuf),
    /// Dry-run: the rendered report that would have been written.
    Preview(String),
}

#[derive(Debug, Clone, Default)]
pub struct SyncOutcome {
    pub processed: usize,
    pub warnings: usize,
    pub errors: usize,
    pub images: ImageStats,
    pub needs_content: Vec<SparseRecord>,
    pub repair: Option<RepairStats>,
    pub report: ReportStatus,
}

impl SyncOutcome {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_success(&mut self, result: MappingResult) {
        self.processed += 1;
        self.images.merge(&result.images);
        if let Some(record) = result.sparse {
            self.warnings += 1;
            self.needs_content.push(record);
        }
    }

    pub fn record_error(&mut self) {
        self.errors += 1;
    }

    pub fn has_errors(&self) -> bool {
        self.errors > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(sparse: Option<SparseRecord>, copied: usize) -> MappingResult {
        MappingResult {
            target: PathBuf::from("docs/page.md"),
            content_length: 42,
            sparse,
            images: ImageStats {
                rewritten: copied,
                copied,
                ..Default::default()
            },
        }
    }

    #[test]
    fn test_record_success_accumulates() {
        let mut outcome = SyncOutcome::new();
        outcome.record_success(result(None, 2));
        outcome.record_success(result(
            Some(SparseRecord {
                source: "repo/README.md".into(),
                target: "docs/page.md".into(),
                content_length: 42,
            }),
            1,
        ));

        assert_eq!(outcome.processed, 2);
        assert_eq!(outcome.warnings, 1);
        assert_eq!(outcome.needs_content.len(), 1);
        assert_eq!(outcome.images.copied, 3);
        assert!(!outcome.has_errors());
    }

    #[test]
    fn test_record_error() {
        let mut outcome = SyncOutcome::new();
        outcome.record_error();
        assert_eq!(outcome.errors, 1);
        assert_eq!(outcome.processed, 0);
        assert!(outcome.has_errors());
    }
}
