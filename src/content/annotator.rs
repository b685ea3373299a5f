// file: src/content/annotator.rs
// description: provenance header, attribution and sparse-content blocks for synchronized pages
// reference: configurable threshold-based classification

use crate::config::ContentThresholds;
use crate::error::Result;
use crate::parser::{Frontmatter, MarkdownParser};
use crate::utils::Validator;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Critical,
    NeedsExpansion,
    Sufficient,
}

impl Severity {
    pub fn classify(content_length: usize, thresholds: &ContentThresholds) -> Self {
        if content_length < thresholds.critical_threshold {
            Severity::Critical
        } else if content_length < thresholds.minimum_length {
            Severity::NeedsExpansion
        } else {
            Severity::Sufficient
        }
    }

    pub fn is_sparse(&self) -> bool {
        !matches!(self, Severity::Sufficient)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Severity::Critical => "❌ Critical",
            Severity::NeedsExpansion => "⚠️ Needs Expansion",
            Severity::Sufficient => "✅ Sufficient",
        }
    }
}

/// Blocks wrapped around a synchronized page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Annotation {
    pub header: String,
    pub attribution: String,
    pub warning: Option<String>,
    pub note: Option<String>,
}

impl Annotation {
    pub fn wrap(&self, content: &str) -> String {
        let mut document = format!("{}\n\n{}\n", self.header, self.attribution);

        if let Some(warning) = &self.warning {
            document.push('\n');
            document.push_str(warning);
            document.push('\n');
        }

        document.push('\n');
        document.push_str(content);

        if let Some(note) = &self.note {
            document.push_str("\n\n---\n\n");
            document.push_str(note);
        }

        document
    }
}

pub struct ContentAnnotator {
    project_root: PathBuf,
    thresholds: ContentThresholds,
    parser: MarkdownParser,
}

impl ContentAnnotator {
    pub fn new(project_root: impl Into<PathBuf>, thresholds: ContentThresholds) -> Self {
        Self {
            project_root: project_root.into(),
            thresholds,
            parser: MarkdownParser::new(),
        }
    }

    pub fn thresholds(&self) -> ContentThresholds {
        self.thresholds
    }

    pub fn classify(&self, content_length: usize) -> Severity {
        Severity::classify(content_length, &self.thresholds)
    }

    /// Builds every block for `source`. `content` is the source text used for the
    /// title; `content_length` is the trimmed length of the rewritten content.
    pub fn annotate(
        &self,
        source: &Path,
        content: &str,
        content_length: usize,
        browse_url: &str,
    ) -> Result<Annotation> {
        let sparse = self.classify(content_length).is_sparse();

        Ok(Annotation {
            header: self.provenance_header(source, content)?,
            attribution: self.attribution(source, browse_url),
            warning: sparse.then(|| self.sparse_warning(content_length)),
            note: sparse.then(|| self.trailing_note(content_length)),
        })
    }

    pub fn relative_source(&self, source: &Path) -> String {
        let relative = source.strip_prefix(&self.project_root).unwrap_or(source);
        Validator::to_slash(relative)
    }

    pub fn provenance_header(&self, source: &Path, content: &str) -> Result<String> {
        Frontmatter::new()
            .with_field("title", &self.title(source, content))
            .with_field("source", &self.relative_source(source))
            .render()
    }

    pub fn attribution(&self, source: &Path, browse_url: &str) -> String {
        format!(
            "!!! info \"Source\"\n    This content is synchronized from [`{}`]({})\n\n    To make changes, please edit the source file and run the synchronization script.",
            self.relative_source(source),
            browse_url
        )
    }

    pub fn sparse_warning(&self, content_length: usize) -> String {
        format!(
            "!!! warning \"Documentation Needed\"\n    This page needs significant content. The source README currently contains only {} characters.\n    See the documentation needs report for details on what content is required.",
            content_length
        )
    }

    pub fn trailing_note(&self, content_length: usize) -> String {
        format!(
            "*Note: This documentation page requires additional content from the engineering team. The current source README file contains only {} characters.*",
            content_length
        )
    }

    /// First level-1 heading, else the containing directory name.
    pub fn title(&self, source: &Path, content: &str) -> String {
        if let Some(title) = self.parser.first_title(content) {
            return title;
        }

        let relative = source.strip_prefix(&self.project_root).unwrap_or(source);
        let parts: Vec<&str> = relative
            .iter()
            .filter_map(|part| part.to_str())
            .collect();

        let mut parent = parts.len().checked_sub(2).map(|i| parts[i]).unwrap_or("");
        if parent == "scripts" && parts.len() > 3 {
            parent = parts[parts.len() - 3];
        }

        title_case(&parent.replace(['_', '-'], " "))
    }
}

/// Uppercases every letter that does not follow another letter, lowercases the rest.
fn title_case(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut previous_alphabetic = false;

    for c in text.chars() {
        if c.is_alphabetic() {
            if previous_alphabetic {
                result.extend(c.to_lowercase());
            } else {
                result.extend(c.to_uppercase());
            }
            previous_alphabetic = true;
        } else {
            result.push(c);
            previous_alphabetic = false;
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn annotator() -> ContentAnnotator {
        ContentAnnotator::new(
            "/project",
            ContentThresholds {
                minimum_length: 500,
                critical_threshold: 100,
            },
        )
    }

    #[test]
    fn test_classification_boundaries() {
        let a = annotator();

        assert_eq!(a.classify(0), Severity::Critical);
        assert_eq!(a.classify(40), Severity::Critical);
        assert_eq!(a.classify(99), Severity::Critical);
        assert_eq!(a.classify(100), Severity::NeedsExpansion);
        assert_eq!(a.classify(300), Severity::NeedsExpansion);
        assert_eq!(a.classify(499), Severity::NeedsExpansion);
        assert_eq!(a.classify(500), Severity::Sufficient);
        assert_eq!(a.classify(600), Severity::Sufficient);
    }

    #[test]
    fn test_severity_labels() {
        assert_eq!(Severity::Critical.label(), "❌ Critical");
        assert_eq!(Severity::NeedsExpansion.label(), "⚠️ Needs Expansion");
        assert_eq!(Severity::Sufficient.label(), "✅ Sufficient");
        assert!(!Severity::Sufficient.is_sparse());
    }

    #[test]
    fn test_title_from_heading() {
        let a = annotator();
        let title = a.title(
            Path::new("/project/repo/README.md"),
            "# [Isaac for Healthcare](https://example.com) Workflows\n\ntext",
        );
        assert_eq!(title, "Isaac for Healthcare Workflows");
    }

    #[test]
    fn test_title_from_directory() {
        let a = annotator();
        assert_eq!(
            a.title(Path::new("/project/i4h-workflows/robotic_ultrasound/README.md"), "no heading"),
            "Robotic Ultrasound"
        );
        assert_eq!(
            a.title(Path::new("/project/i4h-workflows/teleop-app/scripts/README.md"), ""),
            "Teleop App"
        );
        assert_eq!(a.title(Path::new("/project/i4h-workflows/README.md"), ""), "I4H Workflows");
    }

    #[test]
    fn test_header_and_attribution() {
        let a = annotator();
        let source = Path::new("/project/i4h-workflows/workflows/README.md");

        let header = a.provenance_header(source, "# Workflows\n").unwrap();
        assert_eq!(
            header,
            "---\ntitle: Workflows\nsource: i4h-workflows/workflows/README.md\n---"
        );

        let attribution = a.attribution(source, "https://github.com/org/i4h-workflows/blob/main/workflows/README.md");
        assert!(attribution.starts_with("!!! info \"Source\""));
        assert!(attribution.contains(
            "[`i4h-workflows/workflows/README.md`](https://github.com/org/i4h-workflows/blob/main/workflows/README.md)"
        ));
    }

    #[test]
    fn test_sparse_annotation_wraps_content() {
        let a = annotator();
        let annotation = a
            .annotate(Path::new("/project/repo/README.md"), "# Repo\n", 6, "#")
            .unwrap();

        assert!(annotation.warning.as_deref().unwrap().contains("only 6 characters"));

        let document = annotation.wrap("# Repo\n");
        assert!(document.starts_with("---\ntitle: Repo\n"));
        assert!(document.contains("\n\n!!! warning \"Documentation Needed\""));
        assert!(document.contains("\n# Repo\n"));
        assert!(document.ends_with(
            "\n\n---\n\n*Note: This documentation page requires additional content from the engineering team. The current source README file contains only 6 characters.*"
        ));
    }

    #[test]
    fn test_sufficient_annotation_has_no_warning() {
        let a = annotator();
        let annotation = a
            .annotate(Path::new("/project/repo/README.md"), "# Repo\n", 800, "#")
            .unwrap();

        assert!(annotation.warning.is_none());
        assert!(annotation.note.is_none());
        assert_eq!(
            annotation.wrap("body"),
            format!("{}\n\n{}\n\nbody", annotation.header, annotation.attribution)
        );
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("robotic ultrasound"), "Robotic Ultrasound");
        assert_eq!(title_case("SIM ready"), "Sim Ready");
        assert_eq!(title_case("i4h workflows"), "I4H Workflows");
    }
}
