// file: src/models/image.rs
// description: located image reference inside a markdown document
// reference: internal data structures

use std::ops::Range;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageSyntax {
    /// `![alt](path)`
    Markdown,
    /// `<img src="path">`
    Html,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageReference {
    /// Path exactly as written in the document.
    pub raw: String,
    pub document: PathBuf,
    /// 1-based.
    pub line: usize,
    pub syntax: ImageSyntax,
    /// Byte range of `raw` within the document content.
    pub span: Range<usize>,
}

impl ImageReference {
    /// Final path segment of the raw reference.
    pub fn file_name(&self) -> &str {
        self.raw
            .rsplit(['/', '\\'])
            .next()
            .unwrap_or(self.raw.as_str())
    }

    /// URLs, site-absolute paths and in-page anchors.
    pub fn is_external(&self) -> bool {
        is_external_reference(&self.raw)
    }
}

pub fn is_external_reference(raw: &str) -> bool {
    raw.starts_with('/')
        || raw.starts_with('#')
        || raw.starts_with("data:")
        || raw.starts_with("mailto:")
        || raw.contains("://")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference(raw: &str) -> ImageReference {
        ImageReference {
            raw: raw.to_string(),
            document: PathBuf::from("docs/page.md"),
            line: 1,
            syntax: ImageSyntax::Markdown,
            span: 0..raw.len(),
        }
    }

    #[test]
    fn test_file_name() {
        assert_eq!(reference("../img/plot.png").file_name(), "plot.png");
        assert_eq!(reference("plot.png").file_name(), "plot.png");
        assert_eq!(reference("img\\plot.png").file_name(), "plot.png");
    }

    #[test]
    fn test_external_references() {
        assert!(reference("https://example.com/a.png").is_external());
        assert!(reference("http://example.com/a.png").is_external());
        assert!(reference("/assets/images/a.png").is_external());
        assert!(reference("#anchor").is_external());
        assert!(reference("data:image/png;base64,AAAA").is_external());
        assert!(!reference("../img/a.png").is_external());
        assert!(!reference("a.png").is_external());
    }
}
