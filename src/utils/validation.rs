// file: src/utils/validation.rs
// description: path, url and extension checks shared across the sync passes
// reference: input validation patterns

use crate::error::{Result, SyncError};
use std::path::{Component, Path, PathBuf};

pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "svg", "webp"];

pub struct Validator;

impl Validator {
    pub fn validate_directory(path: &Path) -> Result<()> {
        if !path.exists() {
            return Err(SyncError::Validation(format!(
                "Directory does not exist: {}",
                path.display()
            )));
        }

        if !path.is_dir() {
            return Err(SyncError::Validation(format!(
                "Path is not a directory: {}",
                path.display()
            )));
        }

        Ok(())
    }

    pub fn validate_markdown_extension(path: &Path) -> Result<()> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("md") | Some("markdown") => Ok(()),
            _ => Err(SyncError::Validation(format!(
                "File is not a markdown file: {}",
                path.display()
            ))),
        }
    }

    pub fn validate_url(url: &str) -> Result<()> {
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(SyncError::Validation(format!(
                "Invalid URL format: {}",
                url
            )));
        }
        Ok(())
    }

    pub fn is_image(path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .map(|ext| {
                let ext = ext.to_ascii_lowercase();
                IMAGE_EXTENSIONS.contains(&ext.as_str())
            })
            .unwrap_or(false)
    }

    /// Forward-slash rendering used in generated documents and links.
    pub fn to_slash(path: &Path) -> String {
        path.components()
            .filter_map(|c| match c {
                Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
                Component::ParentDir => Some("..".to_string()),
                Component::CurDir => Some(".".to_string()),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join("/")
    }

    /// Lexical normalization: folds `.` and `..` without touching the filesystem.
    pub fn normalize(path: &Path) -> PathBuf {
        let mut normalized = PathBuf::new();

        for component in path.components() {
            match component {
                Component::CurDir => {}
                Component::ParentDir => {
                    if matches!(normalized.components().next_back(), Some(Component::Normal(_))) {
                        normalized.pop();
                    } else if !normalized.has_root() {
                        normalized.push("..");
                    }
                }
                other => normalized.push(other.as_os_str()),
            }
        }

        normalized
    }

    pub fn is_within(path: &Path, base_dir: &Path) -> bool {
        Self::normalize(path).starts_with(Self::normalize(base_dir))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_validate_directory() {
        let temp = TempDir::new().unwrap();
        assert!(Validator::validate_directory(temp.path()).is_ok());
        assert!(Validator::validate_directory(Path::new("/nonexistent")).is_err());

        let file = temp.path().join("file.md");
        std::fs::write(&file, "# Test").unwrap();
        assert!(Validator::validate_directory(&file).is_err());
    }

    #[test]
    fn test_validate_markdown_extension() {
        assert!(Validator::validate_markdown_extension(Path::new("test.md")).is_ok());
        assert!(Validator::validate_markdown_extension(Path::new("test.markdown")).is_ok());
        assert!(Validator::validate_markdown_extension(Path::new("test.txt")).is_err());
    }

    #[test]
    fn test_validate_url() {
        assert!(Validator::validate_url("https://example.com").is_ok());
        assert!(Validator::validate_url("http://example.com").is_ok());
        assert!(Validator::validate_url("example.com").is_err());
        assert!(Validator::validate_url("ftp://example.com").is_err());
    }

    #[test]
    fn test_is_image() {
        assert!(Validator::is_image(Path::new("a/b/plot.png")));
        assert!(Validator::is_image(Path::new("photo.JPG")));
        assert!(Validator::is_image(Path::new("diagram.svg")));
        assert!(!Validator::is_image(Path::new("notes.md")));
        assert!(!Validator::is_image(Path::new("Makefile")));
    }

    #[test]
    fn test_normalize() {
        assert_eq!(
            Validator::normalize(Path::new("/p/repo/docs/../img/./a.png")),
            PathBuf::from("/p/repo/img/a.png")
        );
        assert_eq!(
            Validator::normalize(Path::new("../a/../../b")),
            PathBuf::from("../../b")
        );
        assert_eq!(Validator::normalize(Path::new("/../a")), PathBuf::from("/a"));
    }

    #[test]
    fn test_is_within() {
        assert!(Validator::is_within(Path::new("/p/repo/img/a.png"), Path::new("/p")));
        assert!(!Validator::is_within(Path::new("/p/../other/a.png"), Path::new("/p")));
        assert!(!Validator::is_within(Path::new("/pp/a.png"), Path::new("/p")));
    }

    #[test]
    fn test_to_slash() {
        assert_eq!(Validator::to_slash(Path::new("repo/sub/README.md")), "repo/sub/README.md");
        assert_eq!(Validator::to_slash(Path::new("../../a.png")), "../../a.png");
    }
}
