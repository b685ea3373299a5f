// file: src/assets/copier.rs
// description: staleness-aware image copying into the canonical asset directory
// reference: https://doc.rust-lang.org/std/fs/

use crate::error::{Result, SyncError};
use std::fs;
use std::io;
use std::path::Path;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyAction {
    Copied,
    UpToDate,
    WouldCopy,
}

/// Keeps one file per basename in the asset directory. Idempotent: a copy only
/// happens when the destination is missing or older than the source, and the
/// copy carries the source modification time.
#[derive(Debug, Clone, Copy)]
pub struct AssetCopier {
    dry_run: bool,
}

impl AssetCopier {
    pub fn new(dry_run: bool) -> Self {
        Self { dry_run }
    }

    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    pub fn ensure_fresh(&self, source: &Path, destination: &Path) -> Result<CopyAction> {
        let metadata = fs::metadata(source).map_err(|e| copy_error(source, destination, e))?;
        if !metadata.is_file() {
            return Err(copy_error(
                source,
                destination,
                io::Error::new(io::ErrorKind::InvalidInput, "source is not a regular file"),
            ));
        }

        let source_modified = metadata
            .modified()
            .map_err(|e| copy_error(source, destination, e))?;

        if let Ok(existing) = fs::metadata(destination)
            && let Ok(destination_modified) = existing.modified()
            && source_modified <= destination_modified
        {
            debug!("Image up to date: {}", destination.display());
            return Ok(CopyAction::UpToDate);
        }

        if self.dry_run {
            info!(
                "[DRY RUN] Would copy image: {} -> {}",
                source.display(),
                destination.display()
            );
            return Ok(CopyAction::WouldCopy);
        }

        if let Some(parent) = destination.parent() {
            fs::create_dir_all(parent).map_err(|e| SyncError::file_op(parent, e))?;
        }

        // a stale copy of a read-only source keeps the source permissions
        match fs::remove_file(destination) {
            Err(e) if e.kind() != io::ErrorKind::NotFound => {
                return Err(copy_error(source, destination, e));
            }
            _ => {}
        }

        fs::copy(source, destination).map_err(|e| copy_error(source, destination, e))?;

        open_for_times(destination)
            .and_then(|file| file.set_modified(source_modified))
            .map_err(|e| SyncError::file_op(destination, e))?;

        info!(
            "Copied image: {} -> {}",
            source.display(),
            destination.display()
        );
        Ok(CopyAction::Copied)
    }
}

/// Setting explicit times needs ownership on unix, not write access.
#[cfg(unix)]
fn open_for_times(path: &Path) -> io::Result<fs::File> {
    fs::File::open(path)
}

#[cfg(not(unix))]
fn open_for_times(path: &Path) -> io::Result<fs::File> {
    fs::File::options().write(true).open(path)
}

fn copy_error(from: &Path, to: &Path, source: io::Error) -> SyncError {
    SyncError::AssetCopy {
        from: from.to_path_buf(),
        to: to.to_path_buf(),
        source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, SystemTime};
    use tempfile::TempDir;

    fn touch(path: &Path, modified: SystemTime) {
        fs::File::options()
            .write(true)
            .open(path)
            .unwrap()
            .set_modified(modified)
            .unwrap();
    }

    #[test]
    fn test_copies_when_missing_then_up_to_date() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("repo/img/plot.png");
        fs::create_dir_all(source.parent().unwrap()).unwrap();
        fs::write(&source, b"png-bytes").unwrap();
        let destination = temp.path().join("docs/assets/images/plot.png");

        let copier = AssetCopier::new(false);
        assert_eq!(copier.ensure_fresh(&source, &destination).unwrap(), CopyAction::Copied);
        assert_eq!(fs::read(&destination).unwrap(), b"png-bytes");
        assert_eq!(
            fs::metadata(&destination).unwrap().modified().unwrap(),
            fs::metadata(&source).unwrap().modified().unwrap()
        );

        assert_eq!(copier.ensure_fresh(&source, &destination).unwrap(), CopyAction::UpToDate);
    }

    #[test]
    fn test_recopies_when_source_newer() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("plot.png");
        let destination = temp.path().join("assets/plot.png");
        fs::write(&source, b"v1").unwrap();

        let copier = AssetCopier::new(false);
        copier.ensure_fresh(&source, &destination).unwrap();

        fs::write(&source, b"v2").unwrap();
        touch(&source, SystemTime::now() + Duration::from_secs(60));

        assert_eq!(copier.ensure_fresh(&source, &destination).unwrap(), CopyAction::Copied);
        assert_eq!(fs::read(&destination).unwrap(), b"v2");
    }

    #[test]
    fn test_newer_destination_is_kept() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("plot.png");
        let destination = temp.path().join("plot-copy.png");
        fs::write(&source, b"source").unwrap();
        fs::write(&destination, b"edited").unwrap();
        touch(&source, SystemTime::now() - Duration::from_secs(3600));

        let copier = AssetCopier::new(false);
        assert_eq!(copier.ensure_fresh(&source, &destination).unwrap(), CopyAction::UpToDate);
        assert_eq!(fs::read(&destination).unwrap(), b"edited");
    }

    #[test]
    fn test_dry_run_does_not_touch_filesystem() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("plot.png");
        fs::write(&source, b"png").unwrap();
        let destination = temp.path().join("docs/assets/images/plot.png");

        let copier = AssetCopier::new(true);
        assert!(copier.is_dry_run());
        assert_eq!(copier.ensure_fresh(&source, &destination).unwrap(), CopyAction::WouldCopy);
        assert!(!temp.path().join("docs").exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_read_only_source_copies_and_stays_idempotent() {
        use std::os::unix::fs::PermissionsExt;

        let temp = TempDir::new().unwrap();
        let source = temp.path().join("repo/plot.png");
        fs::create_dir_all(source.parent().unwrap()).unwrap();
        fs::write(&source, b"v1").unwrap();
        fs::set_permissions(&source, fs::Permissions::from_mode(0o444)).unwrap();
        let destination = temp.path().join("docs/assets/images/plot.png");

        let copier = AssetCopier::new(false);
        assert_eq!(copier.ensure_fresh(&source, &destination).unwrap(), CopyAction::Copied);
        assert_eq!(
            fs::metadata(&destination).unwrap().modified().unwrap(),
            fs::metadata(&source).unwrap().modified().unwrap()
        );
        assert_eq!(copier.ensure_fresh(&source, &destination).unwrap(), CopyAction::UpToDate);

        fs::set_permissions(&source, fs::Permissions::from_mode(0o644)).unwrap();
        fs::write(&source, b"v2").unwrap();
        touch(&source, SystemTime::now() + Duration::from_secs(60));
        fs::set_permissions(&source, fs::Permissions::from_mode(0o444)).unwrap();

        assert_eq!(copier.ensure_fresh(&source, &destination).unwrap(), CopyAction::Copied);
        assert_eq!(fs::read(&destination).unwrap(), b"v2");
    }

    #[test]
    fn test_missing_source_is_an_error() {
        let temp = TempDir::new().unwrap();
        let copier = AssetCopier::new(false);
        let err = copier
            .ensure_fresh(&temp.path().join("missing.png"), &temp.path().join("out.png"))
            .unwrap_err();

        assert!(matches!(err, SyncError::AssetCopy { .. }));
        assert!(!temp.path().join("out.png").exists());
    }
}
