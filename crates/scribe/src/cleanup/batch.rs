// ABOUTME: Applies cleanup_markdown to Markdown files on disk, keeping a .backup copy of each.
// ABOUTME: Directory mode walks recursively with jwalk and continues past per-file failures.

use std::fs;
use std::path::{Path, PathBuf};

use jwalk::WalkDir;
use tracing::{debug, info, warn};

use super::{cleanup_markdown, CleanupOptions};
use crate::error::ScribeError;

/// Counts of files handled by a batch run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub processed: usize,
    pub failed: usize,
}

impl BatchReport {
    pub fn merge(&mut self, other: BatchReport) {
        self.processed += other.processed;
        self.failed += other.failed;
    }

    pub fn is_success(&self) -> bool {
        self.failed == 0
    }
}

/// Returns true for `.md` and `.markdown` files.
pub fn is_markdown_file(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|ext| ext.to_str()),
        Some("md") | Some("markdown")
    )
}

fn backup_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(".backup");
    PathBuf::from(name)
}

/// Clean one file in place, first writing the original to `<path>.backup`.
pub fn clean_file(path: &Path, options: &CleanupOptions) -> Result<(), ScribeError> {
    let target = path.display().to_string();
    let original =
        fs::read_to_string(path).map_err(|e| ScribeError::io(&target, "CleanFile", e))?;

    let backup = backup_path(path);
    fs::write(&backup, &original).map_err(|e| ScribeError::io(&target, "Backup", e))?;
    debug!(backup = %backup.display(), "wrote backup");

    let cleaned = cleanup_markdown(&original, options);
    fs::write(path, cleaned).map_err(|e| ScribeError::io(&target, "CleanFile", e))?;
    info!(file = %target, "cleaned");
    Ok(())
}

/// Clean every Markdown file under `dir`, recursively and in sorted order.
///
/// Failures are logged and counted; the walk continues.
pub fn clean_directory(dir: &Path, options: &CleanupOptions) -> BatchReport {
    let mut report = BatchReport::default();
    for entry in WalkDir::new(dir).sort(true).skip_hidden(false) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!(dir = %dir.display(), error = %e, "could not read directory entry");
                report.failed += 1;
                continue;
            }
        };
        let path = entry.path();
        if !entry.file_type().is_file() || !is_markdown_file(&path) {
            continue;
        }
        match clean_file(&path, options) {
            Ok(()) => report.processed += 1,
            Err(e) => {
                warn!(error = %e, "cleanup failed");
                report.failed += 1;
            }
        }
    }
    report
}

/// Clean a single file or a whole directory.
pub fn clean_path(path: &Path, options: &CleanupOptions) -> BatchReport {
    if path.is_dir() {
        return clean_directory(path, options);
    }
    match clean_file(path, options) {
        Ok(()) => BatchReport {
            processed: 1,
            failed: 0,
        },
        Err(e) => {
            warn!(error = %e, "cleanup failed");
            BatchReport {
                processed: 0,
                failed: 1,
            }
        }
    }
}
