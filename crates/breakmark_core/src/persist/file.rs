//! File IO for the persisted breakpoint list.
//!
//! # Responsibility
//! - Read the persisted file, treating a missing file as empty.
//! - Replace the persisted file atomically via temp file + rename.
//!
//! # Invariants
//! - The destination is only touched by the final rename.
//! - A failed write removes its temp file and keeps the previous contents.

use super::{PersistError, PersistResult};
use log::{error, info};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tempfile::NamedTempFile;

/// Reads the persisted file.
///
/// Returns `Ok(None)` when the file does not exist yet.
pub fn read_store_file(path: &Path) -> PersistResult<Option<String>> {
    match std::fs::read_to_string(path) {
        Ok(text) => Ok(Some(text)),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
        Err(err) => {
            error!(
                "event=store_read module=persist status=error error_code=read_failed error={}",
                err
            );
            Err(PersistError::Read {
                path: path.to_path_buf(),
                source: err,
            })
        }
    }
}

/// Replaces `path` with `text` atomically.
///
/// # Side effects
/// - Creates the parent directory when missing.
/// - Emits `store_write` logging events with duration and status.
pub fn write_store_file_atomically(path: &Path, text: &str) -> PersistResult<()> {
    let started_at = Instant::now();
    match write_via_temp_file(path, text) {
        Ok(()) => {
            info!(
                "event=store_write module=persist status=ok bytes={} duration_ms={}",
                text.len(),
                started_at.elapsed().as_millis()
            );
            Ok(())
        }
        Err(err) => {
            error!(
                "event=store_write module=persist status=error duration_ms={} error_code=write_failed error={}",
                started_at.elapsed().as_millis(),
                err
            );
            Err(PersistError::Write {
                path: path.to_path_buf(),
                source: err,
            })
        }
    }
}

fn write_via_temp_file(path: &Path, text: &str) -> std::io::Result<()> {
    let parent = path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));
    std::fs::create_dir_all(&parent)?;

    // Dropping `tmp` on any early return deletes the temp file.
    let mut tmp = NamedTempFile::new_in(&parent)?;
    tmp.write_all(text.as_bytes())?;
    tmp.flush()?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|err| err.error)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{read_store_file, write_store_file_atomically};
    use crate::persist::PersistError;

    #[test]
    fn missing_file_reads_as_none() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("absent");
        assert!(read_store_file(&path).expect("read missing").is_none());
    }

    #[test]
    fn write_creates_parent_and_replaces_contents() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("nested").join("saved-breakpoints");

        write_store_file_atomically(&path, "first\n").expect("first write");
        write_store_file_atomically(&path, "second\n").expect("second write");

        let text = read_store_file(&path).expect("read").expect("file exists");
        assert_eq!(text, "second\n");
        let entries = std::fs::read_dir(path.parent().expect("parent"))
            .expect("list dir")
            .count();
        assert_eq!(entries, 1, "temp files must not be left behind");
    }

    #[test]
    fn failed_write_leaves_no_partial_state() {
        let dir = tempfile::tempdir().expect("temp dir");
        let blocker = dir.path().join("not-a-dir");
        std::fs::write(&blocker, "occupied").expect("create blocker file");
        let path = blocker.join("saved-breakpoints");

        let err = write_store_file_atomically(&path, "data\n").expect_err("write must fail");
        assert!(matches!(err, PersistError::Write { .. }));
        assert_eq!(
            std::fs::read_to_string(&blocker).expect("blocker intact"),
            "occupied"
        );
    }
}
